//! Gas engine errors.

use gm_core::{CoreError, UnitError};
use thiserror::Error;

/// Result type for gas operations.
pub type GasResult<T> = Result<T, GasError>;

/// Errors that can occur while building or combining gas mixtures.
///
/// `NegativeQuantity` is a specialised calculation failure; use
/// [`GasError::is_calculation`] to match both.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GasError {
    /// A concentration fraction is below zero.
    #[error("Gas concentration cannot be below zero (got {fraction})")]
    NegativeQuantity { fraction: f64 },

    /// Composition over 100 %, missing physical constants, or a bad scaling factor.
    #[error("Calculation error: {message}")]
    Calculation { message: String },

    /// Two mixtures with different balance gases were combined.
    #[error("Incompatible balance components {left} != {right}")]
    Mixing { left: String, right: String },

    /// Gas name not present in the registry.
    #[error("Unknown gas \"{name}\" (from: \"{fragment}\")")]
    UnknownGas { name: String, fragment: String },

    /// Malformed mixture specification (missing or repeated balance, etc.).
    #[error("Invalid gas specification: {what}")]
    InvalidSpec { what: String },

    /// Concentration text could not be parsed.
    #[error(transparent)]
    Unit(#[from] UnitError),
}

impl GasError {
    pub(crate) fn calculation(message: impl Into<String>) -> Self {
        Self::Calculation {
            message: message.into(),
        }
    }

    /// True for `Calculation` and its `NegativeQuantity` refinement.
    pub fn is_calculation(&self) -> bool {
        matches!(self, Self::Calculation { .. } | Self::NegativeQuantity { .. })
    }
}

impl From<CoreError> for GasError {
    fn from(err: CoreError) -> Self {
        Self::calculation(err.to_string())
    }
}

impl From<GasError> for CoreError {
    fn from(err: GasError) -> Self {
        let what = err.to_string();
        if err.is_calculation() {
            CoreError::Invariant { what }
        } else {
            CoreError::InvalidArg { what }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = GasError::UnknownGas {
            name: "soup".into(),
            fragment: "1% soup".into(),
        };
        assert!(err.to_string().contains("soup"));
        assert!(err.to_string().contains("1% soup"));

        let err = GasError::Mixing {
            left: "99% Air".into(),
            right: "99% N_2".into(),
        };
        assert!(err.to_string().contains("N_2"));
    }

    #[test]
    fn negative_quantity_is_calculation() {
        assert!(GasError::NegativeQuantity { fraction: -0.1 }.is_calculation());
        assert!(GasError::calculation("over 100%").is_calculation());
        assert!(
            !GasError::InvalidSpec {
                what: "no balance".into()
            }
            .is_calculation()
        );
    }

    #[test]
    fn error_to_core_error() {
        let core: CoreError = GasError::calculation("sum").into();
        assert!(matches!(core, CoreError::Invariant { .. }));

        let core: CoreError = GasError::InvalidSpec { what: "x".into() }.into();
        assert!(matches!(core, CoreError::InvalidArg { .. }));
    }
}
