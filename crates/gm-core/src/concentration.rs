//! Concentration quantities.
//!
//! A concentration is a dimensionless [`Ratio`] (1.0 == 100 %) tagged with the unit it
//! should be presented in. The tag never changes the physical value; it only picks
//! the most readable scale for display.
//!
//! Parsing accepts bare numbers and the usual fraction suffixes:
//!
//! - `"0.01"`, `"1%"`, `"1 pct"`, `"1 percent"`
//! - `"50 ppm"`, `"1 kppm"` (one thousand ppm), `"12 ppb"`, `"3 ppt"`
//!
//! Strings carrying a physical unit (`"5 m"`, `"1.293 g/L"`) are rejected with
//! [`UnitError::Incompatible`] so callers can tell "wrong dimension" apart from
//! "garbage".

use std::fmt;

use thiserror::Error;

use crate::units::{Ratio, fraction_of, percent, ppb, ppm, ppt, unitless};

/// Error in unit parsing or conversion.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum UnitError {
    /// Input text did not parse to a number + optional unit
    #[error("Parse error: {0}")]
    ParseError(String),

    /// Unit not recognized at all
    #[error("Unknown unit '{unit}' for {quantity}")]
    UnknownUnit { unit: String, quantity: String },

    /// Unit recognized but of the wrong dimension (e.g. a length where a fraction is expected)
    #[error("Unit '{unit}' is not compatible with {expected}")]
    Incompatible { unit: String, expected: String },

    /// Value out of physical range
    #[error("Value {value} out of range: {reason}")]
    OutOfRange { value: f64, reason: String },
}

/// Display unit for a concentration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ConcentrationUnit {
    Percent,
    PartsPerMillion,
    PartsPerBillion,
    Dimensionless,
}

impl ConcentrationUnit {
    /// Pick the most readable unit for a fraction, by absolute magnitude.
    ///
    /// | magnitude      | unit    |
    /// |----------------|---------|
    /// | `>= 1e-4`      | percent |
    /// | `>= 1e-6`      | ppm     |
    /// | `> 0`          | ppb     |
    /// | `== 0`         | none    |
    pub fn for_fraction(fraction: f64) -> Self {
        let magnitude = fraction.abs();
        if magnitude >= 1e-4 {
            Self::Percent
        } else if magnitude >= 1e-6 {
            Self::PartsPerMillion
        } else if magnitude > 0.0 {
            Self::PartsPerBillion
        } else {
            Self::Dimensionless
        }
    }

    /// Number of display units in one whole (1.0 fraction).
    pub fn scale(&self) -> f64 {
        match self {
            Self::Percent => 1e2,
            Self::PartsPerMillion => 1e6,
            Self::PartsPerBillion => 1e9,
            Self::Dimensionless => 1.0,
        }
    }

    pub fn suffix(&self) -> &'static str {
        match self {
            Self::Percent => "%",
            Self::PartsPerMillion => " ppm",
            Self::PartsPerBillion => " ppb",
            Self::Dimensionless => "",
        }
    }
}

/// A concentration value with its display unit.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Concentration {
    value: Ratio,
    unit: ConcentrationUnit,
}

impl Concentration {
    /// Tag a ratio with the display unit chosen by [`ConcentrationUnit::for_fraction`].
    pub fn normalized(value: Ratio) -> Self {
        Self {
            unit: ConcentrationUnit::for_fraction(fraction_of(value)),
            value,
        }
    }

    /// Tag a ratio with an explicit display unit.
    pub fn with_unit(value: Ratio, unit: ConcentrationUnit) -> Self {
        Self { value, unit }
    }

    pub fn from_fraction(fraction: f64) -> Self {
        Self::normalized(unitless(fraction))
    }

    pub fn value(&self) -> Ratio {
        self.value
    }

    pub fn unit(&self) -> ConcentrationUnit {
        self.unit
    }

    /// Plain fraction (1.0 == 100 %).
    pub fn fraction(&self) -> f64 {
        fraction_of(self.value)
    }

    /// Magnitude expressed in the display unit.
    pub fn magnitude(&self) -> f64 {
        self.fraction() * self.unit.scale()
    }
}

impl fmt::Display for Concentration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut text = format!("{:.3}", self.magnitude());
        if text.contains('.') {
            let trimmed = text.trim_end_matches('0').trim_end_matches('.').len();
            text.truncate(trimmed);
        }
        if text == "-0" {
            text = "0".to_string();
        }
        write!(f, "{}{}", text, self.unit.suffix())
    }
}

/// Units that name a physical dimension rather than a fraction.
const PHYSICAL_UNITS: &[&str] = &[
    "m", "cm", "mm", "km", "l", "ml", "g", "kg", "mg", "s", "sec", "min", "h", "k", "degc",
    "°c", "c", "f", "pa", "kpa", "mpa", "hpa", "bar", "mbar", "atm", "psi", "psia", "psig",
    "torr", "j", "w", "n", "g/l", "kg/m^3", "kg/m3", "cal/g", "sccm", "ccm", "lpm",
];

/// Parse a concentration from text (e.g. `"1%"`, `"50 ppm"`, `"0.25"`).
pub fn parse_concentration(raw_text: &str) -> Result<Ratio, UnitError> {
    let (value, unit) = split_value_and_unit(raw_text)?;

    let ratio = match unit.to_lowercase().as_str() {
        "" | "dimensionless" | "ratio" => unitless(value),
        "%" | "pct" | "percent" => percent(value),
        "ppm" => ppm(value),
        "kppm" => ppm(value * 1e3),
        "ppb" => ppb(value),
        "ppt" => ppt(value),
        other if PHYSICAL_UNITS.contains(&other) => {
            return Err(UnitError::Incompatible {
                unit: unit.to_string(),
                expected: "a dimensionless concentration".to_string(),
            });
        }
        _ => {
            return Err(UnitError::UnknownUnit {
                unit: unit.to_string(),
                quantity: "Concentration".to_string(),
            });
        }
    };

    if !value.is_finite() {
        return Err(UnitError::OutOfRange {
            value,
            reason: "Concentration must be finite".to_string(),
        });
    }

    Ok(ratio)
}

/// Split a value+unit string into (numeric_value, unit_string).
///
/// Examples:
/// - "1%" -> (1.0, "%")
/// - "50 ppm" -> (50.0, "ppm")
/// - "0.25" -> (0.25, "")
fn split_value_and_unit(input: &str) -> Result<(f64, String), UnitError> {
    let trimmed = input.trim();

    // Find where the numeric part ends
    let split_idx = trimmed
        .find(|c: char| {
            !c.is_ascii_digit() && c != '.' && c != '-' && c != '+' && c != 'e' && c != 'E'
        })
        .unwrap_or(trimmed.len());

    let (num_part, unit_part) = trimmed.split_at(split_idx);
    let num_part = num_part.trim();
    let unit_part = unit_part.trim();

    let value: f64 = num_part.parse().map_err(|_| {
        UnitError::ParseError(format!("Could not parse numeric value from '{}'", input))
    })?;

    Ok((value, unit_part.to_string()))
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn normalization_is_idempotent(fraction in 0.0_f64..1.0_f64) {
            let first = Concentration::from_fraction(fraction);
            let second = Concentration::normalized(first.value());
            prop_assert_eq!(first, second);
        }

        #[test]
        fn display_magnitude_stays_readable(fraction in 1e-12_f64..1.0_f64) {
            let c = Concentration::from_fraction(fraction);
            prop_assert!(c.magnitude() >= 1e-3);
        }
    }
}
