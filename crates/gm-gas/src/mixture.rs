//! Gas mixtures: validation, arithmetic and derived properties.

use std::fmt;
use std::sync::Arc;

use gm_core::numeric::{COMPOSITION_TOLERANCE, ensure_finite};
use gm_core::units::{Ratio, fraction_of, unitless};
use gm_core::{Concentration, ConcentrationUnit, UnitError, parse_concentration};

use crate::component::Component;
use crate::error::{GasError, GasResult};
use crate::species::{ChemicalProperties, GCF_CONSTANT, normalize_name};

/// Anything that can scale a mixture: plain numbers or dimensionless quantities.
///
/// Typed physical quantities cannot be passed at all; text with a physical unit is
/// rejected at runtime with [`GasError::Calculation`].
pub trait ScaleFactor {
    fn factor(&self) -> GasResult<f64>;
}

impl ScaleFactor for f64 {
    fn factor(&self) -> GasResult<f64> {
        Ok(*self)
    }
}

impl ScaleFactor for Ratio {
    fn factor(&self) -> GasResult<f64> {
        Ok(fraction_of(*self))
    }
}

impl ScaleFactor for Concentration {
    fn factor(&self) -> GasResult<f64> {
        Ok(self.fraction())
    }
}

impl ScaleFactor for &str {
    fn factor(&self) -> GasResult<f64> {
        match parse_concentration(self) {
            Ok(ratio) => Ok(fraction_of(ratio)),
            Err(UnitError::Incompatible { unit, .. } | UnitError::UnknownUnit { unit, .. }) => {
                Err(GasError::calculation(format!(
                    "Multiplication factor must be dimensionless (got unit '{}')",
                    unit
                )))
            }
            Err(other) => Err(other.into()),
        }
    }
}

/// A complete gas blend: trace components plus exactly one balance gas.
///
/// Invariants, checked on every construction:
/// - components + balance sum to at most 100 % (within one part per trillion)
/// - components are ordered by descending concentration
#[derive(Debug, Clone, PartialEq)]
pub struct Mixture {
    components: Vec<Component>,
    balance: Component,
}

impl Mixture {
    /// Build a mixture from explicit components and balance.
    pub fn new(mut components: Vec<Component>, balance: Component) -> GasResult<Self> {
        let total = balance.fraction() + components.iter().map(Component::fraction).sum::<f64>();

        if total - 1.0 > COMPOSITION_TOLERANCE {
            return Err(over_full(total, &components, &balance.to_string()));
        }

        // Stable sort keeps input order for equal concentrations.
        components.sort_by(|a, b| b.fraction().total_cmp(&a.fraction()));

        Ok(Self {
            components,
            balance,
        })
    }

    /// Build a mixture whose balance fills whatever the components leave free.
    ///
    /// A remainder that is negative by no more than one part per trillion is float
    /// noise and gives a balance of exactly zero; anything below that is rejected.
    pub fn auto_balance(
        components: Vec<Component>,
        balance: Arc<ChemicalProperties>,
    ) -> GasResult<Self> {
        let trace: f64 = components.iter().map(Component::fraction).sum();
        let remainder = 1.0 - trace;

        if remainder < -COMPOSITION_TOLERANCE {
            return Err(over_full(trace, &components, &balance.to_string()));
        }

        let balance = Component::from_fraction(remainder.max(0.0), balance)?;
        Self::new(components, balance)
    }

    pub fn components(&self) -> &[Component] {
        &self.components
    }

    pub fn balance(&self) -> &Component {
        &self.balance
    }

    /// Component for a gas name (registry-normalized match), if present.
    pub fn component(&self, name: &str) -> Option<&Component> {
        let key = normalize_name(name);
        self.components
            .iter()
            .find(|c| c.properties().registry_key() == key)
    }

    /// Components followed by the balance.
    pub fn iter_all(&self) -> impl Iterator<Item = &Component> + '_ {
        self.components.iter().chain(std::iter::once(&self.balance))
    }

    /// True if the balance or any component carries humidity.
    pub fn is_humid(&self) -> bool {
        self.iter_all().any(|c| c.properties().is_humid())
    }

    /// Humid fraction carried by the trace components only.
    pub fn trace_humid_ratio(&self) -> Concentration {
        humid_sum(self.components.iter())
    }

    /// Humid fraction including a humid balance gas.
    pub fn total_humid_ratio(&self) -> Concentration {
        humid_sum(self.iter_all())
    }

    /// True only if the balance and every component are inert.
    pub fn is_inert(&self) -> bool {
        self.iter_all().all(|c| c.properties().is_inert())
    }

    /// Gas correction factor of the whole blend.
    ///
    /// `gcf = 0.3106 * Σ(x·s) / Σ(x·d·cp)` over components and balance.
    pub fn gcf(&self) -> GasResult<f64> {
        let mut structure_sum = 0.0;
        let mut heat_sum = 0.0;

        for component in self.iter_all() {
            let (structure, heat_capacity) = component.properties().gcf_terms()?;
            structure_sum += component.fraction() * structure;
            heat_sum += component.fraction() * heat_capacity;
        }

        if heat_sum <= 0.0 {
            return Err(GasError::calculation(format!(
                "Mixture {} has zero total concentration",
                self
            )));
        }

        Ok(ensure_finite(
            GCF_CONSTANT * structure_sum / heat_sum,
            "gas correction factor",
        )?)
    }

    /// Scale every trace component by `factor`.
    ///
    /// The balance component is carried over unchanged, so scaling down leaves the
    /// total under 100 % rather than growing the balance.
    pub fn scale<F: ScaleFactor>(&self, factor: F) -> GasResult<Self> {
        let k = factor.factor()?;
        let scaled = self
            .components
            .iter()
            .map(|c| c.scale(k))
            .collect::<GasResult<Vec<_>>>()?;

        Self::new(scaled, self.balance.clone())
    }

    /// Combine two mixtures that share a balance gas.
    ///
    /// Concentrations of the same species are summed and the balance is recomputed,
    /// so `0.25·a` mixed with `0.75·b` is the weighted blend of `a` and `b`.
    pub fn mix(&self, other: &Mixture) -> GasResult<Self> {
        if !self.balance.same_species(&other.balance) {
            return Err(GasError::Mixing {
                left: self.balance.to_string(),
                right: other.balance.to_string(),
            });
        }

        let mut merged: Vec<(Arc<ChemicalProperties>, Ratio)> = Vec::new();
        for component in self.components.iter().chain(other.components.iter()) {
            let value = component.quantity().value();
            match merged
                .iter_mut()
                .find(|(properties, _)| **properties == **component.properties())
            {
                Some((_, total)) => *total += value,
                None => merged.push((Arc::clone(component.properties()), value)),
            }
        }

        let components = merged
            .into_iter()
            .map(|(properties, value)| Component::new(value, properties))
            .collect::<GasResult<Vec<_>>>()?;

        tracing::debug!(
            left = %self,
            right = %other,
            components = components.len(),
            "mixing gas mixtures"
        );

        Self::auto_balance(components, Arc::clone(self.balance.properties()))
    }

    /// New mixture with one more component and the same balance.
    pub fn with_component(&self, component: Component) -> GasResult<Self> {
        let mut components = self.components.clone();
        components.push(component);
        Self::new(components, self.balance.clone())
    }
}

impl fmt::Display for Mixture {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.components.is_empty() {
            return write!(f, "{}", self.balance);
        }

        let parts: Vec<String> = self.components.iter().map(ToString::to_string).collect();
        write!(f, "{}", parts.join(", "))
    }
}

fn humid_sum<'a>(components: impl Iterator<Item = &'a Component>) -> Concentration {
    let ratio: f64 = components
        .filter(|c| c.properties().is_humid())
        .map(Component::fraction)
        .sum();
    Concentration::with_unit(unitless(ratio), ConcentrationUnit::Percent)
}

fn over_full(total: f64, components: &[Component], balance: &str) -> GasError {
    let listed: Vec<String> = components.iter().map(ToString::to_string).collect();
    GasError::calculation(format!(
        "Gases in mixture sum to over 100% (total: {}%, components: {}, balance: {})",
        total * 100.0,
        listed.join(", "),
        balance
    ))
}
