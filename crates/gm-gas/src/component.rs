//! A gas species at a given concentration.

use std::fmt;
use std::sync::Arc;

use gm_core::numeric::{FRACTION_DECIMALS, ensure_finite, round_to};
use gm_core::units::{Ratio, fraction_of, unitless};
use gm_core::{Concentration, parse_concentration};

use crate::error::{GasError, GasResult};
use crate::species::{ChemicalProperties, GCF_CONSTANT};

/// One gas in a mixture.
///
/// The concentration is re-tagged on construction with the most readable display
/// unit (percent, ppm, ppb). Components are immutable; scaling builds a new one.
#[derive(Debug, Clone)]
pub struct Component {
    quantity: Concentration,
    properties: Arc<ChemicalProperties>,
}

impl Component {
    /// Validate and normalize a concentration for a species.
    ///
    /// Fails with [`GasError::NegativeQuantity`] for a fraction below zero.
    pub fn new(quantity: Ratio, properties: Arc<ChemicalProperties>) -> GasResult<Self> {
        let fraction = ensure_finite(fraction_of(quantity), "gas concentration")?;
        if fraction < 0.0 {
            return Err(GasError::NegativeQuantity { fraction });
        }

        Ok(Self {
            quantity: Concentration::normalized(quantity),
            properties,
        })
    }

    /// Shorthand for a plain fraction (1.0 == 100 %).
    pub fn from_fraction(fraction: f64, properties: Arc<ChemicalProperties>) -> GasResult<Self> {
        Self::new(unitless(fraction), properties)
    }

    /// Parse a concentration string such as `"50 ppm"` for a species.
    pub fn parse(text: &str, properties: Arc<ChemicalProperties>) -> GasResult<Self> {
        Self::new(parse_concentration(text)?, properties)
    }

    pub fn quantity(&self) -> Concentration {
        self.quantity
    }

    /// Concentration as a plain fraction.
    pub fn fraction(&self) -> f64 {
        self.quantity.fraction()
    }

    pub fn properties(&self) -> &Arc<ChemicalProperties> {
        &self.properties
    }

    /// Gas correction factor of this species on its own.
    pub fn gcf(&self) -> GasResult<f64> {
        let (structure, heat_capacity) = self.properties.gcf_terms()?;
        Ok(GCF_CONSTANT * structure / heat_capacity)
    }

    /// New component with the concentration multiplied by `factor`.
    ///
    /// Goes through [`Component::new`] again, so a negative factor fails and the
    /// display unit is re-selected.
    pub fn scale(&self, factor: f64) -> GasResult<Self> {
        Self::new(self.quantity.value() * factor, Arc::clone(&self.properties))
    }

    /// True if both components refer to the same species.
    pub fn same_species(&self, other: &Component) -> bool {
        Arc::ptr_eq(&self.properties, &other.properties) || self.properties == other.properties
    }

    fn rounded_fraction(&self) -> f64 {
        round_to(self.fraction(), FRACTION_DECIMALS)
    }
}

impl PartialEq for Component {
    fn eq(&self, other: &Self) -> bool {
        self.same_species(other) && self.rounded_fraction() == other.rounded_fraction()
    }
}

impl fmt::Display for Component {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.quantity, self.properties)
    }
}
