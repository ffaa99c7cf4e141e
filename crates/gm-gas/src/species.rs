//! Gas species definitions.

use std::fmt;

use gm_core::units::{Density, SpecHeat, cal_per_g_k, cal_per_g_k_of, g_per_l, g_per_l_of};

use crate::error::{GasError, GasResult};

/// Numerator constant of the MKS gas correction factor formula.
pub const GCF_CONSTANT: f64 = 0.3106;

/// Molecular structure class used by the gas correction factor.
///
/// Reference: MKS flow measurement FAQ.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum MolecularStructure {
    Monatomic,
    Diatomic,
    Triatomic,
    Polyatomic,
}

impl MolecularStructure {
    pub const ALL: [MolecularStructure; 4] = [
        MolecularStructure::Monatomic,
        MolecularStructure::Diatomic,
        MolecularStructure::Triatomic,
        MolecularStructure::Polyatomic,
    ];

    /// Structure constant `s` in `gcf = 0.3106 * s / (d * cp)`.
    pub fn constant(&self) -> f64 {
        match self {
            MolecularStructure::Monatomic => 1.03,
            MolecularStructure::Diatomic => 1.00,
            MolecularStructure::Triatomic => 0.941,
            MolecularStructure::Polyatomic => 0.88,
        }
    }
}

/// Registry key for a gas name: lowercase, spaces and hyphens become underscores.
///
/// `"Carbon-dioxide"`, `"carbon dioxide"` and `"CARBON_DIOXIDE"` all map to
/// `"carbon_dioxide"`.
pub fn normalize_name(name: &str) -> String {
    name.trim()
        .chars()
        .map(|c| match c {
            ' ' | '-' => '_',
            other => other.to_ascii_lowercase(),
        })
        .collect()
}

/// Physical identity of one gas species.
///
/// Some entries (e.g. "Nitric-oxides") intentionally carry no physical constants;
/// asking them for a correction factor is an error.
#[derive(Debug, Clone, PartialEq)]
pub struct ChemicalProperties {
    name: String,
    symbol: Option<String>,
    molecular_structure: Option<MolecularStructure>,
    specific_heat: Option<SpecHeat>,
    density: Option<Density>,
    inert: bool,
    humid: bool,
}

impl ChemicalProperties {
    /// A species with only a name; attach constants and flags with the `with_*` methods.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            symbol: None,
            molecular_structure: None,
            specific_heat: None,
            density: None,
            inert: false,
            humid: false,
        }
    }

    pub fn with_symbol(mut self, symbol: impl Into<String>) -> Self {
        self.symbol = Some(symbol.into());
        self
    }

    /// Attach the MKS constants: specific heat in cal/g and density in g/L.
    pub fn with_constants(
        mut self,
        structure: MolecularStructure,
        specific_heat_cal_per_g: f64,
        density_g_per_l: f64,
    ) -> Self {
        self.molecular_structure = Some(structure);
        self.specific_heat = Some(cal_per_g_k(specific_heat_cal_per_g));
        self.density = Some(g_per_l(density_g_per_l));
        self
    }

    pub fn with_inert(mut self, inert: bool) -> Self {
        self.inert = inert;
        self
    }

    pub fn with_humid(mut self, humid: bool) -> Self {
        self.humid = humid;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn symbol(&self) -> Option<&str> {
        self.symbol.as_deref()
    }

    pub fn molecular_structure(&self) -> Option<MolecularStructure> {
        self.molecular_structure
    }

    pub fn specific_heat(&self) -> Option<SpecHeat> {
        self.specific_heat
    }

    pub fn density(&self) -> Option<Density> {
        self.density
    }

    pub fn is_inert(&self) -> bool {
        self.inert
    }

    pub fn is_humid(&self) -> bool {
        self.humid
    }

    pub fn registry_key(&self) -> String {
        normalize_name(&self.name)
    }

    /// Correction factor terms `(s, d * cp)` with `d` in g/L and `cp` in cal/g.
    pub(crate) fn gcf_terms(&self) -> GasResult<(f64, f64)> {
        let missing = |what: &str| {
            GasError::calculation(format!(
                "Gas \"{}\" has no {} for gas correction factor",
                self.name, what
            ))
        };

        let structure = self
            .molecular_structure
            .ok_or_else(|| missing("molecular structure"))?;
        let density = self.density.ok_or_else(|| missing("density"))?;
        let specific_heat = self.specific_heat.ok_or_else(|| missing("specific heat"))?;

        Ok((
            structure.constant(),
            g_per_l_of(density) * cal_per_g_k_of(specific_heat),
        ))
    }
}

impl fmt::Display for ChemicalProperties {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.symbol {
            Some(symbol) => write!(f, "{}", symbol),
            None => write!(f, "{}", self.name),
        }
    }
}
