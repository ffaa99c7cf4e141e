//! Gas registry and the MKS reference catalog.

use std::collections::BTreeMap;
use std::sync::{Arc, OnceLock};

use crate::error::{GasError, GasResult};
use crate::species::{ChemicalProperties, MolecularStructure, normalize_name};

/// Name-keyed catalog of gas species.
///
/// Keys are [`normalize_name`] of the species name. Registering a species whose key is
/// already present replaces the previous entry.
#[derive(Debug, Clone, Default)]
pub struct GasRegistry {
    entries: BTreeMap<String, Arc<ChemicalProperties>>,
}

impl GasRegistry {
    /// Empty registry, mostly useful for test fixtures.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry populated with the MKS gas correction factor reference table.
    pub fn standard() -> Self {
        let mut registry = Self::new();
        for row in &STANDARD_CATALOG {
            registry.register(row.properties());
        }
        registry
    }

    /// Insert a species, returning the entry it replaced (if any).
    pub fn register(&mut self, properties: ChemicalProperties) -> Option<Arc<ChemicalProperties>> {
        let key = properties.registry_key();
        let previous = self.entries.insert(key.clone(), Arc::new(properties));
        if previous.is_some() {
            tracing::debug!(key = %key, "replaced registered gas");
        }
        previous
    }

    /// Register a batch of plain-data definitions (e.g. loaded from a catalog file).
    pub fn register_definitions<I>(&mut self, definitions: I)
    where
        I: IntoIterator<Item = GasDefinition>,
    {
        for definition in definitions {
            tracing::debug!(name = %definition.name, "registering custom gas");
            self.register(definition.into());
        }
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(&normalize_name(name))
    }

    pub fn get(&self, name: &str) -> Option<&Arc<ChemicalProperties>> {
        self.entries.get(&normalize_name(name))
    }

    /// Resolve a gas name, failing with [`GasError::UnknownGas`] on a miss.
    pub fn lookup(&self, name: &str) -> GasResult<Arc<ChemicalProperties>> {
        self.get(name).cloned().ok_or_else(|| GasError::UnknownGas {
            name: name.to_string(),
            fragment: name.to_string(),
        })
    }

    pub fn iter(&self) -> impl Iterator<Item = &Arc<ChemicalProperties>> + '_ {
        self.entries.values()
    }

    /// Registry keys in sorted order.
    pub fn names(&self) -> impl Iterator<Item = &str> + '_ {
        self.entries.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Process-wide standard registry, built on first use.
pub fn standard_registry() -> &'static GasRegistry {
    static REGISTRY: OnceLock<GasRegistry> = OnceLock::new();
    REGISTRY.get_or_init(GasRegistry::standard)
}

/// Plain-data description of a species, as found in catalog files.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct GasDefinition {
    pub name: String,
    pub symbol: Option<String>,
    pub molecular_structure: Option<MolecularStructure>,
    /// cal/g
    pub specific_heat: Option<f64>,
    /// g/L
    pub density: Option<f64>,
    pub inert: bool,
    pub humid: bool,
}

impl From<GasDefinition> for ChemicalProperties {
    fn from(def: GasDefinition) -> Self {
        let mut properties = ChemicalProperties::new(def.name)
            .with_inert(def.inert)
            .with_humid(def.humid);
        if let Some(symbol) = def.symbol {
            properties = properties.with_symbol(symbol);
        }
        if let (Some(structure), Some(cp), Some(d)) =
            (def.molecular_structure, def.specific_heat, def.density)
        {
            properties = properties.with_constants(structure, cp, d);
        }
        properties
    }
}

struct CatalogRow {
    name: &'static str,
    symbol: Option<&'static str>,
    /// (structure, specific heat cal/g, density g/L)
    constants: Option<(MolecularStructure, f64, f64)>,
    inert: bool,
    humid: bool,
}

impl CatalogRow {
    fn properties(&self) -> ChemicalProperties {
        let mut properties = ChemicalProperties::new(self.name)
            .with_inert(self.inert)
            .with_humid(self.humid);
        if let Some(symbol) = self.symbol {
            properties = properties.with_symbol(symbol);
        }
        if let Some((structure, cp, d)) = self.constants {
            properties = properties.with_constants(structure, cp, d);
        }
        properties
    }
}

const fn gas(
    name: &'static str,
    symbol: Option<&'static str>,
    structure: MolecularStructure,
    specific_heat: f64,
    density: f64,
) -> CatalogRow {
    CatalogRow {
        name,
        symbol,
        constants: Some((structure, specific_heat, density)),
        inert: false,
        humid: false,
    }
}

const fn inert(row: CatalogRow) -> CatalogRow {
    CatalogRow { inert: true, ..row }
}

const fn humid(row: CatalogRow) -> CatalogRow {
    CatalogRow {
        inert: true,
        humid: true,
        ..row
    }
}

use crate::species::MolecularStructure::{Diatomic, Monatomic, Polyatomic, Triatomic};

const STANDARD_CATALOG: [CatalogRow; 36] = [
    inert(gas("Air", None, Diatomic, 0.24, 1.293)),
    gas("Acetone", Some("(CH_3)_2CO"), Polyatomic, 0.51, 0.21),
    gas("Ammonia", Some("NH_3"), Polyatomic, 0.492, 0.76),
    inert(gas("Argon", Some("Ar"), Monatomic, 0.1244, 1.782)),
    gas("Arsine", None, Polyatomic, 0.1167, 3.478),
    gas("Bromine", Some("BR_2"), Diatomic, 0.0539, 7.13),
    gas("Carbon-dioxide", Some("CO_2"), Triatomic, 0.2016, 1.964),
    gas("Carbon-monoxide", Some("CO"), Diatomic, 0.2488, 1.25),
    gas("Carbon-tetrachloride", None, Polyatomic, 0.1655, 6.86),
    gas("Carbon-tetraflouride", None, Polyatomic, 0.1654, 3.926),
    gas("Chlorine", Some("Cl_2"), Diatomic, 0.1144, 3.163),
    gas("Cyanogen", None, Polyatomic, 0.2613, 2.322),
    gas("Deuterium", Some("H_2/D_2"), Diatomic, 1.722, 0.1799),
    gas("Ethane", Some("C_2H_6"), Polyatomic, 0.4097, 1.342),
    gas("Fluorine", Some("F_2"), Diatomic, 0.1873, 1.695),
    gas("Helium", Some("He"), Monatomic, 1.241, 0.1786),
    gas("Hexane", Some("C_6H14"), Polyatomic, 0.54, 0.672),
    gas("Hydrogen", Some("H_2"), Diatomic, 3.3852, 0.0899),
    gas("Hydrogen-chloride", Some("HCl"), Diatomic, 0.1912, 1.627),
    gas("Hydrogen-fluoride", Some("HF"), Diatomic, 0.3479, 0.893),
    gas("Methane", Some("CH_4"), Polyatomic, 0.5223, 0.716),
    gas("Neon", Some("Ne"), Monatomic, 0.246, 0.9),
    inert(gas("Nitrogen", Some("N_2"), Diatomic, 0.2485, 1.25)),
    gas("Nitric-oxide", Some("NO"), Diatomic, 0.2328, 1.339),
    CatalogRow {
        name: "Nitric-oxides",
        symbol: Some("NO_x"),
        constants: None,
        inert: false,
        humid: false,
    },
    gas("Nitrogen-dioxide", Some("NO_2"), Triatomic, 0.1933, 2.052),
    gas("Nitrous-oxide", Some("N_2O"), Triatomic, 0.2088, 1.964),
    gas("Oxygen", Some("O_2"), Diatomic, 0.2193, 1.427),
    gas("Phosphine", Some("PH_3"), Polyatomic, 0.2374, 1.517),
    gas("Propane", Some("C_3H_8"), Polyatomic, 0.3885, 1.967),
    gas("Propylene", Some("C_3H_6"), Polyatomic, 0.3541, 1.877),
    gas("Sulfur Hexaflouride", Some("SF_6"), Polyatomic, 0.1592, 6.516),
    gas("Xenon", Some("Xe"), Monatomic, 0.0378, 5.858),
    humid(gas("Humid Air", None, Diatomic, 0.24, 1.293)),
    humid(gas("Humid Argon", Some("Ar"), Monatomic, 0.1244, 1.782)),
    humid(gas("Humid Nitrogen", Some("N_2"), Diatomic, 0.2485, 1.25)),
];


#[cfg(all(test, feature = "serde"))]
mod serde_tests {
    use super::*;

    #[test]
    fn definitions_load_from_yaml() {
        let yaml = r#"
- name: Krypton
  symbol: Kr
  molecular_structure: monatomic
  specific_heat: 0.0593
  density: 3.708
  inert: true
- name: Water vapour
  humid: true
"#;
        let definitions: Vec<GasDefinition> = serde_yaml::from_str(yaml).unwrap();
        let mut registry = GasRegistry::standard();
        registry.register_definitions(definitions);

        assert!(registry.lookup("krypton").unwrap().is_inert());
        assert!(registry.lookup("water-vapour").unwrap().is_humid());
    }
}
