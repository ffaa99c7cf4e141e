//! gm-gas: gas mixture composition engine for gasmix.
//!
//! Provides:
//! - Gas species with MKS reference constants (`ChemicalProperties`, `MolecularStructure`)
//! - A name-keyed registry of species (`GasRegistry`)
//! - Components and mixtures with composition invariants and arithmetic
//! - Derived properties: gas correction factor, humidity, inertness
//! - Parsers for free-form gas lists and name → concentration mappings
//!
//! # Example
//!
//! ```
//! use gm_gas::{GasResult, Mixture};
//!
//! fn blend() -> GasResult<f64> {
//!     let a: Mixture = "1% hydrogen, air".parse()?;
//!     let b: Mixture = "1% methane, air".parse()?;
//!
//!     let blend = a.scale(0.25)?.mix(&b.scale(0.75)?)?;
//!     println!("{blend}"); // 0.75% CH_4, 0.25% H_2
//!     blend.gcf()
//! }
//!
//! assert!(blend().is_ok());
//! ```

pub mod catalog;
pub mod component;
pub mod error;
pub mod mixture;
pub mod parse;
pub mod species;

// Re-exports for ergonomics
pub use catalog::{GasDefinition, GasRegistry, standard_registry};
pub use component::Component;
pub use error::{GasError, GasResult};
pub use mixture::{Mixture, ScaleFactor};
pub use parse::{BALANCE_SENTINEL, GasToken, parse_token, split_gas_list};
pub use species::{ChemicalProperties, GCF_CONSTANT, MolecularStructure, normalize_name};
