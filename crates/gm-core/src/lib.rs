//! gm-core: stable foundation for gasmix.
//!
//! Contains:
//! - units (uom SI types + constructors for the catalog units)
//! - concentration (dimensionless fractions with display units + parsing)
//! - numeric (Real + tolerances + float helpers)
//! - error (shared error types)

pub mod concentration;
pub mod error;
pub mod numeric;
pub mod units;

// Re-exports: nice ergonomics for downstream crates
pub use concentration::{Concentration, ConcentrationUnit, UnitError, parse_concentration};
pub use error::{CoreError, CoreResult};
pub use numeric::*;
pub use units::*;
