//! # Pricing Tables
//!
//! Static, read-only reference data used by the calculators.
//!
//! - [`rate_table`]: per-unit labor/material rates by project category
//! - [`baseline`]: unit-price catalog for the structure estimator
//!
//! ## Example
//!
//! ```rust
//! use estimate_core::materials::{MaterialId, ProjectCategory};
//!
//! let rates = ProjectCategory::Bathroom.base_rates();
//! assert_eq!(rates.material, 60.0);
//!
//! let studs = MaterialId::Stud2x4.material();
//! assert_eq!(studs.unit_cost, 4.25);
//! ```

pub mod baseline;
pub mod rate_table;

pub use baseline::{BaselineMaterial, MaterialCategory, MaterialId};
pub use rate_table::{BaseRates, ProjectCategory, FALLBACK_RATES};
