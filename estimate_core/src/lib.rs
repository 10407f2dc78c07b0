//! # estimate_core - Renovation Estimate Pricing Engine
//!
//! `estimate_core` turns renovation scope into priced estimates. It has two
//! calculators: category-rate line items for remodel work and a parametric
//! bill of materials for sheds and small utility buildings. All inputs and
//! outputs are JSON-serializable.
//!
//! ## Design Philosophy
//!
//! - **Stateless**: Pricing functions take input and return results
//! - **JSON-First**: All types implement Serialize/Deserialize
//! - **Rich Errors**: Structured error types, not just strings
//! - **Explicit Settings**: Configuration is passed in, never looked up
//!
//! ## Quick Start
//!
//! ```rust
//! use estimate_core::calculations::{calculate_line_item, compute_shed_estimate, ShedInputs};
//! use estimate_core::materials::ProjectCategory;
//! use estimate_core::settings::DEFAULT_SETTINGS;
//! use estimate_core::units::Unit;
//!
//! let tile = calculate_line_item(&ProjectCategory::Bathroom, 100.0, &Unit::SquareFeet, &DEFAULT_SETTINGS);
//! assert!(tile.subtotal > 0.0);
//!
//! let shed = compute_shed_estimate(&ShedInputs::default());
//! assert_eq!(shed.line_items.len(), 15);
//! ```
//!
//! ## Modules
//!
//! - [`calculations`] - Line-item pricing, shed estimates, validation
//! - [`materials`] - Category rate table and baseline material catalog
//! - [`settings`] - Markup, labor rate and permit configuration
//! - [`settings_store`] - Settings persistence and the pricing entry point
//! - [`estimate`] - Client-facing estimate records
//! - [`units`] - Measurement units and cent rounding
//! - [`errors`] - Structured error types

pub mod calculations;
pub mod errors;
pub mod estimate;
pub mod materials;
pub mod settings;
pub mod settings_store;
pub mod units;

// Re-export commonly used types at crate root for convenience
pub use errors::{EstimateError, EstimateResult};
pub use estimate::{ClientInfo, EstimateRecord};
pub use settings::{CalculationSettings, DEFAULT_SETTINGS};
pub use settings_store::{price_estimate, FileSettingsStore, SettingsSource, StaticSettings};
