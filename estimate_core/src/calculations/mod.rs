//! # Estimate Calculations
//!
//! Pure pricing functions. Each takes plain input records and returns a plain
//! result record; none performs I/O or keeps state between calls.
//!
//! ## Available Calculations
//!
//! - [`line_item`] - Category-rate line-item pricing and estimate totals
//! - [`shed`] - Parametric shed / utility building bill of materials
//! - [`validation`] - Boundary checks for line-item estimates

pub mod line_item;
pub mod shed;
pub mod validation;

use serde::{Deserialize, Serialize};

// Re-export commonly used types
pub use line_item::{
    calculate_estimate, calculate_estimate_total, calculate_line_item, CalculatedLineItem, CalculationResult,
    CostBreakdown, EstimateInput, EstimateOutput, LineItemInput,
};
pub use shed::{
    apply_tax_and_contingency, compute_shed_estimate, validate_adjustments, QuickEstimateLineItem,
    QuickEstimateResult, RoofType, ShedInputs, SidingType, TaxAndContingency,
};
pub use validation::{validate_estimate_input, validate_line_item, Validation};

/// Enum wrapper for the two kinds of priced estimate.
///
/// Lets an estimate record hold either result while keeping clean, tagged
/// serialization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum EstimateBody {
    /// Category-rate line items
    Itemized(EstimateOutput),
    /// Parametric structure estimate
    Quick(QuickEstimateResult),
}

impl EstimateBody {
    /// Final amount of the estimate
    pub fn total_amount(&self) -> f64 {
        match self {
            EstimateBody::Itemized(output) => output.total_amount,
            EstimateBody::Quick(result) => result.total_amount,
        }
    }

    /// Number of priced line items
    pub fn line_item_count(&self) -> usize {
        match self {
            EstimateBody::Itemized(output) => output.line_items.len(),
            EstimateBody::Quick(result) => result.line_items.len(),
        }
    }

    /// Get the estimate kind as a string
    pub fn kind(&self) -> &'static str {
        match self {
            EstimateBody::Itemized(_) => "Itemized",
            EstimateBody::Quick(_) => "Quick",
        }
    }
}
