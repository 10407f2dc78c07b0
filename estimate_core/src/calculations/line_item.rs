//! # Line-Item Cost Calculator
//!
//! Converts one work item's declared scope into labor, material, permit and
//! disposal costs, and aggregates many items into an estimate total with a
//! per-category breakdown.
//!
//! ## Cost model
//!
//! | Unit        | Labor                                  | Material              |
//! |-------------|----------------------------------------|-----------------------|
//! | `sqft`      | rate.labor × qty                       | rate.material × qty   |
//! | `linear ft` | rate.labor × qty × 0.7                 | rate.material × qty × 0.7 |
//! | `each`      | settings.labor_rate × max(1, qty × 0.5) | rate.material × qty × 10 |
//! | other       | 0                                      | 0                     |
//!
//! Material cost is then marked up by `settings.default_markup`. The permit fee
//! is 1.5% of labor + material with a $100 floor (only when enabled), and
//! disposal is 7% of marked-up material.
//!
//! These functions are total: unknown categories price at fallback rates and
//! unknown units price at zero. Use [`super::validation`] to reject bad input
//! before calling them.
//!
//! ## Example
//!
//! ```rust
//! use estimate_core::calculations::line_item::calculate_line_item;
//! use estimate_core::materials::ProjectCategory;
//! use estimate_core::settings::CalculationSettings;
//! use estimate_core::units::Unit;
//!
//! let result = calculate_line_item(
//!     &ProjectCategory::Bathroom,
//!     20.0,
//!     &Unit::SquareFeet,
//!     &CalculationSettings::default(),
//! );
//! assert_eq!(result.material_cost, 1500.0);
//! ```

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::materials::ProjectCategory;
use crate::settings::CalculationSettings;
use crate::units::{round_cents, Unit};

/// Scale applied to linear-foot runs relative to area rates
const LINEAR_FOOT_FACTOR: f64 = 0.7;

/// Estimated hours of labor per "each" item
const HOURS_PER_EACH: f64 = 0.5;

/// Material multiplier approximating per-fixture cost for "each" items
const EACH_MATERIAL_MULTIPLIER: f64 = 10.0;

/// Permit fee as a fraction of labor + material
const PERMIT_RATE: f64 = 0.015;

/// Minimum permit fee when permits are enabled
const PERMIT_MINIMUM: f64 = 100.0;

/// Disposal cost as a fraction of marked-up material
const DISPOSAL_RATE: f64 = 0.07;

/// One billable unit of work.
///
/// ## JSON Example
///
/// ```json
/// {
///   "description": "Install countertops",
///   "quantity": 30.0,
///   "unit": "sqft",
///   "notes": "Quartz"
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineItemInput {
    pub description: String,

    /// Quantity in `unit`; must be positive
    pub quantity: f64,

    pub unit: Unit,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl LineItemInput {
    /// Create a line item without notes
    pub fn new(description: impl Into<String>, quantity: f64, unit: Unit) -> Self {
        LineItemInput {
            description: description.into(),
            quantity,
            unit,
            notes: None,
        }
    }

    /// Attach notes to the line item
    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }
}

/// Costs derived for one line item, each rounded to cents.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct CalculationResult {
    pub labor_cost: f64,
    pub material_cost: f64,
    pub permit_cost: f64,
    pub disposal_cost: f64,
    /// Sum of the four costs, rounded after summing
    pub subtotal: f64,
}

/// A line item together with its calculated costs.
///
/// Serializes flat: the input fields and cost fields share one JSON object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalculatedLineItem {
    #[serde(flatten)]
    pub input: LineItemInput,

    #[serde(flatten)]
    pub costs: CalculationResult,
}

/// Everything needed to price a full estimate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EstimateInput {
    pub project_type: ProjectCategory,
    pub line_items: Vec<LineItemInput>,
    #[serde(default)]
    pub settings: CalculationSettings,
}

/// Cost totals by category across all line items.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct CostBreakdown {
    pub total_labor: f64,
    pub total_materials: f64,
    pub total_permits: f64,
    pub total_disposal: f64,
}

impl CostBreakdown {
    /// Sum of the four category totals
    pub fn sum(&self) -> f64 {
        self.total_labor + self.total_materials + self.total_permits + self.total_disposal
    }
}

/// A priced estimate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EstimateOutput {
    pub line_items: Vec<CalculatedLineItem>,
    pub total_amount: f64,
    pub breakdown: CostBreakdown,
}

/// Calculate costs for a single line item.
///
/// Never fails: an unrated `project_type` uses fallback rates and an
/// unrecognized `unit` yields zero labor and material cost (a permit fee may
/// still apply).
pub fn calculate_line_item(
    project_type: &ProjectCategory,
    quantity: f64,
    unit: &Unit,
    settings: &CalculationSettings,
) -> CalculationResult {
    let rates = project_type.base_rates();

    let (labor_cost, base_material_cost) = match unit {
        Unit::SquareFeet => (rates.labor * quantity, rates.material * quantity),
        Unit::LinearFeet => (
            rates.labor * quantity * LINEAR_FOOT_FACTOR,
            rates.material * quantity * LINEAR_FOOT_FACTOR,
        ),
        Unit::Each => {
            let estimated_hours = (quantity * HOURS_PER_EACH).max(1.0);
            (
                settings.labor_rate * estimated_hours,
                rates.material * quantity * EACH_MATERIAL_MULTIPLIER,
            )
        }
        Unit::Unrecognized(_) => (0.0, 0.0),
    };

    let material_cost = base_material_cost * (1.0 + settings.default_markup);

    let permit_cost = if settings.permit_fee_enabled {
        ((labor_cost + material_cost) * PERMIT_RATE).max(PERMIT_MINIMUM)
    } else {
        0.0
    };

    let disposal_cost = material_cost * DISPOSAL_RATE;

    let subtotal = labor_cost + material_cost + permit_cost + disposal_cost;

    CalculationResult {
        labor_cost: round_cents(labor_cost),
        material_cost: round_cents(material_cost),
        permit_cost: round_cents(permit_cost),
        disposal_cost: round_cents(disposal_cost),
        subtotal: round_cents(subtotal),
    }
}

/// Sum the subtotals of calculated line items. Returns 0 for no items.
///
/// # Example
///
/// ```rust
/// use estimate_core::calculations::line_item::{calculate_estimate_total, CalculationResult};
///
/// let items = [
///     CalculationResult { subtotal: 165.0, ..Default::default() },
///     CalculationResult { subtotal: 330.0, ..Default::default() },
/// ];
/// assert_eq!(calculate_estimate_total(&items), 495.0);
///
/// let none: [CalculationResult; 0] = [];
/// assert_eq!(calculate_estimate_total(&none), 0.0);
/// ```
pub fn calculate_estimate_total<'a>(results: impl IntoIterator<Item = &'a CalculationResult>) -> f64 {
    results.into_iter().fold(0.0, |sum, result| sum + result.subtotal)
}

/// Price every line item of an estimate and total them.
///
/// The total is the rounded sum of item subtotals; each breakdown category is
/// the rounded sum of that cost across items.
pub fn calculate_estimate(input: &EstimateInput) -> EstimateOutput {
    let line_items: Vec<CalculatedLineItem> = input
        .line_items
        .iter()
        .map(|item| CalculatedLineItem {
            costs: calculate_line_item(&input.project_type, item.quantity, &item.unit, &input.settings),
            input: item.clone(),
        })
        .collect();

    let total_amount = calculate_estimate_total(line_items.iter().map(|item| &item.costs));

    let raw = line_items.iter().fold(CostBreakdown::default(), |acc, item| CostBreakdown {
        total_labor: acc.total_labor + item.costs.labor_cost,
        total_materials: acc.total_materials + item.costs.material_cost,
        total_permits: acc.total_permits + item.costs.permit_cost,
        total_disposal: acc.total_disposal + item.costs.disposal_cost,
    });

    let output = EstimateOutput {
        line_items,
        total_amount: round_cents(total_amount),
        breakdown: CostBreakdown {
            total_labor: round_cents(raw.total_labor),
            total_materials: round_cents(raw.total_materials),
            total_permits: round_cents(raw.total_permits),
            total_disposal: round_cents(raw.total_disposal),
        },
    };

    debug!(
        project_type = %input.project_type,
        items = output.line_items.len(),
        total = output.total_amount,
        "priced estimate"
    );

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::DEFAULT_SETTINGS;
    use pretty_assertions::assert_eq;

    fn assert_close(actual: f64, expected: f64, tolerance: f64) {
        assert!(
            (actual - expected).abs() <= tolerance,
            "expected {expected} ± {tolerance}, got {actual}"
        );
    }

    #[test]
    fn test_sqft_item() {
        let result = calculate_line_item(&ProjectCategory::Roofing, 100.0, &Unit::SquareFeet, &DEFAULT_SETTINGS);

        assert_eq!(result.labor_cost, 350.0); // 3.5 * 100
        assert_eq!(result.material_cost, 312.5); // 2.5 * 100 * 1.25
        assert_eq!(result.permit_cost, 100.0); // 1.5% is below the floor
        assert_close(result.disposal_cost, 21.88, 0.011);
        assert_close(result.subtotal, 784.38, 0.011);
    }

    #[test]
    fn test_linear_ft_item() {
        let result = calculate_line_item(&ProjectCategory::Deck, 50.0, &Unit::LinearFeet, &DEFAULT_SETTINGS);

        assert_eq!(result.labor_cost, 280.0); // 8.0 * 50 * 0.7
        assert_close(result.material_cost, 240.63, 0.011); // 5.5 * 50 * 0.7 * 1.25
    }

    #[test]
    fn test_each_item_uses_hourly_rate() {
        let result = calculate_line_item(&ProjectCategory::Windows, 2.0, &Unit::Each, &DEFAULT_SETTINGS);

        // max(1, 2 * 0.5) = 1 hour at $75
        assert_eq!(result.labor_cost, 75.0);
        // 200 * 2 * 10 * 1.25
        assert_eq!(result.material_cost, 5000.0);
        assert_eq!(result.permit_cost, 100.0);
        assert_eq!(result.disposal_cost, 350.0);
        assert_eq!(result.subtotal, 5525.0);
    }

    #[test]
    fn test_each_item_bills_at_least_one_hour() {
        for quantity in [0.5, 1.0, 1.5] {
            let result = calculate_line_item(&ProjectCategory::Plumbing, quantity, &Unit::Each, &DEFAULT_SETTINGS);
            assert_eq!(result.labor_cost, 75.0, "quantity {quantity}");
        }

        let custom_rate = CalculationSettings {
            labor_rate: 90.0,
            ..DEFAULT_SETTINGS
        };
        let result = calculate_line_item(&ProjectCategory::Plumbing, 1.0, &Unit::Each, &custom_rate);
        assert_eq!(result.labor_cost, 90.0);
    }

    #[test]
    fn test_each_item_hours_scale_with_quantity() {
        let result = calculate_line_item(&ProjectCategory::Plumbing, 6.0, &Unit::Each, &DEFAULT_SETTINGS);
        assert_eq!(result.labor_cost, 225.0); // 3 hours * $75
    }

    #[test]
    fn test_permit_toggle() {
        let with_permit = calculate_line_item(
            &ProjectCategory::Kitchen,
            50.0,
            &Unit::SquareFeet,
            &CalculationSettings { permit_fee_enabled: true, ..DEFAULT_SETTINGS },
        );
        let without_permit = calculate_line_item(
            &ProjectCategory::Kitchen,
            50.0,
            &Unit::SquareFeet,
            &CalculationSettings { permit_fee_enabled: false, ..DEFAULT_SETTINGS },
        );

        // (5000 + 4687.5) * 0.015
        assert_close(with_permit.permit_cost, 145.31, 0.011);
        assert_eq!(without_permit.permit_cost, 0.0);
        assert!(with_permit.subtotal > without_permit.subtotal);
    }

    #[test]
    fn test_markup_applies_to_materials_only() {
        let result = calculate_line_item(&ProjectCategory::Bathroom, 20.0, &Unit::SquareFeet, &DEFAULT_SETTINGS);
        assert_eq!(result.material_cost, 1500.0);
        assert_eq!(result.labor_cost, 1700.0);

        let no_markup = CalculationSettings { default_markup: 0.0, ..DEFAULT_SETTINGS };
        let result = calculate_line_item(&ProjectCategory::Bathroom, 20.0, &Unit::SquareFeet, &no_markup);
        assert_eq!(result.material_cost, 1200.0);
    }

    #[test]
    fn test_unrated_category_uses_fallback() {
        let category = ProjectCategory::from("Landscaping");
        let result = calculate_line_item(&category, 10.0, &Unit::SquareFeet, &DEFAULT_SETTINGS);
        assert_eq!(result.labor_cost, 500.0);
        assert_eq!(result.material_cost, 500.0);
    }

    #[test]
    fn test_unrecognized_unit_prices_at_zero() {
        let unit = Unit::from("cubic yd");
        let result = calculate_line_item(&ProjectCategory::Deck, 10.0, &unit, &DEFAULT_SETTINGS);
        assert_eq!(result.labor_cost, 0.0);
        assert_eq!(result.material_cost, 0.0);
        assert_eq!(result.disposal_cost, 0.0);
        // The permit floor still applies
        assert_eq!(result.permit_cost, 100.0);
        assert_eq!(result.subtotal, 100.0);
    }

    #[test]
    fn test_subtotal_matches_parts() {
        for category in ProjectCategory::ALL {
            for unit in Unit::ALL {
                let r = calculate_line_item(&category, 37.3, &unit, &DEFAULT_SETTINGS);
                let parts = r.labor_cost + r.material_cost + r.permit_cost + r.disposal_cost;
                // Each field is rounded on its own
                assert_close(r.subtotal, parts, 0.025);
                assert!(r.labor_cost >= 0.0 && r.material_cost >= 0.0);
            }
        }
    }

    #[test]
    fn test_estimate_total_empty() {
        let none: Vec<CalculationResult> = Vec::new();
        assert_eq!(calculate_estimate_total(&none), 0.0);
    }

    #[test]
    fn test_calculate_estimate() {
        let input = EstimateInput {
            project_type: ProjectCategory::Roofing,
            line_items: vec![
                LineItemInput::new("Roof replacement", 100.0, Unit::SquareFeet).with_notes("Test"),
                LineItemInput::new("Gutter installation", 50.0, Unit::LinearFeet),
            ],
            settings: DEFAULT_SETTINGS,
        };

        let output = calculate_estimate(&input);

        assert_eq!(output.line_items.len(), 2);
        assert_eq!(output.line_items[0].input.notes.as_deref(), Some("Test"));
        assert_eq!(output.line_items[1].input.description, "Gutter installation");
        assert!(output.breakdown.total_labor > 0.0);
        assert!(output.breakdown.total_materials > 0.0);
        assert!(output.breakdown.total_permits > 0.0);
        assert!(output.breakdown.total_disposal > 0.0);

        let sum_of_subtotals: f64 = output.line_items.iter().map(|i| i.costs.subtotal).sum();
        assert_close(output.total_amount, sum_of_subtotals, 0.005);
        assert_close(output.total_amount, output.breakdown.sum(), 0.05);
    }

    #[test]
    fn test_calculated_item_serializes_flat() {
        let item = CalculatedLineItem {
            input: LineItemInput::new("Paint walls", 200.0, Unit::SquareFeet),
            costs: calculate_line_item(&ProjectCategory::Paint, 200.0, &Unit::SquareFeet, &DEFAULT_SETTINGS),
        };
        let json = serde_json::to_value(&item).unwrap();
        assert_eq!(json["unit"], "sqft");
        assert_eq!(json["labor_cost"], 400.0);
        assert!(json.get("notes").is_none());

        let roundtrip: CalculatedLineItem = serde_json::from_value(json).unwrap();
        assert_eq!(roundtrip, item);
    }

    #[test]
    fn test_estimate_input_defaults_settings() {
        let json = r#"{
            "project_type": "Flooring",
            "line_items": [{ "description": "Hardwood", "quantity": 200, "unit": "sqft" }]
        }"#;
        let input: EstimateInput = serde_json::from_str(json).unwrap();
        assert_eq!(input.settings, DEFAULT_SETTINGS);
        assert_eq!(input.project_type, ProjectCategory::Flooring);
    }
}
