//! # Line Item Validation
//!
//! Boundary checks run before pricing. Validators never fail; they return a
//! [`Validation`] that callers inspect or convert with
//! [`Validation::into_result`].
//!
//! ## Example
//!
//! ```rust
//! use estimate_core::calculations::line_item::LineItemInput;
//! use estimate_core::calculations::validation::validate_line_item;
//! use estimate_core::units::Unit;
//!
//! let item = LineItemInput::new("Tile floor", 0.0, Unit::SquareFeet);
//! let check = validate_line_item(&item);
//! assert!(!check.valid);
//! assert_eq!(check.error.as_deref(), Some("Quantity must be greater than 0"));
//! ```

use serde::{Deserialize, Serialize};

use super::line_item::{EstimateInput, LineItemInput};
use crate::errors::{EstimateError, EstimateResult};

/// Outcome of a validation check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Validation {
    pub valid: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl Validation {
    /// A passing check
    pub fn ok() -> Self {
        Validation { valid: true, error: None }
    }

    /// A failing check with a user-facing message
    pub fn invalid(message: impl Into<String>) -> Self {
        Validation {
            valid: false,
            error: Some(message.into()),
        }
    }

    /// Convert to a `Result` so callers can propagate with `?`.
    pub fn into_result(self) -> EstimateResult<()> {
        if self.valid {
            Ok(())
        } else {
            Err(EstimateError::validation_failed(
                self.error.unwrap_or_else(|| "Invalid input".to_string()),
            ))
        }
    }
}

/// Check one line item: non-blank description, positive quantity, supported unit.
pub fn validate_line_item(item: &LineItemInput) -> Validation {
    if item.description.trim().is_empty() {
        return Validation::invalid("Description is required");
    }

    // Written so NaN fails too
    if !(item.quantity > 0.0) || !item.quantity.is_finite() {
        return Validation::invalid("Quantity must be greater than 0");
    }

    if !item.unit.is_supported() {
        return Validation::invalid("Invalid unit type");
    }

    Validation::ok()
}

/// Check a whole estimate: project type present, at least one line item, and
/// every line item valid. Stops at the first invalid item.
pub fn validate_estimate_input(input: &EstimateInput) -> Validation {
    if input.project_type.as_str().trim().is_empty() {
        return Validation::invalid("Project type is required");
    }

    if input.line_items.is_empty() {
        return Validation::invalid("At least one line item is required");
    }

    input
        .line_items
        .iter()
        .map(validate_line_item)
        .find(|check| !check.valid)
        .unwrap_or_else(Validation::ok)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::materials::ProjectCategory;
    use crate::settings::DEFAULT_SETTINGS;
    use crate::units::Unit;
    use pretty_assertions::assert_eq;

    fn item(description: &str, quantity: f64, unit: &str) -> LineItemInput {
        LineItemInput::new(description, quantity, Unit::from(unit))
    }

    fn estimate(project_type: &str, line_items: Vec<LineItemInput>) -> EstimateInput {
        EstimateInput {
            project_type: ProjectCategory::from(project_type),
            line_items,
            settings: DEFAULT_SETTINGS,
        }
    }

    #[test]
    fn test_valid_line_item() {
        assert_eq!(validate_line_item(&item("Cabinets", 20.0, "linear ft")), Validation::ok());
    }

    #[test]
    fn test_blank_description() {
        let check = validate_line_item(&item("   ", 1.0, "each"));
        assert_eq!(check, Validation::invalid("Description is required"));
    }

    #[test]
    fn test_non_positive_quantity() {
        for quantity in [0.0, -3.0, f64::NAN, f64::INFINITY] {
            let check = validate_line_item(&item("Drywall", quantity, "sqft"));
            assert_eq!(check.error.as_deref(), Some("Quantity must be greater than 0"));
        }
    }

    #[test]
    fn test_unsupported_unit() {
        let check = validate_line_item(&item("Gravel", 3.0, "cubic yd"));
        assert_eq!(check, Validation::invalid("Invalid unit type"));
    }

    #[test]
    fn test_estimate_requires_project_type() {
        let check = validate_estimate_input(&estimate(" ", vec![item("Paint", 10.0, "sqft")]));
        assert_eq!(check.error.as_deref(), Some("Project type is required"));
    }

    #[test]
    fn test_estimate_requires_line_items() {
        let check = validate_estimate_input(&estimate("Paint", vec![]));
        assert_eq!(check.error.as_deref(), Some("At least one line item is required"));
    }

    #[test]
    fn test_estimate_reports_first_bad_item() {
        let check = validate_estimate_input(&estimate(
            "Kitchen",
            vec![
                item("Cabinets", 20.0, "linear ft"),
                item("", 5.0, "sqft"),
                item("Sink", 0.0, "each"),
            ],
        ));
        assert_eq!(check, Validation::invalid("Description is required"));
    }

    #[test]
    fn test_unrated_project_type_is_still_valid() {
        let check = validate_estimate_input(&estimate("Pool", vec![item("Coping", 40.0, "linear ft")]));
        assert!(check.valid);
    }

    #[test]
    fn test_into_result() {
        assert!(Validation::ok().into_result().is_ok());
        let err = Validation::invalid("Invalid unit type").into_result().unwrap_err();
        assert_eq!(err, EstimateError::validation_failed("Invalid unit type"));
    }

    #[test]
    fn test_serialization_omits_missing_error() {
        assert_eq!(serde_json::to_string(&Validation::ok()).unwrap(), r#"{"valid":true}"#);
    }
}
