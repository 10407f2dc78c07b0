//! # Calculation Settings
//!
//! Configurable rates consumed by the line-item calculator. The calculator only
//! ever receives a fully-formed [`CalculationSettings`]; loading it from storage
//! is the job of [`crate::settings_store`].

use serde::{Deserialize, Serialize};

use crate::errors::{EstimateError, EstimateResult};

/// Settings used when no stored configuration exists.
pub const DEFAULT_SETTINGS: CalculationSettings = CalculationSettings {
    default_markup: 0.25,
    labor_rate: 75.0,
    permit_fee_enabled: true,
};

/// Rates applied to every line item of an estimate.
///
/// ## JSON Example
///
/// ```json
/// {
///   "default_markup": 0.25,
///   "labor_rate": 75.0,
///   "permit_fee_enabled": true
/// }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CalculationSettings {
    /// Markup on material cost as a fraction (0.25 = 25%)
    pub default_markup: f64,

    /// Hourly labor rate in dollars, used for per-each items
    pub labor_rate: f64,

    /// Whether a permit fee is added to each line item
    pub permit_fee_enabled: bool,
}

impl Default for CalculationSettings {
    fn default() -> Self {
        DEFAULT_SETTINGS
    }
}

impl CalculationSettings {
    /// Build settings from the settings form, where markup is entered as a
    /// percentage.
    ///
    /// # Example
    ///
    /// ```rust
    /// use estimate_core::settings::CalculationSettings;
    ///
    /// let settings = CalculationSettings::from_form(30.0, 80.0, false).unwrap();
    /// assert_eq!(settings.default_markup, 0.3);
    /// assert!(CalculationSettings::from_form(-5.0, 80.0, false).is_err());
    /// ```
    pub fn from_form(markup_percent: f64, labor_rate: f64, permit_fee_enabled: bool) -> EstimateResult<Self> {
        if !markup_percent.is_finite() || markup_percent < 0.0 {
            return Err(EstimateError::invalid_input(
                "default_markup",
                markup_percent.to_string(),
                "Invalid markup percentage",
            ));
        }
        let settings = CalculationSettings {
            default_markup: markup_percent / 100.0,
            labor_rate,
            permit_fee_enabled,
        };
        settings.validate()?;
        Ok(settings)
    }

    /// Validate an already-built settings value.
    pub fn validate(&self) -> EstimateResult<()> {
        if !self.default_markup.is_finite() || self.default_markup < 0.0 {
            return Err(EstimateError::invalid_input(
                "default_markup",
                self.default_markup.to_string(),
                "Invalid markup percentage",
            ));
        }
        if !self.labor_rate.is_finite() || self.labor_rate < 0.0 {
            return Err(EstimateError::invalid_input(
                "labor_rate",
                self.labor_rate.to_string(),
                "Invalid labor rate",
            ));
        }
        Ok(())
    }

    /// Markup as a percentage, for display on the settings form
    pub fn markup_percent(&self) -> f64 {
        self.default_markup * 100.0
    }
}
