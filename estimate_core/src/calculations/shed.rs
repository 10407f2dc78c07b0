//! # Parametric Shed / Utility Building Estimate
//!
//! Derives a bill of materials for a simple rectangular structure from its
//! dimensions and options, prices it from the baseline catalog, and adds a
//! contingency. Needs no stored configuration.
//!
//! ## Geometry
//!
//! - Floor area = W × L, perimeter = 2(W + L), wall area = perimeter × H
//! - Roof area = (W + 2)(L + 2) × 1.08 (gable, 1 ft overhang per side, ~8% pitch factor)
//! - Ridge length = L + 2
//!
//! The quantity formulas are fixed allowances for a rough budget, not a
//! framing takeoff.
//!
//! ## Example
//!
//! ```rust
//! use estimate_core::calculations::shed::{compute_shed_estimate, ShedInputs};
//!
//! let result = compute_shed_estimate(&ShedInputs::default());
//! assert_eq!(result.contingency_percent, 10.0);
//! assert_eq!(result.total_amount, result.materials_subtotal + result.contingency_amount);
//!
//! // Toggle tax on without recomputing geometry
//! let taxed = result.with_adjustments(true, 0.07, 10.0);
//! assert!(taxed.total_amount > result.total_amount);
//! ```

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::errors::{EstimateError, EstimateResult};
use crate::materials::MaterialId;
use crate::units::{round_cents, Feet, SquareFeet};

/// Sales tax rate offered when the caller enables tax
pub const DEFAULT_SALES_TAX_RATE: f64 = 0.07;

/// Contingency applied by [`compute_shed_estimate`]
pub const DEFAULT_CONTINGENCY_PERCENT: f64 = 10.0;

/// Baseline labor rate ($/hr)
pub const BASELINE_LABOR_RATE: f64 = 75.0;

/// Description of the labor line item
pub const LABOR_DESCRIPTION: &str = "Labor (estimated)";

/// Nails are billed as a flat weight regardless of size (lb)
const NAILS_LB: f64 = 25.0;

/// Minimum billed labor hours
const MIN_LABOR_HOURS: f64 = 8.0;

/// Roof cladding choice
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RoofType {
    #[default]
    Metal,
    Shingle,
}

impl RoofType {
    pub const ALL: [RoofType; 2] = [RoofType::Metal, RoofType::Shingle];

    pub fn as_str(&self) -> &'static str {
        match self {
            RoofType::Metal => "metal",
            RoofType::Shingle => "shingle",
        }
    }
}

impl std::fmt::Display for RoofType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Wall cladding choice
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SidingType {
    #[default]
    Vinyl,
    Metal,
    Wood,
}

impl SidingType {
    pub const ALL: [SidingType; 3] = [SidingType::Vinyl, SidingType::Metal, SidingType::Wood];

    pub fn as_str(&self) -> &'static str {
        match self {
            SidingType::Vinyl => "vinyl",
            SidingType::Metal => "metal",
            SidingType::Wood => "wood",
        }
    }

    /// Catalog entry billed for this siding
    pub fn material_id(&self) -> MaterialId {
        match self {
            SidingType::Vinyl => MaterialId::SidingVinyl,
            SidingType::Metal => MaterialId::SidingMetal,
            SidingType::Wood => MaterialId::SidingWood,
        }
    }
}

impl std::fmt::Display for SidingType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Dimensions and options of the structure.
///
/// ## JSON Example
///
/// ```json
/// {
///   "width_ft": 10.0,
///   "length_ft": 12.0,
///   "height_ft": 8.0,
///   "roof_type": "metal",
///   "window_count": 1,
///   "door_count": 1,
///   "siding_type": "vinyl"
/// }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ShedInputs {
    /// Width in feet (4–100)
    pub width_ft: f64,
    /// Length in feet (4–100); the ridge runs along the length
    pub length_ft: f64,
    /// Wall height in feet (6–20)
    pub height_ft: f64,
    pub roof_type: RoofType,
    /// Number of windows (0–20)
    pub window_count: u32,
    /// Number of doors (0–10)
    pub door_count: u32,
    pub siding_type: SidingType,
}

impl Default for ShedInputs {
    fn default() -> Self {
        ShedInputs {
            width_ft: 10.0,
            length_ft: 12.0,
            height_ft: 8.0,
            roof_type: RoofType::Metal,
            window_count: 1,
            door_count: 1,
            siding_type: SidingType::Vinyl,
        }
    }
}

impl ShedInputs {
    /// Check the bounds enforced by the calling layer.
    ///
    /// [`compute_shed_estimate`] does not call this; callers validate first.
    pub fn validate(&self) -> EstimateResult<()> {
        check_range("width_ft", self.width_ft, 4.0, 100.0, "Width 4–100 ft")?;
        check_range("length_ft", self.length_ft, 4.0, 100.0, "Length 4–100 ft")?;
        check_range("height_ft", self.height_ft, 6.0, 20.0, "Height 6–20 ft")?;
        if self.window_count > 20 {
            return Err(EstimateError::invalid_input(
                "window_count",
                self.window_count.to_string(),
                "Windows 0–20",
            ));
        }
        if self.door_count > 10 {
            return Err(EstimateError::invalid_input(
                "door_count",
                self.door_count.to_string(),
                "Doors 0–10",
            ));
        }
        Ok(())
    }

    /// Geometry derived from the dimensions
    pub fn geometry(&self) -> ShedGeometry {
        let width = Feet(self.width_ft);
        let length = Feet(self.length_ft);
        let overhang = Feet(2.0);

        let perimeter = (width + length) * 2.0;
        ShedGeometry {
            floor_area: width * length,
            perimeter,
            wall_area: perimeter * Feet(self.height_ft),
            roof_area: (width + overhang) * (length + overhang) * 1.08,
            ridge_length: length + overhang,
        }
    }

    /// One-line description of the structure, e.g.
    /// `10'×12'×8', metal roof, 1 window(s), 1 door(s), vinyl siding`
    pub fn summary(&self) -> String {
        format!(
            "{}'×{}'×{}', {} roof, {} window(s), {} door(s), {} siding",
            self.width_ft,
            self.length_ft,
            self.height_ft,
            self.roof_type,
            self.window_count,
            self.door_count,
            self.siding_type
        )
    }
}

fn check_range(field: &str, value: f64, min: f64, max: f64, reason: &str) -> EstimateResult<()> {
    if !value.is_finite() || value < min || value > max {
        return Err(EstimateError::invalid_input(field, value.to_string(), reason));
    }
    Ok(())
}

/// Check a sales tax rate (fraction) and contingency percentage before they
/// are applied. Both must be finite and non-negative.
pub fn validate_adjustments(tax_rate: f64, contingency_percent: f64) -> EstimateResult<()> {
    if !tax_rate.is_finite() || tax_rate < 0.0 {
        return Err(EstimateError::invalid_input(
            "sales_tax_rate",
            tax_rate.to_string(),
            "Tax rate must be 0 or more",
        ));
    }
    if !contingency_percent.is_finite() || contingency_percent < 0.0 {
        return Err(EstimateError::invalid_input(
            "contingency_percent",
            contingency_percent.to_string(),
            "Contingency must be 0 or more",
        ));
    }
    Ok(())
}

/// Derived geometry of the structure.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ShedGeometry {
    pub floor_area: SquareFeet,
    pub perimeter: Feet,
    pub wall_area: SquareFeet,
    pub roof_area: SquareFeet,
    pub ridge_length: Feet,
}

/// One row of the bill of materials.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuickEstimateLineItem {
    pub description: String,
    pub quantity: f64,
    pub unit: String,
    pub unit_cost: f64,
    /// quantity × unit_cost, rounded to cents
    pub extended_cost: f64,
}

impl QuickEstimateLineItem {
    fn from_catalog(id: MaterialId, quantity: f64) -> Self {
        let material = id.material();
        QuickEstimateLineItem {
            description: material.description.to_string(),
            quantity,
            unit: material.unit.to_string(),
            unit_cost: material.unit_cost,
            extended_cost: round_cents(quantity * material.unit_cost),
        }
    }

    fn labor(hours: f64) -> Self {
        QuickEstimateLineItem {
            description: LABOR_DESCRIPTION.to_string(),
            quantity: hours,
            unit: "hr".to_string(),
            unit_cost: BASELINE_LABOR_RATE,
            extended_cost: round_cents(hours * BASELINE_LABOR_RATE),
        }
    }
}

/// Priced bill of materials with tax and contingency.
///
/// Replaced wholesale when inputs change; see [`QuickEstimateResult::with_adjustments`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuickEstimateResult {
    pub line_items: Vec<QuickEstimateLineItem>,
    /// Sum of all extended costs, labor included
    pub materials_subtotal: f64,
    pub sales_tax_enabled: bool,
    pub sales_tax_rate: f64,
    pub sales_tax_amount: f64,
    pub contingency_percent: f64,
    pub contingency_amount: f64,
    pub total_amount: f64,
}

impl QuickEstimateResult {
    /// Return a copy with tax and contingency re-applied to the same subtotal.
    pub fn with_adjustments(&self, tax_enabled: bool, tax_rate: f64, contingency_percent: f64) -> Self {
        let adjusted = apply_tax_and_contingency(self.materials_subtotal, tax_enabled, tax_rate, contingency_percent);
        QuickEstimateResult {
            line_items: self.line_items.clone(),
            materials_subtotal: self.materials_subtotal,
            sales_tax_enabled: tax_enabled,
            sales_tax_rate: tax_rate,
            sales_tax_amount: adjusted.sales_tax_amount,
            contingency_percent,
            contingency_amount: adjusted.contingency_amount,
            total_amount: adjusted.total_amount,
        }
    }

    /// First line item whose description contains `needle` (case-insensitive)
    pub fn find_item(&self, needle: &str) -> Option<&QuickEstimateLineItem> {
        let needle = needle.to_lowercase();
        self.line_items
            .iter()
            .find(|item| item.description.to_lowercase().contains(&needle))
    }
}

/// Tax and contingency applied to a subtotal.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TaxAndContingency {
    pub sales_tax_amount: f64,
    pub contingency_amount: f64,
    pub total_amount: f64,
}

/// Apply optional sales tax and a contingency percentage to a subtotal.
///
/// Tax and contingency are each rounded to cents; the total is their sum with
/// the unrounded subtotal.
///
/// # Example
///
/// ```rust
/// use estimate_core::calculations::shed::apply_tax_and_contingency;
///
/// let adjusted = apply_tax_and_contingency(1000.0, true, 0.07, 10.0);
/// assert_eq!(adjusted.sales_tax_amount, 70.0);
/// assert_eq!(adjusted.contingency_amount, 100.0);
/// assert_eq!(adjusted.total_amount, 1170.0);
/// ```
pub fn apply_tax_and_contingency(
    materials_subtotal: f64,
    tax_enabled: bool,
    tax_rate: f64,
    contingency_percent: f64,
) -> TaxAndContingency {
    let sales_tax_amount = if tax_enabled {
        round_cents(materials_subtotal * tax_rate)
    } else {
        0.0
    };
    let contingency_amount = round_cents(materials_subtotal * (contingency_percent / 100.0));
    TaxAndContingency {
        sales_tax_amount,
        contingency_amount,
        total_amount: materials_subtotal + sales_tax_amount + contingency_amount,
    }
}

/// Compute the bill of materials and price for a shed / utility building.
///
/// Tax is never applied here; callers opt in with
/// [`QuickEstimateResult::with_adjustments`] or [`apply_tax_and_contingency`].
/// Roof type does not change the bill of materials.
pub fn compute_shed_estimate(inputs: &ShedInputs) -> QuickEstimateResult {
    let g = inputs.geometry();
    let (width, length, height) = (inputs.width_ft, inputs.length_ft, inputs.height_ft);
    let floor_area = g.floor_area.0;
    let perimeter = g.perimeter.0;
    let wall_area = g.wall_area.0;
    let roof_area = g.roof_area.0;
    let ridge_length = g.ridge_length.0;

    let mut line_items = Vec::with_capacity(15);

    // Pads, one per ~4 sqft of floor, bought in fours
    let pad_count = (floor_area / 4.0).ceil() * 4.0;
    line_items.push(QuickEstimateLineItem::from_catalog(MaterialId::ConcreteBlock, pad_count));

    // Top/bottom plates + wall studs at ~16" OC + floor joists
    let stud_count = (perimeter * 2.0 / 8.0).ceil() * 2.0
        + (perimeter / 1.33).ceil() * (height * 2.0).ceil()
        + (length / 1.33).ceil() * (width * 2.0).ceil();
    line_items.push(QuickEstimateLineItem::from_catalog(MaterialId::Stud2x4, stud_count.ceil()));

    let rafter_count = ((width + 2.0) / 2.0).ceil() * 2.0 * ((length / 2.0).ceil() + 1.0);
    line_items.push(QuickEstimateLineItem::from_catalog(MaterialId::Stud2x6, rafter_count));

    // Floor, walls and roof are all sheathed
    let osb_area = floor_area + wall_area + roof_area;
    line_items.push(QuickEstimateLineItem::from_catalog(MaterialId::Osb, osb_area.ceil()));

    line_items.push(QuickEstimateLineItem::from_catalog(MaterialId::Underlayment, roof_area.ceil()));
    line_items.push(QuickEstimateLineItem::from_catalog(MaterialId::MetalRoofPanel, roof_area.ceil()));
    line_items.push(QuickEstimateLineItem::from_catalog(MaterialId::RidgeCap, ridge_length));
    line_items.push(QuickEstimateLineItem::from_catalog(MaterialId::ScrewsRoof, (roof_area * 1.5).ceil()));

    line_items.push(QuickEstimateLineItem::from_catalog(MaterialId::HouseWrap, wall_area.ceil()));
    line_items.push(QuickEstimateLineItem::from_catalog(
        inputs.siding_type.material_id(),
        wall_area.ceil(),
    ));

    if inputs.window_count > 0 {
        line_items.push(QuickEstimateLineItem::from_catalog(
            MaterialId::WindowUnit,
            f64::from(inputs.window_count),
        ));
    }
    if inputs.door_count > 0 {
        line_items.push(QuickEstimateLineItem::from_catalog(
            MaterialId::DoorUnit,
            f64::from(inputs.door_count),
        ));
    }

    let trim_linear_ft = perimeter * 2.0 + ridge_length * 2.0;
    line_items.push(QuickEstimateLineItem::from_catalog(MaterialId::Trim, trim_linear_ft.ceil()));

    line_items.push(QuickEstimateLineItem::from_catalog(MaterialId::Nails, NAILS_LB));

    // ~2 hr per 10 sqft of floor
    let labor_hours = ((floor_area / 10.0) * 2.0).max(MIN_LABOR_HOURS);
    line_items.push(QuickEstimateLineItem::labor(labor_hours));

    let materials_subtotal = line_items.iter().fold(0.0, |sum, item| sum + item.extended_cost);

    let adjusted = apply_tax_and_contingency(materials_subtotal, false, 0.0, DEFAULT_CONTINGENCY_PERCENT);

    debug!(
        summary = %inputs.summary(),
        items = line_items.len(),
        subtotal = materials_subtotal,
        "computed shed estimate"
    );

    QuickEstimateResult {
        line_items,
        materials_subtotal,
        sales_tax_enabled: false,
        sales_tax_rate: 0.0,
        sales_tax_amount: adjusted.sales_tax_amount,
        contingency_percent: DEFAULT_CONTINGENCY_PERCENT,
        contingency_amount: adjusted.contingency_amount,
        total_amount: adjusted.total_amount,
    }
}
