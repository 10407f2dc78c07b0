//! Baseline Material Catalog
//!
//! Conservative unit prices embedded in code so structure estimates can be
//! computed with no stored configuration or network access. Prices are
//! labeled "baseline pricing" wherever they are shown.

use std::collections::HashMap;

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::errors::{EstimateError, EstimateResult};

/// Catalog grouping for a baseline material
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MaterialCategory {
    Lumber,
    Sheathing,
    Roofing,
    Siding,
    Openings,
    Concrete,
    Fasteners,
    Other,
}

/// Identifier of a baseline catalog entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MaterialId {
    #[serde(rename = "stud_2x4")]
    Stud2x4,
    #[serde(rename = "stud_2x6")]
    Stud2x6,
    Osb,
    MetalRoofPanel,
    RidgeCap,
    Underlayment,
    ScrewsRoof,
    Nails,
    HouseWrap,
    SidingVinyl,
    SidingMetal,
    SidingWood,
    WindowUnit,
    DoorUnit,
    ConcreteBlock,
    Trim,
}

impl MaterialId {
    /// All catalog entries, in catalog order
    pub const ALL: [MaterialId; 16] = [
        MaterialId::Stud2x4,
        MaterialId::Stud2x6,
        MaterialId::Osb,
        MaterialId::MetalRoofPanel,
        MaterialId::RidgeCap,
        MaterialId::Underlayment,
        MaterialId::ScrewsRoof,
        MaterialId::Nails,
        MaterialId::HouseWrap,
        MaterialId::SidingVinyl,
        MaterialId::SidingMetal,
        MaterialId::SidingWood,
        MaterialId::WindowUnit,
        MaterialId::DoorUnit,
        MaterialId::ConcreteBlock,
        MaterialId::Trim,
    ];

    /// Catalog id string (e.g., "stud_2x4")
    pub fn code(&self) -> &'static str {
        match self {
            MaterialId::Stud2x4 => "stud_2x4",
            MaterialId::Stud2x6 => "stud_2x6",
            MaterialId::Osb => "osb",
            MaterialId::MetalRoofPanel => "metal_roof_panel",
            MaterialId::RidgeCap => "ridge_cap",
            MaterialId::Underlayment => "underlayment",
            MaterialId::ScrewsRoof => "screws_roof",
            MaterialId::Nails => "nails",
            MaterialId::HouseWrap => "house_wrap",
            MaterialId::SidingVinyl => "siding_vinyl",
            MaterialId::SidingMetal => "siding_metal",
            MaterialId::SidingWood => "siding_wood",
            MaterialId::WindowUnit => "window_unit",
            MaterialId::DoorUnit => "door_unit",
            MaterialId::ConcreteBlock => "concrete_block",
            MaterialId::Trim => "trim",
        }
    }

    /// Full catalog entry for this id
    pub fn material(&self) -> BaselineMaterial {
        use MaterialCategory as C;
        let (description, unit, unit_cost, category) = match self {
            MaterialId::Stud2x4 => ("2x4 studs", "each", 4.25, C::Lumber),
            MaterialId::Stud2x6 => ("2x6 rafters / joists", "each", 6.5, C::Lumber),
            MaterialId::Osb => ("OSB / Plywood sheathing", "sqft", 0.85, C::Sheathing),
            MaterialId::MetalRoofPanel => ("Metal roofing panels", "sqft", 2.1, C::Roofing),
            MaterialId::RidgeCap => ("Ridge cap", "linear ft", 3.5, C::Roofing),
            MaterialId::Underlayment => ("Roof underlayment", "sqft", 0.35, C::Roofing),
            MaterialId::ScrewsRoof => ("Roofing screws", "each", 0.08, C::Fasteners),
            MaterialId::Nails => ("Nails / fasteners", "lb", 4.0, C::Fasteners),
            MaterialId::HouseWrap => ("House wrap", "sqft", 0.22, C::Siding),
            MaterialId::SidingVinyl => ("Vinyl siding", "sqft", 2.5, C::Siding),
            MaterialId::SidingMetal => ("Metal siding", "sqft", 3.0, C::Siding),
            MaterialId::SidingWood => ("Wood / LP siding", "sqft", 3.5, C::Siding),
            MaterialId::WindowUnit => ("Window (unit)", "each", 185.0, C::Openings),
            MaterialId::DoorUnit => ("Door (unit)", "each", 320.0, C::Openings),
            MaterialId::ConcreteBlock => ("Concrete blocks / pads", "each", 2.25, C::Concrete),
            MaterialId::Trim => ("Trim (corner, fascia)", "linear ft", 2.0, C::Other),
        };
        BaselineMaterial {
            id: *self,
            description,
            unit,
            unit_cost,
            category,
        }
    }
}

impl std::fmt::Display for MaterialId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// One priced entry of the baseline catalog.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BaselineMaterial {
    pub id: MaterialId,
    pub description: &'static str,
    /// Billing unit ("each", "sqft", "linear ft", "lb")
    pub unit: &'static str,
    /// Dollars per unit
    pub unit_cost: f64,
    pub category: MaterialCategory,
}

static CATALOG_INDEX: Lazy<HashMap<&'static str, MaterialId>> =
    Lazy::new(|| MaterialId::ALL.iter().map(|id| (id.code(), *id)).collect());

/// Every catalog entry, in catalog order
pub fn catalog() -> Vec<BaselineMaterial> {
    MaterialId::ALL.iter().map(MaterialId::material).collect()
}

/// Look up a catalog entry by its id string.
///
/// # Example
///
/// ```rust
/// use estimate_core::materials::baseline::find;
///
/// let osb = find("osb").unwrap();
/// assert_eq!(osb.unit, "sqft");
/// assert!(find("granite").is_err());
/// ```
pub fn find(code: &str) -> EstimateResult<BaselineMaterial> {
    CATALOG_INDEX
        .get(code)
        .map(MaterialId::material)
        .ok_or_else(|| EstimateError::material_not_found(code))
}
