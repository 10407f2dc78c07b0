//! Project Category Rate Table
//!
//! Per-unit labor and material rates by project category. Categories outside
//! the table price at [`FALLBACK_RATES`] instead of failing.

use serde::{Deserialize, Serialize};

/// Per-unit cost pair for a project category.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BaseRates {
    /// Labor cost per unit ($)
    pub labor: f64,
    /// Material cost per unit ($)
    pub material: f64,
}

/// Rates for any category not in the table
pub const FALLBACK_RATES: BaseRates = BaseRates {
    labor: 50.0,
    material: 40.0,
};

/// Renovation project categories.
///
/// Serializes as its name (`"Kitchen"`, `"HVAC"`). Names outside the closed
/// set are kept as [`ProjectCategory::Other`] and priced at fallback rates.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ProjectCategory {
    Roofing,
    Bathroom,
    Kitchen,
    Flooring,
    Paint,
    Drywall,
    Deck,
    Windows,
    Siding,
    Hvac,
    Electrical,
    Plumbing,
    /// A category name with no entry in the rate table
    Other(String),
}

impl ProjectCategory {
    /// All rated categories for UI selection
    pub const ALL: [ProjectCategory; 12] = [
        ProjectCategory::Roofing,
        ProjectCategory::Bathroom,
        ProjectCategory::Kitchen,
        ProjectCategory::Flooring,
        ProjectCategory::Paint,
        ProjectCategory::Drywall,
        ProjectCategory::Deck,
        ProjectCategory::Windows,
        ProjectCategory::Siding,
        ProjectCategory::Hvac,
        ProjectCategory::Electrical,
        ProjectCategory::Plumbing,
    ];

    /// Category name as stored on estimates
    pub fn as_str(&self) -> &str {
        match self {
            ProjectCategory::Roofing => "Roofing",
            ProjectCategory::Bathroom => "Bathroom",
            ProjectCategory::Kitchen => "Kitchen",
            ProjectCategory::Flooring => "Flooring",
            ProjectCategory::Paint => "Paint",
            ProjectCategory::Drywall => "Drywall",
            ProjectCategory::Deck => "Deck",
            ProjectCategory::Windows => "Windows",
            ProjectCategory::Siding => "Siding",
            ProjectCategory::Hvac => "HVAC",
            ProjectCategory::Electrical => "Electrical",
            ProjectCategory::Plumbing => "Plumbing",
            ProjectCategory::Other(name) => name,
        }
    }

    /// Labor/material rates for this category, or [`FALLBACK_RATES`].
    pub fn base_rates(&self) -> BaseRates {
        let (labor, material) = match self {
            ProjectCategory::Roofing => (3.5, 2.5),
            ProjectCategory::Bathroom => (85.0, 60.0),
            ProjectCategory::Kitchen => (100.0, 75.0),
            ProjectCategory::Flooring => (4.5, 3.0),
            ProjectCategory::Paint => (2.0, 1.5),
            ProjectCategory::Drywall => (2.5, 1.8),
            ProjectCategory::Deck => (8.0, 5.5),
            ProjectCategory::Windows => (150.0, 200.0),
            ProjectCategory::Siding => (4.0, 3.5),
            ProjectCategory::Hvac => (120.0, 150.0),
            ProjectCategory::Electrical => (95.0, 50.0),
            ProjectCategory::Plumbing => (110.0, 80.0),
            ProjectCategory::Other(_) => return FALLBACK_RATES,
        };
        BaseRates { labor, material }
    }

    /// True if the category has its own rates
    pub fn is_rated(&self) -> bool {
        !matches!(self, ProjectCategory::Other(_))
    }
}

impl From<&str> for ProjectCategory {
    fn from(name: &str) -> Self {
        ProjectCategory::ALL
            .into_iter()
            .find(|category| category.as_str() == name)
            .unwrap_or_else(|| ProjectCategory::Other(name.to_string()))
    }
}

impl From<String> for ProjectCategory {
    fn from(name: String) -> Self {
        ProjectCategory::from(name.as_str())
    }
}

impl From<ProjectCategory> for String {
    fn from(category: ProjectCategory) -> Self {
        match category {
            ProjectCategory::Other(name) => name,
            rated => rated.as_str().to_string(),
        }
    }
}

impl std::fmt::Display for ProjectCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Look up rates by category name.
///
/// # Example
///
/// ```rust
/// use estimate_core::materials::rate_table::{rates_for, FALLBACK_RATES};
///
/// assert_eq!(rates_for("Kitchen").material, 75.0);
/// assert_eq!(rates_for("Landscaping"), FALLBACK_RATES);
/// ```
pub fn rates_for(project_type: &str) -> BaseRates {
    ProjectCategory::from(project_type).base_rates()
}
