//! # Estimate Records
//!
//! An [`EstimateRecord`] is the value handed to persistence and rendering
//! collaborators: client details, the project type, and the priced body,
//! stamped with an id and timestamps. Records are built only from validated
//! input, so a stored record always reflects a successful calculation.
//!
//! ## Structure
//!
//! ```text
//! EstimateRecord
//! ├── id: Uuid
//! ├── client: ClientInfo (name, phone, email, address, ZIP)
//! ├── project_type
//! ├── body: EstimateBody (Itemized | Quick)
//! └── created / modified
//! ```
//!
//! ## Example
//!
//! ```rust
//! use estimate_core::calculations::{EstimateInput, LineItemInput};
//! use estimate_core::estimate::{ClientInfo, EstimateRecord};
//! use estimate_core::materials::ProjectCategory;
//! use estimate_core::settings::CalculationSettings;
//! use estimate_core::units::Unit;
//!
//! let client = ClientInfo::new("John Smith", "(555) 123-4567", "john@example.com", "123 Main Street", "12345");
//! let input = EstimateInput {
//!     project_type: ProjectCategory::Kitchen,
//!     line_items: vec![LineItemInput::new("Install countertops", 30.0, Unit::SquareFeet)],
//!     settings: CalculationSettings::default(),
//! };
//!
//! let record = EstimateRecord::itemized(client, &input).unwrap();
//! assert!(record.total_amount() > 0.0);
//!
//! let json = serde_json::to_string_pretty(&record).unwrap();
//! assert!(json.contains("Itemized"));
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::calculations::{
    calculate_estimate, compute_shed_estimate, validate_adjustments, validate_estimate_input, EstimateBody,
    EstimateInput, LineItemInput, ShedInputs,
};
use crate::errors::{EstimateError, EstimateResult};
use crate::materials::ProjectCategory;
use crate::settings::CalculationSettings;

/// Project type recorded for structure estimates
pub const QUICK_ESTIMATE_PROJECT_TYPE: &str = "Utility Building / Shed";

/// Contact details of the client an estimate is prepared for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientInfo {
    pub name: String,
    pub phone: String,
    pub email: String,
    pub address: String,
    pub zip_code: String,
}

impl ClientInfo {
    pub fn new(
        name: impl Into<String>,
        phone: impl Into<String>,
        email: impl Into<String>,
        address: impl Into<String>,
        zip_code: impl Into<String>,
    ) -> Self {
        ClientInfo {
            name: name.into(),
            phone: phone.into(),
            email: email.into(),
            address: address.into(),
            zip_code: zip_code.into(),
        }
    }

    /// Validate the client fields, reporting the first problem found.
    pub fn validate(&self) -> EstimateResult<()> {
        require("name", &self.name, "Client name is required")?;
        require("phone", &self.phone, "Phone is required")?;
        if !looks_like_email(self.email.trim()) {
            return Err(EstimateError::invalid_input(
                "email",
                self.email.as_str(),
                "Valid email is required",
            ));
        }
        require("address", &self.address, "Address is required")?;
        if self.zip_code.trim().chars().count() < 5 {
            return Err(EstimateError::invalid_input(
                "zip_code",
                self.zip_code.as_str(),
                "ZIP code is required",
            ));
        }
        Ok(())
    }
}

fn require(field: &str, value: &str, reason: &str) -> EstimateResult<()> {
    if value.trim().is_empty() {
        return Err(EstimateError::invalid_input(field, value, reason));
    }
    Ok(())
}

/// `local@domain.tld` with no whitespace
fn looks_like_email(email: &str) -> bool {
    if email.chars().any(char::is_whitespace) {
        return false;
    }
    match email.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && !domain.contains('@')
                && domain
                    .split_once('.')
                    .is_some_and(|(host, tld)| !host.is_empty() && !tld.is_empty() && !tld.ends_with('.'))
        }
        None => false,
    }
}

/// A priced estimate ready for persistence or rendering.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EstimateRecord {
    pub id: Uuid,
    pub client: ClientInfo,
    pub project_type: String,
    pub body: EstimateBody,
    pub created: DateTime<Utc>,
    pub modified: DateTime<Utc>,
}

impl EstimateRecord {
    fn new(client: ClientInfo, project_type: String, body: EstimateBody) -> Self {
        let now = Utc::now();
        EstimateRecord {
            id: Uuid::new_v4(),
            client,
            project_type,
            body,
            created: now,
            modified: now,
        }
    }

    /// Validate and price a line-item estimate.
    pub fn itemized(client: ClientInfo, input: &EstimateInput) -> EstimateResult<Self> {
        client.validate()?;
        validate_estimate_input(input).into_result()?;

        let output = calculate_estimate(input);
        Ok(EstimateRecord::new(
            client,
            input.project_type.to_string(),
            EstimateBody::Itemized(output),
        ))
    }

    /// Validate and price a structure estimate with the chosen tax and
    /// contingency.
    pub fn quick(
        client: ClientInfo,
        inputs: &ShedInputs,
        tax_enabled: bool,
        tax_rate: f64,
        contingency_percent: f64,
    ) -> EstimateResult<Self> {
        client.validate()?;
        inputs.validate()?;
        validate_adjustments(tax_rate, contingency_percent)?;

        let result = compute_shed_estimate(inputs).with_adjustments(tax_enabled, tax_rate, contingency_percent);
        Ok(EstimateRecord::new(
            client,
            QUICK_ESTIMATE_PROJECT_TYPE.to_string(),
            EstimateBody::Quick(result),
        ))
    }

    /// Replace the line items of an itemized estimate and price them again.
    ///
    /// The record is left unchanged if validation fails. Structure estimates
    /// are recomputed from their inputs instead, so they are rejected here.
    pub fn reprice(&mut self, line_items: Vec<LineItemInput>, settings: CalculationSettings) -> EstimateResult<()> {
        if !matches!(self.body, EstimateBody::Itemized(_)) {
            return Err(EstimateError::invalid_input(
                "body",
                self.body.kind(),
                "Only itemized estimates can be repriced",
            ));
        }

        let input = EstimateInput {
            project_type: ProjectCategory::from(self.project_type.as_str()),
            line_items,
            settings,
        };
        validate_estimate_input(&input).into_result()?;

        self.body = EstimateBody::Itemized(calculate_estimate(&input));
        self.touch();
        Ok(())
    }

    /// Final amount of the estimate
    pub fn total_amount(&self) -> f64 {
        self.body.total_amount()
    }

    /// Update the modified timestamp.
    pub fn touch(&mut self) {
        self.modified = Utc::now();
    }
}
