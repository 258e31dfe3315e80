use serde::{Deserialize, Serialize};

use crate::applications::{Checklist, NewApplication, Notes};
use crate::clients::{ClientDetails, NewClient};
use crate::errors::{Result, ValidationError};
use crate::money::Amount;
use crate::utils::number_utils::parse_decimal;

/// A field that must hold a number when it is filled in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NumericField {
    ProjectAmountTotal,
    OfferedRebateAmount,
    ApprovedRebateAmount,
    TotalClientPayAfterRebate,
    BuildingYearBuilt,
    BuildingSqft,
    ConditionedSqft,
}

impl NumericField {
    /// Checked in this order; the first bad field is reported.
    pub const ALL: [NumericField; 7] = [
        NumericField::ProjectAmountTotal,
        NumericField::OfferedRebateAmount,
        NumericField::ApprovedRebateAmount,
        NumericField::TotalClientPayAfterRebate,
        NumericField::BuildingYearBuilt,
        NumericField::BuildingSqft,
        NumericField::ConditionedSqft,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            NumericField::ProjectAmountTotal => "project_amount_total",
            NumericField::OfferedRebateAmount => "offered_rebate_amount",
            NumericField::ApprovedRebateAmount => "approved_rebate_amount",
            NumericField::TotalClientPayAfterRebate => "total_client_pay_after_rebate",
            NumericField::BuildingYearBuilt => "building_year_built",
            NumericField::BuildingSqft => "building_sqft",
            NumericField::ConditionedSqft => "conditioned_sqft",
        }
    }

    pub(crate) fn draft<'a>(&self, form: &'a ClientDetailsForm) -> &'a str {
        match self {
            NumericField::ProjectAmountTotal => &form.project_amount_total,
            NumericField::OfferedRebateAmount => &form.offered_rebate_amount,
            NumericField::ApprovedRebateAmount => &form.approved_rebate_amount,
            NumericField::TotalClientPayAfterRebate => &form.total_client_pay_after_rebate,
            NumericField::BuildingYearBuilt => &form.building_year_built,
            NumericField::BuildingSqft => &form.building_sqft,
            NumericField::ConditionedSqft => &form.conditioned_sqft,
        }
    }

    pub(crate) fn amount<'a>(&self, details: &'a ClientDetails) -> &'a Amount {
        match self {
            NumericField::ProjectAmountTotal => &details.project_amount_total,
            NumericField::OfferedRebateAmount => &details.offered_rebate_amount,
            NumericField::ApprovedRebateAmount => &details.approved_rebate_amount,
            NumericField::TotalClientPayAfterRebate => &details.total_client_pay_after_rebate,
            NumericField::BuildingYearBuilt => &details.building_year_built,
            NumericField::BuildingSqft => &details.building_sqft,
            NumericField::ConditionedSqft => &details.conditioned_sqft,
        }
    }
}

/// Draft values for client details, exactly as typed.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct ClientDetailsForm {
    pub full_name: String,
    pub email: String,
    pub phone_number: String,
    pub address: String,
    pub disadvantage: bool,
    pub electricity_acct: String,
    pub coned_eligibility_key: String,
    pub project_amount_total: String,
    pub offered_rebate_amount: String,
    pub approved_rebate_amount: String,
    pub total_client_pay_after_rebate: String,
    pub building_year_built: String,
    pub building_sqft: String,
    pub conditioned_sqft: String,
    pub condenser_models: Vec<String>,
}

fn optional_text(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

impl ClientDetailsForm {
    /// Checks the draft before anything is sent.
    ///
    /// The name must be non-blank. Each numeric field, when filled in, must
    /// coerce to a number that fits in a `Decimal`, so nothing that passes
    /// here is stored as malformed text.
    pub fn validate(&self) -> std::result::Result<(), ValidationError> {
        if self.full_name.trim().is_empty() {
            return Err(ValidationError::MissingFullName);
        }
        for field in NumericField::ALL {
            let value = field.draft(self);
            if !value.trim().is_empty() && parse_decimal(value).is_none() {
                return Err(ValidationError::NotANumber(field.as_str().to_string()));
            }
        }
        Ok(())
    }

    /// Validates and converts the draft into typed details.
    pub fn into_details(self) -> Result<ClientDetails> {
        self.validate()?;
        Ok(ClientDetails {
            full_name: self.full_name.trim().to_string(),
            email: optional_text(&self.email),
            phone_number: optional_text(&self.phone_number),
            address: optional_text(&self.address),
            disadvantage: self.disadvantage,
            electricity_acct: optional_text(&self.electricity_acct),
            coned_eligibility_key: optional_text(&self.coned_eligibility_key),
            project_amount_total: Amount::parse(&self.project_amount_total),
            offered_rebate_amount: Amount::parse(&self.offered_rebate_amount),
            approved_rebate_amount: Amount::parse(&self.approved_rebate_amount),
            total_client_pay_after_rebate: Amount::parse(&self.total_client_pay_after_rebate),
            building_year_built: Amount::parse(&self.building_year_built),
            building_sqft: Amount::parse(&self.building_sqft),
            conditioned_sqft: Amount::parse(&self.conditioned_sqft),
            condenser_models: self
                .condenser_models
                .iter()
                .filter_map(|model| optional_text(model))
                .collect(),
        })
    }

    pub fn into_new_client(self) -> Result<NewClient> {
        Ok(NewClient {
            details: self.into_details()?,
        })
    }
}

/// Draft for the application creation flow.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct ApplicationForm {
    pub details: ClientDetailsForm,
    /// Flags already ticked at creation. All false by default.
    pub checklist: Checklist,
}

impl ApplicationForm {
    pub fn validate(&self) -> std::result::Result<(), ValidationError> {
        self.details.validate()
    }

    pub fn into_new_application(self) -> Result<NewApplication> {
        Ok(NewApplication {
            details: self.details.into_details()?,
            checklist: self.checklist,
            notes: Notes::default(),
        })
    }
}
