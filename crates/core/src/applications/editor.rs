//! Detail-view state: read mode, edit mode, and the draft being saved.

use std::str::FromStr;

use chrono::{DateTime, Utc};

use super::applications_model::ApplicationRecord;
use super::checklist::ChecklistItem;
use crate::errors::{Error, ValidationError};
use crate::forms::validate_details;
use crate::money::Amount;
use crate::utils::time_utils::to_note_timestamp;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorMode {
    Read,
    Edit,
}

/// A detail field the operator can change in edit mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditableField {
    FullName,
    Address,
    Email,
    PhoneNumber,
    ElectricityAcct,
    ConedEligibilityKey,
    Disadvantage,
    ProjectAmountTotal,
    OfferedRebateAmount,
    ApprovedRebateAmount,
    TotalClientPayAfterRebate,
    BuildingYearBuilt,
    BuildingSqft,
    ConditionedSqft,
}

impl EditableField {
    pub const ALL: [EditableField; 14] = [
        EditableField::FullName,
        EditableField::Address,
        EditableField::Email,
        EditableField::PhoneNumber,
        EditableField::ElectricityAcct,
        EditableField::ConedEligibilityKey,
        EditableField::Disadvantage,
        EditableField::ProjectAmountTotal,
        EditableField::OfferedRebateAmount,
        EditableField::ApprovedRebateAmount,
        EditableField::TotalClientPayAfterRebate,
        EditableField::BuildingYearBuilt,
        EditableField::BuildingSqft,
        EditableField::ConditionedSqft,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            EditableField::FullName => "full_name",
            EditableField::Address => "address",
            EditableField::Email => "email",
            EditableField::PhoneNumber => "phone_number",
            EditableField::ElectricityAcct => "electricity_acct",
            EditableField::ConedEligibilityKey => "coned_eligibility_key",
            EditableField::Disadvantage => "disadvantage",
            EditableField::ProjectAmountTotal => "project_amount_total",
            EditableField::OfferedRebateAmount => "offered_rebate_amount",
            EditableField::ApprovedRebateAmount => "approved_rebate_amount",
            EditableField::TotalClientPayAfterRebate => "total_client_pay_after_rebate",
            EditableField::BuildingYearBuilt => "building_year_built",
            EditableField::BuildingSqft => "building_sqft",
            EditableField::ConditionedSqft => "conditioned_sqft",
        }
    }
}

impl FromStr for EditableField {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().replace('-', "_").to_ascii_lowercase();
        EditableField::ALL
            .into_iter()
            .find(|field| field.as_str() == wanted)
            .ok_or_else(|| {
                ValidationError::InvalidInput(format!("'{}' is not an editable field", s)).into()
            })
    }
}

fn optional_text(value: &str) -> Option<String> {
    if value.trim().is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

/// Holds one application on the detail screen.
///
/// Field edits go to a draft that `cancel` throws away. Checklist toggles and
/// notes apply to the draft too but survive `cancel`, matching how the screen
/// keeps them outside the edit form. Saving always sends the whole merged
/// record.
#[derive(Debug, Clone)]
pub struct ApplicationEditor {
    saved: ApplicationRecord,
    draft: ApplicationRecord,
    mode: EditorMode,
}

impl ApplicationEditor {
    pub fn new(record: ApplicationRecord) -> Self {
        Self {
            draft: record.clone(),
            saved: record,
            mode: EditorMode::Read,
        }
    }

    pub fn mode(&self) -> EditorMode {
        self.mode
    }

    /// Last state confirmed by the backend.
    pub fn saved(&self) -> &ApplicationRecord {
        &self.saved
    }

    pub fn draft(&self) -> &ApplicationRecord {
        &self.draft
    }

    pub fn begin_edit(&mut self) {
        self.mode = EditorMode::Edit;
    }

    /// Drops unsaved field edits and returns to read mode.
    pub fn cancel(&mut self) {
        self.draft.details = self.saved.details.clone();
        self.mode = EditorMode::Read;
    }

    /// Changes a field on the draft. Only allowed in edit mode.
    pub fn set_field(&mut self, field: EditableField, value: &str) -> Result<(), Error> {
        if self.mode != EditorMode::Edit {
            return Err(ValidationError::InvalidInput(
                "switch to edit mode before changing fields".to_string(),
            )
            .into());
        }
        let d = &mut self.draft.details;
        match field {
            EditableField::FullName => d.full_name = value.to_string(),
            EditableField::Address => d.address = optional_text(value),
            EditableField::Email => d.email = optional_text(value),
            EditableField::PhoneNumber => d.phone_number = optional_text(value),
            EditableField::ElectricityAcct => d.electricity_acct = optional_text(value),
            EditableField::ConedEligibilityKey => d.coned_eligibility_key = optional_text(value),
            EditableField::Disadvantage => {
                d.disadvantage = match value.trim().to_ascii_lowercase().as_str() {
                    "true" | "yes" | "1" => true,
                    "false" | "no" | "0" | "" => false,
                    other => {
                        return Err(ValidationError::InvalidInput(format!(
                            "disadvantage must be true or false, got '{}'",
                            other
                        ))
                        .into())
                    }
                }
            }
            EditableField::ProjectAmountTotal => d.project_amount_total = Amount::parse(value),
            EditableField::OfferedRebateAmount => d.offered_rebate_amount = Amount::parse(value),
            EditableField::ApprovedRebateAmount => d.approved_rebate_amount = Amount::parse(value),
            EditableField::TotalClientPayAfterRebate => {
                d.total_client_pay_after_rebate = Amount::parse(value)
            }
            EditableField::BuildingYearBuilt => d.building_year_built = Amount::parse(value),
            EditableField::BuildingSqft => d.building_sqft = Amount::parse(value),
            EditableField::ConditionedSqft => d.conditioned_sqft = Amount::parse(value),
        }
        Ok(())
    }

    /// Flips a checklist item and returns its new state.
    pub fn toggle(&mut self, item: ChecklistItem) -> bool {
        self.draft.checklist.toggle(item)
    }

    /// Prepends a note stamped with `now`. Returns false for blank text.
    pub fn add_note(&mut self, text: &str, now: DateTime<Utc>) -> bool {
        self.draft.notes.prepend(text, to_note_timestamp(now))
    }

    pub fn is_dirty(&self) -> bool {
        self.draft != self.saved
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        validate_details(&self.draft.details)
    }

    /// The full record to send with `PUT`.
    pub fn save_body(&self) -> ApplicationRecord {
        self.draft.clone()
    }

    /// Adopts the record the backend returned after a save.
    pub fn apply_saved(&mut self, record: ApplicationRecord) {
        self.draft = record.clone();
        self.saved = record;
        self.mode = EditorMode::Read;
    }
}
