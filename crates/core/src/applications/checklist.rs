//! The fixed set of documentation and inspection gates on an application.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::{Error, ValidationError};
use crate::utils::serde_utils::lenient_bool;

/// One required document, photo set, or step for rebate approval.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ChecklistItem {
    AcknowledgmentForm,
    SystemTotalCapacity,
    InvoiceOrContract,
    ManualJ,
    NamePlatePhotos,
    SystemInstallationPhotos,
    DecommissioningBeforePhotosWideShots,
    DecommissioningAfterPhotosWideShots,
    DecommissioningBeforePhotosCloseUpShots,
    DecommissioningAfterPhotosCloseUpShots,
    DecommissioningChecklist,
}

impl ChecklistItem {
    /// Every item, in display order.
    pub const ALL: [ChecklistItem; 11] = [
        ChecklistItem::AcknowledgmentForm,
        ChecklistItem::SystemTotalCapacity,
        ChecklistItem::InvoiceOrContract,
        ChecklistItem::ManualJ,
        ChecklistItem::NamePlatePhotos,
        ChecklistItem::SystemInstallationPhotos,
        ChecklistItem::DecommissioningBeforePhotosWideShots,
        ChecklistItem::DecommissioningAfterPhotosWideShots,
        ChecklistItem::DecommissioningBeforePhotosCloseUpShots,
        ChecklistItem::DecommissioningAfterPhotosCloseUpShots,
        ChecklistItem::DecommissioningChecklist,
    ];

    /// Field name on the wire.
    pub fn as_str(&self) -> &'static str {
        match self {
            ChecklistItem::AcknowledgmentForm => "acknowledgment_form",
            ChecklistItem::SystemTotalCapacity => "system_total_capacity",
            ChecklistItem::InvoiceOrContract => "invoice_or_contract",
            ChecklistItem::ManualJ => "manual_j",
            ChecklistItem::NamePlatePhotos => "name_plate_photos",
            ChecklistItem::SystemInstallationPhotos => "system_installation_photos",
            ChecklistItem::DecommissioningBeforePhotosWideShots => {
                "decommissioning_before_photos_wide_shots"
            }
            ChecklistItem::DecommissioningAfterPhotosWideShots => {
                "decommissioning_after_photos_wide_shots"
            }
            ChecklistItem::DecommissioningBeforePhotosCloseUpShots => {
                "decommissioning_before_photos_close_up_shots"
            }
            ChecklistItem::DecommissioningAfterPhotosCloseUpShots => {
                "decommissioning_after_photos_close_up_shots"
            }
            ChecklistItem::DecommissioningChecklist => "decommissioning_checklist",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ChecklistItem::AcknowledgmentForm => "Acknowledgment form",
            ChecklistItem::SystemTotalCapacity => "System total capacity",
            ChecklistItem::InvoiceOrContract => "Invoice or contract",
            ChecklistItem::ManualJ => "Manual J",
            ChecklistItem::NamePlatePhotos => "Name plate photos",
            ChecklistItem::SystemInstallationPhotos => "System installation photos",
            ChecklistItem::DecommissioningBeforePhotosWideShots => {
                "Decommissioning before photos (wide)"
            }
            ChecklistItem::DecommissioningAfterPhotosWideShots => {
                "Decommissioning after photos (wide)"
            }
            ChecklistItem::DecommissioningBeforePhotosCloseUpShots => {
                "Decommissioning before photos (close-up)"
            }
            ChecklistItem::DecommissioningAfterPhotosCloseUpShots => {
                "Decommissioning after photos (close-up)"
            }
            ChecklistItem::DecommissioningChecklist => "Decommissioning checklist",
        }
    }
}

impl fmt::Display for ChecklistItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ChecklistItem {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().replace('-', "_").to_ascii_lowercase();
        ChecklistItem::ALL
            .into_iter()
            .find(|item| item.as_str() == wanted)
            .ok_or_else(|| {
                ValidationError::InvalidInput(format!("unknown checklist item '{}'", s)).into()
            })
    }
}

/// Checklist state of one application. Missing or `null` flags read as false.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct Checklist {
    #[serde(default, deserialize_with = "lenient_bool")]
    pub acknowledgment_form: bool,
    #[serde(default, deserialize_with = "lenient_bool")]
    pub system_total_capacity: bool,
    #[serde(default, deserialize_with = "lenient_bool")]
    pub invoice_or_contract: bool,
    #[serde(default, deserialize_with = "lenient_bool")]
    pub manual_j: bool,
    #[serde(default, deserialize_with = "lenient_bool")]
    pub name_plate_photos: bool,
    #[serde(default, deserialize_with = "lenient_bool")]
    pub system_installation_photos: bool,
    #[serde(default, deserialize_with = "lenient_bool")]
    pub decommissioning_before_photos_wide_shots: bool,
    #[serde(default, deserialize_with = "lenient_bool")]
    pub decommissioning_after_photos_wide_shots: bool,
    #[serde(default, deserialize_with = "lenient_bool")]
    pub decommissioning_before_photos_close_up_shots: bool,
    #[serde(default, deserialize_with = "lenient_bool")]
    pub decommissioning_after_photos_close_up_shots: bool,
    #[serde(default, deserialize_with = "lenient_bool")]
    pub decommissioning_checklist: bool,
}

impl Checklist {
    /// A checklist with every item done.
    pub fn complete() -> Self {
        let mut checklist = Checklist::default();
        for item in ChecklistItem::ALL {
            checklist.set(item, true);
        }
        checklist
    }

    fn slot(&mut self, item: ChecklistItem) -> &mut bool {
        match item {
            ChecklistItem::AcknowledgmentForm => &mut self.acknowledgment_form,
            ChecklistItem::SystemTotalCapacity => &mut self.system_total_capacity,
            ChecklistItem::InvoiceOrContract => &mut self.invoice_or_contract,
            ChecklistItem::ManualJ => &mut self.manual_j,
            ChecklistItem::NamePlatePhotos => &mut self.name_plate_photos,
            ChecklistItem::SystemInstallationPhotos => &mut self.system_installation_photos,
            ChecklistItem::DecommissioningBeforePhotosWideShots => {
                &mut self.decommissioning_before_photos_wide_shots
            }
            ChecklistItem::DecommissioningAfterPhotosWideShots => {
                &mut self.decommissioning_after_photos_wide_shots
            }
            ChecklistItem::DecommissioningBeforePhotosCloseUpShots => {
                &mut self.decommissioning_before_photos_close_up_shots
            }
            ChecklistItem::DecommissioningAfterPhotosCloseUpShots => {
                &mut self.decommissioning_after_photos_close_up_shots
            }
            ChecklistItem::DecommissioningChecklist => &mut self.decommissioning_checklist,
        }
    }

    pub fn get(&self, item: ChecklistItem) -> bool {
        match item {
            ChecklistItem::AcknowledgmentForm => self.acknowledgment_form,
            ChecklistItem::SystemTotalCapacity => self.system_total_capacity,
            ChecklistItem::InvoiceOrContract => self.invoice_or_contract,
            ChecklistItem::ManualJ => self.manual_j,
            ChecklistItem::NamePlatePhotos => self.name_plate_photos,
            ChecklistItem::SystemInstallationPhotos => self.system_installation_photos,
            ChecklistItem::DecommissioningBeforePhotosWideShots => {
                self.decommissioning_before_photos_wide_shots
            }
            ChecklistItem::DecommissioningAfterPhotosWideShots => {
                self.decommissioning_after_photos_wide_shots
            }
            ChecklistItem::DecommissioningBeforePhotosCloseUpShots => {
                self.decommissioning_before_photos_close_up_shots
            }
            ChecklistItem::DecommissioningAfterPhotosCloseUpShots => {
                self.decommissioning_after_photos_close_up_shots
            }
            ChecklistItem::DecommissioningChecklist => self.decommissioning_checklist,
        }
    }

    pub fn set(&mut self, item: ChecklistItem, done: bool) {
        *self.slot(item) = done;
    }

    /// Flips one item and returns its new state.
    pub fn toggle(&mut self, item: ChecklistItem) -> bool {
        let slot = self.slot(item);
        *slot = !*slot;
        *slot
    }

    /// Flag values in `ChecklistItem::ALL` order.
    pub fn values(&self) -> [bool; 11] {
        ChecklistItem::ALL.map(|item| self.get(item))
    }

    /// Items still outstanding, in display order.
    pub fn pending(&self) -> Vec<ChecklistItem> {
        ChecklistItem::ALL
            .into_iter()
            .filter(|item| !self.get(*item))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::collections::HashSet;

    #[test]
    fn test_items_are_unique_and_wire_names_match_fields() {
        let names: HashSet<_> = ChecklistItem::ALL.iter().map(|i| i.as_str()).collect();
        assert_eq!(names.len(), ChecklistItem::ALL.len());

        let value = serde_json::to_value(Checklist::complete()).unwrap();
        let object = value.as_object().unwrap();
        assert_eq!(object.len(), ChecklistItem::ALL.len());
        for item in ChecklistItem::ALL {
            assert_eq!(object.get(item.as_str()), Some(&json!(true)));
        }
    }

    #[test]
    fn test_missing_and_null_flags_are_false() {
        let checklist: Checklist = serde_json::from_value(json!({
            "manual_j": true,
            "invoice_or_contract": null
        }))
        .unwrap();
        assert!(checklist.get(ChecklistItem::ManualJ));
        assert!(!checklist.get(ChecklistItem::InvoiceOrContract));
        assert_eq!(checklist.pending().len(), 10);
    }

    #[test]
    fn test_toggle_flips_only_that_item() {
        let mut checklist = Checklist::default();
        assert!(checklist.toggle(ChecklistItem::NamePlatePhotos));
        assert_eq!(checklist.values().iter().filter(|v| **v).count(), 1);
        assert!(!checklist.toggle(ChecklistItem::NamePlatePhotos));
        assert_eq!(checklist, Checklist::default());
    }

    #[test]
    fn test_parse_item_accepts_dashes() {
        let item: ChecklistItem = "manual-j".parse().unwrap();
        assert_eq!(item, ChecklistItem::ManualJ);
        assert!("photos".parse::<ChecklistItem>().is_err());
    }
}
