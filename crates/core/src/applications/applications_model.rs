//! Rebate application domain models.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::checklist::Checklist;
use super::notes::Notes;
use super::progress::Progress;
use crate::clients::ClientDetails;

/// A rebate application as stored by the backend.
///
/// Fields the client does not model are kept in `extra` and written back
/// untouched, since saving always replaces the whole record.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ApplicationRecord {
    pub id: i64,
    #[serde(flatten)]
    pub details: ClientDetails,
    #[serde(flatten)]
    pub checklist: Checklist,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub notes: Notes,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ApplicationRecord {
    pub fn progress(&self) -> Progress {
        self.checklist.progress()
    }

    /// Approved minus offered, with missing or malformed amounts read as zero.
    pub fn delta(&self) -> Decimal {
        self.details.approved_rebate_amount.or_zero() - self.details.offered_rebate_amount.or_zero()
    }

    /// Text matched by the application search box.
    pub fn search_text(&self) -> String {
        format!(
            "{} {}",
            self.details.full_name,
            self.details.address.as_deref().unwrap_or("")
        )
    }
}

/// Input model for creating a new application.
///
/// The full field set is always sent: every checklist flag starts false and
/// the notes start empty.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct NewApplication {
    #[serde(flatten)]
    pub details: ClientDetails,
    #[serde(flatten)]
    pub checklist: Checklist,
    pub notes: Notes,
}

/// Body of `POST /applications/bulk-delete`.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct BulkDeleteRequest {
    pub ids: Vec<i64>,
    pub code: String,
}
