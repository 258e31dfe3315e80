use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::Serialize;

use crate::applications::ApplicationRecord;
use crate::clients::{ClientDetails, ClientRecord};
use crate::errors::{Error, ValidationError};
use crate::money::format_usd;

/// A record that carries rebate amounts and can be listed.
pub trait RebateEntry {
    fn entry_id(&self) -> i64;
    /// Text the search box matches against.
    fn search_text(&self) -> String;
    fn created_at(&self) -> Option<&str>;
    fn details(&self) -> &ClientDetails;
}

impl RebateEntry for ApplicationRecord {
    fn entry_id(&self) -> i64 {
        self.id
    }

    fn search_text(&self) -> String {
        ApplicationRecord::search_text(self)
    }

    fn created_at(&self) -> Option<&str> {
        self.created_at.as_deref()
    }

    fn details(&self) -> &ClientDetails {
        &self.details
    }
}

impl RebateEntry for ClientRecord {
    fn entry_id(&self) -> i64 {
        self.id
    }

    fn search_text(&self) -> String {
        ClientRecord::search_text(self)
    }

    fn created_at(&self) -> Option<&str> {
        self.created_at.as_deref()
    }

    fn details(&self) -> &ClientDetails {
        &self.details
    }
}

/// Which creation year a list is scoped to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum YearFilter {
    All,
    Year(i32),
}

impl fmt::Display for YearFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            YearFilter::All => f.write_str("all"),
            YearFilter::Year(year) => write!(f, "{}", year),
        }
    }
}

impl FromStr for YearFilter {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.eq_ignore_ascii_case("all") {
            return Ok(YearFilter::All);
        }
        s.parse::<i32>().map(YearFilter::Year).map_err(|_| {
            ValidationError::InvalidInput(format!("'{}' is not a year or 'all'", s)).into()
        })
    }
}

/// How a non-numeric stored amount is treated when totals are computed.
///
/// Missing amounts always count as zero; only malformed text is governed here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AmountPolicy {
    /// Add zero and count the record in `RebateSummary::malformed_amounts`.
    #[default]
    CoerceToZero,
    /// Fail with a validation error naming the first offending record.
    Strict,
}

/// Totals over a set of records.
#[derive(Debug, Clone, Serialize, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub struct RebateSummary {
    pub offered_total: Decimal,
    pub approved_total: Decimal,
    /// Always `approved_total - offered_total`.
    pub delta: Decimal,
    pub count: usize,
    /// Amounts that were text rather than numbers and were read as zero.
    pub malformed_amounts: usize,
}

impl RebateSummary {
    /// No records: shown as "no data" rather than as zero totals.
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    pub fn delta_status(&self) -> DeltaStatus {
        DeltaStatus::from_delta(self.delta)
    }
}

/// How approved compares with offered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeltaStatus {
    /// Approved fell short by this (positive) amount.
    Deficit(Decimal),
    Balanced,
    /// Approved exceeded offered by this amount.
    ClientOwes(Decimal),
}

impl DeltaStatus {
    pub fn from_delta(delta: Decimal) -> Self {
        if delta.is_sign_negative() && !delta.is_zero() {
            DeltaStatus::Deficit(delta.abs())
        } else if delta.is_zero() {
            DeltaStatus::Balanced
        } else {
            DeltaStatus::ClientOwes(delta)
        }
    }

    pub fn label(&self) -> String {
        match self {
            DeltaStatus::Deficit(amount) => format!("Deficit {}", format_usd(*amount)),
            DeltaStatus::Balanced => "Balanced".to_string(),
            DeltaStatus::ClientOwes(amount) => format!("Client owes {}", format_usd(*amount)),
        }
    }
}
