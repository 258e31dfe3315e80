//! Client domain models.

use serde::{Deserialize, Serialize};

use crate::money::Amount;
use crate::utils::serde_utils::{lenient_bool, null_as_default};

/// Contact, account, financial and building details shared by clients and
/// rebate applications.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct ClientDetails {
    #[serde(default, deserialize_with = "null_as_default")]
    pub full_name: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone_number: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default, deserialize_with = "lenient_bool")]
    pub disadvantage: bool,
    #[serde(default)]
    pub electricity_acct: Option<String>,
    #[serde(default)]
    pub coned_eligibility_key: Option<String>,
    #[serde(default)]
    pub project_amount_total: Amount,
    #[serde(default)]
    pub offered_rebate_amount: Amount,
    #[serde(default)]
    pub approved_rebate_amount: Amount,
    #[serde(default)]
    pub total_client_pay_after_rebate: Amount,
    #[serde(default)]
    pub building_year_built: Amount,
    #[serde(default)]
    pub building_sqft: Amount,
    #[serde(default)]
    pub conditioned_sqft: Amount,
    #[serde(default, deserialize_with = "null_as_default")]
    pub condenser_models: Vec<String>,
}

impl ClientDetails {
    /// Up to two upper-case initials taken from the name.
    pub fn initials(&self) -> String {
        self.full_name
            .split_whitespace()
            .filter_map(|part| part.chars().next())
            .take(2)
            .flat_map(char::to_uppercase)
            .collect()
    }
}

/// A client as listed by `GET /client`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ClientRecord {
    pub id: i64,
    #[serde(flatten)]
    pub details: ClientDetails,
    #[serde(default)]
    pub created_at: Option<String>,
}

impl ClientRecord {
    /// Text matched by the client search box.
    pub fn search_text(&self) -> String {
        let d = &self.details;
        [
            Some(d.full_name.as_str()),
            d.email.as_deref(),
            d.address.as_deref(),
            d.phone_number.as_deref(),
            d.electricity_acct.as_deref(),
            d.coned_eligibility_key.as_deref(),
        ]
        .iter()
        .map(|part| part.unwrap_or(""))
        .collect::<Vec<_>>()
        .join(" ")
    }
}

/// Input model for creating a new client.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct NewClient {
    #[serde(flatten)]
    pub details: ClientDetails,
}
