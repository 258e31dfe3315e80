use serde::{Deserialize, Serialize};

use crate::errors::{Error, Result};

/// The account signed in to the rebate desk.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RebateUser {
    pub id: i64,
    #[serde(default)]
    pub name: Option<String>,
    pub email: String,
    pub created_at: String,
}

impl RebateUser {
    /// Name when set, otherwise the email.
    pub fn display_name(&self) -> &str {
        self.name
            .as_deref()
            .filter(|name| !name.trim().is_empty())
            .unwrap_or(self.email.as_str())
    }
}

/// User payload as the login endpoint returns it, before it is checked.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct LoginPayload {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
}

impl LoginPayload {
    /// A usable user needs a non-zero id and a non-empty email.
    pub fn into_user(self) -> Option<RebateUser> {
        let id = self.id.filter(|id| *id != 0)?;
        let email = self.email.filter(|email| !email.trim().is_empty())?;
        Some(RebateUser {
            id,
            name: self.name,
            email,
            created_at: self.created_at.unwrap_or_default(),
        })
    }
}

/// Who is using the desk right now. Passed around by value; a sign-in or
/// sign-out produces a new `Session` rather than mutating a shared one.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Session {
    #[default]
    Anonymous,
    Authenticated(RebateUser),
}

impl Session {
    pub fn is_authenticated(&self) -> bool {
        matches!(self, Session::Authenticated(_))
    }

    pub fn user(&self) -> Option<&RebateUser> {
        match self {
            Session::Authenticated(user) => Some(user),
            Session::Anonymous => None,
        }
    }

    /// Guard for screens that need a signed-in user.
    pub fn require_user(&self) -> Result<&RebateUser> {
        self.user().ok_or(Error::Unauthenticated)
    }

    /// Guard for screens only a signed-out visitor may use (login, register).
    pub fn require_guest(&self) -> Result<()> {
        match self {
            Session::Anonymous => Ok(()),
            Session::Authenticated(user) => {
                Err(Error::AlreadyAuthenticated(user.display_name().to_string()))
            }
        }
    }
}
