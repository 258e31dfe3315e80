use async_trait::async_trait;

use super::session_model::{LoginPayload, RebateUser, Session};
use crate::errors::Result;

/// Durable storage for the signed-in user.
pub trait SessionStore: Send + Sync {
    /// Reads the stored session. A missing or unreadable entry is `Anonymous`.
    fn load(&self) -> Result<Session>;
    fn save(&self, user: &RebateUser) -> Result<()>;
    fn clear(&self) -> Result<()>;
}

/// Checks credentials against the backend.
#[async_trait]
pub trait AuthGatewayTrait: Send + Sync {
    async fn login(&self, email: &str, password: &str) -> Result<LoginPayload>;
}
