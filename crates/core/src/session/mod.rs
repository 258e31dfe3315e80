//! Signed-in session: the user value, its persistence, and sign-in/out.

mod auth_service;
mod file_store;
mod session_model;
mod session_traits;

pub use auth_service::AuthService;
pub use file_store::FileSessionStore;
pub use session_model::{LoginPayload, RebateUser, Session};
pub use session_traits::{AuthGatewayTrait, SessionStore};
