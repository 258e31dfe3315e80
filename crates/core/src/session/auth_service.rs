use std::sync::Arc;

use log::{debug, info};

use super::session_model::Session;
use super::session_traits::{AuthGatewayTrait, SessionStore};
use crate::errors::{Error, Result};

/// Signs users in and out and keeps the store in step.
pub struct AuthService {
    gateway: Arc<dyn AuthGatewayTrait>,
    store: Arc<dyn SessionStore>,
}

impl AuthService {
    pub fn new(gateway: Arc<dyn AuthGatewayTrait>, store: Arc<dyn SessionStore>) -> Self {
        AuthService { gateway, store }
    }

    /// Session persisted by an earlier sign-in, read once at startup.
    pub fn restore(&self) -> Result<Session> {
        self.store.load()
    }

    /// Checks credentials and persists the user.
    ///
    /// Every failure, whether a wrong password, an unknown account, a bad
    /// payload or a dead server, is reported as `Error::InvalidCredentials`.
    pub async fn login(&self, current: &Session, email: &str, password: &str) -> Result<Session> {
        current.require_guest()?;

        let payload = match self.gateway.login(email.trim(), password).await {
            Ok(payload) => payload,
            Err(err) => {
                debug!("[Auth] Login rejected: {}", err);
                return Err(Error::InvalidCredentials);
            }
        };
        let user = payload.into_user().ok_or_else(|| {
            debug!("[Auth] Login payload is missing id or email");
            Error::InvalidCredentials
        })?;

        self.store.save(&user)?;
        info!("[Auth] Signed in user {}", user.id);
        Ok(Session::Authenticated(user))
    }

    pub fn logout(&self) -> Result<Session> {
        self.store.clear()?;
        info!("[Auth] Signed out");
        Ok(Session::Anonymous)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::{LoginPayload, RebateUser};
    use async_trait::async_trait;
    use std::sync::Mutex;

    struct MockGateway {
        response: fn() -> Result<LoginPayload>,
        seen_email: Mutex<Option<String>>,
    }

    impl MockGateway {
        fn new(response: fn() -> Result<LoginPayload>) -> Self {
            Self {
                response,
                seen_email: Mutex::new(None),
            }
        }
    }

    #[async_trait]
    impl AuthGatewayTrait for MockGateway {
        async fn login(&self, email: &str, _password: &str) -> Result<LoginPayload> {
            *self.seen_email.lock().unwrap() = Some(email.to_string());
            (self.response)()
        }
    }

    #[derive(Default)]
    struct MemoryStore {
        user: Mutex<Option<RebateUser>>,
    }

    impl SessionStore for MemoryStore {
        fn load(&self) -> Result<Session> {
            Ok(self
                .user
                .lock()
                .unwrap()
                .clone()
                .map(Session::Authenticated)
                .unwrap_or_default())
        }

        fn save(&self, user: &RebateUser) -> Result<()> {
            *self.user.lock().unwrap() = Some(user.clone());
            Ok(())
        }

        fn clear(&self) -> Result<()> {
            *self.user.lock().unwrap() = None;
            Ok(())
        }
    }

    fn good_payload() -> Result<LoginPayload> {
        Ok(LoginPayload {
            id: Some(3),
            name: None,
            email: Some("desk@example.com".into()),
            created_at: Some("2024-01-01T00:00:00Z".into()),
        })
    }

    #[tokio::test]
    async fn test_login_persists_user_and_trims_email() {
        let gateway = Arc::new(MockGateway::new(good_payload));
        let store = Arc::new(MemoryStore::default());
        let auth = AuthService::new(gateway.clone(), store.clone());

        let session = auth
            .login(&Session::Anonymous, "  desk@example.com ", "secret")
            .await
            .unwrap();
        assert!(session.is_authenticated());
        assert_eq!(
            gateway.seen_email.lock().unwrap().as_deref(),
            Some("desk@example.com")
        );
        assert_eq!(auth.restore().unwrap(), session);

        assert_eq!(auth.logout().unwrap(), Session::Anonymous);
        assert_eq!(auth.restore().unwrap(), Session::Anonymous);
    }

    #[tokio::test]
    async fn test_every_failure_is_invalid_credentials() {
        let store = Arc::new(MemoryStore::default());
        let failures: [fn() -> Result<LoginPayload>; 3] = [
            || Err(Error::Transport("connection refused".into())),
            || Err(Error::Api("unknown account".into())),
            || Ok(LoginPayload::default()),
        ];
        for failure in failures {
            let auth = AuthService::new(Arc::new(MockGateway::new(failure)), store.clone());
            let err = auth
                .login(&Session::Anonymous, "desk@example.com", "nope")
                .await
                .unwrap_err();
            assert_eq!(err.to_string(), "Invalid email or password");
        }
        assert_eq!(store.load().unwrap(), Session::Anonymous);
    }

    #[tokio::test]
    async fn test_login_is_guest_only() {
        let auth = AuthService::new(
            Arc::new(MockGateway::new(good_payload)),
            Arc::new(MemoryStore::default()),
        );
        let signed_in = auth
            .login(&Session::Anonymous, "desk@example.com", "pw")
            .await
            .unwrap();
        assert!(matches!(
            auth.login(&signed_in, "desk@example.com", "pw").await,
            Err(Error::AlreadyAuthenticated(_))
        ));
    }
}
