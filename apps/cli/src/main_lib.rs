use std::sync::Arc;

use anyhow::Context;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

use cleanheat_connect::RebateApiClient;
use cleanheat_core::{
    applications::{ApplicationService, ApplicationServiceTrait},
    clients::{ClientService, ClientServiceTrait},
    session::{AuthService, FileSessionStore, Session},
};

use crate::config::Config;

/// Services and the session restored at startup.
pub struct AppState {
    pub session: Session,
    pub auth: AuthService,
    pub applications: Arc<dyn ApplicationServiceTrait>,
    pub clients: Arc<dyn ClientServiceTrait>,
}

fn default_level(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

/// Logs go to stderr so `--json` output on stdout stays parseable.
pub fn init_tracing(verbosity: u8, log_format: &str) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_level(verbosity)));
    let registry = tracing_subscriber::registry().with(filter);

    if log_format.eq_ignore_ascii_case("json") {
        registry
            .with(fmt::layer().json().with_current_span(false).with_writer(std::io::stderr))
            .init();
    } else {
        registry
            .with(fmt::layer().with_target(true).with_writer(std::io::stderr))
            .init();
    }
}

pub fn build_state(config: &Config) -> anyhow::Result<AppState> {
    tracing::debug!("Backend base URL: {}", config.base_url);
    let api = Arc::new(
        RebateApiClient::new(&config.base_url, &config.login_path, config.request_timeout)
            .context("Failed to set up the HTTP client")?,
    );
    let store = Arc::new(FileSessionStore::new(config.session_file.clone()));
    let auth = AuthService::new(api.clone(), store);
    let session = auth
        .restore()
        .with_context(|| format!("Failed to read {}", config.session_file.display()))?;

    Ok(AppState {
        session,
        auth,
        applications: Arc::new(ApplicationService::new(api.clone())),
        clients: Arc::new(ClientService::new(api)),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verbosity_raises_level() {
        assert_eq!(default_level(0), "warn");
        assert_eq!(default_level(1), "info");
        assert_eq!(default_level(2), "debug");
        assert_eq!(default_level(9), "trace");
    }
}
