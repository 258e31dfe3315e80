use std::path::PathBuf;
use std::time::Duration;

use cleanheat_connect::{DEFAULT_LOGIN_PATH, DEFAULT_TIMEOUT_SECS};

pub const DEFAULT_BASE_URL: &str = "http://localhost:3000";

pub struct Config {
    pub base_url: String,
    pub login_path: String,
    pub session_file: PathBuf,
    pub request_timeout: Duration,
    pub log_format: String,
}

impl Config {
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let base_url = lookup("CLEANHEAT_BASE_URL").unwrap_or_else(|| DEFAULT_BASE_URL.into());
        let login_path =
            lookup("CLEANHEAT_LOGIN_ENDPOINT").unwrap_or_else(|| DEFAULT_LOGIN_PATH.into());
        let session_file = lookup("CLEANHEAT_SESSION_FILE")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("./.cleanheat/session.json"));
        let timeout_ms: u64 = lookup("CLEANHEAT_REQUEST_TIMEOUT_MS")
            .and_then(|raw| raw.trim().parse().ok())
            .unwrap_or(DEFAULT_TIMEOUT_SECS * 1000);
        let log_format = lookup("CLEANHEAT_LOG_FORMAT").unwrap_or_else(|| "text".into());
        Self {
            base_url,
            login_path,
            session_file,
            request_timeout: Duration::from_millis(timeout_ms),
            log_format,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_defaults() {
        let config = Config::from_lookup(|_| None);
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.login_path, "login");
        assert_eq!(config.request_timeout, Duration::from_secs(30));
        assert_eq!(config.log_format, "text");
    }

    #[test]
    fn test_overrides_and_bad_timeout() {
        let vars: HashMap<&str, &str> = HashMap::from([
            ("CLEANHEAT_BASE_URL", "https://rebates.example.com"),
            ("CLEANHEAT_LOGIN_ENDPOINT", "api/auth/login"),
            ("CLEANHEAT_SESSION_FILE", "/tmp/s.json"),
            ("CLEANHEAT_REQUEST_TIMEOUT_MS", "soon"),
        ]);
        let config = Config::from_lookup(|key| vars.get(key).map(|v| v.to_string()));
        assert_eq!(config.base_url, "https://rebates.example.com");
        assert_eq!(config.login_path, "api/auth/login");
        assert_eq!(config.session_file, PathBuf::from("/tmp/s.json"));
        assert_eq!(config.request_timeout, Duration::from_secs(30));
    }
}
