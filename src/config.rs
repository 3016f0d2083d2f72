use std::str::FromStr;
use std::time::Duration;

/// Runtime configuration, read from the environment (and `.env` when present).
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub governance_api_url: String,
    pub catalyst_url: String,
    pub rpc_url: Option<String>,
    pub session_key: Option<String>,
    pub locales_dir: Option<String>,
    pub default_locale: String,
    pub organization_sync: Duration,
    pub vote_sync: Duration,
    pub wallet_probe: Duration,
    pub request_timeout: Duration,
    /// Most proposals kept in the local cache (and refreshed by the vote unit).
    pub cache_capacity: usize,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
            governance_api_url: "https://governance.decentraland.org/api".to_string(),
            catalyst_url: "https://peer.decentraland.org".to_string(),
            rpc_url: None,
            session_key: None,
            locales_dir: None,
            default_locale: "en".to_string(),
            organization_sync: Duration::from_secs(300),
            vote_sync: Duration::from_secs(60),
            wallet_probe: Duration::from_secs(30),
            request_timeout: Duration::from_secs(10),
            cache_capacity: crate::cache::DEFAULT_CAPACITY,
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Self {
        if dotenvy::dotenv().is_ok() {
            log::info!("Loaded .env file");
        }
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary key lookup; unset keys keep their defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let secs = |key: &str, default: Duration| {
            Duration::from_secs(parse_or(non_empty(key), key, default.as_secs()))
        };

        Self {
            host: non_empty("HOST").unwrap_or(defaults.host),
            port: parse_or(non_empty("PORT"), "PORT", defaults.port),
            governance_api_url: non_empty("GOVERNANCE_API_URL")
                .map(|u| u.trim_end_matches('/').to_string())
                .unwrap_or(defaults.governance_api_url),
            catalyst_url: non_empty("CATALYST_URL")
                .map(|u| u.trim_end_matches('/').to_string())
                .unwrap_or(defaults.catalyst_url),
            rpc_url: non_empty("RPC_URL"),
            session_key: non_empty("SESSION_KEY"),
            locales_dir: non_empty("LOCALES_DIR"),
            default_locale: non_empty("DEFAULT_LOCALE").unwrap_or(defaults.default_locale),
            organization_sync: secs("ORGANIZATION_SYNC_SECS", defaults.organization_sync),
            vote_sync: secs("VOTE_SYNC_SECS", defaults.vote_sync),
            wallet_probe: secs("WALLET_PROBE_SECS", defaults.wallet_probe),
            request_timeout: secs("REQUEST_TIMEOUT_SECS", defaults.request_timeout),
            cache_capacity: parse_or(non_empty("CACHE_CAPACITY"), "CACHE_CAPACITY", defaults.cache_capacity),
        }
    }

    pub fn bind_addr(&self) -> (String, u16) {
        (self.host.clone(), self.port)
    }
}

fn parse_or<T: FromStr>(raw: Option<String>, key: &str, default: T) -> T {
    match raw {
        Some(v) => v.trim().parse().unwrap_or_else(|_| {
            log::warn!("Invalid value for {key} ({v:?}), using default");
            default
        }),
        None => default,
    }
}
