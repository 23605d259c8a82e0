//! Process configuration.
//!
//! All values come from the environment (optionally via a `.env` file
//! loaded in `main`). Loading never fails: a missing store URL or key is
//! surfaced lazily, when a proxy operation actually runs, so the
//! dashboard keeps being served while the operator fixes the environment.

use std::path::PathBuf;

/// Default socket address the HTTP server binds to.
const DEFAULT_BIND_ADDRESS: &str = "0.0.0.0:8080";

/// Default directory holding the dashboard bundle.
const DEFAULT_STATIC_DIR: &str = "static";

/// Default analytics table name. Deployments with a differently cased
/// table set `SUPABASE_REST_TABLE` explicitly.
pub const DEFAULT_TABLE: &str = "analytics";

/// Root configuration, read once at startup and immutable afterwards.
#[derive(Debug, Clone, Default)]
pub struct AppConfig {
    /// HTTP listener and static-asset settings.
    pub server: ServerConfig,

    /// Upstream Supabase store settings.
    pub store: StoreConfig,
}

/// HTTP listener and static-asset configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (e.g. "0.0.0.0:8080"). Env: `BIND_ADDRESS`.
    pub bind_address: String,

    /// Directory served under `/static`; its `index.html` answers `/`.
    /// Env: `STATIC_DIR`.
    pub static_dir: PathBuf,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: DEFAULT_BIND_ADDRESS.to_string(),
            static_dir: PathBuf::from(DEFAULT_STATIC_DIR),
        }
    }
}

/// Upstream Supabase store configuration.
///
/// The base URL and at least one key must be present for proxy calls to
/// succeed; until then every `/api` request answers 500.
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// Supabase project URL (e.g. "https://xyz.supabase.co").
    /// Env: `SUPABASE_REST_URL`.
    pub rest_url: Option<String>,

    /// Privileged service-role key, preferred over the anon key when both
    /// are set. Env: `SUPABASE_SERVICE_KEY`.
    pub service_key: Option<String>,

    /// Public anon key, used when no service key is configured.
    /// Env: `SUPABASE_ANON_KEY`.
    pub anon_key: Option<String>,

    /// Table holding one row per vacancy category.
    /// Env: `SUPABASE_REST_TABLE`, default "analytics".
    pub table: String,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            rest_url: None,
            service_key: None,
            anon_key: None,
            table: DEFAULT_TABLE.to_string(),
        }
    }
}

impl AppConfig {
    /// Read configuration from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        // Blank values behave like unset ones.
        let non_empty = |name: &str| lookup(name).filter(|value| !value.is_empty());

        Self {
            server: ServerConfig {
                bind_address: non_empty("BIND_ADDRESS")
                    .unwrap_or_else(|| DEFAULT_BIND_ADDRESS.to_string()),
                static_dir: non_empty("STATIC_DIR")
                    .map(PathBuf::from)
                    .unwrap_or_else(|| PathBuf::from(DEFAULT_STATIC_DIR)),
            },
            store: StoreConfig {
                rest_url: non_empty("SUPABASE_REST_URL"),
                service_key: non_empty("SUPABASE_SERVICE_KEY"),
                anon_key: non_empty("SUPABASE_ANON_KEY"),
                table: non_empty("SUPABASE_REST_TABLE")
                    .unwrap_or_else(|| DEFAULT_TABLE.to_string()),
            },
        }
    }
}

impl StoreConfig {
    /// The key used for outbound calls: the service key when present,
    /// otherwise the anon key.
    pub fn effective_key(&self) -> Option<&str> {
        self.service_key.as_deref().or(self.anon_key.as_deref())
    }

    /// Base URL + key pair required for any proxy call.
    pub fn credentials(&self) -> Option<(&str, &str)> {
        match (self.rest_url.as_deref(), self.effective_key()) {
            (Some(url), Some(key)) => Some((url, key)),
            _ => None,
        }
    }

    /// REST endpoint of the analytics table, `{base}/rest/v1/{table}`,
    /// paired with the effective key. `None` until the store is fully
    /// configured.
    pub fn table_endpoint(&self) -> Option<(String, &str)> {
        let (url, key) = self.credentials()?;
        let endpoint = format!("{}/rest/v1/{}", url.trim_end_matches('/'), self.table);
        Some((endpoint, key))
    }
}
