use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

use crate::auth::AuthState;

/// Protocol version selector, controlling header and payload field naming.
///
/// Servers before 2.x expect `NS`/`DB` headers and an `sc` signin field,
/// later servers expect `surreal-ns`/`surreal-db` and `ac`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ProtocolVersion {
    /// `1.x <=`
    Legacy,
    /// `>= 2.x`
    #[default]
    Current,
}

impl ProtocolVersion {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProtocolVersion::Legacy => "1.x <=",
            ProtocolVersion::Current => ">= 2.x",
        }
    }

    /// Parse a version selector. Unrecognized values fall back to `Current`.
    pub fn parse_lossy(s: &str) -> Self {
        match s.trim() {
            "1.x <=" | "legacy" => ProtocolVersion::Legacy,
            _ => ProtocolVersion::Current,
        }
    }

    pub fn namespace_header(&self) -> &'static str {
        match self {
            ProtocolVersion::Legacy => "NS",
            ProtocolVersion::Current => "surreal-ns",
        }
    }

    pub fn database_header(&self) -> &'static str {
        match self {
            ProtocolVersion::Legacy => "DB",
            ProtocolVersion::Current => "surreal-db",
        }
    }
}

impl From<String> for ProtocolVersion {
    fn from(s: String) -> Self {
        ProtocolVersion::parse_lossy(&s)
    }
}

impl From<ProtocolVersion> for String {
    fn from(v: ProtocolVersion) -> Self {
        v.as_str().to_string()
    }
}

impl fmt::Display for ProtocolVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Connection target for one SurrealDB instance
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ClientConfig {
    /// Server root, e.g. `http://localhost:8000`
    pub url: String,
    #[serde(default)]
    pub version: ProtocolVersion,
    pub namespace: String,
    pub database: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub auth: Option<AuthState>,
    /// Per-request timeout in milliseconds
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
    #[serde(default)]
    pub insecure_skip_verify: bool,
}

fn default_timeout_ms() -> u64 {
    30_000
}

impl ClientConfig {
    pub fn new(
        url: impl Into<String>,
        namespace: impl Into<String>,
        database: impl Into<String>,
    ) -> Self {
        Self {
            url: trim_url(url.into()),
            version: ProtocolVersion::default(),
            namespace: namespace.into(),
            database: database.into(),
            auth: None,
            timeout_ms: default_timeout_ms(),
            insecure_skip_verify: false,
        }
    }

    pub fn with_version(mut self, version: ProtocolVersion) -> Self {
        self.version = version;
        self
    }

    pub fn with_auth(mut self, auth: AuthState) -> Self {
        self.auth = Some(auth);
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout_ms = u64::try_from(timeout.as_millis()).unwrap_or(u64::MAX);
        self
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    /// Load a JSON configuration file
    pub fn load(path: &str) -> anyhow::Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path))?;
        let mut config: ClientConfig =
            serde_json::from_str(&contents).context("Failed to parse client config")?;
        config.url = trim_url(config.url);
        Ok(config)
    }

    /// Join an endpoint path onto the base URL
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.url, path.trim_start_matches('/'))
    }
}

fn trim_url(url: String) -> String {
    url.trim_end_matches('/').to_string()
}
