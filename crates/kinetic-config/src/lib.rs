//! Configuration for the Kinetic device monitor.
//!
//! One flat TOML table layered under environment variables, password
//! lookup through the system keyring, and translation to
//! `kinetic_core::ClientConfig`.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

use directories::ProjectDirs;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use kinetic_core::{ClientConfig, TlsVerification};

/// Keyring service name; entries are keyed `{username}/password`.
pub const KEYRING_SERVICE: &str = "kinetic";

/// Environment prefixes, lowest precedence first.
pub const ENV_PREFIXES: [&str; 2] = ["KINETIC_", "REACT_APP_KINETIC_"];

/// Keys read from the environment verbatim. Env parsing would turn a
/// password like `123456` into an integer, or `007` into `7`.
const TEXT_KEYS: [&str; 3] = ["username", "password", "api_key"];

const DEFAULT_API_URL: &str = "http://localhost:3000/api";
const REDACTED: &str = "********";

// ── Error ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid {field}: {reason}")]
    Validation { field: String, reason: String },

    #[error("failed to serialize config: {0}")]
    Serialization(#[from] toml::ser::Error),

    #[error("config loading failed: {0}")]
    Figment(Box<figment::Error>),
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Figment(Box::new(err))
    }
}

// ── Config struct ───────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    /// BAQ endpoint URL. Device paths are appended to it.
    pub api_url: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,

    /// Plaintext password. Prefer the keyring.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,

    /// Accepted for older deployments; never sent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,

    /// Skip TLS certificate verification.
    pub insecure: bool,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub ca_cert: Option<PathBuf>,

    /// Request timeout in seconds. Unset means no timeout.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeout: Option<u64>,

    /// Whether the detail view requests metrics.
    pub metrics_fetch_enabled: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.into(),
            username: None,
            password: None,
            api_key: None,
            insecure: false,
            ca_cert: None,
            timeout: None,
            metrics_fetch_enabled: false,
        }
    }
}

// ── Config file path ────────────────────────────────────────────────

/// Resolve the config file path via XDG / platform conventions.
pub fn config_path() -> PathBuf {
    ProjectDirs::from("com", "kinetic", "kinetic").map_or_else(
        || {
            let mut p = PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".into()));
            p.push(".config");
            p.push("kinetic");
            p.push("config.toml");
            p
        },
        |dirs| dirs.config_dir().join("config.toml"),
    )
}

// ── Config loading ──────────────────────────────────────────────────

/// Defaults, then the TOML file (missing files are skipped), then both
/// environment prefixes.
pub fn figment(path: &Path) -> Figment {
    let mut figment = Figment::new()
        .merge(Serialized::defaults(Config::default()))
        .merge(Toml::file(path));
    for prefix in ENV_PREFIXES {
        figment = figment
            .merge(Env::prefixed(prefix).ignore(&TEXT_KEYS))
            .merge(Serialized::defaults(text_env(prefix)));
    }
    figment
}

/// `{prefix}USERNAME` etc. as plain strings, skipping unset variables.
fn text_env(prefix: &str) -> BTreeMap<&'static str, String> {
    TEXT_KEYS
        .into_iter()
        .filter_map(|key| {
            let var = format!("{prefix}{}", key.to_ascii_uppercase());
            std::env::var(var).ok().map(|value| (key, value))
        })
        .collect()
}

/// Load from `path`, or from [`config_path`] when `None`.
pub fn load_config(path: Option<&Path>) -> Result<Config, ConfigError> {
    let path = path.map_or_else(config_path, Path::to_path_buf);
    Ok(figment(&path).extract()?)
}

// ── Credential resolution ───────────────────────────────────────────

/// Password from the config layers, then the system keyring.
///
/// `None` when neither has one; client construction reports that.
pub fn resolve_password(cfg: &Config) -> Option<SecretString> {
    // 1. Config file or environment
    if let Some(pw) = cfg.password.as_deref().filter(|pw| !pw.is_empty()) {
        return Some(SecretString::from(pw.to_owned()));
    }

    // 2. Keyring, keyed by username
    let username = cfg.username.as_deref().filter(|u| !u.is_empty())?;
    keyring::Entry::new(KEYRING_SERVICE, &format!("{username}/password"))
        .and_then(|entry| entry.get_password())
        .ok()
        .map(SecretString::from)
}

impl Config {
    /// Build the runtime client config. Missing credentials are not an
    /// error here; `ClientConfig::build_client` rejects them.
    pub fn to_client_config(&self) -> Result<ClientConfig, ConfigError> {
        let url: url::Url = self.api_url.parse().map_err(|e| ConfigError::Validation {
            field: "api_url".into(),
            reason: format!("invalid URL '{}': {e}", self.api_url),
        })?;

        let tls = if self.insecure {
            TlsVerification::DangerAcceptInvalid
        } else if let Some(ref ca_path) = self.ca_cert {
            TlsVerification::CustomCa(ca_path.clone())
        } else {
            TlsVerification::SystemDefaults
        };

        let mut client = ClientConfig::new(url);
        client.username.clone_from(&self.username);
        client.password = resolve_password(self);
        client.api_key = self.api_key.clone().map(SecretString::from);
        client.tls = tls;
        client.timeout = self.timeout.map(Duration::from_secs);
        client.metrics_fetch_enabled = self.metrics_fetch_enabled;
        Ok(client)
    }

    /// TOML rendering with secrets masked.
    pub fn to_redacted_toml(&self) -> Result<String, ConfigError> {
        let mut shown = self.clone();
        if shown.password.is_some() {
            shown.password = Some(REDACTED.into());
        }
        if shown.api_key.is_some() {
            shown.api_key = Some(REDACTED.into());
        }
        Ok(toml::to_string_pretty(&shown)?)
    }
}
