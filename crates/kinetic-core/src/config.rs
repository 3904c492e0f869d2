// ── Runtime client configuration ──
//
// Describes *how* to reach the Kinetic server. Carries credential data and
// transport tuning but never touches disk; `kinetic-config` builds it from
// files and the environment and hands it in.

use std::path::PathBuf;
use std::time::Duration;

use secrecy::SecretString;
use url::Url;

use kinetic_api::{Credentials, KineticClient, TlsMode, TransportConfig};

use crate::error::CoreError;

/// TLS verification strategy.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum TlsVerification {
    /// Bundled CA roots (strict).
    #[default]
    SystemDefaults,
    /// Custom CA certificate file.
    CustomCa(PathBuf),
    /// Skip verification (self-signed on-prem servers).
    DangerAcceptInvalid,
}

/// Everything needed to build a [`KineticClient`] plus the view toggles.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// BAQ endpoint; device paths are appended to it.
    pub url: Url,
    pub username: Option<String>,
    pub password: Option<SecretString>,
    /// Accepted for compatibility with existing deployments; not sent.
    pub api_key: Option<SecretString>,
    pub tls: TlsVerification,
    /// `None` leaves requests unbounded.
    pub timeout: Option<Duration>,
    /// Whether the detail view requests metrics at all.
    pub metrics_fetch_enabled: bool,
}

impl ClientConfig {
    pub fn new(url: Url) -> Self {
        Self {
            url,
            username: None,
            password: None,
            api_key: None,
            tls: TlsVerification::default(),
            timeout: None,
            metrics_fetch_enabled: false,
        }
    }

    fn transport(&self) -> TransportConfig {
        let tls = match &self.tls {
            TlsVerification::SystemDefaults => TlsMode::System,
            TlsVerification::CustomCa(path) => TlsMode::CustomCa(path.clone()),
            TlsVerification::DangerAcceptInvalid => TlsMode::DangerAcceptInvalid,
        };
        TransportConfig {
            tls,
            timeout: self.timeout,
        }
    }

    /// Build the client. Fails before any network activity when the
    /// username or password is missing.
    pub fn build_client(&self) -> Result<KineticClient, CoreError> {
        let credentials = Credentials::new(self.username.clone(), self.password.clone())?;
        Ok(KineticClient::new(
            self.url.as_str(),
            &credentials,
            &self.transport(),
        )?)
    }
}
