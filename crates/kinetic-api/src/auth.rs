use std::fmt;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use reqwest::header::HeaderValue;
use secrecy::{ExposeSecret, SecretString};

use crate::error::Error;

/// Basic-auth credentials for the Kinetic REST endpoints.
///
/// Both halves are mandatory. Construction rejects a missing or empty
/// username/password so a misconfigured client fails before it ever
/// touches the network.
#[derive(Clone)]
pub struct Credentials {
    username: String,
    password: SecretString,
}

impl Credentials {
    /// Build credentials from possibly-absent configuration values.
    pub fn new(username: Option<String>, password: Option<SecretString>) -> Result<Self, Error> {
        let username = username
            .filter(|u| !u.is_empty())
            .ok_or(Error::MissingCredentials { field: "username" })?;
        let password = password
            .filter(|p| !p.expose_secret().is_empty())
            .ok_or(Error::MissingCredentials { field: "password" })?;
        Ok(Self { username, password })
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    /// `Basic base64(username:password)`, flagged sensitive so reqwest
    /// keeps it out of debug output.
    pub fn basic_header(&self) -> Result<HeaderValue, Error> {
        let token = STANDARD.encode(format!(
            "{}:{}",
            self.username,
            self.password.expose_secret()
        ));
        let mut value = HeaderValue::from_str(&format!("Basic {token}")).map_err(|e| {
            Error::InvalidCredentials {
                message: format!("invalid authorization header value: {e}"),
            }
        })?;
        value.set_sensitive(true);
        Ok(value)
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn secret(s: &str) -> Option<SecretString> {
        Some(SecretString::from(s.to_owned()))
    }

    #[test]
    fn missing_username_is_rejected() {
        let err = Credentials::new(None, secret("pw")).unwrap_err();
        assert!(matches!(err, Error::MissingCredentials { field: "username" }));
    }

    #[test]
    fn empty_password_is_rejected() {
        let err = Credentials::new(Some("manager".into()), secret("")).unwrap_err();
        assert!(matches!(err, Error::MissingCredentials { field: "password" }));
        assert!(err.is_config());
    }

    #[test]
    fn basic_header_encodes_user_and_password() {
        let creds = Credentials::new(Some("Aladdin".into()), secret("open sesame")).unwrap();
        let header = creds.basic_header().unwrap();
        assert_eq!(header.to_str().unwrap(), "Basic QWxhZGRpbjpvcGVuIHNlc2FtZQ==");
        assert!(header.is_sensitive());
    }

    #[test]
    fn debug_output_redacts_password() {
        let creds = Credentials::new(Some("manager".into()), secret("hunter2")).unwrap();
        let dbg = format!("{creds:?}");
        assert!(dbg.contains("manager"));
        assert!(!dbg.contains("hunter2"));
    }
}
