// Async HTTP client for the Kinetic BAQ REST surface.
//
// Auth: static `Authorization: Basic ...` default header
// Format: every request carries `$format=json`
//
// `list_devices` normalizes BAQ rows; the per-device endpoints hand back
// whatever the server sent, deserialized into the model types as-is.

use reqwest::header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderValue};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, error, trace, warn};
use url::Url;

use crate::auth::Credentials;
use crate::baq;
use crate::error::Error;
use crate::transport::TransportConfig;
use crate::types::{Command, CommandResponse, Device, Metric, TimeRange};

/// Pre-encoded: form encoding would send `%24format`.
const FORMAT_QUERY: &str = "$format=json";

// ── Client ───────────────────────────────────────────────────────────

/// Async client for the Kinetic device endpoints.
///
/// Holds no mutable state beyond its fixed configuration, so a single
/// instance can be shared freely behind an `Arc`.
#[derive(Debug, Clone)]
pub struct KineticClient {
    http: reqwest::Client,
    base_url: Url,
}

impl KineticClient {
    // ── Constructors ─────────────────────────────────────────────────

    /// Build from a base URL and basic-auth credentials.
    ///
    /// Injects `Authorization`, `Accept`, and `Content-Type` as default
    /// headers on every request.
    pub fn new(
        base_url: &str,
        credentials: &Credentials,
        transport: &TransportConfig,
    ) -> Result<Self, Error> {
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, credentials.basic_header()?);
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let base_url = Self::parse_base_url(base_url)?;
        let http = transport.build_client_with_headers(headers)?;

        debug!(url = %base_url, user = credentials.username(), "kinetic client initialized");
        Ok(Self { http, base_url })
    }

    /// Wrap an existing `reqwest::Client` (caller manages auth headers).
    pub fn from_reqwest(base_url: &str, http: reqwest::Client) -> Result<Self, Error> {
        let base_url = Self::parse_base_url(base_url)?;
        Ok(Self { http, base_url })
    }

    fn parse_base_url(raw: &str) -> Result<Url, Error> {
        let url = Url::parse(raw)?;
        if url.cannot_be_a_base() {
            return Err(Error::UnsupportedBaseUrl { url: raw.to_owned() });
        }
        Ok(url)
    }

    /// The configured base URL (the BAQ list endpoint).
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    // ── URL builder ──────────────────────────────────────────────────

    /// Append percent-encoded path segments to the base URL.
    ///
    /// `["devices", "100-1", "metrics"]` → `{base}/devices/100-1/metrics`
    fn url(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        // Checked in `parse_base_url`: the base always accepts segments.
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    /// Append `$format=json` to whatever query the URL already carries.
    fn with_format(mut url: Url) -> Url {
        let query = match url.query() {
            Some(existing) if !existing.is_empty() => format!("{existing}&{FORMAT_QUERY}"),
            _ => FORMAT_QUERY.to_owned(),
        };
        url.set_query(Some(&query));
        url
    }

    // ── HTTP verbs ───────────────────────────────────────────────────

    async fn get_text(&self, url: Url, params: &[(&str, String)]) -> Result<String, Error> {
        debug!("GET {url} params={params:?}");

        let resp = self
            .http
            .get(Self::with_format(url))
            .query(params)
            .send()
            .await?;
        Self::success_body(resp).await
    }

    async fn get<T: DeserializeOwned>(
        &self,
        url: Url,
        params: &[(&str, String)],
    ) -> Result<T, Error> {
        let body = self.get_text(url, params).await?;
        Self::decode(body)
    }

    async fn post<T: DeserializeOwned, B: Serialize + Sync>(
        &self,
        url: Url,
        body: &B,
    ) -> Result<T, Error> {
        debug!("POST {url}");

        let resp = self
            .http
            .post(Self::with_format(url))
            .json(body)
            .send()
            .await?;
        Self::decode(Self::success_body(resp).await?)
    }

    // ── Response handling ────────────────────────────────────────────

    async fn success_body(resp: reqwest::Response) -> Result<String, Error> {
        let status = resp.status();
        let body = resp.text().await?;
        if status.is_success() {
            Ok(body)
        } else {
            Err(Error::Http {
                status: status.as_u16(),
                body,
            })
        }
    }

    fn decode<T: DeserializeOwned>(body: String) -> Result<T, Error> {
        serde_json::from_str(&body).map_err(|e| {
            let preview: String = body.chars().take(200).collect();
            Error::Deserialization {
                message: format!("{e} (body preview: {preview:?})"),
                body,
            }
        })
    }

    // ── Devices ──────────────────────────────────────────────────────

    /// Fetch the BAQ result set and normalize each row into a [`Device`].
    ///
    /// `GET {base}?$format=json`
    ///
    /// Bodies that are not `{ "value": [...] }` or a bare array produce an
    /// empty list. Transport and HTTP failures are returned unchanged.
    pub async fn list_devices(&self) -> Result<Vec<Device>, Error> {
        debug!("fetching BAQ device rows");

        let body = self
            .get_text(self.base_url.clone(), &[])
            .await
            .inspect_err(|e| error!(error = %e, "failed to fetch BAQ rows"))?;
        trace!(%body, "raw BAQ response");

        let parsed = serde_json::from_str::<Value>(&body).unwrap_or_else(|e| {
            warn!(error = %e, "BAQ response is not JSON; treating as empty");
            Value::Null
        });

        let rows = baq::extract_rows(parsed);
        debug!(rows = rows.len(), "BAQ rows received");

        Ok(baq::normalize_rows(&rows))
    }

    /// Fetch one device as the server shapes it, with no normalization.
    ///
    /// `GET {base}/devices/{id}`
    pub async fn get_device(&self, device_id: &str) -> Result<Device, Error> {
        self.get(self.url(&["devices", device_id]), &[])
            .await
            .inspect_err(|e| error!(device_id, error = %e, "failed to fetch device"))
    }

    // ── Metrics ──────────────────────────────────────────────────────

    /// Fetch metrics for a device, optionally bounded by a time range.
    ///
    /// `GET {base}/devices/{id}/metrics[?start=..&end=..]`
    pub async fn get_device_metrics(
        &self,
        device_id: &str,
        range: Option<&TimeRange>,
    ) -> Result<Vec<Metric>, Error> {
        let params: Vec<(&str, String)> = range
            .map(|r| r.query_params().into_iter().collect())
            .unwrap_or_default();

        self.get(self.url(&["devices", device_id, "metrics"]), &params)
            .await
            .inspect_err(|e| error!(device_id, error = %e, "failed to fetch device metrics"))
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Send a command to a device.
    ///
    /// `POST {base}/devices/{id}/commands` with the command as JSON body.
    pub async fn send_command(
        &self,
        device_id: &str,
        command: &Command,
    ) -> Result<CommandResponse, Error> {
        debug!(device_id, command = %command.command, "sending device command");
        self.post(self.url(&["devices", device_id, "commands"]), command)
            .await
            .inspect_err(|e| error!(device_id, error = %e, "failed to send command"))
    }
}
