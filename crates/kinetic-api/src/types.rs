// Wire and model types shared by the client and its consumers.
//
// Every field is defaulted on deserialization: the per-device endpoints are
// passed through without validation, so a sparse body still produces a
// value instead of an error. Explicit `null` counts as absent.

use chrono::{DateTime, Duration, SecondsFormat, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// `null` or missing → `T::default()`.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

// ── Device ───────────────────────────────────────────────────────────

/// One order/release record, normalized for display.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Device {
    #[serde(deserialize_with = "null_as_default")]
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub status: String,
    /// Free-text label; also drives the display style.
    #[serde(deserialize_with = "null_as_default")]
    pub connection_state: String,
    /// ISO-8601 timestamp.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_seen: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extra_info: Option<ExtraInfo>,
}

impl Device {
    /// Lower-cased connection state, used as a style key.
    pub fn connection_class(&self) -> String {
        self.connection_state.to_lowercase()
    }
}

/// Manufacturing-specific fields carried over from the source row.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ExtraInfo {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assembly_line: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub job_num: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub material_status: Option<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub clear_to_build: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remaining_time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unit_price: Option<f64>,
}

// ── Metrics ──────────────────────────────────────────────────────────

/// A single timestamped numeric observation for a device.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Metric {
    #[serde(deserialize_with = "null_as_default")]
    pub device_id: String,
    /// ISO-8601 timestamp.
    #[serde(deserialize_with = "null_as_default")]
    pub timestamp: String,
    #[serde(rename = "type", deserialize_with = "null_as_default")]
    pub metric_type: String,
    #[serde(deserialize_with = "null_as_default")]
    pub value: f64,
    #[serde(deserialize_with = "null_as_default")]
    pub unit: String,
}

/// Closed time window for metric queries. No ordering check is made on
/// `start`/`end`; that is the caller's business.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeRange {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl TimeRange {
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        Self { start, end }
    }

    /// `[now - span, now]`.
    pub fn trailing(now: DateTime<Utc>, span: Duration) -> Self {
        Self {
            start: now - span,
            end: now,
        }
    }

    /// Query parameters in millisecond ISO-8601 form, e.g.
    /// `2024-01-01T00:00:00.000Z`.
    pub fn query_params(&self) -> [(&'static str, String); 2] {
        [
            ("start", self.start.to_rfc3339_opts(SecondsFormat::Millis, true)),
            ("end", self.end.to_rfc3339_opts(SecondsFormat::Millis, true)),
        ]
    }
}

// ── Commands ─────────────────────────────────────────────────────────

/// A command addressed to one device.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Command {
    pub device_id: String,
    pub command: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parameters: Option<serde_json::Map<String, serde_json::Value>>,
}

impl Command {
    pub fn new(device_id: impl Into<String>, command: impl Into<String>) -> Self {
        Self {
            device_id: device_id.into(),
            command: command.into(),
            parameters: None,
        }
    }

    /// Add (or replace) a single parameter.
    pub fn with_parameter(mut self, key: impl Into<String>, value: serde_json::Value) -> Self {
        self.parameters
            .get_or_insert_with(serde_json::Map::new)
            .insert(key.into(), value);
        self
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CommandResponse {
    #[serde(deserialize_with = "null_as_default")]
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<serde_json::Value>,
}
