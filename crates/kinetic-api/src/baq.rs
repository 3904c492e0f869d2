// BAQ row normalization
//
// The list endpoint returns loosely-typed rows keyed by ERP field names.
// Fields may be missing, null, numeric where a string is expected, or
// empty. Fallback chains treat every "falsy" value (missing, null, false,
// zero, empty string) as absent, matching how the query layer reports
// unset columns.

use std::collections::HashSet;

use serde_json::{Map, Value};
use tracing::{debug, trace, warn};

use crate::types::{Device, ExtraInfo};

/// Connection state for rows whose release is still open.
pub const STATE_OPEN: &str = "Open";
/// Connection state for every other row.
pub const STATE_RELEASED: &str = "Released";
/// Status used when the row carries no code description.
pub const STATUS_UNKNOWN: &str = "Unknown";

// ── Field names ──────────────────────────────────────────────────────

const ORDER_NUM: &str = "OrderRel_OrderNum";
const ORDER_LINE: &str = "OrderRel_OrderLine";
const LINE_DESC: &str = "OrderDtl_LineDesc";
const PART_NUM: &str = "OrderDtl_PartNum";
const CODE_DESC: &str = "UDCodes1_CodeDesc";
const OPEN_RELEASE: &str = "OrderRel_OpenRelease";
const BUILD_PLAN_DATE: &str = "UD27_BUPlanDate_c";
const REQ_DATE: &str = "OrderRel_ReqDate";
const ASSEMBLY_LINE: &str = "OrderRel_AssemblyLine_c";
const JOB_NUM: &str = "JobAsmbl_JobNum";
const MATERIALS: &str = "UD27_Materials_c";
const CLEAR_TO_BUILD: &str = "Calculated_IsClearToBuild";
const REMAINING_TIME: &str = "Calculated_RemainingTime";
const UNIT_PRICE: &str = "Calculated_UnitPrice";

// ── Envelope ─────────────────────────────────────────────────────────

/// Pull the row list out of a list response body.
///
/// Accepts `{ "value": [...] }` or a bare array. Anything else is an empty
/// result, never an error.
pub fn extract_rows(body: Value) -> Vec<Value> {
    match body {
        Value::Object(mut obj) => match obj.remove("value") {
            Some(Value::Array(rows)) => rows,
            _ => Vec::new(),
        },
        Value::Array(rows) => rows,
        _ => Vec::new(),
    }
}

/// Normalize every row, preserving length and order.
///
/// Duplicate ids are reported but kept: dropping rows would hide data the
/// backend actually returned.
pub fn normalize_rows(rows: &[Value]) -> Vec<Device> {
    if let Some(first) = rows.first() {
        debug!(fields = ?field_names(first), "first BAQ row shape");
    }

    let mut seen = HashSet::with_capacity(rows.len());
    rows.iter()
        .enumerate()
        .map(|(index, row)| {
            trace!(index, %row, "processing BAQ row");
            let device = normalize_row(row);
            trace!(index, device = ?device, "mapped BAQ row");
            if !seen.insert(device.id.clone()) {
                warn!(id = %device.id, index, "duplicate device id in BAQ result");
            }
            device
        })
        .collect()
}

/// Map one BAQ row into a [`Device`]. Non-object rows map as if empty.
pub fn normalize_row(row: &Value) -> Device {
    let empty = Map::new();
    let fields = row.as_object().unwrap_or(&empty);

    let id = format!(
        "{}-{}",
        id_component(fields.get(ORDER_NUM)),
        id_component(fields.get(ORDER_LINE))
    );

    let connection_state = if is_truthy(fields.get(OPEN_RELEASE)) {
        STATE_OPEN
    } else {
        STATE_RELEASED
    };

    Device {
        id,
        name: first_text(fields, &[LINE_DESC, PART_NUM]),
        status: first_text(fields, &[CODE_DESC]).unwrap_or_else(|| STATUS_UNKNOWN.to_owned()),
        connection_state: connection_state.to_owned(),
        last_seen: first_text(fields, &[BUILD_PLAN_DATE, REQ_DATE]),
        extra_info: Some(ExtraInfo {
            assembly_line: text(fields.get(ASSEMBLY_LINE)),
            job_num: text(fields.get(JOB_NUM)),
            material_status: text(fields.get(MATERIALS)),
            clear_to_build: is_number_one(fields.get(CLEAR_TO_BUILD)),
            remaining_time: text(fields.get(REMAINING_TIME)),
            unit_price: number(fields.get(UNIT_PRICE)),
        }),
    }
}

// ── Value helpers ────────────────────────────────────────────────────

fn field_names(row: &Value) -> Vec<&str> {
    row.as_object()
        .map(|obj| obj.keys().map(String::as_str).collect())
        .unwrap_or_default()
}

fn is_truthy(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => false,
        Some(Value::Bool(b)) => *b,
        Some(Value::Number(n)) => n.as_f64().is_some_and(|f| f != 0.0),
        Some(Value::String(s)) => !s.is_empty(),
        Some(Value::Array(_) | Value::Object(_)) => true,
    }
}

/// Strictly the number one: `1` or `1.0`, never `"1"` or `true`.
fn is_number_one(value: Option<&Value>) -> bool {
    matches!(value, Some(Value::Number(n)) if n.as_f64() == Some(1.0))
}

/// First truthy field among `keys`, rendered as text.
fn first_text(fields: &Map<String, Value>, keys: &[&str]) -> Option<String> {
    keys.iter()
        .map(|key| fields.get(*key))
        .find(|value| is_truthy(*value))
        .and_then(text)
}

/// Render a present, non-null scalar as text.
fn text(value: Option<&Value>) -> Option<String> {
    match value? {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(number_text(n)),
        other => Some(other.to_string()),
    }
}

fn id_component(value: Option<&Value>) -> String {
    text(value).unwrap_or_default()
}

/// Integral floats print without a fractional part (`100.0` → `100`).
fn number_text(n: &serde_json::Number) -> String {
    match n.as_f64() {
        Some(f) if n.is_f64() && f.fract() == 0.0 && f.abs() < 1e15 => format!("{f:.0}"),
        _ => n.to_string(),
    }
}

fn number(value: Option<&Value>) -> Option<f64> {
    match value? {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}
