//! Translation of vendor codes and raw attribute text into domain values.
//!
//! Every function here is total: unknown or malformed input falls back to a
//! documented default instead of failing.

use std::sync::LazyLock;

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use rdvtrack_core::status::{ActionType, AppointmentStatus};
use rdvtrack_core::types::Timestamp;
use regex::Regex;

/// Operator label used when an action carries no `SubID`.
pub const FALLBACK_OPERATOR: &str = "TimeOne Auto";

/// Type code the vendor uses for leads. Everything else is a sale.
const LEAD_TYPE_CODE: &str = "4";

static LEADING_NUMBER_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*[+-]?(?:\d+\.?\d*|\.\d+)(?:[eE][+-]?\d+)?").expect("valid regex")
});

/// Map a vendor `ActionStatus` code onto an appointment status.
///
/// `0` is cancelled, `1` awaits validation, `2` and `3` are realized. Any
/// other code is treated as pending.
pub fn map_status(code: &str) -> AppointmentStatus {
    match code.trim() {
        "0" => AppointmentStatus::Cancelled,
        "1" => AppointmentStatus::Pending,
        "2" | "3" => AppointmentStatus::Realized,
        _ => AppointmentStatus::Pending,
    }
}

pub fn map_action_type(code: &str) -> ActionType {
    if code.trim() == LEAD_TYPE_CODE {
        ActionType::Lead
    } else {
        ActionType::Sale
    }
}

/// Parse a monetary attribute, reading the longest leading decimal number.
///
/// `"12.50"` gives 12.5, `"12,50"` gives 12, and empty, missing or
/// non-numeric text gives 0.
pub fn parse_amount(raw: Option<&str>) -> f64 {
    raw.and_then(|s| LEADING_NUMBER_RE.find(s))
        .and_then(|m| m.as_str().trim().parse::<f64>().ok())
        .filter(|v| v.is_finite())
        .unwrap_or(0.0)
}

/// Parse a vendor action date.
///
/// Accepts RFC 3339, `YYYY-MM-DD HH:MM:SS` and `YYYY-MM-DD` (midnight).
/// Naive values are taken as UTC.
pub fn parse_action_date(raw: &str) -> Option<Timestamp> {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S") {
        return Some(dt.and_utc());
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|dt| dt.and_utc())
}

/// The operator label for an action: its `SubID` or [`FALLBACK_OPERATOR`].
pub fn operator_label(sub_id: Option<&str>) -> String {
    match sub_id.map(str::trim) {
        Some(s) if !s.is_empty() => s.to_string(),
        _ => FALLBACK_OPERATOR.to_string(),
    }
}
