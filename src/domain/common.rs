//! Lenient field handling shared by every monetary record: amount coercion
//! and the attachment-list fallback parse, plus the fallback category labels
//! used when a record carries none.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Category substituted for an office expense without one.
pub const OFFICE_CATEGORY_FALLBACK: &str = "Office";
/// Category substituted for a labor expense without one.
pub const LABOR_CATEGORY_FALLBACK: &str = "Labor";
/// Fixed category for labor payments received from clients.
pub const SITE_COLLECTION_CATEGORY: &str = "Site Collection";
/// Category for a project credit with no vendor attached.
pub const DIRECT_INCOME_CATEGORY: &str = "Direct Income";
/// Category for a project debit with no vendor attached.
pub const GENERAL_LEDGER_CATEGORY: &str = "General Ledger";
/// Site label for income that cannot be resolved to a project.
pub const INCOME_SITE_FALLBACK: &str = "General/Other";
/// Site label for expense that cannot be resolved to a project.
pub const EXPENSE_SITE_FALLBACK: &str = "Office/Admin";

/// Deserializes an amount leniently: numbers pass through, numeric strings
/// are parsed, anything else (null, missing, malformed text) becomes 0.0.
/// A record with a bad amount stays visible in listings instead of being
/// dropped, so the anomaly can be spotted in the raw data.
pub fn lenient_amount<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(coerce_amount(value.as_ref()))
}

fn coerce_amount(value: Option<&Value>) -> f64 {
    let raw = match value {
        Some(Value::Number(number)) => number.as_f64().unwrap_or(0.0),
        Some(Value::String(text)) => text.trim().parse::<f64>().unwrap_or(0.0),
        _ => 0.0,
    };
    if raw.is_finite() {
        raw
    } else {
        0.0
    }
}

/// Parses a serialized attachment list. A valid JSON string array comes back
/// as-is; anything else is treated as a single bare reference. Blank input
/// yields an empty list. Never fails.
pub fn parse_attachments(raw: &str) -> Vec<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Vec::new();
    }
    match serde_json::from_str::<Vec<String>>(trimmed) {
        Ok(list) => list,
        Err(_) => vec![raw.to_string()],
    }
}
