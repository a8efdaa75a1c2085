use serde::{Deserialize, Deserializer};
use serde_json::Value;

const I64_MIN_F64: f64 = -9_223_372_036_854_775_808.0;
// 2^63; `i64::MAX as f64` rounds up to this value
const I64_MAX_EXCLUSIVE_F64: f64 = 9_223_372_036_854_775_808.0;

/// Coerces a loosely-typed JSON value into an integer id.
///
/// Integers pass through, floats are accepted when they carry no fractional part,
/// and numeric strings are parsed. Everything else yields `None`.
pub fn coerce_id(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64().or_else(|| {
            n.as_f64()
                .filter(|f| f.is_finite() && f.fract() == 0.0)
                .filter(|f| *f >= I64_MIN_F64 && *f < I64_MAX_EXCLUSIVE_F64)
                .map(|f| f as i64)
        }),
        Value::String(s) => {
            let trimmed = s.trim();
            trimmed.parse::<i64>().ok().or_else(|| {
                trimmed
                    .parse::<f64>()
                    .ok()
                    .and_then(|f| coerce_id(&Value::from(f)))
            })
        }
        _ => None,
    }
}

/// Deserializes a list of ids, silently dropping entries that are not numeric.
///
/// A missing or `null` list deserializes to an empty vector.
pub fn deserialize_lenient_ids<'de, D>(deserializer: D) -> Result<Vec<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<Vec<Value>> = Option::deserialize(deserializer)?;
    Ok(raw
        .unwrap_or_default()
        .iter()
        .filter_map(coerce_id)
        .collect())
}
