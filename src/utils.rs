use serde_json::Value;

/// Lenient count parsing: numbers pass through, numeric strings parse,
/// anything else falls back to a single dish.
pub fn coerce_count(raw: Option<&Value>) -> i64 {
    match raw {
        Some(Value::Number(n)) => n
            .as_i64()
            .or_else(|| n.as_f64().map(|f| f as i64))
            .unwrap_or(1),
        Some(Value::String(s)) => s.trim().parse().unwrap_or(1),
        _ => 1,
    }
}
