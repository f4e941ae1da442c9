//! Shared query parameter types for API handlers.
//!
//! Pagination is parsed leniently: an absent or non-numeric `limit` /
//! `offset` falls back to the endpoint's default instead of erroring.
//! Boolean filters accept only the literal `"true"`; anything else is
//! treated as `false`, matching the behaviour list clients rely on.

use serde::{Deserialize, Deserializer};

/// Generic pagination parameters (`?limit=&offset=`).
///
/// Values are clamped in the repository layer via `clamp_limit` /
/// `clamp_offset`.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct PaginationParams {
    #[serde(default, deserialize_with = "lenient_i64")]
    pub limit: Option<i64>,
    #[serde(default, deserialize_with = "lenient_i64")]
    pub offset: Option<i64>,
}

/// Deserialize an integer query value, mapping garbage to `None` rather
/// than rejecting the request.
pub fn lenient_i64<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw.and_then(|s| s.parse().ok()))
}

/// Deserialize a boolean query value: `"true"` is true, anything else
/// present is false, absent stays `None`.
pub fn lenient_bool<'de, D>(deserializer: D) -> Result<Option<bool>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw.map(|s| s == "true"))
}

#[cfg(test)]
mod tests {
    use super::*;

    // Query-string values always arrive as strings, so string-valued
    // JSON exercises the same deserialization path as `Query<T>`.
    fn parse(value: serde_json::Value) -> PaginationParams {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn absent_params_are_none() {
        let p = parse(serde_json::json!({}));
        assert_eq!(p.limit, None);
        assert_eq!(p.offset, None);
    }

    #[test]
    fn numeric_params_parse() {
        let p = parse(serde_json::json!({"limit": "20", "offset": "40"}));
        assert_eq!(p.limit, Some(20));
        assert_eq!(p.offset, Some(40));
    }

    #[test]
    fn garbage_params_fall_back_instead_of_erroring() {
        let p = parse(serde_json::json!({"limit": "twenty", "offset": " "}));
        assert_eq!(p.limit, None);
        assert_eq!(p.offset, None);
    }
}
