//! Offset pagination for list endpoints.
//!
//! List endpoints take `skip` and `limit` query parameters:
//!
//! - `skip`: number of records to skip (default 0, clamped to >= 0)
//! - `limit`: maximum number of records (default 100, clamped to 1..=100)
//!
//! Empty query values (`?skip=&limit=`) are treated as absent.

use serde::{Deserialize, Deserializer};
use utoipa::IntoParams;

pub const DEFAULT_LIMIT: i64 = 100;
pub const MAX_LIMIT: i64 = 100;

fn deserialize_optional_i64<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let s: Option<String> = Option::deserialize(deserializer)?;
    match s {
        Some(s) if s.is_empty() => Ok(None),
        Some(s) => s.parse::<i64>().map(Some).map_err(serde::de::Error::custom),
        None => Ok(None),
    }
}

#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ListParams {
    /// Number of records to skip
    #[serde(default, deserialize_with = "deserialize_optional_i64")]
    pub skip: Option<i64>,
    /// Maximum number of records to return (1-100)
    #[serde(default, deserialize_with = "deserialize_optional_i64")]
    pub limit: Option<i64>,
}

impl ListParams {
    pub fn skip(&self) -> i64 {
        self.skip.unwrap_or(0).max(0)
    }

    pub fn limit(&self) -> i64 {
        self.limit.unwrap_or(DEFAULT_LIMIT).clamp(1, MAX_LIMIT)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let params = ListParams::default();
        assert_eq!(params.skip(), 0);
        assert_eq!(params.limit(), 100);
    }

    #[test]
    fn test_clamping() {
        let params = ListParams {
            skip: Some(-5),
            limit: Some(1000),
        };
        assert_eq!(params.skip(), 0);
        assert_eq!(params.limit(), 100);

        let params = ListParams {
            skip: Some(10),
            limit: Some(0),
        };
        assert_eq!(params.skip(), 10);
        assert_eq!(params.limit(), 1);
    }

    #[test]
    fn test_empty_strings_deserialize_as_none() {
        let params: ListParams = serde_json::from_str(r#"{"skip":"","limit":"20"}"#).unwrap();
        assert_eq!(params.skip, None);
        assert_eq!(params.limit, Some(20));
    }
}
