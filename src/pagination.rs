use serde::Deserialize;

/// Offset/limit query parameters shared by the list endpoints.
#[derive(Debug, Deserialize)]
pub struct Pagination {
    #[serde(default)]
    pub skip: i64,
    #[serde(default = "default_limit")]
    pub limit: i64,
}

fn default_limit() -> i64 {
    100
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            skip: 0,
            limit: default_limit(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_skip_zero_limit_hundred() {
        let p: Pagination = serde_json::from_str("{}").unwrap();
        assert_eq!(p.skip, 0);
        assert_eq!(p.limit, 100);
    }

    #[test]
    fn explicit_values_override_defaults() {
        let p: Pagination = serde_json::from_str(r#"{"skip": 20, "limit": 5}"#).unwrap();
        assert_eq!(p.skip, 20);
        assert_eq!(p.limit, 5);
    }
}
