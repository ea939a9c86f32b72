use serde::Serialize;
use time::OffsetDateTime;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    #[serde(with = "time::serde::rfc3339")]
    pub timestamp: OffsetDateTime,
    pub version: &'static str,
    /// Seconds since process start.
    pub uptime: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_status_version_and_uptime() {
        let response = HealthResponse {
            status: "healthy",
            timestamp: OffsetDateTime::UNIX_EPOCH,
            version: "0.1.0",
            uptime: 12.5,
        };
        let json = serde_json::to_string(&response).unwrap();
        assert!(json.contains(r#""status":"healthy""#));
        assert!(json.contains(r#""version":"0.1.0""#));
        assert!(json.contains(r#""uptime":12.5"#));
        assert!(json.contains("1970-01-01T00:00:00Z"));
    }
}
