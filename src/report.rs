//! Report payload module
//!
//! Serde types for the three endpoint bodies and their derivation from an
//! environment snapshot. Field declaration order is the JSON key order.
//! Secret values never appear here, only presence flags.

use crate::env::{self, EnvSnapshot};
use crate::logger;
use serde::Serialize;

/// Body of `GET /health`
#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct HealthStatus {
    status: &'static str,
}

impl HealthStatus {
    pub const fn healthy() -> Self {
        Self { status: "healthy" }
    }
}

/// Body of `GET /config`
///
/// String fields echo the variable value verbatim, falling back to
/// `not_set` only when the variable is absent. `api_key_present` is a
/// presence flag: the key itself is never echoed.
#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct ConfigReport {
    database_url: String,
    api_key_present: bool,
    app_config: String,
    feature_flags: String,
    environment: String,
}

impl ConfigReport {
    pub fn from_snapshot(snapshot: &EnvSnapshot) -> Self {
        Self {
            database_url: snapshot.value_or_default(env::DATABASE_URL).to_string(),
            api_key_present: snapshot.is_present(env::API_KEY),
            app_config: snapshot.value_or_default(env::APP_CONFIG).to_string(),
            feature_flags: snapshot.value_or_default(env::FEATURE_FLAGS).to_string(),
            environment: snapshot.value_or_default(env::ENVIRONMENT).to_string(),
        }
    }
}

/// Body of `GET /secrets` — presence flags only, never values
#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct SecretsReport {
    db_password_loaded: bool,
    jwt_secret_loaded: bool,
    encryption_key_loaded: bool,
}

impl SecretsReport {
    pub fn from_snapshot(snapshot: &EnvSnapshot) -> Self {
        Self {
            db_password_loaded: snapshot.is_present(env::DB_PASSWORD),
            jwt_secret_loaded: snapshot.is_present(env::JWT_SECRET),
            encryption_key_loaded: snapshot.is_present(env::ENCRYPTION_KEY),
        }
    }
}

/// Serialize a report compactly (used by `/health`)
pub fn render_compact<T: Serialize>(report: &T) -> String {
    serde_json::to_string(report).unwrap_or_else(|e| {
        logger::log_error(&format!("Failed to serialize report: {e}"));
        "{}".to_string()
    })
}

/// Serialize a report pretty-printed with 2-space indentation
/// (used by `/config` and `/secrets`)
pub fn render_pretty<T: Serialize>(report: &T) -> String {
    serde_json::to_string_pretty(report).unwrap_or_else(|e| {
        logger::log_error(&format!("Failed to serialize report: {e}"));
        "{}".to_string()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;

    #[test]
    fn test_health_is_compact() {
        assert_eq!(
            render_compact(&HealthStatus::healthy()),
            r#"{"status":"healthy"}"#
        );
    }

    #[test]
    fn test_config_report_empty_environment() {
        let report = ConfigReport::from_snapshot(&EnvSnapshot::default());
        assert_eq!(
            render_pretty(&report),
            "{\n  \"database_url\": \"not_set\",\n  \"api_key_present\": false,\n  \"app_config\": \"not_set\",\n  \"feature_flags\": \"not_set\",\n  \"environment\": \"not_set\"\n}"
        );
    }

    #[test]
    fn test_config_report_partial_environment() {
        let snapshot = EnvSnapshot::from_pairs([
            (env::DATABASE_URL, "postgres://x"),
            (env::API_KEY, "abc123"),
        ]);
        let report = ConfigReport::from_snapshot(&snapshot);
        let json: Value = serde_json::from_str(&render_pretty(&report)).unwrap();
        assert_eq!(json["database_url"], "postgres://x");
        assert_eq!(json["api_key_present"], true);
        assert_eq!(json["app_config"], "not_set");
        assert_eq!(json["feature_flags"], "not_set");
        assert_eq!(json["environment"], "not_set");
    }

    #[test]
    fn test_config_report_echoes_special_characters() {
        let snapshot = EnvSnapshot::from_pairs([(env::FEATURE_FLAGS, "a,b;c=\"d\"")]);
        let report = ConfigReport::from_snapshot(&snapshot);
        let json: Value = serde_json::from_str(&render_pretty(&report)).unwrap();
        assert_eq!(json["feature_flags"], "a,b;c=\"d\"");
    }

    #[test]
    fn test_config_report_empty_string_passthrough() {
        // Empty value: presence flag false, string field literal ""
        let snapshot = EnvSnapshot::from_pairs([
            (env::DATABASE_URL, ""),
            (env::API_KEY, ""),
        ]);
        let report = ConfigReport::from_snapshot(&snapshot);
        let json: Value = serde_json::from_str(&render_pretty(&report)).unwrap();
        assert_eq!(json["database_url"], "");
        assert_eq!(json["api_key_present"], false);
    }

    #[test]
    fn test_secrets_report_presence_flags() {
        // DB_PASSWORD set, JWT_SECRET unset, ENCRYPTION_KEY empty
        let snapshot = EnvSnapshot::from_pairs([
            (env::DB_PASSWORD, "secret"),
            (env::ENCRYPTION_KEY, ""),
        ]);
        let report = SecretsReport::from_snapshot(&snapshot);
        assert_eq!(
            report,
            SecretsReport {
                db_password_loaded: true,
                jwt_secret_loaded: false,
                encryption_key_loaded: false,
            }
        );
    }

    #[test]
    fn test_secrets_report_pretty_shape() {
        let snapshot = EnvSnapshot::from_pairs([(env::DB_PASSWORD, "secret")]);
        let report = SecretsReport::from_snapshot(&snapshot);
        assert_eq!(
            render_pretty(&report),
            "{\n  \"db_password_loaded\": true,\n  \"jwt_secret_loaded\": false,\n  \"encryption_key_loaded\": false\n}"
        );
    }

    #[test]
    fn test_secrets_report_never_leaks_values() {
        let snapshot = EnvSnapshot::from_pairs([
            (env::DB_PASSWORD, "hunter2"),
            (env::JWT_SECRET, "eyJhbGciOiJIUzI1NiJ9"),
            (env::ENCRYPTION_KEY, "0123456789abcdef"),
        ]);
        let body = render_pretty(&SecretsReport::from_snapshot(&snapshot));
        assert!(!body.contains("hunter2"));
        assert!(!body.contains("eyJhbGciOiJIUzI1NiJ9"));
        assert!(!body.contains("0123456789abcdef"));
    }
}
