use std::collections::HashMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{GuardError, Result};
use crate::provider::RetryPolicy;
use crate::rules::RuleMetadata;

/// Top-level configuration from `.rdsguard.toml`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Per-rule enablement, keyed by rule ID.
    #[serde(default)]
    pub rules: RuleToggles,
    /// Provider call behavior.
    #[serde(default)]
    pub provider: RetryPolicy,
}

/// Rule ID → enabled. Rules without an entry are enabled.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RuleToggles(HashMap<String, bool>);

impl RuleToggles {
    pub fn is_enabled(&self, rule_id: &str) -> bool {
        self.0.get(rule_id).copied().unwrap_or(true)
    }

    pub fn set(&mut self, rule_id: impl Into<String>, enabled: bool) {
        self.0.insert(rule_id.into(), enabled);
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }
}

impl Config {
    /// Load config from a TOML file. Returns default if file doesn't exist.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path).map_err(|e| {
            GuardError::Config(format!("cannot read {}: {}", path.display(), e))
        })?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Report toggles that name no registered rule. These are not fatal:
    /// a config written for a newer rule set still loads.
    pub fn validate(&self, known: &[RuleMetadata]) -> Vec<String> {
        let mut unknown: Vec<String> = self
            .rules
            .ids()
            .filter(|id| !known.iter().any(|m| m.id == *id))
            .map(str::to_string)
            .collect();
        unknown.sort();
        for id in &unknown {
            tracing::warn!(rule_id = %id, "config references unknown rule");
        }
        unknown
    }

    /// Generate a starter config file.
    pub fn starter_toml() -> &'static str {
        r#"# rdsguard configuration

[rules]
# Rules are enabled unless set to false here.
# AWS_RDS_001 = true   # RDS Encryption
# AWS_RDS_002 = true   # RDS Backup
# AWS_RDS_003 = true   # RDS Minor Auto Upgrade
# AWS_RDS_004 = true   # RDS Private

[provider]
# Retries for transient provider errors (throttling, timeouts).
# Any other provider error aborts the audit.
max_retries = 0
backoff_ms = 200
"#
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::RuleEngine;
    use pretty_assertions::assert_eq;
    use std::io::Write;

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load(&dir.path().join(".rdsguard.toml")).unwrap();
        assert_eq!(config, Config::default());
        assert!(config.rules.is_enabled("AWS_RDS_001"));
    }

    #[test]
    fn parses_rule_toggles() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            "[rules]\nAWS_RDS_002 = false\nAWS_RDS_003 = true\n\n[provider]\nmax_retries = 3\n"
        )
        .unwrap();
        let config = Config::load(file.path()).unwrap();
        assert!(!config.rules.is_enabled("AWS_RDS_002"));
        assert!(config.rules.is_enabled("AWS_RDS_003"));
        assert!(config.rules.is_enabled("AWS_RDS_004"));
        assert_eq!(config.provider.max_retries, 3);
        assert_eq!(config.provider.backoff_ms, 200);
    }

    #[test]
    fn malformed_toml_is_an_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "[rules]\nAWS_RDS_001 = \"maybe\"\n").unwrap();
        assert!(Config::load(file.path()).is_err());
    }

    #[test]
    fn unreadable_config_is_a_config_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = Config::load(dir.path()).unwrap_err();
        assert!(matches!(err, GuardError::Config(_)));
    }

    #[test]
    fn starter_config_parses() {
        let config: Config = toml::from_str(Config::starter_toml()).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn validate_lists_unknown_rule_ids() {
        let mut config = Config::default();
        config.rules.set("AWS_RDS_001", false);
        config.rules.set("AWS_RDS_999", true);
        let unknown = config.validate(&RuleEngine::new().list_rules());
        assert_eq!(unknown, vec!["AWS_RDS_999".to_string()]);
    }
}
