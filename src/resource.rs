//! Resource model for audited database instances.
//!
//! Providers produce `DbInstance` records. Rules consume them. Field names on
//! the wire follow the `DescribeDBInstances` response shape so that saved
//! `aws rds describe-db-instances` output can be fed in directly.

use serde::{Deserialize, Serialize};

/// Snapshot of one managed database instance at fetch time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DbInstance {
    /// Unique per account and region.
    #[serde(rename = "DBInstanceIdentifier")]
    pub identifier: String,
    #[serde(rename = "StorageEncrypted", default)]
    pub storage_encrypted: bool,
    /// Days of automated backup retention; 0 disables backups.
    #[serde(rename = "BackupRetentionPeriod", default)]
    pub backup_retention_period: u32,
    #[serde(rename = "AutoMinorVersionUpgrade", default)]
    pub auto_minor_version_upgrade: bool,
    #[serde(rename = "PubliclyAccessible", default)]
    pub publicly_accessible: bool,
}

impl DbInstance {
    /// An instance with every attribute at its insecure default.
    pub fn new(identifier: impl Into<String>) -> Self {
        Self {
            identifier: identifier.into(),
            storage_encrypted: false,
            backup_retention_period: 0,
            auto_minor_version_upgrade: false,
            publicly_accessible: false,
        }
    }

    pub fn encrypted(mut self, value: bool) -> Self {
        self.storage_encrypted = value;
        self
    }

    pub fn backup_retention(mut self, days: u32) -> Self {
        self.backup_retention_period = days;
        self
    }

    pub fn auto_upgrade(mut self, value: bool) -> Self {
        self.auto_minor_version_upgrade = value;
        self
    }

    pub fn public(mut self, value: bool) -> Self {
        self.publicly_accessible = value;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_describe_db_instances_entry() {
        let json = r#"{
            "DBInstanceIdentifier": "orders-db",
            "DBInstanceClass": "db.t3.micro",
            "Engine": "postgres",
            "StorageEncrypted": true,
            "BackupRetentionPeriod": 7,
            "AutoMinorVersionUpgrade": true,
            "PubliclyAccessible": false
        }"#;
        let instance: DbInstance = serde_json::from_str(json).unwrap();
        assert_eq!(
            instance,
            DbInstance::new("orders-db")
                .encrypted(true)
                .backup_retention(7)
                .auto_upgrade(true)
        );
    }

    #[test]
    fn missing_attributes_take_insecure_defaults() {
        let instance: DbInstance =
            serde_json::from_str(r#"{"DBInstanceIdentifier": "bare"}"#).unwrap();
        assert!(!instance.storage_encrypted);
        assert_eq!(instance.backup_retention_period, 0);
        assert!(!instance.auto_minor_version_upgrade);
        assert!(!instance.publicly_accessible);
    }

    #[test]
    fn negative_retention_is_rejected() {
        let result: std::result::Result<DbInstance, _> = serde_json::from_str(
            r#"{"DBInstanceIdentifier": "x", "BackupRetentionPeriod": -1}"#,
        );
        assert!(result.is_err());
    }
}
