use crate::resource::DbInstance;
use crate::rules::{Evaluation, Rule, RuleMetadata};

use super::feature_evaluation;

/// AWS_RDS_002: Automated Backups
///
/// A retention period of zero days means automated backups are off.
pub struct BackupRule;

impl Rule for BackupRule {
    fn metadata(&self) -> RuleMetadata {
        RuleMetadata {
            id: "AWS_RDS_002".into(),
            name: "RDS Backup".into(),
            description: "Check if RDS backup is enabled".into(),
        }
    }

    fn evaluate(&self, instance: &DbInstance) -> Evaluation {
        feature_evaluation(
            "backup",
            instance.backup_retention_period != 0,
            &instance.identifier,
        )
    }
}
