use crate::resource::DbInstance;
use crate::rules::{Evaluation, Rule, RuleMetadata};

use super::feature_evaluation;

/// AWS_RDS_003: Minor Version Auto Upgrade
pub struct AutoUpgradeRule;

impl Rule for AutoUpgradeRule {
    fn metadata(&self) -> RuleMetadata {
        RuleMetadata {
            id: "AWS_RDS_003".into(),
            name: "RDS Minor Auto Upgrade".into(),
            description: "Check if RDS minor auto upgrade is enabled".into(),
        }
    }

    fn evaluate(&self, instance: &DbInstance) -> Evaluation {
        feature_evaluation(
            "auto upgrade",
            instance.auto_minor_version_upgrade,
            &instance.identifier,
        )
    }
}
