use crate::resource::DbInstance;
use crate::rules::{Evaluation, Rule, RuleMetadata};

use super::feature_evaluation;

/// AWS_RDS_001: Storage Encryption
///
/// Fails instances whose storage is not encrypted at rest.
pub struct EncryptionRule;

impl Rule for EncryptionRule {
    fn metadata(&self) -> RuleMetadata {
        RuleMetadata {
            id: "AWS_RDS_001".into(),
            name: "RDS Encryption".into(),
            description: "Check if RDS encryption is enabled".into(),
        }
    }

    fn evaluate(&self, instance: &DbInstance) -> Evaluation {
        feature_evaluation("encryption", instance.storage_encrypted, &instance.identifier)
    }
}
