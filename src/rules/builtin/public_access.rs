use crate::resource::DbInstance;
use crate::rules::{Evaluation, Rule, RuleMetadata};

use super::feature_evaluation;

/// AWS_RDS_004: Private Network Access
///
/// Publicly accessible instances fail. The message is phrased in terms of
/// the secure property ("private"), so a public instance reports
/// "private is not enabled".
pub struct PublicAccessRule;

impl Rule for PublicAccessRule {
    fn metadata(&self) -> RuleMetadata {
        RuleMetadata {
            id: "AWS_RDS_004".into(),
            name: "RDS Private".into(),
            description: "Check if RDS private is enabled".into(),
        }
    }

    fn evaluate(&self, instance: &DbInstance) -> Evaluation {
        feature_evaluation(
            "private",
            !instance.publicly_accessible,
            &instance.identifier,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn public_instance_fails() {
        let eval = PublicAccessRule.evaluate(&DbInstance::new("db-1").public(true));
        assert!(!eval.passed);
        assert_eq!(eval.message, "RDS private is not enabled on db-1");
    }

    #[test]
    fn private_instance_passes() {
        let eval = PublicAccessRule.evaluate(&DbInstance::new("db-1").public(false));
        assert!(eval.passed);
        assert_eq!(eval.message, "RDS private is enabled on db-1");
    }
}
