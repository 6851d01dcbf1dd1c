mod auto_upgrade;
mod backup;
mod encryption;
mod public_access;

use super::{Evaluation, Rule};

/// Subject prefix shared by every message this rule set emits.
const SUBJECT: &str = "RDS";

/// Returns all built-in rules in registration order.
///
/// Rule IDs are a public contract: append new rules, never renumber.
pub fn all_rules() -> Vec<Box<dyn Rule>> {
    vec![
        Box::new(encryption::EncryptionRule),
        Box::new(backup::BackupRule),
        Box::new(auto_upgrade::AutoUpgradeRule),
        Box::new(public_access::PublicAccessRule),
    ]
}

/// Build the "<subject> <feature> is [not] enabled on <id>" verdict.
fn feature_evaluation(feature: &str, enabled: bool, identifier: &str) -> Evaluation {
    let message = if enabled {
        format!("{} {} is enabled on {}", SUBJECT, feature, identifier)
    } else {
        format!("{} {} is not enabled on {}", SUBJECT, feature, identifier)
    };
    Evaluation {
        passed: enabled,
        message,
    }
}
