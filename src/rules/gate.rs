use crate::config::RuleToggles;
use crate::provider::Snapshot;

use super::{run_check, Check, Rule};

/// The enable/disable decision for one rule, made before it runs.
pub enum Gate<'a> {
    Enabled(&'a dyn Rule),
    Disabled,
}

impl Gate<'_> {
    /// Run the gated rule. Disabled rules produce no check at all.
    pub fn run(&self, snapshot: &Snapshot) -> Option<Check> {
        match self {
            Self::Enabled(rule) => Some(run_check(*rule, snapshot)),
            Self::Disabled => None,
        }
    }

    pub fn is_enabled(&self) -> bool {
        matches!(self, Self::Enabled(_))
    }
}

/// Consults the active rule toggles to gate each rule.
pub struct RuleGate<'a> {
    toggles: &'a RuleToggles,
}

impl<'a> RuleGate<'a> {
    pub fn new(toggles: &'a RuleToggles) -> Self {
        Self { toggles }
    }

    pub fn gate<'r>(&self, rule: &'r dyn Rule) -> Gate<'r> {
        let id = rule.metadata().id;
        if self.toggles.is_enabled(&id) {
            Gate::Enabled(rule)
        } else {
            tracing::info!(rule_id = %id, "rule disabled by configuration, skipping");
            Gate::Disabled
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resource::DbInstance;
    use crate::rules::builtin::all_rules;

    #[test]
    fn absent_toggle_means_enabled() {
        let toggles = RuleToggles::default();
        let gate = RuleGate::new(&toggles);
        let rules = all_rules();
        assert!(rules.iter().all(|r| gate.gate(r.as_ref()).is_enabled()));
    }

    #[test]
    fn disabled_rule_yields_no_check() {
        let mut toggles = RuleToggles::default();
        toggles.set("AWS_RDS_002", false);
        let gate = RuleGate::new(&toggles);
        let rules = all_rules();
        let backup = rules
            .iter()
            .find(|r| r.metadata().id == "AWS_RDS_002")
            .unwrap();
        let snapshot = Snapshot::from_instances(vec![DbInstance::new("db-1")]);
        assert!(gate.gate(backup.as_ref()).run(&snapshot).is_none());
    }
}
