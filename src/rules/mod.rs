pub mod builtin;
pub mod check;
pub mod gate;

use crate::config::RuleToggles;
use crate::provider::Snapshot;
use crate::resource::DbInstance;

pub use check::{Check, CheckResult, RuleMetadata, Status};
pub use gate::{Gate, RuleGate};

/// Verdict of a rule's predicate on one instance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Evaluation {
    pub passed: bool,
    pub message: String,
}

/// A rule decides OK/FAIL for one instance at a time.
pub trait Rule: Send + Sync {
    /// Metadata about this rule (id, name, description).
    fn metadata(&self) -> RuleMetadata;

    /// Pure predicate over a described instance.
    fn evaluate(&self, instance: &DbInstance) -> Evaluation;
}

/// Apply one rule to every instance in the snapshot, in discovery order.
pub fn run_check(rule: &dyn Rule, snapshot: &Snapshot) -> Check {
    let metadata = rule.metadata();
    tracing::info!(rule_id = %metadata.id, name = %metadata.name, "running check");

    let mut check = Check::new(&metadata);
    for instance in snapshot.instances() {
        let evaluation = rule.evaluate(instance);
        check.push(CheckResult {
            resource_id: instance.identifier.clone(),
            status: Status::from_passed(evaluation.passed),
            message: evaluation.message,
        });
    }

    tracing::debug!(
        rule_id = %check.id,
        status = %check.status,
        results = check.results.len(),
        "check complete"
    );
    check
}

/// The rule engine holds the ordered registration table of rules.
pub struct RuleEngine {
    rules: Vec<Box<dyn Rule>>,
}

impl RuleEngine {
    /// Create a new engine with all built-in rules registered.
    pub fn new() -> Self {
        Self::with_rules(builtin::all_rules())
    }

    pub fn with_rules(rules: Vec<Box<dyn Rule>>) -> Self {
        Self { rules }
    }

    /// Run every enabled rule, in registration order, against the snapshot.
    pub fn run(&self, snapshot: &Snapshot, toggles: &RuleToggles) -> Vec<Check> {
        let gate = RuleGate::new(toggles);
        self.rules
            .iter()
            .filter_map(|rule| gate.gate(rule.as_ref()).run(snapshot))
            .collect()
    }

    /// List metadata for all registered rules.
    pub fn list_rules(&self) -> Vec<RuleMetadata> {
        self.rules.iter().map(|r| r.metadata()).collect()
    }
}

impl Default for RuleEngine {
    fn default() -> Self {
        Self::new()
    }
}
