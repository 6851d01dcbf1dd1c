use serde::{Deserialize, Serialize};

/// Pass/fail outcome, for a single resource or aggregated over a rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Status {
    #[serde(rename = "OK")]
    Ok,
    #[serde(rename = "FAIL")]
    Fail,
}

impl Status {
    pub fn from_passed(passed: bool) -> Self {
        if passed {
            Self::Ok
        } else {
            Self::Fail
        }
    }

    pub fn is_fail(self) -> bool {
        matches!(self, Self::Fail)
    }
}

impl std::fmt::Display for Status {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Ok => write!(f, "OK"),
            Self::Fail => write!(f, "FAIL"),
        }
    }
}

/// Outcome of one rule against one resource.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckResult {
    /// Identifier of the resource this result is about.
    pub resource_id: String,
    pub status: Status,
    /// Stable, human-readable message. Downstream reports match on it.
    pub message: String,
}

/// Aggregate outcome of one rule across every resource in an audit run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Check {
    /// Stable rule identifier (e.g., "AWS_RDS_001").
    pub id: String,
    pub name: String,
    pub description: String,
    /// FAIL iff any result is FAIL.
    pub status: Status,
    /// One per resource, in discovery order.
    pub results: Vec<CheckResult>,
}

impl Check {
    pub fn new(metadata: &RuleMetadata) -> Self {
        Self {
            id: metadata.id.clone(),
            name: metadata.name.clone(),
            description: metadata.description.clone(),
            status: Status::Ok,
            results: Vec::new(),
        }
    }

    /// Append a result. A single FAIL flips the aggregate for good.
    pub fn push(&mut self, result: CheckResult) {
        if result.status.is_fail() {
            self.status = Status::Fail;
        }
        self.results.push(result);
    }

    pub fn failed_results(&self) -> impl Iterator<Item = &CheckResult> {
        self.results.iter().filter(|r| r.status.is_fail())
    }
}

/// Metadata about a rule, used for `list-rules` output and config validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleMetadata {
    pub id: String,
    pub name: String,
    pub description: String,
}
