use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::resource::DbInstance;

use super::ResourceDescriber;

/// Bounded retry for transient provider errors. The default performs no
/// retries: the first failure of any kind is fatal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RetryPolicy {
    #[serde(default)]
    pub max_retries: u32,
    /// Linear backoff step between attempts, in milliseconds.
    #[serde(default = "default_backoff_ms")]
    pub backoff_ms: u64,
}

fn default_backoff_ms() -> u64 {
    200
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: 0,
            backoff_ms: default_backoff_ms(),
        }
    }
}

impl RetryPolicy {
    /// Run `op`, retrying while it fails with a retryable error and attempts remain.
    pub fn call<T>(&self, operation: &str, mut op: impl FnMut() -> Result<T>) -> Result<T> {
        let mut attempt = 0;
        loop {
            match op() {
                Ok(value) => return Ok(value),
                Err(e) if e.is_retryable() && attempt < self.max_retries => {
                    attempt += 1;
                    tracing::warn!(
                        operation,
                        attempt,
                        max_retries = self.max_retries,
                        error = %e,
                        "transient provider error, retrying"
                    );
                    let delay = self.delay_for(attempt);
                    if !delay.is_zero() {
                        std::thread::sleep(delay);
                    }
                }
                Err(e) => return Err(e),
            }
        }
    }

    /// Linear backoff before retry `attempt`, saturating on large configs.
    pub fn delay_for(&self, attempt: u32) -> Duration {
        Duration::from_millis(self.backoff_ms.saturating_mul(u64::from(attempt)))
    }
}

/// Described detail for every listed instance, captured once per audit run
/// and shared read-only by all rules.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Snapshot {
    instances: Vec<DbInstance>,
}

impl Snapshot {
    /// Describe each listed instance exactly once, in discovery order.
    ///
    /// Any describe failure that survives `retry` aborts the capture.
    pub fn capture<D: ResourceDescriber + ?Sized>(
        describer: &D,
        listed: &[DbInstance],
        retry: &RetryPolicy,
    ) -> Result<Self> {
        let mut instances = Vec::with_capacity(listed.len());
        for entry in listed {
            tracing::debug!(identifier = %entry.identifier, "describing instance");
            let mut detail = retry.call("describe", || describer.describe(&entry.identifier))?;
            // Messages are keyed by the identifier the listing reported.
            detail.identifier = entry.identifier.clone();
            instances.push(detail);
        }
        Ok(Self { instances })
    }

    pub fn from_instances(instances: Vec<DbInstance>) -> Self {
        Self { instances }
    }

    pub fn instances(&self) -> &[DbInstance] {
        &self.instances
    }

    pub fn len(&self) -> usize {
        self.instances.len()
    }

    pub fn is_empty(&self) -> bool {
        self.instances.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use std::cell::{Cell, RefCell};

    use super::*;
    use crate::error::{GuardError, ProviderErrorKind};

    /// Describer that fails a fixed number of times before answering.
    struct FlakyDescriber {
        failures_left: Cell<u32>,
        kind: ProviderErrorKind,
        calls: RefCell<Vec<String>>,
    }

    impl FlakyDescriber {
        fn new(failures: u32, kind: ProviderErrorKind) -> Self {
            Self {
                failures_left: Cell::new(failures),
                kind,
                calls: RefCell::new(Vec::new()),
            }
        }
    }

    impl ResourceDescriber for FlakyDescriber {
        fn describe(&self, identifier: &str) -> Result<DbInstance> {
            self.calls.borrow_mut().push(identifier.to_string());
            if self.failures_left.get() > 0 {
                self.failures_left.set(self.failures_left.get() - 1);
                return Err(GuardError::provider("describe", self.kind, "boom"));
            }
            Ok(DbInstance::new(identifier).encrypted(true))
        }
    }

    fn no_backoff(max_retries: u32) -> RetryPolicy {
        RetryPolicy {
            max_retries,
            backoff_ms: 0,
        }
    }

    #[test]
    fn describes_each_instance_once_in_order() {
        let describer = FlakyDescriber::new(0, ProviderErrorKind::Transient);
        let listed = vec![DbInstance::new("a"), DbInstance::new("b")];
        let snapshot = Snapshot::capture(&describer, &listed, &no_backoff(0)).unwrap();
        assert_eq!(*describer.calls.borrow(), vec!["a", "b"]);
        assert_eq!(snapshot.len(), 2);
        assert!(snapshot.instances().iter().all(|i| i.storage_encrypted));
    }

    #[test]
    fn default_policy_does_not_retry() {
        let describer = FlakyDescriber::new(1, ProviderErrorKind::Transient);
        let listed = vec![DbInstance::new("a")];
        let err = Snapshot::capture(&describer, &listed, &RetryPolicy::default()).unwrap_err();
        assert!(err.is_retryable());
        assert_eq!(describer.calls.borrow().len(), 1);
    }

    #[test]
    fn transient_errors_retry_within_budget() {
        let describer = FlakyDescriber::new(2, ProviderErrorKind::Transient);
        let listed = vec![DbInstance::new("a")];
        let snapshot = Snapshot::capture(&describer, &listed, &no_backoff(2)).unwrap();
        assert_eq!(snapshot.len(), 1);
        assert_eq!(describer.calls.borrow().len(), 3);
    }

    #[test]
    fn backoff_delay_saturates() {
        let policy = RetryPolicy {
            max_retries: 3,
            backoff_ms: u64::MAX,
        };
        assert_eq!(policy.delay_for(2), Duration::from_millis(u64::MAX));
        assert_eq!(no_backoff(3).delay_for(2), Duration::ZERO);
    }

    #[test]
    fn permanent_errors_never_retry() {
        let describer = FlakyDescriber::new(1, ProviderErrorKind::Permanent);
        let listed = vec![DbInstance::new("a")];
        assert!(Snapshot::capture(&describer, &listed, &no_backoff(5)).is_err());
        assert_eq!(describer.calls.borrow().len(), 1);
    }
}
