pub mod inventory;
pub mod snapshot;

use crate::error::Result;
use crate::resource::DbInstance;

pub use inventory::InventoryProvider;
pub use snapshot::{RetryPolicy, Snapshot};

/// Lists every instance of the audited resource type.
pub trait ResourceLister {
    /// Instances in discovery order. Failure is fatal for the whole audit.
    fn list(&self) -> Result<Vec<DbInstance>>;
}

/// Re-fetches authoritative detail for a single instance.
pub trait ResourceDescriber {
    fn describe(&self, identifier: &str) -> Result<DbInstance>;
}

/// A provider that can both list and describe instances.
pub trait Provider: ResourceLister + ResourceDescriber {}

impl<T: ResourceLister + ResourceDescriber> Provider for T {}
