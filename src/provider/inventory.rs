use std::collections::HashSet;
use std::path::Path;

use serde::Deserialize;

use crate::error::{GuardError, ProviderErrorKind, Result};
use crate::resource::DbInstance;

use super::{ResourceDescriber, ResourceLister};

/// Offline provider backed by saved `aws rds describe-db-instances` output.
///
/// The document is read once at construction; `list` and `describe` then
/// answer from memory in document order.
#[derive(Debug, Clone, Default)]
pub struct InventoryProvider {
    instances: Vec<DbInstance>,
}

#[derive(Deserialize)]
struct DescribeDbInstancesOutput {
    #[serde(rename = "DBInstances", default)]
    db_instances: Vec<DbInstance>,
}

impl InventoryProvider {
    /// Build a provider from in-memory instances.
    ///
    /// Identifiers must be unique: `describe` is keyed by identifier, so a
    /// repeated one (e.g. an inventory merged across regions) would shadow
    /// every later entry with the first one's attributes.
    pub fn from_instances(instances: Vec<DbInstance>) -> Result<Self> {
        Self::with_origin(instances, "<memory>")
    }

    /// Load an inventory file. Unreadable or malformed files are inventory
    /// errors, not provider errors: no provider was ever reached.
    pub fn load(path: &Path) -> Result<Self> {
        let origin = path.display().to_string();
        let content = std::fs::read_to_string(path).map_err(|e| GuardError::Inventory {
            path: origin.clone(),
            message: e.to_string(),
        })?;
        Self::parse_document(&content, &origin)
    }

    pub fn parse(content: &str) -> Result<Self> {
        Self::parse_document(content, "<inline>")
    }

    fn parse_document(content: &str, origin: &str) -> Result<Self> {
        let output: DescribeDbInstancesOutput =
            serde_json::from_str(content).map_err(|e| GuardError::Inventory {
                path: origin.to_string(),
                message: e.to_string(),
            })?;
        tracing::debug!(count = output.db_instances.len(), "loaded inventory");
        Self::with_origin(output.db_instances, origin)
    }

    fn with_origin(instances: Vec<DbInstance>, origin: &str) -> Result<Self> {
        let mut seen = HashSet::with_capacity(instances.len());
        for instance in &instances {
            if !seen.insert(instance.identifier.as_str()) {
                return Err(GuardError::Inventory {
                    path: origin.to_string(),
                    message: format!(
                        "duplicate DBInstanceIdentifier '{}'; audit one account and region per inventory",
                        instance.identifier
                    ),
                });
            }
        }
        Ok(Self { instances })
    }
}

impl ResourceLister for InventoryProvider {
    fn list(&self) -> Result<Vec<DbInstance>> {
        Ok(self.instances.clone())
    }
}

impl ResourceDescriber for InventoryProvider {
    fn describe(&self, identifier: &str) -> Result<DbInstance> {
        self.instances
            .iter()
            .find(|i| i.identifier == identifier)
            .cloned()
            .ok_or_else(|| {
                GuardError::provider(
                    "describe",
                    ProviderErrorKind::Permanent,
                    format!("DB instance not found: {}", identifier),
                )
            })
    }
}
