//! rdsguard — best-practice auditor for managed database instances.
//!
//! Discovers instances once, runs every enabled rule against a shared
//! snapshot, and aggregates per-instance outcomes into one pass/fail
//! `Check` per rule.
//!
//! # Quick Start
//!
//! ```no_run
//! use std::path::PathBuf;
//! use rdsguard::{audit, AuditOptions};
//!
//! let options = AuditOptions::new(PathBuf::from("instances.json"));
//! let report = audit(&options).unwrap();
//! println!("Pass: {}, Checks: {}", report.summary.pass, report.checks.len());
//! ```

pub mod config;
pub mod error;
pub mod output;
pub mod provider;
pub mod resource;
pub mod rules;

use std::path::PathBuf;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use config::Config;
use error::Result;
use output::OutputFormat;
use provider::{InventoryProvider, Provider, Snapshot};
use rules::{Check, RuleEngine};

/// Options for an audit invocation.
#[derive(Debug, Clone)]
pub struct AuditOptions {
    /// Saved `describe-db-instances` output to audit.
    pub inventory_path: PathBuf,
    /// Path to config file (defaults to `.rdsguard.toml` in the working directory).
    pub config_path: Option<PathBuf>,
}

impl AuditOptions {
    pub fn new(inventory_path: PathBuf) -> Self {
        Self {
            inventory_path,
            config_path: None,
        }
    }
}

/// Complete audit report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditReport {
    pub run_id: Uuid,
    pub started_at: DateTime<Utc>,
    /// Number of instances discovered by the listing.
    pub resource_count: usize,
    /// One per enabled rule, in registration order.
    pub checks: Vec<Check>,
    pub summary: AuditSummary,
}

/// Roll-up of an audit run. `pass` iff no check failed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditSummary {
    pub pass: bool,
    pub total_checks: usize,
    pub failed_checks: usize,
    pub total_results: usize,
    pub failed_results: usize,
}

impl AuditSummary {
    pub fn from_checks(checks: &[Check]) -> Self {
        let failed_checks = checks.iter().filter(|c| c.status.is_fail()).count();
        Self {
            pass: failed_checks == 0,
            total_checks: checks.len(),
            failed_checks,
            total_results: checks.iter().map(|c| c.results.len()).sum(),
            failed_results: checks.iter().map(|c| c.failed_results().count()).sum(),
        }
    }
}

/// Run every enabled rule against the provider's instances.
///
/// Listing and describing happen once each, before any rule runs. A provider
/// failure aborts the whole run: no partial set of checks is returned.
pub fn run_all<P: Provider + ?Sized>(provider: &P, config: &Config) -> Result<Vec<Check>> {
    audit_provider(provider, config).map(|report| report.checks)
}

/// Audit with an explicit provider and configuration.
pub fn audit_provider<P: Provider + ?Sized>(provider: &P, config: &Config) -> Result<AuditReport> {
    let run_id = Uuid::new_v4();
    let started_at = Utc::now();
    let engine = RuleEngine::new();
    config.validate(&engine.list_rules());

    tracing::debug!(%run_id, "listing DB instances");
    let listed = config.provider.call("list", || provider.list())?;
    tracing::debug!(count = listed.len(), "listed DB instances");

    let snapshot = Snapshot::capture(provider, &listed, &config.provider)?;
    let checks = engine.run(&snapshot, &config.rules);
    let summary = AuditSummary::from_checks(&checks);

    tracing::info!(
        %run_id,
        checks = summary.total_checks,
        failed = summary.failed_checks,
        "audit complete"
    );

    Ok(AuditReport {
        run_id,
        started_at,
        resource_count: snapshot.len(),
        checks,
        summary,
    })
}

/// Load config and inventory from disk, then audit.
pub fn audit(options: &AuditOptions) -> Result<AuditReport> {
    let config_path = options
        .config_path
        .clone()
        .unwrap_or_else(|| PathBuf::from(".rdsguard.toml"));
    let config = Config::load(&config_path)?;

    let provider = InventoryProvider::load(&options.inventory_path)?;
    audit_provider(&provider, &config)
}

/// Render an audit report in the specified format.
pub fn render_report(report: &AuditReport, format: OutputFormat) -> Result<String> {
    output::render(report, format)
}
