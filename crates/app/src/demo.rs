//! The scripted run.

use std::io::Write;

use anyhow::Context;
use tracing::{debug, info};

use bookstore_core::Money;
use bookstore_inventory::{Inventory, Item, PurchaseError, PurchaseResult};

use crate::config::{DemoConfig, PurchaseRequest};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PurchaseOutcome {
    pub request: PurchaseRequest,
    pub result: PurchaseResult<Money>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DemoReport {
    pub outcomes: Vec<PurchaseOutcome>,
    pub reference_year: i32,
    pub purged: Vec<Item>,
    pub remaining: usize,
}

impl DemoReport {
    pub fn failures(&self) -> impl Iterator<Item = (&PurchaseRequest, &PurchaseError)> {
        self.outcomes
            .iter()
            .filter_map(|o| o.result.as_ref().err().map(|e| (&o.request, e)))
    }

    /// Failures of requests that were scripted to succeed.
    pub fn unexpected_failures(&self) -> impl Iterator<Item = (&PurchaseRequest, &PurchaseError)> {
        self.failures().filter(|(request, _)| !request.expect_failure)
    }
}

/// Run the configured script and write the report lines to `out`.
///
/// Purchase rejections never abort the run; each one is reported and the
/// script continues. Only a failure to write the report is an error.
pub fn run_demo<W: Write>(config: &DemoConfig, out: &mut W) -> anyhow::Result<DemoReport> {
    let mut inventory = Inventory::new(config.notifiers.clone());
    for item in &config.catalog {
        inventory.add_item(item.clone());
    }
    info!(items = inventory.len(), "inventory seeded");

    let mut outcomes = Vec::with_capacity(config.purchases.len());
    for request in &config.purchases {
        let result = inventory.purchase(
            &request.isbn,
            request.quantity,
            request.email.as_deref(),
            request.address.as_deref(),
        );

        let written = match &result {
            Ok(cost) => writeln!(out, "{} purchase cost: {cost}", request.label),
            Err(e) if request.expect_failure => writeln!(out, "Expected error: {e}"),
            Err(e) => writeln!(out, "Error: {e}"),
        };
        written.context("failed to write purchase result")?;

        outcomes.push(PurchaseOutcome {
            request: request.clone(),
            result,
        });
    }

    let reference_year = config.clock.current_year();
    let purged = inventory.purge_older_than(config.purge_threshold, reference_year);
    writeln!(out, "Removed outdated books: {}", purged.len()).context("failed to write purge result")?;
    debug!(purged = %serde_json::to_string(&purged)?, "purged items");

    Ok(DemoReport {
        outcomes,
        reference_year,
        purged,
        remaining: inventory.len(),
    })
}
