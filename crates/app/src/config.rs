//! Demo configuration: seed catalog, purchase script, clock and notifiers.

use std::sync::Arc;

use bookstore_core::{Clock, DomainResult, Isbn, Money, SystemClock};
use bookstore_inventory::{Item, Notifiers};

/// One scripted purchase attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PurchaseRequest {
    /// Used as the report line prefix (e.g. "Paper book").
    pub label: String,
    pub isbn: String,
    pub quantity: i64,
    pub email: Option<String>,
    pub address: Option<String>,
    /// Failures of expected-to-fail requests are reported as expected errors.
    pub expect_failure: bool,
}

impl PurchaseRequest {
    pub fn new(label: impl Into<String>, isbn: impl Into<String>, quantity: i64) -> Self {
        Self {
            label: label.into(),
            isbn: isbn.into(),
            quantity,
            email: None,
            address: None,
            expect_failure: false,
        }
    }

    pub fn email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    pub fn address(mut self, address: impl Into<String>) -> Self {
        self.address = Some(address.into());
        self
    }

    pub fn expecting_failure(mut self) -> Self {
        self.expect_failure = true;
        self
    }
}

#[derive(Clone)]
pub struct DemoConfig {
    pub catalog: Vec<Item>,
    pub purchases: Vec<PurchaseRequest>,
    /// Items strictly older than this many years are purged.
    pub purge_threshold: i32,
    pub clock: Arc<dyn Clock>,
    pub notifiers: Notifiers,
}

impl core::fmt::Debug for DemoConfig {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("DemoConfig")
            .field("catalog", &self.catalog)
            .field("purchases", &self.purchases)
            .field("purge_threshold", &self.purge_threshold)
            .field("reference_year", &self.clock.current_year())
            .finish_non_exhaustive()
    }
}

impl DemoConfig {
    /// The fixed illustrative run: one book of each kind, two successful
    /// purchases, two expected failures, a five-year purge against the wall
    /// clock, console notifiers.
    pub fn standard() -> DomainResult<Self> {
        Ok(Self {
            catalog: standard_catalog()?,
            purchases: standard_purchases(),
            purge_threshold: 5,
            clock: Arc::new(SystemClock),
            notifiers: Notifiers::console(),
        })
    }

    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn with_notifiers(mut self, notifiers: Notifiers) -> Self {
        self.notifiers = notifiers;
        self
    }
}

fn standard_catalog() -> DomainResult<Vec<Item>> {
    Ok(vec![
        Item::physical(Isbn::new("1234")?, "Java Programming", 2020, Money::parse("29.99")?, 10),
        Item::digital(Isbn::new("5678")?, "Python Guide", 2018, Money::parse("19.99")?, "PDF"),
        Item::display(Isbn::new("9012")?, "Antique Collection", 2015, Money::parse("99.99")?),
    ])
}

fn standard_purchases() -> Vec<PurchaseRequest> {
    vec![
        PurchaseRequest::new("Paper book", "1234", 2).address("123 Main St"),
        PurchaseRequest::new("EBook", "5678", 1).email("user@example.com"),
        PurchaseRequest::new("Showcase book", "9012", 1)
            .email("user@example.com")
            .expecting_failure(),
        PurchaseRequest::new("Unknown book", "9999", 1)
            .email("user@example.com")
            .expecting_failure(),
    ]
}
