//! Fulfillment notifiers.
//!
//! A successful purchase hands off to exactly one notifier: physical books go
//! to shipping, digital books go to mail. Real delivery channels are out of
//! scope; the console stubs print the action and the recording fakes keep it
//! for inspection.

use std::sync::{Arc, Mutex, PoisonError};

use bookstore_core::Isbn;
use tracing::info;

/// Shipping hand-off for physical items.
pub trait ShippingNotifier: Send + Sync + 'static {
    fn notify_shipment(&self, isbn: &Isbn, quantity: u64, address: &str);
}

/// Mail hand-off for digital items.
pub trait MailNotifier: Send + Sync + 'static {
    fn notify_delivery(&self, isbn: &Isbn, email: &str);
}

/// The pair of collaborators an inventory dispatches fulfillment to.
#[derive(Clone)]
pub struct Notifiers {
    pub shipping: Arc<dyn ShippingNotifier>,
    pub mail: Arc<dyn MailNotifier>,
}

impl Notifiers {
    pub fn new(shipping: Arc<dyn ShippingNotifier>, mail: Arc<dyn MailNotifier>) -> Self {
        Self { shipping, mail }
    }

    /// Stdout stubs.
    pub fn console() -> Self {
        Self::new(Arc::new(ConsoleShippingNotifier), Arc::new(ConsoleMailNotifier))
    }
}

impl Default for Notifiers {
    fn default() -> Self {
        Self::console()
    }
}

impl core::fmt::Debug for Notifiers {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Notifiers").finish_non_exhaustive()
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct ConsoleShippingNotifier;

impl ShippingNotifier for ConsoleShippingNotifier {
    fn notify_shipment(&self, isbn: &Isbn, quantity: u64, address: &str) {
        info!(%isbn, quantity, address, "shipment requested");
        println!("Shipping {quantity} copies of book {isbn} to {address}");
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct ConsoleMailNotifier;

impl MailNotifier for ConsoleMailNotifier {
    fn notify_delivery(&self, isbn: &Isbn, email: &str) {
        info!(%isbn, email, "ebook delivery requested");
        println!("Sending ebook {isbn} to {email}");
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShipmentRecord {
    pub isbn: Isbn,
    pub quantity: u64,
    pub address: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeliveryRecord {
    pub isbn: Isbn,
    pub email: String,
}

/// In-memory shipping notifier for tests/dev.
#[derive(Debug, Default)]
pub struct RecordingShippingNotifier {
    inner: Mutex<Vec<ShipmentRecord>>,
}

impl RecordingShippingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn all(&self) -> Vec<ShipmentRecord> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }
}

impl ShippingNotifier for RecordingShippingNotifier {
    fn notify_shipment(&self, isbn: &Isbn, quantity: u64, address: &str) {
        self.inner
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(ShipmentRecord {
                isbn: isbn.clone(),
                quantity,
                address: address.to_string(),
            });
    }
}

/// In-memory mail notifier for tests/dev.
#[derive(Debug, Default)]
pub struct RecordingMailNotifier {
    inner: Mutex<Vec<DeliveryRecord>>,
}

impl RecordingMailNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn all(&self) -> Vec<DeliveryRecord> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }
}

impl MailNotifier for RecordingMailNotifier {
    fn notify_delivery(&self, isbn: &Isbn, email: &str) {
        self.inner
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(DeliveryRecord {
                isbn: isbn.clone(),
                email: email.to_string(),
            });
    }
}
