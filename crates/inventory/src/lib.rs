//! Inventory domain module.
//!
//! This crate contains the bookstore's business rules: the three item
//! variants and their purchase behavior, the inventory that owns them, and
//! the notifier seams that fulfillment goes through. Everything is in-memory
//! and synchronous; delivery channels are injected collaborators.

pub mod error;
pub mod inventory;
pub mod item;
pub mod notifier;

pub use error::{PurchaseError, PurchaseErrorKind, PurchaseResult};
pub use inventory::Inventory;
pub use item::{Delivery, Item, ItemKind};
pub use notifier::{
    ConsoleMailNotifier, ConsoleShippingNotifier, DeliveryRecord, MailNotifier, Notifiers,
    RecordingMailNotifier, RecordingShippingNotifier, ShipmentRecord, ShippingNotifier,
};
