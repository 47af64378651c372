//! `bookstore-app` — the illustrative bookstore run.
//!
//! Wires an [`Inventory`](bookstore_inventory::Inventory) from a
//! [`DemoConfig`], plays a fixed script of purchases and a purge, and
//! reports each outcome.

pub mod config;
pub mod demo;

pub use config::{DemoConfig, PurchaseRequest};
pub use demo::{DemoReport, PurchaseOutcome, run_demo};
