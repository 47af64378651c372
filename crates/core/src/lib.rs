//! `bookstore-core` — domain foundation building blocks.
//!
//! This crate contains **pure domain** primitives (no infrastructure concerns):
//! identifiers, money, the error model and the clock abstraction used for
//! age-based rules.

pub mod clock;
pub mod entity;
pub mod error;
pub mod id;
pub mod money;

pub use clock::{Clock, FixedClock, SystemClock};
pub use entity::Entity;
pub use error::{DomainError, DomainResult};
pub use id::Isbn;
pub use money::Money;
