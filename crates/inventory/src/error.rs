//! Purchase error taxonomy.
//!
//! Every variant is an expected business-rule rejection. None of them leave
//! the inventory partially mutated.

use thiserror::Error;

use bookstore_core::Isbn;

pub type PurchaseResult<T> = Result<T, PurchaseError>;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PurchaseError {
    #[error("book with ISBN {isbn} not found")]
    ItemNotFound { isbn: String },

    #[error("invalid quantity: {quantity}")]
    InvalidQuantity { quantity: i64 },

    #[error("insufficient stock for \"{title}\" (requested {requested}, available {available})")]
    InsufficientStock {
        isbn: Isbn,
        title: String,
        requested: u64,
        available: u64,
    },

    #[error("address required for paper book purchase ({isbn})")]
    MissingAddress { isbn: Isbn },

    #[error("email required for ebook purchase ({isbn})")]
    MissingEmail { isbn: Isbn },

    #[error("showcase book \"{title}\" is not for sale")]
    NotForSale { isbn: Isbn, title: String },
}

/// Fieldless discriminant of [`PurchaseError`].
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum PurchaseErrorKind {
    ItemNotFound,
    InvalidQuantity,
    InsufficientStock,
    MissingAddress,
    MissingEmail,
    NotForSale,
}

impl PurchaseError {
    pub fn kind(&self) -> PurchaseErrorKind {
        match self {
            PurchaseError::ItemNotFound { .. } => PurchaseErrorKind::ItemNotFound,
            PurchaseError::InvalidQuantity { .. } => PurchaseErrorKind::InvalidQuantity,
            PurchaseError::InsufficientStock { .. } => PurchaseErrorKind::InsufficientStock,
            PurchaseError::MissingAddress { .. } => PurchaseErrorKind::MissingAddress,
            PurchaseError::MissingEmail { .. } => PurchaseErrorKind::MissingEmail,
            PurchaseError::NotForSale { .. } => PurchaseErrorKind::NotForSale,
        }
    }
}
