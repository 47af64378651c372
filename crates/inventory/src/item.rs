use serde::{Deserialize, Serialize};

use bookstore_core::{Entity, Isbn, Money};

use crate::error::{PurchaseError, PurchaseResult};
use crate::notifier::Notifiers;

/// Sale behavior variant of an item, with the state only that variant has.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ItemKind {
    /// Paper book: shipped, limited by stock.
    Physical { stock: u64 },
    /// Ebook: mailed, no stock concept.
    Digital { file_format: String },
    /// Showcase book: on display, never sold.
    Display,
}

/// Catalog entry.
///
/// Identifier, title, year and price are fixed at construction. The only
/// state that ever changes is a physical item's stock, and only through
/// [`Item::process_purchase`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    isbn: Isbn,
    title: String,
    publication_year: i32,
    unit_price: Money,
    kind: ItemKind,
}

impl Item {
    pub fn physical(
        isbn: Isbn,
        title: impl Into<String>,
        publication_year: i32,
        unit_price: Money,
        stock: u64,
    ) -> Self {
        Self::with_kind(isbn, title, publication_year, unit_price, ItemKind::Physical { stock })
    }

    pub fn digital(
        isbn: Isbn,
        title: impl Into<String>,
        publication_year: i32,
        unit_price: Money,
        file_format: impl Into<String>,
    ) -> Self {
        let file_format = file_format.into();
        Self::with_kind(isbn, title, publication_year, unit_price, ItemKind::Digital { file_format })
    }

    pub fn display(isbn: Isbn, title: impl Into<String>, publication_year: i32, unit_price: Money) -> Self {
        Self::with_kind(isbn, title, publication_year, unit_price, ItemKind::Display)
    }

    fn with_kind(
        isbn: Isbn,
        title: impl Into<String>,
        publication_year: i32,
        unit_price: Money,
        kind: ItemKind,
    ) -> Self {
        Self {
            isbn,
            title: title.into(),
            publication_year,
            unit_price,
            kind,
        }
    }

    pub fn isbn(&self) -> &Isbn {
        &self.isbn
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn publication_year(&self) -> i32 {
        self.publication_year
    }

    pub fn unit_price(&self) -> Money {
        self.unit_price
    }

    pub fn kind(&self) -> &ItemKind {
        &self.kind
    }

    /// Remaining copies; `None` for variants without stock.
    pub fn stock(&self) -> Option<u64> {
        match self.kind {
            ItemKind::Physical { stock } => Some(stock),
            _ => None,
        }
    }

    pub fn file_format(&self) -> Option<&str> {
        match &self.kind {
            ItemKind::Digital { file_format } => Some(file_format),
            _ => None,
        }
    }

    pub fn is_for_sale(&self) -> bool {
        !matches!(self.kind, ItemKind::Display)
    }

    /// Years since publication as of `reference_year` (negative for future years).
    pub fn age_at(&self, reference_year: i32) -> i64 {
        i64::from(reference_year) - i64::from(self.publication_year)
    }

    /// Validate and fulfil a purchase of `quantity` copies.
    ///
    /// All checks run before any mutation or notification, so a rejected
    /// purchase leaves the item untouched.
    ///
    /// - Physical: stock is checked before the address; on success stock is
    ///   decremented and shipping is notified.
    /// - Digital: only the email is required; quantity is not bounded.
    /// - Display: always rejected.
    pub fn process_purchase(
        &mut self,
        quantity: u64,
        email: Option<&str>,
        address: Option<&str>,
        notifiers: &Notifiers,
    ) -> PurchaseResult<()> {
        let delivery = self.validate_purchase(quantity, email, address)?;
        self.fulfil(quantity, delivery, notifiers);
        Ok(())
    }

    /// Run the variant's purchase checks without touching any state.
    pub fn validate_purchase<'a>(
        &self,
        quantity: u64,
        email: Option<&'a str>,
        address: Option<&'a str>,
    ) -> PurchaseResult<Delivery<'a>> {
        match &self.kind {
            ItemKind::Physical { stock } => {
                if quantity > *stock {
                    return Err(PurchaseError::InsufficientStock {
                        isbn: self.isbn.clone(),
                        title: self.title.clone(),
                        requested: quantity,
                        available: *stock,
                    });
                }
                let Some(address) = non_blank(address) else {
                    return Err(PurchaseError::MissingAddress { isbn: self.isbn.clone() });
                };
                Ok(Delivery::Ship { address })
            }
            ItemKind::Digital { .. } => {
                let Some(email) = non_blank(email) else {
                    return Err(PurchaseError::MissingEmail { isbn: self.isbn.clone() });
                };
                Ok(Delivery::Mail { email })
            }
            ItemKind::Display => Err(PurchaseError::NotForSale {
                isbn: self.isbn.clone(),
                title: self.title.clone(),
            }),
        }
    }

    /// Apply a purchase accepted by [`Item::validate_purchase`] for the same
    /// `quantity`: take stock for shipments, then hand off to the notifier.
    pub(crate) fn fulfil(&mut self, quantity: u64, delivery: Delivery<'_>, notifiers: &Notifiers) {
        match delivery {
            Delivery::Ship { address } => {
                if let ItemKind::Physical { stock } = &mut self.kind {
                    *stock -= quantity;
                }
                notifiers.shipping.notify_shipment(&self.isbn, quantity, address);
            }
            Delivery::Mail { email } => notifiers.mail.notify_delivery(&self.isbn, email),
        }
    }
}

/// How an accepted purchase reaches the buyer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Delivery<'a> {
    Ship { address: &'a str },
    Mail { email: &'a str },
}

impl Entity for Item {
    type Id = Isbn;

    fn id(&self) -> &Self::Id {
        &self.isbn
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}
