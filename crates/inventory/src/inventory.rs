//! The bookstore inventory: items keyed by ISBN.
//!
//! Single-owner, synchronous. Callers needing shared access should wrap the
//! whole inventory in one lock; every operation is a short critical section.

use std::collections::HashMap;

use tracing::{debug, info, warn};

use bookstore_core::{Clock, Entity, Isbn, Money};

use crate::error::{PurchaseError, PurchaseResult};
use crate::item::Item;
use crate::notifier::Notifiers;

#[derive(Debug, Default)]
pub struct Inventory {
    items: HashMap<Isbn, Item>,
    notifiers: Notifiers,
}

impl Inventory {
    pub fn new(notifiers: Notifiers) -> Self {
        Self {
            items: HashMap::new(),
            notifiers,
        }
    }

    pub fn with_console_notifiers() -> Self {
        Self::new(Notifiers::console())
    }

    /// Insert `item` under its ISBN.
    ///
    /// An existing entry with the same ISBN is replaced without error; the
    /// replaced item is returned.
    pub fn add_item(&mut self, item: Item) -> Option<Item> {
        let isbn = item.id().clone();
        let previous = self.items.insert(isbn.clone(), item);
        if previous.is_some() {
            debug!(%isbn, "item replaced");
        } else {
            debug!(%isbn, "item added");
        }
        previous
    }

    pub fn get(&self, isbn: &str) -> Option<&Item> {
        self.items.get(isbn.trim())
    }

    pub fn contains(&self, isbn: &str) -> bool {
        self.items.contains_key(isbn.trim())
    }

    pub fn remove(&mut self, isbn: &str) -> Option<Item> {
        let isbn = isbn.trim();
        let removed = self.items.remove(isbn);
        if removed.is_some() {
            debug!(isbn, "item removed");
        }
        removed
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Item> {
        self.items.values()
    }

    /// Remove and return every item older than `years_threshold` as of
    /// `reference_year` (age strictly greater than the threshold).
    ///
    /// The returned items are ordered by ISBN.
    pub fn purge_older_than(&mut self, years_threshold: i32, reference_year: i32) -> Vec<Item> {
        let threshold = i64::from(years_threshold);
        let mut outdated: Vec<Isbn> = self
            .items
            .values()
            .filter(|item| item.age_at(reference_year) > threshold)
            .map(|item| item.id().clone())
            .collect();
        outdated.sort();

        let removed: Vec<Item> = outdated
            .iter()
            .filter_map(|isbn| self.items.remove(isbn))
            .collect();

        info!(
            years_threshold,
            reference_year,
            removed = removed.len(),
            remaining = self.items.len(),
            "outdated items purged"
        );
        removed
    }

    /// [`Inventory::purge_older_than`] using `clock` for the reference year.
    pub fn purge_outdated(&mut self, years_threshold: i32, clock: &dyn Clock) -> Vec<Item> {
        self.purge_older_than(years_threshold, clock.current_year())
    }

    /// Buy `quantity` copies of the item with `isbn` and return the total cost.
    ///
    /// Checks, in order: the item exists, the quantity is positive, the
    /// item's own purchase rules, and finally that the total is
    /// representable. The first failing check wins and nothing is mutated.
    pub fn purchase(
        &mut self,
        isbn: &str,
        quantity: i64,
        email: Option<&str>,
        address: Option<&str>,
    ) -> PurchaseResult<Money> {
        let result = self.try_purchase(isbn, quantity, email, address);
        match &result {
            Ok(total) => info!(isbn, quantity, %total, "purchase completed"),
            Err(e) => warn!(isbn, quantity, error = %e, "purchase rejected"),
        }
        result
    }

    fn try_purchase(
        &mut self,
        isbn: &str,
        quantity: i64,
        email: Option<&str>,
        address: Option<&str>,
    ) -> PurchaseResult<Money> {
        let isbn = isbn.trim();
        let item = self
            .items
            .get_mut(isbn)
            .ok_or_else(|| PurchaseError::ItemNotFound { isbn: isbn.to_string() })?;

        let invalid = || PurchaseError::InvalidQuantity { quantity };
        let copies = u64::try_from(quantity).ok().filter(|q| *q > 0).ok_or_else(invalid)?;

        let delivery = item.validate_purchase(copies, email, address)?;
        let total = item.unit_price().times(copies).map_err(|_| invalid())?;
        item.fulfil(copies, delivery, &self.notifiers);
        Ok(total)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PurchaseErrorKind;
    use crate::notifier::{RecordingMailNotifier, RecordingShippingNotifier};
    use bookstore_core::FixedClock;
    use proptest::prelude::*;
    use std::sync::Arc;

    fn isbn(raw: &str) -> Isbn {
        Isbn::new(raw).unwrap()
    }

    fn money(raw: &str) -> Money {
        Money::parse(raw).unwrap()
    }

    struct Fixture {
        inventory: Inventory,
        shipping: Arc<RecordingShippingNotifier>,
        mail: Arc<RecordingMailNotifier>,
    }

    fn fixture() -> Fixture {
        let shipping = Arc::new(RecordingShippingNotifier::new());
        let mail = Arc::new(RecordingMailNotifier::new());
        let mut inventory = Inventory::new(Notifiers::new(shipping.clone(), mail.clone()));

        inventory.add_item(Item::physical(isbn("1234"), "Java Programming", 2020, money("29.99"), 10));
        inventory.add_item(Item::digital(isbn("5678"), "Python Guide", 2018, money("19.99"), "PDF"));
        inventory.add_item(Item::display(isbn("9012"), "Antique Collection", 2015, money("99.99")));

        Fixture { inventory, shipping, mail }
    }

    #[test]
    fn physical_purchase_returns_total_and_reduces_stock() {
        let mut f = fixture();

        let total = f.inventory.purchase("1234", 2, Some(""), Some("123 Main St")).unwrap();

        assert_eq!(total, money("59.98"));
        assert_eq!(f.inventory.get("1234").unwrap().stock(), Some(8));
        assert_eq!(f.shipping.all().len(), 1);
    }

    #[test]
    fn digital_purchase_returns_unit_price_times_quantity() {
        let mut f = fixture();

        let total = f.inventory.purchase("5678", 1, Some("user@example.com"), Some("")).unwrap();
        assert_eq!(total, money("19.99"));

        let total = f.inventory.purchase("5678", 3, Some("user@example.com"), None).unwrap();
        assert_eq!(total, money("59.97"));
        assert_eq!(f.mail.all().len(), 2);
    }

    #[test]
    fn display_purchase_is_rejected() {
        let mut f = fixture();

        let err = f.inventory.purchase("9012", 1, Some("user@example.com"), None).unwrap_err();
        assert_eq!(err.kind(), PurchaseErrorKind::NotForSale);
        assert!(f.inventory.contains("9012"));
    }

    #[test]
    fn unknown_isbn_is_not_found() {
        let mut f = fixture();

        let err = f.inventory.purchase("9999", 1, Some("user@example.com"), None).unwrap_err();
        match err {
            PurchaseError::ItemNotFound { isbn } => assert_eq!(isbn, "9999"),
            _ => panic!("Expected ItemNotFound"),
        }
    }

    #[test]
    fn lookup_runs_before_quantity_validation() {
        let mut f = fixture();

        let err = f.inventory.purchase("9999", 0, None, None).unwrap_err();
        assert_eq!(err.kind(), PurchaseErrorKind::ItemNotFound);
    }

    #[test]
    fn non_positive_quantity_is_invalid_for_every_variant() {
        let mut f = fixture();

        for id in ["1234", "5678", "9012"] {
            for quantity in [0, -1, i64::MIN] {
                let err = f
                    .inventory
                    .purchase(id, quantity, Some("user@example.com"), Some("123 Main St"))
                    .unwrap_err();
                assert_eq!(err, PurchaseError::InvalidQuantity { quantity });
            }
        }
        assert_eq!(f.inventory.get("1234").unwrap().stock(), Some(10));
        assert!(f.shipping.all().is_empty());
        assert!(f.mail.all().is_empty());
    }

    #[test]
    fn display_with_huge_quantity_is_still_not_for_sale() {
        let mut f = fixture();

        for quantity in [2_000_000_000_000_000, i64::MAX] {
            let err = f
                .inventory
                .purchase("9012", quantity, Some("user@example.com"), None)
                .unwrap_err();
            assert_eq!(err.kind(), PurchaseErrorKind::NotForSale);
        }
    }

    #[test]
    fn physical_with_huge_quantity_is_still_insufficient_stock() {
        let mut f = fixture();

        let err = f.inventory.purchase("1234", i64::MAX, None, Some("addr")).unwrap_err();
        match err {
            PurchaseError::InsufficientStock { requested, available, .. } => {
                assert_eq!(requested, i64::MAX as u64);
                assert_eq!(available, 10);
            }
            _ => panic!("Expected InsufficientStock"),
        }
        assert_eq!(f.inventory.get("1234").unwrap().stock(), Some(10));
        assert!(f.shipping.all().is_empty());
    }

    #[test]
    fn digital_with_huge_quantity_still_requires_email() {
        let mut f = fixture();

        let err = f.inventory.purchase("5678", i64::MAX, None, None).unwrap_err();
        assert_eq!(err.kind(), PurchaseErrorKind::MissingEmail);
    }

    #[test]
    fn accepted_purchase_with_unrepresentable_total_is_invalid_quantity() {
        let mut f = fixture();

        let err = f
            .inventory
            .purchase("5678", i64::MAX, Some("user@example.com"), None)
            .unwrap_err();
        assert_eq!(err, PurchaseError::InvalidQuantity { quantity: i64::MAX });
        assert!(f.mail.all().is_empty());

        f.inventory.add_item(Item::physical(
            isbn("4321"),
            "Warehouse Edition",
            2023,
            Money::from_cents(u64::MAX / 2),
            u64::MAX,
        ));
        let err = f.inventory.purchase("4321", 3, None, Some("123 Main St")).unwrap_err();
        assert_eq!(err.kind(), PurchaseErrorKind::InvalidQuantity);
        assert_eq!(f.inventory.get("4321").unwrap().stock(), Some(u64::MAX));
        assert!(f.shipping.all().is_empty());
    }

    #[test]
    fn lookups_trim_the_isbn_like_construction_does() {
        let mut f = fixture();
        f.inventory.add_item(Item::digital(isbn(" 2468 "), "Rust Guide", 2023, money("9.99"), "EPUB"));

        assert!(f.inventory.contains(" 2468 "));
        assert_eq!(f.inventory.get("2468 ").unwrap().title(), "Rust Guide");

        let total = f.inventory.purchase(" 2468 ", 1, Some("user@example.com"), None).unwrap();
        assert_eq!(total, money("9.99"));
        assert_eq!(f.mail.all()[0].isbn, isbn("2468"));

        assert!(f.inventory.remove(" 2468").is_some());
        assert!(!f.inventory.contains("2468"));
    }

    #[test]
    fn failed_physical_purchase_leaves_state_unchanged() {
        let mut f = fixture();

        let err = f.inventory.purchase("1234", 11, None, Some("123 Main St")).unwrap_err();
        assert_eq!(err.kind(), PurchaseErrorKind::InsufficientStock);

        let err = f.inventory.purchase("1234", 2, None, None).unwrap_err();
        assert_eq!(err.kind(), PurchaseErrorKind::MissingAddress);

        assert_eq!(f.inventory.get("1234").unwrap().stock(), Some(10));
        assert!(f.shipping.all().is_empty());
    }

    #[test]
    fn add_item_silently_overwrites() {
        let mut f = fixture();

        let replacement = Item::physical(isbn("1234"), "Java Programming, 2nd ed.", 2023, money("39.99"), 1);
        let previous = f.inventory.add_item(replacement).unwrap();

        assert_eq!(previous.title(), "Java Programming");
        assert_eq!(f.inventory.len(), 3);
        let current = f.inventory.get("1234").unwrap();
        assert_eq!(current.title(), "Java Programming, 2nd ed.");
        assert_eq!(current.stock(), Some(1));
    }

    #[test]
    fn remove_drops_the_entry() {
        let mut f = fixture();

        assert_eq!(f.inventory.remove("5678").unwrap().isbn(), &isbn("5678"));
        assert!(f.inventory.remove("5678").is_none());

        let err = f.inventory.purchase("5678", 1, Some("user@example.com"), None).unwrap_err();
        assert_eq!(err.kind(), PurchaseErrorKind::ItemNotFound);
    }

    #[test]
    fn purge_removes_items_older_than_threshold() {
        let mut f = fixture();

        let removed = f.inventory.purge_outdated(5, &FixedClock(2024));

        let removed: Vec<&str> = removed.iter().map(|i| i.isbn().as_str()).collect();
        assert_eq!(removed, vec!["5678", "9012"]);
        assert_eq!(f.inventory.len(), 1);
        assert!(f.inventory.contains("1234"));

        let err = f.inventory.purchase("9012", 1, Some("user@example.com"), None).unwrap_err();
        assert_eq!(err.kind(), PurchaseErrorKind::ItemNotFound);
    }

    #[test]
    fn purge_threshold_is_exclusive() {
        let mut f = fixture();

        // "1234" is exactly 4 years old in 2024.
        let removed = f.inventory.purge_older_than(4, 2024);
        assert!(removed.iter().all(|i| i.isbn().as_str() != "1234"));
        assert!(f.inventory.contains("1234"));
    }

    #[test]
    fn purge_on_empty_inventory_is_noop() {
        let mut inventory = Inventory::with_console_notifiers();
        assert!(inventory.purge_older_than(0, 2024).is_empty());
        assert!(inventory.is_empty());
    }

    proptest! {
        /// Property: purge partitions the inventory by age; removed and
        /// remaining items together are exactly the original items.
        #[test]
        fn purge_partitions_by_age(
            years in proptest::collection::vec(1900i32..2030, 0..40),
            threshold in -5i32..50,
            reference_year in 2000i32..2040,
        ) {
            let mut inventory = Inventory::new(Notifiers::new(
                Arc::new(RecordingShippingNotifier::new()),
                Arc::new(RecordingMailNotifier::new()),
            ));
            for (i, year) in years.iter().enumerate() {
                inventory.add_item(Item::display(isbn(&i.to_string()), "t", *year, Money::ZERO));
            }

            let removed = inventory.purge_older_than(threshold, reference_year);

            prop_assert_eq!(removed.len() + inventory.len(), years.len());
            for item in &removed {
                prop_assert!(item.age_at(reference_year) > i64::from(threshold));
                prop_assert!(!inventory.contains(item.isbn().as_str()));
            }
            for item in inventory.iter() {
                prop_assert!(item.age_at(reference_year) <= i64::from(threshold));
            }
        }

        /// Property: a successful physical purchase costs `unit_price * quantity`.
        #[test]
        fn physical_total_is_price_times_quantity(
            cents in prop_oneof![0u64..100_000, (u64::MAX / 4)..=u64::MAX],
            stock in 1u64..500,
            quantity in prop_oneof![1i64..500, (i64::MAX / 2)..=i64::MAX],
        ) {
            let mut inventory = Inventory::new(Notifiers::new(
                Arc::new(RecordingShippingNotifier::new()),
                Arc::new(RecordingMailNotifier::new()),
            ));
            inventory.add_item(Item::physical(isbn("1"), "t", 2020, Money::from_cents(cents), stock));

            match inventory.purchase("1", quantity, None, Some("addr")) {
                Ok(total) => {
                    prop_assert_eq!(Some(total.cents()), cents.checked_mul(quantity as u64));
                    prop_assert_eq!(inventory.get("1").unwrap().stock(), Some(stock - quantity as u64));
                }
                Err(e) if quantity as u64 > stock => {
                    prop_assert_eq!(e.kind(), PurchaseErrorKind::InsufficientStock);
                    prop_assert_eq!(inventory.get("1").unwrap().stock(), Some(stock));
                }
                Err(e) => {
                    prop_assert!(cents.checked_mul(quantity as u64).is_none());
                    prop_assert_eq!(e.kind(), PurchaseErrorKind::InvalidQuantity);
                    prop_assert_eq!(inventory.get("1").unwrap().stock(), Some(stock));
                }
            }
        }
    }
}
