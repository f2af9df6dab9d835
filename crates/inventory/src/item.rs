use chrono::{Local, NaiveDate};

use stockroom_core::{CatalogError, CatalogResult, Entity, ItemId, UnitPrice};

/// Date format used for expiry dates on input and in snapshots.
pub const EXPIRY_DATE_FORMAT: &str = "%Y-%m-%d";

/// Parse a `YYYY-MM-DD` expiry date.
pub fn parse_expiry_date(raw: &str) -> CatalogResult<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), EXPIRY_DATE_FORMAT).map_err(|e| {
        CatalogError::invalid_data(format!("expiry date '{raw}' is not a YYYY-MM-DD date: {e}"))
    })
}

/// Discriminator of the item variants.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum ItemKind {
    Electronics,
    Grocery,
    Clothing,
}

impl ItemKind {
    pub const ALL: [ItemKind; 3] = [ItemKind::Electronics, ItemKind::Grocery, ItemKind::Clothing];

    pub fn as_str(self) -> &'static str {
        match self {
            ItemKind::Electronics => "Electronics",
            ItemKind::Grocery => "Grocery",
            ItemKind::Clothing => "Clothing",
        }
    }

    /// Exact (case-sensitive) match on the snapshot tag.
    pub fn from_tag(tag: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.as_str() == tag)
    }

    /// Case-insensitive match, as typed by an operator.
    pub fn from_name(name: &str) -> Option<Self> {
        let name = name.trim();
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str().eq_ignore_ascii_case(name))
    }
}

impl core::fmt::Display for ItemKind {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Fields every item carries.
///
/// `quantity_on_hand` is private; it only changes through [`ItemCore::sell`]
/// and [`ItemCore::restock`], which keep it non-negative.
#[derive(Debug, Clone, PartialEq)]
pub struct ItemCore {
    id: ItemId,
    name: String,
    unit_price: UnitPrice,
    quantity_on_hand: i64,
}

impl ItemCore {
    pub fn new(
        id: impl AsRef<str>,
        name: impl Into<String>,
        unit_price: f64,
        quantity_on_hand: i64,
    ) -> CatalogResult<Self> {
        let id = ItemId::new(id)?;
        let name = name.into();
        if name.trim().is_empty() {
            return Err(CatalogError::invalid_data("name cannot be empty"));
        }
        let unit_price = UnitPrice::new(unit_price)?;
        if quantity_on_hand < 0 {
            return Err(CatalogError::invalid_data(format!(
                "quantity on hand cannot be negative, got {quantity_on_hand}"
            )));
        }
        Ok(Self {
            id,
            name: name.trim().to_string(),
            unit_price,
            quantity_on_hand,
        })
    }

    pub fn id(&self) -> &ItemId {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn unit_price(&self) -> UnitPrice {
        self.unit_price
    }

    pub fn quantity_on_hand(&self) -> i64 {
        self.quantity_on_hand
    }

    fn restock(&mut self, amount: i64) -> CatalogResult<i64> {
        if amount < 0 {
            return Err(CatalogError::invalid_operation(format!(
                "restock amount cannot be negative, got {amount}"
            )));
        }
        let next = self.quantity_on_hand.checked_add(amount).ok_or_else(|| {
            CatalogError::invalid_operation(format!(
                "restocking {amount} units would overflow the stock counter"
            ))
        })?;
        self.quantity_on_hand = next;
        Ok(next)
    }

    fn sell(&mut self, quantity: i64) -> CatalogResult<i64> {
        if quantity < 0 {
            return Err(CatalogError::invalid_operation(format!(
                "sell quantity cannot be negative, got {quantity}"
            )));
        }
        if quantity > self.quantity_on_hand {
            return Err(CatalogError::InsufficientStock {
                id: self.id.clone(),
                requested: quantity,
                available: self.quantity_on_hand,
            });
        }
        self.quantity_on_hand -= quantity;
        Ok(self.quantity_on_hand)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Electronics {
    core: ItemCore,
    warranty_years: u32,
    brand: String,
}

impl Electronics {
    pub fn new(core: ItemCore, warranty_years: i64, brand: impl Into<String>) -> CatalogResult<Self> {
        let warranty_years = u32::try_from(warranty_years).map_err(|_| {
            CatalogError::invalid_data(format!(
                "warranty years must be a non-negative whole number, got {warranty_years}"
            ))
        })?;
        Ok(Self {
            core,
            warranty_years,
            brand: brand.into(),
        })
    }

    pub fn warranty_years(&self) -> u32 {
        self.warranty_years
    }

    pub fn brand(&self) -> &str {
        &self.brand
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Grocery {
    core: ItemCore,
    expiry_date: NaiveDate,
}

impl Grocery {
    pub fn new(core: ItemCore, expiry_date: NaiveDate) -> Self {
        Self { core, expiry_date }
    }

    /// Build from a textual `YYYY-MM-DD` expiry date.
    pub fn with_expiry_str(core: ItemCore, expiry_date: &str) -> CatalogResult<Self> {
        Ok(Self::new(core, parse_expiry_date(expiry_date)?))
    }

    pub fn expiry_date(&self) -> NaiveDate {
        self.expiry_date
    }

    /// Expired once `today` is past the expiry date; the expiry day itself is
    /// still sellable.
    pub fn is_expired_on(&self, today: NaiveDate) -> bool {
        self.expiry_date < today
    }

    /// Same as [`Grocery::is_expired_on`] against the local calendar date,
    /// read on every call.
    pub fn is_expired(&self) -> bool {
        self.is_expired_on(Local::now().date_naive())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Clothing {
    core: ItemCore,
    size: String,
    material: String,
}

impl Clothing {
    pub fn new(core: ItemCore, size: impl Into<String>, material: impl Into<String>) -> Self {
        Self {
            core,
            size: size.into(),
            material: material.into(),
        }
    }

    pub fn size(&self) -> &str {
        &self.size
    }

    pub fn material(&self) -> &str {
        &self.material
    }
}

/// A sellable catalog entry.
#[derive(Debug, Clone, PartialEq)]
pub enum Item {
    Electronics(Electronics),
    Grocery(Grocery),
    Clothing(Clothing),
}

impl From<Electronics> for Item {
    fn from(value: Electronics) -> Self {
        Item::Electronics(value)
    }
}

impl From<Grocery> for Item {
    fn from(value: Grocery) -> Self {
        Item::Grocery(value)
    }
}

impl From<Clothing> for Item {
    fn from(value: Clothing) -> Self {
        Item::Clothing(value)
    }
}

impl Item {
    pub fn kind(&self) -> ItemKind {
        match self {
            Item::Electronics(_) => ItemKind::Electronics,
            Item::Grocery(_) => ItemKind::Grocery,
            Item::Clothing(_) => ItemKind::Clothing,
        }
    }

    pub fn core(&self) -> &ItemCore {
        match self {
            Item::Electronics(e) => &e.core,
            Item::Grocery(g) => &g.core,
            Item::Clothing(c) => &c.core,
        }
    }

    fn core_mut(&mut self) -> &mut ItemCore {
        match self {
            Item::Electronics(e) => &mut e.core,
            Item::Grocery(g) => &mut g.core,
            Item::Clothing(c) => &mut c.core,
        }
    }

    pub fn id(&self) -> &ItemId {
        self.core().id()
    }

    pub fn name(&self) -> &str {
        self.core().name()
    }

    pub fn unit_price(&self) -> UnitPrice {
        self.core().unit_price()
    }

    pub fn quantity_on_hand(&self) -> i64 {
        self.core().quantity_on_hand()
    }

    /// Add `amount` units; returns the new quantity on hand.
    pub fn restock(&mut self, amount: i64) -> CatalogResult<i64> {
        self.core_mut().restock(amount)
    }

    /// Remove `quantity` units; returns the new quantity on hand.
    ///
    /// Fails with [`CatalogError::InsufficientStock`] without touching the
    /// stock if fewer than `quantity` units are on hand.
    pub fn sell(&mut self, quantity: i64) -> CatalogResult<i64> {
        self.core_mut().sell(quantity)
    }

    pub fn total_value(&self) -> f64 {
        let core = self.core();
        core.unit_price().times(core.quantity_on_hand())
    }

    /// Only groceries expire; everything else reports `false`.
    pub fn is_expired_on(&self, today: NaiveDate) -> bool {
        match self {
            Item::Grocery(g) => g.is_expired_on(today),
            _ => false,
        }
    }

    pub fn is_expired(&self) -> bool {
        self.is_expired_on(Local::now().date_naive())
    }
}

impl Entity for Item {
    type Id = ItemId;

    fn id(&self) -> &ItemId {
        self.core().id()
    }

    fn label(&self) -> &str {
        self.name()
    }
}

impl core::fmt::Display for Item {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let core = self.core();
        match self {
            Item::Electronics(e) => write!(
                f,
                "[Electronics] {} ({}) - ${}, Qty: {}, Warranty: {} yrs",
                core.name(),
                e.brand,
                core.unit_price(),
                core.quantity_on_hand(),
                e.warranty_years
            ),
            Item::Grocery(g) => {
                let status = if g.is_expired() { "Expired" } else { "Valid" };
                write!(
                    f,
                    "[Grocery] {} - ${}, Qty: {}, Exp: {} ({status})",
                    core.name(),
                    core.unit_price(),
                    core.quantity_on_hand(),
                    g.expiry_date.format(EXPIRY_DATE_FORMAT)
                )
            }
            Item::Clothing(c) => write!(
                f,
                "[Clothing] {} - ${}, Qty: {}, Size: {}, Material: {}",
                core.name(),
                core.unit_price(),
                core.quantity_on_hand(),
                c.size,
                c.material
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(raw: &str) -> NaiveDate {
        parse_expiry_date(raw).unwrap()
    }

    fn laptop(quantity: i64) -> Item {
        let core = ItemCore::new("E1", "Laptop", 100.0, quantity).unwrap();
        Electronics::new(core, 2, "X").unwrap().into()
    }

    fn milk(expiry: &str) -> Item {
        let core = ItemCore::new("G1", "Milk", 2.0, 5).unwrap();
        Grocery::with_expiry_str(core, expiry).unwrap().into()
    }

    #[test]
    fn construction_rejects_negative_price() {
        let err = ItemCore::new("E1", "Laptop", -1.0, 3).unwrap_err();
        assert!(matches!(err, CatalogError::InvalidData(_)));
    }

    #[test]
    fn construction_rejects_negative_quantity() {
        let err = ItemCore::new("E1", "Laptop", 10.0, -1).unwrap_err();
        assert!(matches!(err, CatalogError::InvalidData(_)));
    }

    #[test]
    fn construction_rejects_blank_name_and_id() {
        assert!(ItemCore::new("E1", "  ", 10.0, 1).is_err());
        assert!(ItemCore::new(" ", "Laptop", 10.0, 1).is_err());
    }

    #[test]
    fn construction_rejects_negative_warranty() {
        let core = ItemCore::new("E1", "Laptop", 10.0, 1).unwrap();
        let err = Electronics::new(core, -1, "X").unwrap_err();
        assert!(matches!(err, CatalogError::InvalidData(_)));
    }

    #[test]
    fn construction_rejects_malformed_expiry() {
        for raw in ["2024-13-01", "01/02/2024", "tomorrow", ""] {
            let core = ItemCore::new("G1", "Milk", 2.0, 1).unwrap();
            let err = Grocery::with_expiry_str(core, raw).unwrap_err();
            assert!(matches!(err, CatalogError::InvalidData(_)), "{raw:?}");
        }
    }

    #[test]
    fn restock_adds_units() {
        let mut item = laptop(3);
        assert_eq!(item.restock(4).unwrap(), 7);
        assert_eq!(item.quantity_on_hand(), 7);
        assert_eq!(item.restock(0).unwrap(), 7);
    }

    #[test]
    fn restock_rejects_negative_amount() {
        let mut item = laptop(3);
        let err = item.restock(-1).unwrap_err();
        assert!(matches!(err, CatalogError::InvalidOperation(_)));
        assert_eq!(item.quantity_on_hand(), 3);
    }

    #[test]
    fn restock_reports_overflow() {
        let mut item = laptop(i64::MAX);
        let err = item.restock(1).unwrap_err();
        assert!(matches!(err, CatalogError::InvalidOperation(_)));
        assert_eq!(item.quantity_on_hand(), i64::MAX);
    }

    #[test]
    fn sell_removes_units() {
        let mut item = laptop(3);
        assert_eq!(item.sell(3).unwrap(), 0);
        assert_eq!(item.quantity_on_hand(), 0);
    }

    #[test]
    fn sell_more_than_on_hand_is_rejected_without_partial_sale() {
        let mut item = laptop(3);
        match item.sell(5).unwrap_err() {
            CatalogError::InsufficientStock {
                id,
                requested,
                available,
            } => {
                assert_eq!(id.as_str(), "E1");
                assert_eq!(requested, 5);
                assert_eq!(available, 3);
            }
            other => panic!("expected InsufficientStock, got {other:?}"),
        }
        assert_eq!(item.quantity_on_hand(), 3);
    }

    #[test]
    fn sell_rejects_negative_quantity() {
        let mut item = laptop(3);
        let err = item.sell(-2).unwrap_err();
        assert!(matches!(err, CatalogError::InvalidOperation(_)));
        assert_eq!(item.quantity_on_hand(), 3);
    }

    #[test]
    fn total_value_is_price_times_quantity() {
        assert_eq!(laptop(3).total_value(), 300.0);
        assert_eq!(laptop(0).total_value(), 0.0);
    }

    #[test]
    fn grocery_expires_the_day_after_its_expiry_date() {
        let item = milk("2024-06-10");
        assert!(!item.is_expired_on(date("2024-06-09")));
        assert!(!item.is_expired_on(date("2024-06-10")));
        assert!(item.is_expired_on(date("2024-06-11")));
    }

    #[test]
    fn long_past_grocery_is_expired_now() {
        assert!(milk("2000-01-01").is_expired());
        assert!(!milk("9999-12-31").is_expired());
    }

    #[test]
    fn only_groceries_expire() {
        let core = ItemCore::new("C1", "Shirt", 15.0, 2).unwrap();
        let shirt: Item = Clothing::new(core, "M", "Cotton").into();
        assert!(!shirt.is_expired_on(date("9999-12-31")));
        assert!(!laptop(1).is_expired());
    }

    #[test]
    fn kind_names_parse_case_insensitively() {
        assert_eq!(ItemKind::from_name("grocery"), Some(ItemKind::Grocery));
        assert_eq!(ItemKind::from_name(" ELECTRONICS "), Some(ItemKind::Electronics));
        assert_eq!(ItemKind::from_name("Furniture"), None);
        assert_eq!(ItemKind::from_tag("clothing"), None);
        assert_eq!(ItemKind::from_tag("Clothing"), Some(ItemKind::Clothing));
    }

    #[test]
    fn display_includes_variant_fields() {
        assert_eq!(
            laptop(3).to_string(),
            "[Electronics] Laptop (X) - $100.00, Qty: 3, Warranty: 2 yrs"
        );
        assert_eq!(
            milk("2000-01-01").to_string(),
            "[Grocery] Milk - $2.00, Qty: 5, Exp: 2000-01-01 (Expired)"
        );
        let core = ItemCore::new("C1", "Shirt", 15.5, 2).unwrap();
        let shirt: Item = Clothing::new(core, "M", "Cotton").into();
        assert_eq!(
            shirt.to_string(),
            "[Clothing] Shirt - $15.50, Qty: 2, Size: M, Material: Cotton"
        );
    }

    #[test]
    fn entity_id_and_label_come_from_the_shared_fields() {
        let item = laptop(1);
        assert_eq!(Entity::id(&item).as_str(), "E1");
        assert_eq!(item.label(), "Laptop");
        assert_eq!(item.kind(), ItemKind::Electronics);
    }

    #[cfg(test)]
    mod proptest_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #![proptest_config(ProptestConfig {
                cases: 500,
                ..ProptestConfig::default()
            })]

            /// Property: a successful sell followed by the same restock restores stock.
            #[test]
            fn sell_then_restock_restores_quantity(
                on_hand in 0i64..1_000_000,
                fraction in 0.0f64..=1.0
            ) {
                let mut item = laptop(on_hand);
                let quantity = (on_hand as f64 * fraction) as i64;

                item.sell(quantity).unwrap();
                item.restock(quantity).unwrap();

                prop_assert_eq!(item.quantity_on_hand(), on_hand);
            }

            /// Property: overselling fails and leaves stock untouched.
            #[test]
            fn oversell_is_rejected(on_hand in 0i64..1_000_000, extra in 1i64..1_000_000) {
                let mut item = laptop(on_hand);
                let before = item.clone();

                let result = item.sell(on_hand + extra);

                let is_insufficient = matches!(result, Err(CatalogError::InsufficientStock { .. }));
                prop_assert!(is_insufficient);
                prop_assert_eq!(&item, &before);
            }

            /// Property: quantity never goes negative whatever sequence of operations runs.
            #[test]
            fn quantity_stays_non_negative(ops in proptest::collection::vec(-50i64..50, 0..64)) {
                let mut item = laptop(10);
                for op in ops {
                    let _ = if op >= 0 { item.restock(op) } else { item.sell(-op) };
                    prop_assert!(item.quantity_on_hand() >= 0);
                }
            }
        }
    }
}
