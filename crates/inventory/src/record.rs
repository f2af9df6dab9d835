//! Flat, tagged record form of an [`Item`], as written to snapshots.

use serde::{Deserialize, Serialize};

use stockroom_core::{CatalogError, CatalogResult};

use crate::item::{
    Clothing, EXPIRY_DATE_FORMAT, Electronics, Grocery, Item, ItemCore, parse_expiry_date,
};

/// One snapshot record: a `type` tag, the shared fields, and the variant's
/// own fields, all at the same level.
///
/// Values are kept raw (signed integers, textual dates) so that a record read
/// from disk goes through the same validation as operator input when it is
/// turned back into an [`Item`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all_fields = "camelCase")]
pub enum ItemRecord {
    Electronics {
        id: String,
        name: String,
        price: f64,
        quantity_on_stock: i64,
        warranty_years: i64,
        brand: String,
    },
    Grocery {
        id: String,
        name: String,
        price: f64,
        quantity_on_stock: i64,
        expiry_date: String,
    },
    Clothing {
        id: String,
        name: String,
        price: f64,
        quantity_on_stock: i64,
        size: String,
        material: String,
    },
}

impl ItemRecord {
    pub fn id(&self) -> &str {
        match self {
            ItemRecord::Electronics { id, .. }
            | ItemRecord::Grocery { id, .. }
            | ItemRecord::Clothing { id, .. } => id,
        }
    }
}

impl Item {
    pub fn encode(&self) -> ItemRecord {
        let core = self.core();
        let id = core.id().to_string();
        let name = core.name().to_string();
        let price = core.unit_price().amount();
        let quantity_on_stock = core.quantity_on_hand();

        match self {
            Item::Electronics(e) => ItemRecord::Electronics {
                id,
                name,
                price,
                quantity_on_stock,
                warranty_years: i64::from(e.warranty_years()),
                brand: e.brand().to_string(),
            },
            Item::Grocery(g) => ItemRecord::Grocery {
                id,
                name,
                price,
                quantity_on_stock,
                expiry_date: g.expiry_date().format(EXPIRY_DATE_FORMAT).to_string(),
            },
            Item::Clothing(c) => ItemRecord::Clothing {
                id,
                name,
                price,
                quantity_on_stock,
                size: c.size().to_string(),
                material: c.material().to_string(),
            },
        }
    }

    pub fn decode(record: ItemRecord) -> CatalogResult<Item> {
        Item::try_from(record)
    }
}

impl TryFrom<ItemRecord> for Item {
    type Error = CatalogError;

    fn try_from(record: ItemRecord) -> Result<Self, Self::Error> {
        let item = match record {
            ItemRecord::Electronics {
                id,
                name,
                price,
                quantity_on_stock,
                warranty_years,
                brand,
            } => {
                let core = ItemCore::new(id, name, price, quantity_on_stock)?;
                Electronics::new(core, warranty_years, brand)?.into()
            }
            ItemRecord::Grocery {
                id,
                name,
                price,
                quantity_on_stock,
                expiry_date,
            } => {
                let core = ItemCore::new(id, name, price, quantity_on_stock)?;
                Grocery::new(core, parse_expiry_date(&expiry_date)?).into()
            }
            ItemRecord::Clothing {
                id,
                name,
                price,
                quantity_on_stock,
                size,
                material,
            } => {
                let core = ItemCore::new(id, name, price, quantity_on_stock)?;
                Clothing::new(core, size, material).into()
            }
        };
        Ok(item)
    }
}
