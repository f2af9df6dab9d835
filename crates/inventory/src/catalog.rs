use std::path::Path;

use chrono::{Local, NaiveDate};
use indexmap::IndexMap;

use stockroom_core::{CatalogError, CatalogResult, Entity, ItemId};

use crate::item::{Item, ItemKind};
use crate::snapshot::{self, LoadMode};

/// Keyed collection of items.
///
/// Iteration, search results and snapshots all follow insertion order. Items
/// are only handed out by shared reference; stock changes go through
/// [`Catalog::sell`] and [`Catalog::restock`].
///
/// Lookups by an id that is not in the catalog (`remove_item`, `sell`,
/// `restock`) do nothing and report `None` instead of failing.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    items: IndexMap<ItemId, Item>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&Item> {
        self.items.get(lookup_key(id))
    }

    pub fn contains(&self, id: &str) -> bool {
        self.items.contains_key(lookup_key(id))
    }

    pub fn iter(&self) -> impl Iterator<Item = &Item> {
        self.items.values()
    }

    pub fn add_item(&mut self, item: Item) -> CatalogResult<()> {
        let id = Entity::id(&item).clone();
        if self.items.contains_key(&id) {
            tracing::debug!(%id, "rejected duplicate item");
            return Err(CatalogError::DuplicateId(id));
        }
        tracing::debug!(%id, kind = %item.kind(), name = item.label(), "item added");
        self.items.insert(id, item);
        Ok(())
    }

    /// Remove and return the item, or `None` if no item has this id.
    pub fn remove_item(&mut self, id: &str) -> Option<Item> {
        let id = lookup_key(id);
        let removed = self.items.shift_remove(id);
        match &removed {
            Some(_) => tracing::debug!(id, "item removed"),
            None => tracing::debug!(id, "remove ignored: unknown id"),
        }
        removed
    }

    /// Items whose name contains `fragment`, ignoring case.
    pub fn search_by_name(&self, fragment: &str) -> Vec<&Item> {
        let needle = fragment.to_lowercase();
        self.items
            .values()
            .filter(|item| item.name().to_lowercase().contains(&needle))
            .collect()
    }

    /// Items of the named variant, ignoring case. Unknown names match nothing.
    pub fn search_by_type(&self, type_name: &str) -> Vec<&Item> {
        match ItemKind::from_name(type_name) {
            Some(kind) => self.items_of_kind(kind),
            None => Vec::new(),
        }
    }

    pub fn items_of_kind(&self, kind: ItemKind) -> Vec<&Item> {
        self.items
            .values()
            .filter(|item| item.kind() == kind)
            .collect()
    }

    pub fn list_all(&self) -> Vec<&Item> {
        self.items.values().collect()
    }

    /// Sell from the item with this id.
    ///
    /// Returns the remaining quantity, or `Ok(None)` if no item has this id.
    /// Item errors are passed through unchanged.
    pub fn sell(&mut self, id: &str, quantity: i64) -> CatalogResult<Option<i64>> {
        let id = lookup_key(id);
        let Some(item) = self.items.get_mut(id) else {
            tracing::debug!(id, quantity, "sell ignored: unknown id");
            return Ok(None);
        };
        let remaining = item.sell(quantity)?;
        tracing::debug!(id, quantity, remaining, "item sold");
        Ok(Some(remaining))
    }

    /// Restock the item with this id.
    ///
    /// Returns the new quantity, or `Ok(None)` if no item has this id.
    pub fn restock(&mut self, id: &str, quantity: i64) -> CatalogResult<Option<i64>> {
        let id = lookup_key(id);
        let Some(item) = self.items.get_mut(id) else {
            tracing::debug!(id, quantity, "restock ignored: unknown id");
            return Ok(None);
        };
        let on_hand = item.restock(quantity)?;
        tracing::debug!(id, quantity, on_hand, "item restocked");
        Ok(Some(on_hand))
    }

    pub fn total_inventory_value(&self) -> f64 {
        self.items.values().map(Item::total_value).sum()
    }

    /// Remove every grocery that has expired as of today's local date.
    pub fn prune_expired(&mut self) -> Vec<ItemId> {
        self.prune_expired_on(Local::now().date_naive())
    }

    /// Remove every grocery expired as of `today`; returns the removed ids in
    /// catalog order.
    pub fn prune_expired_on(&mut self, today: NaiveDate) -> Vec<ItemId> {
        let mut removed = Vec::new();
        self.items.retain(|id, item| {
            let expired = item.is_expired_on(today);
            if expired {
                removed.push(id.clone());
            }
            !expired
        });
        tracing::info!(%today, removed = removed.len(), "pruned expired groceries");
        removed
    }

    /// Snapshot text for every item, in catalog order.
    pub fn to_snapshot(&self) -> CatalogResult<String> {
        Ok(snapshot::encode(self.items.values())?)
    }

    /// Decode `text` and combine it with the catalog according to `mode`.
    ///
    /// Nothing changes unless every record decodes. Returns the number of
    /// records loaded.
    pub fn load_snapshot(&mut self, text: &str, mode: LoadMode) -> CatalogResult<usize> {
        let loaded = snapshot::decode(text)?;
        let count = loaded.len();
        if mode == LoadMode::Replace {
            self.items.clear();
        }
        for item in loaded {
            self.items.insert(Entity::id(&item).clone(), item);
        }
        Ok(count)
    }

    /// Write the snapshot to `destination`, overwriting whatever is there.
    pub fn save(&self, destination: impl AsRef<Path>) -> CatalogResult<()> {
        let destination = destination.as_ref();
        let text = self.to_snapshot()?;
        snapshot::write_file(destination, &text)?;
        tracing::info!(path = %destination.display(), items = self.len(), "catalog saved");
        Ok(())
    }

    /// Read the snapshot at `source` into the catalog.
    pub fn load(&mut self, source: impl AsRef<Path>, mode: LoadMode) -> CatalogResult<usize> {
        let source = source.as_ref();
        let result = snapshot::read_file(source)
            .map_err(CatalogError::from)
            .and_then(|text| self.load_snapshot(&text, mode));
        match &result {
            Ok(count) => {
                tracing::info!(path = %source.display(), items = count, ?mode, "catalog loaded")
            }
            Err(err) => tracing::warn!(path = %source.display(), error = %err, "catalog load failed"),
        }
        result
    }
}

/// Stored ids are trimmed, so lookups are too.
fn lookup_key(id: &str) -> &str {
    id.trim()
}
