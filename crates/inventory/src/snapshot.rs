//! Snapshot codec: catalog items to/from a pretty-printed JSON array.

use std::collections::HashSet;
use std::path::Path;

use serde_json::Value as JsonValue;

use stockroom_core::SnapshotError;

use crate::item::{Item, ItemKind};
use crate::record::ItemRecord;

/// How a loaded snapshot is combined with what the catalog already holds.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub enum LoadMode {
    /// Insert loaded items, overwriting existing entries that share an id.
    #[default]
    Merge,
    /// Drop everything first, then insert the loaded items.
    Replace,
}

/// Encode items, in the given order, as the snapshot text.
pub fn encode<'a>(items: impl IntoIterator<Item = &'a Item>) -> Result<String, SnapshotError> {
    let records: Vec<ItemRecord> = items.into_iter().map(Item::encode).collect();
    serde_json::to_string_pretty(&records).map_err(SnapshotError::Encode)
}

/// Decode snapshot text into items, validating every record.
///
/// Either every record decodes or nothing is returned.
pub fn decode(text: &str) -> Result<Vec<Item>, SnapshotError> {
    let raw: Vec<JsonValue> = serde_json::from_str(text).map_err(SnapshotError::Parse)?;

    let mut seen = HashSet::with_capacity(raw.len());
    let mut items = Vec::with_capacity(raw.len());
    for (index, value) in raw.into_iter().enumerate() {
        let item = decode_record(index, value)?;
        if !seen.insert(item.id().clone()) {
            return Err(SnapshotError::DuplicateRecord {
                index,
                id: item.id().to_string(),
            });
        }
        items.push(item);
    }
    Ok(items)
}

fn decode_record(index: usize, value: JsonValue) -> Result<Item, SnapshotError> {
    let JsonValue::Object(fields) = &value else {
        return Err(SnapshotError::invalid_record(index, "record is not an object"));
    };
    let type_name = match fields.get("type") {
        None | Some(JsonValue::Null) => return Err(SnapshotError::MissingType { index }),
        Some(JsonValue::String(tag)) => tag.clone(),
        Some(other) => other.to_string(),
    };
    if ItemKind::from_tag(&type_name).is_none() {
        return Err(SnapshotError::UnknownType { index, type_name });
    }

    let record: ItemRecord = serde_json::from_value(value)
        .map_err(|e| SnapshotError::invalid_record(index, e.to_string()))?;
    Item::decode(record).map_err(|e| SnapshotError::invalid_record(index, e.to_string()))
}

/// Overwrite `path` with `text`. The file handle is closed before returning.
pub fn write_file(path: &Path, text: &str) -> Result<(), SnapshotError> {
    std::fs::write(path, text).map_err(|e| SnapshotError::io(path, e))
}

pub fn read_file(path: &Path) -> Result<String, SnapshotError> {
    std::fs::read_to_string(path).map_err(|e| SnapshotError::io(path, e))
}
