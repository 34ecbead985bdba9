//! Version upgrades for stored board blobs.
//!
//! Upgrades operate on the raw JSON value so that fields missing from old
//! blobs can be filled in before typed decoding:
//!
//! - unversioned blobs (`"1.0"`) predate the stored id counter;
//! - `"2.0"` blobs may carry a null or zero counter written by old builds.
//!
//! In both cases the counter is repaired to the highest stored item id.

use super::SnapshotError;
use serde_json::{Map, Value};

/// Version written by this build.
pub const CURRENT_VERSION: &str = "2.0";

const LEGACY_VERSION: &str = "1.0";

/// Result type for upgrade operations.
pub type UpgradeResult<T> = Result<T, SnapshotError>;

/// Brings a stored blob up to [`CURRENT_VERSION`].
///
/// # Errors
///
/// Returns [`SnapshotError::Malformed`] when the blob is not an object with a
/// `columns` array and [`SnapshotError::UnsupportedVersion`] for versions
/// newer than this build understands.
pub fn upgrade(mut value: Value) -> UpgradeResult<Value> {
    let object = value
        .as_object_mut()
        .ok_or_else(|| SnapshotError::malformed("expected board snapshot to be an object"))?;

    let version = declared_version(object)?;
    match version.as_str() {
        LEGACY_VERSION | CURRENT_VERSION => {
            repair_counter(object)?;
            object.insert(
                "version".to_owned(),
                Value::String(CURRENT_VERSION.to_owned()),
            );
            Ok(value)
        }
        other => Err(SnapshotError::UnsupportedVersion(other.to_owned())),
    }
}

fn declared_version(object: &Map<String, Value>) -> UpgradeResult<String> {
    match object.get("version") {
        None | Some(Value::Null) => Ok(LEGACY_VERSION.to_owned()),
        Some(Value::String(version)) => Ok(version.trim().to_owned()),
        Some(Value::Number(number)) => Ok(format!("{number}.0")),
        Some(other) => Err(SnapshotError::malformed(format!(
            "unexpected version value: {other}"
        ))),
    }
}

fn repair_counter(object: &mut Map<String, Value>) -> UpgradeResult<()> {
    let highest = highest_item_id(object)?;
    let stored = object
        .get("itemIdCounter")
        .and_then(Value::as_u64)
        .unwrap_or_default();
    object.insert(
        "itemIdCounter".to_owned(),
        Value::from(stored.max(highest)),
    );
    Ok(())
}

fn highest_item_id(object: &Map<String, Value>) -> UpgradeResult<u64> {
    let columns = object
        .get("columns")
        .and_then(Value::as_array)
        .ok_or_else(|| SnapshotError::malformed("expected a columns array"))?;

    let highest = columns
        .iter()
        .filter_map(|column| column.get("items").and_then(Value::as_array))
        .flatten()
        .filter_map(|item| item.get("id").and_then(Value::as_u64))
        .max()
        .unwrap_or_default();
    Ok(highest)
}
