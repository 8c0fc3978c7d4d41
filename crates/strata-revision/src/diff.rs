//! Shallow snapshot diff
//!
//! Equality is JSON-semantic per key: `1.0` and `1` compare equal the way
//! `serde_json::Value` says they do, string forms are irrelevant. The diff
//! is shallow - nested objects compare as whole values - matching the
//! flat column-per-field shape of hierarchy rows.

use indexmap::IndexMap;
use serde_json::{Map, Value};

/// Before/after values for one changed key
///
/// `None` means the key was absent on that side, which is distinct from an
/// explicit JSON `null`.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldChange {
    pub before: Option<Value>,
    pub after: Option<Value>,
}

/// Changed keys between two state snapshots
///
/// Keys absent from both sides are never listed; keys equal on both sides
/// are never listed. Order is first-seen: `before`'s key order, then keys
/// that only exist in `after`.
#[must_use]
pub fn diff_snapshots(
    before: &Map<String, Value>,
    after: &Map<String, Value>,
) -> IndexMap<String, FieldChange> {
    let mut changes = IndexMap::new();
    for (key, old) in before {
        match after.get(key) {
            Some(new) if new == old => {}
            found => {
                changes.insert(
                    key.clone(),
                    FieldChange {
                        before: Some(old.clone()),
                        after: found.cloned(),
                    },
                );
            }
        }
    }
    for (key, new) in after {
        if !before.contains_key(key) {
            changes.insert(
                key.clone(),
                FieldChange {
                    before: None,
                    after: Some(new.clone()),
                },
            );
        }
    }
    changes
}
