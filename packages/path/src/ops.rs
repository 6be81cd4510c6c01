//! # Path Operations
//!
//! The addressing algebra over [`serde_json::Value`] trees.
//!
//! ## Container policy
//!
//! Writes walk the path segment by segment. A missing node, or a node whose
//! kind cannot hold the next segment, is replaced by a fresh container chosen
//! from that segment: an index yields a sequence, a key yields a mapping. A
//! single [`set`] can therefore materialize a whole missing chain. Index
//! writes past the end of a sequence pad the gap with `null`.
//!
//! Reads and deletes never create anything and never fail: an absent
//! ancestor simply means there is nothing to return or remove.

use serde_json::{Map, Value};

use crate::{Path, Segment};

/// Read the node at `path`, or `None` if any step is absent.
pub fn get<'a>(doc: &'a Value, path: &Path) -> Option<&'a Value> {
    path.iter().try_fold(doc, |node, segment| child(node, segment))
}

/// Mutable variant of [`get`]. Does not create missing nodes.
pub fn get_mut<'a>(doc: &'a mut Value, path: &Path) -> Option<&'a mut Value> {
    path.iter().try_fold(doc, |node, segment| child_mut(node, segment))
}

/// Assign `value` at `path`, creating missing intermediate containers.
///
/// The empty path replaces the root. Writing index `i` into a sequence of
/// length `n < i` first pads it with `i - n` nulls, so the padding costs
/// memory proportional to `i`.
///
/// # Panics
///
/// Panics if that padding cannot be allocated, which includes any index of
/// `usize::MAX`.
pub fn set(doc: &mut Value, path: &Path, value: Value) {
    *slot_mut(doc, path) = value;
}

/// Remove the key or index at `path` and return what was there.
///
/// Removing from a mapping keeps the order of the remaining keys; removing
/// from a sequence shifts the following elements down. Absent ancestors, a
/// kind mismatch, or the empty path are no-ops.
pub fn delete(doc: &mut Value, path: &Path) -> Option<Value> {
    let (last, parent) = path.segments().split_last()?;
    let parent = get_mut(doc, &Path::from(parent))?;

    match (parent, last) {
        (Value::Object(map), Segment::Key(key)) => map.shift_remove(key),
        (Value::Array(items), Segment::Index(index)) if *index < items.len() => {
            Some(items.remove(*index))
        }
        _ => None,
    }
}

/// Return the sequence at `path`, storing an empty one first if the current
/// value is absent or not a sequence.
pub fn ensure_sequence<'a>(doc: &'a mut Value, path: &Path) -> &'a mut Vec<Value> {
    coerce_array(slot_mut(doc, path))
}

pub(crate) fn child<'a>(node: &'a Value, segment: &Segment) -> Option<&'a Value> {
    match (node, segment) {
        (Value::Object(map), Segment::Key(key)) => map.get(key),
        (Value::Array(items), Segment::Index(index)) => items.get(*index),
        _ => None,
    }
}

fn child_mut<'a>(node: &'a mut Value, segment: &Segment) -> Option<&'a mut Value> {
    match (node, segment) {
        (Value::Object(map), Segment::Key(key)) => map.get_mut(key),
        (Value::Array(items), Segment::Index(index)) => items.get_mut(*index),
        _ => None,
    }
}

/// Walk to `path`, creating every missing node along the way. The final slot
/// is `null` if it did not exist.
fn slot_mut<'a>(doc: &'a mut Value, path: &Path) -> &'a mut Value {
    let mut node = doc;
    for segment in path {
        node = match segment {
            Segment::Key(key) => coerce_object(node)
                .entry(key.clone())
                .or_insert(Value::Null),
            Segment::Index(index) => {
                let items = coerce_array(node);
                if items.len() <= *index {
                    items.resize(index.saturating_add(1), Value::Null);
                }
                &mut items[*index]
            }
        };
    }
    node
}

fn coerce_object(node: &mut Value) -> &mut Map<String, Value> {
    if !node.is_object() {
        *node = Value::Object(Map::new());
    }
    match node {
        Value::Object(map) => map,
        _ => unreachable!("node was just coerced to an object"),
    }
}

fn coerce_array(node: &mut Value) -> &mut Vec<Value> {
    if !node.is_array() {
        *node = Value::Array(Vec::new());
    }
    match node {
        Value::Array(items) => items,
        _ => unreachable!("node was just coerced to an array"),
    }
}
