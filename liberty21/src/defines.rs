//!
//! # Define Merging
//!
//! Accumulates the projected `define` (and `define_group`) statements of a group
//! into its single `defines` map, keyed by define-name in first-seen order.
//!

// Crates.io Imports
use log::debug;
use serde_json::{Map, Value};

// Local Imports
use crate::coerce::{normalize_type_name, scalar_text, UNDEFINED_VALUETYPE};

/// Key of each define's permitted group-type(s)
pub const ALLOWED_GROUP_NAME: &str = "allowed_group_name";
/// Key of each define's value-type
pub const VALTYPE: &str = "valtype";

/// Merge the projected value of one define-statement into accumulator `acc`.
///
/// `projected` is the statement's projected object, with a single entry
/// whose value is the list `[define_name, allowed_group_name(, value_type)]`.
///
/// * New define-names add an entry `{allowed_group_name, valtype}`.
///   Two-element defines get the `undefined_valuetype` value-type.
/// * Repeated define-names extend the existing `allowed_group_name` with `|`
///   and the (type-normalized) new group-name, even if already listed.
///   Their `valtype` stays as the first declaration set it.
/// * Entries of any other shape are copied through verbatim, under their original key.
pub fn merge_define(acc: &mut Map<String, Value>, projected: Map<String, Value>) {
    for (key, val) in projected {
        match val {
            Value::Array(list) if list.len() == 2 || list.len() == 3 => merge_one(acc, list),
            other => {
                debug!("Passing through malformed define `{}`: {}", key, other);
                acc.insert(key, other);
            }
        }
    }
}

/// Merge a single well-formed `[name, group(, type)]` define-list
fn merge_one(acc: &mut Map<String, Value>, list: Vec<Value>) {
    let name = scalar_text(&list[0]);
    let valtype = list.get(2).map(|t| normalize_type_name(&scalar_text(t)));

    if let Some(Value::Object(existing)) = acc.get_mut(&name) {
        let prev = existing.get(ALLOWED_GROUP_NAME).map(scalar_text);
        if let Some(prev) = prev {
            // Repeats only extend the group-list. Their value-type is ignored.
            let group = normalize_type_name(&scalar_text(&list[1]));
            existing.insert(
                ALLOWED_GROUP_NAME.into(),
                Value::String(format!("{}|{}", prev, group)),
            );
            return;
        }
    }
    // New define-name, or one previously passed-through in some other shape
    let mut entry = Map::new();
    entry.insert(ALLOWED_GROUP_NAME.into(), list[1].clone());
    entry.insert(
        VALTYPE.into(),
        Value::String(valtype.unwrap_or_else(|| UNDEFINED_VALUETYPE.to_string())),
    );
    acc.insert(name, Value::Object(entry));
}
