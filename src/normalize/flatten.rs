use serde_json::map::Entry;
use serde_json::{Map, Value};
use tracing::warn;

/// Lift nested mappings into the top level. A lifted key that collides with
/// one already present becomes `parent.child`; if that name is taken too the
/// lifted value is dropped with a warning. Sequences are left alone.
pub fn flatten(record: &Map<String, Value>) -> Map<String, Value> {
    let mut out = Map::new();
    // Top-level scalars claim their names first.
    for (key, value) in record {
        if !value.is_object() {
            out.insert(key.clone(), value.clone());
        }
    }
    for (key, value) in record {
        if let Value::Object(child) = value {
            for (ck, cv) in flatten(child) {
                let name = if out.contains_key(&ck) || record.contains_key(&ck) {
                    format!("{}.{}", key, ck)
                } else {
                    ck
                };
                match out.entry(name) {
                    Entry::Vacant(slot) => {
                        slot.insert(cv);
                    }
                    Entry::Occupied(slot) => {
                        warn!(key = %slot.key(), "flattened key collides twice, dropping nested value");
                    }
                }
            }
        }
    }
    out
}
