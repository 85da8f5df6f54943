use serde_json::{Map, Value};

pub const DEFAULT_SENTINELS: &[&str] = &["Not Available", "Not Applicable", "To be identified", ""];

/// Placeholder strings that mean "no data". `null` is always a sentinel.
#[derive(Debug, Clone)]
pub struct SentinelSet {
    values: Vec<String>,
}

impl Default for SentinelSet {
    fn default() -> Self {
        Self::new(DEFAULT_SENTINELS.iter().map(|s| s.to_string()))
    }
}

impl SentinelSet {
    pub fn new<I>(values: I) -> Self
    where
        I: IntoIterator<Item = String>,
    {
        let mut values: Vec<String> = values.into_iter().map(|v| v.trim().to_string()).collect();
        // Blank strings are never data, whatever the configured list says.
        if !values.iter().any(|v| v.is_empty()) {
            values.push(String::new());
        }
        SentinelSet { values }
    }

    pub fn is_sentinel_str(&self, s: &str) -> bool {
        let trimmed = s.trim();
        self.values.iter().any(|v| v == trimmed)
    }

    pub fn is_sentinel(&self, value: &Value) -> bool {
        match value {
            Value::Null => true,
            Value::String(s) => self.is_sentinel_str(s),
            _ => false,
        }
    }

    /// Recursively drop sentinel entries from mappings. A nested mapping or
    /// sequence that ends up empty is dropped from its parent as well, so a
    /// cleaned mapping never holds a sentinel or an empty container.
    /// Sequence elements are cleaned but kept in place.
    pub fn clean(&self, value: &Value) -> Value {
        match value {
            Value::Object(map) => Value::Object(self.clean_record(map)),
            Value::Array(items) => Value::Array(items.iter().map(|v| self.clean(v)).collect()),
            other => other.clone(),
        }
    }

    pub fn clean_record(&self, record: &Map<String, Value>) -> Map<String, Value> {
        let mut out = Map::new();
        for (key, value) in record {
            if self.is_sentinel(value) {
                continue;
            }
            let cleaned = self.clean(value);
            if is_empty_container(&cleaned) {
                continue;
            }
            out.insert(key.clone(), cleaned);
        }
        out
    }
}

fn is_empty_container(value: &Value) -> bool {
    match value {
        Value::Object(m) => m.is_empty(),
        Value::Array(a) => a.is_empty(),
        _ => false,
    }
}
