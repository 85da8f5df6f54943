use serde::Serialize;
use serde_json::{Map, Value};

const IDENTIFIER_KEYS: &[&str] = &[
    "id",
    "Manufacturer_Part_No",
    "Manufacturer_Part_Name",
    "Manufacturer_Part _No",
    "Manufacturer_Name",
];
const LEVEL_KEYS: &[&str] = &["level_1", "level_2", "level_3", "level_4"];
const PREFERENCE_KEYS: &[&str] = &["Final_Preference_Level"];

/// Sectioned view of a flattened component: fixed identifier, level and
/// preference slots (null when absent) plus every other populated key.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GroupedComponent {
    pub identifiers: Map<String, Value>,
    pub repository_levels: Map<String, Value>,
    pub preference: Map<String, Value>,
    pub mechanical_electrical_specs: Map<String, Value>,
}

pub fn group_component(record: &Map<String, Value>) -> GroupedComponent {
    let pick = |keys: &[&str]| -> Map<String, Value> {
        keys.iter()
            .map(|k| (k.to_string(), record.get(*k).cloned().unwrap_or(Value::Null)))
            .collect()
    };

    let specs = record
        .iter()
        .filter(|(k, _)| !is_grouped_key(k))
        .filter(|(_, v)| !is_blank(v))
        .map(|(k, v)| (k.clone(), v.clone()))
        .collect();

    GroupedComponent {
        identifiers: pick(IDENTIFIER_KEYS),
        repository_levels: pick(LEVEL_KEYS),
        preference: pick(PREFERENCE_KEYS),
        mechanical_electrical_specs: specs,
    }
}

fn is_grouped_key(key: &str) -> bool {
    IDENTIFIER_KEYS.contains(&key) || LEVEL_KEYS.contains(&key) || PREFERENCE_KEYS.contains(&key)
}

fn is_blank(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.is_empty() || s == "NaN",
        _ => false,
    }
}
