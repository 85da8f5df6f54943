use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// The seven searchable text slots. Always serialized, empty when nothing
/// contributed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Fields {
    pub title: String,
    pub description: String,
    pub category: String,
    pub metadata: String,
    pub numeric_specs: String,
    pub brand: String,
    pub technical: String,
}

impl Fields {
    pub const KEYS: [&'static str; 7] = [
        "title",
        "description",
        "category",
        "metadata",
        "numeric_specs",
        "brand",
        "technical",
    ];

    /// Fallback lexical blob: title, description, category, numeric specs,
    /// metadata, technical, brand.
    pub fn fallback_text(&self) -> String {
        [
            &self.title,
            &self.description,
            &self.category,
            &self.numeric_specs,
            &self.metadata,
            &self.technical,
            &self.brand,
        ]
        .into_iter()
        .filter(|s| !s.is_empty())
        .map(String::as_str)
        .collect::<Vec<_>>()
        .join(". ")
    }
}

/// Typed facets for pre-filtering. Absent or unparseable values are `None`
/// (serialized as `null`), never zero.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Filters {
    pub level_4: Option<String>,
    pub manufacturer: Option<String>,
    pub preference_level: Option<String>,
    pub voltage: Option<f64>,
    pub poles: Option<i64>,
    pub current_rating: Option<f64>,
    pub temp_min: Option<i64>,
    pub temp_max: Option<i64>,
    pub conductors: Option<i64>,
    pub shielded: bool,
    pub sealed: bool,
    pub twisted_pair: bool,
    pub drain_wire: bool,
    pub rohs_compliant: bool,
}

impl Filters {
    pub const KEYS: [&'static str; 14] = [
        "level_4",
        "manufacturer",
        "preference_level",
        "voltage",
        "poles",
        "current_rating",
        "temp_min",
        "temp_max",
        "conductors",
        "shielded",
        "sealed",
        "twisted_pair",
        "drain_wire",
        "rohs_compliant",
    ];
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CanonicalRecord {
    pub id: Option<String>,
    pub manufacturer_part_no: Option<String>,
    pub alternate_part_numbers: Vec<String>,
    pub fields: Fields,
    pub filters: Filters,
    pub text: String,
    pub raw: Map<String, Value>,
}

impl CanonicalRecord {
    pub const KEYS: [&'static str; 7] = [
        "id",
        "manufacturer_part_no",
        "alternate_part_numbers",
        "fields",
        "filters",
        "text",
        "raw",
    ];
}
