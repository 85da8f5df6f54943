use std::collections::HashMap;
use std::fmt;
use std::path::Path;
use std::str::FromStr;
use std::sync::LazyLock;

use itertools::Itertools;
use regex::Regex;
use serde_json::{Map, Value};

use super::clean::SentinelSet;
use crate::error::{CatalogError, Result};

static NUMERIC_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([-+]?\d+(?:\.\d+)?)\s*[A-Za-z°Ωµ%]*$").unwrap());

/// Declares [`Attr`] with `Attr::ALL` and `Attr::name` generated from one list.
macro_rules! attrs {
    ($($variant:ident => $name:literal,)+) => {
        /// Canonical concepts the normalizer understands. The source keys that
        /// may carry each one live in [`AliasTable`].
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub enum Attr {
            $($variant,)+
        }

        impl Attr {
            pub const ALL: &'static [Attr] = &[$(Attr::$variant,)+];

            /// Name used in alias override files and `aliases` output.
            pub fn name(self) -> &'static str {
                match self {
                    $(Attr::$variant => $name,)+
                }
            }
        }
    };
}

attrs! {
    Id => "id",
    PartNumber => "part_number",
    PartName => "part_name",
    Manufacturer => "manufacturer",
    Series => "series",
    PreferenceLevel => "preference_level",
    Level1 => "level_1",
    Level2 => "level_2",
    Level3 => "level_3",
    Level4 => "level_4",
    ConnectionType => "connection_type",
    Gender => "gender",
    Sealed => "sealed",
    IpRating => "ip_rating",
    Shielded => "shielded",
    ShieldType => "shield_type",
    TwistedPair => "twisted_pair",
    Conductors => "conductors",
    ConductorMaterial => "conductor_material",
    InsulationMaterial => "insulation_material",
    JacketMaterial => "jacket_material",
    JacketColor => "jacket_color",
    HousingMaterial => "housing_material",
    HousingColor => "housing_color",
    ContactMaterial => "contact_material",
    ContactFinish => "contact_finish",
    Material => "material",
    Color => "color",
    Mounting => "mounting",
    WireSize => "wire_size",
    Voltage => "voltage",
    TemperatureRange => "temperature_range",
    Poles => "poles",
    CurrentRating => "current_rating",
    OuterDiameter => "outer_diameter",
    Pitch => "pitch",
    DrainWire => "drain_wire",
    DrainWireSize => "drain_wire_size",
    Rohs => "rohs",
    Ul94 => "ul94",
    Weight => "weight",
    InsulationResistance => "insulation_resistance",
}

impl Attr {
    /// Source keys as they appear in the catalog export, typos included.
    fn default_aliases(self) -> &'static [&'static str] {
        match self {
            Attr::Id => &["id", "ID"],
            Attr::PartNumber => &["Manufacturer_Part_No", "Manufacturer_Part _No", "Manufacturer Part No"],
            Attr::PartName => &["Manufacturer_Part_Name", "Manufacturer_Part_Name ", "Manufacturer Part Name"],
            Attr::Manufacturer => &["Manufacturer_Name", "Manufacturer Name", "Manufacturer"],
            Attr::Series => &["Series", "Series_Name", "Product_Series"],
            Attr::PreferenceLevel => &["Final_Preference_Level", "Final Preference Level", "Preference_Level"],
            Attr::Level1 => &["level_1"],
            Attr::Level2 => &["level_2"],
            Attr::Level3 => &["level_3"],
            Attr::Level4 => &["level_4"],
            Attr::ConnectionType => &["Connection_Type", "Connection Type", "Connector_Type"],
            Attr::Gender => &["Gender", "Contact_Gender"],
            Attr::Sealed => &["Sealed_or_Unsealed", "Sealed_or_Unsealed ", "Sealed or Unsealed"],
            Attr::IpRating => &[
                "Degree_of_Protection_IP_rating",
                "Degree_of_Protection_IP_Rating",
                "Degree of Protection_IP rating",
                "IP_Rating",
            ],
            Attr::Shielded => &["Shielded_or_Unshielded", "Shielded or Unshielded", "Shielding"],
            Attr::ShieldType => &["Shield_Type", "Type_of_Shield", "Shield Type"],
            Attr::TwistedPair => &["Twisted_Pair", "Twisted Pair", "Twisted_Pair\n"],
            Attr::Conductors => &["Number_of_Conductors", "No_of_Conductors", "Number_of_Cores"],
            Attr::ConductorMaterial => &["Conductor_Material", "Conductor Material"],
            Attr::InsulationMaterial => &["Insulation_Material", "Insulation Material"],
            Attr::JacketMaterial => &["Jacket_Material", "Sheath_Material", "Outer_Jacket_Material"],
            Attr::JacketColor => &["Jacket_Color", "Jacket_Colour", "Sheath_Color"],
            Attr::HousingMaterial => &["Housing_Material", "Housing Material", "Body_Material"],
            Attr::HousingColor => &["Housing_Color", "Housing_Colour", "Color", "Colour"],
            Attr::ContactMaterial => &["Contact_Material", "Contact Material"],
            Attr::ContactFinish => &["Contact_Plating", "Contact_Finish", "Plating"],
            Attr::Material => &["Material", "Material "],
            Attr::Color => &["Color", "Colour"],
            Attr::Mounting => &["Mounting_Type", "Mounting Type", "Mounting_Style"],
            Attr::WireSize => &["Wire_Size_AWG", "Wire_Gauge_AWG", "Wire Size_AWG", "AWG"],
            Attr::Voltage => &["Rated_Voltage_in_V", "Rated Voltage_in_V", "Voltage_Rating_in_V"],
            Attr::TemperatureRange => &[
                "Operating_Temperature_Range",
                "Operating_Temperature_Range ",
                "Operating Temperature Range\n",
                "Operating_Temperature_Range_in_C",
            ],
            Attr::Poles => &["Number_of_Poles", "No_of_Poles", "Number of Poles", "Number_of_Positions"],
            Attr::CurrentRating => &["Current Rating_in_Amps", "Current_Rating_in_Amps"],
            Attr::OuterDiameter => &["Outer_Diameter_in_mm", "Outer Diameter_in_mm", "Cable_Outer_Diameter_in_mm"],
            Attr::Pitch => &["Pitch_in_mm", "Pitch in_mm", "Pitch"],
            Attr::DrainWire => &["Drain_Wire", "Drain Wire"],
            Attr::DrainWireSize => &["Drain_Wire_Size_AWG", "Drain Wire Size_AWG", "Drain_Wire_Gauge"],
            Attr::Rohs => &["ROHS_Compliant", "RoHS_Compliant", "ROHS Compliant", "ROHS"],
            Attr::Ul94 => &["UL94_Flammability_Rating", "UL94_Rating", "UL94"],
            Attr::Weight => &["Weight_in_g", "Weight_in_Grams", "Weight"],
            Attr::InsulationResistance => &[
                "Insulation_Resistance_in_MOhm",
                "Insulation Resistance_in_MOhm",
                "Insulation_Resistance",
            ],
        }
    }

}

impl fmt::Display for Attr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Attr {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self> {
        let wanted = s.trim();
        Attr::ALL
            .iter()
            .copied()
            .find(|a| a.name() == wanted)
            .ok_or_else(|| CatalogError::UnknownAttribute(s.to_string()))
    }
}

/// Logical attribute → ordered source keys. First present, non-sentinel
/// alias wins.
#[derive(Debug, Clone)]
pub struct AliasTable {
    aliases: HashMap<Attr, Vec<String>>,
    sentinels: SentinelSet,
}

impl Default for AliasTable {
    fn default() -> Self {
        Self::with_sentinels(SentinelSet::default())
    }
}

impl AliasTable {
    pub fn with_sentinels(sentinels: SentinelSet) -> Self {
        let aliases = Attr::ALL
            .iter()
            .map(|a| (*a, a.default_aliases().iter().map(|s| s.to_string()).collect()))
            .collect();
        AliasTable { aliases, sentinels }
    }

    pub fn sentinels(&self) -> &SentinelSet {
        &self.sentinels
    }

    pub fn aliases(&self, attr: Attr) -> &[String] {
        self.aliases.get(&attr).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Replace the alias list of each attribute named in `overrides`.
    pub fn apply_overrides(&mut self, overrides: HashMap<String, Vec<String>>) -> Result<()> {
        for (name, keys) in overrides {
            let attr: Attr = name.parse()?;
            self.aliases.insert(attr, keys);
        }
        Ok(())
    }

    /// Load overrides from a TOML or JSON file (`attr_name = ["Key", ...]`).
    pub fn load_overrides(&mut self, path: &Path) -> Result<()> {
        let overrides: HashMap<String, Vec<String>> = config::Config::builder()
            .add_source(config::File::from(path))
            .build()?
            .try_deserialize()?;
        tracing::debug!(path = %path.display(), attrs = overrides.len(), "loaded alias overrides");
        self.apply_overrides(overrides)
    }

    pub fn resolve<'r>(&self, record: &'r Map<String, Value>, attr: Attr) -> Option<&'r Value> {
        self.aliases(attr)
            .iter()
            .filter_map(|key| record.get(key))
            .find(|v| value_text(v, &self.sentinels).is_some())
    }

    /// Natural textual form of the attribute, or "" when absent.
    pub fn resolve_text(&self, record: &Map<String, Value>, attr: Attr) -> String {
        self.resolve(record, attr)
            .and_then(|v| value_text(v, &self.sentinels))
            .unwrap_or_default()
    }

    pub fn resolve_opt(&self, record: &Map<String, Value>, attr: Attr) -> Option<String> {
        self.resolve(record, attr).and_then(|v| value_text(v, &self.sentinels))
    }

    pub fn resolve_f64(&self, record: &Map<String, Value>, attr: Attr) -> Option<f64> {
        self.resolve(record, attr).and_then(coerce_f64)
    }

    pub fn resolve_i64(&self, record: &Map<String, Value>, attr: Attr) -> Option<i64> {
        self.resolve(record, attr).and_then(coerce_i64)
    }

    /// Every distinct textual value carried under any alias of `attr`, in
    /// alias order.
    pub fn all_values(&self, record: &Map<String, Value>, attr: Attr) -> Vec<String> {
        self.aliases(attr)
            .iter()
            .filter_map(|key| record.get(key))
            .filter_map(|v| value_text(v, &self.sentinels))
            .unique()
            .collect()
    }

    pub fn entries(&self) -> impl Iterator<Item = (Attr, &[String])> {
        Attr::ALL.iter().map(move |a| (*a, self.aliases(*a)))
    }
}

/// Text form of a scalar, or of a sequence of scalars joined with ", ".
/// Mappings, sentinels and blank strings have no text form.
pub fn value_text(value: &Value, sentinels: &SentinelSet) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => {
            let t = s.trim();
            if sentinels.is_sentinel_str(t) {
                None
            } else {
                Some(t.to_string())
            }
        }
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Array(items) => {
            let joined = items.iter().filter_map(|v| value_text(v, sentinels)).join(", ");
            if joined.is_empty() {
                None
            } else {
                Some(joined)
            }
        }
        Value::Object(_) => None,
    }
}

/// Numeric coercion. Accepts a JSON number, or a string holding a number
/// optionally followed by a unit ("250V", "3 A"). Anything else is `None`.
pub fn coerce_f64(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => parse_number(s),
        _ => None,
    }
}

pub fn coerce_i64(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64().or_else(|| n.as_f64().and_then(whole)),
        Value::String(s) => parse_number(s).and_then(whole),
        _ => None,
    }
}

pub fn parse_number(text: &str) -> Option<f64> {
    let caps = NUMERIC_RE.captures(text.trim())?;
    caps[1].parse::<f64>().ok().filter(|v| v.is_finite())
}

fn whole(v: f64) -> Option<i64> {
    if v.fract() == 0.0 && v.abs() < i64::MAX as f64 {
        Some(v as i64)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn rec(v: Value) -> Map<String, Value> {
        v.as_object().cloned().unwrap()
    }

    #[test]
    fn first_present_alias_wins() {
        let t = AliasTable::default();
        let r = rec(json!({ "Current_Rating_in_Amps": "5", "Current Rating_in_Amps": "3" }));
        assert_eq!(t.resolve_text(&r, Attr::CurrentRating), "3");

        let r = rec(json!({ "Current_Rating_in_Amps": "5" }));
        assert_eq!(t.resolve_text(&r, Attr::CurrentRating), "5");
    }

    #[test]
    fn skips_empty_and_sentinel_aliases() {
        let t = AliasTable::default();
        let r = rec(json!({
            "Manufacturer_Part_No": "Not Available",
            "Manufacturer_Part _No": "  AB-123 "
        }));
        assert_eq!(t.resolve_text(&r, Attr::PartNumber), "AB-123");

        let r = rec(json!({ "Manufacturer_Part_No": null, "Manufacturer Part No": "" }));
        assert_eq!(t.resolve_text(&r, Attr::PartNumber), "");
        assert!(t.resolve(&r, Attr::PartNumber).is_none());
    }

    #[test]
    fn keys_with_stray_whitespace_are_aliases() {
        let t = AliasTable::default();
        let r = rec(json!({ "Operating Temperature Range\n": "-40 to 85C" }));
        assert_eq!(t.resolve_text(&r, Attr::TemperatureRange), "-40 to 85C");
    }

    #[test]
    fn numbers_render_naturally() {
        let t = AliasTable::default();
        let r = rec(json!({ "Number_of_Poles": 4, "Weight_in_g": 1.25 }));
        assert_eq!(t.resolve_text(&r, Attr::Poles), "4");
        assert_eq!(t.resolve_text(&r, Attr::Weight), "1.25");
    }

    #[test]
    fn numeric_coercion_never_fails_loudly() {
        let t = AliasTable::default();
        let r = rec(json!({
            "Current_Rating_in_Amps": "abc",
            "Rated_Voltage_in_V": "250V",
            "Number_of_Poles": "4.0",
            "Number_of_Conductors": "2.5"
        }));
        assert_eq!(t.resolve_f64(&r, Attr::CurrentRating), None);
        assert_eq!(t.resolve_f64(&r, Attr::Voltage), Some(250.0));
        assert_eq!(t.resolve_i64(&r, Attr::Poles), Some(4));
        assert_eq!(t.resolve_i64(&r, Attr::Conductors), None);
    }

    #[test]
    fn parse_number_accepts_unit_suffix_only() {
        assert_eq!(parse_number("3 A"), Some(3.0));
        assert_eq!(parse_number("-0.5"), Some(-0.5));
        assert_eq!(parse_number("12-24"), None);
        assert_eq!(parse_number("approx 5"), None);
        assert_eq!(parse_number(""), None);
    }

    #[test]
    fn overrides_replace_only_named_attributes() {
        let mut t = AliasTable::default();
        let mut o = HashMap::new();
        o.insert("pitch".to_string(), vec!["Raster_mm".to_string()]);
        t.apply_overrides(o).unwrap();
        assert_eq!(t.aliases(Attr::Pitch), ["Raster_mm".to_string()]);
        assert_eq!(t.aliases(Attr::Level4), ["level_4".to_string()]);
    }

    #[test]
    fn override_with_unknown_attribute_is_rejected() {
        let mut t = AliasTable::default();
        let mut o = HashMap::new();
        o.insert("flux_capacitance".to_string(), vec!["x".to_string()]);
        assert!(matches!(
            t.apply_overrides(o),
            Err(CatalogError::UnknownAttribute(name)) if name == "flux_capacitance"
        ));
    }

    #[test]
    fn attr_names_round_trip() {
        for a in Attr::ALL {
            assert_eq!(a.name().parse::<Attr>().unwrap(), *a);
        }
        assert_eq!(Attr::CurrentRating.to_string(), "current_rating");
        assert_eq!(Attr::Level4.name(), "level_4");
        assert_eq!(" ul94 ".parse::<Attr>().unwrap(), Attr::Ul94);
    }

    #[test]
    fn attr_names_are_distinct() {
        let names: std::collections::HashSet<_> = Attr::ALL.iter().map(|a| a.name()).collect();
        assert_eq!(names.len(), Attr::ALL.len());
    }

    #[test]
    fn all_values_collects_distinct_spellings() {
        let t = AliasTable::default();
        let r = rec(json!({
            "Manufacturer_Part_No": "A-1",
            "Manufacturer_Part _No": "A-2",
            "Manufacturer Part No": "A-1"
        }));
        assert_eq!(t.all_values(&r, Attr::PartNumber), vec!["A-1", "A-2"]);
    }
}
