use itertools::Itertools;

use super::aliases::{parse_number, Attr};
use super::record::Fields;
use super::resolved::{Resolved, DRAIN_WIRE_TOKEN, SEALED_TOKEN, SHIELDED_TOKEN, TWISTED_PAIR_TOKEN};
use super::temperature::parse_temperature_range;

/// Component family selected from the fourth category level. Cables and
/// connectors expose disjoint attribute sets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ComponentKind {
    Cable,
    Connector,
    Other,
}

impl ComponentKind {
    pub fn from_level_4(level_4: &str) -> Self {
        let lower = level_4.to_lowercase();
        if lower.contains("connector") {
            ComponentKind::Connector
        } else if lower.contains("cable") || lower.contains("wire") {
            ComponentKind::Cable
        } else {
            ComponentKind::Other
        }
    }

    pub fn strategy(self) -> &'static dyn CompositionStrategy {
        match self {
            ComponentKind::Cable => &CableStrategy,
            ComponentKind::Connector => &ConnectorStrategy,
            ComponentKind::Other => &GenericStrategy,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ComponentKind::Cable => "cable",
            ComponentKind::Connector => "connector",
            ComponentKind::Other => "other",
        }
    }
}

/// Category-specific parts of composition: the description clauses and the
/// qualitative attributes that go into `metadata`.
pub trait CompositionStrategy: Send + Sync {
    fn kind(&self) -> ComponentKind;
    fn description_clauses(&self, r: &Resolved) -> Vec<String>;
    fn metadata_attrs(&self) -> &'static [(&'static str, Attr)];
}

pub struct ConnectorStrategy;
pub struct CableStrategy;
pub struct GenericStrategy;

impl CompositionStrategy for ConnectorStrategy {
    fn kind(&self) -> ComponentKind {
        ComponentKind::Connector
    }

    fn description_clauses(&self, r: &Resolved) -> Vec<String> {
        let mut clauses = Vec::new();
        if let Some(ct) = r.opt(Attr::ConnectionType) {
            clauses.push(format!("{} connector", ct));
        }
        if let Some(poles) = r.integer(Attr::Poles) {
            clauses.push(format!("{}-pole", poles));
        }
        if r.is_true(Attr::Sealed, SEALED_TOKEN) {
            match r.opt(Attr::IpRating) {
                Some(ip) => clauses.push(format!("sealed ({})", ip)),
                None => clauses.push("sealed".to_string()),
            }
        }
        clauses
    }

    fn metadata_attrs(&self) -> &'static [(&'static str, Attr)] {
        &[
            ("Housing Material", Attr::HousingMaterial),
            ("Color", Attr::HousingColor),
            ("Contact Material", Attr::ContactMaterial),
            ("Contact Finish", Attr::ContactFinish),
            ("Gender", Attr::Gender),
            ("Mounting", Attr::Mounting),
        ]
    }
}

impl CompositionStrategy for CableStrategy {
    fn kind(&self) -> ComponentKind {
        ComponentKind::Cable
    }

    fn description_clauses(&self, r: &Resolved) -> Vec<String> {
        let mut clauses = Vec::new();
        if let Some(n) = r.integer(Attr::Conductors) {
            clauses.push(format!("{}-conductor cable", n));
        }
        if let Some(awg) = r.opt(Attr::WireSize).filter(|v| parse_number(v).is_some()) {
            clauses.push(with_unit(&awg, " AWG"));
        }
        if r.is_true(Attr::Shielded, SHIELDED_TOKEN) {
            match r.opt(Attr::ShieldType) {
                Some(st) => clauses.push(format!("shielded ({})", st)),
                None => clauses.push("shielded".to_string()),
            }
        }
        if r.is_true(Attr::TwistedPair, TWISTED_PAIR_TOKEN) {
            clauses.push("twisted pair".to_string());
        }
        if let Some(jacket) = r.opt(Attr::JacketMaterial) {
            clauses.push(format!("{} jacket", jacket));
        }
        clauses
    }

    fn metadata_attrs(&self) -> &'static [(&'static str, Attr)] {
        &[
            ("Conductor Material", Attr::ConductorMaterial),
            ("Insulation Material", Attr::InsulationMaterial),
            ("Jacket Material", Attr::JacketMaterial),
            ("Jacket Color", Attr::JacketColor),
        ]
    }
}

impl CompositionStrategy for GenericStrategy {
    fn kind(&self) -> ComponentKind {
        ComponentKind::Other
    }

    fn description_clauses(&self, _r: &Resolved) -> Vec<String> {
        Vec::new()
    }

    fn metadata_attrs(&self) -> &'static [(&'static str, Attr)] {
        &[
            ("Material", Attr::Material),
            ("Color", Attr::Color),
            ("Mounting", Attr::Mounting),
        ]
    }
}

const NUMERIC_SPECS: &[(&str, Attr, &str)] = &[
    ("Wire Size", Attr::WireSize, " AWG"),
    ("Voltage", Attr::Voltage, "V"),
    ("Temperature Range", Attr::TemperatureRange, ""),
    ("Poles", Attr::Poles, ""),
    ("Current Rating", Attr::CurrentRating, "A"),
    ("Outer Diameter", Attr::OuterDiameter, "mm"),
    ("Pitch", Attr::Pitch, "mm"),
];

const BRAND: &[(&str, Attr)] = &[
    ("Manufacturer", Attr::Manufacturer),
    ("Series", Attr::Series),
    ("Preference Level", Attr::PreferenceLevel),
];

const TECHNICAL: &[(&str, Attr, &str)] = &[
    ("IP Rating", Attr::IpRating, ""),
    ("ROHS", Attr::Rohs, ""),
    ("UL94", Attr::Ul94, ""),
    ("Weight", Attr::Weight, "g"),
    ("Insulation Resistance", Attr::InsulationResistance, "MΩ"),
];

const LEVELS: [Attr; 4] = [Attr::Level1, Attr::Level2, Attr::Level3, Attr::Level4];

/// Build all seven fields. Clause order inside each field follows the
/// declaration order of its attribute list.
pub fn compose_fields(r: &Resolved, kind: ComponentKind) -> Fields {
    let strategy = kind.strategy();
    let part_name = r.text(Attr::PartName);
    let title = compose_title(r);

    let clauses = strategy.description_clauses(r);
    let description = if clauses.is_empty() {
        part_name
    } else {
        clauses.join(", ")
    };

    Fields {
        title,
        description,
        category: compose_category(r),
        metadata: labeled(r, strategy.metadata_attrs()),
        numeric_specs: compose_numeric_specs(r),
        brand: labeled(r, BRAND),
        technical: compose_technical(r),
    }
}

pub fn compose_title(r: &Resolved) -> String {
    [Attr::Manufacturer, Attr::PartNumber, Attr::PartName]
        .into_iter()
        .filter_map(|a| r.opt(a))
        .join(" ")
}

pub fn compose_category(r: &Resolved) -> String {
    LEVELS.into_iter().filter_map(|a| r.opt(a)).join(" > ")
}

fn compose_numeric_specs(r: &Resolved) -> String {
    NUMERIC_SPECS
        .iter()
        .filter_map(|(label, attr, unit)| {
            let value = r.opt(*attr)?;
            // Text that does not read as a quantity is left out entirely.
            let rendered = if *attr == Attr::TemperatureRange {
                parse_temperature_range(&value)?.to_string()
            } else {
                parse_number(&value)?;
                with_unit(&value, unit)
            };
            Some(format!("{}: {}", label, rendered))
        })
        .join(", ")
}

fn compose_technical(r: &Resolved) -> String {
    let mut parts = Vec::new();
    if let Some(drain) = r.opt(Attr::DrainWire) {
        let size = r
            .opt(Attr::DrainWireSize)
            .filter(|_| r.is_true(Attr::DrainWire, DRAIN_WIRE_TOKEN));
        match size {
            Some(s) => parts.push(format!("Drain Wire: {} ({})", drain, with_unit(&s, " AWG"))),
            None => parts.push(format!("Drain Wire: {}", drain)),
        }
    }
    parts.extend(
        TECHNICAL
            .iter()
            .filter_map(|(label, attr, unit)| r.opt(*attr).map(|v| format!("{}: {}", label, with_unit(&v, unit)))),
    );
    parts.join(", ")
}

fn labeled(r: &Resolved, attrs: &[(&str, Attr)]) -> String {
    attrs
        .iter()
        .filter_map(|(label, attr)| r.opt(*attr).map(|v| format!("{}: {}", label, v)))
        .join(", ")
}

/// Append `unit` only when the value is a bare number, so "250V" stays as is.
fn with_unit(value: &str, unit: &str) -> String {
    if !unit.is_empty() && value.trim().parse::<f64>().is_ok_and(f64::is_finite) {
        format!("{}{}", value.trim(), unit)
    } else {
        value.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::normalize::aliases::AliasTable;
    use crate::normalize::resolved::TruthMatching;
    use serde_json::{json, Map, Value};

    fn fields(v: Value) -> Fields {
        let table = AliasTable::default();
        let rec: Map<String, Value> = v.as_object().cloned().unwrap();
        let r = Resolved::new(&rec, &table, TruthMatching::IgnoreCase);
        let kind = ComponentKind::from_level_4(&r.text(Attr::Level4));
        compose_fields(&r, kind)
    }

    #[test]
    fn kind_from_level_4() {
        assert_eq!(ComponentKind::from_level_4("Connectors"), ComponentKind::Connector);
        assert_eq!(ComponentKind::from_level_4("Cables"), ComponentKind::Cable);
        assert_eq!(ComponentKind::from_level_4("Wires"), ComponentKind::Cable);
        assert_eq!(ComponentKind::from_level_4("Cable Connectors"), ComponentKind::Connector);
        assert_eq!(ComponentKind::from_level_4(""), ComponentKind::Other);
        assert_eq!(ComponentKind::Cable.strategy().kind(), ComponentKind::Cable);
    }

    #[test]
    fn sealed_connector_description() {
        let f = fields(json!({
            "level_4": "Connectors",
            "Connection_Type": "Plug",
            "Sealed_or_Unsealed": "Sealed",
            "Degree_of_Protection_IP_rating": "IP67"
        }));
        assert_eq!(f.description, "Plug connector, sealed (IP67)");
        assert!(f.description.contains("sealed (IP67)"));
        assert_eq!(f.technical, "IP Rating: IP67");
    }

    #[test]
    fn unsealed_connector_has_no_sealed_clause() {
        let f = fields(json!({
            "level_4": "Connectors",
            "Connection_Type": "Receptacle",
            "Sealed_or_Unsealed": "Unsealed",
            "Number_of_Poles": 6
        }));
        assert_eq!(f.description, "Receptacle connector, 6-pole");
    }

    #[test]
    fn shielded_cable_embeds_shield_type() {
        let f = fields(json!({
            "level_4": "Cables",
            "Number_of_Conductors": "4",
            "Wire_Size_AWG": "22",
            "Shielded_or_Unshielded": "Shielded",
            "Shield_Type": "Foil",
            "Twisted_Pair": "YES",
            "Jacket_Material": "PVC",
            "Jacket_Color": "Black"
        }));
        assert_eq!(
            f.description,
            "4-conductor cable, 22 AWG, shielded (Foil), twisted pair, PVC jacket"
        );
        assert_eq!(f.metadata, "Jacket Material: PVC, Jacket Color: Black");
    }

    #[test]
    fn non_numeric_counts_leave_no_clause() {
        let f = fields(json!({
            "level_4": "Connectors",
            "Connection_Type": "Plug",
            "Number_of_Poles": "abc"
        }));
        assert_eq!(f.description, "Plug connector");

        let f = fields(json!({
            "level_4": "Cables",
            "Number_of_Conductors": "TBD",
            "Wire_Size_AWG": "varies",
            "Jacket_Material": "PVC"
        }));
        assert_eq!(f.description, "PVC jacket");
    }

    #[test]
    fn whole_float_pole_count_renders_as_integer() {
        let f = fields(json!({ "level_4": "Connectors", "Number_of_Poles": "4.0" }));
        assert_eq!(f.description, "4-pole");
    }

    #[test]
    fn description_falls_back_to_part_name() {
        let f = fields(json!({
            "level_4": "Connectors",
            "Manufacturer_Part_Name": "Header assembly"
        }));
        assert_eq!(f.description, "Header assembly");
    }

    #[test]
    fn title_and_category_skip_empty_segments() {
        let f = fields(json!({
            "Manufacturer_Name": "Molex",
            "Manufacturer_Part _No": "43025-0400",
            "level_1": "Electrical",
            "level_3": "Interconnect",
            "level_4": "Connectors"
        }));
        assert_eq!(f.title, "Molex 43025-0400");
        assert_eq!(f.category, "Electrical > Interconnect > Connectors");
    }

    #[test]
    fn numeric_specs_in_declaration_order_with_units() {
        let f = fields(json!({
            "level_4": "Connectors",
            "Pitch_in_mm": 3.0,
            "Current_Rating_in_Amps": "5",
            "Rated_Voltage_in_V": "250V",
            "Operating_Temperature_Range": "-40 TO 105C",
            "Number_of_Poles": "4"
        }));
        assert_eq!(
            f.numeric_specs,
            "Voltage: 250V, Temperature Range: -40°C to 105°C, Poles: 4, Current Rating: 5A, Pitch: 3.0mm"
        );
    }

    #[test]
    fn unparseable_quantities_are_omitted() {
        let f = fields(json!({
            "Operating_Temperature_Range": "ambient",
            "Current_Rating_in_Amps": "abc",
            "Outer_Diameter_in_mm": "6.1"
        }));
        assert_eq!(f.numeric_specs, "Outer Diameter: 6.1mm");
    }

    #[test]
    fn technical_drain_wire_with_size() {
        let f = fields(json!({
            "level_4": "Cables",
            "Drain_Wire": "YES",
            "Drain_Wire_Size_AWG": "24",
            "ROHS_Compliant": "yes",
            "Weight_in_g": 40
        }));
        assert_eq!(f.technical, "Drain Wire: YES (24 AWG), ROHS: yes, Weight: 40g");
    }

    #[test]
    fn drain_wire_size_ignored_without_drain_wire() {
        let f = fields(json!({ "Drain_Wire": "NO", "Drain_Wire_Size_AWG": "24" }));
        assert_eq!(f.technical, "Drain Wire: NO");
    }

    #[test]
    fn brand_fields() {
        let f = fields(json!({
            "Manufacturer_Name": "TE",
            "Series": "DT",
            "Final_Preference_Level": "Preferred"
        }));
        assert_eq!(f.brand, "Manufacturer: TE, Series: DT, Preference Level: Preferred");
    }

    #[test]
    fn empty_record_gives_empty_fields() {
        assert_eq!(fields(json!({})), Fields::default());
    }
}
