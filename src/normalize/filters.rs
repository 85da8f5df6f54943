use super::aliases::Attr;
use super::record::Filters;
use super::resolved::{Resolved, DRAIN_WIRE_TOKEN, ROHS_TOKEN, SEALED_TOKEN, SHIELDED_TOKEN, TWISTED_PAIR_TOKEN};
use super::temperature::parse_temperature_range;

pub fn extract_filters(r: &Resolved) -> Filters {
    let temp = r
        .opt(Attr::TemperatureRange)
        .and_then(|t| parse_temperature_range(&t));

    Filters {
        level_4: r.opt(Attr::Level4),
        manufacturer: r.opt(Attr::Manufacturer),
        preference_level: r.opt(Attr::PreferenceLevel),
        voltage: r.number(Attr::Voltage),
        poles: r.integer(Attr::Poles),
        current_rating: r.number(Attr::CurrentRating),
        temp_min: temp.map(|t| t.min),
        temp_max: temp.map(|t| t.max),
        conductors: r.integer(Attr::Conductors),
        shielded: r.is_true(Attr::Shielded, SHIELDED_TOKEN),
        sealed: r.is_true(Attr::Sealed, SEALED_TOKEN),
        twisted_pair: r.is_true(Attr::TwistedPair, TWISTED_PAIR_TOKEN),
        drain_wire: r.is_true(Attr::DrainWire, DRAIN_WIRE_TOKEN),
        rohs_compliant: r.is_true(Attr::Rohs, ROHS_TOKEN),
    }
}
