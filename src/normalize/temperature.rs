use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

// The first number must not start mid-number ("-40.5" must not yield 5).
static RANGE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(?:^|[^\d.])([-+]?\d+)\s*(?:°\s*)?(?:C\b)?\s*to\s*([-+]?\d+)(\.\d+)?").unwrap()
});

/// Operating range in degrees Celsius. No unit conversion is attempted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TemperatureRange {
    pub min: i64,
    pub max: i64,
}

impl fmt::Display for TemperatureRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}°C to {}°C", self.min, self.max)
    }
}

/// "-40 TO 80C" → (-40, 80). Empty, sentinel or otherwise unmatched text
/// yields `None`.
pub fn parse_temperature_range(text: &str) -> Option<TemperatureRange> {
    let caps = RANGE_RE.captures(text.trim())?;
    // Decimal bounds are not integer ranges.
    if caps.get(3).is_some() {
        return None;
    }
    let min = caps[1].parse::<i64>().ok()?;
    let max = caps[2].parse::<i64>().ok()?;
    Some(TemperatureRange { min, max })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pair(text: &str) -> Option<(i64, i64)> {
        parse_temperature_range(text).map(|r| (r.min, r.max))
    }

    #[test]
    fn upper_and_lower_separator() {
        assert_eq!(pair("-40 TO 80C"), Some((-40, 80)));
        assert_eq!(pair("-40 to 125"), Some((-40, 125)));
        assert_eq!(pair("-55 To +150 °C"), Some((-55, 150)));
    }

    #[test]
    fn unit_on_both_ends() {
        assert_eq!(pair("-40°C to 105°C"), Some((-40, 105)));
        assert_eq!(pair("-25C TO 85C"), Some((-25, 85)));
    }

    #[test]
    fn no_match_is_none() {
        assert_eq!(pair(""), None);
        assert_eq!(pair("Not Available"), None);
        assert_eq!(pair("up to 85C"), None);
        assert_eq!(pair("-40 / 85"), None);
    }

    #[test]
    fn decimal_bounds_are_rejected() {
        assert_eq!(pair("-40.5 to 85.5"), None);
        assert_eq!(pair("-40 to 85.5"), None);
        assert_eq!(pair("1.5 TO 3"), None);
    }

    #[test]
    fn range_inside_longer_text_keeps_sign() {
        assert_eq!(pair("Operating: -40 to 85 °C"), Some((-40, 85)));
        assert_eq!(pair("x-25 to 70"), Some((-25, 70)));
    }

    #[test]
    fn renders_celsius_range() {
        let r = parse_temperature_range("-40 to 85").unwrap();
        assert_eq!(r.to_string(), "-40°C to 85°C");
    }
}
