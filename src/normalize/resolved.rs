use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::aliases::{AliasTable, Attr};

pub const SHIELDED_TOKEN: &str = "Shielded";
pub const SEALED_TOKEN: &str = "Sealed";
pub const TWISTED_PAIR_TOKEN: &str = "YES";
pub const DRAIN_WIRE_TOKEN: &str = "YES";
/// Lowercase in the source schema, unlike the drain-wire token.
pub const ROHS_TOKEN: &str = "yes";

/// How a resolved value is compared with a truth token.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TruthMatching {
    /// Byte-exact, so "yes" never satisfies a "YES" token.
    Exact,
    #[default]
    IgnoreCase,
}

impl TruthMatching {
    pub fn matches(self, value: &str, token: &str) -> bool {
        match self {
            TruthMatching::Exact => value == token,
            TruthMatching::IgnoreCase => value.eq_ignore_ascii_case(token),
        }
    }
}

/// One cleaned record viewed through the alias table.
#[derive(Debug, Clone, Copy)]
pub struct Resolved<'a> {
    pub record: &'a Map<String, Value>,
    pub aliases: &'a AliasTable,
    pub truth: TruthMatching,
}

impl<'a> Resolved<'a> {
    pub fn new(record: &'a Map<String, Value>, aliases: &'a AliasTable, truth: TruthMatching) -> Self {
        Resolved { record, aliases, truth }
    }

    pub fn text(&self, attr: Attr) -> String {
        self.aliases.resolve_text(self.record, attr)
    }

    pub fn opt(&self, attr: Attr) -> Option<String> {
        self.aliases.resolve_opt(self.record, attr)
    }

    pub fn number(&self, attr: Attr) -> Option<f64> {
        self.aliases.resolve_f64(self.record, attr)
    }

    pub fn integer(&self, attr: Attr) -> Option<i64> {
        self.aliases.resolve_i64(self.record, attr)
    }

    pub fn is_true(&self, attr: Attr, token: &str) -> bool {
        self.opt(attr).is_some_and(|v| self.truth.matches(&v, token))
    }
}
