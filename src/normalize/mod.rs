pub mod aliases;
pub mod clean;
pub mod compose;
pub mod filters;
pub mod flatten;
pub mod record;
pub mod resolved;
pub mod temperature;

use serde_json::{Map, Value};
use tracing::{debug, warn};

use aliases::{AliasTable, Attr};
use compose::{compose_fields, ComponentKind};
use filters::extract_filters;
use record::CanonicalRecord;
use resolved::{Resolved, TruthMatching};

#[cfg(feature = "rayon")]
use rayon::prelude::*;

/// Raw record → cleaned record → canonical record.
#[derive(Debug, Clone, Default)]
pub struct Normalizer {
    aliases: AliasTable,
    truth: TruthMatching,
    flatten: bool,
}

impl Normalizer {
    pub fn new(aliases: AliasTable, truth: TruthMatching) -> Self {
        Normalizer {
            aliases,
            truth,
            flatten: false,
        }
    }

    /// Lift nested mappings to the top level before assembly.
    pub fn with_flatten(mut self, flatten: bool) -> Self {
        self.flatten = flatten;
        self
    }

    pub fn aliases(&self) -> &AliasTable {
        &self.aliases
    }

    /// Sentinel cleaning, then optional flattening. The result is what
    /// [`Normalizer::assemble`] keeps as `raw`.
    pub fn prepare(&self, raw: &Map<String, Value>) -> Map<String, Value> {
        let cleaned = self.aliases.sentinels().clean_record(raw);
        if self.flatten {
            flatten::flatten(&cleaned)
        } else {
            cleaned
        }
    }

    pub fn kind_of(&self, cleaned: &Map<String, Value>) -> ComponentKind {
        ComponentKind::from_level_4(&self.aliases.resolve_text(cleaned, Attr::Level4))
    }

    /// False when the description had to fall back to the part name.
    pub fn has_description_clauses(&self, cleaned: &Map<String, Value>) -> bool {
        let r = Resolved::new(cleaned, &self.aliases, self.truth);
        !self.kind_of(cleaned).strategy().description_clauses(&r).is_empty()
    }

    /// Pure composition over an already cleaned record.
    pub fn assemble(&self, cleaned: &Map<String, Value>) -> CanonicalRecord {
        let r = Resolved::new(cleaned, &self.aliases, self.truth);
        let id = r.opt(Attr::Id);
        let part_no = r.opt(Attr::PartNumber);
        let alternate_part_numbers: Vec<String> = self
            .aliases
            .all_values(cleaned, Attr::PartNumber)
            .into_iter()
            .filter(|p| Some(p) != part_no.as_ref())
            .collect();
        if !alternate_part_numbers.is_empty() {
            warn!(
                id = id.as_deref().unwrap_or("-"),
                part_no = part_no.as_deref().unwrap_or("-"),
                alternates = ?alternate_part_numbers,
                "conflicting part numbers across alias keys"
            );
        }

        let level_4 = r.text(Attr::Level4);
        if level_4.is_empty() {
            warn!(id = id.as_deref().unwrap_or("-"), "record has no level_4, using generic composition");
        }
        let kind = ComponentKind::from_level_4(&level_4);
        debug!(id = id.as_deref().unwrap_or("-"), kind = kind.as_str(), "assembling record");

        let fields = compose_fields(&r, kind);
        let filters = extract_filters(&r);
        let text = fields.fallback_text();

        CanonicalRecord {
            id,
            manufacturer_part_no: part_no,
            alternate_part_numbers,
            fields,
            filters,
            text,
            raw: cleaned.clone(),
        }
    }

    pub fn normalize(&self, raw: &Map<String, Value>) -> CanonicalRecord {
        self.assemble(&self.prepare(raw))
    }

    /// Records are independent; output order matches input order.
    #[cfg(feature = "rayon")]
    pub fn normalize_all(&self, records: &[Map<String, Value>]) -> Vec<CanonicalRecord> {
        records.par_iter().map(|r| self.normalize(r)).collect()
    }

    #[cfg(not(feature = "rayon"))]
    pub fn normalize_all(&self, records: &[Map<String, Value>]) -> Vec<CanonicalRecord> {
        records.iter().map(|r| self.normalize(r)).collect()
    }
}
