use std::collections::BTreeMap;
use std::time::{SystemTime, UNIX_EPOCH};

use tracing::info;

use crate::normalize::compose::ComponentKind;
use crate::normalize::record::CanonicalRecord;
use crate::normalize::Normalizer;

/// Per-run counters, logged once the batch is done.
#[derive(Debug, Default, Clone)]
pub struct RunSummary {
    run_id: String,
    records: usize,
    by_kind: BTreeMap<&'static str, usize>,
    fallback_descriptions: usize,
    with_temperature: usize,
    conflicting_part_numbers: usize,
}

impl RunSummary {
    pub fn new(run_id: String) -> Self {
        RunSummary {
            run_id,
            ..Default::default()
        }
    }

    pub fn record(&mut self, normalizer: &Normalizer, out: &CanonicalRecord) {
        self.records += 1;
        let kind = normalizer.kind_of(&out.raw);
        *self.by_kind.entry(kind.as_str()).or_default() += 1;
        if !normalizer.has_description_clauses(&out.raw) {
            self.fallback_descriptions += 1;
        }
        if out.filters.temp_min.is_some() {
            self.with_temperature += 1;
        }
        if !out.alternate_part_numbers.is_empty() {
            self.conflicting_part_numbers += 1;
        }
    }

    pub fn records(&self) -> usize {
        self.records
    }

    pub fn count(&self, kind: ComponentKind) -> usize {
        self.by_kind.get(kind.as_str()).copied().unwrap_or(0)
    }

    pub fn fallback_descriptions(&self) -> usize {
        self.fallback_descriptions
    }

    pub fn log(&self) {
        info!(
            run_id = %self.run_id,
            records = self.records,
            by_kind = ?self.by_kind,
            fallback_descriptions = self.fallback_descriptions,
            with_temperature = self.with_temperature,
            conflicting_part_numbers = self.conflicting_part_numbers,
            "normalization finished"
        );
    }

    pub fn print(&self) {
        println!("Normalized {} records ({}).", self.records, self.run_id);
        for (kind, n) in &self.by_kind {
            println!("  {:<10} {}", kind, n);
        }
        println!("  description fallback: {}", self.fallback_descriptions);
        println!("  temperature parsed:   {}", self.with_temperature);
        println!("  part-number conflicts: {}", self.conflicting_part_numbers);
    }
}

pub fn new_run_id() -> String {
    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs();
    format!("run-{}", now)
}
