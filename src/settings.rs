use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::info;

use crate::error::Result;
use crate::normalize::aliases::AliasTable;
use crate::normalize::clean::{SentinelSet, DEFAULT_SENTINELS};
use crate::normalize::resolved::TruthMatching;
use crate::normalize::Normalizer;

pub const DEFAULT_SETTINGS_FILE: &str = "catalog.toml";
pub const ENV_PREFIX: &str = "CATALOG";

/// Run settings: built-in defaults, then `catalog.toml`, then `CATALOG_*`
/// environment variables. CLI flags are applied on top by the binary.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub input: PathBuf,
    pub output: PathBuf,
    pub grouped_output: PathBuf,
    pub alias_file: Option<PathBuf>,
    pub sentinels: Vec<String>,
    pub truth_matching: TruthMatching,
    pub flatten: bool,
    pub chunk_size: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            input: PathBuf::from("data/catalog.json"),
            output: PathBuf::from("data/normalized.json"),
            grouped_output: PathBuf::from("data/grouped.json"),
            alias_file: None,
            sentinels: DEFAULT_SENTINELS.iter().map(|s| s.to_string()).collect(),
            truth_matching: TruthMatching::default(),
            flatten: false,
            chunk_size: 500,
        }
    }
}

impl Settings {
    /// `file` is required when given explicitly; the default file is optional.
    pub fn load(file: Option<&Path>) -> Result<Self> {
        let source = match file {
            Some(path) => config::File::from(path).required(true),
            None => config::File::with_name(DEFAULT_SETTINGS_FILE).required(false),
        };
        let settings: Settings = config::Config::builder()
            .add_source(source)
            .add_source(config::Environment::with_prefix(ENV_PREFIX).try_parsing(true))
            .build()?
            .try_deserialize()?;
        info!(settings = ?settings, "settings loaded");
        Ok(settings)
    }

    pub fn alias_table(&self) -> Result<AliasTable> {
        let mut table = AliasTable::with_sentinels(SentinelSet::new(self.sentinels.iter().cloned()));
        if let Some(path) = &self.alias_file {
            table.load_overrides(path)?;
        }
        Ok(table)
    }

    pub fn normalizer(&self) -> Result<Normalizer> {
        Ok(Normalizer::new(self.alias_table()?, self.truth_matching).with_flatten(self.flatten))
    }
}
