use std::fs;
use std::path::Path;

use serde::Serialize;
use serde_json::{Map, Value};
use tracing::info;

use crate::error::{CatalogError, Result};

pub type RawRecord = Map<String, Value>;

/// Read a JSON document that must be an array of mappings.
pub fn load_records(path: &Path) -> Result<Vec<RawRecord>> {
    let text = fs::read_to_string(path).map_err(|source| CatalogError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let value: Value = serde_json::from_str(&text).map_err(|source| CatalogError::Json {
        path: path.to_path_buf(),
        source,
    })?;
    let records = records_from_value(value)?;
    info!(path = %path.display(), records = records.len(), "loaded catalog");
    Ok(records)
}

/// No partial recovery: the first non-mapping element fails the document.
pub fn records_from_value(value: Value) -> Result<Vec<RawRecord>> {
    let items = match value {
        Value::Array(items) => items,
        other => return Err(CatalogError::NotAnArray { found: kind_name(&other) }),
    };
    items
        .into_iter()
        .enumerate()
        .map(|(index, item)| match item {
            Value::Object(map) => Ok(map),
            other => Err(CatalogError::NotARecord {
                index,
                found: kind_name(&other),
            }),
        })
        .collect()
}

/// Pretty-print `data` as JSON to `path`, creating parent directories.
pub fn save_json<T: Serialize + ?Sized>(path: &Path, data: &T) -> Result<()> {
    let io_err = |source| CatalogError::Io {
        path: path.to_path_buf(),
        source,
    };
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(io_err)?;
    }
    let text = serde_json::to_string_pretty(data).map_err(|source| CatalogError::Json {
        path: path.to_path_buf(),
        source,
    })?;
    fs::write(path, text).map_err(io_err)?;
    info!(path = %path.display(), "wrote output");
    Ok(())
}

fn kind_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
