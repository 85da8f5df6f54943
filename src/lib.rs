//! Normalizes component-catalog records (connectors, cables) into a fixed,
//! search-ready shape: seven text fields, typed filter facets, a fallback
//! text blob and the cleaned source record.

pub mod document;
pub mod error;
pub mod group;
pub mod normalize;
pub mod settings;
pub mod summary;

pub use error::{CatalogError, Result};
pub use normalize::aliases::{AliasTable, Attr};
pub use normalize::clean::SentinelSet;
pub use normalize::compose::{compose_fields, ComponentKind, CompositionStrategy};
pub use normalize::filters::extract_filters;
pub use normalize::record::{CanonicalRecord, Fields, Filters};
pub use normalize::resolved::{Resolved, TruthMatching};
pub use normalize::temperature::{parse_temperature_range, TemperatureRange};
pub use normalize::Normalizer;
