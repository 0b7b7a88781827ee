//! Data resolver.
//!
//! Maps a free-text query to a [`Record`] from the static catalog. Everything
//! here is pure: no I/O, no clocks, no shared state.

pub mod catalog;

use crate::error::FlowError;
use ab_protocol::Record;
use catalog::CATALOG;

/// Lookup form of a query: trimmed, lowercased, whitespace runs joined by `_`.
///
/// `"  New   York "` becomes `"new_york"`.
pub fn normalize_query(query: &str) -> String {
    query
        .split_whitespace()
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join("_")
}

/// Display keys of every catalog entry, in catalog order.
pub fn known_keys() -> Vec<&'static str> {
    CATALOG.iter().map(|entry| entry.key).collect()
}

/// Resolve `query` against the catalog.
///
/// # Errors
///
/// Returns [`FlowError::QueryNotFound`] when the normalized query matches no
/// entry. The error message lists every known key.
pub fn resolve(query: &str) -> Result<Record, FlowError> {
    let wanted = normalize_query(query);

    CATALOG
        .iter()
        .find(|entry| normalize_query(entry.key) == wanted)
        .map(catalog::CatalogEntry::to_record)
        .ok_or_else(|| FlowError::QueryNotFound {
            query: query.trim().to_string(),
            known: known_keys().join(", "),
        })
}

/// Round `measurement` to the nearest integer. Idempotent.
pub fn normalize(record: &Record) -> Record {
    Record {
        measurement: record.measurement.round(),
        ..record.clone()
    }
}
