//! Canonicalization of heterogeneous API response shapes.
//!
//! Any list or single-entity endpoint may answer with the bare value or with
//! an envelope object wrapping it under a `data` key. Every response passes
//! through [`normalize_list`] or [`normalize_single`] before it reaches a
//! page, so no call site ever branches on the wire shape.

use serde::Deserialize;
use serde::de::DeserializeOwned;

/// A response payload that is either enveloped under `data` or bare.
///
/// Variant order matters: serde tries `Wrapped` first, so an object carrying
/// a `data` key is always unwrapped even when the bare shape would also
/// deserialize.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum Envelope<T> {
    Wrapped { data: T },
    Bare(T),
}

impl<T> Envelope<T> {
    /// Extracts the payload regardless of wrapping.
    pub fn into_inner(self) -> T {
        match self {
            Envelope::Wrapped { data } => data,
            Envelope::Bare(value) => value,
        }
    }
}

/// Normalizes a raw JSON payload into a list of entities.
///
/// `null`, absent, or malformed payloads degrade to an empty list rather
/// than an error; the catalog pages render an empty state instead of
/// failing.
pub fn normalize_list<T: DeserializeOwned>(raw: serde_json::Value) -> Vec<T> {
    if raw.is_null() {
        return Vec::new();
    }
    match serde_json::from_value::<Envelope<Vec<T>>>(raw) {
        Ok(envelope) => envelope.into_inner(),
        Err(_) => Vec::new(),
    }
}

/// Normalizes a raw JSON payload into a single entity.
///
/// `null`, absent, or malformed payloads degrade to `None`.
pub fn normalize_single<T: DeserializeOwned>(raw: serde_json::Value) -> Option<T> {
    if raw.is_null() {
        return None;
    }
    serde_json::from_value::<Envelope<T>>(raw)
        .ok()
        .map(Envelope::into_inner)
}
