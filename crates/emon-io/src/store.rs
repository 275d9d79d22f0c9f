//! Read-only document store abstraction.
//!
//! The dashboard only ever reads single documents addressed by collection
//! and document id. Backends return the document as plain JSON, already
//! stripped of any wire encoding, or `None` when it does not exist.

use std::collections::HashMap;

use emon_core::{
    Country, EmonError, EmonResult, GenerationDocument, SummaryDocument,
};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::debug;

/// A collection/document keyed store.
pub trait DocumentStore: Send + Sync {
    /// Short backend name for diagnostics.
    fn name(&self) -> &str;

    /// Fetch one document, `Ok(None)` when it does not exist.
    fn get_document(&self, collection: &str, document: &str) -> EmonResult<Option<Value>>;
}

/// Reject collection or document ids that are empty or contain path separators.
pub fn validate_id(segment: &str) -> EmonResult<()> {
    let bad = segment.is_empty()
        || segment == "."
        || segment == ".."
        || segment.contains(['/', '\\', '\0']);
    if bad {
        return Err(EmonError::Validation(format!(
            "invalid collection or document id: '{segment}'"
        )));
    }
    Ok(())
}

/// Fetch a document and deserialize it into `T`.
pub fn get_typed<T, S>(store: &S, collection: &str, document: &str) -> EmonResult<Option<T>>
where
    T: DeserializeOwned,
    S: DocumentStore + ?Sized,
{
    let Some(raw) = store.get_document(collection, document)? else {
        debug!(store = store.name(), collection, document, "document not found");
        return Ok(None);
    };
    serde_json::from_value(raw)
        .map(Some)
        .map_err(|e| EmonError::Parse(format!("{collection}/{document}: {e}")))
}

/// Where the dashboard documents live.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Collections {
    pub summary_collection: String,
    pub summary_document: String,
    /// Generation collections are `{prefix}{country}`
    pub generation_prefix: String,
}

impl Default for Collections {
    fn default() -> Self {
        Self {
            summary_collection: "simulation_results".to_string(),
            summary_document: "latest_italy".to_string(),
            generation_prefix: "daily_generation_".to_string(),
        }
    }
}

impl Collections {
    pub fn generation_collection(&self, country: Country) -> String {
        format!("{}{}", self.generation_prefix, country.slug())
    }

    pub fn fetch_summary<S>(&self, store: &S) -> EmonResult<Option<SummaryDocument>>
    where
        S: DocumentStore + ?Sized,
    {
        get_typed(store, &self.summary_collection, &self.summary_document)
    }

    pub fn fetch_generation<S>(
        &self,
        store: &S,
        country: Country,
        date_id: &str,
    ) -> EmonResult<Option<GenerationDocument>>
    where
        S: DocumentStore + ?Sized,
    {
        get_typed(store, &self.generation_collection(country), date_id)
    }
}

/// In-memory store, for fixtures and tests.
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    documents: HashMap<(String, String), Value>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, collection: &str, document: &str, value: Value) {
        self.documents
            .insert((collection.to_string(), document.to_string()), value);
    }

    pub fn with_document(mut self, collection: &str, document: &str, value: Value) -> Self {
        self.insert(collection, document, value);
        self
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }
}

impl DocumentStore for MemoryStore {
    fn name(&self) -> &str {
        "memory"
    }

    fn get_document(&self, collection: &str, document: &str) -> EmonResult<Option<Value>> {
        Ok(self
            .documents
            .get(&(collection.to_string(), document.to_string()))
            .cloned())
    }
}
