//! Directory-backed document store.
//!
//! Documents are plain JSON files laid out as `{root}/{collection}/{document}.json`.
//! Useful for working offline against an exported snapshot of the database
//! and for fixtures in tests.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use emon_core::{EmonError, EmonResult};
use serde_json::Value;

use crate::store::{validate_id, DocumentStore};

#[derive(Debug, Clone)]
pub struct LocalStore {
    root: PathBuf,
}

impl LocalStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// File holding a document. Ids that could escape the root are rejected.
    pub fn document_path(&self, collection: &str, document: &str) -> EmonResult<PathBuf> {
        validate_id(collection)?;
        validate_id(document)?;
        Ok(self
            .root
            .join(collection)
            .join(format!("{document}.json")))
    }
}

impl DocumentStore for LocalStore {
    fn name(&self) -> &str {
        "local"
    }

    fn get_document(&self, collection: &str, document: &str) -> EmonResult<Option<Value>> {
        let path = self.document_path(collection, document)?;
        let contents = match fs::read_to_string(&path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(EmonError::Io(e)),
        };
        serde_json::from_str(&contents)
            .map(Some)
            .map_err(|e| EmonError::Parse(format!("{}: {e}", path.display())))
    }
}
