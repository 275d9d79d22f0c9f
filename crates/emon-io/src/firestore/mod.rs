//! Cloud Firestore REST client.
//!
//! Reads single documents through the public REST endpoint
//! (`GET .../documents/{collection}/{document}`) with an optional web API
//! key. The client is blocking; async callers run it on a blocking pool.

pub mod value;

use std::time::Duration;

use anyhow::{anyhow, Context, Result};
use emon_core::{EmonError, EmonResult};
use serde_json::Value;
use tracing::debug;

use crate::store::{validate_id, DocumentStore};

/// Public Firestore REST endpoint.
pub const DEFAULT_BASE_URL: &str = "https://firestore.googleapis.com/v1";

/// Database id used when none is configured.
pub const DEFAULT_DATABASE: &str = "(default)";

/// Connection settings for a Firestore project.
#[derive(Debug, Clone, PartialEq)]
pub struct FirestoreSettings {
    pub project_id: String,
    /// Web API key, appended as the `key` query parameter
    pub api_key: Option<String>,
    pub base_url: String,
    pub database: String,
    /// Per-request timeout (connect + read)
    pub timeout: Duration,
}

impl FirestoreSettings {
    pub fn new(project_id: impl Into<String>) -> Self {
        Self {
            project_id: project_id.into(),
            api_key: None,
            base_url: DEFAULT_BASE_URL.to_string(),
            database: DEFAULT_DATABASE.to_string(),
            timeout: Duration::from_secs(30),
        }
    }

    pub fn with_api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

/// Firestore document reader.
pub struct FirestoreClient {
    settings: FirestoreSettings,
    agent: ureq::Agent,
}

impl FirestoreClient {
    pub fn new(settings: FirestoreSettings) -> EmonResult<Self> {
        if settings.project_id.trim().is_empty() {
            return Err(EmonError::Config(
                "Firestore project id is not set".to_string(),
            ));
        }
        let agent = ureq::AgentBuilder::new().timeout(settings.timeout).build();
        Ok(Self { settings, agent })
    }

    pub fn settings(&self) -> &FirestoreSettings {
        &self.settings
    }

    /// REST URL of a document, without the API key.
    pub fn document_url(&self, collection: &str, document: &str) -> String {
        format!(
            "{}/projects/{}/databases/{}/documents/{}/{}",
            self.settings.base_url.trim_end_matches('/'),
            self.settings.project_id,
            self.settings.database,
            collection,
            document
        )
    }

    fn fetch(&self, collection: &str, document: &str) -> Result<Option<Value>> {
        let url = self.document_url(collection, document);
        debug!(%url, "fetching Firestore document");

        let mut request = self.agent.get(&url);
        if let Some(key) = &self.settings.api_key {
            request = request.query("key", key);
        }

        let body: Value = match request.call() {
            Ok(response) => response
                .into_json()
                .context("Failed to parse Firestore JSON")?,
            Err(ureq::Error::Status(404, _)) => return Ok(None),
            Err(ureq::Error::Status(code, response)) => {
                let detail = response.into_string().unwrap_or_default();
                return Err(anyhow!(
                    "Firestore returned status {code} for {collection}/{document}: {}",
                    detail.trim()
                ));
            }
            Err(ureq::Error::Transport(transport)) => {
                // Transport errors can echo the URL, keep the API key out of logs
                return Err(anyhow!(
                    "Failed to call Firestore ({}): {}",
                    transport.kind(),
                    transport.message().unwrap_or("no details")
                ));
            }
        };

        let decoded = value::decode_document(&body)
            .with_context(|| format!("Failed to decode {collection}/{document}"))?;
        Ok(Some(decoded))
    }
}

impl DocumentStore for FirestoreClient {
    fn name(&self) -> &str {
        "firestore"
    }

    fn get_document(&self, collection: &str, document: &str) -> EmonResult<Option<Value>> {
        validate_id(collection)?;
        validate_id(document)?;
        self.fetch(collection, document)
            .map_err(|e| EmonError::Store(format!("{e:#}")))
    }
}
