//! Dashboard configuration.
//!
//! [`DashboardConfig`] holds the backend connection, the document locations
//! and the layout options. It is stored in `~/.emon/config.toml`; partial
//! files are fine, unspecified values use the defaults below. Credentials
//! are never compiled in: the project id and API key come from this file or
//! from the command line / environment.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use chrono::NaiveDate;
use emon_core::{date, Country, Viewport};
use emon_io::{Collections, DocumentStore, FirestoreClient, FirestoreSettings, LocalStore};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::{Error, Result};

/// Main configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    /// Firestore connection.
    pub firestore: FirestoreConfig,

    /// Which backend to read from.
    pub store: StoreConfig,

    /// Documents and layout of the page.
    pub page: PageConfig,

    /// Terminal report options.
    pub terminal: TerminalConfig,
}

/// Firestore connection settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FirestoreConfig {
    /// Google Cloud project id.
    pub project_id: String,

    /// Web API key (optional for public rules or the emulator).
    pub api_key: Option<String>,

    /// REST endpoint, override to target the emulator.
    pub base_url: String,

    /// Database id.
    pub database: String,

    /// Per-request timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for FirestoreConfig {
    fn default() -> Self {
        Self {
            project_id: String::new(),
            api_key: None,
            base_url: emon_io::firestore::DEFAULT_BASE_URL.to_string(),
            database: emon_io::firestore::DEFAULT_DATABASE.to_string(),
            timeout_secs: 30,
        }
    }
}

/// Document store backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum StoreKind {
    /// Cloud Firestore over REST.
    #[default]
    Firestore,
    /// JSON files under `local_root`.
    Local,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    pub kind: StoreKind,

    /// Root directory for the local store.
    pub local_root: Option<PathBuf>,
}

/// What the page shows and how.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PageConfig {
    pub summary_collection: String,
    pub summary_document: String,

    /// Generation collections are `{prefix}{country}`.
    pub generation_collection_prefix: String,

    /// Countries with a chart, in display order.
    pub countries: Vec<Country>,

    /// How many days back the generation documents are read.
    pub days_ago: u32,

    /// Fixed generation date (`YYYY-MM-DD`), overrides `days_ago`.
    pub date: Option<String>,

    /// Layout width used to pick the number of chart rows.
    pub viewport_width: u32,

    /// Widths below this are narrow.
    pub narrow_breakpoint: u32,

    /// Chart rows shown on a narrow viewport.
    pub narrow_row_limit: usize,

    /// Write a notice into the container when a country has no document.
    pub show_missing_notice: bool,
}

impl Default for PageConfig {
    fn default() -> Self {
        let collections = Collections::default();
        Self {
            summary_collection: collections.summary_collection,
            summary_document: collections.summary_document,
            generation_collection_prefix: collections.generation_prefix,
            countries: Country::ALL.to_vec(),
            days_ago: date::DEFAULT_DAYS_AGO,
            date: None,
            viewport_width: 1280,
            narrow_breakpoint: emon_core::mix::NARROW_BREAKPOINT,
            narrow_row_limit: emon_core::mix::NARROW_ROW_LIMIT,
            show_missing_notice: true,
        }
    }
}

impl PageConfig {
    pub fn collections(&self) -> Collections {
        Collections {
            summary_collection: self.summary_collection.clone(),
            summary_document: self.summary_document.clone(),
            generation_prefix: self.generation_collection_prefix.clone(),
        }
    }

    pub fn viewport(&self) -> Viewport {
        Viewport {
            width: self.viewport_width,
            breakpoint: self.narrow_breakpoint,
            narrow_row_limit: self.narrow_row_limit,
        }
    }

    /// Generation date for a load happening on `today`.
    pub fn target_date(&self, today: NaiveDate) -> Result<NaiveDate> {
        match &self.date {
            Some(raw) => date::parse_document_date(raw).map_err(|e| Error::Config(e.to_string())),
            None => Ok(date::target_date(today, self.days_ago)),
        }
    }
}

/// Terminal report options.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TerminalConfig {
    /// Colour category labels with 24-bit ANSI escapes.
    pub color: bool,

    /// Show every row's detail line.
    pub expand: bool,
}

impl Default for TerminalConfig {
    fn default() -> Self {
        Self {
            color: true,
            expand: false,
        }
    }
}

impl DashboardConfig {
    /// Get the default config directory path.
    pub fn config_dir() -> Option<PathBuf> {
        dirs::home_dir().map(|h| h.join(".emon"))
    }

    /// Get the default config file path.
    pub fn config_path() -> Option<PathBuf> {
        Self::config_dir().map(|d| d.join("config.toml"))
    }

    /// Load configuration from the default location.
    ///
    /// Returns default config if file doesn't exist.
    pub fn load() -> Result<Self> {
        match Self::config_path() {
            Some(path) if path.exists() => Self::load_from(&path),
            _ => Ok(Self::default()),
        }
    }

    /// Load configuration from a specific path.
    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&contents)?;
        info!(path = %path.display(), "loaded configuration");
        Ok(config)
    }

    /// Save configuration to a specific path.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let contents = toml::to_string_pretty(self)?;
        std::fs::write(path, contents)?;
        Ok(())
    }

    /// Copy with the API key blanked, for display.
    pub fn redacted(&self) -> Self {
        let mut copy = self.clone();
        if copy.firestore.api_key.is_some() {
            copy.firestore.api_key = Some("<redacted>".to_string());
        }
        copy
    }

    pub fn firestore_settings(&self) -> FirestoreSettings {
        let fs = &self.firestore;
        FirestoreSettings {
            project_id: fs.project_id.clone(),
            api_key: fs.api_key.clone().filter(|k| !k.is_empty()),
            base_url: fs.base_url.clone(),
            database: fs.database.clone(),
            timeout: Duration::from_secs(fs.timeout_secs.max(1)),
        }
    }

    /// Build the configured document store.
    pub fn build_store(&self) -> Result<Arc<dyn DocumentStore>> {
        match self.store.kind {
            StoreKind::Firestore => {
                let client = FirestoreClient::new(self.firestore_settings()).map_err(|e| {
                    Error::Config(format!(
                        "{e} (set firestore.project_id or EMON_FIRESTORE_PROJECT_ID)"
                    ))
                })?;
                Ok(Arc::new(client))
            }
            StoreKind::Local => {
                let root = self.store.local_root.clone().ok_or_else(|| {
                    Error::Config("store.local_root is required for the local store".to_string())
                })?;
                Ok(Arc::new(LocalStore::new(root)))
            }
        }
    }
}
