//! Dashboard page, renderers and load service for the energy monitor.
//!
//! # Modules
//!
//! - [`config`]: `~/.emon/config.toml` and store construction
//! - [`page`]: the page model the renderers write into
//! - [`summary`] / [`chart`]: simulation figures and generation mix bars
//! - [`html`] / [`terminal`]: output backends
//! - [`service`]: async load sequence against a document store

pub mod chart;
pub mod config;
pub mod error;
pub mod html;
pub mod page;
pub mod service;
pub mod summary;
pub mod terminal;

pub use config::{DashboardConfig, FirestoreConfig, PageConfig, StoreConfig, StoreKind, TerminalConfig};
pub use error::{Error, Result};
pub use page::{ChartContainer, ChartRow, ContainerContent, Page};
pub use service::{CountryOutcome, DashboardService, LoadReport};
pub use terminal::{TerminalOptions, Theme};

/// Title shown on every rendered page.
pub const PAGE_TITLE: &str = "Energy Monitor: Nuclear Simulation Dashboard";
