//! Dashboard load service.
//!
//! [`DashboardService`] runs the load sequence against a document store:
//! fetch and render the simulation summary, pick the generation date, fetch
//! every country's generation document concurrently, then render the charts
//! in display order. Store calls are blocking and run on tokio's blocking
//! pool.

use std::sync::Arc;

use chrono::NaiveDate;
use emon_core::{date, Country, GenerationDocument, SummaryDocument};
use emon_io::{Collections, DocumentStore};
use serde::Serialize;
use tokio::task::JoinSet;
use tracing::{debug, error, info, warn};

use crate::chart::render_chart;
use crate::config::{DashboardConfig, PageConfig};
use crate::error::Result;
use crate::page::Page;
use crate::summary::render_summary;

/// What happened to one country's chart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CountryOutcome {
    /// Chart rendered with this many rows.
    Rendered { rows: usize },
    /// No document for the date.
    Missing,
}

/// Summary of a completed load.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LoadReport {
    pub date: NaiveDate,
    pub summary_found: bool,
    pub countries: Vec<(Country, CountryOutcome)>,
}

type GenerationFetch = (Country, emon_core::EmonResult<Option<GenerationDocument>>);

/// Loads dashboard data from a store into a [`Page`].
pub struct DashboardService {
    store: Arc<dyn DocumentStore>,
    page: PageConfig,
    collections: Collections,
}

impl DashboardService {
    pub fn new(store: Arc<dyn DocumentStore>, page: PageConfig) -> Self {
        let collections = page.collections();
        Self {
            store,
            page,
            collections,
        }
    }

    /// Build the service and its store from configuration.
    pub fn from_config(config: &DashboardConfig) -> Result<Self> {
        Ok(Self::new(config.build_store()?, config.page.clone()))
    }

    pub fn store(&self) -> &Arc<dyn DocumentStore> {
        &self.store
    }

    /// A page with every element unset and one container per country.
    pub fn empty_page(&self) -> Page {
        Page::dashboard(&self.page.countries)
    }

    /// Fetch the simulation summary document.
    pub async fn fetch_summary(&self) -> Result<Option<SummaryDocument>> {
        let store = Arc::clone(&self.store);
        let collections = self.collections.clone();
        let doc = tokio::task::spawn_blocking(move || collections.fetch_summary(store.as_ref()))
            .await??;
        Ok(doc)
    }

    /// Fetch every country's generation document for `date_id` concurrently.
    ///
    /// Results come back in display order whatever order the fetches finish in.
    pub async fn fetch_generation(&self, date_id: &str) -> Result<Vec<GenerationFetch>> {
        let mut tasks = JoinSet::new();
        for (index, country) in self.page.countries.iter().copied().enumerate() {
            let store = Arc::clone(&self.store);
            let collections = self.collections.clone();
            let date_id = date_id.to_string();
            tasks.spawn_blocking(move || {
                let result = collections.fetch_generation(store.as_ref(), country, &date_id);
                (index, country, result)
            });
        }

        let mut results: Vec<Option<GenerationFetch>> =
            (0..self.page.countries.len()).map(|_| None).collect();
        while let Some(joined) = tasks.join_next().await {
            let (index, country, result) = joined?;
            results[index] = Some((country, result));
        }
        Ok(results.into_iter().flatten().collect())
    }

    /// Run the load sequence for today's date.
    pub async fn load(&self, page: &mut Page) -> Result<LoadReport> {
        self.load_on(page, date::today()).await
    }

    /// Run the load sequence as if today were `today`.
    ///
    /// On error the page keeps whatever was rendered before the failure.
    pub async fn load_on(&self, page: &mut Page, today: NaiveDate) -> Result<LoadReport> {
        let summary_found = match self.fetch_summary().await? {
            Some(doc) => {
                if doc.records.is_none() {
                    warn!("simulation document has no records object");
                }
                render_summary(page, &doc.summary());
                true
            }
            None => {
                error!(
                    collection = %self.collections.summary_collection,
                    document = %self.collections.summary_document,
                    "simulation document not found"
                );
                false
            }
        };

        let target = self.page.target_date(today)?;
        let date_id = date::document_id(target);
        info!(date = %date_id, countries = self.page.countries.len(), "fetching generation mix");

        let viewport = self.page.viewport();
        let mut countries = Vec::with_capacity(self.page.countries.len());
        for (country, fetched) in self.fetch_generation(&date_id).await? {
            let container_id = country.container_id();
            match fetched? {
                Some(doc) => {
                    render_chart(page, &container_id, &doc.records, &viewport);
                    let rows = page
                        .container(&container_id)
                        .map(|c| c.rows().len())
                        .unwrap_or(0);
                    debug!(%country, rows, "generation chart ready");
                    countries.push((country, CountryOutcome::Rendered { rows }));
                }
                None => {
                    info!(%country, date = %date_id, "no generation document");
                    if let Some(container) = page.container_mut(&container_id) {
                        if self.page.show_missing_notice {
                            container.show_notice(format!("No generation data for {date_id}"));
                        } else {
                            container.clear();
                        }
                    }
                    countries.push((country, CountryOutcome::Missing));
                }
            }
        }

        Ok(LoadReport {
            date: target,
            summary_found,
            countries,
        })
    }
}
