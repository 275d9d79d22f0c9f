use std::io::Write;

use anyhow::{Context, Result};
use emon_core::{date, GenerationDocument, SummaryDocument};
use emon_io::DocumentStore;
use emon_ui::DashboardConfig;
use serde_json::Value;
use tabwriter::TabWriter;
use tracing::{error, info};

#[derive(Clone, Copy, PartialEq, Eq)]
enum CheckStatus {
    Found,
    Missing,
    Failed,
}

struct Check {
    document: String,
    status: CheckStatus,
    detail: String,
}

fn check_summary(store: &dyn DocumentStore, collection: &str, document: &str) -> (Check, Option<Value>) {
    let path = format!("{collection}/{document}");
    match store.get_document(collection, document) {
        Ok(Some(raw)) => {
            let detail = match serde_json::from_value::<SummaryDocument>(raw.clone()) {
                Ok(doc) => match doc.summary().data_analisi {
                    Some(day) => format!("analysis date {day}"),
                    None if doc.records.is_none() => "no records object".to_string(),
                    None => "no analysis date".to_string(),
                },
                Err(e) => format!("undecodable: {e}"),
            };
            let check = Check {
                document: path,
                status: CheckStatus::Found,
                detail,
            };
            (check, Some(raw))
        }
        Ok(None) => {
            error!("simulation document not found");
            let check = Check {
                document: path,
                status: CheckStatus::Missing,
                detail: "simulation document not found".to_string(),
            };
            (check, None)
        }
        Err(e) => {
            let check = Check {
                document: path,
                status: CheckStatus::Failed,
                detail: e.to_string(),
            };
            (check, None)
        }
    }
}

fn check_generation(store: &dyn DocumentStore, collection: String, date_id: &str) -> Check {
    let document = format!("{collection}/{date_id}");
    let (status, detail) = match store.get_document(&collection, date_id) {
        Ok(Some(raw)) => match serde_json::from_value::<GenerationDocument>(raw) {
            Ok(doc) => (CheckStatus::Found, format!("{} records", doc.records.len())),
            Err(e) => (CheckStatus::Failed, format!("undecodable: {e}")),
        },
        Ok(None) => (CheckStatus::Missing, "no document for this date".to_string()),
        Err(e) => (CheckStatus::Failed, e.to_string()),
    };
    Check {
        document,
        status,
        detail,
    }
}

/// Report which dashboard documents exist and print the summary document.
pub fn handle(config: &DashboardConfig, quiet: bool) -> Result<()> {
    let store = config.build_store().context("setting up document store")?;
    let collections = config.page.collections();
    let target = config.page.target_date(date::today())?;
    let date_id = date::document_id(target);
    info!(store = store.name(), date = %date_id, "checking dashboard documents");

    let (summary_check, summary) = check_summary(
        store.as_ref(),
        &collections.summary_collection,
        &collections.summary_document,
    );
    let mut checks = vec![summary_check];
    for country in &config.page.countries {
        checks.push(check_generation(
            store.as_ref(),
            collections.generation_collection(*country),
            &date_id,
        ));
    }

    let mut writer = TabWriter::new(Vec::new()).padding(2);
    writeln!(writer, "Document\tStatus\tDetails")?;
    for check in &checks {
        let status = match check.status {
            CheckStatus::Found => "found",
            CheckStatus::Missing => "missing",
            CheckStatus::Failed => "error",
        };
        writeln!(writer, "{}\t{}\t{}", check.document, status, check.detail)?;
    }
    writer.flush()?;
    let table = String::from_utf8(writer.into_inner()?)?;
    println!("{table}");

    if let Some(raw) = summary.filter(|_| !quiet) {
        println!("{}", serde_json::to_string_pretty(&raw)?);
    }

    let failed = checks
        .iter()
        .filter(|c| c.status == CheckStatus::Failed)
        .count();
    if failed > 0 {
        anyhow::bail!("{failed} document(s) could not be read");
    }
    if checks.iter().any(|c| c.status == CheckStatus::Missing) {
        eprintln!("Some dashboard documents are missing. The page will show those sections empty.");
    }
    Ok(())
}
