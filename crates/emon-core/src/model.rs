//! Document shapes read from the store.
//!
//! Both document kinds keep their payload under a top-level `records` field:
//! an object for the simulation summary, an array for daily generation.

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::EmonError;
use crate::units::{Euros, EurosPerMwh, MegawattHours, Megawatts};

/// Countries with a daily generation collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Country {
    Italy,
    France,
    Spain,
}

impl Country {
    pub const ALL: [Country; 3] = [Country::Italy, Country::France, Country::Spain];

    /// Lowercase identifier used in collection names and element ids.
    pub fn slug(self) -> &'static str {
        match self {
            Country::Italy => "italy",
            Country::France => "france",
            Country::Spain => "spain",
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            Country::Italy => "Italy",
            Country::France => "France",
            Country::Spain => "Spain",
        }
    }

    /// Page element that holds this country's generation chart.
    pub fn container_id(self) -> String {
        format!("{}-chart-container", self.slug())
    }
}

impl fmt::Display for Country {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

impl FromStr for Country {
    type Err = EmonError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Country::ALL
            .into_iter()
            .find(|c| c.slug().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| {
                EmonError::Validation(format!(
                    "unknown country '{s}' (expected italy, france or spain)"
                ))
            })
    }
}

/// One generation entry of a daily document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationRecord {
    /// ENTSO-E production source code (e.g. `B16`)
    #[serde(rename = "psrType")]
    pub psr_type: String,
    #[serde(rename = "quantity_MW")]
    pub quantity: Megawatts,
    /// Interval index within the day, when the writer recorded it
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<u32>,
}

impl GenerationRecord {
    pub fn new(psr_type: impl Into<String>, quantity_mw: f64) -> Self {
        Self {
            psr_type: psr_type.into(),
            quantity: Megawatts(quantity_mw),
            position: None,
        }
    }
}

/// Daily generation document (`daily_generation_{country}/{YYYY-MM-DD}`).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GenerationDocument {
    #[serde(default)]
    pub records: Vec<GenerationRecord>,
}

/// Simulation results written by the upstream analyzer.
///
/// Every field is optional: a missing or mistyped value becomes `None`
/// instead of failing the whole document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SimulationSummary {
    #[serde(default, deserialize_with = "lenient_string")]
    pub data_analisi: Option<String>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub risparmio_annuale_italia_eur: Option<Euros>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub risparmio_annuale_famiglia_eur: Option<Euros>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub risparmio_giornaliero_eur: Option<Euros>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub risparmio_percentuale: Option<f64>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub fabbisogno_mwh: Option<MegawattHours>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub costo_attuale_eur: Option<Euros>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub costo_simulato_eur: Option<Euros>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub pun_usato_eur_mwh: Option<EurosPerMwh>,
}

/// Summary document (`simulation_results/latest_italy`).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SummaryDocument {
    #[serde(default, deserialize_with = "lenient_summary")]
    pub records: Option<SimulationSummary>,
}

impl SummaryDocument {
    /// Summary fields, treating a missing `records` object as all-absent.
    pub fn summary(&self) -> SimulationSummary {
        self.records.clone().unwrap_or_default()
    }
}

fn lenient_number<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: From<f64>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(value.as_f64().filter(|v| v.is_finite()).map(T::from))
}

fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(value.as_str().map(str::to_string))
}

fn lenient_summary<'de, D>(deserializer: D) -> Result<Option<SimulationSummary>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    if !value.is_object() {
        return Ok(None);
    }
    serde_json::from_value(value)
        .map(Some)
        .map_err(serde::de::Error::custom)
}

macro_rules! impl_from_f64 {
    ($($type:ty),*) => {
        $(impl From<f64> for $type {
            fn from(value: f64) -> Self {
                Self(value)
            }
        })*
    };
}

impl_from_f64!(Euros, EurosPerMwh, MegawattHours);
