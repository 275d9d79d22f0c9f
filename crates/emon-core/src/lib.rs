//! Core types for the energy monitor dashboard.
//!
//! Holds the document shapes read from the store, the ENTSO-E production
//! source tables, generation mix aggregation and the number formatting used
//! by every renderer.

pub mod date;
pub mod error;
pub mod format;
pub mod mix;
pub mod model;
pub mod psr;
pub mod units;

pub use error::{EmonError, EmonResult};
pub use mix::{bar_length, CategoryTotal, GenerationMix, MixEntry, Viewport};
pub use model::{Country, GenerationDocument, GenerationRecord, SimulationSummary, SummaryDocument};
pub use psr::{PsrType, SourceCategory, DEFAULT_COLOR};
