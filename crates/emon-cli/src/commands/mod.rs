pub mod check;
pub mod completions;
pub mod config;
pub mod dashboard;
