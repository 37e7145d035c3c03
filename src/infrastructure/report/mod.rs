//! Report infrastructure module
//!
//! Renders the user report as PDF or Excel bytes. The rendering crates
//! stay confined to this module.

mod excel;
mod pdf;
mod service;

pub use service::{ReportService, UserReportRow};
