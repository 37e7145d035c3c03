//! Infrastructure layer - External service implementations

pub mod logging;
pub mod migrations;
pub mod report;
pub mod user;
