//! CLI module for the user management service
//!
//! Provides subcommands for running the service:
//! - `api`: HTTP API server

pub mod api;

use clap::{Parser, Subcommand};

/// User Management API - CRUD service with paginated search and report exports
#[derive(Parser)]
#[command(name = "user-management-api")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Run the HTTP API server
    Api(api::ApiArgs),
}
