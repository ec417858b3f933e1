//! Command line entry points
//!
//! - `serve`: run the HTTP API
//! - `budget`: print a user's budget position for the current month

pub mod budget;
pub mod serve;

use clap::{Parser, Subcommand};

/// Fuel tracker - trip logging and monthly fuel budget accounting
#[derive(Parser)]
#[command(name = "fuel-tracker")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Run the HTTP API server
    Serve,

    /// Print budget status and alerts for a user
    Budget(budget::BudgetArgs),
}
