//! Budget command - prints a user's monthly position as JSON

use anyhow::Context;
use clap::Args;
use serde::Serialize;

use crate::api::AppState;
use crate::config::AppConfig;
use crate::domain::budget::{AlertSeverity, BudgetAlert, BudgetStatus, UsageSummary};
use crate::domain::Session;
use crate::infrastructure::logging::init_logging;

#[derive(Debug, Args)]
pub struct BudgetArgs {
    /// Profile to report on
    pub user_id: String,

    /// Month for the usage summary, 0 = January
    #[arg(long, value_parser = clap::value_parser!(u32).range(0..=11))]
    pub month: Option<u32>,

    /// Year for the usage summary
    #[arg(long)]
    pub year: Option<i32>,
}

#[derive(Debug, Serialize)]
struct BudgetReport {
    status: BudgetStatus,
    usage: UsageSummary,
    alerts: Vec<AlertLine>,
}

#[derive(Debug, Serialize)]
struct AlertLine {
    severity: AlertSeverity,
    message: String,
}

impl From<BudgetAlert> for AlertLine {
    fn from(alert: BudgetAlert) -> Self {
        Self {
            severity: alert.severity(),
            message: alert.message(),
        }
    }
}

pub async fn run(args: BudgetArgs) -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = required_config(AppConfig::load())?;
    init_logging(&config.logging)?;

    let state = crate::create_app_state_with_config(&config).await?;
    let report = build_report(&state, &args).await?;

    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}

/// Config errors abort the command; defaults would silently use the in-memory store
fn required_config(
    loaded: Result<AppConfig, config::ConfigError>,
) -> anyhow::Result<AppConfig> {
    loaded.context("Failed to load configuration")
}

async fn build_report(state: &AppState, args: &BudgetArgs) -> anyhow::Result<BudgetReport> {
    let user = state.user_service.get(&args.user_id).await?;

    let session = Session::new();
    session.sign_in(user);

    let status = state.budget_service.session_budget_status(&session).await?;
    let usage = state
        .budget_service
        .usage_summary(&args.user_id, args.month, args.year)
        .await?;
    let alerts = status.alerts().into_iter().map(AlertLine::from).collect();

    Ok(BudgetReport {
        status,
        usage,
        alerts,
    })
}
