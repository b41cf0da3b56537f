use std::fs;
use std::path::Path;

use serde::Serialize;

use loadline_board::{demo_calls, demo_loads};
use loadline_core::domain::call::CallSummary;
use loadline_core::domain::load::Load;
use loadline_core::errors::ApplicationError;
use loadline_core::metrics::{summarize, MetricsReport};

use crate::commands::CommandResult;

/// The report plus the board headcount. The aggregator is pure over call
/// records; the board size belongs to whoever owns the board, which here is
/// the command itself.
#[derive(Debug, Serialize)]
struct BoardMetrics {
    total_loads: u64,
    #[serde(flatten)]
    report: MetricsReport,
}

pub fn run(calls_path: Option<&Path>, loads_path: Option<&Path>) -> CommandResult {
    let calls = match load_calls(calls_path) {
        Ok(calls) => calls,
        Err(result) => return *result,
    };
    let loads = match load_loads(loads_path) {
        Ok(loads) => loads,
        Err(result) => return *result,
    };

    let metrics =
        BoardMetrics { total_loads: loads.len() as u64, report: summarize(&calls) };
    let message = format!(
        "{} loads on the board; {} calls, {} accepted, avg agreed price ${}",
        metrics.total_loads,
        metrics.report.total_calls,
        metrics.report.accepted,
        metrics.report.avg_agreed_price
    );

    match serde_json::to_value(&metrics) {
        Ok(data) => CommandResult::success_with_data("metrics", message, data),
        Err(error) => CommandResult::internal_failure("metrics", error.to_string()),
    }
}

fn load_calls(path: Option<&Path>) -> Result<Vec<CallSummary>, Box<CommandResult>> {
    let Some(path) = path else {
        return Ok(demo_calls());
    };

    let raw = read_file("metrics", path)?;
    serde_json::from_str(&raw).map_err(|error| {
        Box::new(CommandResult::from_application_error(
            "metrics",
            ApplicationError::Source(format!("failed to decode {}: {error}", path.display())),
        ))
    })
}

fn load_loads(path: Option<&Path>) -> Result<Vec<Load>, Box<CommandResult>> {
    let Some(path) = path else {
        return Ok(demo_loads());
    };

    let raw = read_file("metrics", path)?;
    serde_json::from_str(&raw).map_err(|error| {
        Box::new(CommandResult::from_application_error(
            "metrics",
            ApplicationError::Source(format!("failed to decode {}: {error}", path.display())),
        ))
    })
}

fn read_file(command: &str, path: &Path) -> Result<String, Box<CommandResult>> {
    fs::read_to_string(path).map_err(|error| {
        Box::new(CommandResult::from_application_error(
            command,
            ApplicationError::Source(format!("failed to read {}: {error}", path.display())),
        ))
    })
}
