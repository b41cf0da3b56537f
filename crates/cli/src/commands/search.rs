use std::fs;
use std::path::PathBuf;

use clap::Args;

use loadline_board::{demo_loads, InMemoryLoadBoard};
use loadline_core::config::{AppConfig, LoadOptions};
use loadline_core::domain::filter::LoadFilter;
use loadline_core::errors::ApplicationError;
use loadline_core::pricing::DeterministicPricingEngine;
use loadline_core::ranking::LoadRanker;
use loadline_core::search::SearchStrategy;

use crate::commands::{command_runtime, CommandResult};
use crate::normalize::{
    normalize_city, normalize_datetime_param, normalize_decimal_param, normalize_numeric_param,
    normalize_text_param,
};

/// Raw filter input as typed on the command line. Every field is lenient;
/// normalization decides what actually constrains the query.
#[derive(Args, Clone, Debug, Default)]
pub struct SearchArgs {
    #[arg(long, help = "Origin city, e.g. \"Chicago, IL\"")]
    pub origin: Option<String>,
    #[arg(long, help = "Destination city")]
    pub destination: Option<String>,
    #[arg(long, help = "Equipment type, e.g. reefer")]
    pub equipment: Option<String>,
    #[arg(long, help = "Commodity type")]
    pub commodity: Option<String>,
    #[arg(long, help = "Earliest pickup (RFC 3339 or YYYY-MM-DD)")]
    pub pickup_from: Option<String>,
    #[arg(long, help = "Latest pickup (RFC 3339 or YYYY-MM-DD)")]
    pub pickup_to: Option<String>,
    #[arg(long, help = "Minimum weight in pounds")]
    pub min_weight: Option<String>,
    #[arg(long, help = "Maximum weight in pounds")]
    pub max_weight: Option<String>,
    #[arg(long, help = "Minimum posted rate in dollars")]
    pub min_rate: Option<String>,
    #[arg(long, help = "Maximum posted rate in dollars")]
    pub max_rate: Option<String>,
    #[arg(long, help = "Minimum trip length in miles")]
    pub min_miles: Option<String>,
    #[arg(long, help = "Maximum trip length in miles")]
    pub max_miles: Option<String>,
    #[arg(long, help = "JSON file of posted loads (defaults to the demo board)")]
    pub loads: Option<PathBuf>,
}

pub fn run(args: &SearchArgs) -> CommandResult {
    let config = match AppConfig::load(LoadOptions::default()) {
        Ok(config) => config,
        Err(error) => {
            return CommandResult::from_application_error(
                "search",
                ApplicationError::Configuration(error.to_string()),
            );
        }
    };

    let board = match load_board(args.loads.as_deref()) {
        Ok(board) => board,
        Err(result) => return *result,
    };

    let runtime = match command_runtime("search") {
        Ok(runtime) => runtime,
        Err(result) => return result,
    };

    let filter = build_filter(args);
    let strategy = SearchStrategy::new(
        LoadRanker::new(config.search.clone()),
        DeterministicPricingEngine::new(config.pricing.clone()),
    );

    match runtime.block_on(strategy.best_load(&board, &filter)) {
        Ok(Some(quote)) => match serde_json::to_value(&quote) {
            Ok(data) => CommandResult::success_with_data(
                "search",
                format!("best load: {}", quote.load.load_id.0),
                data,
            ),
            Err(error) => CommandResult::internal_failure("search", error.to_string()),
        },
        Ok(None) => {
            CommandResult::success("search", "no loads matched, even after widening the filter")
        }
        Err(error) => {
            CommandResult::from_application_error("search", ApplicationError::from(error))
        }
    }
}

fn load_board(path: Option<&std::path::Path>) -> Result<InMemoryLoadBoard, Box<CommandResult>> {
    let Some(path) = path else {
        return Ok(InMemoryLoadBoard::with_loads(demo_loads()));
    };

    let raw = fs::read_to_string(path).map_err(|error| {
        Box::new(CommandResult::from_application_error(
            "search",
            ApplicationError::Source(format!("failed to read {}: {error}", path.display())),
        ))
    })?;

    InMemoryLoadBoard::from_json_str(&raw).map_err(|error| {
        Box::new(CommandResult::from_application_error(
            "search",
            ApplicationError::from(error),
        ))
    })
}

fn build_filter(args: &SearchArgs) -> LoadFilter {
    LoadFilter {
        origin: args.origin.as_deref().and_then(normalize_city),
        destination: args.destination.as_deref().and_then(normalize_city),
        equipment_type: args.equipment.as_deref().and_then(normalize_text_param),
        commodity_type: args.commodity.as_deref().and_then(normalize_text_param),
        pickup_datetime_from: args.pickup_from.as_deref().and_then(normalize_datetime_param),
        pickup_datetime_to: args.pickup_to.as_deref().and_then(normalize_datetime_param),
        min_weight: args.min_weight.as_deref().and_then(normalize_numeric_param),
        max_weight: args.max_weight.as_deref().and_then(normalize_numeric_param),
        min_rate: args.min_rate.as_deref().and_then(normalize_decimal_param),
        max_rate: args.max_rate.as_deref().and_then(normalize_decimal_param),
        min_miles: args.min_miles.as_deref().and_then(normalize_numeric_param),
        max_miles: args.max_miles.as_deref().and_then(normalize_numeric_param),
    }
}
