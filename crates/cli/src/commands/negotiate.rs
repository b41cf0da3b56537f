use clap::Args;
use rust_decimal::Decimal;

use loadline_core::config::{AppConfig, LoadOptions};
use loadline_core::errors::ApplicationError;
use loadline_core::negotiation::{CounterOfferRequest, NegotiationEngine};

use crate::commands::CommandResult;

#[derive(Args, Clone, Debug)]
pub struct NegotiateArgs {
    #[arg(long, help = "What the carrier is asking for, in dollars")]
    pub carrier_offer: Decimal,
    #[arg(long, help = "Our most recent offer, in dollars")]
    pub last_offer: Decimal,
    #[arg(long, help = "1-based negotiation round")]
    pub round: u32,
    #[arg(long, help = "The most we will pay for this load")]
    pub ceiling: Decimal,
}

pub fn run(args: &NegotiateArgs) -> CommandResult {
    let config = match AppConfig::load(LoadOptions::default()) {
        Ok(config) => config,
        Err(error) => {
            return CommandResult::from_application_error(
                "negotiate",
                ApplicationError::Configuration(error.to_string()),
            );
        }
    };

    let engine = NegotiationEngine::new(config.negotiation.clone());
    let request = CounterOfferRequest {
        carrier_offer: args.carrier_offer,
        last_offer: args.last_offer,
        round_number: args.round,
        ceiling_rate: args.ceiling,
    };

    match engine.evaluate(&request) {
        Ok(response) => {
            let message = response.message.clone();
            match serde_json::to_value(&response) {
                Ok(data) => CommandResult::success_with_data("negotiate", message, data),
                Err(error) => CommandResult::internal_failure("negotiate", error.to_string()),
            }
        }
        Err(error) => {
            CommandResult::from_application_error("negotiate", ApplicationError::from(error))
        }
    }
}
