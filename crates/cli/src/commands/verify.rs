use loadline_core::domain::carrier::AuthorizationStatus;
use loadline_core::errors::{ApplicationError, DomainError};
use loadline_core::registry::{CarrierRegistry, StaticCarrierRegistry};

use crate::commands::{command_runtime, CommandResult};

pub fn run(mc_number: &str) -> CommandResult {
    let runtime = match command_runtime("verify") {
        Ok(runtime) => runtime,
        Err(result) => return result,
    };

    let registry = StaticCarrierRegistry;
    match runtime.block_on(registry.verify(mc_number)) {
        Ok(Some(authorization)) => {
            let message = match authorization.status {
                AuthorizationStatus::Authorized => {
                    format!("MC {} is authorized to operate", authorization.mc_number)
                }
                AuthorizationStatus::NonAuthorized => {
                    format!("MC {} is not authorized to operate", authorization.mc_number)
                }
            };
            match serde_json::to_value(&authorization) {
                Ok(data) => CommandResult::success_with_data("verify", message, data),
                Err(error) => CommandResult::internal_failure("verify", error.to_string()),
            }
        }
        Ok(None) => CommandResult::from_application_error(
            "verify",
            ApplicationError::from(DomainError::InvalidMcNumber(format!(
                "{mc_number:?} is not a well-formed MC number"
            ))),
        ),
        Err(error) => {
            CommandResult::from_application_error("verify", ApplicationError::from(error))
        }
    }
}
