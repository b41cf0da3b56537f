pub mod config;
pub mod metrics;
pub mod negotiate;
pub mod search;
pub mod verify;

use serde::Serialize;
use uuid::Uuid;

use loadline_core::errors::{ApplicationError, InterfaceError};

#[derive(Debug, Clone)]
pub struct CommandResult {
    pub exit_code: u8,
    pub output: String,
}

#[derive(Debug, Serialize)]
struct CommandOutcome {
    command: String,
    status: String,
    error_class: Option<String>,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    correlation_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    data: Option<serde_json::Value>,
}

impl CommandResult {
    pub fn success(command: &str, message: impl Into<String>) -> Self {
        let payload = CommandOutcome {
            command: command.to_string(),
            status: "ok".to_string(),
            error_class: None,
            message: message.into(),
            correlation_id: None,
            data: None,
        };
        Self { exit_code: 0, output: serialize_payload(payload) }
    }

    pub fn success_with_data(
        command: &str,
        message: impl Into<String>,
        data: serde_json::Value,
    ) -> Self {
        let payload = CommandOutcome {
            command: command.to_string(),
            status: "ok".to_string(),
            error_class: None,
            message: message.into(),
            correlation_id: None,
            data: Some(data),
        };
        Self { exit_code: 0, output: serialize_payload(payload) }
    }

    /// Maps an application fault through the interface layer: the payload
    /// carries the interface class, the user-safe message, and a correlation
    /// id; the full fault detail goes to the log under the same id.
    pub fn from_application_error(command: &str, error: ApplicationError) -> Self {
        let correlation_id = Uuid::new_v4().to_string();
        tracing::error!(command, correlation_id, error = %error, "command failed");

        let interface = error.into_interface(correlation_id.clone());
        let (error_class, exit_code) = classify(&interface);

        let payload = CommandOutcome {
            command: command.to_string(),
            status: "error".to_string(),
            error_class: Some(error_class.to_string()),
            message: interface.user_message().to_string(),
            correlation_id: Some(correlation_id),
            data: None,
        };
        Self { exit_code, output: serialize_payload(payload) }
    }

    /// Faults of the CLI itself (runtime init, output serialization) that
    /// never pass through an `ApplicationError`.
    pub(crate) fn internal_failure(command: &str, detail: impl Into<String>) -> Self {
        let correlation_id = Uuid::new_v4().to_string();
        let detail = detail.into();
        tracing::error!(command, correlation_id, error = %detail, "command failed");

        let interface = InterfaceError::Internal { message: detail, correlation_id: correlation_id.clone() };
        let (error_class, exit_code) = classify(&interface);

        let payload = CommandOutcome {
            command: command.to_string(),
            status: "error".to_string(),
            error_class: Some(error_class.to_string()),
            message: interface.user_message().to_string(),
            correlation_id: Some(correlation_id),
            data: None,
        };
        Self { exit_code, output: serialize_payload(payload) }
    }
}

fn classify(interface: &InterfaceError) -> (&'static str, u8) {
    match interface {
        InterfaceError::BadRequest { .. } => ("bad_request", 2),
        InterfaceError::Internal { .. } => ("internal", 3),
        InterfaceError::ServiceUnavailable { .. } => ("service_unavailable", 4),
    }
}

fn serialize_payload(payload: CommandOutcome) -> String {
    serde_json::to_string(&payload).unwrap_or_else(|error| {
        format!(
            "{{\"command\":\"unknown\",\"status\":\"error\",\"error_class\":\"serialization\",\"message\":\"{}\"}}",
            error.to_string().replace('\\', "\\\\").replace('"', "\\\"")
        )
    })
}

/// Single-threaded runtime for commands that await the async collaborators.
pub(crate) fn command_runtime(command: &str) -> Result<tokio::runtime::Runtime, CommandResult> {
    tokio::runtime::Builder::new_current_thread().enable_all().build().map_err(|error| {
        CommandResult::internal_failure(
            command,
            format!("failed to initialize async runtime: {error}"),
        )
    })
}
