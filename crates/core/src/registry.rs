use async_trait::async_trait;
use thiserror::Error;

use crate::domain::carrier::{AuthorizationStatus, CarrierAuthorization};

/// External carrier-registry lookup. Outside the negotiation core; included
/// because it shares the carrier-interaction domain.
#[async_trait]
pub trait CarrierRegistry: Send + Sync {
    /// `Ok(None)` means the identifier is not a well-formed MC number; faults
    /// in the registry itself surface as errors.
    async fn verify(&self, mc_number: &str)
        -> Result<Option<CarrierAuthorization>, RegistryError>;
}

#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("registry unavailable: {0}")]
    Unavailable(String),
    #[error("malformed registry response: {0}")]
    MalformedResponse(String),
}

impl From<RegistryError> for crate::errors::ApplicationError {
    fn from(value: RegistryError) -> Self {
        Self::Registry(value.to_string())
    }
}

/// Deterministic FMCSA-style stand-in used for tests and demos: MC numbers
/// are 5-8 digits, and numbers starting with '5' are authorized.
#[derive(Clone, Debug, Default)]
pub struct StaticCarrierRegistry;

#[async_trait]
impl CarrierRegistry for StaticCarrierRegistry {
    async fn verify(
        &self,
        mc_number: &str,
    ) -> Result<Option<CarrierAuthorization>, RegistryError> {
        let trimmed = mc_number.trim();
        let well_formed = (5..=8).contains(&trimmed.len())
            && trimmed.chars().all(|ch| ch.is_ascii_digit());
        if !well_formed {
            return Ok(None);
        }

        if trimmed.starts_with('5') {
            return Ok(Some(CarrierAuthorization {
                mc_number: trimmed.to_string(),
                status: AuthorizationStatus::Authorized,
                carrier_name: format!("Carrier MC-{trimmed}"),
                operation: "Interstate".to_string(),
            }));
        }

        Ok(Some(CarrierAuthorization {
            mc_number: trimmed.to_string(),
            status: AuthorizationStatus::NonAuthorized,
            carrier_name: "None".to_string(),
            operation: "None".to_string(),
        }))
    }
}
