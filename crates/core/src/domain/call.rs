use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::load::LoadId;

/// Terminal disposition of a carrier call, as recorded by the caller after the
/// negotiation state machine returns.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CallOutcome {
    Accepted,
    Rejected,
    FailedNegotiation,
    NoResponse,
    InterestedFollowUp,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Sentiment {
    Positive,
    Neutral,
    Negative,
}

/// Finalized call-summary record handed to the persistence collaborator. The
/// engine never writes these; callers do, after a terminal negotiation status.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CallSummary {
    pub id: Uuid,
    pub load_id: LoadId,
    pub agreed_price: Option<Decimal>,
    #[serde(default)]
    pub comments: Option<String>,
    #[serde(default)]
    pub special_conditions: Option<String>,
    pub outcome: CallOutcome,
    pub sentiment: Sentiment,
    #[serde(default)]
    pub call_duration_sec: u32,
    #[serde(default)]
    pub attempts: u32,
    #[serde(default)]
    pub counter_offers: u32,
    /// None when the carrier never answered the satisfaction prompt.
    #[serde(default)]
    pub satisfaction: Option<bool>,
}
