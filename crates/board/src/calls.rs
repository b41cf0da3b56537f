use async_trait::async_trait;
use thiserror::Error;
use tokio::sync::RwLock;

use loadline_core::domain::call::CallSummary;

/// Write side of the call-outcome persistence interface. The engine never
/// calls this; callers persist a summary after a terminal negotiation status.
#[async_trait]
pub trait CallSummaryRepository: Send + Sync {
    async fn save(&self, summary: CallSummary) -> Result<(), CallLogError>;
    async fn list(&self) -> Result<Vec<CallSummary>, CallLogError>;
}

#[derive(Debug, Error)]
pub enum CallLogError {
    #[error("call log unavailable: {0}")]
    Unavailable(String),
    #[error("decode error: {0}")]
    Decode(String),
}

#[derive(Default)]
pub struct InMemoryCallLog {
    calls: RwLock<Vec<CallSummary>>,
}

impl InMemoryCallLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_calls(calls: Vec<CallSummary>) -> Self {
        Self { calls: RwLock::new(calls) }
    }

    /// Builds a call log from a JSON array of summaries.
    pub fn from_json_str(raw: &str) -> Result<Self, CallLogError> {
        let calls: Vec<CallSummary> =
            serde_json::from_str(raw).map_err(|error| CallLogError::Decode(error.to_string()))?;
        Ok(Self::with_calls(calls))
    }
}

#[async_trait]
impl CallSummaryRepository for InMemoryCallLog {
    async fn save(&self, summary: CallSummary) -> Result<(), CallLogError> {
        self.calls.write().await.push(summary);
        Ok(())
    }

    async fn list(&self) -> Result<Vec<CallSummary>, CallLogError> {
        Ok(self.calls.read().await.clone())
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;
    use uuid::Uuid;

    use loadline_core::domain::call::{CallOutcome, CallSummary, Sentiment};
    use loadline_core::domain::load::LoadId;

    use crate::calls::{CallLogError, CallSummaryRepository, InMemoryCallLog};

    fn summary(load_id: &str) -> CallSummary {
        CallSummary {
            id: Uuid::new_v4(),
            load_id: LoadId(load_id.to_string()),
            agreed_price: Some(Decimal::from(1450)),
            comments: Some("met at the counter suggestion".to_string()),
            special_conditions: None,
            outcome: CallOutcome::Accepted,
            sentiment: Sentiment::Positive,
            call_duration_sec: 240,
            attempts: 1,
            counter_offers: 2,
            satisfaction: Some(true),
        }
    }

    #[tokio::test]
    async fn saved_summaries_come_back_in_order() {
        let log = InMemoryCallLog::new();
        log.save(summary("L-1")).await.expect("save should succeed");
        log.save(summary("L-2")).await.expect("save should succeed");

        let calls = log.list().await.expect("list should succeed");
        assert_eq!(calls.len(), 2);
        assert_eq!(calls[0].load_id, LoadId("L-1".to_string()));
        assert_eq!(calls[1].load_id, LoadId("L-2".to_string()));
    }

    #[tokio::test]
    async fn call_log_loads_from_json() {
        let raw = serde_json::to_string(&vec![summary("L-9")]).expect("serialize fixture");
        let log = InMemoryCallLog::from_json_str(&raw).expect("log should parse");

        let calls = log.list().await.expect("list should succeed");
        assert_eq!(calls[0].outcome, CallOutcome::Accepted);
    }

    #[tokio::test]
    async fn malformed_json_is_a_decode_error() {
        let error =
            InMemoryCallLog::from_json_str("[{]").err().expect("malformed input should fail");
        assert!(matches!(error, CallLogError::Decode(_)));
    }
}
