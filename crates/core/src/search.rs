use async_trait::async_trait;
use thiserror::Error;

use crate::domain::filter::LoadFilter;
use crate::domain::load::{Load, LoadQuote};
use crate::pricing::PricingEngine;
use crate::ranking::LoadRanker;

/// The storage collaborator queried by the search strategy. Implementations
/// must support case-insensitive substring matching on the text fields and
/// inclusive range matching on the pickup window and numeric fields.
#[async_trait]
pub trait LoadSource: Send + Sync {
    async fn query(&self, filter: &LoadFilter) -> Result<Vec<Load>, SourceError>;
}

#[derive(Debug, Error)]
pub enum SourceError {
    #[error("loadboard unavailable: {0}")]
    Unavailable(String),
    #[error("decode error: {0}")]
    Decode(String),
}

impl From<SourceError> for crate::errors::ApplicationError {
    fn from(value: SourceError) -> Self {
        Self::Source(value.to_string())
    }
}

/// Two-stage filter-relaxation search: strict constraints first, then exactly
/// one widened retry with the pickup window and mileage range cleared.
pub struct SearchStrategy<P> {
    ranker: LoadRanker,
    pricing: P,
}

impl<P> SearchStrategy<P>
where
    P: PricingEngine,
{
    pub fn new(ranker: LoadRanker, pricing: P) -> Self {
        Self { ranker, pricing }
    }

    /// Finds the single best-fitting load for the filter, enriched with
    /// pricing. `Ok(None)` is the no-match sentinel, not a failure; source
    /// errors propagate untouched.
    pub async fn best_load<S>(
        &self,
        source: &S,
        filter: &LoadFilter,
    ) -> Result<Option<LoadQuote>, SourceError>
    where
        S: LoadSource + ?Sized,
    {
        let mut candidates = source.query(filter).await?;

        if candidates.is_empty() {
            candidates = source.query(&filter.relaxed()).await?;
        }

        if candidates.is_empty() {
            return Ok(None);
        }

        let ranked = self.ranker.rank(candidates);
        let Some(top) = ranked.into_iter().next() else {
            return Ok(None);
        };
        let rate = self.pricing.quote(&top);

        Ok(Some(LoadQuote::new(top, rate)))
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use async_trait::async_trait;
    use chrono::{TimeZone, Utc};
    use rust_decimal::Decimal;

    use crate::config::PricingConfig;
    use crate::domain::filter::LoadFilter;
    use crate::domain::load::{Load, LoadId};
    use crate::pricing::DeterministicPricingEngine;
    use crate::ranking::LoadRanker;
    use crate::search::{LoadSource, SearchStrategy, SourceError};

    /// Scripted source: pops the next canned response per query and records
    /// every filter it was asked for.
    struct ScriptedSource {
        responses: Mutex<Vec<Result<Vec<Load>, SourceError>>>,
        seen: Mutex<Vec<LoadFilter>>,
    }

    impl ScriptedSource {
        fn new(responses: Vec<Result<Vec<Load>, SourceError>>) -> Self {
            let mut responses = responses;
            responses.reverse();
            Self { responses: Mutex::new(responses), seen: Mutex::new(Vec::new()) }
        }

        fn query_count(&self) -> usize {
            self.seen.lock().expect("seen lock").len()
        }

        fn filters(&self) -> Vec<LoadFilter> {
            self.seen.lock().expect("seen lock").clone()
        }
    }

    #[async_trait]
    impl LoadSource for ScriptedSource {
        async fn query(&self, filter: &LoadFilter) -> Result<Vec<Load>, SourceError> {
            self.seen.lock().expect("seen lock").push(filter.clone());
            self.responses.lock().expect("responses lock").pop().unwrap_or(Ok(Vec::new()))
        }
    }

    fn strategy() -> SearchStrategy<DeterministicPricingEngine> {
        SearchStrategy::new(
            LoadRanker::default(),
            DeterministicPricingEngine::new(PricingConfig::default()),
        )
    }

    fn load(id: &str, notes: &str, delivery_day: Option<u32>, rate: i64) -> Load {
        Load {
            load_id: LoadId(id.to_string()),
            origin: "Chicago, IL".to_string(),
            destination: "Dallas, TX".to_string(),
            pickup_datetime: None,
            delivery_datetime: delivery_day
                .map(|day| Utc.with_ymd_and_hms(2025, 8, day, 12, 0, 0).unwrap()),
            equipment_type: "dry_van".to_string(),
            loadboard_rate: Decimal::from(rate),
            notes: (!notes.is_empty()).then(|| notes.to_string()),
            weight: 10_000.0,
            commodity_type: "general".to_string(),
            num_of_pieces: 1,
            miles: 500.0,
            dimensions: String::new(),
        }
    }

    fn strict_filter() -> LoadFilter {
        LoadFilter {
            origin: Some("chicago".to_string()),
            min_miles: Some(100.0),
            max_miles: Some(900.0),
            ..LoadFilter::default()
        }
    }

    #[tokio::test]
    async fn strict_hit_never_invokes_the_relaxed_query() {
        let source = ScriptedSource::new(vec![Ok(vec![load("L-1", "", Some(7), 1000)])]);

        let result = strategy()
            .best_load(&source, &strict_filter())
            .await
            .expect("search should succeed");

        assert_eq!(source.query_count(), 1);
        let quote = result.expect("strict hit should produce a quote");
        assert_eq!(quote.load.load_id, LoadId("L-1".to_string()));
        assert_eq!(quote.opening_offer, Decimal::from(900));
        assert_eq!(quote.ceiling_rate, Decimal::from(1050));
    }

    #[tokio::test]
    async fn strict_miss_retries_exactly_once_with_relaxed_filter() {
        let source = ScriptedSource::new(vec![
            Ok(Vec::new()),
            Ok(vec![load("L-2", "", Some(9), 2000)]),
        ]);

        let filter = strict_filter();
        let result =
            strategy().best_load(&source, &filter).await.expect("search should succeed");

        assert_eq!(source.query_count(), 2);
        let seen = source.filters();
        assert_eq!(seen[0], filter);
        assert_eq!(seen[1], filter.relaxed());
        assert!(result.is_some());
    }

    #[tokio::test]
    async fn no_match_after_relaxation_is_a_sentinel_not_an_error() {
        let source = ScriptedSource::new(vec![Ok(Vec::new()), Ok(Vec::new())]);

        let result = strategy()
            .best_load(&source, &strict_filter())
            .await
            .expect("empty result is not a failure");

        assert_eq!(result, None);
        assert_eq!(source.query_count(), 2);
    }

    #[tokio::test]
    async fn top_ranked_load_wins_the_search() {
        let source = ScriptedSource::new(vec![Ok(vec![
            load("L-normal", "Normal", Some(7), 1000),
            load("L-urgent", "Urgent - ASAP", Some(5), 1400),
            load("L-plain", "", Some(6), 1200),
        ])]);

        let quote = strategy()
            .best_load(&source, &LoadFilter::default())
            .await
            .expect("search should succeed")
            .expect("candidates should produce a quote");

        assert_eq!(quote.load.load_id, LoadId("L-urgent".to_string()));
        assert_eq!(quote.opening_offer, Decimal::from(1260));
    }

    #[tokio::test]
    async fn source_failures_propagate_to_the_caller() {
        let source = ScriptedSource::new(vec![Err(SourceError::Unavailable(
            "board offline".to_string(),
        ))]);

        let error = strategy()
            .best_load(&source, &LoadFilter::default())
            .await
            .expect_err("source failure must not be swallowed");

        assert!(matches!(error, SourceError::Unavailable(_)));
        assert_eq!(source.query_count(), 1);
    }
}
