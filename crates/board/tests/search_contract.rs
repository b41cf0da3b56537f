//! Exercises the two-stage search against a real in-memory board instead of a
//! scripted source, counting queries to pin down the relaxation behavior.

use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use chrono::{TimeZone, Utc};
use rust_decimal::Decimal;

use loadline_board::{demo_loads, InMemoryLoadBoard};
use loadline_core::config::PricingConfig;
use loadline_core::domain::filter::LoadFilter;
use loadline_core::domain::load::LoadId;
use loadline_core::pricing::DeterministicPricingEngine;
use loadline_core::ranking::LoadRanker;
use loadline_core::search::{LoadSource, SearchStrategy, SourceError};

struct CountingBoard {
    inner: InMemoryLoadBoard,
    queries: AtomicUsize,
}

impl CountingBoard {
    fn with_demo_loads() -> Self {
        Self {
            inner: InMemoryLoadBoard::with_loads(demo_loads()),
            queries: AtomicUsize::new(0),
        }
    }

    fn query_count(&self) -> usize {
        self.queries.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl LoadSource for CountingBoard {
    async fn query(
        &self,
        filter: &LoadFilter,
    ) -> Result<Vec<loadline_core::domain::load::Load>, SourceError> {
        self.queries.fetch_add(1, Ordering::SeqCst);
        self.inner.query(filter).await
    }
}

fn strategy() -> SearchStrategy<DeterministicPricingEngine> {
    SearchStrategy::new(
        LoadRanker::default(),
        DeterministicPricingEngine::new(PricingConfig::default()),
    )
}

#[tokio::test]
async fn strict_hit_queries_the_board_once() {
    let board = CountingBoard::with_demo_loads();
    let filter = LoadFilter {
        origin: Some("chicago".to_string()),
        max_miles: Some(1_000.0),
        ..LoadFilter::default()
    };

    let quote = strategy()
        .best_load(&board, &filter)
        .await
        .expect("search should succeed")
        .expect("the chicago lanes should match");

    assert_eq!(board.query_count(), 1);
    // L002 is the urgent reefer on the chicago lane.
    assert_eq!(quote.load.load_id, LoadId("L002".to_string()));
    assert_eq!(quote.opening_offer, Decimal::from(1890));
}

#[tokio::test]
async fn mileage_bounds_are_dropped_on_the_second_pass() {
    let board = CountingBoard::with_demo_loads();
    // The denver load runs 821 miles; nothing on the board fits this range.
    let filter = LoadFilter {
        origin: Some("denver".to_string()),
        min_miles: Some(100.0),
        max_miles: Some(200.0),
        ..LoadFilter::default()
    };

    let quote = strategy()
        .best_load(&board, &filter)
        .await
        .expect("search should succeed")
        .expect("relaxation should surface the denver load");

    assert_eq!(board.query_count(), 2);
    assert_eq!(quote.load.load_id, LoadId("L005".to_string()));
}

#[tokio::test]
async fn pickup_window_is_dropped_on_the_second_pass() {
    let board = CountingBoard::with_demo_loads();
    // A window before any posted pickup; only the retry can match.
    let filter = LoadFilter {
        origin: Some("atlanta".to_string()),
        pickup_datetime_from: Some(Utc.with_ymd_and_hms(2025, 7, 1, 0, 0, 0).unwrap()),
        pickup_datetime_to: Some(Utc.with_ymd_and_hms(2025, 7, 2, 0, 0, 0).unwrap()),
        ..LoadFilter::default()
    };

    let quote = strategy()
        .best_load(&board, &filter)
        .await
        .expect("search should succeed")
        .expect("relaxation should surface the atlanta load");

    assert_eq!(board.query_count(), 2);
    assert_eq!(quote.load.load_id, LoadId("L004".to_string()));
}

#[tokio::test]
async fn text_constraints_survive_relaxation() {
    let board = CountingBoard::with_demo_loads();
    // No boston lane exists, and origin is never relaxed away.
    let filter = LoadFilter {
        origin: Some("boston".to_string()),
        min_miles: Some(100.0),
        ..LoadFilter::default()
    };

    let result = strategy()
        .best_load(&board, &filter)
        .await
        .expect("no match is not a failure");

    assert_eq!(result, None);
    assert_eq!(board.query_count(), 2);
}
