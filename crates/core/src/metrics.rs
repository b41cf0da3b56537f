use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::call::{CallOutcome, CallSummary, Sentiment};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SentimentSummary {
    pub positive: u64,
    pub neutral: u64,
    pub negative: u64,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SatisfactionSummary {
    pub satisfied: u64,
    pub unsatisfied: u64,
    /// Calls where the carrier never answered the satisfaction prompt:
    /// total minus satisfied minus unsatisfied.
    pub unknown: u64,
}

/// Aggregate view over past call records. All means are rounded to two
/// decimals; an empty input yields zero everywhere.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct MetricsReport {
    pub total_calls: u64,
    pub accepted: u64,
    pub rejected: u64,
    pub failed_negotiation: u64,
    pub no_response: u64,
    pub interested_follow_up: u64,
    /// Mean over records carrying a price; records without one are excluded
    /// from both the numerator and the denominator.
    pub avg_agreed_price: Decimal,
    pub avg_call_duration_sec: f64,
    pub avg_attempts: f64,
    pub avg_counter_offers: f64,
    pub sentiment_summary: SentimentSummary,
    pub satisfaction_summary: SatisfactionSummary,
}

/// Pure arithmetic aggregation over finalized call summaries.
pub fn summarize(calls: &[CallSummary]) -> MetricsReport {
    let mut report = MetricsReport { total_calls: calls.len() as u64, ..MetricsReport::default() };

    let mut price_total = Decimal::ZERO;
    let mut priced_calls = 0u64;
    let mut duration_total = 0u64;
    let mut attempts_total = 0u64;
    let mut counter_offers_total = 0u64;

    for call in calls {
        match call.outcome {
            CallOutcome::Accepted => report.accepted += 1,
            CallOutcome::Rejected => report.rejected += 1,
            CallOutcome::FailedNegotiation => report.failed_negotiation += 1,
            CallOutcome::NoResponse => report.no_response += 1,
            CallOutcome::InterestedFollowUp => report.interested_follow_up += 1,
        }

        match call.sentiment {
            Sentiment::Positive => report.sentiment_summary.positive += 1,
            Sentiment::Neutral => report.sentiment_summary.neutral += 1,
            Sentiment::Negative => report.sentiment_summary.negative += 1,
        }

        match call.satisfaction {
            Some(true) => report.satisfaction_summary.satisfied += 1,
            Some(false) => report.satisfaction_summary.unsatisfied += 1,
            None => {}
        }

        if let Some(price) = call.agreed_price {
            price_total += price;
            priced_calls += 1;
        }

        duration_total += u64::from(call.call_duration_sec);
        attempts_total += u64::from(call.attempts);
        counter_offers_total += u64::from(call.counter_offers);
    }

    report.satisfaction_summary.unknown = report.total_calls
        - report.satisfaction_summary.satisfied
        - report.satisfaction_summary.unsatisfied;

    if priced_calls > 0 {
        report.avg_agreed_price = (price_total / Decimal::from(priced_calls)).round_dp(2);
    }

    if report.total_calls > 0 {
        report.avg_call_duration_sec = mean(duration_total, report.total_calls);
        report.avg_attempts = mean(attempts_total, report.total_calls);
        report.avg_counter_offers = mean(counter_offers_total, report.total_calls);
    }

    report
}

fn mean(total: u64, count: u64) -> f64 {
    let raw = total as f64 / count as f64;
    (raw * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;
    use uuid::Uuid;

    use crate::domain::call::{CallOutcome, CallSummary, Sentiment};
    use crate::domain::load::LoadId;
    use crate::metrics::{summarize, MetricsReport};

    fn call(
        outcome: CallOutcome,
        sentiment: Sentiment,
        agreed_price: Option<i64>,
        satisfaction: Option<bool>,
    ) -> CallSummary {
        CallSummary {
            id: Uuid::new_v4(),
            load_id: LoadId("L-1".to_string()),
            agreed_price: agreed_price.map(Decimal::from),
            comments: None,
            special_conditions: None,
            outcome,
            sentiment,
            call_duration_sec: 120,
            attempts: 2,
            counter_offers: 1,
            satisfaction,
        }
    }

    #[test]
    fn empty_input_yields_the_all_zero_report() {
        assert_eq!(summarize(&[]), MetricsReport::default());
    }

    #[test]
    fn outcomes_and_sentiments_are_counted() {
        let report = summarize(&[
            call(CallOutcome::Accepted, Sentiment::Positive, Some(1500), Some(true)),
            call(CallOutcome::Rejected, Sentiment::Negative, None, Some(false)),
            call(CallOutcome::FailedNegotiation, Sentiment::Neutral, None, None),
            call(CallOutcome::NoResponse, Sentiment::Neutral, None, None),
            call(CallOutcome::InterestedFollowUp, Sentiment::Positive, None, None),
        ]);

        assert_eq!(report.total_calls, 5);
        assert_eq!(report.accepted, 1);
        assert_eq!(report.rejected, 1);
        assert_eq!(report.failed_negotiation, 1);
        assert_eq!(report.no_response, 1);
        assert_eq!(report.interested_follow_up, 1);
        assert_eq!(report.sentiment_summary.positive, 2);
        assert_eq!(report.sentiment_summary.neutral, 2);
        assert_eq!(report.sentiment_summary.negative, 1);
    }

    #[test]
    fn unknown_satisfaction_is_the_remainder() {
        let report = summarize(&[
            call(CallOutcome::Accepted, Sentiment::Positive, Some(1000), Some(true)),
            call(CallOutcome::Accepted, Sentiment::Positive, Some(1000), Some(true)),
            call(CallOutcome::Rejected, Sentiment::Negative, None, Some(false)),
            call(CallOutcome::NoResponse, Sentiment::Neutral, None, None),
        ]);

        assert_eq!(report.satisfaction_summary.satisfied, 2);
        assert_eq!(report.satisfaction_summary.unsatisfied, 1);
        assert_eq!(report.satisfaction_summary.unknown, 1);
    }

    #[test]
    fn average_price_ignores_calls_without_a_price() {
        let report = summarize(&[
            call(CallOutcome::Accepted, Sentiment::Positive, Some(1500), None),
            call(CallOutcome::Accepted, Sentiment::Positive, Some(1600), None),
            call(CallOutcome::NoResponse, Sentiment::Neutral, None, None),
        ]);

        assert_eq!(report.avg_agreed_price, Decimal::from(1550));
    }

    #[test]
    fn average_price_is_rounded_to_two_decimals() {
        let report = summarize(&[
            call(CallOutcome::Accepted, Sentiment::Positive, Some(1000), None),
            call(CallOutcome::Accepted, Sentiment::Positive, Some(1001), None),
            call(CallOutcome::Accepted, Sentiment::Positive, Some(1001), None),
        ]);

        // 3002 / 3 = 1000.666... -> 1000.67
        assert_eq!(report.avg_agreed_price, Decimal::new(100_067, 2));
    }

    #[test]
    fn duration_attempt_and_counter_means_cover_every_call() {
        let mut long_call =
            call(CallOutcome::Accepted, Sentiment::Positive, Some(1200), Some(true));
        long_call.call_duration_sec = 300;
        long_call.attempts = 5;
        long_call.counter_offers = 2;

        let report = summarize(&[
            long_call,
            call(CallOutcome::Rejected, Sentiment::Negative, None, None),
        ]);

        assert_eq!(report.avg_call_duration_sec, 210.0);
        assert_eq!(report.avg_attempts, 3.5);
        assert_eq!(report.avg_counter_offers, 1.5);
    }
}
