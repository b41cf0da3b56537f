use chrono::{DateTime, TimeZone, Utc};
use rust_decimal::Decimal;
use uuid::Uuid;

use loadline_core::domain::call::{CallOutcome, CallSummary, Sentiment};
use loadline_core::domain::load::{Load, LoadId};

fn ts(year: i32, month: u32, day: u32, hour: u32) -> Option<DateTime<Utc>> {
    Utc.with_ymd_and_hms(year, month, day, hour, 0, 0).single()
}

/// Deterministic demo board used by the CLI and integration tests. L002 is
/// urgent and L003 delivers before L001, so the expected ranking over the
/// first three loads is L002, L003, L001.
pub fn demo_loads() -> Vec<Load> {
    vec![
        Load {
            load_id: LoadId("L001".to_string()),
            origin: "Chicago, IL".to_string(),
            destination: "Dallas, TX".to_string(),
            pickup_datetime: ts(2025, 8, 4, 9),
            delivery_datetime: ts(2025, 8, 7, 17),
            equipment_type: "Dry Van".to_string(),
            loadboard_rate: Decimal::from(1850),
            notes: Some("Normal".to_string()),
            weight: 24_000.0,
            commodity_type: "General Freight".to_string(),
            num_of_pieces: 12,
            miles: 925.0,
            dimensions: "48x102".to_string(),
        },
        Load {
            load_id: LoadId("L002".to_string()),
            origin: "Chicago, IL".to_string(),
            destination: "Dallas, TX".to_string(),
            pickup_datetime: ts(2025, 8, 3, 6),
            delivery_datetime: ts(2025, 8, 5, 12),
            equipment_type: "Reefer".to_string(),
            loadboard_rate: Decimal::from(2100),
            notes: Some("Urgent - ASAP".to_string()),
            weight: 18_500.0,
            commodity_type: "Medical Supplies".to_string(),
            num_of_pieces: 8,
            miles: 925.0,
            dimensions: "48x102".to_string(),
        },
        Load {
            load_id: LoadId("L003".to_string()),
            origin: "Chicago, IL".to_string(),
            destination: "Dallas, TX".to_string(),
            pickup_datetime: ts(2025, 8, 4, 14),
            delivery_datetime: ts(2025, 8, 6, 9),
            equipment_type: "Dry Van".to_string(),
            loadboard_rate: Decimal::from(1790),
            notes: None,
            weight: 22_000.0,
            commodity_type: "Paper Products".to_string(),
            num_of_pieces: 20,
            miles: 925.0,
            dimensions: "48x102".to_string(),
        },
        Load {
            load_id: LoadId("L004".to_string()),
            origin: "Atlanta, GA".to_string(),
            destination: "Miami, FL".to_string(),
            pickup_datetime: ts(2025, 8, 5, 8),
            delivery_datetime: ts(2025, 8, 6, 18),
            equipment_type: "Flatbed".to_string(),
            loadboard_rate: Decimal::from(1375),
            notes: Some("Tarps required".to_string()),
            weight: 31_000.0,
            commodity_type: "Steel Coils".to_string(),
            num_of_pieces: 4,
            miles: 662.0,
            dimensions: "48x96".to_string(),
        },
        Load {
            load_id: LoadId("L005".to_string()),
            origin: "Denver, CO".to_string(),
            destination: "Phoenix, AZ".to_string(),
            pickup_datetime: None,
            delivery_datetime: None,
            equipment_type: "Dry Van".to_string(),
            loadboard_rate: Decimal::from(1620),
            notes: None,
            weight: 15_000.0,
            commodity_type: "Consumer Electronics".to_string(),
            num_of_pieces: 30,
            miles: 821.0,
            dimensions: "53x102".to_string(),
        },
    ]
}

/// Deterministic call history pairing with the demo board.
pub fn demo_calls() -> Vec<CallSummary> {
    vec![
        CallSummary {
            id: Uuid::from_u128(1),
            load_id: LoadId("L001".to_string()),
            agreed_price: Some(Decimal::from(1700)),
            comments: Some("settled on the second counter".to_string()),
            special_conditions: None,
            outcome: CallOutcome::Accepted,
            sentiment: Sentiment::Positive,
            call_duration_sec: 312,
            attempts: 1,
            counter_offers: 2,
            satisfaction: Some(true),
        },
        CallSummary {
            id: Uuid::from_u128(2),
            load_id: LoadId("L002".to_string()),
            agreed_price: None,
            comments: Some("wanted well above ceiling".to_string()),
            special_conditions: None,
            outcome: CallOutcome::FailedNegotiation,
            sentiment: Sentiment::Negative,
            call_duration_sec: 458,
            attempts: 2,
            counter_offers: 3,
            satisfaction: Some(false),
        },
        CallSummary {
            id: Uuid::from_u128(3),
            load_id: LoadId("L004".to_string()),
            agreed_price: None,
            comments: None,
            special_conditions: None,
            outcome: CallOutcome::NoResponse,
            sentiment: Sentiment::Neutral,
            call_duration_sec: 41,
            attempts: 3,
            counter_offers: 0,
            satisfaction: None,
        },
        CallSummary {
            id: Uuid::from_u128(4),
            load_id: LoadId("L005".to_string()),
            agreed_price: Some(Decimal::from(1530)),
            comments: None,
            special_conditions: Some("weekend delivery".to_string()),
            outcome: CallOutcome::Accepted,
            sentiment: Sentiment::Positive,
            call_duration_sec: 205,
            attempts: 1,
            counter_offers: 1,
            satisfaction: None,
        },
    ]
}
