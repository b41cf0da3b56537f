use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LoadId(pub String);

/// A freight shipment record as posted on the loadboard. Owned by the storage
/// collaborator; the engine only reads it.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Load {
    pub load_id: LoadId,
    pub origin: String,
    pub destination: String,
    pub pickup_datetime: Option<DateTime<Utc>>,
    pub delivery_datetime: Option<DateTime<Utc>>,
    pub equipment_type: String,
    /// Publicly posted rate before negotiation.
    #[serde(default)]
    pub loadboard_rate: Decimal,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub weight: f64,
    #[serde(default)]
    pub commodity_type: String,
    #[serde(default)]
    pub num_of_pieces: u32,
    #[serde(default)]
    pub miles: f64,
    #[serde(default)]
    pub dimensions: String,
}

impl Load {
    /// Notes with absence collapsed to an empty string, so downstream keyword
    /// checks never branch on `Option`.
    pub fn notes_or_empty(&self) -> &str {
        self.notes.as_deref().unwrap_or("")
    }
}

/// Pricing metadata derived from a load. Never stored independently; always
/// attached to the load it was computed from.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RateQuote {
    /// First proposed price, rounded to whole currency units.
    pub opening_offer: Decimal,
    /// Maximum price the engine will agree to; never below the listed rate.
    pub ceiling_rate: Decimal,
    /// Display-only per-mile rate, two decimals. Does not feed the offer math.
    pub rate_per_mile: Decimal,
}

/// A load enriched with its computed pricing, the unit the search strategy
/// hands back to callers.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LoadQuote {
    #[serde(flatten)]
    pub load: Load,
    pub opening_offer: Decimal,
    pub ceiling_rate: Decimal,
    pub rate_per_mile: Decimal,
}

impl LoadQuote {
    pub fn new(load: Load, rate: RateQuote) -> Self {
        Self {
            load,
            opening_offer: rate.opening_offer,
            ceiling_rate: rate.ceiling_rate,
            rate_per_mile: rate.rate_per_mile,
        }
    }
}
