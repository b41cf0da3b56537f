use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// An immutable set of optional search constraints. Absent fields are simply
/// not applied by the storage collaborator.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct LoadFilter {
    pub origin: Option<String>,
    pub destination: Option<String>,
    pub equipment_type: Option<String>,
    pub commodity_type: Option<String>,
    pub pickup_datetime_from: Option<DateTime<Utc>>,
    pub pickup_datetime_to: Option<DateTime<Utc>>,
    pub min_weight: Option<f64>,
    pub max_weight: Option<f64>,
    pub min_rate: Option<Decimal>,
    pub max_rate: Option<Decimal>,
    pub min_miles: Option<f64>,
    pub max_miles: Option<f64>,
}

impl LoadFilter {
    /// The widened retry variant: the pickup window and mileage range are
    /// cleared, everything else is kept. These four fields are the complete
    /// relaxation list; relaxation is a one-shot retry, not iterative.
    pub fn relaxed(&self) -> Self {
        Self {
            pickup_datetime_from: None,
            pickup_datetime_to: None,
            min_miles: None,
            max_miles: None,
            ..self.clone()
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}
