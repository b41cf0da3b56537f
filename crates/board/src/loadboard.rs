use async_trait::async_trait;
use tokio::sync::RwLock;

use loadline_core::domain::filter::LoadFilter;
use loadline_core::domain::load::Load;
use loadline_core::search::{LoadSource, SourceError};

/// In-memory loadboard backing the search strategy. Honors the storage query
/// contract: case-insensitive substring matching on text fields, inclusive
/// range matching on the pickup window and numeric fields.
#[derive(Default)]
pub struct InMemoryLoadBoard {
    loads: RwLock<Vec<Load>>,
}

impl InMemoryLoadBoard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_loads(loads: Vec<Load>) -> Self {
        Self { loads: RwLock::new(loads) }
    }

    /// Builds a board from a JSON array of loads, e.g. an exported board file.
    pub fn from_json_str(raw: &str) -> Result<Self, SourceError> {
        let loads: Vec<Load> =
            serde_json::from_str(raw).map_err(|error| SourceError::Decode(error.to_string()))?;
        Ok(Self::with_loads(loads))
    }

    pub async fn post(&self, load: Load) {
        self.loads.write().await.push(load);
    }

    pub async fn extend(&self, loads: impl IntoIterator<Item = Load>) {
        self.loads.write().await.extend(loads);
    }

    pub async fn len(&self) -> usize {
        self.loads.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.loads.read().await.is_empty()
    }
}

#[async_trait]
impl LoadSource for InMemoryLoadBoard {
    async fn query(&self, filter: &LoadFilter) -> Result<Vec<Load>, SourceError> {
        let loads = self.loads.read().await;
        Ok(loads.iter().filter(|load| matches_filter(load, filter)).cloned().collect())
    }
}

fn matches_filter(load: &Load, filter: &LoadFilter) -> bool {
    text_matches(&load.origin, filter.origin.as_deref())
        && text_matches(&load.destination, filter.destination.as_deref())
        && text_matches(&load.equipment_type, filter.equipment_type.as_deref())
        && text_matches(&load.commodity_type, filter.commodity_type.as_deref())
        && pickup_in_window(load, filter)
        && range_matches(load.weight, filter.min_weight, filter.max_weight)
        && range_matches(load.loadboard_rate, filter.min_rate, filter.max_rate)
        && range_matches(load.miles, filter.min_miles, filter.max_miles)
}

fn text_matches(value: &str, needle: Option<&str>) -> bool {
    match needle {
        Some(needle) => value.to_lowercase().contains(&needle.to_lowercase()),
        None => true,
    }
}

fn pickup_in_window(load: &Load, filter: &LoadFilter) -> bool {
    if filter.pickup_datetime_from.is_none() && filter.pickup_datetime_to.is_none() {
        return true;
    }

    // A bounded window cannot match a load with no pickup time on record.
    let Some(pickup) = load.pickup_datetime else {
        return false;
    };

    filter.pickup_datetime_from.map_or(true, |from| pickup >= from)
        && filter.pickup_datetime_to.map_or(true, |to| pickup <= to)
}

fn range_matches<T: PartialOrd + Copy>(value: T, min: Option<T>, max: Option<T>) -> bool {
    min.map_or(true, |min| value >= min) && max.map_or(true, |max| value <= max)
}
