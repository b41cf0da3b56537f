use chrono::{DateTime, Utc};

use crate::config::SearchConfig;
use crate::domain::load::Load;

/// Totally orders candidate loads: urgent loads first, then earliest delivery.
/// Loads without a delivery time sort last within their urgency tier, and ties
/// preserve input order (stable sort).
#[derive(Clone, Debug, Default)]
pub struct LoadRanker {
    config: SearchConfig,
}

impl LoadRanker {
    pub fn new(config: SearchConfig) -> Self {
        Self { config }
    }

    pub fn rank(&self, mut loads: Vec<Load>) -> Vec<Load> {
        let keyword = self.config.urgent_keyword.to_lowercase();
        loads.sort_by_key(|load| sort_key(load, &keyword));
        loads
    }

    pub fn is_urgent(&self, load: &Load) -> bool {
        load.notes_or_empty().to_lowercase().contains(&self.config.urgent_keyword.to_lowercase())
    }
}

fn sort_key(load: &Load, keyword: &str) -> (bool, DateTime<Utc>) {
    let not_urgent = !load.notes_or_empty().to_lowercase().contains(keyword);
    let delivery = load.delivery_datetime.unwrap_or(DateTime::<Utc>::MAX_UTC);
    (not_urgent, delivery)
}
