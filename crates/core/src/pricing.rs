use rust_decimal::Decimal;

use crate::config::PricingConfig;
use crate::domain::load::{Load, RateQuote};

/// Derives opening and ceiling offers for a load. Pure and deterministic; the
/// same load and config always produce the same quote.
pub trait PricingEngine: Send + Sync {
    fn quote(&self, load: &Load) -> RateQuote;
}

#[derive(Clone, Debug, Default)]
pub struct DeterministicPricingEngine {
    config: PricingConfig,
}

impl DeterministicPricingEngine {
    pub fn new(config: PricingConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &PricingConfig {
        &self.config
    }
}

impl PricingEngine for DeterministicPricingEngine {
    fn quote(&self, load: &Load) -> RateQuote {
        calculate_load_offer(&self.config, load)
    }
}

/// The pricing model behind [`DeterministicPricingEngine`].
///
/// The per-mile premiums adjust only the displayed `rate_per_mile`; they do
/// not feed the opening-offer or ceiling math. That decoupling matches the
/// observed production behavior and must stay until product says otherwise.
pub fn calculate_load_offer(config: &PricingConfig, load: &Load) -> RateQuote {
    let mut rate_per_mile = config.base_rate_per_mile;

    if config
        .premium_equipment
        .iter()
        .any(|equipment| equipment.eq_ignore_ascii_case(load.equipment_type.trim()))
    {
        rate_per_mile += config.equipment_premium;
    }
    if load.notes_or_empty().to_lowercase().contains("urgent") {
        rate_per_mile += config.urgency_premium;
    }
    if load.commodity_type.to_lowercase().contains("medical") {
        rate_per_mile += config.medical_premium;
    }

    // Opening offer is a slight discount from the listed price, rounded to
    // whole currency units (midpoint-nearest-even, like the listed board).
    let opening_offer =
        (load.loadboard_rate * (Decimal::ONE - config.discount_rate)).round();

    // Ceiling never drops below the public rate; thin loads get the margin.
    let ceiling_rate = (opening_offer + config.min_margin).max(load.loadboard_rate);

    RateQuote { opening_offer, ceiling_rate, rate_per_mile: rate_per_mile.round_dp(2) }
}
