use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::config::NegotiationConfig;
use crate::errors::DomainError;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NegotiationStatus {
    Accepted,
    /// Reserved response vocabulary: no rule currently produces it. Kept so
    /// callers can match exhaustively if an active-reject floor is added.
    Rejected,
    Counter,
    LimitReached,
}

impl NegotiationStatus {
    /// Terminal statuses end the negotiation; `Counter` expects another
    /// caller-driven turn.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Accepted | Self::Rejected | Self::LimitReached)
    }
}

/// One carrier turn. The caller owns the negotiation state: it threads the
/// prior `last_offer` and the 1-based `round_number` through each call and
/// applies `counter_suggestion` as the next `last_offer`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CounterOfferRequest {
    pub carrier_offer: Decimal,
    pub last_offer: Decimal,
    pub round_number: u32,
    /// Fixed for the lifetime of the negotiation.
    pub ceiling_rate: Decimal,
}

impl CounterOfferRequest {
    pub fn validate(&self) -> Result<(), DomainError> {
        for (name, amount) in [
            ("carrier_offer", self.carrier_offer),
            ("last_offer", self.last_offer),
            ("ceiling_rate", self.ceiling_rate),
        ] {
            if amount <= Decimal::ZERO {
                return Err(DomainError::InvalidCounterOffer(format!(
                    "{name} must be greater than zero"
                )));
            }
        }

        if self.round_number == 0 {
            return Err(DomainError::InvalidCounterOffer(
                "round_number is 1-based and must be at least 1".to_string(),
            ));
        }

        Ok(())
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CounterOfferResponse {
    pub status: NegotiationStatus,
    pub counter_suggestion: Option<Decimal>,
    /// Negative values are possible in the over-ceiling branch when the round
    /// number already exceeds the budget; the accept branch clamps at zero.
    /// Both behaviors are depended upon by callers.
    pub rounds_left: i64,
    pub message: String,
}

/// Pure, stateless decision per carrier turn.
#[derive(Clone, Debug, Default)]
pub struct NegotiationEngine {
    config: NegotiationConfig,
}

impl NegotiationEngine {
    pub fn new(config: NegotiationConfig) -> Self {
        Self { config }
    }

    pub fn max_rounds(&self) -> u32 {
        self.config.max_rounds
    }

    /// Evaluates a carrier's counter-offer. Rules apply in strict priority
    /// order: over-ceiling counter, accept, round-budget exhaustion, standard
    /// gap-splitting counter.
    pub fn evaluate(
        &self,
        request: &CounterOfferRequest,
    ) -> Result<CounterOfferResponse, DomainError> {
        request.validate()?;

        let max_rounds = i64::from(self.config.max_rounds);
        let round = i64::from(request.round_number);
        let step = self.config.rounding_step;

        // 1. Carrier offer exceeds our ceiling: pull them halfway back down,
        //    snapped to the rounding step.
        if request.carrier_offer > request.ceiling_rate {
            let gap = request.carrier_offer - request.ceiling_rate;
            let counter_suggestion = request.ceiling_rate - snapped_half_gap(gap, step);

            return Ok(CounterOfferResponse {
                status: NegotiationStatus::Counter,
                counter_suggestion: Some(counter_suggestion),
                rounds_left: max_rounds - round,
                message: format!(
                    "Your offer of ${:.2} is above our max. Could you consider ${:.2}?",
                    request.carrier_offer, counter_suggestion
                ),
            });
        }

        // 2. Carrier accepts or beats our last offer.
        if request.carrier_offer >= request.last_offer {
            return Ok(CounterOfferResponse {
                status: NegotiationStatus::Accepted,
                counter_suggestion: None,
                rounds_left: (max_rounds - round).max(0),
                message: "Great - transferring you to our sales team to lock that in. \
                          One moment."
                    .to_string(),
            });
        }

        // 3. Round budget exhausted.
        if request.round_number >= self.config.max_rounds {
            return Ok(CounterOfferResponse {
                status: NegotiationStatus::LimitReached,
                counter_suggestion: None,
                rounds_left: 0,
                message: "Thanks for staying with me. We've reached the limit of \
                          negotiation rounds."
                    .to_string(),
            });
        }

        // 4. Standard counter: split the gap toward the ceiling, never past it.
        let gap = request.ceiling_rate - request.carrier_offer;
        let counter_suggestion =
            (request.carrier_offer + snapped_half_gap(gap, step)).min(request.ceiling_rate);

        Ok(CounterOfferResponse {
            status: NegotiationStatus::Counter,
            counter_suggestion: Some(counter_suggestion),
            rounds_left: max_rounds - round,
            message: format!("Thanks - I can do ${counter_suggestion:.2}. What do you think?"),
        })
    }
}

/// Half the gap, floored to the rounding granularity: divide, floor, then
/// re-multiply by the step.
fn snapped_half_gap(gap: Decimal, step: Decimal) -> Decimal {
    (gap / Decimal::TWO / step).floor() * step
}
