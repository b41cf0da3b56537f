pub mod config;
pub mod domain;
pub mod errors;
pub mod metrics;
pub mod negotiation;
pub mod pricing;
pub mod ranking;
pub mod registry;
pub mod search;

pub use config::{
    AppConfig, ConfigError, ConfigOverrides, LoadOptions, LogFormat, NegotiationConfig,
    PricingConfig, SearchConfig,
};
pub use domain::call::{CallOutcome, CallSummary, Sentiment};
pub use domain::carrier::{AuthorizationStatus, CarrierAuthorization};
pub use domain::filter::LoadFilter;
pub use domain::load::{Load, LoadId, LoadQuote, RateQuote};
pub use errors::{ApplicationError, DomainError, InterfaceError};
pub use metrics::{summarize, MetricsReport, SatisfactionSummary, SentimentSummary};
pub use negotiation::{
    CounterOfferRequest, CounterOfferResponse, NegotiationEngine, NegotiationStatus,
};
pub use pricing::{DeterministicPricingEngine, PricingEngine};
pub use ranking::LoadRanker;
pub use registry::{CarrierRegistry, RegistryError, StaticCarrierRegistry};
pub use search::{LoadSource, SearchStrategy, SourceError};
