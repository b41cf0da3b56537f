use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Effective configuration for the engine and its surfaces. Engine constants
/// are plain injected structs, never process-wide singletons, so tests can
/// override them deterministically.
#[derive(Clone, Debug)]
pub struct AppConfig {
    pub pricing: PricingConfig,
    pub negotiation: NegotiationConfig,
    pub search: SearchConfig,
    pub logging: LoggingConfig,
}

#[derive(Clone, Debug, PartialEq)]
pub struct PricingConfig {
    pub base_rate_per_mile: Decimal,
    pub equipment_premium: Decimal,
    pub urgency_premium: Decimal,
    pub medical_premium: Decimal,
    pub discount_rate: Decimal,
    pub min_margin: Decimal,
    /// Equipment types that earn the per-mile premium, compared
    /// case-insensitively.
    pub premium_equipment: Vec<String>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NegotiationConfig {
    pub max_rounds: u32,
    /// Currency granularity counter-offers are snapped to.
    pub rounding_step: Decimal,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SearchConfig {
    /// Substring in a load's notes that marks it urgent.
    pub urgent_keyword: String,
}

#[derive(Clone, Debug)]
pub struct LoggingConfig {
    pub level: String,
    pub format: LogFormat,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LogFormat {
    Compact,
    Pretty,
    Json,
}

#[derive(Clone, Debug, Default)]
pub struct ConfigOverrides {
    pub log_level: Option<String>,
    pub log_format: Option<LogFormat>,
    pub max_rounds: Option<u32>,
    pub urgent_keyword: Option<String>,
}

#[derive(Clone, Debug, Default)]
pub struct LoadOptions {
    pub config_path: Option<PathBuf>,
    pub require_file: bool,
    pub overrides: ConfigOverrides,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not read config file `{path}`: {source}")]
    ReadFile { path: PathBuf, source: std::io::Error },
    #[error("could not parse config file `{path}`: {source}")]
    ParseFile { path: PathBuf, source: toml::de::Error },
    #[error("required config file was not found: `{0}`")]
    MissingConfigFile(PathBuf),
    #[error("environment variable interpolation failed for `{var}`")]
    MissingEnvInterpolation { var: String },
    #[error("unterminated environment interpolation expression")]
    UnterminatedInterpolation,
    #[error("invalid environment override for `{key}`: `{value}`")]
    InvalidEnvOverride { key: String, value: String },
    #[error("configuration validation failed: {0}")]
    Validation(String),
}

impl Default for PricingConfig {
    fn default() -> Self {
        Self {
            base_rate_per_mile: Decimal::new(275, 2),
            equipment_premium: Decimal::new(20, 2),
            urgency_premium: Decimal::new(10, 2),
            medical_premium: Decimal::new(5, 2),
            discount_rate: Decimal::new(10, 2),
            min_margin: Decimal::from(150),
            premium_equipment: vec!["reefer".to_string(), "flatbed".to_string()],
        }
    }
}

impl Default for NegotiationConfig {
    fn default() -> Self {
        Self { max_rounds: 3, rounding_step: Decimal::from(10) }
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self { urgent_keyword: "urgent".to_string() }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            pricing: PricingConfig::default(),
            negotiation: NegotiationConfig::default(),
            search: SearchConfig::default(),
            logging: LoggingConfig { level: "info".to_string(), format: LogFormat::Compact },
        }
    }
}

impl std::str::FromStr for LogFormat {
    type Err = ConfigError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "compact" => Ok(Self::Compact),
            "pretty" => Ok(Self::Pretty),
            "json" => Ok(Self::Json),
            other => Err(ConfigError::Validation(format!(
                "unsupported log format `{other}` (expected compact|pretty|json)"
            ))),
        }
    }
}

impl AppConfig {
    pub fn load(options: LoadOptions) -> Result<Self, ConfigError> {
        let mut config = Self::default();
        let maybe_path = resolve_config_path(options.config_path.as_deref());

        if let Some(path) = maybe_path {
            let patch = read_patch(&path)?;
            config.apply_patch(patch)?;
        } else if options.require_file {
            let expected = options.config_path.unwrap_or_else(|| PathBuf::from("loadline.toml"));
            return Err(ConfigError::MissingConfigFile(expected));
        }

        config.apply_env_overrides()?;
        config.apply_overrides(options.overrides);
        config.validate()?;

        Ok(config)
    }

    fn apply_patch(&mut self, patch: ConfigPatch) -> Result<(), ConfigError> {
        if let Some(pricing) = patch.pricing {
            if let Some(value) = pricing.base_rate_per_mile {
                self.pricing.base_rate_per_mile = decimal_field("pricing.base_rate_per_mile", value)?;
            }
            if let Some(value) = pricing.equipment_premium {
                self.pricing.equipment_premium = decimal_field("pricing.equipment_premium", value)?;
            }
            if let Some(value) = pricing.urgency_premium {
                self.pricing.urgency_premium = decimal_field("pricing.urgency_premium", value)?;
            }
            if let Some(value) = pricing.medical_premium {
                self.pricing.medical_premium = decimal_field("pricing.medical_premium", value)?;
            }
            if let Some(value) = pricing.discount_rate {
                self.pricing.discount_rate = decimal_field("pricing.discount_rate", value)?;
            }
            if let Some(value) = pricing.min_margin {
                self.pricing.min_margin = decimal_field("pricing.min_margin", value)?;
            }
            if let Some(premium_equipment) = pricing.premium_equipment {
                self.pricing.premium_equipment = premium_equipment;
            }
        }

        if let Some(negotiation) = patch.negotiation {
            if let Some(max_rounds) = negotiation.max_rounds {
                self.negotiation.max_rounds = max_rounds;
            }
            if let Some(value) = negotiation.rounding_step {
                self.negotiation.rounding_step =
                    decimal_field("negotiation.rounding_step", value)?;
            }
        }

        if let Some(search) = patch.search {
            if let Some(urgent_keyword) = search.urgent_keyword {
                self.search.urgent_keyword = urgent_keyword;
            }
        }

        if let Some(logging) = patch.logging {
            if let Some(level) = logging.level {
                self.logging.level = level;
            }
            if let Some(format) = logging.format {
                self.logging.format = format;
            }
        }

        Ok(())
    }

    fn apply_env_overrides(&mut self) -> Result<(), ConfigError> {
        if let Some(value) = read_env("LOADLINE_PRICING_BASE_RATE_PER_MILE") {
            self.pricing.base_rate_per_mile =
                parse_decimal("LOADLINE_PRICING_BASE_RATE_PER_MILE", &value)?;
        }
        if let Some(value) = read_env("LOADLINE_PRICING_EQUIPMENT_PREMIUM") {
            self.pricing.equipment_premium =
                parse_decimal("LOADLINE_PRICING_EQUIPMENT_PREMIUM", &value)?;
        }
        if let Some(value) = read_env("LOADLINE_PRICING_URGENCY_PREMIUM") {
            self.pricing.urgency_premium =
                parse_decimal("LOADLINE_PRICING_URGENCY_PREMIUM", &value)?;
        }
        if let Some(value) = read_env("LOADLINE_PRICING_MEDICAL_PREMIUM") {
            self.pricing.medical_premium =
                parse_decimal("LOADLINE_PRICING_MEDICAL_PREMIUM", &value)?;
        }
        if let Some(value) = read_env("LOADLINE_PRICING_DISCOUNT_RATE") {
            self.pricing.discount_rate = parse_decimal("LOADLINE_PRICING_DISCOUNT_RATE", &value)?;
        }
        if let Some(value) = read_env("LOADLINE_PRICING_MIN_MARGIN") {
            self.pricing.min_margin = parse_decimal("LOADLINE_PRICING_MIN_MARGIN", &value)?;
        }

        if let Some(value) = read_env("LOADLINE_NEGOTIATION_MAX_ROUNDS") {
            self.negotiation.max_rounds = parse_u32("LOADLINE_NEGOTIATION_MAX_ROUNDS", &value)?;
        }
        if let Some(value) = read_env("LOADLINE_NEGOTIATION_ROUNDING_STEP") {
            self.negotiation.rounding_step =
                parse_decimal("LOADLINE_NEGOTIATION_ROUNDING_STEP", &value)?;
        }

        if let Some(value) = read_env("LOADLINE_SEARCH_URGENT_KEYWORD") {
            self.search.urgent_keyword = value;
        }

        let log_level = read_env("LOADLINE_LOGGING_LEVEL").or_else(|| read_env("LOADLINE_LOG_LEVEL"));
        if let Some(value) = log_level {
            self.logging.level = value;
        }
        let log_format =
            read_env("LOADLINE_LOGGING_FORMAT").or_else(|| read_env("LOADLINE_LOG_FORMAT"));
        if let Some(value) = log_format {
            self.logging.format = value.parse()?;
        }

        Ok(())
    }

    fn apply_overrides(&mut self, overrides: ConfigOverrides) {
        if let Some(log_level) = overrides.log_level {
            self.logging.level = log_level;
        }
        if let Some(log_format) = overrides.log_format {
            self.logging.format = log_format;
        }
        if let Some(max_rounds) = overrides.max_rounds {
            self.negotiation.max_rounds = max_rounds;
        }
        if let Some(urgent_keyword) = overrides.urgent_keyword {
            self.search.urgent_keyword = urgent_keyword;
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_pricing(&self.pricing)?;
        validate_negotiation(&self.negotiation)?;
        validate_search(&self.search)?;
        validate_logging(&self.logging)?;
        Ok(())
    }
}

fn resolve_config_path(explicit_path: Option<&Path>) -> Option<PathBuf> {
    if let Some(path) = explicit_path {
        return path.exists().then_some(path.to_path_buf());
    }

    [PathBuf::from("loadline.toml"), PathBuf::from("config/loadline.toml")]
        .into_iter()
        .find(|path| path.exists())
}

fn read_patch(path: &Path) -> Result<ConfigPatch, ConfigError> {
    let raw = fs::read_to_string(path)
        .map_err(|source| ConfigError::ReadFile { path: path.to_path_buf(), source })?;

    let interpolated = interpolate_env_vars(&raw)?;
    toml::from_str::<ConfigPatch>(&interpolated)
        .map_err(|source| ConfigError::ParseFile { path: path.to_path_buf(), source })
}

fn interpolate_env_vars(input: &str) -> Result<String, ConfigError> {
    let mut output = String::with_capacity(input.len());
    let mut chars = input.chars().peekable();

    while let Some(ch) = chars.next() {
        if ch == '$' && matches!(chars.peek(), Some('{')) {
            chars.next();
            let mut key = String::new();

            loop {
                match chars.next() {
                    Some('}') => break,
                    Some(next) => key.push(next),
                    None => return Err(ConfigError::UnterminatedInterpolation),
                }
            }

            let value = env::var(&key)
                .map_err(|_| ConfigError::MissingEnvInterpolation { var: key.clone() })?;
            output.push_str(&value);
            continue;
        }

        output.push(ch);
    }

    Ok(output)
}

fn validate_pricing(pricing: &PricingConfig) -> Result<(), ConfigError> {
    if pricing.base_rate_per_mile <= Decimal::ZERO {
        return Err(ConfigError::Validation(
            "pricing.base_rate_per_mile must be greater than zero".to_string(),
        ));
    }

    for (name, premium) in [
        ("pricing.equipment_premium", pricing.equipment_premium),
        ("pricing.urgency_premium", pricing.urgency_premium),
        ("pricing.medical_premium", pricing.medical_premium),
    ] {
        if premium < Decimal::ZERO {
            return Err(ConfigError::Validation(format!("{name} must not be negative")));
        }
    }

    if pricing.discount_rate < Decimal::ZERO || pricing.discount_rate >= Decimal::ONE {
        return Err(ConfigError::Validation(
            "pricing.discount_rate must be in range [0, 1)".to_string(),
        ));
    }

    if pricing.min_margin < Decimal::ZERO {
        return Err(ConfigError::Validation(
            "pricing.min_margin must not be negative".to_string(),
        ));
    }

    if pricing.premium_equipment.iter().any(|entry| entry.trim().is_empty()) {
        return Err(ConfigError::Validation(
            "pricing.premium_equipment entries must not be empty".to_string(),
        ));
    }

    Ok(())
}

fn validate_negotiation(negotiation: &NegotiationConfig) -> Result<(), ConfigError> {
    if negotiation.max_rounds == 0 {
        return Err(ConfigError::Validation(
            "negotiation.max_rounds must be greater than zero".to_string(),
        ));
    }

    if negotiation.rounding_step <= Decimal::ZERO {
        return Err(ConfigError::Validation(
            "negotiation.rounding_step must be greater than zero".to_string(),
        ));
    }

    Ok(())
}

fn validate_search(search: &SearchConfig) -> Result<(), ConfigError> {
    if search.urgent_keyword.trim().is_empty() {
        return Err(ConfigError::Validation(
            "search.urgent_keyword must not be empty".to_string(),
        ));
    }

    Ok(())
}

fn validate_logging(logging: &LoggingConfig) -> Result<(), ConfigError> {
    let level = logging.level.trim().to_ascii_lowercase();
    match level.as_str() {
        "trace" | "debug" | "info" | "warn" | "error" => Ok(()),
        _ => Err(ConfigError::Validation(
            "logging.level must be one of trace|debug|info|warn|error".to_string(),
        )),
    }
}

fn read_env(key: &str) -> Option<String> {
    env::var(key).ok().filter(|value| !value.trim().is_empty())
}

fn decimal_field(name: &str, value: f64) -> Result<Decimal, ConfigError> {
    Decimal::try_from(value).map_err(|_| ConfigError::InvalidEnvOverride {
        key: name.to_string(),
        value: value.to_string(),
    })
}

fn parse_decimal(key: &str, value: &str) -> Result<Decimal, ConfigError> {
    value.parse::<Decimal>().map_err(|_| ConfigError::InvalidEnvOverride {
        key: key.to_string(),
        value: value.to_string(),
    })
}

fn parse_u32(key: &str, value: &str) -> Result<u32, ConfigError> {
    value.parse::<u32>().map_err(|_| ConfigError::InvalidEnvOverride {
        key: key.to_string(),
        value: value.to_string(),
    })
}

#[derive(Debug, Default, Deserialize)]
struct ConfigPatch {
    pricing: Option<PricingPatch>,
    negotiation: Option<NegotiationPatch>,
    search: Option<SearchPatch>,
    logging: Option<LoggingPatch>,
}

#[derive(Debug, Default, Deserialize)]
struct PricingPatch {
    base_rate_per_mile: Option<f64>,
    equipment_premium: Option<f64>,
    urgency_premium: Option<f64>,
    medical_premium: Option<f64>,
    discount_rate: Option<f64>,
    min_margin: Option<f64>,
    premium_equipment: Option<Vec<String>>,
}

#[derive(Debug, Default, Deserialize)]
struct NegotiationPatch {
    max_rounds: Option<u32>,
    rounding_step: Option<f64>,
}

#[derive(Debug, Default, Deserialize)]
struct SearchPatch {
    urgent_keyword: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct LoggingPatch {
    level: Option<String>,
    format: Option<LogFormat>,
}
