use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use loadline_core::config::{AppConfig, LoadOptions};
use toml::Value;

pub fn run() -> String {
    let config = match AppConfig::load(LoadOptions::default()) {
        Ok(config) => config,
        Err(error) => return format!("config validation failed: {error}"),
    };

    let config_file_path = detect_config_path();
    let config_file_doc = load_config_file_doc(config_file_path.as_deref());

    let mut lines = vec!["effective config (source precedence: env > file > default):".to_string()];

    let mut push = |key: &str, value: String, env_keys: &[&str]| {
        lines.push(render_line(
            key,
            &value,
            field_source(key, env_keys, config_file_doc.as_ref(), config_file_path.as_deref()),
        ));
    };

    push(
        "pricing.base_rate_per_mile",
        config.pricing.base_rate_per_mile.to_string(),
        &["LOADLINE_PRICING_BASE_RATE_PER_MILE"],
    );
    push(
        "pricing.equipment_premium",
        config.pricing.equipment_premium.to_string(),
        &["LOADLINE_PRICING_EQUIPMENT_PREMIUM"],
    );
    push(
        "pricing.urgency_premium",
        config.pricing.urgency_premium.to_string(),
        &["LOADLINE_PRICING_URGENCY_PREMIUM"],
    );
    push(
        "pricing.medical_premium",
        config.pricing.medical_premium.to_string(),
        &["LOADLINE_PRICING_MEDICAL_PREMIUM"],
    );
    push(
        "pricing.discount_rate",
        config.pricing.discount_rate.to_string(),
        &["LOADLINE_PRICING_DISCOUNT_RATE"],
    );
    push(
        "pricing.min_margin",
        config.pricing.min_margin.to_string(),
        &["LOADLINE_PRICING_MIN_MARGIN"],
    );
    push("pricing.premium_equipment", config.pricing.premium_equipment.join(", "), &[]);
    push(
        "negotiation.max_rounds",
        config.negotiation.max_rounds.to_string(),
        &["LOADLINE_NEGOTIATION_MAX_ROUNDS"],
    );
    push(
        "negotiation.rounding_step",
        config.negotiation.rounding_step.to_string(),
        &["LOADLINE_NEGOTIATION_ROUNDING_STEP"],
    );
    push(
        "search.urgent_keyword",
        config.search.urgent_keyword.clone(),
        &["LOADLINE_SEARCH_URGENT_KEYWORD"],
    );
    push(
        "logging.level",
        config.logging.level.clone(),
        &["LOADLINE_LOGGING_LEVEL", "LOADLINE_LOG_LEVEL"],
    );
    push(
        "logging.format",
        format!("{:?}", config.logging.format),
        &["LOADLINE_LOGGING_FORMAT", "LOADLINE_LOG_FORMAT"],
    );

    lines.join("\n")
}

fn detect_config_path() -> Option<PathBuf> {
    let root = PathBuf::from("loadline.toml");
    if root.exists() {
        return Some(root);
    }

    let nested = PathBuf::from("config/loadline.toml");
    if nested.exists() {
        return Some(nested);
    }

    None
}

fn load_config_file_doc(path: Option<&Path>) -> Option<Value> {
    let path = path?;
    let raw = fs::read_to_string(path).ok()?;
    raw.parse::<Value>().ok()
}

fn field_source(
    key_path: &str,
    env_keys: &[&str],
    config_file_doc: Option<&Value>,
    config_file_path: Option<&Path>,
) -> String {
    for env_key in env_keys {
        if env::var_os(env_key).is_some() {
            return format!("env ({env_key})");
        }
    }

    if let Some(doc) = config_file_doc {
        if contains_path(doc, key_path) {
            let file_path = config_file_path
                .map(|path| path.display().to_string())
                .unwrap_or_else(|| "config file".to_string());
            return format!("file ({file_path})");
        }
    }

    "default".to_string()
}

fn contains_path(root: &Value, key_path: &str) -> bool {
    let mut current = root;
    for key in key_path.split('.') {
        let Some(next) = current.get(key) else {
            return false;
        };
        current = next;
    }
    true
}

fn render_line(key: &str, value: &str, source: String) -> String {
    format!("- {key} = {value} (source: {source})")
}

#[cfg(test)]
mod tests {
    use toml::Value;

    use super::contains_path;

    #[test]
    fn nested_keys_are_found_in_a_config_doc() {
        let doc: Value = "[negotiation]\nmax_rounds = 4\n".parse().expect("valid toml");

        assert!(contains_path(&doc, "negotiation.max_rounds"));
        assert!(!contains_path(&doc, "negotiation.rounding_step"));
        assert!(!contains_path(&doc, "pricing.discount_rate"));
    }
}
