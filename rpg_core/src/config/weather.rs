//! Weather effect configuration

use super::ConfigError;
use crate::stats::ModifierKind;
use crate::types::StatType;
use crate::weather::WeatherEffects;
use std::path::Path;

fn validate(config: WeatherEffects) -> Result<WeatherEffects, ConfigError> {
    if !(config.poll_interval_secs.is_finite() && config.poll_interval_secs > 0.0) {
        return Err(ConfigError::ValidationError(format!(
            "poll_interval_secs must be positive, got {}",
            config.poll_interval_secs
        )));
    }
    let mut seen = Vec::new();
    for effect in &config.effects {
        if seen.contains(&effect.weather) {
            return Err(ConfigError::ValidationError(format!(
                "weather {} listed twice",
                effect.weather
            )));
        }
        seen.push(effect.weather);
        if let Some(m) = effect.modifiers.iter().find(|m| m.kind != ModifierKind::Attached) {
            return Err(ConfigError::ValidationError(format!(
                "weather {}: modifier on {:?} must be attached",
                effect.weather, m.stat_type
            )));
        }
        if effect.modifiers.iter().any(|m| m.stat_type == StatType::CurrentHealth) {
            return Err(ConfigError::ValidationError(format!(
                "weather {}: current_health can't carry an attached modifier",
                effect.weather
            )));
        }
    }
    Ok(config)
}

/// Load weather effects from a TOML file
pub fn load_weather_effects(path: &Path) -> Result<WeatherEffects, ConfigError> {
    validate(super::load_toml(path)?)
}

/// Load weather effects from a TOML string
pub fn parse_weather_effects(content: &str) -> Result<WeatherEffects, ConfigError> {
    validate(super::parse_toml(content)?)
}

/// Get the built-in weather effects
pub fn default_weather_effects() -> WeatherEffects {
    let toml = include_str!("../../config/weather.toml");
    parse_weather_effects(toml).unwrap_or_else(|e| {
        tracing::error!("Built-in weather effects failed to load: {}", e);
        WeatherEffects::default()
    })
}
