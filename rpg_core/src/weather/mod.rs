//! Weather - Polled world weather and the stat effects it attaches

use crate::stats::{ModifierHandle, StatModifier, StatSystem};
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Coarse weather categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WeatherKind {
    Clear,
    Clouds,
    Rain,
    Snow,
    Extreme,
}

impl WeatherKind {
    pub fn all() -> &'static [WeatherKind] {
        &[
            WeatherKind::Clear,
            WeatherKind::Clouds,
            WeatherKind::Rain,
            WeatherKind::Snow,
            WeatherKind::Extreme,
        ]
    }

    pub fn name(&self) -> &'static str {
        match self {
            WeatherKind::Clear => "Clear",
            WeatherKind::Clouds => "Clouds",
            WeatherKind::Rain => "Rain",
            WeatherKind::Snow => "Snow",
            WeatherKind::Extreme => "Extreme",
        }
    }

    /// Map a provider's `main` condition group
    pub fn from_main(main: &str) -> WeatherKind {
        match main {
            "Clear" => WeatherKind::Clear,
            "Clouds" | "Mist" | "Smoke" | "Haze" | "Dust" | "Fog" | "Sand" | "Ash" => WeatherKind::Clouds,
            "Rain" | "Drizzle" => WeatherKind::Rain,
            "Snow" => WeatherKind::Snow,
            "Thunderstorm" | "Squall" | "Tornado" => WeatherKind::Extreme,
            other => {
                tracing::warn!("Unknown weather condition '{}', treating as clear", other);
                WeatherKind::Clear
            }
        }
    }
}

impl fmt::Display for WeatherKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

#[derive(Error, Debug)]
pub enum WeatherError {
    #[error("Failed to parse weather report: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("Weather report has no conditions")]
    EmptyReport,
    #[error("Weather provider failed: {0}")]
    Provider(String),
}

#[derive(Debug, Clone, Deserialize)]
struct Condition {
    main: String,
}

/// Payload of the weather API: `{"weather":[{"main":"Rain"}]}`
#[derive(Debug, Clone, Deserialize)]
pub struct WeatherReport {
    weather: Vec<Condition>,
}

impl WeatherReport {
    pub fn parse(json: &str) -> Result<Self, WeatherError> {
        let report: WeatherReport = serde_json::from_str(json)?;
        if report.weather.is_empty() {
            return Err(WeatherError::EmptyReport);
        }
        Ok(report)
    }

    /// Kind of the first (primary) condition
    pub fn kind(&self) -> Result<WeatherKind, WeatherError> {
        self.weather
            .first()
            .map(|c| WeatherKind::from_main(&c.main))
            .ok_or(WeatherError::EmptyReport)
    }
}

/// Parse a weather API payload straight to a kind
pub fn parse_weather(json: &str) -> Result<WeatherKind, WeatherError> {
    WeatherReport::parse(json)?.kind()
}

/// Source of current weather, typically an HTTP client owned by the host
pub trait WeatherProvider {
    fn fetch(&mut self) -> Result<WeatherKind, WeatherError>;
}

/// Stat modifiers attached while a weather is active
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeatherEffect {
    pub weather: WeatherKind,
    #[serde(default)]
    pub modifiers: Vec<StatModifier>,
}

/// Poll rate plus per-weather effects
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeatherEffects {
    pub poll_interval_secs: f64,
    #[serde(default)]
    pub effects: Vec<WeatherEffect>,
}

impl Default for WeatherEffects {
    fn default() -> Self {
        WeatherEffects {
            poll_interval_secs: 60.0,
            effects: Vec::new(),
        }
    }
}

impl WeatherEffects {
    pub fn modifiers_for(&self, kind: WeatherKind) -> &[StatModifier] {
        self.effects
            .iter()
            .find(|e| e.weather == kind)
            .map(|e| e.modifiers.as_slice())
            .unwrap_or(&[])
    }
}

/// Tracks the active weather and keeps its modifiers attached to one
/// stat system.
#[derive(Debug, Clone)]
pub struct WeatherSystem {
    current: Option<WeatherKind>,
    effects: WeatherEffects,
    handles: Vec<ModifierHandle>,
    until_poll: f64,
}

impl WeatherSystem {
    /// The first `tick` polls immediately
    pub fn new(effects: WeatherEffects) -> Self {
        WeatherSystem {
            current: None,
            effects,
            handles: Vec::new(),
            until_poll: 0.0,
        }
    }

    pub fn current(&self) -> Option<WeatherKind> {
        self.current
    }

    pub fn effects(&self) -> &WeatherEffects {
        &self.effects
    }

    /// Seconds until the next poll
    pub fn until_poll(&self) -> f64 {
        self.until_poll
    }

    /// Poll the provider when due.
    ///
    /// Returns the new weather when it changed. Provider errors are logged
    /// and the previous weather stays in effect.
    pub fn tick(
        &mut self,
        delta: f64,
        provider: &mut dyn WeatherProvider,
        stats: &mut StatSystem,
    ) -> Option<WeatherKind> {
        self.until_poll -= delta;
        if self.until_poll > 0.0 {
            return None;
        }
        self.until_poll = self.effects.poll_interval_secs;

        match provider.fetch() {
            Ok(kind) => self.set_weather(kind, stats).then_some(kind),
            Err(e) => {
                tracing::warn!("Weather poll failed, keeping {:?}: {}", self.current, e);
                None
            }
        }
    }

    /// Switch weather, swapping attached modifiers. Returns false if
    /// `kind` was already active.
    pub fn set_weather(&mut self, kind: WeatherKind, stats: &mut StatSystem) -> bool {
        if self.current == Some(kind) {
            return false;
        }
        let previous = self.current;
        self.clear(stats);
        self.handles = stats.add_modifiers(self.effects.modifiers_for(kind));
        tracing::debug!("Weather {:?} -> {}", previous, kind);
        self.current = Some(kind);
        true
    }

    /// Remove all weather modifiers from `stats`
    pub fn clear(&mut self, stats: &mut StatSystem) {
        stats.remove_attached_modifiers(&self.handles);
        self.handles.clear();
        self.current = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::StatType;

    struct Scripted(Vec<Result<WeatherKind, WeatherError>>);

    impl WeatherProvider for Scripted {
        fn fetch(&mut self) -> Result<WeatherKind, WeatherError> {
            if self.0.is_empty() {
                return Err(WeatherError::Provider("script exhausted".to_string()));
            }
            self.0.remove(0)
        }
    }

    fn effects() -> WeatherEffects {
        WeatherEffects {
            poll_interval_secs: 10.0,
            effects: vec![
                WeatherEffect {
                    weather: WeatherKind::Rain,
                    modifiers: vec![StatModifier::attached(StatType::MovementSpeed, -1.0)],
                },
                WeatherEffect {
                    weather: WeatherKind::Snow,
                    modifiers: vec![
                        StatModifier::attached(StatType::MovementSpeed, -2.0),
                        StatModifier::attached(StatType::DashSpeedMultiplier, -0.5),
                    ],
                },
            ],
        }
    }

    fn stats() -> StatSystem {
        StatSystem::new()
            .with_stat(StatType::MovementSpeed, 5.0, 0.0, 20.0)
            .with_stat(StatType::DashSpeedMultiplier, 2.0, 1.0, 5.0)
    }

    #[test]
    fn test_parse_report() {
        assert_eq!(parse_weather(r#"{"weather":[{"main":"Drizzle"}]}"#).unwrap(), WeatherKind::Rain);
        assert_eq!(
            parse_weather(r#"{"weather":[{"main":"Thunderstorm","id":211}],"name":"Oslo"}"#).unwrap(),
            WeatherKind::Extreme
        );
        assert_eq!(parse_weather(r#"{"weather":[{"main":"Fog"}]}"#).unwrap(), WeatherKind::Clouds);
        assert_eq!(parse_weather(r#"{"weather":[{"main":"Meteors"}]}"#).unwrap(), WeatherKind::Clear);
    }

    #[test]
    fn test_parse_errors() {
        assert!(matches!(parse_weather(r#"{"weather":[]}"#), Err(WeatherError::EmptyReport)));
        assert!(matches!(parse_weather("not json"), Err(WeatherError::Parse(_))));
        assert!(matches!(parse_weather(r#"{"main":"Rain"}"#), Err(WeatherError::Parse(_))));
    }

    #[test]
    fn test_weather_swaps_modifiers() {
        let mut stats = stats();
        let mut weather = WeatherSystem::new(effects());

        assert!(weather.set_weather(WeatherKind::Rain, &mut stats));
        assert!((stats.get_current_value(StatType::MovementSpeed) - 4.0).abs() < f64::EPSILON);

        assert!(weather.set_weather(WeatherKind::Snow, &mut stats));
        assert!((stats.get_current_value(StatType::MovementSpeed) - 3.0).abs() < f64::EPSILON);
        assert!((stats.get_current_value(StatType::DashSpeedMultiplier) - 1.5).abs() < f64::EPSILON);

        // Same weather again is a no-op
        assert!(!weather.set_weather(WeatherKind::Snow, &mut stats));
        assert!((stats.get_current_value(StatType::MovementSpeed) - 3.0).abs() < f64::EPSILON);

        weather.set_weather(WeatherKind::Clear, &mut stats);
        assert!((stats.get_current_value(StatType::MovementSpeed) - 5.0).abs() < f64::EPSILON);
        assert!((stats.get_base_value(StatType::MovementSpeed) - 5.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_tick_polls_on_interval() {
        let mut stats = stats();
        let mut weather = WeatherSystem::new(effects());
        let mut provider = Scripted(vec![Ok(WeatherKind::Rain), Ok(WeatherKind::Snow)]);

        assert_eq!(weather.tick(0.1, &mut provider, &mut stats), Some(WeatherKind::Rain));
        assert_eq!(weather.tick(5.0, &mut provider, &mut stats), None);
        assert_eq!(weather.current(), Some(WeatherKind::Rain));
        assert_eq!(weather.tick(5.0, &mut provider, &mut stats), Some(WeatherKind::Snow));
    }

    #[test]
    fn test_provider_error_keeps_weather() {
        let mut stats = stats();
        let mut weather = WeatherSystem::new(effects());
        let mut provider = Scripted(vec![
            Ok(WeatherKind::Rain),
            Err(WeatherError::Provider("timeout".to_string())),
        ]);

        weather.tick(0.0, &mut provider, &mut stats);
        assert_eq!(weather.tick(10.0, &mut provider, &mut stats), None);
        assert_eq!(weather.current(), Some(WeatherKind::Rain));
        assert!((stats.get_current_value(StatType::MovementSpeed) - 4.0).abs() < f64::EPSILON);
    }
}
