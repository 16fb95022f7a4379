use serde::{Deserialize, Serialize};
use std::fs;

use arena_engine::tournament::TournamentSettings;

/// Tournament parameters the CLI resolves before a run.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Config {
    pub starting_chips: u32,
    pub small_blind: u32,
    pub big_blind: u32,
    pub blind_increase_interval: u32,
    pub blind_increase_factor: f64,
    pub time_limit_ms: u64,
    pub max_faults: u32,
    pub max_hands: u64,
    pub seed: Option<u64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueSource {
    Default,
    File,
    Env,
}

#[derive(Debug, Clone, Copy)]
pub struct ConfigSources {
    pub starting_chips: ValueSource,
    pub small_blind: ValueSource,
    pub big_blind: ValueSource,
    pub blind_increase_interval: ValueSource,
    pub blind_increase_factor: ValueSource,
    pub time_limit_ms: ValueSource,
    pub max_faults: ValueSource,
    pub max_hands: ValueSource,
    pub seed: ValueSource,
}

impl Default for ConfigSources {
    fn default() -> Self {
        Self {
            starting_chips: ValueSource::Default,
            small_blind: ValueSource::Default,
            big_blind: ValueSource::Default,
            blind_increase_interval: ValueSource::Default,
            blind_increase_factor: ValueSource::Default,
            time_limit_ms: ValueSource::Default,
            max_faults: ValueSource::Default,
            max_hands: ValueSource::Default,
            seed: ValueSource::Default,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ConfigResolved {
    pub config: Config,
    pub sources: ConfigSources,
}

impl Default for Config {
    fn default() -> Self {
        let base = TournamentSettings::default();
        Self {
            starting_chips: base.starting_chips,
            small_blind: base.small_blind,
            big_blind: base.big_blind,
            blind_increase_interval: base.blind_increase_interval,
            blind_increase_factor: base.blind_increase_factor,
            time_limit_ms: base.time_limit_ms,
            max_faults: base.max_faults,
            max_hands: 1000,
            seed: None,
        }
    }
}

impl Config {
    /// Engine settings for this configuration; 0 hands means no cap.
    pub fn to_settings(&self) -> TournamentSettings {
        TournamentSettings {
            starting_chips: self.starting_chips,
            small_blind: self.small_blind,
            big_blind: self.big_blind,
            blind_increase_interval: self.blind_increase_interval,
            blind_increase_factor: self.blind_increase_factor,
            time_limit_ms: self.time_limit_ms,
            max_faults: self.max_faults,
            max_hands: (self.max_hands > 0).then_some(self.max_hands),
            seed: self.seed,
            ..TournamentSettings::default()
        }
    }
}

#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
    Invalid(String),
}

impl From<std::io::Error> for ConfigError {
    fn from(e: std::io::Error) -> Self {
        ConfigError::Io(e)
    }
}
impl From<toml::de::Error> for ConfigError {
    fn from(e: toml::de::Error) -> Self {
        ConfigError::Parse(e)
    }
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "cannot read config file: {}", e),
            ConfigError::Parse(e) => write!(f, "cannot parse config file: {}", e),
            ConfigError::Invalid(msg) => write!(f, "{}", msg),
        }
    }
}

/// Defaults, then the TOML file named by `ARENA_CONFIG`, then `ARENA_*`
/// environment variables.
pub fn load_with_sources() -> Result<ConfigResolved, ConfigError> {
    let mut cfg = Config::default();
    let mut sources = ConfigSources::default();

    if let Ok(path) = std::env::var("ARENA_CONFIG")
        && !path.is_empty()
    {
        let s = fs::read_to_string(path)?;
        let f: FileConfig = toml::from_str(&s)?;
        if let Some(v) = f.starting_chips {
            cfg.starting_chips = v;
            sources.starting_chips = ValueSource::File;
        }
        if let Some(v) = f.small_blind {
            cfg.small_blind = v;
            sources.small_blind = ValueSource::File;
        }
        if let Some(v) = f.big_blind {
            cfg.big_blind = v;
            sources.big_blind = ValueSource::File;
        }
        if let Some(v) = f.blind_increase_interval {
            cfg.blind_increase_interval = v;
            sources.blind_increase_interval = ValueSource::File;
        }
        if let Some(v) = f.blind_increase_factor {
            cfg.blind_increase_factor = v;
            sources.blind_increase_factor = ValueSource::File;
        }
        if let Some(v) = f.time_limit_ms {
            cfg.time_limit_ms = v;
            sources.time_limit_ms = ValueSource::File;
        }
        if let Some(v) = f.max_faults {
            cfg.max_faults = v;
            sources.max_faults = ValueSource::File;
        }
        if let Some(v) = f.max_hands {
            cfg.max_hands = v;
            sources.max_hands = ValueSource::File;
        }
        if let Some(v) = f.seed {
            cfg.seed = Some(v);
            sources.seed = ValueSource::File;
        }
    }

    if let Some(v) = env_value("ARENA_STARTING_CHIPS")? {
        cfg.starting_chips = v;
        sources.starting_chips = ValueSource::Env;
    }
    if let Some(v) = env_value("ARENA_SMALL_BLIND")? {
        cfg.small_blind = v;
        sources.small_blind = ValueSource::Env;
    }
    if let Some(v) = env_value("ARENA_BIG_BLIND")? {
        cfg.big_blind = v;
        sources.big_blind = ValueSource::Env;
    }
    if let Some(v) = env_value("ARENA_BLIND_INTERVAL")? {
        cfg.blind_increase_interval = v;
        sources.blind_increase_interval = ValueSource::Env;
    }
    if let Some(v) = env_value("ARENA_BLIND_FACTOR")? {
        cfg.blind_increase_factor = v;
        sources.blind_increase_factor = ValueSource::Env;
    }
    if let Some(v) = env_value("ARENA_TIME_LIMIT_MS")? {
        cfg.time_limit_ms = v;
        sources.time_limit_ms = ValueSource::Env;
    }
    if let Some(v) = env_value("ARENA_MAX_FAULTS")? {
        cfg.max_faults = v;
        sources.max_faults = ValueSource::Env;
    }
    if let Some(v) = env_value("ARENA_MAX_HANDS")? {
        cfg.max_hands = v;
        sources.max_hands = ValueSource::Env;
    }
    if let Some(v) = env_value("ARENA_SEED")? {
        cfg.seed = Some(v);
        sources.seed = ValueSource::Env;
    }

    validate(&cfg)?;
    Ok(ConfigResolved {
        config: cfg,
        sources,
    })
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct FileConfig {
    #[serde(default)]
    starting_chips: Option<u32>,
    #[serde(default)]
    small_blind: Option<u32>,
    #[serde(default)]
    big_blind: Option<u32>,
    #[serde(default)]
    blind_increase_interval: Option<u32>,
    #[serde(default)]
    blind_increase_factor: Option<f64>,
    #[serde(default)]
    time_limit_ms: Option<u64>,
    #[serde(default)]
    max_faults: Option<u32>,
    #[serde(default)]
    max_hands: Option<u64>,
    #[serde(default)]
    seed: Option<u64>,
}

fn env_value<T: std::str::FromStr>(key: &str) -> Result<Option<T>, ConfigError> {
    match std::env::var(key) {
        Ok(raw) if !raw.is_empty() => raw
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| ConfigError::Invalid(format!("Invalid {}: {:?}", key, raw))),
        _ => Ok(None),
    }
}

/// Checks the resolved values the same way the engine will.
pub fn validate(cfg: &Config) -> Result<(), ConfigError> {
    cfg.to_settings()
        .validate()
        .map_err(|e| ConfigError::Invalid(format!("Invalid configuration: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_engine() {
        let cfg = Config::default();
        let settings = cfg.to_settings();
        assert_eq!(settings.starting_chips, 1000);
        assert_eq!(settings.big_blind, 20);
        assert_eq!(settings.max_hands, Some(1000));
        assert!(validate(&cfg).is_ok());
    }

    #[test]
    fn zero_hands_means_uncapped() {
        let cfg = Config {
            max_hands: 0,
            ..Config::default()
        };
        assert_eq!(cfg.to_settings().max_hands, None);
    }

    #[test]
    fn inverted_blinds_are_invalid() {
        let cfg = Config {
            small_blind: 50,
            big_blind: 20,
            ..Config::default()
        };
        let e = validate(&cfg).unwrap_err();
        assert!(e.to_string().starts_with("Invalid configuration"));
    }
}
