use casino_engine::blackjack::WinRule;
use casino_engine::catalog::{Catalog, Perspective};
use casino_engine::ledger::STARTING_CREDITS;
use casino_engine::pacing::GameSpeed;
use casino_engine::poker::PayTable;
use casino_engine::rules::{BET_UNIT, MAX_BET, TableRules};
use casino_engine::session::SessionConfig;
use crate::io_utils::read_text;
use serde::{Deserialize, Serialize};

/// Per-card weight override, e.g. `{ card = "AS", dealer = 3 }`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct WeightOverride {
    pub card: String,
    #[serde(default)]
    pub player: Option<u32>,
    #[serde(default)]
    pub dealer: Option<u32>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Config {
    pub starting_credits: u64,
    pub bet_unit: u32,
    pub max_bet: u32,
    pub seed: Option<u64>,
    pub speed: u8,
    pub win_rule: WinRule,
    pub pay_table: PayTable,
    pub weights: Vec<WeightOverride>,
}

#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueSource {
    Default,
    File,
    Env,
}

#[derive(Debug, Clone, Copy)]
pub struct ConfigSources {
    pub starting_credits: ValueSource,
    pub bet_unit: ValueSource,
    pub max_bet: ValueSource,
    pub seed: ValueSource,
    pub speed: ValueSource,
    pub win_rule: ValueSource,
    pub pay_table: ValueSource,
    pub weights: ValueSource,
}

impl Default for ConfigSources {
    fn default() -> Self {
        Self {
            starting_credits: ValueSource::Default,
            bet_unit: ValueSource::Default,
            max_bet: ValueSource::Default,
            seed: ValueSource::Default,
            speed: ValueSource::Default,
            win_rule: ValueSource::Default,
            pay_table: ValueSource::Default,
            weights: ValueSource::Default,
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
        Self {
            starting_credits: STARTING_CREDITS,
            bet_unit: BET_UNIT,
            max_bet: MAX_BET,
            seed: None,
            speed: 1,
            win_rule: WinRule::default(),
            pay_table: PayTable::default(),
            weights: Vec::new(),
        }
    }
}

impl Config {
    pub fn table_rules(&self) -> TableRules {
        TableRules {
            bet_unit: self.bet_unit,
            max_bet: self.max_bet,
        }
    }

    pub fn session_config(&self, seed: u64) -> SessionConfig {
        SessionConfig {
            seed: Some(seed),
            rules: self.table_rules(),
            win_rule: self.win_rule,
            pay_table: self.pay_table,
        }
    }

    pub fn game_speed(&self) -> GameSpeed {
        GameSpeed::from_multiplier(self.speed).unwrap_or_default()
    }

    /// Standard catalog with the configured weight overrides applied in order.
    pub fn build_catalog(&self) -> Result<Catalog, ConfigError> {
        let mut catalog = Catalog::standard();
        for w in &self.weights {
            if let Some(v) = w.player {
                catalog
                    .set_weight_named(&w.card, Perspective::Player, v)
                    .map_err(|e| ConfigError::Invalid(e.to_string()))?;
            }
            if let Some(v) = w.dealer {
                catalog
                    .set_weight_named(&w.card, Perspective::Dealer, v)
                    .map_err(|e| ConfigError::Invalid(e.to_string()))?;
            }
        }
        Ok(catalog)
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

pub fn load() -> Result<Config, ConfigError> {
    load_with_sources().map(|resolved| resolved.config)
}

pub fn load_with_sources() -> Result<ConfigResolved, ConfigError> {
    let mut cfg = Config::default();
    let mut sources = ConfigSources::default();

    if let Ok(path) = std::env::var("CASINO_CONFIG")
        && !path.is_empty()
    {
        let s = read_text(std::path::Path::new(&path))?;
        let f: FileConfig = toml::from_str(&s)?;
        if let Some(v) = f.starting_credits {
            cfg.starting_credits = v;
            sources.starting_credits = ValueSource::File;
        }
        if let Some(v) = f.bet_unit {
            cfg.bet_unit = v;
            sources.bet_unit = ValueSource::File;
        }
        if let Some(v) = f.max_bet {
            cfg.max_bet = v;
            sources.max_bet = ValueSource::File;
        }
        if let Some(v) = f.seed {
            cfg.seed = Some(v);
            sources.seed = ValueSource::File;
        }
        if let Some(v) = f.speed {
            cfg.speed = v;
            sources.speed = ValueSource::File;
        }
        if let Some(v) = f.win_rule {
            cfg.win_rule = v;
            sources.win_rule = ValueSource::File;
        }
        if let Some(v) = f.pay_table {
            cfg.pay_table = v;
            sources.pay_table = ValueSource::File;
        }
        if !f.weights.is_empty() {
            cfg.weights = f.weights;
            sources.weights = ValueSource::File;
        }
    }

    if let Ok(seed) = std::env::var("CASINO_SEED")
        && !seed.is_empty()
    {
        cfg.seed = Some(
            seed.parse()
                .map_err(|_| ConfigError::Invalid("Invalid seed".into()))?,
        );
        sources.seed = ValueSource::Env;
    }
    if let Ok(credits) = std::env::var("CASINO_CREDITS")
        && !credits.is_empty()
    {
        cfg.starting_credits = credits
            .parse()
            .map_err(|_| ConfigError::Invalid("Invalid credits".into()))?;
        sources.starting_credits = ValueSource::Env;
    }
    if let Ok(max_bet) = std::env::var("CASINO_MAX_BET")
        && !max_bet.is_empty()
    {
        cfg.max_bet = max_bet
            .parse()
            .map_err(|_| ConfigError::Invalid("Invalid max_bet".into()))?;
        sources.max_bet = ValueSource::Env;
    }
    if let Ok(unit) = std::env::var("CASINO_BET_UNIT")
        && !unit.is_empty()
    {
        cfg.bet_unit = unit
            .parse()
            .map_err(|_| ConfigError::Invalid("Invalid bet_unit".into()))?;
        sources.bet_unit = ValueSource::Env;
    }
    if let Ok(speed) = std::env::var("CASINO_SPEED")
        && !speed.is_empty()
    {
        cfg.speed = speed
            .parse()
            .map_err(|_| ConfigError::Invalid("Invalid speed".into()))?;
        sources.speed = ValueSource::Env;
    }
    if let Ok(rule) = std::env::var("CASINO_WIN_RULE")
        && !rule.is_empty()
    {
        cfg.win_rule =
            parse_win_rule(&rule).ok_or_else(|| ConfigError::Invalid("Invalid win_rule".into()))?;
        sources.win_rule = ValueSource::Env;
    }

    validate(&cfg)?;
    Ok(ConfigResolved {
        config: cfg,
        sources,
    })
}

#[derive(Debug, Deserialize)]
struct FileConfig {
    #[serde(default)]
    starting_credits: Option<u64>,
    #[serde(default)]
    bet_unit: Option<u32>,
    #[serde(default)]
    max_bet: Option<u32>,
    #[serde(default)]
    seed: Option<u64>,
    #[serde(default)]
    speed: Option<u8>,
    #[serde(default)]
    win_rule: Option<WinRule>,
    #[serde(default)]
    pay_table: Option<PayTable>,
    #[serde(default)]
    weights: Vec<WeightOverride>,
}

fn validate(cfg: &Config) -> Result<(), ConfigError> {
    if cfg.max_bet == 0 {
        return Err(ConfigError::Invalid(
            "Invalid configuration: max_bet must be >=1".into(),
        ));
    }
    if cfg.bet_unit == 0 {
        return Err(ConfigError::Invalid(
            "Invalid configuration: bet_unit must be >=1".into(),
        ));
    }
    if GameSpeed::from_multiplier(cfg.speed).is_none() {
        return Err(ConfigError::Invalid(
            "Invalid configuration: speed must be 1, 2 or 3".into(),
        ));
    }
    cfg.build_catalog()
        .map_err(|e| ConfigError::Invalid(format!("Invalid configuration: {}", e)))?;
    Ok(())
}

pub fn parse_win_rule(s: &str) -> Option<WinRule> {
    match s.to_ascii_lowercase().as_str() {
        "lower" | "low" => Some(WinRule::Lower),
        "higher" | "high" => Some(WinRule::Higher),
        _ => None,
    }
}
