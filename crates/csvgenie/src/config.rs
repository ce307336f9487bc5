//! TOML configuration for the `genie` CLI.
//!
//! Every matching weight and classification threshold is configurable;
//! the defaults reproduce the engine defaults, so an absent or empty
//! config file is valid. Out-of-range values are rejected at load time
//! with a user-facing message, before any order text is touched.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

use csvgenie_core::classify::ClassifyPolicy;
use csvgenie_core::process::MatchConfig;
use csvgenie_core::score::ScoreWeights;

#[derive(Debug, Deserialize, Clone, Default)]
pub struct Config {
    #[serde(default)]
    pub catalog: CatalogConfig,
    #[serde(default)]
    pub matching: MatchingConfig,
    #[serde(default)]
    pub classify: ClassifyConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct CatalogConfig {
    /// Catalog file to load before any command runs.
    #[serde(default = "default_catalog_path")]
    pub path: PathBuf,
    /// `"csv"` (code,name,category header) or `"json"` (entry array).
    #[serde(default = "default_catalog_format")]
    pub format: String,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        CatalogConfig {
            path: default_catalog_path(),
            format: default_catalog_format(),
        }
    }
}

fn default_catalog_path() -> PathBuf {
    PathBuf::from("./catalog.csv")
}
fn default_catalog_format() -> String {
    "csv".to_string()
}

/// Strategy weights, mirrored field-for-field onto
/// [`ScoreWeights`](csvgenie_core::score::ScoreWeights).
#[derive(Debug, Deserialize, Clone)]
pub struct MatchingConfig {
    #[serde(default = "default_full_name")]
    pub full_name: f64,
    #[serde(default = "default_full_code")]
    pub full_code: f64,
    #[serde(default = "default_word_name")]
    pub word_name: f64,
    #[serde(default = "default_word_code")]
    pub word_code: f64,
    #[serde(default = "default_word_category")]
    pub word_category: f64,
    #[serde(default = "default_word_prefix")]
    pub word_prefix: f64,
    #[serde(default = "default_acronym")]
    pub acronym: f64,
    #[serde(default = "default_length_bonus_max")]
    pub length_bonus_max: f64,
    #[serde(default = "default_length_penalty_divisor")]
    pub length_penalty_divisor: f64,
    #[serde(default = "default_fuzzy_threshold")]
    pub fuzzy_threshold: f64,
}

impl Default for MatchingConfig {
    fn default() -> Self {
        MatchingConfig {
            full_name: default_full_name(),
            full_code: default_full_code(),
            word_name: default_word_name(),
            word_code: default_word_code(),
            word_category: default_word_category(),
            word_prefix: default_word_prefix(),
            acronym: default_acronym(),
            length_bonus_max: default_length_bonus_max(),
            length_penalty_divisor: default_length_penalty_divisor(),
            fuzzy_threshold: default_fuzzy_threshold(),
        }
    }
}

fn default_full_name() -> f64 {
    100.0
}
fn default_full_code() -> f64 {
    90.0
}
fn default_word_name() -> f64 {
    50.0
}
fn default_word_code() -> f64 {
    45.0
}
fn default_word_category() -> f64 {
    30.0
}
fn default_word_prefix() -> f64 {
    20.0
}
fn default_acronym() -> f64 {
    40.0
}
fn default_length_bonus_max() -> f64 {
    20.0
}
fn default_length_penalty_divisor() -> f64 {
    10.0
}
fn default_fuzzy_threshold() -> f64 {
    0.7
}

#[derive(Debug, Deserialize, Clone)]
pub struct ClassifyConfig {
    #[serde(default = "default_floor")]
    pub floor: f64,
    #[serde(default = "default_medium")]
    pub medium: f64,
    #[serde(default = "default_high")]
    pub high: f64,
    #[serde(default = "default_ambiguity_epsilon")]
    pub ambiguity_epsilon: f64,
}

impl Default for ClassifyConfig {
    fn default() -> Self {
        ClassifyConfig {
            floor: default_floor(),
            medium: default_medium(),
            high: default_high(),
            ambiguity_epsilon: default_ambiguity_epsilon(),
        }
    }
}

fn default_floor() -> f64 {
    0.25
}
fn default_medium() -> f64 {
    0.5
}
fn default_high() -> f64 {
    0.85
}
fn default_ambiguity_epsilon() -> f64 {
    0.05
}

#[derive(Debug, Deserialize, Clone)]
pub struct OutputConfig {
    /// Maximum results shown by `genie search`.
    #[serde(default = "default_search_limit")]
    pub search_limit: usize,
}

impl Default for OutputConfig {
    fn default() -> Self {
        OutputConfig {
            search_limit: default_search_limit(),
        }
    }
}

fn default_search_limit() -> usize {
    10
}

impl Config {
    /// Engine-side view of the matching and classification settings.
    pub fn match_config(&self) -> MatchConfig {
        MatchConfig {
            weights: ScoreWeights {
                full_name: self.matching.full_name,
                full_code: self.matching.full_code,
                word_name: self.matching.word_name,
                word_code: self.matching.word_code,
                word_category: self.matching.word_category,
                word_prefix: self.matching.word_prefix,
                acronym: self.matching.acronym,
                length_bonus_max: self.matching.length_bonus_max,
                length_penalty_divisor: self.matching.length_penalty_divisor,
                fuzzy_threshold: self.matching.fuzzy_threshold,
            },
            policy: ClassifyPolicy {
                floor: self.classify.floor,
                medium: self.classify.medium,
                high: self.classify.high,
                ambiguity_epsilon: self.classify.ambiguity_epsilon,
            },
        }
    }
}

/// Load a config file, or fall back to defaults when the default path
/// does not exist. An explicitly given path must exist.
pub fn load_config(path: &Path, explicit: bool) -> Result<Config> {
    if !path.exists() {
        if explicit {
            anyhow::bail!("Config file not found: {}", path.display());
        }
        return validate(Config::default());
    }

    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;
    let config: Config = toml::from_str(&content).with_context(|| "Failed to parse config file")?;
    validate(config)
}

fn validate(config: Config) -> Result<Config> {
    let c = &config.classify;
    for (name, value) in [
        ("classify.floor", c.floor),
        ("classify.medium", c.medium),
        ("classify.high", c.high),
    ] {
        if !(0.0..=1.0).contains(&value) {
            anyhow::bail!("{} must be in [0.0, 1.0]", name);
        }
    }
    if c.floor > c.medium || c.medium > c.high {
        anyhow::bail!("classify thresholds must satisfy floor <= medium <= high");
    }
    if c.ambiguity_epsilon < 0.0 {
        anyhow::bail!("classify.ambiguity_epsilon must be >= 0");
    }

    let m = &config.matching;
    if !(0.0..=1.0).contains(&m.fuzzy_threshold) {
        anyhow::bail!("matching.fuzzy_threshold must be in [0.0, 1.0]");
    }
    for (name, value) in [
        ("matching.full_name", m.full_name),
        ("matching.full_code", m.full_code),
        ("matching.word_name", m.word_name),
        ("matching.word_code", m.word_code),
        ("matching.word_category", m.word_category),
        ("matching.word_prefix", m.word_prefix),
        ("matching.acronym", m.acronym),
        ("matching.length_bonus_max", m.length_bonus_max),
        ("matching.length_penalty_divisor", m.length_penalty_divisor),
    ] {
        if value < 0.0 {
            anyhow::bail!("{} must be >= 0", name);
        }
    }

    match config.catalog.format.as_str() {
        "csv" | "json" => {}
        other => anyhow::bail!(
            "Unknown catalog format: '{}'. Must be csv or json.",
            other
        ),
    }

    if config.output.search_limit < 1 {
        anyhow::bail!("output.search_limit must be >= 1");
    }

    Ok(config)
}
