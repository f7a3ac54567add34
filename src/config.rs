use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::Path;

use crate::models::{
    AmenityRules, ClusterRules, EngineConfig, InvestmentRules, ScoringWeights,
    SustainabilityRules,
};

/// Application configuration
#[derive(Debug, Clone, Deserialize, Default)]
pub struct Settings {
    #[serde(default)]
    pub scoring: ScoringSettings,
    #[serde(default)]
    pub amenity: AmenityRules,
    #[serde(default)]
    pub cluster: ClusterRules,
    #[serde(default)]
    pub sustainability: SustainabilityRules,
    #[serde(default)]
    pub investment: InvestmentRules,
    #[serde(default)]
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct ScoringSettings {
    #[serde(default)]
    pub weights: WeightsConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WeightsConfig {
    #[serde(default = "default_price_attractiveness_weight")]
    pub price_attractiveness: f64,
    #[serde(default = "default_renovation_cost_weight")]
    pub renovation_cost: f64,
    #[serde(default = "default_amenity_weight")]
    pub amenity_score: f64,
    #[serde(default = "default_air_quality_weight")]
    pub air_quality: f64,
}

impl Default for WeightsConfig {
    fn default() -> Self {
        Self {
            price_attractiveness: default_price_attractiveness_weight(),
            renovation_cost: default_renovation_cost_weight(),
            amenity_score: default_amenity_weight(),
            air_quality: default_air_quality_weight(),
        }
    }
}

fn default_price_attractiveness_weight() -> f64 {
    0.40
}
fn default_renovation_cost_weight() -> f64 {
    0.30
}
fn default_amenity_weight() -> f64 {
    0.20
}
fn default_air_quality_weight() -> f64 {
    0.10
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingSettings {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_log_format")]
    pub format: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}
fn default_log_format() -> String {
    "json".to_string()
}

impl Settings {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded in the following order (later overrides earlier):
    /// 1. Default values in the struct
    /// 2. Configuration file (config/default.toml, then config/local.toml)
    /// 3. Environment variables (prefixed with REVIVE_)
    pub fn load() -> Result<Self, ConfigError> {
        let settings = Config::builder()
            // Add default config file
            .add_source(File::with_name("config/default").required(false))
            // Add local config file (for development overrides)
            .add_source(File::with_name("config/local").required(false))
            // Add environment variables (prefixed with REVIVE_)
            // e.g., REVIVE_SCORING__WEIGHTS__AIR_QUALITY -> scoring.weights.air_quality
            .add_source(
                Environment::with_prefix("REVIVE")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        settings.try_deserialize()
    }

    /// Load configuration from a custom path
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::from(path.as_ref()))
            .add_source(
                Environment::with_prefix("REVIVE")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        settings.try_deserialize()
    }

    /// Assemble the engine configuration from the loaded settings
    ///
    /// Weight validation happens in `ViabilityEngine::new`, not here.
    pub fn engine_config(&self) -> EngineConfig {
        EngineConfig {
            weights: ScoringWeights {
                price_attractiveness: self.scoring.weights.price_attractiveness,
                renovation_cost: self.scoring.weights.renovation_cost,
                amenity_score: self.scoring.weights.amenity_score,
                air_quality: self.scoring.weights.air_quality,
            },
            amenity: self.amenity.clone(),
            cluster: self.cluster.clone(),
            sustainability: self.sustainability.clone(),
            investment: self.investment.clone(),
        }
    }
}
