use super::analysis::AnalysisConfig;
use super::synthesis::SynthesisConfig;
use super::traits::{ConfigManifest, ConfigSection};
use crate::error::{GeneticsError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::{Arc, RwLock};

/// Prefix of environment variables that override file settings,
/// e.g. `MENDELGEN__SYNTHESIS__MAX_PASSES=16`
pub const ENV_PREFIX: &str = "MENDELGEN";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub synthesis: SynthesisConfig,
    pub analysis: AnalysisConfig,
}

impl AppConfig {
    pub fn validate(&self) -> Result<()> {
        self.synthesis.validate()?;
        self.analysis.validate()?;
        Ok(())
    }

    /// Field manifests of every section, keyed by the section's table name
    pub fn manifests(&self) -> Vec<(&'static str, ConfigManifest)> {
        vec![
            (SynthesisConfig::section_name(), self.synthesis.to_manifest()),
            (AnalysisConfig::section_name(), self.analysis.to_manifest()),
        ]
    }
}

fn poisoned<T>(_: T) -> GeneticsError {
    GeneticsError::Configuration("Config lock poisoned".to_string())
}

pub struct ConfigManager {
    config: Arc<RwLock<AppConfig>>,
}

impl Default for ConfigManager {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigManager {
    pub fn new() -> Self {
        Self {
            config: Arc::new(RwLock::new(AppConfig::default())),
        }
    }

    pub fn load_from_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| GeneticsError::Configuration(format!("Failed to read config: {}", e)))?;

        let config: AppConfig = toml::from_str(&contents)
            .map_err(|e| GeneticsError::Configuration(format!("Failed to parse config: {}", e)))?;

        config.validate()?;

        *self.config.write().map_err(poisoned)? = config;
        Ok(())
    }

    /// Load `path` if it exists, then apply `MENDELGEN__SECTION__FIELD` overrides
    pub fn load_layered<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let config: AppConfig = config::Config::builder()
            .add_source(config::File::from(path.as_ref()).required(false))
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .and_then(|layered| layered.try_deserialize())
            .map_err(|e| GeneticsError::Configuration(format!("Failed to layer config: {}", e)))?;

        config.validate()?;

        *self.config.write().map_err(poisoned)? = config;
        Ok(())
    }

    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let config = self.config.read().map_err(poisoned)?;
        let toml_str = toml::to_string_pretty(&*config)
            .map_err(|e| GeneticsError::Configuration(format!("Failed to serialize: {}", e)))?;

        std::fs::write(path, toml_str)
            .map_err(|e| GeneticsError::Configuration(format!("Failed to write config: {}", e)))?;

        Ok(())
    }

    pub fn get(&self) -> Result<AppConfig> {
        Ok(self.config.read().map_err(poisoned)?.clone())
    }

    /// Apply `f` and keep the result only if it still validates
    pub fn update<F>(&self, f: F) -> Result<()>
    where
        F: FnOnce(&mut AppConfig),
    {
        let mut config = self.config.write().map_err(poisoned)?;
        let mut updated = config.clone();
        f(&mut updated);
        updated.validate()?;
        *config = updated;
        Ok(())
    }
}
