use super::traits::{ConfigManifest, ConfigSection, FieldManifest, FieldType};
use crate::error::Result;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SynthesisConfig {
    /// Rerolls allowed for one target within one pass
    pub max_rerolls_per_target: usize,
    /// Passes over every target before giving up on a fixed point
    pub max_passes: usize,
    /// When false, every homologous copy carries identical genetic material
    pub variance_over_homologous: bool,
    pub seed: Option<u64>,
}

impl Default for SynthesisConfig {
    fn default() -> Self {
        Self {
            max_rerolls_per_target: 2000,
            max_passes: 64,
            variance_over_homologous: true,
            seed: None,
        }
    }
}

impl ConfigSection for SynthesisConfig {
    fn section_name() -> &'static str {
        "synthesis"
    }

    fn validate(&self) -> Result<()> {
        let manifest = self.to_manifest();
        for (name, value) in [
            ("max_rerolls_per_target", self.max_rerolls_per_target),
            ("max_passes", self.max_passes),
        ] {
            if let Some(field) = manifest.field(name) {
                field.check_bounds(value as f64)?;
            }
        }
        Ok(())
    }

    fn to_manifest(&self) -> ConfigManifest {
        ConfigManifest::new(
            "Synthesis",
            vec![
                FieldManifest::new(
                    "max_rerolls_per_target",
                    FieldType::Integer,
                    serde_json::json!(2000),
                    "Rerolls of one target's genetic material before synthesis gives up",
                )
                .with_min(1.0),
                FieldManifest::new(
                    "max_passes",
                    FieldType::Integer,
                    serde_json::json!(64),
                    "Passes over all targets allowed to reach a stable genome",
                )
                .with_min(1.0),
                FieldManifest::new(
                    "variance_over_homologous",
                    FieldType::Boolean,
                    serde_json::json!(true),
                    "Let homologous chromosome copies differ",
                ),
                FieldManifest::new(
                    "seed",
                    FieldType::Integer,
                    serde_json::Value::Null,
                    "Random seed, drawn from entropy when unset",
                )
                .with_min(0.0),
            ],
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_limits_are_rejected() {
        let config = SynthesisConfig {
            max_passes: 0,
            ..SynthesisConfig::default()
        };
        assert!(config.validate().is_err());
        assert!(SynthesisConfig::default().validate().is_ok());
    }

    #[test]
    fn test_manifest_covers_every_field() {
        let manifest = SynthesisConfig::default().to_manifest();
        let names: Vec<_> = manifest.fields.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(
            names,
            vec!["max_rerolls_per_target", "max_passes", "variance_over_homologous", "seed"]
        );
    }
}
