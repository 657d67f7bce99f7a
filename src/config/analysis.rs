use super::traits::{ConfigManifest, ConfigSection, FieldManifest, FieldType};
use crate::error::{GeneticsError, Result};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    pub samples: usize,
    pub histogram_bucket_size: f32,
    pub seed: Option<u64>,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            samples: 1000,
            histogram_bucket_size: 1.0,
            seed: None,
        }
    }
}

impl ConfigSection for AnalysisConfig {
    fn section_name() -> &'static str {
        "analysis"
    }

    fn validate(&self) -> Result<()> {
        if let Some(field) = self.to_manifest().field("samples") {
            field.check_bounds(self.samples as f64)?;
        }
        if !(self.histogram_bucket_size > 0.0) || !self.histogram_bucket_size.is_finite() {
            return Err(GeneticsError::Configuration(format!(
                "Histogram bucket size must be positive, got {}",
                self.histogram_bucket_size
            )));
        }
        Ok(())
    }

    fn to_manifest(&self) -> ConfigManifest {
        ConfigManifest::new(
            "Analysis",
            vec![
                FieldManifest::new(
                    "samples",
                    FieldType::Integer,
                    serde_json::json!(1000),
                    "Random genomes compiled per analysis",
                )
                .with_min(1.0),
                FieldManifest::new(
                    "histogram_bucket_size",
                    FieldType::Float,
                    serde_json::json!(1.0),
                    "Width of one float histogram bucket, above zero",
                )
                .with_min(0.0),
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
