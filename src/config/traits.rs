use crate::error::{GeneticsError, Result};
use serde::{Deserialize, Serialize};

/// A named, self-validating block of the configuration file
pub trait ConfigSection: Serialize + for<'de> Deserialize<'de> + Default + Clone {
    fn section_name() -> &'static str;
    fn validate(&self) -> Result<()>;
    fn to_manifest(&self) -> ConfigManifest;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    Integer,
    Float,
    Boolean,
}

/// Describes a section's fields for tools that edit configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigManifest {
    pub section: String,
    pub fields: Vec<FieldManifest>,
}

impl ConfigManifest {
    pub fn new(section: impl Into<String>, fields: Vec<FieldManifest>) -> Self {
        Self {
            section: section.into(),
            fields,
        }
    }

    pub fn field(&self, name: &str) -> Option<&FieldManifest> {
        self.fields.iter().find(|f| f.name == name)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FieldManifest {
    pub name: String,
    pub field_type: FieldType,
    /// `null` when the field is optional and unset by default
    pub default: serde_json::Value,
    pub min: Option<f64>,
    pub max: Option<f64>,
    pub description: String,
}

impl FieldManifest {
    pub fn new(
        name: impl Into<String>,
        field_type: FieldType,
        default: serde_json::Value,
        description: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            field_type,
            default,
            min: None,
            max: None,
            description: description.into(),
        }
    }

    pub fn with_min(mut self, min: f64) -> Self {
        self.min = Some(min);
        self
    }

    pub fn with_max(mut self, max: f64) -> Self {
        self.max = Some(max);
        self
    }

    /// Check a numeric value against the advertised bounds
    pub fn check_bounds(&self, value: f64) -> Result<()> {
        let below = self.min.is_some_and(|min| value < min);
        let above = self.max.is_some_and(|max| value > max);
        if below || above || value.is_nan() {
            return Err(GeneticsError::Configuration(format!(
                "{} = {} is outside [{}, {}]",
                self.name,
                value,
                self.min.map_or("-inf".to_string(), |m| m.to_string()),
                self.max.map_or("inf".to_string(), |m| m.to_string()),
            )));
        }
        Ok(())
    }
}
