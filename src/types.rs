use serde::{Deserialize, Serialize};
use std::fmt;

/// Semantic type of a genetic driver
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DriverKind {
    Boolean,
    ContinuousFloat, // Compared as a real number
    DiscreteFloat,   // Backed by a float, classified by its floor
    Text,
}

impl DriverKind {
    /// Whether ranges over this driver are compared as whole numbers
    pub fn compare_as_integers(&self) -> bool {
        matches!(self, DriverKind::DiscreteFloat)
    }

    pub fn accepts(&self, value: &TraitValue) -> bool {
        matches!(
            (self, value),
            (DriverKind::Boolean, TraitValue::Bool(_))
                | (DriverKind::ContinuousFloat, TraitValue::Float(_))
                | (DriverKind::DiscreteFloat, TraitValue::Float(_))
                | (DriverKind::Text, TraitValue::Text(_))
        )
    }
}

/// A single evaluated trait value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TraitValue {
    Bool(bool),
    Float(f32),
    Text(String),
}

impl TraitValue {
    pub fn type_name(&self) -> &'static str {
        match self {
            TraitValue::Bool(_) => "bool",
            TraitValue::Float(_) => "float",
            TraitValue::Text(_) => "text",
        }
    }
}

impl fmt::Display for TraitValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TraitValue::Bool(v) => write!(f, "{}", v),
            TraitValue::Float(v) => write!(f, "{}", v),
            TraitValue::Text(v) => write!(f, "{}", v),
        }
    }
}

impl From<bool> for TraitValue {
    fn from(value: bool) -> Self {
        TraitValue::Bool(value)
    }
}

impl From<f32> for TraitValue {
    fn from(value: f32) -> Self {
        TraitValue::Float(value)
    }
}

impl From<String> for TraitValue {
    fn from(value: String) -> Self {
        TraitValue::Text(value)
    }
}

impl From<&str> for TraitValue {
    fn from(value: &str) -> Self {
        TraitValue::Text(value.to_string())
    }
}

/// Typed access into a [`TraitValue`]
pub trait DriverValue: Sized {
    const TYPE_NAME: &'static str;

    fn from_trait(value: &TraitValue) -> Option<Self>;
}

impl DriverValue for bool {
    const TYPE_NAME: &'static str = "bool";

    fn from_trait(value: &TraitValue) -> Option<Self> {
        match value {
            TraitValue::Bool(v) => Some(*v),
            _ => None,
        }
    }
}

impl DriverValue for f32 {
    const TYPE_NAME: &'static str = "float";

    fn from_trait(value: &TraitValue) -> Option<Self> {
        match value {
            TraitValue::Float(v) => Some(*v),
            _ => None,
        }
    }
}

impl DriverValue for String {
    const TYPE_NAME: &'static str = "text";

    fn from_trait(value: &TraitValue) -> Option<Self> {
        match value {
            TraitValue::Text(v) => Some(v.clone()),
            _ => None,
        }
    }
}
