use super::GeneticDriver;
use crate::types::{DriverKind, TraitValue};
use serde::{Deserialize, Serialize};

/// Presentation metadata that depends on the kind of driver
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DriverDetail {
    Boolean {
        outcome_when_true: String,
        outcome_when_false: String,
    },
    Continuous {
        min_value: f32,
        max_value: f32,
        /// 0 picks a bucket close to one unit wide
        #[serde(default)]
        summary_bucket_count: usize,
    },
    Discrete {
        possible_states: Vec<String>,
    },
    Text,
}

/// A driver together with how its states and ranges are put into words
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DriverDescriptor {
    pub driver: GeneticDriver,
    pub detail: DriverDetail,
}

impl DriverDescriptor {
    pub fn boolean(
        id: u32,
        name: impl Into<String>,
        outcome_when_true: impl Into<String>,
        outcome_when_false: impl Into<String>,
    ) -> Self {
        Self {
            driver: GeneticDriver::new(id, name, DriverKind::Boolean),
            detail: DriverDetail::Boolean {
                outcome_when_true: outcome_when_true.into(),
                outcome_when_false: outcome_when_false.into(),
            },
        }
    }

    pub fn continuous(id: u32, name: impl Into<String>, min_value: f32, max_value: f32) -> Self {
        Self {
            driver: GeneticDriver::new(id, name, DriverKind::ContinuousFloat),
            detail: DriverDetail::Continuous {
                min_value,
                max_value,
                summary_bucket_count: 0,
            },
        }
    }

    pub fn discrete<S: Into<String>>(
        id: u32,
        name: impl Into<String>,
        possible_states: impl IntoIterator<Item = S>,
    ) -> Self {
        Self {
            driver: GeneticDriver::new(id, name, DriverKind::DiscreteFloat),
            detail: DriverDetail::Discrete {
                possible_states: possible_states.into_iter().map(Into::into).collect(),
            },
        }
    }

    pub fn text(id: u32, name: impl Into<String>) -> Self {
        Self {
            driver: GeneticDriver::new(id, name, DriverKind::Text),
            detail: DriverDetail::Text,
        }
    }

    pub fn describe_state(&self, state: &TraitValue) -> String {
        match (&self.detail, state) {
            (
                DriverDetail::Boolean {
                    outcome_when_true,
                    outcome_when_false,
                },
                TraitValue::Bool(value),
            ) => {
                if *value {
                    outcome_when_true.clone()
                } else {
                    outcome_when_false.clone()
                }
            }
            (DriverDetail::Continuous { .. }, TraitValue::Float(value)) => {
                format!("{}: {:.2}", self.driver.name, value)
            }
            (DriverDetail::Discrete { .. }, TraitValue::Float(value)) => {
                format!("{}: {}", self.driver.name, self.state_name(value.floor() as i32))
            }
            (DriverDetail::Text, TraitValue::Text(value)) => value.clone(),
            (_, other) => format!("{}: {}", self.driver.name, other),
        }
    }

    /// Describe every state between `min` and `max` inclusive
    pub fn describe_range(&self, min: &TraitValue, max: &TraitValue) -> String {
        match (&self.detail, min, max) {
            (DriverDetail::Continuous { .. }, TraitValue::Float(min), TraitValue::Float(max)) => {
                format!("{} between {} and {}", self.driver.name, min, max)
            }
            (DriverDetail::Discrete { .. }, TraitValue::Float(min), TraitValue::Float(max)) => {
                format!(
                    "{}: {}",
                    self.driver.name,
                    self.range_clause(min.floor() as i32, max.floor() as i32)
                )
            }
            _ if min == max => self.describe_state(min),
            _ => format!("{} or {}", self.describe_state(min), self.describe_state(max)),
        }
    }

    pub fn falls_in_range(&self, min: f32, max: f32, value: f32) -> bool {
        match &self.detail {
            DriverDetail::Continuous { .. } => value >= min && value <= max,
            DriverDetail::Discrete { .. } => {
                let value = value.floor();
                value >= min.floor() && value <= max.floor()
            }
            _ => false,
        }
    }

    fn state_name(&self, index: i32) -> String {
        match &self.detail {
            DriverDetail::Discrete { possible_states } => usize::try_from(index)
                .ok()
                .and_then(|i| possible_states.get(i))
                .cloned()
                .unwrap_or_else(|| index.to_string()),
            _ => index.to_string(),
        }
    }

    fn range_clause(&self, min: i32, max: i32) -> String {
        let state_count = match &self.detail {
            DriverDetail::Discrete { possible_states } => possible_states.len() as i32,
            _ => 0,
        };
        // ranges may run out to the integer extremes; only name states that exist
        let low = min.max(0);
        let high = max.min(state_count - 1);
        let names: Vec<String> = (low..=high).map(|i| self.state_name(i)).collect();

        match names.as_slice() {
            [] => "nothing".to_string(),
            [only] => only.clone(),
            [first, second] => format!("{} or {}", first, second),
            [rest @ .., last] => format!("{}, or {}", rest.join(", "), last),
        }
    }
}
