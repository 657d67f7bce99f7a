use super::boolean_switch::{default_volatility, switch_value};
use super::traits::{write_output, GeneEvaluator};
use crate::drivers::{DriverValueSet, GeneticDriver};
use crate::error::Result;
use crate::genetics::{ChromosomeCopy, GeneSpan};
use serde::{Deserialize, Serialize};

/// Several independent boolean switches packed back to back
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MultiBooleanGene {
    pub outputs: Vec<GeneticDriver>,
    /// Dominant value per output; missing entries are `false`
    #[serde(default)]
    pub dominant_values: Vec<bool>,
    #[serde(default)]
    pub origin: i32,
    /// Base pairs per switch, 1 to 32
    #[serde(default = "default_volatility")]
    pub volatility: i32,
}

impl MultiBooleanGene {
    pub fn new(outputs: Vec<GeneticDriver>, origin: i32) -> Self {
        Self {
            outputs,
            dominant_values: Vec::new(),
            origin,
            volatility: default_volatility(),
        }
    }

    pub fn with_dominant_values(mut self, dominant_values: Vec<bool>) -> Self {
        self.dominant_values = dominant_values;
        self
    }

    pub fn with_volatility(mut self, volatility: i32) -> Self {
        self.volatility = volatility;
        self
    }

    fn switch_span(&self, switch: usize) -> GeneSpan {
        GeneSpan::from_origin(self.origin + self.volatility * switch as i32, self.volatility)
    }
}

impl GeneEvaluator for MultiBooleanGene {
    fn gene_usage(&self) -> GeneSpan {
        GeneSpan::from_origin(self.origin, self.volatility * self.outputs.len() as i32)
    }

    fn inputs(&self) -> Vec<&GeneticDriver> {
        Vec::new()
    }

    fn outputs(&self) -> Vec<&GeneticDriver> {
        self.outputs.iter().collect()
    }

    fn always_valid(&self) -> bool {
        true
    }

    fn evaluate(&self, drivers: &mut DriverValueSet, copies: &[ChromosomeCopy]) -> Result<bool> {
        for (switch, output) in self.outputs.iter().enumerate() {
            let dominant_value = self.dominant_values.get(switch).copied().unwrap_or(false);
            let value = switch_value(copies, self.switch_span(switch), dominant_value)?;
            write_output(drivers, output, value, "multi boolean");
        }
        Ok(true)
    }
}
