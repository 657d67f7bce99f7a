use super::traits::{write_output, GeneEvaluator};
use crate::drivers::{DriverValueSet, GeneticDriver};
use crate::error::Result;
use crate::genetics::{ChromosomeCopy, GeneSpan};
use crate::utils::has_even_hamming_weight;
use serde::{Deserialize, Serialize};

pub(crate) fn default_volatility() -> i32 {
    2
}

fn default_dominant_value() -> bool {
    true
}

/// Resolve one switch across homologous copies.
///
/// Each copy votes true when its span has an even hamming weight. With a
/// dominant `true` any vote wins; with a dominant `false` every copy must agree.
pub(crate) fn switch_value(copies: &[ChromosomeCopy], span: GeneSpan, dominant_value: bool) -> Result<bool> {
    let votes = copies
        .iter()
        .map(|copy| copy.sample_base_pairs(span).map(has_even_hamming_weight))
        .collect::<Result<Vec<_>>>()?;

    Ok(if dominant_value {
        votes.into_iter().any(|v| v)
    } else {
        votes.into_iter().all(|v| v)
    })
}

/// Single boolean driven by the parity of one span
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BooleanSwitchGene {
    pub output: GeneticDriver,
    #[serde(default)]
    pub origin: i32,
    /// Base pairs in the span, 1 to 32. Wider spans are hit by more mutations.
    #[serde(default = "default_volatility")]
    pub volatility: i32,
    #[serde(default = "default_dominant_value")]
    pub dominant_value: bool,
}

impl BooleanSwitchGene {
    pub fn new(output: GeneticDriver, origin: i32) -> Self {
        Self {
            output,
            origin,
            volatility: default_volatility(),
            dominant_value: default_dominant_value(),
        }
    }

    pub fn with_volatility(mut self, volatility: i32) -> Self {
        self.volatility = volatility;
        self
    }

    pub fn with_dominant_value(mut self, dominant_value: bool) -> Self {
        self.dominant_value = dominant_value;
        self
    }
}

impl GeneEvaluator for BooleanSwitchGene {
    fn gene_usage(&self) -> GeneSpan {
        GeneSpan::from_origin(self.origin, self.volatility)
    }

    fn inputs(&self) -> Vec<&GeneticDriver> {
        Vec::new()
    }

    fn outputs(&self) -> Vec<&GeneticDriver> {
        vec![&self.output]
    }

    fn always_valid(&self) -> bool {
        true
    }

    fn evaluate(&self, drivers: &mut DriverValueSet, copies: &[ChromosomeCopy]) -> Result<bool> {
        let value = switch_value(copies, self.gene_usage(), self.dominant_value)?;
        write_output(drivers, &self.output, value, "boolean switch");
        Ok(true)
    }
}
