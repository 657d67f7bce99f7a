use super::traits::{write_output, GeneEvaluator};
use crate::drivers::{DriverValueSet, GeneticDriver};
use crate::error::Result;
use crate::genetics::{ChromosomeCopy, GeneSpan};
use log::warn;
use serde::{Deserialize, Serialize};

/// Counts how many boolean inputs are true.
///
/// Reads no base pairs of its own; randomized inputs give a binomial output.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BooleanAccumulatorGene {
    pub output: GeneticDriver,
    pub inputs: Vec<GeneticDriver>,
}

impl BooleanAccumulatorGene {
    pub fn new(output: GeneticDriver, inputs: Vec<GeneticDriver>) -> Self {
        Self { output, inputs }
    }
}

impl GeneEvaluator for BooleanAccumulatorGene {
    fn gene_usage(&self) -> GeneSpan {
        GeneSpan::INVALID
    }

    fn inputs(&self) -> Vec<&GeneticDriver> {
        self.inputs.iter().collect()
    }

    fn outputs(&self) -> Vec<&GeneticDriver> {
        vec![&self.output]
    }

    fn always_valid(&self) -> bool {
        true
    }

    fn evaluate(&self, drivers: &mut DriverValueSet, _copies: &[ChromosomeCopy]) -> Result<bool> {
        let total = self
            .inputs
            .iter()
            .filter(|input| match drivers.try_get::<bool>(input) {
                Some(value) => value,
                None => {
                    warn!(
                        "Input genetic driver {} is not set, this is due to either a missing gene in the genome, or a gene ordering problem",
                        input
                    );
                    false
                }
            })
            .count();

        write_output(drivers, &self.output, total as f32, "boolean accumulator");
        Ok(true)
    }
}
