use super::traits::{write_output, GeneEvaluator};
use crate::drivers::{DriverValueSet, GeneticDriver};
use crate::error::Result;
use crate::genetics::{ChromosomeCopy, GeneSpan};
use serde::{Deserialize, Serialize};

fn default_range_max() -> f32 {
    1.0
}

fn default_precision() -> i32 {
    4
}

/// Continuous value in `[range_min, range_max)`.
///
/// The copy whose value sits closest to `dominance_point` (a position between 0
/// and 1 across the range) is expressed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MendelianFloatGene {
    pub output: GeneticDriver,
    #[serde(default)]
    pub dominance_point: f32,
    #[serde(default)]
    pub range_min: f32,
    #[serde(default = "default_range_max")]
    pub range_max: f32,
    #[serde(default)]
    pub origin: i32,
    /// Base pairs sampled, 1 to 32
    #[serde(default = "default_precision")]
    pub precision: i32,
}

impl MendelianFloatGene {
    pub fn new(output: GeneticDriver, range_min: f32, range_max: f32, origin: i32) -> Self {
        Self {
            output,
            dominance_point: 0.0,
            range_min,
            range_max,
            origin,
            precision: default_precision(),
        }
    }

    pub fn with_dominance_point(mut self, dominance_point: f32) -> Self {
        self.dominance_point = dominance_point;
        self
    }

    pub fn with_precision(mut self, precision: i32) -> Self {
        self.precision = precision;
        self
    }

    /// Position of one copy's sample inside the range, in `[0, 1)`
    fn weight(&self, copy: &ChromosomeCopy) -> Result<f64> {
        let sample = copy.sample_base_pairs(self.gene_usage())?;
        Ok(sample as f64 / 4f64.powi(self.precision))
    }
}

impl GeneEvaluator for MendelianFloatGene {
    fn gene_usage(&self) -> GeneSpan {
        GeneSpan::from_origin(self.origin, self.precision)
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
        let range = (self.range_max - self.range_min) as f64;
        let mut closest = f64::MAX;
        let mut dominant = 0f64;

        for copy in copies {
            let weight = self.weight(copy)?;
            let distance = (weight - self.dominance_point as f64).abs();
            // ties keep the earlier copy
            if distance < closest {
                closest = distance;
                dominant = weight * range + self.range_min as f64;
            }
        }

        write_output(drivers, &self.output, dominant as f32, "mendelian float");
        Ok(true)
    }
}
