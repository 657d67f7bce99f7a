use crate::config::{AnalysisConfig, ConfigSection};
use crate::drivers::GeneticDriver;
use crate::error::{GeneticsError, Result};
use crate::genetics::GenomeSpec;
use log::warn;
use rand::Rng;
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct FloatHistogram {
    pub driver: GeneticDriver,
    /// Bucket `i` counts values in `[i * bucket_size, (i + 1) * bucket_size)`
    pub buckets: Vec<usize>,
    pub bucket_size: f32,
}

impl FloatHistogram {
    pub fn total(&self) -> usize {
        self.buckets.iter().sum()
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct BoolHistogram {
    pub driver: GeneticDriver,
    pub false_count: usize,
    pub true_count: usize,
}

impl BoolHistogram {
    pub fn total(&self) -> usize {
        self.false_count + self.true_count
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct AnalysisResult {
    pub float_results: Vec<FloatHistogram>,
    pub bool_results: Vec<BoolHistogram>,
    /// Samples whose genome failed to compile
    pub inviable: usize,
}

/// Estimates driver distributions by compiling many random base genomes
pub struct DistributionSampler<'a> {
    spec: &'a GenomeSpec,
    floats_of_interest: Vec<GeneticDriver>,
    bools_of_interest: Vec<GeneticDriver>,
    histogram_bucket_size: f32,
}

impl<'a> DistributionSampler<'a> {
    pub fn new(
        spec: &'a GenomeSpec,
        floats_of_interest: Vec<GeneticDriver>,
        bools_of_interest: Vec<GeneticDriver>,
        histogram_bucket_size: f32,
    ) -> Result<Self> {
        if !(histogram_bucket_size > 0.0) {
            return Err(GeneticsError::Configuration(format!(
                "Histogram bucket size must be positive, got {}",
                histogram_bucket_size
            )));
        }
        spec.validate()?;
        Ok(Self {
            spec,
            floats_of_interest,
            bools_of_interest,
            histogram_bucket_size,
        })
    }

    pub fn from_config(
        spec: &'a GenomeSpec,
        floats_of_interest: Vec<GeneticDriver>,
        bools_of_interest: Vec<GeneticDriver>,
        config: &AnalysisConfig,
    ) -> Result<Self> {
        config.validate()?;
        Self::new(spec, floats_of_interest, bools_of_interest, config.histogram_bucket_size)
    }

    pub fn analyze<R: Rng>(&self, samples: usize, rng: &mut R) -> Result<AnalysisResult> {
        let mut float_buckets: Vec<Vec<usize>> = vec![Vec::new(); self.floats_of_interest.len()];
        let mut bool_counts: Vec<(usize, usize)> = vec![(0, 0); self.bools_of_interest.len()];
        let mut inviable = 0;

        for _ in 0..samples {
            let genome = self.spec.generate_base(rng);
            let Some(drivers) = self.spec.compile(&genome)? else {
                inviable += 1;
                continue;
            };

            for (driver, buckets) in self.floats_of_interest.iter().zip(&mut float_buckets) {
                let Some(value) = drivers.try_get::<f32>(driver) else {
                    warn!("Genetic data not complete. Missing driver {}", driver);
                    continue;
                };
                let bucket = (value / self.histogram_bucket_size).floor();
                if !(bucket >= 0.0) || !bucket.is_finite() {
                    warn!("{} value {} falls below the first histogram bucket", driver, value);
                    continue;
                }
                let bucket = bucket as usize;
                if buckets.len() <= bucket {
                    buckets.resize(bucket + 1, 0);
                }
                buckets[bucket] += 1;
            }

            for (driver, counts) in self.bools_of_interest.iter().zip(&mut bool_counts) {
                match drivers.try_get::<bool>(driver) {
                    Some(true) => counts.1 += 1,
                    Some(false) => counts.0 += 1,
                    None => warn!("Genetic data not complete. Missing driver {}", driver),
                }
            }
        }

        Ok(AnalysisResult {
            float_results: self
                .floats_of_interest
                .iter()
                .zip(float_buckets)
                .map(|(driver, buckets)| FloatHistogram {
                    driver: driver.clone(),
                    buckets,
                    bucket_size: self.histogram_bucket_size,
                })
                .collect(),
            bool_results: self
                .bools_of_interest
                .iter()
                .zip(bool_counts)
                .map(|(driver, (false_count, true_count))| BoolHistogram {
                    driver: driver.clone(),
                    false_count,
                    true_count,
                })
                .collect(),
            inviable,
        })
    }
}
