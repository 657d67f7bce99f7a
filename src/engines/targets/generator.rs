use super::target::FloatTarget;
use crate::drivers::GeneticDriver;
use rand::Rng;
use serde::{Deserialize, Serialize};

fn round_to_tenth(value: f32) -> f32 {
    (value * 10.0).round() / 10.0
}

/// Draws random float targets of bounded width inside an absolute window
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FloatTargetGenerator {
    pub driver: GeneticDriver,
    pub absolute_min: f32,
    pub absolute_max: f32,
    /// Narrowest width a generated range may have
    pub range_min: f32,
    /// Widest width a generated range may have
    pub range_max: f32,
}

impl FloatTargetGenerator {
    pub fn new(
        driver: GeneticDriver,
        absolute_min: f32,
        absolute_max: f32,
        range_min: f32,
        range_max: f32,
    ) -> Self {
        Self {
            driver,
            absolute_min,
            absolute_max,
            range_min,
            range_max,
        }
    }

    pub fn generate<R: Rng>(&self, rng: &mut R) -> FloatTarget {
        let width = rng.gen::<f32>() * (self.range_max - self.range_min) + self.range_min;
        let start = rng.gen::<f32>() * (self.absolute_max - self.absolute_min - width) + self.absolute_min;
        FloatTarget::new(
            self.driver.clone(),
            round_to_tenth(start),
            round_to_tenth(start + width),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_generated_ranges_stay_in_bounds() {
        let generator = FloatTargetGenerator::new(GeneticDriver::continuous(0, "height"), 1.0, 5.0, 1.0, 3.0);
        let mut rng = StdRng::seed_from_u64(3);

        for _ in 0..500 {
            let target = generator.generate(&mut rng);
            let ranges = target.ranges();
            assert_eq!(ranges.len(), 1);
            let range = ranges[0];
            assert!(range.min_value >= 1.0 - 1e-5);
            assert!(range.max_value <= 5.0 + 1e-5);

            let width = range.max_value - range.min_value;
            assert!(width >= 1.0 - 0.1 - 1e-5, "width {} too narrow", width);
            assert!(width <= 3.0 + 0.1 + 1e-5, "width {} too wide", width);
        }
    }

    #[test]
    fn test_ends_round_to_a_tenth() {
        let generator = FloatTargetGenerator::new(GeneticDriver::continuous(0, "height"), 0.0, 10.0, 2.0, 4.0);
        let mut rng = StdRng::seed_from_u64(11);
        let range = generator.generate(&mut rng).ranges()[0];

        let scaled = range.min_value * 10.0;
        assert!((scaled - scaled.round()).abs() < 1e-3);
    }
}
