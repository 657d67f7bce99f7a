use super::traits::{write_output, GeneEvaluator};
use crate::drivers::{DriverValueSet, GeneticDriver};
use crate::error::Result;
use crate::genetics::{ChromosomeCopy, GeneSpan};
use serde::{Deserialize, Serialize};

/// Smallest number of base pairs whose values cover `classes`
pub(crate) fn base_pairs_for_classes(classes: u32) -> i32 {
    let mut length = 0;
    let mut capacity: u64 = 1;
    while capacity < classes as u64 {
        capacity *= 4;
        length += 1;
    }
    length
}

/// Picks one of `classes` discrete outputs. Lower classes dominate.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiscreteSelectorGene {
    pub output: GeneticDriver,
    /// 1 to 64
    pub classes: u32,
    #[serde(default)]
    pub origin: i32,
    /// Base pairs beyond the minimum needed to address every class
    #[serde(default)]
    pub additional_volatility: i32,
    /// When set, only one combination of base pairs maps to each class and every
    /// other combination is non-viable
    #[serde(default)]
    pub enforce_unique_combination: bool,
}

impl DiscreteSelectorGene {
    pub fn new(output: GeneticDriver, classes: u32, origin: i32) -> Self {
        Self {
            output,
            classes,
            origin,
            additional_volatility: 0,
            enforce_unique_combination: false,
        }
    }

    pub fn with_additional_volatility(mut self, additional_volatility: i32) -> Self {
        self.additional_volatility = additional_volatility;
        self
    }

    pub fn enforcing_unique_combination(mut self) -> Self {
        self.enforce_unique_combination = true;
        self
    }
}

impl GeneEvaluator for DiscreteSelectorGene {
    fn gene_usage(&self) -> GeneSpan {
        GeneSpan::from_origin(
            self.origin,
            base_pairs_for_classes(self.classes) + self.additional_volatility,
        )
    }

    fn inputs(&self) -> Vec<&GeneticDriver> {
        Vec::new()
    }

    fn outputs(&self) -> Vec<&GeneticDriver> {
        vec![&self.output]
    }

    fn always_valid(&self) -> bool {
        !self.enforce_unique_combination
    }

    fn evaluate(&self, drivers: &mut DriverValueSet, copies: &[ChromosomeCopy]) -> Result<bool> {
        let span = self.gene_usage();
        let classes = self.classes.max(1) as u64;

        let mut selected: Option<u64> = None;
        for copy in copies {
            let value = copy.sample_base_pairs(span)?;
            if self.enforce_unique_combination && value >= classes {
                return Ok(false);
            }
            let class = value % classes;
            selected = Some(selected.map_or(class, |current| current.min(class)));
        }

        write_output(drivers, &self.output, selected.unwrap_or(0) as f32, "discrete selector");
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::genetics::GeneIndex;

    #[test]
    fn test_span_covers_classes() {
        assert_eq!(base_pairs_for_classes(1), 0);
        assert_eq!(base_pairs_for_classes(4), 1);
        assert_eq!(base_pairs_for_classes(5), 2);
        assert_eq!(base_pairs_for_classes(16), 2);
        assert_eq!(base_pairs_for_classes(64), 3);

        let gene = DiscreteSelectorGene::new(GeneticDriver::discrete(0, "color"), 5, 2)
            .with_additional_volatility(1);
        assert_eq!(gene.gene_usage(), GeneSpan::new(2, 5));
    }

    #[test]
    fn test_lowest_class_dominates() {
        let driver = GeneticDriver::discrete(0, "color");
        let gene = DiscreteSelectorGene::new(driver.clone(), 3, 0);
        let copies = [
            // first base pair 0b10 -> class 2, 0b01 -> class 1
            ChromosomeCopy::new(vec![0b1000_0000], GeneIndex::new(4)),
            ChromosomeCopy::new(vec![0b0100_0000], GeneIndex::new(4)),
        ];

        let mut drivers = DriverValueSet::new();
        assert!(gene.evaluate(&mut drivers, &copies).unwrap());
        assert_eq!(drivers.get::<f32>(&driver).unwrap(), 1.0);
    }

    #[test]
    fn test_values_wrap_around_class_count() {
        let driver = GeneticDriver::discrete(0, "color");
        let gene = DiscreteSelectorGene::new(driver.clone(), 3, 0);
        let copies = [ChromosomeCopy::new(vec![0b1100_0000], GeneIndex::new(4))];

        let mut drivers = DriverValueSet::new();
        assert!(gene.evaluate(&mut drivers, &copies).unwrap());
        assert_eq!(drivers.get::<f32>(&driver).unwrap(), 0.0);
    }

    #[test]
    fn test_unique_combination_rejects_out_of_range_values() {
        let driver = GeneticDriver::discrete(0, "color");
        let gene = DiscreteSelectorGene::new(driver.clone(), 3, 0).enforcing_unique_combination();
        assert!(!gene.always_valid());

        let copies = [
            ChromosomeCopy::new(vec![0b0000_0000], GeneIndex::new(4)),
            ChromosomeCopy::new(vec![0b1100_0000], GeneIndex::new(4)),
        ];
        let mut drivers = DriverValueSet::new();
        assert!(!gene.evaluate(&mut drivers, &copies).unwrap());
        assert!(!drivers.contains(&driver));
    }
}
