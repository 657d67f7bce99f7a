use super::broken_range::{BrokenFloatRange, FloatRange};
use crate::drivers::{DriverRegistry, DriverValueSet, GeneticDriver};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Requires a boolean driver to hold one value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BooleanTarget {
    pub driver: GeneticDriver,
    pub value: bool,
}

impl BooleanTarget {
    pub fn new(driver: GeneticDriver, value: bool) -> Self {
        Self { driver, value }
    }

    /// Target a fair coin flip's worth of value
    pub fn random<R: Rng>(driver: GeneticDriver, rng: &mut R) -> Self {
        Self::new(driver, rng.gen_bool(0.5))
    }

    pub fn invert(&self) -> Self {
        Self::new(self.driver.clone(), !self.value)
    }

    pub fn matches(&self, drivers: &DriverValueSet) -> bool {
        drivers.try_get::<bool>(&self.driver) == Some(self.value)
    }

    pub fn describe(&self, registry: &DriverRegistry) -> String {
        match registry.describe(&self.driver) {
            Some(descriptor) => descriptor.describe_state(&self.value.into()),
            None => format!("{}: {}", self.driver, self.value),
        }
    }
}

/// Requires a float driver to fall inside a broken range
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FloatTarget {
    pub driver: GeneticDriver,
    range: BrokenFloatRange,
}

impl FloatTarget {
    pub fn new(driver: GeneticDriver, min: f32, max: f32) -> Self {
        let range = BrokenFloatRange::new(min, max, driver.compare_as_integers());
        Self { driver, range }
    }

    pub fn from_ranges(driver: GeneticDriver, ranges: impl IntoIterator<Item = FloatRange>) -> Self {
        let range = BrokenFloatRange::from_ranges(ranges, driver.compare_as_integers());
        Self { driver, range }
    }

    pub fn range(&self) -> &BrokenFloatRange {
        &self.range
    }

    pub fn ranges(&self) -> Vec<FloatRange> {
        self.range.representative_ranges()
    }

    pub fn matches(&self, drivers: &DriverValueSet) -> bool {
        drivers
            .try_get::<f32>(&self.driver)
            .map_or(false, |value| self.range.matches(value))
    }

    pub fn merge_in(&mut self, other: &FloatTarget) {
        self.range.merge_in(&other.range);
    }

    pub fn exclude(&mut self, other: &FloatTarget) {
        self.range.exclude(&other.range);
    }

    pub fn invert(&self) -> Self {
        Self {
            driver: self.driver.clone(),
            range: self.range.invert(),
        }
    }

    pub fn describe(&self, registry: &DriverRegistry) -> String {
        let descriptor = registry.describe(&self.driver);
        self.ranges()
            .iter()
            .map(|r| match descriptor {
                Some(descriptor) => {
                    descriptor.describe_range(&r.min_value.into(), &r.max_value.into())
                }
                None => format!("{} between {} and {}", self.driver, r.min_value, r.max_value),
            })
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// Requires a driver to be present at all, which only happens when its gene
/// reports the genome as viable
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FertileTarget {
    pub driver: GeneticDriver,
}

impl FertileTarget {
    pub fn new(driver: GeneticDriver) -> Self {
        Self { driver }
    }

    pub fn matches(&self, drivers: &DriverValueSet) -> bool {
        drivers.contains(&self.driver)
    }
}

/// Something a synthesized genome has to satisfy
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum GeneticTarget {
    Boolean(BooleanTarget),
    Float(FloatTarget),
    Fertile(FertileTarget),
}

impl GeneticTarget {
    pub fn driver(&self) -> &GeneticDriver {
        match self {
            GeneticTarget::Boolean(t) => &t.driver,
            GeneticTarget::Float(t) => &t.driver,
            GeneticTarget::Fertile(t) => &t.driver,
        }
    }

    pub fn matches(&self, drivers: &DriverValueSet) -> bool {
        match self {
            GeneticTarget::Boolean(t) => t.matches(drivers),
            GeneticTarget::Float(t) => t.matches(drivers),
            GeneticTarget::Fertile(t) => t.matches(drivers),
        }
    }

    pub fn describe(&self, registry: &DriverRegistry) -> String {
        match self {
            GeneticTarget::Boolean(t) => t.describe(registry),
            GeneticTarget::Float(t) => t.describe(registry),
            GeneticTarget::Fertile(t) => t.driver.name.clone(),
        }
    }
}

impl fmt::Display for GeneticTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GeneticTarget::Boolean(t) => write!(f, "{} is {}", t.driver, t.value),
            GeneticTarget::Float(t) => write!(f, "{} in {}", t.driver, t.range),
            GeneticTarget::Fertile(t) => write!(f, "{} is fertile", t.driver),
        }
    }
}

impl From<BooleanTarget> for GeneticTarget {
    fn from(target: BooleanTarget) -> Self {
        GeneticTarget::Boolean(target)
    }
}

impl From<FloatTarget> for GeneticTarget {
    fn from(target: FloatTarget) -> Self {
        GeneticTarget::Float(target)
    }
}

impl From<FertileTarget> for GeneticTarget {
    fn from(target: FertileTarget) -> Self {
        GeneticTarget::Fertile(target)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::drivers::DriverDescriptor;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_targets_fail_on_missing_drivers() {
        let drivers = DriverValueSet::new();
        assert!(!BooleanTarget::new(GeneticDriver::boolean(0, "a"), false).matches(&drivers));
        assert!(!FloatTarget::new(GeneticDriver::continuous(1, "b"), 0.0, 1.0).matches(&drivers));
        assert!(!FertileTarget::new(GeneticDriver::boolean(0, "a")).matches(&drivers));
    }

    #[test]
    fn test_discrete_driver_makes_discrete_target() {
        let petals = GeneticDriver::discrete(0, "petals");
        let target = FloatTarget::new(petals.clone(), 2.3, 5.7);
        assert!(target.range().is_discrete());

        let mut drivers = DriverValueSet::new();
        drivers.set(&petals, 5.9f32);
        assert!(target.matches(&drivers));
        drivers.force_set(&petals, 6.0f32);
        assert!(!target.matches(&drivers));
    }

    #[test]
    fn test_random_boolean_targets_cover_both_values() {
        let mut rng = StdRng::seed_from_u64(17);
        let driver = GeneticDriver::boolean(0, "spots");
        let trues = (0..200)
            .filter(|_| BooleanTarget::random(driver.clone(), &mut rng).value)
            .count();
        assert!(trues > 60 && trues < 140);
    }

    #[test]
    fn test_descriptions_use_registry() {
        let registry = DriverRegistry::from_descriptors([
            DriverDescriptor::boolean(0, "horns", "Horned", "Polled"),
            DriverDescriptor::continuous(1, "height", 0.0, 3.0),
        ]);
        let horns = registry.get(crate::drivers::DriverId(0)).unwrap().driver.clone();
        let height = registry.get(crate::drivers::DriverId(1)).unwrap().driver.clone();

        assert_eq!(BooleanTarget::new(horns, true).describe(&registry), "Horned");

        let mut target = FloatTarget::new(height.clone(), 0.5, 1.0);
        target.merge_in(&FloatTarget::new(height, 2.0, 2.5));
        assert_eq!(
            target.describe(&registry),
            "height between 0.5 and 1, height between 2 and 2.5"
        );
    }
}
