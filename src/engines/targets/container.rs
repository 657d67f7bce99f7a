use super::target::GeneticTarget;
use crate::drivers::{DriverValueSet, GeneticDriver};
use log::warn;
use serde::{Deserialize, Serialize};

/// The targets of one request, at most one per driver.
///
/// Drivers without a target are unconstrained.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TargetSet {
    targets: Vec<GeneticTarget>,
}

impl TargetSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a set where later targets replace earlier ones on the same driver
    pub fn from_targets(targets: impl IntoIterator<Item = GeneticTarget>) -> Self {
        let mut set = Self::new();
        for target in targets {
            set.set_exclusive_target(target);
        }
        set
    }

    pub fn targets(&self) -> &[GeneticTarget] {
        &self.targets
    }

    pub fn target_for(&self, driver: &GeneticDriver) -> Option<&GeneticTarget> {
        self.targets.iter().find(|t| t.driver() == driver)
    }

    fn position_of(&self, driver: &GeneticDriver) -> Option<usize> {
        self.targets.iter().position(|t| t.driver() == driver)
    }

    pub fn len(&self) -> usize {
        self.targets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }

    pub fn clear(&mut self) {
        self.targets.clear();
    }

    pub fn drivers_match(&self, drivers: &DriverValueSet) -> bool {
        self.targets.iter().all(|t| t.matches(drivers))
    }

    /// Constrain a driver to exactly `target`, dropping whatever was there
    pub fn set_exclusive_target(&mut self, target: GeneticTarget) {
        match self.position_of(target.driver()) {
            Some(index) => self.targets[index] = target,
            None => self.targets.push(target),
        }
    }

    /// Also allow everything `target` accepts.
    ///
    /// A driver with no target already accepts everything and is left alone.
    pub fn include_target(&mut self, target: &GeneticTarget) {
        let Some(index) = self.position_of(target.driver()) else {
            return;
        };
        match (&mut self.targets[index], target) {
            (GeneticTarget::Boolean(existing), GeneticTarget::Boolean(incoming)) => {
                if existing.value != incoming.value {
                    // both values are allowed now
                    self.targets.remove(index);
                }
            }
            (GeneticTarget::Float(existing), GeneticTarget::Float(incoming)) => {
                existing.merge_in(incoming);
            }
            (_, incoming) => {
                warn!("cannot include genetic target {}", incoming);
            }
        }
    }

    /// Stop allowing anything `target` accepts
    pub fn exclude_target(&mut self, target: &GeneticTarget) {
        match (self.position_of(target.driver()), target) {
            (_, GeneticTarget::Boolean(incoming)) => {
                self.set_exclusive_target(incoming.invert().into());
            }
            (None, GeneticTarget::Float(incoming)) => {
                self.targets.push(incoming.invert().into());
            }
            (Some(index), GeneticTarget::Float(incoming)) => match &mut self.targets[index] {
                GeneticTarget::Float(existing) => existing.exclude(incoming),
                other => warn!("cannot exclude {} from genetic target {}", incoming.driver, other),
            },
            (_, GeneticTarget::Fertile(_)) => {
                warn!("cannot exclude genetic target {}", target);
            }
        }
    }

    /// Widen this set by every target of `other`
    pub fn merge_other_in(&mut self, other: &TargetSet) {
        for target in &other.targets {
            self.include_target(target);
        }
    }
}
