use super::{DriverId, GeneticDriver};
use crate::error::{GeneticsError, Result};
use crate::types::{DriverValue, TraitValue};
use log::warn;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Evaluated driver values of one genome.
///
/// Writable while a genome is being compiled; once locked, plain writes are
/// dropped and only `force_set` can change a value.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(from = "PersistedValues", into = "PersistedValues")]
pub struct DriverValueSet {
    values: BTreeMap<DriverId, (GeneticDriver, TraitValue)>,
    locked: bool,
}

impl DriverValueSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make the set read-only. Returns true only for the call that locked it.
    pub fn lock(&mut self) -> bool {
        let newly_locked = !self.locked;
        self.locked = true;
        newly_locked
    }

    pub fn is_locked(&self) -> bool {
        self.locked
    }

    /// Store a value unless the set is locked. Returns whether the value was written.
    pub fn set(&mut self, driver: &GeneticDriver, value: impl Into<TraitValue>) -> bool {
        if self.locked {
            return false;
        }
        self.force_set(driver, value);
        true
    }

    /// Store a value even when locked
    pub fn force_set(&mut self, driver: &GeneticDriver, value: impl Into<TraitValue>) {
        let value = value.into();
        if !driver.kind.accepts(&value) {
            warn!("{} value written to {:?} genetic driver {}", value.type_name(), driver.kind, driver);
        }
        self.values.insert(driver.id, (driver.clone(), value));
    }

    pub fn contains(&self, driver: &GeneticDriver) -> bool {
        self.values.contains_key(&driver.id)
    }

    pub fn get<T: DriverValue>(&self, driver: &GeneticDriver) -> Result<T> {
        let value = self
            .try_get_value(driver)
            .ok_or_else(|| GeneticsError::DriverNotSet(driver.name.clone()))?;
        T::from_trait(value).ok_or_else(|| GeneticsError::TypeMismatch {
            expected: T::TYPE_NAME.to_string(),
            actual: value.type_name().to_string(),
        })
    }

    pub fn try_get<T: DriverValue>(&self, driver: &GeneticDriver) -> Option<T> {
        self.try_get_value(driver).and_then(T::from_trait)
    }

    pub fn try_get_value(&self, driver: &GeneticDriver) -> Option<&TraitValue> {
        self.values.get(&driver.id).map(|(_, value)| value)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&GeneticDriver, &TraitValue)> {
        self.values.values().map(|(driver, value)| (driver, value))
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl fmt::Display for DriverValueSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (driver, value) in self.iter() {
            writeln!(f, "{:>20}: {}", driver.name, value)?;
        }
        Ok(())
    }
}

#[derive(Serialize, Deserialize)]
struct PersistedValue {
    driver: GeneticDriver,
    value: TraitValue,
}

#[derive(Serialize, Deserialize)]
struct PersistedValues {
    values: Vec<PersistedValue>,
}

// a stored set is always a finished compile
impl From<PersistedValues> for DriverValueSet {
    fn from(persisted: PersistedValues) -> Self {
        let values = persisted
            .values
            .into_iter()
            .map(|entry| (entry.driver.id, (entry.driver, entry.value)))
            .collect();
        Self {
            values,
            locked: true,
        }
    }
}

impl From<DriverValueSet> for PersistedValues {
    fn from(set: DriverValueSet) -> Self {
        Self {
            values: set
                .values
                .into_values()
                .map(|(driver, value)| PersistedValue { driver, value })
                .collect(),
        }
    }
}
