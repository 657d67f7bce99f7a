use super::{DriverDescriptor, DriverId, GeneticDriver};
use log::error;
use std::collections::HashMap;

/// Lookup from driver ids to their descriptors
#[derive(Debug, Clone, Default)]
pub struct DriverRegistry {
    descriptors: HashMap<DriverId, DriverDescriptor>,
    names: HashMap<String, DriverId>,
}

impl DriverRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_descriptors(descriptors: impl IntoIterator<Item = DriverDescriptor>) -> Self {
        let mut registry = Self::new();
        for descriptor in descriptors {
            registry.register(descriptor);
        }
        registry
    }

    /// Add a descriptor, replacing any with the same id.
    ///
    /// A name already used by a different driver is reported but still registered.
    pub fn register(&mut self, descriptor: DriverDescriptor) {
        let id = descriptor.driver.id;
        let name = descriptor.driver.name.clone();
        if let Some(existing) = self.names.get(&name) {
            if *existing != id {
                error!(
                    "Found a genetic driver with a duplicate name. {} has a name of '{}', which is already in use by {}",
                    id, name, existing
                );
            }
        } else {
            self.names.insert(name, id);
        }
        self.descriptors.insert(id, descriptor);
    }

    pub fn get(&self, id: DriverId) -> Option<&DriverDescriptor> {
        self.descriptors.get(&id)
    }

    pub fn describe(&self, driver: &GeneticDriver) -> Option<&DriverDescriptor> {
        self.get(driver.id)
    }

    pub fn by_name(&self, name: &str) -> Option<&DriverDescriptor> {
        self.names.get(name).and_then(|id| self.descriptors.get(id))
    }

    pub fn drivers(&self) -> impl Iterator<Item = &GeneticDriver> {
        self.descriptors.values().map(|d| &d.driver)
    }

    pub fn len(&self) -> usize {
        self.descriptors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.descriptors.is_empty()
    }
}
