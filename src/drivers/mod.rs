pub mod describe;
pub mod registry;
pub mod value_set;

pub use describe::{DriverDescriptor, DriverDetail};
pub use registry::DriverRegistry;
pub use value_set::DriverValueSet;

use crate::types::DriverKind;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::hash::{Hash, Hasher};

/// Caller-assigned stable identity of a genetic driver
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DriverId(pub u32);

impl fmt::Display for DriverId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A named, typed output slot that genes write into.
///
/// Two drivers are the same driver when their ids match; the name is only for people.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneticDriver {
    pub id: DriverId,
    pub name: String,
    pub kind: DriverKind,
}

impl GeneticDriver {
    pub fn new(id: u32, name: impl Into<String>, kind: DriverKind) -> Self {
        Self {
            id: DriverId(id),
            name: name.into(),
            kind,
        }
    }

    pub fn boolean(id: u32, name: impl Into<String>) -> Self {
        Self::new(id, name, DriverKind::Boolean)
    }

    pub fn continuous(id: u32, name: impl Into<String>) -> Self {
        Self::new(id, name, DriverKind::ContinuousFloat)
    }

    pub fn discrete(id: u32, name: impl Into<String>) -> Self {
        Self::new(id, name, DriverKind::DiscreteFloat)
    }

    pub fn text(id: u32, name: impl Into<String>) -> Self {
        Self::new(id, name, DriverKind::Text)
    }

    /// Whether ranges over this driver compare by integer floor
    pub fn compare_as_integers(&self) -> bool {
        self.kind.compare_as_integers()
    }
}

impl PartialEq for GeneticDriver {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for GeneticDriver {}

impl Hash for GeneticDriver {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Display for GeneticDriver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_identity_is_by_id() {
        let a = GeneticDriver::boolean(1, "horns");
        let renamed = GeneticDriver::boolean(1, "antlers");
        let other = GeneticDriver::boolean(2, "horns");

        assert_eq!(a, renamed);
        assert_ne!(a, other);

        let set: HashSet<_> = [a, renamed, other].into_iter().collect();
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn test_only_discrete_compares_as_integers() {
        assert!(GeneticDriver::discrete(0, "petals").compare_as_integers());
        assert!(!GeneticDriver::continuous(1, "height").compare_as_integers());
        assert!(!GeneticDriver::boolean(2, "spots").compare_as_integers());
    }
}
