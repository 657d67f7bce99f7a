pub mod broken_range;
pub mod container;
pub mod generator;
pub mod target;

pub use broken_range::{BrokenFloatRange, FloatRange};
pub use container::TargetSet;
pub use generator::FloatTargetGenerator;
pub use target::{BooleanTarget, FertileTarget, FloatTarget, GeneticTarget};
