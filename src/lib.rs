pub mod config;
pub mod drivers;
pub mod engines;
pub mod error;
pub mod genes;
pub mod genetics;
pub mod types;
pub mod utils;

pub use drivers::{DriverId, DriverValueSet, GeneticDriver};
pub use engines::generation::{DependencyGraph, TargetedGenomeSynthesizer};
pub use engines::targets::{BrokenFloatRange, GeneticTarget, TargetSet};
pub use error::{GeneticsError, Result};
pub use genes::{Gene, GeneEvaluator};
pub use genetics::{Chromosome, ChromosomeCopy, ChromosomeSpec, GeneIndex, GeneSpan, Genome, GenomeSpec};
pub use types::{DriverKind, TraitValue};
