pub mod chromosome;
pub mod genome;
pub mod index;
pub mod spec;
pub mod span;

pub use chromosome::{Chromosome, ChromosomeCopy};
pub use genome::Genome;
pub use index::GeneIndex;
pub use spec::{ChromosomeSpec, GenomeSpec};
pub use span::GeneSpan;
