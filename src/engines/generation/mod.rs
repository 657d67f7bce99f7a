pub mod dependency_graph;
pub mod synthesizer;

pub use dependency_graph::{DependencyGraph, DriverNode, GeneLocation, NodeId};
pub use synthesizer::{SynthesizedGenomes, TargetedGenomeSynthesizer};
