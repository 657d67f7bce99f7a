use super::chromosome::Chromosome;
use super::spec::GenomeSpec;
use crate::error::{GeneticsError, Result};
use crate::utils::{read_json, write_json};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Ordered chromosomes of one organism, one per declared chromosome spec
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Genome {
    chromosomes: Vec<Chromosome>,
}

impl Genome {
    pub fn new(chromosomes: Vec<Chromosome>) -> Self {
        Self { chromosomes }
    }

    /// Read a genome saved by [`save_json`](Self::save_json)
    pub fn load_json<P: AsRef<Path>>(path: P) -> Result<Self> {
        read_json(path)
    }

    pub fn save_json<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        write_json(self, path)
    }

    /// Random genome shaped by `spec`
    pub fn generate_base<R: Rng>(spec: &GenomeSpec, rng: &mut R) -> Self {
        spec.generate_base(rng)
    }

    /// Breed a child from `parents`.
    ///
    /// Chromosome `i` of the child is recombined from chromosome `i` of every parent.
    pub fn from_parents<R: Rng>(parents: &[&Genome], rng: &mut R) -> Result<Genome> {
        let reference = parents.first().ok_or_else(|| {
            GeneticsError::ShapeMismatch("breeding needs at least one parent genome".to_string())
        })?;
        let chromosome_count = reference.chromosomes.len();
        if parents
            .iter()
            .any(|p| p.chromosomes.len() != chromosome_count)
        {
            return Err(GeneticsError::ShapeMismatch(
                "all parent genomes must carry the same number of chromosomes".to_string(),
            ));
        }

        let chromosomes = (0..chromosome_count)
            .map(|i| {
                let sources: Vec<&Chromosome> = parents.iter().map(|p| &p.chromosomes[i]).collect();
                Chromosome::recombine(&sources, rng)
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Genome { chromosomes })
    }

    pub fn chromosomes(&self) -> &[Chromosome] {
        &self.chromosomes
    }

    pub fn chromosomes_mut(&mut self) -> &mut [Chromosome] {
        &mut self.chromosomes
    }

    pub fn chromosome(&self, index: usize) -> Option<&Chromosome> {
        self.chromosomes.get(index)
    }

    pub fn enforce_invariance_over_homologous_copies(&mut self) {
        for chromosome in &mut self.chromosomes {
            chromosome.enforce_invariance_over_homologous_copies();
        }
    }
}
