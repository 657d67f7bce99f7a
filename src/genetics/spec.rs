use super::chromosome::{byte_length_for, Chromosome};
use super::genome::Genome;
use super::index::GeneIndex;
use super::span::GeneSpan;
use crate::drivers::{DriverValueSet, GeneticDriver};
use crate::error::{GeneticsError, Result};
use crate::genes::{Gene, GeneEvaluator};
use crate::utils::{read_json, write_json};
use log::warn;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;

fn default_copies() -> usize {
    2
}

/// Genes laid out on one chromosome and how many homologous copies it carries
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChromosomeSpec {
    pub genes: Vec<Gene>,
    #[serde(default = "default_copies")]
    pub copies: usize,
}

impl ChromosomeSpec {
    pub fn new(genes: Vec<Gene>, copies: usize) -> Self {
        Self { genes, copies }
    }

    /// Union of every gene's usage. Genes that read no base pairs are ignored.
    pub fn usage(&self) -> GeneSpan {
        self.genes
            .iter()
            .map(|g| g.gene_usage())
            .fold(GeneSpan::INVALID, |acc, next| acc + next)
    }

    /// Base pairs needed to hold every gene
    pub fn genetic_size(&self) -> GeneIndex {
        let usage = self.usage();
        if usage.is_valid() {
            usage.end
        } else {
            GeneIndex::new(0)
        }
    }

    pub fn byte_length(&self) -> usize {
        byte_length_for(self.genetic_size())
    }

    pub fn generate<R: Rng>(&self, rng: &mut R) -> Chromosome {
        Chromosome::generate_base(self.copies, self.genetic_size(), rng)
    }

    /// Evaluate every gene in declaration order. Stops at the first non-viable gene.
    pub fn compile_into(&self, chromosome: &Chromosome, drivers: &mut DriverValueSet) -> Result<bool> {
        let expected = self.byte_length();
        if expected != chromosome.byte_len() {
            warn!(
                "genome does not match current genes! Genome data size: {}, current gene size: {}",
                chromosome.byte_len(),
                expected
            );
        }
        for gene in &self.genes {
            if !gene.evaluate(drivers, chromosome.copies())? {
                return Ok(false);
            }
        }
        Ok(true)
    }
}

/// Full description of an organism's genetics: its chromosomes plus global
/// interpreters that only combine other drivers
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GenomeSpec {
    pub chromosomes: Vec<ChromosomeSpec>,
    #[serde(default)]
    pub interpreters: Vec<Gene>,
}

impl GenomeSpec {
    pub fn new(chromosomes: Vec<ChromosomeSpec>) -> Self {
        Self {
            chromosomes,
            interpreters: Vec::new(),
        }
    }

    pub fn with_interpreters(mut self, interpreters: Vec<Gene>) -> Self {
        self.interpreters = interpreters;
        self
    }

    /// Read and validate a specification stored as JSON
    pub fn load_json<P: AsRef<Path>>(path: P) -> Result<Self> {
        let spec: GenomeSpec = read_json(path)?;
        spec.validate()?;
        Ok(spec)
    }

    pub fn save_json<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        write_json(self, path)
    }

    /// Reject configurations no genome could be built from.
    ///
    /// Chromosomes whose genes leave the start unused are only warned about.
    pub fn validate(&self) -> Result<()> {
        for (index, chromosome) in self.chromosomes.iter().enumerate() {
            if chromosome.copies == 0 {
                return Err(GeneticsError::Configuration(format!(
                    "chromosome {} must carry at least one copy",
                    index
                )));
            }
            let usage = chromosome.usage();
            if usage.is_valid() && usage.start.position() > 0 {
                warn!(
                    "chromosome {} does not use the 0th allele, leading to wasted space",
                    index
                );
            }
            for gene in &chromosome.genes {
                validate_gene(gene)?;
            }
        }
        for gene in &self.interpreters {
            validate_gene(gene)?;
        }
        Ok(())
    }

    pub fn generate_base<R: Rng>(&self, rng: &mut R) -> Genome {
        Genome::new(self.chromosomes.iter().map(|c| c.generate(rng)).collect())
    }

    /// Evaluate every gene of `genome`.
    ///
    /// Chromosome genes run in declaration order, then the global interpreters.
    /// Returns `None` when any gene reports the genome as non-viable; otherwise
    /// the returned set is locked.
    pub fn compile(&self, genome: &Genome) -> Result<Option<DriverValueSet>> {
        if genome.chromosomes().len() != self.chromosomes.len() {
            return Err(GeneticsError::ShapeMismatch(format!(
                "Chromosome number mismatch! Chromosomes in data: {}, current chromosome count: {}",
                genome.chromosomes().len(),
                self.chromosomes.len()
            )));
        }

        let mut drivers = DriverValueSet::new();
        for (spec, chromosome) in self.chromosomes.iter().zip(genome.chromosomes()) {
            if !spec.compile_into(chromosome, &mut drivers)? {
                return Ok(None);
            }
        }
        for interpreter in &self.interpreters {
            if !interpreter.evaluate(&mut drivers, &[])? {
                return Ok(None);
            }
        }

        drivers.lock();
        Ok(Some(drivers))
    }

    /// Every gene with the chromosome it lives on, `None` for global interpreters
    pub fn genes(&self) -> impl Iterator<Item = (Option<usize>, &Gene)> {
        self.chromosomes
            .iter()
            .enumerate()
            .flat_map(|(index, c)| c.genes.iter().map(move |g| (Some(index), g)))
            .chain(self.interpreters.iter().map(|g| (None, g)))
    }

    /// Every driver read or written by any gene, first mention first
    pub fn drivers(&self) -> Vec<GeneticDriver> {
        let mut seen = HashSet::new();
        let mut drivers = Vec::new();
        for (_, gene) in self.genes() {
            for driver in gene.inputs().into_iter().chain(gene.outputs()) {
                if seen.insert(driver.id) {
                    drivers.push(driver.clone());
                }
            }
        }
        drivers
    }
}

fn validate_gene(gene: &Gene) -> Result<()> {
    let invalid = |message: String| Err(GeneticsError::Configuration(format!("{}: {}", gene, message)));
    match gene {
        Gene::BooleanSwitch(g) if !(1..=32).contains(&g.volatility) => {
            invalid(format!("volatility {} outside 1..=32", g.volatility))
        }
        Gene::MultiBoolean(g) if !(1..=32).contains(&g.volatility) => {
            invalid(format!("volatility {} outside 1..=32", g.volatility))
        }
        Gene::MendelianFloat(g) if !(1..=32).contains(&g.precision) => {
            invalid(format!("precision {} outside 1..=32", g.precision))
        }
        Gene::MendelianFloat(g) if !(0.0..=1.0).contains(&g.dominance_point) => {
            invalid(format!("dominance point {} outside 0..=1", g.dominance_point))
        }
        Gene::DiscreteSelector(g) if !(1..=64).contains(&g.classes) => {
            invalid(format!("{} classes outside 1..=64", g.classes))
        }
        Gene::DiscreteSelector(g) if g.gene_usage().len() > 32 => {
            invalid(format!("span of {} base pairs is too wide", g.gene_usage().len()))
        }
        Gene::BooleanAccumulator(_) => Ok(()),
        _ if gene.gene_usage().start.position() < 0 => {
            invalid("negative origin".to_string())
        }
        _ => Ok(()),
    }
}
