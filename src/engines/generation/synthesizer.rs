use super::dependency_graph::{DependencyGraph, GeneLocation, NodeId};
use crate::config::{ConfigSection, SynthesisConfig};
use crate::drivers::DriverValueSet;
use crate::engines::targets::{FertileTarget, GeneticTarget};
use crate::error::{GeneticsError, Result};
use crate::genes::GeneEvaluator;
use crate::genetics::{GeneSpan, Genome, GenomeSpec};
use log::debug;
use rand::Rng;
use std::collections::{BTreeMap, HashMap};

/// What has to be evaluated to check a target
#[derive(Debug, Clone, Copy)]
enum Subject {
    /// The final value of a driver
    Driver(NodeId),
    /// The viability of one gene, whether or not a later gene overwrites its output
    Gene(GeneLocation),
}

/// A target bound to what it checks and the genetic material that can move it
struct PlannedTarget {
    target: GeneticTarget,
    subject: Subject,
    basis: BTreeMap<usize, GeneSpan>,
}

/// Builds genomes whose drivers satisfy a list of targets.
///
/// Starting from a random base, any target that does not match gets the
/// genetic material underneath it rerolled until it does. Passes over every
/// target repeat until one pass changes nothing and the whole genome compiles.
pub struct TargetedGenomeSynthesizer<'a> {
    spec: &'a GenomeSpec,
    graph: DependencyGraph<'a>,
    plan: Vec<PlannedTarget>,
    config: SynthesisConfig,
}

impl<'a> TargetedGenomeSynthesizer<'a> {
    /// Plan synthesis for `targets`.
    ///
    /// Every gene that can reject a genome gets a fertility target, ordered
    /// leaf first and checked before the caller's targets. This includes genes
    /// whose output a later gene overwrites, since compiling still evaluates
    /// them. Fails when a target names a driver no gene writes.
    pub fn new(
        spec: &'a GenomeSpec,
        targets: impl IntoIterator<Item = GeneticTarget>,
        config: SynthesisConfig,
    ) -> Result<Self> {
        config.validate()?;
        spec.validate()?;
        let graph = DependencyGraph::build(spec)?;

        // one fertility check per gene that can reject a genome, ordered by
        // where its output sits in the leaf-first order
        let rank: HashMap<NodeId, usize> = graph
            .leaf_first_order()
            .iter()
            .enumerate()
            .map(|(position, id)| (*id, position))
            .collect();
        let mut fertility: Vec<(usize, PlannedTarget)> = graph
            .locations()
            .filter(|(_, gene)| !gene.always_valid())
            .filter_map(|(location, gene)| {
                let driver = gene.outputs().into_iter().next()?;
                let position = graph.node_for(driver).and_then(|id| rank.get(&id).copied())?;
                let planned = PlannedTarget {
                    target: FertileTarget::new(driver.clone()).into(),
                    subject: Subject::Gene(location),
                    basis: graph.gene_basis(location),
                };
                Some((position, planned))
            })
            .collect();
        fertility.sort_by_key(|(position, _)| *position);
        let fertility_targets = fertility.len();

        let mut plan: Vec<PlannedTarget> = fertility.into_iter().map(|(_, planned)| planned).collect();
        for target in targets {
            let node = graph
                .node_for(target.driver())
                .filter(|id| graph.node(*id).source.is_some())
                .ok_or_else(|| GeneticsError::UnknownDriver(target.driver().to_string()))?;
            plan.push(PlannedTarget {
                basis: graph.basis(node),
                subject: Subject::Driver(node),
                target,
            });
        }

        debug!(
            "planned synthesis of {} targets, {} of them fertility checks",
            plan.len(),
            fertility_targets
        );

        Ok(Self {
            spec,
            graph,
            plan,
            config,
        })
    }

    pub fn config(&self) -> &SynthesisConfig {
        &self.config
    }

    pub fn graph(&self) -> &DependencyGraph<'a> {
        &self.graph
    }

    /// Every target checked, fertility checks first
    pub fn targets(&self) -> impl Iterator<Item = &GeneticTarget> {
        self.plan.iter().map(|p| &p.target)
    }

    /// An endless stream of matching genomes.
    ///
    /// Each item is independent. The stream ends right after yielding an error.
    pub fn synthesize<'s, R: Rng>(&'s self, rng: &'s mut R) -> SynthesizedGenomes<'s, 'a, R> {
        SynthesizedGenomes {
            synthesizer: self,
            rng,
            failed: false,
        }
    }

    /// Synthesize one genome starting from a fresh random base
    pub fn synthesize_one<R: Rng>(&self, rng: &mut R) -> Result<Genome> {
        let base = self.spec.generate_base(rng);
        self.synthesize_from_base(base, rng)
    }

    /// Steer `genome` until every target matches.
    ///
    /// Only material under unmatched targets is rerolled, so the rest of the
    /// genome survives. If a stable genome still fails to compile, synthesis
    /// starts over from a random base.
    pub fn synthesize_from_base<R: Rng>(&self, mut genome: Genome, rng: &mut R) -> Result<Genome> {
        if genome.chromosomes().len() != self.spec.chromosomes.len() {
            return Err(GeneticsError::ShapeMismatch(format!(
                "Chromosome number mismatch! Chromosomes in data: {}, current chromosome count: {}",
                genome.chromosomes().len(),
                self.spec.chromosomes.len()
            )));
        }
        if !self.config.variance_over_homologous {
            genome.enforce_invariance_over_homologous_copies();
        }

        for pass in 0..self.config.max_passes {
            if self.run_pass(&mut genome, rng)? {
                continue;
            }
            if self.spec.compile(&genome)?.is_some() {
                debug!("synthesized genome after {} passes", pass + 1);
                return Ok(genome);
            }
            debug!("stable genome failed to compile on pass {}, starting over", pass + 1);
            genome = self.spec.generate_base(rng);
            if !self.config.variance_over_homologous {
                genome.enforce_invariance_over_homologous_copies();
            }
        }

        Err(GeneticsError::Exhausted {
            target: "a stable genome".to_string(),
            attempts: self.config.max_passes,
        })
    }

    /// Bring every target in line once. Returns whether anything was rerolled.
    fn run_pass<R: Rng>(&self, genome: &mut Genome, rng: &mut R) -> Result<bool> {
        let mut mutated = false;
        for planned in &self.plan {
            mutated |= self.steer_target(planned, genome, rng)?;
        }
        Ok(mutated)
    }

    fn steer_target<R: Rng>(&self, planned: &PlannedTarget, genome: &mut Genome, rng: &mut R) -> Result<bool> {
        let limit = self.config.max_rerolls_per_target;
        for rerolls in 0..=limit {
            if self.matches(planned, genome)? {
                if rerolls > 0 {
                    debug!("matched {} after {} rerolls", planned.target, rerolls);
                }
                return Ok(rerolls > 0);
            }
            if rerolls < limit {
                self.reroll(planned, genome, rng)?;
            }
        }

        Err(GeneticsError::Exhausted {
            target: planned.target.to_string(),
            attempts: limit,
        })
    }

    fn matches(&self, planned: &PlannedTarget, genome: &Genome) -> Result<bool> {
        let mut drivers = DriverValueSet::new();
        match planned.subject {
            Subject::Driver(node) => {
                self.graph.recursive_evaluate(node, &mut drivers, genome)?;
                Ok(planned.target.matches(&drivers))
            }
            Subject::Gene(location) => self.graph.evaluate_gene(location, &mut drivers, genome),
        }
    }

    /// Overwrite the target's basis with fresh random bytes
    fn reroll<R: Rng>(&self, planned: &PlannedTarget, genome: &mut Genome, rng: &mut R) -> Result<()> {
        for (chromosome_index, span) in &planned.basis {
            let chromosome = genome
                .chromosomes_mut()
                .get_mut(*chromosome_index)
                .ok_or_else(|| {
                    GeneticsError::ShapeMismatch(format!("genome has no chromosome {}", chromosome_index))
                })?;

            let mut buffer = vec![0u8; span.byte_length()];
            for (copy_index, copy) in chromosome.copies_mut().iter_mut().enumerate() {
                if copy_index == 0 || self.config.variance_over_homologous {
                    rng.fill(&mut buffer[..]);
                }
                copy.write_into_gene_span(*span, &buffer)?;
            }
        }
        Ok(())
    }
}

/// Iterator returned by [`TargetedGenomeSynthesizer::synthesize`]
pub struct SynthesizedGenomes<'s, 'a, R: Rng> {
    synthesizer: &'s TargetedGenomeSynthesizer<'a>,
    rng: &'s mut R,
    failed: bool,
}

impl<'s, 'a, R: Rng> Iterator for SynthesizedGenomes<'s, 'a, R> {
    type Item = Result<Genome>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }
        let result = self.synthesizer.synthesize_one(self.rng);
        self.failed = result.is_err();
        Some(result)
    }
}

impl<'s, 'a, R: Rng> std::iter::FusedIterator for SynthesizedGenomes<'s, 'a, R> {}
