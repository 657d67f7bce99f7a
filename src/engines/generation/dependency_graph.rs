use crate::drivers::{DriverId, DriverValueSet, GeneticDriver};
use crate::error::{GeneticsError, Result};
use crate::genes::{Gene, GeneEvaluator};
use crate::genetics::{GeneSpan, Genome, GenomeSpec};
use log::warn;
use petgraph::algo::toposort;
use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::{Dfs, Reversed};
use petgraph::Direction;
use std::collections::{BTreeMap, HashMap};

/// Index of a node inside one [`DependencyGraph`]
pub type NodeId = NodeIndex;

/// Where a gene is declared: a chromosome's gene list, or the global
/// interpreters when `chromosome` is `None`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GeneLocation {
    pub chromosome: Option<usize>,
    pub gene: usize,
}

/// One driver and the gene that writes it
#[derive(Debug, Clone)]
pub struct DriverNode {
    pub driver: GeneticDriver,
    pub source: Option<GeneLocation>,
}

fn gene_locations(spec: &GenomeSpec) -> impl Iterator<Item = (GeneLocation, &Gene)> {
    spec.chromosomes
        .iter()
        .enumerate()
        .flat_map(|(chromosome, c)| {
            c.genes.iter().enumerate().map(move |(gene, g)| {
                let location = GeneLocation {
                    chromosome: Some(chromosome),
                    gene,
                };
                (location, g)
            })
        })
        .chain(spec.interpreters.iter().enumerate().map(|(gene, g)| {
            let location = GeneLocation {
                chromosome: None,
                gene,
            };
            (location, g)
        }))
}

/// Which driver depends on which, built once per genome specification.
///
/// Edges run from an input driver to the driver computed from it. The graph
/// is checked for cycles when built, so every walk over it terminates.
pub struct DependencyGraph<'a> {
    spec: &'a GenomeSpec,
    graph: DiGraph<DriverNode, ()>,
    by_driver: HashMap<DriverId, NodeId>,
    conflicts: Vec<String>,
    leaf_first: Vec<NodeId>,
}

impl<'a> DependencyGraph<'a> {
    /// Register every gene of `spec` in declaration order, global interpreters last.
    ///
    /// When two genes write the same driver the later one wins; the conflict is
    /// logged and kept for [`ensure_consistent`](Self::ensure_consistent).
    pub fn build(spec: &'a GenomeSpec) -> Result<Self> {
        let mut graph = Self {
            spec,
            graph: DiGraph::new(),
            by_driver: HashMap::new(),
            conflicts: Vec::new(),
            leaf_first: Vec::new(),
        };

        for (location, gene) in gene_locations(spec) {
            graph.integrate(location, gene);
        }
        let leaf_first = toposort(&graph.graph, None).map_err(|cycle| {
            GeneticsError::DependencyCycle(graph.graph[cycle.node_id()].driver.to_string())
        })?;
        graph.leaf_first = leaf_first;
        Ok(graph)
    }

    /// Every gene of the spec with its location, in declaration order
    pub fn locations(&self) -> impl Iterator<Item = (GeneLocation, &'a Gene)> {
        gene_locations(self.spec)
    }

    fn node_or_insert(&mut self, driver: &GeneticDriver) -> NodeId {
        if let Some(id) = self.by_driver.get(&driver.id) {
            return *id;
        }
        let id = self.graph.add_node(DriverNode {
            driver: driver.clone(),
            source: None,
        });
        self.by_driver.insert(driver.id, id);
        id
    }

    fn integrate(&mut self, location: GeneLocation, gene: &Gene) {
        let inputs: Vec<NodeId> = gene
            .inputs()
            .into_iter()
            .map(|driver| self.node_or_insert(driver))
            .collect();

        for output in gene.outputs() {
            let id = self.node_or_insert(output);
            if let Some(previous) = self.graph[id].source {
                let message = format!(
                    "multiple genes output to genetic driver {}: {} and {}",
                    output,
                    self.describe_location(previous),
                    gene
                );
                warn!("{}", message);
                self.conflicts.push(message);
            }

            // the new writer's inputs replace the previous writer's
            while let Some(edge) = self.graph.first_edge(id, Direction::Incoming) {
                self.graph.remove_edge(edge);
            }
            for input in &inputs {
                self.graph.update_edge(*input, id, ());
            }
            self.graph[id].source = Some(location);
        }
    }

    fn describe_location(&self, location: GeneLocation) -> String {
        self.gene(location)
            .map(|gene| gene.to_string())
            .unwrap_or_else(|| "unknown gene".to_string())
    }

    pub fn spec(&self) -> &'a GenomeSpec {
        self.spec
    }

    pub fn node(&self, id: NodeId) -> &DriverNode {
        &self.graph[id]
    }

    pub fn nodes(&self) -> impl Iterator<Item = (NodeId, &DriverNode)> {
        self.graph
            .node_indices()
            .map(move |id| (id, &self.graph[id]))
    }

    /// Nodes whose drivers feed the gene writing `id`
    pub fn inputs(&self, id: NodeId) -> Vec<NodeId> {
        self.graph.neighbors_directed(id, Direction::Incoming).collect()
    }

    pub fn len(&self) -> usize {
        self.graph.node_count()
    }

    pub fn is_empty(&self) -> bool {
        self.graph.node_count() == 0
    }

    pub fn node_for(&self, driver: &GeneticDriver) -> Option<NodeId> {
        self.by_driver.get(&driver.id).copied()
    }

    pub fn gene(&self, location: GeneLocation) -> Option<&'a Gene> {
        match location.chromosome {
            Some(chromosome) => self.spec.chromosomes.get(chromosome)?.genes.get(location.gene),
            None => self.spec.interpreters.get(location.gene),
        }
    }

    /// The gene writing this node's driver, if any gene does
    pub fn source_gene(&self, id: NodeId) -> Option<&'a Gene> {
        self.graph[id].source.and_then(|location| self.gene(location))
    }

    /// Conflicts found while building, one message per duplicate writer
    pub fn conflicts(&self) -> &[String] {
        &self.conflicts
    }

    pub fn ensure_consistent(&self) -> Result<()> {
        if self.conflicts.is_empty() {
            return Ok(());
        }
        Err(GeneticsError::TopologyConflict(self.conflicts.join("; ")))
    }

    /// Every node, each placed after all of the nodes it reads from
    pub fn leaf_first_order(&self) -> &[NodeId] {
        &self.leaf_first
    }

    /// `id` and everything it transitively reads from, each once
    fn upstream(&self, id: NodeId) -> Vec<NodeId> {
        let reversed = Reversed(&self.graph);
        let mut dfs = Dfs::new(reversed, id);
        let mut found = Vec::new();
        while let Some(node) = dfs.next(reversed) {
            found.push(node);
        }
        found
    }

    /// Union of the gene usage of this node and everything upstream of it,
    /// regardless of which chromosome each gene lives on
    pub fn basis_span(&self, id: NodeId) -> GeneSpan {
        self.upstream(id)
            .into_iter()
            .filter_map(|node| self.source_gene(node))
            .fold(GeneSpan::INVALID, |acc, gene| acc + gene.gene_usage())
    }

    fn add_usage(&self, spans: &mut BTreeMap<usize, GeneSpan>, location: GeneLocation) {
        let (Some(chromosome), Some(gene)) = (location.chromosome, self.gene(location)) else {
            return;
        };
        let usage = gene.gene_usage();
        if !usage.is_valid() {
            return;
        }
        let span = spans.entry(chromosome).or_default();
        *span = *span + usage;
    }

    /// All genetic material that can affect this node's driver, per chromosome
    pub fn basis(&self, id: NodeId) -> BTreeMap<usize, GeneSpan> {
        let mut spans = BTreeMap::new();
        for node in self.upstream(id) {
            if let Some(location) = self.graph[node].source {
                self.add_usage(&mut spans, location);
            }
        }
        spans
    }

    /// All genetic material that can affect the gene at `location`, per chromosome.
    ///
    /// Unlike [`basis`](Self::basis) this follows the gene itself, so it also
    /// covers genes whose output a later gene overwrites.
    pub fn gene_basis(&self, location: GeneLocation) -> BTreeMap<usize, GeneSpan> {
        let mut spans = BTreeMap::new();
        self.add_usage(&mut spans, location);
        let inputs = self.gene(location).map(|gene| gene.inputs()).unwrap_or_default();
        for input in inputs.into_iter().filter_map(|driver| self.node_for(driver)) {
            for node in self.upstream(input) {
                if let Some(source) = self.graph[node].source {
                    self.add_usage(&mut spans, source);
                }
            }
        }
        spans
    }

    /// Evaluate just enough of `genome` to produce this node's driver.
    ///
    /// Drivers already in `drivers` are not evaluated again. A driver that no
    /// gene writes is left unset for its consumers to handle.
    pub fn recursive_evaluate(&self, id: NodeId, drivers: &mut DriverValueSet, genome: &Genome) -> Result<bool> {
        let node = &self.graph[id];
        if drivers.contains(&node.driver) {
            return Ok(true);
        }
        match node.source {
            Some(location) => self.evaluate_gene(location, drivers, genome),
            None => Ok(true),
        }
    }

    /// Evaluate the gene at `location` after everything it reads from.
    ///
    /// Every input is evaluated even after one reports non-viable.
    pub fn evaluate_gene(&self, location: GeneLocation, drivers: &mut DriverValueSet, genome: &Genome) -> Result<bool> {
        let gene = self.gene(location).ok_or_else(|| {
            GeneticsError::ShapeMismatch(format!("no gene at {:?}", location))
        })?;

        let mut inputs_viable = true;
        for input in gene.inputs().into_iter().filter_map(|driver| self.node_for(driver)) {
            inputs_viable &= self.recursive_evaluate(input, drivers, genome)?;
        }

        let viable = match location.chromosome {
            Some(index) => {
                let chromosome = genome.chromosome(index).ok_or_else(|| {
                    GeneticsError::ShapeMismatch(format!(
                        "genome has {} chromosomes, gene reads chromosome {}",
                        genome.chromosomes().len(),
                        index
                    ))
                })?;
                gene.evaluate(drivers, chromosome.copies())?
            }
            None => gene.evaluate(drivers, &[])?,
        };
        Ok(inputs_viable && viable)
    }
}
