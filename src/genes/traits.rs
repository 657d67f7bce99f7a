use crate::drivers::{DriverValueSet, GeneticDriver};
use crate::error::Result;
use crate::genetics::{ChromosomeCopy, GeneSpan};
use crate::types::TraitValue;
use log::warn;

/// Capability set shared by every gene variant
pub trait GeneEvaluator {
    /// Base pairs read by this gene, or `GeneSpan::INVALID` if it reads none
    fn gene_usage(&self) -> GeneSpan;

    /// Drivers that must be evaluated before this gene
    fn inputs(&self) -> Vec<&GeneticDriver>;

    /// Drivers this gene writes
    fn outputs(&self) -> Vec<&GeneticDriver>;

    /// Whether evaluation can never report the genome as non-viable
    fn always_valid(&self) -> bool;

    /// Decode this gene into `drivers`.
    ///
    /// `copies` holds every homologous copy of the gene's chromosome. `Ok(false)`
    /// marks the genome as non-viable; errors are reserved for malformed input.
    fn evaluate(&self, drivers: &mut DriverValueSet, copies: &[ChromosomeCopy]) -> Result<bool>;
}

/// Write a gene output, warning when something already set it
pub(crate) fn write_output(
    drivers: &mut DriverValueSet,
    driver: &GeneticDriver,
    value: impl Into<TraitValue>,
    gene: &str,
) {
    if drivers.contains(driver) {
        warn!("Overwriting already set genetic driver {} in gene {}", driver, gene);
    }
    drivers.set(driver, value);
}
