pub mod accumulator;
pub mod boolean_switch;
pub mod discrete_selector;
pub mod mendelian_float;
pub mod multi_boolean;
pub mod traits;

pub use accumulator::BooleanAccumulatorGene;
pub use boolean_switch::BooleanSwitchGene;
pub use discrete_selector::DiscreteSelectorGene;
pub use mendelian_float::MendelianFloatGene;
pub use multi_boolean::MultiBooleanGene;
pub use traits::GeneEvaluator;

use crate::drivers::{DriverValueSet, GeneticDriver};
use crate::error::Result;
use crate::genetics::{ChromosomeCopy, GeneSpan};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Every supported way of decoding genetic material into drivers
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Gene {
    BooleanSwitch(BooleanSwitchGene),
    DiscreteSelector(DiscreteSelectorGene),
    MendelianFloat(MendelianFloatGene),
    MultiBoolean(MultiBooleanGene),
    BooleanAccumulator(BooleanAccumulatorGene),
}

impl Gene {
    fn evaluator(&self) -> &dyn GeneEvaluator {
        match self {
            Gene::BooleanSwitch(gene) => gene,
            Gene::DiscreteSelector(gene) => gene,
            Gene::MendelianFloat(gene) => gene,
            Gene::MultiBoolean(gene) => gene,
            Gene::BooleanAccumulator(gene) => gene,
        }
    }
}

impl GeneEvaluator for Gene {
    fn gene_usage(&self) -> GeneSpan {
        self.evaluator().gene_usage()
    }

    fn inputs(&self) -> Vec<&GeneticDriver> {
        self.evaluator().inputs()
    }

    fn outputs(&self) -> Vec<&GeneticDriver> {
        self.evaluator().outputs()
    }

    fn always_valid(&self) -> bool {
        self.evaluator().always_valid()
    }

    fn evaluate(&self, drivers: &mut DriverValueSet, copies: &[ChromosomeCopy]) -> Result<bool> {
        self.evaluator().evaluate(drivers, copies)
    }
}

impl fmt::Display for Gene {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let kind = match self {
            Gene::BooleanSwitch(_) => "boolean switch",
            Gene::DiscreteSelector(_) => "discrete selector",
            Gene::MendelianFloat(_) => "mendelian float",
            Gene::MultiBoolean(_) => "multi boolean",
            Gene::BooleanAccumulator(_) => "boolean accumulator",
        };
        let outputs: Vec<&str> = self.outputs().into_iter().map(|d| d.name.as_str()).collect();
        write!(f, "{} -> [{}]", kind, outputs.join(", "))
    }
}

impl From<BooleanSwitchGene> for Gene {
    fn from(gene: BooleanSwitchGene) -> Self {
        Gene::BooleanSwitch(gene)
    }
}

impl From<DiscreteSelectorGene> for Gene {
    fn from(gene: DiscreteSelectorGene) -> Self {
        Gene::DiscreteSelector(gene)
    }
}

impl From<MendelianFloatGene> for Gene {
    fn from(gene: MendelianFloatGene) -> Self {
        Gene::MendelianFloat(gene)
    }
}

impl From<MultiBooleanGene> for Gene {
    fn from(gene: MultiBooleanGene) -> Self {
        Gene::MultiBoolean(gene)
    }
}

impl From<BooleanAccumulatorGene> for Gene {
    fn from(gene: BooleanAccumulatorGene) -> Self {
        Gene::BooleanAccumulator(gene)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gene_round_trips_through_json() {
        let gene: Gene = DiscreteSelectorGene::new(GeneticDriver::discrete(2, "color"), 5, 4)
            .enforcing_unique_combination()
            .into();

        let json = serde_json::to_string(&gene).unwrap();
        assert!(json.contains("\"type\":\"discrete_selector\""));

        let restored: Gene = serde_json::from_str(&json).unwrap();
        assert_eq!(restored.gene_usage(), GeneSpan::new(4, 6));
        assert!(!restored.always_valid());
    }

    #[test]
    fn test_defaults_fill_missing_fields() {
        let json = r#"{"type":"boolean_switch","output":{"id":1,"name":"spots","kind":"boolean"}}"#;
        let gene: Gene = serde_json::from_str(json).unwrap();
        assert_eq!(gene.gene_usage(), GeneSpan::new(0, 2));
        assert_eq!(gene.to_string(), "boolean switch -> [spots]");
    }
}
