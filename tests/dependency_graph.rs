use mendelgen::genes::{BooleanAccumulatorGene, BooleanSwitchGene, DiscreteSelectorGene, MultiBooleanGene};
use mendelgen::{ChromosomeSpec, DependencyGraph, DriverValueSet, GeneticDriver, GeneticsError, GenomeSpec};
use rand::rngs::StdRng;
use rand::SeedableRng;

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn striped_spec() -> (GenomeSpec, Vec<GeneticDriver>, GeneticDriver) {
    let stripes: Vec<GeneticDriver> = (0..3)
        .map(|i| GeneticDriver::boolean(i, format!("stripe{}", i)))
        .collect();
    let count = GeneticDriver::discrete(10, "stripes");
    let spec = GenomeSpec::new(vec![
        ChromosomeSpec::new(
            vec![
                BooleanSwitchGene::new(stripes[0].clone(), 0).into(),
                DiscreteSelectorGene::new(GeneticDriver::discrete(11, "color"), 3, 2)
                    .enforcing_unique_combination()
                    .into(),
            ],
            2,
        ),
        ChromosomeSpec::new(
            vec![MultiBooleanGene::new(stripes[1..].to_vec(), 0).into()],
            2,
        ),
    ])
    .with_interpreters(vec![BooleanAccumulatorGene::new(count.clone(), stripes.clone()).into()]);
    (spec, stripes, count)
}

#[test]
fn test_evaluating_a_node_agrees_with_compiling() {
    let (spec, _, count) = striped_spec();
    let graph = DependencyGraph::build(&spec).unwrap();
    let node = graph.node_for(&count).unwrap();

    let mut rng = StdRng::seed_from_u64(13);
    for _ in 0..200 {
        let genome = spec.generate_base(&mut rng);
        let mut drivers = DriverValueSet::new();
        assert!(graph.recursive_evaluate(node, &mut drivers, &genome).unwrap());

        // the color selector is not upstream of the count, so only compiling can reject
        if let Some(compiled) = spec.compile(&genome).unwrap() {
            assert_eq!(
                drivers.get::<f32>(&count).unwrap(),
                compiled.get::<f32>(&count).unwrap()
            );
        }
    }
}

#[test]
fn test_leaf_first_order_puts_inputs_before_interpreters() {
    let (spec, stripes, count) = striped_spec();
    let graph = DependencyGraph::build(&spec).unwrap();
    let order = graph.leaf_first_order();
    assert_eq!(order.len(), graph.len());

    let position = |driver: &GeneticDriver| {
        let id = graph.node_for(driver).unwrap();
        order.iter().position(|n| *n == id).unwrap()
    };
    for stripe in &stripes {
        assert!(position(stripe) < position(&count));
    }
}

#[test]
fn test_basis_spans_every_chromosome_feeding_a_driver() {
    let (spec, stripes, count) = striped_spec();
    let graph = DependencyGraph::build(&spec).unwrap();

    let basis = graph.basis(graph.node_for(&count).unwrap());
    assert_eq!(basis.len(), 2);
    assert_eq!(basis[&0], mendelgen::GeneSpan::new(0, 2));
    assert_eq!(basis[&1], mendelgen::GeneSpan::new(0, 4));

    let leaf = graph.basis(graph.node_for(&stripes[0]).unwrap());
    assert_eq!(leaf.len(), 1);
}

#[test]
fn test_duplicate_writers_are_reported() {
    init_logging();
    let spots = GeneticDriver::boolean(0, "spots");
    let spec = GenomeSpec::new(vec![ChromosomeSpec::new(
        vec![
            BooleanSwitchGene::new(spots.clone(), 0).into(),
            BooleanSwitchGene::new(spots.clone(), 2).into(),
        ],
        1,
    )]);
    let graph = DependencyGraph::build(&spec).unwrap();

    assert_eq!(graph.conflicts().len(), 1);
    assert!(matches!(graph.ensure_consistent(), Err(GeneticsError::TopologyConflict(_))));
    assert_eq!(graph.len(), 1);
}

#[test]
fn test_unknown_driver_has_no_node() {
    let (spec, _, _) = striped_spec();
    let graph = DependencyGraph::build(&spec).unwrap();
    assert!(graph.node_for(&GeneticDriver::boolean(99, "wings")).is_none());
    assert!(graph.ensure_consistent().is_ok());
}
