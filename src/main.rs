use anyhow::Context;
use log::info;
use mendelgen::config::ConfigManager;
use mendelgen::drivers::{DriverDescriptor, DriverRegistry};
use mendelgen::engines::analysis::{DistributionSampler, SummarySet};
use mendelgen::engines::targets::{BooleanTarget, FloatTarget, TargetSet};
use mendelgen::genes::{BooleanAccumulatorGene, BooleanSwitchGene, DiscreteSelectorGene, MendelianFloatGene, MultiBooleanGene};
use mendelgen::{ChromosomeSpec, GenomeSpec, TargetedGenomeSynthesizer};
use rand::rngs::StdRng;
use rand::SeedableRng;

fn rng_from(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    }
}

/// A small plant: a few coloured, spotted, striped flowers of varying height
fn demo_registry() -> DriverRegistry {
    DriverRegistry::from_descriptors([
        DriverDescriptor::boolean(0, "spotted", "Spotted", "Plain"),
        DriverDescriptor::discrete(1, "color", ["white", "yellow", "red", "purple"]),
        DriverDescriptor::continuous(2, "height", 0.0, 10.0),
        DriverDescriptor::boolean(3, "stripe_a", "Striped", "Smooth"),
        DriverDescriptor::boolean(4, "stripe_b", "Striped", "Smooth"),
        DriverDescriptor::boolean(5, "stripe_c", "Striped", "Smooth"),
        DriverDescriptor::discrete(6, "stripes", ["none", "one", "two", "three"]),
    ])
}

fn demo_spec(registry: &DriverRegistry) -> anyhow::Result<GenomeSpec> {
    let driver = |name: &str| {
        registry
            .by_name(name)
            .map(|d| d.driver.clone())
            .with_context(|| format!("demo driver {} missing", name))
    };
    let stripes = vec![driver("stripe_a")?, driver("stripe_b")?, driver("stripe_c")?];

    Ok(GenomeSpec::new(vec![
        ChromosomeSpec::new(
            vec![
                BooleanSwitchGene::new(driver("spotted")?, 0).into(),
                DiscreteSelectorGene::new(driver("color")?, 4, 2)
                    .enforcing_unique_combination()
                    .into(),
                MendelianFloatGene::new(driver("height")?, 0.0, 10.0, 3)
                    .with_dominance_point(0.5)
                    .into(),
            ],
            2,
        ),
        ChromosomeSpec::new(
            vec![MultiBooleanGene::new(stripes.clone(), 0)
                .with_dominant_values(vec![false, false, false])
                .into()],
            2,
        ),
    ])
    .with_interpreters(vec![BooleanAccumulatorGene::new(driver("stripes")?, stripes).into()]))
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let manager = ConfigManager::new();
    match std::env::args().nth(1).as_deref() {
        Some("--manifest") => {
            let manifests = manager.get()?.manifests();
            println!("{}", serde_json::to_string_pretty(&manifests)?);
            return Ok(());
        }
        Some(path) => manager
            .load_layered(path)
            .with_context(|| format!("loading config from {}", path))?,
        None => {}
    }
    let config = manager.get()?;

    let registry = demo_registry();
    let spec = demo_spec(&registry)?;
    let driver = |name: &str| {
        registry
            .by_name(name)
            .map(|d| d.driver.clone())
            .with_context(|| format!("demo driver {} missing", name))
    };

    let mut targets = TargetSet::new();
    targets.set_exclusive_target(BooleanTarget::new(driver("spotted")?, true).into());
    targets.set_exclusive_target(FloatTarget::new(driver("height")?, 6.0, 8.0).into());
    targets.set_exclusive_target(FloatTarget::new(driver("color")?, 2.0, 2.0).into());

    println!("Targets:");
    for target in targets.targets() {
        println!("  {}", target.describe(&registry));
    }

    let synthesizer = TargetedGenomeSynthesizer::new(&spec, targets.targets().to_vec(), config.synthesis.clone())?;
    let mut rng = rng_from(config.synthesis.seed);
    for (index, genome) in synthesizer.synthesize(&mut rng).take(3).enumerate() {
        let genome = genome?;
        let drivers = spec
            .compile(&genome)?
            .context("synthesized genome failed to compile")?;
        println!("\nGenome {}:\n{}", index + 1, drivers);
    }

    info!("sampling {} random genomes", config.analysis.samples);
    let sampler = DistributionSampler::from_config(
        &spec,
        vec![driver("height")?, driver("stripes")?],
        vec![driver("spotted")?],
        &config.analysis,
    )?;
    let mut rng = rng_from(config.analysis.seed);
    let result = sampler.analyze(config.analysis.samples, &mut rng)?;
    println!("Inviable samples: {}", result.inviable);
    for histogram in &result.float_results {
        println!("{}: {:?}", histogram.driver, histogram.buckets);
    }
    for histogram in &result.bool_results {
        println!(
            "{}: {} true, {} false",
            histogram.driver, histogram.true_count, histogram.false_count
        );
    }

    let mut descriptors: Vec<DriverDescriptor> = registry
        .drivers()
        .filter_map(|d| registry.describe(d).cloned())
        .collect();
    descriptors.sort_by_key(|d| d.driver.id);
    let mut rng = rng_from(config.analysis.seed);
    let compiled: Vec<_> = (0..config.analysis.samples)
        .map(|_| spec.compile(&spec.generate_base(&mut rng)))
        .collect::<mendelgen::Result<_>>()?;
    let summaries = SummarySet::new(&descriptors, compiled.iter().map(Option::as_ref));
    println!("\n{}", summaries);

    Ok(())
}
