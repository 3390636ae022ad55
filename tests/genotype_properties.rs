use cgpevo::config::CgpConfig;
use cgpevo::data::Dataset;
use cgpevo::engines::evaluation::error_sum;
use cgpevo::engines::generation::{mutate, random_chromosome, Chromosome};
use cgpevo::error::CgpError;
use cgpevo::functions::FunctionRegistry;
use cgpevo::reporting::{CsvRow, quantize};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::sync::Arc;

fn test_config() -> CgpConfig {
    CgpConfig {
        row_count: 3,
        col_count: 5,
        function_input_arity: 2,
        function_output_arity: 1,
        input_count: 4,
        output_count: 2,
        look_back: 2,
        function_count: 16,
    }
}

fn registry() -> Arc<FunctionRegistry> {
    Arc::new(FunctionRegistry::new())
}

#[test]
fn test_serialization_round_trip_over_random_genotypes() {
    let config = test_config();
    let registry = registry();
    let mut rng = StdRng::seed_from_u64(101);

    for _ in 0..25 {
        let original = random_chromosome(&config, &registry, &mut rng).unwrap();
        let reparsed =
            Chromosome::parse(&original.to_string(), &config, Arc::clone(&registry)).unwrap();
        assert_eq!(original.genes(), reparsed.genes());
        assert_eq!(original.to_string(), reparsed.to_string());
    }
}

#[test]
fn test_evaluation_and_estimation_are_deterministic() {
    let config = test_config();
    let registry = registry();
    let mut rng = StdRng::seed_from_u64(202);
    let input = [3, -1, 7, 0];

    for _ in 0..10 {
        let mut chromosome = random_chromosome(&config, &registry, &mut rng).unwrap();
        let first_outputs = chromosome.evaluate_with(&input).unwrap().to_vec();
        let first_estimates = chromosome.estimate();

        // A fresh copy of the same genes must agree exactly.
        let mut twin = Chromosome::from_genes(
            config.clone(),
            Arc::clone(&registry),
            chromosome.genes().to_vec(),
        )
        .unwrap();
        assert_eq!(twin.evaluate_with(&input).unwrap(), first_outputs.as_slice());
        assert_eq!(twin.estimate(), first_estimates);

        // Re-querying the same instance must agree too.
        assert_eq!(chromosome.evaluate_with(&input).unwrap(), first_outputs.as_slice());
        assert_eq!(chromosome.estimate(), first_estimates);
    }
}

#[test]
fn test_look_back_invariant_survives_mutation_chains() {
    let config = test_config();
    let registry = registry();
    let mut rng = StdRng::seed_from_u64(303);
    let mut chromosome = random_chromosome(&config, &registry, &mut rng).unwrap();

    for _ in 0..500 {
        chromosome = mutate(&chromosome, 4, &mut rng);
        // from_genes replays the full invariant check on the raw genes.
        Chromosome::from_genes(
            config.clone(),
            Arc::clone(&registry),
            chromosome.genes().to_vec(),
        )
        .unwrap();
    }
}

#[test]
fn test_mutation_never_aliases_parent_storage() {
    let config = test_config();
    let registry = registry();
    let mut rng = StdRng::seed_from_u64(404);

    let parent = random_chromosome(&config, &registry, &mut rng).unwrap();
    let parent_snapshot = parent.genes().to_vec();

    let mut lineage = mutate(&parent, 6, &mut rng);
    for _ in 0..50 {
        lineage = mutate(&lineage, 6, &mut rng);
    }

    assert_eq!(parent.genes(), parent_snapshot.as_slice());
}

#[test]
fn test_energy_queries_memoize_between_mutations() {
    let config = test_config();
    let registry = registry();
    let mut rng = StdRng::seed_from_u64(505);
    let mut chromosome = random_chromosome(&config, &registry, &mut rng).unwrap();

    let first = chromosome.estimate();
    assert!(!chromosome.state().needs_energy());
    assert_eq!(chromosome.estimate(), first);

    // Mutation invalidates; the child recomputes from scratch.
    let mut child = mutate(&chromosome, 4, &mut rng);
    assert!(child.state().needs_energy());
    child.estimate();
    assert!(!child.state().needs_energy());
}

#[test]
fn test_reachability_example_and_not() {
    let config = CgpConfig {
        row_count: 1,
        col_count: 2,
        function_input_arity: 2,
        function_output_arity: 1,
        input_count: 2,
        output_count: 1,
        look_back: 1,
        function_count: 16,
    };
    let registry = registry();
    let and = registry.selector_by_alias("and").unwrap();
    let not = registry.selector_by_alias("not").unwrap();

    let genes = vec![0, 1, and as u32, 2, 2, not as u32, 3];
    let mut chromosome =
        Chromosome::from_genes(config.clone(), Arc::clone(&registry), genes).unwrap();
    assert_eq!(chromosome.node_count(), 2);
    let expected_energy =
        registry.parameters(and).unwrap().energy + registry.parameters(not).unwrap().energy;
    assert_eq!(chromosome.estimated_energy(), expected_energy);

    // Rewiring the output to a primary input leaves nothing active.
    let genes = vec![0, 1, and as u32, 2, 2, not as u32, 0];
    let mut direct = Chromosome::from_genes(config, Arc::clone(&registry), genes).unwrap();
    assert_eq!(direct.node_count(), 0);
    assert_eq!(direct.estimated_energy(), 0.0);
}

#[test]
fn test_single_xor_block_example() {
    let config = CgpConfig {
        row_count: 1,
        col_count: 1,
        function_input_arity: 2,
        function_output_arity: 1,
        input_count: 2,
        output_count: 1,
        look_back: 1,
        function_count: 16,
    };
    let registry = registry();
    let xor = registry.selector_by_alias("xor").unwrap() as u32;
    let mut chromosome = Chromosome::from_genes(config, registry, vec![0, 1, xor, 2]).unwrap();
    assert_eq!(chromosome.evaluate_with(&[1, 0]).unwrap(), &[1]);
}

#[test]
fn test_decode_with_missing_token_fails_cleanly() {
    let config = test_config();
    let registry = registry();
    let mut rng = StdRng::seed_from_u64(606);
    let chromosome = random_chromosome(&config, &registry, &mut rng).unwrap();

    let text = chromosome.to_string();
    let truncated = text.rsplit_once(' ').unwrap().0;
    let err = Chromosome::parse(truncated, &config, registry).unwrap_err();
    assert!(matches!(err, CgpError::GenotypeFormat { .. }));
}

#[test]
fn test_report_row_from_evaluated_genotype() {
    let config = CgpConfig {
        row_count: 1,
        col_count: 1,
        function_input_arity: 2,
        function_output_arity: 1,
        input_count: 2,
        output_count: 1,
        look_back: 1,
        function_count: 16,
    };
    let registry = registry();
    let xor = registry.selector_by_alias("xor").unwrap();
    let mut chromosome =
        Chromosome::from_genes(config, Arc::clone(&registry), vec![0, 1, xor as u32, 2]).unwrap();

    let dataset =
        Dataset::from_reader("0 0\n0\n0 1\n1\n1 0\n1\n1 1\n0\n".as_bytes(), 2, 1).unwrap();
    let error = error_sum(&mut chromosome, &dataset).unwrap();
    assert_eq!(error, 0);

    let row = CsvRow::from_chromosome(1, 9, error, "t".to_string(), &mut chromosome);
    assert_eq!(row.gate_count, 1);
    assert_eq!(row.energy, registry.parameters(xor).unwrap().energy);
    assert_eq!(row.quantized_energy, quantize(row.energy));
    assert_eq!(row.chromosome, chromosome.to_string());

    let reparsed = CsvRow::parse_line(&row.to_line()).unwrap();
    assert_eq!(reparsed, row);
}
