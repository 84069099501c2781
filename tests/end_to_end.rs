use std::fs;

use image::{Rgb, RgbImage};
use u_jigsaw::ga::{
    CrossoverType, GaConfig, GaRunner, GeneticAlgorithm, MutationType, PERFECT_FITNESS,
};
use u_jigsaw::models::{Lattice, TileImage};
use u_jigsaw::report::{FileReporter, MemorySink};

/// `n × n` tiles of `size` pixels, each tile a distinct flat colour.
fn checker_image(n: u32, size: u32) -> RgbImage {
    RgbImage::from_fn(n * size, n * size, |x, y| {
        let pos = (y / size) * n + x / size;
        let level = (pos * 240 / (n * n)) as u8;
        Rgb([level, 255 - level, level / 2])
    })
}

#[test]
fn test_quad_lattice_single_generation() {
    let lattice = Lattice::from_image(&checker_image(2, 4), 2).unwrap();
    assert_eq!(lattice.tile_count(), 4);

    let config = GaConfig::default()
        .with_population_size(4)
        .with_selection(2, 2)
        .with_operators(CrossoverType::Order1, MutationType::SingleSwap)
        .with_seed(42);
    let mut ga = GeneticAlgorithm::new(lattice, config).unwrap();
    ga.create_generation(4).unwrap();
    ga.fitness_pass().unwrap();
    let parents = ga.select_parents(2, 2, 0).unwrap();
    ga.advance_generation(&parents).unwrap();

    assert_eq!(ga.generation().len(), 4);
    for candidate in ga.generation() {
        let mut ids = candidate.ids();
        ids.sort_unstable();
        assert_eq!(ids, vec![0, 1, 2, 3]);
    }
}

#[test]
fn test_reference_arrangement_is_perfect() {
    let lattice = Lattice::from_image(&checker_image(4, 3), 4).unwrap();
    let ga = GeneticAlgorithm::new(lattice, GaConfig::default()).unwrap();

    let mut identity = TileImage::from_tiles(ga.lattice().tiles());
    let fitness = ga.evaluator().evaluate(&mut identity);
    assert_eq!(fitness, PERFECT_FITNESS);
    assert!(fitness.is_finite());
    assert_eq!(&identity.render(ga.lattice()), ga.lattice().reference());
}

#[test]
fn test_every_operator_pair_runs() {
    let lattice = Lattice::from_image(&checker_image(4, 2), 4).unwrap();
    for crossover in [CrossoverType::Cycle, CrossoverType::Order1] {
        for mutation in [
            MutationType::SingleSwap,
            MutationType::Inversion,
            MutationType::Scramble,
        ] {
            let config = GaConfig::default()
                .with_population_size(12)
                .with_selection(6, 2)
                .with_mutation_rate(0.5)
                .with_max_generations(10)
                .with_operators(crossover, mutation)
                .with_seed(7);
            let mut sink = MemorySink::default();
            let result = GaRunner::run(lattice.clone(), &config, &mut sink).unwrap();

            assert_eq!(sink.records.len(), 10);
            let best = result.best.unwrap();
            assert!(best.is_valid_permutation());
            assert!(result.best_fitness > 0.0);
        }
    }
}

#[test]
fn test_file_reporter_output() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("snapshots");
    let history = dir.path().join("fitnessHistory.dat");

    let lattice = Lattice::from_image(&checker_image(4, 2), 4).unwrap();
    let config = GaConfig::default()
        .with_population_size(8)
        .with_selection(4, 2)
        .with_max_generations(3)
        .with_seed(42);
    let mut reporter = FileReporter::create(&out, &history).unwrap();
    let result = GaRunner::run(lattice, &config, &mut reporter).unwrap();
    assert_eq!(result.sink_errors, 0);

    let contents = fs::read_to_string(&history).unwrap();
    let lines: Vec<&str> = contents.lines().collect();
    assert_eq!(lines.len(), 3);
    for (g, line) in lines.iter().enumerate() {
        let fields: Vec<&str> = line.split_whitespace().collect();
        assert_eq!(fields.len(), 3);
        assert_eq!(fields[0], g.to_string());
        let avg: f64 = fields[1].parse().unwrap();
        let best: f64 = fields[2].parse().unwrap();
        assert!(avg > 0.0 && avg <= best);
    }

    for g in 0..3 {
        let snapshot = image::open(out.join(format!("best{g}.png"))).unwrap();
        assert_eq!(snapshot.width(), 8);
        assert_eq!(snapshot.height(), 8);
    }
}

#[test]
fn test_run_from_file() {
    let dir = tempfile::tempdir().unwrap();
    let source = dir.path().join("reference.png");
    // Non-square source: the lattice crops it to 8×8.
    RgbImage::from_fn(10, 8, |x, y| Rgb([(x * 20) as u8, (y * 30) as u8, 90]))
        .save(&source)
        .unwrap();

    let config = GaConfig::default()
        .with_population_size(6)
        .with_selection(3, 1)
        .with_max_generations(2)
        .with_lattice_n(2)
        .with_seed(42)
        .with_output(dir.path().join("out"), dir.path().join("history.dat"));
    let result = GaRunner::run_file(&config, &source).unwrap();

    assert_eq!(result.generations, 2);
    assert!(dir.path().join("out").join("best1.png").exists());
    let history = fs::read_to_string(dir.path().join("history.dat")).unwrap();
    assert_eq!(history.lines().count(), 2);
}

#[test]
fn test_config_from_json() {
    let config = GaConfig::from_json(
        r#"{"generation_size": 6, "n_select": 3, "n_best": 1, "crossover": "cycle", "mutation": "scramble", "seed": 3}"#,
    )
    .unwrap();
    assert_eq!(config.crossover, CrossoverType::Cycle);
    assert_eq!(config.mutation, MutationType::Scramble);

    let lattice = Lattice::from_image(&checker_image(3, 2), 3).unwrap();
    let mut sink = MemorySink::default();
    let result = GaRunner::run(lattice, &config.with_max_generations(2), &mut sink).unwrap();
    assert_eq!(result.history.len(), 2);
}
