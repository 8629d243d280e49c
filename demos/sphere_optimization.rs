//! Sphere Function Optimization
//!
//! This example minimizes the Sphere function (sum of squares) with each of
//! the five algorithms, first wiring the components by hand and then through
//! a name-based `RunConfig`.

use adaptive_de::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("=== Sphere Function Optimization ===\n");

    const DIM: usize = 10;
    let mut rng = StdRng::seed_from_u64(42);

    // Hand-wired jDE
    let components = Components::builder()
        .mutator(Rand1)
        .crossover(BinomialCrossover)
        .stopping(MaxEvaluations(50_000))
        .build()?;
    let mut jde = Jde::new(components);
    let sphere = Sphere::new(DIM);
    let mut ctx = RunContext::new(sphere, 50).with_bounds(sphere.search_space());
    let best = jde.run(&mut ctx, &mut rng)?;

    println!("jDE complete!");
    println!("  Best fitness: {:.6e}", best.fitness);
    println!("  Generations:  {}", ctx.generations());
    println!("  Evaluations:  {}", ctx.evaluations());
    println!("\nBest solution:");
    for (i, val) in best.genotype().iter().enumerate() {
        println!("  x[{}] = {:.6}", i, val);
    }

    // Every registered algorithm from the same configuration
    println!("\n=== Registry ===\n");
    for algorithm in Registry::global().algorithm_names() {
        let config = RunConfig {
            algorithm: algorithm.to_string(),
            budget: 50_000,
            population_size: 60,
            lower_bounds: vec![-HALF_WIDTH; DIM],
            upper_bounds: vec![HALF_WIDTH; DIM],
            seed: 7,
            ..RunConfig::default()
        };
        let (best, ctx) = config.run(Sphere::new(DIM))?;
        println!(
            "  {:<8} best = {:.6e}  generations = {:>5}  final NP = {}",
            algorithm,
            best.fitness,
            ctx.generations(),
            ctx.population_size()
        );
    }

    Ok(())
}
