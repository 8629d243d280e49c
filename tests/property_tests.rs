//! Property-based tests for adaptive-de
//!
//! Uses proptest to verify invariants of the data model, operators and
//! adaptation state.

use adaptive_de::prelude::*;
use adaptive_de::sampling::{lehmer_mean, roulette_select, uniform_distinct_indices};
use proptest::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;

fn population_from(fitnesses: &[f64]) -> Population {
    fitnesses
        .iter()
        .enumerate()
        .map(|(i, &f)| Individual::with_fitness(vec![i as f64, 0.0], f))
        .collect()
}

proptest! {
    // ==================== Population Properties ====================

    #[test]
    fn best_is_minimal_after_replacements(
        fitnesses in prop::collection::vec(-1e6..1e6f64, 4..30),
        replacements in prop::collection::vec((0usize..1000, -1e6..1e6f64), 0..50)
    ) {
        let mut pop = population_from(&fitnesses);
        for (slot, fitness) in replacements {
            let index = slot % pop.len();
            pop.replace(index, Individual::with_fitness(vec![0.0, 0.0], fitness));
        }

        let best = pop.best().unwrap().fitness;
        for ind in pop.iter() {
            prop_assert!(best <= ind.fitness);
        }
        prop_assert_eq!(pop.kth_best(0).unwrap().fitness, best);
    }

    #[test]
    fn sorted_view_is_ascending_and_leaves_order(
        fitnesses in prop::collection::vec(-100.0..100.0f64, 1..30)
    ) {
        let pop = population_from(&fitnesses);
        let sorted = pop.sorted_by_fitness();
        prop_assert!(sorted.windows(2).all(|w| w[0].fitness <= w[1].fitness));
        let stored: Vec<f64> = pop.iter().map(|ind| ind.fitness).collect();
        prop_assert_eq!(stored, fitnesses);
    }

    #[test]
    fn reduce_keeps_nonempty_rounded_prefix(
        n in 1usize..200,
        factor in 0.0..1.0f64
    ) {
        let fitnesses: Vec<f64> = (0..n).map(|i| i as f64).collect();
        let mut pop = population_from(&fitnesses);
        let kept = pop.reduce(factor);
        prop_assert_eq!(kept, ((n as f64 * factor).round() as usize).max(1));
        for (i, ind) in pop.iter().enumerate() {
            prop_assert_eq!(ind.fitness, i as f64);
        }
    }

    #[test]
    fn window_sampling_stays_in_window(
        seed in any::<u64>(),
        lb in 0usize..20,
        width in 4usize..20,
        n in 1usize..3
    ) {
        let fitnesses = vec![0.0; lb + width + 5];
        let mut pop = population_from(&fitnesses);
        pop.set_window(lb, lb + width);
        let mut rng = StdRng::seed_from_u64(seed);

        let picked = pop.random_distinct(n, Some(lb), &mut rng).unwrap();
        prop_assert_eq!(picked.len(), n);
        for &i in &picked {
            prop_assert!(i >= lb && i < lb + width);
            prop_assert_ne!(i, lb);
        }
    }

    // ==================== Sampling Properties ====================

    #[test]
    fn distinct_indices_are_distinct_and_exclude(
        seed in any::<u64>(),
        len in 2usize..100,
        n_frac in 0.0..1.0f64,
        exclude_frac in 0.0..1.0f64
    ) {
        let n = ((len - 1) as f64 * n_frac) as usize;
        let exclude = ((len as f64 * exclude_frac) as usize).min(len - 1);
        let mut rng = StdRng::seed_from_u64(seed);

        let picked = uniform_distinct_indices(Some(exclude), n, len, &mut rng).unwrap();
        prop_assert_eq!(picked.len(), n);
        let mut sorted = picked.clone();
        sorted.sort_unstable();
        sorted.dedup();
        prop_assert_eq!(sorted.len(), n);
        for &i in &picked {
            prop_assert!(i < len);
            prop_assert_ne!(i, exclude);
        }
    }

    #[test]
    fn roulette_returns_valid_bucket(
        seed in any::<u64>(),
        weights in prop::collection::vec(0.01..1.0f64, 1..10)
    ) {
        let total: f64 = weights.iter().sum();
        let probabilities: Vec<f64> = weights.iter().map(|w| w / total).collect();
        let mut rng = StdRng::seed_from_u64(seed);
        prop_assert!(roulette_select(&probabilities, &mut rng) < probabilities.len());
    }

    #[test]
    fn lehmer_mean_within_range(values in prop::collection::vec(0.01..1.0f64, 1..50)) {
        let mean = lehmer_mean(&values);
        let min = values.iter().cloned().fold(f64::INFINITY, f64::min);
        let max = values.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
        prop_assert!(mean >= min - 1e-12 && mean <= max + 1e-12);
    }

    // ==================== Bounds Repair Properties ====================

    #[test]
    fn clamp_repair_lands_in_bounds(
        genes in prop::collection::vec(-100.0..100.0f64, 1..20),
        half_width in 0.1..50.0f64
    ) {
        let bounds = MultiBounds::symmetric(half_width, genes.len());
        let mut ind = Individual::from_genotype(genes);
        ClampRepair.repair(&bounds, &mut ind);
        prop_assert!(bounds.contains_vec(ind.genotype()));
    }

    #[test]
    fn midpoint_repair_lies_between_bound_and_target(
        pairs in prop::collection::vec((-100.0..100.0f64, 0.0..1.0f64), 1..20),
        half_width in 0.1..50.0f64
    ) {
        let bounds = MultiBounds::symmetric(half_width, pairs.len());
        let target: Vec<f64> = pairs
            .iter()
            .map(|&(_, t)| -half_width + t * 2.0 * half_width)
            .collect();
        let genes: Vec<f64> = pairs.iter().map(|&(v, _)| v).collect();
        let mut ind = Individual::from_genotype(genes.clone());
        MidpointRepair::new(&target).repair(&bounds, &mut ind);

        for ((&before, &after), &x) in genes.iter().zip(ind.genotype()).zip(&target) {
            if before < -half_width {
                prop_assert!(after >= -half_width && after <= x);
            } else if before > half_width {
                prop_assert!(after >= x && after <= half_width);
            } else {
                prop_assert_eq!(after, before);
            }
        }
    }

    // ==================== Crossover Properties ====================

    #[test]
    fn binomial_trial_differs_from_target(
        seed in any::<u64>(),
        genes in prop::collection::vec(-10.0..10.0f64, 1..30),
        cr in 0.0..=1.0f64
    ) {
        let target = Individual::from_genotype(genes.clone());
        let mutant = Individual::from_genotype(genes.iter().map(|g| g + 1.0).collect());
        let mut rng = StdRng::seed_from_u64(seed);

        let trial = BinomialCrossover
            .cross(&target, &mutant, &[], ControlParameters::new(0.5, cr), &mut rng)
            .unwrap();
        let differing = trial
            .genotype()
            .iter()
            .zip(target.genotype())
            .filter(|(u, x)| u != x)
            .count();
        prop_assert!(differing >= 1);
    }

    #[test]
    fn exponential_trial_copies_a_run(
        seed in any::<u64>(),
        dim in 1usize..30,
        cr in 0.0..=1.0f64
    ) {
        let target = Individual::from_genotype(vec![0.0; dim]);
        let mutant = Individual::from_genotype(vec![1.0; dim]);
        let mut rng = StdRng::seed_from_u64(seed);

        let trial = ExponentialCrossover
            .cross(&target, &mutant, &[], ControlParameters::new(0.5, cr), &mut rng)
            .unwrap();
        let copied = trial.genotype().iter().filter(|&&g| g == 1.0).count();
        prop_assert!(copied >= 1 && copied <= dim);
    }

    // ==================== Adaptation Properties ====================

    #[test]
    fn jade_means_stay_in_unit_interval(
        generations in prop::collection::vec(
            prop::collection::vec((0.0..=1.0f64, 0.0..=1.0f64), 0..20),
            1..30
        ),
        mu_f in 0.0..=1.0f64,
        mu_cr in 0.0..=1.0f64
    ) {
        let mut adaptation = MeanAdaptation::new(mu_f, mu_cr);
        for successes in generations {
            for (f, cr) in successes {
                adaptation.record_success(f, cr);
            }
            adaptation.update();
            prop_assert!((0.0..=1.0).contains(&adaptation.mu_f));
            prop_assert!((0.0..=1.0).contains(&adaptation.mu_cr));
            prop_assert_eq!(adaptation.success_count(), 0);
        }
    }

    #[test]
    fn jade_samples_stay_in_unit_interval(
        seed in any::<u64>(),
        mu_f in 0.0..=1.0f64,
        mu_cr in 0.0..=1.0f64
    ) {
        let adaptation = MeanAdaptation::new(mu_f, mu_cr);
        let mut rng = StdRng::seed_from_u64(seed);
        for _ in 0..20 {
            let f = adaptation.sample_f(&mut rng).unwrap();
            let cr = adaptation.sample_cr(&mut rng);
            prop_assert!((0.0..=1.0).contains(&f));
            prop_assert!((0.0..=1.0).contains(&cr));
        }
    }

    #[test]
    fn archive_never_exceeds_capacity(
        seed in any::<u64>(),
        pushes in prop::collection::vec(0usize..40, 1..20),
        capacity in 1usize..30
    ) {
        let mut archive = Archive::new();
        let mut rng = StdRng::seed_from_u64(seed);
        for count in pushes {
            for _ in 0..count {
                archive.push(Individual::new(2));
            }
            archive.prune(capacity, &mut rng);
            prop_assert!(archive.len() <= capacity);
        }
    }

    #[test]
    fn sade_probabilities_sum_to_one(
        trials in prop::collection::vec((0usize..4, any::<bool>(), 0.0..=1.0f64), 1..300),
        learning_period in 1usize..60
    ) {
        let mut memory = StrategyMemory::new(4, learning_period, 0.5);
        for (k, success, cr) in trials {
            memory.record(k, success, cr);
        }
        memory.update_probabilities(0.01);

        let total: f64 = memory.probabilities().iter().sum();
        prop_assert!((total - 1.0).abs() < 1e-9);
        prop_assert!(memory.probabilities().iter().all(|&p| p > 0.0));
    }
}
