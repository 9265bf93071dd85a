//! Property tests for the weighted and quest-type pools

use proptest::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::fixtures::test_config;
use crate::generator::QuestKind;
use crate::pool::{QuestTypePool, WeightedPool};

// ═══════════════════════════════════════════════════════════════════════════
// Strategies
// ═══════════════════════════════════════════════════════════════════════════

/// Distinct keys with positive weights
fn weights_strategy() -> impl Strategy<Value = Vec<f64>> {
    prop::collection::vec(0.1..=50.0f64, 1..=12)
}

fn pool_of(weights: &[f64]) -> WeightedPool<usize, ()> {
    let mut pool = WeightedPool::new();
    for (key, weight) in weights.iter().enumerate() {
        pool.push(key, *weight, None);
    }
    pool
}

// ═══════════════════════════════════════════════════════════════════════════
// Properties
// ═══════════════════════════════════════════════════════════════════════════

proptest! {
    /// Probabilities over the current pool always sum to one
    #[test]
    fn prop_probabilities_sum_to_one(weights in weights_strategy()) {
        let pool = pool_of(&weights);
        let sum: f64 = (0..weights.len()).map(|k| pool.probability(&k)).sum();
        prop_assert!((sum - 1.0).abs() < 1e-9);
    }

    /// Filtering renormalizes against the smaller pool
    #[test]
    fn prop_filtered_probabilities_sum_to_one(weights in weights_strategy()) {
        let pool = pool_of(&weights);
        let even = pool.filter(|e| e.key % 2 == 0);
        let sum: f64 = even.keys().map(|k| even.probability(k)).sum();
        prop_assert!((sum - 1.0).abs() < 1e-9);
        prop_assert!(!even.keys().any(|k| k % 2 == 1));
    }

    /// Unique draws never repeat and never exceed the pool size
    #[test]
    fn prop_unique_draw_has_no_duplicates(
        weights in weights_strategy(),
        count in 0usize..20,
        seed in any::<u64>()
    ) {
        let pool = pool_of(&weights);
        let mut rng = StdRng::seed_from_u64(seed);
        let drawn = pool.draw(&mut rng, count, true);

        prop_assert_eq!(drawn.len(), count.min(weights.len()));
        let mut sorted = drawn.clone();
        sorted.sort_unstable();
        sorted.dedup();
        prop_assert_eq!(sorted.len(), drawn.len());
    }

    /// Zero-weight entries are never drawn
    #[test]
    fn prop_zero_weight_never_drawn(weights in weights_strategy(), seed in any::<u64>()) {
        let mut pool = pool_of(&weights);
        pool.push(usize::MAX, 0.0, None);
        let mut rng = StdRng::seed_from_u64(seed);
        let drawn = pool.draw(&mut rng, 50, false);
        prop_assert_eq!(drawn.len(), 50);
        prop_assert!(!drawn.contains(&usize::MAX));
    }

    /// Consuming every location of a target evicts it exactly once
    #[test]
    fn prop_target_evicted_after_last_location(locations in 1usize..6) {
        let mut pool = QuestTypePool::new(vec![QuestKind::Elimination]);
        let keys: Vec<String> = (0..locations).map(|i| format!("map{i}")).collect();
        pool.add_target("Savage", keys.clone());

        let evictions = keys
            .iter()
            .filter(|key| pool.consume_target_location("Savage", key.as_str()))
            .count();
        prop_assert_eq!(evictions, 1);
        prop_assert!(!pool.has_target("Savage"));
    }

    /// Exploration draws hand out each unlocked location once
    #[test]
    fn prop_exploration_locations_drawn_once(level in 1u32..60, seed in any::<u64>()) {
        let config = test_config();
        let mut pool = QuestTypePool::for_level(&config, level);
        let expected = pool.exploration_locations().len();
        let mut rng = StdRng::seed_from_u64(seed);

        let mut drawn = Vec::new();
        while let Some(location) = pool.draw_exploration_location(&mut rng) {
            drawn.push(location);
        }
        prop_assert_eq!(drawn.len(), expected);
        drawn.sort_unstable();
        drawn.dedup();
        prop_assert_eq!(drawn.len(), expected);
    }
}
