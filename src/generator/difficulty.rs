//! Difficulty scoring
//!
//! Elimination quests combine several sub-factors (target rarity, body-part
//! restriction, distance, weapon restriction and kill count) into one score
//! that is mapped onto the reward multiplier range. Exploration difficulty is
//! just the extract count mapped onto `[0.2, 1.0]`.

use crate::config::{BodyPart, EliminationConfig, TargetInfo};
use crate::context::GenerationContext;
use crate::math::map_to_range;
use crate::pool::WeightedPool;

/// Upper bound of the combined weighing, reached when every normalized
/// factor is 1: `sqrt(1 + 1 + 1 + 1) * 1`
pub const MAX_WEIGHING: f64 = 2.0;
/// Largest distance difficulty (`2 * maxDist / maxDist`)
pub const MAX_DISTANCE_DIFFICULTY: f64 = 2.0;

const REWARD_DIFFICULTY_MIN: f64 = 0.5;
const REWARD_DIFFICULTY_MAX: f64 = 2.0;
const EXPLORATION_DIFFICULTY_MIN: f64 = 0.2;
const EXPLORATION_DIFFICULTY_MAX: f64 = 1.0;

/// Normalizers of one elimination tier, computed over its full configured
/// pools before any filtering
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DifficultyScale {
    /// Difficulty of the most likely target
    pub min_difficulty: f64,
    pub max_target: f64,
    pub max_body_part: f64,
    pub max_kills: f64,
    pub max_distance: f64,
}

impl DifficultyScale {
    pub fn for_tier(
        targets: &WeightedPool<String, TargetInfo>,
        body_parts: &WeightedPool<BodyPart>,
        tier: &EliminationConfig,
    ) -> Self {
        let inverse = |p: Option<f64>| p.filter(|p| *p > 0.0).map(|p| 1.0 / p).unwrap_or(0.0);
        let max_body_part = body_parts
            .min_probability()
            .filter(|p| *p > 0.0)
            .map(|p| f64::from(tier.min_kills) / p)
            .unwrap_or(0.0);

        Self {
            min_difficulty: inverse(targets.max_probability()),
            max_target: inverse(targets.min_probability()),
            max_body_part,
            max_kills: f64::from(tier.max_kills),
            max_distance: MAX_DISTANCE_DIFFICULTY,
        }
    }
}

/// Sub-factor difficulties of one elimination quest
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct EliminationFactors {
    pub target: f64,
    pub body_part: f64,
    pub distance: f64,
    pub weapon_restricted: bool,
    pub kills: u32,
}

#[inline]
fn ratio(value: f64, max: f64) -> f64 {
    if max > 0.0 {
        value / max
    } else {
        0.0
    }
}

/// Combined weighing `sqrt(sqrt(t) + b + d + w) * k` over normalized factors
pub fn difficulty_weighing(factors: &EliminationFactors, scale: &DifficultyScale) -> f64 {
    let weapon = if factors.weapon_restricted { 1.0 } else { 0.0 };
    let sum = ratio(factors.target, scale.max_target).sqrt()
        + ratio(factors.body_part, scale.max_body_part)
        + ratio(factors.distance, scale.max_distance)
        + weapon;
    sum.sqrt() * ratio(f64::from(factors.kills), scale.max_kills)
}

/// Reward difficulty of an elimination quest, at most 1
pub fn elimination_difficulty(factors: &EliminationFactors, scale: &DifficultyScale) -> f64 {
    let weighing = difficulty_weighing(factors, scale);
    map_to_range(
        weighing,
        scale.min_difficulty,
        MAX_WEIGHING,
        REWARD_DIFFICULTY_MIN,
        REWARD_DIFFICULTY_MAX,
    )
    .min(1.0)
}

/// Reward difficulty of an exploration quest with `exit_count` extracts
pub fn exploration_difficulty(exit_count: u32, max_extracts: u32) -> f64 {
    map_to_range(
        f64::from(exit_count),
        1.0,
        f64::from(max_extracts),
        EXPLORATION_DIFFICULTY_MIN,
        EXPLORATION_DIFFICULTY_MAX,
    )
}

/// Kill distance: `floor(|U1 - U2| * (max - min) + min)` rounded up to a
/// multiple of 5, then pulled back under `max_dist`. Never below 5.
pub fn sample_distance(ctx: &mut GenerationContext<'_>, min_dist: u32, max_dist: u32) -> u32 {
    let u1 = ctx.rand_float(0.0, 1.0);
    let u2 = ctx.rand_float(0.0, 1.0);
    let span = f64::from(max_dist.saturating_sub(min_dist));
    let raw = ((u1 - u2).abs() * span + f64::from(min_dist)).floor() as u32;

    let mut distance = raw.div_ceil(5) * 5;
    if distance > max_dist {
        distance = (max_dist / 5) * 5;
    }
    distance.max(5)
}

/// `2 * distance / maxDist`, rounded
pub fn distance_difficulty(distance: u32, max_dist: u32) -> f64 {
    if max_dist == 0 {
        return 0.0;
    }
    (2.0 * f64::from(distance) / f64::from(max_dist)).round()
}

/// Inverse of the combined probability of the drawn body parts, so rarer
/// restrictions score higher. Zero when nothing was drawn.
pub fn body_part_difficulty(pool: &WeightedPool<BodyPart>, drawn: &[BodyPart]) -> f64 {
    let probability: f64 = drawn.iter().map(|part| pool.probability(part)).sum();
    if probability > 0.0 {
        1.0 / probability
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::{test_catalog, test_config};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn scale() -> DifficultyScale {
        DifficultyScale {
            min_difficulty: 1.0,
            max_target: 10.0,
            max_body_part: 4.0,
            max_kills: 10.0,
            max_distance: MAX_DISTANCE_DIFFICULTY,
        }
    }

    #[test]
    fn test_exploration_difficulty() {
        assert!((exploration_difficulty(3, 5) - 0.6).abs() < 1e-9);
        assert!((exploration_difficulty(1, 5) - 0.2).abs() < 1e-9);
        assert!((exploration_difficulty(5, 5) - 1.0).abs() < 1e-9);
        // A named extract can push the count past the maximum
        assert!((exploration_difficulty(6, 5) - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_weighing_maximum() {
        let s = scale();
        let factors = EliminationFactors {
            target: s.max_target,
            body_part: s.max_body_part,
            distance: s.max_distance,
            weapon_restricted: true,
            kills: 10,
        };
        assert!((difficulty_weighing(&factors, &s) - MAX_WEIGHING).abs() < 1e-9);
        assert_eq!(elimination_difficulty(&factors, &s), 1.0);
    }

    #[test]
    fn test_zero_normalizers_ignored() {
        let s = DifficultyScale {
            max_body_part: 0.0,
            ..scale()
        };
        let factors = EliminationFactors {
            target: 10.0,
            body_part: 3.0,
            kills: 10,
            ..Default::default()
        };
        assert!((difficulty_weighing(&factors, &s) - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_easy_quest_floors_at_half() {
        let s = scale();
        let factors = EliminationFactors {
            target: 1.0,
            kills: 1,
            ..Default::default()
        };
        assert_eq!(elimination_difficulty(&factors, &s), 0.5);
    }

    #[test]
    fn test_scale_for_fixture_tier() {
        let config = test_config();
        let tier = config.elimination_tier(5).unwrap();
        let targets = WeightedPool::from_config(&tier.targets);
        let parts = WeightedPool::from_config(&tier.body_parts);
        let s = DifficultyScale::for_tier(&targets, &parts, tier);

        assert!((s.min_difficulty - 9.5 / 7.0).abs() < 1e-9);
        assert!((s.max_target - 9.5 / 0.5).abs() < 1e-9);
        assert_eq!(s.max_kills, f64::from(tier.max_kills));
    }

    #[test]
    fn test_distance_difficulty() {
        assert_eq!(distance_difficulty(50, 100), 1.0);
        assert_eq!(distance_difficulty(100, 100), 2.0);
        assert_eq!(distance_difficulty(20, 100), 0.0);
        assert_eq!(distance_difficulty(10, 0), 0.0);
    }

    #[test]
    fn test_sample_distance_bounds() {
        let catalog = test_catalog();
        let mut rng = StdRng::seed_from_u64(77);
        let mut ctx = GenerationContext::new(&catalog, &mut rng);
        for _ in 0..500 {
            let d = sample_distance(&mut ctx, 20, 73);
            assert_eq!(d % 5, 0);
            assert!((20..=70).contains(&d), "{d}");
        }
        for _ in 0..100 {
            let d = sample_distance(&mut ctx, 0, 12);
            assert!(d == 5 || d == 10, "{d}");
        }
    }

    #[test]
    fn test_body_part_difficulty() {
        let config = test_config();
        let tier = config.elimination_tier(5).unwrap();
        let parts = WeightedPool::from_config(&tier.body_parts);

        // Head weighs 1 of 6
        assert!((body_part_difficulty(&parts, &[BodyPart::Head]) - 6.0).abs() < 1e-9);
        assert!((body_part_difficulty(&parts, &[BodyPart::Head, BodyPart::Chest]) - 1.5).abs() < 1e-9);
        assert_eq!(body_part_difficulty(&parts, &[]), 0.0);

        // Never above the tier normalizer, min_kills / min probability
        let targets = WeightedPool::from_config(&tier.targets);
        let scale = DifficultyScale::for_tier(&targets, &parts, tier);
        assert!(body_part_difficulty(&parts, &[BodyPart::Head]) <= scale.max_body_part);
    }
}
