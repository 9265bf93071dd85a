//! Level- and difficulty-scaled reward quantities

use crate::config::RewardScaling;
use crate::context::GenerationContext;
use crate::error::Result;

/// Reward quantities for one quest, computed once per call
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RewardParameters {
    pub roubles: i64,
    pub experience: i64,
    /// Upper bound on budget-constrained reward items
    pub num_items: u32,
    pub gp_coins: i64,
    pub reputation: f64,
    pub skill_points: f64,
    /// Probability in [0, 1] of a skill reward
    pub skill_chance: f64,
}

impl RewardParameters {
    /// Interpolate every curve at `pmc_level` and scale by `difficulty`.
    ///
    /// Each scaled quantity gets its own spread factor drawn from
    /// `[1 - s, 1 + s)`. With a spread of 0 no draw is made.
    pub fn compute(
        ctx: &mut GenerationContext<'_>,
        scaling: &RewardScaling,
        pmc_level: u32,
        difficulty: f64,
    ) -> Result<Self> {
        let xp = scaling.at(&scaling.experience, pmc_level)?;
        let roubles = scaling.at(&scaling.roubles, pmc_level)?;
        let gp_coins = scaling.at(&scaling.gp_coins, pmc_level)?;
        let items = scaling.at(&scaling.items, pmc_level)?;
        let reputation = scaling.at(&scaling.reputation, pmc_level)?;
        let skill_chance = scaling.at(&scaling.skill_reward_chance, pmc_level)?;
        let skill_points = scaling.at(&scaling.skill_point_reward, pmc_level)?;

        let spread = scaling.reward_spread;
        let experience = (difficulty * xp * draw_spread(ctx, spread)).floor() as i64;
        let roubles = (difficulty * roubles * draw_spread(ctx, spread)).floor() as i64;
        let gp_coins = (difficulty * gp_coins * draw_spread(ctx, spread)).ceil() as i64;
        let num_items = ctx.rand_int(1, items.round() as i64 + 1).max(1) as u32;
        let reputation =
            (100.0 * difficulty * reputation * draw_spread(ctx, spread)).round() / 100.0;

        Ok(Self {
            roubles,
            experience,
            num_items,
            gp_coins,
            reputation,
            skill_points,
            skill_chance,
        })
    }
}

fn draw_spread(ctx: &mut GenerationContext<'_>, spread: f64) -> f64 {
    if spread <= 0.0 {
        return 1.0;
    }
    ctx.rand_float(1.0 - spread, 1.0 + spread)
}
