//! Reward scaling curves

use serde::Deserialize;

use super::invalid;
use crate::error::{QuestGenError, Result};
use crate::math::interp1;

/// Level-keyed reward curves
///
/// Every curve has one value per entry of `levels`; values between
/// breakpoints are linearly interpolated.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RewardScaling {
    pub levels: Vec<f64>,
    pub experience: Vec<f64>,
    pub roubles: Vec<f64>,
    pub gp_coins: Vec<f64>,
    pub items: Vec<f64>,
    pub reputation: Vec<f64>,
    /// Relative spread applied to scaled rewards, e.g. 0.5 gives [0.5, 1.5]
    pub reward_spread: f64,
    pub skill_reward_chance: Vec<f64>,
    pub skill_point_reward: Vec<f64>,
}

impl RewardScaling {
    pub fn validate(&self) -> Result<()> {
        if self.levels.is_empty() {
            return Err(invalid("rewardScaling.levels is empty".to_string()));
        }
        if self.levels.windows(2).any(|w| w[0] >= w[1]) {
            return Err(invalid("rewardScaling.levels must be strictly ascending".to_string()));
        }
        let curves = [
            ("experience", &self.experience),
            ("roubles", &self.roubles),
            ("gpCoins", &self.gp_coins),
            ("items", &self.items),
            ("reputation", &self.reputation),
            ("skillRewardChance", &self.skill_reward_chance),
            ("skillPointReward", &self.skill_point_reward),
        ];
        for (name, curve) in curves {
            if curve.len() != self.levels.len() {
                return Err(invalid(format!(
                    "rewardScaling.{name} has {} values for {} levels",
                    curve.len(),
                    self.levels.len()
                )));
            }
        }
        if !(0.0..1.0).contains(&self.reward_spread) {
            return Err(invalid(format!(
                "rewardScaling.rewardSpread {} outside [0, 1)",
                self.reward_spread
            )));
        }
        Ok(())
    }

    /// Value of `curve` at `pmc_level`
    pub fn at(&self, curve: &[f64], pmc_level: u32) -> Result<f64> {
        interp1(f64::from(pmc_level), &self.levels, curve).ok_or_else(|| {
            QuestGenError::InvalidConfig(format!(
                "reward curve does not match level table at level {pmc_level}"
            ))
        })
    }
}

/// How many budget-constrained items a reward receives
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
pub enum ItemSelection {
    /// The selection loop stops after the first item, whatever the drawn
    /// item count. This is what live configurations have always produced.
    #[default]
    Single,
    /// The loop keeps drawing until the item count or the budget runs out
    Multiple,
}
