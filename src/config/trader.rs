//! Per-trader reward whitelist

use serde::Deserialize;

use super::invalid;
use crate::error::Result;
use crate::generator::QuestKind;
use crate::ids::is_object_id;

/// What a trader may give out as quest rewards
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TraderWhitelist {
    pub trader_id: String,
    #[serde(default)]
    pub name: String,
    /// Quest types this trader offers
    #[serde(default)]
    pub quest_types: Vec<QuestKind>,
    /// When non-empty, reward items must derive from one of these base classes
    #[serde(default)]
    pub reward_base_whitelist: Vec<String>,
    #[serde(default)]
    pub reward_can_be_weapon: bool,
    #[serde(default)]
    pub weapon_reward_chance_percent: f64,
}

impl TraderWhitelist {
    pub fn validate(&self) -> Result<()> {
        if !is_object_id(&self.trader_id) {
            return Err(invalid(format!("trader id {} is not an object id", self.trader_id)));
        }
        if let Some(base) = self.reward_base_whitelist.iter().find(|b| !is_object_id(b)) {
            return Err(invalid(format!(
                "trader {} whitelists malformed base class {base}",
                self.trader_id
            )));
        }
        if !(0.0..=100.0).contains(&self.weapon_reward_chance_percent) {
            return Err(invalid(format!(
                "trader {} weapon reward chance {} outside [0, 100]",
                self.trader_id, self.weapon_reward_chance_percent
            )));
        }
        Ok(())
    }

    pub fn offers(&self, kind: QuestKind) -> bool {
        self.quest_types.contains(&kind)
    }
}
