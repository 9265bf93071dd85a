//! Completion (hand-over) quest configuration

use serde::Deserialize;

use super::{invalid, BaseQuestConfig};
use crate::error::Result;

/// Item ids or base classes that apply from a player level upwards
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LevelGatedItems {
    pub min_player_level: u32,
    pub item_ids: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompletionConfig {
    pub min_requested_amount: u32,
    pub max_requested_amount: u32,
    pub min_requested_bullet_amount: u32,
    pub max_requested_bullet_amount: u32,
    /// Upper bound on distinct items one quest asks for
    pub unique_item_count: u32,
    #[serde(default)]
    pub use_whitelist: bool,
    #[serde(default)]
    pub use_blacklist: bool,
    #[serde(default)]
    pub items_whitelist: Vec<LevelGatedItems>,
    #[serde(default)]
    pub items_blacklist: Vec<LevelGatedItems>,
    #[serde(flatten)]
    pub base: BaseQuestConfig,
}

impl CompletionConfig {
    pub fn validate(&self) -> Result<()> {
        if self.min_requested_amount > self.max_requested_amount {
            return Err(invalid("Completion requested amount range is inverted".to_string()));
        }
        if self.min_requested_bullet_amount > self.max_requested_bullet_amount {
            return Err(invalid("Completion bullet amount range is inverted".to_string()));
        }
        if self.unique_item_count == 0 {
            return Err(invalid("Completion.uniqueItemCount must be at least 1".to_string()));
        }
        Ok(())
    }

    /// Ids from a level-gated list that apply at `pmc_level`
    pub fn gated_ids(list: &[LevelGatedItems], pmc_level: u32) -> Vec<&str> {
        list.iter()
            .filter(|gate| gate.min_player_level <= pmc_level)
            .flat_map(|gate| gate.item_ids.iter().map(String::as_str))
            .collect()
    }
}
