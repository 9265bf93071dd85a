//! Configuration module for repeatable quest generation
//!
//! The configuration is a single JSON document (one per refresh cycle kind,
//! e.g. "Daily" or "Weekly") deserialized into plain structs and validated
//! once. Nothing here is global: generators receive `&RepeatableConfig`.

mod completion;
mod elimination;
mod exploration;
mod pickup;
mod reward;
mod trader;

pub use completion::*;
pub use elimination::*;
pub use exploration::*;
pub use pickup::*;
pub use reward::*;
pub use trader::*;

use crate::error::{QuestGenError, Result};
use crate::generator::QuestKind;
use crate::ids::is_object_id;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Location key meaning "any map"
pub const ANY_LOCATION: &str = "any";

/// Peacekeeper and Fence pay quest rewards in euros
pub const DEFAULT_EURO_TRADERS: [&str; 2] = ["5935c25fb3acc3127c3d8cd9", "579dc571d53a0658a154fbec"];

/// Player side a quest is generated for
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Deserialize, Serialize)]
pub enum Side {
    #[default]
    Pmc,
    Scav,
}

/// Settings shared by every quest type block
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BaseQuestConfig {
    /// Skills a "Skill" reward can target
    #[serde(default)]
    pub possible_skill_rewards: Vec<String>,
}

/// A map that quests can be set on
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocationConfig {
    /// Map ids written into Location conditions (a key may cover several
    /// map variants, e.g. day and night factory)
    pub map_ids: Vec<String>,
    /// Id stored in the quest's `location` field
    pub quest_location_id: String,
    /// Player level at which the location becomes available
    #[serde(default)]
    pub min_level: u32,
}

/// Per-type configuration blocks
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct QuestTypeConfigs {
    pub exploration: ExplorationConfig,
    pub completion: CompletionConfig,
    pub pickup: PickupConfig,
    /// Elimination is tiered by player level
    pub elimination: Vec<EliminationConfig>,
}

/// Complete configuration for one repeatable-quest refresh cycle
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RepeatableConfig {
    pub name: String,
    #[serde(default)]
    pub side: Side,
    pub types: Vec<QuestKind>,
    pub reward_scaling: RewardScaling,
    pub locations: BTreeMap<String, LocationConfig>,
    pub trader_whitelist: Vec<TraderWhitelist>,
    #[serde(default)]
    pub reward_blacklist: Vec<String>,
    #[serde(default)]
    pub reward_base_type_blacklist: Vec<String>,
    /// Ammo that stacks to less than this is never given as a reward
    #[serde(default)]
    pub reward_ammo_stack_min_size: u32,
    #[serde(default = "default_euro_traders")]
    pub euro_traders: Vec<String>,
    #[serde(default)]
    pub item_selection: ItemSelection,
    pub quest_config: QuestTypeConfigs,
}

fn default_euro_traders() -> Vec<String> {
    DEFAULT_EURO_TRADERS.iter().map(|s| s.to_string()).collect()
}

impl RepeatableConfig {
    /// Parse and validate a configuration document
    pub fn from_json(json: &str) -> Result<Self> {
        let config: RepeatableConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Check cross-field constraints serde cannot express
    pub fn validate(&self) -> Result<()> {
        self.reward_scaling.validate()?;

        for id in self.reward_blacklist.iter().chain(&self.reward_base_type_blacklist) {
            if !is_object_id(id) {
                return Err(invalid(format!("blacklist entry {id} is not a template id")));
            }
        }

        for trader in &self.trader_whitelist {
            trader.validate()?;
        }

        if !self.locations.contains_key(ANY_LOCATION) {
            return Err(invalid(format!("locations must contain \"{ANY_LOCATION}\"")));
        }

        for (key, location) in &self.locations {
            if location.map_ids.is_empty() {
                return Err(invalid(format!("location {key} has no map ids")));
            }
        }

        self.quest_config.exploration.validate()?;
        self.quest_config.completion.validate()?;
        self.quest_config.pickup.validate()?;
        for tier in &self.quest_config.elimination {
            tier.validate()?;
        }

        Ok(())
    }

    /// Elimination tier covering `pmc_level`
    pub fn elimination_tier(&self, pmc_level: u32) -> Option<&EliminationConfig> {
        self.quest_config
            .elimination
            .iter()
            .find(|tier| tier.level_range.contains(pmc_level))
    }

    /// Shared settings of a quest type's block
    pub fn quest_base(&self, kind: QuestKind, pmc_level: u32) -> Option<&BaseQuestConfig> {
        match kind {
            QuestKind::Elimination => self.elimination_tier(pmc_level).map(|t| &t.base),
            QuestKind::Exploration => Some(&self.quest_config.exploration.base),
            QuestKind::Completion => Some(&self.quest_config.completion.base),
            QuestKind::Pickup => Some(&self.quest_config.pickup.base),
        }
    }

    pub fn trader_whitelist(&self, trader_id: &str) -> Option<&TraderWhitelist> {
        self.trader_whitelist.iter().find(|t| t.trader_id == trader_id)
    }

    pub fn location(&self, key: &str) -> Option<&LocationConfig> {
        self.locations.get(key)
    }

    /// Locations available at `pmc_level`, in key order
    pub fn unlocked_locations(&self, pmc_level: u32) -> impl Iterator<Item = (&String, &LocationConfig)> {
        self.locations
            .iter()
            .filter(move |(_, location)| location.min_level <= pmc_level)
    }

    pub fn pays_in_euros(&self, trader_id: &str) -> bool {
        self.euro_traders.iter().any(|t| t == trader_id)
    }
}

#[inline]
pub(crate) fn invalid(msg: String) -> QuestGenError {
    QuestGenError::InvalidConfig(msg)
}
