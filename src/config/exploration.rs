//! Exploration quest configuration

use serde::Deserialize;

use super::{invalid, BaseQuestConfig};
use crate::error::Result;

/// Named-extract requirement settings
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpecificExitConfig {
    pub probability: f64,
    /// Passage requirements (e.g. "TransferItem") an exit may have and still
    /// be named by a quest
    #[serde(default)]
    pub passage_requirement_whitelist: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExplorationConfig {
    pub max_extracts: u32,
    #[serde(default)]
    pub specific_exits: SpecificExitConfig,
    #[serde(flatten)]
    pub base: BaseQuestConfig,
}

impl ExplorationConfig {
    pub fn validate(&self) -> Result<()> {
        if self.max_extracts == 0 {
            return Err(invalid("Exploration.maxExtracts must be at least 1".to_string()));
        }
        Ok(())
    }
}
