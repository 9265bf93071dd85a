//! Pickup quest configuration

use serde::Deserialize;

use super::{invalid, BaseQuestConfig};
use crate::error::Result;

/// An item type a pickup quest can ask for, with its count range
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PickupTarget {
    pub item_type: String,
    pub min_pickup_count: u32,
    pub max_pickup_count: u32,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PickupConfig {
    #[serde(rename = "ItemTypeToFetchWithMaxCount")]
    pub item_types: Vec<PickupTarget>,
    #[serde(flatten)]
    pub base: BaseQuestConfig,
}

impl PickupConfig {
    pub fn validate(&self) -> Result<()> {
        for target in &self.item_types {
            if target.min_pickup_count > target.max_pickup_count {
                return Err(invalid(format!(
                    "Pickup count range for {} is inverted",
                    target.item_type
                )));
            }
        }
        Ok(())
    }
}
