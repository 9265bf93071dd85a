//! In-memory item catalog
//!
//! Loaded once from a JSON export of the item database and indexed with
//! ahash maps. Iteration order always follows the export order so seeded
//! generation stays reproducible.

use ahash::AHashMap;
use serde::Deserialize;

use super::{
    base_class, ItemService, ItemTemplate, LocationExit, LocationService, PriceService,
    WeaponPreset,
};
use crate::config::Side;
use crate::error::Result;

/// Guard against cycles in malformed parent chains
const MAX_PARENT_DEPTH: usize = 32;

/// A node of the base-class tree
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BaseClassNode {
    pub id: String,
    #[serde(default)]
    pub parent: Option<String>,
}

/// A location with its exits and the bosses that spawn there
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocationData {
    pub id: String,
    #[serde(default)]
    pub exits: Vec<LocationExit>,
    #[serde(default)]
    pub boss_spawns: Vec<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CatalogData {
    items: Vec<ItemTemplate>,
    #[serde(default)]
    base_classes: Vec<BaseClassNode>,
    #[serde(default)]
    weapon_presets: Vec<WeaponPreset>,
    #[serde(default)]
    locations: Vec<LocationData>,
}

/// JSON-backed implementation of every collaborator trait
#[derive(Debug, Clone)]
pub struct Catalog {
    items: Vec<ItemTemplate>,
    item_index: AHashMap<String, usize>,
    parents: AHashMap<String, String>,
    presets: Vec<WeaponPreset>,
    locations: Vec<LocationData>,
    location_index: AHashMap<String, usize>,
}

impl Catalog {
    pub fn new(
        items: Vec<ItemTemplate>,
        base_classes: Vec<BaseClassNode>,
        presets: Vec<WeaponPreset>,
        locations: Vec<LocationData>,
    ) -> Self {
        let mut parents = AHashMap::with_capacity(items.len() + base_classes.len());
        for node in base_classes {
            if let Some(parent) = node.parent {
                parents.insert(node.id, parent);
            }
        }

        let mut item_index = AHashMap::with_capacity(items.len());
        for (i, item) in items.iter().enumerate() {
            item_index.insert(item.id.clone(), i);
            parents.insert(item.id.clone(), item.parent.clone());
        }

        let location_index = locations
            .iter()
            .enumerate()
            .map(|(i, location)| (location.id.clone(), i))
            .collect();

        Self {
            items,
            item_index,
            parents,
            presets,
            locations,
            location_index,
        }
    }

    /// Load a catalog export
    pub fn from_json(json: &str) -> Result<Self> {
        let data: CatalogData = serde_json::from_str(json)?;
        Ok(Self::new(
            data.items,
            data.base_classes,
            data.weapon_presets,
            data.locations,
        ))
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    fn location(&self, id: &str) -> Option<&LocationData> {
        self.location_index.get(id).map(|&i| &self.locations[i])
    }
}

impl PriceService for Catalog {
    fn price(&self, tpl: &str) -> Option<f64> {
        self.item(tpl).map(|item| item.price).filter(|price| *price > 0.0)
    }
}

impl ItemService for Catalog {
    fn item(&self, tpl: &str) -> Option<&ItemTemplate> {
        self.item_index.get(tpl).map(|&i| &self.items[i])
    }

    fn reward_candidates(&self) -> Vec<&ItemTemplate> {
        self.items.iter().collect()
    }

    fn is_of_base_class(&self, tpl: &str, base: &str) -> bool {
        let mut current = tpl;
        for _ in 0..MAX_PARENT_DEPTH {
            if current == base {
                return true;
            }
            match self.parents.get(current) {
                Some(parent) => current = parent,
                None => return false,
            }
        }
        false
    }

    fn is_valid_reward_item(&self, tpl: &str) -> bool {
        match self.item(tpl) {
            Some(item) => {
                !item.quest_item
                    && item.price > 0.0
                    && !self.is_of_base_class(tpl, base_class::MONEY)
            }
            None => false,
        }
    }

    fn is_boss_item(&self, tpl: &str) -> bool {
        self.item(tpl).map(|item| item.boss_item).unwrap_or(false)
    }

    fn is_seasonal_inactive(&self, tpl: &str) -> bool {
        self.item(tpl).map(|item| item.seasonal_inactive).unwrap_or(false)
    }

    fn item_tpls_of_base_class(&self, base: &str) -> Vec<String> {
        self.items
            .iter()
            .filter(|item| item.id != base && self.is_of_base_class(&item.id, base))
            .map(|item| item.id.clone())
            .collect()
    }

    fn weapon_presets(&self) -> &[WeaponPreset] {
        &self.presets
    }
}

impl LocationService for Catalog {
    fn exits(&self, location: &str, side: Side) -> Vec<LocationExit> {
        self.location(location)
            .map(|l| l.exits.iter().filter(|e| e.side == side).cloned().collect())
            .unwrap_or_default()
    }

    fn boss_spawn_locations(&self, boss: &str) -> Vec<String> {
        self.locations
            .iter()
            .filter(|l| l.boss_spawns.iter().any(|b| b == boss))
            .map(|l| l.id.clone())
            .collect()
    }
}
