//! Registry of quest targets and locations still unused in a refresh cycle

use std::collections::BTreeMap;

use rand::Rng;

use crate::config::{RepeatableConfig, ANY_LOCATION};
use crate::generator::QuestKind;

/// Remaining (target, location) combinations per quest type
///
/// One pool lives for one refresh cycle and is shared by `&mut` between the
/// generators of that cycle. Whatever a generator consumes is never offered
/// again; an elimination target whose location list runs empty is evicted.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QuestTypePool {
    types: Vec<QuestKind>,
    exploration_locations: Vec<String>,
    pickup_locations: Vec<String>,
    elimination_targets: BTreeMap<String, Vec<String>>,
}

impl QuestTypePool {
    pub fn new(types: Vec<QuestKind>) -> Self {
        Self {
            types,
            ..Self::default()
        }
    }

    /// Build the pool a refresh cycle starts with at `pmc_level`
    pub fn for_level(config: &RepeatableConfig, pmc_level: u32) -> Self {
        let unlocked: Vec<&String> = config
            .unlocked_locations(pmc_level)
            .map(|(key, _)| key)
            .collect();
        let specific: Vec<String> = unlocked
            .iter()
            .filter(|key| key.as_str() != ANY_LOCATION)
            .map(|key| key.to_string())
            .collect();

        let mut pool = Self::new(config.types.clone());
        pool.exploration_locations = specific.clone();
        pool.pickup_locations = specific;
        pool.pickup_locations.push(ANY_LOCATION.to_string());

        if let Some(tier) = config.elimination_tier(pmc_level) {
            for target in &tier.targets {
                let info = target.data.clone().unwrap_or_default();
                let locations = if info.is_boss {
                    vec![ANY_LOCATION.to_string()]
                } else {
                    unlocked
                        .iter()
                        .filter(|key| !info.location_blacklist.contains(**key))
                        .map(|key| key.to_string())
                        .collect()
                };
                if !locations.is_empty() {
                    pool.elimination_targets.insert(target.key.clone(), locations);
                }
            }
        }

        pool
    }

    pub fn types(&self) -> &[QuestKind] {
        &self.types
    }

    pub fn is_eligible(&self, kind: QuestKind) -> bool {
        self.types.contains(&kind)
    }

    /// Stop offering a quest type for the rest of the cycle
    pub fn remove_type(&mut self, kind: QuestKind) {
        self.types.retain(|k| *k != kind);
    }

    pub fn add_exploration_location(&mut self, key: impl Into<String>) {
        self.exploration_locations.push(key.into());
    }

    pub fn add_pickup_location(&mut self, key: impl Into<String>) {
        self.pickup_locations.push(key.into());
    }

    pub fn add_target(&mut self, target: impl Into<String>, locations: Vec<String>) {
        if !locations.is_empty() {
            self.elimination_targets.insert(target.into(), locations);
        }
    }

    pub fn exploration_locations(&self) -> &[String] {
        &self.exploration_locations
    }

    pub fn pickup_locations(&self) -> &[String] {
        &self.pickup_locations
    }

    /// Draw and remove one exploration location key, uniformly
    pub fn draw_exploration_location<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Option<String> {
        if self.exploration_locations.is_empty() {
            return None;
        }
        let index = rng.gen_range(0..self.exploration_locations.len());
        Some(self.exploration_locations.remove(index))
    }

    /// Draw one pickup location key, uniformly
    ///
    /// A specific location is consumed; `any` stays available and is also
    /// what an empty pool yields.
    pub fn draw_pickup_location<R: Rng + ?Sized>(&mut self, rng: &mut R) -> String {
        if self.pickup_locations.is_empty() {
            return ANY_LOCATION.to_string();
        }
        let index = rng.gen_range(0..self.pickup_locations.len());
        if self.pickup_locations[index] == ANY_LOCATION {
            return ANY_LOCATION.to_string();
        }
        self.pickup_locations.remove(index)
    }

    pub fn has_target(&self, target: &str) -> bool {
        self.elimination_targets.contains_key(target)
    }

    pub fn targets(&self) -> impl Iterator<Item = &String> {
        self.elimination_targets.keys()
    }

    pub fn target_locations(&self, target: &str) -> Option<&[String]> {
        self.elimination_targets.get(target).map(Vec::as_slice)
    }

    /// Remove `location` from `target`, evicting the target once it has no
    /// locations left. Returns true when the target was evicted.
    pub fn consume_target_location(&mut self, target: &str, location: &str) -> bool {
        let emptied = match self.elimination_targets.get_mut(target) {
            Some(locations) => {
                locations.retain(|l| l != location);
                locations.is_empty()
            }
            None => return false,
        };
        if emptied {
            self.elimination_targets.remove(target);
        }
        emptied
    }

    pub fn evict_target(&mut self, target: &str) -> bool {
        self.elimination_targets.remove(target).is_some()
    }
}
