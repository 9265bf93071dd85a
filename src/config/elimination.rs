//! Elimination quest configuration

use serde::{Deserialize, Serialize};
use smallvec::{smallvec, SmallVec};

use super::{invalid, BaseQuestConfig};
use crate::error::Result;
use crate::pool::ProbabilityEntry;

/// Inclusive player-level range a tier applies to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct LevelRange {
    pub min: u32,
    pub max: u32,
}

impl LevelRange {
    #[inline]
    pub fn contains(&self, level: u32) -> bool {
        self.min <= level && level <= self.max
    }
}

/// Payload of an elimination target entry
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TargetInfo {
    #[serde(default)]
    pub is_boss: bool,
    #[serde(default)]
    pub is_pmc: bool,
    /// Locations this target is never asked for on
    #[serde(default)]
    pub location_blacklist: Vec<String>,
}

/// Body-part groups a kill requirement can name
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
pub enum BodyPart {
    Head,
    Chest,
    Arms,
    Legs,
}

impl BodyPart {
    /// Hit-zone names the client understands for this group
    pub fn client_labels(self) -> SmallVec<[&'static str; 2]> {
        match self {
            BodyPart::Head => smallvec!["Head"],
            BodyPart::Chest => smallvec!["Chest", "Stomach"],
            BodyPart::Arms => smallvec!["LeftArm", "RightArm"],
            BodyPart::Legs => smallvec!["LeftLeg", "RightLeg"],
        }
    }
}

/// One level tier of elimination settings
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EliminationConfig {
    pub level_range: LevelRange,
    pub targets: Vec<ProbabilityEntry<String, TargetInfo>>,
    pub body_part_prob: f64,
    pub body_parts: Vec<ProbabilityEntry<BodyPart, ()>>,
    pub specific_location_prob: f64,
    #[serde(default)]
    pub dist_location_blacklist: Vec<String>,
    pub dist_prob: f64,
    pub max_dist: u32,
    pub min_dist: u32,
    pub max_kills: u32,
    pub min_kills: u32,
    pub max_boss_kills: u32,
    pub min_boss_kills: u32,
    pub max_pmc_kills: u32,
    pub min_pmc_kills: u32,
    #[serde(default)]
    pub weapon_category_requirement_prob: f64,
    /// Key is the category name, data the base-class ids it stands for
    #[serde(default)]
    pub weapon_category_requirements: Vec<ProbabilityEntry<String, Vec<String>>>,
    #[serde(default)]
    pub weapon_requirement_prob: f64,
    /// Key is a weapon group, data the base classes to pick a weapon from
    #[serde(default)]
    pub weapon_requirements: Vec<ProbabilityEntry<String, Vec<String>>>,
    #[serde(flatten)]
    pub base: BaseQuestConfig,
}

impl EliminationConfig {
    pub fn validate(&self) -> Result<()> {
        let tier = format!("elimination tier {}-{}", self.level_range.min, self.level_range.max);

        if self.level_range.min > self.level_range.max {
            return Err(invalid(format!("{tier}: level range is inverted")));
        }
        if self.targets.is_empty() {
            return Err(invalid(format!("{tier}: no targets")));
        }
        let positive = |w: f64| w.is_finite() && w > 0.0;
        if !self.targets.iter().all(|t| positive(t.relative_probability)) {
            return Err(invalid(format!("{tier}: target weights must be positive")));
        }
        if !self.body_parts.iter().all(|b| positive(b.relative_probability)) {
            return Err(invalid(format!("{tier}: body part weights must be positive")));
        }
        if self.body_part_prob > 0.0 && self.body_parts.is_empty() {
            return Err(invalid(format!("{tier}: bodyPartProb set without body parts")));
        }

        let ranges = [
            ("kills", self.min_kills, self.max_kills),
            ("boss kills", self.min_boss_kills, self.max_boss_kills),
            ("pmc kills", self.min_pmc_kills, self.max_pmc_kills),
            ("distance", self.min_dist, self.max_dist),
        ];
        for (name, min, max) in ranges {
            if min > max {
                return Err(invalid(format!("{tier}: {name} range {min}..{max} is inverted")));
            }
        }
        if self.max_kills == 0 {
            return Err(invalid(format!("{tier}: maxKills must be at least 1")));
        }
        // Distances are multiples of 5, so the range has to hold at least one
        if self.dist_prob > 0.0 && (self.max_dist / 5) * 5 < self.min_dist.max(5) {
            return Err(invalid(format!(
                "{tier}: no multiple of 5 between {} and {}",
                self.min_dist, self.max_dist
            )));
        }
        Ok(())
    }
}
