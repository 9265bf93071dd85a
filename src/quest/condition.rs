//! Objective condition tree

use serde::Serialize;

use crate::error::{QuestGenError, Result};

/// Root condition of a quest's "available for finish" list
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "conditionType")]
pub enum Condition {
    /// Counts in-raid events matching every sub-condition
    #[serde(rename_all = "camelCase")]
    CounterCreator {
        id: String,
        /// How many times the counter must fire
        value: u32,
        counter: Counter,
        /// Quest category shown by the client
        #[serde(rename = "type")]
        counter_type: String,
        one_session_only: bool,
    },

    /// Hand items over to the trader
    HandoverItem(ItemRequirement),

    /// Find items in raid
    FindItem(ItemRequirement),
}

/// Item requirement shared by hand-over and find conditions
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemRequirement {
    pub id: String,
    pub target: Vec<String>,
    pub value: u32,
    pub only_found_in_raid: bool,
    pub min_durability: u32,
    pub max_durability: u32,
}

impl ItemRequirement {
    pub fn new(id: String, target: Vec<String>, value: u32) -> Self {
        Self {
            id,
            target,
            value,
            only_found_in_raid: false,
            min_durability: 0,
            max_durability: 100,
        }
    }
}

/// Sub-conditions a counter combines
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Counter {
    pub id: String,
    pub conditions: Vec<CounterCondition>,
}

/// Distance requirement of a kill
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DistanceRequirement {
    pub compare_method: &'static str,
    pub value: u32,
}

impl DistanceRequirement {
    pub fn at_least(value: u32) -> Self {
        Self {
            compare_method: ">=",
            value,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "conditionType")]
pub enum CounterCondition {
    #[serde(rename_all = "camelCase")]
    Location { id: String, target: Vec<String> },

    #[serde(rename_all = "camelCase")]
    Kills {
        id: String,
        /// "Savage", "AnyPmc" or "Any"
        target: String,
        /// Boss roles, when the target is a boss
        savage_role: Vec<String>,
        value: u32,
        body_part: Vec<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        distance: Option<DistanceRequirement>,
        /// Concrete weapon templates any of which must be used
        weapon: Vec<String>,
        /// Base classes any of which the weapon must derive from
        weapon_categories: Vec<String>,
    },

    #[serde(rename_all = "camelCase")]
    ExitStatus { id: String, status: Vec<String> },

    #[serde(rename_all = "camelCase")]
    ExitName { id: String, exit_name: String },

    #[serde(rename_all = "camelCase")]
    Equipment {
        id: String,
        /// Each inner list is one acceptable combination of templates
        equipment_inclusive: Vec<Vec<String>>,
    },
}

impl CounterCondition {
    pub fn id(&self) -> &str {
        match self {
            CounterCondition::Location { id, .. }
            | CounterCondition::Kills { id, .. }
            | CounterCondition::ExitStatus { id, .. }
            | CounterCondition::ExitName { id, .. }
            | CounterCondition::Equipment { id, .. } => id,
        }
    }
}

/// A quest's condition lists
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestConditions {
    pub available_for_start: Vec<Condition>,
    pub available_for_finish: Vec<Condition>,
    pub fail: Vec<Condition>,
}

impl QuestConditions {
    /// First counter-creator finish condition
    pub fn counter_creator_mut(&mut self) -> Result<&mut Condition> {
        self.available_for_finish
            .iter_mut()
            .find(|c| matches!(c, Condition::CounterCreator { .. }))
            .ok_or(QuestGenError::MissingConditionSlot("CounterCreator"))
    }

    /// Sub-conditions of the counter-creator finish condition
    pub fn counter_conditions_mut(&mut self) -> Result<&mut Vec<CounterCondition>> {
        match self.counter_creator_mut()? {
            Condition::CounterCreator { counter, .. } => Ok(&mut counter.conditions),
            _ => Err(QuestGenError::MissingConditionSlot("CounterCreator")),
        }
    }

    pub fn find_item_mut(&mut self) -> Result<&mut ItemRequirement> {
        self.available_for_finish
            .iter_mut()
            .find_map(|c| match c {
                Condition::FindItem(req) => Some(req),
                _ => None,
            })
            .ok_or(QuestGenError::MissingConditionSlot("FindItem"))
    }

    /// Set how many times the counter must fire
    pub fn set_counter_value(&mut self, new_value: u32) -> Result<()> {
        match self.counter_creator_mut()? {
            Condition::CounterCreator { value, .. } => {
                *value = new_value;
                Ok(())
            }
            _ => Err(QuestGenError::MissingConditionSlot("CounterCreator")),
        }
    }

    pub fn counter_conditions(&self) -> &[CounterCondition] {
        self.available_for_finish
            .iter()
            .find_map(|c| match c {
                Condition::CounterCreator { counter, .. } => Some(counter.conditions.as_slice()),
                _ => None,
            })
            .unwrap_or(&[])
    }
}
