//! Generated quest definitions

mod condition;
mod reward;

pub use condition::*;
pub use reward::*;

use serde::Serialize;

use crate::config::Side;
use crate::context::GenerationContext;
use crate::error::Result;
use crate::generator::QuestKind;

/// A fully specified repeatable quest
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Quest {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: QuestKind,
    pub trader_id: String,
    /// Location id of the map, or "any"
    pub location: String,
    pub side: Side,
    pub conditions: QuestConditions,
    pub rewards: QuestRewards,
}

impl Quest {
    /// Empty quest of `kind` with the condition slots its generator fills
    pub fn template(
        ctx: &mut GenerationContext<'_>,
        kind: QuestKind,
        trader_id: &str,
        side: Side,
    ) -> Self {
        let id = ctx.new_id();
        let mut conditions = QuestConditions::default();
        match kind {
            QuestKind::Elimination | QuestKind::Exploration => {
                conditions
                    .available_for_finish
                    .push(counter_creator(ctx, kind.counter_label()));
            }
            QuestKind::Pickup => {
                let find = ItemRequirement::new(ctx.new_id(), Vec::new(), 1);
                conditions.available_for_finish.push(Condition::FindItem(find));
                conditions
                    .available_for_finish
                    .push(counter_creator(ctx, kind.counter_label()));
            }
            QuestKind::Completion => {}
        }

        Self {
            id,
            kind,
            trader_id: trader_id.to_string(),
            location: crate::config::ANY_LOCATION.to_string(),
            side,
            conditions,
            rewards: QuestRewards::default(),
        }
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}

fn counter_creator(ctx: &mut GenerationContext<'_>, label: &str) -> Condition {
    Condition::CounterCreator {
        id: ctx.new_id(),
        value: 1,
        counter: Counter {
            id: ctx.new_id(),
            conditions: Vec::new(),
        },
        counter_type: label.to_string(),
        one_session_only: false,
    }
}
