//! Exploration quests: survive and extract from a map a number of times,
//! sometimes through a named extract

use tracing::warn;

use super::{exploration_difficulty, QuestKind};
use crate::config::{ExplorationConfig, RepeatableConfig};
use crate::context::GenerationContext;
use crate::database::{LocationExit, LocationService};
use crate::error::{QuestGenError, Result};
use crate::pool::QuestTypePool;
use crate::quest::{CounterCondition, Quest};
use crate::reward::generate_reward;

pub(super) fn generate(
    ctx: &mut GenerationContext<'_>,
    pmc_level: u32,
    trader_id: &str,
    pool: &mut QuestTypePool,
    config: &RepeatableConfig,
) -> Result<Quest> {
    let exploration = &config.quest_config.exploration;

    let Some(location_key) = pool.draw_exploration_location(ctx.rng()) else {
        pool.remove_type(QuestKind::Exploration);
        return Err(QuestGenError::NoLocations(QuestKind::Exploration.to_string()));
    };
    let location = config
        .location(&location_key)
        .ok_or_else(|| QuestGenError::MissingLocationId(location_key.clone()))?;

    let requires_specific_exit = ctx.roll(exploration.specific_exits.probability);
    let max_exits = exploration.max_extracts + u32::from(requires_specific_exit);
    let exit_count = ctx.rand_int_inclusive(1, i64::from(max_exits)) as u32;

    let mut quest = Quest::template(ctx, QuestKind::Exploration, trader_id, config.side);
    quest.location = location.quest_location_id.clone();

    let conditions = quest.conditions.counter_conditions_mut()?;
    conditions.push(CounterCondition::ExitStatus {
        id: ctx.new_id(),
        status: vec!["Survived".to_string()],
    });
    conditions.push(CounterCondition::Location {
        id: ctx.new_id(),
        target: location.map_ids.clone(),
    });

    if requires_specific_exit {
        let exits = nameable_exits(ctx, &location_key, config, exploration);
        match ctx.rand_index(exits.len()) {
            Some(i) => conditions.push(CounterCondition::ExitName {
                id: ctx.new_id(),
                exit_name: exits[i].name.clone(),
            }),
            None => warn!(location = %location_key, "No exit can be named for exploration quest"),
        }
    }
    quest.conditions.set_counter_value(exit_count)?;

    let difficulty = exploration_difficulty(exit_count, exploration.max_extracts);
    quest.rewards =
        generate_reward(ctx, pmc_level, difficulty, trader_id, config, &exploration.base, &[])?;
    Ok(quest)
}

/// Exits of the map that can spawn and have either no passage requirement
/// or a whitelisted one
fn nameable_exits(
    ctx: &GenerationContext<'_>,
    location_key: &str,
    config: &RepeatableConfig,
    exploration: &ExplorationConfig,
) -> Vec<LocationExit> {
    let whitelist = &exploration.specific_exits.passage_requirement_whitelist;
    ctx.database()
        .exits(location_key, config.side)
        .into_iter()
        .filter(|exit| exit.chance > 0.0)
        .filter(|exit| match &exit.passage_requirement {
            None => true,
            Some(requirement) => whitelist.contains(requirement),
        })
        .collect()
}
