//! Elimination quests: kill a number of targets, optionally with location,
//! body-part, distance and weapon restrictions

use tracing::debug;

use super::{
    body_part_difficulty, distance_difficulty, elimination_difficulty, sample_distance,
    DifficultyScale, EliminationFactors, QuestKind,
};
use crate::config::{EliminationConfig, RepeatableConfig, ANY_LOCATION};
use crate::context::GenerationContext;
use crate::database::{ItemService, LocationService};
use crate::error::{QuestGenError, Result};
use crate::pool::{QuestTypePool, WeightedPool};
use crate::quest::{CounterCondition, DistanceRequirement, Quest};
use crate::reward::generate_reward;

/// Weapon categories that make no sense beyond 50m
const CLOSE_RANGE_CATEGORIES: [&str; 2] = ["Shotgun", "Pistol"];
/// Weapon categories that make no sense under 20m
const LONG_RANGE_CATEGORIES: [&str; 2] = ["MarksmanRifle", "DMR"];

const MAX_BODY_PARTS: i64 = 3;

pub(super) fn generate(
    ctx: &mut GenerationContext<'_>,
    pmc_level: u32,
    trader_id: &str,
    pool: &mut QuestTypePool,
    config: &RepeatableConfig,
) -> Result<Quest> {
    let tier = config
        .elimination_tier(pmc_level)
        .ok_or(QuestGenError::MissingLevelTier {
            kind: QuestKind::Elimination,
            level: pmc_level,
        })?;
    let db = ctx.database();

    let configured_targets = WeightedPool::from_config(&tier.targets);
    let configured_parts = WeightedPool::from_config(&tier.body_parts);
    let scale = DifficultyScale::for_tier(&configured_targets, &configured_parts, tier);

    // Bosses alone never keep the type alive
    let targets = configured_targets.filter(|entry| pool.has_target(&entry.key));
    let only_bosses = targets
        .iter()
        .all(|entry| entry.data.as_ref().is_some_and(|info| info.is_boss));
    if targets.is_empty() || only_bosses {
        pool.remove_type(QuestKind::Elimination);
        return Err(QuestGenError::NoTargets);
    }

    let target = targets.draw_one(ctx.rng()).ok_or(QuestGenError::NoTargets)?;
    let info = targets.data(&target).cloned().unwrap_or_default();
    let mut factors = EliminationFactors {
        target: 1.0 / targets.probability(&target),
        ..Default::default()
    };

    let location_key = choose_location(ctx, pool, &target, tier)?;
    let location = config
        .location(&location_key)
        .ok_or_else(|| QuestGenError::MissingLocationId(location_key.clone()))?;
    if pool.consume_target_location(&target, &location_key) {
        debug!(target = %target, "Target has no locations left, evicted");
    }

    let mut body_parts = Vec::new();
    if !configured_parts.is_empty() && ctx.roll(tier.body_part_prob) {
        let count = ctx.rand_int_inclusive(1, MAX_BODY_PARTS) as usize;
        let drawn = configured_parts.draw(ctx.rng(), count, true);
        factors.body_part = body_part_difficulty(&configured_parts, &drawn);
        body_parts = drawn
            .iter()
            .flat_map(|part| part.client_labels())
            .map(str::to_string)
            .collect();
    }

    let mut distance = None;
    let distance_roll = ctx.roll(tier.dist_prob);
    let blacklisted = |key: &str| tier.dist_location_blacklist.iter().any(|l| l == key);
    let boss_reachable = !info.is_boss
        || db
            .boss_spawn_locations(&target)
            .iter()
            .any(|spawn| !blacklisted(spawn.as_str()));
    if distance_roll && !blacklisted(location_key.as_str()) && boss_reachable {
        let meters = sample_distance(ctx, tier.min_dist, tier.max_dist);
        factors.distance = distance_difficulty(meters, tier.max_dist);
        distance = Some(meters);
    }

    let mut weapon_categories = Vec::new();
    if ctx.roll(tier.weapon_category_requirement_prob) {
        let mut categories = WeightedPool::from_config(&tier.weapon_category_requirements);
        if let Some(meters) = distance {
            if meters > 50 {
                categories.remove_all(|c| CLOSE_RANGE_CATEGORIES.contains(&c.key.as_str()));
            }
            if meters < 20 {
                categories.remove_all(|c| LONG_RANGE_CATEGORIES.contains(&c.key.as_str()));
            }
        }
        if let Some(category) = categories.draw_one(ctx.rng()) {
            weapon_categories = match categories.data(&category) {
                Some(classes) if !classes.is_empty() => classes.clone(),
                _ => vec![category],
            };
        }
    }

    let mut weapons = Vec::new();
    if weapon_categories.is_empty() && ctx.roll(tier.weapon_requirement_prob) {
        let groups = WeightedPool::from_config(&tier.weapon_requirements);
        if let Some(group) = groups.draw_one(ctx.rng()) {
            let candidates: Vec<String> = groups
                .data(&group)
                .map(|classes| {
                    classes
                        .iter()
                        .flat_map(|class| db.item_tpls_of_base_class(class))
                        .collect()
                })
                .unwrap_or_default();
            match ctx.rand_index(candidates.len()) {
                Some(i) => weapons.push(candidates[i].clone()),
                None => debug!(group = %group, "Weapon group has no concrete weapons"),
            }
        }
    }
    factors.weapon_restricted = !weapon_categories.is_empty() || !weapons.is_empty();

    let (min_kills, max_kills) = kill_range(tier, info.is_boss, info.is_pmc);
    let kills = ctx.rand_int_inclusive(i64::from(min_kills), i64::from(max_kills)) as u32;
    factors.kills = kills;

    let difficulty = elimination_difficulty(&factors, &scale);
    debug!(
        target = %target,
        location = %location_key,
        kills,
        ?distance,
        difficulty,
        "Rolled elimination quest"
    );

    let mut quest = Quest::template(ctx, QuestKind::Elimination, trader_id, config.side);
    quest.location = location.quest_location_id.clone();
    let (kill_target, savage_role) = if info.is_boss {
        ("Savage".to_string(), vec![target.clone()])
    } else {
        (target.clone(), Vec::new())
    };

    let conditions = quest.conditions.counter_conditions_mut()?;
    if location_key != ANY_LOCATION {
        conditions.push(CounterCondition::Location {
            id: ctx.new_id(),
            target: location.map_ids.clone(),
        });
    }
    conditions.push(CounterCondition::Kills {
        id: ctx.new_id(),
        target: kill_target,
        savage_role,
        value: 1,
        body_part: body_parts,
        distance: distance.map(DistanceRequirement::at_least),
        weapon: weapons,
        weapon_categories,
    });
    quest.conditions.set_counter_value(kills)?;

    quest.rewards = generate_reward(ctx, pmc_level, difficulty, trader_id, config, &tier.base, &[])?;
    Ok(quest)
}

/// Location key for `target`: "any" unless a specific location is rolled
/// (or "any" is no longer on offer)
fn choose_location(
    ctx: &mut GenerationContext<'_>,
    pool: &QuestTypePool,
    target: &str,
    tier: &EliminationConfig,
) -> Result<String> {
    let locations = pool
        .target_locations(target)
        .ok_or_else(|| QuestGenError::Invariant(format!("drawn target {target} is not in the pool")))?;

    let has_any = locations.iter().any(|l| l == ANY_LOCATION);
    if has_any && (!ctx.roll(tier.specific_location_prob) || locations.len() == 1) {
        return Ok(ANY_LOCATION.to_string());
    }

    let specific: Vec<&String> = locations.iter().filter(|l| *l != ANY_LOCATION).collect();
    let index = ctx
        .rand_index(specific.len())
        .ok_or_else(|| QuestGenError::Invariant(format!("target {target} has no specific location")))?;
    Ok(specific[index].clone())
}

fn kill_range(tier: &EliminationConfig, is_boss: bool, is_pmc: bool) -> (u32, u32) {
    if is_boss {
        (tier.min_boss_kills, tier.max_boss_kills)
    } else if is_pmc {
        (tier.min_pmc_kills, tier.max_pmc_kills)
    } else {
        (tier.min_kills, tier.max_kills)
    }
}
