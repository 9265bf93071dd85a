//! Completion quests: hand a set of items over to the trader

use tracing::debug;

use super::QuestKind;
use crate::config::{CompletionConfig, RepeatableConfig};
use crate::context::GenerationContext;
use crate::database::{base_class, Database, ItemService};
use crate::error::{QuestGenError, Result};
use crate::quest::{Condition, ItemRequirement, Quest};
use crate::reward::{generate_reward, reward_item_pool, Candidate};

/// Floor of the hand-over budget in roubles
const MIN_BUDGET: f64 = 5_000.0;
/// Extra ammo picks skipped before a second ammo type is accepted
const MAX_AMMO_SKIPS: u32 = 5;

pub(super) fn generate(
    ctx: &mut GenerationContext<'_>,
    pmc_level: u32,
    trader_id: &str,
    config: &RepeatableConfig,
) -> Result<Quest> {
    let completion = &config.quest_config.completion;
    let whitelist = config
        .trader_whitelist(trader_id)
        .ok_or_else(|| QuestGenError::MissingTraderWhitelist(trader_id.to_string()))?;
    let db = ctx.database();

    let scaled = config.reward_scaling.at(&config.reward_scaling.roubles, pmc_level)?;
    let mut budget = (scaled * ctx.rand_float(0.5, 1.0)).floor().max(MIN_BUDGET);

    let pool = reward_item_pool(db, config, whitelist, &[]);
    let mut candidates: Vec<Candidate<'_>> = pool
        .into_iter()
        .filter(|c| c.price < budget)
        .filter(|c| gate_allows(db, completion, pmc_level, &c.item.id))
        .collect();
    if candidates.is_empty() {
        return Err(QuestGenError::NoCompletionItems(pmc_level));
    }

    let distinct = ctx.rand_int_inclusive(1, i64::from(completion.unique_item_count)) as u32;
    let mut quest = Quest::template(ctx, QuestKind::Completion, trader_id, config.side);
    let mut requested = Vec::new();
    let mut has_ammo = false;
    let mut ammo_skips = 0;

    while (requested.len() as u32) < distinct && budget > 0.0 {
        let Some(index) = ctx.rand_index(candidates.len()) else {
            break;
        };
        let Candidate { item, price } = candidates.remove(index);

        let is_ammo = db.is_of_base_class(&item.id, base_class::AMMO);
        if is_ammo && has_ammo && ammo_skips < MAX_AMMO_SKIPS {
            ammo_skips += 1;
            continue;
        }
        has_ammo |= is_ammo;

        let (min, max) = if is_ammo {
            (completion.min_requested_bullet_amount, completion.max_requested_bullet_amount)
        } else {
            (completion.min_requested_amount, completion.max_requested_amount)
        };
        let affordable = (budget / price).floor() as u32;
        let upper = max.min(affordable);
        let amount = if upper > min {
            ctx.rand_int_inclusive(i64::from(min), i64::from(upper)) as u32
        } else {
            min
        }
        .max(1);

        budget -= price * f64::from(amount);
        candidates.retain(|c| c.price < budget);

        let mut requirement = ItemRequirement::new(ctx.new_id(), vec![item.id.clone()], amount);
        requirement.only_found_in_raid = true;
        quest.conditions.available_for_finish.push(Condition::HandoverItem(requirement));
        requested.push(item.id.clone());
    }
    debug!(trader_id, pmc_level, items = requested.len(), budget, "Rolled completion quest");

    // Never reward what the quest asks for
    quest.rewards =
        generate_reward(ctx, pmc_level, 1.0, trader_id, config, &completion.base, &requested)?;
    Ok(quest)
}

/// Apply the level-gated whitelist and blacklist to one candidate
fn gate_allows(db: &dyn Database, completion: &CompletionConfig, pmc_level: u32, tpl: &str) -> bool {
    let listed = |ids: &[&str]| ids.iter().any(|id| *id == tpl || db.is_of_base_class(tpl, id));

    if completion.use_whitelist {
        let allowed = CompletionConfig::gated_ids(&completion.items_whitelist, pmc_level);
        if !allowed.is_empty() && !listed(allowed.as_slice()) {
            return false;
        }
    }
    if completion.use_blacklist {
        let denied = CompletionConfig::gated_ids(&completion.items_blacklist, pmc_level);
        if listed(denied.as_slice()) {
            return false;
        }
    }
    true
}
