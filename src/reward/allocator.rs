//! Reward package assembly

use tracing::{debug, warn};

use super::{
    pick_weapon_preset, preset_reward_items, reward_item_pool, select_reward_items,
    RewardParameters,
};
use crate::config::{BaseQuestConfig, RepeatableConfig};
use crate::context::GenerationContext;
use crate::database::{Currency, ItemService, PriceService, GP_COIN_TPL};
use crate::error::{QuestGenError, Result};
use crate::quest::{QuestRewards, Reward, RewardItem, RewardType};

/// Stack size for a scaled amount, saturating at `u32::MAX`
fn stack_count(amount: f64) -> u32 {
    let rounded = amount.round().max(0.0);
    match u32::try_from(rounded as u64) {
        Ok(count) => count,
        Err(_) => {
            warn!(amount, "Reward stack exceeds u32, clamped");
            u32::MAX
        }
    }
}

/// Hands out reward indices in emission order
struct RewardSink {
    rewards: Vec<Reward>,
}

impl RewardSink {
    fn next_index(&self) -> u32 {
        self.rewards.len() as u32
    }

    fn scalar(&mut self, ctx: &mut GenerationContext<'_>, reward_type: RewardType, value: f64) -> &mut Reward {
        let reward = Reward::scalar(ctx.new_id(), reward_type, self.next_index(), value);
        self.rewards.push(reward);
        let last = self.rewards.len() - 1;
        &mut self.rewards[last]
    }

    fn items(&mut self, ctx: &mut GenerationContext<'_>, reward_type: RewardType, items: Vec<RewardItem>) {
        let reward = Reward::with_items(ctx.new_id(), reward_type, self.next_index(), items);
        self.rewards.push(reward);
    }

    fn stack(&mut self, ctx: &mut GenerationContext<'_>, reward_type: RewardType, tpl: &str, count: u32) {
        let id = ctx.new_id();
        let item = RewardItem {
            id: ctx.new_id(),
            tpl: tpl.to_string(),
            stack_count: count,
            parent_id: None,
            slot_id: None,
        };
        let reward = Reward::with_items(id, reward_type, self.next_index(), vec![item]);
        self.rewards.push(reward);
    }
}

/// Build the success rewards of a quest.
///
/// Rewards are emitted in a fixed order with strictly increasing indices:
/// experience, currency, GP coins, weapon preset, items, trader standing,
/// skill. Quantities that scale to zero are left out.
///
/// # Errors
/// `MissingTraderWhitelist` when `trader_id` has no whitelist entry, or a
/// configuration error when a reward curve cannot be evaluated.
pub fn generate_reward(
    ctx: &mut GenerationContext<'_>,
    pmc_level: u32,
    difficulty: f64,
    trader_id: &str,
    config: &RepeatableConfig,
    quest_base: &BaseQuestConfig,
    reward_blacklist: &[String],
) -> Result<QuestRewards> {
    let whitelist = config
        .trader_whitelist(trader_id)
        .ok_or_else(|| QuestGenError::MissingTraderWhitelist(trader_id.to_string()))?;
    let db = ctx.database();

    let params = RewardParameters::compute(ctx, &config.reward_scaling, pmc_level, difficulty)?;
    debug!(
        trader_id,
        pmc_level,
        difficulty,
        roubles = params.roubles,
        experience = params.experience,
        num_items = params.num_items,
        "Computed reward parameters"
    );

    let mut sink = RewardSink {
        rewards: Vec::new(),
    };

    if params.experience > 0 {
        sink.scalar(ctx, RewardType::Experience, params.experience as f64);
    }

    let (currency, amount) = if config.pays_in_euros(trader_id) {
        let euros = db.convert_from_roubles(params.roubles as f64, Currency::Euros);
        (Currency::Euros, euros)
    } else {
        (Currency::Roubles, params.roubles as f64)
    };
    sink.stack(ctx, RewardType::Currency, currency.tpl(), stack_count(amount));

    if params.gp_coins > 0 {
        sink.stack(ctx, RewardType::Item, GP_COIN_TPL, stack_count(params.gp_coins as f64));
    }

    let mut budget = params.roubles as f64;

    if whitelist.reward_can_be_weapon && ctx.chance_percent(whitelist.weapon_reward_chance_percent) {
        let blacklisted = |tpl: &String| {
            config.reward_blacklist.contains(tpl) || reward_blacklist.contains(tpl)
        };
        let presets = db
            .weapon_presets()
            .iter()
            .filter(|preset| !preset.items.iter().any(|item| blacklisted(&item.tpl)));
        match pick_weapon_preset(ctx, presets, budget) {
            Some((preset, price)) => {
                let items = preset_reward_items(ctx, preset);
                sink.items(ctx, RewardType::Item, items);
                budget -= price;
            }
            None => debug!(trader_id, budget, "No weapon preset within budget"),
        }
    }

    let pool = reward_item_pool(db, config, whitelist, reward_blacklist);
    if pool.is_empty() {
        debug!(trader_id, "Trader has no reward item candidates");
    }
    for item in select_reward_items(ctx, &pool, budget, params.num_items, config) {
        sink.stack(ctx, RewardType::Item, &item.tpl, item.stack_count);
    }

    if params.reputation > 0.0 {
        sink.scalar(ctx, RewardType::TraderStanding, params.reputation).target =
            Some(trader_id.to_string());
    }

    if ctx.roll(params.skill_chance) {
        let skills = &quest_base.possible_skill_rewards;
        if let Some(index) = ctx.rand_index(skills.len()) {
            sink.scalar(ctx, RewardType::Skill, params.skill_points).target =
                Some(skills[index].clone());
        }
    }

    Ok(QuestRewards {
        success: sink.rewards,
        ..Default::default()
    })
}
