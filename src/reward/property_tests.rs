//! Property tests for reward budgeting

use proptest::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::config::ItemSelection;
use crate::context::GenerationContext;
use crate::fixtures::{test_catalog, test_config, FENCE, PEACEKEEPER, PRAPOR, THERAPIST};
use crate::quest::RewardType;
use crate::reward::{generate_reward, reward_item_pool, select_reward_items, SelectedItem};

fn trader_strategy() -> impl Strategy<Value = &'static str> {
    prop_oneof![Just(PRAPOR), Just(THERAPIST), Just(PEACEKEEPER), Just(FENCE)]
}

proptest! {
    /// Selected items never cost more than the budget they were drawn from
    #[test]
    fn prop_selection_within_budget(
        budget in 0.0..200_000.0f64,
        num_items in 0u32..6,
        seed in any::<u64>(),
        trader in trader_strategy()
    ) {
        let catalog = test_catalog();
        let mut config = test_config();
        config.item_selection = ItemSelection::Multiple;
        let whitelist = config.trader_whitelist(trader).unwrap();
        let pool = reward_item_pool(&catalog, &config, whitelist, &[]);

        let mut rng = StdRng::seed_from_u64(seed);
        let mut ctx = GenerationContext::new(&catalog, &mut rng);
        let selected = select_reward_items(&mut ctx, &pool, budget, num_items, &config);

        let total: f64 = selected.iter().map(SelectedItem::total_price).sum();
        prop_assert!(total <= budget);
        prop_assert!(selected.len() as u32 <= num_items);
        prop_assert!(selected.iter().all(|s| s.stack_count >= 1));
    }

    /// Reward indices follow emission order and every reward id is fresh
    #[test]
    fn prop_reward_indices_increase(
        level in 1u32..60,
        difficulty in 0.0..2.0f64,
        seed in any::<u64>(),
        trader in trader_strategy()
    ) {
        let catalog = test_catalog();
        let config = test_config();
        let base = &config.quest_config.exploration.base;
        let mut rng = StdRng::seed_from_u64(seed);
        let mut ctx = GenerationContext::new(&catalog, &mut rng);

        let rewards = generate_reward(&mut ctx, level, difficulty, trader, &config, base, &[]).unwrap();
        prop_assert!(rewards.fail.is_empty());
        for (position, reward) in rewards.success.iter().enumerate() {
            prop_assert_eq!(reward.index as usize, position);
        }
        let mut ids: Vec<&str> = rewards.success.iter().map(|r| r.id.as_str()).collect();
        ids.sort_unstable();
        ids.dedup();
        prop_assert_eq!(ids.len(), rewards.success.len());

        // Currency is always paid, right after experience when there is any
        let currency = rewards.success.iter().position(|r| r.reward_type == RewardType::Currency);
        prop_assert!(currency.is_some());
        prop_assert!(currency.unwrap() <= 1);
    }

    /// Blacklisted items never appear in rewards
    #[test]
    fn prop_blacklist_respected(level in 1u32..60, seed in any::<u64>()) {
        let catalog = test_catalog();
        let config = test_config();
        let base = &config.quest_config.completion.base;
        let blacklist: Vec<String> = config.reward_blacklist.clone();
        let mut rng = StdRng::seed_from_u64(seed);
        let mut ctx = GenerationContext::new(&catalog, &mut rng);

        let rewards = generate_reward(&mut ctx, level, 1.0, PRAPOR, &config, base, &[]).unwrap();
        for reward in rewards.success_of(RewardType::Item) {
            prop_assert!(reward.items.iter().all(|item| !blacklist.contains(&item.tpl)));
        }
    }
}
