//! Pickup quests: find a number of items of one type in raid

use super::QuestKind;
use crate::config::{RepeatableConfig, ANY_LOCATION};
use crate::context::GenerationContext;
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
    let pickup = &config.quest_config.pickup;
    let target = ctx
        .rand_index(pickup.item_types.len())
        .map(|i| &pickup.item_types[i])
        .ok_or_else(|| QuestGenError::InvalidConfig("Pickup has no item types".to_string()))?;
    let count = ctx.rand_int_inclusive(
        i64::from(target.min_pickup_count),
        i64::from(target.max_pickup_count),
    ) as u32;

    let location_key = pool.draw_pickup_location(ctx.rng());
    let location = config
        .location(&location_key)
        .ok_or_else(|| QuestGenError::MissingLocationId(location_key.clone()))?;

    let mut quest = Quest::template(ctx, QuestKind::Pickup, trader_id, config.side);
    quest.location = location.quest_location_id.clone();

    let find = quest.conditions.find_item_mut()?;
    find.target = vec![target.item_type.clone()];
    find.value = count;

    let conditions = quest.conditions.counter_conditions_mut()?;
    conditions.push(CounterCondition::Equipment {
        id: ctx.new_id(),
        equipment_inclusive: vec![vec![target.item_type.clone()]],
    });
    if location_key != ANY_LOCATION {
        conditions.push(CounterCondition::Location {
            id: ctx.new_id(),
            target: location.map_ids.clone(),
        });
    }
    quest.conditions.set_counter_value(count)?;

    quest.rewards = generate_reward(ctx, pmc_level, 1.0, trader_id, config, &pickup.base, &[])?;
    Ok(quest)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::{test_catalog, test_config, PRAPOR};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_find_and_counter_agree() {
        let catalog = test_catalog();
        let config = test_config();
        let mut pool = QuestTypePool::for_level(&config, 10);
        let mut rng = StdRng::seed_from_u64(14);
        let mut ctx = GenerationContext::new(&catalog, &mut rng);

        let mut quest = generate(&mut ctx, 10, PRAPOR, &mut pool, &config).unwrap();
        let item_type = {
            let find = quest.conditions.find_item_mut().unwrap();
            let target = config
                .quest_config
                .pickup
                .item_types
                .iter()
                .find(|t| t.item_type == find.target[0])
                .unwrap();
            assert!(find.value >= target.min_pickup_count && find.value <= target.max_pickup_count);
            find.target[0].clone()
        };

        let equipment = quest
            .conditions
            .counter_conditions()
            .iter()
            .find_map(|c| match c {
                CounterCondition::Equipment { equipment_inclusive, .. } => Some(equipment_inclusive),
                _ => None,
            })
            .unwrap();
        assert_eq!(equipment, &vec![vec![item_type]]);
    }

    #[test]
    fn test_empty_location_pool_falls_back_to_any() {
        let catalog = test_catalog();
        let config = test_config();
        let mut pool = QuestTypePool::new(vec![QuestKind::Pickup]);
        let mut rng = StdRng::seed_from_u64(14);
        let mut ctx = GenerationContext::new(&catalog, &mut rng);

        let quest = generate(&mut ctx, 10, PRAPOR, &mut pool, &config).unwrap();
        assert_eq!(quest.location, ANY_LOCATION);
        assert!(!quest
            .conditions
            .counter_conditions()
            .iter()
            .any(|c| matches!(c, CounterCondition::Location { .. })));
    }

    #[test]
    fn test_specific_location_consumed() {
        let catalog = test_catalog();
        let config = test_config();
        let mut pool = QuestTypePool::new(vec![QuestKind::Pickup]);
        pool.add_pickup_location("woods");
        let mut rng = StdRng::seed_from_u64(14);
        let mut ctx = GenerationContext::new(&catalog, &mut rng);

        let quest = generate(&mut ctx, 10, PRAPOR, &mut pool, &config).unwrap();
        assert_eq!(quest.location, config.location("woods").unwrap().quest_location_id);
        assert!(pool.pickup_locations().is_empty());
    }
}
