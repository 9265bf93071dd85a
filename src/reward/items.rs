//! Budget-constrained reward item selection

use ahash::AHashMap;
use tracing::debug;

use crate::config::{ItemSelection, RepeatableConfig, TraderWhitelist};
use crate::context::GenerationContext;
use crate::database::{base_class, Database, ItemService, ItemTemplate, PriceService, WeaponPreset};
use crate::quest::RewardItem;

/// Items above this price never get a stack multiplier
const STACKABLE_PRICE_LIMIT: f64 = 70_000.0;
/// Chance for an eligible item to be handed out as a stack
const STACK_INCREASE_CHANCE: f64 = 0.25;
/// Cap on the lower price bound of the preferred candidate band
const MIN_PRICE_CAP: f64 = 25_000.0;
const AMMO_STACK_CAP: u32 = 100;

/// A reward item candidate and its unit price in roubles
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Candidate<'a> {
    pub item: &'a ItemTemplate,
    pub price: f64,
}

/// An item chosen for a reward
#[derive(Debug, Clone, PartialEq)]
pub struct SelectedItem {
    pub tpl: String,
    pub stack_count: u32,
    pub unit_price: f64,
}

impl SelectedItem {
    pub fn total_price(&self) -> f64 {
        self.unit_price * f64::from(self.stack_count)
    }
}

/// Every item a trader may give as a reward, in catalog order
///
/// Excludes invalid reward items, blacklisted ids (from the configuration and
/// `extra_blacklist`), blacklisted base classes, boss items and inactive
/// seasonal items. When the trader has a base-class whitelist, only items
/// deriving from one of its classes remain.
pub fn reward_item_pool<'a>(
    db: &'a dyn Database,
    config: &RepeatableConfig,
    whitelist: &TraderWhitelist,
    extra_blacklist: &[String],
) -> Vec<Candidate<'a>> {
    db.reward_candidates()
        .into_iter()
        .filter(|item| db.is_valid_reward_item(&item.id))
        .filter(|item| !config.reward_blacklist.contains(&item.id))
        .filter(|item| !extra_blacklist.contains(&item.id))
        .filter(|item| !db.is_of_any_base_class(&item.id, &config.reward_base_type_blacklist))
        .filter(|item| !db.is_boss_item(&item.id) && !db.is_seasonal_inactive(&item.id))
        .filter(|item| {
            whitelist.reward_base_whitelist.is_empty()
                || db.is_of_any_base_class(&item.id, &whitelist.reward_base_whitelist)
        })
        .filter_map(|item| db.price(&item.id).map(|price| Candidate { item, price }))
        .collect()
}

/// Candidates affordable with `budget`, preferring the band above
/// `min(25000, budget / 2)` and falling back to anything cheaper than the
/// budget when that band is empty
pub fn within_budget<'a>(pool: &[Candidate<'a>], budget: f64) -> Vec<Candidate<'a>> {
    let min_price = MIN_PRICE_CAP.min(0.5 * budget);
    let preferred: Vec<Candidate<'a>> = pool
        .iter()
        .filter(|c| c.price > min_price && c.price < budget)
        .copied()
        .collect();
    if !preferred.is_empty() {
        return preferred;
    }
    pool.iter().filter(|c| c.price < budget).copied().collect()
}

/// Stack size for an ammo reward: the per-item share of the budget in
/// rounds, kept within `[1, min(max_stack, 100)]`
pub fn ammo_stack_size(budget: f64, num_items: u32, unit_price: f64, max_stack: u32) -> u32 {
    let cap = max_stack.clamp(1, AMMO_STACK_CAP);
    if unit_price <= 0.0 || num_items == 0 {
        return 1;
    }
    let rounds = ((budget / f64::from(num_items)) / unit_price).round();
    if rounds.is_nan() || rounds < 1.0 {
        return 1;
    }
    (rounds.min(f64::from(cap))) as u32
}

/// Whether an item may be handed out as a multi-item stack
pub fn can_increase_stack(db: &dyn Database, item: &ItemTemplate, price: f64) -> bool {
    price < STACKABLE_PRICE_LIMIT
        && !db.is_of_base_class(&item.id, base_class::WEAPON)
        && !db.is_of_base_class(&item.id, base_class::ARMORED_EQUIPMENT)
        && !db.is_of_base_class(&item.id, base_class::AMMO)
}

/// Random stack multiplier for a stackable item
pub fn stack_multiplier(ctx: &mut GenerationContext<'_>, price: f64) -> u32 {
    let choices: &[u32] = if price < 3_000.0 {
        &[2, 3, 4]
    } else if price < 10_000.0 {
        &[2, 3]
    } else {
        &[2, 3, 4]
    };
    ctx.rand_index(choices.len())
        .map(|i| choices[i])
        .unwrap_or(1)
}

/// Pick up to `num_items` distinct items whose total price stays within
/// `budget`.
///
/// Ammo that cannot stack to `rewardAmmoStackMinSize` is skipped without
/// using up a slot. Every stack is capped so the running total never
/// exceeds the budget. With `ItemSelection::Single` the loop ends after the
/// first item.
pub fn select_reward_items(
    ctx: &mut GenerationContext<'_>,
    pool: &[Candidate<'_>],
    budget: f64,
    num_items: u32,
    config: &RepeatableConfig,
) -> Vec<SelectedItem> {
    let db = ctx.database();
    let mut remaining = budget;
    let mut candidates = within_budget(pool, remaining);
    let mut selected = Vec::new();
    let mut slots = num_items;

    while slots > 0 && remaining > 0.0 {
        let Some(index) = ctx.rand_index(candidates.len()) else {
            break;
        };
        let Candidate { item, price } = candidates.remove(index);

        let wanted = if db.is_of_base_class(&item.id, base_class::AMMO) {
            if item.stack_max_size < config.reward_ammo_stack_min_size {
                debug!(tpl = %item.id, "Skipping ammo below minimum reward stack size");
                continue;
            }
            ammo_stack_size(budget, num_items, price, item.stack_max_size)
        } else if can_increase_stack(db, item, price) && ctx.roll(STACK_INCREASE_CHANCE) {
            stack_multiplier(ctx, price)
        } else {
            1
        };

        let affordable = ((remaining / price).floor() as u32).max(1);
        let stack_count = wanted.min(affordable);

        remaining -= price * f64::from(stack_count);
        selected.push(SelectedItem {
            tpl: item.id.clone(),
            stack_count,
            unit_price: price,
        });
        slots -= 1;

        if config.item_selection == ItemSelection::Single {
            break;
        }
        candidates = within_budget(&candidates, remaining);
    }

    selected
}

/// Draw presets without replacement until one fits within `budget`
pub fn pick_weapon_preset<'a>(
    ctx: &mut GenerationContext<'_>,
    presets: impl IntoIterator<Item = &'a WeaponPreset>,
    budget: f64,
) -> Option<(&'a WeaponPreset, f64)> {
    let db = ctx.database();
    let mut remaining: Vec<&WeaponPreset> = presets.into_iter().collect();
    while let Some(index) = ctx.rand_index(remaining.len()) {
        let preset = remaining.swap_remove(index);
        let price = db.preset_price(preset);
        if price > 0.0 && price <= budget {
            return Some((preset, price));
        }
    }
    None
}

/// Copy a preset's item tree with fresh ids, keeping parent links intact.
/// The root weapon comes first.
pub fn preset_reward_items(ctx: &mut GenerationContext<'_>, preset: &WeaponPreset) -> Vec<RewardItem> {
    let remapped: AHashMap<&str, String> = preset
        .items
        .iter()
        .map(|item| (item.id.as_str(), ctx.new_id()))
        .collect();

    let mut items: Vec<RewardItem> = preset
        .items
        .iter()
        .filter_map(|item| {
            let id = remapped.get(item.id.as_str())?.clone();
            let parent_id = item
                .parent_id
                .as_deref()
                .and_then(|parent| remapped.get(parent).cloned());
            let slot_id = parent_id.as_ref().and(item.slot_id.clone());
            Some(RewardItem {
                id,
                tpl: item.tpl.clone(),
                stack_count: 1,
                parent_id,
                slot_id,
            })
        })
        .collect();

    // Root first, whatever the preset order
    if let Some(root) = items.iter().position(|i| i.parent_id.is_none()) {
        items.swap(0, root);
    }
    items
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::{self, test_catalog, test_config};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn prapor(config: &RepeatableConfig) -> &TraderWhitelist {
        config.trader_whitelist(fixtures::PRAPOR).unwrap()
    }

    #[test]
    fn test_pool_excludes_blacklisted_and_flagged_items() {
        let catalog = test_catalog();
        let config = test_config();
        let pool = reward_item_pool(&catalog, &config, prapor(&config), &[]);
        let ids: Vec<&str> = pool.iter().map(|c| c.item.id.as_str()).collect();

        assert!(ids.contains(&fixtures::BARTER_CHEAP));
        assert!(!ids.contains(&fixtures::QUEST_ITEM));
        assert!(!ids.contains(&fixtures::BOSS_ITEM));
        assert!(!ids.contains(&fixtures::SEASONAL_ITEM));
        assert!(!ids.contains(&fixtures::BLACKLISTED_ITEM));

        let extra = vec![fixtures::BARTER_CHEAP.to_string()];
        let pool = reward_item_pool(&catalog, &config, prapor(&config), &extra);
        assert!(!pool.iter().any(|c| c.item.id == fixtures::BARTER_CHEAP));
    }

    #[test]
    fn test_pool_respects_trader_base_whitelist() {
        let catalog = test_catalog();
        let config = test_config();
        let therapist = config.trader_whitelist(fixtures::THERAPIST).unwrap();
        let pool = reward_item_pool(&catalog, &config, therapist, &[]);
        assert!(!pool.is_empty());
        assert!(pool
            .iter()
            .all(|c| catalog.is_of_any_base_class(&c.item.id, &therapist.reward_base_whitelist)));
    }

    #[test]
    fn test_within_budget_prefers_band_then_relaxes() {
        let catalog = test_catalog();
        let config = test_config();
        let pool = reward_item_pool(&catalog, &config, prapor(&config), &[]);

        let band = within_budget(&pool, 20_000.0);
        assert!(!band.is_empty());
        assert!(band.iter().all(|c| c.price > 10_000.0 && c.price < 20_000.0));

        // Nothing lies in (750, 1500), so the band relaxes to anything cheaper
        let relaxed = within_budget(&pool, 1_500.0);
        assert!(!relaxed.is_empty());
        assert!(relaxed.iter().all(|c| c.price < 1_500.0));

        assert!(within_budget(&pool, 1.0).is_empty());
    }

    #[test]
    fn test_ammo_stack_size() {
        assert_eq!(ammo_stack_size(10_000.0, 2, 100.0, 60), 50);
        assert_eq!(ammo_stack_size(100_000.0, 1, 100.0, 60), 60);
        assert_eq!(ammo_stack_size(100_000.0, 1, 10.0, 500), 100);
        assert_eq!(ammo_stack_size(10.0, 1, 100.0, 60), 1);
    }

    #[test]
    fn test_can_increase_stack() {
        let catalog = test_catalog();
        let barter = catalog.item(fixtures::BARTER_CHEAP).unwrap();
        let ammo = catalog.item(fixtures::AMMO_545).unwrap();
        let rifle = catalog.item(fixtures::AK_RIFLE).unwrap();
        assert!(can_increase_stack(&catalog, barter, 2_000.0));
        assert!(!can_increase_stack(&catalog, barter, 80_000.0));
        assert!(!can_increase_stack(&catalog, ammo, 100.0));
        assert!(!can_increase_stack(&catalog, rifle, 40_000.0));
    }

    #[test]
    fn test_stack_multiplier_choices() {
        let catalog = test_catalog();
        let mut rng = StdRng::seed_from_u64(8);
        let mut ctx = GenerationContext::new(&catalog, &mut rng);
        for _ in 0..100 {
            assert!((2..=4).contains(&stack_multiplier(&mut ctx, 1_000.0)));
            assert!((2..=3).contains(&stack_multiplier(&mut ctx, 5_000.0)));
            assert!((2..=4).contains(&stack_multiplier(&mut ctx, 20_000.0)));
        }
    }

    #[test]
    fn test_single_selection_stops_after_one() {
        let catalog = test_catalog();
        let config = test_config();
        let pool = reward_item_pool(&catalog, &config, prapor(&config), &[]);
        let mut rng = StdRng::seed_from_u64(12);
        let mut ctx = GenerationContext::new(&catalog, &mut rng);

        let selected = select_reward_items(&mut ctx, &pool, 50_000.0, 3, &config);
        assert_eq!(selected.len(), 1);
        assert!(selected[0].total_price() <= 50_000.0);
    }

    #[test]
    fn test_multiple_selection_within_budget() {
        let catalog = test_catalog();
        let mut config = test_config();
        config.item_selection = ItemSelection::Multiple;
        let pool = reward_item_pool(&catalog, &config, prapor(&config), &[]);

        for seed in 0..30 {
            let mut rng = StdRng::seed_from_u64(seed);
            let mut ctx = GenerationContext::new(&catalog, &mut rng);
            let selected = select_reward_items(&mut ctx, &pool, 60_000.0, 4, &config);
            let total: f64 = selected.iter().map(SelectedItem::total_price).sum();
            assert!(total <= 60_000.0, "seed {seed}: {total}");
            assert!(selected.len() <= 4);
            let mut tpls: Vec<&str> = selected.iter().map(|s| s.tpl.as_str()).collect();
            tpls.sort_unstable();
            tpls.dedup();
            assert_eq!(tpls.len(), selected.len());
        }
    }

    #[test]
    fn test_preset_fits_budget() {
        let catalog = test_catalog();
        let mut rng = StdRng::seed_from_u64(2);
        let mut ctx = GenerationContext::new(&catalog, &mut rng);
        let presets = catalog.weapon_presets();

        let (preset, price) = pick_weapon_preset(&mut ctx, presets, 1_000_000.0).unwrap();
        assert!(price <= 1_000_000.0);
        assert_eq!(price, catalog.preset_price(preset));
        assert!(pick_weapon_preset(&mut ctx, presets, 100.0).is_none());
    }

    #[test]
    fn test_preset_items_remapped() {
        let catalog = test_catalog();
        let mut rng = StdRng::seed_from_u64(2);
        let mut ctx = GenerationContext::new(&catalog, &mut rng);
        let preset = &catalog.weapon_presets()[0];

        let items = preset_reward_items(&mut ctx, preset);
        assert_eq!(items.len(), preset.items.len());
        assert!(items[0].parent_id.is_none());
        assert_eq!(items[0].tpl, preset.encyclopedia);
        for child in &items[1..] {
            let parent = child.parent_id.as_deref().unwrap();
            assert!(items.iter().any(|i| i.id == parent));
            assert!(!preset.items.iter().any(|p| p.id == child.id));
        }
    }
}
