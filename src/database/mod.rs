//! Read-only collaborators: prices, item templates and locations
//!
//! The engine never owns item data. Generators see it through the three
//! service traits below; `Catalog` is an in-memory implementation loaded
//! from JSON.

mod catalog;

pub use catalog::*;

use serde::{Deserialize, Serialize};

use crate::config::Side;

/// Well-known base-class template ids
pub mod base_class {
    pub const ITEM: &str = "54009119af1c881c07000029";
    pub const WEAPON: &str = "5422acb9af1c889c16000029";
    pub const ARMORED_EQUIPMENT: &str = "57bef4c42459772e8d35a53b";
    pub const AMMO: &str = "5485a8684bdc2da71d8b4567";
    pub const MONEY: &str = "543be5dd4bdc2dbc028b4568";
}

/// Template id of the GP coin reward
pub const GP_COIN_TPL: &str = "5d235b4d86f7742e017bc88a";

/// Currencies a quest can pay out in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
pub enum Currency {
    Roubles,
    Euros,
    Dollars,
}

impl Currency {
    pub const fn tpl(self) -> &'static str {
        match self {
            Currency::Roubles => "5449016a4bdc2d6f028b456f",
            Currency::Euros => "569668774bdc2da2298b4568",
            Currency::Dollars => "5696686a4bdc2da3298b456a",
        }
    }
}

/// An item template as the engine needs to see it
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemTemplate {
    pub id: String,
    #[serde(default)]
    pub name: String,
    pub parent: String,
    #[serde(default)]
    pub price: f64,
    #[serde(default = "default_stack_max_size")]
    pub stack_max_size: u32,
    #[serde(default)]
    pub quest_item: bool,
    #[serde(default)]
    pub boss_item: bool,
    #[serde(default)]
    pub seasonal_inactive: bool,
}

fn default_stack_max_size() -> u32 {
    1
}

/// One item of a weapon preset's item tree
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PresetItem {
    pub id: String,
    pub tpl: String,
    #[serde(default)]
    pub parent_id: Option<String>,
    #[serde(default)]
    pub slot_id: Option<String>,
}

/// A default weapon build: root weapon plus attached parts
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WeaponPreset {
    pub id: String,
    /// Template id of the root weapon
    pub encyclopedia: String,
    pub items: Vec<PresetItem>,
}

/// A map exit
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LocationExit {
    pub name: String,
    pub side: Side,
    /// Spawn chance in percent
    pub chance: f64,
    #[serde(default)]
    pub passage_requirement: Option<String>,
}

/// Price and currency lookups
pub trait PriceService {
    /// Handbook price in roubles
    fn price(&self, tpl: &str) -> Option<f64>;

    /// Aggregate price of every item in a preset
    fn preset_price(&self, preset: &WeaponPreset) -> f64 {
        preset.items.iter().filter_map(|item| self.price(&item.tpl)).sum()
    }

    /// Convert a rouble amount, rounding to whole units and never below 1
    fn convert_from_roubles(&self, roubles: f64, currency: Currency) -> f64 {
        if currency == Currency::Roubles {
            return roubles;
        }
        match self.price(currency.tpl()) {
            Some(rate) if rate > 0.0 => (roubles / rate).round().max(1.0),
            _ => 0.0,
        }
    }
}

/// Item template and validity lookups
pub trait ItemService {
    fn item(&self, tpl: &str) -> Option<&ItemTemplate>;

    /// Every concrete item, in a stable order
    fn reward_candidates(&self) -> Vec<&ItemTemplate>;

    /// True when `tpl` is `base` or derives from it
    fn is_of_base_class(&self, tpl: &str, base: &str) -> bool;

    fn is_of_any_base_class(&self, tpl: &str, bases: &[String]) -> bool {
        bases.iter().any(|base| self.is_of_base_class(tpl, base))
    }

    /// Concrete, priced, non-quest item that is not money
    fn is_valid_reward_item(&self, tpl: &str) -> bool;

    fn is_boss_item(&self, tpl: &str) -> bool;

    fn is_seasonal_inactive(&self, tpl: &str) -> bool;

    /// Concrete items deriving from `base`, in a stable order
    fn item_tpls_of_base_class(&self, base: &str) -> Vec<String>;

    fn weapon_presets(&self) -> &[WeaponPreset];
}

/// Map lookups
pub trait LocationService {
    fn exits(&self, location: &str, side: Side) -> Vec<LocationExit>;

    /// Locations the boss spawns on
    fn boss_spawn_locations(&self, boss: &str) -> Vec<String>;
}

/// Everything a generator reads from the outside world
pub trait Database: PriceService + ItemService + LocationService {}

impl<T: PriceService + ItemService + LocationService + ?Sized> Database for T {}
