//! Shared test fixtures: a daily configuration and a small item catalog

use crate::config::RepeatableConfig;
use crate::database::Catalog;

pub const PRAPOR: &str = "54cb50c76803fa8b248b4571";
pub const THERAPIST: &str = "54cb57776803fa99248b456e";
pub const PEACEKEEPER: &str = "5935c25fb3acc3127c3d8cd9";
pub const FENCE: &str = "579dc571d53a0658a154fbec";

pub const ASSAULT_RIFLE_CLASS: &str = "5447b5f14bdc2d61278b4567";
pub const PISTOL_CLASS: &str = "5447b5cf4bdc2d65278b4567";
pub const SHOTGUN_CLASS: &str = "5447b6094bdc2dc3278b4567";
pub const MARKSMAN_CLASS: &str = "5447b6194bdc2d67278b4567";
pub const BARTER_CLASS: &str = "5448eb774bdc2d0a728b4567";
pub const MEDS_CLASS: &str = "543be5664bdc2dd4348b4569";
pub const MODS_CLASS: &str = "5448fe124bdc2da5018b4567";
pub const BACKPACK_CLASS: &str = "5448e53e4bdc2d60728b4567";

pub const BARTER_CHEAP: &str = "5734758f24597738025ee253";
pub const BARTER_MID: &str = "59e3639286f7741777737013";
pub const SALEWA: &str = "544fb45d4bdc2dee738b4568";
pub const GRIZZLY: &str = "590c657e86f77412b013051d";
pub const ARMOR: &str = "5c0e5edb86f77461f55ed1f7";
pub const AK_RIFLE: &str = "5bf3e03b0db834001d2c4a9c";
pub const AK_STOCK: &str = "5649b0544bdc2d1b2b8b458a";
pub const AK_MAG: &str = "55d480c04bdc2d1d4e8b456a";
pub const PM_PISTOL: &str = "5448bd6b4bdc2dfc2f8b4569";
pub const PM_MAG: &str = "5448c12b4bdc2d02308b456f";
pub const MP133: &str = "54491c4f4bdc2db1078b4568";
pub const SVD: &str = "5c46fbd72e2216398b5a8c9c";
pub const AMMO_545: &str = "56dff3afd2720bba668b4567";
pub const AMMO_9X18: &str = "573719762459775a626ccbc1";
pub const QUEST_ITEM: &str = "590c62a386f77412b0130255";
pub const BOSS_ITEM: &str = "5c0530ee86f774697952d952";
pub const SEASONAL_ITEM: &str = "5df8a6a186f77412640e2e80";
pub const BLACKLISTED_ITEM: &str = "5c94bbff86f7747ee735c08f";
pub const BACKPACK: &str = "5ab8ebf186f7742d8b372e80";

const CONFIG_JSON: &str = include_str!("../tests/data/daily_config.json");

const CATALOG_JSON: &str = include_str!("../tests/data/catalog.json");

pub fn config_json() -> String {
    CONFIG_JSON.to_string()
}

pub fn catalog_json() -> String {
    CATALOG_JSON.to_string()
}

pub fn test_config() -> RepeatableConfig {
    RepeatableConfig::from_json(CONFIG_JSON).expect("fixture config is valid")
}

pub fn test_catalog() -> Catalog {
    Catalog::from_json(CATALOG_JSON).expect("fixture catalog is valid")
}
