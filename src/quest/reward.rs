//! Reward package of a generated quest

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum RewardType {
    Experience,
    Item,
    TraderStanding,
    Skill,
    /// Currency is an item reward the client displays as money
    Currency,
}

/// One concrete item of an Item or Currency reward
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RewardItem {
    pub id: String,
    pub tpl: String,
    pub stack_count: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub slot_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Reward {
    pub id: String,
    #[serde(rename = "type")]
    pub reward_type: RewardType,
    /// Position in emission order, strictly increasing from 0
    pub index: u32,
    pub value: f64,
    /// Root item id for item rewards, trader id for standing, skill name
    /// for skill rewards
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub items: Vec<RewardItem>,
    pub find_in_raid: bool,
}

impl Reward {
    /// Reward with no item payload
    pub fn scalar(id: String, reward_type: RewardType, index: u32, value: f64) -> Self {
        Self {
            id,
            reward_type,
            index,
            value,
            target: None,
            items: Vec::new(),
            find_in_raid: false,
        }
    }

    /// Item or currency reward; `items[0]` is the root item
    pub fn with_items(id: String, reward_type: RewardType, index: u32, items: Vec<RewardItem>) -> Self {
        let value = items.first().map(|root| f64::from(root.stack_count)).unwrap_or(0.0);
        let target = items.first().map(|root| root.id.clone());
        Self {
            id,
            reward_type,
            index,
            value,
            target,
            items,
            find_in_raid: reward_type == RewardType::Item,
        }
    }

    pub fn root_item(&self) -> Option<&RewardItem> {
        self.items.first()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct QuestRewards {
    pub started: Vec<Reward>,
    pub success: Vec<Reward>,
    pub fail: Vec<Reward>,
}

impl QuestRewards {
    pub fn success_of(&self, reward_type: RewardType) -> impl Iterator<Item = &Reward> {
        self.success.iter().filter(move |r| r.reward_type == reward_type)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_item_reward_targets_root() {
        let items = vec![
            RewardItem {
                id: "a".repeat(24),
                tpl: "5449016a4bdc2d6f028b456f".to_string(),
                stack_count: 1200,
                parent_id: None,
                slot_id: None,
            },
        ];
        let reward = Reward::with_items("b".repeat(24), RewardType::Currency, 1, items);
        assert_eq!(reward.value, 1200.0);
        assert_eq!(reward.target.as_deref(), Some("a".repeat(24).as_str()));
        assert!(!reward.find_in_raid);

        let json = serde_json::to_value(&reward).unwrap();
        assert_eq!(json["type"], "Currency");
        assert_eq!(json["items"][0]["stackCount"], 1200);
        assert!(json["items"][0].get("parentId").is_none());
    }

    #[test]
    fn test_rewards_serialize_pascal_case() {
        let rewards = QuestRewards::default();
        let json = serde_json::to_value(&rewards).unwrap();
        assert!(json.get("Success").is_some());
        assert!(json.get("Started").is_some());
    }
}
