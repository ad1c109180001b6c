//! SkyBlock skills and collections of a profile.
//!
//! Both helpers combine profile data with a resource listing: the thresholds
//! come from `resources/skyblock/skills` and `resources/skyblock/collections`,
//! so the calculations follow the game as Hypixel updates it.

use std::collections::{HashMap, HashSet};

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::HypixelError;

/// One skill of the skills resource.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SkillResource {
    pub name: String,
    pub description: String,
    pub max_level: u32,
    pub levels: Vec<SkillLevel>,
}

/// One level threshold of a skill.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SkillLevel {
    pub level: u32,
    pub total_exp_required: f64,
}

/// A profile member's progress in one skill.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SkillInfo {
    pub name: String,
    pub description: String,
    pub level: u32,
    pub exp: f64,
    pub total_exp_to_level: f64,
    /// Experience still missing for the next level; zero once maxed.
    pub exp_to_next_level: f64,
    pub max_level: u32,
}

/// Skill levels of a profile member, keyed like the resource (e.g. `FARMING`)
/// and in the resource's order.
///
/// `skills` is the `skills` field of the skills resource. Returns `None` when
/// the member exposes no `experience_skill_*` field at all, which happens when
/// the player disabled the skills API.
pub fn profile_member_skills(
    member: &Value,
    skills: &IndexMap<String, SkillResource>,
) -> Option<IndexMap<String, SkillInfo>> {
    let mut has_api = false;
    let mut result = IndexMap::new();

    for (id, skill) in skills {
        let field = format!("experience_skill_{}", id.to_lowercase());
        let exp = match member.get(&field) {
            Some(value) => {
                has_api = true;
                value.as_f64().unwrap_or(0.0)
            }
            None => 0.0,
        };

        let mut level = 0;
        let mut total_exp_to_level = 0.0;
        let mut exp_to_next_level = 0.0;
        for threshold in &skill.levels {
            if threshold.total_exp_required > exp {
                exp_to_next_level = threshold.total_exp_required - exp;
                break;
            }
            level = threshold.level;
            total_exp_to_level = threshold.total_exp_required;
        }

        result.insert(
            id.clone(),
            SkillInfo {
                name: skill.name.clone(),
                description: skill.description.clone(),
                level,
                exp,
                total_exp_to_level,
                exp_to_next_level,
                max_level: skill.max_level,
            },
        );
    }

    has_api.then_some(result)
}

/// One collection group of the collections resource (e.g. `FARMING`).
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CollectionGroupResource {
    pub name: String,
    pub items: IndexMap<String, CollectionResource>,
}

/// One collection of the collections resource.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CollectionResource {
    pub name: String,
    pub max_tiers: u32,
    pub tiers: Vec<CollectionTier>,
}

/// One tier of a collection.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CollectionTier {
    pub tier: u32,
    #[serde(default)]
    pub amount_required: f64,
}

/// A profile's progress in one collection group.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileCollectionGroup {
    pub id: String,
    pub name: String,
    /// Percentage of the group's collections at their maximum tier.
    pub progress: f64,
    pub maxed_child_collections: u32,
    pub total_collections: u32,
    pub children: Vec<CollectionProgress>,
}

/// A profile's progress in one collection.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CollectionProgress {
    pub id: String,
    pub name: String,
    pub tier: u32,
    pub max_tier: u32,
    /// Amount collected by every member with the collections API enabled.
    pub amount: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_tier: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_tier_amount_required: Option<f64>,
    /// Percentage toward the next tier, 100 once maxed.
    pub progress: f64,
}

/// Collection progress of a whole profile.
///
/// Amounts and unlocked tiers are merged across every member of the profile.
/// Groups and their collections keep the resource's order.
/// `collections` is the `collections` field of the collections resource.
/// Returns `None` when no member has an unlocked tier, which happens when
/// every member disabled the collections API.
pub fn profile_collections(
    profile: &Value,
    collections: &IndexMap<String, CollectionGroupResource>,
) -> Result<Option<Vec<ProfileCollectionGroup>>, HypixelError> {
    let members = profile
        .get("members")
        .and_then(Value::as_object)
        .ok_or_else(|| HypixelError::MissingField("members".into()))?;

    let mut unlocked: HashSet<&str> = HashSet::new();
    let mut amounts: HashMap<&str, f64> = HashMap::new();
    for member in members.values() {
        if let Some(tiers) = member
            .get("player_data")
            .and_then(|data| data.get("unlocked_coll_tiers"))
            .and_then(Value::as_array)
        {
            unlocked.extend(tiers.iter().filter_map(Value::as_str));
        }
        if let Some(collection) = member.get("collection").and_then(Value::as_object) {
            for (id, amount) in collection {
                *amounts.entry(id.as_str()).or_default() += amount.as_f64().unwrap_or(0.0);
            }
        }
    }

    if unlocked.is_empty() {
        return Ok(None);
    }

    let groups = collections
        .iter()
        .map(|(group_id, group)| {
            let children: Vec<CollectionProgress> = group
                .items
                .iter()
                .map(|(id, collection)| collection_progress(id, collection, &unlocked, &amounts))
                .collect();
            let total = children.len() as u32;
            let maxed = children.iter().filter(|c| c.next_tier.is_none()).count() as u32;

            ProfileCollectionGroup {
                id: group_id.clone(),
                name: group.name.clone(),
                progress: if total == 0 {
                    0.0
                } else {
                    f64::from(maxed) / f64::from(total) * 100.0
                },
                maxed_child_collections: maxed,
                total_collections: total,
                children,
            }
        })
        .collect();

    Ok(Some(groups))
}

fn collection_progress(
    id: &str,
    collection: &CollectionResource,
    unlocked: &HashSet<&str>,
    amounts: &HashMap<&str, f64>,
) -> CollectionProgress {
    let amount = amounts.get(id).copied().unwrap_or(0.0);
    let tier = collection
        .tiers
        .iter()
        .filter(|t| unlocked.contains(format!("{}_{}", id, t.tier).as_str()) || amount > t.amount_required)
        .map(|t| t.tier)
        .last()
        .unwrap_or(0);

    let mut progress = CollectionProgress {
        id: id.to_string(),
        name: collection.name.clone(),
        tier,
        max_tier: collection.max_tiers,
        amount,
        next_tier: None,
        next_tier_amount_required: None,
        progress: 100.0,
    };

    if tier != collection.max_tiers {
        let next_tier = tier + 1;
        let required = collection
            .tiers
            .iter()
            .find(|t| t.tier == next_tier)
            .map_or(0.0, |t| t.amount_required);
        progress.next_tier = Some(next_tier);
        progress.next_tier_amount_required = Some(required);
        progress.progress = if required > 0.0 { amount / required * 100.0 } else { 0.0 };
    }

    progress
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn skills() -> IndexMap<String, SkillResource> {
        serde_json::from_value(json!({
            "FARMING": {
                "name": "Farming",
                "description": "Harvest crops and shear sheep to earn Farming XP!",
                "maxLevel": 3,
                "levels": [
                    {"level": 1, "totalExpRequired": 50.0},
                    {"level": 2, "totalExpRequired": 175.0},
                    {"level": 3, "totalExpRequired": 375.0}
                ]
            },
            "MINING": {
                "name": "Mining",
                "description": "Dive into deep caves and find rare ores and valuable materials to earn Mining XP!",
                "maxLevel": 2,
                "levels": [
                    {"level": 1, "totalExpRequired": 50.0},
                    {"level": 2, "totalExpRequired": 175.0}
                ]
            }
        }))
        .unwrap()
    }

    #[test]
    fn test_member_skills() {
        let member = json!({"experience_skill_farming": 200.0, "experience_skill_mining": 1000});
        let result = profile_member_skills(&member, &skills()).unwrap();

        let farming = &result["FARMING"];
        assert_eq!(farming.level, 2);
        assert_eq!(farming.total_exp_to_level, 175.0);
        assert_eq!(farming.exp_to_next_level, 175.0);
        assert_eq!(farming.max_level, 3);

        let mining = &result["MINING"];
        assert_eq!(mining.level, 2);
        assert_eq!(mining.exp_to_next_level, 0.0);
    }

    #[test]
    fn test_member_skills_keep_resource_order() {
        let skills: IndexMap<String, SkillResource> = serde_json::from_str(
            r#"{
                "MINING": {"name": "Mining", "description": "", "maxLevel": 1, "levels": []},
                "COMBAT": {"name": "Combat", "description": "", "maxLevel": 1, "levels": []},
                "FARMING": {"name": "Farming", "description": "", "maxLevel": 1, "levels": []}
            }"#,
        )
        .unwrap();
        let member = json!({"experience_skill_combat": 10});

        let result = profile_member_skills(&member, &skills).unwrap();
        let order: Vec<&str> = result.keys().map(String::as_str).collect();
        assert_eq!(order, ["MINING", "COMBAT", "FARMING"]);
    }

    #[test]
    fn test_member_without_skills_api() {
        let member = json!({"coin_purse": 100});
        assert!(profile_member_skills(&member, &skills()).is_none());
    }

    fn collections() -> IndexMap<String, CollectionGroupResource> {
        serde_json::from_value(json!({
            "FARMING": {
                "name": "Farming",
                "items": {
                    "WHEAT": {
                        "name": "Wheat",
                        "maxTiers": 3,
                        "tiers": [
                            {"tier": 1, "amountRequired": 50},
                            {"tier": 2, "amountRequired": 100},
                            {"tier": 3, "amountRequired": 250}
                        ]
                    },
                    "CARROT_ITEM": {
                        "name": "Carrot",
                        "maxTiers": 2,
                        "tiers": [
                            {"tier": 1, "amountRequired": 100},
                            {"tier": 2, "amountRequired": 250}
                        ]
                    }
                }
            }
        }))
        .unwrap()
    }

    #[test]
    fn test_profile_collections_merge_members() {
        let profile = json!({
            "members": {
                "a": {
                    "player_data": {"unlocked_coll_tiers": ["WHEAT_1", "CARROT_ITEM_2"]},
                    "collection": {"WHEAT": 40, "CARROT_ITEM": 300}
                },
                "b": {
                    "collection": {"WHEAT": 80}
                }
            }
        });

        let groups = profile_collections(&profile, &collections()).unwrap().unwrap();
        assert_eq!(groups.len(), 1);
        let farming = &groups[0];
        assert_eq!(farming.total_collections, 2);
        assert_eq!(farming.maxed_child_collections, 1);
        assert_eq!(farming.progress, 50.0);

        let carrot = farming.children.iter().find(|c| c.id == "CARROT_ITEM").unwrap();
        assert_eq!(carrot.tier, 2);
        assert_eq!(carrot.next_tier, None);
        assert_eq!(carrot.progress, 100.0);

        let wheat = farming.children.iter().find(|c| c.id == "WHEAT").unwrap();
        assert_eq!(wheat.amount, 120.0);
        assert_eq!(wheat.tier, 2);
        assert_eq!(wheat.next_tier, Some(3));
        assert_eq!(wheat.next_tier_amount_required, Some(250.0));
        assert!((wheat.progress - 48.0).abs() < 1e-9);
    }

    #[test]
    fn test_profile_collections_keep_resource_order() {
        let collections: IndexMap<String, CollectionGroupResource> = serde_json::from_str(
            r#"{
                "MINING": {"name": "Mining", "items": {
                    "COBBLESTONE": {"name": "Cobblestone", "maxTiers": 0, "tiers": []},
                    "COAL": {"name": "Coal", "maxTiers": 0, "tiers": []}
                }},
                "FARMING": {"name": "Farming", "items": {}}
            }"#,
        )
        .unwrap();
        let profile = json!({"members": {"a": {"player_data": {"unlocked_coll_tiers": ["COAL_1"]}}}});

        let groups = profile_collections(&profile, &collections).unwrap().unwrap();
        let group_ids: Vec<&str> = groups.iter().map(|g| g.id.as_str()).collect();
        assert_eq!(group_ids, ["MINING", "FARMING"]);
        let child_ids: Vec<&str> = groups[0].children.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(child_ids, ["COBBLESTONE", "COAL"]);
    }

    #[test]
    fn test_profile_without_collections_api() {
        let profile = json!({"members": {"a": {"collection": {"WHEAT": 40}}}});
        assert_eq!(profile_collections(&profile, &collections()).unwrap(), None);
    }

    #[test]
    fn test_profile_without_members() {
        assert!(matches!(
            profile_collections(&json!({}), &collections()),
            Err(HypixelError::MissingField(_))
        ));
    }
}
