//! Level calculators for Hypixel experience values.
//!
//! Every calculator is a pure function over raw experience, with a companion
//! that reads the experience out of an API object (a player, a guild or a
//! SkyBlock profile member).
//!
//! ```rust
//! use hypixel_api_client::leveling::{bedwars_level, network_level};
//!
//! let network = network_level(10_000.0);
//! assert_eq!(network.level, 2);
//!
//! let bedwars = bedwars_level(487_000.0);
//! assert_eq!(bedwars.level, 100);
//! assert_eq!(bedwars.prestige_name, "Iron");
//! ```

mod bedwars;
mod formatting;
mod guild;
mod network;
mod skyblock;
mod skywars;

pub use bedwars::{BedwarsLevelInfo, BedwarsPrestige, bedwars_level, bedwars_level_from_player};
pub use formatting::{MinecraftColor, strip_formatting};
pub use guild::{guild_level, guild_level_from_guild};
pub use network::{exp_to_network_level, network_level, network_level_from_player};
pub use skyblock::{
    CollectionGroupResource, CollectionProgress, CollectionResource, CollectionTier,
    ProfileCollectionGroup, SkillInfo, SkillLevel, SkillResource, profile_collections,
    profile_member_skills,
};
pub use skywars::{skywars_level, skywars_level_from_player, total_exp_to_skywars_level};

use serde::Serialize;
use serde_json::Value;

use crate::error::HypixelError;

/// Level progress derived from an experience total.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LevelInfo {
    /// The whole level reached.
    pub level: u32,
    /// The level plus the fraction of progress toward the next one.
    pub precise_level: f64,
    /// The experience the level was computed from.
    pub current_exp: f64,
    /// Total experience needed to reach `level`.
    pub exp_to_level: f64,
    /// Experience between `level` and the next level.
    pub exp_to_next_level: f64,
    /// Experience still missing for the next level.
    pub remaining_exp_to_next_level: f64,
}

impl LevelInfo {
    fn new(level: u32, current_exp: f64, exp_to_level: f64, next_level_exp: f64) -> Self {
        let exp_to_next_level = next_level_exp - exp_to_level;
        let progress = (current_exp - exp_to_level) / exp_to_next_level;
        Self {
            level,
            precise_level: f64::from(level) + progress,
            current_exp,
            exp_to_level,
            exp_to_next_level,
            remaining_exp_to_next_level: next_level_exp - current_exp,
        }
    }
}

/// Follow `path` through nested objects and read a number.
fn number_at(value: &Value, path: &[&str]) -> Option<f64> {
    path.iter()
        .try_fold(value, |current, key| current.get(key))
        .and_then(Value::as_f64)
}

fn require_number(value: &Value, path: &[&str]) -> Result<f64, HypixelError> {
    number_at(value, path).ok_or_else(|| HypixelError::MissingField(path.join(".")))
}
