//! SkyWars level.

use serde_json::Value;

use super::{LevelInfo, require_number};
use crate::error::HypixelError;

const EXP_PER_LEVEL: f64 = 10_000.0;
/// Experience needed for each of the first twelve levels, starting at level 1.
const EASY_LEVELS_EXP: [f64; 12] = [
    0.0, 20.0, 50.0, 80.0, 100.0, 250.0, 500.0, 1_000.0, 1_500.0, 2_500.0, 4_000.0, 5_000.0,
];

/// Total experience needed to reach `level`.
pub fn total_exp_to_skywars_level(level: u32) -> f64 {
    let easy_count = (level as usize).min(EASY_LEVELS_EXP.len());
    let easy: f64 = EASY_LEVELS_EXP[..easy_count].iter().sum();
    let hard_levels = level.saturating_sub(EASY_LEVELS_EXP.len() as u32);
    easy + f64::from(hard_levels) * EXP_PER_LEVEL
}

/// SkyWars level for an experience total.
pub fn skywars_level(exp: f64) -> LevelInfo {
    let easy_levels = EASY_LEVELS_EXP.len() as u32;

    let mut exp_to_level = 0.0;
    let mut level = None;
    for (index, cost) in EASY_LEVELS_EXP.iter().enumerate() {
        if exp < exp_to_level + cost {
            level = Some(index as u32);
            break;
        }
        exp_to_level += cost;
    }

    let level = match level {
        Some(level) => level,
        None => {
            let hard_levels = ((exp - exp_to_level) / EXP_PER_LEVEL).floor() as u32;
            exp_to_level += f64::from(hard_levels) * EXP_PER_LEVEL;
            easy_levels + hard_levels
        }
    };

    let next_cost = EASY_LEVELS_EXP
        .get(level as usize)
        .copied()
        .unwrap_or(EXP_PER_LEVEL);
    LevelInfo::new(level, exp, exp_to_level, exp_to_level + next_cost)
}

/// SkyWars level of a player object, read from `stats.SkyWars.skywars_experience`.
pub fn skywars_level_from_player(player: &Value) -> Result<LevelInfo, HypixelError> {
    let exp = require_number(player, &["stats", "SkyWars", "skywars_experience"])?;
    Ok(skywars_level(exp))
}
