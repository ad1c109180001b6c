//! Network level.
//!
//! The experience needed per level grows linearly, so the total experience
//! for a level is quadratic and the level can be solved for directly.

use serde_json::Value;

use super::{LevelInfo, number_at};

const START: f64 = 10_000.0;
const GROWTH: f64 = 2_500.0;
const REVERSE_PQ_PREFIX: f64 = -(START - 0.5 * GROWTH) / GROWTH;
const REVERSE_CONST: f64 = REVERSE_PQ_PREFIX * REVERSE_PQ_PREFIX;
const GROWTH_DIVIDES_2: f64 = 2.0 / GROWTH;

/// Total experience needed to reach `level`. Fractional levels interpolate.
pub fn exp_to_network_level(level: f64) -> f64 {
    let floored = level.floor();
    let exp_to_floored = (GROWTH * 0.5 * (floored - 2.0) + START) * (floored - 1.0);
    if floored == level {
        return exp_to_floored;
    }
    (exp_to_network_level(floored + 1.0) - exp_to_floored) * level.fract() + exp_to_floored
}

/// Network level for an experience total. Negative experience counts as zero.
pub fn network_level(exp: f64) -> LevelInfo {
    let current_exp = exp.max(0.0);
    let level = (1.0 + REVERSE_PQ_PREFIX + (REVERSE_CONST + GROWTH_DIVIDES_2 * current_exp).sqrt()).floor();

    LevelInfo::new(
        level as u32,
        current_exp,
        exp_to_network_level(level),
        exp_to_network_level(level + 1.0),
    )
}

/// Network level of a player object. Missing `networkExp` counts as zero.
pub fn network_level_from_player(player: &Value) -> LevelInfo {
    network_level(number_at(player, &["networkExp"]).unwrap_or(0.0))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_level_boundaries() {
        assert_eq!(network_level(0.0).level, 1);
        assert_eq!(network_level(9_999.0).level, 1);
        assert_eq!(network_level(10_000.0).level, 2);
        assert_eq!(network_level(22_500.0).level, 3);
    }

    #[test]
    fn test_exp_to_level() {
        assert_eq!(exp_to_network_level(1.0), 0.0);
        assert_eq!(exp_to_network_level(2.0), 10_000.0);
        assert_eq!(exp_to_network_level(3.0), 22_500.0);
        assert_eq!(exp_to_network_level(2.5), 16_250.0);
    }

    #[test]
    fn test_progress() {
        let info = network_level(16_250.0);
        assert_eq!(info.level, 2);
        assert_eq!(info.exp_to_level, 10_000.0);
        assert_eq!(info.exp_to_next_level, 12_500.0);
        assert_eq!(info.remaining_exp_to_next_level, 6_250.0);
        assert!((info.precise_level - 2.5).abs() < 1e-9);
    }

    #[test]
    fn test_negative_exp_clamps() {
        let info = network_level(-50.0);
        assert_eq!(info.level, 1);
        assert_eq!(info.current_exp, 0.0);
    }

    #[test]
    fn test_from_player() {
        assert_eq!(network_level_from_player(&json!({"networkExp": 10_000})).level, 2);
        assert_eq!(network_level_from_player(&json!({})).level, 1);
    }
}
