//! Guild level.

use serde_json::Value;

use super::{LevelInfo, number_at};

/// Experience needed for each of the first levels. Later levels cost as much
/// as the last entry.
const EXP_NEEDED: [f64; 15] = [
    100_000.0, 150_000.0, 250_000.0, 500_000.0, 750_000.0, 1_000_000.0, 1_250_000.0, 1_500_000.0,
    2_000_000.0, 2_500_000.0, 2_500_000.0, 2_500_000.0, 2_500_000.0, 2_500_000.0, 3_000_000.0,
];

/// Guild level for an experience total. Negative experience counts as zero.
pub fn guild_level(exp: f64) -> LevelInfo {
    let current_exp = exp.max(0.0);
    let max_needed = EXP_NEEDED[EXP_NEEDED.len() - 1];

    let mut remaining = current_exp;
    let mut level = 0u32;
    let mut needed = 0.0;
    let mut next_level_exp = 0.0;
    let mut table = EXP_NEEDED.iter().copied();

    while remaining >= 0.0 {
        needed = table.next().unwrap_or(max_needed);
        next_level_exp += needed;
        remaining -= needed;
        if remaining > 0.0 {
            level += 1;
        }
    }

    LevelInfo::new(level, current_exp, next_level_exp - needed, next_level_exp)
}

/// Guild level of a guild object. Missing `exp` counts as zero.
pub fn guild_level_from_guild(guild: &Value) -> LevelInfo {
    guild_level(number_at(guild, &["exp"]).unwrap_or(0.0))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_fresh_guild() {
        let info = guild_level(0.0);
        assert_eq!(info.level, 0);
        assert_eq!(info.exp_to_level, 0.0);
        assert_eq!(info.exp_to_next_level, 100_000.0);
    }

    #[test]
    fn test_partial_level() {
        let info = guild_level(150_000.0);
        assert_eq!(info.level, 1);
        assert_eq!(info.exp_to_level, 100_000.0);
        assert_eq!(info.exp_to_next_level, 150_000.0);
        assert_eq!(info.remaining_exp_to_next_level, 100_000.0);
        assert!((info.precise_level - 4.0 / 3.0).abs() < 1e-9);
    }

    #[test]
    fn test_beyond_table_repeats_last_entry() {
        let table_total: f64 = EXP_NEEDED.iter().sum();
        let info = guild_level(table_total + 4_500_000.0);
        assert_eq!(info.level, 16);
        assert_eq!(info.exp_to_next_level, 3_000_000.0);
    }

    #[test]
    fn test_from_guild() {
        assert_eq!(guild_level_from_guild(&json!({"exp": 150_000})).level, 1);
        assert_eq!(guild_level_from_guild(&json!({"name": "Mini Squid"})).level, 0);
    }
}
