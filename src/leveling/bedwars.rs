//! BedWars level and prestige.

use serde::Serialize;
use serde_json::Value;

use super::formatting::MinecraftColor;
use super::{number_at, require_number};
use crate::error::HypixelError;

/// Experience of one full prestige (100 levels).
const EXP_PER_PRESTIGE: f64 = 96.0 * 5_000.0 + 7_000.0;
const LEVELS_PER_PRESTIGE: u32 = 100;
const HIGHEST_PRESTIGE: u32 = 10;
/// The first levels of every prestige are cheaper.
const EASY_LEVELS_EXP: [f64; 4] = [500.0, 1_000.0, 2_000.0, 3_500.0];
const EXP_PER_LEVEL: f64 = 5_000.0;

/// A BedWars prestige.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum BedwarsPrestige {
    None,
    Iron,
    Gold,
    Diamond,
    Emerald,
    Sapphire,
    Ruby,
    Crystal,
    Opal,
    Amethyst,
    Rainbow,
}

impl BedwarsPrestige {
    /// The prestige reached at `level`, capped at [`Rainbow`](Self::Rainbow).
    pub fn for_level(level: u32) -> Self {
        match (level / LEVELS_PER_PRESTIGE).min(HIGHEST_PRESTIGE) {
            0 => BedwarsPrestige::None,
            1 => BedwarsPrestige::Iron,
            2 => BedwarsPrestige::Gold,
            3 => BedwarsPrestige::Diamond,
            4 => BedwarsPrestige::Emerald,
            5 => BedwarsPrestige::Sapphire,
            6 => BedwarsPrestige::Ruby,
            7 => BedwarsPrestige::Crystal,
            8 => BedwarsPrestige::Opal,
            9 => BedwarsPrestige::Amethyst,
            _ => BedwarsPrestige::Rainbow,
        }
    }

    /// Prestige number, 0 to 10.
    pub fn index(self) -> u32 {
        self as u32
    }

    /// Display name.
    pub fn name(self) -> &'static str {
        match self {
            BedwarsPrestige::None => "None",
            BedwarsPrestige::Iron => "Iron",
            BedwarsPrestige::Gold => "Gold",
            BedwarsPrestige::Diamond => "Diamond",
            BedwarsPrestige::Emerald => "Emerald",
            BedwarsPrestige::Sapphire => "Sapphire",
            BedwarsPrestige::Ruby => "Ruby",
            BedwarsPrestige::Crystal => "Crystal",
            BedwarsPrestige::Opal => "Opal",
            BedwarsPrestige::Amethyst => "Amethyst",
            BedwarsPrestige::Rainbow => "Rainbow",
        }
    }

    /// Colour of the prestige. Rainbow is shown as white.
    pub fn color(self) -> MinecraftColor {
        match self {
            BedwarsPrestige::None => MinecraftColor::Gray,
            BedwarsPrestige::Iron => MinecraftColor::White,
            BedwarsPrestige::Gold => MinecraftColor::Gold,
            BedwarsPrestige::Diamond => MinecraftColor::Aqua,
            BedwarsPrestige::Emerald => MinecraftColor::DarkGreen,
            BedwarsPrestige::Sapphire => MinecraftColor::DarkAqua,
            BedwarsPrestige::Ruby => MinecraftColor::DarkRed,
            BedwarsPrestige::Crystal => MinecraftColor::LightPurple,
            BedwarsPrestige::Opal => MinecraftColor::Blue,
            BedwarsPrestige::Amethyst => MinecraftColor::DarkPurple,
            BedwarsPrestige::Rainbow => MinecraftColor::White,
        }
    }
}

/// BedWars level and prestige of a player.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BedwarsLevelInfo {
    pub level: u32,
    pub level_in_current_prestige: u32,
    pub prestige: u32,
    pub prestige_name: &'static str,
    /// `§` formatting code of the prestige colour.
    pub prestige_color: &'static str,
    pub prestige_color_hex: &'static str,
}

/// BedWars level for an experience total.
pub fn bedwars_level(exp: f64) -> BedwarsLevelInfo {
    let prestiges = (exp / EXP_PER_PRESTIGE).floor();
    let mut level = prestiges as u32 * LEVELS_PER_PRESTIGE;
    let mut remaining = exp - prestiges * EXP_PER_PRESTIGE;

    for easy in EASY_LEVELS_EXP {
        if remaining < easy {
            break;
        }
        level += 1;
        remaining -= easy;
    }
    level += (remaining / EXP_PER_LEVEL).floor() as u32;

    let prestige = BedwarsPrestige::for_level(level);
    let color = prestige.color();
    BedwarsLevelInfo {
        level,
        level_in_current_prestige: level - prestige.index() * LEVELS_PER_PRESTIGE,
        prestige: prestige.index(),
        prestige_name: prestige.name(),
        prestige_color: color.code(),
        prestige_color_hex: color.hex(),
    }
}

/// BedWars level of a player object.
///
/// Reads `stats.Bedwars.Experience`, falling back to
/// `stats.Bedwars.Experience_new`.
pub fn bedwars_level_from_player(player: &Value) -> Result<BedwarsLevelInfo, HypixelError> {
    let exp = match number_at(player, &["stats", "Bedwars", "Experience"]) {
        Some(exp) => exp,
        None => require_number(player, &["stats", "Bedwars", "Experience_new"])
            .map_err(|_| HypixelError::MissingField("stats.Bedwars.Experience".into()))?,
    };
    Ok(bedwars_level(exp))
}
