//! Minecraft chat colours.

use serde::Serialize;

/// A Minecraft chat colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MinecraftColor {
    Black,
    DarkBlue,
    DarkGreen,
    DarkAqua,
    DarkRed,
    DarkPurple,
    Gold,
    Gray,
    DarkGray,
    Blue,
    Green,
    Aqua,
    Red,
    LightPurple,
    Yellow,
    White,
}

impl MinecraftColor {
    /// The `§` formatting code, e.g. `§6` for gold.
    pub fn code(self) -> &'static str {
        match self {
            MinecraftColor::Black => "§0",
            MinecraftColor::DarkBlue => "§1",
            MinecraftColor::DarkGreen => "§2",
            MinecraftColor::DarkAqua => "§3",
            MinecraftColor::DarkRed => "§4",
            MinecraftColor::DarkPurple => "§5",
            MinecraftColor::Gold => "§6",
            MinecraftColor::Gray => "§7",
            MinecraftColor::DarkGray => "§8",
            MinecraftColor::Blue => "§9",
            MinecraftColor::Green => "§a",
            MinecraftColor::Aqua => "§b",
            MinecraftColor::Red => "§c",
            MinecraftColor::LightPurple => "§d",
            MinecraftColor::Yellow => "§e",
            MinecraftColor::White => "§f",
        }
    }

    /// The colour as a hex triplet, e.g. `#FFAA00` for gold.
    pub fn hex(self) -> &'static str {
        match self {
            MinecraftColor::Black => "#000000",
            MinecraftColor::DarkBlue => "#0000AA",
            MinecraftColor::DarkGreen => "#00AA00",
            MinecraftColor::DarkAqua => "#00AAAA",
            MinecraftColor::DarkRed => "#AA0000",
            MinecraftColor::DarkPurple => "#AA00AA",
            MinecraftColor::Gold => "#FFAA00",
            MinecraftColor::Gray => "#AAAAAA",
            MinecraftColor::DarkGray => "#555555",
            MinecraftColor::Blue => "#5555FF",
            MinecraftColor::Green => "#55FF55",
            MinecraftColor::Aqua => "#55FFFF",
            MinecraftColor::Red => "#FF5555",
            MinecraftColor::LightPurple => "#FF55FF",
            MinecraftColor::Yellow => "#FFFF55",
            MinecraftColor::White => "#FFFFFF",
        }
    }
}

/// Remove `§` formatting codes from a string.
///
/// ```rust
/// use hypixel_api_client::leveling::strip_formatting;
///
/// assert_eq!(strip_formatting("§6[MVP§c++§6] Notch"), "[MVP++] Notch");
/// ```
pub fn strip_formatting(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars();
    while let Some(c) = chars.next() {
        if c == '§' {
            chars.next();
        } else {
            out.push(c);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes_and_hex() {
        assert_eq!(MinecraftColor::Gold.code(), "§6");
        assert_eq!(MinecraftColor::Gold.hex(), "#FFAA00");
        assert_eq!(MinecraftColor::LightPurple.code(), "§d");
    }

    #[test]
    fn test_strip_trailing_marker() {
        assert_eq!(strip_formatting("plain"), "plain");
        assert_eq!(strip_formatting("end§"), "end");
    }
}
