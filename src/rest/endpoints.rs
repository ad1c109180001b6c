//! Hypixel REST API endpoint constants.

/// Base URL for the Hypixel REST API.
pub const HYPIXEL_BASE_URL: &str = "https://api.hypixel.net/";

/// Endpoints that need neither the API key nor rate limiting.
pub mod public {
    /// Prefix shared by every resource listing.
    pub const RESOURCES_PREFIX: &str = "resources";
    /// Achievements resource.
    pub const RESOURCES_ACHIEVEMENTS: &str = "resources/achievements";
    /// Challenges resource.
    pub const RESOURCES_CHALLENGES: &str = "resources/challenges";
    /// Quests resource.
    pub const RESOURCES_QUESTS: &str = "resources/quests";
    /// Guild achievements resource.
    pub const RESOURCES_GUILD_ACHIEVEMENTS: &str = "resources/guilds/achievements";
    /// Guild permissions resource.
    pub const RESOURCES_GUILD_PERMISSIONS: &str = "resources/guilds/permissions";
    /// SkyBlock collections resource.
    pub const RESOURCES_SKYBLOCK_COLLECTIONS: &str = "resources/skyblock/collections";
    /// SkyBlock skills resource.
    pub const RESOURCES_SKYBLOCK_SKILLS: &str = "resources/skyblock/skills";
    /// SkyBlock items resource.
    pub const RESOURCES_SKYBLOCK_ITEMS: &str = "resources/skyblock/items";
    /// Active auctions, paged.
    pub const SKYBLOCK_AUCTIONS: &str = "skyblock/auctions";
    /// Auctions ended in the last minute.
    pub const SKYBLOCK_AUCTIONS_ENDED: &str = "skyblock/auctions_ended";
    /// Bazaar products.
    pub const SKYBLOCK_BAZAAR: &str = "skyblock/bazaar";
}

/// Endpoints that send the API key and count against the rate limit.
pub mod private {
    /// Active network boosters.
    pub const BOOSTERS: &str = "boosters";
    /// Find a guild ID.
    pub const FIND_GUILD: &str = "findGuild";
    /// Friends of a player.
    pub const FRIENDS: &str = "friends";
    /// Player counts per game.
    pub const GAME_COUNTS: &str = "gameCounts";
    /// A guild.
    pub const GUILD: &str = "guild";
    /// Information about the API key.
    pub const KEY: &str = "key";
    /// Leaderboards of every game.
    pub const LEADERBOARDS: &str = "leaderboards";
    /// A player.
    pub const PLAYER: &str = "player";
    /// Current network player count.
    pub const PLAYER_COUNT: &str = "playerCount";
    /// Recently played games of a player.
    pub const RECENT_GAMES: &str = "recentGames";
    /// Online status of a player.
    pub const STATUS: &str = "status";
    /// Watchdog statistics.
    pub const WATCHDOG_STATS: &str = "watchdogstats";
    /// Auctions of a player, profile or by auction UUID.
    pub const SKYBLOCK_AUCTION: &str = "skyblock/auction";
    /// SkyBlock news.
    pub const SKYBLOCK_NEWS: &str = "skyblock/news";
    /// A SkyBlock profile.
    pub const SKYBLOCK_PROFILE: &str = "skyblock/profile";
    /// Every SkyBlock profile of a player.
    pub const SKYBLOCK_PROFILES: &str = "skyblock/profiles";
    /// Museum data of a SkyBlock profile.
    pub const SKYBLOCK_MUSEUM: &str = "skyblock/museum";
}

/// Whether a call to `path` sends the API key and participates in rate limiting.
///
/// Resource listings, the public auction pages, ended auctions and the bazaar
/// are served without a key.
pub fn requires_auth(path: &str) -> bool {
    !(path.starts_with(public::RESOURCES_PREFIX)
        || path == public::SKYBLOCK_AUCTIONS
        || path == public::SKYBLOCK_AUCTIONS_ENDED
        || path == public::SKYBLOCK_BAZAAR)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unauthenticated_paths() {
        assert!(!requires_auth(public::RESOURCES_SKYBLOCK_SKILLS));
        assert!(!requires_auth(public::SKYBLOCK_AUCTIONS));
        assert!(!requires_auth(public::SKYBLOCK_AUCTIONS_ENDED));
        assert!(!requires_auth(public::SKYBLOCK_BAZAAR));
    }

    #[test]
    fn test_authenticated_paths() {
        assert!(requires_auth(private::PLAYER));
        assert!(requires_auth(private::SKYBLOCK_AUCTION));
        assert!(requires_auth(private::SKYBLOCK_PROFILES));
        assert!(requires_auth("skyblock/auctions/extra"));
    }
}
