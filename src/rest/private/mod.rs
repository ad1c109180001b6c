//! Endpoints that require the API key.
//!
//! Every call here goes through the admission queue, obeys the rate limit and
//! carries a `ratelimit` snapshot in its metadata.

use crate::error::HypixelError;
use crate::rest::HypixelClient;
use crate::rest::endpoints::private;
use crate::rest::options::RequestOptions;
use crate::rest::transport::Transport;
use crate::types::{Envelope, ResultArray, ResultObject};

impl<T: Transport> HypixelClient<T> {
    // ========== Network ==========

    /// Active network boosters.
    pub async fn boosters(&self, options: &RequestOptions) -> Result<ResultObject, HypixelError> {
        self.call(private::BOOSTERS, &[], options)
            .await?
            .into_object("success")
    }

    /// Player counts of every game and mode.
    pub async fn game_counts(&self, options: &RequestOptions) -> Result<ResultObject, HypixelError> {
        self.call(private::GAME_COUNTS, &[], options)
            .await?
            .into_object("success")
    }

    /// Information about the API key in use.
    pub async fn key(&self, options: &RequestOptions) -> Result<ResultObject, HypixelError> {
        self.call(private::KEY, &[], options).await?.into_object("record")
    }

    /// Leaderboards of every game.
    pub async fn leaderboards(&self, options: &RequestOptions) -> Result<ResultObject, HypixelError> {
        self.call(private::LEADERBOARDS, &[], options)
            .await?
            .into_object("leaderboards")
    }

    /// Current network player count.
    pub async fn player_count(&self, options: &RequestOptions) -> Result<ResultObject, HypixelError> {
        self.call(private::PLAYER_COUNT, &[], options)
            .await?
            .into_object("success")
    }

    /// Watchdog ban statistics.
    pub async fn watchdog_stats(&self, options: &RequestOptions) -> Result<ResultObject, HypixelError> {
        self.call(private::WATCHDOG_STATS, &[], options)
            .await?
            .into_object("success")
    }

    // ========== Players ==========

    /// A player's data.
    ///
    /// `player` in the response is `null` for a player who never joined.
    pub async fn player(&self, uuid: &str, options: &RequestOptions) -> Result<Envelope, HypixelError> {
        self.call(private::PLAYER, &[("uuid", uuid)], options).await
    }

    /// Friends of a player.
    pub async fn friends(&self, uuid: &str, options: &RequestOptions) -> Result<Envelope, HypixelError> {
        self.call(private::FRIENDS, &[("uuid", uuid)], options).await
    }

    /// Games a player played in the last three days.
    pub async fn recent_games(&self, uuid: &str, options: &RequestOptions) -> Result<Envelope, HypixelError> {
        self.call(private::RECENT_GAMES, &[("uuid", uuid)], options).await
    }

    /// Online status of a player.
    pub async fn status(&self, uuid: &str, options: &RequestOptions) -> Result<Envelope, HypixelError> {
        self.call(private::STATUS, &[("uuid", uuid)], options).await
    }

    // ========== Guilds ==========

    /// Look up a guild ID by guild name.
    pub async fn find_guild_by_name(&self, name: &str, options: &RequestOptions) -> Result<Envelope, HypixelError> {
        self.call(private::FIND_GUILD, &[("byName", name)], options).await
    }

    /// Look up a guild ID by the UUID of a member.
    pub async fn find_guild_by_uuid(&self, uuid: &str, options: &RequestOptions) -> Result<Envelope, HypixelError> {
        self.call(private::FIND_GUILD, &[("byUuid", uuid)], options).await
    }

    /// A guild by its ID. The result is `null` if no guild matches.
    pub async fn guild_by_id(&self, id: &str, options: &RequestOptions) -> Result<ResultObject, HypixelError> {
        self.guild(&[("id", id)], options).await
    }

    /// The guild of a player. The result is `null` if the player has none.
    pub async fn guild_by_player(
        &self,
        uuid: &str,
        options: &RequestOptions,
    ) -> Result<ResultObject, HypixelError> {
        self.guild(&[("player", uuid)], options).await
    }

    /// A guild by its name. The result is `null` if no guild matches.
    pub async fn guild_by_name(&self, name: &str, options: &RequestOptions) -> Result<ResultObject, HypixelError> {
        self.guild(&[("name", name)], options).await
    }

    async fn guild(&self, params: &[(&str, &str)], options: &RequestOptions) -> Result<ResultObject, HypixelError> {
        self.call(private::GUILD, params, options)
            .await?
            .into_object("guild")
    }

    // ========== SkyBlock ==========

    /// Auctions created by a player.
    pub async fn skyblock_auction_by_player(
        &self,
        uuid: &str,
        options: &RequestOptions,
    ) -> Result<ResultArray, HypixelError> {
        self.skyblock_auction(&[("player", uuid)], options).await
    }

    /// Auctions created on a profile.
    pub async fn skyblock_auction_by_profile(
        &self,
        profile: &str,
        options: &RequestOptions,
    ) -> Result<ResultArray, HypixelError> {
        self.skyblock_auction(&[("profile", profile)], options).await
    }

    /// An auction by its UUID.
    pub async fn skyblock_auction_by_uuid(
        &self,
        uuid: &str,
        options: &RequestOptions,
    ) -> Result<ResultArray, HypixelError> {
        self.skyblock_auction(&[("uuid", uuid)], options).await
    }

    async fn skyblock_auction(
        &self,
        params: &[(&str, &str)],
        options: &RequestOptions,
    ) -> Result<ResultArray, HypixelError> {
        self.call(private::SKYBLOCK_AUCTION, params, options)
            .await?
            .into_array("auctions")
    }

    /// SkyBlock news.
    pub async fn skyblock_news(&self, options: &RequestOptions) -> Result<ResultArray, HypixelError> {
        self.call(private::SKYBLOCK_NEWS, &[], options)
            .await?
            .into_array("items")
    }

    /// A SkyBlock profile by its ID.
    pub async fn skyblock_profile(&self, profile: &str, options: &RequestOptions) -> Result<ResultObject, HypixelError> {
        self.call(private::SKYBLOCK_PROFILE, &[("profile", profile)], options)
            .await?
            .into_object("profile")
    }

    /// Every SkyBlock profile of a player.
    pub async fn skyblock_profiles(&self, uuid: &str, options: &RequestOptions) -> Result<Envelope, HypixelError> {
        self.call(private::SKYBLOCK_PROFILES, &[("uuid", uuid)], options).await
    }

    /// Museum data of every member of a SkyBlock profile.
    pub async fn skyblock_museum(&self, profile: &str, options: &RequestOptions) -> Result<Envelope, HypixelError> {
        self.call(private::SKYBLOCK_MUSEUM, &[("profile", profile)], options)
            .await
    }
}
