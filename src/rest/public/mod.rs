//! Endpoints served without an API key.
//!
//! These calls skip the admission queue and the rate limit entirely and their
//! responses never carry `ratelimit` metadata. Resource listings change
//! rarely and are good candidates for caching.

use crate::error::HypixelError;
use crate::rest::HypixelClient;
use crate::rest::endpoints::public;
use crate::rest::options::RequestOptions;
use crate::rest::transport::Transport;
use crate::types::{Envelope, ResultObject};

impl<T: Transport> HypixelClient<T> {
    /// Every achievement of every game.
    pub async fn resources_achievements(&self, options: &RequestOptions) -> Result<Envelope, HypixelError> {
        self.call(public::RESOURCES_ACHIEVEMENTS, &[], options).await
    }

    /// Every challenge of every game.
    pub async fn resources_challenges(&self, options: &RequestOptions) -> Result<Envelope, HypixelError> {
        self.call(public::RESOURCES_CHALLENGES, &[], options).await
    }

    /// Every quest of every game.
    pub async fn resources_quests(&self, options: &RequestOptions) -> Result<Envelope, HypixelError> {
        self.call(public::RESOURCES_QUESTS, &[], options).await
    }

    /// Guild achievements.
    pub async fn resources_guild_achievements(
        &self,
        options: &RequestOptions,
    ) -> Result<Envelope, HypixelError> {
        self.call(public::RESOURCES_GUILD_ACHIEVEMENTS, &[], options).await
    }

    /// Guild permissions.
    pub async fn resources_guild_permissions(
        &self,
        options: &RequestOptions,
    ) -> Result<Envelope, HypixelError> {
        self.call(public::RESOURCES_GUILD_PERMISSIONS, &[], options).await
    }

    /// SkyBlock collections and their tiers.
    ///
    /// Feed the `collections` field to
    /// [`profile_collections`](crate::leveling::profile_collections).
    pub async fn resources_skyblock_collections(
        &self,
        options: &RequestOptions,
    ) -> Result<Envelope, HypixelError> {
        self.call(public::RESOURCES_SKYBLOCK_COLLECTIONS, &[], options).await
    }

    /// SkyBlock skills and their level thresholds.
    ///
    /// Feed the `skills` field to
    /// [`profile_member_skills`](crate::leveling::profile_member_skills).
    pub async fn resources_skyblock_skills(&self, options: &RequestOptions) -> Result<Envelope, HypixelError> {
        self.call(public::RESOURCES_SKYBLOCK_SKILLS, &[], options).await
    }

    /// SkyBlock items.
    pub async fn resources_skyblock_items(&self, options: &RequestOptions) -> Result<Envelope, HypixelError> {
        self.call(public::RESOURCES_SKYBLOCK_ITEMS, &[], options).await
    }

    /// One page of active SkyBlock auctions. Pages start at 0.
    pub async fn skyblock_auctions(&self, page: u32, options: &RequestOptions) -> Result<Envelope, HypixelError> {
        let page = page.to_string();
        self.call(public::SKYBLOCK_AUCTIONS, &[("page", page.as_str())], options)
            .await
    }

    /// Auctions that ended in the last 60 seconds.
    pub async fn skyblock_auctions_ended(&self, options: &RequestOptions) -> Result<ResultObject, HypixelError> {
        self.call(public::SKYBLOCK_AUCTIONS_ENDED, &[], options)
            .await?
            .into_object("success")
    }

    /// Bazaar products, keyed by product ID.
    pub async fn skyblock_bazaar(&self, options: &RequestOptions) -> Result<ResultObject, HypixelError> {
        self.call(public::SKYBLOCK_BAZAAR, &[], options)
            .await?
            .into_object("products")
    }
}

#[cfg(test)]
mod tests {
    use crate::rest::HypixelClient;
    use crate::rest::options::RequestOptions;
    use crate::rest::testing::ScriptedTransport;
    use serde_json::json;

    #[tokio::test]
    async fn test_bazaar_products_result() {
        let transport = ScriptedTransport::ok(
            r#"{"success":true,"lastUpdated":1590854517479,"products":{"INK_SACK:3":{"product_id":"INK_SACK:3"}}}"#,
        );
        let client = HypixelClient::builder("key")
            .build_with_transport(transport.clone())
            .unwrap();

        let bazaar = client.skyblock_bazaar(&RequestOptions::default()).await.unwrap();
        assert_eq!(bazaar.result["INK_SACK:3"]["product_id"], json!("INK_SACK:3"));
        assert_eq!(bazaar.meta.get("lastUpdated"), Some(&json!(1590854517479u64)));
        assert!(bazaar.meta.ratelimit().is_none());
        assert_eq!(transport.requests()[0].url.path(), "/skyblock/bazaar");
    }

    #[tokio::test]
    async fn test_auctions_ended_keeps_success_in_meta() {
        let transport =
            ScriptedTransport::ok(r#"{"success":true,"lastUpdated":1,"auctions":[{"auction_id":"a"}]}"#);
        let client = HypixelClient::builder("key").build_with_transport(transport).unwrap();

        let ended = client.skyblock_auctions_ended(&RequestOptions::default()).await.unwrap();
        assert_eq!(ended.meta.success(), Some(true));
        assert_eq!(ended.result["auctions"][0]["auction_id"], json!("a"));
    }

    #[tokio::test]
    async fn test_auctions_page_parameter() {
        let transport = ScriptedTransport::ok(r#"{"success":true,"page":2,"totalPages":40,"auctions":[]}"#);
        let client = HypixelClient::builder("key")
            .build_with_transport(transport.clone())
            .unwrap();

        let page = client.skyblock_auctions(2, &RequestOptions::default()).await.unwrap();
        assert_eq!(page.get("totalPages"), Some(&json!(40)));
        assert_eq!(transport.requests()[0].url.query(), Some("page=2"));
    }

    #[tokio::test]
    async fn test_resources_path() {
        let transport = ScriptedTransport::ok(r#"{"success":true,"skills":{}}"#);
        let client = HypixelClient::builder("key")
            .build_with_transport(transport.clone())
            .unwrap();

        client.resources_skyblock_skills(&RequestOptions::default()).await.unwrap();
        assert_eq!(transport.requests()[0].url.path(), "/resources/skyblock/skills");
        assert!(transport.requests()[0].headers.get("api-key").is_none());
    }
}
