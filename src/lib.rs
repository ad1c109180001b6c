//! # Hypixel API Client
//!
//! An async Rust client library for the Hypixel public API.
//!
//! ## Features
//!
//! - Wrappers for the player, guild, resource and SkyBlock endpoints
//! - Server-driven rate limiting with a FIFO admission queue
//! - Bounded retries, timeouts and per-call cancellation
//! - Pluggable response caching
//! - Level calculators for network, guild, BedWars, SkyWars and SkyBlock
//! - Decoding of NBT inventory data
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use hypixel_api_client::{HypixelClient, RequestOptions};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = HypixelClient::from_env()?;
//!     let response = client
//!         .player("069a79f444e94726a5befca90e38aaf5", &RequestOptions::default())
//!         .await?;
//!     println!("Player: {:?}", response.get("player"));
//!     Ok(())
//! }
//! ```

pub mod auth;
pub mod cache;
pub mod error;
pub mod leveling;
pub mod nbt;
pub mod rate_limit;
pub mod rest;
pub mod types;

// Re-export commonly used types at crate root
pub use auth::ApiKey;
pub use error::HypixelError;
pub use rate_limit::{RateLimitData, RateLimitEvent};
pub use rest::{ClientConfig, HypixelClient, HypixelClientBuilder, RequestOptions, Transport};
pub use types::{Envelope, ResultArray, ResultObject};

/// Result type alias using HypixelError
pub type Result<T> = std::result::Result<T, HypixelError>;
