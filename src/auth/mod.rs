//! Authentication for the Hypixel API.
//!
//! Hypixel authenticates with a single API key sent in the `API-Key` header.
//! Endpoints on the unauthenticated allow-list never see the key.

mod credentials;

pub use credentials::{API_KEY_ENV, ApiKey};
