//! Response types shared across the Hypixel client library.

pub mod envelope;
pub mod meta;
pub mod result;

pub use envelope::Envelope;
pub use meta::{CacheStatus, CloudflareCache, DefaultMeta};
pub use result::{ResponseMeta, ResultArray, ResultObject};
