//! Reshaped responses: the interesting field as the result, the rest as meta.
//!
//! Most endpoints nest their payload under one key (`guild`, `record`,
//! `auctions`, ...). The wrappers on [`HypixelClient`](crate::HypixelClient)
//! move that key out so callers get the payload directly, while `success`,
//! pagination fields and the client metadata stay reachable through `meta`.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::HypixelError;
use crate::rate_limit::RateLimitData;
use crate::types::meta::{CloudflareCache, DefaultMeta};

/// Everything in a response that is not the result.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResponseMeta {
    /// Remaining top-level response fields (e.g. `success`, `page`).
    #[serde(flatten)]
    pub fields: Map<String, Value>,
    /// Metadata attached by the client.
    #[serde(skip)]
    pub default: DefaultMeta,
}

impl ResponseMeta {
    /// Look up a remaining response field.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    /// The `success` flag, when it stayed in the meta.
    pub fn success(&self) -> Option<bool> {
        self.fields.get("success").and_then(Value::as_bool)
    }

    /// Whether the response came from the configured cache.
    pub fn cached(&self) -> bool {
        self.default.cached == Some(true)
    }

    /// Rate limit snapshot of an authenticated call.
    pub fn ratelimit(&self) -> Option<&RateLimitData> {
        self.default.ratelimit.as_ref()
    }

    /// Cloudflare edge cache information.
    pub fn cloudflare_cache(&self) -> Option<&CloudflareCache> {
        self.default.cloudflare_cache.as_ref()
    }
}

/// A response reshaped around one object field.
#[derive(Debug, Clone, PartialEq)]
pub struct ResultObject {
    /// The extracted field, or the rest of the body for primitive keys.
    pub result: Value,
    /// The remaining fields plus client metadata.
    pub meta: ResponseMeta,
}

impl ResultObject {
    /// Deserialize the result into a typed value.
    pub fn parse<T: DeserializeOwned>(&self) -> Result<T, HypixelError> {
        Ok(serde_json::from_value(self.result.clone())?)
    }

    /// Whether the result is JSON `null` (e.g. an unknown guild).
    pub fn is_null(&self) -> bool {
        self.result.is_null()
    }
}

/// A response reshaped around one array field.
#[derive(Debug, Clone, PartialEq)]
pub struct ResultArray {
    /// The extracted array.
    pub items: Vec<Value>,
    /// The remaining fields plus client metadata.
    pub meta: ResponseMeta,
}

impl ResultArray {
    /// Deserialize every item into a typed value.
    pub fn parse<T: DeserializeOwned>(&self) -> Result<Vec<T>, HypixelError> {
        self.items
            .iter()
            .map(|item| serde_json::from_value(item.clone()).map_err(HypixelError::from))
            .collect()
    }

    /// Number of items.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the array is empty.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Iterate over the raw items.
    pub fn iter(&self) -> std::slice::Iter<'_, Value> {
        self.items.iter()
    }
}

impl IntoIterator for ResultArray {
    type Item = Value;
    type IntoIter = std::vec::IntoIter<Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}
