//! The response envelope returned by every call.
//!
//! Hypixel answers every endpoint with a JSON object such as:
//!
//! ```json
//! { "success": true, "player": { "uuid": "..." } }
//! ```
//!
//! [`Envelope`] keeps that object untouched in `body` and carries the
//! client-side metadata next to it. Serializing an envelope produces the
//! original object with `cached`, `ratelimit` and `cloudflareCache` merged in,
//! which is also the shape cache backends store.

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use crate::error::HypixelError;
use crate::types::meta::DefaultMeta;
use crate::types::result::{ResponseMeta, ResultArray, ResultObject};

/// A decoded API response plus client metadata.
#[derive(Debug, Clone, PartialEq, Default, Serialize, serde::Deserialize)]
#[serde(try_from = "Map<String, Value>", into = "Map<String, Value>")]
pub struct Envelope {
    /// The response object exactly as the API returned it.
    pub body: Map<String, Value>,
    /// Metadata attached by the client.
    pub meta: DefaultMeta,
}

impl Envelope {
    /// Wrap a response body with empty metadata.
    pub fn new(body: Map<String, Value>) -> Self {
        Self {
            body,
            meta: DefaultMeta::default(),
        }
    }

    /// Decode a response body. Non-object payloads are rejected.
    pub fn from_json(text: &str) -> Result<Self, HypixelError> {
        match serde_json::from_str::<Value>(text)? {
            Value::Object(body) => Ok(Self::new(body)),
            _ => Err(HypixelError::UnexpectedType {
                field: "response".into(),
                expected: "an object",
            }),
        }
    }

    /// The `success` flag of the response.
    pub fn success(&self) -> bool {
        self.body.get("success").and_then(Value::as_bool).unwrap_or(false)
    }

    /// The `cause` the API gave for a failure, if any.
    pub fn cause(&self) -> Option<&str> {
        self.body.get("cause").and_then(Value::as_str)
    }

    /// Whether the response was served by the configured cache.
    pub fn is_cached(&self) -> bool {
        self.meta.cached == Some(true)
    }

    /// Look up a top-level field of the body.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.body.get(key)
    }

    /// Deserialize the whole body into a typed response.
    pub fn parse<T: DeserializeOwned>(&self) -> Result<T, HypixelError> {
        Ok(serde_json::from_value(Value::Object(self.body.clone()))?)
    }

    /// Deserialize one field of the body into a typed value.
    pub fn parse_field<T: DeserializeOwned>(&self, key: &str) -> Result<T, HypixelError> {
        let value = self
            .body
            .get(key)
            .ok_or_else(|| HypixelError::MissingField(key.to_string()))?;
        Ok(serde_json::from_value(value.clone())?)
    }

    /// Move the field `key` out as the result and keep the rest as meta.
    ///
    /// When the field holds a primitive (e.g. `success`), the rest of the body
    /// becomes the result and the field itself goes to the meta.
    pub fn into_object(self, key: &str) -> Result<ResultObject, HypixelError> {
        let Envelope { mut body, meta } = self;
        let value = body
            .shift_remove(key)
            .ok_or_else(|| HypixelError::MissingField(key.to_string()))?;

        let (result, fields) = match value {
            Value::Bool(_) | Value::Number(_) | Value::String(_) => {
                let mut fields = Map::new();
                fields.insert(key.to_string(), value);
                (Value::Object(body), fields)
            }
            other => (other, body),
        };

        Ok(ResultObject {
            result,
            meta: ResponseMeta { fields, default: meta },
        })
    }

    /// Move the array field `key` out as the result and keep the rest as meta.
    pub fn into_array(self, key: &str) -> Result<ResultArray, HypixelError> {
        let Envelope { mut body, meta } = self;
        let value = body
            .shift_remove(key)
            .ok_or_else(|| HypixelError::MissingField(key.to_string()))?;

        let Value::Array(items) = value else {
            return Err(HypixelError::UnexpectedType {
                field: key.to_string(),
                expected: "an array",
            });
        };

        Ok(ResultArray {
            items,
            meta: ResponseMeta {
                fields: body,
                default: meta,
            },
        })
    }
}

impl TryFrom<Map<String, Value>> for Envelope {
    type Error = serde_json::Error;

    fn try_from(mut body: Map<String, Value>) -> Result<Self, Self::Error> {
        let mut meta = Map::new();
        for key in DefaultMeta::KEYS {
            if let Some(value) = body.shift_remove(key) {
                meta.insert(key.to_string(), value);
            }
        }
        let meta = serde_json::from_value(Value::Object(meta))?;
        Ok(Self { body, meta })
    }
}

impl From<Envelope> for Map<String, Value> {
    fn from(envelope: Envelope) -> Self {
        let mut map = envelope.body;
        if let Ok(Value::Object(meta)) = serde_json::to_value(&envelope.meta) {
            map.extend(meta);
        }
        map
    }
}

impl From<Envelope> for Value {
    fn from(envelope: Envelope) -> Self {
        Value::Object(envelope.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rate_limit::RateLimitData;
    use crate::types::meta::{CacheStatus, CloudflareCache};
    use serde_json::json;

    fn envelope(value: Value) -> Envelope {
        match value {
            Value::Object(body) => Envelope::new(body),
            _ => unreachable!(),
        }
    }

    #[test]
    fn test_round_trip_keeps_metadata_separate() {
        let raw = json!({
            "success": true,
            "player": {"displayname": "Technoblade"},
            "cached": true,
            "ratelimit": {"limit": 120, "remaining": 119, "reset": 1000},
            "cloudflareCache": {"status": "HIT", "age": 0}
        });
        let parsed: Envelope = serde_json::from_value(raw.clone()).unwrap();

        assert!(parsed.success());
        assert!(parsed.is_cached());
        assert!(!parsed.body.contains_key("ratelimit"));
        assert_eq!(
            parsed.meta.ratelimit,
            Some(RateLimitData {
                limit: 120,
                remaining: 119,
                reset: 1000
            })
        );
        assert_eq!(
            parsed.meta.cloudflare_cache,
            Some(CloudflareCache {
                status: CacheStatus::Hit,
                age: Some(0),
                max_age: None
            })
        );
        assert_eq!(serde_json::to_value(&parsed).unwrap(), raw);
    }

    #[test]
    fn test_from_json_rejects_non_objects() {
        assert!(Envelope::from_json("{\"success\":true}").is_ok());
        assert!(matches!(
            Envelope::from_json("[1,2]"),
            Err(HypixelError::UnexpectedType { .. })
        ));
        assert!(matches!(Envelope::from_json("{"), Err(HypixelError::Json(_))));
    }

    #[test]
    fn test_into_object_nested() {
        let env = envelope(json!({"success": true, "guild": {"name": "Mini Squid"}}));
        let result = env.into_object("guild").unwrap();
        assert_eq!(result.result, json!({"name": "Mini Squid"}));
        assert_eq!(result.meta.fields.get("success"), Some(&json!(true)));
    }

    #[test]
    fn test_into_object_primitive_key() {
        let mut env = envelope(json!({"success": true, "watchdog_total": 5, "staff_total": 7}));
        env.meta.cached = Some(true);
        let result = env.into_object("success").unwrap();
        assert_eq!(result.result, json!({"watchdog_total": 5, "staff_total": 7}));
        assert_eq!(result.meta.fields.len(), 1);
        assert_eq!(result.meta.default.cached, Some(true));
    }

    #[test]
    fn test_into_object_missing_key() {
        let env = envelope(json!({"success": true}));
        assert!(matches!(
            env.into_object("guild"),
            Err(HypixelError::MissingField(key)) if key == "guild"
        ));
    }

    #[test]
    fn test_into_array() {
        let env = envelope(json!({"success": true, "items": [{"title": "a"}, {"title": "b"}]}));
        let result = env.into_array("items").unwrap();
        assert_eq!(result.items.len(), 2);
        assert_eq!(result.meta.fields.get("success"), Some(&json!(true)));

        let env = envelope(json!({"success": true, "items": {}}));
        assert!(matches!(
            env.into_array("items"),
            Err(HypixelError::UnexpectedType { .. })
        ));
    }

    #[test]
    fn test_parse_field() {
        #[derive(serde::Deserialize)]
        struct Record {
            owner: String,
        }
        let env = envelope(json!({"success": true, "record": {"owner": "abc"}}));
        let record: Record = env.parse_field("record").unwrap();
        assert_eq!(record.owner, "abc");
        assert!(env.parse_field::<Record>("missing").is_err());
    }
}
