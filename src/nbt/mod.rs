//! Inventory data decoding.
//!
//! SkyBlock inventories (`inv_contents`, `ender_chest_contents`, auction
//! `item_bytes`, ...) are gzipped NBT documents, usually base64 encoded, with
//! the slots stored in a list named `i`. Decoding turns each slot into an
//! [`InventoryItem`], or `None` for an empty slot.
//!
//! The item `tag` is kept as JSON with a few fields expanded:
//!
//! - `ExtraAttributes.*_backpack_data` and `*_bag_data` hold nested
//!   inventories and are decoded recursively
//! - `SkullOwner.Properties.textures` is replaced by its decoded texture JSON,
//!   the first one under `Properties` and any others under `ExtraProperties`
//!
//! # Example
//!
//! ```rust,no_run
//! use hypixel_api_client::nbt::decode_inventory;
//!
//! # fn main() -> Result<(), hypixel_api_client::HypixelError> {
//! # let data = "";
//! for (slot, item) in decode_inventory(data)?.iter().enumerate() {
//!     if let Some(item) = item {
//!         println!("{}: {} x{}", slot, item.display_name().unwrap_or("?"), item.count);
//!     }
//! }
//! # Ok(())
//! # }
//! ```

mod profile;

pub use profile::{SKYBLOCK_INVENTORIES, transform_profile_member_inventories};

use std::collections::HashMap;
use std::io::Read;

use base64::{Engine, engine::general_purpose::STANDARD as BASE64};
use fastnbt::Value as NbtValue;
use flate2::read::GzDecoder;
use serde::Serialize;
use serde_json::{Map, Number, Value};

use crate::error::HypixelError;

const GZIP_MAGIC: [u8; 2] = [0x1f, 0x8b];
const SLOTS_KEY: &str = "i";

/// One occupied inventory slot.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InventoryItem {
    /// Number of items in the slot.
    #[serde(rename = "Count")]
    pub count: i64,
    #[serde(rename = "Damage")]
    pub damage: i64,
    /// Numeric Minecraft item ID.
    pub id: i64,
    /// Item NBT tag, with nested inventories and skull textures decoded.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tag: Option<Value>,
}

impl InventoryItem {
    /// The `ExtraAttributes` compound of the tag.
    pub fn extra_attributes(&self) -> Option<&Map<String, Value>> {
        self.tag.as_ref()?.get("ExtraAttributes")?.as_object()
    }

    /// The SkyBlock item ID, e.g. `ASPECT_OF_THE_END`.
    pub fn skyblock_id(&self) -> Option<&str> {
        self.extra_attributes()?.get("id")?.as_str()
    }

    /// The display name, formatting codes included.
    pub fn display_name(&self) -> Option<&str> {
        self.tag.as_ref()?.get("display")?.get("Name")?.as_str()
    }
}

/// Decode a base64 inventory string.
pub fn decode_inventory(data: &str) -> Result<Vec<Option<InventoryItem>>, HypixelError> {
    let bytes = BASE64
        .decode(data.trim())
        .map_err(|e| HypixelError::Nbt(format!("Invalid base64: {}", e)))?;
    decode_inventory_bytes(&bytes)
}

/// Decode raw inventory bytes, gzipped or not.
pub fn decode_inventory_bytes(bytes: &[u8]) -> Result<Vec<Option<InventoryItem>>, HypixelError> {
    let raw = if bytes.starts_with(&GZIP_MAGIC) {
        let mut raw = Vec::new();
        GzDecoder::new(bytes)
            .read_to_end(&mut raw)
            .map_err(|e| HypixelError::Nbt(format!("Invalid gzip data: {}", e)))?;
        raw
    } else {
        bytes.to_vec()
    };

    let root: NbtValue =
        fastnbt::from_bytes(&raw).map_err(|e| HypixelError::Nbt(format!("Invalid NBT: {}", e)))?;
    let slots = match root {
        NbtValue::Compound(mut root) => root
            .remove(SLOTS_KEY)
            .ok_or_else(|| HypixelError::MissingField(SLOTS_KEY.into()))?,
        _ => {
            return Err(HypixelError::UnexpectedType {
                field: "root".into(),
                expected: "a compound",
            });
        }
    };
    let NbtValue::List(slots) = slots else {
        return Err(HypixelError::UnexpectedType {
            field: SLOTS_KEY.into(),
            expected: "a list",
        });
    };

    slots.into_iter().map(decode_slot).collect()
}

fn decode_slot(slot: NbtValue) -> Result<Option<InventoryItem>, HypixelError> {
    let NbtValue::Compound(mut slot) = slot else {
        return Err(HypixelError::UnexpectedType {
            field: SLOTS_KEY.into(),
            expected: "a list of compounds",
        });
    };
    if slot.is_empty() {
        return Ok(None);
    }

    let tag = match slot.remove("tag") {
        Some(NbtValue::Compound(tag)) => Some(decode_tag(tag)?),
        Some(other) => Some(to_json(other)),
        None => None,
    };

    Ok(Some(InventoryItem {
        count: integer(&slot, "Count"),
        damage: integer(&slot, "Damage"),
        id: integer(&slot, "id"),
        tag,
    }))
}

fn decode_tag(mut tag: HashMap<String, NbtValue>) -> Result<Value, HypixelError> {
    let extra = tag.remove("ExtraAttributes");
    let mut json = match to_json(NbtValue::Compound(tag)) {
        Value::Object(map) => map,
        _ => Map::new(),
    };

    if let Some(owner) = json.get_mut("SkullOwner").and_then(Value::as_object_mut) {
        decode_skull_textures(owner)?;
    }

    match extra {
        Some(NbtValue::Compound(extra)) => {
            let mut attributes = Map::new();
            for (key, value) in extra {
                let value = match value {
                    NbtValue::ByteArray(data) if is_nested_inventory(&key) => {
                        let bytes: Vec<u8> = data.iter().map(|b| *b as u8).collect();
                        serde_json::to_value(decode_inventory_bytes(&bytes)?)?
                    }
                    other => to_json(other),
                };
                attributes.insert(key, value);
            }
            json.insert("ExtraAttributes".into(), Value::Object(attributes));
        }
        Some(other) => {
            json.insert("ExtraAttributes".into(), to_json(other));
        }
        None => {}
    }

    Ok(Value::Object(json))
}

fn is_nested_inventory(key: &str) -> bool {
    key.ends_with("_backpack_data") || key.ends_with("_bag_data")
}

fn decode_skull_textures(owner: &mut Map<String, Value>) -> Result<(), HypixelError> {
    let textures = owner
        .get_mut("Properties")
        .and_then(|p| p.get_mut("textures"))
        .and_then(Value::as_array_mut)
        .map(std::mem::take)
        .unwrap_or_default();

    let mut decoded = textures
        .iter()
        .filter_map(|texture| texture.get("Value").and_then(Value::as_str))
        .map(decode_texture)
        .collect::<Result<Vec<_>, _>>()?
        .into_iter();

    owner.insert("Properties".into(), decoded.next().unwrap_or(Value::Null));
    let extra: Vec<Value> = decoded.collect();
    if !extra.is_empty() {
        owner.insert("ExtraProperties".into(), Value::Array(extra));
    }
    Ok(())
}

fn decode_texture(value: &str) -> Result<Value, HypixelError> {
    let bytes = BASE64
        .decode(value)
        .map_err(|e| HypixelError::Nbt(format!("Invalid skull texture: {}", e)))?;
    Ok(serde_json::from_slice(&bytes)?)
}

fn integer(compound: &HashMap<String, NbtValue>, key: &str) -> i64 {
    match compound.get(key) {
        Some(NbtValue::Byte(v)) => i64::from(*v),
        Some(NbtValue::Short(v)) => i64::from(*v),
        Some(NbtValue::Int(v)) => i64::from(*v),
        Some(NbtValue::Long(v)) => *v,
        _ => 0,
    }
}

/// Flatten an NBT value into plain JSON.
fn to_json(value: NbtValue) -> Value {
    match value {
        NbtValue::Byte(v) => Value::from(v),
        NbtValue::Short(v) => Value::from(v),
        NbtValue::Int(v) => Value::from(v),
        NbtValue::Long(v) => Value::from(v),
        NbtValue::Float(v) => float(f64::from(v)),
        NbtValue::Double(v) => float(v),
        NbtValue::String(v) => Value::String(v),
        NbtValue::ByteArray(v) => v.iter().map(|b| Value::from(*b)).collect(),
        NbtValue::IntArray(v) => v.iter().map(|i| Value::from(*i)).collect(),
        NbtValue::LongArray(v) => v.iter().map(|l| Value::from(*l)).collect(),
        NbtValue::List(items) => items.into_iter().map(to_json).collect(),
        NbtValue::Compound(map) => Value::Object(map.into_iter().map(|(k, v)| (k, to_json(v))).collect()),
        #[allow(unreachable_patterns)]
        _ => Value::Null,
    }
}

fn float(v: f64) -> Value {
    Number::from_f64(v).map_or(Value::Null, Value::Number)
}
