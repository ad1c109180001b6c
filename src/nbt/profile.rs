//! Inventory decoding for whole SkyBlock profile members.

use serde_json::Value;

use super::decode_inventory;
use crate::error::HypixelError;

/// Profile member fields that hold `{ "type": 0, "data": "<base64>" }`
/// inventory blobs.
pub const SKYBLOCK_INVENTORIES: [&str; 12] = [
    "inv_armor",
    "backpack_contents",
    "backpack_icons",
    "candy_inventory_contents",
    "ender_chest_contents",
    "personal_vault_contents",
    "fishing_bag",
    "inv_contents",
    "potion_bag",
    "quiver",
    "talisman_bag",
    "wardrobe_contents",
];

/// Replace every inventory blob of a profile member with its decoded slots.
///
/// Inventories that fail to decode are removed from the member. Fields that
/// are absent or carry no `data` are left alone.
pub fn transform_profile_member_inventories(member: &mut Value) -> Result<(), HypixelError> {
    let Some(member) = member.as_object_mut() else {
        return Err(HypixelError::UnexpectedType {
            field: "member".into(),
            expected: "an object",
        });
    };

    for key in SKYBLOCK_INVENTORIES {
        let Some(data) = member
            .get(key)
            .and_then(|inventory| inventory.get("data"))
            .and_then(Value::as_str)
        else {
            continue;
        };

        match decode_inventory(data) {
            Ok(items) => {
                member.insert(key.to_string(), serde_json::to_value(items)?);
            }
            Err(error) => {
                tracing::debug!("Dropping undecodable inventory {}: {}", key, error);
                member.shift_remove(key);
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::nbt::tests::INVENTORY;
    use serde_json::json;

    #[test]
    fn test_member_inventories_transformed() {
        let mut member = json!({
            "coin_purse": 12.5,
            "inv_contents": {"type": 0, "data": INVENTORY},
            "ender_chest_contents": {"type": 0, "data": "H4sIAAAA"},
            "quiver": {"type": 0}
        });

        transform_profile_member_inventories(&mut member).unwrap();

        let contents = member["inv_contents"].as_array().unwrap();
        assert_eq!(contents.len(), 3);
        assert_eq!(contents[0]["tag"]["ExtraAttributes"]["id"], json!("ASPECT_OF_THE_END"));
        assert!(contents[1].is_null());

        assert!(member.get("ender_chest_contents").is_none());
        assert_eq!(member["quiver"], json!({"type": 0}));
        assert_eq!(member["coin_purse"], json!(12.5));
    }

    #[test]
    fn test_non_object_member() {
        let mut member = json!([]);
        assert!(matches!(
            transform_profile_member_inventories(&mut member),
            Err(HypixelError::UnexpectedType { .. })
        ));
    }
}
