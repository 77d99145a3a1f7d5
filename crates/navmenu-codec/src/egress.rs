//! Egress: [`Document`] to text
//!
//! YAML output never carries synthetic keys. The JSON wire form carries
//! them as `_uid` so a client can send them back unchanged.
//!
//! Field order per entry: `name`, `identifier`, `url`, `pre`, `parent`,
//! `weight`, then passthrough fields. Absent fields are omitted. A typed
//! field wins over a passthrough field of the same name, which only exists
//! when the loaded value could not be coerced.
//!
//! `_uid` is reserved in the JSON wire form. An entry's own passthrough
//! `_uid` survives YAML egress but is replaced by the synthetic key in
//! [`to_json`], with a warning.

use navmenu_model::{Document, MenuEntry};
use serde_yaml::{Mapping, Value};
use tracing::warn;

use crate::error::{CodecResult, SerializeError, ShapeError};
use crate::ingress::{CHILDREN_FIELD, UID_FIELD};
use crate::shape::{MAIN_KEY, MENU_KEY};

/// Serialize `document` to YAML, keys stripped
///
/// # Errors
///
/// Returns [`CodecError::Serialize`](crate::CodecError::Serialize) when the
/// emitter fails.
pub fn encode_yaml(document: &Document) -> CodecResult<String> {
    let value = document_value(document, false);
    Ok(serde_yaml::to_string(&value).map_err(SerializeError::from)?)
}

/// JSON wire form of `document`, keys as `_uid`
///
/// # Errors
///
/// Returns [`CodecError::Serialize`](crate::CodecError::Serialize) when a
/// passthrough field cannot be represented in JSON (non-string map keys).
pub fn to_json(document: &Document) -> CodecResult<serde_json::Value> {
    let value = document_value(document, true);
    Ok(serde_json::to_value(&value).map_err(SerializeError::from)?)
}

/// Convert a stored JSON wire document straight to YAML
///
/// Drops `_uid` from every entry in `menu.main`, nested `children`
/// included, and leaves everything else as sent.
///
/// # Errors
///
/// - [`CodecError::Shape`](crate::CodecError::Shape) when the body is not a menu
/// - [`CodecError::Serialize`](crate::CodecError::Serialize) when emitting fails
pub fn json_to_yaml(body: &serde_json::Value) -> CodecResult<String> {
    let mut value = serde_yaml::to_value(body).map_err(SerializeError::from)?;
    let main = value
        .get_mut(MENU_KEY)
        .and_then(|menu| menu.get_mut(MAIN_KEY))
        .and_then(Value::as_sequence_mut)
        .ok_or(ShapeError::MainMissing)?;
    strip_uids(main);
    Ok(serde_yaml::to_string(&value).map_err(SerializeError::from)?)
}

fn strip_uids(items: &mut [Value]) {
    for item in items {
        if let Value::Mapping(fields) = item {
            fields.shift_remove(UID_FIELD);
            if let Some(Value::Sequence(children)) = fields.get_mut(CHILDREN_FIELD) {
                strip_uids(children);
            }
        }
    }
}

fn document_value(document: &Document, with_keys: bool) -> Value {
    let main: Vec<Value> = document
        .entries
        .iter()
        .map(|entry| entry_value(entry, with_keys))
        .collect();

    let mut menu = Mapping::new();
    menu.insert(MAIN_KEY.into(), Value::Sequence(main));
    for (k, v) in &document.menu_extra {
        menu.insert(k.clone(), v.clone());
    }

    let mut root = Mapping::new();
    root.insert(MENU_KEY.into(), Value::Mapping(menu));
    for (k, v) in &document.extra {
        root.insert(k.clone(), v.clone());
    }
    Value::Mapping(root)
}

/// Mapping for one entry
#[must_use]
pub fn entry_value(entry: &MenuEntry, with_key: bool) -> Value {
    let mut fields = Mapping::new();
    let strings = [
        ("name", &entry.name),
        ("identifier", &entry.identifier),
        ("url", &entry.url),
        ("pre", &entry.pre),
        ("parent", &entry.parent),
    ];
    for (name, value) in strings {
        if let Some(value) = value {
            fields.insert(name.into(), value.as_str().into());
        }
    }
    if let Some(weight) = entry.weight {
        fields.insert("weight".into(), weight.into());
    }
    for (k, v) in &entry.extra {
        if !fields.contains_key(k) {
            fields.insert(k.clone(), v.clone());
        }
    }
    if with_key {
        let shadowed = fields.insert(UID_FIELD.into(), entry.key().as_str().into());
        if shadowed.is_some() {
            warn!(key = %entry.key(), "passthrough _uid replaced by the synthetic key");
        }
    }
    Value::Mapping(fields)
}

#[cfg(test)]
mod tests {
    use super::*;
    use navmenu_model::SyntheticKey;
    use pretty_assertions::assert_eq;

    fn doc() -> Document {
        Document::new(vec![MenuEntry::new(SyntheticKey::from_sequence(5))
            .with_name("Home")
            .with_identifier("home")
            .with_weight(1)])
    }

    #[test]
    fn yaml_has_no_keys() {
        let text = encode_yaml(&doc()).unwrap();
        assert!(text.starts_with("menu:\n  main:\n"));
        assert!(text.contains("name: Home"));
        assert!(text.contains("identifier: home"));
        assert!(!text.contains("item_5"));
        assert!(!text.contains("_uid"));
    }

    #[test]
    fn json_carries_uid() {
        let json = to_json(&doc()).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"menu": {"main": [
                {"name": "Home", "identifier": "home", "weight": 1, "_uid": "item_5"}
            ]}})
        );
    }

    #[test]
    fn json_to_yaml_strips_nested_uids() {
        let body = serde_json::json!({"menu": {"main": [
            {"name": "P", "_uid": "test-uid-1", "children": [
                {"name": "C", "_uid": "test-uid-2"}
            ]}
        ]}});
        let text = json_to_yaml(&body).unwrap();
        assert!(!text.contains("_uid"));
        assert!(!text.contains("test-uid"));
        assert!(text.contains("name: C"));
    }

    #[test]
    fn typed_field_wins_over_passthrough_copy() {
        let mut entry = MenuEntry::new(SyntheticKey::from_sequence(1)).with_weight(4);
        entry.extra.insert("weight".into(), Value::from(1.5));
        entry.extra.insert("class".into(), Value::from("big"));

        let Value::Mapping(fields) = entry_value(&entry, false) else {
            panic!("entry must encode as a mapping");
        };
        assert_eq!(fields.get("weight"), Some(&Value::from(4)));
        assert_eq!(fields.get("class"), Some(&Value::from("big")));

        entry.weight = None;
        let Value::Mapping(fields) = entry_value(&entry, false) else {
            panic!("entry must encode as a mapping");
        };
        assert_eq!(fields.get("weight"), Some(&Value::from(1.5)));
    }

    #[test]
    fn own_uid_survives_yaml_but_not_json() {
        let mut entry = MenuEntry::new(SyntheticKey::from_sequence(3)).with_name("A");
        entry.extra.insert(UID_FIELD.into(), Value::from("mine"));
        let document = Document::new(vec![entry]);

        assert!(encode_yaml(&document).unwrap().contains("_uid: mine"));
        let json = to_json(&document).unwrap();
        assert_eq!(json["menu"]["main"][0]["_uid"], "item_3");
    }
}
