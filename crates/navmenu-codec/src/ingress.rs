//! Ingress: text to [`Document`]
//!
//! Parses, checks the shape, decodes every entry into a [`RawEntry`] and
//! hands the lot to the identity assigner.
//!
//! Only the document shape is enforced. Entries themselves are accepted
//! however badly formed:
//!
//! - Scalar fields are coerced when nothing is lost: numbers and booleans
//!   become strings for string fields, integral numbers and numeric strings
//!   become weights.
//! - A value that cannot be coerced leaves the typed field absent and is
//!   kept as a passthrough field under its own name, so it is written back
//!   unchanged.
//! - An item that is not a mapping becomes an entry whose only content is
//!   the item, kept under [`VALUE_FIELD`].

use navmenu_model::{Document, KeyAllocator, RawEntry, SyntheticKey};
use serde_yaml::{Mapping, Value};
use tracing::{debug, warn};

use crate::error::{CodecResult, ParseError, ShapeError};
use crate::shape::{MAIN_KEY, MENU_KEY};

/// Field carrying the synthetic key in the JSON wire form
///
/// Reserved on the wire: a YAML entry's own `_uid` passes through YAML
/// egress but is replaced by the synthetic key in [`to_json`](crate::to_json).
pub const UID_FIELD: &str = "_uid";

/// Passthrough field holding a `menu.main` item that is not a mapping
pub const VALUE_FIELD: &str = "value";

/// Field holding nested entries
pub const CHILDREN_FIELD: &str = "children";

/// Decode YAML text with the process-wide allocator
///
/// # Errors
///
/// - [`CodecError::Parse`](crate::CodecError::Parse) when the text is not YAML
/// - [`CodecError::Shape`](crate::CodecError::Shape) when it is not a menu
pub fn decode_yaml(text: &str) -> CodecResult<Document> {
    decode_yaml_with(text, KeyAllocator::global())
}

/// Decode YAML text, minting keys from `keys`
///
/// YAML never carries keys, so a `_uid` field here is an ordinary
/// passthrough field.
///
/// # Errors
///
/// See [`decode_yaml`].
pub fn decode_yaml_with(text: &str, keys: &KeyAllocator) -> CodecResult<Document> {
    let value: Value = serde_yaml::from_str(text).map_err(ParseError::from)?;
    decode_value(value, keys, false)
}

/// Decode a JSON wire document, keeping `_uid` keys
///
/// # Errors
///
/// - [`CodecError::Parse`](crate::CodecError::Parse) when the value cannot be
///   represented as YAML
/// - [`CodecError::Shape`](crate::CodecError::Shape) when it is not a menu
pub fn decode_json(value: &serde_json::Value, keys: &KeyAllocator) -> CodecResult<Document> {
    let value = serde_yaml::to_value(value).map_err(ParseError::from)?;
    decode_value(value, keys, true)
}

/// Decode an already parsed document
///
/// With `honor_uid`, an entry's `_uid` becomes its preserved key.
///
/// # Errors
///
/// Returns [`CodecError::Shape`](crate::CodecError::Shape) when the root or
/// `menu` is not a mapping, or `menu.main` is missing or not a sequence.
/// Entries never fail decoding.
pub fn decode_value(value: Value, keys: &KeyAllocator, honor_uid: bool) -> CodecResult<Document> {
    let Value::Mapping(mut root) = value else {
        return Err(ShapeError::RootNotMapping.into());
    };
    let Some(Value::Mapping(mut menu)) = root.shift_remove(MENU_KEY) else {
        return Err(ShapeError::MenuNotMapping.into());
    };
    let main = match menu.shift_remove(MAIN_KEY) {
        None => return Err(ShapeError::MainMissing.into()),
        Some(Value::Sequence(main)) => main,
        Some(_) => return Err(ShapeError::MainNotSequence.into()),
    };

    let decoder = EntryDecoder { honor_uid };
    let raw = main
        .into_iter()
        .enumerate()
        .map(|(index, item)| decoder.entry(item, &format!("{MENU_KEY}.{MAIN_KEY}[{index}]")))
        .collect();

    let entries = keys.assign(raw);
    debug!(entries = entries.len(), "decoded menu document");

    Ok(Document {
        entries,
        menu_extra: menu,
        extra: root,
    })
}

struct EntryDecoder {
    honor_uid: bool,
}

impl EntryDecoder {
    fn entry(&self, value: Value, path: &str) -> RawEntry {
        let fields = match value {
            Value::Mapping(fields) => fields,
            Value::Null => Mapping::new(),
            other => {
                warn!(path, "menu item is not a mapping, kept as passthrough");
                let mut raw = RawEntry::default();
                raw.extra.insert(VALUE_FIELD.into(), other);
                return raw;
            }
        };

        let mut raw = RawEntry::default();
        for (name, value) in fields {
            let kept = match name.as_str() {
                Some("name") => text(value).map(|v| raw.name = v),
                Some("identifier") => text(value).map(|v| raw.identifier = v),
                Some("url") => text(value).map(|v| raw.url = v),
                Some("pre") => text(value).map(|v| raw.pre = v),
                Some("parent") => text(value).map(|v| raw.parent = v),
                Some("weight") => weight(value).map(|v| raw.weight = v),
                Some(CHILDREN_FIELD) => self.children(value, path).map(|v| raw.children = v),
                Some(UID_FIELD) if self.honor_uid => uid(value).map(|v| raw.key = v),
                _ => Err(value),
            };
            if let Err(value) = kept {
                if is_typed(&name, self.honor_uid) {
                    debug!(path, field = ?name, "uncoercible field kept as passthrough");
                }
                raw.extra.insert(name, value);
            }
        }
        raw
    }

    fn children(&self, value: Value, path: &str) -> Result<Vec<RawEntry>, Value> {
        match value {
            Value::Null => Ok(Vec::new()),
            Value::Sequence(items) => Ok(items
                .into_iter()
                .enumerate()
                .map(|(index, item)| self.entry(item, &format!("{path}.{CHILDREN_FIELD}[{index}]")))
                .collect()),
            other => Err(other),
        }
    }
}

fn is_typed(name: &Value, honor_uid: bool) -> bool {
    matches!(
        name.as_str(),
        Some("name" | "identifier" | "url" | "pre" | "parent" | "weight" | CHILDREN_FIELD)
    ) || (honor_uid && name.as_str() == Some(UID_FIELD))
}

/// String field; hands the value back when it cannot be coerced
fn text(value: Value) -> Result<Option<String>, Value> {
    match value {
        Value::Null => Ok(None),
        Value::String(s) => Ok(Some(s)),
        Value::Bool(b) => Ok(Some(b.to_string())),
        Value::Number(n) => Ok(Some(n.to_string())),
        other => Err(other),
    }
}

fn weight(value: Value) -> Result<Option<i64>, Value> {
    match &value {
        Value::Null => Ok(None),
        Value::Number(n) => match (n.as_i64(), n.as_f64()) {
            (Some(w), _) => Ok(Some(w)),
            #[allow(clippy::cast_possible_truncation)]
            (None, Some(f)) if f.fract() == 0.0 && f.abs() < 9.0e15 => Ok(Some(f as i64)),
            _ => Err(value.clone()),
        },
        Value::String(s) => s.trim().parse::<i64>().map(Some).map_err(|_| value.clone()),
        _ => Err(value),
    }
}

fn uid(value: Value) -> Result<Option<SyntheticKey>, Value> {
    match text(value)? {
        None => Ok(None),
        Some(raw) if raw.is_empty() => Ok(None),
        Some(raw) => SyntheticKey::new(raw.clone()).map(Some).map_err(|_| Value::String(raw)),
    }
}
