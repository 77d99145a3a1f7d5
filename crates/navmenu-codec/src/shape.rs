//! Minimal document shape check
//!
//! Root must be a mapping, `menu` a mapping, `menu.main` a sequence.
//! Entries themselves are checked during decoding.

use serde_yaml::{Mapping, Value};

use crate::error::{CodecResult, ShapeError};

/// Key of the menu section in the document root
pub const MENU_KEY: &str = "menu";

/// Key of the entry list inside the menu section
pub const MAIN_KEY: &str = "main";

/// Check the top-level shape of a parsed YAML document
///
/// # Errors
///
/// Returns the first [`ShapeError`] found.
pub fn validate_shape(value: &Value) -> Result<(), ShapeError> {
    main_of(value).map(|_| ())
}

/// Check the top-level shape of a JSON body
///
/// # Errors
///
/// Returns [`CodecError::Shape`](crate::CodecError::Shape) on a bad shape.
pub fn validate_json_shape(value: &serde_json::Value) -> CodecResult<()> {
    let value = serde_yaml::to_value(value).map_err(crate::error::SerializeError::from)?;
    validate_shape(&value)?;
    Ok(())
}

pub(crate) fn main_of(value: &Value) -> Result<&Vec<Value>, ShapeError> {
    let root = value.as_mapping().ok_or(ShapeError::RootNotMapping)?;
    let menu = menu_of(root)?;
    match menu.get(MAIN_KEY) {
        None => Err(ShapeError::MainMissing),
        Some(Value::Sequence(main)) => Ok(main),
        Some(_) => Err(ShapeError::MainNotSequence),
    }
}

fn menu_of(root: &Mapping) -> Result<&Mapping, ShapeError> {
    root.get(MENU_KEY)
        .and_then(Value::as_mapping)
        .ok_or(ShapeError::MenuNotMapping)
}
