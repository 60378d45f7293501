//! Shape normalization between remote JSON and [`Pack`].
//!
//! Pack files exist in two shapes: a bare array of level records, and an
//! object holding that array under `Levels`. Both load; only the wrapped
//! form is ever written.

use crate::error::{ModelError, Result};
use crate::pack::Pack;
use serde_json::{Map, Value};
use std::collections::HashSet;
use tracing::warn;

/// Key holding the level array in the wrapped form.
pub const LEVELS_KEY: &str = "Levels";

/// Converts parsed JSON into a canonical [`Pack`] with levels sorted by id.
///
/// The sort is stable, so records sharing an id keep their relative order.
pub fn normalize(value: Value) -> Result<Pack> {
    let wrapped = match value {
        Value::Array(levels) => {
            let mut map = Map::new();
            map.insert(LEVELS_KEY.to_string(), Value::Array(levels));
            map
        }
        Value::Object(map) => canonical_levels_key(map)?,
        other => {
            return Err(ModelError::Shape(format!(
                "expected an array of levels or an object with `{LEVELS_KEY}`, found {}",
                kind(&other)
            )));
        }
    };

    let mut pack: Pack = serde_json::from_value(Value::Object(wrapped))
        .map_err(|e| ModelError::Shape(format!("invalid level record: {e}")))?;

    if let Some(level) = pack.levels.iter().find(|l| l.level_id == 0) {
        return Err(ModelError::Shape(format!(
            "level ids must be positive, found {}",
            level.level_id
        )));
    }

    let mut seen = HashSet::with_capacity(pack.levels.len());
    for level in &pack.levels {
        if !seen.insert(level.level_id) {
            warn!("Pack contains duplicate level id {}", level.level_id);
        }
    }

    pack.levels.sort_by_key(|l| l.level_id);
    Ok(pack)
}

/// Converts a [`Pack`] back to JSON, always in the wrapped object form.
pub fn denormalize(pack: &Pack) -> Result<Value> {
    Ok(serde_json::to_value(pack)?)
}

/// Parses JSON text and normalizes it.
pub fn parse_pack(text: &str) -> Result<Pack> {
    let value: Value = serde_json::from_str(text)?;
    normalize(value)
}

/// Renders the wrapped form with two-space indentation.
pub fn to_pretty_json(pack: &Pack) -> Result<String> {
    Ok(serde_json::to_string_pretty(&denormalize(pack)?)?)
}

/// Accepts `Levels` under any casing and renames it to the canonical key.
fn canonical_levels_key(mut map: Map<String, Value>) -> Result<Map<String, Value>> {
    let key = if map.contains_key(LEVELS_KEY) {
        LEVELS_KEY.to_string()
    } else {
        map.keys()
            .find(|k| k.eq_ignore_ascii_case(LEVELS_KEY))
            .cloned()
            .ok_or_else(|| ModelError::Shape(format!("object has no `{LEVELS_KEY}` key")))?
    };

    match map.shift_remove(&key) {
        Some(levels @ Value::Array(_)) => {
            map.insert(LEVELS_KEY.to_string(), levels);
            Ok(map)
        }
        Some(other) => Err(ModelError::Shape(format!(
            "`{key}` must be an array, found {}",
            kind(&other)
        ))),
        None => Err(ModelError::Shape(format!("object has no `{LEVELS_KEY}` key"))),
    }
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
