//! Provider parameter binding
//!
//! Providers receive their settings as a loosely typed parameter bag. Binding
//! is a merge, not a replace: the target configuration arrives already
//! defaulted, and only the keys present in the bag overwrite it. Each config
//! type declares an all-optional overlay struct that the bag is decoded into,
//! then applies the fields that were actually set.

use std::collections::HashMap;

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::{ProviderError, ProviderResult};

/// Pairs a configuration type with its optional-fields overlay.
pub trait ParamOverlay {
    /// Mirror of the config with every field optional
    type Overlay: DeserializeOwned;

    /// Apply the fields present in the overlay onto `self`
    fn apply(&mut self, overlay: Self::Overlay);
}

/// Bind a parameter bag onto an already-defaulted configuration value.
///
/// Unknown keys are ignored; a value whose shape does not match the target
/// field fails the whole bind. Fields absent from the bag keep the defaults
/// the caller pre-set on `target`.
pub fn bind_params<T: ParamOverlay>(
    target: &mut T,
    params: &HashMap<String, Value>,
) -> ProviderResult<()> {
    let object: serde_json::Map<String, Value> =
        params.iter().map(|(k, v)| (k.clone(), v.clone())).collect();

    let overlay: T::Overlay = serde_json::from_value(Value::Object(object))
        .map_err(|e| ProviderError::config_decode(format!("invalid configuration: {}", e)))?;

    target.apply(overlay);
    Ok(())
}
