//! Structural mapping between a model's declared fields and a plain JSON map.

use crate::domain::ports::Model;
use crate::utils::error::{CoercionError, Result};
use serde_json::{Map, Value};

/// Render every declared field in declaration order.
///
/// Absent fields (and empty lists) are left out so partial updates only carry
/// what the caller set. Explicit nulls come out as JSON `null`.
pub fn serialize<M: Model>(model: &M) -> Map<String, Value> {
    let mut out = Map::new();
    for &name in M::FIELDS {
        if let Some(value) = model.field(name).and_then(|field| field.read()) {
            out.insert(name.to_string(), value);
        }
    }
    out
}

/// Route each known key of `source` into its field's container.
///
/// Unknown keys are ignored. The first field that fails to coerce aborts the
/// call with that field's error and `model` is left as it was.
pub fn deserialize<M: Model>(model: &mut M, source: &Value) -> Result<()> {
    let props = source
        .as_object()
        .ok_or_else(|| CoercionError::invalid_value(source, M::TYPE_NAME))?;

    let mut staged = model.clone();
    for (key, value) in props {
        match staged.field_mut(key) {
            Some(field) => field.write(value).map_err(|err| err.in_field(key))?,
            None => tracing::trace!("{}: ignoring unknown field `{}`", M::TYPE_NAME, key),
        }
    }
    *model = staged;
    Ok(())
}
