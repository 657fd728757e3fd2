use crate::core::serialize::{deserialize, serialize};
use crate::utils::error::{CoercionError, Result};
use serde_json::{Map, Value};
use std::any::Any;
use std::fmt::Debug;

/// Per-field container that validates on write and renders its wire value on read.
pub trait FieldContainer: Debug + Send + Sync {
    /// Externally representable value. `None` means the field is left out of
    /// serialized output; `Some(Value::Null)` is an explicit null.
    fn read(&self) -> Option<Value>;

    /// Coerce `input` into the container. On error the container is unchanged.
    fn write(&mut self, input: &Value) -> Result<()>;
}

/// Type-erased value held by typed lists and object slots.
pub trait FieldObject: Any + Debug + Send + Sync {
    fn kind(&self) -> &'static str;
    fn to_value(&self) -> Value;

    /// False when `to_value` cannot carry this value and would emit `null`.
    fn has_wire_form(&self) -> bool {
        true
    }

    fn clone_object(&self) -> Box<dyn FieldObject>;
    fn eq_object(&self, other: &dyn FieldObject) -> bool;
    fn as_any(&self) -> &dyn Any;
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

impl Clone for Box<dyn FieldObject> {
    fn clone(&self) -> Self {
        self.clone_object()
    }
}

/// A type that can be built from its wire representation.
pub trait Construct: FieldObject + Sized {
    fn declared_name() -> &'static str;
    fn construct(raw: &Value) -> Result<Self>;
}

/// A model object: a fixed, declared set of named field containers.
///
/// Implementors list their wire field names in `FIELDS` (serialization order)
/// and hand out the matching container from `field`/`field_mut`.
pub trait Model: Default + Clone + Debug + PartialEq + Send + Sync + 'static {
    const TYPE_NAME: &'static str;
    const FIELDS: &'static [&'static str];

    fn field(&self, name: &str) -> Option<&dyn FieldContainer>;
    fn field_mut(&mut self, name: &str) -> Option<&mut dyn FieldContainer>;

    fn from_json(props: &Value) -> Result<Self> {
        let mut model = Self::default();
        deserialize(&mut model, props)?;
        Ok(model)
    }

    fn to_dict(&self) -> Map<String, Value> {
        serialize(self)
    }

    fn to_json(&self) -> String {
        Value::Object(self.to_dict()).to_string()
    }
}

impl<M: Model> FieldObject for M {
    fn kind(&self) -> &'static str {
        M::TYPE_NAME
    }

    fn to_value(&self) -> Value {
        Value::Object(serialize(self))
    }

    fn clone_object(&self) -> Box<dyn FieldObject> {
        Box::new(self.clone())
    }

    fn eq_object(&self, other: &dyn FieldObject) -> bool {
        other
            .as_any()
            .downcast_ref::<M>()
            .is_some_and(|other| other == self)
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

impl<M: Model> Construct for M {
    fn declared_name() -> &'static str {
        M::TYPE_NAME
    }

    fn construct(raw: &Value) -> Result<Self> {
        if !raw.is_object() {
            return Err(CoercionError::invalid_value(raw, M::TYPE_NAME));
        }
        M::from_json(raw)
    }
}

/// A closed, ordered set of named symbols.
pub trait Enumeration: Copy + Eq + Debug + Send + Sync + 'static {
    const SYMBOLS: &'static [Self];

    fn name(&self) -> &'static str;

    fn from_name(name: &str) -> Option<Self> {
        Self::SYMBOLS
            .iter()
            .copied()
            .find(|symbol| symbol.name() == name)
    }
}
