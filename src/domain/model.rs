use crate::domain::ports::FieldObject;
use serde_json::Value;

/// State of a single-valued field.
///
/// `Absent` means the caller never touched the field and it is left out of
/// serialized output. `ExplicitNull` asks the remote service to clear the
/// field and serializes to JSON `null`.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue<T> {
    Absent,
    ExplicitNull,
    Present(T),
}

impl<T> Default for FieldValue<T> {
    fn default() -> Self {
        FieldValue::Absent
    }
}

impl<T> FieldValue<T> {
    pub fn is_absent(&self) -> bool {
        matches!(self, FieldValue::Absent)
    }

    pub fn is_explicit_null(&self) -> bool {
        matches!(self, FieldValue::ExplicitNull)
    }

    pub fn as_option(&self) -> Option<&T> {
        match self {
            FieldValue::Present(value) => Some(value),
            _ => None,
        }
    }

    pub fn as_option_mut(&mut self) -> Option<&mut T> {
        match self {
            FieldValue::Present(value) => Some(value),
            _ => None,
        }
    }

    /// Wire form: `None` for absent, JSON `null` for an explicit null.
    pub fn to_wire(&self, present: impl FnOnce(&T) -> Value) -> Option<Value> {
        match self {
            FieldValue::Absent => None,
            FieldValue::ExplicitNull => Some(Value::Null),
            FieldValue::Present(value) => Some(present(value)),
        }
    }
}

impl<T> From<Option<T>> for FieldValue<T> {
    fn from(value: Option<T>) -> Self {
        match value {
            Some(value) => FieldValue::Present(value),
            None => FieldValue::Absent,
        }
    }
}

/// One stored element of a typed list.
#[derive(Debug, Clone)]
pub enum Item {
    ExplicitNull,
    Object(Box<dyn FieldObject>),
}

impl Item {
    pub fn is_explicit_null(&self) -> bool {
        matches!(self, Item::ExplicitNull)
    }

    pub fn downcast_ref<T: FieldObject>(&self) -> Option<&T> {
        match self {
            Item::Object(object) => object.as_any().downcast_ref::<T>(),
            Item::ExplicitNull => None,
        }
    }

    pub fn downcast_mut<T: FieldObject>(&mut self) -> Option<&mut T> {
        match self {
            Item::Object(object) => object.as_any_mut().downcast_mut::<T>(),
            Item::ExplicitNull => None,
        }
    }

    pub fn to_value(&self) -> Value {
        match self {
            Item::ExplicitNull => Value::Null,
            Item::Object(object) => object.to_value(),
        }
    }
}

impl PartialEq for Item {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Item::ExplicitNull, Item::ExplicitNull) => true,
            (Item::Object(left), Item::Object(right)) => left.eq_object(right.as_ref()),
            _ => false,
        }
    }
}

/// Something offered to a container for coercion.
#[derive(Debug, Clone)]
pub enum Input {
    ExplicitNull,
    /// Wire representation, converted by constructing the declared type.
    Raw(Value),
    /// An already-typed value, stored as-is when its type matches.
    Object(Box<dyn FieldObject>),
}

impl Input {
    pub fn object<T: FieldObject>(value: T) -> Self {
        Input::Object(Box::new(value))
    }

    pub fn raw(value: impl Into<Value>) -> Self {
        Input::Raw(value.into())
    }

    pub fn to_value(&self) -> Value {
        match self {
            Input::ExplicitNull => Value::Null,
            Input::Raw(value) => value.clone(),
            Input::Object(object) => object.to_value(),
        }
    }
}

impl From<Value> for Input {
    fn from(value: Value) -> Self {
        Input::Raw(value)
    }
}

impl From<Item> for Input {
    fn from(item: Item) -> Self {
        match item {
            Item::ExplicitNull => Input::ExplicitNull,
            Item::Object(object) => Input::Object(object),
        }
    }
}
