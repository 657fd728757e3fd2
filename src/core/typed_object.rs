use crate::core::registry::TypeRef;
use crate::domain::model::{FieldValue, Input};
use crate::domain::ports::{Construct, FieldContainer, FieldObject};
use crate::utils::error::{CoercionError, Result};
use serde_json::Value;

/// Slot holding at most one embedded object of a declared type.
#[derive(Debug, Clone)]
pub struct TypedObject {
    object_type: TypeRef,
    value: FieldValue<Box<dyn FieldObject>>,
}

impl TypedObject {
    pub fn new(object_type: TypeRef) -> Self {
        Self {
            object_type,
            value: FieldValue::Absent,
        }
    }

    pub fn of<T: Construct>() -> Self {
        Self::new(TypeRef::of::<T>())
    }

    pub fn named(name: &'static str) -> Self {
        Self::new(TypeRef::named(name))
    }

    pub fn object_type(&self) -> &TypeRef {
        &self.object_type
    }

    pub fn value(&self) -> &FieldValue<Box<dyn FieldObject>> {
        &self.value
    }

    pub fn get<T: FieldObject>(&self) -> Option<&T> {
        self.value
            .as_option()
            .and_then(|object| object.as_any().downcast_ref::<T>())
    }

    pub fn get_mut<T: FieldObject>(&mut self) -> Option<&mut T> {
        self.value
            .as_option_mut()
            .and_then(|object| object.as_any_mut().downcast_mut::<T>())
    }

    /// Store `input`: an instance of the declared type as-is, a JSON object
    /// by constructing the declared type from it, or an explicit null.
    pub fn set(&mut self, input: Input) -> Result<()> {
        let value = match input {
            Input::ExplicitNull | Input::Raw(Value::Null) => FieldValue::ExplicitNull,
            Input::Object(object) => {
                let handle = self.object_type.resolve()?;
                if !handle.is_instance(object.as_ref()) {
                    return Err(CoercionError::invalid_value(&object.to_value(), handle.name()));
                }
                if !object.has_wire_form() {
                    return Err(CoercionError::InvalidValueType {
                        value: Value::String(format!("{:?}", object)),
                        expected: handle.name().to_string(),
                    });
                }
                FieldValue::Present(object)
            }
            Input::Raw(raw) => {
                let handle = self.object_type.resolve()?;
                if !raw.is_object() {
                    return Err(CoercionError::invalid_value(&raw, handle.name()));
                }
                FieldValue::Present(handle.construct(&raw)?)
            }
        };
        self.value = value;
        Ok(())
    }

    pub fn set_object<T: FieldObject>(&mut self, object: T) -> Result<()> {
        self.set(Input::object(object))
    }

    pub fn clear(&mut self) {
        self.value = FieldValue::Absent;
    }
}

impl FieldContainer for TypedObject {
    fn read(&self) -> Option<Value> {
        self.value.to_wire(|object| object.to_value())
    }

    fn write(&mut self, input: &Value) -> Result<()> {
        self.set(Input::Raw(input.clone()))
    }
}

impl PartialEq for TypedObject {
    fn eq(&self, other: &Self) -> bool {
        if self.object_type != other.object_type {
            return false;
        }
        match (&self.value, &other.value) {
            (FieldValue::Present(left), FieldValue::Present(right)) => {
                left.eq_object(right.as_ref())
            }
            (FieldValue::Absent, FieldValue::Absent) => true,
            (FieldValue::ExplicitNull, FieldValue::ExplicitNull) => true,
            _ => false,
        }
    }
}
