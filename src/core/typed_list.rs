use crate::core::registry::{TypeHandle, TypeRef};
use crate::domain::model::{Input, Item};
use crate::domain::ports::{Construct, FieldContainer, FieldObject};
use crate::utils::error::{CoercionError, Result};
use serde_json::Value;
use std::fmt;

/// Source for a bulk [`TypedList::load`].
#[derive(Debug, Clone)]
pub enum ListSource {
    /// Wire form: an array, or `null` for a single explicit-null element.
    Json(Value),
    Items(Vec<Input>),
    List(TypedList),
    Object(Box<dyn FieldObject>),
    ExplicitNull,
}

impl From<Value> for ListSource {
    fn from(value: Value) -> Self {
        ListSource::Json(value)
    }
}

impl From<Vec<Input>> for ListSource {
    fn from(items: Vec<Input>) -> Self {
        ListSource::Items(items)
    }
}

impl From<TypedList> for ListSource {
    fn from(list: TypedList) -> Self {
        ListSource::List(list)
    }
}

/// Ordered, mutable sequence restricted to one declared element type.
///
/// Every element is either an instance of the declared type or an explicit
/// null. Rejected input aborts the whole call and leaves the list untouched.
///
/// A list loaded from a bare `null` holds one explicit-null element and reads
/// back as `null` until it is edited; a list loaded from `[null]` reads back
/// as `[null]`.
#[derive(Clone)]
pub struct TypedList {
    item_type: TypeRef,
    store: Vec<Item>,
    explicit_null: bool,
}

impl TypedList {
    pub fn new(item_type: TypeRef) -> Self {
        Self {
            item_type,
            store: Vec::new(),
            explicit_null: false,
        }
    }

    pub fn of<T: Construct>() -> Self {
        Self::new(TypeRef::of::<T>())
    }

    /// Element type resolved by name on first use.
    pub fn named(name: &'static str) -> Self {
        Self::new(TypeRef::named(name))
    }

    pub fn item_type(&self) -> &TypeRef {
        &self.item_type
    }

    pub fn len(&self) -> usize {
        self.store.len()
    }

    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }

    /// True while the list holds a bare `null` loaded from the wire.
    pub fn is_explicit_null(&self) -> bool {
        self.explicit_null
    }

    pub fn get(&self, index: usize) -> Option<&Item> {
        self.store.get(index)
    }

    pub fn get_as<T: FieldObject>(&self, index: usize) -> Option<&T> {
        self.store.get(index).and_then(Item::downcast_ref::<T>)
    }

    pub fn get_mut_as<T: FieldObject>(&mut self, index: usize) -> Option<&mut T> {
        self.store.get_mut(index).and_then(Item::downcast_mut::<T>)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Item> {
        self.store.iter()
    }

    /// Elements of type `T`, skipping explicit nulls.
    pub fn iter_as<T: FieldObject>(&self) -> impl Iterator<Item = &T> + '_ {
        self.store.iter().filter_map(Item::downcast_ref::<T>)
    }

    pub fn to_list(&self) -> &[Item] {
        &self.store
    }

    /// Coerce one input into a storable element.
    pub fn convert(&self, item: Input) -> Result<Item> {
        let handle = self.item_type.resolve()?;
        convert_with(handle, item)
    }

    pub fn insert(&mut self, index: usize, item: Input) -> Result<()> {
        let item = self.convert(item)?;
        let index = index.min(self.store.len());
        self.store.insert(index, item);
        self.explicit_null = false;
        Ok(())
    }

    pub fn push(&mut self, item: Input) -> Result<()> {
        let item = self.convert(item)?;
        self.store.push(item);
        self.explicit_null = false;
        Ok(())
    }

    pub fn push_object<T: FieldObject>(&mut self, item: T) -> Result<()> {
        self.push(Input::object(item))
    }

    pub fn set(&mut self, index: usize, item: Input) -> Result<()> {
        let len = self.store.len();
        if index >= len {
            return Err(CoercionError::IndexOutOfRange { index, len });
        }
        let item = self.convert(item)?;
        tracing::debug!("TypedList({}) set [{}]", self.item_type.name(), index);
        self.store[index] = item;
        self.explicit_null = false;
        Ok(())
    }

    pub fn remove(&mut self, index: usize) -> Option<Item> {
        let removed = (index < self.store.len()).then(|| self.store.remove(index));
        if removed.is_some() {
            self.explicit_null = false;
        }
        removed
    }

    /// Empty the list in place.
    pub fn purge(&mut self) {
        self.store.clear();
        self.explicit_null = false;
    }

    /// Replace the whole content from `source`.
    pub fn load(&mut self, source: impl Into<ListSource>) -> Result<()> {
        let handle = self.item_type.resolve()?;
        let source = source.into();
        let explicit_null = match &source {
            ListSource::Json(Value::Null) | ListSource::ExplicitNull => true,
            ListSource::List(list) => list.explicit_null,
            _ => false,
        };
        let items = match source {
            ListSource::Json(Value::Array(values)) => values
                .into_iter()
                .map(|value| convert_with(handle, raw_input(value)))
                .collect::<Result<Vec<_>>>()?,
            ListSource::Json(Value::Null) | ListSource::ExplicitNull => vec![Item::ExplicitNull],
            ListSource::Json(other) => match handle.construct(&other) {
                Ok(object) => vec![checked_instance(handle, object)?],
                Err(_) => return Err(invalid_source(&other, handle)),
            },
            ListSource::Items(inputs) => inputs
                .into_iter()
                .map(|input| convert_with(handle, input))
                .collect::<Result<Vec<_>>>()?,
            ListSource::List(list) => {
                let source_type = list.item_type.resolve()?;
                if source_type != handle {
                    return Err(invalid_source(&list.to_value(), handle));
                }
                list.store
            }
            ListSource::Object(object) if handle.is_instance(object.as_ref()) => {
                vec![checked_instance(handle, object)?]
            }
            ListSource::Object(object) => return Err(invalid_source(&object.to_value(), handle)),
        };
        self.store.clear();
        self.store.extend(items);
        self.explicit_null = explicit_null;
        Ok(())
    }

    fn to_value(&self) -> Value {
        Value::Array(self.store.iter().map(Item::to_value).collect())
    }
}

fn raw_input(value: Value) -> Input {
    if value.is_null() {
        Input::ExplicitNull
    } else {
        Input::Raw(value)
    }
}

fn invalid_source(value: &Value, handle: TypeHandle) -> CoercionError {
    CoercionError::InvalidListSource {
        value: value.clone(),
        expected: handle.name().to_string(),
    }
}

/// An element must keep its own wire form: one that renders as `null` would
/// come back as an explicit null.
fn checked_instance(handle: TypeHandle, object: Box<dyn FieldObject>) -> Result<Item> {
    if !object.has_wire_form() {
        return Err(CoercionError::InvalidElementType {
            value: Value::String(format!("{:?}", object)),
            expected: handle.name().to_string(),
        });
    }
    Ok(Item::Object(object))
}

fn convert_with(handle: TypeHandle, item: Input) -> Result<Item> {
    match item {
        Input::ExplicitNull | Input::Raw(Value::Null) => Ok(Item::ExplicitNull),
        Input::Object(object) if handle.is_instance(object.as_ref()) => {
            checked_instance(handle, object)
        }
        Input::Object(object) => convert_with(handle, Input::Raw(object.to_value())),
        Input::Raw(raw) => match handle.construct(&raw) {
            Ok(object) => {
                tracing::debug!("item converted to {}: {}", handle.name(), raw);
                Ok(Item::Object(object))
            }
            Err(_) => Err(CoercionError::InvalidElementType {
                value: raw,
                expected: handle.name().to_string(),
            }),
        },
    }
}

impl FieldContainer for TypedList {
    fn read(&self) -> Option<Value> {
        if self.explicit_null {
            return Some(Value::Null);
        }
        (!self.store.is_empty()).then(|| self.to_value())
    }

    fn write(&mut self, input: &Value) -> Result<()> {
        self.load(ListSource::Json(input.clone()))
    }
}

impl PartialEq for TypedList {
    fn eq(&self, other: &Self) -> bool {
        self.item_type == other.item_type
            && self.explicit_null == other.explicit_null
            && self.store == other.store
    }
}

impl fmt::Debug for TypedList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TypedList")
            .field("item_type", &self.item_type.name())
            .field("contents", &self.store)
            .field("explicit_null", &self.explicit_null)
            .finish()
    }
}

impl fmt::Display for TypedList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_value())
    }
}

impl<'a> IntoIterator for &'a TypedList {
    type Item = &'a Item;
    type IntoIter = std::slice::Iter<'a, Item>;

    fn into_iter(self) -> Self::IntoIter {
        self.store.iter()
    }
}
