use crate::core::typed_list::TypedList;
use crate::domain::model::Item;
use crate::domain::ports::{Enumeration, FieldContainer};
use crate::utils::error::{CoercionError, Result};
use serde_json::Value;
use std::fmt;

/// A value bound to the symbol set `E`.
///
/// Unknown symbol names never fail: they leave the value unset, so symbols
/// the remote service adds later do not break older clients.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EnumeratedValue<E: Enumeration> {
    value: Option<E>,
}

impl<E: Enumeration> Default for EnumeratedValue<E> {
    fn default() -> Self {
        Self { value: None }
    }
}

impl<E: Enumeration> EnumeratedValue<E> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_symbol(symbol: E) -> Self {
        Self {
            value: Some(symbol),
        }
    }

    pub fn from_name(name: &str) -> Self {
        Self {
            value: E::from_name(name),
        }
    }

    /// Wrap a wire value: a known name maps to its symbol, anything else is unset.
    pub fn from_wire(raw: &Value) -> Self {
        let mut value = Self::new();
        value.set_wire(raw);
        value
    }

    pub fn value(&self) -> Option<E> {
        self.value
    }

    pub fn is_unset(&self) -> bool {
        self.value.is_none()
    }

    pub fn set(&mut self, symbol: E) {
        self.value = Some(symbol);
    }

    pub fn set_name(&mut self, name: &str) {
        self.value = E::from_name(name);
        if self.value.is_none() {
            tracing::debug!("unknown symbol `{}`, value left unset", name);
        }
    }

    pub fn set_wire(&mut self, raw: &Value) {
        match raw {
            Value::String(name) => self.set_name(name),
            _ => self.value = None,
        }
    }

    pub fn clear(&mut self) {
        self.value = None;
    }

    pub fn name(&self) -> Option<&'static str> {
        self.value.map(|symbol| symbol.name())
    }
}

impl<E: Enumeration> From<E> for EnumeratedValue<E> {
    fn from(symbol: E) -> Self {
        Self::from_symbol(symbol)
    }
}

impl<E: Enumeration> PartialEq<E> for EnumeratedValue<E> {
    fn eq(&self, other: &E) -> bool {
        self.value == Some(*other)
    }
}

/// Compares by name; a name outside the set never matches.
impl<E: Enumeration> PartialEq<str> for EnumeratedValue<E> {
    fn eq(&self, other: &str) -> bool {
        match E::from_name(other) {
            Some(symbol) => self.value == Some(symbol),
            None => false,
        }
    }
}

impl<E: Enumeration> PartialEq<&str> for EnumeratedValue<E> {
    fn eq(&self, other: &&str) -> bool {
        self == *other
    }
}

impl<E: Enumeration> fmt::Display for EnumeratedValue<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name().unwrap_or("None"))
    }
}

impl<E: Enumeration> FieldContainer for EnumeratedValue<E> {
    fn read(&self) -> Option<Value> {
        self.name().map(|name| Value::String(name.to_string()))
    }

    fn write(&mut self, input: &Value) -> Result<()> {
        self.set_wire(input);
        Ok(())
    }
}

/// List of [`EnumeratedValue`]s bound to one symbol set.
///
/// Loading a bare `null` keeps it as a single unset element that reads back
/// as `null` until the list is edited.
#[derive(Debug, Clone, PartialEq)]
pub struct EnumeratedList<E: Enumeration> {
    store: Vec<EnumeratedValue<E>>,
    explicit_null: bool,
}

impl<E: Enumeration> Default for EnumeratedList<E> {
    fn default() -> Self {
        Self {
            store: Vec::new(),
            explicit_null: false,
        }
    }
}

impl<E: Enumeration> EnumeratedList<E> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.store.len()
    }

    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&EnumeratedValue<E>> {
        self.store.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, EnumeratedValue<E>> {
        self.store.iter()
    }

    /// Set symbols in order, skipping unset entries.
    pub fn symbols(&self) -> impl Iterator<Item = E> + '_ {
        self.store.iter().filter_map(EnumeratedValue::value)
    }

    /// True while the list holds a bare `null` loaded from the wire.
    pub fn is_explicit_null(&self) -> bool {
        self.explicit_null
    }

    pub fn push(&mut self, value: impl Into<EnumeratedValue<E>>) {
        self.explicit_null = false;
        self.store.push(value.into());
    }

    pub fn push_name(&mut self, name: &str) {
        self.push(EnumeratedValue::from_name(name));
    }

    pub fn insert(&mut self, index: usize, value: impl Into<EnumeratedValue<E>>) {
        self.explicit_null = false;
        let index = index.min(self.store.len());
        self.store.insert(index, value.into());
    }

    pub fn set(&mut self, index: usize, value: impl Into<EnumeratedValue<E>>) -> Result<()> {
        let len = self.store.len();
        let slot = self
            .store
            .get_mut(index)
            .ok_or(CoercionError::IndexOutOfRange { index, len })?;
        *slot = value.into();
        self.explicit_null = false;
        Ok(())
    }

    pub fn remove(&mut self, index: usize) -> Option<EnumeratedValue<E>> {
        self.explicit_null = false;
        (index < self.store.len()).then(|| self.store.remove(index))
    }

    pub fn purge(&mut self) {
        self.explicit_null = false;
        self.store.clear();
    }

    pub fn load_symbols(&mut self, symbols: impl IntoIterator<Item = E>) {
        self.explicit_null = false;
        self.store = symbols.into_iter().map(EnumeratedValue::from_symbol).collect();
    }

    pub fn load_names<I, S>(&mut self, names: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.explicit_null = false;
        self.store = names
            .into_iter()
            .map(|name| EnumeratedValue::from_name(name.as_ref()))
            .collect();
    }

    /// Load from a wire value. An array wraps every element, a single scalar
    /// becomes the sole element. A bare `null` is that single element,
    /// unset, and marks the list as an explicit null.
    pub fn load_wire(&mut self, raw: &Value) {
        self.explicit_null = raw.is_null();
        self.store = match raw {
            Value::Array(values) => values.iter().map(EnumeratedValue::from_wire).collect(),
            other => vec![EnumeratedValue::from_wire(other)],
        };
    }

    /// Load from a typed list by way of its plain wire form.
    pub fn load_list(&mut self, list: &TypedList) {
        let values: Vec<Value> = list.iter().map(Item::to_value).collect();
        self.load_wire(&Value::Array(values));
    }
}

impl<E: Enumeration> FieldContainer for EnumeratedList<E> {
    fn read(&self) -> Option<Value> {
        if self.explicit_null {
            return Some(Value::Null);
        }
        if self.store.is_empty() {
            return None;
        }
        Some(Value::Array(
            self.store
                .iter()
                .map(|value| value.read().unwrap_or(Value::Null))
                .collect(),
        ))
    }

    fn write(&mut self, input: &Value) -> Result<()> {
        self.load_wire(input);
        Ok(())
    }
}

impl<E: Enumeration> fmt::Display for EnumeratedList<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<String> = self.store.iter().map(ToString::to_string).collect();
        write!(f, "[{}]", names.join(", "))
    }
}
