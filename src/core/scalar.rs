use crate::domain::model::FieldValue;
use crate::domain::ports::{Construct, FieldContainer, FieldObject};
use crate::utils::error::{CoercionError, Result};
use chrono::{DateTime, NaiveDate, NaiveDateTime, SecondsFormat, Utc};
use serde_json::{Number, Value};
use std::any::Any;
use std::fmt::{self, Debug, Display};

/// A scalar kind a [`ScalarField`] (or a typed list element) can hold.
pub trait ScalarKind: Clone + PartialEq + Debug + Send + Sync + 'static {
    const KIND: &'static str;

    /// Strict conversion from the wire form; `None` on a kind mismatch.
    fn from_wire(raw: &Value) -> Option<Self>;
    fn to_wire(&self) -> Value;

    /// False for values JSON cannot carry.
    fn is_representable(&self) -> bool {
        true
    }
}

impl ScalarKind for Number {
    const KIND: &'static str = "Number";

    fn from_wire(raw: &Value) -> Option<Self> {
        match raw {
            Value::Number(number) => Some(number.clone()),
            _ => None,
        }
    }

    fn to_wire(&self) -> Value {
        Value::Number(self.clone())
    }
}

impl ScalarKind for i64 {
    const KIND: &'static str = "Integer";

    fn from_wire(raw: &Value) -> Option<Self> {
        raw.as_i64()
    }

    fn to_wire(&self) -> Value {
        Value::from(*self)
    }
}

impl ScalarKind for f64 {
    const KIND: &'static str = "Float";

    fn from_wire(raw: &Value) -> Option<Self> {
        raw.as_f64()
    }

    fn to_wire(&self) -> Value {
        Number::from_f64(*self).map_or(Value::Null, Value::Number)
    }

    fn is_representable(&self) -> bool {
        self.is_finite()
    }
}

impl ScalarKind for String {
    const KIND: &'static str = "String";

    fn from_wire(raw: &Value) -> Option<Self> {
        raw.as_str().map(str::to_string)
    }

    fn to_wire(&self) -> Value {
        Value::String(self.clone())
    }
}

impl ScalarKind for bool {
    const KIND: &'static str = "Boolean";

    fn from_wire(raw: &Value) -> Option<Self> {
        raw.as_bool()
    }

    fn to_wire(&self) -> Value {
        Value::Bool(*self)
    }
}

impl ScalarKind for DateTime<Utc> {
    const KIND: &'static str = "Timestamp";

    fn from_wire(raw: &Value) -> Option<Self> {
        raw.as_str().and_then(parse_timestamp)
    }

    fn to_wire(&self) -> Value {
        Value::String(self.to_rfc3339_opts(SecondsFormat::AutoSi, true))
    }
}

/// Parse an ISO-8601 timestamp. Offset-less inputs are taken as UTC.
pub fn parse_timestamp(text: &str) -> Option<DateTime<Utc>> {
    let text = text.trim();
    if let Ok(parsed) = DateTime::parse_from_rfc3339(text) {
        return Some(parsed.with_timezone(&Utc));
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(text, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(naive.and_utc());
    }
    NaiveDate::parse_from_str(text, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

macro_rules! scalar_field_object {
    ($($ty:ty),* $(,)?) => {
        $(
            impl FieldObject for $ty {
                fn kind(&self) -> &'static str {
                    <$ty as ScalarKind>::KIND
                }

                fn to_value(&self) -> Value {
                    self.to_wire()
                }

                fn has_wire_form(&self) -> bool {
                    <$ty as ScalarKind>::is_representable(self)
                }

                fn clone_object(&self) -> Box<dyn FieldObject> {
                    Box::new(self.clone())
                }

                fn eq_object(&self, other: &dyn FieldObject) -> bool {
                    other
                        .as_any()
                        .downcast_ref::<$ty>()
                        .is_some_and(|other| other == self)
                }

                fn as_any(&self) -> &dyn Any {
                    self
                }

                fn as_any_mut(&mut self) -> &mut dyn Any {
                    self
                }
            }

            impl Construct for $ty {
                fn declared_name() -> &'static str {
                    <$ty as ScalarKind>::KIND
                }

                fn construct(raw: &Value) -> Result<Self> {
                    <$ty as ScalarKind>::from_wire(raw)
                        .ok_or_else(|| CoercionError::invalid_value(raw, <$ty as ScalarKind>::KIND))
                }
            }
        )*
    };
}

scalar_field_object!(Number, i64, f64, String, bool, DateTime<Utc>);

/// Holds one scalar of kind `T`, validated on every write.
#[derive(Debug, Clone, PartialEq)]
pub struct ScalarField<T: ScalarKind> {
    value: FieldValue<T>,
    accept: Option<Vec<T>>,
}

pub type NumberField = ScalarField<Number>;
pub type StringField = ScalarField<String>;
pub type BooleanField = ScalarField<bool>;
pub type TimestampField = ScalarField<DateTime<Utc>>;

impl<T: ScalarKind> Default for ScalarField<T> {
    fn default() -> Self {
        Self {
            value: FieldValue::Absent,
            accept: None,
        }
    }
}

impl<T: ScalarKind> ScalarField<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_value(value: impl Into<T>) -> Result<Self> {
        let mut field = Self::new();
        field.set(value)?;
        Ok(field)
    }

    pub fn value(&self) -> Option<&T> {
        self.value.as_option()
    }

    pub fn state(&self) -> &FieldValue<T> {
        &self.value
    }

    pub fn set(&mut self, value: impl Into<T>) -> Result<()> {
        let value = value.into();
        if !value.is_representable() {
            return Err(CoercionError::InvalidValueType {
                value: Value::String(format!("{:?}", value)),
                expected: T::KIND.to_string(),
            });
        }
        self.check_accepted(&value)?;
        self.value = FieldValue::Present(value);
        Ok(())
    }

    /// `None` clears the field back to absent.
    pub fn set_option(&mut self, value: Option<T>) -> Result<()> {
        match value {
            Some(value) => self.set(value),
            None => {
                self.clear();
                Ok(())
            }
        }
    }

    pub fn clear(&mut self) {
        self.value = FieldValue::Absent;
    }

    pub fn set_explicit_null(&mut self) {
        self.value = FieldValue::ExplicitNull;
    }

    pub fn accept(&self) -> Option<&[T]> {
        self.accept.as_deref()
    }

    fn check_accepted(&self, value: &T) -> Result<()> {
        match &self.accept {
            Some(accept) if !accept.contains(value) => Err(CoercionError::InvalidValueType {
                value: value.to_wire(),
                expected: format!(
                    "one of [{}]",
                    accept
                        .iter()
                        .map(|allowed| allowed.to_wire().to_string())
                        .collect::<Vec<_>>()
                        .join(", ")
                ),
            }),
            _ => Ok(()),
        }
    }
}

impl StringField {
    /// A string field restricted to a closed set of literals.
    pub fn with_accept<I, S>(accept: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            value: FieldValue::Absent,
            accept: Some(accept.into_iter().map(Into::into).collect()),
        }
    }
}

impl<T: ScalarKind> FieldContainer for ScalarField<T> {
    fn read(&self) -> Option<Value> {
        self.value.to_wire(T::to_wire)
    }

    fn write(&mut self, input: &Value) -> Result<()> {
        if input.is_null() {
            self.set_explicit_null();
            return Ok(());
        }
        let value =
            T::from_wire(input).ok_or_else(|| CoercionError::invalid_value(input, T::KIND))?;
        self.check_accepted(&value)?;
        self.value = FieldValue::Present(value);
        Ok(())
    }
}

impl<T: ScalarKind> Display for ScalarField<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.value {
            FieldValue::Present(value) => match value.to_wire() {
                Value::String(text) => f.write_str(&text),
                other => write!(f, "{}", other),
            },
            _ => f.write_str("None"),
        }
    }
}
