use serde_json::Value;
use thiserror::Error;

/// Failure raised by a field container when an input cannot be coerced
/// into the container's declared type.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CoercionError {
    #[error("invalid value `{value}`: expected {expected}")]
    InvalidValueType { value: Value, expected: String },

    #[error("can't convert `{value}` to {expected} in TypedList")]
    InvalidElementType { value: Value, expected: String },

    #[error("can't load TypedList({expected}) from `{value}`")]
    InvalidListSource { value: Value, expected: String },

    #[error("index {index} out of range for list of length {len}")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("no type registered under name `{name}`")]
    UnresolvedType { name: String },

    #[error("field `{field}`: {source}")]
    Field {
        field: String,
        #[source]
        source: Box<CoercionError>,
    },
}

impl CoercionError {
    pub fn invalid_value(value: &Value, expected: impl Into<String>) -> Self {
        Self::InvalidValueType {
            value: value.clone(),
            expected: expected.into(),
        }
    }

    pub fn in_field(self, field: &str) -> Self {
        Self::Field {
            field: field.to_string(),
            source: Box::new(self),
        }
    }

    /// Innermost error, looking through `Field` wrappers.
    pub fn root(&self) -> &CoercionError {
        match self {
            CoercionError::Field { source, .. } => source.root(),
            other => other,
        }
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parsing error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Invalid value for {field}: {value} ({reason})")]
    InvalidValue {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration: {field}")]
    Missing { field: String },
}

pub type Result<T, E = CoercionError> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_invalid_value_mentions_value_and_expectation() {
        let err = CoercionError::invalid_value(&json!(42), "String");
        assert_eq!(err.to_string(), "invalid value `42`: expected String");
    }

    #[test]
    fn test_field_wrapper_keeps_source() {
        let err = CoercionError::invalid_value(&json!("x"), "Boolean").in_field("locked");
        assert!(err.to_string().starts_with("field `locked`"));
        assert!(matches!(
            err.root(),
            CoercionError::InvalidValueType { expected, .. } if expected == "Boolean"
        ));
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn test_config_error_from_io() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let err: ConfigError = io_err.into();
        assert!(matches!(err, ConfigError::Io(_)));
        assert!(err.to_string().contains("IO error"));
    }
}
