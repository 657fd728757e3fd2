use crate::core::scalar::{NumberField, StringField};
use crate::domain::ports::{FieldContainer, Model};

/// Error payload returned by the remote API.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ErrorResult {
    pub error_code: NumberField,
    pub message: StringField,
    pub ref_id: StringField,
}

impl ErrorResult {
    pub fn code(&self) -> Option<i64> {
        self.error_code.value().and_then(|code| code.as_i64())
    }

    pub fn message(&self) -> Option<&str> {
        self.message.value().map(String::as_str)
    }

    pub fn ref_id(&self) -> Option<&str> {
        self.ref_id.value().map(String::as_str)
    }
}

impl Model for ErrorResult {
    const TYPE_NAME: &'static str = "Error";
    const FIELDS: &'static [&'static str] = &["errorCode", "message", "refId"];

    fn field(&self, name: &str) -> Option<&dyn FieldContainer> {
        let field: &dyn FieldContainer = match name {
            "errorCode" => &self.error_code,
            "message" => &self.message,
            "refId" => &self.ref_id,
            _ => return None,
        };
        Some(field)
    }

    fn field_mut(&mut self, name: &str) -> Option<&mut dyn FieldContainer> {
        let field: &mut dyn FieldContainer = match name {
            "errorCode" => &mut self.error_code,
            "message" => &mut self.message,
            "refId" => &mut self.ref_id,
            _ => return None,
        };
        Some(field)
    }
}
