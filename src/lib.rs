pub mod config;
pub mod core;
pub mod domain;
pub mod models;
pub mod utils;

pub use config::ClientConfig;
pub use core::api_error::{ApiError, ApiErrorKind, SmartsheetError};
pub use core::enumerated::{EnumeratedList, EnumeratedValue};
pub use core::registry::{register, TypeHandle, TypeRef, TypeRegistry};
pub use core::retry::RetryPolicy;
pub use core::scalar::{BooleanField, NumberField, ScalarField, StringField, TimestampField};
pub use core::serialize::{deserialize, serialize};
pub use core::typed_list::{ListSource, TypedList};
pub use core::typed_object::TypedObject;
pub use domain::model::{FieldValue, Input, Item};
pub use domain::ports::{Construct, Enumeration, FieldContainer, FieldObject, Model};
pub use models::ErrorResult;
pub use utils::error::{CoercionError, ConfigError, Result};
