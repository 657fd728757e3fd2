pub mod api_error;
pub mod enumerated;
pub mod registry;
pub mod retry;
pub mod scalar;
pub mod serialize;
pub mod typed_list;
pub mod typed_object;

pub use crate::domain::model::{FieldValue, Input, Item};
pub use crate::domain::ports::{Construct, Enumeration, FieldContainer, FieldObject, Model};
pub use crate::utils::error::Result;
