// Models the core needs for itself. Resource models are generated on top of the core and live elsewhere.

pub mod error_result;

pub use error_result::ErrorResult;
