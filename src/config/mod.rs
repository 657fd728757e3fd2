pub mod toml_config;

pub use toml_config::{
    ApiConfig, ClientConfig, LoggingConfig, RetryConfig, ACCESS_TOKEN_ENV, DEFAULT_BASE_URL,
};
