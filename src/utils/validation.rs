use crate::utils::error::{ConfigError, Result};
use url::Url;

pub trait Validate {
    fn validate(&self) -> Result<(), ConfigError>;
}

pub fn validate_url(field_name: &str, url_str: &str) -> Result<(), ConfigError> {
    if url_str.is_empty() {
        return Err(ConfigError::InvalidValue {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: "URL cannot be empty".to_string(),
        });
    }

    match Url::parse(url_str) {
        Ok(url) => match url.scheme() {
            "http" | "https" => Ok(()),
            scheme => Err(ConfigError::InvalidValue {
                field: field_name.to_string(),
                value: url_str.to_string(),
                reason: format!("Unsupported URL scheme: {}", scheme),
            }),
        },
        Err(e) => Err(ConfigError::InvalidValue {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: format!("Invalid URL format: {}", e),
        }),
    }
}

pub fn validate_required_field<'a, T>(
    field_name: &str,
    value: &'a Option<T>,
) -> Result<&'a T, ConfigError> {
    value.as_ref().ok_or_else(|| ConfigError::Missing {
        field: field_name.to_string(),
    })
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<(), ConfigError> {
    if value.trim().is_empty() {
        return Err(ConfigError::InvalidValue {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Value cannot be empty or whitespace-only".to_string(),
        });
    }
    Ok(())
}

pub fn validate_one_of(field_name: &str, value: &str, allowed: &[&str]) -> Result<(), ConfigError> {
    if !allowed.contains(&value) {
        return Err(ConfigError::InvalidValue {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Must be one of: {}", allowed.join(", ")),
        });
    }
    Ok(())
}

pub fn validate_range<T: PartialOrd + std::fmt::Display + Copy>(
    field_name: &str,
    value: T,
    min: T,
    max: T,
) -> Result<(), ConfigError> {
    if value < min || value > max {
        return Err(ConfigError::InvalidValue {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Value must be between {} and {}", min, max),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_url() {
        assert!(validate_url("api.base_url", "https://api.smartsheet.com/2.0").is_ok());
        assert!(validate_url("api.base_url", "http://localhost:8080").is_ok());
        assert!(validate_url("api.base_url", "").is_err());
        assert!(validate_url("api.base_url", "invalid-url").is_err());
        assert!(validate_url("api.base_url", "ftp://example.com").is_err());
    }

    #[test]
    fn test_validate_range() {
        assert!(validate_range("retry.max_retry_time_seconds", 30, 0, 3600).is_ok());
        assert!(validate_range("retry.max_retry_time_seconds", 7200, 0, 3600).is_err());
    }

    #[test]
    fn test_validate_one_of() {
        assert!(validate_one_of("logging.format", "json", &["compact", "json"]).is_ok());
        let err = validate_one_of("logging.format", "xml", &["compact", "json"]).unwrap_err();
        assert!(err.to_string().contains("compact, json"));
    }

    #[test]
    fn test_validate_required_and_non_empty() {
        let token: Option<String> = None;
        assert!(matches!(
            validate_required_field("api.access_token", &token),
            Err(ConfigError::Missing { .. })
        ));
        assert!(validate_non_empty_string("api.access_token", "   ").is_err());
        assert!(validate_non_empty_string("api.access_token", "abc").is_ok());
    }
}
