use crate::utils::error::{Result, WebmentionError};
use url::Url;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

/// True for absolute URLs that can be fetched or posted to.
pub fn is_http_family(url: &Url) -> bool {
    matches!(url.scheme(), "http" | "https") && url.has_host()
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(WebmentionError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Value cannot be empty or whitespace-only".to_string(),
        });
    }
    Ok(())
}

pub fn validate_range<T: PartialOrd + std::fmt::Display + Copy>(
    field_name: &str,
    value: T,
    min: T,
    max: T,
) -> Result<()> {
    if value < min || value > max {
        return Err(WebmentionError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Value must be between {} and {}", min, max),
        });
    }
    Ok(())
}
