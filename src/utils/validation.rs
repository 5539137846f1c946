use crate::utils::error::{Result, SongdlError};
use url::Url;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

fn invalid(field_name: &str, value: impl std::fmt::Display, reason: &str) -> SongdlError {
    SongdlError::usage(format!(
        "invalid value '{}' for {}: {}",
        value, field_name, reason
    ))
}

pub fn validate_url(field_name: &str, url_str: &str) -> Result<()> {
    if url_str.is_empty() {
        return Err(invalid(field_name, url_str, "URL cannot be empty"));
    }

    match Url::parse(url_str) {
        Ok(url) => match url.scheme() {
            "http" | "https" => Ok(()),
            scheme => Err(invalid(
                field_name,
                url_str,
                &format!("unsupported URL scheme: {}", scheme),
            )),
        },
        Err(e) => Err(invalid(
            field_name,
            url_str,
            &format!("invalid URL format: {}", e),
        )),
    }
}

pub fn validate_path(field_name: &str, path: &str) -> Result<()> {
    if path.is_empty() {
        return Err(invalid(field_name, path, "path cannot be empty"));
    }

    if path.contains('\0') {
        return Err(invalid(field_name, path.escape_default(), "path contains null bytes"));
    }

    Ok(())
}

pub fn validate_non_empty(field_name: &str, value: &str) -> Result<()> {
    if value.is_empty() {
        return Err(SongdlError::usage(format!("{} is required", field_name)));
    }
    Ok(())
}

pub fn validate_positive_number(field_name: &str, value: i64, min_value: i64) -> Result<()> {
    if value < min_value {
        return Err(invalid(
            field_name,
            value,
            &format!("value must be at least {}", min_value),
        ));
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
        return Err(invalid(
            field_name,
            value,
            &format!("value must be between {} and {}", min, max),
        ));
    }
    Ok(())
}
