use crate::utils::error::{PlotError, Result};
use std::collections::HashSet;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_path(field_name: &str, path: &str) -> Result<()> {
    if path.is_empty() {
        return Err(PlotError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path cannot be empty".to_string(),
        });
    }

    if path.contains('\0') {
        return Err(PlotError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path contains null bytes".to_string(),
        });
    }

    Ok(())
}

pub fn validate_positive_number(field_name: &str, value: usize, min_value: usize) -> Result<()> {
    if value < min_value {
        return Err(PlotError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Value must be at least {}", min_value),
        });
    }
    Ok(())
}

pub fn validate_positive_float(field_name: &str, value: f64) -> Result<()> {
    // NaN 也會在這裡被擋下
    if !(value > 0.0) || !value.is_finite() {
        return Err(PlotError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Value must be a finite number greater than 0".to_string(),
        });
    }
    Ok(())
}

pub fn validate_file_extension(field_name: &str, file: &str, allowed_extensions: &[&str]) -> Result<()> {
    let allowed_set: HashSet<&str> = allowed_extensions.iter().copied().collect();

    match std::path::Path::new(file)
        .extension()
        .and_then(|ext| ext.to_str())
    {
        Some(extension) if allowed_set.contains(extension.to_ascii_lowercase().as_str()) => Ok(()),
        Some(extension) => Err(PlotError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: file.to_string(),
            reason: format!(
                "Unsupported file extension: {}. Allowed extensions: {}",
                extension,
                allowed_extensions.join(", ")
            ),
        }),
        None => Err(PlotError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: file.to_string(),
            reason: "File has no extension or invalid filename".to_string(),
        }),
    }
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(PlotError::InvalidConfigValueError {
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
        return Err(PlotError::InvalidConfigValueError {
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
    fn test_validate_positive_number() {
        assert!(validate_positive_number("render.segments", 10_000, 1).is_ok());
        assert!(validate_positive_number("render.segments", 0, 1).is_err());
    }

    #[test]
    fn test_validate_positive_float() {
        assert!(validate_positive_float("render.label_radius", 6.0).is_ok());
        assert!(validate_positive_float("render.label_radius", 0.0).is_err());
        assert!(validate_positive_float("render.label_radius", f64::NAN).is_err());
        assert!(validate_positive_float("render.label_radius", f64::INFINITY).is_err());
    }

    #[test]
    fn test_validate_file_extension() {
        assert!(validate_file_extension("data.path", "pbs_2023.csv", &["csv"]).is_ok());
        assert!(validate_file_extension("data.path", "PBS_2023.CSV", &["csv"]).is_ok());
        assert!(validate_file_extension("data.path", "pbs_2023.xlsx", &["csv"]).is_err());
        assert!(validate_file_extension("data.path", "pbs_2023", &["csv"]).is_err());
    }

    #[test]
    fn test_validate_range_and_strings() {
        assert!(validate_range("render.width", 1200, 100, 10_000).is_ok());
        assert!(validate_range("render.width", 50, 100, 10_000).is_err());
        assert!(validate_non_empty_string("system.name", "PBS: 2023").is_ok());
        assert!(validate_non_empty_string("system.name", "   ").is_err());
    }
}
