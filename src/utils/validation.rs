use crate::utils::error::{Result, ScoringError};

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_path(field_name: &str, path: &str) -> Result<()> {
    if path.trim().is_empty() {
        return Err(ScoringError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path cannot be empty".to_string(),
        });
    }

    if path.contains('\0') {
        return Err(ScoringError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path contains null bytes".to_string(),
        });
    }

    Ok(())
}

pub fn validate_positive_number(field_name: &str, value: usize, min_value: usize) -> Result<()> {
    if value < min_value {
        return Err(ScoringError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Value must be at least {}", min_value),
        });
    }
    Ok(())
}

/// 驗證數值位於開區間 (min, max) 內
pub fn validate_exclusive_range(field_name: &str, value: f64, min: f64, max: f64) -> Result<()> {
    if !(value > min && value < max) {
        return Err(ScoringError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Value must be strictly between {} and {}", min, max),
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
        return Err(ScoringError::InvalidConfigValueError {
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
    fn test_validate_path() {
        assert!(validate_path("model.path", "./model.bin").is_ok());
        assert!(validate_path("model.path", "").is_err());
        assert!(validate_path("model.path", "   ").is_err());
        assert!(validate_path("model.path", "bad\0path").is_err());
    }

    #[test]
    fn test_validate_positive_number() {
        assert!(validate_positive_number("training.samples_per_lead", 3, 1).is_ok());
        assert!(validate_positive_number("training.samples_per_lead", 0, 1).is_err());
    }

    #[test]
    fn test_validate_exclusive_range() {
        assert!(validate_exclusive_range("training.test_fraction", 0.2, 0.0, 1.0).is_ok());
        assert!(validate_exclusive_range("training.test_fraction", 0.0, 0.0, 1.0).is_err());
        assert!(validate_exclusive_range("training.test_fraction", 1.0, 0.0, 1.0).is_err());
        assert!(validate_exclusive_range("training.test_fraction", f64::NAN, 0.0, 1.0).is_err());
    }

    #[test]
    fn test_validate_range() {
        assert!(validate_range("model.max_iter", 1000, 1, 1_000_000).is_ok());
        assert!(validate_range("model.max_iter", 0, 1, 1_000_000).is_err());
    }
}
