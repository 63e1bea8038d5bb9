//! Configuration validation utilities

use crate::types::{ReconcileError, ReconcileResult};

/// Highest supported amount scale for key derivation
pub const MAX_DECIMALS: u32 = 4;

/// Validate the amount scale used for rounding and key derivation
pub fn validate_decimals(decimals: u32) -> ReconcileResult<()> {
    if decimals > MAX_DECIMALS {
        return Err(ReconcileError::InvalidConfiguration(format!(
            "decimals must be between 0 and {MAX_DECIMALS}, got {decimals}"
        )));
    }
    Ok(())
}

/// Validate the matching day window; 0 means no window
pub fn validate_day_window(max_day_window: i64) -> ReconcileResult<()> {
    if max_day_window < 0 {
        return Err(ReconcileError::InvalidConfiguration(format!(
            "day window cannot be negative, got {max_day_window}"
        )));
    }
    Ok(())
}

/// Validate exclusion keywords before they are normalized into the filter.
///
/// An empty keyword would match every description via substring containment,
/// silently emptying the matching pool, so it is rejected up front.
pub fn validate_exclusion_keywords(keywords: &[String]) -> ReconcileResult<()> {
    for keyword in keywords {
        if keyword.trim().is_empty() {
            return Err(ReconcileError::InvalidConfiguration(
                "exclusion keyword cannot be empty or whitespace".to_string(),
            ));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decimals_range() {
        assert!(validate_decimals(0).is_ok());
        assert!(validate_decimals(2).is_ok());
        assert!(validate_decimals(4).is_ok());
        assert!(validate_decimals(5).is_err());
    }

    #[test]
    fn day_window_rejects_negative() {
        assert!(validate_day_window(0).is_ok());
        assert!(validate_day_window(30).is_ok());
        assert!(validate_day_window(-1).is_err());
    }

    #[test]
    fn blank_keywords_are_rejected() {
        assert!(validate_exclusion_keywords(&["IVA".to_string()]).is_ok());
        assert!(validate_exclusion_keywords(&[]).is_ok());
        let err = validate_exclusion_keywords(&["  ".to_string()]).unwrap_err();
        assert!(err.to_string().contains("exclusion keyword"));
    }
}
