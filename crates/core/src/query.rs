//! Pagination defaults and clamps for list endpoints.
//!
//! This module lives in `core` (zero internal deps) so both the API layer
//! and any future CLI tooling share the same bounds.

/// Default number of tickets per list page.
pub const DEFAULT_LIST_LIMIT: i64 = 20;

/// Maximum number of tickets per list page.
pub const MAX_LIST_LIMIT: i64 = 100;

/// Clamp a user-provided limit to valid bounds.
pub fn clamp_limit(limit: Option<i64>, default: i64, max: i64) -> i64 {
    limit.unwrap_or(default).max(1).min(max)
}

/// Clamp a user-provided offset to non-negative.
pub fn clamp_offset(offset: Option<i64>) -> i64 {
    offset.unwrap_or(0).max(0)
}

// ── Tests ────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    // -- clamp_limit tests --

    #[test]
    fn test_clamp_limit_uses_default_when_none() {
        assert_eq!(clamp_limit(None, 20, 100), 20);
    }

    #[test]
    fn test_clamp_limit_respects_max() {
        assert_eq!(clamp_limit(Some(500), 20, 100), 100);
    }

    #[test]
    fn test_clamp_limit_floors_at_one() {
        assert_eq!(clamp_limit(Some(0), 20, 100), 1);
        assert_eq!(clamp_limit(Some(-3), 20, 100), 1);
    }

    #[test]
    fn test_clamp_limit_passes_through_valid_value() {
        assert_eq!(clamp_limit(Some(50), 20, 100), 50);
    }

    // -- clamp_offset tests --

    #[test]
    fn test_clamp_offset_defaults_to_zero() {
        assert_eq!(clamp_offset(None), 0);
    }

    #[test]
    fn test_clamp_offset_floors_at_zero() {
        assert_eq!(clamp_offset(Some(-10)), 0);
    }

    #[test]
    fn test_clamp_offset_passes_through_valid_value() {
        assert_eq!(clamp_offset(Some(40)), 40);
    }
}
