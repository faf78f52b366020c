//! Shared DTO helpers used across multiple endpoints.

use serde::Deserialize;

/// Default `limit` for list endpoints.
pub(crate) fn default_limit() -> i64 {
    50
}

/// Clamps a requested limit into `[1, max]`.
#[must_use]
pub fn clamp_limit(limit: i64, max: i64) -> i64 {
    limit.clamp(1, max)
}

/// Query parameters shared by the simple list endpoints.
#[derive(Debug, Clone, Deserialize, utoipa::IntoParams)]
pub struct LimitParams {
    /// Maximum number of items to return (clamped to 200).
    #[serde(default = "default_limit")]
    pub limit: i64,
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn limits_clamp_to_range() {
        assert_eq!(clamp_limit(0, 200), 1);
        assert_eq!(clamp_limit(-5, 200), 1);
        assert_eq!(clamp_limit(50, 200), 50);
        assert_eq!(clamp_limit(1000, 200), 200);
    }
}
