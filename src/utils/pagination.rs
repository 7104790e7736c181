use serde::Serialize;
use utoipa::ToSchema;

/// Envelope for paginated listings: total matching rows plus the page.
#[derive(Debug, Serialize, ToSchema)]
pub struct Paginated<T> {
    pub total: i64,
    pub items: Vec<T>,
}

pub fn clamp_limit(limit: Option<i64>) -> i64 {
    limit.unwrap_or(100).clamp(1, 500)
}

pub fn clamp_skip(skip: Option<i64>) -> i64 {
    skip.unwrap_or(0).max(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        assert_eq!(clamp_limit(None), 100);
        assert_eq!(clamp_skip(None), 0);
    }

    #[test]
    fn test_bounds() {
        assert_eq!(clamp_limit(Some(10_000)), 500);
        assert_eq!(clamp_limit(Some(0)), 1);
        assert_eq!(clamp_limit(Some(-3)), 1);
        assert_eq!(clamp_skip(Some(-5)), 0);
        assert_eq!(clamp_skip(Some(42)), 42);
    }
}
