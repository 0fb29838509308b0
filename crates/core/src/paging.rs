//! Page-size limits shared by list endpoints and the target pool loader.

/// Number of targets loaded into the available pool.
pub const POOL_PAGE_SIZE: i64 = 100;

/// Default page size for plain list endpoints.
pub const DEFAULT_LIST_LIMIT: i64 = 50;

/// Hard upper bound on any page size.
pub const MAX_LIST_LIMIT: i64 = 500;

/// Clamp a user-provided limit to valid bounds.
pub fn clamp_limit(limit: Option<i64>, default: i64, max: i64) -> i64 {
    limit.unwrap_or(default).max(1).min(max)
}

/// Clamp a user-provided offset to non-negative.
pub fn clamp_offset(offset: Option<i64>) -> i64 {
    offset.unwrap_or(0).max(0)
}
