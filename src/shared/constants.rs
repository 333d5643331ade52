/// Default page size for pagination
pub const DEFAULT_PAGE_SIZE: i64 = 10;

/// Maximum page size allowed
pub const MAX_PAGE_SIZE: i64 = 100;

/// Number of reviews returned by the public review listing
pub const PUBLIC_REVIEW_LIMIT: i64 = 10;

/// Length in bytes of the raw password-reset token
pub const RESET_TOKEN_BYTES: usize = 32;
