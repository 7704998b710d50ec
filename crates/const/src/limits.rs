//! Business constraint constants.

/// Default page size for the administrative account listing.
pub const DEFAULT_PAGE_SIZE: usize = 10;

/// Maximum page size a caller may request.
///
/// Requests above this are clamped, keeping a single admin query from
/// materializing an unbounded result set.
pub const MAX_PAGE_SIZE: usize = 100;

/// Maximum valid worker ID for snowflake ID generation (10 bits, 0-1023).
pub const MAX_WORKER_ID: u16 = 1023;
