/**
 * Upper bound on a single lock duration, in seconds.
 *
 * Lock requests above this are clamped rather than rejected so an
 * owner fat-fingering a duration can always unlock by waiting it out.
 */
pub const MAX_LOCK_DURATION: u64 = 365 * 24 * 60 * 60;

/**
 * History & listing pagination bounds.
 *
 * Queries without an explicit limit return DEFAULT_PAGE_SIZE entries;
 * explicit limits are clamped to MAX_PAGE_SIZE to keep responses bounded.
 */
pub const DEFAULT_PAGE_SIZE: usize = 30;
pub const MAX_PAGE_SIZE: usize = 100;
