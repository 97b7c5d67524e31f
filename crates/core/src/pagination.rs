//! Offset paging over an already-selected contributor list.
//!
//! Paging runs after the limit/threshold cut, so it only splits the shown
//! rows into screens. It never changes which rows are shown or the "others"
//! count.

/// Rows per screen when the caller gives no page size.
pub const DEFAULT_PAGE_SIZE: i64 = 50;

/// Upper bound on a caller-supplied page size.
pub const MAX_PAGE_SIZE: i64 = 500;

/// Clamp a user-provided page size to `1..=max`, defaulting when absent.
pub fn clamp_page_size(page_size: Option<i64>, default: i64, max: i64) -> i64 {
    page_size.unwrap_or(default).max(1).min(max)
}

/// Clamp a user-provided offset to non-negative.
pub fn clamp_offset(offset: Option<i64>) -> i64 {
    offset.unwrap_or(0).max(0)
}

/// The `page_size` items starting at `offset`. Empty past the end.
pub fn page_of<T>(items: Vec<T>, offset: i64, page_size: i64) -> Vec<T> {
    let skip = usize::try_from(offset).unwrap_or(0);
    let take = usize::try_from(page_size).unwrap_or(0);
    items.into_iter().skip(skip).take(take).collect()
}
