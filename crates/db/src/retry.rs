//! Immediate retry for single-statement writes that lose a concurrency race.
//!
//! Counter writes are atomic statements or short transactions, so PostgreSQL
//! serializes them per key. Under contention it can still abort one side with
//! a serialization failure, a deadlock, or a unique violation from two
//! concurrent first inserts. Those writes are safe to replay as-is.

use std::future::Future;

/// Total attempts (first try included) before the error is surfaced.
pub const MAX_WRITE_ATTEMPTS: u32 = 3;

/// PostgreSQL SQLSTATEs that mean "another transaction won, try again".
const RETRYABLE_CODES: &[&str] = &[
    "40001", // serialization_failure
    "40P01", // deadlock_detected
    "23505", // unique_violation
];

/// Whether `err` is a write conflict that can be retried.
pub fn is_write_conflict(err: &sqlx::Error) -> bool {
    match err {
        sqlx::Error::Database(db_err) => db_err
            .code()
            .is_some_and(|code| RETRYABLE_CODES.iter().any(|c| code == *c)),
        _ => false,
    }
}

/// Run `op`, replaying it immediately on write conflicts.
///
/// Non-conflict errors and the final conflict are returned unchanged.
pub async fn with_write_retry<T, F, Fut>(label: &'static str, mut op: F) -> Result<T, sqlx::Error>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, sqlx::Error>>,
{
    let mut attempt = 1;
    loop {
        match op().await {
            Err(err) if attempt < MAX_WRITE_ATTEMPTS && is_write_conflict(&err) => {
                tracing::debug!(op = label, attempt, error = %err, "Write conflict, retrying");
                attempt += 1;
            }
            other => return other,
        }
    }
}
