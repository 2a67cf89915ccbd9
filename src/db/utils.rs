//! Database utility functions.

use std::sync::atomic::{AtomicI64, AtomicU64, Ordering};

use chrono::{DateTime, SecondsFormat, Utc};
use sha2::{Digest, Sha256};

use super::{DbError, DbResult};

static LAST_TIMESTAMP_NANOS: AtomicI64 = AtomicI64::new(i64::MIN);
static ID_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Generate a 12-character hex ID for a new todo.
///
/// The digest input combines the current instant with a process-wide
/// counter, so IDs generated in the same nanosecond still differ.
pub fn generate_entity_id() -> String {
    let nanos = current_timestamp().timestamp_nanos_opt().unwrap_or_default();
    let sequence = ID_COUNTER.fetch_add(1, Ordering::Relaxed);

    let mut hasher = Sha256::new();
    hasher.update(nanos.to_le_bytes());
    hasher.update(sequence.to_le_bytes());
    hasher.update(std::process::id().to_le_bytes());
    let digest = hasher.finalize();

    digest.iter().take(6).map(|b| format!("{:02x}", b)).collect()
}

/// Current time from a monotonic, strictly increasing clock.
///
/// Consecutive calls never return the same instant, so every mutation moves
/// `updated_at` forward even when the wall clock has not ticked.
pub fn current_timestamp() -> DateTime<Utc> {
    let now = Utc::now().timestamp_nanos_opt().unwrap_or(i64::MAX - 1);
    let previous = LAST_TIMESTAMP_NANOS
        .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |last| {
            Some(now.max(last.saturating_add(1)))
        })
        .unwrap_or(now);
    DateTime::from_timestamp_nanos(now.max(previous.saturating_add(1)))
}

/// Format a timestamp for storage: fixed width so text order is time order.
pub fn format_timestamp(ts: &DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Nanos, true)
}

/// Parse a stored timestamp.
pub fn parse_timestamp(value: &str) -> DbResult<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| DbError::InvalidData {
            message: format!("invalid timestamp '{}': {}", value, e),
            help: "timestamps are stored as RFC 3339 in UTC".to_string(),
        })
}
