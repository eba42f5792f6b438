//! Message ID - 53-bit unique identifier safe for JavaScript numbers
//!
//! Structure:
//! - Bits 52-12: Timestamp (milliseconds since custom epoch)
//! - Bits 11-0:  Sequence number (0-4095)
//!
//! Every ID fits in an IEEE-754 double without loss, so clients can keep it as
//! a plain number.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::atomic::{AtomicI64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

/// Unique, strictly increasing message identifier
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct MessageId(i64);

impl MessageId {
    /// Custom epoch: 2024-01-01 00:00:00 UTC (milliseconds)
    pub const EPOCH: i64 = 1_704_067_200_000;

    /// Bits reserved for the per-millisecond sequence
    pub const SEQUENCE_BITS: u32 = 12;

    /// Largest integer a JavaScript number represents exactly (2^53 - 1)
    pub const MAX_SAFE: i64 = (1 << 53) - 1;

    /// Create a `MessageId` from a raw value
    #[inline]
    pub const fn new(id: i64) -> Self {
        Self(id)
    }

    /// Get the inner i64 value
    #[inline]
    pub const fn into_inner(self) -> i64 {
        self.0
    }

    /// Extract timestamp (milliseconds since Unix epoch)
    #[inline]
    pub fn timestamp(&self) -> i64 {
        (self.0 >> Self::SEQUENCE_BITS) + Self::EPOCH
    }

    /// Convert timestamp to DateTime<Utc>
    pub fn created_at(&self) -> chrono::DateTime<chrono::Utc> {
        chrono::DateTime::from_timestamp_millis(self.timestamp()).unwrap_or_default()
    }
}

impl fmt::Display for MessageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for MessageId {
    fn from(id: i64) -> Self {
        Self(id)
    }
}

impl From<MessageId> for i64 {
    fn from(id: MessageId) -> Self {
        id.0
    }
}

/// Thread-safe message ID generator
///
/// Each ID is `max(last + 1, now << 12)`: ids never repeat and never go
/// backwards, even when the wall clock does. Bursts above 4096 per
/// millisecond borrow from the next millisecond instead of blocking.
#[derive(Debug, Default)]
pub struct MessageIdGenerator {
    last: AtomicI64,
}

impl MessageIdGenerator {
    /// Create a new generator
    pub fn new() -> Self {
        Self::default()
    }

    /// Generate a new unique message ID
    pub fn generate(&self) -> MessageId {
        let floor = (current_timestamp() - MessageId::EPOCH).max(0) << MessageId::SEQUENCE_BITS;
        let mut last = self.last.load(Ordering::Acquire);

        loop {
            let next = floor.max(last + 1);
            match self
                .last
                .compare_exchange_weak(last, next, Ordering::AcqRel, Ordering::Acquire)
            {
                Ok(_) => return MessageId::new(next),
                Err(actual) => last = actual,
            }
        }
    }
}

/// Current timestamp in milliseconds since Unix epoch
#[inline]
fn current_timestamp() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as i64)
        .unwrap_or(0)
}
