//! Limit/offset pagination types.

use serde::{Deserialize, Serialize};

/// Page size used when the client does not send `limit`.
pub const DEFAULT_LIMIT: u64 = 10;

/// Upper bound for `limit`.
pub const MAX_LIMIT: u64 = 100;

/// Raw `limit`/`offset` query parameters as sent by the client.
///
/// Values are signed so that negative input is clamped instead of rejected.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
pub struct PageQuery {
    #[serde(default)]
    pub limit: Option<i64>,
    #[serde(default)]
    pub offset: Option<i64>,
}

impl PageQuery {
    /// Clamp `limit` to 1–100 (default 10) and `offset` to ≥ 0.
    pub fn clamped(self) -> PageRequest {
        let limit = match self.limit {
            Some(limit) => limit.clamp(1, MAX_LIMIT as i64) as u64,
            None => DEFAULT_LIMIT,
        };
        let offset = self.offset.unwrap_or(0).max(0) as u64;
        PageRequest { limit, offset }
    }
}

/// A validated page window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub limit: u64,
    pub offset: u64,
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            limit: DEFAULT_LIMIT,
            offset: 0,
        }
    }
}

impl PageRequest {
    /// Offset of the following page, or `None` when this page reaches the end.
    pub fn next_offset(&self, count: u64) -> Option<u64> {
        let next = self.offset + self.limit;
        (next < count).then_some(next)
    }

    /// Offset of the preceding page, or `None` on the first page.
    ///
    /// `Some(0)` means "back to the start"; link builders drop the `offset`
    /// parameter in that case.
    pub fn previous_offset(&self) -> Option<u64> {
        if self.offset == 0 {
            return None;
        }
        Some(self.offset.saturating_sub(self.limit))
    }
}

/// Paginated list envelope: `{count, next, previous, results}`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Page<T> {
    pub count: u64,
    pub next: Option<String>,
    pub previous: Option<String>,
    pub results: Vec<T>,
}
