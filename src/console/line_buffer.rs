//! Line buffer for console input

use crate::config::MAX_LINE_LEN;
use super::TerminalError;

/// Bounded line input buffer
///
/// Storage is static (`MAX_LINE_LEN` bytes); `limit` may lower the bound
/// at runtime. A push past the bound is refused, never truncated.
pub struct LineBuffer {
    buf: heapless::Vec<u8, MAX_LINE_LEN>,
    limit: usize,
}

impl LineBuffer {
    /// Create empty buffer using the full static size
    pub const fn new() -> Self {
        Self {
            buf: heapless::Vec::new(),
            limit: MAX_LINE_LEN,
        }
    }

    /// Create empty buffer accepting at most `limit` bytes
    pub fn with_limit(limit: usize) -> Self {
        Self {
            buf: heapless::Vec::new(),
            limit: limit.min(MAX_LINE_LEN),
        }
    }

    /// Push a byte
    pub fn push(&mut self, c: u8) -> Result<(), TerminalError> {
        if self.buf.len() >= self.limit {
            return Err(TerminalError::LineTooLong { limit: self.limit });
        }
        self.buf
            .push(c)
            .map_err(|_| TerminalError::LineTooLong { limit: self.limit })
    }

    /// Clear buffer
    pub fn clear(&mut self) {
        self.buf.clear();
    }

    /// Get raw bytes
    pub fn as_bytes(&self) -> &[u8] {
        &self.buf
    }

    /// Get buffer length
    pub fn len(&self) -> usize {
        self.buf.len()
    }

    /// Check if empty
    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    /// Maximum number of bytes accepted
    pub fn limit(&self) -> usize {
        self.limit
    }
}

impl Default for LineBuffer {
    fn default() -> Self {
        Self::new()
    }
}
