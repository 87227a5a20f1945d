//! Console error types

/// Registration failure
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegistryError {
    /// E01: Registry already holds `capacity` commands
    CapacityExceeded { capacity: usize },
    /// E02: Name is empty or contains a space
    InvalidName,
}

impl RegistryError {
    /// Get error code string
    pub fn code(&self) -> &'static str {
        match self {
            Self::CapacityExceeded { .. } => "E01",
            Self::InvalidName => "E02",
        }
    }

    /// Get error message
    pub fn message(&self) -> &'static str {
        match self {
            Self::CapacityExceeded { .. } => "command table full",
            Self::InvalidName => "invalid command name",
        }
    }
}

impl core::fmt::Display for RegistryError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::CapacityExceeded { capacity } => {
                write!(f, "{}: {} ({} entries)", self.code(), self.message(), capacity)
            }
            Self::InvalidName => write!(f, "{}: {}", self.code(), self.message()),
        }
    }
}

impl core::error::Error for RegistryError {}

/// Fatal terminal condition, ends the polling loop
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TerminalError {
    /// E10: Input line longer than `limit` bytes
    LineTooLong { limit: usize },
}

impl TerminalError {
    pub fn code(&self) -> &'static str {
        match self {
            Self::LineTooLong { .. } => "E10",
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            Self::LineTooLong { .. } => "line too long",
        }
    }
}

impl core::fmt::Display for TerminalError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::LineTooLong { limit } => {
                write!(f, "{}: {} (max {} bytes)", self.code(), self.message(), limit)
            }
        }
    }
}

impl core::error::Error for TerminalError {}
