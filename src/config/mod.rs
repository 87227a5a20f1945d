//! Module: config
//!
//! Purpose: Build-time defaults and runtime configuration for the terminal.
//!
//! Architecture:
//! - Constants: compile-time limits shared by the registry and line buffer
//! - TerminalConfig: per-terminal knobs, plain struct with `Default`
//! - UartConfig: serial line settings for the device transport
//!
//! Nothing here touches hardware; the device binary turns these values
//! into driver configuration.

/// Maximum accepted line length in bytes (terminator excluded).
pub const MAX_LINE_LEN: usize = 128;

/// Default registry capacity.
pub const MAX_COMMANDS: usize = 16;

/// Delay between empty transport polls.
pub const POLL_DELAY_MS: u32 = 100;

/// Which bytes end a command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LineTerminator {
    /// Carriage return only.
    #[default]
    Cr,
    /// Carriage return or line feed. A CR LF pair yields one command
    /// followed by an empty line, which is ignored.
    CrOrLf,
}

impl LineTerminator {
    /// Check whether `byte` ends a line.
    pub fn matches(self, byte: u8) -> bool {
        match self {
            Self::Cr => byte == b'\r',
            Self::CrOrLf => byte == b'\r' || byte == b'\n',
        }
    }
}

/// What to do when a line outgrows the buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OverflowPolicy {
    /// Drop the whole line, print a diagnostic, keep running.
    #[default]
    Discard,
    /// Stop the terminal loop with `TerminalError::LineTooLong`.
    Fatal,
}

/// Terminal configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TerminalConfig {
    pub max_line_len: usize,
    pub max_commands: usize,
    pub terminator: LineTerminator,
    pub overflow: OverflowPolicy,
    /// Echo received bytes back to the sender.
    pub echo: bool,
    pub poll_delay_ms: u32,
}

impl Default for TerminalConfig {
    fn default() -> Self {
        Self {
            max_line_len: MAX_LINE_LEN,
            max_commands: MAX_COMMANDS,
            terminator: LineTerminator::Cr,
            overflow: OverflowPolicy::Discard,
            echo: true,
            poll_delay_ms: POLL_DELAY_MS,
        }
    }
}

impl TerminalConfig {
    /// Line length limit, clamped to the static buffer size.
    pub fn with_max_line_len(mut self, len: usize) -> Self {
        self.max_line_len = len.min(MAX_LINE_LEN);
        self
    }

    pub fn with_max_commands(mut self, count: usize) -> Self {
        self.max_commands = count;
        self
    }

    pub fn with_terminator(mut self, terminator: LineTerminator) -> Self {
        self.terminator = terminator;
        self
    }

    pub fn with_overflow(mut self, policy: OverflowPolicy) -> Self {
        self.overflow = policy;
        self
    }

    pub fn with_echo(mut self, echo: bool) -> Self {
        self.echo = echo;
        self
    }

    pub fn with_poll_delay_ms(mut self, delay_ms: u32) -> Self {
        self.poll_delay_ms = delay_ms;
        self
    }
}

/// UART configuration for the console port.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UartConfig {
    pub baud_rate: u32,
}

impl Default for UartConfig {
    fn default() -> Self {
        Self {
            baud_rate: 115200,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cr_terminator_ignores_lf() {
        assert!(LineTerminator::Cr.matches(b'\r'));
        assert!(!LineTerminator::Cr.matches(b'\n'));
        assert!(LineTerminator::CrOrLf.matches(b'\n'));
    }

    #[test]
    fn test_line_len_clamped_to_buffer() {
        let config = TerminalConfig::default().with_max_line_len(MAX_LINE_LEN * 2);
        assert_eq!(config.max_line_len, MAX_LINE_LEN);
    }
}
