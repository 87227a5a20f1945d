//! Command line parser
//!
//! Splits on the first space only. The argument is handed over verbatim,
//! further tokenization is up to the handler.

/// Parsed command line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParsedCommand<'a> {
    /// Text before the first space (the whole line if there is none)
    pub command: &'a str,
    /// Text after the first space, `None` if the line has no space
    pub args: Option<&'a str>,
}

impl<'a> ParsedCommand<'a> {
    /// Create empty command
    pub const fn empty() -> Self {
        Self {
            command: "",
            args: None,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.command.is_empty()
    }
}

/// Parse a terminator-stripped line into command and argument
pub fn parse_line(line: &str) -> ParsedCommand<'_> {
    match line.split_once(' ') {
        Some((command, args)) => ParsedCommand { command, args: Some(args) },
        None => ParsedCommand { command: line, args: None },
    }
}
