//! Serial console: command registry, line assembler and dispatcher
//!
//! Polled from a single task. The registry is owned by the terminal and
//! reached by handlers through their `CommandContext`.

pub mod commands;
pub mod console;
pub mod error;
pub mod line_buffer;
pub mod parser;
pub mod registry;
pub mod transport;

pub use commands::{dispatch, execute, register_builtins, register_setup_wifi, DispatchOutcome, BUSY_STR, NOT_FOUND_STR};
pub use console::{LineState, Terminal, VERSION};
pub use error::{RegistryError, TerminalError};
pub use line_buffer::LineBuffer;
pub use parser::{parse_line, ParsedCommand};
pub use registry::{CommandContext, CommandEntry, CommandHandler, Registry};
pub use transport::{ByteTransport, CrlfExpander, TransportWriter};
