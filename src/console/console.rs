//! Main console struct integrating all components

use core::convert::Infallible;
use core::fmt::Write;

use super::{
    dispatch, ByteTransport, DispatchOutcome, LineBuffer, Registry, TerminalError,
    TransportWriter,
};
use crate::config::{OverflowPolicy, TerminalConfig};

/// Version string (set by build.rs, includes git hash)
pub const VERSION: &str = env!("VERSION_STRING");

/// Diagnostic written when a line is dropped for being too long
pub const LINE_TOO_LONG_STR: &str = "\tLine too long, discarded\n";

/// Bytes pulled from the transport per poll
const READ_CHUNK: usize = 16;

/// Line assembler state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineState {
    /// Buffer empty
    Idle,
    /// At least one byte buffered, no terminator yet
    Accumulating,
    /// Current line overflowed, dropping bytes up to the terminator
    Discarding,
}

/// Line assembler and dispatcher bound to one transport
pub struct Terminal<T: ByteTransport> {
    transport: T,
    registry: Registry,
    line: LineBuffer,
    config: TerminalConfig,
    state: LineState,
}

impl<T: ByteTransport> Terminal<T> {
    /// Create a terminal with an empty registry sized by `config`
    pub fn new(transport: T, config: TerminalConfig) -> Self {
        let registry = Registry::new(config.max_commands);
        Self::with_registry(transport, registry, config)
    }

    /// Create a terminal around an already populated registry
    ///
    /// The registry keeps its own capacity; `config.max_commands` only sizes
    /// the registry built by [`Terminal::new`].
    pub fn with_registry(transport: T, registry: Registry, config: TerminalConfig) -> Self {
        if registry.capacity() != config.max_commands {
            log::debug!(
                "registry capacity {} overrides max_commands {}",
                registry.capacity(),
                config.max_commands
            );
        }
        Self {
            transport,
            registry,
            line: LineBuffer::with_limit(config.max_line_len),
            config,
            state: LineState::Idle,
        }
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Registry access for startup registration
    pub fn registry_mut(&mut self) -> &mut Registry {
        &mut self.registry
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn transport_mut(&mut self) -> &mut T {
        &mut self.transport
    }

    pub fn config(&self) -> &TerminalConfig {
        &self.config
    }

    pub fn state(&self) -> LineState {
        self.state
    }

    /// Bytes of the line being assembled
    pub fn pending(&self) -> &[u8] {
        self.line.as_bytes()
    }

    /// Print welcome banner
    pub fn print_banner(&mut self) {
        let mut out = TransportWriter(&mut self.transport);
        let _ = writeln!(out, "\n{}", VERSION);
        let _ = writeln!(out, "Type 'help' for commands.");
    }

    /// Process a single input byte
    ///
    /// Returns `Some(outcome)` when the byte completed a line.
    pub fn process_byte(&mut self, byte: u8) -> Result<Option<DispatchOutcome>, TerminalError> {
        if self.config.echo {
            let _ = self.transport.write(&[byte]);
        }

        if self.config.terminator.matches(byte) {
            let _ = self.transport.write(b"\n");

            let outcome = match self.state {
                LineState::Discarding => None,
                LineState::Idle | LineState::Accumulating => {
                    let mut out = TransportWriter(&mut self.transport);
                    Some(dispatch(self.line.as_bytes(), &mut self.registry, &mut out))
                }
            };

            self.reset();
            return Ok(outcome);
        }

        if self.state == LineState::Discarding {
            return Ok(None);
        }

        match self.line.push(byte) {
            Ok(()) => {
                self.state = LineState::Accumulating;
                Ok(None)
            }
            Err(err) => self.overflow(err),
        }
    }

    fn overflow(&mut self, err: TerminalError) -> Result<Option<DispatchOutcome>, TerminalError> {
        match self.config.overflow {
            OverflowPolicy::Fatal => {
                log::error!("{}", err);
                self.reset();
                Err(err)
            }
            OverflowPolicy::Discard => {
                log::warn!("{}, discarding line", err);
                let _ = self.transport.write(b"\n");
                let _ = self.transport.write(LINE_TOO_LONG_STR.as_bytes());
                self.line.clear();
                self.state = LineState::Discarding;
                Ok(None)
            }
        }
    }

    fn reset(&mut self) {
        self.line.clear();
        self.state = LineState::Idle;
    }

    /// Read what the transport has pending and process it.
    ///
    /// Returns the number of bytes consumed; 0 means the source was empty.
    /// Every byte read is processed, in order, before returning.
    pub fn poll(&mut self) -> Result<usize, TerminalError> {
        let mut buf = [0u8; READ_CHUNK];
        let count = match self.transport.read_nonblocking(&mut buf) {
            Ok(count) => count.min(READ_CHUNK),
            Err(err) => {
                log::error!("console read failed: {:?}", err);
                0
            }
        };

        for &byte in &buf[..count] {
            self.process_byte(byte)?;
        }

        Ok(count)
    }

    /// Run the terminal forever.
    ///
    /// `sleep` is the suspend point between empty polls and receives the
    /// configured delay in milliseconds. Partial input survives the wait.
    /// Returns only on a fatal condition.
    pub fn run<F>(&mut self, mut sleep: F) -> Result<Infallible, TerminalError>
    where
        F: FnMut(u32),
    {
        self.reset();

        loop {
            if self.poll()? == 0 {
                let _ = self.transport.flush();
                sleep(self.config.poll_delay_ms);
            }
        }
    }
}
