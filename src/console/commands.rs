//! Dispatch and built-in command handlers

use alloc::string::String;
use core::fmt::Write;

use super::parser::ParsedCommand;
use super::registry::{CommandContext, CommandHandler, Registry};
use super::RegistryError;
use crate::wifi::{Credentials, Station};

/// Notice written when no command matches
pub const NOT_FOUND_STR: &str = "\tUnknown command\n";

/// Notice written when a handler dispatches itself while still running
pub const BUSY_STR: &str = "\tCommand busy\n";

/// Usage line for `setup_wifi`
pub const SETUP_WIFI_USAGE: &str = "usage: setup_wifi SSID PASSWORD";

/// Result of dispatching one line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchOutcome {
    /// A handler ran to completion
    Executed,
    /// Nothing registered under that name
    NotFound,
    /// Empty command name, nothing looked up
    Empty,
    /// Handler found but already running further up the stack
    Busy,
}

impl DispatchOutcome {
    /// Whether a command was found and executed
    pub fn executed(self) -> bool {
        self == Self::Executed
    }
}

/// Dispatch a raw, terminator-stripped line.
///
/// The line is split at the first space before any decoding. A name that
/// is not valid UTF-8 cannot match and is reported as unknown; invalid
/// sequences in the argument are replaced with U+FFFD.
pub fn dispatch(line: &[u8], registry: &mut Registry, out: &mut dyn Write) -> DispatchOutcome {
    let (name, args) = match line.iter().position(|&b| b == b' ') {
        Some(pos) => (&line[..pos], Some(&line[pos + 1..])),
        None => (line, None),
    };
    if name.is_empty() {
        return DispatchOutcome::Empty;
    }

    let Ok(command) = core::str::from_utf8(name) else {
        log::debug!("dropping non UTF-8 command name ({} bytes)", name.len());
        let _ = out.write_str(NOT_FOUND_STR);
        return DispatchOutcome::NotFound;
    };
    let args = args.map(String::from_utf8_lossy);

    let cmd = ParsedCommand {
        command,
        args: args.as_deref(),
    };
    execute(&cmd, registry, out)
}

/// Execute a parsed command
pub fn execute(cmd: &ParsedCommand<'_>, registry: &mut Registry, out: &mut dyn Write) -> DispatchOutcome {
    if cmd.is_empty() {
        return DispatchOutcome::Empty; // Empty line, do nothing
    }

    let Some(handler) = registry.lookup(cmd.command).map(|entry| entry.handler()) else {
        log::debug!("unknown command '{}'", cmd.command);
        let _ = out.write_str(NOT_FOUND_STR);
        return DispatchOutcome::NotFound;
    };

    let Ok(mut handler) = handler.try_borrow_mut() else {
        log::warn!("'{}' dispatched from its own handler, skipped", cmd.command);
        let _ = out.write_str(BUSY_STR);
        return DispatchOutcome::Busy;
    };

    log::debug!("dispatching '{}'", cmd.command);
    let mut cx = CommandContext { out, registry };
    handler.run(cmd.args, &mut cx);
    DispatchOutcome::Executed
}

/// Register the commands every terminal carries
pub fn register_builtins(registry: &mut Registry) -> Result<(), RegistryError> {
    registry.register_fn("help", cmd_help)
}

/// Register `setup_wifi` bound to `station`
pub fn register_setup_wifi<S>(registry: &mut Registry, station: S) -> Result<(), RegistryError>
where
    S: Station + 'static,
{
    registry.register("setup_wifi", SetupWifi::new(station))
}

// --- Command Implementations ---

fn cmd_help(_args: Option<&str>, cx: &mut CommandContext<'_>) {
    let _ = writeln!(cx.out, "List of commands:");
    for name in cx.registry.list() {
        let _ = writeln!(cx.out, "    * {}", name);
    }
    let _ = writeln!(cx.out);
}

/// `setup_wifi SSID PASSWORD`: reconfigure the station and reconnect
pub struct SetupWifi<S> {
    station: S,
}

impl<S: Station> SetupWifi<S> {
    pub fn new(station: S) -> Self {
        Self { station }
    }
}

impl<S: Station> CommandHandler for SetupWifi<S> {
    fn run(&mut self, args: Option<&str>, cx: &mut CommandContext<'_>) {
        let creds = match Credentials::parse(args) {
            Ok(creds) => creds,
            Err(err) => {
                log::warn!("{}", err.message());
                log::warn!("{}", SETUP_WIFI_USAGE);
                let _ = writeln!(cx.out, "{}", err.message());
                let _ = writeln!(cx.out, "{}", SETUP_WIFI_USAGE);
                return;
            }
        };

        log::info!("Setting WiFi configuration SSID {}...", creds.ssid());
        match self.station.configure(creds.ssid(), creds.password()) {
            Ok(()) => {
                let _ = writeln!(cx.out, "wifi: connecting to {}", creds.ssid());
            }
            Err(err) => {
                log::error!("wifi reconfiguration failed: {:?}", err);
                let _ = writeln!(cx.out, "wifi: reconfiguration failed");
            }
        }
    }
}
