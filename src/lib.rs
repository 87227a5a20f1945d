//! # UartWifiTerminal
//!
//! Line-oriented command terminal for an ESP32 WiFi station.
//!
//! ## Architecture
//!
//! Bytes flow one way through [`Terminal`]:
//! - The transport is polled, never waited on
//! - Complete lines are split at the first space and looked up in the [`Registry`]
//! - Handlers run synchronously on the terminal task and may register commands
//!
//! The network stack is reached only through the [`wifi::Station`] trait.

#![cfg_attr(not(test), no_std)]

extern crate alloc;

pub mod config;
pub mod console;
#[cfg(target_os = "espidf")]
pub mod hal;
pub mod wifi;

pub use config::{LineTerminator, OverflowPolicy, TerminalConfig};
pub use console::{ByteTransport, DispatchOutcome, Registry, RegistryError, Terminal, TerminalError};
pub use wifi::{Credentials, CredentialsError, Station};
