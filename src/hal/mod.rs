//! Hardware Abstraction Layer for UartWifiTerminal.
//!
//! Thin wrappers around ESP-IDF peripherals.
//! Parsing and dispatch stay in `console`, HAL is just I/O.

pub mod uart;

pub use uart::{init_console_uart, UartTransport};
