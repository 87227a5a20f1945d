//! Console UART transport.
//!
//! Zero-timeout reads feed the terminal poll loop. Output goes through the
//! driver TX ring buffer with a bare LF expanded to CR LF for serial
//! monitors. An LF already preceded by CR is sent as is.
//!
//! # Hardware Setup
//!
//! ```text
//! ESP32 GPIO1 (U0TXD) ──────▶ USB-UART RX
//! ESP32 GPIO3 (U0RXD) ◀────── USB-UART TX
//! ```

use esp_idf_svc::hal::delay::{BLOCK, NON_BLOCK};
use esp_idf_svc::hal::gpio;
use esp_idf_svc::hal::peripheral::Peripheral;
use esp_idf_svc::hal::uart::{self, UartDriver};
use esp_idf_svc::sys::EspError;

use crate::config::UartConfig;
use crate::console::{ByteTransport, CrlfExpander};

/// Terminal transport over a UART driver.
pub struct UartTransport<'d> {
    uart: UartDriver<'d>,
    crlf: CrlfExpander,
}

impl<'d> UartTransport<'d> {
    pub fn new(uart: UartDriver<'d>) -> Self {
        Self {
            uart,
            crlf: CrlfExpander::new(),
        }
    }
}

impl ByteTransport for UartTransport<'_> {
    type Error = EspError;

    fn read_nonblocking(&mut self, buf: &mut [u8]) -> Result<usize, EspError> {
        self.uart.read(buf, NON_BLOCK)
    }

    fn write(&mut self, bytes: &[u8]) -> Result<(), EspError> {
        let uart = &mut self.uart;
        self.crlf.expand(bytes, |chunk| uart.write(chunk).map(|_| ()))
    }

    fn flush(&mut self) -> Result<(), EspError> {
        self.uart.wait_tx_done(BLOCK)
    }
}

/// Install the UART driver (no flow control) and wrap it as a transport.
pub fn init_console_uart<'d, UART: uart::Uart>(
    uart: impl Peripheral<P = UART> + 'd,
    tx_pin: impl Peripheral<P = impl gpio::OutputPin> + 'd,
    rx_pin: impl Peripheral<P = impl gpio::InputPin> + 'd,
    config: &UartConfig,
) -> Result<UartTransport<'d>, EspError> {
    let uart_config = uart::config::Config::default()
        .baudrate(esp_idf_svc::hal::units::Hertz(config.baud_rate));

    let driver = UartDriver::new(
        uart,
        tx_pin,
        rx_pin,
        Option::<gpio::AnyIOPin>::None,  // CTS
        Option::<gpio::AnyIOPin>::None,  // RTS
        &uart_config,
    )?;

    Ok(UartTransport::new(driver))
}
