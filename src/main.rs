//! UartWifiTerminal - Main entry point
//!
//! Device: brings up NVS, the console UART and the WiFi station, registers
//! the commands, then turns the main task into the terminal task.
//!
//! Host: the same terminal over stdin/stdout with a station stub, handy
//! for trying commands without hardware.

use core::convert::Infallible;

use uart_wifi_terminal::console::{register_builtins, register_setup_wifi};
use uart_wifi_terminal::{Credentials, Terminal, TerminalConfig, TerminalError};

/// Boot credentials, baked in at build time
fn initial_credentials() -> Result<Credentials, uart_wifi_terminal::CredentialsError> {
    Credentials::new(
        option_env!("WIFI_SSID").unwrap_or(""),
        option_env!("WIFI_PASSWORD").unwrap_or(""),
    )
}

fn exit_reason(result: Result<Infallible, TerminalError>) -> anyhow::Error {
    match result {
        Ok(never) => match never {},
        Err(err) => anyhow::Error::new(err).context("terminal task stopped"),
    }
}

#[cfg(target_os = "espidf")]
fn main() -> anyhow::Result<()> {
    use esp_idf_svc::eventloop::EspSystemEventLoop;
    use esp_idf_svc::hal::delay::FreeRtos;
    use esp_idf_svc::hal::peripherals::Peripherals;
    use esp_idf_svc::nvs::EspDefaultNvsPartition;
    use uart_wifi_terminal::config::UartConfig;
    use uart_wifi_terminal::hal::init_console_uart;
    use uart_wifi_terminal::wifi::esp::{log_station_events, EspStation};

    // Initialize ESP-IDF
    esp_idf_svc::sys::link_patches();
    esp_idf_svc::log::EspLogger::initialize_default();

    let peripherals = Peripherals::take()?;
    let sysloop = EspSystemEventLoop::take()?;
    let nvs = EspDefaultNvsPartition::take()?;

    let transport = init_console_uart(
        peripherals.uart0,
        peripherals.pins.gpio1,
        peripherals.pins.gpio3,
        &UartConfig::default(),
    )?;

    let mut terminal = Terminal::new(transport, TerminalConfig::default());
    register_builtins(terminal.registry_mut())?;

    let _events = log_station_events(&sysloop)?;
    let mut station = EspStation::new(peripherals.modem, sysloop, nvs)?;
    station.start(&initial_credentials()?)?;

    // WARN and above from the WiFi stack
    unsafe {
        esp_idf_svc::sys::esp_log_level_set(
            c"wifi".as_ptr(),
            esp_idf_svc::sys::esp_log_level_t_ESP_LOG_WARN,
        );
    }

    register_setup_wifi(terminal.registry_mut(), station)?;

    terminal.print_banner();
    Err(exit_reason(terminal.run(FreeRtos::delay_ms)))
}

#[cfg(not(target_os = "espidf"))]
fn main() -> anyhow::Result<()> {
    use std::time::Duration;
    use uart_wifi_terminal::LineTerminator;

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    // The host tty echoes and sends LF
    let config = TerminalConfig::default()
        .with_terminator(LineTerminator::CrOrLf)
        .with_echo(false);

    let mut terminal = Terminal::new(host::StdioTransport::spawn(), config);
    register_builtins(terminal.registry_mut())?;

    let creds = initial_credentials()?;
    log::info!("Setting WiFi configuration SSID {}...", creds.ssid());
    register_setup_wifi(terminal.registry_mut(), host::StubStation)?;

    terminal.print_banner();
    Err(exit_reason(terminal.run(|ms| {
        std::thread::sleep(Duration::from_millis(u64::from(ms)))
    })))
}

#[cfg(not(target_os = "espidf"))]
mod host {
    use std::io::{self, Read, Write};
    use std::sync::mpsc::{self, Receiver, TryRecvError};
    use std::thread;

    use uart_wifi_terminal::{ByteTransport, Station};

    /// stdin/stdout transport. A reader thread forwards stdin bytes over a
    /// channel so reads never block the terminal.
    pub struct StdioTransport {
        rx: Receiver<u8>,
    }

    impl StdioTransport {
        pub fn spawn() -> Self {
            let (tx, rx) = mpsc::channel();
            thread::spawn(move || {
                for byte in io::stdin().lock().bytes() {
                    let Ok(byte) = byte else { break };
                    if tx.send(byte).is_err() {
                        break;
                    }
                }
                log::debug!("stdin closed");
            });
            Self { rx }
        }
    }

    impl ByteTransport for StdioTransport {
        type Error = io::Error;

        fn read_nonblocking(&mut self, buf: &mut [u8]) -> io::Result<usize> {
            let mut count = 0;
            while count < buf.len() {
                match self.rx.try_recv() {
                    Ok(byte) => {
                        buf[count] = byte;
                        count += 1;
                    }
                    Err(TryRecvError::Empty | TryRecvError::Disconnected) => break,
                }
            }
            Ok(count)
        }

        fn write(&mut self, bytes: &[u8]) -> io::Result<()> {
            io::stdout().write_all(bytes)
        }

        fn flush(&mut self) -> io::Result<()> {
            io::stdout().flush()
        }
    }

    /// Station stand-in that only logs
    pub struct StubStation;

    impl Station for StubStation {
        type Error = io::Error;

        fn configure(&mut self, ssid: &str, password: &str) -> io::Result<()> {
            log::info!("station stub: join '{}' ({} byte password)", ssid, password.len());
            Ok(())
        }
    }
}
