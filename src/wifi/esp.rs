//! ESP-IDF station binding.
//!
//! Wraps `BlockingWifi<EspWifi>`; the driver persists its configuration
//! in the default NVS partition.

use esp_idf_svc::eventloop::{EspSubscription, EspSystemEventLoop, System};
use esp_idf_svc::hal::modem::Modem;
use esp_idf_svc::netif::IpEvent;
use esp_idf_svc::nvs::EspDefaultNvsPartition;
use esp_idf_svc::sys::EspError;
use esp_idf_svc::wifi::{AuthMethod, BlockingWifi, ClientConfiguration, Configuration, EspWifi, WifiEvent};

use super::{Credentials, CredentialsError, Station};

/// Station operation errors
#[derive(Debug)]
pub enum StationError {
    /// Driver call failed
    Esp(EspError),
    /// Credentials do not fit the driver limits
    Credentials(CredentialsError),
}

impl From<EspError> for StationError {
    fn from(e: EspError) -> Self {
        StationError::Esp(e)
    }
}

impl From<CredentialsError> for StationError {
    fn from(e: CredentialsError) -> Self {
        StationError::Credentials(e)
    }
}

impl core::fmt::Display for StationError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Esp(e) => write!(f, "wifi driver: {}", e),
            Self::Credentials(e) => write!(f, "wifi credentials: {}", e),
        }
    }
}

impl core::error::Error for StationError {}

/// WiFi station on the ESP32 radio
pub struct EspStation {
    wifi: BlockingWifi<EspWifi<'static>>,
}

impl EspStation {
    pub fn new(
        modem: Modem,
        sysloop: EspSystemEventLoop,
        nvs: EspDefaultNvsPartition,
    ) -> Result<Self, StationError> {
        let wifi = EspWifi::new(modem, sysloop.clone(), Some(nvs))?;
        let wifi = BlockingWifi::wrap(wifi, sysloop)?;
        Ok(Self { wifi })
    }

    /// Start in station mode with the boot credentials.
    ///
    /// A failed first association is logged, not returned, so the terminal
    /// still comes up and `setup_wifi` can fix the credentials.
    pub fn start(&mut self, creds: &Credentials) -> Result<(), StationError> {
        log::info!("Setting WiFi configuration SSID {}...", creds.ssid());
        self.wifi.set_configuration(&client_configuration(creds.ssid(), creds.password())?)?;
        self.wifi.start()?;

        if creds.ssid().is_empty() {
            log::warn!("no SSID configured, use setup_wifi");
            return Ok(());
        }

        if let Err(err) = self.wifi.connect() {
            log::error!("disconnected! ({})", err);
        }
        Ok(())
    }
}

impl Station for EspStation {
    type Error = StationError;

    fn configure(&mut self, ssid: &str, password: &str) -> Result<(), StationError> {
        let config = client_configuration(ssid, password)?;

        if self.wifi.is_connected()? {
            self.wifi.disconnect()?;
        }
        self.wifi.set_configuration(&config)?;
        self.wifi.connect()?;
        self.wifi.wait_netif_up()?;
        Ok(())
    }
}

fn client_configuration(ssid: &str, password: &str) -> Result<Configuration, CredentialsError> {
    Ok(Configuration::Client(ClientConfiguration {
        ssid: ssid.try_into().map_err(|_| CredentialsError::SsidTooLong)?,
        password: password.try_into().map_err(|_| CredentialsError::PasswordTooLong)?,
        auth_method: if password.is_empty() {
            AuthMethod::None
        } else {
            AuthMethod::WPA2Personal
        },
        ..Default::default()
    }))
}

/// Log station and IP events for as long as the returned subscriptions live.
pub fn log_station_events(
    sysloop: &EspSystemEventLoop,
) -> Result<(EspSubscription<'static, System>, EspSubscription<'static, System>), EspError> {
    let wifi = sysloop.subscribe::<WifiEvent, _>(|event| {
        log::info!("wifi event: {:?}", event);
    })?;
    let ip = sysloop.subscribe::<IpEvent, _>(|event| {
        log::info!("ip event: {:?}", event);
    })?;
    Ok((wifi, ip))
}
