//! WiFi station collaborator.
//!
//! The terminal knows only two things about the network stack: it can be
//! handed new credentials, and it reconnects afterwards. The ESP-IDF
//! binding lives in [`esp`], device builds only.

#[cfg(target_os = "espidf")]
pub mod esp;

/// Longest SSID the station accepts.
pub const SSID_MAX_LEN: usize = 32;

/// Longest passphrase the station accepts.
pub const PASSWORD_MAX_LEN: usize = 64;

/// Network station able to switch access point.
pub trait Station {
    type Error: core::fmt::Debug;

    /// Disconnect, apply `ssid` / `password`, connect again.
    fn configure(&mut self, ssid: &str, password: &str) -> Result<(), Self::Error>;
}

impl<S: Station + ?Sized> Station for &mut S {
    type Error = S::Error;

    fn configure(&mut self, ssid: &str, password: &str) -> Result<(), Self::Error> {
        (**self).configure(ssid, password)
    }
}

/// Malformed `setup_wifi` argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CredentialsError {
    MissingSsid,
    MissingPassword,
    SsidTooLong,
    PasswordTooLong,
}

impl CredentialsError {
    pub fn message(&self) -> &'static str {
        match self {
            Self::MissingSsid => "No ssid found",
            Self::MissingPassword => "No password found",
            Self::SsidTooLong => "SSID too long (max 32 bytes)",
            Self::PasswordTooLong => "Password too long (max 64 bytes)",
        }
    }
}

impl core::fmt::Display for CredentialsError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.message())
    }
}

impl core::error::Error for CredentialsError {}

/// Station credentials, sized to the ESP-IDF limits.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    ssid: heapless::String<SSID_MAX_LEN>,
    password: heapless::String<PASSWORD_MAX_LEN>,
}

impl Credentials {
    /// Build from plain strings, checking the length limits.
    pub fn new(ssid: &str, password: &str) -> Result<Self, CredentialsError> {
        let mut creds = Self {
            ssid: heapless::String::new(),
            password: heapless::String::new(),
        };
        creds.ssid.push_str(ssid).map_err(|_| CredentialsError::SsidTooLong)?;
        creds.password.push_str(password).map_err(|_| CredentialsError::PasswordTooLong)?;
        Ok(creds)
    }

    /// Parse the `setup_wifi` argument string.
    ///
    /// The SSID runs up to the first space. The password is the rest, cut
    /// at the first CR or LF and trimmed; it may be empty for open networks.
    /// Only a space separates the two: a tab stays part of the SSID.
    pub fn parse(args: Option<&str>) -> Result<Self, CredentialsError> {
        let args = args.ok_or(CredentialsError::MissingSsid)?;
        let (ssid, rest) = match args.split_once(' ') {
            Some(parts) => parts,
            None if args.trim().is_empty() => return Err(CredentialsError::MissingSsid),
            None => return Err(CredentialsError::MissingPassword),
        };
        if ssid.is_empty() {
            return Err(CredentialsError::MissingSsid);
        }

        let password = rest
            .split(|c: char| c == '\r' || c == '\n')
            .next()
            .unwrap_or("")
            .trim();

        Self::new(ssid, password)
    }

    pub fn ssid(&self) -> &str {
        &self.ssid
    }

    pub fn password(&self) -> &str {
        &self.password
    }
}
