//! Byte transport seam
//!
//! The terminal only needs a non-blocking byte source and a byte sink.
//! The device binds this to a UART, the host build to stdin/stdout.

use core::fmt;

/// Character I/O used by the terminal
pub trait ByteTransport {
    type Error: fmt::Debug;

    /// Read whatever is available right now, without waiting.
    ///
    /// Returns 0 when no byte is pending.
    fn read_nonblocking(&mut self, buf: &mut [u8]) -> Result<usize, Self::Error>;

    /// Write all of `bytes`
    fn write(&mut self, bytes: &[u8]) -> Result<(), Self::Error>;

    /// Push buffered output to the wire
    fn flush(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }
}

impl<T: ByteTransport + ?Sized> ByteTransport for &mut T {
    type Error = T::Error;

    fn read_nonblocking(&mut self, buf: &mut [u8]) -> Result<usize, Self::Error> {
        (**self).read_nonblocking(buf)
    }

    fn write(&mut self, bytes: &[u8]) -> Result<(), Self::Error> {
        (**self).write(bytes)
    }

    fn flush(&mut self) -> Result<(), Self::Error> {
        (**self).flush()
    }
}

/// `fmt::Write` view of a transport, handed to command handlers
pub struct TransportWriter<'a, T: ?Sized>(pub &'a mut T);

impl<T: ByteTransport + ?Sized> fmt::Write for TransportWriter<'_, T> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.0.write(s.as_bytes()).map_err(|_| fmt::Error)
    }
}

/// Turns bare LF into CR LF for serial monitors.
///
/// An LF right after a CR is passed through, also when the CR ended the
/// previous write.
#[derive(Debug, Default, Clone, Copy)]
pub struct CrlfExpander {
    after_cr: bool,
}

impl CrlfExpander {
    pub const fn new() -> Self {
        Self { after_cr: false }
    }

    /// Hand `bytes` to `emit` in slices, inserting CR before every bare LF
    pub fn expand<E, F>(&mut self, bytes: &[u8], mut emit: F) -> Result<(), E>
    where
        F: FnMut(&[u8]) -> Result<(), E>,
    {
        let mut start = 0;
        for (i, &b) in bytes.iter().enumerate() {
            if b == b'\n' && !self.after_cr {
                if start < i {
                    emit(&bytes[start..i])?;
                }
                emit(b"\r")?;
                start = i;
            }
            self.after_cr = b == b'\r';
        }
        if start < bytes.len() {
            emit(&bytes[start..])?;
        }
        Ok(())
    }
}
