//! Shared fixtures for the console and wifi tests

#![allow(dead_code)]

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

use uart_wifi_terminal::{ByteTransport, Station};

/// In-memory transport. Input is shared so a test can feed bytes while the
/// terminal owns the transport.
#[derive(Default)]
pub struct TestTransport {
    pub input: Rc<RefCell<VecDeque<u8>>>,
    pub output: Vec<u8>,
    pub flushes: usize,
}

impl TestTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_input(bytes: &[u8]) -> Self {
        let transport = Self::new();
        transport.feed(bytes);
        transport
    }

    pub fn feed(&self, bytes: &[u8]) {
        self.input.borrow_mut().extend(bytes.iter().copied());
    }

    pub fn output_str(&self) -> &str {
        std::str::from_utf8(&self.output).expect("output is UTF-8")
    }
}

impl ByteTransport for TestTransport {
    type Error = ();

    fn read_nonblocking(&mut self, buf: &mut [u8]) -> Result<usize, ()> {
        let mut input = self.input.borrow_mut();
        let mut count = 0;
        while count < buf.len() {
            match input.pop_front() {
                Some(byte) => {
                    buf[count] = byte;
                    count += 1;
                }
                None => break,
            }
        }
        Ok(count)
    }

    fn write(&mut self, bytes: &[u8]) -> Result<(), ()> {
        self.output.extend_from_slice(bytes);
        Ok(())
    }

    fn flush(&mut self) -> Result<(), ()> {
        self.flushes += 1;
        Ok(())
    }
}

/// Station recording every `configure` call
#[derive(Clone, Default)]
pub struct MockStation {
    pub calls: Rc<RefCell<Vec<(String, String)>>>,
    pub fail: bool,
}

impl Station for MockStation {
    type Error = &'static str;

    fn configure(&mut self, ssid: &str, password: &str) -> Result<(), Self::Error> {
        self.calls.borrow_mut().push((ssid.to_string(), password.to_string()));
        if self.fail {
            Err("association failed")
        } else {
            Ok(())
        }
    }
}

/// Output sink for handler-level tests
#[derive(Default)]
pub struct TestOutput {
    pub text: String,
}

impl TestOutput {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, s: &str) -> bool {
        self.text.contains(s)
    }
}

impl core::fmt::Write for TestOutput {
    fn write_str(&mut self, s: &str) -> core::fmt::Result {
        self.text.push_str(s);
        Ok(())
    }
}
