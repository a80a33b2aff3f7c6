//! MIDI clock output.
//!
//! This module provides the outbound half of the MIDI boundary:
//! - [`ClockOutput`] trait for the single capability the converter needs,
//!   sending the System Real-Time Clock byte
//! - [`MidirClockOutput`] for real devices via midir
//! - [`MockClockOutput`] for tests without hardware

pub mod midir_engine;
pub mod mock_engine;

pub use midir_engine::{list_output_ports, MidirClockOutput};
pub use mock_engine::MockClockOutput;

use std::error::Error;
use std::fmt;

/// Custom error type for MIDI output operations
#[derive(Debug)]
pub enum MidiError {
    /// Error when connecting to a MIDI device
    ConnectionError(String),
    /// Requested device is not present
    DeviceNotFound(String),
    /// Error when sending a MIDI message
    SendError(String),
}

impl fmt::Display for MidiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MidiError::ConnectionError(msg) => write!(f, "MIDI connection error: {}", msg),
            MidiError::DeviceNotFound(name) => write!(f, "MIDI device not found: {}", name),
            MidiError::SendError(msg) => write!(f, "MIDI send error: {}", msg),
        }
    }
}

impl Error for MidiError {}

impl From<midir::InitError> for MidiError {
    fn from(err: midir::InitError) -> Self {
        MidiError::ConnectionError(err.to_string())
    }
}

impl<T> From<midir::ConnectError<T>> for MidiError {
    fn from(err: midir::ConnectError<T>) -> Self {
        MidiError::ConnectionError(err.to_string())
    }
}

impl From<midir::SendError> for MidiError {
    fn from(err: midir::SendError) -> Self {
        MidiError::SendError(err.to_string())
    }
}

/// Result type for MIDI output operations
pub type Result<T> = std::result::Result<T, MidiError>;

/// Sink for MIDI clock bytes leaving the process.
pub trait ClockOutput: Send {
    /// Sends one System Real-Time Clock message.
    fn send_clock(&mut self) -> Result<()>;
}

/// Default engine for real devices
pub type DefaultClockOutput = MidirClockOutput;
