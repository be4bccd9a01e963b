//! Shared frame instance and framing constants
//!
//! The frame instance is shared between the transmit and receive tasks.
//! Each task holds the mutex only for the buffer copy and codec step,
//! never across UART I/O, so a build can never observe a half-parsed
//! receive side or vice versa.

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::mutex::Mutex;

use telemetron_protocol::SerialFrame;

/// Header byte expected on every frame, both directions
pub const FRAME_HEADER: u8 = 37;

/// Terminator byte written after the last transmit field
pub const FRAME_TERMINATOR: u8 = b'N';

/// The board's single telemetry frame, bound to LPUART1
pub static TELEMETRY_FRAME: Mutex<CriticalSectionRawMutex, SerialFrame> =
    Mutex::new(SerialFrame::new(FRAME_HEADER, FRAME_TERMINATOR));
