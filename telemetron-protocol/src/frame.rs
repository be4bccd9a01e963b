//! Frame building and parsing
//!
//! A [`SerialFrame`] owns one field registry and one buffer per direction
//! plus the framing bytes. Building serializes the transmit registry's
//! current values; parsing validates the header and deserializes into the
//! receive registry. The terminator is written on transmit only — frames
//! arrive at a fixed length, so the header is the sole framing anchor.

use crate::layout::{FieldIndex, FieldRegistry, MAX_FRAME_SIZE};
use crate::scalar::ScalarValue;

/// Errors that can occur during registration or parsing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FrameError {
    /// Direction already holds the maximum field count
    CapacityExceeded,
    /// Adding the field would grow the frame past the buffer capacity
    FrameTooLarge,
    /// Received frame's first byte does not match the configured header
    HeaderMismatch,
    /// Value tag does not match the field's registered wire type
    TypeMismatch,
}

/// One bidirectional frame instance bound to a serial link
///
/// Owns both direction registries and both frame buffers. The transmit
/// buffer is written only by [`build_tx_frame`](Self::build_tx_frame) and
/// read via [`tx_bytes`](Self::tx_bytes); the receive buffer is filled by
/// the transport through [`rx_bytes_mut`](Self::rx_bytes_mut) and read
/// only by [`parse_rx_frame`](Self::parse_rx_frame). Callers running the
/// two directions from independent execution contexts must serialize
/// access to the instance as a whole.
#[derive(Debug, Clone)]
pub struct SerialFrame {
    tx: FieldRegistry,
    rx: FieldRegistry,
    tx_buf: [u8; MAX_FRAME_SIZE],
    rx_buf: [u8; MAX_FRAME_SIZE],
    header: u8,
    terminator: u8,
    header_mismatches: u32,
}

impl SerialFrame {
    /// Create a frame instance with the given framing bytes
    pub const fn new(header: u8, terminator: u8) -> Self {
        Self {
            tx: FieldRegistry::new(),
            rx: FieldRegistry::new(),
            tx_buf: [0; MAX_FRAME_SIZE],
            rx_buf: [0; MAX_FRAME_SIZE],
            header,
            terminator,
            header_mismatches: 0,
        }
    }

    /// Configured header byte
    pub fn header(&self) -> u8 {
        self.header
    }

    /// Configured terminator byte
    pub fn terminator(&self) -> u8 {
        self.terminator
    }

    /// Register an outbound field; layout follows registration order
    pub fn add_tx_field(
        &mut self,
        value: ScalarValue,
        name: &'static str,
    ) -> Result<FieldIndex, FrameError> {
        self.tx.add(value, name)
    }

    /// Register an inbound field; layout follows registration order
    pub fn add_rx_field(
        &mut self,
        value: ScalarValue,
        name: &'static str,
    ) -> Result<FieldIndex, FrameError> {
        self.rx.add(value, name)
    }

    /// Remove all fields in both directions
    ///
    /// Outstanding [`FieldIndex`] handles are invalidated.
    pub fn clear_fields(&mut self) {
        self.tx.clear();
        self.rx.clear();
    }

    /// Remove all outbound fields
    pub fn clear_tx_fields(&mut self) {
        self.tx.clear();
    }

    /// Remove all inbound fields
    pub fn clear_rx_fields(&mut self) {
        self.rx.clear();
    }

    /// Outbound field registry
    pub fn tx_fields(&self) -> &FieldRegistry {
        &self.tx
    }

    /// Inbound field registry
    pub fn rx_fields(&self) -> &FieldRegistry {
        &self.rx
    }

    /// Update an outbound field's live value
    pub fn set_tx_value(&mut self, index: FieldIndex, value: ScalarValue) -> Result<(), FrameError> {
        self.tx.set_value(index, value)
    }

    /// Current value of an outbound field
    pub fn tx_value(&self, index: FieldIndex) -> ScalarValue {
        self.tx.value(index)
    }

    /// Last parsed value of an inbound field
    pub fn rx_value(&self, index: FieldIndex) -> ScalarValue {
        self.rx.value(index)
    }

    /// Serialize the outbound field set into the transmit buffer
    ///
    /// Writes the header at offset 0, every field at its assigned offset
    /// in native byte order, and the terminator last.
    pub fn build_tx_frame(&mut self) {
        self.tx_buf[0] = self.header;
        self.tx.write_values(&mut self.tx_buf);
        self.tx_buf[self.tx.frame_size() - 1] = self.terminator;
    }

    /// Validate and deserialize the receive buffer into the inbound fields
    ///
    /// On a header mismatch no field is updated; the mismatch is counted
    /// and returned so desynchronization is observable.
    pub fn parse_rx_frame(&mut self) -> Result<(), FrameError> {
        if self.rx_buf[0] != self.header {
            self.header_mismatches = self.header_mismatches.wrapping_add(1);
            return Err(FrameError::HeaderMismatch);
        }
        self.rx.read_values(&self.rx_buf);
        Ok(())
    }

    /// Built transmit frame, ready to hand to the transport
    pub fn tx_bytes(&self) -> &[u8] {
        &self.tx_buf[..self.tx.frame_size()]
    }

    /// Receive buffer slot for the next inbound frame
    ///
    /// Exactly one frame long; the transport fills it completely before
    /// [`parse_rx_frame`](Self::parse_rx_frame) runs.
    pub fn rx_bytes_mut(&mut self) -> &mut [u8] {
        &mut self.rx_buf[..self.rx.frame_size()]
    }

    /// Number of inbound frames dropped for a bad header
    pub fn header_mismatches(&self) -> u32 {
        self.header_mismatches
    }
}
