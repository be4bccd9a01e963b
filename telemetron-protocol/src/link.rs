//! Transport adapter
//!
//! Thin binding between a [`SerialFrame`] and an asynchronous serial
//! transport, expressed over the `embedded-io-async` traits so any UART
//! (or a host-side test double) fits the seam.
//!
//! The adapter borrows the frame across the I/O await, so it suits a
//! caller that owns its frame outright. Firmware that shares one frame
//! between tasks behind a mutex should instead copy the frame bytes under
//! the lock and drive the transport halves directly — holding the lock
//! across a UART await would stall the opposite direction.

use embedded_io_async::{Read, ReadExactError, Write};

use crate::frame::SerialFrame;

/// One frame instance's serial channel
///
/// Owns the transmit and receive halves of the link. Both operations are
/// one-shot: [`transmit`](Self::transmit) queues the already-built frame,
/// [`start_receive`](Self::start_receive) arms exactly one full-frame
/// reception and must be re-issued after every parse.
pub struct FrameLink<W, R> {
    tx: W,
    rx: R,
}

impl<W: Write, R: Read> FrameLink<W, R> {
    /// Bind the two transport halves
    pub fn new(tx: W, rx: R) -> Self {
        Self { tx, rx }
    }

    /// Submit the built transmit frame to the link
    ///
    /// Call [`SerialFrame::build_tx_frame`] first; this hands the frame
    /// buffer to the transport and nothing more.
    pub async fn transmit(&mut self, frame: &SerialFrame) -> Result<(), W::Error> {
        self.tx.write_all(frame.tx_bytes()).await
    }

    /// Arm one full-frame reception
    ///
    /// Resolves once the receive buffer holds a complete frame; the
    /// caller then parses and re-arms.
    pub async fn start_receive(
        &mut self,
        frame: &mut SerialFrame,
    ) -> Result<(), ReadExactError<R::Error>> {
        self.rx.read_exact(frame.rx_bytes_mut()).await
    }

    /// Give back the transport halves
    pub fn release(self) -> (W, R) {
        (self.tx, self.rx)
    }
}
