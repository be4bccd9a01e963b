//! Telemetry receive task
//!
//! Reads one full command frame at a time from LPUART1, parses it under
//! the shared lock, and immediately re-arms for the next frame. There is
//! no resynchronization: a shifted stream shows up as header mismatches
//! in the counter until the byte alignment recovers.

use defmt::*;
use embassy_stm32::usart::BufferedUartRx;
use embedded_io_async::Read;

use telemetron_protocol::{FieldIndex, FrameError, MAX_FRAME_SIZE};

use crate::channels::TELEMETRY_FRAME;

/// Handles to the inbound command set, fixed at registration
#[derive(Clone, Copy)]
pub struct RxFields {
    pub set_a: FieldIndex,
    pub set_b: FieldIndex,
    pub set_c: FieldIndex,
    pub mode_a: FieldIndex,
    pub mode_b: FieldIndex,
    pub mode_c: FieldIndex,
}

/// Telemetry RX task - receives and parses command frames
#[embassy_executor::task]
pub async fn telemetry_rx_task(mut rx: BufferedUartRx<'static>, fields: RxFields) {
    info!("Telemetry RX task started");

    // Layout is fixed after setup; capture the expected length once
    let frame_len = TELEMETRY_FRAME.lock().await.rx_fields().frame_size();
    let mut buf = [0u8; MAX_FRAME_SIZE];

    loop {
        // Arm one full-frame reception into the local buffer
        match rx.read_exact(&mut buf[..frame_len]).await {
            Ok(()) => {
                let mut frame = TELEMETRY_FRAME.lock().await;
                frame.rx_bytes_mut().copy_from_slice(&buf[..frame_len]);

                match frame.parse_rx_frame() {
                    Ok(()) => {
                        debug!(
                            "command frame: set=({:?}, {:?}, {:?}) mode=({:?}, {:?}, {:?})",
                            frame.rx_value(fields.set_a),
                            frame.rx_value(fields.set_b),
                            frame.rx_value(fields.set_c),
                            frame.rx_value(fields.mode_a),
                            frame.rx_value(fields.mode_b),
                            frame.rx_value(fields.mode_c),
                        );
                    }
                    Err(FrameError::HeaderMismatch) => {
                        warn!(
                            "header mismatch, frame dropped ({} total)",
                            frame.header_mismatches()
                        );
                    }
                    Err(e) => {
                        warn!("frame parse error: {:?}", e);
                    }
                }
            }
            Err(e) => {
                warn!("UART read error: {:?}", e);
            }
        }
    }
}
