//! Telemetry transmit task
//!
//! Periodically refreshes the outbound signal set, builds the frame under
//! the shared lock, and writes it to LPUART1 outside the lock.

use defmt::*;
use embassy_stm32::usart::BufferedUartTx;
use embassy_time::{Duration, Instant, Ticker};
use embedded_io_async::Write;

use telemetron_protocol::{FieldIndex, ScalarValue, MAX_FRAME_SIZE};

use crate::channels::TELEMETRY_FRAME;

/// Transmit period
const TX_PERIOD_MS: u64 = 100;

/// Handles to the outbound signal set, fixed at registration
#[derive(Clone, Copy)]
pub struct TxFields {
    pub uptime_s: FieldIndex,
    pub sawtooth: FieldIndex,
    pub triangle: FieldIndex,
    pub tick: FieldIndex,
    /// Inbound frames dropped for a bad header, saturating at i16::MAX
    pub rx_dropped: FieldIndex,
    /// UART write failures on this link, saturating at i16::MAX
    pub tx_errors: FieldIndex,
}

/// Telemetry TX task - builds and sends one frame per tick
#[embassy_executor::task]
pub async fn telemetry_tx_task(mut tx: BufferedUartTx<'static>, fields: TxFields) {
    info!("Telemetry TX task started");

    let mut ticker = Ticker::every(Duration::from_millis(TX_PERIOD_MS));
    let mut tick: i16 = 0;
    let mut tx_errors: i16 = 0;

    loop {
        ticker.next().await;
        tick = tick.wrapping_add(1);

        let uptime_ms = Instant::now().as_millis();
        let saw = (uptime_ms % 1000) as f32 / 1000.0;
        let tri = if saw < 0.5 { 2.0 * saw } else { 2.0 - 2.0 * saw };

        // Build under the lock, transmit outside it
        let (buf, len) = {
            let mut frame = TELEMETRY_FRAME.lock().await;

            let dropped = frame.header_mismatches().min(i16::MAX as u32) as i16;

            // Tags are fixed at registration, so these cannot fail
            let _ = frame.set_tx_value(fields.uptime_s, ScalarValue::F32(uptime_ms as f32 / 1000.0));
            let _ = frame.set_tx_value(fields.sawtooth, ScalarValue::F32(saw));
            let _ = frame.set_tx_value(fields.triangle, ScalarValue::F32(tri));
            let _ = frame.set_tx_value(fields.tick, ScalarValue::I16(tick));
            let _ = frame.set_tx_value(fields.rx_dropped, ScalarValue::I16(dropped));
            let _ = frame.set_tx_value(fields.tx_errors, ScalarValue::I16(tx_errors));

            frame.build_tx_frame();

            let mut buf = [0u8; MAX_FRAME_SIZE];
            let len = frame.tx_bytes().len();
            buf[..len].copy_from_slice(frame.tx_bytes());
            (buf, len)
        };

        if let Err(e) = tx.write_all(&buf[..len]).await {
            warn!("UART write error: {:?}", e);
            tx_errors = tx_errors.saturating_add(1);
        } else {
            trace!("frame sent ({} bytes)", len);
        }
    }
}
