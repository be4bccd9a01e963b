//! Telemetron firmware entry point
//!
//! Binds the telemetry frame to LPUART1 on an STM32G431 board: a periodic
//! task streams the outbound signal set, a receive task parses inbound
//! command frames and re-arms after each one. The wire layout of both
//! directions is fixed by the registration order below.

#![no_std]
#![no_main]

use defmt::*;
use embassy_executor::Spawner;
use embassy_stm32::usart::{BufferedInterruptHandler, BufferedUart, Config as UartConfig};
use embassy_stm32::{bind_interrupts, peripherals};
use static_cell::StaticCell;
use {defmt_rtt as _, panic_probe as _};

use telemetron_protocol::ScalarValue;

use crate::channels::TELEMETRY_FRAME;
use crate::tasks::telemetry_rx::{telemetry_rx_task, RxFields};
use crate::tasks::telemetry_tx::{telemetry_tx_task, TxFields};

mod channels;
mod tasks;

bind_interrupts!(struct Irqs {
    LPUART1 => BufferedInterruptHandler<peripherals::LPUART1>;
});

// Static cells for UART buffers (must live forever)
static TX_BUF: StaticCell<[u8; 256]> = StaticCell::new();
static RX_BUF: StaticCell<[u8; 256]> = StaticCell::new();

/// Main entry point
#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("Telemetron firmware starting...");

    let p = embassy_stm32::init(Default::default());
    info!("Peripherals initialized");

    let mut uart_config = UartConfig::default();
    uart_config.baudrate = 115_200;

    let uart = unwrap!(BufferedUart::new(
        p.LPUART1,
        Irqs,
        p.PA3,
        p.PA2,
        TX_BUF.init([0; 256]),
        RX_BUF.init([0; 256]),
        uart_config,
    ));
    let (uart_tx, uart_rx) = uart.split();

    // Register both signal sets; this order defines the wire layout
    let (tx_fields, rx_fields) = {
        let mut frame = TELEMETRY_FRAME.lock().await;

        let tx_fields = TxFields {
            uptime_s: unwrap!(frame.add_tx_field(ScalarValue::F32(0.0), "UptimeS")),
            sawtooth: unwrap!(frame.add_tx_field(ScalarValue::F32(0.0), "Sawtooth")),
            triangle: unwrap!(frame.add_tx_field(ScalarValue::F32(0.0), "Triangle")),
            tick: unwrap!(frame.add_tx_field(ScalarValue::I16(0), "Tick")),
            rx_dropped: unwrap!(frame.add_tx_field(ScalarValue::I16(0), "RxDropped")),
            tx_errors: unwrap!(frame.add_tx_field(ScalarValue::I16(0), "TxErrors")),
        };

        let rx_fields = RxFields {
            set_a: unwrap!(frame.add_rx_field(ScalarValue::F32(0.0), "SetA")),
            set_b: unwrap!(frame.add_rx_field(ScalarValue::F32(0.0), "SetB")),
            set_c: unwrap!(frame.add_rx_field(ScalarValue::F32(0.0), "SetC")),
            mode_a: unwrap!(frame.add_rx_field(ScalarValue::I16(0), "ModeA")),
            mode_b: unwrap!(frame.add_rx_field(ScalarValue::I16(0), "ModeB")),
            mode_c: unwrap!(frame.add_rx_field(ScalarValue::I16(0), "ModeC")),
        };

        info!(
            "frame layout: tx {} bytes, rx {} bytes",
            frame.tx_fields().frame_size(),
            frame.rx_fields().frame_size()
        );

        (tx_fields, rx_fields)
    };

    unwrap!(spawner.spawn(telemetry_tx_task(uart_tx, tx_fields)));
    unwrap!(spawner.spawn(telemetry_rx_task(uart_rx, rx_fields)));
}
