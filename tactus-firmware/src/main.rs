//! Tactus - Haptic Signal Firmware
//!
//! Main firmware binary for RP2040-based boards. Receives vibration
//! commands over a UART line protocol and plays them on a GPIO-driven
//! vibration motor or buzzer.

#![no_std]
#![no_main]

use defmt::*;
use embassy_executor::Spawner;
use embassy_rp::bind_interrupts;
use embassy_rp::gpio::{Level, Output};
use embassy_rp::peripherals::UART0;
use embassy_rp::uart::{BufferedInterruptHandler, Config as UartConfig, Uart};
use static_cell::StaticCell;
use {defmt_rtt as _, panic_probe as _};

use tactus_core::Session;
use tactus_drivers::actuator::GpioActuator;

mod config;
mod tasks;

bind_interrupts!(struct Irqs {
    UART0_IRQ => BufferedInterruptHandler<UART0>;
});

// Static cells for UART buffers (must live forever)
static TX_BUF: StaticCell<[u8; 256]> = StaticCell::new();
static RX_BUF: StaticCell<[u8; 256]> = StaticCell::new();

/// Main entry point
#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("Tactus firmware starting...");

    // Initialize RP2040 peripherals
    let p = embassy_rp::init(Default::default());
    info!("Peripherals initialized");

    let protocol = config::protocol_config();
    info!(
        "Protocol: {:?}, max pulse {}ms, count pulse {}ms, gap {}ms",
        protocol.variant, protocol.max_pulse_ms, protocol.pulse_ms, protocol.gap_ms
    );

    // Setup UART for host communication (GPIO0 TX, GPIO1 RX)
    let mut uart_config = UartConfig::default();
    uart_config.baudrate = config::BAUD_RATE;

    let tx_buf = TX_BUF.init([0u8; 256]);
    let rx_buf = RX_BUF.init([0u8; 256]);

    let uart = Uart::new_blocking(p.UART0, p.PIN_0, p.PIN_1, uart_config);
    let uart = uart.into_buffered(Irqs, tx_buf, rx_buf);
    let (tx, rx) = uart.split();

    info!("UART initialized at {} baud", config::BAUD_RATE);

    // Setup actuator output
    // Pin assignment is board-specific (GPIO15 drives the motor transistor)
    let initial = if config::ACTUATOR_ACTIVE_LOW {
        Level::High
    } else {
        Level::Low
    };
    let actuator_pin = Output::new(p.PIN_15, initial);
    let actuator = GpioActuator::new(actuator_pin, config::ACTUATOR_ACTIVE_LOW);

    spawner
        .spawn(tasks::serial_task(rx, tx, actuator, Session::new(protocol)))
        .unwrap();

    info!("All tasks spawned, firmware running");

    // Main task has nothing else to do
    loop {
        embassy_time::Timer::after_secs(60).await;
        trace!("Main loop heartbeat");
    }
}
