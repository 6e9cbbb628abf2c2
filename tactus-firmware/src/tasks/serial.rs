//! Host serial task
//!
//! Reads command lines from the host, plays them on the actuator and
//! writes the status lines back. Lines are handled strictly one at a time:
//! bytes arriving during playback wait in the UART ring buffer.

use defmt::*;
use embassy_rp::gpio::Output;
use embassy_rp::uart::{self, BufferedUartRx, BufferedUartTx};
use embassy_time::Delay;
use embedded_io_async::{Read, Write};

use tactus_core::{LineReceiver, Received, Session};
use tactus_drivers::actuator::GpioActuator;
use tactus_protocol::Response;

/// Buffer size for UART receive
const RX_BUF_SIZE: usize = 64;

/// Actuator type driven by this task
pub type BoardActuator = GpioActuator<Output<'static>>;

/// Serial task - frames, executes and answers host commands
#[embassy_executor::task]
pub async fn serial_task(
    mut rx: BufferedUartRx,
    mut tx: BufferedUartTx,
    mut actuator: BoardActuator,
    session: Session,
) {
    info!("Serial task started ({:?})", session.config().variant);

    send(&mut tx, &session.banner()).await;

    let mut receiver = LineReceiver::new();
    let mut buf = [0u8; RX_BUF_SIZE];

    loop {
        let n = match rx.read(&mut buf).await {
            Ok(n) => n,
            Err(uart::Error::Overrun) => {
                warn!("UART overrun, discarding partial line");
                send(&mut tx, &receiver.overrun()).await;
                continue;
            }
            Err(e) => {
                warn!("UART read error: {:?}", e);
                continue;
            }
        };
        trace!("RX: {} bytes", n);

        for &byte in &buf[..n] {
            match receiver.feed(byte) {
                Received::Line(line) => {
                    handle_line(&session, &mut tx, &mut actuator, &line).await;
                }
                Received::Pending => {}
                Received::Rejected(response) => {
                    debug!("Rejected input: {:?}", response);
                    send(&mut tx, &response).await;
                }
            }
        }
    }
}

/// Run one complete line through the session
async fn handle_line(
    session: &Session,
    tx: &mut BufferedUartTx,
    actuator: &mut BoardActuator,
    line: &str,
) {
    let prepared = session.prepare(line);
    for response in prepared.responses() {
        send(tx, &response).await;
    }

    let Some(job) = prepared.into_job() else {
        return;
    };

    debug!(
        "Playing {} pulse(s), {:?}",
        job.pattern().len(),
        job.policy()
    );
    let result = job
        .play_async(session.executor(), actuator, &mut Delay)
        .await;

    if actuator.has_fault() {
        warn!("Actuator pin write failed");
    }
    if let Some(done) = result.completion() {
        send(tx, &done).await;
    }
}

/// Encode and write a status line
async fn send(tx: &mut BufferedUartTx, response: &Response<'_>) {
    match response.encode() {
        Ok(line) => {
            if let Err(e) = tx.write_all(line.as_bytes()).await {
                warn!("Failed to send {:?} line: {:?}", response.tag(), e);
            }
        }
        Err(e) => warn!("Failed to encode response: {:?}", e),
    }
}
