use crate::events::AppEvent;
use async_channel::{Receiver, Sender};
use rotary::{Wheel, WheelInput};
use std::thread;
use tokio::runtime::Runtime;
use tokio_util::sync::CancellationToken;

/// Starts the socket server, the config watcher and the wheel driver on a
/// dedicated tokio runtime. Cancelling `cancel` stops the wheel.
pub fn start_background_services(
    tx: Sender<AppEvent>,
    wheel: Wheel<Sender<AppEvent>>,
    wheel_rx: Receiver<WheelInput>,
    cancel: CancellationToken,
) {
    thread::spawn(move || {
        let rt = match Runtime::new() {
            Ok(rt) => rt,
            Err(e) => {
                log::error!("Failed to create Tokio runtime: {}", e);
                return;
            }
        };

        rt.block_on(async {
            {
                let tx = tx.clone();
                tokio::spawn(async move {
                    crate::sys::server::run_server(tx).await;
                });
            }

            {
                let tx = tx.clone();
                tokio::spawn(async move {
                    crate::config::run_async_watcher(tx).await;
                });
            }

            tokio::spawn(async move {
                rotary::driver::run(wheel, wheel_rx, cancel).await;
                log::debug!("Wheel driver stopped");
            });

            std::future::pending::<()>().await;
        });
    });
}
