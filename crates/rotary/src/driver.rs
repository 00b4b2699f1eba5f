//! Async host for a [`Wheel`].
//!
//! One task owns the wheel, applies inputs in the order they arrive and paces
//! inertia frames with a ticker that only runs while the wheel is coasting.

use crate::angle::Point;
use crate::item::Item;
use crate::settings::WheelSettings;
use crate::wheel::{Wheel, WheelListener};
use async_channel::Receiver;
use std::time::Duration;
use tokio::time::{self, Interval, MissedTickBehavior};
use tokio_util::sync::CancellationToken;

#[derive(Debug, Clone)]
pub enum WheelInput {
    PointerDown { pointer: Point, time_ms: u64 },
    PointerMove { pointer: Point, time_ms: u64 },
    PointerUp,
    PointerCancel,
    /// Widget center after layout, `None` while unknown.
    Layout(Option<Point>),
    Items(Vec<Item>),
    Settings(WheelSettings),
    Refresh,
    Halt,
}

impl<L: WheelListener> Wheel<L> {
    pub fn apply(&mut self, input: WheelInput) {
        match input {
            WheelInput::PointerDown { pointer, time_ms } => self.pointer_down(pointer, time_ms),
            WheelInput::PointerMove { pointer, time_ms } => self.pointer_move(pointer, time_ms),
            WheelInput::PointerUp => {
                self.pointer_up();
            }
            WheelInput::PointerCancel => {
                self.pointer_cancel();
            }
            WheelInput::Layout(center) => self.set_center(center),
            WheelInput::Items(items) => self.set_items(items),
            WheelInput::Settings(settings) => {
                if let Err(e) = self.reconfigure(settings) {
                    log::warn!("Ignoring wheel settings: {}", e);
                }
            }
            WheelInput::Refresh => self.refresh(),
            WheelInput::Halt => self.halt(),
        }
    }
}

fn frame_ticker(frame_ms: u64) -> Interval {
    let mut frames = time::interval(Duration::from_millis(frame_ms));
    frames.set_missed_tick_behavior(MissedTickBehavior::Skip);
    frames
}

/// Drives `wheel` until `cancel` fires, or until `inputs` closes and any
/// coast in flight has settled. Cancelling halts the wheel first, so the
/// listener hears nothing afterwards.
pub async fn run<L: WheelListener>(
    mut wheel: Wheel<L>,
    inputs: Receiver<WheelInput>,
    cancel: CancellationToken,
) -> Wheel<L> {
    let mut frame_ms = wheel.settings().frame_ms;
    let mut frames = frame_ticker(frame_ms);
    let mut open = true;

    loop {
        if !open && !wheel.is_coasting() {
            break;
        }

        tokio::select! {
            biased;

            _ = cancel.cancelled() => {
                wheel.halt();
                log::debug!("Wheel driver cancelled");
                break;
            }
            input = inputs.recv(), if open => match input {
                Ok(input) => {
                    let was_coasting = wheel.is_coasting();
                    wheel.apply(input);

                    if wheel.settings().frame_ms != frame_ms {
                        frame_ms = wheel.settings().frame_ms;
                        frames = frame_ticker(frame_ms);
                        frames.reset();
                    } else if !was_coasting && wheel.is_coasting() {
                        frames.reset();
                    }
                }
                Err(_) => open = false,
            },
            _ = frames.tick(), if wheel.is_coasting() => {
                wheel.tick();
            }
        }
    }

    wheel
}
