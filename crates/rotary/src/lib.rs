//! Rotary selection widget core.
//!
//! Turns pointer drags around a center point into a normalized rotation angle,
//! keeps spinning with a decaying velocity after release, and reports which of
//! a fixed set of items sits nearest the reference position.

pub mod macros;

pub mod angle;
pub mod driver;
pub mod gesture;
pub mod item;
pub mod selection;
pub mod settings;
pub mod tracker;
pub mod wheel;

pub use angle::Point;
pub use driver::WheelInput;
pub use item::{Item, ItemId, Label, SelectionResult};
pub use settings::{SettingsError, WheelSettings};
pub use tracker::{AngleTracker, Motion, RotationState};
pub use wheel::{Wheel, WheelEvent, WheelListener};
