use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const DEFAULT_DAMPING_FACTOR: f64 = 0.95;
pub const DEFAULT_MIN_VELOCITY: f64 = 0.1;
pub const DEFAULT_THROTTLE_MS: u64 = 50;
pub const DEFAULT_FRAME_MS: u64 = 16;
pub const DEFAULT_ROTATION_OFFSET: f64 = 90.0; // "up" reads as 0
pub const DEFAULT_REFERENCE_OFFSET: f64 = 0.0;

#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct WheelSettings {
    pub damping_factor: f64,
    pub min_velocity: f64, // degrees per frame
    pub throttle_ms: u64,
    pub frame_ms: u64,
    pub rotation_offset: f64,
    pub reference_offset: f64,
}

impl Default for WheelSettings {
    fn default() -> Self {
        Self {
            damping_factor: DEFAULT_DAMPING_FACTOR,
            min_velocity: DEFAULT_MIN_VELOCITY,
            throttle_ms: DEFAULT_THROTTLE_MS,
            frame_ms: DEFAULT_FRAME_MS,
            rotation_offset: DEFAULT_ROTATION_OFFSET,
            reference_offset: DEFAULT_REFERENCE_OFFSET,
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum SettingsError {
    #[error("damping factor must lie strictly between 0 and 1, got {0}")]
    Damping(f64),
    #[error("minimum velocity must be positive, got {0}")]
    MinVelocity(f64),
    #[error("frame length must be at least 1 ms")]
    FrameLength,
    #[error("{0} must be a finite angle")]
    Offset(&'static str),
}

impl WheelSettings {
    /// Checks the constraints the inertia loop relies on to terminate.
    pub fn validate(self) -> Result<Self, SettingsError> {
        if !(self.damping_factor > 0.0 && self.damping_factor < 1.0) {
            return Err(SettingsError::Damping(self.damping_factor));
        }
        if !(self.min_velocity > 0.0 && self.min_velocity.is_finite()) {
            return Err(SettingsError::MinVelocity(self.min_velocity));
        }
        if self.frame_ms == 0 {
            return Err(SettingsError::FrameLength);
        }
        if !self.rotation_offset.is_finite() {
            return Err(SettingsError::Offset("rotation offset"));
        }
        if !self.reference_offset.is_finite() {
            return Err(SettingsError::Offset("reference offset"));
        }
        Ok(self)
    }
}
