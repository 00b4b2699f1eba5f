//! Degree arithmetic shared by the tracker, the gesture adapter and renderers.
//!
//! Angles are in degrees. Screen coordinates grow right and down, so a positive
//! angle turns clockwise on screen.

pub const FULL_TURN: f64 = 360.0;

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

/// Wraps any finite angle into `[0, 360)`.
pub fn normalize(deg: f64) -> f64 {
    let wrapped = deg.rem_euclid(FULL_TURN);
    // rem_euclid can round up to exactly 360.0 for tiny negative inputs
    if wrapped >= FULL_TURN { 0.0 } else { wrapped }
}

/// Shortest signed arc from `from` to `to`, in `(-180, 180]`.
pub fn signed_delta(from: f64, to: f64) -> f64 {
    let delta = (to - from).rem_euclid(FULL_TURN);
    if delta > FULL_TURN / 2.0 {
        delta - FULL_TURN
    } else {
        delta
    }
}

/// Angle of `pointer` around `center`, shifted by `rotation_offset`.
///
/// With an offset of 90 the pointer straight above the center reads 0 and the
/// pointer to its right reads 90. Returns `None` when either point is not
/// finite, so callers never see NaN.
pub fn pointer_angle(center: Point, pointer: Point, rotation_offset: f64) -> Option<f64> {
    if !center.is_finite() || !pointer.is_finite() || !rotation_offset.is_finite() {
        return None;
    }
    let (dx, dy) = (pointer.x - center.x, pointer.y - center.y);
    Some(normalize(dy.atan2(dx).to_degrees() + rotation_offset))
}

/// Inverse of [`pointer_angle`]: the point at `radius` from `center` whose
/// pointer angle is `deg`.
pub fn polar(center: Point, radius: f64, deg: f64, rotation_offset: f64) -> Point {
    let rad = (deg - rotation_offset).to_radians();
    Point::new(center.x + radius * rad.cos(), center.y + radius * rad.sin())
}
