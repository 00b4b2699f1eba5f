use crate::angle::{Point, pointer_angle};
use crate::settings::WheelSettings;
use crate::tracker::{AngleTracker, Motion};

/// Turns raw pointer coordinates into tracker calls.
///
/// Until the host reports a layout the center is unknown and every pointer
/// event is ignored.
#[derive(Debug, Clone)]
pub struct GestureAdapter {
    center: Option<Point>,
    rotation_offset: f64,
    throttle_ms: u64,
    last_forwarded_ms: Option<u64>,
}

impl GestureAdapter {
    pub fn new(settings: &WheelSettings) -> Self {
        Self {
            center: None,
            rotation_offset: settings.rotation_offset,
            throttle_ms: settings.throttle_ms,
            last_forwarded_ms: None,
        }
    }

    pub fn reconfigure(&mut self, settings: &WheelSettings) {
        self.rotation_offset = settings.rotation_offset;
        self.throttle_ms = settings.throttle_ms;
    }

    pub fn center(&self) -> Option<Point> {
        self.center
    }

    /// Non-finite centers are treated as "not laid out yet".
    pub fn set_center(&mut self, center: Option<Point>) {
        self.center = center.filter(Point::is_finite);
    }

    pub fn angle_at(&self, pointer: Point) -> Option<f64> {
        pointer_angle(self.center?, pointer, self.rotation_offset)
    }

    /// Pointer went down. Returns whether tracking started.
    pub fn begin(&mut self, tracker: &mut AngleTracker, pointer: Point, time_ms: u64) -> bool {
        let Some(angle) = self.angle_at(pointer) else {
            log::trace!("Ignoring press at {:?}: no usable center", pointer);
            return false;
        };
        self.last_forwarded_ms = None;
        tracker.start(angle, time_ms);
        true
    }

    /// Pointer moved. Samples arriving within the throttle interval of the
    /// last forwarded one are dropped. A timestamp older than the last
    /// forwarded one (a wrapped event clock) is forwarded and becomes the new
    /// reference.
    pub fn drag(
        &mut self,
        tracker: &mut AngleTracker,
        pointer: Point,
        time_ms: u64,
    ) -> Option<f64> {
        if let Some(last) = self.last_forwarded_ms
            && time_ms >= last
            && time_ms - last < self.throttle_ms
        {
            return None;
        }
        let angle = self.angle_at(pointer)?;
        let updated = tracker.update(angle, time_ms)?;
        self.last_forwarded_ms = Some(time_ms);
        Some(updated)
    }

    pub fn release(&mut self, tracker: &mut AngleTracker) -> Motion {
        self.last_forwarded_ms = None;
        tracker.end()
    }

    /// A cancelled gesture ends like a release.
    pub fn cancel(&mut self, tracker: &mut AngleTracker) -> Motion {
        self.release(tracker)
    }
}
