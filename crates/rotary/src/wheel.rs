use crate::angle::Point;
use crate::gesture::GestureAdapter;
use crate::item::{Item, SelectionResult};
use crate::selection::SelectionMapper;
use crate::settings::{SettingsError, WheelSettings};
use crate::tracker::{AngleTracker, Motion, RotationState};
use async_channel::{Sender, TrySendError};

#[derive(Debug, Clone, PartialEq)]
pub enum WheelEvent {
    /// The wheel turned (or was re-reported at the same angle during a drag).
    AngleChanged(f64),
    /// The item nearest the reference position changed. `None` means nothing
    /// is selectable.
    SelectionChanged(Option<SelectionResult>),
}

/// Receives everything a wheel reports to its host.
pub trait WheelListener {
    /// Returns whether the host took the event.
    fn on_event(&mut self, event: WheelEvent) -> bool;
}

impl<T: From<WheelEvent>> WheelListener for Sender<T> {
    fn on_event(&mut self, event: WheelEvent) -> bool {
        match self.try_send(T::from(event)) {
            Ok(()) => true,
            Err(TrySendError::Full(_)) => {
                log::warn!("Wheel event dropped: host queue is full");
                false
            }
            Err(TrySendError::Closed(_)) => {
                log::trace!("Wheel event dropped: host is gone");
                false
            }
        }
    }
}

/// One rotary widget: tracker, selection and gesture handling bound to a host
/// listener.
pub struct Wheel<L> {
    settings: WheelSettings,
    tracker: AngleTracker,
    selection: SelectionMapper,
    gesture: GestureAdapter,
    listener: L,
}

impl<L: WheelListener> Wheel<L> {
    pub fn new(
        items: Vec<Item>,
        settings: WheelSettings,
        listener: L,
    ) -> Result<Self, SettingsError> {
        let settings = settings.validate()?;
        Ok(Self {
            tracker: AngleTracker::new(&settings),
            selection: SelectionMapper::new(items, settings.reference_offset),
            gesture: GestureAdapter::new(&settings),
            settings,
            listener,
        })
    }

    pub fn settings(&self) -> &WheelSettings {
        &self.settings
    }

    pub fn state(&self) -> RotationState {
        self.tracker.state()
    }

    pub fn items(&self) -> &[Item] {
        self.selection.items()
    }

    pub fn selected(&self) -> Option<&Item> {
        self.selection.selected()
    }

    pub fn is_coasting(&self) -> bool {
        self.tracker.is_coasting()
    }

    pub fn center(&self) -> Option<Point> {
        self.gesture.center()
    }

    pub fn listener(&self) -> &L {
        &self.listener
    }

    pub fn set_center(&mut self, center: Option<Point>) {
        self.gesture.set_center(center);
    }

    pub fn set_items(&mut self, items: Vec<Item>) {
        self.selection.set_items(items);
        self.publish_selection();
    }

    /// Applies new tuning. Invalid settings leave the wheel untouched.
    pub fn reconfigure(&mut self, settings: WheelSettings) -> Result<(), SettingsError> {
        let settings = settings.validate()?;
        self.tracker.reconfigure(&settings);
        self.gesture.reconfigure(&settings);
        self.selection.set_reference_offset(settings.reference_offset);
        self.settings = settings;
        self.publish_selection();
        Ok(())
    }

    /// Re-announces the current angle and selection, e.g. after a host
    /// (re)attaches.
    pub fn refresh(&mut self) {
        let angle = self.tracker.angle();
        self.listener.on_event(WheelEvent::AngleChanged(angle));
        self.selection.invalidate();
        self.publish_selection();
    }

    pub fn pointer_down(&mut self, pointer: Point, time_ms: u64) {
        if self.gesture.begin(&mut self.tracker, pointer, time_ms) {
            self.publish(self.tracker.angle());
        }
    }

    pub fn pointer_move(&mut self, pointer: Point, time_ms: u64) {
        if let Some(angle) = self.gesture.drag(&mut self.tracker, pointer, time_ms) {
            self.publish(angle);
        }
    }

    pub fn pointer_up(&mut self) -> Motion {
        self.gesture.release(&mut self.tracker)
    }

    pub fn pointer_cancel(&mut self) -> Motion {
        self.gesture.cancel(&mut self.tracker)
    }

    /// Runs one inertia frame. Returns whether more frames are due.
    pub fn tick(&mut self) -> bool {
        if let Some(angle) = self.tracker.tick() {
            self.publish(angle);
        }
        self.tracker.is_coasting()
    }

    /// Stops any drag or coast without emitting anything.
    pub fn halt(&mut self) {
        self.tracker.halt();
    }

    fn publish(&mut self, angle: f64) {
        self.listener.on_event(WheelEvent::AngleChanged(angle));
        self.publish_selection();
    }

    fn publish_selection(&mut self) {
        if let Some(selection) = self.selection.observe(self.tracker.angle())
            && !self.listener.on_event(WheelEvent::SelectionChanged(selection))
        {
            // report it again on the next sample
            self.selection.invalidate();
        }
    }
}
