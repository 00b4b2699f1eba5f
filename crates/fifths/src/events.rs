use rotary::WheelEvent;

#[derive(Debug, Clone)]
pub enum AppEvent {
    Show,
    Hide,
    Wheel(WheelEvent),
    ConfigReload,
}

impl From<WheelEvent> for AppEvent {
    fn from(event: WheelEvent) -> Self {
        AppEvent::Wheel(event)
    }
}
