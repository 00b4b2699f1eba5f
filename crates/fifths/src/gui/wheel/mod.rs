pub mod model;
pub mod view;

pub use model::{ItemGeometry, WheelView};
pub use view::draw;

pub const REFERENCE_SIZE: f64 = 720.0;
pub const RING_RADIUS: f64 = 220.0; // item orbital radius
pub const ITEM_RADIUS: f64 = 40.0; // item bg circle size at twelve items
pub const REFERENCE_SECTOR: f64 = 30.0;
pub const MAX_ITEM_SCALE: f64 = 1.6;
pub const CENTER_CIRCLE_RADIUS: f64 = 36.0;
pub const NEEDLE_LENGTH: f64 = 160.0;
pub const NEEDLE_WIDTH: f64 = 6.0;
pub const MARKER_RADIUS: f64 = 6.0;
pub const FONT_SIZE: f64 = 18.0;
pub const ITEM_IDLE_ALPHA: f64 = 0.55;
