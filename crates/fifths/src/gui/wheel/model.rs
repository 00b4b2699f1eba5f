use crate::gui::wheel::{
    ITEM_RADIUS, MAX_ITEM_SCALE, REFERENCE_SECTOR, REFERENCE_SIZE, RING_RADIUS,
};
use palette::{FromColor, Hsv, Srgb, encoding};
use rotary::angle::{FULL_TURN, polar};
use rotary::{Item, ItemId, Point, WheelEvent, WheelSettings};

#[derive(Debug, Clone, PartialEq)]
pub struct ItemGeometry {
    pub center: Point,
    pub radius: f64,
    pub scale: f64,
}

impl ItemGeometry {
    /// Wheel angle an item sits at. This is the angle the wheel has to point
    /// to for the item to be selected.
    pub fn angle(index: usize, count: usize, reference_offset: f64) -> f64 {
        reference_offset + index as f64 * FULL_TURN / count as f64
    }

    /// Few items get bigger circles, many items smaller ones.
    pub fn calculate(
        index: usize,
        count: usize,
        view_center: Point,
        scale_factor: f64,
        rotation_offset: f64,
        reference_offset: f64,
    ) -> Self {
        let sector = FULL_TURN / count as f64;
        let scale = (sector / REFERENCE_SECTOR).sqrt().min(MAX_ITEM_SCALE);
        let angle = Self::angle(index, count, reference_offset);

        Self {
            center: polar(
                view_center,
                RING_RADIUS * scale_factor,
                angle,
                rotation_offset,
            ),
            radius: ITEM_RADIUS * scale * scale_factor,
            scale,
        }
    }
}

/// Parses `#rrggbb` / `#rgb` item colors. Anything else is ignored with a
/// warning.
pub fn parse_color(color: &str) -> Option<Srgb<f64>> {
    color
        .trim()
        .parse::<Srgb<u8>>()
        .map(|c| c.into_format::<f64>())
        .map_err(|e| log::warn!("Ignoring item color {:?}: {}", color, e))
        .ok()
}

/// Evenly spread hues so neighbouring items stay distinguishable.
pub fn fallback_color(index: usize, count: usize) -> Srgb<f64> {
    let hue = index as f64 * FULL_TURN / count.max(1) as f64;
    Srgb::<f64>::from_color(Hsv::<encoding::Srgb, f64>::new(hue, 0.45, 0.7))
}

/// Everything the renderer needs, kept in sync with the wheel through its
/// events.
pub struct WheelView {
    pub items: Vec<Item>,
    pub colors: Vec<Srgb<f64>>,
    pub angle: f64,
    pub selected: Option<ItemId>,
    pub center: Point,
    pub scale_factor: f64,
    pub rotation_offset: f64,
    pub reference_offset: f64,
    pub geometries: Vec<ItemGeometry>,
}

impl WheelView {
    pub fn new(items: Vec<Item>, settings: &WheelSettings) -> Self {
        let mut view = Self {
            items: Vec::new(),
            colors: Vec::new(),
            angle: 0.0,
            selected: None,
            center: Point::default(),
            scale_factor: 1.0,
            rotation_offset: settings.rotation_offset,
            reference_offset: settings.reference_offset,
            geometries: Vec::new(),
        };
        view.set_items(items);
        view
    }

    pub fn set_items(&mut self, items: Vec<Item>) {
        let count = items.len();
        self.colors = items
            .iter()
            .enumerate()
            .map(|(i, item)| {
                item.color
                    .as_deref()
                    .and_then(parse_color)
                    .unwrap_or_else(|| fallback_color(i, count))
            })
            .collect();
        self.items = items;
        self.recalculate_geometries();
    }

    pub fn set_settings(&mut self, settings: &WheelSettings) {
        self.rotation_offset = settings.rotation_offset;
        self.reference_offset = settings.reference_offset;
        self.recalculate_geometries();
    }

    /// Re-centers the wheel in a `width` x `height` area and returns the new
    /// center for the gesture handling.
    pub fn resize(&mut self, width: f64, height: f64) -> Point {
        self.center = Point::new(width / 2.0, height / 2.0);
        self.scale_factor = width.min(height).max(0.0) / REFERENCE_SIZE;
        self.recalculate_geometries();
        self.center
    }

    /// Folds a wheel event into the view. Returns whether a redraw is needed.
    pub fn apply(&mut self, event: &WheelEvent) -> bool {
        match event {
            WheelEvent::AngleChanged(angle) => {
                let changed = self.angle != *angle;
                self.angle = *angle;
                changed
            }
            WheelEvent::SelectionChanged(selection) => {
                self.selected = selection.as_ref().map(|s| s.selected_id.clone());
                true
            }
        }
    }

    pub fn selected_index(&self) -> Option<usize> {
        let id = self.selected.as_ref()?;
        self.items.iter().position(|item| &item.id == id)
    }

    pub fn selected_item(&self) -> Option<&Item> {
        self.selected_index().and_then(|i| self.items.get(i))
    }

    /// Tip of the needle at `length` from the center.
    pub fn needle_tip(&self, length: f64) -> Point {
        polar(
            self.center,
            length * self.scale_factor,
            self.angle,
            self.rotation_offset,
        )
    }

    fn recalculate_geometries(&mut self) {
        let count = self.items.len();
        self.geometries = (0..count)
            .map(|i| {
                ItemGeometry::calculate(
                    i,
                    count,
                    self.center,
                    self.scale_factor,
                    self.rotation_offset,
                    self.reference_offset,
                )
            })
            .collect();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rotary::SelectionResult;

    fn keys() -> Vec<Item> {
        ["c", "g", "d", "a", "e", "b", "f#", "db", "ab", "eb", "bb", "f"]
            .iter()
            .map(|k| Item::new(*k, k.to_uppercase(), None))
            .collect()
    }

    fn close(a: Point, b: Point) -> bool {
        (a.x - b.x).abs() < 1e-9 && (a.y - b.y).abs() < 1e-9
    }

    #[test]
    fn test_geometry_starts_at_top_and_runs_clockwise() {
        let mut view = WheelView::new(keys(), &WheelSettings::default());
        view.resize(REFERENCE_SIZE, REFERENCE_SIZE);

        let c = REFERENCE_SIZE / 2.0;
        assert!(close(view.geometries[0].center, Point::new(c, c - RING_RADIUS)));
        assert!(close(view.geometries[3].center, Point::new(c + RING_RADIUS, c)));
        assert!(close(view.geometries[6].center, Point::new(c, c + RING_RADIUS)));
        assert!((view.geometries[0].radius - ITEM_RADIUS).abs() < 1e-9);
    }

    #[test]
    fn test_few_items_grow_but_are_capped() {
        let mut view = WheelView::new(keys()[..2].to_vec(), &WheelSettings::default());
        view.resize(REFERENCE_SIZE, REFERENCE_SIZE);
        assert!((view.geometries[0].scale - MAX_ITEM_SCALE).abs() < 1e-9);
    }

    #[test]
    fn test_resize_scales_to_short_side() {
        let mut view = WheelView::new(keys(), &WheelSettings::default());
        let center = view.resize(1440.0, 360.0);
        assert_eq!(center, Point::new(720.0, 180.0));
        assert!((view.scale_factor - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_apply_tracks_angle_and_selection() {
        let mut view = WheelView::new(keys(), &WheelSettings::default());
        assert!(view.apply(&WheelEvent::AngleChanged(95.0)));
        assert!(!view.apply(&WheelEvent::AngleChanged(95.0)));

        view.apply(&WheelEvent::SelectionChanged(Some(SelectionResult::new(
            ItemId::new("a"),
        ))));
        assert_eq!(view.selected_index(), Some(3));
        assert_eq!(view.selected_item().map(|i| i.label.as_str()), Some("A"));

        view.apply(&WheelEvent::SelectionChanged(None));
        assert_eq!(view.selected_item(), None);
    }

    #[test]
    fn test_item_colors() {
        assert_eq!(
            parse_color("#ff0000"),
            Some(Srgb::<f64>::new(1.0, 0.0, 0.0))
        );
        assert_eq!(parse_color("not a color"), None);

        let items = vec![
            Item::new("x", "X", Some("#00ff00".into())),
            Item::new("y", "Y", Some("bogus".into())),
        ];
        let view = WheelView::new(items, &WheelSettings::default());
        assert_eq!(view.colors[0], Srgb::<f64>::new(0.0, 1.0, 0.0));
        assert_eq!(view.colors[1], fallback_color(1, 2));
    }
}
