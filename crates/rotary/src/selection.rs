use crate::angle::{FULL_TURN, normalize};
use crate::item::{Item, SelectionResult};

/// Nearest of `count` equal sectors, the first centred on `reference_offset`.
/// Boundaries belong to the lower index.
pub fn sector_index(angle: f64, count: usize, reference_offset: f64) -> Option<usize> {
    if count == 0 || !angle.is_finite() {
        return None;
    }
    let sector = FULL_TURN / count as f64;
    let position = normalize(angle - reference_offset) / sector;
    // round half down
    let nearest = (position - 0.5).ceil() as i64;
    Some(nearest.rem_euclid(count as i64) as usize)
}

/// Maps the wheel angle onto the item collection and remembers what it last
/// reported so the host only hears about real changes.
#[derive(Debug, Clone)]
pub struct SelectionMapper {
    items: Vec<Item>,
    reference_offset: f64,
    current: Option<usize>,
    // outer None forces the next observation to be reported
    reported: Option<Option<usize>>,
}

impl SelectionMapper {
    pub fn new(items: Vec<Item>, reference_offset: f64) -> Self {
        Self {
            items,
            reference_offset,
            current: None,
            reported: Some(None),
        }
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn selected_index(&self) -> Option<usize> {
        self.current
    }

    pub fn selected(&self) -> Option<&Item> {
        self.selected_index().and_then(|i| self.items.get(i))
    }

    pub fn set_items(&mut self, items: Vec<Item>) {
        self.items = items;
        self.current = None;
        self.invalidate();
    }

    /// Makes the next observation report even if the index is unchanged.
    pub fn invalidate(&mut self) {
        self.reported = None;
    }

    pub fn set_reference_offset(&mut self, reference_offset: f64) {
        if self.reference_offset != reference_offset {
            self.reference_offset = reference_offset;
            self.reported = None;
        }
    }

    pub fn index_for(&self, angle: f64) -> Option<usize> {
        sector_index(angle, self.items.len(), self.reference_offset)
    }

    /// Returns `Some(selection)` when the selection differs from the last one
    /// reported, `None` when nothing changed. An empty collection selects
    /// nothing.
    pub fn observe(&mut self, angle: f64) -> Option<Option<SelectionResult>> {
        let index = self.index_for(angle);
        self.current = index;
        if self.reported == Some(index) {
            return None;
        }
        self.reported = Some(index);
        Some(
            index
                .and_then(|i| self.items.get(i))
                .map(|item| SelectionResult::new(item.id.clone())),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn items(n: usize) -> Vec<Item> {
        (0..n)
            .map(|i| Item::new(format!("item-{i}"), format!("Item {i}"), None))
            .collect()
    }

    fn id(result: Option<Option<SelectionResult>>) -> Option<Option<String>> {
        result.map(|r| r.map(|s| s.selected_id.to_string()))
    }

    #[test]
    fn test_four_sectors() {
        let cases = vec![
            (0.0, 0),
            (44.0, 0),
            (45.0, 0),
            (46.0, 1),
            (91.0, 1),
            (134.9, 1),
            (135.0, 1),
            (135.1, 2),
            (270.0, 3),
            (315.0, 3),
            (316.0, 0),
            (359.9, 0),
        ];
        for (angle, expected) in cases {
            assert_eq!(sector_index(angle, 4, 0.0), Some(expected), "angle {angle}");
        }
    }

    #[test]
    fn test_index_always_in_range() {
        for n in 1..=13 {
            let mut angle = -725.0;
            while angle < 725.0 {
                let idx = sector_index(angle, n, 17.0).unwrap();
                assert!(idx < n, "angle {angle} n {n} gave {idx}");
                angle += 0.7;
            }
        }
    }

    #[test]
    fn test_reference_offset_shifts_sectors() {
        assert_eq!(sector_index(90.0, 4, 90.0), Some(0));
        assert_eq!(sector_index(0.0, 4, 90.0), Some(3));
        assert_eq!(sector_index(180.0, 4, 90.0), Some(1));
    }

    #[test]
    fn test_zero_items_selects_nothing() {
        assert_eq!(sector_index(123.0, 0, 0.0), None);

        let mut mapper = SelectionMapper::new(Vec::new(), 0.0);
        assert_eq!(mapper.observe(10.0), None);
        assert_eq!(mapper.observe(200.0), None);
        assert_eq!(mapper.selected(), None);
    }

    #[test]
    fn test_reports_only_changes() {
        let mut mapper = SelectionMapper::new(items(4), 0.0);
        assert_eq!(id(mapper.observe(44.0)), Some(Some("item-0".to_string())));
        assert_eq!(id(mapper.observe(20.0)), None);
        assert_eq!(id(mapper.observe(46.0)), Some(Some("item-1".to_string())));
        assert_eq!(id(mapper.observe(91.0)), None);
        assert_eq!(id(mapper.observe(135.0)), None);
        assert_eq!(id(mapper.observe(136.0)), Some(Some("item-2".to_string())));
        assert_eq!(mapper.selected_index(), Some(2));
    }

    #[test]
    fn test_set_items_forces_report() {
        let mut mapper = SelectionMapper::new(items(4), 0.0);
        mapper.observe(10.0);

        mapper.set_items(vec![Item::new("c", "C", None), Item::new("g", "G", None)]);
        assert_eq!(id(mapper.observe(10.0)), Some(Some("c".to_string())));

        mapper.set_items(Vec::new());
        assert_eq!(id(mapper.observe(10.0)), Some(None));
        assert_eq!(id(mapper.observe(10.0)), None);
    }

    #[test]
    fn test_invalidate_keeps_selection_but_reports_again() {
        let mut mapper = SelectionMapper::new(items(4), 0.0);
        mapper.observe(100.0);
        mapper.invalidate();
        assert_eq!(mapper.selected_index(), Some(1));
        assert_eq!(id(mapper.observe(95.0)), Some(Some("item-1".to_string())));
        assert_eq!(id(mapper.observe(95.0)), None);
    }

    #[test]
    fn test_set_reference_offset_forces_report() {
        let mut mapper = SelectionMapper::new(items(4), 0.0);
        mapper.observe(0.0);
        mapper.set_reference_offset(0.0);
        assert_eq!(id(mapper.observe(0.0)), None);
        mapper.set_reference_offset(90.0);
        assert_eq!(id(mapper.observe(0.0)), Some(Some("item-3".to_string())));
    }
}
