//! Placed widgets and the layout that owns them.

use serde::{Deserialize, Serialize};

use crate::{
    catalog::{WidgetDefinition, WidgetId},
    error::LayoutFault,
    geom::{Area, Cell, Grid},
    occupancy,
};

/// A catalog widget bound to a grid location.
///
/// The span is copied from the definition when the widget is placed and does
/// not follow later catalog edits. Only `x` and `y` change afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlacedWidget {
    /// Catalog id of the placed widget.
    #[serde(rename = "widgetId")]
    pub widget: WidgetId,
    /// Origin column.
    pub x: i32,
    /// Origin row.
    pub y: i32,
    /// Span in columns.
    pub cols: i32,
    /// Span in rows.
    pub rows: i32,
}

impl PlacedWidget {
    /// Construct a placement from raw parts.
    pub const fn new(widget: WidgetId, x: i32, y: i32, cols: i32, rows: i32) -> Self {
        Self {
            widget,
            x,
            y,
            cols,
            rows,
        }
    }

    /// Place `def` with its top-left corner at `at`.
    pub fn from_definition(def: &WidgetDefinition, at: Cell) -> Self {
        Self::new(def.id, at.x, at.y, def.width, def.height)
    }

    /// Top-left cell.
    pub fn origin(&self) -> Cell {
        Cell::new(self.x, self.y)
    }

    /// Covered cells as an area.
    pub fn area(&self) -> Area {
        Area::new(self.x, self.y, self.cols, self.rows)
    }

    pub(crate) fn move_to(&mut self, at: Cell) {
        self.x = at.x;
        self.y = at.y;
    }
}

/// Ordered collection of placed widgets. Order is insertion order and has no
/// spatial meaning.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Layout {
    widgets: Vec<PlacedWidget>,
}

impl Layout {
    /// An empty layout.
    pub fn new() -> Self {
        Self::default()
    }

    /// Wrap existing placements without checking them.
    pub fn from_widgets(widgets: Vec<PlacedWidget>) -> Self {
        Self { widgets }
    }

    /// Placed widgets in insertion order.
    pub fn widgets(&self) -> &[PlacedWidget] {
        &self.widgets
    }

    /// Number of placed widgets.
    pub fn len(&self) -> usize {
        self.widgets.len()
    }

    /// True when nothing is placed.
    pub fn is_empty(&self) -> bool {
        self.widgets.is_empty()
    }

    /// Widget at layout index `index`.
    pub fn get(&self, index: usize) -> Option<&PlacedWidget> {
        self.widgets.get(index)
    }

    /// Find the placement of a widget by catalog id.
    pub fn find(&self, id: WidgetId) -> Option<&PlacedWidget> {
        self.widgets.iter().find(|w| w.widget == id)
    }

    /// Whether widget `id` is placed.
    pub fn contains(&self, id: WidgetId) -> bool {
        self.find(id).is_some()
    }

    pub(crate) fn find_mut(&mut self, id: WidgetId) -> Option<&mut PlacedWidget> {
        self.widgets.iter_mut().find(|w| w.widget == id)
    }

    pub(crate) fn push(&mut self, widget: PlacedWidget) {
        self.widgets.push(widget);
    }

    pub(crate) fn remove(&mut self, index: usize) -> Option<PlacedWidget> {
        (index < self.widgets.len()).then(|| self.widgets.remove(index))
    }

    /// Widgets, other than those in `exclude`, intersecting the given area.
    pub fn widgets_overlapping(
        &self,
        x: i32,
        y: i32,
        cols: i32,
        rows: i32,
        exclude: &[WidgetId],
    ) -> Vec<&PlacedWidget> {
        occupancy::overlapping(&self.widgets, Area::new(x, y, cols, rows), exclude)
    }

    /// True iff nothing outside `exclude` intersects the given area.
    pub fn is_area_empty(&self, x: i32, y: i32, cols: i32, rows: i32, exclude: &[WidgetId]) -> bool {
        occupancy::is_empty(&self.widgets, Area::new(x, y, cols, rows), exclude)
    }

    /// Full consistency check: every footprint in bounds, no shared cells.
    pub fn validate(&self, grid: &Grid) -> bool {
        self.check(grid).is_ok()
    }

    /// Like [`Layout::validate`] but reports the first fault found.
    pub fn check(&self, grid: &Grid) -> Result<(), LayoutFault> {
        occupancy::check(&self.widgets, grid)
    }

    /// Compare placements ignoring order.
    pub fn same_placements(&self, other: &Self) -> bool {
        let mut a = self.widgets.clone();
        let mut b = other.widgets.clone();
        a.sort_by_key(|w| w.widget);
        b.sort_by_key(|w| w.widget);
        a == b
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_as_tuple_list() {
        let layout = Layout::from_widgets(vec![PlacedWidget::new(WidgetId(2), 1, 0, 2, 2)]);
        let json = serde_json::to_string(&layout).unwrap();
        assert_eq!(json, r#"[{"widgetId":2,"x":1,"y":0,"cols":2,"rows":2}]"#);
    }

    #[test]
    fn remove_out_of_range_is_none() {
        let mut layout = Layout::from_widgets(vec![PlacedWidget::new(WidgetId(1), 0, 0, 1, 1)]);
        assert!(layout.remove(1).is_none());
        assert_eq!(layout.len(), 1);
        assert_eq!(layout.remove(0).map(|w| w.widget), Some(WidgetId(1)));
        assert!(layout.is_empty());
    }

    #[test]
    fn same_placements_ignores_order() {
        let a = PlacedWidget::new(WidgetId(1), 0, 0, 1, 1);
        let b = PlacedWidget::new(WidgetId(2), 1, 0, 2, 2);
        let l1 = Layout::from_widgets(vec![a, b]);
        let l2 = Layout::from_widgets(vec![b, a]);
        assert!(l1.same_placements(&l2));
        assert_ne!(l1, l2);
    }
}
