//! First-fit placement of widgets onto the grid.
//!
//! The scan is row-major from the top-left cell and returns the first origin
//! whose footprint is empty. There is no attempt to reduce fragmentation; the
//! same layout always yields the same origin.

use tracing::debug;

use crate::{
    Rejection,
    catalog::{Catalog, WidgetId},
    geom::{Cell, Grid},
    layout::{Layout, PlacedWidget},
};

/// Read-only placement queries over a layout.
pub struct Placer<'a> {
    layout: &'a Layout,
    grid: &'a Grid,
}

impl<'a> Placer<'a> {
    /// Placer over `layout` on `grid`.
    pub fn new(layout: &'a Layout, grid: &'a Grid) -> Self {
        Self { layout, grid }
    }

    /// First origin, in row-major order, where a `cols x rows` footprint fits.
    pub fn first_fit(&self, cols: i32, rows: i32) -> Option<Cell> {
        for y in 0..self.grid.row_capacity() {
            for x in 0..self.grid.columns() {
                if !self.grid.in_bounds(x, y, cols, rows) {
                    continue;
                }
                if self.layout.is_area_empty(x, y, cols, rows, &[]) {
                    return Some(Cell::new(x, y));
                }
            }
        }
        None
    }

    /// Free slot for an already placed widget. The widget's own footprint
    /// counts as occupied, so the result is always somewhere else.
    pub fn valid_position_for(&self, widget: &PlacedWidget) -> Option<Cell> {
        self.first_fit(widget.cols, widget.rows)
    }
}

/// Decide where a catalog widget would go, without touching the layout.
pub fn plan_add(
    catalog: &Catalog,
    layout: &Layout,
    grid: &Grid,
    id: WidgetId,
) -> Result<PlacedWidget, Rejection> {
    let def = catalog.get(id).ok_or(Rejection::UnknownWidget(id))?;
    if layout.contains(id) {
        return Err(Rejection::AlreadyPlaced(id));
    }
    let at = Placer::new(layout, grid)
        .first_fit(def.width, def.height)
        .ok_or(Rejection::NoSpaceAvailable)?;
    debug!(widget = %id, x = at.x, y = at.y, "first_fit");
    Ok(PlacedWidget::from_definition(def, at))
}
