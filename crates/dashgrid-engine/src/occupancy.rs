// Occupancy queries over a set of placed widgets.
//
// Overlap queries are linear scans; dashboards hold a handful of widgets.
// `check` rebuilds a full bitmap and is the authoritative consistency gate.

use crate::{
    catalog::WidgetId,
    error::LayoutFault,
    geom::{Area, Grid},
    layout::PlacedWidget,
};

/// Widgets (not in `exclude`) whose footprint intersects `area`.
pub fn overlapping<'a>(
    widgets: &'a [PlacedWidget],
    area: Area,
    exclude: &[WidgetId],
) -> Vec<&'a PlacedWidget> {
    widgets
        .iter()
        .filter(|w| !exclude.contains(&w.widget) && w.area().overlaps(&area))
        .collect()
}

/// True iff no widget outside `exclude` intersects `area`.
pub fn is_empty(widgets: &[PlacedWidget], area: Area, exclude: &[WidgetId]) -> bool {
    !widgets
        .iter()
        .any(|w| !exclude.contains(&w.widget) && w.area().overlaps(&area))
}

/// Mark every footprint into a `row_capacity x columns` bitmap, stopping at
/// the first footprint that leaves the grid or cell that is already taken.
pub fn check(widgets: &[PlacedWidget], grid: &Grid) -> Result<(), LayoutFault> {
    let cols = grid.columns() as usize;
    let rows = grid.row_capacity() as usize;
    // Owner of each marked cell, so overlap faults can name both widgets.
    let mut bitmap: Vec<Option<WidgetId>> = vec![None; cols * rows];

    for w in widgets {
        let area = w.area();
        if !grid.contains_area(&area) {
            return Err(LayoutFault::OutOfBounds { widget: w.widget });
        }
        for cell in area.cells() {
            let idx = cell.y as usize * cols + cell.x as usize;
            if let Some(first) = bitmap[idx] {
                return Err(LayoutFault::Overlap {
                    first,
                    second: w.widget,
                });
            }
            bitmap[idx] = Some(w.widget);
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pw(id: u32, x: i32, y: i32, cols: i32, rows: i32) -> PlacedWidget {
        PlacedWidget::new(WidgetId(id), x, y, cols, rows)
    }

    #[test]
    fn overlapping_respects_exclusions() {
        let ws = vec![pw(1, 0, 0, 1, 1), pw(2, 1, 0, 2, 2)];
        let hits = overlapping(&ws, Area::new(0, 0, 2, 1), &[]);
        assert_eq!(hits.len(), 2);
        let hits = overlapping(&ws, Area::new(0, 0, 2, 1), &[WidgetId(1)]);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].widget, WidgetId(2));
    }

    #[test]
    fn empty_area() {
        let ws = vec![pw(2, 1, 0, 2, 2)];
        assert!(is_empty(&ws, Area::new(0, 0, 1, 2), &[]));
        assert!(is_empty(&ws, Area::new(3, 0, 2, 2), &[]));
        assert!(!is_empty(&ws, Area::new(2, 1, 1, 1), &[]));
        assert!(is_empty(&ws, Area::new(2, 1, 1, 1), &[WidgetId(2)]));
    }

    #[test]
    fn check_flags_overlap_and_bounds() {
        let grid = Grid::default();
        assert!(check(&[pw(1, 0, 0, 1, 1), pw(2, 1, 0, 2, 2)], &grid).is_ok());
        assert_eq!(
            check(&[pw(1, 0, 0, 2, 2), pw(2, 1, 1, 1, 1)], &grid),
            Err(LayoutFault::Overlap {
                first: WidgetId(1),
                second: WidgetId(2)
            })
        );
        assert_eq!(
            check(&[pw(1, 4, 0, 2, 1)], &grid),
            Err(LayoutFault::OutOfBounds { widget: WidgetId(1) })
        );
        assert_eq!(
            check(&[pw(1, 0, 9, 1, 2)], &grid),
            Err(LayoutFault::OutOfBounds { widget: WidgetId(1) })
        );
        assert_eq!(
            check(&[pw(1, -1, 0, 1, 1)], &grid),
            Err(LayoutFault::OutOfBounds { widget: WidgetId(1) })
        );
    }

    #[test]
    fn check_rejects_extreme_records() {
        let grid = Grid::default();
        for w in [
            pw(1, 1, 0, i32::MAX, 1),
            pw(1, 0, 0, 1, i32::MAX),
            pw(1, i32::MAX, 0, 1, 1),
            pw(1, 0, i32::MAX, 1, 1),
            pw(1, 0, 0, 0, 1),
        ] {
            assert_eq!(
                check(&[w], &grid),
                Err(LayoutFault::OutOfBounds { widget: WidgetId(1) })
            );
        }
    }
}
