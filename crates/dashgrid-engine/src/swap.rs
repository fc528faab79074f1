//! Drop resolution: move, swap with overlapped widgets, or reject.
//!
//! A drop runs through these stages:
//! - bounds check of the destination footprint;
//! - overlap query against everything except the dragged widget;
//! - plain move when nothing is overlapped;
//! - otherwise a cheap can-swap pre-check, then the swap itself, then a full
//!   [`Layout::validate`]. A swap that fails validation is rolled back and the
//!   dragged widget is relocated to the first free slot instead.
//!
//! The pre-check only looks at each displaced cell in isolation and ignores
//! displaced widgets colliding with each other after clamping. The post-swap
//! validation catches that case.

use std::iter;

use tracing::{debug, info, warn};

use crate::{
    Rejection,
    catalog::WidgetId,
    geom::{Area, Cell, Grid},
    layout::{Layout, PlacedWidget},
    place::Placer,
};

/// A widget pushed aside by a swap.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Displacement {
    /// The displaced widget.
    pub widget: WidgetId,
    /// Origin before the swap.
    pub from: Cell,
    /// Origin after the swap.
    pub to: Cell,
}

/// Successful outcome of a drop. Every variant mutated the layout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DropOutcome {
    /// The destination was empty.
    Moved {
        /// Origin before the drop.
        from: Cell,
        /// Origin after the drop.
        to: Cell,
    },
    /// The dragged widget took the destination and the overlapped widgets
    /// moved into the area it vacated.
    Swapped {
        /// Origin before the drop.
        from: Cell,
        /// Origin after the drop.
        to: Cell,
        /// Widgets relocated by the swap.
        displaced: Vec<Displacement>,
    },
    /// The swap overlapped and was rolled back; the dragged widget went to
    /// the first free slot instead.
    Relocated {
        /// Origin before the drop.
        from: Cell,
        /// Origin after the fallback.
        to: Cell,
    },
}

impl DropOutcome {
    /// Where the dragged widget ended up.
    pub fn destination(&self) -> Cell {
        match self {
            Self::Moved { to, .. } | Self::Swapped { to, .. } | Self::Relocated { to, .. } => *to,
        }
    }

    /// Warnings that accompany an otherwise successful drop.
    pub fn warnings(&self) -> &'static [Rejection] {
        match self {
            Self::Relocated { .. } => &[Rejection::SwapWouldOverlap],
            Self::Moved { .. } | Self::Swapped { .. } => &[],
        }
    }
}

/// Applies drops to a layout.
pub struct Resolver<'a> {
    layout: &'a mut Layout,
    grid: &'a Grid,
}

impl<'a> Resolver<'a> {
    /// Resolver over `layout` on `grid`.
    pub fn new(layout: &'a mut Layout, grid: &'a Grid) -> Self {
        Self { layout, grid }
    }

    /// Drop widget `id` with its top-left corner at cell `target`.
    ///
    /// On `Err` the layout is exactly as it was before the call.
    pub fn resolve_drop(&mut self, id: WidgetId, target: Cell) -> Result<DropOutcome, Rejection> {
        let dragged = *self.layout.find(id).ok_or(Rejection::UnknownWidget(id))?;
        let (nx, ny) = (target.x, target.y);

        if !self.grid.in_bounds(nx, ny, dragged.cols, dragged.rows) {
            warn!(widget = %id, x = nx, y = ny, "drop out of bounds");
            return Err(Rejection::OutOfBounds);
        }

        let targets: Vec<PlacedWidget> = self
            .layout
            .widgets_overlapping(nx, ny, dragged.cols, dragged.rows, &[id])
            .into_iter()
            .copied()
            .collect();

        if targets.is_empty() {
            if !self
                .layout
                .is_area_empty(nx, ny, dragged.cols, dragged.rows, &[id])
            {
                warn!(widget = %id, x = nx, y = ny, "drop target occupied");
                return Err(Rejection::PositionOccupied);
            }
            self.move_widget(id, target);
            info!(widget = %id, x = nx, y = ny, "moved");
            return Ok(DropOutcome::Moved {
                from: dragged.origin(),
                to: target,
            });
        }

        debug!(
            widget = %id,
            targets = ?targets.iter().map(|t| t.widget).collect::<Vec<_>>(),
            "drop overlaps"
        );
        if !self.can_swap(&dragged, target, &targets) {
            warn!(widget = %id, x = nx, y = ny, "not enough space to swap");
            return Err(Rejection::InsufficientSpaceToSwap);
        }

        let snapshot = self.snapshot(&dragged, &targets);
        let displaced = self.perform_swap(&dragged, target, &targets);

        if let Err(fault) = self.layout.check(self.grid) {
            warn!(widget = %id, %fault, "swap would overlap, rolling back");
            self.restore(&snapshot);
            return self.fallback(id);
        }

        info!(widget = %id, x = nx, y = ny, displaced = displaced.len(), "swapped");
        Ok(DropOutcome::Swapped {
            from: dragged.origin(),
            to: target,
            displaced,
        })
    }

    /// Where a displaced widget lands: its offset from the drop origin is
    /// re-applied to the dragged widget's old origin, then clamped into the grid.
    fn relocated_origin(&self, dragged: &PlacedWidget, target: Cell, t: &PlacedWidget) -> Cell {
        let rel_x = t.x - target.x;
        let rel_y = t.y - target.y;
        self.grid
            .clamp_origin(dragged.x + rel_x, dragged.y + rel_y, t.cols, t.rows)
    }

    /// Every relocated target cell must avoid the dragged widget's destination
    /// and be free of widgets outside the swap.
    fn can_swap(&self, dragged: &PlacedWidget, target: Cell, targets: &[PlacedWidget]) -> bool {
        let destination = Area::new(target.x, target.y, dragged.cols, dragged.rows);
        let mut exclude: Vec<WidgetId> = targets.iter().map(|t| t.widget).collect();
        exclude.push(dragged.widget);

        targets.iter().all(|t| {
            let at = self.relocated_origin(dragged, target, t);
            Area::new(at.x, at.y, t.cols, t.rows).cells().all(|cell| {
                !destination.contains(cell)
                    && self.layout.is_area_empty(cell.x, cell.y, 1, 1, &exclude)
            })
        })
    }

    /// Move the dragged widget and relocate every target.
    fn perform_swap(
        &mut self,
        dragged: &PlacedWidget,
        target: Cell,
        targets: &[PlacedWidget],
    ) -> Vec<Displacement> {
        self.move_widget(dragged.widget, target);
        targets
            .iter()
            .map(|t| {
                let to = self.relocated_origin(dragged, target, t);
                self.move_widget(t.widget, to);
                Displacement {
                    widget: t.widget,
                    from: t.origin(),
                    to,
                }
            })
            .collect()
    }

    /// After a rolled-back swap, try the first free slot for the dragged widget.
    fn fallback(&mut self, id: WidgetId) -> Result<DropOutcome, Rejection> {
        let Some(current) = self.layout.find(id).copied() else {
            return Err(Rejection::UnknownWidget(id));
        };
        let found = Placer::new(&*self.layout, self.grid).valid_position_for(&current);
        match found {
            Some(at) => {
                self.move_widget(id, at);
                info!(widget = %id, x = at.x, y = at.y, "relocated after failed swap");
                Ok(DropOutcome::Relocated {
                    from: current.origin(),
                    to: at,
                })
            }
            None => {
                warn!(widget = %id, "no valid position after failed swap");
                Err(Rejection::NoValidPositionAvailable)
            }
        }
    }

    fn snapshot(&self, dragged: &PlacedWidget, targets: &[PlacedWidget]) -> Vec<(WidgetId, Cell)> {
        iter::once(dragged)
            .chain(targets)
            .map(|w| (w.widget, w.origin()))
            .collect()
    }

    fn restore(&mut self, snapshot: &[(WidgetId, Cell)]) {
        for &(id, at) in snapshot {
            self.move_widget(id, at);
        }
    }

    fn move_widget(&mut self, id: WidgetId, to: Cell) {
        if let Some(w) = self.layout.find_mut(id) {
            w.move_to(to);
        }
    }
}
