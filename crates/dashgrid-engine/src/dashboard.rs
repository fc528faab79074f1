//! The dashboard: single owner of the layout and entry point for every
//! user action.

use std::mem;

use tracing::{debug, error, info, warn};

use crate::{
    Error, Rejection, Result,
    catalog::{Catalog, WidgetDefinition, WidgetId},
    geom::{Cell, Grid},
    layout::{Layout, PlacedWidget},
    notify::Notification,
    place,
    store::{
        DEFAULT_STORAGE_KEY, KeyValueStore, LayoutStore, build_default_layout,
        builtin_default_placements,
    },
    swap::{DropOutcome, Resolver},
};

/// Everything needed to open a dashboard.
#[derive(Debug, Clone)]
pub struct DashboardConfig {
    /// Grid dimensions and pixel scale.
    pub grid: Grid,
    /// Widgets that can be placed.
    pub catalog: Catalog,
    /// Placements used before anything is saved and on reset.
    pub default_placements: Vec<(WidgetId, Cell)>,
    /// Key of the layout record in the store.
    pub storage_key: String,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            grid: Grid::default(),
            catalog: Catalog::builtin(),
            default_placements: builtin_default_placements(),
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
        }
    }
}

/// A dashboard bound to a persistence store.
///
/// All mutation goes through `&mut self`, so there is exactly one writer.
/// Every public operation leaves the layout valid. Rejections are returned to
/// the caller and also queued as notifications.
#[derive(Debug)]
pub struct Dashboard<S> {
    grid: Grid,
    catalog: Catalog,
    layout: Layout,
    store: LayoutStore<S>,
    edit_mode: bool,
    dirty: bool,
    notifications: Vec<Notification>,
}

impl<S: KeyValueStore> Dashboard<S> {
    /// Validate the configuration and load the saved layout from `store`.
    pub fn open(config: DashboardConfig, store: S) -> Result<Self> {
        let DashboardConfig {
            grid,
            catalog,
            default_placements,
            storage_key,
        } = config;
        if storage_key.is_empty() {
            return Err(Error::InvalidLayout("storage key must not be empty".into()));
        }
        catalog.check_fits(&grid)?;
        let default = build_default_layout(&catalog, &grid, &default_placements)?;
        let store = LayoutStore::new(store, storage_key, default);
        let layout = store.load(&catalog, &grid);
        info!(widgets = layout.len(), "dashboard opened");
        Ok(Self {
            grid,
            catalog,
            layout,
            store,
            edit_mode: false,
            dirty: false,
            notifications: Vec::new(),
        })
    }

    /// Grid dimensions.
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Widget catalog.
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Current layout.
    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    /// Catalog definition for a widget id.
    pub fn definition(&self, id: WidgetId) -> Option<&WidgetDefinition> {
        self.catalog.get(id)
    }

    /// Catalog entries not currently on the dashboard, in catalog order.
    pub fn available_widgets(&self) -> Vec<&WidgetDefinition> {
        self.catalog
            .iter()
            .filter(|def| !self.layout.contains(def.id))
            .collect()
    }

    /// Cells drawn for the empty grid backdrop.
    pub fn display_cells(&self) -> Vec<Cell> {
        self.grid.display_cells()
    }

    /// Whether edit mode is on.
    pub fn is_edit_mode(&self) -> bool {
        self.edit_mode
    }

    /// True when the last write failed and the store lags the in-memory layout.
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Backing key-value store.
    pub fn store(&self) -> &S {
        self.store.store()
    }

    /// Mutable access to the backing store.
    pub fn store_mut(&mut self) -> &mut S {
        self.store.store_mut()
    }

    /// Take all queued notifications.
    pub fn drain_notifications(&mut self) -> Vec<Notification> {
        mem::take(&mut self.notifications)
    }

    /// Place a catalog widget in the first free slot.
    pub fn add_widget(&mut self, id: WidgetId) -> Result<PlacedWidget, Rejection> {
        let placed = place::plan_add(&self.catalog, &self.layout, &self.grid, id)
            .map_err(|r| self.reject(r))?;
        self.layout.push(placed);
        info!(widget = %id, x = placed.x, y = placed.y, "widget added");
        self.persist();
        Ok(placed)
    }

    /// Remove the widget at `index` in layout order.
    pub fn remove_widget(&mut self, index: usize) -> Result<PlacedWidget, Rejection> {
        let removed = self
            .layout
            .remove(index)
            .ok_or_else(|| self.reject(Rejection::IndexOutOfRange(index)))?;
        info!(widget = %removed.widget, index, "widget removed");
        self.persist();
        Ok(removed)
    }

    /// Handle a drop of widget `id` at pixel position `(px, py)`.
    pub fn on_drop(
        &mut self,
        id: WidgetId,
        px: f64,
        py: f64,
    ) -> Result<DropOutcome, Rejection> {
        let target = self.grid.to_cell(px, py);
        debug!(widget = %id, px, py, x = target.x, y = target.y, "drop");
        self.drop_at(id, target)
    }

    /// Handle a drop already converted to a cell.
    pub fn drop_at(
        &mut self,
        id: WidgetId,
        target: Cell,
    ) -> Result<DropOutcome, Rejection> {
        let res = Resolver::new(&mut self.layout, &self.grid).resolve_drop(id, target);
        match res {
            Ok(outcome) => {
                for w in outcome.warnings() {
                    self.notifications.push(w.notification());
                }
                self.persist();
                Ok(outcome)
            }
            Err(Rejection::NoValidPositionAvailable) => {
                // The swap was attempted and rolled back before the fallback failed.
                self.notifications
                    .push(Rejection::SwapWouldOverlap.notification());
                Err(self.reject(Rejection::NoValidPositionAvailable))
            }
            Err(r) => Err(self.reject(r)),
        }
    }

    /// Flip edit mode. Leaving edit mode persists the layout. Returns the new
    /// state.
    pub fn toggle_edit_mode(&mut self) -> bool {
        self.edit_mode = !self.edit_mode;
        debug!(edit_mode = self.edit_mode, "edit mode toggled");
        if !self.edit_mode {
            self.persist();
        }
        self.edit_mode
    }

    /// Replace the layout with the default and persist it.
    pub fn reset_to_default(&mut self) -> &Layout {
        let (layout, res) = self.store.reset();
        self.layout = layout;
        self.record_write(res);
        &self.layout
    }

    /// Retry a failed write. A no-op when nothing is pending.
    pub fn flush(&mut self) -> Result<()> {
        if !self.dirty {
            return Ok(());
        }
        self.store.save(&self.layout)?;
        self.dirty = false;
        info!("pending layout flushed");
        Ok(())
    }

    fn persist(&mut self) {
        let res = self.store.save(&self.layout);
        self.record_write(res);
    }

    fn record_write(&mut self, res: Result<()>) {
        match res {
            Ok(()) => self.dirty = false,
            Err(e) => {
                error!(error = %e, "failed to persist layout");
                self.dirty = true;
                self.notifications.push(Notification::error(
                    "Persistence Failure",
                    format!("Layout could not be saved: {e}"),
                ));
            }
        }
    }

    fn reject(&mut self, r: Rejection) -> Rejection {
        warn!(rejection = %r, "operation rejected");
        self.notifications.push(r.notification());
        r
    }
}
