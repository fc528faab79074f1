//! Parse and load dashboard configuration.

use std::{ffi::OsStr, fs, path::Path};

use tracing::debug;

use dashgrid_engine::{
    Catalog, Cell, DashboardConfig, Grid, WidgetId,
    store::{build_default_layout, builtin_default_placements},
};

use crate::{Error, raw::RawConfig};

/// Load a dashboard configuration from a RON file at `path`.
pub fn load_from_path(path: &Path) -> Result<DashboardConfig, Error> {
    if path.extension() != Some(OsStr::new("ron")) {
        return Err(Error::Read {
            path: Some(path.to_path_buf()),
            message: "Unsupported config format (expected a .ron file)".to_string(),
        });
    }
    let text = fs::read_to_string(path).map_err(|e| Error::Read {
        path: Some(path.to_path_buf()),
        message: e.to_string(),
    })?;
    load_from_str(&text, Some(path))
}

/// Parse a dashboard configuration from RON text. `path` is only used for
/// error reporting.
pub fn load_from_str(text: &str, path: Option<&Path>) -> Result<DashboardConfig, Error> {
    let raw: RawConfig = ron::from_str(text).map_err(|e| Error::Parse {
        path: path.map(Path::to_path_buf),
        message: e.to_string(),
    })?;
    resolve(raw, path)
}

fn resolve(raw: RawConfig, path: Option<&Path>) -> Result<DashboardConfig, Error> {
    let g = raw.grid;
    let grid = Grid::new(g.columns, g.row_capacity, g.cell_size, g.display_rows)
        .map_err(|e| Error::validation(path, e.to_string()))?;

    let catalog = match raw.catalog {
        Some(widgets) => {
            Catalog::new(widgets).map_err(|e| Error::validation(path, e.to_string()))?
        }
        None => Catalog::builtin(),
    };
    catalog
        .check_fits(&grid)
        .map_err(|e| Error::validation(path, e.to_string()))?;

    let default_placements = match raw.default_layout {
        Some(entries) => entries
            .into_iter()
            .map(|p| (WidgetId(p.widget), Cell::new(p.x, p.y)))
            .collect(),
        None => builtin_default_placements(),
    };

    if raw.storage_key.is_empty() {
        return Err(Error::validation(path, "storage_key must not be empty"));
    }

    let config = DashboardConfig {
        grid,
        catalog,
        default_placements,
        storage_key: raw.storage_key,
    };
    build_default_layout(&config.catalog, &config.grid, &config.default_placements)
        .map_err(|e| Error::validation(path, e.to_string()))?;

    debug!(
        columns = config.grid.columns(),
        widgets = config.catalog.len(),
        "config loaded"
    );
    Ok(config)
}
