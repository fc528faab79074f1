use serde::Deserialize;

use dashgrid_engine::WidgetDefinition;

use crate::defaults;

/// Grid section as written in the config file.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct RawGrid {
    /// Number of columns.
    #[serde(default = "defaults::default_columns")]
    pub columns: i32,
    /// Number of rows that can hold widgets.
    #[serde(default = "defaults::default_row_capacity")]
    pub row_capacity: i32,
    /// Pixel edge length of one cell.
    #[serde(default = "defaults::default_cell_size")]
    pub cell_size: f64,
    /// Rows drawn for the empty backdrop.
    #[serde(default = "defaults::default_display_rows")]
    pub display_rows: i32,
}

impl Default for RawGrid {
    fn default() -> Self {
        Self {
            columns: defaults::default_columns(),
            row_capacity: defaults::default_row_capacity(),
            cell_size: defaults::default_cell_size(),
            display_rows: defaults::default_display_rows(),
        }
    }
}

/// A default-layout entry. The span comes from the catalog.
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct RawPlacement {
    /// Catalog id.
    pub widget: u32,
    /// Origin column.
    pub x: i32,
    /// Origin row.
    pub y: i32,
}

/// Top-level config file shape. Every section is optional.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct RawConfig {
    /// Grid dimensions.
    #[serde(default)]
    pub grid: RawGrid,
    /// Store key for the layout record.
    #[serde(default = "defaults::default_storage_key")]
    pub storage_key: String,
    /// Omitted means the built-in catalog.
    #[serde(default)]
    pub catalog: Option<Vec<WidgetDefinition>>,
    /// Omitted means the built-in default layout.
    #[serde(default)]
    pub default_layout: Option<Vec<RawPlacement>>,
}
