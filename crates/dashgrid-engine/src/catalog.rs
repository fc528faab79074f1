//! The static catalog of widgets that can be placed on a dashboard.

use std::{
    collections::HashSet,
    fmt::{Display, Formatter, Result as FmtResult},
};

use serde::{Deserialize, Serialize};

use crate::{Error, Result, geom::Grid};

/// Stable catalog identifier of a widget.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WidgetId(pub u32);

impl Display for WidgetId {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{}", self.0)
    }
}

/// Immutable catalog entry describing a widget and its span.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct WidgetDefinition {
    /// Unique, stable id.
    pub id: WidgetId,
    /// Display name.
    pub name: String,
    /// Longer description shown in the picker.
    #[serde(default)]
    pub description: String,
    /// Span in rows.
    pub height: i32,
    /// Span in columns.
    pub width: i32,
}

impl WidgetDefinition {
    /// Construct a definition.
    pub fn new(
        id: u32,
        name: impl Into<String>,
        description: impl Into<String>,
        width: i32,
        height: i32,
    ) -> Self {
        Self {
            id: WidgetId(id),
            name: name.into(),
            description: description.into(),
            height,
            width,
        }
    }
}

/// Ordered widget catalog with id lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Catalog {
    widgets: Vec<WidgetDefinition>,
}

impl Catalog {
    /// Build a catalog, rejecting duplicate ids and spans below one cell.
    pub fn new(widgets: Vec<WidgetDefinition>) -> Result<Self> {
        let mut seen = HashSet::new();
        for w in &widgets {
            if !seen.insert(w.id) {
                return Err(Error::InvalidCatalog(format!("duplicate widget id {}", w.id)));
            }
            if w.width < 1 || w.height < 1 {
                return Err(Error::InvalidCatalog(format!(
                    "widget {} has span {}x{}; both must be at least 1",
                    w.id, w.width, w.height
                )));
            }
        }
        Ok(Self { widgets })
    }

    /// The five stock widgets.
    pub fn builtin() -> Self {
        Self {
            widgets: builtin_widgets(),
        }
    }

    /// Look up a definition by id.
    pub fn get(&self, id: WidgetId) -> Option<&WidgetDefinition> {
        self.widgets.iter().find(|w| w.id == id)
    }

    /// Whether `id` is in the catalog.
    pub fn contains(&self, id: WidgetId) -> bool {
        self.get(id).is_some()
    }

    /// Definitions in catalog order.
    pub fn iter(&self) -> impl Iterator<Item = &WidgetDefinition> {
        self.widgets.iter()
    }

    /// Number of definitions.
    pub fn len(&self) -> usize {
        self.widgets.len()
    }

    /// True when the catalog has no definitions.
    pub fn is_empty(&self) -> bool {
        self.widgets.is_empty()
    }

    /// Reject definitions whose span is wider or taller than `grid`; such a
    /// widget could never be placed.
    pub fn check_fits(&self, grid: &Grid) -> Result<()> {
        match self
            .widgets
            .iter()
            .find(|w| w.width > grid.columns() || w.height > grid.row_capacity())
        {
            Some(w) => Err(Error::InvalidCatalog(format!(
                "widget {} spans {}x{} but the grid is {}x{}",
                w.id,
                w.width,
                w.height,
                grid.columns(),
                grid.row_capacity()
            ))),
            None => Ok(()),
        }
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::builtin()
    }
}

/// Stock widget definitions: (id, width, height).
pub fn builtin_widgets() -> Vec<WidgetDefinition> {
    [(1, 1, 1), (2, 2, 2), (3, 1, 2), (4, 2, 1), (5, 1, 1)]
        .into_iter()
        .map(|(id, width, height)| {
            WidgetDefinition::new(
                id,
                format!("Widget {id}"),
                format!("This is description of widget {id}"),
                width,
                height,
            )
        })
        .collect()
}
