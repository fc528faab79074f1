//! Plain-text views of a dashboard.

use std::fmt::Write;

use dashgrid_engine::{
    Dashboard, DropOutcome, KeyValueStore, PlacedWidget, WidgetDefinition, WidgetId,
};

/// Character grid of the layout. Each cell shows the id of the widget
/// covering it, or `.` when empty.
///
/// At least the display rows are drawn, more when widgets sit lower.
pub fn grid<S: KeyValueStore>(dash: &Dashboard<S>) -> String {
    let grid = dash.grid();
    let widgets = dash.layout().widgets();
    let used = widgets.iter().map(|w| w.y + w.rows).max().unwrap_or(0);
    let rows = used.max(grid.display_rows()).min(grid.row_capacity());
    let columns = grid.columns();

    let mut cells: Vec<Option<WidgetId>> = vec![None; (rows * columns).max(0) as usize];
    for w in widgets {
        for c in w.area().cells() {
            if c.y < rows && c.x < columns {
                cells[(c.y * columns + c.x) as usize] = Some(w.widget);
            }
        }
    }

    let mut out = String::from("   ");
    for x in 0..columns {
        let _ignored = write!(out, "{x:>3}");
    }
    out.push('\n');
    for y in 0..rows {
        let _ignored = write!(out, "{y:>3}");
        for x in 0..columns {
            match cells[(y * columns + x) as usize] {
                Some(id) => {
                    let _ignored = write!(out, "{:>3}", id.to_string());
                }
                None => out.push_str("  ."),
            }
        }
        out.push('\n');
    }
    out
}

/// Table of placed widgets in layout order; the first column is the index
/// accepted by `remove`.
pub fn table<S: KeyValueStore>(dash: &Dashboard<S>) -> String {
    if dash.layout().is_empty() {
        return "(no widgets)\n".to_string();
    }
    let mut out = format!(
        "{:<5} {:<4} {:<16} {:<8} {}\n",
        "index", "id", "name", "origin", "span"
    );
    for (i, w) in dash.layout().widgets().iter().enumerate() {
        let name = dash.definition(w.widget).map_or("?", |d| d.name.as_str());
        let _ignored = writeln!(
            out,
            "{:<5} {:<4} {:<16} {:<8} {}x{}",
            i,
            w.widget.to_string(),
            name,
            format!("({},{})", w.x, w.y),
            w.cols,
            w.rows
        );
    }
    out
}

/// One line per catalog entry not on the dashboard.
pub fn available(defs: &[&WidgetDefinition]) -> String {
    if defs.is_empty() {
        return "(all widgets placed)\n".to_string();
    }
    let mut out = String::new();
    for d in defs {
        let _ignored = write!(out, "{:<4} {:<16} {}x{}", d.id.to_string(), d.name, d.width, d.height);
        if !d.description.is_empty() {
            let _ignored = write!(out, "  {}", d.description);
        }
        out.push('\n');
    }
    out
}

/// Describe a placed widget.
pub fn placed(verb: &str, w: &PlacedWidget) -> String {
    format!("{verb} widget {} at ({}, {})", w.widget, w.x, w.y)
}

/// Describe a successful drop of `id`.
pub fn outcome(id: WidgetId, out: &DropOutcome) -> String {
    match out {
        DropOutcome::Moved { to, .. } => format!("moved widget {id} to ({}, {})", to.x, to.y),
        DropOutcome::Swapped { to, displaced, .. } => {
            let mut s = format!("moved widget {id} to ({}, {})", to.x, to.y);
            for d in displaced {
                let _ignored = write!(
                    s,
                    "; widget {} displaced to ({}, {})",
                    d.widget, d.to.x, d.to.y
                );
            }
            s
        }
        DropOutcome::Relocated { to, .. } => {
            format!("swap undone; widget {id} relocated to ({}, {})", to.x, to.y)
        }
    }
}
