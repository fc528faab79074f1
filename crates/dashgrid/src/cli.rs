//! Command-line interface definitions for dashgrid.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use logging::LogArgs;

/// Command-line interface for the `dashgrid` binary.
#[derive(Parser, Debug)]
#[command(name = "dashgrid", about = "Edit a grid dashboard layout", version)]
pub struct Cli {
    /// Logging controls.
    #[command(flatten)]
    pub log: LogArgs,

    /// Path to a RON config file. Defaults to `~/.dashgrid/config.ron` when it exists.
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Path to the JSON state file holding the saved layout.
    #[arg(long, value_name = "PATH")]
    pub state: Option<PathBuf>,

    /// Operation to run.
    #[command(subcommand)]
    pub command: Commands,
}

/// Dashboard operations, shared by the command line and the edit session.
#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Commands {
    /// Print the layout as a grid and a table.
    Show,
    /// List catalog widgets that are not on the dashboard.
    Available,
    /// Place a catalog widget in the first free slot.
    Add {
        /// Catalog id of the widget.
        id: u32,
    },
    /// Remove the widget at a layout index (see `show`).
    Remove {
        /// Position in the layout table.
        index: usize,
    },
    /// Drop a placed widget at a pixel position.
    Drop {
        /// Id of the dragged widget.
        id: u32,
        /// Horizontal pixel offset.
        #[arg(allow_negative_numbers = true)]
        px: f64,
        /// Vertical pixel offset.
        #[arg(allow_negative_numbers = true)]
        py: f64,
    },
    /// Enter edit mode and read commands from stdin; the layout is saved on `done`.
    Edit,
    /// Replace the layout with the default one.
    Reset,
}

/// One line of input inside an edit session.
#[derive(Parser, Debug)]
#[command(no_binary_name = true, disable_version_flag = true)]
pub struct SessionLine {
    /// Operation to run.
    #[command(subcommand)]
    pub command: Commands,
}
