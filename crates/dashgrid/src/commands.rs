//! Run dashboard operations and report their results.

use std::io::{BufRead, Write};

use clap::Parser;
use tracing::debug;

use dashgrid_engine::{Dashboard, KeyValueStore, WidgetId};

use crate::{
    cli::{Commands, SessionLine},
    error::Result,
    render,
};

/// Execute one command and print its result followed by any notifications.
///
/// Rejections are reported, not returned: only I/O failures are errors here.
pub fn execute<S: KeyValueStore>(
    dash: &mut Dashboard<S>,
    cmd: &Commands,
    out: &mut impl Write,
) -> Result<()> {
    debug!(?cmd, "execute");
    match *cmd {
        Commands::Show => {
            write!(out, "{}", render::grid(dash))?;
            writeln!(out)?;
            write!(out, "{}", render::table(dash))?;
        }
        Commands::Available => write!(out, "{}", render::available(&dash.available_widgets()))?,
        Commands::Add { id } => {
            if let Ok(p) = dash.add_widget(WidgetId(id)) {
                writeln!(out, "{}", render::placed("added", &p))?;
            }
        }
        Commands::Remove { index } => {
            if let Ok(p) = dash.remove_widget(index) {
                writeln!(out, "{}", render::placed("removed", &p))?;
            }
        }
        Commands::Drop { id, px, py } => {
            let id = WidgetId(id);
            if let Ok(o) = dash.on_drop(id, px, py) {
                writeln!(out, "{}", render::outcome(id, &o))?;
            }
        }
        Commands::Edit => {
            let on = dash.toggle_edit_mode();
            writeln!(out, "edit mode {}", if on { "on" } else { "off" })?;
        }
        Commands::Reset => {
            dash.reset_to_default();
            writeln!(out, "layout reset to default")?;
        }
    }
    report(dash, out)
}

/// Print and clear queued notifications.
fn report<S: KeyValueStore>(dash: &mut Dashboard<S>, out: &mut impl Write) -> Result<()> {
    for n in dash.drain_notifications() {
        writeln!(out, "{n}")?;
    }
    Ok(())
}

/// Interactive edit session: one command per input line until `done` or end
/// of input. Leaving the session leaves edit mode, which saves the layout.
pub fn session<S: KeyValueStore>(
    dash: &mut Dashboard<S>,
    input: impl BufRead,
    out: &mut impl Write,
) -> Result<()> {
    if !dash.is_edit_mode() {
        dash.toggle_edit_mode();
    }
    writeln!(out, "edit mode: one command per line, `done` to save and leave")?;
    for line in input.lines() {
        let line = line?;
        let words: Vec<&str> = line.split_whitespace().collect();
        match words.as_slice() {
            [] => continue,
            ["done" | "quit" | "exit"] => break,
            _ => {}
        }
        match SessionLine::try_parse_from(words.iter().copied()) {
            Ok(SessionLine {
                command: Commands::Edit,
            }) => writeln!(out, "already in edit mode")?,
            Ok(SessionLine { command }) => execute(dash, &command, out)?,
            Err(e) => writeln!(out, "{}", e.to_string().trim_end())?,
        }
    }
    dash.toggle_edit_mode();
    report(dash, out)?;
    if !dash.is_dirty() {
        writeln!(out, "layout saved")?;
    }
    Ok(())
}
