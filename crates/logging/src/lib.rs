#![warn(missing_docs)]

//! Logging setup for the dashgrid binaries: the `--trace`/`--debug`/
//! `--log-level`/`--log-filter` flags, the filter they resolve to, and a
//! logfmt formatter ([`fmt`]) for stderr.

use std::{env, io};

use clap::Args;
use tracing_subscriber::{EnvFilter, fmt::layer as fmt_layer, prelude::*, registry};

pub mod fmt;

/// Logging flags, flattened into each dashgrid command line.
#[derive(Debug, Clone, Default, Args)]
pub struct LogArgs {
    /// Log everything from dashgrid crates at trace level
    #[arg(long, conflicts_with_all = ["debug", "log_level", "log_filter"])]
    pub trace: bool,

    /// Log dashgrid crates at debug level
    #[arg(long, conflicts_with_all = ["trace", "log_level", "log_filter"])]
    pub debug: bool,

    /// Level for dashgrid crates (error|warn|info|debug|trace)
    #[arg(long)]
    pub log_level: Option<String>,

    /// Raw tracing filter directive, used verbatim
    /// e.g. "dashgrid_engine=trace,dashgrid=debug"
    #[arg(long)]
    pub log_filter: Option<String>,
}

impl LogArgs {
    /// Filter spec for these arguments. See [`compute_spec`].
    pub fn spec(&self) -> String {
        compute_spec(
            self.trace,
            self.debug,
            self.log_level.as_deref(),
            self.log_filter.as_deref(),
        )
    }
}

/// Tracing targets of the dashgrid workspace. Level flags apply to these
/// only, so dependency noise stays at the subscriber default.
pub fn our_crates() -> &'static [&'static str] {
    &["dashgrid", "dashgrid_engine", "config", "logging"]
}

/// Directive list giving every dashgrid crate the same `level`,
/// e.g. `dashgrid=debug,dashgrid_engine=debug,...`.
pub fn level_spec_for(level: &str) -> String {
    let lvl = level.to_ascii_lowercase();
    our_crates()
        .iter()
        .map(|target| format!("{target}={lvl}"))
        .collect::<Vec<_>>()
        .join(",")
}

/// Pick the filter for a dashgrid run. The first that applies wins:
/// `--log-filter` verbatim, `--trace`, `--debug`, `--log-level`, then
/// `RUST_LOG`. With none of them set, dashgrid crates log at `warn` so
/// warnings reach stderr without cluttering command output.
pub fn compute_spec(
    trace: bool,
    debug: bool,
    log_level: Option<&str>,
    log_filter: Option<&str>,
) -> String {
    let level = match (trace, debug, log_level) {
        (true, _, _) => Some("trace"),
        (false, true, _) => Some("debug"),
        (false, false, lvl) => lvl,
    };
    match (log_filter, level) {
        (Some(filter), _) => filter.to_string(),
        (None, Some(lvl)) => level_spec_for(lvl),
        (None, None) => env::var("RUST_LOG").unwrap_or_else(|_| level_spec_for("warn")),
    }
}

/// Create an `EnvFilter` from a spec string.
pub fn env_filter_from_spec(spec: &str) -> EnvFilter {
    EnvFilter::new(spec)
}

/// Install a global subscriber writing logfmt lines to stderr.
///
/// Returns the spec in effect. Installing twice is a no-op.
pub fn init(args: &LogArgs) -> String {
    let spec = args.spec();
    registry()
        .with(env_filter_from_spec(&spec))
        .with(
            fmt_layer()
                .event_format(fmt::Logfmt)
                .with_writer(io::stderr),
        )
        .try_init()
        .ok();
    spec
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn level_spec_covers_all_crates() {
        let spec = level_spec_for("DEBUG");
        for c in our_crates() {
            assert!(spec.contains(&format!("{c}=debug")), "{spec}");
        }
    }

    #[test]
    fn explicit_filter_wins() {
        let spec = compute_spec(true, false, Some("info"), Some("dashgrid=trace"));
        assert_eq!(spec, "dashgrid=trace");
    }

    #[test]
    fn flags_take_precedence_over_level() {
        assert_eq!(compute_spec(true, false, None, None), level_spec_for("trace"));
        assert_eq!(compute_spec(false, true, None, None), level_spec_for("debug"));
        assert_eq!(
            compute_spec(false, false, Some("error"), None),
            level_spec_for("error")
        );
    }

    #[test]
    fn args_spec_matches_compute_spec() {
        let args = LogArgs {
            log_level: Some("info".into()),
            ..LogArgs::default()
        };
        assert_eq!(args.spec(), level_spec_for("info"));
    }
}
