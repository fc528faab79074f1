#![warn(missing_docs)]

//! Grid dashboard layout engine.
//!
//! Widgets from a static [`Catalog`] are placed onto a fixed-width grid with a
//! fixed row capacity. The engine finds first-fit slots for new widgets,
//! resolves drops (moving, swapping with overlapped widgets, rolling back an
//! invalid swap) and persists the arrangement through a [`KeyValueStore`].
//!
//! - [`geom`]: grid dimensions, pixel to cell conversion, bounds checks
//! - [`layout`] and [`occupancy`]: placed widgets and overlap queries
//! - [`place`]: row-major first-fit placement
//! - [`swap`]: drop resolution
//! - [`store`]: layout persistence
//! - [`Dashboard`]: the owner of the layout and entry point for user actions

pub mod catalog;
mod dashboard;
mod error;
pub mod geom;
pub mod layout;
mod notify;
pub mod occupancy;
pub mod place;
pub mod store;
pub mod swap;

#[cfg(test)]
mod property_tests;

pub use catalog::{Catalog, WidgetDefinition, WidgetId};
pub use dashboard::{Dashboard, DashboardConfig};
pub use error::{Error, LayoutFault, Rejection, Result};
pub use geom::{Area, Cell, Grid};
pub use layout::{Layout, PlacedWidget};
pub use notify::{Notification, Severity};
pub use place::Placer;
pub use store::{FileStore, KeyValueStore, LayoutStore, MemoryStore};
pub use swap::{Displacement, DropOutcome, Resolver};
