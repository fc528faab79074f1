use std::{
    fmt::{Display, Formatter, Result as FmtResult},
    io, result,
};

use thiserror::Error;

use crate::{catalog::WidgetId, notify::Notification};

/// Convenient result type for fallible engine operations.
pub type Result<T, E = Error> = result::Result<T, E>;

/// Hard failures: broken configuration or a persistence backend that refused
/// a read or write. Drop/add/remove conflicts are [`Rejection`]s instead.
#[derive(Error, Debug)]
pub enum Error {
    /// The key-value store failed to read or write.
    #[error("store error: {0}")]
    Store(#[from] io::Error),

    /// A layout could not be encoded for persistence.
    #[error("failed to serialize layout: {0}")]
    Serialize(#[source] serde_json::Error),

    /// Persisted data was not valid JSON for the expected shape.
    #[error("failed to deserialize layout: {0}")]
    Deserialize(#[source] serde_json::Error),

    /// Grid dimensions are unusable.
    #[error("invalid grid: {0}")]
    InvalidGrid(String),

    /// The widget catalog contains duplicate ids or zero spans.
    #[error("invalid catalog: {0}")]
    InvalidCatalog(String),

    /// A layout violates the bounds or overlap invariant.
    #[error("invalid layout: {0}")]
    InvalidLayout(String),
}

/// Recoverable outcomes that leave the layout untouched (or restored).
///
/// Every variant maps onto a user-facing warning via [`Rejection::notification`].
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    /// No empty region can hold the widget.
    #[error("no space available for widget")]
    NoSpaceAvailable,
    /// The drop target leaves the grid.
    #[error("widget exceeds grid bounds")]
    OutOfBounds,
    /// The drop target is occupied and no swap was attempted.
    #[error("position is already occupied")]
    PositionOccupied,
    /// The displaced widgets do not fit into the vacated region.
    #[error("not enough space to swap widgets")]
    InsufficientSpaceToSwap,
    /// The swap produced overlaps and was rolled back.
    #[error("swapping would cause overlaps")]
    SwapWouldOverlap,
    /// After a rolled-back swap no free slot could hold the dragged widget.
    #[error("no valid position available for the widget")]
    NoValidPositionAvailable,
    /// The id is not in the catalog, or not on the dashboard.
    #[error("unknown widget {0}")]
    UnknownWidget(WidgetId),
    /// The widget is already on the dashboard.
    #[error("widget {0} is already placed")]
    AlreadyPlaced(WidgetId),
    /// No layout entry at this index.
    #[error("no widget at index {0}")]
    IndexOutOfRange(usize),
}

impl Rejection {
    /// Short title shown to the user.
    pub fn summary(self) -> &'static str {
        match self {
            Self::NoSpaceAvailable => "No Space Available",
            Self::OutOfBounds | Self::PositionOccupied => "Invalid Position",
            Self::InsufficientSpaceToSwap | Self::SwapWouldOverlap => "Cannot Swap",
            Self::NoValidPositionAvailable => "Cannot Move",
            Self::UnknownWidget(_) => "Unknown Widget",
            Self::AlreadyPlaced(_) => "Already Placed",
            Self::IndexOutOfRange(_) => "Invalid Index",
        }
    }

    /// Longer explanation shown under the summary.
    pub fn detail(self) -> String {
        match self {
            Self::NoSpaceAvailable => "Could not find empty spot for widget".to_string(),
            Self::OutOfBounds => "Widget exceeds grid bounds".to_string(),
            Self::PositionOccupied => "Position is already occupied".to_string(),
            Self::InsufficientSpaceToSwap => "Not enough space to swap widgets".to_string(),
            Self::SwapWouldOverlap => "Swapping would cause overlaps".to_string(),
            Self::NoValidPositionAvailable => {
                "No valid position available for the widget".to_string()
            }
            Self::UnknownWidget(id) => format!("No widget with id {id}"),
            Self::AlreadyPlaced(id) => format!("Widget {id} is already on the dashboard"),
            Self::IndexOutOfRange(idx) => format!("No widget at index {idx}"),
        }
    }

    /// Build the warning notification for this rejection.
    pub fn notification(self) -> Notification {
        Notification::warn(self.summary(), self.detail())
    }
}

/// Which invariant a layout broke, reported by [`crate::Layout::check`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayoutFault {
    /// A footprint cell lies outside the grid.
    OutOfBounds {
        /// Offending widget.
        widget: WidgetId,
    },
    /// Two footprints share a cell.
    Overlap {
        /// Widget placed first.
        first: WidgetId,
        /// Widget whose footprint collided.
        second: WidgetId,
    },
}

impl Display for LayoutFault {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            Self::OutOfBounds { widget } => write!(f, "widget {widget} leaves the grid"),
            Self::Overlap { first, second } => {
                write!(f, "widget {second} overlaps widget {first}")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notify::Severity;

    #[test]
    fn rejection_notifications_use_dashboard_wording() {
        let n = Rejection::InsufficientSpaceToSwap.notification();
        assert_eq!(n.severity, Severity::Warn);
        assert_eq!(n.summary, "Cannot Swap");
        assert_eq!(n.detail, "Not enough space to swap widgets");

        let n = Rejection::OutOfBounds.notification();
        assert_eq!(n.summary, "Invalid Position");
        assert_eq!(n.detail, "Widget exceeds grid bounds");
    }

    #[test]
    fn parameterised_rejections_mention_the_subject() {
        assert!(Rejection::UnknownWidget(WidgetId(9)).detail().contains('9'));
        assert!(Rejection::IndexOutOfRange(3).detail().contains('3'));
    }

    #[test]
    fn fault_display() {
        let f = LayoutFault::Overlap {
            first: WidgetId(1),
            second: WidgetId(2),
        };
        assert_eq!(f.to_string(), "widget 2 overlaps widget 1");
    }
}
