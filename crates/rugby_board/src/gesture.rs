//! Two-click arrow gesture
//!
//! `Idle` ignores clicks. `begin` arms the gesture; the first click records
//! the start, the second completes the arrow and returns to `Idle`.

use crate::annotation::Arrow;
use crate::geometry::Point;

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum ArrowGesture {
    #[default]
    Idle,
    AwaitingStart,
    AwaitingEnd(Point),
}

/// What a click did to the gesture.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ClickOutcome {
    Ignored,
    StartRecorded(Point),
    Completed(Arrow),
}

impl ArrowGesture {
    /// Arm (or re-arm) the gesture, dropping any pending start.
    pub fn begin(&mut self) {
        *self = Self::AwaitingStart;
    }

    pub fn cancel(&mut self) {
        *self = Self::Idle;
    }

    pub fn is_active(&self) -> bool {
        !matches!(self, Self::Idle)
    }

    /// Feed a click in field coordinates.
    pub fn click(&mut self, point: Point) -> ClickOutcome {
        match *self {
            Self::Idle => ClickOutcome::Ignored,
            Self::AwaitingStart => {
                *self = Self::AwaitingEnd(point);
                ClickOutcome::StartRecorded(point)
            }
            Self::AwaitingEnd(start) => {
                *self = Self::Idle;
                ClickOutcome::Completed(Arrow::new(start, point))
            }
        }
    }
}
