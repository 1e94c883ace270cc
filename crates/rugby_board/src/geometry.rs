//! Field and screen coordinate math
//!
//! ## Coordinate Systems
//!
//! **Field-pixel coordinates** (tokens, arrows, formations, saves):
//! - origin = top-left corner of the drawing surface
//! - x grows right, y grows down
//!
//! **Screen coordinates** (pointer events, token element placement):
//! - relative to the viewport; the canvas sits somewhere inside it
//!
//! Every value crossing the canvas boundary goes through `to_field_coords`
//! or `to_screen_rect`. Nothing here holds state.

use serde::{Deserialize, Serialize};

/// Half the visual size of a token; tokens are centred on their position.
pub const TOKEN_HALF_EXTENT: f64 = 20.0;

/// A point in either coordinate system (context decides which).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    #[inline]
    pub fn offset(self, dx: f64, dy: f64) -> Self {
        Self { x: self.x + dx, y: self.y + dy }
    }
}

/// Canvas pixel extents.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FieldDimensions {
    pub width: f64,
    pub height: f64,
}

impl FieldDimensions {
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Anchor used by formation presets.
    #[inline]
    pub fn center(&self) -> Point {
        Point::new(self.width / 2.0, self.height / 2.0)
    }
}

/// Axis-aligned rectangle in screen space (canvas bounding box, token box).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ScreenRect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl ScreenRect {
    pub const fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self { left, top, width, height }
    }

    #[inline]
    pub fn top_left(&self) -> Point {
        Point::new(self.left, self.top)
    }

    #[inline]
    pub fn center(&self) -> Point {
        Point::new(self.left + self.width / 2.0, self.top + self.height / 2.0)
    }
}

/// Convert a screen point to field-pixel coordinates.
///
/// Page scroll, if any, must already be folded into `canvas_rect`.
#[inline]
pub fn to_field_coords(screen: Point, canvas_rect: &ScreenRect) -> Point {
    Point::new(screen.x - canvas_rect.left, screen.y - canvas_rect.top)
}

/// Screen-space box for a token centred on `field`.
#[inline]
pub fn to_screen_rect(field: Point, canvas_rect: &ScreenRect, half_extent: f64) -> ScreenRect {
    ScreenRect::new(
        canvas_rect.left + field.x - half_extent,
        canvas_rect.top + field.y - half_extent,
        half_extent * 2.0,
        half_extent * 2.0,
    )
}

/// Field position of a rendered token, read back from its screen box.
#[inline]
pub fn token_center(token_rect: &ScreenRect, canvas_rect: &ScreenRect) -> Point {
    to_field_coords(token_rect.center(), canvas_rect)
}
