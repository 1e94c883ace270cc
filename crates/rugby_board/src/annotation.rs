//! Movement arrows drawn over the field
//!
//! Arrows are only ever added one at a time or cleared wholesale; there is
//! no single-arrow removal.

use serde::{Deserialize, Serialize};

use crate::geometry::Point;

/// A directional annotation in field-pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Arrow {
    pub from: Point,
    pub to: Point,
}

impl Arrow {
    pub const fn new(from: Point, to: Point) -> Self {
        Self { from, to }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct AnnotationStore {
    arrows: Vec<Arrow>,
}

impl AnnotationStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_arrow(&mut self, from: Point, to: Point) {
        self.arrows.push(Arrow::new(from, to));
    }

    pub fn clear(&mut self) {
        self.arrows.clear();
    }

    /// Insertion order, so redraws are deterministic.
    pub fn all(&self) -> &[Arrow] {
        &self.arrows
    }

    /// Swap in a restored arrow list.
    pub fn replace(&mut self, arrows: Vec<Arrow>) {
        self.arrows = arrows;
    }

    pub fn len(&self) -> usize {
        self.arrows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.arrows.is_empty()
    }
}
