//! Shared geometric primitives used across core, bobbin, and coil
//! placement math.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point2 {
    pub x: f64,
    pub y: f64,
}

impl Point2 {
    pub fn new(x: f64, y: f64) -> Self {
        Point2 { x, y }
    }

    pub fn distance_to(&self, other: Point2) -> f64 {
        ((self.x - other.x).powi(2) + (self.y - other.y).powi(2)).sqrt()
    }
}

/// Rectangular extent of a winding window as seen in a core's cross
/// section: height along the core column, width across the bobbin.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WindingWindow {
    pub height: f64,
    pub width: f64,
}

impl WindingWindow {
    pub fn area(&self) -> f64 {
        self.height * self.width
    }
}

/// Margins reserved on each edge of a winding window before any
/// section/layer/turn may be placed.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct Margins {
    pub top: f64,
    pub bottom: f64,
    pub left: f64,
    pub right: f64,
}

impl Margins {
    pub fn usable_height(&self, window: WindingWindow) -> f64 {
        (window.height - self.top - self.bottom).max(0.0)
    }

    pub fn usable_width(&self, window: WindingWindow) -> f64 {
        (window.width - self.left - self.right).max(0.0)
    }
}
