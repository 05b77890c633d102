//! CSS Box Model types.
//!
//! [CSS Box Model Module Level 3](https://www.w3.org/TR/css-box-3/)
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │              margin-top                 │
//! │   ┌─────────────────────────────────┐   │
//! │   │          border-top             │   │
//! │   │   ┌─────────────────────────┐   │   │
//! │   │   │      padding-top        │   │   │
//! │   │   │   ┌─────────────────┐   │   │   │
//! │ m │ b │ p │     CONTENT     │ p │ b │ m │
//! │   │   │   └─────────────────┘   │   │   │
//! │   │   │      padding-bottom     │   │   │
//! │   │   └─────────────────────────┘   │   │
//! │   │          border-bottom          │   │
//! │   └─────────────────────────────────┘   │
//! │              margin-bottom              │
//! └─────────────────────────────────────────┘
//! ```
//!
//! A block's [`Rect`] starts at its margin edge: `y` is where the block was
//! placed in its parent's flow, and `height` runs through its bottom margin.
//! Its content starts inside margin, padding and border.

use serde::Serialize;

/// A rectangle positioned in 2D space.
///
/// [§ 3 The CSS Box Model](https://www.w3.org/TR/css-box-3/#box-model)
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct Rect {
    /// Horizontal position of the top-left corner.
    pub x: f32,
    /// Vertical position of the top-left corner.
    pub y: f32,
    /// Width of the rectangle.
    pub width: f32,
    /// Height of the rectangle.
    pub height: f32,
}

impl Rect {
    /// Create a rectangle.
    #[must_use]
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// `x + width`
    #[must_use]
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    /// `y + height`
    #[must_use]
    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    /// Move the rectangle by `(dx, dy)`.
    pub fn translate(&mut self, dx: f32, dy: f32) {
        self.x += dx;
        self.y += dy;
    }
}

/// Edge sizes for padding, border, or margin.
///
/// [§ 3 The CSS Box Model](https://www.w3.org/TR/css-box-3/#box-model)
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct EdgeSizes {
    /// Top edge size.
    pub top: f32,
    /// Right edge size.
    pub right: f32,
    /// Bottom edge size.
    pub bottom: f32,
    /// Left edge size.
    pub left: f32,
}

impl EdgeSizes {
    /// The same size on all four edges.
    #[must_use]
    pub const fn uniform(size: f32) -> Self {
        Self {
            top: size,
            right: size,
            bottom: size,
            left: size,
        }
    }

    /// `left + right`
    #[must_use]
    pub fn horizontal(&self) -> f32 {
        self.left + self.right
    }

    /// `top + bottom`
    #[must_use]
    pub fn vertical(&self) -> f32 {
        self.top + self.bottom
    }
}
