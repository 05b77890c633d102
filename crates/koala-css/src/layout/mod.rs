//! CSS Layout Engine
//!
//! This module implements the parts of the CSS Visual Formatting Model the
//! renderer needs: normal block and inline flow, floats, absolute and fixed
//! positioning, and the HTML table model.
//!
//! # Relevant Specifications
//!
//! - [CSS Box Model Module Level 3](https://www.w3.org/TR/css-box-3/)
//! - [CSS 2.1 Visual Formatting Model](https://www.w3.org/TR/CSS2/visuren.html)
//! - [CSS 2.1 Tables](https://www.w3.org/TR/CSS2/tables.html)
//! - [CSS Text Module Level 3](https://www.w3.org/TR/css-text-3/)
//!
//! # Module Structure
//!
//! - [`box_model`] - Rectangles and edge sizes
//! - [`layout_box`] - The box arena and box-tree construction
//! - [`text`] - Text measurement and line breaking
//! - `block` - Block containers and their line boxes
//! - `float` - Left and right float cursors
//! - `positioned` - Absolute and fixed positioning
//! - `table` - Table grid, column widths and row heights

mod block;
pub mod box_model;
mod float;
pub mod layout_box;
mod positioned;
mod table;
pub mod text;

pub use box_model::{EdgeSizes, Rect};
pub use layout_box::{BoxId, BoxType, LayoutBox, LayoutTree, default_display_for_element};
pub use text::{ApproximateMeasurer, TextMeasurer, TextStyle, count_word_gaps, expand_tabs, wrap_text};

use std::fmt;

use crate::style::Viewport;

/// Everything layout needs besides the box tree.
#[derive(Clone, Copy)]
pub struct LayoutContext<'a> {
    /// Viewport size. `fixed` boxes are placed against it.
    pub viewport: Viewport,
    /// Text measurement strategy.
    pub measurer: &'a dyn TextMeasurer,
}

impl<'a> LayoutContext<'a> {
    /// Create a layout context.
    #[must_use]
    pub const fn new(viewport: Viewport, measurer: &'a dyn TextMeasurer) -> Self {
        Self { viewport, measurer }
    }
}

impl Default for LayoutContext<'_> {
    fn default() -> Self {
        Self::new(Viewport::default(), &ApproximateMeasurer)
    }
}

impl fmt::Debug for LayoutContext<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LayoutContext")
            .field("viewport", &self.viewport)
            .finish_non_exhaustive()
    }
}

/// [§ 9 Visual formatting model](https://www.w3.org/TR/CSS2/visuren.html)
///
/// Lay out the whole tree inside a container `container_width` px wide,
/// with the root at the origin. Every box's `rect` is overwritten.
pub fn compute_layout(tree: &mut LayoutTree, container_width: f32, ctx: &LayoutContext<'_>) {
    let root = tree.root();
    block::layout_block(tree, root, block::BlockParams::at(container_width, 0.0, 0.0), ctx);
    tracing::debug!(
        boxes = tree.len(),
        height = tree[root].rect.height,
        "layout complete"
    );
}

/// [§ 10.8 Line height calculations](https://www.w3.org/TR/CSS2/visudet.html#line-height)
///
/// Line height used when `line-height` is not set, keyed by the tag of the
/// element that establishes the line.
#[must_use]
pub fn default_line_height(tag_name: &str) -> f32 {
    match tag_name {
        "h1" => 40.0,
        "h2" => 32.0,
        "h3" => 26.0,
        "h5" => 22.0,
        "h6" => 20.0,
        "small" => 18.0,
        _ => 24.0,
    }
}
