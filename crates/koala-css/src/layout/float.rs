//! Float placement.
//!
//! [§ 9.5 Floats](https://www.w3.org/TR/CSS2/visuren.html#floats)
//!
//! Floats are placed side by side from the left and right edges of the
//! content area, all at the top of the parent's padding box. They do not
//! narrow the parent's line boxes, so text does not flow around them.

use crate::style::FloatSide;

use super::LayoutContext;
use super::block::{BlockParams, layout_block_level};
use super::layout_box::{BoxId, LayoutTree};

/// Width of a float that sets none.
const DEFAULT_FLOAT_WIDTH: f32 = 100.0;

/// Independent left and right cursors along one row.
struct FloatCursor {
    left_x: f32,
    right_x: f32,
    top: f32,
}

impl FloatCursor {
    /// [§ 9.5.1 Positioning the float](https://www.w3.org/TR/CSS2/visuren.html#float-position)
    /// "The left outer edge of a left-floating box may not be to the left
    /// of the left edge of its containing block."
    ///
    /// Returns where a float of `width` goes and advances that side.
    fn place(&mut self, side: FloatSide, width: f32) -> (f32, f32) {
        if side == FloatSide::Right {
            self.right_x -= width;
            (self.right_x, self.top)
        } else {
            let x = self.left_x;
            self.left_x += width;
            (x, self.top)
        }
    }
}

/// Lay out each float at the origin, then move it against the cursor of its
/// side. `left` and `width` describe the parent's content area and `top`
/// its padding-box top.
pub(super) fn layout_floats(
    tree: &mut LayoutTree,
    floats: &[BoxId],
    left: f32,
    width: f32,
    top: f32,
    ctx: &LayoutContext<'_>,
) {
    let mut cursor = FloatCursor {
        left_x: left,
        right_x: left + width,
        top,
    };
    for &id in floats {
        let style = &tree[id].style;
        let side = style.float;
        let float_width = style.width.filter(|w| *w > 0.0).unwrap_or(DEFAULT_FLOAT_WIDTH);

        layout_block_level(tree, id, BlockParams::at(float_width, 0.0, 0.0), ctx);
        let (x, y) = cursor.place(side, tree[id].rect.width);
        tree.translate_subtree(id, x, y);
        tracing::trace!(box_id = id.0, side = %side, x, y, "float");
    }
}
