//! Absolute and fixed positioning.
//!
//! [CSS Positioned Layout Module Level 3](https://www.w3.org/TR/css-position-3/)

use crate::style::PositionType;

use super::LayoutContext;
use super::block::{BlockParams, layout_block_level};
use super::box_model::Rect;
use super::layout_box::{BoxId, LayoutTree};

/// [§ 10.3.7 Absolutely positioned, non-replaced elements](https://www.w3.org/TR/CSS2/visudet.html#abs-non-replaced-width)
///
/// Lay out a positioned box on its own at the origin, then move the whole
/// subtree into place.
///
/// `parent` is the finished rect of the box that contains it in the tree.
/// A `fixed` box is placed against the viewport instead. Without a width
/// the box takes the containing width (`container_width`, or the viewport's
/// for `fixed`).
///
/// [§ 3.5 Box insets](https://www.w3.org/TR/css-position-3/#insets)
/// `left` wins over `right` and `top` over `bottom`; with neither set the
/// box sits at the containing block's origin.
pub(super) fn layout_positioned(
    tree: &mut LayoutTree,
    id: BoxId,
    parent: Rect,
    container_width: f32,
    ctx: &LayoutContext<'_>,
) {
    let style = tree[id].style.clone();
    let fixed = style.position == PositionType::Fixed;

    let width = style.width.filter(|w| *w > 0.0).unwrap_or(if fixed {
        ctx.viewport.width
    } else {
        container_width
    });
    layout_block_level(tree, id, BlockParams::at(width, 0.0, 0.0), ctx);

    let containing = if fixed {
        Rect::new(0.0, 0.0, ctx.viewport.width, ctx.viewport.height)
    } else {
        parent
    };
    let size = tree[id].rect;

    let x = match (style.left, style.right) {
        (Some(left), _) => containing.x + left,
        (None, Some(right)) => containing.right() - right - size.width,
        (None, None) => containing.x,
    };
    let y = match (style.top, style.bottom) {
        (Some(top), _) => containing.y + top,
        (None, Some(bottom)) => containing.bottom() - bottom - size.height,
        (None, None) => containing.y,
    };
    tree.translate_subtree(id, x, y);
    tracing::trace!(box_id = id.0, fixed, x, y, "positioned");
}
