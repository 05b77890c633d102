//! Block containers and the line boxes inside them.
//!
//! [§ 9.4.1 Block formatting contexts](https://www.w3.org/TR/CSS2/visuren.html#block-formatting)
//! [§ 9.4.2 Inline formatting contexts](https://www.w3.org/TR/CSS2/visuren.html#inline-formatting)
//!
//! A block walks its in-flow children once, keeping a line cursor. Inline
//! level boxes accumulate on the current line; anything block level ends
//! the line first. Floats and positioned children are taken out of the walk
//! and placed after the block's own height is known.

use crate::style::{FloatSide, TextAlign, apply_text_transform, values::parse_html_size};

use super::box_model::{EdgeSizes, Rect};
use super::layout_box::{BoxId, BoxType, LayoutTree};
use super::text::{TextStyle, expand_tabs, wrap_text};
use super::{LayoutContext, default_line_height, float, positioned, table};

/// `<body>` margin on all four sides.
const BODY_MARGIN: f32 = 8.0;
/// Default `<img>` size when the attributes give none.
const DEFAULT_IMAGE_SIZE: (f32, f32) = (200.0, 150.0);
/// Tab stops inside `<pre>`.
const TAB_SIZE: usize = 8;

/// Where a block is placed and how wide its container is.
#[derive(Debug, Clone, Copy)]
pub(super) struct BlockParams {
    pub container_width: f32,
    pub start_x: f32,
    pub start_y: f32,
}

impl BlockParams {
    pub(super) const fn at(container_width: f32, start_x: f32, start_y: f32) -> Self {
        Self {
            container_width,
            start_x,
            start_y,
        }
    }
}

/// The current line while walking a block's children.
struct LineCursor {
    left: f32,
    width: f32,
    align: TextAlign,
    x: f32,
    top: f32,
    height: f32,
    boxes: Vec<BoxId>,
}

impl LineCursor {
    fn new(left: f32, width: f32, align: TextAlign, top: f32) -> Self {
        Self {
            left,
            width,
            align,
            x: left,
            top,
            height: 0.0,
            boxes: Vec::new(),
        }
    }

    /// Align the pending boxes and return the y below the line, or `y` when
    /// nothing on the line had height.
    fn finish(&mut self, tree: &mut LayoutTree, y: f32) -> f32 {
        apply_line_alignment(tree, &self.boxes, self.width, self.align);
        self.boxes.clear();
        if self.height > 0.0 {
            self.top + self.height
        } else {
            y
        }
    }

    /// Start a fresh line at `top`.
    fn reset(&mut self, top: f32) {
        self.x = self.left;
        self.top = top;
        self.height = 0.0;
    }
}

/// Lay out a block-level box of any kind: tables go to the table
/// algorithm, everything else to [`layout_block`].
pub(super) fn layout_block_level(
    tree: &mut LayoutTree,
    id: BoxId,
    params: BlockParams,
    ctx: &LayoutContext<'_>,
) {
    if tree[id].box_type == BoxType::Table {
        table::layout_table(tree, id, params, ctx);
    } else {
        layout_block(tree, id, params, ctx);
    }
}

/// [§ 10.3.3 Block-level, non-replaced elements in normal flow](https://www.w3.org/TR/CSS2/visudet.html#blockwidth)
///
/// Lay out a block container and everything inside it. The box's `rect`
/// starts at `(start_x, start_y)` and its height runs through the bottom
/// margin.
pub(super) fn layout_block(
    tree: &mut LayoutTree,
    id: BoxId,
    params: BlockParams,
    ctx: &LayoutContext<'_>,
) {
    let BlockParams {
        container_width,
        start_x,
        start_y,
    } = params;

    // STEP 1: Take floats and positioned boxes out of the flow.
    let mut in_flow = Vec::new();
    let mut floated = Vec::new();
    let mut out_of_flow = Vec::new();
    for &child in tree.children(id) {
        let child_box = &tree[child];
        if child_box.box_type == BoxType::Text {
            in_flow.push(child);
        } else if child_box.is_out_of_flow() {
            out_of_flow.push(child);
        } else if child_box.style.float != FloatSide::None {
            floated.push(child);
        } else {
            in_flow.push(child);
        }
    }

    // STEP 2: Own width and the content area.
    let style = tree[id].style.clone();
    let box_type = tree[id].box_type;
    let tag = tree[id].tag().to_string();

    let mut rect = Rect::new(start_x, start_y, container_width, 0.0);
    if let Some(width) = style.width.filter(|w| *w > 0.0) {
        rect.width = width;
    } else if let Some(pct) = style.width_percent.filter(|p| *p > 0.0) {
        rect.width = container_width * pct / 100.0;
    }
    rect.width = clamp_min_max(rect.width, style.min_width, style.max_width);

    let mut inner_x = start_x;
    let mut inner_width = rect.width;
    let mut margin = EdgeSizes::default();
    let mut padding = EdgeSizes::default();

    // [§ 15.3.3 Flow content](https://html.spec.whatwg.org/multipage/rendering.html#flow-content-3)
    //
    // Tag indentation and vertical margins this renderer applies on top of
    // the computed style.
    let indent = match tag.as_str() {
        "body" => {
            margin = EdgeSizes::uniform(BODY_MARGIN);
            inner_width -= BODY_MARGIN;
            BODY_MARGIN
        }
        "ul" | "ol" | "menu" => 20.0,
        "blockquote" => 30.0,
        "dd" | "figure" => 40.0,
        _ => 0.0,
    };
    inner_x += indent;
    inner_width -= indent;

    let tag_margin = match tag.as_str() {
        "p" => 12.0,
        "h1" => 6.0,
        "h2" => 5.0,
        "h3" | "h4" | "h5" | "h6" | "ul" | "ol" | "menu" => 4.0,
        "figure" => 16.0,
        _ => 0.0,
    };
    if tag_margin > 0.0 {
        margin.top = tag_margin;
        margin.bottom = tag_margin;
    }
    if style.margin.top > 0.0 {
        margin.top = style.margin.top;
    }
    if style.margin.bottom > 0.0 {
        margin.bottom = style.margin.bottom;
    }

    // [§ 10.3.3](https://www.w3.org/TR/CSS2/visudet.html#blockwidth)
    // "If both 'margin-left' and 'margin-right' are 'auto', their used
    // values are equal. This horizontally centers the element with respect
    // to the edges of the containing block."
    let explicit_width = style.width.is_some_and(|w| w > 0.0);
    if style.margin_left_auto && style.margin_right_auto && explicit_width {
        let leftover = container_width - rect.width;
        if leftover > 0.0 {
            rect.x = start_x + leftover / 2.0;
            inner_x = rect.x;
            margin.left = leftover / 2.0;
            margin.right = leftover / 2.0;
        }
    } else {
        if style.margin.left > 0.0 {
            margin.left = style.margin.left;
            inner_x += style.margin.left;
            inner_width -= style.margin.left;
        }
        if style.margin.right > 0.0 {
            margin.right = style.margin.right;
            inner_width -= style.margin.right;
        }
    }

    // [§ 15.5.11 The fieldset and legend elements](https://html.spec.whatwg.org/multipage/rendering.html#the-fieldset-and-legend-elements)
    if box_type == BoxType::Fieldset {
        padding = EdgeSizes::uniform(10.0);
        let fieldset_style = &mut tree[id].style;
        for side in [
            &mut fieldset_style.border_top,
            &mut fieldset_style.border_right,
            &mut fieldset_style.border_bottom,
            &mut fieldset_style.border_left,
        ] {
            if side.width <= 0.0 {
                side.width = 1.0;
            }
        }
    }
    let border = tree[id].style.border_widths();
    for (used, specified) in [
        (&mut padding.top, style.padding.top),
        (&mut padding.right, style.padding.right),
        (&mut padding.bottom, style.padding.bottom),
        (&mut padding.left, style.padding.left),
    ] {
        if specified > 0.0 {
            *used = specified;
        }
    }
    inner_x += padding.left + border.left;
    inner_width -= padding.horizontal() + border.horizontal();
    let inner_width = inner_width.max(0.0);

    let mut y = start_y + margin.top + padding.top + border.top;

    // STEP 3: The legend sits on the fieldset's top border.
    let legend = if box_type == BoxType::Fieldset {
        in_flow
            .iter()
            .copied()
            .find(|&c| tree[c].box_type == BoxType::Legend)
    } else {
        None
    };
    if let Some(legend) = legend {
        layout_legend(tree, legend, inner_x + 12.0, start_y + margin.top - 10.0, ctx);
    }

    // STEP 4: Walk the flow.
    let mut line = LineCursor::new(inner_x, inner_width, style.text_align, y);
    for &child in &in_flow {
        if Some(child) == legend {
            continue;
        }
        let child_type = tree[child].box_type;
        let size = match child_type {
            BoxType::Text => Some(layout_flow_text(tree, child, inner_width, ctx)),
            BoxType::Inline => Some(inline_size(tree, child, ctx)),
            BoxType::Image => {
                let (w, h) = replaced_size(tree, child, ctx);
                Some((w + 4.0, h))
            }
            t if t.is_inline_level() => Some(replaced_size(tree, child, ctx)),
            _ => None,
        };

        let Some((width, height)) = size else {
            // Block-level: the current line ends here.
            y = line.finish(tree, y);
            match child_type {
                BoxType::Rule => {
                    tree[child].rect = Rect::new(inner_x, y + 8.0, inner_width, 2.0);
                    y += 18.0;
                }
                BoxType::LineBreak => {
                    if line.height <= 0.0 {
                        y += line_height_of(tree, id);
                    }
                    tree[child].rect = Rect::new(line.x, y, 0.0, 0.0);
                }
                _ => {
                    layout_block_level(tree, child, BlockParams::at(inner_width, inner_x, y), ctx);
                    y += tree[child].rect.height;
                }
            }
            line.reset(y);
            continue;
        };

        // [§ 9.4.2](https://www.w3.org/TR/CSS2/visuren.html#inline-formatting)
        // "When an inline box exceeds the width of a line box, it is split
        // into several boxes." Here a box that does not fit moves to the next
        // line, unless it is the first box on its line.
        if line.x + width > inner_x + inner_width && line.x > inner_x {
            y = line.finish(tree, y);
            line.reset(y);
        }

        tree[child].rect = Rect::new(line.x, line.top, width, height);
        if child_type == BoxType::Inline {
            layout_inline_children(tree, child, ctx);
        }
        line.boxes.push(child);
        line.x += width;
        line.height = line.height.max(height);
    }
    y = line.finish(tree, y);

    // STEP 5: Own height.
    let height = style
        .height
        .filter(|h| *h > 0.0)
        .unwrap_or(y - start_y + margin.bottom + padding.bottom + border.bottom);
    rect.height = clamp_min_max(height, style.min_height, style.max_height);

    {
        let block = &mut tree[id];
        block.rect = rect;
        block.margin = margin;
        block.padding = padding;
    }
    tracing::trace!(box_id = id.0, tag = %tag, x = rect.x, y = rect.y, width = rect.width, height = rect.height, "block");

    // STEP 6: Out-of-flow children, against the finished box.
    for &child in &out_of_flow {
        positioned::layout_positioned(tree, child, rect, container_width, ctx);
    }
    float::layout_floats(
        tree,
        &floated,
        inner_x,
        inner_width,
        start_y + padding.top + border.top,
        ctx,
    );
}

/// Clamp a used size by optional `min-*` and `max-*` values. Non-positive
/// limits are ignored.
fn clamp_min_max(value: f32, min: Option<f32>, max: Option<f32>) -> f32 {
    let mut value = value;
    if let Some(min) = min.filter(|m| *m > 0.0)
        && value < min
    {
        value = min;
    }
    if let Some(max) = max.filter(|m| *m > 0.0)
        && value > max
    {
        value = max;
    }
    value
}

/// [§ 16.2 Alignment](https://www.w3.org/TR/CSS2/text.html#alignment-prop)
///
/// Shift a finished line as a unit. `justify` is treated as `left`.
pub(super) fn apply_line_alignment(
    tree: &mut LayoutTree,
    boxes: &[BoxId],
    line_width: f32,
    align: TextAlign,
) {
    if boxes.is_empty() {
        return;
    }
    let used: f32 = boxes.iter().map(|&b| tree[b].rect.width).sum();
    let offset = match align {
        TextAlign::Center => (line_width - used) / 2.0,
        TextAlign::Right => line_width - used,
        TextAlign::Left | TextAlign::Justify => return,
    };
    for &b in boxes {
        tree.translate_subtree(b, offset, 0.0);
    }
}

/// The text a box displays after `text-transform` and `font-variant`.
pub(super) fn display_text(tree: &LayoutTree, id: BoxId) -> String {
    let text_box = &tree[id];
    let raw = text_box.text.as_deref().unwrap_or_default();
    apply_text_transform(raw, text_box.style.text_transform, text_box.style.font_variant)
}

/// The tag that decides a box's default line height: the nearest
/// enclosing non-inline element, or `small` if one intervenes.
fn line_height_tag(tree: &LayoutTree, id: BoxId) -> &str {
    for current in std::iter::once(id).chain(tree.ancestors(id)) {
        let b = &tree[current];
        match b.box_type {
            BoxType::Text => {}
            BoxType::Inline if b.tag() != "small" => {}
            _ => return b.tag(),
        }
    }
    ""
}

/// `line-height` if set, otherwise the default for the enclosing element.
pub(super) fn line_height_of(tree: &LayoutTree, id: BoxId) -> f32 {
    tree[id]
        .style
        .line_height
        .filter(|lh| *lh > 0.0)
        .unwrap_or_else(|| default_line_height(line_height_tag(tree, id)))
}

/// Tag of the nearest enclosing box that is not inline.
fn container_tag(tree: &LayoutTree, id: BoxId) -> &str {
    tree.ancestors(id)
        .find(|&a| tree[a].box_type != BoxType::Inline)
        .map_or("", |a| tree[a].tag())
}

/// Width and height of preformatted text: widest line by line count, with
/// lines 1.5 × the font size apart.
#[allow(clippy::cast_precision_loss)]
fn preformatted_size(lines: &[String], text_style: &TextStyle, ctx: &LayoutContext<'_>) -> (f32, f32) {
    let width = text_style.widest(ctx.measurer, lines);
    (width, lines.len() as f32 * text_style.font_size * 1.5)
}

/// Size a text run in a block's flow, storing its lines.
#[allow(clippy::cast_precision_loss)]
fn layout_flow_text(
    tree: &mut LayoutTree,
    id: BoxId,
    available: f32,
    ctx: &LayoutContext<'_>,
) -> (f32, f32) {
    let text = display_text(tree, id);
    let text_style = TextStyle::of(&tree[id].style);

    // [§ 16.6 White space: the 'white-space' property](https://www.w3.org/TR/CSS2/text.html#white-prop)
    // "pre: This value prevents user agents from collapsing sequences of
    // white space. Lines are only broken at preserved newline characters."
    if tree.has_ancestor_tag(id, "pre") {
        let lines: Vec<String> = expand_tabs(&text, TAB_SIZE)
            .split('\n')
            .map(str::to_string)
            .collect();
        let size = preformatted_size(&lines, &text_style, ctx);
        tree[id].wrapped_lines = lines;
        return size;
    }

    let lines = wrap_text(&text, available, &text_style, ctx.measurer);
    let line_height = line_height_of(tree, id);
    let width = text_style.widest(ctx.measurer, &lines);
    let height = lines.len().max(1) as f32 * line_height;
    tree[id].wrapped_lines = lines;
    (width, height)
}

/// Size a text run inside an inline box: one unwrapped line, or the
/// preformatted lines when inside `<pre>`.
fn inline_text_size(tree: &mut LayoutTree, id: BoxId, ctx: &LayoutContext<'_>) -> (f32, f32) {
    let text = display_text(tree, id);
    let text_style = TextStyle::of(&tree[id].style);
    if text.contains('\n') && tree.has_ancestor_tag(id, "pre") {
        let lines: Vec<String> = expand_tabs(&text, TAB_SIZE)
            .split('\n')
            .map(str::to_string)
            .collect();
        let size = preformatted_size(&lines, &text_style, ctx);
        tree[id].wrapped_lines = lines;
        return size;
    }
    let width = text_style.measure(ctx.measurer, &text);
    let height = line_height_of(tree, id);
    tree[id].wrapped_lines = vec![text];
    (width, height)
}

/// [§ 10.3.1 Inline, non-replaced elements](https://www.w3.org/TR/CSS2/visudet.html#inline-width)
///
/// An inline box is as wide as its children laid end to end and as tall as
/// the tallest of them.
pub(super) fn inline_size(tree: &mut LayoutTree, id: BoxId, ctx: &LayoutContext<'_>) -> (f32, f32) {
    let mut width = 0.0_f32;
    let mut height = 0.0_f32;
    for child in tree.children(id).to_vec() {
        let (w, h) = match tree[child].box_type {
            BoxType::Text => inline_text_size(tree, child, ctx),
            BoxType::Inline => inline_size(tree, child, ctx),
            BoxType::Image | BoxType::Checkbox | BoxType::Radio => replaced_size(tree, child, ctx),
            _ => (0.0, 0.0),
        };
        width += w;
        height = height.max(h);
    }
    (width, height)
}

/// Place an inline box's children left to right inside it.
///
/// Text and nested inlines are centered on the enclosing block's default
/// line height; replaced boxes sit at the top.
pub(super) fn layout_inline_children(tree: &mut LayoutTree, id: BoxId, ctx: &LayoutContext<'_>) {
    let origin = tree[id].rect;
    let baseline_offset =
        (default_line_height(container_tag(tree, id)) - line_height_of(tree, id)) / 2.0;

    let mut offset_x = 0.0;
    for child in tree.children(id).to_vec() {
        match tree[child].box_type {
            BoxType::Text => {
                let (w, h) = inline_text_size(tree, child, ctx);
                tree[child].rect = Rect::new(origin.x + offset_x, origin.y + baseline_offset, w, h);
                offset_x += w;
            }
            BoxType::Inline => {
                let (w, h) = inline_size(tree, child, ctx);
                tree[child].rect = Rect::new(origin.x + offset_x, origin.y + baseline_offset, w, h);
                layout_inline_children(tree, child, ctx);
                offset_x += w;
            }
            BoxType::Image | BoxType::Checkbox | BoxType::Radio => {
                let (w, h) = replaced_size(tree, child, ctx);
                tree[child].rect = Rect::new(origin.x + offset_x, origin.y, w, h);
                offset_x += w;
            }
            _ => {}
        }
    }
}

/// [§ 10.3.2 Inline, replaced elements](https://www.w3.org/TR/CSS2/visudet.html#inline-replaced-width)
///
/// Fixed sizes for images and form controls.
pub(super) fn replaced_size(tree: &LayoutTree, id: BoxId, ctx: &LayoutContext<'_>) -> (f32, f32) {
    let b = &tree[id];
    match b.box_type {
        BoxType::Image => image_size(tree, id),
        BoxType::Radio | BoxType::Checkbox => (20.0, 20.0),
        BoxType::Button => {
            let label = button_label(tree, id);
            let text_style = TextStyle::of(&b.style);
            (text_style.measure(ctx.measurer, &label) + 24.0, 32.0)
        }
        BoxType::Textarea => (300.0, 80.0),
        BoxType::Input | BoxType::Select => (200.0, 28.0),
        BoxType::FileInput => (250.0, 32.0),
        _ => (0.0, 0.0),
    }
}

/// `<img>` size from its `width`/`height` attributes, 200×150 by default.
pub(super) fn image_size(tree: &LayoutTree, id: BoxId) -> (f32, f32) {
    let b = &tree[id];
    let dimension = |name: &str, default: f32| {
        b.attr(name)
            .and_then(|v| parse_html_size(v, 0.0))
            .unwrap_or(default)
    };
    (
        dimension("width", DEFAULT_IMAGE_SIZE.0),
        dimension("height", DEFAULT_IMAGE_SIZE.1),
    )
}

/// A button's label: its first text child, else its `value`, else "Button".
fn button_label(tree: &LayoutTree, id: BoxId) -> String {
    tree.children(id)
        .iter()
        .find_map(|&c| tree[c].text.clone())
        .or_else(|| tree[id].attr("value").map(str::to_string))
        .unwrap_or_else(|| "Button".to_string())
}

/// Place a legend at `(x, y)`: 20px tall, 8px of room each side of its text.
fn layout_legend(tree: &mut LayoutTree, legend: BoxId, x: f32, y: f32, ctx: &LayoutContext<'_>) {
    let text_child = tree
        .children(legend)
        .iter()
        .copied()
        .find(|&c| tree[c].box_type == BoxType::Text);
    let text_width = text_child.map_or(0.0, |t| {
        TextStyle::of(&tree[t].style).measure(ctx.measurer, &display_text(tree, t))
    });
    tree[legend].rect = Rect::new(x, y, text_width + 16.0, 20.0);
    if let Some(t) = text_child {
        let text = display_text(tree, t);
        let text_box = &mut tree[t];
        text_box.rect = Rect::new(x + 4.0, y, text_width, 20.0);
        text_box.wrapped_lines = vec![text];
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::layout_box::LayoutBox;
    use crate::style::Style;
    use koala_dom::ElementData;

    fn block(tag: &str, style: Style) -> LayoutBox {
        LayoutBox::for_element(BoxType::Block, ElementData::new(tag), style)
    }

    #[test]
    fn test_clamp_min_max() {
        assert!((clamp_min_max(50.0, Some(100.0), None) - 100.0).abs() < 0.01);
        assert!((clamp_min_max(500.0, None, Some(300.0)) - 300.0).abs() < 0.01);
        assert!((clamp_min_max(50.0, Some(0.0), Some(-1.0)) - 50.0).abs() < 0.01);
    }

    #[test]
    fn test_center_alignment_shifts_line() {
        let mut tree = LayoutTree::new(block("div", Style::default()));
        let root = tree.root();
        let a = tree.append(root, LayoutBox::text("a", Style::default()));
        tree[a].rect = Rect::new(0.0, 0.0, 40.0, 10.0);
        apply_line_alignment(&mut tree, &[a], 100.0, TextAlign::Center);
        assert!((tree[a].rect.x - 30.0).abs() < 0.01);
        apply_line_alignment(&mut tree, &[a], 100.0, TextAlign::Left);
        assert!((tree[a].rect.x - 30.0).abs() < 0.01);
    }

    #[test]
    fn test_line_height_tag_prefers_small() {
        let mut tree = LayoutTree::new(block("h1", Style::default()));
        let root = tree.root();
        let small = tree.append(
            root,
            LayoutBox::for_element(BoxType::Inline, ElementData::new("small"), Style::default()),
        );
        let text = tree.append(small, LayoutBox::text("x", Style::default()));
        let direct = tree.append(root, LayoutBox::text("y", Style::default()));
        assert!((line_height_of(&tree, text) - 18.0).abs() < 0.01);
        assert!((line_height_of(&tree, direct) - 40.0).abs() < 0.01);
    }

    #[test]
    fn test_button_label_fallbacks() {
        let mut tree = LayoutTree::new(block("form", Style::default()));
        let root = tree.root();
        let plain = tree.append(
            root,
            LayoutBox::for_element(BoxType::Button, ElementData::new("button"), Style::default()),
        );
        let valued = tree.append(
            root,
            LayoutBox::for_element(
                BoxType::Button,
                ElementData::new("input").with_attr("value", "Go"),
                Style::default(),
            ),
        );
        assert_eq!(button_label(&tree, plain), "Button");
        assert_eq!(button_label(&tree, valued), "Go");
        let ctx = LayoutContext::default();
        let (w, h) = replaced_size(&tree, valued, &ctx);
        assert!((w - 40.0).abs() < 0.01);
        assert!((h - 32.0).abs() < 0.01);
    }
}
