//! Table layout.
//!
//! [§ 17 Tables](https://www.w3.org/TR/CSS2/tables.html)
//!
//! Cells are first placed on a grid, honoring `colspan` and `rowspan`.
//! Column widths come from `<col>` elements, explicit cell widths, and
//! either the table's own width or the cells' natural text widths. Rows are
//! then laid out top to bottom. A rowspan cell whose content is taller than
//! its rows grows the last of them, followed by one repositioning pass.
//!
//! Row groups are walked in document order; `<tfoot>` is not moved last.

use std::collections::HashSet;

use crate::cascade::parse_inline_style;
use crate::style::{ResolveContext, VerticalAlign, values::parse_html_size};

use super::LayoutContext;
use super::block::{BlockParams, display_text, replaced_size};
use super::box_model::Rect;
use super::layout_box::{BoxId, BoxType, LayoutTree};
use super::text::{TextStyle, wrap_text};

/// Default `cellpadding`.
const DEFAULT_CELL_PADDING: f32 = 8.0;
/// Rows are never shorter than this without a `height` attribute.
const MIN_ROW_HEIGHT: f32 = 24.0;
/// Auto columns of a shrink-to-fit table are never narrower than this.
const MIN_COLUMN_WIDTH: f32 = 24.0;
/// Line height of text inside cells.
const CELL_LINE_HEIGHT: f32 = 24.0;
/// Caption height, and the gap below it.
const CAPTION_HEIGHT: f32 = 24.0;
const CAPTION_GAP: f32 = 4.0;

/// [§ 4.9.11 Attributes common to td and th elements](https://html.spec.whatwg.org/multipage/tables.html#attributes-common-to-td-and-th-elements)
/// "The td and th elements may have a colspan content attribute specified,
/// whose value must be a valid non-negative integer greater than zero and
/// less than or equal to 1000."
const MAX_COLSPAN: usize = 1000;
/// "... rowspan ... less than or equal to 65534."
const MAX_ROWSPAN: usize = 65534;

/// One cell's position on the grid.
#[derive(Debug, Clone, Copy)]
struct CellSlot {
    cell: BoxId,
    row: usize,
    column: usize,
    colspan: usize,
    rowspan: usize,
}

/// Grid positions reserved by rowspan cells from earlier rows.
#[derive(Default)]
struct OccupiedGrid {
    slots: HashSet<(usize, usize)>,
}

impl OccupiedGrid {
    /// First column at or after `column` in `row` not reserved from above.
    fn next_free(&self, row: usize, mut column: usize) -> usize {
        while self.slots.contains(&(row, column)) {
            column += 1;
        }
        column
    }

    /// Reserve `columns` in the rows below `row` that a rowspan covers.
    fn reserve(&mut self, slot: &CellSlot, row_count: usize) {
        let last_row = (slot.row + slot.rowspan).min(row_count);
        for row in slot.row + 1..last_row {
            for column in slot.column..slot.column + slot.colspan {
                let _ = self.slots.insert((row, column));
            }
        }
    }
}

/// Table attributes that affect every cell.
#[derive(Debug, Clone, Copy)]
struct TableAttributes {
    padding: f32,
    spacing: f32,
    border: u32,
}

impl TableAttributes {
    /// `cellpadding`, `cellspacing` and `border`. Negative or non-integer
    /// values keep the default.
    #[allow(clippy::cast_precision_loss)]
    fn read(tree: &LayoutTree, table: BoxId) -> Self {
        let int_attr = |name: &str| {
            tree[table]
                .attr(name)
                .and_then(|v| v.trim().parse::<u32>().ok())
        };
        Self {
            padding: int_attr("cellpadding").map_or(DEFAULT_CELL_PADDING, |p| p as f32),
            spacing: int_attr("cellspacing").map_or(0.0, |s| s as f32),
            border: int_attr("border").unwrap_or(0),
        }
    }
}

/// A positive integer attribute (`colspan`, `rowspan`, `span`), 1 when
/// missing or invalid.
fn span_attr(tree: &LayoutTree, id: BoxId, name: &str, max: usize) -> usize {
    tree[id]
        .attr(name)
        .and_then(|v| v.trim().parse::<usize>().ok())
        .filter(|n| *n > 0)
        .map_or(1, |n| n.min(max))
}

/// Rows of the table in document order, looking one level into row groups.
/// Also returns the row-group boxes.
fn collect_rows(tree: &LayoutTree, table: BoxId) -> (Vec<BoxId>, Vec<BoxId>) {
    let mut rows = Vec::new();
    let mut groups = Vec::new();
    for &child in tree.children(table) {
        match tree[child].box_type {
            BoxType::TableRow => rows.push(child),
            BoxType::TableRowGroup => {
                groups.push(child);
                rows.extend(
                    tree.children(child)
                        .iter()
                        .copied()
                        .filter(|&r| tree[r].box_type == BoxType::TableRow),
                );
            }
            _ => {}
        }
    }
    (rows, groups)
}

/// [§ 4.9.12.1 Forming a table](https://html.spec.whatwg.org/multipage/tables.html#forming-a-table)
///
/// Assign every cell a grid column. A cell skips columns reserved by
/// rowspan cells above it. Returns the slots and the column count.
fn place_cells(tree: &LayoutTree, rows: &[BoxId]) -> (Vec<CellSlot>, usize) {
    let mut grid = OccupiedGrid::default();
    let mut slots = Vec::new();
    let mut column_count = 0;
    for (row_index, &row) in rows.iter().enumerate() {
        let mut column = 0;
        for &cell in tree.children(row) {
            if tree[cell].box_type != BoxType::TableCell {
                continue;
            }
            column = grid.next_free(row_index, column);
            let slot = CellSlot {
                cell,
                row: row_index,
                column,
                colspan: span_attr(tree, cell, "colspan", MAX_COLSPAN),
                rowspan: span_attr(tree, cell, "rowspan", MAX_ROWSPAN),
            };
            if slot.rowspan > 1 {
                grid.reserve(&slot, rows.len());
            }
            column += slot.colspan;
            slots.push(slot);
        }
        column_count = column_count.max(column);
    }
    (slots, column_count)
}

/// Width of a `<col>` or `<colgroup>`: inline style width (px, then %)
/// before the `width` attribute. Zero means auto.
fn column_width(tree: &LayoutTree, id: BoxId, table_width: f32) -> f32 {
    let b = &tree[id];
    if let Some(style_attr) = b.attr("style") {
        let style = parse_inline_style(style_attr, &ResolveContext::default());
        if let Some(width) = style.width.filter(|w| *w > 0.0) {
            return width;
        }
        if let Some(pct) = style.width_percent.filter(|p| *p > 0.0) {
            return table_width * pct / 100.0;
        }
    }
    b.attr("width")
        .and_then(|w| parse_html_size(w, table_width))
        .unwrap_or(0.0)
}

/// [§ 17.3 Columns](https://www.w3.org/TR/CSS2/tables.html#columns)
///
/// Per-column widths declared by `<colgroup>`/`<col>`, with `span`
/// expanded. A colgroup without `<col>` children covers its own span.
fn declared_column_widths(tree: &LayoutTree, table: BoxId, table_width: f32) -> Vec<f32> {
    let mut widths = Vec::new();
    for &group in tree.children(table) {
        if tree[group].box_type != BoxType::TableColumnGroup {
            continue;
        }
        let cols: Vec<BoxId> = tree
            .children(group)
            .iter()
            .copied()
            .filter(|&c| tree[c].box_type == BoxType::TableColumn)
            .collect();
        if cols.is_empty() {
            let width = column_width(tree, group, table_width);
            let span = span_attr(tree, group, "span", MAX_COLSPAN);
            widths.extend(std::iter::repeat_n(width, span));
        }
        for col in cols {
            let width = column_width(tree, col, table_width);
            let span = span_attr(tree, col, "span", MAX_COLSPAN);
            widths.extend(std::iter::repeat_n(width, span));
        }
    }
    widths
}

/// Unwrapped width of all text in a subtree.
fn natural_text_width(tree: &LayoutTree, id: BoxId, ctx: &LayoutContext<'_>) -> f32 {
    tree.subtree(id)
        .into_iter()
        .filter(|&b| tree[b].box_type == BoxType::Text)
        .map(|b| TextStyle::of(&tree[b].style).measure(ctx.measurer, &display_text(tree, b)))
        .sum()
}

/// [§ 17.5.2 Table width algorithms](https://www.w3.org/TR/CSS2/tables.html#width-layout)
///
/// Lay out a table at `(start_x, start_y)` inside a container
/// `container_width` px wide.
#[allow(clippy::cast_precision_loss)]
pub(super) fn layout_table(
    tree: &mut LayoutTree,
    table: BoxId,
    params: BlockParams,
    ctx: &LayoutContext<'_>,
) {
    let BlockParams {
        container_width,
        start_x,
        start_y,
    } = params;

    // STEP 1: Table width. CSS width, then percentage, then the attribute.
    let style = &tree[table].style;
    let explicit_width = style
        .width
        .filter(|w| *w > 0.0)
        .or_else(|| {
            style
                .width_percent
                .filter(|p| *p > 0.0)
                .map(|p| container_width * p / 100.0)
        })
        .or_else(|| {
            tree[table]
                .attr("width")
                .and_then(|w| parse_html_size(w, container_width))
        });
    let mut table_width = explicit_width.unwrap_or(container_width);
    tree[table].rect = Rect::new(start_x, start_y, table_width, 0.0);

    // STEP 2: The grid.
    let (rows, groups) = collect_rows(tree, table);
    let (slots, column_count) = place_cells(tree, &rows);
    if column_count == 0 {
        tracing::trace!(box_id = table.0, "empty table");
        return;
    }
    let attrs = TableAttributes::read(tree, table);

    // STEP 3: Column widths.
    let mut widths = vec![0.0_f32; column_count];
    let mut natural = vec![0.0_f32; column_count];
    for (column, width) in declared_column_widths(tree, table, table_width)
        .into_iter()
        .take(column_count)
        .enumerate()
    {
        widths[column] = width;
    }
    for slot in slots.iter().filter(|s| s.colspan == 1) {
        let cell_style = &tree[slot.cell].style;
        let explicit = cell_style
            .width
            .filter(|w| *w > 0.0)
            .or_else(|| {
                cell_style
                    .width_percent
                    .filter(|p| *p > 0.0)
                    .map(|p| container_width * p / 100.0)
            })
            .unwrap_or(0.0);
        widths[slot.column] = widths[slot.column].max(explicit);
        let content = natural_text_width(tree, slot.cell, ctx) + attrs.padding * 2.0;
        natural[slot.column] = natural[slot.column].max(content);
    }

    let total_spacing = (column_count + 1) as f32 * attrs.spacing;
    if explicit_width.is_some() {
        // Leftover space is split evenly between auto columns.
        let used: f32 = widths.iter().filter(|w| **w > 0.0).sum();
        let auto_count = widths.iter().filter(|w| **w <= 0.0).count();
        if auto_count > 0 {
            let share = (table_width - used - total_spacing).max(0.0) / auto_count as f32;
            for width in widths.iter_mut().filter(|w| **w <= 0.0) {
                *width = share;
            }
        }
    } else {
        // [§ 17.5.2.2 Automatic table layout](https://www.w3.org/TR/CSS2/tables.html#auto-table-layout)
        // Shrink to fit: auto columns take their natural width.
        for (width, natural) in widths.iter_mut().zip(&natural) {
            if *width <= 0.0 {
                *width = natural.max(MIN_COLUMN_WIDTH);
            }
        }
        table_width = widths.iter().sum::<f32>() + total_spacing;
        tree[table].rect.width = table_width;
    }

    let mut column_x = Vec::with_capacity(column_count);
    let mut x = attrs.spacing;
    for width in &widths {
        column_x.push(x);
        x += width + attrs.spacing;
    }

    // STEP 4: Caption above the rows.
    let mut y = start_y;
    let captions: Vec<BoxId> = tree
        .children(table)
        .iter()
        .copied()
        .filter(|&c| tree[c].box_type == BoxType::TableCaption)
        .collect();
    for &caption in &captions {
        layout_caption(tree, caption, Rect::new(start_x, y, table_width, CAPTION_HEIGHT), ctx);
        y += CAPTION_HEIGHT + CAPTION_GAP;
    }
    let rows_top = y + attrs.spacing;
    y = rows_top;

    // STEP 5: Rows.
    let mut row_heights = vec![0.0_f32; rows.len()];
    let mut content_heights = vec![0.0_f32; slots.len()];
    let mut next_slot = 0;
    for (row_index, &row) in rows.iter().enumerate() {
        let mut row_height = tree[row]
            .attr("height")
            .and_then(|h| parse_html_size(h, 0.0))
            .unwrap_or(MIN_ROW_HEIGHT);

        let first_slot = next_slot;
        while next_slot < slots.len() && slots[next_slot].row == row_index {
            let slot = slots[next_slot];
            let cell_x = start_x + column_x[slot.column.min(column_count - 1)];
            let cell_width = widths[slot.column..(slot.column + slot.colspan).min(column_count)]
                .iter()
                .sum::<f32>()
                + (slot.colspan - 1) as f32 * attrs.spacing;

            let content_height = layout_cell_content(
                tree,
                slot.cell,
                Rect::new(
                    cell_x + attrs.padding,
                    y + attrs.padding,
                    (cell_width - attrs.padding * 2.0).max(0.0),
                    0.0,
                ),
                ctx,
            );
            let cell = &mut tree[slot.cell];
            cell.rect = Rect::new(cell_x, y, cell_width, content_height + attrs.padding * 2.0);
            cell.table_border = attrs.border;
            content_heights[next_slot] = content_height;
            if slot.rowspan == 1 {
                row_height = row_height.max(cell.rect.height);
            }
            next_slot += 1;
        }

        // [§ 17.5.3 Table height algorithms](https://www.w3.org/TR/CSS2/tables.html#height-layout)
        // Single-row cells stretch to the row, then align their content.
        for (index, slot) in slots.iter().enumerate().take(next_slot).skip(first_slot) {
            if slot.rowspan != 1 {
                continue;
            }
            tree[slot.cell].rect.height = row_height;
            align_cell_content(tree, slot.cell, content_heights[index], attrs.padding);
        }

        tree[row].rect = Rect::new(start_x, y, table_width, row_height);
        row_heights[row_index] = row_height;
        y += row_height + attrs.spacing;
    }

    // STEP 6: Rowspan cells taller than their rows grow the last row.
    let row_span_end = |slot: &CellSlot| (slot.row + slot.rowspan).min(rows.len());
    let mut needs_reposition = false;
    for slot in slots.iter().filter(|s| s.rowspan > 1) {
        let end = row_span_end(slot);
        let spanned: f32 = row_heights[slot.row..end].iter().sum();
        let cell_height = tree[slot.cell].rect.height;
        if cell_height > spanned {
            row_heights[end - 1] += cell_height - spanned;
            needs_reposition = true;
        }
    }

    if needs_reposition {
        y = rows_top;
        let mut slot_index = 0;
        for (row_index, &row) in rows.iter().enumerate() {
            let row_height = row_heights[row_index];
            tree[row].rect.y = y;
            tree[row].rect.height = row_height;
            while slot_index < slots.len() && slots[slot_index].row == row_index {
                let slot = slots[slot_index];
                let cell_rect = {
                    let cell = &mut tree[slot.cell];
                    cell.rect.y = y;
                    if slot.rowspan == 1 {
                        cell.rect.height = row_height;
                    }
                    cell.rect
                };
                let content_height = layout_cell_content(
                    tree,
                    slot.cell,
                    Rect::new(
                        cell_rect.x + attrs.padding,
                        y + attrs.padding,
                        (cell_rect.width - attrs.padding * 2.0).max(0.0),
                        0.0,
                    ),
                    ctx,
                );
                if slot.rowspan == 1 {
                    align_cell_content(tree, slot.cell, content_height, attrs.padding);
                }
                slot_index += 1;
            }
            y += row_height + attrs.spacing;
        }
    }

    for slot in slots.iter().filter(|s| s.rowspan > 1) {
        let end = row_span_end(slot);
        let height: f32 = row_heights[slot.row..end].iter().sum();
        let top = tree[rows[slot.row]].rect.y;
        let cell = &mut tree[slot.cell];
        cell.rect.y = top;
        cell.rect.height = height;
    }

    // STEP 7: Table height, and row groups cover the whole table.
    let table_rect = Rect::new(start_x, start_y, table_width, y - start_y);
    tree[table].rect = table_rect;
    for group in groups {
        tree[group].rect = table_rect;
    }
    tracing::trace!(
        box_id = table.0,
        columns = column_count,
        rows = rows.len(),
        width = table_rect.width,
        height = table_rect.height,
        "table"
    );
}

/// [§ 17.4 Tables in the visual formatting model](https://www.w3.org/TR/CSS2/tables.html#model)
///
/// A caption spans the table; its text is centered on one line.
fn layout_caption(tree: &mut LayoutTree, caption: BoxId, rect: Rect, ctx: &LayoutContext<'_>) {
    tree[caption].rect = rect;
    for child in tree.children(caption).to_vec() {
        if tree[child].box_type != BoxType::Text {
            continue;
        }
        let text = display_text(tree, child);
        let width = TextStyle::of(&tree[child].style).measure(ctx.measurer, &text);
        let text_box = &mut tree[child];
        text_box.rect = Rect::new(rect.x + (rect.width - width) / 2.0, rect.y, width, rect.height);
        text_box.wrapped_lines = vec![text];
    }
}

/// Line cursor inside a cell's content box.
struct CellCursor {
    left: f32,
    width: f32,
    x: f32,
    y: f32,
    max_y: f32,
}

impl CellCursor {
    fn extend_to(&mut self, bottom: f32) {
        self.max_y = self.max_y.max(bottom);
    }

    /// Move to the start of the next line if anything is on this one.
    fn break_line(&mut self) {
        if self.x > self.left {
            self.y += CELL_LINE_HEIGHT;
            self.x = self.left;
        }
    }
}

/// Lay out a cell's content inside `content` (its padding-less box; the
/// height is ignored). Returns the content height.
fn layout_cell_content(
    tree: &mut LayoutTree,
    cell: BoxId,
    content: Rect,
    ctx: &LayoutContext<'_>,
) -> f32 {
    let mut cursor = CellCursor {
        left: content.x,
        width: content.width,
        x: content.x,
        y: content.y,
        max_y: content.y,
    };
    for child in tree.children(cell).to_vec() {
        layout_cell_box(tree, child, &mut cursor, ctx);
    }
    cursor.max_y - content.y
}

/// [§ 17.5.4 Vertical alignment in table cells](https://www.w3.org/TR/CSS2/tables.html#height-layout)
///
/// Shift a laid-out cell's content down into the slack left by its
/// (already stretched) height.
fn align_cell_content(tree: &mut LayoutTree, cell: BoxId, content_height: f32, padding: f32) {
    let slack = tree[cell].rect.height - padding * 2.0 - content_height;
    let dy = match tree[cell].style.vertical_align {
        VerticalAlign::Middle => slack / 2.0,
        VerticalAlign::Bottom => slack,
        VerticalAlign::Top | VerticalAlign::Baseline => 0.0,
    };
    if dy > 0.0 {
        for child in tree.children(cell).to_vec() {
            tree.translate_subtree(child, 0.0, dy);
        }
    }
}

#[allow(clippy::cast_precision_loss)]
fn layout_cell_box(
    tree: &mut LayoutTree,
    id: BoxId,
    cursor: &mut CellCursor,
    ctx: &LayoutContext<'_>,
) {
    match tree[id].box_type {
        BoxType::Text => {
            let text = display_text(tree, id);
            let text_style = TextStyle::of(&tree[id].style);
            let lines = wrap_text(&text, cursor.width, &text_style, ctx.measurer);
            if lines.len() > 1 {
                let height = lines.len() as f32 * CELL_LINE_HEIGHT;
                tree[id].rect = Rect::new(cursor.x, cursor.y, cursor.width, height);
                cursor.y += height;
                cursor.x = cursor.left;
                cursor.extend_to(cursor.y);
            } else {
                let width = text_style.measure(ctx.measurer, &text);
                tree[id].rect = Rect::new(cursor.x, cursor.y, width, CELL_LINE_HEIGHT);
                cursor.x += width;
                cursor.extend_to(cursor.y + CELL_LINE_HEIGHT);
            }
            tree[id].wrapped_lines = lines;
        }
        BoxType::Inline => {
            let (start_x, start_y) = (cursor.x, cursor.y);
            for child in tree.children(id).to_vec() {
                layout_cell_box(tree, child, cursor, ctx);
            }
            tree[id].rect = Rect::new(start_x, start_y, cursor.x - start_x, CELL_LINE_HEIGHT);
            // A block inside the inline may already have moved the cursor
            // down; measure from where the inline started.
            cursor.extend_to(start_y + CELL_LINE_HEIGHT);
        }
        BoxType::LineBreak => {
            tree[id].rect = Rect::new(cursor.x, cursor.y, 0.0, 0.0);
            cursor.y += CELL_LINE_HEIGHT;
            cursor.x = cursor.left;
            cursor.extend_to(cursor.y);
        }
        BoxType::Block => {
            cursor.break_line();
            let before = cursor.y;
            tree[id].rect = Rect::new(cursor.left, before, cursor.width, 0.0);
            for child in tree.children(id).to_vec() {
                layout_cell_box(tree, child, cursor, ctx);
            }
            // An empty block adds no height.
            if cursor.max_y > before {
                cursor.y = cursor.max_y;
            }
            cursor.x = cursor.left;
            cursor.extend_to(cursor.y);
            tree[id].rect.height = cursor.y - before;
        }
        BoxType::Table => {
            cursor.break_line();
            layout_table(
                tree,
                id,
                BlockParams::at(cursor.width, cursor.left, cursor.y),
                ctx,
            );
            cursor.y += tree[id].rect.height;
            cursor.x = cursor.left;
            cursor.extend_to(cursor.y);
        }
        t if t.is_inline_level() => {
            let (width, height) = replaced_size(tree, id, ctx);
            tree[id].rect = Rect::new(cursor.x, cursor.y, width, height);
            cursor.x += width;
            cursor.extend_to(cursor.y + height);
        }
        _ => {
            for child in tree.children(id).to_vec() {
                layout_cell_box(tree, child, cursor, ctx);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::layout_box::LayoutBox;
    use crate::style::Style;
    use koala_dom::ElementData;

    fn add(tree: &mut LayoutTree, parent: BoxId, box_type: BoxType, tag: &str) -> BoxId {
        tree.append(
            parent,
            LayoutBox::for_element(box_type, ElementData::new(tag), Style::default()),
        )
    }

    fn add_cell(tree: &mut LayoutTree, row: BoxId, attrs: &[(&str, &str)]) -> BoxId {
        let mut element = ElementData::new("td");
        for (name, value) in attrs {
            element = element.with_attr(name, value);
        }
        tree.append(
            row,
            LayoutBox::for_element(BoxType::TableCell, element, Style::default()),
        )
    }

    #[test]
    fn test_rowspan_reserves_columns() {
        let mut tree = LayoutTree::new(LayoutBox::new(BoxType::Table));
        let table = tree.root();
        let r0 = add(&mut tree, table, BoxType::TableRow, "tr");
        let r1 = add(&mut tree, table, BoxType::TableRow, "tr");
        let a = add_cell(&mut tree, r0, &[("rowspan", "2")]);
        let _ = add_cell(&mut tree, r0, &[]);
        let _ = add_cell(&mut tree, r0, &[]);
        let d = add_cell(&mut tree, r1, &[]);
        let e = add_cell(&mut tree, r1, &[]);

        let (slots, columns) = place_cells(&tree, &[r0, r1]);
        assert_eq!(columns, 3);
        let column_of = |id| slots.iter().find(|s| s.cell == id).map(|s| s.column);
        assert_eq!(column_of(a), Some(0));
        assert_eq!(column_of(d), Some(1));
        assert_eq!(column_of(e), Some(2));
    }

    #[test]
    fn test_span_attr_bounds() {
        let mut tree = LayoutTree::new(LayoutBox::new(BoxType::TableRow));
        let row = tree.root();
        let bad = add_cell(&mut tree, row, &[("colspan", "-2")]);
        let huge = add_cell(&mut tree, row, &[("colspan", "5000")]);
        let text = add_cell(&mut tree, row, &[("colspan", "two")]);
        assert_eq!(span_attr(&tree, bad, "colspan", MAX_COLSPAN), 1);
        assert_eq!(span_attr(&tree, huge, "colspan", MAX_COLSPAN), MAX_COLSPAN);
        assert_eq!(span_attr(&tree, text, "colspan", MAX_COLSPAN), 1);
    }

    #[test]
    fn test_table_attributes_ignore_negative() {
        let tree = LayoutTree::new(LayoutBox::for_element(
            BoxType::Table,
            ElementData::new("table")
                .with_attr("cellpadding", "-3")
                .with_attr("cellspacing", "2")
                .with_attr("border", "1"),
            Style::default(),
        ));
        let attrs = TableAttributes::read(&tree, tree.root());
        assert!((attrs.padding - DEFAULT_CELL_PADDING).abs() < 0.01);
        assert!((attrs.spacing - 2.0).abs() < 0.01);
        assert_eq!(attrs.border, 1);
    }

    #[test]
    fn test_colgroup_without_cols_uses_span() {
        let mut tree = LayoutTree::new(LayoutBox::new(BoxType::Table));
        let table = tree.root();
        let _ = tree.append(
            table,
            LayoutBox::for_element(
                BoxType::TableColumnGroup,
                ElementData::new("colgroup")
                    .with_attr("span", "2")
                    .with_attr("width", "50"),
                Style::default(),
            ),
        );
        let group = add(&mut tree, table, BoxType::TableColumnGroup, "colgroup");
        let _ = tree.append(
            group,
            LayoutBox::for_element(
                BoxType::TableColumn,
                ElementData::new("col").with_attr("style", "width: 25%"),
                Style::default(),
            ),
        );
        assert_eq!(declared_column_widths(&tree, table, 400.0), vec![50.0, 50.0, 100.0]);
    }
}
