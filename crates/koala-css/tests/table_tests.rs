//! Integration tests for table layout.

use koala_css::{
    ApproximateMeasurer, BoxId, BoxType, LayoutContext, LayoutTree, MatchContext, Stylesheet,
    Viewport, compute_layout, compute_styles,
};
use koala_dom::{DomTree, ElementData, NodeId};

fn element(tag: &str, attrs: &[(&str, &str)]) -> ElementData {
    let mut element = ElementData::new(tag);
    for (name, value) in attrs {
        element = element.with_attr(name, value);
    }
    element
}

/// Append `<td>` cells with text to a new row.
fn add_row(dom: &mut DomTree, parent: NodeId, cells: &[(&str, &[(&str, &str)])]) -> NodeId {
    let row = dom.append_element(parent, ElementData::new("tr"));
    for (content, attrs) in cells {
        let cell = dom.append_element(row, element("td", attrs));
        let _ = dom.append_text(cell, content);
    }
    row
}

fn layout(dom: &DomTree, css: &str) -> LayoutTree {
    let viewport = Viewport::new(800.0, 600.0);
    let styles = compute_styles(
        dom,
        &Stylesheet::parse(css),
        viewport,
        &MatchContext::default(),
    );
    let mut tree = LayoutTree::build(dom, &styles);
    compute_layout(
        &mut tree,
        viewport.width,
        &LayoutContext::new(viewport, &ApproximateMeasurer),
    );
    tree
}

fn boxes_of(tree: &LayoutTree, box_type: BoxType) -> Vec<BoxId> {
    tree.iter()
        .filter(|(_, b)| b.box_type == box_type)
        .map(|(id, _)| id)
        .collect()
}

/// The cell whose text starts with `label`.
fn cell(tree: &LayoutTree, label: &str) -> BoxId {
    tree.iter()
        .find(|(_, b)| b.text.as_deref().is_some_and(|t| t.starts_with(label)))
        .and_then(|(_, b)| b.parent)
        .unwrap()
}

fn close(actual: f32, expected: f32) -> bool {
    (actual - expected).abs() < 0.01
}

#[test]
fn test_rowspan_grid_and_heights() {
    let mut dom = DomTree::new();
    let table = dom.append_element(NodeId::ROOT, ElementData::new("table"));
    let _ = add_row(&mut dom, table, &[("A", &[("rowspan", "2")]), ("B", &[]), ("C", &[])]);
    let _ = add_row(&mut dom, table, &[("D", &[]), ("E", &[])]);
    let tree = layout(&dom, "");

    let rows = boxes_of(&tree, BoxType::TableRow);
    let (a, b, c, d, e) = (
        cell(&tree, "A"),
        cell(&tree, "B"),
        cell(&tree, "C"),
        cell(&tree, "D"),
        cell(&tree, "E"),
    );

    // Column 0 is reserved by A, so D and E sit under B and C.
    assert!(close(tree[d].rect.x, tree[b].rect.x));
    assert!(close(tree[e].rect.x, tree[c].rect.x));
    assert!(tree[a].rect.x < tree[b].rect.x);

    let spanned = tree[rows[0]].rect.height + tree[rows[1]].rect.height;
    assert!(close(tree[a].rect.height, spanned));
    assert!(close(tree[d].rect.y, tree[rows[1]].rect.y));

    let table_box = boxes_of(&tree, BoxType::Table)[0];
    assert!(close(tree[table_box].rect.height, spanned));
}

#[test]
fn test_cell_text_wraps_deterministically() {
    let mut dom = DomTree::new();
    let table = dom.append_element(NodeId::ROOT, ElementData::new("table"));
    let _ = add_row(&mut dom, table, &[("Hello World", &[("style", "width: 100px")])]);

    let first = layout(&dom, "");
    let second = layout(&dom, "");
    for tree in [&first, &second] {
        let text = tree
            .iter()
            .find(|(_, b)| b.box_type == BoxType::Text)
            .map(|(id, _)| id)
            .unwrap();
        assert_eq!(tree[text].wrapped_lines, vec!["Hello", "World"]);
        assert!(close(tree[text].rect.height, 48.0));
        let td = cell(tree, "Hello");
        assert!(close(tree[td].rect.width, 100.0));
        assert!(close(tree[td].rect.height, 64.0));
    }
}

#[test]
fn test_shrink_to_fit_column_widths() {
    let mut dom = DomTree::new();
    let table = dom.append_element(NodeId::ROOT, ElementData::new("table"));
    let _ = add_row(&mut dom, table, &[("abcd", &[]), ("x", &[])]);
    let _ = add_row(&mut dom, table, &[("ab", &[]), ("", &[])]);
    let tree = layout(&dom, "");

    // Natural width is the longest text plus twice the 8px padding; empty
    // columns are never narrower than 24px.
    assert!(close(tree[cell(&tree, "abcd")].rect.width, 48.0));
    assert!(close(tree[cell(&tree, "x")].rect.width, 24.0));
    let table_box = boxes_of(&tree, BoxType::Table)[0];
    assert!(close(tree[table_box].rect.width, 72.0));
}

#[test]
fn test_explicit_width_splits_leftover_between_auto_columns() {
    let mut dom = DomTree::new();
    let table = dom.append_element(
        NodeId::ROOT,
        element("table", &[("width", "50%"), ("cellspacing", "2"), ("cellpadding", "4")]),
    );
    let _ = add_row(
        &mut dom,
        table,
        &[("a", &[("style", "width: 100px")]), ("b", &[]), ("c", &[])],
    );
    let tree = layout(&dom, "");

    let table_box = boxes_of(&tree, BoxType::Table)[0];
    assert!(close(tree[table_box].rect.width, 400.0));
    // 400 - 100 - 4 × 2 spacing = 292, split over two columns.
    let b = cell(&tree, "b");
    let c = cell(&tree, "c");
    assert!(close(tree[b].rect.width, 146.0));
    assert!(close(tree[c].rect.x, 2.0 + 100.0 + 2.0 + 146.0 + 2.0));
    let text = tree.children(b)[0];
    assert!(close(tree[text].rect.x, tree[b].rect.x + 4.0));
}

#[test]
fn test_col_elements_and_colspan() {
    let mut dom = DomTree::new();
    let table = dom.append_element(NodeId::ROOT, element("table", &[("width", "600")]));
    let group = dom.append_element(table, ElementData::new("colgroup"));
    let _ = dom.append_element(group, element("col", &[("style", "width: 10%")]));
    let _ = dom.append_element(group, element("col", &[("width", "150"), ("span", "2")]));
    let _ = add_row(&mut dom, table, &[("a", &[]), ("b", &[]), ("c", &[]), ("d", &[])]);
    let _ = add_row(&mut dom, table, &[("wide", &[("colspan", "3")]), ("z", &[])]);
    let tree = layout(&dom, "");

    assert!(close(tree[cell(&tree, "a")].rect.width, 60.0));
    assert!(close(tree[cell(&tree, "b")].rect.width, 150.0));
    assert!(close(tree[cell(&tree, "c")].rect.width, 150.0));
    assert!(close(tree[cell(&tree, "d")].rect.width, 240.0));
    assert!(close(tree[cell(&tree, "wide")].rect.width, 360.0));
    assert!(close(tree[cell(&tree, "z")].rect.x, 360.0));
}

#[test]
fn test_row_height_attribute_and_vertical_align() {
    let mut dom = DomTree::new();
    let table = dom.append_element(NodeId::ROOT, ElementData::new("table"));
    let row = dom.append_element(table, element("tr", &[("height", "100")]));
    let middle = dom.append_element(row, element("td", &[("style", "vertical-align: middle")]));
    let _ = dom.append_text(middle, "m");
    let bottom = dom.append_element(row, element("td", &[("style", "vertical-align: bottom")]));
    let _ = dom.append_text(bottom, "b");
    let tree = layout(&dom, "");

    let m = cell(&tree, "m");
    assert!(close(tree[m].rect.height, 100.0));
    // Content is 24px tall inside 84px of padded space.
    let m_text = tree.children(m)[0];
    assert!(close(tree[m_text].rect.y, 8.0 + 30.0));
    let b_text = tree.children(cell(&tree, "b"))[0];
    assert!(close(tree[b_text].rect.y, 8.0 + 60.0));
}

#[test]
fn test_caption_and_border_attribute() {
    let mut dom = DomTree::new();
    let table = dom.append_element(NodeId::ROOT, element("table", &[("border", "1")]));
    let caption = dom.append_element(table, ElementData::new("caption"));
    let _ = dom.append_text(caption, "Totals");
    let body = dom.append_element(table, ElementData::new("tbody"));
    let _ = add_row(&mut dom, body, &[("x", &[])]);
    let tree = layout(&dom, "");

    let x = cell(&tree, "x");
    assert!(close(tree[x].rect.y, 28.0));
    assert_eq!(tree[x].table_border, 1);
    let table_box = boxes_of(&tree, BoxType::Table)[0];
    let group = boxes_of(&tree, BoxType::TableRowGroup)[0];
    assert_eq!(tree[group].rect, tree[table_box].rect);
}

#[test]
fn test_nested_table_and_rowspan_overflow() {
    let mut dom = DomTree::new();
    let outer = dom.append_element(NodeId::ROOT, ElementData::new("table"));
    let row = dom.append_element(outer, ElementData::new("tr"));
    let tall = dom.append_element(row, element("td", &[("rowspan", "2")]));
    let inner = dom.append_element(tall, ElementData::new("table"));
    for label in ["i1", "i2", "i3"] {
        let _ = add_row(&mut dom, inner, &[(label, &[])]);
    }
    let short = dom.append_element(row, ElementData::new("td"));
    let _ = dom.append_text(short, "s");
    let _ = add_row(&mut dom, outer, &[("t", &[])]);
    let tree = layout(&dom, "");

    let tables = boxes_of(&tree, BoxType::Table);
    let rows: Vec<BoxId> = tree
        .children(tables[0])
        .iter()
        .copied()
        .filter(|&r| tree[r].box_type == BoxType::TableRow)
        .collect();
    let tall_cell = tree[tables[1]].parent.unwrap();
    // Three inner rows of 40px plus outer padding: 136px spread over two
    // outer rows, with the extra going to the last one.
    assert!(close(tree[tall_cell].rect.height, 136.0));
    assert!(close(tree[rows[0]].rect.height, 40.0));
    assert!(close(tree[rows[1]].rect.height, 96.0));
    assert!(close(tree[cell(&tree, "t")].rect.y, 40.0));
}

#[test]
fn test_vertical_align_survives_rowspan_growth() {
    let mut dom = DomTree::new();
    let outer = dom.append_element(NodeId::ROOT, ElementData::new("table"));
    let row = dom.append_element(outer, ElementData::new("tr"));
    let tall = dom.append_element(row, element("td", &[("rowspan", "2")]));
    let inner = dom.append_element(tall, ElementData::new("table"));
    for label in ["i1", "i2", "i3"] {
        let _ = add_row(&mut dom, inner, &[(label, &[])]);
    }
    let short = dom.append_element(row, ElementData::new("td"));
    let _ = dom.append_text(short, "s");
    let _ = add_row(&mut dom, outer, &[("t", &[("class", "low")])]);
    let tree = layout(&dom, ".low { vertical-align: bottom }");

    // The second row grows to 96px after the rowspan is placed; its
    // bottom-aligned text still sits on the row's bottom padding edge.
    let t_cell = cell(&tree, "t");
    assert!(close(tree[t_cell].rect.y, 40.0));
    assert!(close(tree[t_cell].rect.height, 96.0));
    let text = tree.children(t_cell)[0];
    assert!(close(tree[text].rect.y, 40.0 + 96.0 - 8.0 - 24.0));
}
