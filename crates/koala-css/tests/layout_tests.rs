//! Integration tests for box-tree construction and block/inline layout.

use koala_css::{
    ApproximateMeasurer, BoxId, BoxType, LayoutContext, LayoutTree, MatchContext, Stylesheet,
    TextMeasurer, Viewport, compute_layout, compute_styles,
};
use koala_dom::{DomTree, ElementData, NodeId};

/// Small document builder so tests read like markup.
enum Node {
    Element(&'static str, Vec<(&'static str, &'static str)>, Vec<Node>),
    Text(&'static str),
}

fn el(tag: &'static str, children: Vec<Node>) -> Node {
    Node::Element(tag, Vec::new(), children)
}

fn el_with(tag: &'static str, attrs: &[(&'static str, &'static str)], children: Vec<Node>) -> Node {
    Node::Element(tag, attrs.to_vec(), children)
}

fn text(s: &'static str) -> Node {
    Node::Text(s)
}

fn append(dom: &mut DomTree, parent: NodeId, node: &Node) {
    match node {
        Node::Element(tag, attrs, children) => {
            let mut element = ElementData::new(tag);
            for (name, value) in attrs {
                element = element.with_attr(name, value);
            }
            let id = dom.append_element(parent, element);
            for child in children {
                append(dom, id, child);
            }
        }
        Node::Text(s) => {
            let _ = dom.append_text(parent, s);
        }
    }
}

fn layout_with(root: &Node, css: &str, measurer: &dyn TextMeasurer) -> LayoutTree {
    let mut dom = DomTree::new();
    append(&mut dom, NodeId::ROOT, root);
    let viewport = Viewport::new(800.0, 600.0);
    let styles = compute_styles(
        &dom,
        &Stylesheet::parse(css),
        viewport,
        &MatchContext::default(),
    );
    let mut tree = LayoutTree::build(&dom, &styles);
    compute_layout(&mut tree, viewport.width, &LayoutContext::new(viewport, measurer));
    tree
}

fn layout_html(root: &Node, css: &str) -> LayoutTree {
    layout_with(root, css, &ApproximateMeasurer)
}

/// First box generated by an element with this tag.
fn find_tag(tree: &LayoutTree, tag: &str) -> BoxId {
    tree.iter()
        .find(|(_, b)| b.element.as_ref().is_some_and(|e| e.tag_name == tag))
        .map(|(id, _)| id)
        .unwrap()
}

/// First text box whose text starts with `prefix`.
fn find_text(tree: &LayoutTree, prefix: &str) -> BoxId {
    tree.iter()
        .find(|(_, b)| b.text.as_deref().is_some_and(|t| t.starts_with(prefix)))
        .map(|(id, _)| id)
        .unwrap()
}

fn close(actual: f32, expected: f32) -> bool {
    (actual - expected).abs() < 0.01
}

#[test]
fn test_build_skips_hidden_and_whitespace() {
    let doc = el(
        "html",
        vec![
            el("head", vec![el("title", vec![text("t")])]),
            el(
                "body",
                vec![
                    text("\n   "),
                    el_with("div", &[("style", "display: none")], vec![text("gone")]),
                    el("p", vec![text("kept")]),
                    el_with("input", &[("type", "hidden")], vec![]),
                ],
            ),
        ],
    );
    let tree = layout_html(&doc, "");
    let tags: Vec<String> = tree.iter().map(|(_, b)| b.tag().to_string()).collect();
    assert!(!tags.iter().any(|t| t == "head" || t == "title" || t == "div" || t == "input"));
    let texts: Vec<_> = tree.iter().filter_map(|(_, b)| b.text.clone()).collect();
    assert_eq!(texts, vec!["kept"]);
}

#[test]
fn test_text_box_carries_parent_style() {
    let doc = el_with("div", &[("style", "color: red; font-size: 20px")], vec![text("x")]);
    let tree = layout_html(&doc, "");
    let t = find_text(&tree, "x");
    assert_eq!(tree[t].box_type, BoxType::Text);
    assert!(close(tree[t].style.font_size, 20.0));
}

#[test]
fn test_body_margin_and_simple_flow() {
    let doc = el("body", vec![el("div", vec![text("Hello")])]);
    let tree = layout_html(&doc, "");
    let body = find_tag(&tree, "body");
    let div = find_tag(&tree, "div");
    let hello = find_text(&tree, "Hello");

    assert!(close(tree[div].rect.x, 8.0));
    assert!(close(tree[div].rect.y, 8.0));
    assert!(close(tree[div].rect.width, 784.0));
    assert!(close(tree[div].rect.height, 24.0));
    assert!(close(tree[hello].rect.width, 40.0));
    assert!(close(tree[body].rect.height, 40.0));
    assert!(close(tree[tree.root()].rect.height, 40.0));
}

#[test]
fn test_paragraph_margins_from_user_agent() {
    let doc = el("body", vec![el("p", vec![text("Hi")])]);
    let tree = layout_html(&doc, "");
    let p = find_tag(&tree, "p");
    let hi = find_text(&tree, "Hi");
    assert!(close(tree[p].margin.top, 16.0));
    assert!(close(tree[hi].rect.y, 24.0));
    assert!(close(tree[p].rect.height, 56.0));
}

#[test]
fn test_text_wraps_at_content_width() {
    let doc = el_with("div", &[("style", "width: 100px")], vec![text("Hello World again")]);
    let tree = layout_html(&doc, "");
    let t = find_text(&tree, "Hello");
    assert_eq!(tree[t].wrapped_lines, vec!["Hello World", "again"]);
    assert!(close(tree[t].rect.height, 48.0));
    assert!(close(tree[find_tag(&tree, "div")].rect.height, 48.0));
}

#[test]
fn test_heading_line_height_and_explicit_line_height() {
    let doc = el(
        "div",
        vec![
            el("h1", vec![text("Big")]),
            el_with("p", &[("style", "line-height: 30px; margin: 0")], vec![text("Tall")]),
        ],
    );
    let tree = layout_html(&doc, "");
    assert!(close(tree[find_text(&tree, "Big")].rect.height, 40.0));
    assert!(close(tree[find_text(&tree, "Tall")].rect.height, 30.0));
}

#[test]
fn test_auto_margins_center_fixed_width_block() {
    let doc = el_with("div", &[("style", "width: 200px; margin: 0 auto")], vec![]);
    let tree = layout_html(&doc, "");
    let div = find_tag(&tree, "div");
    assert!(close(tree[div].rect.x, 300.0));
    assert!(close(tree[div].margin.left, 300.0));
}

#[test]
fn test_text_align_center_and_right() {
    let doc = el(
        "div",
        vec![
            el_with("p", &[("style", "text-align: center; margin: 0")], vec![text("abcd")]),
            el_with("p", &[("style", "text-align: right; margin: 0")], vec![text("xy")]),
        ],
    );
    let tree = layout_html(&doc, "");
    assert!(close(tree[find_text(&tree, "abcd")].rect.x, 384.0));
    assert!(close(tree[find_text(&tree, "xy")].rect.x, 784.0));
}

#[test]
fn test_inline_boxes_share_a_line() {
    let doc = el(
        "div",
        vec![
            text("ab "),
            el("b", vec![text("cd")]),
            el_with("img", &[("width", "50"), ("height", "40")], vec![]),
        ],
    );
    let tree = layout_html(&doc, "");
    let b = find_tag(&tree, "b");
    let img = find_tag(&tree, "img");
    assert!(close(tree[b].rect.x, 24.0));
    assert!(close(tree[img].rect.x, 40.0));
    assert!(close(tree[img].rect.width, 54.0));
    assert!(close(tree[find_tag(&tree, "div")].rect.height, 40.0));
}

#[test]
fn test_replaced_boxes_wrap_to_next_line() {
    let doc = el(
        "form",
        vec![
            el("textarea", vec![]),
            el("textarea", vec![]),
            el("textarea", vec![]),
        ],
    );
    let tree = layout_html(&doc, "");
    let areas: Vec<_> = tree
        .iter()
        .filter(|(_, b)| b.box_type == BoxType::Textarea)
        .map(|(_, b)| b.rect)
        .collect();
    assert_eq!(areas.len(), 3);
    assert!(close(areas[1].x, 300.0));
    assert!(close(areas[2].x, 0.0));
    assert!(close(areas[2].y, 80.0));
    assert!(close(tree[find_tag(&tree, "form")].rect.height, 160.0));
}

#[test]
fn test_rule_and_line_break() {
    let doc = el(
        "div",
        vec![text("a"), el("br", vec![]), text("b"), el("hr", vec![]), text("c")],
    );
    let tree = layout_html(&doc, "");
    let b = find_text(&tree, "b");
    let hr = find_tag(&tree, "hr");
    let c = find_text(&tree, "c");
    assert!(close(tree[b].rect.y, 24.0));
    assert!(close(tree[hr].rect.y, 56.0));
    assert!(close(tree[hr].rect.height, 2.0));
    assert!(close(tree[c].rect.y, 66.0));
}

#[test]
fn test_preformatted_text_keeps_lines() {
    let doc = el("pre", vec![text("a\tb\nc")]);
    let tree = layout_html(&doc, "");
    let t = find_text(&tree, "a");
    assert_eq!(tree[t].wrapped_lines, vec!["a       b", "c"]);
    assert!(close(tree[t].rect.width, 72.0));
    assert!(close(tree[t].rect.height, 48.0));
}

#[test]
fn test_list_indentation() {
    let doc = el("ul", vec![el("li", vec![text("one")])]);
    let tree = layout_html(&doc, "");
    assert!(close(tree[find_tag(&tree, "li")].rect.x, 60.0));
}

#[test]
fn test_floats_at_container_edges() {
    let doc = el(
        "div",
        vec![
            el_with("div", &[("class", "l")], vec![]),
            el_with("div", &[("class", "r")], vec![]),
        ],
    );
    let tree = layout_html(&doc, ".l { float: left; width: 50px } .r { float: right }");
    let floats: Vec<_> = tree
        .iter()
        .filter(|(_, b)| b.element.as_ref().is_some_and(|e| e.attr("class").is_some()))
        .map(|(_, b)| b.rect)
        .collect();
    assert!(close(floats[0].x, 0.0));
    assert!(close(floats[0].width, 50.0));
    assert!(close(floats[1].x, 700.0));
    assert!(close(floats[1].width, 100.0));
}

#[test]
fn test_absolute_and_fixed_positioning() {
    let doc = el(
        "div",
        vec![
            text("flow"),
            el_with("div", &[("class", "abs")], vec![]),
            el_with("div", &[("class", "fix")], vec![]),
        ],
    );
    let tree = layout_html(
        &doc,
        ".abs { position: absolute; left: 10px; top: 20px; width: 30px } \
         .fix { position: fixed; right: 0; bottom: 0; width: 100px }",
    );
    let rect_of = |class: &str| {
        tree.iter()
            .find(|(_, b)| b.attr("class") == Some(class))
            .map(|(_, b)| b.rect)
            .unwrap()
    };
    let abs = rect_of("abs");
    assert!(close(abs.x, 10.0));
    assert!(close(abs.y, 20.0));
    assert!(close(abs.width, 30.0));
    let fix = rect_of("fix");
    assert!(close(fix.x, 700.0));
    assert!(close(fix.y, 600.0));
    // Out-of-flow boxes do not add to the parent's height.
    assert!(close(tree[find_tag(&tree, "div")].rect.height, 24.0));
}

#[test]
fn test_fieldset_and_legend() {
    let doc = el(
        "fieldset",
        vec![el("legend", vec![text("Name")]), text("body")],
    );
    let tree = layout_html(&doc, "");
    let fieldset = find_tag(&tree, "fieldset");
    let legend = find_tag(&tree, "legend");
    assert!(close(tree[fieldset].padding.top, 10.0));
    assert!(close(tree[legend].rect.width, 48.0));
    assert!(close(tree[legend].rect.x, 23.0));
    assert!(close(tree[find_text(&tree, "body")].rect.y, 11.0));
}

#[test]
fn test_injected_measurer_is_used() {
    struct Monospace10;
    impl TextMeasurer for Monospace10 {
        #[allow(clippy::cast_precision_loss)]
        fn text_width(&self, text: &str, _: f32, _: bool, _: bool) -> f32 {
            text.chars().count() as f32 * 10.0
        }
    }
    let doc = el("div", vec![text("abc")]);
    let tree = layout_with(&doc, "", &Monospace10);
    assert!(close(tree[find_text(&tree, "abc")].rect.width, 30.0));
}

#[test]
fn test_geometry_invariants_and_determinism() {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();
    let doc = el(
        "body",
        vec![
            el("h2", vec![text("Title "), el("small", vec![text("sub")])]),
            el(
                "ul",
                vec![
                    el("li", vec![text("first item with several words in it")]),
                    el("li", vec![el("a", vec![text("link")])]),
                ],
            ),
            el(
                "blockquote",
                vec![el("p", vec![text("quoted text that should wrap a few times")])],
            ),
            el("table", vec![el("tr", vec![el("td", vec![text("cell")])])]),
            // Padding wider than the column leaves no room for content.
            el_with(
                "table",
                &[("width", "10"), ("cellpadding", "20")],
                vec![el("tr", vec![el("td", vec![el("div", vec![text("x")])])])],
            ),
            el("img", vec![]),
        ],
    );
    let css = "blockquote { width: 200px } a { font-size: 1.5em }";
    let first = layout_html(&doc, css);
    let second = layout_html(&doc, css);

    for (id, b) in first.iter() {
        assert!(b.rect.width >= 0.0, "{id:?} width");
        assert!(b.rect.height >= 0.0, "{id:?} height");
        assert_eq!(b.rect, second[id].rect);
        assert_eq!(b.wrapped_lines, second[id].wrapped_lines);

        let auto_height = b.box_type == BoxType::Block && b.style.height.is_none();
        if !auto_height {
            continue;
        }
        for descendant in first.subtree(id) {
            let d = &first[descendant];
            if d.is_out_of_flow() || d.style.float != koala_css::style::FloatSide::None {
                continue;
            }
            assert!(
                b.rect.bottom() + 0.01 >= d.rect.bottom(),
                "{id:?} ends at {} before {descendant:?} at {}",
                b.rect.bottom(),
                d.rect.bottom()
            );
        }
    }
}
