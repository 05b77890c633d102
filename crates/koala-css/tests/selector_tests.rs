//! Integration tests for selector matching and specificity.

use koala_css::{MatchContext, Selector, Specificity, Stylesheet};
use koala_dom::{DomTree, ElementData, NodeId};

fn selector(text: &str) -> Selector {
    Stylesheet::parse(&format!("{text} {{ color: red }}")).rules[0].selectors[0].clone()
}

fn make_element(tag: &str, id: Option<&str>, classes: &[&str]) -> ElementData {
    let mut element = ElementData::new(tag);
    if let Some(id) = id {
        element = element.with_attr("id", id);
    }
    if !classes.is_empty() {
        element = element.with_attr("class", &classes.join(" "));
    }
    element
}

/// `<div id="main" class="content wide"><section><p class="note">` plus a
/// sibling `<a href="/seen">` under the div.
fn sample_tree() -> (DomTree, NodeId, NodeId, NodeId) {
    let mut tree = DomTree::new();
    let div = tree.append_element(NodeId::ROOT, make_element("div", Some("main"), &["content", "wide"]));
    let section = tree.append_element(div, make_element("section", None, &[]));
    let p = tree.append_element(section, make_element("p", None, &["note"]));
    let a = tree.append_element(div, ElementData::new("a").with_attr("href", "/seen"));
    (tree, div, p, a)
}

#[test]
fn test_compound_matching() {
    let (tree, div, p, _) = sample_tree();
    let ctx = MatchContext::default();
    assert!(selector("div#main.content").matches(&tree, div, &ctx));
    assert!(selector(".wide.content").matches(&tree, div, &ctx));
    assert!(!selector("div.missing").matches(&tree, div, &ctx));
    assert!(selector("*").matches(&tree, p, &ctx));
    assert!(selector("P.note").matches(&tree, p, &ctx));
}

#[test]
fn test_descendant_chain_skips_levels() {
    let (tree, _, p, a) = sample_tree();
    let ctx = MatchContext::default();
    assert!(selector("div p").matches(&tree, p, &ctx));
    assert!(selector("#main section .note").matches(&tree, p, &ctx));
    assert!(!selector("section div p").matches(&tree, p, &ctx));
    assert!(!selector("section a").matches(&tree, a, &ctx));
}

#[test]
fn test_text_nodes_never_match() {
    let mut tree = DomTree::new();
    let text = tree.append_text(NodeId::ROOT, "hello");
    assert!(!Selector::default().matches(&tree, text, &MatchContext::default()));
}

#[test]
fn test_link_and_visited() {
    let (tree, _, p, a) = sample_tree();
    let is_visited = |url: &str| url == "https://example.com/seen";
    let resolve = |href: &str| format!("https://example.com{href}");

    let unvisited = MatchContext::default();
    assert!(selector("a:link").matches(&tree, a, &unvisited));
    assert!(!selector("a:visited").matches(&tree, a, &unvisited));

    let visited = MatchContext {
        is_visited: Some(&is_visited),
        resolve_url: Some(&resolve),
    };
    assert!(!selector("a:link").matches(&tree, a, &visited));
    assert!(selector("a:visited").matches(&tree, a, &visited));
    assert!(!selector(":link").matches(&tree, p, &visited));
}

#[test]
fn test_empty_href_is_not_a_link() {
    let mut tree = DomTree::new();
    let a = tree.append_element(NodeId::ROOT, ElementData::new("a").with_attr("href", ""));
    assert!(!selector("a:link").matches(&tree, a, &MatchContext::default()));
    assert!(selector("a").matches(&tree, a, &MatchContext::default()));
}

#[test]
fn test_unsupported_pseudo_classes_never_match() {
    let (tree, div, p, _) = sample_tree();
    let ctx = MatchContext::default();
    assert!(!selector("div:hover").matches(&tree, div, &ctx));
    assert!(!selector("p::before").matches(&tree, p, &ctx));
}

#[test]
fn test_specificity_values() {
    let cases = [
        ("*", Specificity(0, 0, 0)),
        ("p", Specificity(0, 0, 1)),
        ("p.note", Specificity(0, 1, 1)),
        ("a:link", Specificity(0, 1, 1)),
        ("#main", Specificity(1, 0, 0)),
        ("div#main p.note", Specificity(1, 1, 2)),
    ];
    for (text, expected) in cases {
        assert_eq!(selector(text).specificity(), expected, "{text}");
    }
    assert!(selector("#x").specificity() > selector(".a.b.c.d p p p").specificity());
}
