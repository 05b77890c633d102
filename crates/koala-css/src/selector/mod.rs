//! CSS Selector matching and specificity
//!
//! This module implements the subset of
//! [Selectors Level 4](https://www.w3.org/TR/selectors-4/) that the parser
//! produces: compound selectors of type, id, class and one pseudo-class,
//! joined by descendant combinators.

use koala_common::warning::warn_once;
use koala_dom::{DomTree, ElementData, NodeId};

/// [§ 5 Elemental selectors](https://www.w3.org/TR/selectors-4/#elemental-selectors)
///
/// A compound selector plus the selector its subject must descend from.
///
/// `div.note p:link` parses to a `p:link` subject whose `ancestor` is
/// `div.note`. A selector with every field empty matches every element.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Selector {
    /// [§ 5.1 Type selector](https://www.w3.org/TR/selectors-4/#type-selectors)
    /// "A type selector is the name of a document language element type,
    /// and represents an instance of that element type in the document tree."
    pub tag_name: Option<String>,

    /// [§ 6.7 ID selector](https://www.w3.org/TR/selectors-4/#id-selectors)
    /// "An ID selector is a hash (#, U+0023) immediately followed by the
    /// ID value, which is an identifier."
    pub id: Option<String>,

    /// [§ 6.6 Class selector](https://www.w3.org/TR/selectors-4/#class-html)
    /// "The class selector is given as a full stop (. U+002E) immediately
    /// followed by an identifier."
    pub classes: Vec<String>,

    /// [§ 4 Pseudo-classes](https://www.w3.org/TR/selectors-4/#pseudo-classes)
    ///
    /// Lower-cased name without the colon. Only `link` and `visited` can
    /// match.
    pub pseudo_class: Option<String>,

    /// [§ 16.1 Descendant combinator](https://www.w3.org/TR/selectors-4/#descendant-combinators)
    /// "A selector of the form 'A B' represents an element B that is an
    /// arbitrary descendant of some ancestor element A."
    pub ancestor: Option<Box<Selector>>,
}

/// [§ 17 Calculating Specificity](https://www.w3.org/TR/selectors-4/#specificity-rules)
/// "A selector's specificity is calculated for a given element as follows:
///  - count the number of ID selectors in the selector (= A)
///  - count the number of class selectors, attributes selectors, and pseudo-classes in the selector (= B)
///  - count the number of type selectors and pseudo-elements in the selector (= C)
///
/// Specificities are compared by comparing the three components in order."
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Hash)]
pub struct Specificity(pub u32, pub u32, pub u32);

impl Specificity {
    /// Create a new specificity with (A, B, C) components.
    #[must_use]
    pub const fn new(a: u32, b: u32, c: u32) -> Self {
        Self(a, b, c)
    }
}

impl std::ops::Add for Specificity {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self(self.0 + other.0, self.1 + other.1, self.2 + other.2)
    }
}

/// Callbacks the matcher needs from the embedder.
///
/// Both are optional. Without `is_visited` no link counts as visited, and
/// without `resolve_url` hrefs are looked up as written.
#[derive(Clone, Copy, Default)]
pub struct MatchContext<'a> {
    /// Whether a resolved URL is in the visited set.
    pub is_visited: Option<&'a dyn Fn(&str) -> bool>,
    /// Resolve an `href` against the document URL.
    pub resolve_url: Option<&'a dyn Fn(&str) -> String>,
}

impl std::fmt::Debug for MatchContext<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MatchContext")
            .field("is_visited", &self.is_visited.is_some())
            .field("resolve_url", &self.resolve_url.is_some())
            .finish()
    }
}

impl MatchContext<'_> {
    /// Resolve `href` and ask whether it has been visited.
    #[must_use]
    pub fn is_visited_href(&self, href: &str) -> bool {
        let Some(is_visited) = self.is_visited else {
            return false;
        };
        match self.resolve_url {
            Some(resolve) => is_visited(&resolve(href)),
            None => is_visited(href),
        }
    }
}

impl Selector {
    /// A type selector.
    #[must_use]
    pub fn tag(tag_name: &str) -> Self {
        Self {
            tag_name: Some(tag_name.to_ascii_lowercase()),
            ..Self::default()
        }
    }

    /// Match the compound part against an element's tag, id and classes.
    ///
    /// Ancestry and pseudo-classes are ignored. Tag names compare
    /// case-insensitively; ids and classes are case-sensitive. Every class
    /// in the selector must be present on the element.
    #[must_use]
    pub fn matches_structural(&self, tag_name: &str, id: Option<&str>, classes: &[&str]) -> bool {
        if let Some(tag) = &self.tag_name
            && !tag.eq_ignore_ascii_case(tag_name)
        {
            return false;
        }
        if let Some(wanted) = &self.id
            && id != Some(wanted.as_str())
        {
            return false;
        }
        self.classes
            .iter()
            .all(|class| classes.contains(&class.as_str()))
    }

    /// [§ 4.1 Selector Matching](https://www.w3.org/TR/selectors-4/#match-a-selector-against-an-element)
    /// "A selector is said to match an element when..."
    ///
    /// Match against a node in `tree`, including pseudo-classes and the
    /// descendant chain. Non-element nodes never match.
    #[must_use]
    pub fn matches(&self, tree: &DomTree, node: NodeId, ctx: &MatchContext<'_>) -> bool {
        let Some(element) = tree.as_element(node) else {
            return false;
        };
        if !self.matches_element(element, ctx) {
            return false;
        }

        // Walk the chain outward. Taking the nearest matching ancestor for
        // each link is enough: anything a farther ancestor could satisfy
        // further up is still reachable from the nearer one.
        let mut current = node;
        let mut link = self.ancestor.as_deref();
        while let Some(ancestor_selector) = link {
            let found = tree.element_ancestors(current).find(|&candidate| {
                tree.as_element(candidate)
                    .is_some_and(|el| ancestor_selector.matches_element(el, ctx))
            });
            match found {
                Some(ancestor) => current = ancestor,
                None => return false,
            }
            link = ancestor_selector.ancestor.as_deref();
        }
        true
    }

    /// The compound part plus the pseudo-class, without ancestry.
    fn matches_element(&self, element: &ElementData, ctx: &MatchContext<'_>) -> bool {
        self.matches_structural(&element.tag_name, element.id(), &element.classes())
            && self
                .pseudo_class
                .as_deref()
                .is_none_or(|pseudo| pseudo_class_matches(pseudo, element, ctx))
    }

    /// [§ 17 Calculating Specificity](https://www.w3.org/TR/selectors-4/#specificity-rules)
    ///
    /// Summed over the whole descendant chain.
    #[must_use]
    pub fn specificity(&self) -> Specificity {
        let own = Specificity(
            u32::from(self.id.is_some()),
            u32::try_from(self.classes.len()).unwrap_or(u32::MAX)
                + u32::from(self.pseudo_class.is_some()),
            u32::from(self.tag_name.is_some()),
        );
        match &self.ancestor {
            Some(ancestor) => own + ancestor.specificity(),
            None => own,
        }
    }
}

/// [§ 4 Pseudo-classes](https://www.w3.org/TR/selectors-4/#pseudo-classes)
fn pseudo_class_matches(pseudo: &str, element: &ElementData, ctx: &MatchContext<'_>) -> bool {
    let href = element.attr("href").filter(|href| !href.is_empty());
    match pseudo {
        // [§ 8.2 :link](https://www.w3.org/TR/selectors-4/#the-link-pseudo)
        // "The :link pseudo-class applies to links that have not yet been visited."
        "link" => href.is_some_and(|href| !ctx.is_visited_href(href)),
        // [§ 8.2 :visited](https://www.w3.org/TR/selectors-4/#the-visited-pseudo)
        "visited" => href.is_some_and(|href| ctx.is_visited_href(href)),
        other => {
            warn_once("CSS", &format!("unsupported pseudo-class: :{other}"));
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_structural_subset_of_classes() {
        let selector = Selector {
            tag_name: Some("div".into()),
            classes: vec!["a".into(), "b".into()],
            ..Selector::default()
        };
        assert!(selector.matches_structural("DIV", None, &["b", "c", "a"]));
        assert!(!selector.matches_structural("div", None, &["a"]));
        assert!(!selector.matches_structural("span", None, &["a", "b"]));
    }

    #[test]
    fn test_empty_selector_matches_anything() {
        assert!(Selector::default().matches_structural("p", Some("x"), &[]));
    }

    #[test]
    fn test_specificity_sums_chain() {
        let selector = Selector {
            tag_name: Some("a".into()),
            pseudo_class: Some("link".into()),
            ancestor: Some(Box::new(Selector {
                id: Some("nav".into()),
                classes: vec!["menu".into()],
                ..Selector::default()
            })),
            ..Selector::default()
        };
        assert_eq!(selector.specificity(), Specificity(1, 2, 1));
        assert!(Specificity(0, 1, 0) > Specificity(0, 0, 5));
        assert!(Specificity(1, 0, 0) > Specificity(0, 9, 9));
    }

    #[test]
    fn test_visited_uses_resolved_url() {
        let is_visited = |url: &str| url == "https://example.com/a";
        let resolve = |href: &str| format!("https://example.com/{href}");
        let ctx = MatchContext {
            is_visited: Some(&is_visited),
            resolve_url: Some(&resolve),
        };
        assert!(ctx.is_visited_href("a"));
        assert!(!ctx.is_visited_href("b"));
        assert!(!MatchContext::default().is_visited_href("https://example.com/a"));
    }
}
