//! CSS Cascading and Style Computation
//!
//! This module implements style computation per
//! [CSS Cascading and Inheritance Level 4](https://www.w3.org/TR/css-cascade-4/).
//!
//! Resolution runs in two passes over the same ordered list of declarations.
//! The first pass resolves `font-size` alone, against the parent's size. The
//! second applies everything else with the element's own size as the `em`
//! base, so `font-size: 2em; padding: 1em` gives padding equal to the new
//! font size.

use std::collections::HashMap;

use koala_dom::{DomTree, ElementData, NodeId, NodeType};

use crate::parser::{Declaration, Stylesheet, parse_declaration_block};
use crate::selector::{MatchContext, Selector, Specificity};
use crate::style::{ColorValue, ResolveContext, Style, TextDecoration, Viewport};

/// Everything the cascade needs besides the stylesheet and the element.
#[derive(Debug, Clone, Copy, Default)]
pub struct StyleContext<'a> {
    /// The parent element's computed style. `None` for the root element,
    /// which inherits initial values.
    pub parent: Option<&'a Style>,
    /// Viewport for `vw`/`vh`.
    pub viewport: Viewport,
    /// Link state callbacks for `:link`, `:visited` and default link colors.
    pub matching: MatchContext<'a>,
}

/// [§ 6.4 Cascade Sorting Order](https://www.w3.org/TR/css-cascade-4/#cascade-sort)
///
/// Field order is comparison order: importance, then the style attribute,
/// then specificity. Equal precedence goes to the later declaration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
struct Precedence {
    important: bool,
    inline: bool,
    specificity: Specificity,
}

/// Tracks the winning precedence per longhand.
#[derive(Default)]
struct Winners<'d> {
    by_property: HashMap<&'d str, Precedence>,
}

impl<'d> Winners<'d> {
    /// Apply `declaration` if it does not lose to the current winner.
    fn offer(
        &mut self,
        style: &mut Style,
        declaration: &'d Declaration,
        precedence: Precedence,
        ctx: &ResolveContext,
    ) {
        let name = declaration.name.as_str();
        if self
            .by_property
            .get(name)
            .is_some_and(|winner| precedence < *winner)
        {
            return;
        }
        // Values that fail to parse never take the slot.
        if style.apply_declaration(name, &declaration.value, ctx) {
            let _ = self.by_property.insert(name, precedence);
        }
    }
}

/// [§ 6 Cascading](https://www.w3.org/TR/css-cascade-4/#cascading)
/// "The cascade takes an unordered list of declared values for a given property
/// on a given element, sorts them by their declaration's precedence..."
///
/// Compute the style of one element: user-agent defaults, then every
/// matching rule of `stylesheet`, then the element's `style` attribute.
/// Non-element nodes get the inherited style unchanged.
#[must_use]
pub fn resolve_style(
    stylesheet: &Stylesheet,
    tree: &DomTree,
    node: NodeId,
    ctx: &StyleContext<'_>,
) -> Style {
    let default_parent = Style::default();
    let parent = ctx.parent.unwrap_or(&default_parent);
    let mut style = Style::inherited_from(parent);
    let Some(element) = tree.as_element(node) else {
        return style;
    };

    apply_user_agent_defaults(&mut style, element, parent.font_size, &ctx.matching);

    let inline = element
        .attr("style")
        .map(parse_declaration_block)
        .unwrap_or_default();

    // Matching declarations in document order, with their precedence.
    let mut declarations: Vec<(&Declaration, Precedence)> = Vec::new();
    for rule in &stylesheet.rules {
        // A rule counts with the most specific of its matching selectors.
        let Some(specificity) = rule
            .selectors
            .iter()
            .filter(|selector| selector.matches(tree, node, &ctx.matching))
            .map(Selector::specificity)
            .max()
        else {
            continue;
        };
        declarations.extend(rule.declarations.iter().map(|declaration| {
            (
                declaration,
                Precedence {
                    important: declaration.important,
                    inline: false,
                    specificity,
                },
            )
        }));
    }
    declarations.extend(inline.iter().map(|declaration| {
        (
            declaration,
            Precedence {
                important: declaration.important,
                inline: true,
                specificity: Specificity::default(),
            },
        )
    }));

    cascade(&mut style, &declarations, parent.font_size, ctx.viewport);
    tracing::trace!(node = node.0, tag = %element.tag_name, font_size = style.font_size, "resolved style");
    style
}

/// Parse a `style` attribute on its own into a style.
///
/// Starts from initial values with the font size of the parent, then runs
/// the same two-pass cascade as [`resolve_style`]. Later declarations win
/// unless an earlier one is `!important`.
#[must_use]
pub fn parse_inline_style(text: &str, ctx: &ResolveContext) -> Style {
    let mut style = Style {
        font_size: ctx.parent_font_size,
        ..Style::default()
    };
    let parsed = parse_declaration_block(text);
    let declarations: Vec<_> = parsed
        .iter()
        .map(|declaration| {
            (
                declaration,
                Precedence {
                    important: declaration.important,
                    inline: true,
                    specificity: Specificity::default(),
                },
            )
        })
        .collect();
    cascade(&mut style, &declarations, ctx.parent_font_size, ctx.viewport);
    style
}

/// The two passes. `font-size` first, then the rest with the resolved size
/// as the `em` base.
fn cascade(
    style: &mut Style,
    declarations: &[(&Declaration, Precedence)],
    parent_font_size: f32,
    viewport: Viewport,
) {
    let ctx = ResolveContext {
        parent_font_size,
        viewport,
    };
    let mut winners = Winners::default();

    for &(declaration, precedence) in declarations {
        if declaration.name == "font-size" {
            winners.offer(style, declaration, precedence, &ctx);
        }
    }
    // A unitless line-height follows this element's own font size.
    if let Some(factor) = style.line_height_factor {
        style.line_height = Some(factor * style.font_size);
    }
    for &(declaration, precedence) in declarations {
        if declaration.name != "font-size" {
            winners.offer(style, declaration, precedence, &ctx);
        }
    }
}

/// [WHATWG HTML § 15.3 Non-replaced elements](https://html.spec.whatwg.org/multipage/rendering.html#non-replaced-elements)
///
/// The user-agent defaults this engine applies. `em` values resolve against
/// the parent's font size. These are written straight into the style and
/// never compete in the cascade, so any matching author declaration
/// replaces them.
fn apply_user_agent_defaults(
    style: &mut Style,
    element: &ElementData,
    parent_font_size: f32,
    matching: &MatchContext<'_>,
) {
    let em = parent_font_size;

    // [§ 15.3.7 Sections and headings](https://html.spec.whatwg.org/multipage/rendering.html#sections-and-headings)
    let font_scale = match element.tag_name.as_str() {
        "h1" => Some(2.0),
        "h2" => Some(1.5),
        "h3" => Some(1.125),
        "h4" => Some(1.0),
        "h5" => Some(0.875),
        "h6" | "small" => Some(0.75),
        _ => None,
    };
    if let Some(scale) = font_scale {
        style.font_size = em * scale;
        if element.tag_name.starts_with('h') {
            style.bold = true;
        }
    }

    let vertical_margin = match element.tag_name.as_str() {
        "p" | "dl" | "h3" | "ul" | "ol" | "blockquote" => Some(1.0),
        "h1" => Some(0.67),
        "h2" => Some(0.83),
        "h4" => Some(1.33),
        "h5" => Some(1.67),
        "h6" => Some(2.33),
        "hr" => Some(0.5),
        _ => None,
    };
    if let Some(factor) = vertical_margin {
        style.margin.top = em * factor;
        style.margin.bottom = em * factor;
    }

    match element.tag_name.as_str() {
        "ul" | "ol" => style.padding.left = 40.0,
        "blockquote" => {
            style.margin.left = 40.0;
            style.margin.right = 40.0;
        }
        // [§ 15.3.4 Phrasing content](https://html.spec.whatwg.org/multipage/rendering.html#phrasing-content-3)
        "a" => {
            if let Some(href) = element.attr("href").filter(|href| !href.is_empty()) {
                style.text_decoration = TextDecoration::Underline;
                style.color = if matching.is_visited_href(href) {
                    ColorValue::VISITED_LINK
                } else {
                    ColorValue::LINK
                };
            }
        }
        _ => {}
    }
}

/// Compute styles for every element of `tree`.
///
/// Each element inherits from its nearest element ancestor. Text, comment
/// and document nodes have no entry.
#[must_use]
pub fn compute_styles(
    tree: &DomTree,
    stylesheet: &Stylesheet,
    viewport: Viewport,
    matching: &MatchContext<'_>,
) -> HashMap<NodeId, Style> {
    let mut styles = HashMap::new();
    compute_node_styles(tree, tree.root(), stylesheet, None, viewport, matching, &mut styles);
    styles
}

/// Recursively compute styles for a node and its children.
fn compute_node_styles(
    tree: &DomTree,
    id: NodeId,
    stylesheet: &Stylesheet,
    parent: Option<&Style>,
    viewport: Viewport,
    matching: &MatchContext<'_>,
    styles: &mut HashMap<NodeId, Style>,
) {
    let Some(node) = tree.get(id) else { return };

    match &node.node_type {
        NodeType::Element(_) => {
            let ctx = StyleContext {
                parent,
                viewport,
                matching: *matching,
            };
            let computed = resolve_style(stylesheet, tree, id, &ctx);
            for &child in tree.children(id) {
                compute_node_styles(
                    tree,
                    child,
                    stylesheet,
                    Some(&computed),
                    viewport,
                    matching,
                    styles,
                );
            }
            let _ = styles.insert(id, computed);
        }
        NodeType::Document => {
            for &child in tree.children(id) {
                compute_node_styles(tree, child, stylesheet, parent, viewport, matching, styles);
            }
        }
        NodeType::Text(_) | NodeType::Comment(_) => {}
    }
}
