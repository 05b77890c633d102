//! Layout boxes and box-tree construction.
//!
//! [§ 9.2 Controlling box generation](https://www.w3.org/TR/CSS2/visuren.html#box-gen)
//!
//! The box tree is an arena: boxes refer to their parent and children by
//! [`BoxId`], so ancestor queries ("am I inside `<pre>`?") need no owning
//! back-pointers. Construction fixes the shape once; layout only writes
//! geometry.

use std::collections::HashMap;
use std::ops::{Index, IndexMut};

use koala_dom::{DomTree, ElementData, NodeId, NodeType};
use serde::Serialize;
use strum_macros::{AsRefStr, Display};

use super::box_model::{EdgeSizes, Rect};
use crate::style::{DisplayValue, Style};

/// A type-safe index into a [`LayoutTree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct BoxId(pub usize);

/// [§ 9.2 Controlling box generation](https://www.w3.org/TR/CSS2/visuren.html#box-gen)
///
/// "The following sections describe the types of boxes that may be generated
/// in CSS 2.1. A box's type affects, in part, its behavior in the visual
/// formatting model."
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Display, AsRefStr)]
#[strum(serialize_all = "kebab-case")]
#[serde(rename_all = "kebab-case")]
pub enum BoxType {
    /// Block container in normal flow.
    Block,
    /// Non-replaced inline box (`<span>`, `<a>`, ...).
    Inline,
    /// [§ 2.5 Text Runs](https://www.w3.org/TR/css-display-3/#text-nodes)
    /// "A text run is the most basic box generated."
    Text,
    /// `<img>`
    Image,
    /// Single-line text `<input>`.
    Input,
    /// `<input type=radio>`
    Radio,
    /// `<input type=checkbox>`
    Checkbox,
    /// `<button>` and button-like inputs.
    Button,
    /// `<textarea>`
    Textarea,
    /// `<select>`
    Select,
    /// `<input type=file>`
    FileInput,
    /// `<hr>`
    Rule,
    /// `<br>`
    LineBreak,
    /// [§ 17.2 The CSS table model](https://www.w3.org/TR/CSS2/tables.html#table-display)
    Table,
    /// `<thead>`, `<tbody>` or `<tfoot>`.
    TableRowGroup,
    /// `<tr>`
    TableRow,
    /// `<td>` or `<th>`
    TableCell,
    /// `<caption>`
    TableCaption,
    /// `<col>`
    TableColumn,
    /// `<colgroup>`
    TableColumnGroup,
    /// `<fieldset>`
    Fieldset,
    /// `<legend>`
    Legend,
}

impl BoxType {
    /// Whether boxes of this type sit on a line with their siblings.
    #[must_use]
    pub const fn is_inline_level(self) -> bool {
        matches!(
            self,
            Self::Inline
                | Self::Text
                | Self::Image
                | Self::Input
                | Self::Radio
                | Self::Checkbox
                | Self::Button
                | Self::Textarea
                | Self::Select
                | Self::FileInput
        )
    }
}

/// A node in the layout tree.
///
/// Stores the computed style from the cascade alongside the used geometry
/// written by layout.
#[derive(Debug, Clone)]
pub struct LayoutBox {
    /// What kind of box this is.
    pub box_type: BoxType,
    /// The generating DOM node. `None` for boxes built by hand.
    pub node: Option<NodeId>,
    /// The generating element's tag and attributes. `None` for text boxes
    /// and the document box.
    pub element: Option<ElementData>,
    /// Computed style. Text boxes carry their parent element's style.
    pub style: Style,
    /// Character data of a text box.
    pub text: Option<String>,
    /// Non-owning link to the parent box.
    pub parent: Option<BoxId>,
    /// Children in document order.
    pub children: Vec<BoxId>,
    /// Position and size. For blocks this is the margin box.
    pub rect: Rect,
    /// Used margins.
    pub margin: EdgeSizes,
    /// Used padding.
    pub padding: EdgeSizes,
    /// Text after line breaking, one entry per line.
    pub wrapped_lines: Vec<String>,
    /// The `border` attribute of the enclosing table, on cells.
    pub table_border: u32,
}

impl LayoutBox {
    /// A detached box with default style and no content.
    #[must_use]
    pub fn new(box_type: BoxType) -> Self {
        Self {
            box_type,
            node: None,
            element: None,
            style: Style::default(),
            text: None,
            parent: None,
            children: Vec::new(),
            rect: Rect::default(),
            margin: EdgeSizes::default(),
            padding: EdgeSizes::default(),
            wrapped_lines: Vec::new(),
            table_border: 0,
        }
    }

    /// A detached box for `element` with the given style.
    #[must_use]
    pub fn for_element(box_type: BoxType, element: ElementData, style: Style) -> Self {
        Self {
            element: Some(element),
            style,
            ..Self::new(box_type)
        }
    }

    /// A detached text box.
    #[must_use]
    pub fn text(text: &str, style: Style) -> Self {
        Self {
            text: Some(text.to_string()),
            style,
            ..Self::new(BoxType::Text)
        }
    }

    /// The generating element's tag name, or `""`.
    #[must_use]
    pub fn tag(&self) -> &str {
        self.element.as_ref().map_or("", |e| e.tag_name.as_str())
    }

    /// Look up an attribute of the generating element.
    #[must_use]
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.element.as_ref().and_then(|e| e.attr(name))
    }

    /// Absolutely or fixed positioned boxes are taken out of the flow.
    #[must_use]
    pub const fn is_out_of_flow(&self) -> bool {
        self.style.position.is_out_of_flow()
    }
}

/// Arena of layout boxes. The root box is always at index 0.
#[derive(Debug, Clone)]
pub struct LayoutTree {
    boxes: Vec<LayoutBox>,
}

impl LayoutTree {
    /// A tree holding just `root`.
    #[must_use]
    pub fn new(root: LayoutBox) -> Self {
        Self {
            boxes: vec![LayoutBox {
                parent: None,
                children: Vec::new(),
                ..root
            }],
        }
    }

    /// The root box.
    #[must_use]
    pub const fn root(&self) -> BoxId {
        BoxId(0)
    }

    /// Number of boxes in the tree.
    #[must_use]
    pub fn len(&self) -> usize {
        self.boxes.len()
    }

    /// Always `false`; a tree has at least its root.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.boxes.is_empty()
    }

    /// Get a box by id.
    #[must_use]
    pub fn get(&self, id: BoxId) -> Option<&LayoutBox> {
        self.boxes.get(id.0)
    }

    /// Append `child` as the last child of `parent` and return its id.
    pub fn append(&mut self, parent: BoxId, child: LayoutBox) -> BoxId {
        let id = BoxId(self.boxes.len());
        self.boxes.push(LayoutBox {
            parent: Some(parent),
            children: Vec::new(),
            ..child
        });
        if let Some(parent_box) = self.boxes.get_mut(parent.0) {
            parent_box.children.push(id);
        }
        id
    }

    /// Children of `id` in document order.
    #[must_use]
    pub fn children(&self, id: BoxId) -> &[BoxId] {
        self.get(id).map(|b| b.children.as_slice()).unwrap_or_default()
    }

    /// Ancestors of `id`, nearest first.
    pub fn ancestors(&self, id: BoxId) -> impl Iterator<Item = BoxId> + '_ {
        std::iter::successors(self.get(id).and_then(|b| b.parent), |&current| {
            self.get(current).and_then(|b| b.parent)
        })
    }

    /// All boxes with their ids, in allocation order.
    pub fn iter(&self) -> impl Iterator<Item = (BoxId, &LayoutBox)> {
        self.boxes.iter().enumerate().map(|(i, b)| (BoxId(i), b))
    }

    /// `id` and all its descendants, parents before children.
    #[must_use]
    pub fn subtree(&self, id: BoxId) -> Vec<BoxId> {
        let mut out = Vec::new();
        let mut stack = vec![id];
        while let Some(current) = stack.pop() {
            out.push(current);
            stack.extend(self.children(current).iter().rev().copied());
        }
        out
    }

    /// Move `id` and its whole subtree by `(dx, dy)`.
    pub fn translate_subtree(&mut self, id: BoxId, dx: f32, dy: f32) {
        for descendant in self.subtree(id) {
            self[descendant].rect.translate(dx, dy);
        }
    }

    /// Whether any ancestor of `id` was generated by an element with this tag.
    #[must_use]
    pub fn has_ancestor_tag(&self, id: BoxId, tag_name: &str) -> bool {
        self.ancestors(id).any(|a| self[a].tag() == tag_name)
    }

    /// [§ 9.2 Controlling box generation](https://www.w3.org/TR/CSS2/visuren.html#box-gen)
    ///
    /// Build the box tree for a styled document. The root box stands for the
    /// document node. Elements without an entry in `styles` get the default
    /// style.
    #[must_use]
    #[allow(clippy::implicit_hasher)]
    pub fn build(dom: &DomTree, styles: &HashMap<NodeId, Style>) -> Self {
        let mut root = LayoutBox::new(BoxType::Block);
        root.node = Some(dom.root());
        let mut tree = Self::new(root);
        let root_id = tree.root();
        let root_style = Style::default();
        for &child in dom.children(dom.root()) {
            tree.build_node(dom, styles, child, root_id, &root_style, false);
        }
        tracing::trace!(boxes = tree.len(), "built layout tree");
        tree
    }

    fn build_node(
        &mut self,
        dom: &DomTree,
        styles: &HashMap<NodeId, Style>,
        node_id: NodeId,
        parent: BoxId,
        parent_style: &Style,
        in_pre: bool,
    ) {
        let Some(node) = dom.get(node_id) else { return };
        match &node.node_type {
            // [§ 16.6.1 The 'white-space' processing model](https://www.w3.org/TR/CSS2/text.html#white-space-model)
            //
            // Whitespace-only text between blocks generates nothing, except
            // inside preformatted content.
            NodeType::Text(text) => {
                if !in_pre && text.trim().is_empty() {
                    return;
                }
                let mut text_box = LayoutBox::text(text, parent_style.clone());
                text_box.node = Some(node_id);
                let _ = self.append(parent, text_box);
            }
            NodeType::Element(element) => {
                let style = styles.get(&node_id).cloned().unwrap_or_default();
                // [§ 2.6 display: none](https://www.w3.org/TR/css-display-3/#valdef-display-none)
                // "The element and its descendants generate no boxes or text runs."
                if style.is_display_none() {
                    return;
                }
                let Some(box_type) = box_type_for(element, style.display) else {
                    return;
                };
                let mut layout_box = LayoutBox::for_element(box_type, element.clone(), style);
                layout_box.node = Some(node_id);
                let id = self.append(parent, layout_box);

                let in_pre = in_pre || element.is("pre");
                let style = self[id].style.clone();
                for &child in dom.children(node_id) {
                    self.build_node(dom, styles, child, id, &style, in_pre);
                }
            }
            NodeType::Document | NodeType::Comment(_) => {}
        }
    }
}

impl Index<BoxId> for LayoutTree {
    type Output = LayoutBox;

    fn index(&self, id: BoxId) -> &LayoutBox {
        &self.boxes[id.0]
    }
}

impl IndexMut<BoxId> for LayoutTree {
    fn index_mut(&mut self, id: BoxId) -> &mut LayoutBox {
        &mut self.boxes[id.0]
    }
}

/// [§ 15.3.1 Hidden elements](https://html.spec.whatwg.org/multipage/rendering.html#hidden-elements)
///
/// "The following elements must have their display set to none"
const HIDDEN_ELEMENTS: &[&str] = &[
    "area", "base", "basefont", "datalist", "head", "link", "meta", "noembed", "noframes",
    "param", "rp", "script", "style", "template", "title",
];

/// [§ 15.3.3 Flow content](https://html.spec.whatwg.org/multipage/rendering.html#flow-content-3)
const BLOCK_ELEMENTS: &[&str] = &[
    "address",
    "article",
    "aside",
    "blockquote",
    "body",
    "center",
    "dd",
    "details",
    "dialog",
    "dir",
    "div",
    "dl",
    "dt",
    "figcaption",
    "figure",
    "footer",
    "form",
    "h1",
    "h2",
    "h3",
    "h4",
    "h5",
    "h6",
    "header",
    "hgroup",
    "html",
    "li",
    "listing",
    "main",
    "menu",
    "nav",
    "ol",
    "p",
    "plaintext",
    "pre",
    "search",
    "section",
    "summary",
    "ul",
    "xmp",
];

/// Returns the default display value for an HTML element, or `None` for
/// elements that are never rendered.
#[must_use]
pub fn default_display_for_element(tag_name: &str) -> Option<DisplayValue> {
    if HIDDEN_ELEMENTS.contains(&tag_name) {
        return None;
    }
    let display = match tag_name {
        "table" => DisplayValue::Table,
        "thead" => DisplayValue::TableHeaderGroup,
        "tbody" => DisplayValue::TableRowGroup,
        "tfoot" => DisplayValue::TableFooterGroup,
        "tr" => DisplayValue::TableRow,
        "td" | "th" => DisplayValue::TableCell,
        "caption" => DisplayValue::TableCaption,
        "col" => DisplayValue::TableColumn,
        "colgroup" => DisplayValue::TableColumnGroup,
        "input" | "button" | "textarea" | "select" => DisplayValue::InlineBlock,
        tag if BLOCK_ELEMENTS.contains(&tag) => DisplayValue::Block,
        _ => DisplayValue::Inline,
    };
    Some(display)
}

/// Pick the box type for an element. Replaced elements, form controls and
/// structural tags are decided by tag; everything else by `display`.
fn box_type_for(element: &ElementData, display: Option<DisplayValue>) -> Option<BoxType> {
    let by_tag = match element.tag_name.as_str() {
        "img" => BoxType::Image,
        // [§ 4.10.5 The input element](https://html.spec.whatwg.org/multipage/input.html#the-input-element)
        "input" => {
            let input_type = element.attr("type").unwrap_or("text").to_ascii_lowercase();
            match input_type.as_str() {
                "hidden" => return None,
                "radio" => BoxType::Radio,
                "checkbox" => BoxType::Checkbox,
                "file" => BoxType::FileInput,
                "button" | "submit" | "reset" => BoxType::Button,
                _ => BoxType::Input,
            }
        }
        "button" => BoxType::Button,
        "textarea" => BoxType::Textarea,
        "select" => BoxType::Select,
        "hr" => BoxType::Rule,
        "br" => BoxType::LineBreak,
        "fieldset" => BoxType::Fieldset,
        "legend" => BoxType::Legend,
        tag => {
            let display = display.or_else(|| default_display_for_element(tag))?;
            match display {
                DisplayValue::None => return None,
                DisplayValue::Table => BoxType::Table,
                DisplayValue::TableRowGroup
                | DisplayValue::TableHeaderGroup
                | DisplayValue::TableFooterGroup => BoxType::TableRowGroup,
                DisplayValue::TableRow => BoxType::TableRow,
                DisplayValue::TableCell => BoxType::TableCell,
                DisplayValue::TableCaption => BoxType::TableCaption,
                DisplayValue::TableColumn => BoxType::TableColumn,
                DisplayValue::TableColumnGroup => BoxType::TableColumnGroup,
                DisplayValue::Inline | DisplayValue::InlineBlock => BoxType::Inline,
                DisplayValue::Block | DisplayValue::ListItem => BoxType::Block,
            }
        }
    };
    Some(by_tag)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn element(tag: &str) -> ElementData {
        ElementData::new(tag)
    }

    #[test]
    fn test_box_type_by_tag() {
        assert_eq!(box_type_for(&element("img"), None), Some(BoxType::Image));
        assert_eq!(box_type_for(&element("td"), None), Some(BoxType::TableCell));
        assert_eq!(box_type_for(&element("tbody"), None), Some(BoxType::TableRowGroup));
        assert_eq!(box_type_for(&element("span"), None), Some(BoxType::Inline));
        assert_eq!(box_type_for(&element("li"), None), Some(BoxType::Block));
        assert_eq!(box_type_for(&element("script"), None), None);
    }

    #[test]
    fn test_input_types() {
        let input = |t: &str| element("input").with_attr("type", t);
        assert_eq!(box_type_for(&input("RADIO"), None), Some(BoxType::Radio));
        assert_eq!(box_type_for(&input("submit"), None), Some(BoxType::Button));
        assert_eq!(box_type_for(&input("file"), None), Some(BoxType::FileInput));
        assert_eq!(box_type_for(&input("hidden"), None), None);
        assert_eq!(box_type_for(&element("input"), None), Some(BoxType::Input));
    }

    #[test]
    fn test_display_overrides_tag_default() {
        assert_eq!(
            box_type_for(&element("span"), Some(DisplayValue::Block)),
            Some(BoxType::Block)
        );
        assert_eq!(
            box_type_for(&element("div"), Some(DisplayValue::Inline)),
            Some(BoxType::Inline)
        );
    }

    #[test]
    fn test_arena_links_and_translate() {
        let mut tree = LayoutTree::new(LayoutBox::new(BoxType::Block));
        let root = tree.root();
        let child = tree.append(root, LayoutBox::new(BoxType::Block));
        let grandchild = tree.append(child, LayoutBox::text("x", Style::default()));
        assert_eq!(tree.children(root), &[child]);
        assert_eq!(tree.ancestors(grandchild).collect::<Vec<_>>(), vec![child, root]);
        assert_eq!(tree.subtree(root), vec![root, child, grandchild]);

        tree.translate_subtree(child, 5.0, 7.0);
        assert_eq!(tree[grandchild].rect, Rect::new(5.0, 7.0, 0.0, 0.0));
        assert_eq!(tree[root].rect, Rect::default());
    }

    #[test]
    fn test_build_skips_whitespace_outside_pre() {
        let mut dom = DomTree::new();
        let body = dom.append_element(dom.root(), element("body"));
        let _ = dom.append_text(body, "   ");
        let pre = dom.append_element(body, element("pre"));
        let _ = dom.append_text(pre, "  ");
        let _ = dom.append_element(body, element("script"));

        let tree = LayoutTree::build(&dom, &HashMap::new());
        let body_box = tree.children(tree.root())[0];
        assert_eq!(tree[body_box].tag(), "body");
        assert_eq!(tree.children(body_box).len(), 1);
        let pre_box = tree.children(body_box)[0];
        assert_eq!(tree[tree.children(pre_box)[0]].box_type, BoxType::Text);
    }
}
