//! CSS parsing, selector matching, cascade, and box layout for the Koala renderer.
//!
//! # Scope
//!
//! This crate implements:
//! - **CSS Parser** ([§ 5 Parsing](https://www.w3.org/TR/css-syntax-3/#parsing))
//!   - Lenient recursive-descent stylesheet parsing
//!   - `!important` and shorthand expansion into longhands
//!   - Inline `style` attribute declaration blocks
//!
//! - **CSS Selectors** ([Selectors Level 4](https://www.w3.org/TR/selectors-4/))
//!   - Type, class, ID, and universal selectors
//!   - Descendant combinators
//!   - `:link` and `:visited`
//!   - Specificity calculation
//!
//! - **CSS Cascade** ([CSS Cascading Level 4](https://www.w3.org/TR/css-cascade-4/))
//!   - Importance, style attribute, specificity, then document order
//!   - User-agent defaults for headings, paragraphs, lists and links
//!   - Two-pass resolution so `em` follows the element's own font size
//!
//! - **Layout** ([CSS 2.1 Visual Formatting Model](https://www.w3.org/TR/CSS2/visuren.html))
//!   - Block and inline flow with greedy text wrapping
//!   - Floats, absolute and fixed positioning
//!   - Tables with `colspan`, `rowspan` and shrink-to-fit columns
//!
//! # Not Implemented
//!
//! - Child, sibling and attribute selectors
//! - At-rules, comments and media queries
//! - Text flowing around floats
//! - `<thead>`/`<tfoot>` reordering

/// CSS cascade and style computation per [CSS Cascading Level 4](https://www.w3.org/TR/css-cascade-4/).
pub mod cascade;
/// Box tree and layout algorithms per [CSS 2.1 § 9](https://www.w3.org/TR/CSS2/visuren.html).
pub mod layout;
/// CSS parser per [§ 5 Parsing](https://www.w3.org/TR/css-syntax-3/#parsing).
pub mod parser;
/// CSS selector matching per [Selectors Level 4](https://www.w3.org/TR/selectors-4/).
pub mod selector;
/// Computed style representation per [CSS Cascading Level 4](https://www.w3.org/TR/css-cascade-4/).
pub mod style;

// Re-exports for convenience
pub use cascade::{StyleContext, compute_styles, parse_inline_style, resolve_style};
pub use layout::{
    ApproximateMeasurer, BoxId, BoxType, EdgeSizes, LayoutBox, LayoutContext, LayoutTree, Rect,
    TextMeasurer, compute_layout,
};
pub use parser::{CSSParser, Declaration, Rule, Stylesheet, parse_declaration_block};
pub use selector::{MatchContext, Selector, Specificity};
pub use style::{ColorValue, DEFAULT_FONT_SIZE_PX, ResolveContext, Style, Viewport};
