//! CSS parser.
//!
//! [§ 5 Parsing](https://www.w3.org/TR/css-syntax-3/#parsing)
//!
//! A lenient recursive-descent parser over raw stylesheet text. The grammar
//! it understands is deliberately small:
//!
//! ```text
//! stylesheet   = rule*
//! rule         = selector-list '{' declaration* '}'
//! selector-list = selector (',' selector)*
//! selector     = simple (' ' simple)*
//! simple       = tag? ('#' id)? ('.' class)* (':' pseudo-class)?
//! declaration  = property ':' value ('!important')? ';'?
//! ```
//!
//! Anything else is skipped, never rejected.

mod css_parser;
mod declaration;
mod shorthand;

pub use css_parser::CSSParser;
pub use declaration::{parse_declaration_block, strip_important};
pub use shorthand::expand_shorthand;

use crate::selector::Selector;

/// [§ 5.4.4 Consume a declaration](https://www.w3.org/TR/css-syntax-3/#consume-a-declaration)
///
/// A CSS declaration (e.g., `color: red !important`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Declaration {
    /// The property name, lower-cased.
    pub name: String,
    /// The raw value text with any `!important` suffix removed.
    pub value: String,
    /// Whether the declaration carried `!important`.
    pub important: bool,
}

impl Declaration {
    /// Build a declaration from a property name and a raw value, splitting
    /// off a trailing `!important`.
    #[must_use]
    pub fn new(name: &str, raw_value: &str) -> Self {
        let (value, important) = strip_important(raw_value);
        Self {
            name: name.trim().to_ascii_lowercase(),
            value: value.to_string(),
            important,
        }
    }
}

/// [§ 5.4.3 Consume a qualified rule](https://www.w3.org/TR/css-syntax-3/#consume-a-qualified-rule)
///
/// A style rule: if any selector matches, the declarations apply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rule {
    /// Selector alternatives, from the comma-separated list.
    pub selectors: Vec<Selector>,
    /// Declarations in source order.
    pub declarations: Vec<Declaration>,
}

/// A parsed stylesheet. Rule order is significant for the cascade.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Stylesheet {
    /// Rules in source order.
    pub rules: Vec<Rule>,
}

impl Stylesheet {
    /// Parse stylesheet text. Never fails; unparseable parts are dropped.
    #[must_use]
    pub fn parse(css: &str) -> Self {
        CSSParser::new(css).parse_stylesheet()
    }
}
