//! Recursive-descent stylesheet parser.

use super::shorthand::expand_shorthand;
use super::{Declaration, Rule, Stylesheet};
use crate::selector::Selector;

/// Character-level CSS parser.
///
/// Holds the input as a `char` buffer and a cursor. Every `parse_*` method
/// either consumes input or reports that there was nothing it could use, so
/// the outer loops always make progress on garbage.
pub struct CSSParser {
    input: Vec<char>,
    position: usize,
}

impl CSSParser {
    /// Create a parser over stylesheet text.
    #[must_use]
    pub fn new(css: &str) -> Self {
        Self {
            input: css.chars().collect(),
            position: 0,
        }
    }

    /// Parse the whole input into a [`Stylesheet`].
    ///
    /// Rules whose selector list came out empty are dropped since they can
    /// never match.
    pub fn parse_stylesheet(&mut self) -> Stylesheet {
        let mut rules = Vec::new();
        loop {
            self.skip_whitespace();
            if self.at_end() {
                break;
            }
            let rule = self.parse_rule();
            if !rule.selectors.is_empty() {
                rules.push(rule);
            }
        }
        Stylesheet { rules }
    }

    fn parse_rule(&mut self) -> Rule {
        let selectors = self.parse_selector_list();
        let declarations = self.parse_declaration_block();
        Rule {
            selectors,
            declarations,
        }
    }

    /// `selector (',' selector)*`, stopping at `{`.
    ///
    /// Characters that cannot start or continue a selector (`>`, `+`, `[`,
    /// stray `}` and so on) are skipped one at a time.
    fn parse_selector_list(&mut self) -> Vec<Selector> {
        let mut selectors = Vec::new();
        loop {
            if let Some(selector) = self.parse_selector() {
                selectors.push(selector);
            }
            self.skip_whitespace();
            match self.peek() {
                None | Some('{') => break,
                Some(_) => self.position += 1,
            }
        }
        selectors
    }

    /// Whitespace-separated simple selectors, folded into an ancestor chain
    /// whose rightmost part is the subject.
    fn parse_selector(&mut self) -> Option<Selector> {
        let mut parts = Vec::new();
        while let Some(part) = self.parse_simple_selector() {
            parts.push(part);

            // Whitespace followed by another simple selector is a descendant
            // combinator. Anything else ends this selector.
            let saved = self.position;
            self.skip_whitespace();
            match self.peek() {
                Some(c) if matches!(c, '#' | '.' | '*' | ':') || is_ident_char(c) => {}
                _ => {
                    self.position = saved;
                    break;
                }
            }
        }

        let mut parts = parts.into_iter();
        let mut chain = parts.next()?;
        for mut part in parts {
            part.ancestor = Some(Box::new(chain));
            chain = part;
        }
        Some(chain)
    }

    /// `tag? ('#' id)? ('.' class)* (':' pseudo)?` in any order.
    ///
    /// Returns `None` when nothing selector-like was consumed.
    fn parse_simple_selector(&mut self) -> Option<Selector> {
        self.skip_whitespace();
        let mut selector = Selector::default();
        let mut consumed = false;

        while let Some(c) = self.peek() {
            match c {
                '#' => {
                    self.position += 1;
                    let id = self.consume_identifier();
                    if !id.is_empty() {
                        selector.id = Some(id);
                    }
                }
                '.' => {
                    self.position += 1;
                    let class = self.consume_identifier();
                    if !class.is_empty() {
                        selector.classes.push(class);
                    }
                }
                '*' => self.position += 1,
                ':' => {
                    // `::before` is a pseudo-element; it is kept under the same
                    // name and simply never matches.
                    self.position += 1;
                    if self.peek() == Some(':') {
                        self.position += 1;
                    }
                    let pseudo = self.consume_identifier();
                    if !pseudo.is_empty() {
                        selector.pseudo_class = Some(pseudo.to_ascii_lowercase());
                    }
                }
                c if is_ident_char(c) => {
                    selector.tag_name = Some(self.consume_identifier().to_ascii_lowercase());
                }
                _ => break,
            }
            consumed = true;
        }

        consumed.then_some(selector)
    }

    /// `'{' declaration* '}'`. A missing `{` or `}` is tolerated.
    fn parse_declaration_block(&mut self) -> Vec<Declaration> {
        let mut declarations = Vec::new();
        self.skip_whitespace();
        if self.peek() == Some('{') {
            self.position += 1;
        }

        loop {
            self.skip_whitespace();
            match self.peek() {
                None => break,
                Some('}') => {
                    self.position += 1;
                    break;
                }
                Some(';') => self.position += 1,
                Some(_) => {
                    if let Some(declaration) = self.parse_declaration() {
                        declarations.extend(expand_shorthand(declaration));
                    }
                }
            }
        }
        declarations
    }

    /// `property ':' value`. The value runs to the next `;` or `}`.
    ///
    /// A declaration with no property name or no colon is consumed and
    /// dropped.
    fn parse_declaration(&mut self) -> Option<Declaration> {
        let name = self.consume_identifier();
        self.skip_whitespace();
        let has_colon = self.peek() == Some(':');
        if has_colon {
            self.position += 1;
        }
        let value = self.consume_value();
        if self.peek() == Some(';') {
            self.position += 1;
        }

        if name.is_empty() || !has_colon {
            return None;
        }
        Some(Declaration::new(&name, &value))
    }

    fn consume_identifier(&mut self) -> String {
        let start = self.position;
        while self.peek().is_some_and(is_ident_char) {
            self.position += 1;
        }
        self.input[start..self.position].iter().collect()
    }

    fn consume_value(&mut self) -> String {
        let start = self.position;
        while self.peek().is_some_and(|c| c != ';' && c != '}') {
            self.position += 1;
        }
        let raw: String = self.input[start..self.position].iter().collect();
        raw.trim().to_string()
    }

    fn skip_whitespace(&mut self) {
        while self.peek().is_some_and(char::is_whitespace) {
            self.position += 1;
        }
    }

    fn peek(&self) -> Option<char> {
        self.input.get(self.position).copied()
    }

    fn at_end(&self) -> bool {
        self.position >= self.input.len()
    }
}

/// Letters, digits, `-` and `_`.
fn is_ident_char(c: char) -> bool {
    c.is_alphanumeric() || c == '-' || c == '_'
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(css: &str) -> Stylesheet {
        CSSParser::new(css).parse_stylesheet()
    }

    #[test]
    fn test_empty_and_whitespace_input() {
        assert!(parse("").rules.is_empty());
        assert!(parse("   \n\t  ").rules.is_empty());
    }

    #[test]
    fn test_compound_simple_selector() {
        let sheet = parse("div.foo#bar.baz { color: blue; }");
        let selector = &sheet.rules[0].selectors[0];
        assert_eq!(selector.tag_name.as_deref(), Some("div"));
        assert_eq!(selector.id.as_deref(), Some("bar"));
        assert_eq!(selector.classes, vec!["foo", "baz"]);
        assert!(selector.ancestor.is_none());
    }

    #[test]
    fn test_declaration_without_colon_is_dropped() {
        let sheet = parse("p { color red; margin: 0 }");
        let names: Vec<_> = sheet.rules[0]
            .declarations
            .iter()
            .map(|d| d.name.as_str())
            .collect();
        assert_eq!(names, vec!["margin-top", "margin-right", "margin-bottom", "margin-left"]);
    }

    #[test]
    fn test_unterminated_block_keeps_declarations() {
        let sheet = parse("p { color: red");
        assert_eq!(sheet.rules.len(), 1);
        assert_eq!(sheet.rules[0].declarations[0].value, "red");
    }

    #[test]
    fn test_stray_closing_brace_is_skipped() {
        let sheet = parse("} p { color: red; }");
        assert_eq!(sheet.rules.len(), 1);
        assert_eq!(sheet.rules[0].selectors[0].tag_name.as_deref(), Some("p"));
    }

    #[test]
    fn test_universal_selector_is_empty() {
        let sheet = parse("* { color: red; }");
        assert_eq!(sheet.rules[0].selectors, vec![Selector::default()]);
    }
}
