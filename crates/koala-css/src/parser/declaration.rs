//! Declaration-level helpers shared by the stylesheet parser and the
//! `style` attribute.

use super::Declaration;
use super::shorthand::expand_shorthand;

const IMPORTANT: &str = "!important";

/// [§ 6.4.2 Important declarations](https://www.w3.org/TR/css-cascade-4/#importance)
///
/// Split a trailing, case-insensitive `!important` off a value.
///
/// The marker may be glued to the value (`red!important`) or separated by
/// whitespace. Returns the trimmed value and whether the marker was present.
#[must_use]
pub fn strip_important(value: &str) -> (&str, bool) {
    let trimmed = value.trim();
    let split = trimmed.len().checked_sub(IMPORTANT.len());
    match split {
        Some(at)
            if trimmed.is_char_boundary(at)
                && trimmed[at..].eq_ignore_ascii_case(IMPORTANT) =>
        {
            (trimmed[..at].trim_end(), true)
        }
        _ => (trimmed, false),
    }
}

/// Parse the body of a `style` attribute (`color: red; margin: 0 auto`).
///
/// Parts are split on `;` and each part on its first `:`. Parts without a
/// colon or with an empty property name are dropped. Shorthands are expanded
/// the same way the stylesheet parser expands them.
#[must_use]
pub fn parse_declaration_block(text: &str) -> Vec<Declaration> {
    text.split(';')
        .filter_map(|part| {
            let (name, value) = part.split_once(':')?;
            let name = name.trim();
            if name.is_empty() {
                return None;
            }
            Some(Declaration::new(name, value))
        })
        .flat_map(expand_shorthand)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_important_variants() {
        assert_eq!(strip_important("red !important"), ("red", true));
        assert_eq!(strip_important("red!important"), ("red", true));
        assert_eq!(strip_important("  red !IMPORTANT "), ("red", true));
        assert_eq!(strip_important("red"), ("red", false));
        assert_eq!(strip_important("!important"), ("", true));
    }

    #[test]
    fn test_parse_declaration_block() {
        let decls = parse_declaration_block("color: red; ; bogus; :x; Margin : 0 auto !important");
        assert_eq!(decls.len(), 5);
        assert_eq!(decls[0].name, "color");
        assert_eq!(decls[0].value, "red");
        assert_eq!(decls[2].name, "margin-right");
        assert_eq!(decls[2].value, "auto");
        assert!(decls[1..].iter().all(|d| d.important));
    }

    #[test]
    fn test_value_keeps_colons_after_first() {
        let decls = parse_declaration_block("background: url(http://x/y.png)");
        assert_eq!(decls[0].name, "background-image");
        assert_eq!(decls[0].value, "url(http://x/y.png)");
    }
}
