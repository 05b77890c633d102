//! CSS Font value parsing
//!
//! [CSS Fonts Module Level 4](https://www.w3.org/TR/css-fonts-4/)

use super::length::{
    DEFAULT_FONT_SIZE_PX, LengthValue, Viewport, parse_font_size, parse_line_height, parse_number,
};

/// [§ 3.1 font-family](https://www.w3.org/TR/css-fonts-4/#font-family-prop)
///
/// Split a family list on commas, honoring single and double quotes.
/// `"Helvetica Neue", Arial, sans-serif` gives
/// `["Helvetica Neue", "Arial", "sans-serif"]`. Empty entries are skipped.
#[must_use]
pub fn parse_font_family(value: &str) -> Vec<String> {
    let mut families = Vec::new();
    let mut current = String::new();
    let mut quote: Option<char> = None;

    for c in value.chars() {
        match (quote, c) {
            (None, '"' | '\'') => quote = Some(c),
            (Some(q), c) if c == q => quote = None,
            (None, ',') => {
                push_family(&mut families, &current);
                current.clear();
            }
            _ => current.push(c),
        }
    }
    push_family(&mut families, &current);
    families
}

fn push_family(families: &mut Vec<String>, name: &str) {
    let name = name.trim();
    if !name.is_empty() {
        families.push(name.to_string());
    }
}

/// [§ 3.2 font-weight](https://www.w3.org/TR/css-fonts-4/#font-weight-prop)
///
/// Returns whether the weight renders bold. Numeric weights must be a
/// multiple of 100 in `100..=900`; 600 and above count as bold.
#[must_use]
pub fn parse_font_weight(value: &str) -> Option<bool> {
    let value = value.trim().to_ascii_lowercase();
    match value.as_str() {
        "normal" | "lighter" => Some(false),
        "bold" | "bolder" => Some(true),
        number => {
            let weight: u16 = number.parse().ok()?;
            ((100..=900).contains(&weight) && weight % 100 == 0).then_some(weight >= 600)
        }
    }
}

/// [§ 3.3 font-style](https://www.w3.org/TR/css-fonts-4/#font-style-prop)
///
/// `italic` and `oblique` are both rendered italic.
#[must_use]
pub fn parse_font_style(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "normal" => Some(false),
        "italic" | "oblique" => Some(true),
        _ => None,
    }
}

/// The longhands of a `font` shorthand, as raw values.
///
/// Components the shorthand omits hold their initial value `normal`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FontShorthand {
    /// `font-style`
    pub style: String,
    /// `font-variant`
    pub variant: String,
    /// `font-weight`
    pub weight: String,
    /// `font-size`
    pub size: String,
    /// `line-height`
    pub line_height: String,
    /// `font-family`
    pub family: String,
}

const ABSOLUTE_SIZES: [&str; 9] = [
    "xx-small", "x-small", "small", "medium", "large", "x-large", "xx-large", "larger", "smaller",
];

/// A bare number is a weight here, never a size.
fn is_font_size(token: &str) -> bool {
    ABSOLUTE_SIZES.contains(&token)
        || (LengthValue::parse(token).is_some() && parse_number(token).is_none())
}

/// [§ 3.7 font](https://www.w3.org/TR/css-fonts-4/#font-prop)
///
/// `[ <font-style> || <font-variant-css2> || <font-weight> ]?
/// <font-size> [ / <line-height> ]? <font-family>`
///
/// Returns `None` when the value does not fit the grammar; a malformed
/// shorthand contributes nothing.
#[must_use]
pub fn parse_font_shorthand(value: &str) -> Option<FontShorthand> {
    let tokens: Vec<&str> = value.split_whitespace().collect();
    let normal = || "normal".to_string();
    let mut style = None;
    let mut variant = None;
    let mut weight = None;

    let mut index = 0;
    let size_token = loop {
        let token = *tokens.get(index)?;
        index += 1;
        let lower = token.to_ascii_lowercase();
        let (size_part, _) = lower.split_once('/').unwrap_or((lower.as_str(), ""));
        if is_font_size(size_part) {
            break lower;
        }
        match lower.as_str() {
            // `normal` may stand for any of the three; it is already the default.
            "normal" => {}
            "italic" | "oblique" if style.is_none() => style = Some(lower.clone()),
            "small-caps" if variant.is_none() => variant = Some(lower.clone()),
            w if weight.is_none() && parse_font_weight(w).is_some() => weight = Some(lower.clone()),
            _ => return None,
        }
    };

    let (size, mut line_height) = match size_token.split_once('/') {
        Some((size, lh)) => (size.to_string(), Some(lh.to_string())),
        None => (size_token, None),
    };

    // `18px / 1.5` and `18px /1.5`
    if line_height.is_none()
        && let Some(next) = tokens.get(index).and_then(|t| t.strip_prefix('/'))
    {
        index += 1;
        if next.is_empty() {
            line_height = Some((*tokens.get(index)?).to_string());
            index += 1;
        } else {
            line_height = Some(next.to_string());
        }
    }
    if line_height.as_deref() == Some("") {
        return None;
    }

    let family = tokens.get(index..)?.join(" ");
    if parse_font_family(&family).is_empty() {
        return None;
    }

    // The sign of a size or line-height does not depend on its context.
    let viewport = Viewport::default();
    if parse_font_size(&size, DEFAULT_FONT_SIZE_PX, viewport).is_none()
        || line_height
            .as_deref()
            .is_some_and(|lh| parse_line_height(lh, DEFAULT_FONT_SIZE_PX, viewport).is_none())
    {
        return None;
    }

    Some(FontShorthand {
        style: style.unwrap_or_else(normal),
        variant: variant.unwrap_or_else(normal),
        weight: weight.unwrap_or_else(normal),
        size,
        line_height: line_height.unwrap_or_else(normal),
        family,
    })
}
