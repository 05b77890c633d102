//! Shorthand expansion.
//!
//! [§ 1.2.1 Shorthand properties](https://www.w3.org/TR/css-cascade-4/#shorthand)
//!
//! "Some properties are shorthand properties, meaning that they allow authors
//! to specify the values of several properties with a single property."
//!
//! Shorthands are expanded into their longhands as soon as a declaration is
//! parsed, so the cascade only ever compares longhands. Each longhand keeps
//! the shorthand's `!important` flag. A shorthand whose value cannot be
//! understood expands to nothing.

use crate::style::ListStyleType;
use crate::style::values::{ColorValue, parse_border_shorthand, parse_font_shorthand};

use super::Declaration;

const SIDES: [&str; 4] = ["top", "right", "bottom", "left"];
const CORNERS: [&str; 4] = ["top-left", "top-right", "bottom-right", "bottom-left"];

/// Expand `declaration` into longhand declarations.
///
/// Longhands and unknown properties come back unchanged.
#[must_use]
pub fn expand_shorthand(declaration: Declaration) -> Vec<Declaration> {
    let Declaration {
        name,
        value,
        important,
    } = declaration;
    let value = value.as_str();
    let longhand = move |name: String, value: &str| Declaration {
        name,
        value: value.to_string(),
        important,
    };

    match name.as_str() {
        "margin" | "padding" => box_sides(value)
            .map(|sides| {
                SIDES
                    .iter()
                    .zip(sides)
                    .map(|(side, v)| longhand(format!("{name}-{side}"), v))
                    .collect()
            })
            .unwrap_or_default(),

        "border-width" | "border-style" | "border-color" => {
            let Some((_, part)) = name.split_once('-') else {
                return Vec::new();
            };
            box_sides(value)
                .map(|sides| {
                    SIDES
                        .iter()
                        .zip(sides)
                        .map(|(side, v)| longhand(format!("border-{side}-{part}"), v))
                        .collect()
                })
                .unwrap_or_default()
        }

        "border-radius" => {
            // Elliptical radii after `/` are not supported; the horizontal
            // radii are used for both axes.
            let horizontal = value.split('/').next().unwrap_or_default();
            box_sides(horizontal)
                .map(|corners| {
                    CORNERS
                        .iter()
                        .zip(corners)
                        .map(|(corner, v)| longhand(format!("border-{corner}-radius"), v))
                        .collect()
                })
                .unwrap_or_default()
        }

        // [§ 4.4 'border' shorthands](https://www.w3.org/TR/css-backgrounds-3/#border-shorthands)
        // "Omitted values are set to their initial values."
        "border" | "border-top" | "border-right" | "border-bottom" | "border-left" => {
            let border = parse_border_shorthand(value);
            let sides: &[&str] = match name.strip_prefix("border-") {
                Some(side) => &[side],
                None => &SIDES,
            };
            let mut expanded = Vec::with_capacity(sides.len() * 3);
            for side in sides {
                expanded.push(longhand(
                    format!("border-{side}-width"),
                    border.width.as_deref().unwrap_or("0"),
                ));
                expanded.push(longhand(
                    format!("border-{side}-style"),
                    border.style.as_deref().unwrap_or("none"),
                ));
                expanded.push(longhand(
                    format!("border-{side}-color"),
                    border.color.as_deref().unwrap_or("currentcolor"),
                ));
            }
            expanded
        }

        // [§ 3.10 'background'](https://www.w3.org/TR/css-backgrounds-3/#background)
        "background" => {
            let mut expanded = Vec::new();
            for part in split_outside_parens(value) {
                if part.starts_with("url(") || part.eq_ignore_ascii_case("none") {
                    expanded.push(longhand("background-image".into(), part));
                } else if ColorValue::parse(part).is_some() {
                    expanded.push(longhand("background-color".into(), part));
                }
            }
            expanded
        }

        // [§ 6 'list-style'](https://www.w3.org/TR/css-lists-3/#list-style-property)
        // Position and image components are not rendered and are skipped.
        "list-style" => value
            .split_whitespace()
            .find(|token| ListStyleType::parse(token).is_some())
            .map(|token| vec![longhand("list-style-type".into(), token)])
            .unwrap_or_default(),

        // [§ 3.7 'font'](https://www.w3.org/TR/css-fonts-4/#font-prop)
        "font" => parse_font_shorthand(value)
            .map(|font| {
                vec![
                    longhand("font-style".into(), &font.style),
                    longhand("font-variant".into(), &font.variant),
                    longhand("font-weight".into(), &font.weight),
                    longhand("font-size".into(), &font.size),
                    longhand("line-height".into(), &font.line_height),
                    longhand("font-family".into(), &font.family),
                ]
            })
            .unwrap_or_default(),

        _ => vec![Declaration {
            name,
            value: value.to_string(),
            important,
        }],
    }
}

/// The 1-to-4 value box notation: `top [right [bottom [left]]]`, with
/// missing sides copied from their opposite.
fn box_sides(value: &str) -> Option<[&str; 4]> {
    match *value.split_whitespace().collect::<Vec<_>>().as_slice() {
        [all] => Some([all, all, all, all]),
        [vertical, horizontal] => Some([vertical, horizontal, vertical, horizontal]),
        [top, horizontal, bottom] => Some([top, horizontal, bottom, horizontal]),
        [top, right, bottom, left] => Some([top, right, bottom, left]),
        _ => None,
    }
}

/// Split on whitespace that is not inside parentheses, so `url(a b.png)`
/// stays one part.
fn split_outside_parens(value: &str) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut depth = 0usize;
    let mut start = None;

    for (i, c) in value.char_indices() {
        match c {
            '(' => depth += 1,
            ')' => depth = depth.saturating_sub(1),
            c if c.is_whitespace() && depth == 0 => {
                if let Some(s) = start.take() {
                    parts.push(&value[s..i]);
                }
                continue;
            }
            _ => {}
        }
        if start.is_none() {
            start = Some(i);
        }
    }
    if let Some(s) = start {
        parts.push(&value[s..]);
    }
    parts
}
