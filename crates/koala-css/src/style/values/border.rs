//! CSS Border values
//!
//! [CSS Backgrounds and Borders Level 3](https://www.w3.org/TR/css-backgrounds-3/)

use std::str::FromStr;

use serde::Serialize;
use strum_macros::{AsRefStr, Display, EnumString};

use super::color::ColorValue;
use super::length::{LengthValue, Viewport};

/// [§ 4.2 'border-style'](https://www.w3.org/TR/css-backgrounds-3/#border-style)
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Display, EnumString, AsRefStr,
)]
#[strum(serialize_all = "kebab-case", ascii_case_insensitive)]
#[serde(rename_all = "kebab-case")]
pub enum BorderStyle {
    /// "No border. Color and width are ignored."
    #[default]
    None,
    /// "Same as 'none', but has different behavior in the border conflict
    /// resolution for border-collapsed tables."
    Hidden,
    /// "A series of round dots."
    Dotted,
    /// "A series of square-ended dashes."
    Dashed,
    /// "A single line segment."
    Solid,
    /// "Two parallel solid lines with some space between them."
    Double,
    /// "Looks as if it were carved in the canvas."
    Groove,
    /// "Looks as if it were coming out of the canvas."
    Ridge,
    /// "Looks as if the content on the inside of the border is sunken into
    /// the canvas."
    Inset,
    /// "Looks as if the content on the inside of the border is coming out
    /// of the canvas."
    Outset,
}

impl BorderStyle {
    /// Parse a border-style keyword.
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        Self::from_str(value.trim()).ok()
    }
}

/// One side of a box's border.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct BorderSide {
    /// [§ 4.3 'border-width'](https://www.w3.org/TR/css-backgrounds-3/#border-width), in px.
    pub width: f32,
    /// [§ 4.2 'border-style'](https://www.w3.org/TR/css-backgrounds-3/#border-style)
    pub style: BorderStyle,
    /// [§ 4.1 'border-color'](https://www.w3.org/TR/css-backgrounds-3/#border-color)
    ///
    /// `None` is `currentcolor`.
    pub color: Option<ColorValue>,
}

/// [§ 5.1 'border-radius'](https://www.w3.org/TR/css-backgrounds-3/#border-radius)
///
/// Per-corner radii in px.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct BorderRadius {
    /// `border-top-left-radius`
    pub top_left: f32,
    /// `border-top-right-radius`
    pub top_right: f32,
    /// `border-bottom-right-radius`
    pub bottom_right: f32,
    /// `border-bottom-left-radius`
    pub bottom_left: f32,
}

/// [§ 4.3 'border-width'](https://www.w3.org/TR/css-backgrounds-3/#border-width)
///
/// "The lengths corresponding to 'thin', 'medium' and 'thick' are not specified,
/// but the values are constant throughout a document and thin ≤ medium ≤ thick."
/// Here they are 1, 3 and 5. Negative widths are rejected.
#[must_use]
pub fn parse_border_width(value: &str, em_base: f32, viewport: Viewport) -> Option<f32> {
    let value = value.trim();
    let width = match value.to_ascii_lowercase().as_str() {
        "thin" => 1.0,
        "medium" => 3.0,
        "thick" => 5.0,
        _ => LengthValue::parse(value)?.to_px(em_base, viewport)?,
    };
    (width >= 0.0).then_some(width)
}

/// Components found by scanning a `border` shorthand, as raw values.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BorderShorthand {
    /// The width token, if any.
    pub width: Option<String>,
    /// The style token, if any.
    pub style: Option<String>,
    /// The color token, if any.
    pub color: Option<String>,
}

/// [§ 4.4 'border' shorthands](https://www.w3.org/TR/css-backgrounds-3/#border-shorthands)
///
/// `<line-width> || <line-style> || <color>` in any order. Unrecognized
/// tokens are skipped.
#[must_use]
pub fn parse_border_shorthand(value: &str) -> BorderShorthand {
    let mut border = BorderShorthand::default();
    for token in value.split_whitespace() {
        if border.width.is_none() && parse_border_width(token, 16.0, Viewport::default()).is_some()
        {
            border.width = Some(token.to_string());
        } else if border.style.is_none() && BorderStyle::parse(token).is_some() {
            border.style = Some(token.to_string());
        } else if border.color.is_none() && ColorValue::parse(token).is_some() {
            border.color = Some(token.to_string());
        }
    }
    border
}
