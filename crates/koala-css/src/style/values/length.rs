//! CSS Length values and parsing
//!
//! [CSS Values and Units Level 4](https://www.w3.org/TR/css-values-4/)

use serde::Serialize;

/// User agent default font size.
/// [§ 3.5 font-size](https://www.w3.org/TR/css-fonts-4/#font-size-prop)
pub const DEFAULT_FONT_SIZE_PX: f32 = 16.0;

/// Viewport dimensions used to resolve `vw`/`vh`.
///
/// [§ 5.1.2 Viewport-percentage lengths](https://www.w3.org/TR/css-values-4/#viewport-relative-lengths)
/// "The viewport-percentage lengths are relative to the size of the
/// initial containing block."
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Viewport {
    /// Viewport width in px.
    pub width: f32,
    /// Viewport height in px.
    pub height: f32,
}

impl Viewport {
    /// Create a viewport of the given size.
    #[must_use]
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(800.0, 600.0)
    }
}

/// [§ 4.1 Lengths](https://www.w3.org/TR/css-values-4/#lengths)
/// "Lengths refer to distance measurements and are denoted by `<length>` in the
/// property definitions."
///
/// A parsed but unresolved length. Bare numbers parse as [`LengthValue::Px`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub enum LengthValue {
    /// [§ 6.1 Absolute lengths](https://www.w3.org/TR/css-values-4/#absolute-lengths)
    Px(f32),
    /// [§ 5.1.1 Font-relative lengths](https://www.w3.org/TR/css-values-4/#font-relative-lengths)
    /// "Equal to the computed value of the font-size property of the element"
    Em(f32),
    /// "1vw = 1% of viewport width"
    Vw(f32),
    /// "1vh = 1% of viewport height"
    Vh(f32),
    /// [§ 4.3 Percentages](https://www.w3.org/TR/css-values-4/#percentages)
    Percent(f32),
}

impl LengthValue {
    /// Parse a single length token such as `12px`, `1.5em`, `50%` or `10`.
    ///
    /// Units are case-insensitive. Returns `None` for anything else,
    /// including non-finite numbers.
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        let value = value.trim().to_ascii_lowercase();
        let (number, make): (&str, fn(f32) -> Self) = if let Some(n) = value.strip_suffix("px") {
            (n, Self::Px)
        } else if let Some(n) = value.strip_suffix("em") {
            (n, Self::Em)
        } else if let Some(n) = value.strip_suffix("vw") {
            (n, Self::Vw)
        } else if let Some(n) = value.strip_suffix("vh") {
            (n, Self::Vh)
        } else if let Some(n) = value.strip_suffix('%') {
            (n, Self::Percent)
        } else {
            (value.as_str(), Self::Px)
        };
        parse_number(number).map(make)
    }

    /// Resolve to px. Percentages have no base here and yield `None`.
    #[must_use]
    pub fn to_px(self, em_base: f32, viewport: Viewport) -> Option<f32> {
        match self {
            Self::Px(px) => Some(px),
            Self::Em(em) => Some(em * em_base),
            Self::Vw(vw) => Some(vw / 100.0 * viewport.width),
            Self::Vh(vh) => Some(vh / 100.0 * viewport.height),
            Self::Percent(_) => None,
        }
    }

    /// Resolve to px, taking percentages against `percent_base`.
    #[must_use]
    pub fn to_px_with_base(self, em_base: f32, viewport: Viewport, percent_base: f32) -> f32 {
        match self {
            Self::Percent(pct) => pct / 100.0 * percent_base,
            other => other.to_px(em_base, viewport).unwrap_or(0.0),
        }
    }
}

/// Parse a plain number, rejecting NaN and infinities.
#[must_use]
pub fn parse_number(value: &str) -> Option<f32> {
    value.trim().parse::<f32>().ok().filter(|n| n.is_finite())
}

/// Parse a non-percentage length and resolve it to px.
#[must_use]
pub fn parse_length(value: &str, em_base: f32, viewport: Viewport) -> Option<f32> {
    LengthValue::parse(value)?.to_px(em_base, viewport)
}

/// [§ 2.4 font-size](https://www.w3.org/TR/css-fonts-4/#font-size-prop)
///
/// Resolve a `font-size` value. Relative forms (`em`, `%`, `larger`,
/// `smaller`) are taken against the parent's font size. Non-positive results
/// are rejected.
#[must_use]
pub fn parse_font_size(value: &str, parent_font_size: f32, viewport: Viewport) -> Option<f32> {
    let keyword = value.trim().to_ascii_lowercase();
    let size = match keyword.as_str() {
        // [§ 2.4.1 absolute-size](https://www.w3.org/TR/css-fonts-4/#valdef-font-size-absolute-size)
        "xx-small" => DEFAULT_FONT_SIZE_PX * 0.6,
        "x-small" => DEFAULT_FONT_SIZE_PX * 0.75,
        "small" => DEFAULT_FONT_SIZE_PX * 0.89,
        "medium" => DEFAULT_FONT_SIZE_PX,
        "large" => DEFAULT_FONT_SIZE_PX * 1.2,
        "x-large" => DEFAULT_FONT_SIZE_PX * 1.5,
        "xx-large" => DEFAULT_FONT_SIZE_PX * 2.0,
        // [§ 2.4.2 relative-size](https://www.w3.org/TR/css-fonts-4/#valdef-font-size-relative-size)
        "larger" => parent_font_size * 1.2,
        "smaller" => parent_font_size / 1.2,
        _ => LengthValue::parse(&keyword)?.to_px_with_base(
            parent_font_size,
            viewport,
            parent_font_size,
        ),
    };
    (size > 0.0).then_some(size)
}

/// [§ 4.2 line-height](https://www.w3.org/TR/css-inline-3/#line-height-property)
///
/// Resolve `line-height` to px. `normal` is 1.2× the font size, a unitless
/// number multiplies the font size, and a percentage is of the font size.
#[must_use]
pub fn parse_line_height(value: &str, font_size: f32, viewport: Viewport) -> Option<f32> {
    let value = value.trim();
    if value.eq_ignore_ascii_case("normal") {
        return Some(font_size * 1.2);
    }
    if let Some(factor) = parse_number(value) {
        return (factor >= 0.0).then_some(factor * font_size);
    }
    let height = LengthValue::parse(value)?.to_px_with_base(font_size, viewport, font_size);
    (height >= 0.0).then_some(height)
}

/// Parse an HTML dimension attribute (`width="50%"`, `height="20"`).
///
/// Percentages are of `container`; `px` or a bare number are taken as-is.
/// Returns `None` unless the result is positive.
#[must_use]
pub fn parse_html_size(value: &str, container: f32) -> Option<f32> {
    let value = value.trim();
    let size = if let Some(pct) = value.strip_suffix('%') {
        container * parse_number(pct).filter(|p| *p >= 0.0)? / 100.0
    } else {
        let lower = value.to_ascii_lowercase();
        parse_number(lower.strip_suffix("px").unwrap_or(&lower))?
    };
    (size > 0.0).then_some(size)
}

#[cfg(test)]
mod tests {
    use super::*;

    const VP: Viewport = Viewport::new(1000.0, 500.0);

    #[test]
    fn test_parse_units() {
        assert_eq!(LengthValue::parse("12px"), Some(LengthValue::Px(12.0)));
        assert_eq!(LengthValue::parse("1.5EM"), Some(LengthValue::Em(1.5)));
        assert_eq!(LengthValue::parse("10"), Some(LengthValue::Px(10.0)));
        assert_eq!(LengthValue::parse("50%"), Some(LengthValue::Percent(50.0)));
        assert_eq!(LengthValue::parse("abc"), None);
        assert_eq!(LengthValue::parse("inf"), None);
        assert_eq!(LengthValue::parse("px"), None);
    }

    #[test]
    fn test_viewport_units() {
        let vw = parse_length("10vw", 16.0, VP).unwrap_or(0.0);
        let vh = parse_length("10vh", 16.0, VP).unwrap_or(0.0);
        assert!((vw - 100.0).abs() < 0.01);
        assert!((vh - 50.0).abs() < 0.01);
        assert_eq!(parse_length("50%", 16.0, VP), None);
    }

    #[test]
    fn test_font_size_keywords() {
        let parent = 20.0;
        let cases = [
            ("xx-small", 9.6),
            ("x-small", 12.0),
            ("small", 14.24),
            ("medium", 16.0),
            ("large", 19.2),
            ("x-large", 24.0),
            ("xx-large", 32.0),
            ("larger", 24.0),
            ("smaller", 20.0 / 1.2),
            ("150%", 30.0),
            ("2em", 40.0),
        ];
        for (value, expected) in cases {
            let size = parse_font_size(value, parent, VP).unwrap_or(-1.0);
            assert!((size - expected).abs() < 0.01, "{value}: {size}");
        }
        assert_eq!(parse_font_size("huge", parent, VP), None);
        assert_eq!(parse_font_size("0px", parent, VP), None);
    }

    #[test]
    fn test_line_height_forms() {
        let cases = [
            ("normal", 20.0, 24.0),
            ("1.5", 18.0, 27.0),
            ("30px", 18.0, 30.0),
            ("200%", 10.0, 20.0),
        ];
        for (value, font_size, expected) in cases {
            let height = parse_line_height(value, font_size, VP).unwrap_or(-1.0);
            assert!((height - expected).abs() < 0.01, "{value}: {height}");
        }
        assert_eq!(parse_line_height("tall", 10.0, VP), None);
    }

    #[test]
    fn test_html_size() {
        assert_eq!(parse_html_size("150", 600.0), Some(150.0));
        assert_eq!(parse_html_size("150PX", 600.0), Some(150.0));
        assert_eq!(parse_html_size("50%", 600.0), Some(300.0));
        assert_eq!(parse_html_size("0", 600.0), None);
        assert_eq!(parse_html_size("-5", 600.0), None);
        assert_eq!(parse_html_size("wide", 600.0), None);
    }
}
