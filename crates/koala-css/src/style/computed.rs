//! CSS Computed Style
//!
//! [§ 4.4 Computed Values](https://www.w3.org/TR/css-cascade-4/#computed)
//! "The computed value is the result of resolving the specified value..."

use serde::Serialize;

use koala_common::warning::warn_once;

use crate::layout::EdgeSizes;

use super::keywords::{
    DisplayValue, FloatSide, FontVariant, ListStyleType, PositionType, TextAlign, TextDecoration,
    TextTransform, VerticalAlign, Visibility,
};
use super::values::{
    BorderRadius, BorderSide, BorderStyle, ColorValue, DEFAULT_FONT_SIZE_PX, LengthValue,
    Viewport, parse_border_width, parse_font_family, parse_font_size, parse_font_style,
    parse_font_weight, parse_length, parse_line_height, parse_number,
};

/// What a declaration's value is resolved against.
///
/// [§ 5.1.1 Font-relative lengths](https://www.w3.org/TR/css-values-4/#font-relative-lengths)
/// "When specified in the font-size property of an element, [em] refers to
/// the computed font-size of the parent element."
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResolveContext {
    /// The parent's computed font size. `font-size` resolves `em` and `%`
    /// against this; every other property uses the element's own size.
    pub parent_font_size: f32,
    /// Viewport for `vw`/`vh`.
    pub viewport: Viewport,
}

impl Default for ResolveContext {
    fn default() -> Self {
        Self {
            parent_font_size: DEFAULT_FONT_SIZE_PX,
            viewport: Viewport::default(),
        }
    }
}

/// Computed styles for an element.
///
/// [§ 4.4 Computed Values](https://www.w3.org/TR/css-cascade-4/#computed)
///
/// Lengths are resolved to px. Properties where zero is a legal explicit
/// value and "unset" means something else are `Option`s.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[allow(clippy::struct_excessive_bools)]
pub struct Style {
    /// [§ 3.1 'color'](https://www.w3.org/TR/css-color-4/#the-color-property)
    pub color: ColorValue,
    /// [§ 3.2 'background-color'](https://www.w3.org/TR/css-backgrounds-3/#background-color)
    pub background_color: Option<ColorValue>,
    /// [§ 3.3 'background-image'](https://www.w3.org/TR/css-backgrounds-3/#background-image)
    ///
    /// The URL inside `url(...)`, unquoted.
    pub background_image: Option<String>,

    /// [§ 2.4 'font-size'](https://www.w3.org/TR/css-fonts-4/#font-size-prop), in px.
    pub font_size: f32,
    /// [§ 4.2 'line-height'](https://www.w3.org/TR/css-inline-3/#line-height-property), in px.
    ///
    /// `None` leaves the line height to layout's per-element default.
    pub line_height: Option<f32>,
    /// The multiplier behind a unitless (or `normal`) `line-height`.
    ///
    /// Inherited as the number, so each element resolves it against its own
    /// `font_size`.
    pub line_height_factor: Option<f32>,
    /// `font-weight` of 600 or more.
    pub bold: bool,
    /// `font-style: italic | oblique`
    pub italic: bool,
    /// [§ 6.2 'font-variant-caps'](https://www.w3.org/TR/css-fonts-4/#font-variant-caps-prop)
    pub font_variant: FontVariant,
    /// [§ 3.1 'font-family'](https://www.w3.org/TR/css-fonts-4/#font-family-prop)
    pub font_family: Vec<String>,

    /// [§ 6.1 Margins](https://www.w3.org/TR/css-box-4/#margin-physical)
    ///
    /// May be negative. An `auto` side is zero here with its flag set.
    pub margin: EdgeSizes,
    /// `margin-left: auto`
    pub margin_left_auto: bool,
    /// `margin-right: auto`
    pub margin_right_auto: bool,
    /// [§ 6.2 Padding](https://www.w3.org/TR/css-box-4/#padding-physical)
    ///
    /// Never negative.
    pub padding: EdgeSizes,

    /// `border-top-*`
    pub border_top: BorderSide,
    /// `border-right-*`
    pub border_right: BorderSide,
    /// `border-bottom-*`
    pub border_bottom: BorderSide,
    /// `border-left-*`
    pub border_left: BorderSide,
    /// [§ 5.1 'border-radius'](https://www.w3.org/TR/css-backgrounds-3/#border-radius)
    pub border_radius: BorderRadius,

    /// [§ 16.2 'text-align'](https://www.w3.org/TR/CSS2/text.html#alignment-prop)
    pub text_align: TextAlign,
    /// [§ 10.8.1 'vertical-align'](https://www.w3.org/TR/CSS2/visudet.html#propdef-vertical-align)
    pub vertical_align: VerticalAlign,
    /// [§ 2 'display'](https://www.w3.org/TR/css-display-3/#the-display-properties)
    ///
    /// `None` means use the element's default display value.
    pub display: Option<DisplayValue>,
    /// [§ 9.5.1 'float'](https://www.w3.org/TR/CSS2/visuren.html#float-position)
    pub float: FloatSide,
    /// [§ 9.3.1 'position'](https://www.w3.org/TR/CSS2/visuren.html#choose-position)
    pub position: PositionType,
    /// [§ 9.3.2 Box offsets](https://www.w3.org/TR/CSS2/visuren.html#position-props)
    pub top: Option<f32>,
    /// `right` offset.
    pub right: Option<f32>,
    /// `bottom` offset.
    pub bottom: Option<f32>,
    /// `left` offset.
    pub left: Option<f32>,

    /// [§ 2.1 'text-decoration-line'](https://www.w3.org/TR/css-text-decor-3/#text-decoration-line-property)
    pub text_decoration: TextDecoration,
    /// [§ 2.1 'text-transform'](https://www.w3.org/TR/css-text-3/#text-transform-property)
    pub text_transform: TextTransform,
    /// [§ 8.2 'letter-spacing'](https://www.w3.org/TR/css-text-3/#letter-spacing-property)
    ///
    /// `normal` is an explicit `Some(0.0)`.
    pub letter_spacing: Option<f32>,
    /// [§ 8.1 'word-spacing'](https://www.w3.org/TR/css-text-3/#word-spacing-property)
    pub word_spacing: Option<f32>,
    /// [§ 3.2 'opacity'](https://www.w3.org/TR/css-color-4/#transparency), in `[0, 1]`.
    pub opacity: f32,
    /// [§ 11.2 'visibility'](https://www.w3.org/TR/CSS2/visufx.html#visibility)
    pub visibility: Visibility,
    /// [§ 8.1 'cursor'](https://www.w3.org/TR/css-ui-4/#cursor), as a keyword.
    pub cursor: Option<String>,
    /// [§ 3.4 'list-style-type'](https://www.w3.org/TR/css-lists-3/#text-markers)
    pub list_style_type: ListStyleType,

    /// [§ 10.2 'width'](https://www.w3.org/TR/CSS2/visudet.html#the-width-property), in px.
    pub width: Option<f32>,
    /// `width` as a percentage of the containing block (`25.0` is 25%).
    pub width_percent: Option<f32>,
    /// [§ 10.5 'height'](https://www.w3.org/TR/CSS2/visudet.html#the-height-property)
    pub height: Option<f32>,
    /// [§ 10.4 'min-width'](https://www.w3.org/TR/CSS2/visudet.html#min-max-widths)
    pub min_width: Option<f32>,
    /// `max-width`
    pub max_width: Option<f32>,
    /// [§ 10.7 'min-height'](https://www.w3.org/TR/CSS2/visudet.html#min-max-heights)
    pub min_height: Option<f32>,
    /// `max-height`
    pub max_height: Option<f32>,
}

impl Default for Style {
    fn default() -> Self {
        Self {
            color: ColorValue::BLACK,
            background_color: None,
            background_image: None,
            font_size: DEFAULT_FONT_SIZE_PX,
            line_height: None,
            line_height_factor: None,
            bold: false,
            italic: false,
            font_variant: FontVariant::Normal,
            font_family: Vec::new(),
            margin: EdgeSizes::default(),
            margin_left_auto: false,
            margin_right_auto: false,
            padding: EdgeSizes::default(),
            border_top: BorderSide::default(),
            border_right: BorderSide::default(),
            border_bottom: BorderSide::default(),
            border_left: BorderSide::default(),
            border_radius: BorderRadius::default(),
            text_align: TextAlign::Left,
            vertical_align: VerticalAlign::Baseline,
            display: None,
            float: FloatSide::None,
            position: PositionType::Static,
            top: None,
            right: None,
            bottom: None,
            left: None,
            text_decoration: TextDecoration::None,
            text_transform: TextTransform::None,
            letter_spacing: None,
            word_spacing: None,
            opacity: 1.0,
            visibility: Visibility::Visible,
            cursor: None,
            list_style_type: ListStyleType::Disc,
            width: None,
            width_percent: None,
            height: None,
            min_width: None,
            max_width: None,
            min_height: None,
            max_height: None,
        }
    }
}

impl Style {
    /// [§ 7.1 Inherited Values](https://www.w3.org/TR/css-cascade-4/#inheriting)
    ///
    /// "Inherited properties are properties that, by default, take their value
    /// from the parent element."
    ///
    /// Starts from initial values and copies the inherited properties of
    /// `parent`.
    #[must_use]
    pub fn inherited_from(parent: &Self) -> Self {
        Self {
            color: parent.color,
            font_size: parent.font_size,
            line_height: parent.line_height,
            line_height_factor: parent.line_height_factor,
            bold: parent.bold,
            italic: parent.italic,
            font_variant: parent.font_variant,
            font_family: parent.font_family.clone(),
            text_align: parent.text_align,
            letter_spacing: parent.letter_spacing,
            word_spacing: parent.word_spacing,
            text_transform: parent.text_transform,
            visibility: parent.visibility,
            cursor: parent.cursor.clone(),
            list_style_type: parent.list_style_type,
            ..Self::default()
        }
    }

    /// Border widths as edge sizes.
    #[must_use]
    pub const fn border_widths(&self) -> EdgeSizes {
        EdgeSizes {
            top: self.border_top.width,
            right: self.border_right.width,
            bottom: self.border_bottom.width,
            left: self.border_left.width,
        }
    }

    /// Whether `display: none` was computed.
    #[must_use]
    pub fn is_display_none(&self) -> bool {
        self.display == Some(DisplayValue::None)
    }

    /// Letter spacing in px, zero when unset.
    #[must_use]
    pub fn letter_spacing_px(&self) -> f32 {
        self.letter_spacing.unwrap_or(0.0)
    }

    /// Word spacing in px, zero when unset.
    #[must_use]
    pub fn word_spacing_px(&self) -> f32 {
        self.word_spacing.unwrap_or(0.0)
    }

    /// Apply one longhand declaration.
    ///
    /// Returns `false` when the value was not understood or the property is
    /// unknown, in which case the style is unchanged. `font-size` resolves
    /// against `ctx.parent_font_size`; all other font-relative lengths use
    /// this style's current `font_size`.
    pub fn apply_declaration(&mut self, name: &str, value: &str, ctx: &ResolveContext) -> bool {
        let value = value.trim();
        let em = self.font_size;
        let vp = ctx.viewport;

        match name {
            "color" => set(&mut self.color, ColorValue::parse(value)),
            "background-color" => {
                if value.eq_ignore_ascii_case("transparent") {
                    self.background_color = None;
                    return true;
                }
                set_some(&mut self.background_color, ColorValue::parse(value))
            }
            "background-image" => {
                if value.eq_ignore_ascii_case("none") {
                    self.background_image = None;
                    return true;
                }
                set_some(&mut self.background_image, parse_url(value))
            }

            // [§ 2.4 font-size](https://www.w3.org/TR/css-fonts-4/#font-size-prop)
            "font-size" => set(
                &mut self.font_size,
                parse_font_size(value, ctx.parent_font_size, vp),
            ),
            "line-height" => {
                let applied = set_some(&mut self.line_height, parse_line_height(value, em, vp));
                if applied {
                    self.line_height_factor = if value.eq_ignore_ascii_case("normal") {
                        Some(1.2)
                    } else {
                        parse_number(value)
                    };
                }
                applied
            }
            "font-weight" => set(&mut self.bold, parse_font_weight(value)),
            "font-style" => set(&mut self.italic, parse_font_style(value)),
            "font-variant" => set(&mut self.font_variant, FontVariant::parse(value)),
            "font-family" => {
                let families = parse_font_family(value);
                let parsed = (!families.is_empty()).then_some(families);
                set(&mut self.font_family, parsed)
            }

            // [§ 8.3 Margin properties](https://www.w3.org/TR/CSS2/box.html#margin-properties)
            "margin-top" => set(&mut self.margin.top, parse_margin(value, em, vp).map(|m| m.0)),
            "margin-bottom" => set(
                &mut self.margin.bottom,
                parse_margin(value, em, vp).map(|m| m.0),
            ),
            "margin-left" => parse_margin(value, em, vp).is_some_and(|(px, auto)| {
                self.margin.left = px;
                self.margin_left_auto = auto;
                true
            }),
            "margin-right" => parse_margin(value, em, vp).is_some_and(|(px, auto)| {
                self.margin.right = px;
                self.margin_right_auto = auto;
                true
            }),

            // [§ 8.4 Padding properties](https://www.w3.org/TR/CSS2/box.html#padding-properties)
            // "Unlike margin properties, values for padding values cannot be negative."
            "padding-top" => set(&mut self.padding.top, parse_padding(value, em, vp)),
            "padding-right" => set(&mut self.padding.right, parse_padding(value, em, vp)),
            "padding-bottom" => set(&mut self.padding.bottom, parse_padding(value, em, vp)),
            "padding-left" => set(&mut self.padding.left, parse_padding(value, em, vp)),

            "text-align" => set(&mut self.text_align, TextAlign::parse(value)),
            "vertical-align" => set(&mut self.vertical_align, VerticalAlign::parse(value)),
            "display" => set_some(&mut self.display, DisplayValue::parse(value)),
            "float" => set(&mut self.float, FloatSide::parse(value)),
            "position" => set(&mut self.position, PositionType::parse(value)),
            "top" => set_offset(&mut self.top, value, em, vp),
            "right" => set_offset(&mut self.right, value, em, vp),
            "bottom" => set_offset(&mut self.bottom, value, em, vp),
            "left" => set_offset(&mut self.left, value, em, vp),

            "text-decoration" | "text-decoration-line" => set(
                &mut self.text_decoration,
                value.split_whitespace().find_map(TextDecoration::parse),
            ),
            "text-transform" => set(&mut self.text_transform, TextTransform::parse(value)),
            "letter-spacing" => set_some(&mut self.letter_spacing, parse_spacing(value, em, vp)),
            "word-spacing" => set_some(&mut self.word_spacing, parse_spacing(value, em, vp)),
            "opacity" => set(
                &mut self.opacity,
                parse_number(value).map(|o| o.clamp(0.0, 1.0)),
            ),
            "visibility" => set(&mut self.visibility, Visibility::parse(value)),
            "cursor" => {
                let keyword = value.to_ascii_lowercase();
                let parsed = (!keyword.is_empty()).then_some(keyword);
                set_some(&mut self.cursor, parsed)
            }
            "list-style-type" => set(&mut self.list_style_type, ListStyleType::parse(value)),

            // [§ 10.2 Content width](https://www.w3.org/TR/CSS2/visudet.html#the-width-property)
            "width" => match LengthValue::parse(value) {
                Some(LengthValue::Percent(pct)) if pct > 0.0 => {
                    self.width_percent = Some(pct);
                    self.width = None;
                    true
                }
                _ if value.eq_ignore_ascii_case("auto") => {
                    self.width = None;
                    self.width_percent = None;
                    true
                }
                _ => {
                    let width = positive_length(value, em, vp);
                    if width.is_some() {
                        self.width_percent = None;
                    }
                    set_some(&mut self.width, width)
                }
            },
            "height" => set_size(&mut self.height, value, "auto", em, vp),
            "min-width" => set_size(&mut self.min_width, value, "auto", em, vp),
            "max-width" => set_size(&mut self.max_width, value, "none", em, vp),
            "min-height" => set_size(&mut self.min_height, value, "auto", em, vp),
            "max-height" => set_size(&mut self.max_height, value, "none", em, vp),

            "border-top-left-radius" => set(
                &mut self.border_radius.top_left,
                parse_padding(value, em, vp),
            ),
            "border-top-right-radius" => set(
                &mut self.border_radius.top_right,
                parse_padding(value, em, vp),
            ),
            "border-bottom-right-radius" => set(
                &mut self.border_radius.bottom_right,
                parse_padding(value, em, vp),
            ),
            "border-bottom-left-radius" => set(
                &mut self.border_radius.bottom_left,
                parse_padding(value, em, vp),
            ),

            _ => {
                if let Some(applied) = self.apply_border_longhand(name, value, em, vp) {
                    return applied;
                }
                warn_once("CSS", &format!("unsupported property: {name}"));
                false
            }
        }
    }

    /// `border-{side}-{width|style|color}`. `None` if `name` is not one of
    /// these.
    fn apply_border_longhand(
        &mut self,
        name: &str,
        value: &str,
        em: f32,
        viewport: Viewport,
    ) -> Option<bool> {
        let (side, part) = name.strip_prefix("border-")?.split_once('-')?;
        let side = match side {
            "top" => &mut self.border_top,
            "right" => &mut self.border_right,
            "bottom" => &mut self.border_bottom,
            "left" => &mut self.border_left,
            _ => return None,
        };
        let applied = match part {
            "width" => set(&mut side.width, parse_border_width(value, em, viewport)),
            "style" => set(&mut side.style, BorderStyle::parse(value)),
            "color" if value.eq_ignore_ascii_case("currentcolor") => {
                side.color = None;
                true
            }
            "color" => set_some(&mut side.color, ColorValue::parse(value)),
            _ => return None,
        };
        Some(applied)
    }
}

/// Store a parsed value; report whether there was one.
fn set<T>(slot: &mut T, parsed: Option<T>) -> bool {
    parsed.map(|value| *slot = value).is_some()
}

fn set_some<T>(slot: &mut Option<T>, parsed: Option<T>) -> bool {
    parsed.map(|value| *slot = Some(value)).is_some()
}

/// `<length> | auto`, returning the px value and whether it was `auto`.
fn parse_margin(value: &str, em: f32, viewport: Viewport) -> Option<(f32, bool)> {
    if value.eq_ignore_ascii_case("auto") {
        return Some((0.0, true));
    }
    parse_length(value, em, viewport).map(|px| (px, false))
}

fn parse_padding(value: &str, em: f32, viewport: Viewport) -> Option<f32> {
    parse_length(value, em, viewport).filter(|px| *px >= 0.0)
}

fn positive_length(value: &str, em: f32, viewport: Viewport) -> Option<f32> {
    parse_length(value, em, viewport).filter(|px| *px > 0.0)
}

/// `height`, `min-*` and `max-*`: a positive length, or the keyword that
/// clears the constraint.
fn set_size(slot: &mut Option<f32>, value: &str, unset: &str, em: f32, viewport: Viewport) -> bool {
    if value.eq_ignore_ascii_case(unset) {
        *slot = None;
        return true;
    }
    set_some(slot, positive_length(value, em, viewport))
}

/// Box offsets. `auto` clears the offset; zero is a real offset.
fn set_offset(slot: &mut Option<f32>, value: &str, em: f32, viewport: Viewport) -> bool {
    if value.eq_ignore_ascii_case("auto") {
        *slot = None;
        return true;
    }
    set_some(slot, parse_length(value, em, viewport))
}

/// `letter-spacing` / `word-spacing`: `normal` is zero.
fn parse_spacing(value: &str, em: f32, viewport: Viewport) -> Option<f32> {
    if value.eq_ignore_ascii_case("normal") {
        return Some(0.0);
    }
    parse_length(value, em, viewport)
}

/// The target of `url(...)`, with surrounding quotes removed.
fn parse_url(value: &str) -> Option<String> {
    let inner = value
        .strip_prefix("url(")
        .or_else(|| value.strip_prefix("URL("))?
        .strip_suffix(')')?;
    let url = inner.trim().trim_matches(|c| c == '"' || c == '\'').trim();
    (!url.is_empty()).then(|| url.to_string())
}
