//! Text measurement and greedy line breaking.
//!
//! [CSS Text Module Level 3](https://www.w3.org/TR/css-text-3/)
//!
//! Glyph metrics are not computed here. Callers inject a [`TextMeasurer`];
//! [`ApproximateMeasurer`] is the fallback used when nothing better exists.

use crate::style::Style;

/// Measures the advance width of a run of text.
///
/// Implementations must be pure: the same inputs always give the same width.
/// Layout calls this many times per box.
pub trait TextMeasurer {
    /// Width in px of `text` set in a font of `font_size` px.
    fn text_width(&self, text: &str, font_size: f32, bold: bool, italic: bool) -> f32;
}

/// Fixed-ratio estimate: every character is half the font size wide.
#[derive(Debug, Clone, Copy, Default)]
pub struct ApproximateMeasurer;

impl TextMeasurer for ApproximateMeasurer {
    #[allow(clippy::cast_precision_loss)]
    fn text_width(&self, text: &str, font_size: f32, _bold: bool, _italic: bool) -> f32 {
        text.chars().count() as f32 * font_size * 0.5
    }
}

/// Font and spacing parameters for one run of text.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextStyle {
    /// Font size in px.
    pub font_size: f32,
    /// Bold face.
    pub bold: bool,
    /// Italic face.
    pub italic: bool,
    /// [§ 8.2 'letter-spacing'](https://www.w3.org/TR/css-text-3/#letter-spacing-property), in px.
    pub letter_spacing: f32,
    /// [§ 8.1 'word-spacing'](https://www.w3.org/TR/css-text-3/#word-spacing-property), in px.
    pub word_spacing: f32,
}

impl TextStyle {
    /// Plain text at `font_size` with no extra spacing.
    #[must_use]
    pub const fn plain(font_size: f32) -> Self {
        Self {
            font_size,
            bold: false,
            italic: false,
            letter_spacing: 0.0,
            word_spacing: 0.0,
        }
    }

    /// The font and spacing of a computed style.
    #[must_use]
    pub fn of(style: &Style) -> Self {
        Self {
            font_size: style.font_size,
            bold: style.bold,
            italic: style.italic,
            letter_spacing: style.letter_spacing_px(),
            word_spacing: style.word_spacing_px(),
        }
    }

    /// Width of `text` including letter and word spacing.
    ///
    /// [§ 8.2](https://www.w3.org/TR/css-text-3/#letter-spacing-property)
    /// "Letter-spacing must not be applied at the beginning or at the end of
    /// a line." So `n` characters get `n - 1` gaps. Word spacing is added
    /// once per run of spaces or tabs. Never negative.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn measure(&self, measurer: &dyn TextMeasurer, text: &str) -> f32 {
        let mut width = measurer.text_width(text, self.font_size, self.bold, self.italic);
        if self.letter_spacing != 0.0 {
            let chars = text.chars().count();
            if chars > 1 {
                width += self.letter_spacing * (chars - 1) as f32;
            }
        }
        if self.word_spacing != 0.0 {
            width += self.word_spacing * count_word_gaps(text) as f32;
        }
        width.max(0.0)
    }

    /// Width of the widest line in `lines`.
    #[must_use]
    pub fn widest<S: AsRef<str>>(&self, measurer: &dyn TextMeasurer, lines: &[S]) -> f32 {
        lines
            .iter()
            .map(|line| self.measure(measurer, line.as_ref()))
            .fold(0.0, f32::max)
    }
}

/// Number of whitespace runs (spaces and tabs) in `text`.
#[must_use]
pub fn count_word_gaps(text: &str) -> usize {
    let mut gaps = 0;
    let mut in_space = false;
    for c in text.chars() {
        if c == ' ' || c == '\t' {
            if !in_space {
                gaps += 1;
            }
            in_space = true;
        } else {
            in_space = false;
        }
    }
    gaps
}

/// [§ 5 Line Breaking](https://www.w3.org/TR/css-text-3/#line-breaking)
///
/// Greedy word wrap. Words are never split: the first word of a line is
/// placed even when it alone overflows `max_width`. Runs of whitespace
/// collapse to one space, but one leading and one trailing space survive
/// on the first and last line so adjacent inline runs stay separated.
///
/// A `max_width` of zero or less disables wrapping and returns the text
/// unchanged. Whitespace-only text becomes a single space; empty text
/// yields no lines.
#[must_use]
pub fn wrap_text(
    text: &str,
    max_width: f32,
    style: &TextStyle,
    measurer: &dyn TextMeasurer,
) -> Vec<String> {
    if max_width <= 0.0 {
        return vec![text.to_string()];
    }

    let words: Vec<&str> = text.split_whitespace().collect();
    if words.is_empty() {
        return if text.contains([' ', '\t']) {
            vec![" ".to_string()]
        } else {
            Vec::new()
        };
    }

    let mut lines = Vec::new();
    let mut current = String::new();
    for word in words {
        if current.is_empty() {
            current.push_str(word);
            continue;
        }
        let candidate = format!("{current} {word}");
        if style.measure(measurer, &candidate) <= max_width {
            current = candidate;
        } else {
            lines.push(std::mem::replace(&mut current, word.to_string()));
        }
    }
    lines.push(current);

    if text.starts_with([' ', '\t'])
        && let Some(first) = lines.first_mut()
    {
        first.insert(0, ' ');
    }
    if text.ends_with([' ', '\t'])
        && let Some(last) = lines.last_mut()
    {
        last.push(' ');
    }
    lines
}

/// Replace each tab with spaces up to the next multiple of `tab_size`
/// columns. Columns restart after every newline.
#[must_use]
pub fn expand_tabs(text: &str, tab_size: usize) -> String {
    let tab_size = tab_size.max(1);
    let mut out = String::with_capacity(text.len());
    let mut column = 0;
    for c in text.chars() {
        match c {
            '\t' => {
                let spaces = tab_size - column % tab_size;
                out.extend(std::iter::repeat_n(' ', spaces));
                column += spaces;
            }
            '\n' => {
                out.push(c);
                column = 0;
            }
            _ => {
                out.push(c);
                column += 1;
            }
        }
    }
    out
}
