//! [§ 2.1 Case Transforms](https://www.w3.org/TR/css-text-3/#text-transform-property)

use super::keywords::{FontVariant, TextTransform};

/// Apply `text-transform`, then `font-variant: small-caps`, to a text run.
///
/// Small capitals are approximated by upper-casing the whole run.
#[must_use]
pub fn apply_text_transform(text: &str, transform: TextTransform, variant: FontVariant) -> String {
    let transformed = match transform {
        TextTransform::None => text.to_string(),
        TextTransform::Uppercase => text.to_uppercase(),
        TextTransform::Lowercase => text.to_lowercase(),
        TextTransform::Capitalize => capitalize_words(text),
    };
    match variant {
        FontVariant::SmallCaps => transformed.to_uppercase(),
        FontVariant::Normal => transformed,
    }
}

/// Upper-case the first letter of every word and lower-case the rest.
///
/// Words are re-joined with single spaces.
#[must_use]
pub fn capitalize_words(text: &str) -> String {
    text.split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            chars.next().map_or_else(String::new, |first| {
                first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect()
            })
        })
        .collect::<Vec<_>>()
        .join(" ")
}
