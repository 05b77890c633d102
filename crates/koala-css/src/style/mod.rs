//! CSS Computed Style representation and value parsing
//!
//! This module implements CSS value types and computed style representation per:
//! - [CSS Values and Units Level 4](https://www.w3.org/TR/css-values-4/)
//! - [CSS Color Level 4](https://www.w3.org/TR/css-color-4/)
//! - [CSS Display Module Level 3](https://www.w3.org/TR/css-display-3/)
//! - [CSS Text Module Level 3](https://www.w3.org/TR/css-text-3/)

pub mod computed;
mod keywords;
mod transform;
pub mod values;

// Re-export all public types
pub use computed::{ResolveContext, Style};
pub use keywords::{
    DisplayValue, FloatSide, FontVariant, ListStyleType, PositionType, TextAlign, TextDecoration,
    TextTransform, VerticalAlign, Visibility,
};
pub use transform::{apply_text_transform, capitalize_words};
pub use values::{
    BorderRadius, BorderSide, BorderStyle, ColorValue, DEFAULT_FONT_SIZE_PX, LengthValue, Viewport,
};
