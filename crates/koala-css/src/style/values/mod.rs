//! CSS Value types and parsing
//!
//! - [CSS Values and Units Level 4](https://www.w3.org/TR/css-values-4/)
//! - [CSS Color Level 4](https://www.w3.org/TR/css-color-4/)
//! - [CSS Backgrounds and Borders Level 3](https://www.w3.org/TR/css-backgrounds-3/)
//! - [CSS Fonts Module Level 4](https://www.w3.org/TR/css-fonts-4/)

mod border;
mod color;
mod font;
mod length;

pub use border::{
    BorderRadius, BorderShorthand, BorderSide, BorderStyle, parse_border_shorthand,
    parse_border_width,
};
pub use color::ColorValue;
pub use font::{
    FontShorthand, parse_font_family, parse_font_shorthand, parse_font_style, parse_font_weight,
};
pub use length::{
    DEFAULT_FONT_SIZE_PX, LengthValue, Viewport, parse_font_size, parse_html_size, parse_length,
    parse_line_height, parse_number,
};
