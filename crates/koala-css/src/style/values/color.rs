//! CSS Color values and parsing
//!
//! [CSS Color Level 4](https://www.w3.org/TR/css-color-4/)

use serde::Serialize;

/// [§ 4 Color syntax](https://www.w3.org/TR/css-color-4/#color-syntax)
/// sRGB color represented as RGBA components.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct ColorValue {
    /// "the red color channel" (0-255)
    pub r: u8,
    /// "the green color channel" (0-255)
    pub g: u8,
    /// "the blue color channel" (0-255)
    pub b: u8,
    /// "the alpha channel" (0-255, 255 = fully opaque)
    pub a: u8,
}

impl ColorValue {
    /// Black (#000000)
    pub const BLACK: Self = Self::rgb(0, 0, 0);

    /// Default unvisited link color (#0000ee).
    pub const LINK: Self = Self::rgb(0x00, 0x00, 0xee);

    /// Default visited link color (#551a8b).
    pub const VISITED_LINK: Self = Self::rgb(0x55, 0x1a, 0x8b);

    /// Fully transparent black.
    pub const TRANSPARENT: Self = Self {
        r: 0,
        g: 0,
        b: 0,
        a: 0,
    };

    /// An opaque color.
    #[must_use]
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// Parse a color keyword or hex notation. Case-insensitive.
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        let value = value.trim().to_ascii_lowercase();
        if value.starts_with('#') {
            return Self::from_hex(&value);
        }
        Self::from_named(&value)
    }

    /// [§ 4.2 The RGB hexadecimal notations](https://www.w3.org/TR/css-color-4/#hex-notation)
    /// "The syntax of a <hex-color> is a <hash-token> token whose value consists of
    /// 3, 4, 6, or 8 hexadecimal digits."
    #[must_use]
    pub fn from_hex(hex: &str) -> Option<Self> {
        let hex = hex.strip_prefix('#').unwrap_or(hex);
        if !hex.is_ascii() {
            return None;
        }
        let short = |i: usize| u8::from_str_radix(&hex[i..=i].repeat(2), 16).ok();
        let long = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
        match hex.len() {
            // "The three-digit RGB notation (#RGB) is converted into six-digit form (#RRGGBB)
            // by replicating digits, not by adding zeros."
            3 => Some(Self::rgb(short(0)?, short(1)?, short(2)?)),
            4 => Some(Self {
                a: short(3)?,
                ..Self::rgb(short(0)?, short(1)?, short(2)?)
            }),
            6 => Some(Self::rgb(long(0)?, long(2)?, long(4)?)),
            8 => Some(Self {
                a: long(6)?,
                ..Self::rgb(long(0)?, long(2)?, long(4)?)
            }),
            _ => None,
        }
    }

    /// [§ 6.1 Named Colors](https://www.w3.org/TR/css-color-4/#named-colors)
    #[must_use]
    pub fn from_named(name: &str) -> Option<Self> {
        if name.eq_ignore_ascii_case("transparent") {
            return Some(Self::TRANSPARENT);
        }
        NAMED_COLORS
            .iter()
            .find(|(named, _)| name.eq_ignore_ascii_case(named))
            .map(|&(_, [r, g, b])| Self::rgb(r, g, b))
    }
}

/// Named color table.
const NAMED_COLORS: &[(&str, [u8; 3])] = &[
    ("black", [0, 0, 0]),
    ("white", [255, 255, 255]),
    ("red", [255, 0, 0]),
    ("green", [0, 128, 0]),
    ("blue", [0, 0, 255]),
    ("yellow", [255, 255, 0]),
    ("purple", [128, 0, 128]),
    ("mediumpurple", [47, 112, 216]),
    ("orange", [255, 165, 0]),
    ("gray", [128, 128, 128]),
    ("grey", [128, 128, 128]),
    ("cyan", [0, 255, 255]),
    ("magenta", [255, 0, 255]),
    ("pink", [255, 192, 203]),
    ("brown", [165, 42, 42]),
    ("lightgray", [211, 211, 211]),
    ("lightgrey", [211, 211, 211]),
    ("lightblue", [173, 216, 230]),
    ("lightgreen", [144, 238, 144]),
    ("lightyellow", [255, 255, 224]),
    ("lightpink", [255, 182, 193]),
    ("lightcyan", [224, 255, 255]),
    ("darkgray", [169, 169, 169]),
    ("darkgrey", [169, 169, 169]),
    ("darkblue", [0, 0, 139]),
    ("darkgreen", [0, 100, 0]),
    ("darkred", [139, 0, 0]),
    ("darkcyan", [0, 139, 139]),
    ("darkmagenta", [139, 0, 139]),
    ("darkorange", [255, 140, 0]),
    ("navy", [0, 0, 128]),
    ("teal", [0, 128, 128]),
    ("maroon", [128, 0, 0]),
    ("olive", [128, 128, 0]),
    ("silver", [192, 192, 192]),
    ("aqua", [0, 255, 255]),
    ("lime", [0, 255, 0]),
    ("fuchsia", [255, 0, 255]),
    ("gold", [255, 215, 0]),
    ("coral", [255, 127, 80]),
    ("salmon", [250, 128, 114]),
    ("tomato", [255, 99, 71]),
    ("crimson", [220, 20, 60]),
    ("indigo", [75, 0, 130]),
    ("violet", [238, 130, 238]),
    ("plum", [221, 160, 221]),
    ("khaki", [240, 230, 140]),
    ("beige", [245, 245, 220]),
    ("ivory", [255, 255, 240]),
    ("wheat", [245, 222, 179]),
    ("tan", [210, 180, 140]),
    ("chocolate", [210, 105, 30]),
    ("firebrick", [178, 34, 34]),
    ("skyblue", [135, 206, 235]),
    ("steelblue", [70, 130, 180]),
    ("slategray", [112, 128, 144]),
    ("slategrey", [112, 128, 144]),
    ("dimgray", [105, 105, 105]),
    ("dimgrey", [105, 105, 105]),
    ("whitesmoke", [245, 245, 245]),
    ("snow", [255, 250, 250]),
    ("honeydew", [240, 255, 240]),
    ("mintcream", [245, 255, 250]),
    ("azure", [240, 255, 255]),
    ("aliceblue", [240, 248, 255]),
    ("lavender", [230, 230, 250]),
    ("linen", [250, 240, 230]),
    ("seashell", [255, 245, 238]),
    ("seagreen", [46, 139, 87]),
    ("mediumseagreen", [60, 179, 113]),
    ("limegreen", [50, 205, 50]),
    ("yellowgreen", [154, 205, 50]),
    ("olivedrab", [107, 142, 35]),
    ("goldenrod", [218, 165, 32]),
    ("darkgoldenrod", [184, 134, 11]),
    ("hotpink", [255, 105, 180]),
    ("deeppink", [255, 20, 147]),
    ("turquoise", [64, 224, 208]),
    ("mediumturquoise", [72, 209, 204]),
    ("cadetblue", [95, 158, 160]),
    ("dodgerblue", [30, 144, 255]),
    ("royalblue", [65, 105, 225]),
    ("cornflowerblue", [100, 149, 237]),
    ("mediumblue", [0, 0, 205]),
    ("peru", [205, 133, 63]),
    ("sienna", [160, 82, 45]),
    ("saddlebrown", [139, 69, 19]),
    ("orchid", [218, 112, 214]),
    ("darkviolet", [148, 0, 211]),
    ("darkorchid", [153, 50, 204]),
    ("mediumorchid", [186, 85, 211]),
    ("palegreen", [152, 251, 152]),
    ("lightcoral", [240, 128, 128]),
    ("rosybrown", [188, 143, 143]),
    ("mistyrose", [255, 228, 225]),
    ("bisque", [255, 228, 196]),
    ("moccasin", [255, 228, 181]),
    ("peachpuff", [255, 218, 185]),
    ("darkkhaki", [189, 183, 107]),
    ("palegoldenrod", [238, 232, 170]),
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hex_forms() {
        assert_eq!(ColorValue::parse("#333"), Some(ColorValue::rgb(0x33, 0x33, 0x33)));
        assert_eq!(ColorValue::parse("#FF8000"), Some(ColorValue::rgb(255, 128, 0)));
        assert_eq!(ColorValue::parse("#ff000080").map(|c| c.a), Some(0x80));
        assert_eq!(ColorValue::parse("#12345"), None);
        assert_eq!(ColorValue::parse("#ggg"), None);
    }

    #[test]
    fn test_named_colors() {
        assert_eq!(ColorValue::parse("Green"), Some(ColorValue::rgb(0, 128, 0)));
        assert_eq!(ColorValue::parse("grey"), ColorValue::parse("gray"));
        assert_eq!(ColorValue::parse("transparent"), Some(ColorValue::TRANSPARENT));
        assert_eq!(ColorValue::parse("notacolor"), None);
    }
}
