use std::collections::HashMap;
use std::fmt;

use image::Rgb;
use once_cell::sync::Lazy;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid color format: {0:?}")]
pub struct ColorError(pub String);

/// Extended web color names, keyed by lowercase name.
static NAMED_COLORS: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    [
        ("aliceblue", "#F0F8FF"),
        ("antiquewhite", "#FAEBD7"),
        ("aqua", "#00FFFF"),
        ("aquamarine", "#7FFFD4"),
        ("azure", "#F0FFFF"),
        ("beige", "#F5F5DC"),
        ("bisque", "#FFE4C4"),
        ("black", "#000000"),
        ("blanchedalmond", "#FFEBCD"),
        ("blue", "#0000FF"),
        ("blueviolet", "#8A2BE2"),
        ("brown", "#A52A2A"),
        ("burlywood", "#DEB887"),
        ("cadetblue", "#5F9EA0"),
        ("chartreuse", "#7FFF00"),
        ("chocolate", "#D2691E"),
        ("coral", "#FF7F50"),
        ("cornflowerblue", "#6495ED"),
        ("cornsilk", "#FFF8DC"),
        ("crimson", "#DC143C"),
        ("cyan", "#00FFFF"),
        ("darkblue", "#00008B"),
        ("darkcyan", "#008B8B"),
        ("darkgoldenrod", "#B8860B"),
        ("darkgray", "#A9A9A9"),
        ("darkgreen", "#006400"),
        ("darkgrey", "#A9A9A9"),
        ("darkkhaki", "#BDB76B"),
        ("darkmagenta", "#8B008B"),
        ("darkolivegreen", "#556B2F"),
        ("darkorange", "#FF8C00"),
        ("darkorchid", "#9932CC"),
        ("darkred", "#8B0000"),
        ("darksalmon", "#E9967A"),
        ("darkseagreen", "#8FBC8F"),
        ("darkslateblue", "#483D8B"),
        ("darkslategray", "#2F4F4F"),
        ("darkslategrey", "#2F4F4F"),
        ("darkturquoise", "#00CED1"),
        ("darkviolet", "#9400D3"),
        ("deeppink", "#FF1493"),
        ("deepskyblue", "#00BFFF"),
        ("dimgray", "#696969"),
        ("dimgrey", "#696969"),
        ("dodgerblue", "#1E90FF"),
        ("firebrick", "#B22222"),
        ("floralwhite", "#FFFAF0"),
        ("forestgreen", "#228B22"),
        ("fuchsia", "#FF00FF"),
        ("gainsboro", "#DCDCDC"),
        ("ghostwhite", "#F8F8FF"),
        ("gold", "#FFD700"),
        ("goldenrod", "#DAA520"),
        ("gray", "#808080"),
        ("green", "#008000"),
        ("greenyellow", "#ADFF2F"),
        ("grey", "#808080"),
        ("honeydew", "#F0FFF0"),
        ("hotpink", "#FF69B4"),
        ("indianred", "#CD5C5C"),
        ("indigo", "#4B0082"),
        ("ivory", "#FFFFF0"),
        ("khaki", "#F0E68C"),
        ("lavender", "#E6E6FA"),
        ("lavenderblush", "#FFF0F5"),
        ("lawngreen", "#7CFC00"),
        ("lemonchiffon", "#FFFACD"),
        ("lightblue", "#ADD8E6"),
        ("lightcoral", "#F08080"),
        ("lightcyan", "#E0FFFF"),
        ("lightgoldenrodyellow", "#FAFAD2"),
        ("lightgray", "#D3D3D3"),
        ("lightgreen", "#90EE90"),
        ("lightgrey", "#D3D3D3"),
        ("lightpink", "#FFB6C1"),
        ("lightsalmon", "#FFA07A"),
        ("lightseagreen", "#20B2AA"),
        ("lightskyblue", "#87CEFA"),
        ("lightslategray", "#778899"),
        ("lightslategrey", "#778899"),
        ("lightsteelblue", "#B0C4DE"),
        ("lightyellow", "#FFFFE0"),
        ("lime", "#00FF00"),
        ("limegreen", "#32CD32"),
        ("linen", "#FAF0E6"),
        ("magenta", "#FF00FF"),
        ("maroon", "#800000"),
        ("mediumaquamarine", "#66CDAA"),
        ("mediumblue", "#0000CD"),
        ("mediumorchid", "#BA55D3"),
        ("mediumpurple", "#9370DB"),
        ("mediumseagreen", "#3CB371"),
        ("mediumslateblue", "#7B68EE"),
        ("mediumspringgreen", "#00FA9A"),
        ("mediumturquoise", "#48D1CC"),
        ("mediumvioletred", "#C71585"),
        ("midnightblue", "#191970"),
        ("mintcream", "#F5FFFA"),
        ("mistyrose", "#FFE4E1"),
        ("moccasin", "#FFE4B5"),
        ("navajowhite", "#FFDEAD"),
        ("navy", "#000080"),
        ("oldlace", "#FDF5E6"),
        ("olive", "#808000"),
        ("olivedrab", "#6B8E23"),
        ("orange", "#FFA500"),
        ("orangered", "#FF4500"),
        ("orchid", "#DA70D6"),
        ("palegoldenrod", "#EEE8AA"),
        ("palegreen", "#98FB98"),
        ("paleturquoise", "#AFEEEE"),
        ("palevioletred", "#DB7093"),
        ("papayawhip", "#FFEFD5"),
        ("peachpuff", "#FFDAB9"),
        ("peru", "#CD853F"),
        ("pink", "#FFC0CB"),
        ("plum", "#DDA0DD"),
        ("powderblue", "#B0E0E6"),
        ("purple", "#800080"),
        ("rebeccapurple", "#663399"),
        ("red", "#FF0000"),
        ("rosybrown", "#BC8F8F"),
        ("royalblue", "#4169E1"),
        ("saddlebrown", "#8B4513"),
        ("salmon", "#FA8072"),
        ("sandybrown", "#F4A460"),
        ("seagreen", "#2E8B57"),
        ("seashell", "#FFF5EE"),
        ("sienna", "#A0522D"),
        ("silver", "#C0C0C0"),
        ("skyblue", "#87CEEB"),
        ("slateblue", "#6A5ACD"),
        ("slategray", "#708090"),
        ("slategrey", "#708090"),
        ("snow", "#FFFAFA"),
        ("springgreen", "#00FF7F"),
        ("steelblue", "#4682B4"),
        ("tan", "#D2B48C"),
        ("teal", "#008080"),
        ("thistle", "#D8BFD8"),
        ("tomato", "#FF6347"),
        ("turquoise", "#40E0D0"),
        ("violet", "#EE82EE"),
        ("wheat", "#F5DEB3"),
        ("white", "#FFFFFF"),
        ("whitesmoke", "#F5F5F5"),
        ("yellow", "#FFFF00"),
        ("yellowgreen", "#9ACD32"),
    ]
    .into_iter()
    .collect()
});

/// A resolved color: `#` followed by 3 or 6 hex digits.
///
/// Hex input keeps the caller's digit count and case; named colors resolve
/// to uppercase 6-digit form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColorValue(String);

impl ColorValue {
    /// Resolves a color name (case-insensitive) or a hex code with optional `#`.
    pub fn resolve(raw: &str) -> Result<Self, ColorError> {
        if let Some(hex) = NAMED_COLORS.get(raw.to_lowercase().as_str()) {
            return Ok(Self((*hex).to_string()));
        }

        let digits = raw.strip_prefix('#').unwrap_or(raw);
        if is_hex_code(digits) {
            return Ok(Self(format!("#{digits}")));
        }

        Err(ColorError(raw.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn to_rgb(&self) -> Rgb<u8> {
        let digits = &self.0[1..];
        let channel = |i: usize| -> u8 {
            if digits.len() == 3 {
                let nibble = u8::from_str_radix(&digits[i..=i], 16).unwrap_or(0);
                nibble * 17
            } else {
                u8::from_str_radix(&digits[i * 2..i * 2 + 2], 16).unwrap_or(0)
            }
        };
        Rgb([channel(0), channel(1), channel(2)])
    }
}

impl fmt::Display for ColorValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

fn is_hex_code(digits: &str) -> bool {
    matches!(digits.len(), 3 | 6) && digits.chars().all(|c| c.is_ascii_hexdigit())
}
