use once_cell::sync::Lazy;
use regex::Regex;
use thiserror::Error;

/// `<width>[x<height>][.<extension>]`, matched after lowercasing.
static DESCRIPTOR_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?P<width>[^x.]*)(?:x(?P<height>[^x.]*))?(?:\.(?P<extension>[^x.]*))?$")
        .expect("descriptor pattern is valid")
});

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum DescriptorError {
    /// Whitespace, repeated delimiters, delimiters out of order or a missing side.
    #[error("descriptor is malformed")]
    Malformed,

    #[error("size must be numeric")]
    NonNumeric,

    #[error("size exceeds maximum")]
    Overflow,
}

/// Output encodings. Every extension token maps to exactly one of these.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ImageFormat {
    #[default]
    Jpeg,
    Png,
    Gif,
}

impl ImageFormat {
    /// Total mapping: unknown extensions fall back to JPEG.
    pub fn from_extension(extension: &str) -> Self {
        match extension.to_ascii_lowercase().as_str() {
            "png" => Self::Png,
            "gif" => Self::Gif,
            _ => Self::Jpeg,
        }
    }

    /// Strict variant used for configuration values.
    pub fn from_config_value(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "jpg" | "jpeg" => Some(Self::Jpeg),
            "png" => Some(Self::Png),
            "gif" => Some(Self::Gif),
            _ => None,
        }
    }

    pub fn mime_type(self) -> &'static str {
        match self {
            Self::Jpeg => "image/jpeg",
            Self::Png => "image/png",
            Self::Gif => "image/gif",
        }
    }

    pub fn extension(self) -> &'static str {
        match self {
            Self::Jpeg => "jpg",
            Self::Png => "png",
            Self::Gif => "gif",
        }
    }
}

impl From<ImageFormat> for image::ImageFormat {
    fn from(format: ImageFormat) -> Self {
        match format {
            ImageFormat::Jpeg => image::ImageFormat::Jpeg,
            ImageFormat::Png => image::ImageFormat::Png,
            ImageFormat::Gif => image::ImageFormat::Gif,
        }
    }
}

/// Parsed `(width, height, format)` triple for a single request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SizeFormatDescriptor {
    pub width: u32,
    pub height: u32,
    pub format: ImageFormat,
}

impl SizeFormatDescriptor {
    /// Parses a descriptor such as `640x480.png`, `300` or `200x100`,
    /// defaulting to JPEG when no extension is given.
    pub fn parse(raw: &str) -> Result<Self, DescriptorError> {
        Self::parse_with_default(raw, ImageFormat::Jpeg)
    }

    pub fn parse_with_default(
        raw: &str,
        default_format: ImageFormat,
    ) -> Result<Self, DescriptorError> {
        check_structure(raw)?;

        let normalized = raw.to_lowercase();
        let captures = DESCRIPTOR_PATTERN
            .captures(&normalized)
            .ok_or(DescriptorError::Malformed)?;

        let width_str = captures.name("width").map_or("", |m| m.as_str());
        // A single side describes a square.
        let height_str = captures.name("height").map_or(width_str, |m| m.as_str());

        let [width, height] = parse_sides([width_str, height_str])?;

        let format = captures
            .name("extension")
            .map_or(default_format, |m| ImageFormat::from_extension(m.as_str()));

        Ok(Self {
            width,
            height,
            format,
        })
    }
}

/// Rejects whitespace and repeated delimiters before any numeric parsing.
fn check_structure(raw: &str) -> Result<(), DescriptorError> {
    if raw.chars().any(char::is_whitespace) {
        return Err(DescriptorError::Malformed);
    }

    let normalized = raw.to_lowercase();
    let separators = normalized.chars().filter(|c| *c == 'x').count();
    let dots = normalized.chars().filter(|c| *c == '.').count();
    if separators > 1 || dots > 1 {
        return Err(DescriptorError::Malformed);
    }

    Ok(())
}

/// Digits are checked on both sides before either side is converted.
fn parse_sides(sides: [&str; 2]) -> Result<[u32; 2], DescriptorError> {
    if !sides.iter().all(|side| side.chars().all(|c| c.is_ascii_digit())) {
        return Err(DescriptorError::NonNumeric);
    }
    if sides.iter().any(|side| side.is_empty()) {
        return Err(DescriptorError::Malformed);
    }

    // Only digits remain, so the sole failure left is overflow.
    let [width, height] = sides;
    Ok([
        width.parse().map_err(|_| DescriptorError::Overflow)?,
        height.parse().map_err(|_| DescriptorError::Overflow)?,
    ])
}
