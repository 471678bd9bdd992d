use std::io::Cursor;

use font8x8::{BASIC_FONTS, LATIN_FONTS, UnicodeFonts};
use image::{DynamicImage, Rgb, RgbImage};

use crate::core::color::ColorValue;
use crate::core::descriptor::{ImageFormat, SizeFormatDescriptor};
use crate::core::error::RenderError;

const GLYPH_SIZE: u32 = 8;
/// Each font pixel becomes a `GLYPH_SCALE` square, giving a 16px cell.
const GLYPH_SCALE: u32 = 2;
const FALLBACK_GLYPH: char = '?';

/// Everything needed to draw one placeholder.
#[derive(Debug, Clone)]
pub struct RenderRequest {
    pub descriptor: SizeFormatDescriptor,
    pub background_color: ColorValue,
    pub text_color: ColorValue,
    pub overlay_text: String,
}

#[derive(Debug, Clone)]
pub struct RenderResult {
    pub image_bytes: Vec<u8>,
    pub mime_type: &'static str,
    pub format: ImageFormat,
}

/// Fills the canvas, draws the overlay text with its top-left corner at the
/// canvas center and encodes the result.
pub fn render(request: &RenderRequest) -> Result<RenderResult, RenderError> {
    let SizeFormatDescriptor {
        width,
        height,
        format,
    } = request.descriptor;

    let mut canvas = RgbImage::from_pixel(width, height, request.background_color.to_rgb());
    draw_text(
        &mut canvas,
        width / 2,
        height / 2,
        &request.overlay_text,
        request.text_color.to_rgb(),
    );

    let image_bytes = encode(canvas, format)?;
    tracing::debug!(
        "Encoded {}x{} {} canvas into {} bytes",
        width,
        height,
        format.extension(),
        image_bytes.len()
    );

    Ok(RenderResult {
        image_bytes,
        mime_type: format.mime_type(),
        format,
    })
}

fn glyph_for(ch: char) -> [u8; 8] {
    BASIC_FONTS
        .get(ch)
        .or_else(|| LATIN_FONTS.get(ch))
        .or_else(|| BASIC_FONTS.get(FALLBACK_GLYPH))
        .unwrap_or([0; 8])
}

fn draw_text(canvas: &mut RgbImage, origin_x: u32, origin_y: u32, text: &str, color: Rgb<u8>) {
    let (width, height) = canvas.dimensions();
    let advance = GLYPH_SIZE * GLYPH_SCALE;

    for (index, ch) in text.chars().enumerate() {
        let offset = u32::try_from(index)
            .ok()
            .and_then(|i| i.checked_mul(advance))
            .and_then(|o| o.checked_add(origin_x));
        let glyph_x = match offset {
            Some(x) if x < width => x,
            // Everything further right is off the canvas.
            _ => break,
        };

        // Rows are top to bottom, bit 0 is the leftmost pixel.
        for (row, bits) in (0u32..).zip(glyph_for(ch)) {
            for column in 0..GLYPH_SIZE {
                if bits & (1 << column) == 0 {
                    continue;
                }
                fill_block(
                    canvas,
                    glyph_x.saturating_add(column * GLYPH_SCALE),
                    origin_y.saturating_add(row * GLYPH_SCALE),
                    width,
                    height,
                    color,
                );
            }
        }
    }
}

fn fill_block(canvas: &mut RgbImage, x: u32, y: u32, width: u32, height: u32, color: Rgb<u8>) {
    for py in y..y.saturating_add(GLYPH_SCALE).min(height) {
        for px in x..x.saturating_add(GLYPH_SCALE).min(width) {
            canvas.put_pixel(px, py, color);
        }
    }
}

fn encode(canvas: RgbImage, format: ImageFormat) -> Result<Vec<u8>, RenderError> {
    // The GIF encoder quantizes from RGBA frames.
    let image = match format {
        ImageFormat::Gif => DynamicImage::ImageRgba8(DynamicImage::ImageRgb8(canvas).to_rgba8()),
        ImageFormat::Jpeg | ImageFormat::Png => DynamicImage::ImageRgb8(canvas),
    };

    let mut buf = Vec::new();
    image.write_to(&mut Cursor::new(&mut buf), format.into())?;
    Ok(buf)
}
