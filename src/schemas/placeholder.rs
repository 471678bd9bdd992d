use poem_openapi::{
    ApiResponse, Object,
    payload::{Binary, Json},
};

use super::common::{BadRequestResponse, InternalServerErrorResponse};
use crate::core::{descriptor::ImageFormat, renderer::RenderResult};

#[derive(ApiResponse)]
pub enum ImageResponse {
    /// JPEG placeholder
    #[oai(status = 200, content_type = "image/jpeg")]
    Jpeg(Binary<Vec<u8>>),

    /// PNG placeholder
    #[oai(status = 200, content_type = "image/png")]
    Png(Binary<Vec<u8>>),

    /// GIF placeholder
    #[oai(status = 200, content_type = "image/gif")]
    Gif(Binary<Vec<u8>>),

    #[oai(status = 400)]
    BadRequest(Json<BadRequestResponse>),

    #[oai(status = 500)]
    InternalServerError(Json<InternalServerErrorResponse>),
}

impl From<RenderResult> for ImageResponse {
    fn from(result: RenderResult) -> Self {
        let body = Binary(result.image_bytes);
        match result.format {
            ImageFormat::Jpeg => Self::Jpeg(body),
            ImageFormat::Png => Self::Png(body),
            ImageFormat::Gif => Self::Gif(body),
        }
    }
}

#[derive(Object, Debug)]
pub struct HealthResponse {
    pub status: String,

    /// Largest accepted width/height in pixels
    pub max_side_size: u32,

    /// Longest accepted overlay text in characters
    pub max_text_length: u64,

    /// Extension used when the descriptor has none
    pub default_image_type: String,
}
