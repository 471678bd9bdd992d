use std::sync::Arc;

use poem::web::Data;
use poem_openapi::{
    OpenApi, Tags,
    param::{Path, Query},
    payload::Json,
};

use crate::{
    AppState,
    core::{
        error::{INTERNAL_FAILURE_MESSAGE, PlaceholderError, RenderError},
        placeholder::{OperationOutcome, PlaceholderService},
    },
    schemas::{
        common::{BadRequestResponse, InternalServerErrorResponse},
        placeholder::{HealthResponse, ImageResponse},
    },
};

#[derive(Tags)]
enum ApiPlaceholderTags {
    Placeholder,
}

pub struct ApiPlaceholder;

/// Renders on the blocking pool and maps the outcome to an HTTP response.
async fn respond<F>(state: &AppState, endpoint: &str, generate: F) -> ImageResponse
where
    F: FnOnce(&PlaceholderService) -> OperationOutcome + Send + 'static,
{
    let service = state.service.clone();
    let outcome = tokio::task::spawn_blocking(move || generate(&service))
        .await
        .unwrap_or_else(|e| Err(RenderError::Worker(e.to_string()).into()));

    match outcome {
        Ok(result) => {
            tracing::info!(
                "Rendered placeholder: endpoint={}, type={}, size={} bytes",
                endpoint,
                result.mime_type,
                result.image_bytes.len()
            );
            result.into()
        }
        Err(PlaceholderError::Validation(err)) => {
            tracing::debug!("Rejected placeholder request: endpoint={}, reason={}", endpoint, err);
            ImageResponse::BadRequest(Json(BadRequestResponse {
                message: err.to_string(),
            }))
        }
        Err(PlaceholderError::Internal(err)) => {
            ImageResponse::InternalServerError(Json(InternalServerErrorResponse::new(
                "route.placeholder",
                endpoint,
                INTERNAL_FAILURE_MESSAGE,
                &err.to_string(),
            )))
        }
    }
}

#[OpenApi()]
impl ApiPlaceholder {
    /// Default placeholder
    ///
    /// Placeholder with the configured default size, type and colors.
    #[oai(path = "/", method = "get", tag = "ApiPlaceholderTags::Placeholder")]
    async fn default_image(
        &self,
        text: Query<Option<String>>,
        state: Data<&Arc<AppState>>,
    ) -> ImageResponse {
        respond(&state, "default_image", move |service| {
            service.generate_default(text.0.as_deref())
        })
        .await
    }

    /// Placeholder
    ///
    /// `size_format` is `<width>[x<height>][.<jpg|jpeg|png|gif>]`, e.g. `640x480.png` or `300`.
    #[oai(
        path = "/:size_format",
        method = "get",
        tag = "ApiPlaceholderTags::Placeholder"
    )]
    async fn image(
        &self,
        size_format: Path<String>,
        text: Query<Option<String>>,
        state: Data<&Arc<AppState>>,
    ) -> ImageResponse {
        respond(&state, "image", move |service| {
            service.generate(&size_format.0, text.0.as_deref())
        })
        .await
    }

    /// Placeholder with custom background
    ///
    /// `background_color` is a color name (`navy`) or hex code (`fff`, `72962e`).
    #[oai(
        path = "/:size_format/:background_color",
        method = "get",
        tag = "ApiPlaceholderTags::Placeholder"
    )]
    async fn image_with_background(
        &self,
        size_format: Path<String>,
        background_color: Path<String>,
        text: Query<Option<String>>,
        state: Data<&Arc<AppState>>,
    ) -> ImageResponse {
        respond(&state, "image_with_background", move |service| {
            service.generate_with_background(&size_format.0, text.0.as_deref(), &background_color.0)
        })
        .await
    }

    /// Placeholder with custom colors
    #[oai(
        path = "/:size_format/:background_color/:text_color",
        method = "get",
        tag = "ApiPlaceholderTags::Placeholder"
    )]
    async fn image_with_colors(
        &self,
        size_format: Path<String>,
        background_color: Path<String>,
        text_color: Path<String>,
        text: Query<Option<String>>,
        state: Data<&Arc<AppState>>,
    ) -> ImageResponse {
        respond(&state, "image_with_colors", move |service| {
            service.generate_with_colors(
                &size_format.0,
                text.0.as_deref(),
                &background_color.0,
                &text_color.0,
            )
        })
        .await
    }

    #[oai(path = "/health", method = "get")]
    async fn health(&self, state: Data<&Arc<AppState>>) -> Json<HealthResponse> {
        let settings = state.service.settings();

        Json(HealthResponse {
            status: "healthy".to_string(),
            max_side_size: settings.max_side_size,
            max_text_length: settings.max_text_length as u64,
            default_image_type: settings.default_format.extension().to_string(),
        })
    }
}
