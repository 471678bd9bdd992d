use poem_openapi::Object;

#[derive(Object, Debug)]
pub struct BadRequestResponse {
    pub message: String,
}

#[derive(Object, Debug)]
pub struct InternalServerErrorResponse {
    pub message: String,
}

impl InternalServerErrorResponse {
    /// Logs the full failure and keeps only the public message for the body.
    pub fn new(filepath: &str, function: &str, public_message: &str, err: &str) -> Self {
        tracing::error!("error: on {}::{} error: {}", filepath, function, err);
        Self {
            message: public_message.to_string(),
        }
    }
}
