use thiserror::Error;

pub const INTERNAL_FAILURE_MESSAGE: &str =
    "There was an error generating the image, please try again.";

/// Caller-input failures. Each variant carries the message returned to the client.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("The provided format is not valid.")]
    InvalidFormat,

    #[error("The width/height size must be made of numbers only.")]
    NonNumericSize,

    #[error("The width/height can't be greater than {0}.")]
    ExceedsMaxSize(u32),

    #[error("The width/height must be at least 1px.")]
    BelowMinSize,

    #[error("The text can't be longer than {0} letters.")]
    TextTooLong(usize),

    #[error("The provided background color does not have a valid format.")]
    InvalidBackgroundColor,

    #[error("The provided text color does not have a valid format.")]
    InvalidTextColor,
}

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("failed to encode canvas: {0}")]
    Encode(#[from] image::ImageError),

    #[error("render worker failed: {0}")]
    Worker(String),
}

#[derive(Debug, Error)]
pub enum PlaceholderError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Only the generic message reaches clients; the source carries the detail.
    #[error("{}", INTERNAL_FAILURE_MESSAGE)]
    Internal(#[from] RenderError),
}
