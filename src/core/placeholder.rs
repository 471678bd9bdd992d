use crate::core::color::ColorValue;
use crate::core::descriptor::{DescriptorError, ImageFormat, SizeFormatDescriptor};
use crate::core::error::{PlaceholderError, ValidationError};
use crate::core::renderer::{self, RenderRequest, RenderResult};

pub type OperationOutcome = Result<RenderResult, PlaceholderError>;

/// Validated, read-only generation limits and defaults.
#[derive(Debug, Clone)]
pub struct PlaceholderSettings {
    pub default_width: u32,
    pub default_height: u32,
    pub max_side_size: u32,
    pub max_text_length: usize,
    pub default_format: ImageFormat,
    pub default_background_color: ColorValue,
    pub default_text_color: ColorValue,
}

/// Runs the validation pipeline and renders placeholders.
///
/// Holds only the settings; every parsed value lives for one call.
#[derive(Debug, Clone)]
pub struct PlaceholderService {
    settings: PlaceholderSettings,
}

impl PlaceholderService {
    pub fn new(settings: PlaceholderSettings) -> Self {
        Self { settings }
    }

    pub fn settings(&self) -> &PlaceholderSettings {
        &self.settings
    }

    /// Placeholder at the configured default size, format and colors.
    pub fn generate_default(&self, text: Option<&str>) -> OperationOutcome {
        let descriptor = SizeFormatDescriptor {
            width: self.settings.default_width,
            height: self.settings.default_height,
            format: self.settings.default_format,
        };
        self.run(descriptor, text, None, None)
    }

    pub fn generate(&self, size_format: &str, text: Option<&str>) -> OperationOutcome {
        let descriptor = self.parse_descriptor(size_format)?;
        self.run(descriptor, text, None, None)
    }

    pub fn generate_with_background(
        &self,
        size_format: &str,
        text: Option<&str>,
        background_color: &str,
    ) -> OperationOutcome {
        let descriptor = self.parse_descriptor(size_format)?;
        self.run(descriptor, text, Some(background_color), None)
    }

    pub fn generate_with_colors(
        &self,
        size_format: &str,
        text: Option<&str>,
        background_color: &str,
        text_color: &str,
    ) -> OperationOutcome {
        let descriptor = self.parse_descriptor(size_format)?;
        self.run(descriptor, text, Some(background_color), Some(text_color))
    }

    fn parse_descriptor(&self, raw: &str) -> Result<SizeFormatDescriptor, ValidationError> {
        SizeFormatDescriptor::parse_with_default(raw, self.settings.default_format).map_err(
            |err| match err {
                DescriptorError::Malformed => ValidationError::InvalidFormat,
                DescriptorError::NonNumeric => ValidationError::NonNumericSize,
                DescriptorError::Overflow => {
                    ValidationError::ExceedsMaxSize(self.settings.max_side_size)
                }
            },
        )
    }

    fn run(
        &self,
        descriptor: SizeFormatDescriptor,
        text: Option<&str>,
        background_color: Option<&str>,
        text_color: Option<&str>,
    ) -> OperationOutcome {
        let request = self.validate(descriptor, text, background_color, text_color)?;

        renderer::render(&request).map_err(|err| {
            tracing::error!(
                "Failed to render {}x{} placeholder: {}",
                descriptor.width,
                descriptor.height,
                err
            );
            PlaceholderError::Internal(err)
        })
    }

    fn validate(
        &self,
        descriptor: SizeFormatDescriptor,
        text: Option<&str>,
        background_color: Option<&str>,
        text_color: Option<&str>,
    ) -> Result<RenderRequest, ValidationError> {
        let max = self.settings.max_side_size;
        if descriptor.width > max || descriptor.height > max {
            return Err(ValidationError::ExceedsMaxSize(max));
        }
        if descriptor.width == 0 || descriptor.height == 0 {
            return Err(ValidationError::BelowMinSize);
        }

        let overlay_text = match text {
            Some(text) if !text.trim().is_empty() => text.to_string(),
            _ => format!("{}x{}", descriptor.width, descriptor.height),
        };
        if overlay_text.chars().count() > self.settings.max_text_length {
            return Err(ValidationError::TextTooLong(self.settings.max_text_length));
        }

        let background_color = match background_color {
            Some(raw) => {
                ColorValue::resolve(raw).map_err(|_| ValidationError::InvalidBackgroundColor)?
            }
            None => self.settings.default_background_color.clone(),
        };
        let text_color = match text_color {
            Some(raw) => ColorValue::resolve(raw).map_err(|_| ValidationError::InvalidTextColor)?,
            None => self.settings.default_text_color.clone(),
        };

        Ok(RenderRequest {
            descriptor,
            background_color,
            text_color,
            overlay_text,
        })
    }
}
