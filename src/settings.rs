use std::env;

use serde::Deserialize;
use thiserror::Error;
use tracing::info;

use crate::core::color::ColorValue;
use crate::core::descriptor::ImageFormat;
use crate::core::placeholder::PlaceholderSettings;

/// Largest side accepted in configuration; keeps canvases within encoder limits.
pub const MAX_CONFIGURABLE_SIDE: u32 = 10_000;

#[derive(Clone, Deserialize, Debug)]
pub struct Config {
    pub env: String, // file / server
    pub host: String,
    pub port: u16,
    pub prefix: Option<String>,
}

/// Raw `IMAGE_*` environment values.
#[derive(Clone, Deserialize, Debug)]
pub struct ImageSettings {
    pub default_width: u32,
    pub default_height: u32,
    pub max_side_size: u32,
    pub max_text_length: usize,
    pub default_image_type: String,
    pub default_background_color: String,
    pub default_text_color: String,
}

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to read configuration from environment: {0}")]
    Env(#[from] envy::Error),

    #[error("max side size must be between 1 and {limit}, got {value}")]
    MaxSideSize { value: u32, limit: u32 },

    #[error("default {side} must be between 1 and the max side size {max}, got {value}")]
    DefaultSide {
        side: &'static str,
        value: u32,
        max: u32,
    },

    #[error("max text length must be at least 1")]
    MaxTextLength,

    #[error("default image type must be one of jpg, jpeg, png or gif, got {0:?}")]
    ImageType(String),

    #[error("default {which} color {value:?} is neither a color name nor a hex code")]
    Color { which: &'static str, value: String },
}

impl TryFrom<ImageSettings> for PlaceholderSettings {
    type Error = SettingsError;

    fn try_from(raw: ImageSettings) -> Result<Self, Self::Error> {
        let max = raw.max_side_size;
        if max == 0 || max > MAX_CONFIGURABLE_SIDE {
            return Err(SettingsError::MaxSideSize {
                value: max,
                limit: MAX_CONFIGURABLE_SIDE,
            });
        }
        for (side, value) in [("width", raw.default_width), ("height", raw.default_height)] {
            if value == 0 || value > max {
                return Err(SettingsError::DefaultSide { side, value, max });
            }
        }
        if raw.max_text_length == 0 {
            return Err(SettingsError::MaxTextLength);
        }

        let default_format = ImageFormat::from_config_value(&raw.default_image_type)
            .ok_or_else(|| SettingsError::ImageType(raw.default_image_type.clone()))?;
        let default_background_color = ColorValue::resolve(&raw.default_background_color)
            .map_err(|_| SettingsError::Color {
                which: "background",
                value: raw.default_background_color.clone(),
            })?;
        let default_text_color =
            ColorValue::resolve(&raw.default_text_color).map_err(|_| SettingsError::Color {
                which: "text",
                value: raw.default_text_color.clone(),
            })?;

        Ok(Self {
            default_width: raw.default_width,
            default_height: raw.default_height,
            max_side_size: max,
            max_text_length: raw.max_text_length,
            default_format,
            default_background_color,
            default_text_color,
        })
    }
}

fn load_env_file() {
    let env_var = env::var("env").unwrap_or("file".to_string());
    if env_var == "file" {
        info!("using .env file as environtment variable");
        let _ = dotenvy::dotenv();
    } else {
        info!("using server environtment as environtment variable");
    }
}

pub fn get_config() -> Result<Config, SettingsError> {
    load_env_file();
    Ok(envy::from_env::<Config>()?)
}

/// Reads and validates the `IMAGE_*` options.
pub fn get_placeholder_settings() -> Result<PlaceholderSettings, SettingsError> {
    load_env_file();
    let raw = envy::prefixed("IMAGE_").from_env::<ImageSettings>()?;
    PlaceholderSettings::try_from(raw)
}
