use async_trait::async_trait;
use bytes::Bytes;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use crate::error::RenderError;
use crate::options::EncodeParams;
use crate::png::PngEncoder;
use crate::svg::SvgEncoder;

/// Output format of an encoder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageFormat {
    #[default]
    Png,
    Svg,
}

impl ImageFormat {
    pub fn mime_type(self) -> &'static str {
        match self {
            ImageFormat::Png => "image/png",
            ImageFormat::Svg => "image/svg+xml",
        }
    }

    pub fn extension(self) -> &'static str {
        match self {
            ImageFormat::Png => "png",
            ImageFormat::Svg => "svg",
        }
    }
}

impl FromStr for ImageFormat {
    type Err = RenderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "png" => Ok(ImageFormat::Png),
            "svg" => Ok(ImageFormat::Svg),
            other => Err(RenderError::InvalidOptions(format!(
                "unknown image format {other:?}"
            ))),
        }
    }
}

impl fmt::Display for ImageFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

/// A finished barcode image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedImage {
    pub format: ImageFormat,
    /// Real edge length, at least the requested size.
    pub width: u32,
    pub height: u32,
    pub data: Bytes,
}

impl EncodedImage {
    pub fn mime_type(&self) -> &'static str {
        self.format.mime_type()
    }
}

/// Turns a string into a scannable barcode image.
///
/// Implementations must honor [`EncodeParams::error_correction`] and
/// [`EncodeParams::quiet_zone_modules`] as given.
#[async_trait]
pub trait BarcodeEncoder: Send + Sync {
    fn format(&self) -> ImageFormat;

    async fn encode(&self, data: &str, params: &EncodeParams) -> Result<EncodedImage, RenderError>;
}

/// Returns the built-in encoder for `format`.
pub fn encoder_for(format: ImageFormat) -> Arc<dyn BarcodeEncoder> {
    match format {
        ImageFormat::Png => Arc::new(PngEncoder),
        ImageFormat::Svg => Arc::new(SvgEncoder),
    }
}

/// Pixels per module and total modules for a symbol of `width` modules.
pub(crate) fn module_layout(width: u32, quiet_zone: u32, size: u32) -> (u32, u32) {
    let modules = width + 2 * quiet_zone;
    ((size / modules).max(1), modules)
}
