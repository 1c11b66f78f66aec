use bytes::Bytes;
use serde::{Deserialize, Serialize};

use crate::color::Color;
use crate::error::RenderError;

pub const MIN_SIZE: u32 = 64;
pub const MAX_SIZE: u32 = 4096;

/// Quiet-zone width in modules, as required by ISO/IEC 18004.
pub const QUIET_ZONE_MODULES: u32 = 4;

/// Presentation parameters chosen by the caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderOptions {
    /// Target edge length in pixels. Symbols with more modules than this
    /// are drawn at one pixel per module instead.
    pub size: u32,
    pub foreground: Color,
    pub background: Color,
    /// Encoded logo image (PNG, JPEG or WebP) drawn over the center.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logo: Option<Bytes>,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            size: 512,
            foreground: Color::BLACK,
            background: Color::WHITE,
            logo: None,
        }
    }
}

impl RenderOptions {
    pub fn with_size(mut self, size: u32) -> Self {
        self.size = size;
        self
    }

    pub fn with_colors(mut self, foreground: Color, background: Color) -> Self {
        self.foreground = foreground;
        self.background = background;
        self
    }

    pub fn with_logo(mut self, logo: impl Into<Bytes>) -> Self {
        self.logo = Some(logo.into());
        self
    }

    pub fn validate(&self) -> Result<(), RenderError> {
        if !(MIN_SIZE..=MAX_SIZE).contains(&self.size) {
            return Err(RenderError::InvalidOptions(format!(
                "size {} outside {MIN_SIZE}..={MAX_SIZE}",
                self.size
            )));
        }
        if self.logo.as_ref().is_some_and(|logo| logo.is_empty()) {
            return Err(RenderError::InvalidOptions("logo is empty".into()));
        }
        Ok(())
    }
}

/// Error-correction level requested from the encoder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ErrorCorrection {
    /// ~7% recovery.
    Low,
    /// ~15% recovery.
    Medium,
    /// ~25% recovery.
    Quartile,
    /// ~30% recovery.
    High,
}

impl From<ErrorCorrection> for qrcode::EcLevel {
    fn from(level: ErrorCorrection) -> Self {
        match level {
            ErrorCorrection::Low => qrcode::EcLevel::L,
            ErrorCorrection::Medium => qrcode::EcLevel::M,
            ErrorCorrection::Quartile => qrcode::EcLevel::Q,
            ErrorCorrection::High => qrcode::EcLevel::H,
        }
    }
}

/// Everything an encoder receives for one image.
///
/// Built only through [`EncodeParams::from_options`], which pins the
/// error-correction level to [`ErrorCorrection::High`] and the quiet zone to
/// [`QUIET_ZONE_MODULES`] whatever colors or logo the caller picked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodeParams {
    pub size: u32,
    pub foreground: Color,
    pub background: Color,
    pub logo: Option<Bytes>,
    pub error_correction: ErrorCorrection,
    pub quiet_zone_modules: u32,
}

impl EncodeParams {
    pub fn from_options(options: &RenderOptions) -> Self {
        Self {
            size: options.size,
            foreground: options.foreground,
            background: options.background,
            logo: options.logo.clone(),
            error_correction: ErrorCorrection::High,
            quiet_zone_modules: QUIET_ZONE_MODULES,
        }
    }
}
