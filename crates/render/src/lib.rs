//! PayQR barcode rendering layer.
//!
//! Encodes a payment URI into a QR image. The caller picks size, colors and
//! an optional center logo through [`RenderOptions`]; everything that affects
//! scannability is pinned by [`EncodeParams`]:
//!
//! - error correction is always [`ErrorCorrection::High`] (~30% recovery),
//!   which leaves room for a logo covering up to a fifth of the side
//! - the quiet zone is always [`QUIET_ZONE_MODULES`] modules wide
//!
//! Color choices are never rejected. [`evaluate_contrast`] produces an
//! advisory [`ContrastReport`] instead.
//!
//! Encoders sit behind the async [`BarcodeEncoder`] trait so callers can
//! swap in their own backend. [`encoder_for`] returns the built-in PNG or SVG
//! encoder.
//!
//! ```rust
//! use render::{rasterize, EncodeParams, RenderOptions};
//!
//! let params = EncodeParams::from_options(&RenderOptions::default().with_size(256));
//! let canvas = rasterize("upi://pay?pa=a@b&pn=A&cu=INR", &params).unwrap();
//! assert_eq!(canvas.dimensions(), (256, 256));
//! ```

mod color;
mod contrast;
mod encoder;
mod error;
mod options;
mod png;
mod svg;

pub use crate::color::Color;
pub use crate::contrast::{
    contrast_ratio, evaluate_contrast, ContrastReport, ContrastWarning, DEFAULT_MIN_CONTRAST_RATIO,
};
pub use crate::encoder::{encoder_for, BarcodeEncoder, EncodedImage, ImageFormat};
pub use crate::error::RenderError;
pub use crate::options::{
    EncodeParams, ErrorCorrection, RenderOptions, MAX_SIZE, MIN_SIZE, QUIET_ZONE_MODULES,
};
pub use crate::png::{rasterize, PngEncoder};
pub use crate::svg::{render_svg, SvgEncoder};
