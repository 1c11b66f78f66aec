//! PayQR realtime regeneration.
//!
//! Keeps a displayed QR code in step with a payment form that is being
//! edited keystroke by keystroke.
//!
//! ## Guarantees
//!
//! - A result is always visible. Before the first edit it is rendered from
//!   caller-supplied placeholder input (version `0`).
//! - A burst of edits closer together than [`RegenConfig::debounce`] triggers
//!   exactly one generation, built from the last values.
//! - Results are request-ordered: each generation gets a monotonically
//!   increasing token when its debounce expires, and only the newest token
//!   may become visible. A slow stale generation that finishes last is
//!   dropped.
//! - A failing build or encode is logged and counted; the previous result
//!   stays visible.
//! - While required fields are missing or malformed, they are borrowed from
//!   the placeholder so the preview stays live.
//!   [`Coordinator::is_input_valid`] and
//!   [`GenerationResult::placeholder_backed`] tell the two situations apart.

mod config;
mod coordinator;
mod error;
mod merge;
mod result;
pub mod serde_millis;

pub use crate::config::{RegenConfig, DEFAULT_DEBOUNCE};
pub use crate::coordinator::Coordinator;
pub use crate::error::RegenError;
pub use crate::merge::merge_with_placeholder;
pub use crate::result::{GenerationResult, Phase, RegenStats};
