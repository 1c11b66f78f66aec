//! Foreground/background contrast evaluation.
//!
//! Scanners threshold the image into dark and light modules. Low contrast or
//! an inverted palette (light modules on a dark background) makes that step
//! unreliable, so both are reported as advisories. Nothing here blocks
//! rendering.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::color::Color;

/// Minimum contrast ratio accepted without an advisory.
pub const DEFAULT_MIN_CONTRAST_RATIO: f64 = 4.5;

/// Why a color pair is likely to scan poorly.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ContrastWarning {
    LowContrast { ratio: f64, min_ratio: f64 },
    Inverted,
}

impl fmt::Display for ContrastWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ContrastWarning::LowContrast { ratio, min_ratio } => write!(
                f,
                "contrast ratio {ratio:.2}:1 is below {min_ratio:.1}:1; the code may not scan"
            ),
            ContrastWarning::Inverted => {
                f.write_str("foreground is lighter than background; many scanners expect dark modules")
            }
        }
    }
}

/// Outcome of [`evaluate_contrast`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ContrastReport {
    pub ratio: f64,
    pub min_ratio: f64,
    pub inverted: bool,
}

impl ContrastReport {
    pub fn passes(&self) -> bool {
        self.ratio >= self.min_ratio && !self.inverted
    }

    /// The most severe problem, if any. Low contrast wins over inversion.
    pub fn warning(&self) -> Option<ContrastWarning> {
        if self.ratio < self.min_ratio {
            Some(ContrastWarning::LowContrast {
                ratio: self.ratio,
                min_ratio: self.min_ratio,
            })
        } else if self.inverted {
            Some(ContrastWarning::Inverted)
        } else {
            None
        }
    }
}

/// WCAG contrast ratio between two colors, in `1.0..=21.0`.
pub fn contrast_ratio(a: Color, b: Color) -> f64 {
    let (la, lb) = (a.relative_luminance(), b.relative_luminance());
    let (lighter, darker) = if la >= lb { (la, lb) } else { (lb, la) };
    (lighter + 0.05) / (darker + 0.05)
}

/// Evaluates a foreground/background pair against `min_ratio`.
///
/// ```rust
/// use render::{evaluate_contrast, Color};
///
/// let report = evaluate_contrast(Color::BLACK, Color::WHITE, 4.5);
/// assert!(report.passes());
/// assert!((report.ratio - 21.0).abs() < 1e-9);
/// ```
pub fn evaluate_contrast(foreground: Color, background: Color, min_ratio: f64) -> ContrastReport {
    ContrastReport {
        ratio: contrast_ratio(foreground, background),
        min_ratio,
        inverted: foreground.relative_luminance() > background.relative_luminance(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn black_on_white_passes() {
        let report = evaluate_contrast(Color::BLACK, Color::WHITE, DEFAULT_MIN_CONTRAST_RATIO);
        assert!(report.passes());
        assert_eq!(report.warning(), None);
    }

    #[test]
    fn ratio_is_symmetric() {
        let a = Color::rgb(30, 60, 90);
        let b = Color::rgb(200, 210, 220);
        assert!((contrast_ratio(a, b) - contrast_ratio(b, a)).abs() < 1e-12);
    }

    #[test]
    fn light_gray_on_white_is_low_contrast() {
        let report = evaluate_contrast(
            Color::rgb(0xcc, 0xcc, 0xcc),
            Color::WHITE,
            DEFAULT_MIN_CONTRAST_RATIO,
        );
        assert!(!report.passes());
        assert!(matches!(
            report.warning(),
            Some(ContrastWarning::LowContrast { .. })
        ));
    }

    #[test]
    fn white_on_black_is_inverted() {
        let report = evaluate_contrast(Color::WHITE, Color::BLACK, DEFAULT_MIN_CONTRAST_RATIO);
        assert!(report.ratio > 20.0);
        assert!(report.inverted);
        assert_eq!(report.warning(), Some(ContrastWarning::Inverted));
    }

    #[test]
    fn identical_colors_have_ratio_one() {
        let c = Color::rgb(10, 120, 200);
        assert!((contrast_ratio(c, c) - 1.0).abs() < 1e-12);
        let report = evaluate_contrast(c, c, DEFAULT_MIN_CONTRAST_RATIO);
        assert!(!report.inverted);
        assert!(report.warning().unwrap().to_string().contains("below"));
    }
}
