//! WCAG 2.1 contrast ratio between two display colors.

use crate::color::Color;
use crate::transfer::srgb_to_linear;

/// Relative luminance per WCAG 2.1, in `[0, 1]`. Alpha is ignored.
///
///   L = 0.2126 * `R_lin` + 0.7152 * `G_lin` + 0.0722 * `B_lin`
pub fn relative_luminance(color: Color) -> f64 {
    let [r, g, b] = color.to_unit_rgb().map(srgb_to_linear);
    0.2126 * r + 0.7152 * g + 0.0722 * b
}

/// Contrast ratio `(L_lighter + 0.05) / (L_darker + 0.05)`.
///
/// Symmetric in its arguments, always in `[1.0, 21.0]`.
pub fn contrast_ratio(a: Color, b: Color) -> f64 {
    let la = relative_luminance(a);
    let lb = relative_luminance(b);
    let (lighter, darker) = if la >= lb { (la, lb) } else { (lb, la) };
    (lighter + 0.05) / (darker + 0.05)
}
