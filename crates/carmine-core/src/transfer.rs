//! sRGB transfer function (IEC 61966-2-1).
//!
//! ```text
//! to_linear:   V <= 0.04045 → V / 12.92
//!              V >  0.04045 → ((V + 0.055) / 1.055) ^ 2.4
//! ```

/// Convert an encoded sRGB channel in `[0, 1]` to linear light.
pub fn srgb_to_linear(encoded: f64) -> f64 {
    if encoded <= 0.04045 {
        encoded / 12.92
    } else {
        ((encoded + 0.055) / 1.055).powf(2.4)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f64 = 1e-9;

    #[test]
    fn test_endpoints() {
        assert!(srgb_to_linear(0.0).abs() < EPSILON);
        assert!((srgb_to_linear(1.0) - 1.0).abs() < EPSILON);
    }

    #[test]
    fn test_linear_segment() {
        let v = 0.04;
        assert!((srgb_to_linear(v) - v / 12.92).abs() < EPSILON);
    }

    #[test]
    fn test_mid_gray() {
        // 0.5 encodes ~21.4% linear light.
        let lin = srgb_to_linear(0.5);
        assert!((lin - 0.214_041).abs() < 1e-5, "mid gray: {lin}");
    }

    #[test]
    fn test_monotonic() {
        let mut prev = srgb_to_linear(0.0);
        for i in 1..=255 {
            let next = srgb_to_linear(f64::from(i) / 255.0);
            assert!(next > prev, "not monotonic at {i}");
            prev = next;
        }
    }
}
