//! Pixel-space plan coordinates <-> meter-space scene coordinates.
//!
//! The plan's vertical pixel axis grows downwards; it maps onto the scene's
//! negative depth axis, so `z = -y / scale`.

/// Scale used when the plan has no usable `px_per_meter`.
pub const DEFAULT_PX_PER_METER: f64 = 100.0;

/// A point on the horizontal scene plane, in meters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SceneXZ {
    pub x: f64,
    pub z: f64,
}

/// `value` if finite, otherwise `fallback`.
pub fn safe_number(value: f64, fallback: f64) -> f64 {
    if value.is_finite() {
        value
    } else {
        fallback
    }
}

/// The given scale if it is finite and positive, otherwise the default.
pub fn effective_scale(px_per_meter: f64) -> f64 {
    if px_per_meter.is_finite() && px_per_meter > 0.0 {
        px_per_meter
    } else {
        DEFAULT_PX_PER_METER
    }
}

/// Effective scale for an optional document scale.
pub fn scale_or_default(px_per_meter: Option<f64>) -> f64 {
    px_per_meter.map(effective_scale).unwrap_or(DEFAULT_PX_PER_METER)
}

/// Map a plan pixel position onto the scene plane.
pub fn to_scene_xz(pixel_x: f64, pixel_y: f64, px_per_meter: f64) -> SceneXZ {
    let scale = effective_scale(px_per_meter);
    SceneXZ {
        x: safe_number(pixel_x, 0.0) / scale,
        z: -safe_number(pixel_y, 0.0) / scale,
    }
}

/// Inverse of [`to_scene_xz`]: scene meters back to plan pixels.
pub fn to_plan_px(x: f64, z: f64, px_per_meter: f64) -> (f64, f64) {
    let scale = effective_scale(px_per_meter);
    (safe_number(x, 0.0) * scale, -safe_number(z, 0.0) * scale)
}

/// Convert a pixel length to meters.
pub fn px_to_meters(length_px: f64, px_per_meter: f64) -> f64 {
    length_px / effective_scale(px_per_meter)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_linear_mapping() {
        for scale in [1.0, 37.5, 100.0, 250.0] {
            let p = to_scene_xz(120.0, -40.0, scale);
            assert!((p.x - 120.0 / scale).abs() < 1e-12);
            assert!((p.z - 40.0 / scale).abs() < 1e-12);
        }
    }

    #[test]
    fn test_down_maps_to_negative_depth() {
        let p = to_scene_xz(0.0, 250.0, 50.0);
        assert_eq!(p.x, 0.0);
        assert_eq!(p.z, -5.0);
    }

    #[test]
    fn test_bad_scale_falls_back_to_default() {
        let expected = to_scene_xz(300.0, 200.0, 100.0);
        for bad in [0.0, -5.0, f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            assert_eq!(to_scene_xz(300.0, 200.0, bad), expected);
        }
        assert_eq!(scale_or_default(None), DEFAULT_PX_PER_METER);
        assert_eq!(scale_or_default(Some(-1.0)), DEFAULT_PX_PER_METER);
        assert_eq!(scale_or_default(Some(40.0)), 40.0);
    }

    #[test]
    fn test_non_finite_inputs_degenerate_to_zero() {
        let p = to_scene_xz(f64::NAN, f64::INFINITY, 100.0);
        assert_eq!(p.x, 0.0);
        assert_eq!(p.z, 0.0);
        assert!(p.x.is_finite() && p.z.is_finite());
    }

    #[test]
    fn test_inverse_mapping() {
        let p = to_scene_xz(432.0, 118.0, 80.0);
        let (px, py) = to_plan_px(p.x, p.z, 80.0);
        assert!((px - 432.0).abs() < 1e-9);
        assert!((py - 118.0).abs() < 1e-9);
    }

    #[test]
    fn test_px_to_meters() {
        assert_eq!(px_to_meters(200.0, 100.0), 2.0);
        assert_eq!(px_to_meters(200.0, 0.0), 2.0);
    }
}
