//! Value math shared by keyframe interpolation and blending.

use crate::value::KeyValue;

/// Linear interpolation of scalars.
#[inline]
pub fn lerp_f32(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

#[inline]
pub fn lerp_vec4(a: [f32; 4], b: [f32; 4], t: f32) -> [f32; 4] {
    std::array::from_fn(|i| lerp_f32(a[i], b[i], t))
}

/// Linear interpolation across value kinds. Discrete kinds and mismatched
/// kinds keep the left value.
pub fn linear_value(a: &KeyValue, b: &KeyValue, t: f32) -> KeyValue {
    match (a, b) {
        (KeyValue::Scalar(va), KeyValue::Scalar(vb)) => KeyValue::Scalar(lerp_f32(*va, *vb, t)),
        (KeyValue::Color(ca), KeyValue::Color(cb)) => KeyValue::Color(lerp_vec4(*ca, *cb, t)),
        _ => a.clone(),
    }
}

const EASE_STEPS: usize = 24;
const EASE_EPSILON: f32 = 1e-6;

/// One axis of a unit cubic bezier (endpoints pinned at 0 and 1).
#[inline]
fn unit_bezier(c1: f32, c2: f32, s: f32) -> f32 {
    let inv = 1.0 - s;
    3.0 * inv * inv * s * c1 + 3.0 * inv * s * s * c2 + s * s * s
}

/// Eased progress for span progress `t` on the curve through control points
/// `(x1, y1)` and `(x2, y2)`. The curve parameter matching `t` on the x axis
/// is found by bisection.
pub fn bezier_ease_t(t: f32, x1: f32, y1: f32, x2: f32, y2: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    if (x1, y1, x2, y2) == (0.0, 0.0, 1.0, 1.0) {
        return t;
    }
    // x controls outside 0..1 would make x(s) non-monotonic
    let (x1, x2) = (x1.clamp(0.0, 1.0), x2.clamp(0.0, 1.0));
    let (mut lo, mut hi) = (0.0f32, 1.0f32);
    let mut s = t;
    for _ in 0..EASE_STEPS {
        let x = unit_bezier(x1, x2, s);
        if (x - t).abs() < EASE_EPSILON {
            break;
        }
        if x < t {
            lo = s;
        } else {
            hi = s;
        }
        s = (lo + hi) * 0.5;
    }
    unit_bezier(y1, y2, s)
}

/// Eases `t` through the `[x1, y1, x2, y2]` curve, then blends linearly.
pub fn bezier_value(a: &KeyValue, b: &KeyValue, t: f32, ctrl: [f32; 4]) -> KeyValue {
    let eased = bezier_ease_t(t, ctrl[0], ctrl[1], ctrl[2], ctrl[3]);
    linear_value(a, b, eased)
}

/// Blend `value` over `current` by `mix`.
///
/// Continuous kinds blend component-wise; discrete kinds replace `current`
/// whenever `mix > 0`. Returns `None` when nothing should be written.
pub fn mix_value(current: Option<&KeyValue>, value: &KeyValue, mix: f32) -> Option<KeyValue> {
    if mix <= 0.0 {
        return None;
    }
    if mix >= 1.0 {
        return Some(value.clone());
    }
    match (current, value) {
        (Some(KeyValue::Scalar(c)), KeyValue::Scalar(v)) => {
            Some(KeyValue::Scalar(lerp_f32(*c, *v, mix)))
        }
        (Some(KeyValue::Color(c)), KeyValue::Color(v)) => {
            Some(KeyValue::Color(lerp_vec4(*c, *v, mix)))
        }
        _ => Some(value.clone()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn linear_bezier_is_identity() {
        for t in [0.0f32, 0.25, 0.5, 0.75, 1.0] {
            assert_eq!(bezier_ease_t(t, 0.0, 0.0, 1.0, 1.0), t);
        }
    }

    #[test]
    fn ease_in_out_is_symmetric_and_pinned() {
        let e = |t| bezier_ease_t(t, 0.42, 0.0, 0.58, 1.0);
        assert!(e(0.0).abs() < 1e-4);
        assert!((e(1.0) - 1.0).abs() < 1e-4);
        assert!((e(0.5) - 0.5).abs() < 1e-3);
        assert!(e(0.25) < 0.25);
        assert!(e(0.75) > 0.75);
    }

    #[test]
    fn discrete_values_hold_left() {
        let a = KeyValue::Int(1);
        let b = KeyValue::Int(9);
        assert_eq!(linear_value(&a, &b, 0.9), KeyValue::Int(1));
        let a = KeyValue::Text("a".into());
        let b = KeyValue::Text("b".into());
        assert_eq!(linear_value(&a, &b, 0.5), a);
    }

    #[test]
    fn mix_blends_continuous_and_replaces_discrete() {
        let current = KeyValue::Scalar(10.0);
        assert_eq!(
            mix_value(Some(&current), &KeyValue::Scalar(20.0), 0.25),
            Some(KeyValue::Scalar(12.5))
        );
        assert_eq!(mix_value(Some(&current), &KeyValue::Scalar(20.0), 0.0), None);
        assert_eq!(
            mix_value(None, &KeyValue::Scalar(20.0), 0.5),
            Some(KeyValue::Scalar(20.0))
        );
        assert_eq!(
            mix_value(Some(&KeyValue::Bool(false)), &KeyValue::Bool(true), 0.1),
            Some(KeyValue::Bool(true))
        );
    }
}
