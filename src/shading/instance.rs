//! Ornament instance math (CPU mirror of `ornament.wgsl`).

use glam::{Mat3, Vec3, Vec4};

use super::{eased_mix, lerp};
use crate::lighting::LightingUniform;

/// Blink pulse sharpness. The high exponent compresses the "on" time to a
/// small fraction of the cycle.
const BLINK_EXPONENT: i32 = 30;
/// Blink pulse rate in radians per second.
const BLINK_SPEED: f32 = 2.0;

/// Interpolated instance position plus the continuous bob/sway offset.
///
/// Unlike foliage floating noise, the bob/sway is not damped at full
/// assembly — ornaments keep swinging on the tree.
pub fn instance_position(
    scatter: Vec3,
    tree: Vec3,
    orientation: Vec4,
    mix: f32,
    time: f32,
) -> Vec3 {
    let mut pos = scatter.lerp(tree, eased_mix(mix));
    pos.y += (time * 0.5 + orientation.x * 10.0).sin() * 0.15;
    pos.x += (time * 0.3 + orientation.y * 10.0).cos() * 0.05;
    pos
}

/// Spin rate: free continuous spin while scattered, frozen once assembled.
pub fn spin_rate(mix: f32) -> f32 {
    lerp(1.0, 0.0, eased_mix(mix))
}

/// Accumulated rotation angle for an instance at the given clock.
pub fn spin_angle(orientation: Vec4, mix: f32, time: f32) -> f32 {
    time * spin_rate(mix) + orientation.z * 10.0
}

/// Rotation axis derived from the orientation seeds with a fixed unit
/// z component, normalized.
pub fn spin_axis(orientation: Vec4) -> Vec3 {
    Vec3::new(orientation.x, orientation.y, 1.0).normalize()
}

/// Rotation matrix for the instance at the given mix/time.
pub fn rotation(orientation: Vec4, mix: f32, time: f32) -> Mat3 {
    Mat3::from_axis_angle(
        spin_axis(orientation),
        spin_angle(orientation, mix, time),
    )
}

/// Transform one local-geometry vertex to world space.
///
/// The order is scale → rotate → translate; reversing it changes the
/// visual result and must be preserved.
pub fn transform_vertex(
    local: Vec3,
    scale: f32,
    orientation: Vec4,
    scatter: Vec3,
    tree: Vec3,
    mix: f32,
    time: f32,
) -> Vec3 {
    let rotated = rotation(orientation, mix, time) * (local * scale);
    rotated + instance_position(scatter, tree, orientation, mix, time)
}

/// Gold-like classification: drives the noise texture and blink highlight.
pub fn is_gold(color: Vec3) -> bool {
    color.x > 0.8 && color.y > 0.6
}

/// Cheap 3D hash noise, identical to the shader's.
///
/// Uses the floor-based fractional part (WGSL `fract` semantics, not
/// `f32::fract`, which truncates toward zero).
pub fn hash3(p: Vec3) -> f32 {
    let base = p * 0.3183099 + Vec3::splat(0.1);
    let q = Vec3::new(fract_gl(base.x), fract_gl(base.y), fract_gl(base.z))
        * 17.0;
    fract_gl(q.x * q.y * q.z * (q.x + q.y + q.z))
}

/// Floor-based fractional part, matching the WGSL builtin.
fn fract_gl(x: f32) -> f32 {
    x - x.floor()
}

/// Periodic blink pulse for a gold instance.
///
/// The sine is clamped at zero before exponentiation — `pow` with a
/// negative base is undefined in WGSL — which leaves a sharp narrow pulse
/// per cycle. The per-instance seed decorrelates pulse phase across
/// instances.
pub fn blink(time: f32, seed: f32) -> f32 {
    (time * BLINK_SPEED + seed * 20.0)
        .sin()
        .max(0.0)
        .powi(BLINK_EXPONENT)
}

/// Full fragment shading for one ornament surface point.
///
/// `normal` and `view_dir` are expected normalized and in world space;
/// `local_pos` is the scaled+rotated local position used to seed the gold
/// texture noise.
pub fn shade(
    normal: Vec3,
    view_dir: Vec3,
    base_color: Vec3,
    local_pos: Vec3,
    time: f32,
    blink_seed: f32,
    lighting: &LightingUniform,
) -> Vec3 {
    let gold = is_gold(base_color);

    let normal = if gold {
        let noise = hash3(local_pos * 10.0);
        (normal + Vec3::splat((noise - 0.5) * 0.1)).normalize()
    } else {
        normal
    };

    let light_dir = Vec3::from_array(lighting.light_dir);
    let diff = normal.dot(light_dir).max(0.0);

    let reflect_dir = reflect(-light_dir, normal);
    let spec = view_dir
        .dot(reflect_dir)
        .max(0.0)
        .powf(lighting.shininess);

    let fresnel = (1.0 - view_dir.dot(normal).max(0.0))
        .powf(lighting.fresnel_power);

    let mut color =
        base_color * (lighting.ambient + diff * (1.0 - lighting.ambient));
    color += Vec3::from_array(lighting.specular_color)
        * spec
        * lighting.specular_intensity;
    color += base_color * fresnel * lighting.fresnel_intensity;

    if gold {
        color += Vec3::from_array(lighting.blink_color)
            * blink(time, blink_seed)
            * lighting.blink_intensity;
    }

    color
}

/// Mirror of the WGSL `reflect` builtin.
fn reflect(incident: Vec3, normal: Vec3) -> Vec3 {
    incident - 2.0 * incident.dot(normal) * normal
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::palette;

    const SCATTER: Vec3 = Vec3::new(3.0, 1.0, -2.0);
    const TREE: Vec3 = Vec3::new(1.0, -1.5, 0.5);

    #[test]
    fn test_position_interpolates_under_bob() {
        let o = Vec4::new(0.4, 0.7, 0.2, 0.9);
        let time = 2.0;
        for (mix, target) in [(0.0, SCATTER), (1.0, TREE)] {
            let p = instance_position(SCATTER, TREE, o, mix, time);
            let bob_y = (time * 0.5 + o.x * 10.0).sin() * 0.15;
            let sway_x = (time * 0.3 + o.y * 10.0).cos() * 0.05;
            assert!((p - target - Vec3::new(sway_x, bob_y, 0.0)).length() < 1e-6);
        }
    }

    #[test]
    fn test_bob_continues_when_assembled() {
        // Ornament motion is not damped at mix = 1.
        let o = Vec4::new(0.4, 0.7, 0.2, 0.9);
        let a = instance_position(SCATTER, TREE, o, 1.0, 0.0);
        let b = instance_position(SCATTER, TREE, o, 1.0, 1.0);
        assert!((a - b).length() > 1e-3);
    }

    #[test]
    fn test_spin_freezes_at_full_assembly() {
        assert_eq!(spin_rate(0.0), 1.0);
        assert_eq!(spin_rate(1.0), 0.0);

        let o = Vec4::new(0.3, 0.6, 0.5, 0.1);
        // Angle advances with time while scattered...
        assert!(spin_angle(o, 0.0, 1.0) != spin_angle(o, 0.0, 2.0));
        // ...and holds at the phase offset once assembled.
        assert_eq!(spin_angle(o, 1.0, 1.0), spin_angle(o, 1.0, 2.0));
        assert_eq!(spin_angle(o, 1.0, 5.0), o.z * 10.0);
    }

    #[test]
    fn test_transform_order_is_scale_rotate_translate() {
        let o = Vec4::new(0.2, 0.8, 0.4, 0.6);
        let mix = 0.0;
        let time = 1.5;
        let local = Vec3::new(1.0, 0.0, 0.0);
        let scale = 2.0;

        let got = transform_vertex(local, scale, o, SCATTER, TREE, mix, time);

        let rot = rotation(o, mix, time);
        let expected =
            rot * (local * scale) + instance_position(SCATTER, TREE, o, mix, time);
        assert!((got - expected).length() < 1e-6);

        // The reversed order (rotate the translated vertex) lands elsewhere.
        let reversed =
            rot * (local * scale + instance_position(SCATTER, TREE, o, mix, time));
        assert!((got - reversed).length() > 1e-3);
    }

    #[test]
    fn test_rotation_preserves_length() {
        let o = Vec4::new(0.9, 0.1, 0.7, 0.3);
        let rot = rotation(o, 0.2, 4.2);
        let v = Vec3::new(0.5, -1.0, 2.0);
        assert!(((rot * v).length() - v.length()).abs() < 1e-5);
    }

    #[test]
    fn test_gold_classification_of_palette() {
        assert!(is_gold(palette::hex_to_linear(palette::BRIGHT_GOLD_HEX)));
        assert!(!is_gold(palette::hex_to_linear(palette::TEXTURED_GOLD_HEX)));
        assert!(!is_gold(palette::hex_to_linear(palette::EMERALD_HEX)));
        assert!(!is_gold(palette::hex_to_linear(palette::DEEP_RED_HEX)));
    }

    #[test]
    fn test_hash3_in_unit_range_and_varies() {
        let mut distinct = std::collections::HashSet::new();
        for i in 0..100 {
            // Include negative coordinates: the floor-based fract must
            // keep the hash in range there too.
            let p = Vec3::new(i as f32 * 0.7 - 35.0, i as f32 * 1.3, -2.5);
            let h = hash3(p * 10.0);
            assert!((0.0..1.0).contains(&h), "hash3 out of range: {h}");
            let _ = distinct.insert(h.to_bits());
        }
        assert!(distinct.len() > 50, "hash should vary across inputs");
    }

    #[test]
    fn test_blink_is_sharp_and_bounded() {
        let mut on = 0usize;
        let samples = 1000usize;
        for i in 0..samples {
            let b = blink(i as f32 * 0.01, 0.0);
            assert!((0.0..=1.0).contains(&b));
            if b > 0.1 {
                on += 1;
            }
        }
        // The pow(.., 30) compresses the pulse to a small duty cycle.
        assert!(on * 10 < samples * 2, "blink on for {on}/{samples} samples");
    }

    #[test]
    fn test_blink_decorrelates_across_seeds() {
        // Distinct seeds shift the pulse phase: at a time where one seed is
        // near peak, the other is dark.
        let t = std::f32::consts::FRAC_PI_4; // sin(2t) = 1 for seed 0
        assert!(blink(t, 0.0) > 0.9);
        assert!(blink(t, 0.08) < 0.5);
    }

    #[test]
    fn test_shade_gold_receives_blink_highlight() {
        let lighting = LightingUniform::default();
        let gold = palette::hex_to_linear(palette::BRIGHT_GOLD_HEX);
        let normal = Vec3::Y;
        let view = Vec3::new(0.0, 0.3, 1.0).normalize();

        // Pick a time where the pulse for this seed is at its peak.
        let t = std::f32::consts::FRAC_PI_4;
        let lit = shade(normal, view, gold, Vec3::ONE, t, 0.0, &lighting);
        let dark_t = t + std::f32::consts::FRAC_PI_2; // sin flips to -1
        let unlit =
            shade(normal, view, gold, Vec3::ONE, dark_t, 0.0, &lighting);
        assert!(lit.max_element() > unlit.max_element() + 1.0);
    }

    #[test]
    fn test_shade_non_gold_is_time_invariant() {
        let lighting = LightingUniform::default();
        let emerald = palette::hex_to_linear(palette::EMERALD_HEX);
        let normal = Vec3::Y;
        let view = Vec3::new(0.0, 0.3, 1.0).normalize();

        let a = shade(normal, view, emerald, Vec3::ONE, 0.0, 0.4, &lighting);
        let b = shade(normal, view, emerald, Vec3::ONE, 9.0, 0.4, &lighting);
        assert!((a - b).length() < 1e-6);
    }
}
