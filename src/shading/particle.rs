//! Foliage and snow particle math (CPU mirror of `foliage.wgsl` /
//! `snow.wgsl`).

use glam::{Vec2, Vec3};

use super::{eased_mix, lerp};

/// Perspective size attenuation constant for foliage points.
pub const FOLIAGE_ATTENUATION: f32 = 60.0;
/// Perspective size attenuation constant for snow points.
pub const SNOW_ATTENUATION: f32 = 50.0;
/// Overbright multiplier applied to foliage colors for the glow look.
pub const FOLIAGE_COLOR_BOOST: f32 = 1.5;
/// Floating-noise damping at full tree assembly.
const SETTLED_FLOAT_INTENSITY: f32 = 0.2;

/// Rest position of a particle: plain interpolation between the two
/// formation targets under the eased mix. No motion terms.
pub fn rest_position(scatter: Vec3, tree: Vec3, mix: f32) -> Vec3 {
    scatter.lerp(tree, eased_mix(mix))
}

/// Three-axis sinusoidal drift keyed on a rest position and the clock.
pub fn float_noise(p: Vec3, time: f32) -> Vec3 {
    Vec3::new(
        (p.y * 2.0 + time).sin() * 0.1,
        (p.x * 2.0 + time * 0.8).cos() * 0.1,
        (p.z * 2.0 + time * 0.5).sin() * 0.1,
    )
}

/// Floating-noise scale: full strength while scattered, nearly still once
/// the tree has assembled.
pub fn float_intensity(mix: f32) -> f32 {
    lerp(1.0, SETTLED_FLOAT_INTENSITY, eased_mix(mix))
}

/// Final foliage position: rest position plus damped floating noise.
///
/// The noise is sampled at `rest + splat(size)` so equal rest positions
/// with different sizes still drift apart.
pub fn foliage_position(
    scatter: Vec3,
    tree: Vec3,
    size: f32,
    mix: f32,
    time: f32,
) -> Vec3 {
    let rest = rest_position(scatter, tree, mix);
    rest + float_noise(rest + Vec3::splat(size), time) * float_intensity(mix)
}

/// Floor-division modulo used by the fall loop; the result carries the
/// sign of the divisor, unlike `%`, which truncates toward zero.
pub fn floor_mod(x: f32, y: f32) -> f32 {
    x - y * (x / y).floor()
}

/// Wrap-around fall coordinate: an infinite downward loop confined to
/// `[-fall_height/2, fall_height/2]`.
pub fn fall_y(base_y: f32, speed: f32, time: f32, fall_height: f32) -> f32 {
    floor_mod(base_y - time * speed, fall_height) - fall_height / 2.0
}

/// Final snow position: interpolated base with the y coordinate replaced by
/// the fall loop, plus a small horizontal sway keyed on `time + y`.
pub fn snow_position(
    scatter: Vec3,
    tree: Vec3,
    speed: f32,
    mix: f32,
    time: f32,
    fall_height: f32,
) -> Vec3 {
    let base = rest_position(scatter, tree, mix);
    let y = fall_y(base.y, speed, time, fall_height);
    Vec3::new(
        base.x + (time + y).sin() * 0.1,
        y,
        base.z + (time + y).cos() * 0.1,
    )
}

/// Screen-space point size in physical pixels: standard perspective
/// attenuation against the (negative) view-space depth.
pub fn point_size_px(
    base_size: f32,
    pixel_ratio: f32,
    attenuation: f32,
    view_z: f32,
) -> f32 {
    base_size * pixel_ratio * (attenuation / -view_z)
}

/// Snow base point size from the glow attribute.
pub fn snow_base_size(glow: f32) -> f32 {
    4.0 + glow * 4.0
}

/// Disc coverage for a point fragment at `uv` (offset from the point
/// center, components in [-0.5, 0.5]). Returns `None` outside the disc
/// (discard), otherwise the soft edge-fade alpha.
pub fn disc_coverage(uv: Vec2) -> Option<f32> {
    let r = uv.length();
    if r > 0.5 {
        return None;
    }
    Some(1.0 - super::smoothstep(0.3, 0.5, r))
}

/// Snow fragment color: plain white, or a warm overbright tint for flakes
/// whose glow attribute exceeds 0.5.
pub fn snow_color(glow: f32) -> Vec3 {
    if glow > 0.5 {
        Vec3::new(1.0, 1.0, 0.8) * 2.0
    } else {
        Vec3::ONE
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SCATTER: Vec3 = Vec3::new(4.0, -1.0, 2.0);
    const TREE: Vec3 = Vec3::new(0.5, 2.0, -0.5);

    #[test]
    fn test_rest_position_at_mix_endpoints() {
        assert_eq!(rest_position(SCATTER, TREE, 0.0), SCATTER);
        assert_eq!(rest_position(SCATTER, TREE, 1.0), TREE);
    }

    #[test]
    fn test_foliage_position_is_rest_plus_noise() {
        // The motion term is exactly the separately-computable noise
        // offset, so subtracting it recovers the rest position at any mix.
        let time = 3.7;
        for mix in [0.0, 0.25, 1.0] {
            let rest = rest_position(SCATTER, TREE, mix);
            let full = foliage_position(SCATTER, TREE, 1.3, mix, time);
            let noise = float_noise(rest + Vec3::splat(1.3), time)
                * float_intensity(mix);
            assert!((full - rest - noise).length() < 1e-6);
        }
    }

    #[test]
    fn test_float_intensity_damps_when_assembled() {
        assert_eq!(float_intensity(0.0), 1.0);
        assert_eq!(float_intensity(1.0), 0.2);
        assert!(float_intensity(0.5) < 1.0);
        assert!(float_intensity(0.5) > 0.2);
    }

    #[test]
    fn test_float_noise_bounded() {
        for i in 0..100 {
            let p = Vec3::new(i as f32 * 0.37, i as f32 * -0.11, i as f32);
            let n = float_noise(p, i as f32 * 0.5);
            assert!(n.x.abs() <= 0.1 && n.y.abs() <= 0.1 && n.z.abs() <= 0.1);
        }
    }

    #[test]
    fn test_floor_mod_wraps_negatives() {
        assert_eq!(floor_mod(-1.0, 8.0), 7.0);
        assert_eq!(floor_mod(9.0, 8.0), 1.0);
        assert_eq!(floor_mod(0.0, 8.0), 0.0);
    }

    #[test]
    fn test_fall_y_stays_in_band() {
        let fall_height = 10.0;
        for step in 0..2000 {
            let time = step as f32 * 0.05;
            let y = fall_y(3.0, 1.2, time, fall_height);
            assert!(y >= -fall_height / 2.0);
            assert!(y <= fall_height / 2.0);
        }
    }

    #[test]
    fn test_fall_y_descends() {
        // Away from the wrap point, later time means lower y.
        let a = fall_y(0.0, 1.0, 1.0, 100.0);
        let b = fall_y(0.0, 1.0, 2.0, 100.0);
        assert!(b < a);
    }

    #[test]
    fn test_snow_position_mix_endpoints_at_fixed_time() {
        // With time = 0 and speed = 0 no drift has accumulated: y is the
        // base y folded into the band, x/z the base plus the static sway.
        let fall_height = 40.0;
        let p0 = snow_position(SCATTER, TREE, 0.0, 0.0, 0.0, fall_height);
        let expected_y = floor_mod(SCATTER.y, fall_height) - fall_height / 2.0;
        assert!((p0.y - expected_y).abs() < 1e-5);
        assert!((p0.x - (SCATTER.x + p0.y.sin() * 0.1)).abs() < 1e-5);
        assert!((p0.z - (SCATTER.z + p0.y.cos() * 0.1)).abs() < 1e-5);

        let p1 = snow_position(SCATTER, TREE, 0.0, 1.0, 0.0, fall_height);
        let expected_y = floor_mod(TREE.y, fall_height) - fall_height / 2.0;
        assert!((p1.y - expected_y).abs() < 1e-5);
    }

    #[test]
    fn test_point_size_attenuates_with_depth() {
        let near = point_size_px(2.0, 1.0, FOLIAGE_ATTENUATION, -5.0);
        let far = point_size_px(2.0, 1.0, FOLIAGE_ATTENUATION, -20.0);
        assert!(near > far);
        assert_eq!(near, 2.0 * (60.0 / 5.0));
    }

    #[test]
    fn test_snow_base_size() {
        assert_eq!(snow_base_size(0.0), 4.0);
        assert_eq!(snow_base_size(1.0), 8.0);
    }

    #[test]
    fn test_disc_coverage() {
        assert!(disc_coverage(Vec2::new(0.6, 0.0)).is_none());
        assert_eq!(disc_coverage(Vec2::ZERO), Some(1.0));
        // Soft edge between 0.3 and 0.5
        let edge = disc_coverage(Vec2::new(0.4, 0.0));
        let alpha = edge.unwrap_or(0.0);
        assert!(alpha > 0.0 && alpha < 1.0);
        // Fully faded exactly at the rim
        assert_eq!(disc_coverage(Vec2::new(0.5, 0.0)), Some(0.0));
    }

    #[test]
    fn test_snow_color_thresholds_glow() {
        assert_eq!(snow_color(0.2), Vec3::ONE);
        assert_eq!(snow_color(0.8), Vec3::new(2.0, 2.0, 1.6));
    }
}
