//! Procedural position sampling for the two formation targets.

use glam::Vec3;
use rand::Rng;
use std::f32::consts::TAU;

/// Exponent biasing tree points toward the base of the cone.
const HEIGHT_BIAS: f32 = 1.2;

/// Radial spread range applied to the nominal cone radius. Values below 1.0
/// pull points inside the shell, values above push them past it, which
/// leaves visible gaps and volume instead of a solid surface.
const SPREAD_MIN: f32 = 0.6;
const SPREAD_MAX: f32 = 1.2;

/// Sample `count` points approximating a vertically-centered cone.
///
/// The height fraction is drawn as `U^1.2`, so the point density thins
/// toward the tip. The nominal radius tapers linearly to zero at the top and
/// each point lands between 60% and 120% of it.
pub fn generate_tree_positions(
    rng: &mut impl Rng,
    count: usize,
    radius: f32,
    height: f32,
) -> Vec<Vec3> {
    let mut positions = Vec::with_capacity(count);
    for _ in 0..count {
        let y_norm = rng.random::<f32>().powf(HEIGHT_BIAS);
        let y = y_norm * height - height / 2.0;

        let r_base = (1.0 - y_norm) * radius;
        let theta = rng.random::<f32>() * TAU;
        let spread =
            SPREAD_MIN + rng.random::<f32>() * (SPREAD_MAX - SPREAD_MIN);
        let r = r_base * spread;

        positions.push(Vec3::new(r * theta.cos(), y, r * theta.sin()));
    }
    positions
}

/// Sample `count` points uniformly by volume inside a sphere.
///
/// Directions come from `φ = acos(2U - 1)`, radii from `radius·∛U` — the
/// standard rejection-free identity for a uniform ball.
pub fn generate_scatter_positions(
    rng: &mut impl Rng,
    count: usize,
    radius: f32,
) -> Vec<Vec3> {
    let mut positions = Vec::with_capacity(count);
    for _ in 0..count {
        let theta = rng.random::<f32>() * TAU;
        let phi = (2.0 * rng.random::<f32>() - 1.0).acos();
        let r = rng.random::<f32>().cbrt() * radius;

        positions.push(Vec3::new(
            r * phi.sin() * theta.cos(),
            r * phi.sin() * theta.sin(),
            r * phi.cos(),
        ));
    }
    positions
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_tree_points_within_bounds() {
        let mut rng = StdRng::seed_from_u64(7);
        let radius = 3.0;
        let height = 6.0;
        let positions =
            generate_tree_positions(&mut rng, 500, radius, height);
        assert_eq!(positions.len(), 500);

        for p in &positions {
            assert!(p.y >= -height / 2.0 - 1e-4);
            assert!(p.y <= height / 2.0 + 1e-4);

            let y_norm = (p.y + height / 2.0) / height;
            let max_r = SPREAD_MAX * (1.0 - y_norm) * radius;
            let radial = (p.x * p.x + p.z * p.z).sqrt();
            assert!(
                radial <= max_r + 1e-3,
                "radial {radial} exceeds bound {max_r} at y_norm {y_norm}"
            );
        }
    }

    #[test]
    fn test_tree_density_biased_toward_base() {
        let mut rng = StdRng::seed_from_u64(11);
        let positions = generate_tree_positions(&mut rng, 20_000, 3.0, 6.0);
        let below_mid =
            positions.iter().filter(|p| p.y < 0.0).count() as f32;
        // U^1.2 puts more than half of the points in the lower half:
        // P(y < mid) = 0.5^(1/1.2) ≈ 0.561.
        let fraction = below_mid / positions.len() as f32;
        assert!(fraction > 0.53, "lower-half fraction {fraction}");
    }

    #[test]
    fn test_scatter_points_within_radius() {
        let mut rng = StdRng::seed_from_u64(13);
        let radius = 4.0;
        let positions = generate_scatter_positions(&mut rng, 500, radius);
        assert_eq!(positions.len(), 500);
        for p in &positions {
            assert!(p.length() <= radius + 1e-4);
        }
    }

    #[test]
    fn test_scatter_volume_uniform() {
        // For volume-uniform sampling, (‖p‖/R)³ is uniform in [0,1]; check
        // per-decile counts against the expected flat histogram.
        let mut rng = StdRng::seed_from_u64(17);
        let radius = 4.0;
        let n = 50_000usize;
        let positions = generate_scatter_positions(&mut rng, n, radius);

        let mut bins = [0usize; 10];
        for p in &positions {
            let u = (p.length() / radius).powi(3);
            let idx = ((u * 10.0) as usize).min(9);
            bins[idx] += 1;
        }
        let expected = n as f32 / 10.0;
        for (i, &b) in bins.iter().enumerate() {
            let deviation = (b as f32 - expected).abs() / expected;
            assert!(
                deviation < 0.08,
                "bin {i} holds {b}, expected ~{expected}"
            );
        }
    }

    #[test]
    fn test_deterministic_with_fixed_seed() {
        let mut a = StdRng::seed_from_u64(99);
        let mut b = StdRng::seed_from_u64(99);
        assert_eq!(
            generate_tree_positions(&mut a, 64, 3.0, 6.0),
            generate_tree_positions(&mut b, 64, 3.0, 6.0)
        );

        let mut a = StdRng::seed_from_u64(99);
        let mut b = StdRng::seed_from_u64(99);
        assert_eq!(
            generate_scatter_positions(&mut a, 64, 4.0),
            generate_scatter_positions(&mut b, 64, 4.0)
        );
    }

    #[test]
    fn test_zero_count_is_empty() {
        let mut rng = StdRng::seed_from_u64(1);
        assert!(generate_tree_positions(&mut rng, 0, 3.0, 6.0).is_empty());
        assert!(generate_scatter_positions(&mut rng, 0, 4.0).is_empty());
    }

    #[test]
    fn test_degenerate_dimensions_collapse_to_origin() {
        let mut rng = StdRng::seed_from_u64(2);
        for p in generate_tree_positions(&mut rng, 32, 0.0, 0.0) {
            assert!(p.length() < 1e-6);
        }
        for p in generate_scatter_positions(&mut rng, 32, 0.0) {
            assert!(p.length() < 1e-6);
        }
    }
}
