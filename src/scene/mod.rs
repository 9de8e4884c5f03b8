//! Scene attribute generation.
//!
//! Every set in this module is an index-aligned structure-of-arrays: index
//! `i` refers to the same logical point or instance in every attribute
//! vector. Sets are generated once at construction and never mutated — the
//! renderers upload them verbatim into instance-step vertex buffers and the
//! GPU reads them against the per-frame mix/time uniforms.

pub mod orientation;
pub mod palette;
pub mod sampler;

use glam::{Vec3, Vec4};
use rand::Rng;

use crate::options::{
    FoliageOptions, OrnamentOptions, SceneOptions, SnowOptions,
};

/// Snowflake fall speed range, world units per second.
const SNOW_SPEED_MIN: f32 = 0.5;
const SNOW_SPEED_MAX: f32 = 1.5;

/// Foliage particles: dual positions, palette color, and point size.
#[derive(Debug, Clone)]
pub struct FoliageSet {
    /// Rest position at mix = 0.
    pub scatter: Vec<Vec3>,
    /// Rest position at mix = 1.
    pub tree: Vec<Vec3>,
    /// Linear RGB color per point.
    pub colors: Vec<Vec3>,
    /// Base point size per point.
    pub sizes: Vec<f32>,
}

impl FoliageSet {
    /// Generate a foliage set from the given options.
    pub fn generate(
        rng: &mut impl Rng,
        options: &FoliageOptions,
        tree_radius: f32,
        tree_height: f32,
        scatter_radius: f32,
    ) -> Self {
        let count = options.count;
        let sizes = (0..count)
            .map(|_| {
                options.min_size
                    + rng.random::<f32>()
                        * (options.max_size - options.min_size)
            })
            .collect();

        Self {
            scatter: sampler::generate_scatter_positions(
                rng,
                count,
                scatter_radius,
            ),
            tree: sampler::generate_tree_positions(
                rng,
                count,
                tree_radius,
                tree_height,
            ),
            colors: palette::generate_luxury_colors(rng, count),
            sizes,
        }
    }

    /// Number of points in the set.
    pub fn len(&self) -> usize {
        self.scatter.len()
    }

    /// Whether the set holds no points.
    pub fn is_empty(&self) -> bool {
        self.scatter.is_empty()
    }
}

/// Ornament instances: dual positions, orientation seeds, palette color.
#[derive(Debug, Clone)]
pub struct OrnamentSet {
    /// Rest position at mix = 0.
    pub scatter: Vec<Vec3>,
    /// Rest position at mix = 1.
    pub tree: Vec<Vec3>,
    /// Rotation-axis / phase / blink seeds per instance.
    pub orientations: Vec<Vec4>,
    /// Linear RGB color per instance.
    pub colors: Vec<Vec3>,
}

impl OrnamentSet {
    /// Generate an ornament set colored from the luxury palette.
    pub fn generate(
        rng: &mut impl Rng,
        options: &OrnamentOptions,
        tree_radius: f32,
        tree_height: f32,
        scatter_radius: f32,
    ) -> Self {
        Self {
            colors: palette::generate_luxury_colors(rng, options.count),
            ..Self::generate_uncolored(
                rng,
                options,
                tree_radius,
                tree_height,
                scatter_radius,
            )
        }
    }

    /// Generate an ornament set colored 50/50 red/gold (ribbons).
    pub fn generate_ribbon(
        rng: &mut impl Rng,
        options: &OrnamentOptions,
        tree_radius: f32,
        tree_height: f32,
        scatter_radius: f32,
    ) -> Self {
        Self {
            colors: palette::generate_ribbon_colors(rng, options.count),
            ..Self::generate_uncolored(
                rng,
                options,
                tree_radius,
                tree_height,
                scatter_radius,
            )
        }
    }

    fn generate_uncolored(
        rng: &mut impl Rng,
        options: &OrnamentOptions,
        tree_radius: f32,
        tree_height: f32,
        scatter_radius: f32,
    ) -> Self {
        let count = options.count;
        Self {
            scatter: sampler::generate_scatter_positions(
                rng,
                count,
                scatter_radius,
            ),
            tree: sampler::generate_tree_positions(
                rng,
                count,
                tree_radius,
                tree_height,
            ),
            orientations: orientation::generate_random_orientations(
                rng, count,
            ),
            colors: Vec::new(),
        }
    }

    /// Number of instances in the set.
    pub fn len(&self) -> usize {
        self.scatter.len()
    }

    /// Whether the set holds no instances.
    pub fn is_empty(&self) -> bool {
        self.scatter.is_empty()
    }
}

/// Snow particles: dual positions plus fall speed and glow attributes.
#[derive(Debug, Clone)]
pub struct SnowField {
    /// Base position at mix = 0 (wide ball).
    pub scatter: Vec<Vec3>,
    /// Base position at mix = 1 (tight ball around the tree).
    pub tree: Vec<Vec3>,
    /// Fall speed per flake, world units per second.
    pub speeds: Vec<f32>,
    /// Glow factor per flake in [0,1); flakes above 0.5 render warm.
    pub glows: Vec<f32>,
}

impl SnowField {
    /// Generate a snow field from the given options.
    pub fn generate(rng: &mut impl Rng, options: &SnowOptions) -> Self {
        let count = options.count;
        let speeds = (0..count)
            .map(|_| {
                SNOW_SPEED_MIN
                    + rng.random::<f32>() * (SNOW_SPEED_MAX - SNOW_SPEED_MIN)
            })
            .collect();
        let glows = (0..count).map(|_| rng.random::<f32>()).collect();

        Self {
            scatter: sampler::generate_scatter_positions(
                rng,
                count,
                options.scatter_radius,
            ),
            tree: sampler::generate_scatter_positions(
                rng,
                count,
                options.tree_radius,
            ),
            speeds,
            glows,
        }
    }

    /// Number of flakes in the field.
    pub fn len(&self) -> usize {
        self.scatter.len()
    }

    /// Whether the field holds no flakes.
    pub fn is_empty(&self) -> bool {
        self.scatter.is_empty()
    }
}

/// The full generated scene: foliage, two ornament groups, and snow.
#[derive(Debug, Clone)]
pub struct Scene {
    /// Foliage point set.
    pub foliage: FoliageSet,
    /// Bauble instances (luxury palette).
    pub baubles: OrnamentSet,
    /// Ribbon instances (red/gold palette).
    pub ribbons: OrnamentSet,
    /// Falling snow field.
    pub snow: SnowField,
}

impl Scene {
    /// Generate all attribute sets from the scene options.
    pub fn generate(rng: &mut impl Rng, options: &SceneOptions) -> Self {
        Self {
            foliage: FoliageSet::generate(
                rng,
                &options.foliage,
                options.tree_radius,
                options.tree_height,
                options.scatter_radius,
            ),
            baubles: OrnamentSet::generate(
                rng,
                &options.baubles,
                options.tree_radius * 0.95,
                options.tree_height,
                options.scatter_radius,
            ),
            ribbons: OrnamentSet::generate_ribbon(
                rng,
                &options.ribbons,
                options.tree_radius * 0.9,
                options.tree_height,
                options.scatter_radius,
            ),
            snow: SnowField::generate(rng, &options.snow),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_sets_are_index_aligned() {
        let mut rng = StdRng::seed_from_u64(21);
        let options = SceneOptions::default();
        let scene = Scene::generate(&mut rng, &options);

        let f = &scene.foliage;
        assert_eq!(f.scatter.len(), f.tree.len());
        assert_eq!(f.scatter.len(), f.colors.len());
        assert_eq!(f.scatter.len(), f.sizes.len());
        assert_eq!(f.len(), options.foliage.count);

        for set in [&scene.baubles, &scene.ribbons] {
            assert_eq!(set.scatter.len(), set.tree.len());
            assert_eq!(set.scatter.len(), set.orientations.len());
            assert_eq!(set.scatter.len(), set.colors.len());
        }

        let s = &scene.snow;
        assert_eq!(s.scatter.len(), s.tree.len());
        assert_eq!(s.scatter.len(), s.speeds.len());
        assert_eq!(s.scatter.len(), s.glows.len());
    }

    #[test]
    fn test_empty_scene() {
        let mut rng = StdRng::seed_from_u64(21);
        let mut options = SceneOptions::default();
        options.foliage.count = 0;
        options.baubles.count = 0;
        options.ribbons.count = 0;
        options.snow.count = 0;

        let scene = Scene::generate(&mut rng, &options);
        assert!(scene.foliage.is_empty());
        assert!(scene.baubles.is_empty());
        assert!(scene.ribbons.is_empty());
        assert!(scene.snow.is_empty());
    }

    #[test]
    fn test_foliage_sizes_in_configured_range() {
        let mut rng = StdRng::seed_from_u64(23);
        let options = SceneOptions::default();
        let foliage = FoliageSet::generate(
            &mut rng,
            &options.foliage,
            options.tree_radius,
            options.tree_height,
            options.scatter_radius,
        );
        for s in &foliage.sizes {
            assert!(*s >= options.foliage.min_size);
            assert!(*s <= options.foliage.max_size);
        }
    }

    #[test]
    fn test_snow_attribute_ranges() {
        let mut rng = StdRng::seed_from_u64(29);
        let snow = SnowField::generate(&mut rng, &SnowOptions::default());
        for s in &snow.speeds {
            assert!((SNOW_SPEED_MIN..=SNOW_SPEED_MAX).contains(s));
        }
        for g in &snow.glows {
            assert!((0.0..1.0).contains(g));
        }
    }
}
