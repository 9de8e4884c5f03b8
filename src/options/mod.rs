//! Centralized runtime options with TOML preset support.
//!
//! All tweakable settings (scene composition, formation timing, camera,
//! lighting) are consolidated here. Options serialize to/from TOML; every
//! sub-struct uses `#[serde(default)]` so partial files (e.g. only
//! overriding `[snow]`) work correctly.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::EvergreenError;

/// Top-level options container.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(default)]
pub struct Options {
    /// Scene composition: counts, dimensions, and per-system parameters.
    pub scene: SceneOptions,
    /// Formation toggle animation parameters.
    pub formation: FormationOptions,
    /// Camera rig parameters.
    pub camera: CameraOptions,
    /// Ornament lighting parameters.
    pub lighting: LightingOptions,
}

impl Options {
    /// Load options from a TOML file. Missing fields use defaults.
    pub fn load(path: &Path) -> Result<Self, EvergreenError> {
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content).map_err(|e| {
            EvergreenError::OptionsParse(format!(
                "failed to parse {}: {e}",
                path.display()
            ))
        })
    }

    /// Save options to a TOML file (pretty-printed).
    pub fn save(&self, path: &Path) -> Result<(), EvergreenError> {
        let content = toml::to_string_pretty(self).map_err(|e| {
            EvergreenError::OptionsParse(format!(
                "failed to serialize options: {e}"
            ))
        })?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, content)?;
        Ok(())
    }
}

/// Scene composition options.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SceneOptions {
    /// Base radius of the assembled tree cone.
    pub tree_radius: f32,
    /// Height of the assembled tree cone.
    pub tree_height: f32,
    /// Radius of the scattered cloud ball.
    pub scatter_radius: f32,
    /// Foliage particle parameters.
    pub foliage: FoliageOptions,
    /// Bauble instance parameters (luxury palette).
    pub baubles: OrnamentOptions,
    /// Ribbon instance parameters (red/gold palette).
    pub ribbons: OrnamentOptions,
    /// Snow field parameters.
    pub snow: SnowOptions,
}

impl Default for SceneOptions {
    fn default() -> Self {
        Self {
            tree_radius: 3.0,
            tree_height: 6.0,
            scatter_radius: 5.0,
            foliage: FoliageOptions::default(),
            baubles: OrnamentOptions::default(),
            ribbons: OrnamentOptions {
                count: 40,
                scale: 0.1,
                shape: OrnamentShape::Octahedron,
            },
            snow: SnowOptions::default(),
        }
    }
}

/// Foliage particle options.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct FoliageOptions {
    /// Number of foliage points.
    pub count: usize,
    /// Smallest base point size.
    pub min_size: f32,
    /// Largest base point size.
    pub max_size: f32,
}

impl Default for FoliageOptions {
    fn default() -> Self {
        Self {
            count: 4000,
            min_size: 0.8,
            max_size: 2.0,
        }
    }
}

/// Base geometry used for an ornament group.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum OrnamentShape {
    /// Smooth UV sphere.
    #[default]
    Sphere,
    /// Flat-shaded octahedron.
    Octahedron,
}

/// Options for one instanced ornament group.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct OrnamentOptions {
    /// Number of instances.
    pub count: usize,
    /// Uniform local-geometry scale.
    pub scale: f32,
    /// Base geometry for the group.
    pub shape: OrnamentShape,
}

impl Default for OrnamentOptions {
    fn default() -> Self {
        Self {
            count: 80,
            scale: 0.12,
            shape: OrnamentShape::Sphere,
        }
    }
}

/// Snow field options.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SnowOptions {
    /// Number of snowflakes.
    pub count: usize,
    /// Radius of the scattered snow ball.
    pub scatter_radius: f32,
    /// Radius of the assembled (tree-hugging) snow ball.
    pub tree_radius: f32,
    /// Height of the vertical fall-loop band.
    pub fall_height: f32,
    /// Global snow opacity in [0,1].
    pub opacity: f32,
}

impl Default for SnowOptions {
    fn default() -> Self {
        Self {
            count: 1500,
            scatter_radius: 8.0,
            tree_radius: 5.0,
            fall_height: 10.0,
            opacity: 0.8,
        }
    }
}

/// Formation toggle animation options.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct FormationOptions {
    /// Whether the scene starts assembled.
    pub start_assembled: bool,
    /// Seconds for the mix to travel between formations.
    pub duration_secs: f32,
}

impl Default for FormationOptions {
    fn default() -> Self {
        Self {
            start_assembled: true,
            duration_secs: 2.5,
        }
    }
}

/// Camera rig options.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct CameraOptions {
    /// Orbit distance from the scene center.
    pub distance: f32,
    /// Eye height above the scene center.
    pub height: f32,
    /// Orbit angular speed, radians per second.
    pub orbit_speed: f32,
    /// Vertical field of view in degrees.
    pub fovy: f32,
    /// Near clipping plane distance.
    pub znear: f32,
    /// Far clipping plane distance.
    pub zfar: f32,
}

impl Default for CameraOptions {
    fn default() -> Self {
        Self {
            distance: 12.0,
            height: 2.0,
            orbit_speed: 0.1,
            fovy: 45.0,
            znear: 0.1,
            zfar: 100.0,
        }
    }
}

/// Ornament lighting options (fixed tints live with the uniform defaults).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct LightingOptions {
    /// Ambient floor of the diffuse term.
    pub ambient: f32,
    /// Specular highlight intensity.
    pub specular_intensity: f32,
    /// Specular shininess exponent.
    pub shininess: f32,
    /// Fresnel edge falloff power.
    pub fresnel_power: f32,
    /// Fresnel edge brightness boost.
    pub fresnel_intensity: f32,
    /// Gold blink highlight intensity.
    pub blink_intensity: f32,
}

impl Default for LightingOptions {
    fn default() -> Self {
        Self {
            ambient: 0.2,
            specular_intensity: 2.5,
            shininess: 64.0,
            fresnel_power: 3.0,
            fresnel_intensity: 1.5,
            blink_intensity: 20.0,
        }
    }
}
