//! The main rendering engine.

use glam::Vec3;

use crate::animation::{Formation, FormationMix};
use crate::camera::{Camera, CameraState};
use crate::error::EvergreenError;
use crate::gpu::{pipeline_helpers, RenderContext};
use crate::lighting::Lighting;
use crate::options::Options;
use crate::renderer::{FoliageRenderer, OrnamentRenderer, SnowRenderer};
use crate::scene::Scene;

/// Owns the GPU context, the generated scene, and the per-system
/// renderers; advances the clock and the formation mix every frame.
///
/// The engine is a pure consumer of time: all scene attributes are
/// generated once in [`SceneRenderEngine::new`] and the per-frame work is
/// limited to uniform uploads and draw calls.
pub struct SceneRenderEngine {
    context: RenderContext,
    camera: CameraState,
    lighting: Lighting,
    foliage: FoliageRenderer,
    baubles: OrnamentRenderer,
    ribbons: OrnamentRenderer,
    snow: SnowRenderer,
    depth_view: wgpu::TextureView,
    formation: FormationMix,
    options: Options,
    clock: f32,
    orbit_angle: f32,
    pixel_ratio: f32,
}

impl SceneRenderEngine {
    /// Create the engine for the given window surface, generating all
    /// scene attribute buffers.
    ///
    /// # Errors
    ///
    /// Returns [`EvergreenError::Gpu`] when GPU initialization fails.
    pub async fn new(
        window: impl Into<wgpu::SurfaceTarget<'static>>,
        initial_size: (u32, u32),
        scale_factor: f64,
        options: Options,
    ) -> Result<Self, EvergreenError> {
        let context = RenderContext::new(window, initial_size).await?;

        let mut rng = rand::rng();
        let scene = Scene::generate(&mut rng, &options.scene);
        log::info!(
            "scene generated: {} foliage, {} baubles, {} ribbons, {} snow",
            scene.foliage.len(),
            scene.baubles.len(),
            scene.ribbons.len(),
            scene.snow.len()
        );

        let camera = CameraState::new(
            &context,
            Camera {
                eye: Vec3::new(
                    0.0,
                    options.camera.height,
                    options.camera.distance,
                ),
                target: Vec3::ZERO,
                up: Vec3::Y,
                aspect: initial_size.0 as f32 / initial_size.1.max(1) as f32,
                fovy: options.camera.fovy,
                znear: options.camera.znear,
                zfar: options.camera.zfar,
            },
        );

        let lighting = Lighting::new(&context, &options.lighting);

        let foliage =
            FoliageRenderer::new(&context, &camera.layout, &scene.foliage);
        let baubles = OrnamentRenderer::new(
            &context,
            &camera.layout,
            &lighting.layout,
            &scene.baubles,
            &options.scene.baubles,
        );
        let ribbons = OrnamentRenderer::new(
            &context,
            &camera.layout,
            &lighting.layout,
            &scene.ribbons,
            &options.scene.ribbons,
        );
        let snow = SnowRenderer::new(
            &context,
            &camera.layout,
            &scene.snow,
            options.scene.snow.fall_height,
            options.scene.snow.opacity,
        );

        let depth_view = pipeline_helpers::create_depth_view(
            &context.device,
            context.config.width,
            context.config.height,
        );

        let initial = if options.formation.start_assembled {
            Formation::TreeShape
        } else {
            Formation::Scattered
        };
        let formation =
            FormationMix::new(initial, options.formation.duration_secs);

        Ok(Self {
            context,
            camera,
            lighting,
            foliage,
            baubles,
            ribbons,
            snow,
            depth_view,
            formation,
            options,
            clock: 0.0,
            orbit_angle: 0.0,
            pixel_ratio: scale_factor as f32,
        })
    }

    /// Reconfigure for a new window size.
    pub fn resize(&mut self, width: u32, height: u32) {
        self.context.resize(width, height);
        self.camera.camera.aspect = width as f32 / height.max(1) as f32;
        self.depth_view = pipeline_helpers::create_depth_view(
            &self.context.device,
            self.context.config.width,
            self.context.config.height,
        );
    }

    /// Update the surface DPI scale factor.
    pub fn set_pixel_ratio(&mut self, scale_factor: f64) {
        self.pixel_ratio = scale_factor as f32;
    }

    /// Flip the formation target.
    pub fn toggle_formation(&mut self) {
        self.formation.toggle();
        log::info!("formation target: {:?}", self.formation.target());
    }

    /// Begin easing toward the given formation.
    pub fn set_formation(&mut self, formation: Formation) {
        self.formation.set_target(formation);
    }

    /// The formation currently eased toward.
    pub fn formation(&self) -> Formation {
        self.formation.target()
    }

    /// The current mix value in [0,1].
    pub fn mix(&self) -> f32 {
        self.formation.mix()
    }

    /// Advance the clock, the formation mix, and the camera orbit by `dt`
    /// seconds.
    pub fn update(&mut self, dt: f32) {
        self.clock += dt.max(0.0);
        let _ = self.formation.update(dt);

        self.orbit_angle += self.options.camera.orbit_speed * dt;
        let camera = &mut self.camera.camera;
        camera.eye = Vec3::new(
            self.orbit_angle.sin() * self.options.camera.distance,
            self.options.camera.height,
            self.orbit_angle.cos() * self.options.camera.distance,
        );
    }

    /// Render one frame.
    ///
    /// # Errors
    ///
    /// Returns [`wgpu::SurfaceError`] when the swapchain texture cannot be
    /// acquired; the caller decides whether to reconfigure or bail.
    pub fn render(&mut self) -> Result<(), wgpu::SurfaceError> {
        let mix = self.formation.mix();
        let time = self.clock;

        self.camera.update_gpu(
            &self.context.queue,
            (self.context.config.width, self.context.config.height),
        );
        self.foliage
            .prepare(&self.context.queue, mix, time, self.pixel_ratio);
        self.baubles.prepare(&self.context.queue, mix, time);
        self.ribbons.prepare(&self.context.queue, mix, time);
        self.snow
            .prepare(&self.context.queue, mix, time, self.pixel_ratio);

        let frame = self.context.get_next_frame()?;
        let view = frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let mut encoder = self.context.create_encoder();
        {
            let mut pass =
                encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                    label: Some("Scene Pass"),
                    color_attachments: &[Some(
                        wgpu::RenderPassColorAttachment {
                            view: &view,
                            resolve_target: None,
                            ops: wgpu::Operations {
                                load: wgpu::LoadOp::Clear(wgpu::Color::BLACK),
                                store: wgpu::StoreOp::Store,
                            },
                            depth_slice: None,
                        },
                    )],
                    depth_stencil_attachment: Some(
                        wgpu::RenderPassDepthStencilAttachment {
                            view: &self.depth_view,
                            depth_ops: Some(wgpu::Operations {
                                load: wgpu::LoadOp::Clear(1.0),
                                store: wgpu::StoreOp::Store,
                            }),
                            stencil_ops: None,
                        },
                    ),
                    timestamp_writes: None,
                    occlusion_query_set: None,
                });

            // Opaque instances first, blended particles after.
            self.baubles
                .draw(&mut pass, &self.camera.bind_group, &self.lighting.bind_group);
            self.ribbons
                .draw(&mut pass, &self.camera.bind_group, &self.lighting.bind_group);
            self.foliage.draw(&mut pass, &self.camera.bind_group);
            self.snow.draw(&mut pass, &self.camera.bind_group);
        }

        self.context.submit(encoder);
        frame.present();
        Ok(())
    }
}
