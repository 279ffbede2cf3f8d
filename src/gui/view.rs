use kiss3d::camera::Camera;
use kiss3d::planar_camera::PlanarCamera;
use kiss3d::post_processing::PostProcessingEffect;
use kiss3d::renderer::Renderer;
use kiss3d::window::Window;
use nalgebra::{Point2, Point3};

use super::camera::ZoomableCamera;
use super::controller::Controller;
use super::renderers::CompoundRenderer;
use crate::model::{OrbitPaths, SolarSystem, TransformCache};

const INITIAL_EYE: [f32; 3] = [0.0, 20.0, 80.0];

pub struct View {
    // Object state
    system: SolarSystem,
    transforms: TransformCache,
    // Camera
    camera: ZoomableCamera,
    // Misc
    renderer: CompoundRenderer,
}

impl View {
    pub fn new(system: SolarSystem, orbit_paths: &OrbitPaths) -> Self {
        let [x, y, z] = INITIAL_EYE;
        View {
            system,
            transforms: TransformCache::new(),
            camera: ZoomableCamera::looking_from(Point3::new(x, y, z)),
            renderer: CompoundRenderer::new(orbit_paths),
        }
    }

    pub fn update_state_by(&mut self, elapsed: f64) {
        if self.system.update(elapsed) {
            self.transforms.invalidate();
        }
    }

    pub fn toggle_animation(&mut self) {
        self.system.toggle_animation();
    }

    pub fn speed_up(&mut self) {
        self.system.speed_up();
    }

    pub fn slow_down(&mut self) {
        self.system.slow_down();
    }

    pub fn prerender_scene(&mut self, window: &mut Window, controller: &Controller) {
        if self.camera.take_changed() {
            self.transforms.invalidate();
        }
        self.transforms
            .refresh(&self.system, &self.camera.transformation());

        self.renderer.draw_orbits();
        for (id, pair) in self.transforms.pairs() {
            let info = &self.system.get_body(*id).info;
            self.renderer.draw_body(*pair, info.color, info.is_emissive());
        }

        // Draw text
        let default_font = kiss3d::text::Font::default();
        let text_color = Point3::new(1.0, 1.0, 1.0);
        window.draw_text(
            &self.controls_text(controller),
            &Point2::origin(),
            50.0,
            &default_font,
            &text_color,
        );
    }

    fn controls_text(&self, controller: &Controller) -> String {
        let animation = self.system.animation();
        format!(
            "Frame Rate: {:.0}    Total Elapsed Time: {:.1}
Camera (WASD + Left-Click-Drag, Scroll or +/- to zoom)
Toggle Animation (Space): {}
Speed Up (G) and Slow Down (H): {:.4}",
            controller.fps(),
            controller.total_time(),
            if animation.is_enabled() {
                "Enabled"
            } else {
                "Disabled"
            },
            animation.orbital_speed(),
        )
    }

    pub fn cameras_and_effect_and_renderer(
        &mut self,
    ) -> (
        Option<&mut dyn Camera>,
        Option<&mut dyn PlanarCamera>,
        Option<&mut dyn Renderer>,
        Option<&mut dyn PostProcessingEffect>,
    ) {
        (Some(&mut self.camera), None, Some(&mut self.renderer), None)
    }
}
