use kiss3d::camera::Camera;
use kiss3d::renderer::Renderer;
use nalgebra::Point3;

use self::body_renderer::BodyRenderer;
use self::orbit_renderer::OrbitRenderer;
use crate::model::{OrbitPaths, TransformPair};

mod body_renderer;
mod orbit_renderer;

pub struct CompoundRenderer {
    body_renderer: BodyRenderer,
    orbit_renderer: OrbitRenderer,
}

impl CompoundRenderer {
    pub fn new(orbit_paths: &OrbitPaths) -> Self {
        CompoundRenderer {
            body_renderer: BodyRenderer::new(),
            orbit_renderer: OrbitRenderer::new(orbit_paths),
        }
    }

    pub fn draw_orbits(&mut self) {
        self.orbit_renderer.draw_orbits();
    }

    pub fn draw_body(&mut self, transforms: TransformPair, color: Point3<f32>, emissive: bool) {
        self.body_renderer.add_body(transforms, color, emissive);
    }
}

impl Renderer for CompoundRenderer {
    fn render(&mut self, pass: usize, camera: &mut dyn Camera) {
        self.orbit_renderer.render(pass, camera);
        self.body_renderer.render(pass, camera);
    }
}
