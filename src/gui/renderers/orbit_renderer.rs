use kiss3d::camera::Camera;
use kiss3d::context::Context;
use kiss3d::renderer::Renderer;
use kiss3d::resource::{
    AllocationType, BufferType, Effect, GPUVec, ShaderAttribute, ShaderUniform,
};
use nalgebra::{Matrix4, Point3};

use crate::model::OrbitPaths;

const ORBIT_COLOR: [f32; 3] = [0.961, 0.871, 0.702];

/// Draws the precomputed orbit circles. The line buffer is uploaded once and
/// never changes; the paths already sit in world space.
pub struct OrbitRenderer {
    // OpenGL stuff
    shader: Effect,
    pos: ShaderAttribute<Point3<f32>>,
    color: ShaderUniform<Point3<f32>>,
    mvp: ShaderUniform<Matrix4<f32>>,
    line_width: f32,
    // Data storage
    orbit_lines: GPUVec<Point3<f32>>,
    visible: bool,
}

impl OrbitRenderer {
    pub fn new(paths: &OrbitPaths) -> Self {
        let mut shader = Effect::new_from_str(VERTEX_SRC, FRAGMENT_SRC);

        shader.use_program();

        OrbitRenderer {
            pos: shader
                .get_attrib::<Point3<f32>>("position")
                .expect("Failed to get shader attribute."),
            color: shader
                .get_uniform::<Point3<f32>>("color")
                .expect("Failed to get shader uniform."),
            mvp: shader
                .get_uniform::<Matrix4<f32>>("mvp")
                .expect("Failed to get shader uniform."),
            shader,
            line_width: 1.0,
            orbit_lines: GPUVec::new(
                paths.vertices().to_vec(),
                BufferType::Array,
                AllocationType::StaticDraw,
            ),
            visible: false,
        }
    }

    pub fn draw_orbits(&mut self) {
        self.visible = true;
    }
}

impl Renderer for OrbitRenderer {
    fn render(&mut self, _pass: usize, camera: &mut dyn Camera) {
        if !self.visible || self.orbit_lines.len() == 0 {
            return;
        }

        self.shader.use_program();
        self.pos.enable();
        self.pos.bind(&mut self.orbit_lines);

        let [r, g, b] = ORBIT_COLOR;
        self.color.upload(&Point3::new(r, g, b));
        // Orbit paths have an identity world transform
        self.mvp.upload(&camera.transformation());

        let ctxt = Context::get();
        ctxt.line_width(self.line_width);
        ctxt.draw_arrays(Context::LINES, 0, self.orbit_lines.len() as i32);

        self.pos.disable();
        self.visible = false;
    }
}

/// Vertex shader used by the material to display line.
static VERTEX_SRC: &str = "#version 100
    attribute vec3 position;
    uniform   mat4 mvp;
    void main() {
        gl_Position = mvp * vec4(position, 1.0);
    }";

/// Fragment shader used by the material to display line.
static FRAGMENT_SRC: &str = "#version 100
#ifdef GL_FRAGMENT_PRECISION_HIGH
   precision highp float;
#else
   precision mediump float;
#endif

    uniform vec3 color;
    void main() {
        gl_FragColor = vec4(color, 1.0);
    }";
