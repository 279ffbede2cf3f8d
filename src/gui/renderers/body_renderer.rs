use std::f32::consts::PI;

use kiss3d::camera::Camera;
use kiss3d::context::Context;
use kiss3d::renderer::Renderer;
use kiss3d::resource::{
    AllocationType, BufferType, Effect, GPUVec, ShaderAttribute, ShaderUniform,
};
use nalgebra::{Matrix4, Point3};

use crate::model::TransformPair;

const SPHERE_STACKS: usize = 24;
const SPHERE_SLICES: usize = 48;

struct BodyData {
    transforms: TransformPair,
    color: Point3<f32>,
    emissive: bool,
}

/// Draws every body as the same unit sphere, placed by its published
/// transform pair and lit by a point light at the origin.
pub struct BodyRenderer {
    // OpenGL stuff
    shader: Effect,
    pos: ShaderAttribute<Point3<f32>>,
    mvp: ShaderUniform<Matrix4<f32>>,
    model: ShaderUniform<Matrix4<f32>>,
    color: ShaderUniform<Point3<f32>>,
    emissive: ShaderUniform<f32>,
    // Shared by all bodies; on a unit sphere the normal is the position
    mesh: GPUVec<Point3<f32>>,
    // Data storage
    bodies: Vec<BodyData>,
}

impl BodyRenderer {
    pub fn new() -> Self {
        let mut shader = Effect::new_from_str(VERTEX_SRC, FRAGMENT_SRC);

        shader.use_program();

        BodyRenderer {
            pos: shader
                .get_attrib::<Point3<f32>>("position")
                .expect("Failed to get shader attribute."),
            mvp: shader
                .get_uniform::<Matrix4<f32>>("mvp")
                .expect("Failed to get shader uniform."),
            model: shader
                .get_uniform::<Matrix4<f32>>("model")
                .expect("Failed to get shader uniform."),
            color: shader
                .get_uniform::<Point3<f32>>("color")
                .expect("Failed to get shader uniform."),
            emissive: shader
                .get_uniform::<f32>("emissive")
                .expect("Failed to get shader uniform."),
            shader,
            mesh: GPUVec::new(
                unit_sphere(SPHERE_STACKS, SPHERE_SLICES),
                BufferType::Array,
                AllocationType::StaticDraw,
            ),
            bodies: vec![],
        }
    }

    pub fn add_body(&mut self, transforms: TransformPair, color: Point3<f32>, emissive: bool) {
        self.bodies.push(BodyData {
            transforms,
            color,
            emissive,
        });
    }
}

impl Renderer for BodyRenderer {
    // The camera is already folded into each body's mvp
    fn render(&mut self, _pass: usize, _camera: &mut dyn Camera) {
        if self.bodies.is_empty() {
            return;
        }

        self.shader.use_program();
        self.pos.enable();
        self.pos.bind(&mut self.mesh);

        let ctxt = Context::get();
        for body in self.bodies.iter() {
            self.mvp.upload(&body.transforms.mvp);
            self.model.upload(&body.transforms.model);
            self.color.upload(&body.color);
            self.emissive.upload(&if body.emissive { 1.0 } else { 0.0 });

            ctxt.draw_arrays(Context::TRIANGLES, 0, self.mesh.len() as i32);
        }

        self.pos.disable();
        self.bodies.clear();
    }
}

/// Triangle list for a unit sphere, wound counter-clockwise seen from outside.
fn unit_sphere(stacks: usize, slices: usize) -> Vec<Point3<f32>> {
    let point = |stack: usize, slice: usize| {
        let phi = PI * stack as f32 / stacks as f32;
        let theta = 2.0 * PI * slice as f32 / slices as f32;
        Point3::new(phi.sin() * theta.cos(), phi.cos(), phi.sin() * theta.sin())
    };

    let mut triangles = Vec::with_capacity(stacks * slices * 6);
    for stack in 0..stacks {
        for slice in 0..slices {
            let a = point(stack, slice);
            let b = point(stack + 1, slice);
            let c = point(stack + 1, slice + 1);
            let d = point(stack, slice + 1);
            triangles.extend_from_slice(&[a, c, b, a, d, c]);
        }
    }
    triangles
}

static VERTEX_SRC: &str = "#version 100
    attribute vec3 position;
    uniform   mat4 mvp;
    uniform   mat4 model;
    varying   vec3 vWorldPos;
    varying   vec3 vNormal;
    void main() {
        vWorldPos = (model * vec4(position, 1.0)).xyz;
        vNormal = (model * vec4(position, 0.0)).xyz;
        gl_Position = mvp * vec4(position, 1.0);
    }";

static FRAGMENT_SRC: &str = "#version 100
#ifdef GL_FRAGMENT_PRECISION_HIGH
   precision highp float;
#else
   precision mediump float;
#endif

    uniform vec3  color;
    uniform float emissive;
    varying vec3  vWorldPos;
    varying vec3  vNormal;
    void main() {
        // The sun sits at the origin
        vec3 to_light = normalize(-vWorldPos);
        float diffuse = max(dot(normalize(vNormal), to_light), 0.0);
        vec3 lit = color * (0.08 + 0.92 * diffuse);
        gl_FragColor = vec4(mix(lit, color, emissive), 1.0);
    }";

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;

    #[test]
    fn test_unit_sphere() {
        let triangles = unit_sphere(6, 12);
        assert_eq!(triangles.len(), 6 * 12 * 6);
        for p in triangles.iter() {
            assert_relative_eq!(p.coords.norm(), 1.0, epsilon = 1e-5);
        }

        // Away from the poles, faces point outwards
        for tri in triangles.chunks(3) {
            let normal = (tri[1] - tri[0]).cross(&(tri[2] - tri[0]));
            if normal.norm() > 1e-6 {
                let centroid = (tri[0].coords + tri[1].coords + tri[2].coords) / 3.0;
                assert!(normal.dot(&centroid) > 0.0);
            }
        }
    }
}
