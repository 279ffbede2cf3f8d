use nalgebra::Matrix4;
use tracing::trace;

use super::body::BodyID;
use super::solar_system::SolarSystem;

/// What the renderer uploads for one body.
///
/// Matrices are column-major and act on column vectors, the layout GLSL
/// expects, so no transposition is needed on upload.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TransformPair {
    pub mvp: Matrix4<f32>,
    pub model: Matrix4<f32>,
}

pub fn propagate(local_transform: &Matrix4<f64>, view_proj: &Matrix4<f32>) -> TransformPair {
    let model: Matrix4<f32> = nalgebra::convert(*local_transform);
    TransformPair {
        mvp: view_proj * model,
        model,
    }
}

/// Last published transform pairs, recomputed only when marked dirty.
///
/// Anything that moves a body or the camera must call `invalidate`.
#[derive(Debug, Clone)]
pub struct TransformCache {
    pairs: Vec<(BodyID, TransformPair)>,
    dirty: bool,
}

impl TransformCache {
    pub fn new() -> Self {
        TransformCache {
            pairs: vec![],
            dirty: true,
        }
    }

    pub fn invalidate(&mut self) {
        self.dirty = true;
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Returns whether the pairs were recomputed.
    pub fn refresh(&mut self, system: &SolarSystem, view_proj: &Matrix4<f32>) -> bool {
        if !self.dirty {
            return false;
        }

        self.pairs.clear();
        self.pairs.extend(
            system
                .bodies()
                .iter()
                .map(|body| (body.id, propagate(&body.state.local_transform, view_proj))),
        );
        self.dirty = false;
        trace!(bodies = self.pairs.len(), "recomputed body transforms");
        true
    }

    pub fn pairs(&self) -> &[(BodyID, TransformPair)] {
        &self.pairs
    }

    pub fn get(&self, id: BodyID) -> Option<&TransformPair> {
        self.pairs.iter().find(|(i, _)| *i == id).map(|(_, pair)| pair)
    }
}

impl Default for TransformCache {
    fn default() -> Self {
        Self::new()
    }
}
