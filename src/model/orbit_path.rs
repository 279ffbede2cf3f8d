use std::ops::Range;

use nalgebra::{Point3, Vector3};

use super::body::{Body, BodyID};
use crate::error::{Error, Result};
use crate::math::geometry::{circle_point_xz, loop_iter_parametric};

pub const DEFAULT_ORBIT_SEGMENTS: usize = 10_000;

#[derive(Debug, Clone)]
pub struct OrbitPath {
    pub body: BodyID,
    pub radius: f64,
    vertices: Range<usize>,
}

/// Line-list vertices tracing the orbit circle of every body that circles
/// the origin. Built once; the circles are in the XZ plane and ignore the
/// bodies' axial tilt.
#[derive(Debug, Clone)]
pub struct OrbitPaths {
    // Stored as (start, end, start, end, ...), one pair per segment
    vertices: Vec<Point3<f32>>,
    paths: Vec<OrbitPath>,
    segments_per_orbit: usize,
}

impl OrbitPaths {
    pub fn generate<'a, I>(bodies: I, segments_per_orbit: usize) -> Result<Self>
    where
        I: IntoIterator<Item = &'a Body>,
    {
        if segments_per_orbit < 3 {
            return Err(Error::TooFewSegments(segments_per_orbit));
        }

        // Satellites move with their parent, so a fixed circle can't show them
        let orbiting: Vec<&Body> = bodies
            .into_iter()
            .filter(|b| b.orbits_origin() && b.info.orbital_distance > 0.0)
            .collect();

        let num_vertices = segments_per_orbit
            .checked_mul(2)
            .and_then(|n| n.checked_mul(orbiting.len()))
            .ok_or(Error::OrbitPathAllocation(usize::MAX))?;
        let mut vertices = Vec::new();
        vertices
            .try_reserve_exact(num_vertices)
            .map_err(|_| Error::OrbitPathAllocation(num_vertices))?;

        let mut paths = Vec::with_capacity(orbiting.len());
        for body in orbiting {
            let radius = body.info.orbital_distance;
            let start = vertices.len();

            let f = |angle: f64| {
                let v: Vector3<f32> = nalgebra::convert(circle_point_xz(radius, angle));
                Point3::from(v)
            };
            let points: Vec<_> = loop_iter_parametric(f, segments_per_orbit).collect();
            for (i, pt) in points.iter().enumerate() {
                vertices.push(*pt);
                vertices.push(points[(i + 1) % points.len()]);
            }

            paths.push(OrbitPath {
                body: body.id,
                radius,
                vertices: start..vertices.len(),
            });
        }

        Ok(OrbitPaths {
            vertices,
            paths,
            segments_per_orbit,
        })
    }

    pub fn vertices(&self) -> &[Point3<f32>] {
        &self.vertices
    }

    pub fn paths(&self) -> &[OrbitPath] {
        &self.paths
    }

    pub fn path_vertices(&self, body: BodyID) -> Option<&[Point3<f32>]> {
        self.paths
            .iter()
            .find(|p| p.body == body)
            .map(|p| &self.vertices[p.vertices.clone()])
    }

    pub fn segments_per_orbit(&self) -> usize {
        self.segments_per_orbit
    }

    pub fn segment_count(&self) -> usize {
        self.vertices.len() / 2
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;

    use crate::file::parse_table;
    use crate::model::solar_system::SolarSystem;

    const TABLE: &str = "\
name  kind   color   parent  orbital_rate  rotational_rate  distance  tilt  scale
Sun   star   ffffff  -       0.0           0.06             0.0       0.0   1.0
Earth planet 3a7bd5  -       0.0025        3.0              40.0      0.26  0.4
Moon  moon   c8c8c8  Earth   13.0          1.0              3.2       0.07  0.1
Mars  planet c1440e  -       0.53          0.97             60.0      0.28  0.2
";

    fn system() -> SolarSystem {
        SolarSystem::new(&parse_table(TABLE).unwrap(), "Earth").unwrap()
    }

    #[test]
    fn test_only_origin_orbits_get_paths() {
        let system = system();
        let paths = OrbitPaths::generate(system.bodies(), 100).unwrap();

        let names: Vec<_> = paths
            .paths()
            .iter()
            .map(|p| system.get_body(p.body).info.name.as_str())
            .collect();
        assert_eq!(names, vec!["Earth", "Mars"]);
        assert_eq!(paths.segment_count(), 200);
        assert_eq!(paths.vertices().len(), 400);
        assert!(paths.path_vertices(system.find("Moon").unwrap()).is_none());
    }

    #[test]
    fn test_paths_are_closed_circles() {
        let system = system();
        let paths = OrbitPaths::generate(system.bodies(), 64).unwrap();
        let mars = system.find("Mars").unwrap();
        let vertices = paths.path_vertices(mars).unwrap();

        for v in vertices {
            assert_relative_eq!(v.coords.norm(), 60.0, epsilon = 1e-3);
            assert_eq!(v.y, 0.0);
        }
        // Every segment starts where the previous one ended, and the last
        // one closes the loop
        for pair in vertices.chunks(2).collect::<Vec<_>>().windows(2) {
            assert_eq!(pair[0][1], pair[1][0]);
        }
        assert_eq!(vertices[vertices.len() - 1], vertices[0]);
        assert_relative_eq!(vertices[0], Point3::new(60.0, 0.0, 0.0));
    }

    #[test]
    fn test_too_few_segments() {
        let system = system();
        assert!(matches!(
            OrbitPaths::generate(system.bodies(), 2),
            Err(Error::TooFewSegments(2))
        ));
    }

    #[test]
    fn test_impossible_allocation_is_an_error() {
        let system = system();
        assert!(matches!(
            OrbitPaths::generate(system.bodies(), usize::MAX / 2),
            Err(Error::OrbitPathAllocation(_))
        ));
    }
}
