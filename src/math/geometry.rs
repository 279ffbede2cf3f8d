use nalgebra::{Matrix4, Rotation3, Translation3, Vector3};

/// Point at `angle` on a circle of the given radius, lying in the XZ plane.
pub fn circle_point_xz(radius: f64, angle: f64) -> Vector3<f64> {
    Vector3::new(radius * angle.cos(), 0.0, radius * angle.sin())
}

/// Spin about Y, then tilt about Z, then translate. The scale is applied first
/// and is uniform, so it commutes with both rotations.
pub fn spin_tilt_transform(
    scale: f64,
    spin: f64,
    tilt: f64,
    location: &Translation3<f64>,
) -> Matrix4<f64> {
    let spin = Rotation3::from_axis_angle(&Vector3::y_axis(), spin);
    let tilt = Rotation3::from_axis_angle(&Vector3::z_axis(), tilt);
    location.to_homogeneous()
        * tilt.to_homogeneous()
        * spin.to_homogeneous()
        * Matrix4::new_scaling(scale)
}

/// Evaluates `f` at `num_segments` evenly spaced parameters covering one full
/// turn, without repeating the starting point.
pub fn loop_iter_parametric<F, S, T>(f: F, num_segments: usize) -> impl Iterator<Item = T>
where
    F: Fn(S) -> T,
    S: nalgebra::RealField + simba::scalar::SupersetOf<usize> + Copy,
{
    assert!(
        num_segments >= 1,
        "Must have at least one segment, num_segments was {}",
        num_segments
    );
    let convert = nalgebra::convert::<usize, S>;
    (0..num_segments)
        .map(move |i| convert(i) * S::two_pi() / convert(num_segments))
        .map(f)
}
