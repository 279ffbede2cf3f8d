use nalgebra::{Translation3, Vector3};

use super::body::{BodyInfo, KinematicState};
use crate::math::geometry::{circle_point_xz, spin_tilt_transform};

/// Multipliers applied to a body's own rates. Every body except the reference
/// body runs at its own rates times the reference body's current rates, so
/// changing the reference body speeds up or slows down the whole system.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RateScale {
    pub orbital: f64,
    pub rotational: f64,
}

impl RateScale {
    pub const UNIT: RateScale = RateScale {
        orbital: 1.0,
        rotational: 1.0,
    };

    pub fn of(reference: &BodyInfo) -> Self {
        RateScale {
            orbital: reference.orbital_rate,
            rotational: reference.rotational_rate,
        }
    }
}

/// Snapshot of the body being orbited, taken after it was updated this frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TargetFrame {
    pub translation: Vector3<f64>,
    pub orbit_angle: f64,
}

impl TargetFrame {
    pub fn of(state: &KinematicState) -> Self {
        TargetFrame {
            translation: state.translation(),
            orbit_angle: state.orbit_angle,
        }
    }
}

/// Where a body sits for a given orbit angle.
///
/// Around another body, the two orbit phases add up so that a moon follows
/// its planet's current position. Around the origin the offset is mirrored
/// through the origin; both conventions are kept as they are.
pub fn orbital_offset(
    distance: f64,
    orbit_angle: f64,
    target: Option<&TargetFrame>,
) -> Vector3<f64> {
    match target {
        Some(target) => {
            target.translation + circle_point_xz(distance, orbit_angle + target.orbit_angle)
        }
        None => -circle_point_xz(distance, orbit_angle),
    }
}

/// Advances one body by `elapsed` seconds.
///
/// The local transform is rebuilt from the new spin but the location stored
/// by the previous call; the new location is written last, after the orbit
/// angle has moved on.
pub fn advance(
    info: &BodyInfo,
    state: &mut KinematicState,
    target: Option<&TargetFrame>,
    scale: RateScale,
    elapsed: f64,
) {
    state.rotation += elapsed * info.rotational_rate * scale.rotational;

    state.local_transform =
        spin_tilt_transform(info.scale, state.rotation, info.axial_tilt, &state.location);

    let offset = orbital_offset(info.orbital_distance, state.orbit_angle, target);

    state.orbit_angle -= elapsed * info.orbital_rate * scale.orbital;

    state.location = Translation3::from(offset);
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::{assert_abs_diff_eq, assert_relative_eq};
    use nalgebra::{Matrix4, Point3};

    use crate::model::body::BodyKind;

    fn info(orbital_rate: f64, rotational_rate: f64, distance: f64) -> BodyInfo {
        BodyInfo {
            name: String::from("Test"),
            kind: BodyKind::Planet,
            color: Point3::new(1.0, 1.0, 1.0),
            orbital_rate,
            rotational_rate,
            orbital_distance: distance,
            axial_tilt: 0.4,
            scale: 0.5,
        }
    }

    #[test]
    fn test_offset_around_origin_lies_on_circle() {
        for i in 0..50 {
            let angle = -25.0 + i as f64 * 1.13;
            let offset = orbital_offset(40.0, angle, None);
            assert_relative_eq!(offset.norm(), 40.0, epsilon = 1e-9);
            assert_eq!(offset.y, 0.0);
            // Mirrored relative to the satellite convention
            assert_relative_eq!(offset.x, -40.0 * angle.cos(), epsilon = 1e-9);
            assert_relative_eq!(offset.z, -40.0 * angle.sin(), epsilon = 1e-9);
        }
    }

    #[test]
    fn test_offset_around_body_lies_on_circle() {
        let target = TargetFrame {
            translation: Vector3::new(-7.0, 0.0, 12.5),
            orbit_angle: 1.7,
        };
        for i in 0..50 {
            let angle = -25.0 + i as f64 * 1.13;
            let offset = orbital_offset(3.2, angle, Some(&target));
            let relative = offset - target.translation;
            assert_relative_eq!(relative.norm(), 3.2, epsilon = 1e-9);
            assert_relative_eq!(relative.x, 3.2 * (angle + 1.7).cos(), epsilon = 1e-9);
        }
    }

    #[test]
    fn test_moon_next_to_parent() {
        let mut moon = info(13.0, 1.0, 3.2);
        moon.kind = BodyKind::Moon;
        let mut state = KinematicState::new(&moon);
        let parent = TargetFrame {
            translation: Vector3::new(10.0, 0.0, 0.0),
            orbit_angle: 0.0,
        };

        advance(&moon, &mut state, Some(&parent), RateScale::UNIT, 0.0);
        assert_relative_eq!(state.translation(), Vector3::new(13.2, 0.0, 0.0));
    }

    #[test]
    fn test_reference_spin_uses_own_rate() {
        let earth = info(0.0025, std::f64::consts::PI, 40.0);
        let mut state = KinematicState::new(&earth);
        advance(&earth, &mut state, None, RateScale::UNIT, 1.0);
        assert_eq!(state.rotation, std::f64::consts::PI);
        assert_eq!(state.orbit_angle, -0.0025);
    }

    #[test]
    fn test_spin_scaled_by_reference() {
        let body = info(0.5, 2.0, 10.0);
        let mut state = KinematicState::new(&body);
        let scale = RateScale {
            orbital: 0.0025,
            rotational: 3.0,
        };
        advance(&body, &mut state, None, scale, 1.0);
        assert_eq!(state.rotation, 6.0);
        assert_eq!(state.orbit_angle, -0.5 * 0.0025);
    }

    #[test]
    fn test_offset_uses_angle_before_decrement() {
        let body = info(0.5, 0.0, 10.0);
        let mut state = KinematicState::new(&body);
        advance(&body, &mut state, None, RateScale::UNIT, 1.0);
        // Angle was zero when the offset was taken
        assert_relative_eq!(state.translation(), Vector3::new(-10.0, 0.0, 0.0));
        assert_eq!(state.orbit_angle, -0.5);

        advance(&body, &mut state, None, RateScale::UNIT, 1.0);
        assert_relative_eq!(
            state.translation(),
            Vector3::new(-10.0 * (-0.5f64).cos(), 0.0, -10.0 * (-0.5f64).sin()),
            epsilon = 1e-12
        );
    }

    #[test]
    fn test_transform_lags_location_by_one_update() {
        let body = info(0.5, 0.0, 10.0);
        let mut state = KinematicState::new(&body);

        // First update builds the transform from the initial (identity) location
        advance(&body, &mut state, None, RateScale::UNIT, 1.0);
        let origin = state.local_transform.transform_point(&Point3::origin());
        assert_abs_diff_eq!(origin, Point3::origin(), epsilon = 1e-12);

        // The second one picks up the location stored by the first
        let stored = state.location;
        advance(&body, &mut state, None, RateScale::UNIT, 1.0);
        let origin = state.local_transform.transform_point(&Point3::origin());
        assert_relative_eq!(origin, stored * Point3::origin(), epsilon = 1e-12);
    }

    #[test]
    fn test_zero_elapsed_keeps_angles() {
        let body = info(0.5, 2.0, 10.0);
        let mut state = KinematicState::new(&body);
        advance(&body, &mut state, None, RateScale::UNIT, 0.0);
        assert_eq!(state.rotation, 0.0);
        assert_eq!(state.orbit_angle, 0.0);
        assert_ne!(state.local_transform, Matrix4::identity());
    }
}
