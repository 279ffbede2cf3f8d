use std::f64::consts::PI;

use tracing::debug;

use super::body::BodyInfo;

pub const DEFAULT_ORBITAL_SPEED: f64 = 0.0025;

/// How far one speed-up or slow-down moves the reference body's rates, and
/// the band its orbital rate has to stay in.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpeedBand {
    pub orbital_step: f64,
    pub rotational_step: f64,
    /// Exclusive.
    pub upper: f64,
    /// Inclusive.
    pub lower: f64,
}

impl Default for SpeedBand {
    fn default() -> Self {
        SpeedBand {
            orbital_step: 0.0001,
            rotational_step: PI / 26.0,
            upper: 0.005,
            lower: 0.0001,
        }
    }
}

/// Play/pause and global speed for the whole system.
///
/// The global speed is the reference body's orbital rate; every other body's
/// rates are multiples of it, so nudging it rescales everything at once.
#[derive(Debug, Clone)]
pub struct AnimationController {
    enabled: bool,
    orbital_speed: f64,
    band: SpeedBand,
}

impl AnimationController {
    pub fn new(orbital_speed: f64) -> Self {
        Self::with_band(orbital_speed, SpeedBand::default())
    }

    pub fn with_band(orbital_speed: f64, band: SpeedBand) -> Self {
        AnimationController {
            enabled: true,
            orbital_speed,
            band,
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    pub fn toggle(&mut self) {
        self.enabled = !self.enabled;
    }

    pub fn orbital_speed(&self) -> f64 {
        self.orbital_speed
    }

    pub fn band(&self) -> SpeedBand {
        self.band
    }

    /// Returns whether the rates changed; requests past the band are ignored.
    pub fn speed_up(&mut self, reference: &mut BodyInfo) -> bool {
        if reference.orbital_rate + self.band.orbital_step < self.band.upper {
            self.orbital_speed += self.band.orbital_step;
            reference.orbital_rate += self.band.orbital_step;
            reference.rotational_rate += self.band.rotational_step;
            true
        } else {
            debug!(rate = reference.orbital_rate, "speed-up ignored at upper edge");
            false
        }
    }

    /// Returns whether the rates changed; requests past the band are ignored.
    pub fn slow_down(&mut self, reference: &mut BodyInfo) -> bool {
        if reference.orbital_rate - self.band.orbital_step >= self.band.lower {
            self.orbital_speed -= self.band.orbital_step;
            reference.orbital_rate -= self.band.orbital_step;
            reference.rotational_rate -= self.band.rotational_step;
            true
        } else {
            debug!(rate = reference.orbital_rate, "slow-down ignored at lower edge");
            false
        }
    }
}

impl Default for AnimationController {
    fn default() -> Self {
        Self::new(DEFAULT_ORBITAL_SPEED)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;
    use nalgebra::Point3;

    use crate::model::body::BodyKind;

    fn earth() -> BodyInfo {
        BodyInfo {
            name: String::from("Earth"),
            kind: BodyKind::Planet,
            color: Point3::new(0.2, 0.5, 0.8),
            orbital_rate: DEFAULT_ORBITAL_SPEED,
            rotational_rate: PI,
            orbital_distance: 40.0,
            axial_tilt: 23.5 / 90.0,
            scale: 0.4,
        }
    }

    #[test]
    fn test_toggle() {
        let mut controller = AnimationController::default();
        assert!(controller.is_enabled());
        controller.toggle();
        assert!(!controller.is_enabled());
        controller.toggle();
        assert!(controller.is_enabled());
        controller.set_enabled(false);
        assert!(!controller.is_enabled());
    }

    #[test]
    fn test_speed_up_steps_to_upper_edge() {
        let mut controller = AnimationController::default();
        let mut earth = earth();

        let mut steps = 0;
        while controller.speed_up(&mut earth) {
            steps += 1;
            assert!(steps < 1000, "speed-up never stopped");
        }
        assert_eq!(steps, 24);
        assert!(earth.orbital_rate < 0.005);
        assert_relative_eq!(earth.orbital_rate, 0.0049, epsilon = 1e-12);
        assert_eq!(controller.orbital_speed(), earth.orbital_rate);
        assert_relative_eq!(earth.rotational_rate, PI + 24.0 * PI / 26.0, epsilon = 1e-9);

        // Further requests leave everything alone
        let before = earth.clone();
        assert!(!controller.speed_up(&mut earth));
        assert_eq!(earth.orbital_rate, before.orbital_rate);
        assert_eq!(earth.rotational_rate, before.rotational_rate);
    }

    #[test]
    fn test_slow_down_steps_to_lower_edge() {
        let mut controller = AnimationController::default();
        let mut earth = earth();

        let mut steps = 0;
        while controller.slow_down(&mut earth) {
            steps += 1;
            assert!(steps < 1000, "slow-down never stopped");
        }
        assert_eq!(steps, 24);
        assert!(earth.orbital_rate >= 0.0001);
        assert_relative_eq!(earth.orbital_rate, 0.0001, epsilon = 1e-12);
        assert_eq!(controller.orbital_speed(), earth.orbital_rate);

        assert!(!controller.slow_down(&mut earth));
        assert!(controller.speed_up(&mut earth));
    }

    #[test]
    fn test_speed_change_does_not_toggle() {
        let mut controller = AnimationController::default();
        controller.set_enabled(false);
        let mut earth = earth();
        assert!(controller.speed_up(&mut earth));
        assert!(!controller.is_enabled());
    }
}
