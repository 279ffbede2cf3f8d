mod animation;
mod body;
mod kinematics;
mod orbit_path;
mod solar_system;
mod transform;

pub use animation::{AnimationController, SpeedBand, DEFAULT_ORBITAL_SPEED};
pub use body::{Body, BodyID, BodyInfo, BodyKind, KinematicState, SatelliteTarget};
pub use kinematics::{advance, orbital_offset, RateScale, TargetFrame};
pub use orbit_path::{OrbitPath, OrbitPaths, DEFAULT_ORBIT_SEGMENTS};
pub use solar_system::SolarSystem;
pub use transform::{propagate, TransformCache, TransformPair};
