use nalgebra::{Matrix4, Point3, Translation3, Vector3};

#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct BodyID(pub usize);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BodyKind {
    Star,
    Planet,
    Moon,
}

/// What a body circles around.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SatelliteTarget {
    Origin,
    Body(BodyID),
}

// All the descriptive info about a body. Only the reference body's rates
// ever change after startup, and only through the animation controller.
#[derive(Debug, Clone)]
pub struct BodyInfo {
    pub name: String,
    pub kind: BodyKind,
    pub color: Point3<f32>,
    /// Orbit angle lost per second (scaled by the reference body's rate).
    pub orbital_rate: f64,
    /// Spin gained per second (scaled by the reference body's rate).
    pub rotational_rate: f64,
    pub orbital_distance: f64,
    pub axial_tilt: f64,
    pub scale: f64,
}

impl BodyInfo {
    pub fn is_emissive(&self) -> bool {
        self.kind == BodyKind::Star
    }
}

/// The running state the kinematics engine advances every active frame.
#[derive(Debug, Clone, PartialEq)]
pub struct KinematicState {
    pub rotation: f64,
    pub orbit_angle: f64,
    /// Offset written at the end of the last update; read back at the start
    /// of the next one when the local transform is rebuilt.
    pub location: Translation3<f64>,
    pub local_transform: Matrix4<f64>,
}

impl KinematicState {
    pub fn new(info: &BodyInfo) -> Self {
        KinematicState {
            rotation: 0.0,
            orbit_angle: 0.0,
            location: Translation3::identity(),
            local_transform: Matrix4::new_scaling(info.scale),
        }
    }

    pub fn translation(&self) -> Vector3<f64> {
        self.location.vector
    }
}

#[derive(Debug, Clone)]
pub struct Body {
    pub id: BodyID,
    pub info: BodyInfo,
    pub target: SatelliteTarget,
    pub state: KinematicState,
}

impl Body {
    pub fn new(id: BodyID, info: BodyInfo, target: SatelliteTarget) -> Self {
        let state = KinematicState::new(&info);
        Body {
            id,
            info,
            target,
            state,
        }
    }

    pub fn position(&self) -> Point3<f64> {
        self.state.location * Point3::origin()
    }

    pub fn orbits_origin(&self) -> bool {
        self.target == SatelliteTarget::Origin
    }
}
