use std::collections::HashMap;

use tracing::info;

use super::animation::AnimationController;
use super::body::{Body, BodyID, BodyInfo, SatelliteTarget};
use super::kinematics::{self, RateScale, TargetFrame};
use crate::error::{Error, Result};
use crate::file::BodyTable;

/// Every body in the scene plus the controller that decides whether they move.
#[derive(Debug, Clone)]
pub struct SolarSystem {
    bodies: Vec<Body>,
    reference: BodyID,
    // Reference body's ancestors, the reference body, then everyone else
    // with parents ahead of their satellites.
    update_order: Vec<BodyID>,
    animation: AnimationController,
}

impl SolarSystem {
    pub fn new(table: &BodyTable, reference_name: &str) -> Result<Self> {
        if table.records.is_empty() {
            return Err(Error::EmptyTable);
        }

        let mut name_to_id = HashMap::new();
        for (i, record) in table.records.iter().enumerate() {
            validate(&record.info)?;
            if name_to_id.insert(record.info.name.as_str(), BodyID(i)).is_some() {
                return Err(Error::DuplicateBody(record.info.name.clone()));
            }
        }

        let mut bodies = Vec::with_capacity(table.records.len());
        for (i, record) in table.records.iter().enumerate() {
            let target = match &record.parent {
                None => SatelliteTarget::Origin,
                // Naming yourself as the parent means circling the origin
                Some(parent) if *parent == record.info.name => SatelliteTarget::Origin,
                Some(parent) => match name_to_id.get(parent.as_str()) {
                    Some(id) => SatelliteTarget::Body(*id),
                    None => return Err(Error::UnknownBody(parent.clone())),
                },
            };
            bodies.push(Body::new(BodyID(i), record.info.clone(), target));
        }

        let reference = *name_to_id
            .get(reference_name)
            .ok_or_else(|| Error::UnknownBody(reference_name.to_owned()))?;
        let update_order = compute_update_order(&bodies, reference)?;
        let animation = AnimationController::new(bodies[reference.0].info.orbital_rate);

        info!(
            bodies = bodies.len(),
            reference = reference_name,
            "solar system ready"
        );

        Ok(SolarSystem {
            bodies,
            reference,
            update_order,
            animation,
        })
    }

    pub fn bodies(&self) -> &[Body] {
        &self.bodies
    }

    pub fn get_body(&self, id: BodyID) -> &Body {
        &self.bodies[id.0]
    }

    pub fn find(&self, name: &str) -> Option<BodyID> {
        self.bodies.iter().find(|b| b.info.name == name).map(|b| b.id)
    }

    pub fn reference(&self) -> BodyID {
        self.reference
    }

    pub fn update_order(&self) -> &[BodyID] {
        &self.update_order
    }

    pub fn animation(&self) -> &AnimationController {
        &self.animation
    }

    pub fn animation_mut(&mut self) -> &mut AnimationController {
        &mut self.animation
    }

    /// The multipliers every non-reference body runs at this frame.
    pub fn rate_scale(&self) -> RateScale {
        RateScale::of(&self.bodies[self.reference.0].info)
    }

    /// Moves every body forward by `elapsed` seconds, unless the animation is
    /// paused. Returns whether anything moved.
    pub fn update(&mut self, elapsed: f64) -> bool {
        if !self.animation.is_enabled() {
            return false;
        }

        // Rates don't change during a frame, so one snapshot serves every body
        let scale = self.rate_scale();
        for &id in self.update_order.iter() {
            let target = match self.bodies[id.0].target {
                SatelliteTarget::Origin => None,
                SatelliteTarget::Body(parent) => {
                    Some(TargetFrame::of(&self.bodies[parent.0].state))
                }
            };
            let scale = if id == self.reference {
                RateScale::UNIT
            } else {
                scale
            };

            let body = &mut self.bodies[id.0];
            kinematics::advance(&body.info, &mut body.state, target.as_ref(), scale, elapsed);
        }
        true
    }

    /// Runs `seconds` of simulated time in frames of `step` seconds, the last
    /// frame cut short to land exactly on `seconds`. Returns the number of
    /// frames run.
    pub fn run_for(&mut self, seconds: f64, step: f64) -> Result<usize> {
        if !(seconds.is_finite() && seconds >= 0.0) {
            return Err(Error::InvalidTimeParameter {
                name: "duration",
                value: seconds,
            });
        }
        if !(step.is_finite() && step > 0.0) {
            return Err(Error::InvalidTimeParameter {
                name: "step",
                value: step,
            });
        }

        let frames = (seconds / step).ceil() as usize;
        for frame in 0..frames {
            let remaining = seconds - frame as f64 * step;
            self.update(remaining.min(step).max(0.0));
        }
        Ok(frames)
    }

    pub fn toggle_animation(&mut self) {
        self.animation.toggle();
        info!(enabled = self.animation.is_enabled(), "animation toggled");
    }

    pub fn speed_up(&mut self) -> bool {
        let changed = self.animation.speed_up(&mut self.bodies[self.reference.0].info);
        if changed {
            info!(orbital_speed = self.animation.orbital_speed(), "sped up");
        }
        changed
    }

    pub fn slow_down(&mut self) -> bool {
        let changed = self.animation.slow_down(&mut self.bodies[self.reference.0].info);
        if changed {
            info!(orbital_speed = self.animation.orbital_speed(), "slowed down");
        }
        changed
    }
}

fn validate(info: &BodyInfo) -> Result<()> {
    let invalid = |field, value| Error::InvalidParameter {
        name: info.name.clone(),
        field,
        value,
    };

    let finite = [
        ("orbital rate", info.orbital_rate),
        ("rotational rate", info.rotational_rate),
        ("axial tilt", info.axial_tilt),
    ];
    for (field, value) in finite.iter() {
        if !value.is_finite() {
            return Err(invalid(*field, *value));
        }
    }
    if !(info.scale.is_finite() && info.scale > 0.0) {
        return Err(invalid("scale", info.scale));
    }
    if !(info.orbital_distance.is_finite() && info.orbital_distance >= 0.0) {
        return Err(invalid("orbital distance", info.orbital_distance));
    }
    Ok(())
}

fn compute_update_order(bodies: &[Body], reference: BodyID) -> Result<Vec<BodyID>> {
    #[derive(Clone, Copy, PartialEq)]
    enum Mark {
        Unvisited,
        InProgress,
        Done,
    }

    fn visit(
        bodies: &[Body],
        id: BodyID,
        marks: &mut [Mark],
        order: &mut Vec<BodyID>,
    ) -> Result<()> {
        match marks[id.0] {
            Mark::Done => return Ok(()),
            Mark::InProgress => {
                return Err(Error::SatelliteCycle(bodies[id.0].info.name.clone()))
            }
            Mark::Unvisited => {}
        }
        marks[id.0] = Mark::InProgress;
        if let SatelliteTarget::Body(parent) = bodies[id.0].target {
            visit(bodies, parent, marks, order)?;
        }
        marks[id.0] = Mark::Done;
        order.push(id);
        Ok(())
    }

    let mut marks = vec![Mark::Unvisited; bodies.len()];
    let mut order = Vec::with_capacity(bodies.len());

    visit(bodies, reference, &mut marks, &mut order)?;
    for body in bodies {
        visit(bodies, body.id, &mut marks, &mut order)?;
    }
    Ok(order)
}
