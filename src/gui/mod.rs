use kiss3d::camera::Camera;
use kiss3d::event::EventManager;
use kiss3d::planar_camera::PlanarCamera;
use kiss3d::post_processing::PostProcessingEffect;
use kiss3d::renderer::Renderer;
use kiss3d::window::{State, Window};

pub use self::controller::FrameClock;

use self::controller::Controller;
use self::view::View;
use crate::model::{OrbitPaths, SolarSystem};

mod camera;
mod controller;
mod renderers;
mod view;

pub struct Simulation {
    view: View,
    controller: Controller,
}

impl Simulation {
    /// Needs a live window: the renderers compile their shaders here.
    pub fn new(system: SolarSystem, orbit_paths: &OrbitPaths, clock: FrameClock) -> Self {
        Self {
            view: View::new(system, orbit_paths),
            controller: Controller::new(clock),
        }
    }

    fn process_user_input(&mut self, mut events: EventManager) {
        // Process events
        for event in events.iter() {
            self.controller.process_event(event, &mut self.view);
        }
    }
}

impl State for Simulation {
    fn cameras_and_effect_and_renderer(
        &mut self,
    ) -> (
        Option<&mut dyn Camera>,
        Option<&mut dyn PlanarCamera>,
        Option<&mut dyn Renderer>,
        Option<&mut dyn PostProcessingEffect>,
    ) {
        self.view.cameras_and_effect_and_renderer()
    }

    fn step(&mut self, window: &mut Window) {
        self.process_user_input(window.events());
        // The clock keeps running while paused so that resuming doesn't jump
        let elapsed = self.controller.tick();
        self.view.update_state_by(elapsed);
        self.view.prerender_scene(window, &self.controller);
        self.controller.increment_frame_counter();
    }
}
