use std::time::Instant;

use kiss3d::camera::Camera;
use kiss3d::event::EventManager;
use kiss3d::planar_camera::PlanarCamera;
use kiss3d::post_processing::PostProcessingEffect;
use kiss3d::renderer::Renderer;
use kiss3d::window::{State, Window};

use self::controller::Controller;
use self::overlay::OverlayFeedback;
use self::view::View;
use crate::model::BodyRegistry;
use crate::navigation::{InteractionCoordinator, TransitionKind};
use crate::options::Options;

mod controller;
mod overlay;
mod renderers;
mod view;

pub struct Simulation {
    coordinator: InteractionCoordinator<OverlayFeedback>,
    view: View,
    controller: Controller,
    clock: Instant,
}

impl Simulation {
    pub fn new(registry: BodyRegistry, options: &Options, window: &mut Window) -> Self {
        let view = View::new(&registry, window);
        let mut coordinator = InteractionCoordinator::new(registry, options, OverlayFeedback::new());
        coordinator.resize(window.width(), window.height());
        let camera = coordinator.camera();
        log::info!("Starting in {} view", camera.view_mode().label());
        Self {
            controller: Controller::new(&options.animation, camera.view_mode()),
            coordinator,
            view,
            clock: Instant::now(),
        }
    }

    /// Seconds since the window opened; the clock transitions run against.
    fn now(&self) -> f64 {
        self.clock.elapsed().as_secs_f64()
    }

    fn process_user_input(&mut self, mut events: EventManager) {
        let now = self.now();
        for event in events.iter() {
            self.controller
                .process_event(event, &mut self.coordinator, now);
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
        (
            Some(self.coordinator.device_camera()),
            None,
            Some(self.view.renderer_mut()),
            None,
        )
    }

    fn step(&mut self, window: &mut Window) {
        self.process_user_input(window.events());

        let now = self.now();
        if let Some(kind) = self.coordinator.advance_frame(now) {
            match kind {
                TransitionKind::FlyToBody(id) => {
                    log::debug!("Arrived at {}", self.coordinator.registry().get(id).name())
                }
                TransitionKind::ViewSwitch(mode) => {
                    log::debug!("Now in {} view", mode.label())
                }
            }
        }

        self.view.update_scene_objects(self.coordinator.registry());
        self.view.prerender_scene(window, &self.coordinator, now);
    }
}
