use std::collections::HashMap;

use kiss3d::scene::SceneNode;
use kiss3d::text::Font;
use kiss3d::window::Window;
use nalgebra::{Point2, Point3, Translation3};

use super::overlay::OverlayFeedback;
use super::renderers::{tilted_ring, CompoundRenderer};
use crate::model::{Body, BodyID, BodyRegistry};
use crate::navigation::InteractionCoordinator;

const HUD_TEXT_SIZE: f32 = 40.0;

/// Frames per second, averaged over windows of `window` seconds on the
/// simulation clock.
struct FrameRate {
    window: f64,
    window_start: Option<f64>,
    frames: u32,
    value: f64,
}

impl FrameRate {
    fn new(window: f64) -> Self {
        FrameRate {
            window,
            window_start: None,
            frames: 0,
            value: 0.0,
        }
    }

    fn frame(&mut self, now: f64) {
        let start = *self.window_start.get_or_insert(now);
        self.frames += 1;
        let elapsed = now - start;
        if elapsed >= self.window {
            self.value = self.frames as f64 / elapsed;
            self.window_start = Some(now);
            self.frames = 0;
        }
    }
}

pub struct View {
    body_spheres: HashMap<BodyID, SceneNode>,
    renderer: CompoundRenderer,
    frame_rate: FrameRate,
}

impl View {
    pub fn new(registry: &BodyRegistry, window: &mut Window) -> Self {
        let mut body_spheres = HashMap::new();
        for body in registry.bodies() {
            let sphere = Self::create_body_object(window, body);
            body_spheres.insert(body.id, sphere);
        }

        let mut view = Self {
            body_spheres,
            renderer: CompoundRenderer::new(),
            frame_rate: FrameRate::new(1.0),
        };
        view.update_scene_objects(registry);
        view
    }

    fn create_body_object(window: &mut Window, body: &Body) -> SceneNode {
        let mut sphere = window.add_sphere(body.radius());
        let color = &body.info.color;
        sphere.set_color(color.x, color.y, color.z);
        sphere
    }

    pub fn renderer_mut(&mut self) -> &mut CompoundRenderer {
        &mut self.renderer
    }

    /// Moves each sphere to where its body is now. Spheres turn with their
    /// orbit, same as the rings drawn around them.
    pub fn update_scene_objects(&mut self, registry: &BodyRegistry) {
        for (id, sphere) in self.body_spheres.iter_mut() {
            let body = registry.get(*id);
            sphere.set_local_translation(Translation3::from(body.world_position().coords));
            sphere.set_local_rotation(body.transform().rotation());
        }
    }

    pub fn prerender_scene(
        &mut self,
        window: &mut Window,
        coordinator: &InteractionCoordinator<OverlayFeedback>,
        now: f64,
    ) {
        self.frame_rate.frame(now);
        let registry = coordinator.registry();
        self.draw_orbits(registry);
        self.draw_rings(registry);
        for belt in registry.belts() {
            let grey = Point3::new(0.55, 0.5, 0.45);
            self.renderer.draw_belt(belt.inner, belt.outer, belt.count, grey);
        }
        self.draw_highlights(coordinator);

        let font = Font::default();
        let text_color = Point3::new(1.0, 1.0, 1.0);
        let scale = window.scale_factor() as f32;
        let menu_y = (window.height() as f32 - 40.0) * scale - HUD_TEXT_SIZE;
        window.draw_text(
            &self.status_text(coordinator),
            &Point2::origin(),
            HUD_TEXT_SIZE,
            &font,
            &text_color,
        );
        window.draw_text(
            &Self::menu_text(registry),
            &Point2::new(0.0, menu_y),
            HUD_TEXT_SIZE,
            &font,
            &Point3::new(0.7, 0.7, 0.7),
        );
        coordinator.feedback().draw(window);
    }

    fn draw_orbits(&mut self, registry: &BodyRegistry) {
        for body in registry.bodies() {
            let radius = body.orbit_radius();
            if radius <= 0.0 {
                continue;
            }
            // Dim the body color so the orbit doesn't compete with the body
            let color = Point3::from(body.info.color.coords * 0.35);
            self.renderer.draw_orbit(radius, color);
        }
    }

    fn draw_rings(&mut self, registry: &BodyRegistry) {
        for body in registry.bodies() {
            let ring = match &body.info.ring {
                Some(ring) => ring,
                None => continue,
            };
            let mut orientation = body.transform().rotation();
            if ring.tilted {
                orientation *= tilted_ring();
            }
            let color = Point3::from(body.info.color.coords * 0.8);
            self.renderer.draw_ring(
                body.world_position(),
                orientation,
                ring.inner,
                ring.outer,
                color,
            );
        }
    }

    fn draw_highlights(&mut self, coordinator: &InteractionCoordinator<OverlayFeedback>) {
        // Slightly larger than the body, so the outline isn't hidden by it
        const MARGIN: f32 = 1.15;

        if let Some(id) = coordinator.selection().selected {
            let body = coordinator.registry().get(id);
            self.renderer.draw_highlight(
                body.world_position(),
                body.radius() * MARGIN,
                Point3::new(1.0, 0.85, 0.4),
            );
        }
        if let Some(body) = coordinator.hovered() {
            self.renderer.draw_highlight(
                body.world_position(),
                body.radius() * MARGIN * MARGIN,
                Point3::new(1.0, 1.0, 1.0),
            );
        }
    }

    fn status_text(&self, coordinator: &InteractionCoordinator<OverlayFeedback>) -> String {
        let feedback = coordinator.feedback();
        let camera = coordinator.camera();

        let play = if feedback.is_playing() { "Playing" } else { "Paused" };
        let moving = if camera.is_transitioning() { " (moving)" } else { "" };
        format!(
            "{} at {:.2}x\nView: {}{}\nFPS: {:.0}\n{}",
            play,
            coordinator.animator().speed_factor(),
            camera.view_mode().label(),
            moving,
            self.frame_rate.value,
            feedback.cursor_hint(),
        )
    }

    fn menu_text(registry: &BodyRegistry) -> String {
        registry
            .bodies()
            .take(9)
            .enumerate()
            .map(|(i, body)| format!("[{}] {}", i + 1, body.name()))
            .collect::<Vec<_>>()
            .join("  ")
    }
}
