use approx::assert_relative_eq;
use nalgebra::Point2;
use orrery_nav::file::default_registry;
use orrery_nav::model::{BodyRegistry, BodySpec, OrbitAnimator};
use orrery_nav::navigation::{
    CameraMode, CursorStyle, InteractionCoordinator, TransitionKind, UiFeedback, ViewMode,
};
use orrery_nav::options::Options;

#[derive(Debug, Default)]
struct Recorder {
    tooltip: Option<String>,
    tooltips_shown: usize,
    panel_title: Option<String>,
    cursor: Option<CursorStyle>,
    playing: Option<bool>,
}

impl UiFeedback for Recorder {
    fn show_tooltip(&mut self, text: &str, _at: Point2<f32>) {
        self.tooltip = Some(text.to_owned());
        self.tooltips_shown += 1;
    }
    fn hide_tooltip(&mut self) {
        self.tooltip = None;
    }
    fn show_info_panel(&mut self, title: &str, _text: &str, _at: Point2<f32>) {
        self.panel_title = Some(title.to_owned());
    }
    fn hide_info_panel(&mut self) {
        self.panel_title = None;
    }
    fn set_cursor(&mut self, cursor: CursorStyle) {
        self.cursor = Some(cursor);
    }
    fn set_play_state(&mut self, running: bool) {
        self.playing = Some(running);
    }
}

// The default perspective camera looks at the sun, which sits in the middle
// of the default 800x600 viewport.
fn screen_center() -> Point2<f32> {
    Point2::new(400.0, 300.0)
}

fn empty_space() -> Point2<f32> {
    Point2::new(3.0, 3.0)
}

fn solar_system() -> InteractionCoordinator<Recorder> {
    let registry = default_registry().unwrap();
    InteractionCoordinator::new(registry, &Options::default(), Recorder::default())
}

#[test]
fn test_orbits_advance_per_frame() {
    let spec = |key: &str, rate: f32, x: f32| BodySpec {
        key: key.to_owned(),
        name: key.to_uppercase(),
        description: String::new(),
        radius: 1.0,
        angular_rate: rate,
        position: [x, 0.0, x],
        color: "#ffcc00".to_owned(),
        ring: None,
    };
    let mut registry =
        BodyRegistry::from_specs(vec![spec("sun", 0.0004, 0.0), spec("earth", 0.004, 27.0)])
            .unwrap();
    let earth_start = registry.lookup("earth").unwrap().world_position();

    let mut animator = OrbitAnimator::default();
    for _ in 0..10 {
        animator.tick(&mut registry);
    }
    let angle = |registry: &BodyRegistry, key: &str| registry.lookup(key).unwrap().transform().angle();
    assert_relative_eq!(angle(&registry, "sun"), 0.004, epsilon = 1e-6);
    assert_relative_eq!(angle(&registry, "earth"), 0.04, epsilon = 1e-6);

    // Orbit radius never changes, only the angle
    let earth = registry.lookup("earth").unwrap();
    assert_relative_eq!(earth.orbit_radius(), 27.0 * 2f32.sqrt(), epsilon = 1e-4);
    assert!((earth.world_position() - earth_start).norm() > 0.0);

    // Double speed doubles the step; zero speed and pause both freeze
    animator.set_speed_factor(2.0);
    animator.tick(&mut registry);
    assert_relative_eq!(angle(&registry, "earth"), 0.048, epsilon = 1e-6);

    animator.set_speed_factor(0.0);
    animator.tick(&mut registry);
    assert_relative_eq!(angle(&registry, "earth"), 0.048, epsilon = 1e-6);

    animator.set_speed_factor(1.0);
    animator.set_running(false);
    animator.tick(&mut registry);
    assert_relative_eq!(angle(&registry, "earth"), 0.048, epsilon = 1e-6);
}

#[test]
fn test_click_sun_then_empty_space() {
    let mut nav = solar_system();
    let sun = nav.registry().lookup("sun").unwrap().id;

    nav.pointer_pressed(screen_center());
    nav.pointer_released(screen_center(), 0.0);
    assert_eq!(nav.selection().selected, Some(sun));
    assert_eq!(nav.feedback().panel_title.as_deref(), Some("Sun"));
    assert_eq!(nav.feedback().playing, Some(false));
    assert!(!nav.animator().is_running());

    // A miss hides the panel but the sun stays selected
    nav.click(empty_space(), 0.2);
    assert_eq!(nav.selection().selected, Some(sun));
    assert!(!nav.selection().info_panel_visible);
    assert_eq!(nav.feedback().panel_title, None);
}

#[test]
fn test_second_fly_to_cancels() {
    let mut nav = solar_system();
    let start = nav.camera().pose();

    nav.menu_selected("Earth", 0.0);
    assert!(nav.camera().is_transitioning());

    // Asked again before arriving: the camera stops where it is
    nav.menu_selected("Mars", 0.1);
    assert_eq!(nav.camera().mode(), &CameraMode::Free);
    assert_eq!(nav.camera().pose(), start);
    assert!(nav.camera().free_form_enabled());
    assert_eq!(nav.advance_frame(2.0), None);
    assert_eq!(nav.camera().pose(), start);

    // The selection still follows the menu
    let mars = nav.registry().lookup("mars").unwrap().id;
    assert_eq!(nav.selection().selected, Some(mars));
    assert_eq!(nav.feedback().panel_title.as_deref(), Some("Mars"));
}

#[test]
fn test_fly_to_lands_exactly() {
    let mut nav = solar_system();
    nav.menu_selected("earth", 0.0);
    let earth = nav.registry().lookup("earth").unwrap();
    let (id, center, radius) = (earth.id, earth.world_position(), earth.radius());

    assert_eq!(nav.advance_frame(0.5), None);
    assert!(!nav.camera().free_form_enabled());
    let halfway = nav.camera().pose();
    assert!(halfway.target != center);

    assert_eq!(nav.advance_frame(1.25), Some(TransitionKind::FlyToBody(id)));
    let pose = nav.camera().pose();
    assert_eq!(pose.target, center);
    assert_relative_eq!((pose.eye - center).norm(), radius * 5.0, epsilon = 1e-3);
    assert_eq!(nav.camera().mode(), &CameraMode::Free);
    assert!(nav.camera().free_form_enabled());

    // The earth was paused on selection, so it's still where we landed
    nav.advance_frame(2.0);
    assert_eq!(nav.registry().get(id).world_position(), center);
}

#[test]
fn test_view_switch_preempts_fly_to() {
    let mut nav = solar_system();
    nav.menu_selected("Jupiter", 0.0);
    nav.advance_frame(0.5);
    let midway = nav.camera().pose();

    nav.view_mode_changed(ViewMode::TopDown, 0.5);
    let transition = nav.camera().active_transition().unwrap().clone();
    assert_eq!(transition.kind, TransitionKind::ViewSwitch(ViewMode::TopDown));
    assert_eq!(transition.start, midway);

    assert_eq!(
        nav.advance_frame(1.5),
        Some(TransitionKind::ViewSwitch(ViewMode::TopDown))
    );
    let top_down = Options::default().camera.preset(ViewMode::TopDown);
    assert_eq!(nav.camera().pose(), top_down);
    // Top-down stays locked even once the camera is free again
    assert_eq!(nav.camera().mode(), &CameraMode::Free);
    assert!(!nav.camera().free_form_enabled());

    // Switching back always restarts, and unlocks on arrival
    nav.view_mode_changed(ViewMode::Perspective, 2.0);
    nav.view_mode_changed(ViewMode::Perspective, 2.1);
    assert_eq!(nav.camera().active_transition().unwrap().start_time, 2.1);
    nav.advance_frame(3.5);
    assert!(nav.camera().free_form_enabled());
}

#[test]
fn test_hover_is_stable() {
    let mut nav = solar_system();
    for _ in 0..3 {
        nav.pointer_moved(screen_center());
        assert_eq!(nav.feedback().tooltip.as_deref(), Some("Sun"));
        assert_eq!(nav.feedback().cursor, Some(CursorStyle::Pointer));
    }
    assert_eq!(nav.feedback().tooltips_shown, 3);

    nav.pointer_moved(empty_space());
    assert_eq!(nav.feedback().tooltip, None);
    assert_eq!(nav.feedback().cursor, Some(CursorStyle::Grab));
}

#[test]
fn test_empty_registry() {
    let mut nav =
        InteractionCoordinator::new(BodyRegistry::default(), &Options::default(), Recorder::default());
    nav.pointer_moved(screen_center());
    assert_eq!(nav.feedback().tooltip, None);
    nav.click(screen_center(), 0.0);
    assert_eq!(nav.selection().selected, None);
    assert_eq!(nav.advance_frame(0.1), None);
}
