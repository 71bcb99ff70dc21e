use kiss3d::event::{Action, Event, Key, MouseButton, WindowEvent};
use nalgebra::Point2;

use super::overlay::OverlayFeedback;
use crate::navigation::{InteractionCoordinator, ViewMode};
use crate::options::AnimationOptions;

// Key config, all in one place
const KEY_SPEED_UP: Key = Key::Period;
const KEY_SLOW_DOWN: Key = Key::Comma;
const KEY_TOGGLE_PAUSE: Key = Key::Space;
const KEY_TOGGLE_VIEW: Key = Key::V;
// Escape is taken by kiss3d, which closes the window on it
const KEY_CLOSE_PANEL: Key = Key::X;
const MENU_KEYS: [Key; 9] = [
    Key::Key1,
    Key::Key2,
    Key::Key3,
    Key::Key4,
    Key::Key5,
    Key::Key6,
    Key::Key7,
    Key::Key8,
    Key::Key9,
];

type Coordinator = InteractionCoordinator<OverlayFeedback>;

/// Translates window events into coordinator calls. Also holds the state of
/// the controls themselves: the speed slider, the view toggle and the last
/// known cursor position.
pub struct Controller {
    speed: f32,
    max_speed: f32,
    speed_step: f32,
    view_toggle: ViewMode,
    cursor: Point2<f32>,
}

impl Controller {
    pub fn new(animation: &AnimationOptions, initial_view: ViewMode) -> Self {
        Controller {
            speed: animation.speed_factor.min(animation.max_speed_factor).max(0.0),
            max_speed: animation.max_speed_factor,
            speed_step: animation.speed_step,
            view_toggle: initial_view,
            cursor: Point2::origin(),
        }
    }

    pub fn process_event(&mut self, event: Event, coordinator: &mut Coordinator, now: f64) {
        match event.value {
            WindowEvent::CursorPos(x, y, _) => {
                self.cursor = Point2::new(x as f32, y as f32);
                coordinator.pointer_moved(self.cursor);
            }
            WindowEvent::MouseButton(MouseButton::Button1, Action::Press, _) => {
                coordinator.pointer_pressed(self.cursor);
            }
            WindowEvent::MouseButton(MouseButton::Button1, Action::Release, _) => {
                coordinator.pointer_released(self.cursor, now);
            }
            WindowEvent::FramebufferSize(width, height) => {
                coordinator.resize(width, height);
            }
            WindowEvent::Key(KEY_TOGGLE_PAUSE, Action::Press, _) => {
                coordinator.toggle_play();
            }
            WindowEvent::Key(KEY_SPEED_UP, Action::Press, _) => {
                self.move_speed_slider(self.speed_step, coordinator);
            }
            WindowEvent::Key(KEY_SLOW_DOWN, Action::Press, _) => {
                self.move_speed_slider(-self.speed_step, coordinator);
            }
            WindowEvent::Key(KEY_TOGGLE_VIEW, Action::Press, _) => {
                self.view_toggle = self.view_toggle.toggled();
                log::info!("Switching to {} view", self.view_toggle.label());
                coordinator.view_mode_changed(self.view_toggle, now);
            }
            WindowEvent::Key(KEY_CLOSE_PANEL, Action::Press, _) => {
                coordinator.hide_info_panel();
            }
            WindowEvent::Key(key, Action::Press, _) => {
                if let Some(idx) = MENU_KEYS.iter().position(|k| *k == key) {
                    let name = match coordinator.registry().list().get(idx) {
                        Some(body) => body.name().to_owned(),
                        None => return,
                    };
                    coordinator.menu_selected(&name, now);
                }
            }
            _ => {}
        }
    }

    fn move_speed_slider(&mut self, delta: f32, coordinator: &mut Coordinator) {
        self.speed = (self.speed + delta).min(self.max_speed).max(0.0);
        coordinator.speed_changed(self.speed);
    }
}
