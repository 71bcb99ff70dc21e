use kiss3d::text::Font;
use kiss3d::window::Window;
use nalgebra::{Point2, Point3};

use crate::navigation::{CursorStyle, UiFeedback};

const TEXT_SIZE: f32 = 40.0;
const TITLE_SIZE: f32 = 56.0;

struct Panel {
    title: String,
    text: String,
    at: Point2<f32>,
}

/// Feedback sink for the kiss3d window. Holds whatever the coordinator last
/// asked to be shown and draws it as text on top of the scene each frame.
pub struct OverlayFeedback {
    tooltip: Option<(String, Point2<f32>)>,
    info_panel: Option<Panel>,
    cursor: CursorStyle,
    playing: bool,
}

impl OverlayFeedback {
    pub fn new() -> Self {
        OverlayFeedback {
            tooltip: None,
            info_panel: None,
            cursor: CursorStyle::Grab,
            playing: true,
        }
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    /// kiss3d can't change the cursor icon, so the affordance is spelled out
    /// in the HUD instead.
    pub fn cursor_hint(&self) -> &'static str {
        match self.cursor {
            CursorStyle::Grab => "drag to look around",
            CursorStyle::Grabbing => "dragging",
            CursorStyle::Pointer => "click to fly there",
        }
    }

    pub fn draw(&self, window: &mut Window) {
        // Text positions are off from cursor pixels by the hidpi factor
        let scale = window.scale_factor() as f32;
        let font = Font::default();
        let white = Point3::new(1.0, 1.0, 1.0);

        if let Some((text, at)) = &self.tooltip {
            window.draw_text(text, &(*at * scale), TEXT_SIZE, &font, &white);
        }

        if let Some(panel) = &self.info_panel {
            let title_color = Point3::new(1.0, 0.85, 0.4);
            let at = panel.at * scale;
            window.draw_text(&panel.title, &at, TITLE_SIZE, &font, &title_color);
            let body_at = Point2::new(at.x, at.y + TITLE_SIZE);
            window.draw_text(&panel.text, &body_at, TEXT_SIZE, &font, &white);
        }
    }
}

impl UiFeedback for OverlayFeedback {
    fn show_tooltip(&mut self, text: &str, at: Point2<f32>) {
        self.tooltip = Some((text.to_owned(), at));
    }

    fn hide_tooltip(&mut self) {
        self.tooltip = None;
    }

    fn show_info_panel(&mut self, title: &str, text: &str, at: Point2<f32>) {
        self.info_panel = Some(Panel {
            title: title.to_owned(),
            text: wrap(text, 60),
            at,
        });
    }

    fn hide_info_panel(&mut self) {
        self.info_panel = None;
    }

    fn set_cursor(&mut self, cursor: CursorStyle) {
        if self.cursor != cursor {
            log::trace!("Cursor is now {:?}", cursor);
        }
        self.cursor = cursor;
    }

    fn set_play_state(&mut self, running: bool) {
        self.playing = running;
    }
}

// Greedy word wrap; kiss3d draws text on a single line otherwise
fn wrap(text: &str, width: usize) -> String {
    let mut lines: Vec<String> = vec![];
    let mut current = String::new();
    for word in text.split_whitespace() {
        if !current.is_empty() && current.len() + 1 + word.len() > width {
            lines.push(std::mem::take(&mut current));
        }
        if !current.is_empty() {
            current.push(' ');
        }
        current.push_str(word);
    }
    if !current.is_empty() {
        lines.push(current);
    }
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wrap() {
        assert_eq!(wrap("", 10), "");
        assert_eq!(wrap("one two three four", 9), "one two\nthree\nfour");
        // Words longer than the width get a line of their own
        assert_eq!(wrap("a verylongword b", 4), "a\nverylongword\nb");
    }

    #[test]
    fn test_feedback_state() {
        let mut overlay = OverlayFeedback::new();
        overlay.show_tooltip("Earth", Point2::new(10.0, 10.0));
        overlay.set_cursor(CursorStyle::Pointer);
        overlay.set_play_state(false);
        assert!(overlay.tooltip.is_some());
        assert_eq!(overlay.cursor_hint(), "click to fly there");
        assert!(!overlay.is_playing());

        overlay.hide_tooltip();
        overlay.show_info_panel("Earth", "Home", Point2::origin());
        assert!(overlay.tooltip.is_none());
        assert_eq!(overlay.info_panel.as_ref().unwrap().title, "Earth");
        overlay.hide_info_panel();
        assert!(overlay.info_panel.is_none());
    }
}
