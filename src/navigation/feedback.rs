use nalgebra::Point2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CursorStyle {
    /// Over empty space; dragging would orbit the camera.
    Grab,
    /// A drag is in progress.
    Grabbing,
    /// Over a body; clicking would select it.
    Pointer,
}

/// Where the coordinator sends user-visible feedback. Positions are window
/// pixels from the top-left corner.
///
/// The coordinator only ever writes to this; it never reads UI state back.
pub trait UiFeedback {
    fn show_tooltip(&mut self, text: &str, at: Point2<f32>);
    fn hide_tooltip(&mut self);
    fn show_info_panel(&mut self, title: &str, text: &str, at: Point2<f32>);
    fn hide_info_panel(&mut self);
    fn set_cursor(&mut self, cursor: CursorStyle);
    /// `running` is the state the play/pause control should now display.
    fn set_play_state(&mut self, running: bool);
}
