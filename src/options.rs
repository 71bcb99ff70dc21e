//! Tweakable settings, loaded from TOML.
//!
//! Every section uses `#[serde(default)]`, so a file that only overrides
//! `[camera]` keeps the defaults for everything else.

use std::path::Path;

use nalgebra::Point3;
use serde::{Deserialize, Serialize};

use crate::error::NavError;
use crate::navigation::{CameraPose, ViewMode};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Options {
    pub camera: CameraOptions,
    pub animation: AnimationOptions,
    pub interface: InterfaceOptions,
}

/// Projection, free-form control and transition parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraOptions {
    /// Vertical field of view in degrees.
    pub fovy_degrees: f32,
    pub znear: f32,
    pub zfar: f32,
    /// A fly-to stops this many body radii short of the body's center.
    pub fly_to_distance_factor: f32,
    /// Length of every camera transition, in seconds.
    pub transition_seconds: f64,
    pub top_down_eye: [f32; 3],
    pub top_down_target: [f32; 3],
    pub perspective_eye: [f32; 3],
    pub perspective_target: [f32; 3],
    /// Radians of orbit per pixel of drag.
    pub rotate_step: f32,
    /// Distance multiplier per scroll notch.
    pub zoom_ratio: f32,
    pub min_distance: f32,
    pub max_distance: f32,
}

impl Default for CameraOptions {
    fn default() -> Self {
        CameraOptions {
            fovy_degrees: 45.0,
            znear: 0.1,
            zfar: 2000.0,
            fly_to_distance_factor: 5.0,
            transition_seconds: 1.0,
            top_down_eye: [0.0, 320.0, 0.0],
            top_down_target: [0.0, 0.0, 0.0],
            perspective_eye: [0.0, 120.0, 240.0],
            perspective_target: [0.0, 0.0, 0.0],
            rotate_step: 0.005,
            zoom_ratio: 1.1,
            min_distance: 1.0,
            max_distance: 1000.0,
        }
    }
}

impl CameraOptions {
    pub fn preset(&self, mode: ViewMode) -> CameraPose {
        let (eye, target) = match mode {
            ViewMode::TopDown => (self.top_down_eye, self.top_down_target),
            ViewMode::Perspective => (self.perspective_eye, self.perspective_target),
        };
        CameraPose {
            eye: Point3::from(eye),
            target: Point3::from(target),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnimationOptions {
    pub running: bool,
    pub speed_factor: f32,
    /// Upper end of the speed slider.
    pub max_speed_factor: f32,
    /// How far one slider notch moves the speed.
    pub speed_step: f32,
}

impl Default for AnimationOptions {
    fn default() -> Self {
        AnimationOptions {
            running: true,
            speed_factor: 1.0,
            max_speed_factor: 5.0,
            speed_step: 0.25,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InterfaceOptions {
    /// Where the info panel goes when a body is chosen from the menu, in
    /// pixels from the top-left corner.
    pub info_panel_anchor: [f32; 2],
    /// Offset of the tooltip and click-placed info panel from the pointer.
    pub pointer_offset: [f32; 2],
    /// A press and release closer than this many pixels count as a click.
    pub click_slop: f32,
    pub initial_view: ViewMode,
}

impl Default for InterfaceOptions {
    fn default() -> Self {
        InterfaceOptions {
            info_panel_anchor: [20.0, 120.0],
            pointer_offset: [14.0, 14.0],
            click_slop: 4.0,
            initial_view: ViewMode::Perspective,
        }
    }
}

impl Options {
    /// Load options from a TOML file. Missing fields use defaults.
    pub fn load(path: &Path) -> Result<Self, NavError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    /// Parses and validates. Values the camera can't work with are rejected
    /// here rather than on the first frame that uses them.
    pub fn from_toml(content: &str) -> Result<Self, NavError> {
        let options: Options =
            toml::from_str(content).map_err(|e| NavError::Options(e.to_string()))?;
        options.validate()?;
        Ok(options)
    }

    pub fn validate(&self) -> Result<(), NavError> {
        let camera = &self.camera;
        let bad = |msg: String| Err(NavError::Options(msg));

        let seconds = camera.transition_seconds;
        if !(seconds.is_finite() && seconds >= 0.0) {
            return bad(format!(
                "transition_seconds must be finite and non-negative, got {}",
                seconds
            ));
        }
        let fovy = camera.fovy_degrees;
        if !(fovy.is_finite() && fovy > 0.0 && fovy < 180.0) {
            return bad(format!("fovy_degrees must be between 0 and 180, got {}", fovy));
        }
        let (znear, zfar) = (camera.znear, camera.zfar);
        if !(zfar.is_finite() && 0.0 < znear && znear < zfar) {
            return bad(format!(
                "need 0 < znear < zfar, got znear = {} and zfar = {}",
                camera.znear, camera.zfar
            ));
        }
        if !(camera.fly_to_distance_factor.is_finite() && camera.fly_to_distance_factor > 0.0) {
            return bad(format!(
                "fly_to_distance_factor must be positive, got {}",
                camera.fly_to_distance_factor
            ));
        }
        if !(camera.zoom_ratio.is_finite() && camera.zoom_ratio > 0.0) {
            return bad(format!("zoom_ratio must be positive, got {}", camera.zoom_ratio));
        }
        if !(camera.min_distance > 0.0 && camera.min_distance <= camera.max_distance) {
            return bad(format!(
                "need 0 < min_distance <= max_distance, got {} and {}",
                camera.min_distance, camera.max_distance
            ));
        }
        let points = [
            camera.top_down_eye,
            camera.top_down_target,
            camera.perspective_eye,
            camera.perspective_target,
        ];
        if !points.iter().flatten().all(|x| x.is_finite()) {
            return bad("camera presets must be finite".to_owned());
        }
        Ok(())
    }

    pub fn to_toml(&self) -> Result<String, NavError> {
        toml::to_string_pretty(self).map_err(|e| NavError::Options(e.to_string()))
    }
}
