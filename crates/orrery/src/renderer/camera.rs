use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, ConfigResult};

/// Camera settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    /// Zoom at startup and after `reset`.
    pub zoom: f32,
    pub min_zoom: f32,
    pub max_zoom: f32,
    /// Multiplicative zoom per scroll tick.
    pub zoom_step: f32,
    /// Pan at startup and after `reset`, in screen units.
    pub pan: Vec2,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            zoom: 1.0,
            min_zoom: 0.1,
            max_zoom: 10.0,
            zoom_step: 1.1,
            pan: Vec2::ZERO,
        }
    }
}

impl CameraConfig {
    pub fn validate(&self) -> ConfigResult<()> {
        if !(self.min_zoom.is_finite()
            && self.max_zoom.is_finite()
            && self.min_zoom > 0.0
            && self.min_zoom <= self.max_zoom)
        {
            return Err(ConfigError::InvalidZoomRange { min: self.min_zoom, max: self.max_zoom });
        }
        if !(self.zoom_step.is_finite() && self.zoom_step > 0.0) {
            return Err(ConfigError::NonPositive { what: "zoom_step", value: self.zoom_step as f64 });
        }
        if !(self.zoom.is_finite() && self.zoom > 0.0) {
            return Err(ConfigError::NonPositive { what: "zoom", value: self.zoom as f64 });
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy)]
struct Drag {
    pointer_start: Vec2,
    pan_start: Vec2,
}

/// Pan/zoom mapping from world space to screen space:
/// `screen = world * zoom + pan`, identical for every body.
///
/// The camera never reads or writes body positions; callers map them.
#[derive(Debug, Clone)]
pub struct CameraTransform {
    zoom: f32,
    pan: Vec2,
    drag: Option<Drag>,
    config: CameraConfig,
}

impl CameraTransform {
    /// Validate `config` and start at its configured pan and zoom.
    pub fn new(config: CameraConfig) -> ConfigResult<Self> {
        config.validate()?;
        Ok(Self::from_valid(config))
    }

    fn from_valid(config: CameraConfig) -> Self {
        Self {
            zoom: config.zoom.clamp(config.min_zoom, config.max_zoom),
            pan: config.pan,
            drag: None,
            config,
        }
    }

    pub fn zoom(&self) -> f32 {
        self.zoom
    }

    pub fn pan(&self) -> Vec2 {
        self.pan
    }

    pub fn to_screen(&self, world: Vec2) -> Vec2 {
        world * self.zoom + self.pan
    }

    pub fn to_world(&self, screen: Vec2) -> Vec2 {
        (screen - self.pan) / self.zoom
    }

    /// World length → screen length (radii, orbit rings).
    pub fn scale(&self, length: f32) -> f32 {
        length * self.zoom
    }

    /// Set zoom directly, clamped into the configured range.
    pub fn set_zoom(&mut self, zoom: f32) {
        if zoom.is_finite() {
            self.zoom = zoom.clamp(self.config.min_zoom, self.config.max_zoom);
        }
    }

    /// One scroll tick: positive zooms in, negative zooms out, zero or NaN
    /// does nothing.
    pub fn apply_zoom_delta(&mut self, direction: f32) {
        if let Some(zoom) = self.stepped_zoom(direction) {
            self.zoom = zoom;
            log::debug!("zoom {:.3}", self.zoom);
        }
    }

    /// Zoom one tick while keeping the world point under `anchor` (screen
    /// space) fixed on screen.
    pub fn zoom_toward(&mut self, anchor: Vec2, direction: f32) {
        let Some(new_zoom) = self.stepped_zoom(direction) else { return };
        let world = self.to_world(anchor);
        self.zoom = new_zoom;
        self.pan = anchor - world * new_zoom;
    }

    fn stepped_zoom(&self, direction: f32) -> Option<f32> {
        let zoom = if direction > 0.0 {
            self.zoom * self.config.zoom_step
        } else if direction < 0.0 {
            self.zoom / self.config.zoom_step
        } else {
            return None;
        };
        Some(zoom.clamp(self.config.min_zoom, self.config.max_zoom))
    }

    /// Start a drag gesture. Starting again while dragging restarts the
    /// gesture from `pointer` and the current pan.
    pub fn begin_drag(&mut self, pointer: Vec2) {
        self.drag = Some(Drag { pointer_start: pointer, pan_start: self.pan });
    }

    /// Move the active drag; ignored when no drag is active.
    pub fn update_drag(&mut self, pointer: Vec2) {
        if let Some(drag) = self.drag {
            self.pan = drag.pan_start + (pointer - drag.pointer_start);
        }
    }

    /// Finish the drag, leaving pan where it is.
    pub fn end_drag(&mut self) {
        self.drag = None;
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    /// Restore the configured pan and zoom, cancelling any drag.
    pub fn reset(&mut self) {
        self.zoom = self.config.zoom.clamp(self.config.min_zoom, self.config.max_zoom);
        self.pan = self.config.pan;
        self.drag = None;
    }

    pub fn config(&self) -> &CameraConfig {
        &self.config
    }
}

impl Default for CameraTransform {
    fn default() -> Self {
        Self::from_valid(CameraConfig::default())
    }
}
