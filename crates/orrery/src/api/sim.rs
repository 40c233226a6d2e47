use glam::Vec2;

use crate::assets::config::SystemConfig;
use crate::core::bodies::BodyTree;
use crate::core::time::TimeBase;
use crate::error::ConfigResult;
use crate::input::queue::{InputEvent, InputQueue};
use crate::renderer::camera::CameraTransform;
use crate::systems::lighting::{self, BodyLighting, IlluminationConfig};
use crate::systems::render::{build_snapshot, FrameSnapshot};

/// Frame driver that owns the whole simulation.
///
/// One `tick` per frame: drain input, advance time, update the tree,
/// evaluate illumination, then project everything through the camera.
/// The host supplies wall-clock deltas and input; it never touches
/// positions directly.
#[derive(Debug)]
pub struct Orrery {
    tree: BodyTree,
    time: TimeBase,
    camera: CameraTransform,
    illumination: IlluminationConfig,
    lighting: Vec<BodyLighting>,
    input: InputQueue,
}

impl Orrery {
    /// Validate `config` and build the simulation at elapsed time zero.
    pub fn new(config: SystemConfig) -> ConfigResult<Self> {
        let time = TimeBase::new(config.time)?;
        let camera = CameraTransform::new(config.camera)?;
        config.illumination.validate()?;
        let tree = BodyTree::from_descs(&config.bodies)?;
        let lighting = lighting::evaluate(&tree, &config.illumination);
        Ok(Self {
            tree,
            time,
            camera,
            illumination: config.illumination,
            lighting,
            input: InputQueue::new(),
        })
    }

    pub fn from_json(json: &str) -> ConfigResult<Self> {
        Self::new(SystemConfig::from_json(json)?)
    }

    /// Queue an input event for the next tick.
    pub fn push_input(&mut self, event: InputEvent) {
        self.input.push(event);
    }

    /// Run one frame of `dt` wall-clock seconds.
    pub fn tick(&mut self, dt: f32) -> FrameSnapshot {
        for event in self.input.drain() {
            self.apply_input(event);
        }

        self.time.advance(dt);
        self.tree.update(&self.time);
        self.lighting = lighting::evaluate(&self.tree, &self.illumination);

        self.snapshot()
    }

    /// Snapshot of the current state without advancing anything.
    pub fn snapshot(&self) -> FrameSnapshot {
        build_snapshot(&self.tree, &self.lighting, &self.camera, &self.time)
    }

    fn apply_input(&mut self, event: InputEvent) {
        match event {
            InputEvent::PointerDown { x, y } => self.camera.begin_drag(Vec2::new(x, y)),
            InputEvent::PointerMove { x, y } => self.camera.update_drag(Vec2::new(x, y)),
            InputEvent::PointerUp { x, y } => {
                self.camera.update_drag(Vec2::new(x, y));
                self.camera.end_drag();
            }
            InputEvent::Scroll { delta } => self.camera.apply_zoom_delta(delta),
            InputEvent::ScrollAt { delta, x, y } => self.camera.zoom_toward(Vec2::new(x, y), delta),
            InputEvent::SpeedUp => self.time.speed_up(),
            InputEvent::SpeedDown => self.time.speed_down(),
            InputEvent::TogglePause => self.time.toggle_pause(),
            InputEvent::ResetView => self.camera.reset(),
        }
    }

    pub fn tree(&self) -> &BodyTree {
        &self.tree
    }

    pub fn time(&self) -> &TimeBase {
        &self.time
    }

    pub fn time_mut(&mut self) -> &mut TimeBase {
        &mut self.time
    }

    pub fn camera(&self) -> &CameraTransform {
        &self.camera
    }

    pub fn camera_mut(&mut self) -> &mut CameraTransform {
        &mut self.camera
    }

    /// Illumination from the last tick, indexed like the tree.
    pub fn lighting(&self) -> &[BodyLighting] {
        &self.lighting
    }
}
