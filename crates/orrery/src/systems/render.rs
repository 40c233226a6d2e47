use glam::Vec2;

use crate::api::types::{BodyId, Overlay, Rgb};
use crate::core::bodies::BodyTree;
use crate::core::clock::CalendarTime;
use crate::core::time::TimeBase;
use crate::renderer::camera::CameraTransform;
use crate::renderer::instance::{BodyInstance, InstanceBuffer};
use crate::systems::lighting::{BodyLighting, TerminatorFan};

/// Planetary ring radius as a multiple of the body radius.
pub const RING_RADIUS_FACTOR: f32 = 1.7;
/// Planetary ring stroke as a multiple of the body radius.
pub const RING_THICKNESS_FACTOR: f32 = 0.15;

/// An annulus to stroke in screen space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ring {
    pub center: Vec2,
    pub radius: f32,
    pub thickness: f32,
}

/// A disc overlay in screen space (eclipse footprint or phase shadow).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShadowDisc {
    pub center: Vec2,
    pub radius: f32,
}

/// Everything a renderer needs to draw one body, in screen space.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderBody {
    pub id: BodyId,
    pub name: String,
    pub world_pos: Vec2,
    pub screen_pos: Vec2,
    pub screen_radius: f32,
    pub color: Rgb,
    pub overlay: Overlay,
    /// Orbit path around the parent; absent for the root.
    pub orbit: Option<Ring>,
    /// Planetary ring, when the body has one.
    pub ring: Option<Ring>,
    pub terminator: Option<TerminatorFan>,
    pub footprints: Vec<ShadowDisc>,
    /// Phase shadow disc, same radius as the body.
    pub phase_shadow: Option<ShadowDisc>,
}

/// One frame's draw list plus HUD state.
#[derive(Debug, Clone)]
pub struct FrameSnapshot {
    /// Bodies in pre-order (parents before their satellites).
    pub bodies: Vec<RenderBody>,
    pub instances: InstanceBuffer,
    pub elapsed_days: f64,
    pub speed: f64,
    pub paused: bool,
    pub clock: CalendarTime,
    pub zoom: f32,
}

impl FrameSnapshot {
    pub fn body(&self, name: &str) -> Option<&RenderBody> {
        self.bodies.iter().find(|b| b.name == name)
    }

    /// Names of bodies currently drawn eclipsed.
    pub fn eclipsed(&self) -> impl Iterator<Item = &str> {
        self.bodies
            .iter()
            .filter(|b| b.overlay == Overlay::Eclipsed)
            .map(|b| b.name.as_str())
    }

    /// Names of bodies with at least one shadow footprint on them.
    pub fn shadowed(&self) -> impl Iterator<Item = &str> {
        self.bodies
            .iter()
            .filter(|b| !b.footprints.is_empty())
            .map(|b| b.name.as_str())
    }
}

/// Project the tree and its illumination through the camera.
///
/// `lighting` must be indexed like the tree (as `lighting::evaluate` returns it).
pub fn build_snapshot(
    tree: &BodyTree,
    lighting: &[BodyLighting],
    camera: &CameraTransform,
    time: &TimeBase,
) -> FrameSnapshot {
    let mut bodies = Vec::with_capacity(tree.len());
    let mut instances = InstanceBuffer::with_capacity(tree.len());

    let mut stack = vec![tree.root()];
    while let Some(id) = stack.pop() {
        let body = tree.get(id);
        stack.extend(body.children().iter().rev().copied());

        let lit = lighting.get(id.index()).cloned().unwrap_or_default();
        let screen_pos = camera.to_screen(body.position());
        let screen_radius = camera.scale(body.radius);

        let orbit = body.parent().map(|parent| Ring {
            center: camera.to_screen(tree.get(parent).position()),
            radius: camera.scale(body.orbit_radius),
            thickness: 1.0,
        });
        let ring = body.has_ring.then(|| Ring {
            center: screen_pos,
            radius: screen_radius * RING_RADIUS_FACTOR,
            thickness: screen_radius * RING_THICKNESS_FACTOR,
        });
        let footprints = lit
            .footprints
            .iter()
            .map(|f| ShadowDisc { center: camera.to_screen(f.center), radius: camera.scale(f.radius) })
            .collect();
        let phase_shadow = lit.phase_shadow.map(|offset| ShadowDisc {
            center: camera.to_screen(body.position() + offset),
            radius: screen_radius,
        });
        let terminator = lit.terminator.map(|fan| fan.map(|p| camera.to_screen(p)));

        let [r, g, b] = body.color.to_f32();
        instances.push(BodyInstance {
            x: screen_pos.x,
            y: screen_pos.y,
            radius: screen_radius,
            r,
            g,
            b,
            overlay: lit.overlay.as_u8() as f32,
            ring: if body.has_ring { 1.0 } else { 0.0 },
        });

        bodies.push(RenderBody {
            id,
            name: body.name.clone(),
            world_pos: body.position(),
            screen_pos,
            screen_radius,
            color: body.color,
            overlay: lit.overlay,
            orbit,
            ring,
            terminator,
            footprints,
            phase_shadow,
        });
    }

    FrameSnapshot {
        bodies,
        instances,
        elapsed_days: time.elapsed(),
        speed: time.speed(),
        paused: time.is_paused(),
        clock: CalendarTime::from_days(time.elapsed()),
        zoom: camera.zoom(),
    }
}
