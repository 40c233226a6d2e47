//! Illumination geometry: day/night terminator, moon phase, and the two
//! eclipse tests.
//!
//! Everything here is pure world-space math. The functions only decide which
//! overlay a renderer should draw; they never draw it.

use std::f32::consts::{FRAC_PI_2, PI};

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::api::types::Overlay;
use crate::core::bodies::BodyTree;
use crate::error::{ConfigError, ConfigResult};

/// Smallest length used as a divisor. Coincident points normalize to a tiny
/// (finite) vector instead of NaN.
pub const EPSILON: f32 = 1e-4;

/// Tuning for the illumination predicates.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct IlluminationConfig {
    /// Angular width of the night-side fan, radians.
    pub terminator_span: f32,
    /// Number of fan segments (rim points = segments + 1).
    pub terminator_segments: u32,
    /// Minimum cosine between light→caster and light→target for a caster to
    /// count as lying between them.
    pub alignment_threshold: f32,
    /// How far into the target's disc the eclipse footprint sits, as a
    /// fraction of the target radius.
    pub footprint_depth: f32,
    /// Footprint radius as a multiple of the caster radius.
    pub footprint_scale: f32,
    /// Forward reach of a caster's shadow cone, world units (exclusive).
    pub shadow_cone_length: f32,
    /// Cone half-width as a fraction of the caster radius.
    pub shadow_cone_radius_fraction: f32,
    /// Point the cone away from the light (physical umbra) instead of along
    /// the caster→light axis.
    pub shadow_cone_antisolar: bool,
    /// Phase shadow offset as a fraction of the body radius.
    pub phase_offset: f32,
}

impl Default for IlluminationConfig {
    fn default() -> Self {
        Self {
            terminator_span: PI,
            terminator_segments: 60,
            alignment_threshold: 0.99,
            footprint_depth: 0.7,
            footprint_scale: 1.5,
            shadow_cone_length: 50.0,
            shadow_cone_radius_fraction: 0.7,
            shadow_cone_antisolar: false,
            phase_offset: 0.8,
        }
    }
}

impl IlluminationConfig {
    pub fn validate(&self) -> ConfigResult<()> {
        if self.terminator_segments == 0 {
            return Err(ConfigError::NonPositive { what: "terminator_segments", value: 0.0 });
        }
        let checks = [
            ("terminator_span", self.terminator_span),
            ("shadow_cone_length", self.shadow_cone_length),
            ("shadow_cone_radius_fraction", self.shadow_cone_radius_fraction),
            ("footprint_scale", self.footprint_scale),
        ];
        for (what, value) in checks {
            if !(value.is_finite() && value > 0.0) {
                return Err(ConfigError::NonPositive { what, value: value as f64 });
            }
        }
        Ok(())
    }
}

/// A circle in world (or screen) space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Disc {
    pub center: Vec2,
    pub radius: f32,
}

impl Disc {
    pub fn new(center: Vec2, radius: f32) -> Self {
        Self { center, radius }
    }
}

/// Unit vector from `from` toward `to`, guarded against coincident points.
pub fn direction(from: Vec2, to: Vec2) -> Vec2 {
    let d = to - from;
    d / d.length().max(EPSILON)
}

/// Angle of the direction from `center` toward `light`, radians.
pub fn light_angle(center: Vec2, light: Vec2) -> f32 {
    let d = light - center;
    d.y.atan2(d.x)
}

/// Night-side fan of a lit sphere.
#[derive(Debug, Clone, PartialEq)]
pub struct TerminatorFan {
    /// Fan hub (the sphere center).
    pub center: Vec2,
    /// Angle the fan is centered on: directly away from the light.
    pub mid_angle: f32,
    /// Points along the silhouette, ordered by increasing angle.
    pub rim: Vec<Vec2>,
}

impl TerminatorFan {
    /// Map every point through `f` (e.g. the camera transform).
    pub fn map(&self, f: impl Fn(Vec2) -> Vec2) -> Self {
        Self {
            center: f(self.center),
            mid_angle: self.mid_angle,
            rim: self.rim.iter().map(|&p| f(p)).collect(),
        }
    }
}

/// Build the night-side fan for a sphere whose light lies at `light_angle`
/// (angle from the sphere center to the light). The fan spans `span` radians
/// centered opposite the light, i.e. ±span/2 around `light_angle + π`.
pub fn terminator_fan(center: Vec2, radius: f32, light_angle: f32, span: f32, segments: u32) -> TerminatorFan {
    let segments = segments.max(1);
    let mid_angle = light_angle + PI;
    let start = mid_angle - span / 2.0;
    let rim = (0..=segments)
        .map(|i| {
            let a = start + span * i as f32 / segments as f32;
            center + Vec2::new(a.cos(), a.sin()) * radius
        })
        .collect();
    TerminatorFan { center, mid_angle, rim }
}

/// Where a caster's shadow lands on the target's visible face.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShadowFootprint {
    pub center: Vec2,
    pub radius: f32,
}

/// Solar-eclipse test: does `caster` throw its shadow onto `target`?
///
/// The caster must sit between the light and the target (nearly co-linear
/// and strictly nearer the light), and its distance from the light→target
/// line must be below the sum of both radii.
pub fn cast_shadow(light: Vec2, caster: Disc, target: Disc, config: &IlluminationConfig) -> Option<ShadowFootprint> {
    let target_dist = light.distance(target.center);
    let caster_dist = light.distance(caster.center);
    let target_dir = direction(light, target.center);
    let caster_dir = direction(light, caster.center);

    let between = caster_dir.dot(target_dir) > config.alignment_threshold && caster_dist < target_dist;
    if !between {
        return None;
    }

    let perpendicular = (target.center - caster.center).perp_dot(target_dir).abs();
    if perpendicular >= caster.radius + target.radius {
        return None;
    }

    Some(ShadowFootprint {
        center: target.center - target_dir * target.radius * config.footprint_depth,
        radius: caster.radius * config.footprint_scale,
    })
}

/// Lunar-eclipse test: is `target` inside `caster`'s shadow cone?
///
/// The target's offset from the caster is projected onto the caster→light
/// axis (reversed when `shadow_cone_antisolar` is set). The target is
/// shadowed when that projection lies strictly inside
/// `(0, shadow_cone_length)` and its distance from the axis is below
/// `caster.radius * shadow_cone_radius_fraction`.
pub fn in_shadow_cone(light: Vec2, caster: Disc, target: Vec2, config: &IlluminationConfig) -> bool {
    let axis = if config.shadow_cone_antisolar {
        direction(light, caster.center)
    } else {
        direction(caster.center, light)
    };
    let rel = target - caster.center;
    let along = rel.dot(axis);
    let offset = (rel - axis * along).length();

    along > 0.0
        && along < config.shadow_cone_length
        && offset < caster.radius * config.shadow_cone_radius_fraction
}

/// Phase angle of `body` seen from `observer`: the angle between the
/// body→light direction and the observer→body direction. 0 when the light is
/// straight behind the observer's line of sight, π when it is in front.
pub fn phase_angle(body: Vec2, light: Vec2, observer: Vec2) -> f32 {
    let to_light = light - body;
    let from_observer = body - observer;
    let denom = to_light.length() * from_observer.length() + EPSILON;
    (to_light.dot(from_observer) / denom).clamp(-1.0, 1.0).acos()
}

/// Offset of the phase shadow disc from the body center, when the phase
/// angle is below a quarter turn.
pub fn phase_shadow_offset(phase: f32, radius: f32, config: &IlluminationConfig) -> Option<Vec2> {
    if phase < FRAC_PI_2 {
        Some(Vec2::new(phase.cos(), phase.sin()) * radius * config.phase_offset)
    } else {
        None
    }
}

/// World-space illumination state for one body.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct BodyLighting {
    pub overlay: Overlay,
    pub terminator: Option<TerminatorFan>,
    /// Shadows other bodies cast onto this one.
    pub footprints: Vec<ShadowFootprint>,
    /// Phase shadow offset for moons (relative to the body center).
    pub phase_shadow: Option<Vec2>,
}

/// Evaluate every body against the root, which is the light source.
///
/// Bodies orbiting the root get a terminator. A body orbiting another body
/// (a moon) is also tested as a shadow caster on its parent and as a target
/// inside its parent's shadow cone. Results are indexed like the tree.
pub fn evaluate(tree: &BodyTree, config: &IlluminationConfig) -> Vec<BodyLighting> {
    let root = tree.root();
    let light = tree.get(root).position();
    let mut out = vec![BodyLighting::default(); tree.len()];

    for (id, body) in tree.iter() {
        if id == root {
            continue;
        }
        let pos = body.position();
        let lighting = &mut out[id.index()];
        lighting.overlay = Overlay::Terminator;
        lighting.terminator = Some(terminator_fan(
            pos,
            body.radius,
            light_angle(pos, light),
            config.terminator_span,
            config.terminator_segments,
        ));
    }

    for (id, body) in tree.iter() {
        let Some(parent) = body.parent().filter(|&p| p != root) else { continue };
        let parent_body = tree.get(parent);
        let moon = Disc::new(body.position(), body.radius);
        let planet = Disc::new(parent_body.position(), parent_body.radius);

        if let Some(footprint) = cast_shadow(light, moon, planet, config) {
            out[parent.index()].footprints.push(footprint);
            log::trace!("{} shadows {}", body.name, parent_body.name);
        }

        let lighting: &mut BodyLighting = &mut out[id.index()];
        if in_shadow_cone(light, planet, moon.center, config) {
            lighting.overlay = Overlay::Eclipsed;
            lighting.terminator = None;
            lighting.phase_shadow = None;
        } else {
            let phase = phase_angle(moon.center, light, planet.center);
            lighting.phase_shadow = phase_shadow_offset(phase, body.radius, config);
        }
    }

    out
}
