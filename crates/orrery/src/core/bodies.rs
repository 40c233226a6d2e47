//! Orbital hierarchy: a fixed tree of bodies stored in one arena.
//!
//! Positions are closed-form functions of elapsed time. Each update overwrites
//! every position from the root down, so no state carries between frames and
//! any elapsed value (including one earlier than the last) is reproduced
//! exactly.

use std::f64::consts::TAU;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::api::types::{BodyId, Rgb};
use crate::core::clock::DAYS_PER_YEAR;
use crate::core::time::TimeBase;
use crate::error::{ConfigError, ConfigResult};

/// Unit a descriptor's orbital period is written in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PeriodUnit {
    #[default]
    Days,
    Years,
}

impl PeriodUnit {
    /// Multiplier converting this unit to days.
    pub fn days(self) -> f64 {
        match self {
            PeriodUnit::Days => 1.0,
            PeriodUnit::Years => DAYS_PER_YEAR,
        }
    }
}

/// Static description of one body, consumed once when the tree is built.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BodyDesc {
    pub name: String,
    /// Display radius in world units.
    pub radius: f32,
    /// Distance from the parent in world units (0 for the root).
    #[serde(default)]
    pub orbit_radius: f32,
    /// Time for one revolution, in `period_unit`. Negative = retrograde.
    /// Optional only for the root, which never orbits.
    #[serde(default)]
    pub period: Option<f64>,
    #[serde(default)]
    pub period_unit: PeriodUnit,
    #[serde(default)]
    pub color: Rgb,
    #[serde(default)]
    pub has_ring: bool,
    /// Phase at elapsed time zero, radians.
    #[serde(default)]
    pub initial_phase: f64,
    /// Index of the parent descriptor; `None` marks the root.
    #[serde(default)]
    pub parent: Option<usize>,
}

impl BodyDesc {
    /// Root body: no orbit, no period.
    pub fn root(name: impl Into<String>, radius: f32, color: Rgb) -> Self {
        Self {
            name: name.into(),
            radius,
            orbit_radius: 0.0,
            period: None,
            period_unit: PeriodUnit::Days,
            color,
            has_ring: false,
            initial_phase: 0.0,
            parent: None,
        }
    }

    /// Body orbiting `parent` with a period in days.
    pub fn orbiting(
        name: impl Into<String>,
        parent: usize,
        radius: f32,
        orbit_radius: f32,
        period_days: f64,
        color: Rgb,
    ) -> Self {
        Self {
            name: name.into(),
            radius,
            orbit_radius,
            period: Some(period_days),
            period_unit: PeriodUnit::Days,
            color,
            has_ring: false,
            initial_phase: 0.0,
            parent: Some(parent),
        }
    }

    pub fn in_years(mut self) -> Self {
        self.period_unit = PeriodUnit::Years;
        self
    }

    pub fn with_phase(mut self, phase: f64) -> Self {
        self.initial_phase = phase;
        self
    }

    pub fn with_ring(mut self) -> Self {
        self.has_ring = true;
        self
    }
}

/// A node of the orbital hierarchy.
#[derive(Debug, Clone)]
pub struct OrbitalBody {
    pub name: String,
    pub radius: f32,
    pub orbit_radius: f32,
    pub initial_phase: f64,
    pub color: Rgb,
    pub has_ring: bool,
    /// Period already converted to days; zero only for the root.
    period_days: f64,
    parent: Option<BodyId>,
    children: Vec<BodyId>,
    depth: usize,
    position: Vec2,
}

impl OrbitalBody {
    /// World position from the last update.
    pub fn position(&self) -> Vec2 {
        self.position
    }

    pub fn parent(&self) -> Option<BodyId> {
        self.parent
    }

    pub fn children(&self) -> &[BodyId] {
        &self.children
    }

    /// Distance from the root (root = 0, planets = 1, moons = 2).
    pub fn depth(&self) -> usize {
        self.depth
    }

    pub fn period_days(&self) -> f64 {
        self.period_days
    }

    /// Orbital angle at `elapsed_days`, radians (not wrapped).
    pub fn angle_at(&self, elapsed_days: f64) -> f64 {
        if self.period_days == 0.0 {
            return self.initial_phase;
        }
        self.initial_phase + TAU * (elapsed_days / self.period_days)
    }

    /// Offset from the parent at `elapsed_days`.
    pub fn offset_at(&self, elapsed_days: f64) -> Vec2 {
        if self.orbit_radius == 0.0 {
            return Vec2::ZERO;
        }
        // Reduce in f64 first: large day counts lose the angle in f32.
        let mut angle = self.angle_at(elapsed_days);
        if !angle.is_finite() {
            angle = self.initial_phase;
        }
        let angle = angle.rem_euclid(TAU);
        Vec2::new(angle.cos() as f32, angle.sin() as f32) * self.orbit_radius
    }
}

/// Arena-owned orbital hierarchy with a single root at the scene origin.
#[derive(Debug, Clone)]
pub struct BodyTree {
    bodies: Vec<OrbitalBody>,
    root: BodyId,
}

impl BodyTree {
    /// Validate descriptors and build the tree. Positions are computed for
    /// elapsed time zero.
    ///
    /// Periods are converted to days here, once per body, using each
    /// descriptor's own unit.
    pub fn from_descs(descs: &[BodyDesc]) -> ConfigResult<Self> {
        if descs.is_empty() {
            return Err(ConfigError::Empty);
        }

        for (index, desc) in descs.iter().enumerate() {
            validate_desc(index, desc, descs.len())?;
        }

        let mut roots = descs.iter().enumerate().filter(|(_, d)| d.parent.is_none()).map(|(i, _)| i);
        let root = match (roots.next(), roots.next()) {
            (Some(root), None) => root,
            (Some(first), Some(second)) => return Err(ConfigError::MultipleRoots { first, second }),
            (None, _) => return Err(ConfigError::MissingRoot),
        };
        if descs[root].orbit_radius != 0.0 {
            return Err(ConfigError::RootOrbits {
                name: descs[root].name.clone(),
                orbit_radius: descs[root].orbit_radius,
            });
        }

        let mut bodies: Vec<OrbitalBody> = descs
            .iter()
            .map(|desc| OrbitalBody {
                name: desc.name.clone(),
                radius: desc.radius,
                orbit_radius: desc.orbit_radius,
                initial_phase: desc.initial_phase,
                color: desc.color,
                has_ring: desc.has_ring,
                period_days: desc.period.map_or(0.0, |p| p * desc.period_unit.days()),
                parent: desc.parent.map(|p| BodyId(p as u32)),
                children: Vec::new(),
                depth: 0,
                position: Vec2::ZERO,
            })
            .collect();

        for (index, desc) in descs.iter().enumerate() {
            if let Some(parent) = desc.parent {
                bodies[parent].children.push(BodyId(index as u32));
            }
        }

        let max_depth = assign_depths(&mut bodies, root)?;

        let mut tree = Self { bodies, root: BodyId(root as u32) };
        tree.update_at(0.0);
        log::info!(
            "built orbital tree: {} bodies, root {}, depth {}",
            tree.len(),
            tree.get(tree.root).name,
            max_depth,
        );
        Ok(tree)
    }

    /// Recompute every position for the time base's current elapsed time.
    pub fn update(&mut self, time: &TimeBase) {
        self.update_at(time.elapsed());
    }

    /// Recompute every position for `elapsed_days`, parents before their
    /// satellites. The root stays at the origin.
    pub fn update_at(&mut self, elapsed_days: f64) {
        let mut stack = vec![(self.root, Vec2::ZERO)];
        while let Some((id, parent_position)) = stack.pop() {
            let body = &mut self.bodies[id.index()];
            let position = parent_position + body.offset_at(elapsed_days);
            body.position = position;
            stack.extend(body.children.iter().rev().map(|&child| (child, position)));
        }
    }

    pub fn root(&self) -> BodyId {
        self.root
    }

    /// Get a body by handle. Handles come from this tree and are always valid.
    pub fn get(&self, id: BodyId) -> &OrbitalBody {
        &self.bodies[id.index()]
    }

    pub fn try_get(&self, id: BodyId) -> Option<&OrbitalBody> {
        self.bodies.get(id.index())
    }

    /// Last-computed position of `id`'s parent, or the origin for the root.
    pub fn parent_position(&self, id: BodyId) -> Vec2 {
        self.get(id)
            .parent
            .map_or(Vec2::ZERO, |p| self.bodies[p.index()].position)
    }

    /// Find the first body with the given name.
    pub fn find(&self, name: &str) -> Option<BodyId> {
        self.bodies.iter().position(|b| b.name == name).map(|i| BodyId(i as u32))
    }

    /// Iterate over (handle, body) in descriptor order.
    pub fn iter(&self) -> impl Iterator<Item = (BodyId, &OrbitalBody)> {
        self.bodies.iter().enumerate().map(|(i, b)| (BodyId(i as u32), b))
    }

    pub fn len(&self) -> usize {
        self.bodies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }
}

fn validate_desc(index: usize, desc: &BodyDesc, count: usize) -> ConfigResult<()> {
    let name = || desc.name.clone();

    if !(desc.radius.is_finite() && desc.radius > 0.0) {
        return Err(ConfigError::InvalidRadius { index, name: name(), radius: desc.radius });
    }
    if !(desc.orbit_radius.is_finite() && desc.orbit_radius >= 0.0) {
        return Err(ConfigError::InvalidOrbitRadius { index, name: name(), orbit_radius: desc.orbit_radius });
    }
    if !desc.initial_phase.is_finite() {
        return Err(ConfigError::InvalidPhase { index, name: name() });
    }
    match desc.period {
        // The angular rate must be finite too, which rules out subnormal periods.
        Some(period) if !period_is_usable(period * desc.period_unit.days()) => {
            return Err(ConfigError::InvalidPeriod { index, name: name(), period });
        }
        None if desc.parent.is_some() => {
            return Err(ConfigError::InvalidPeriod { index, name: name(), period: 0.0 });
        }
        _ => {}
    }
    if let Some(parent) = desc.parent {
        if parent >= count {
            return Err(ConfigError::UnknownParent { index, name: name(), parent });
        }
        if parent == index {
            return Err(ConfigError::Cycle { index, name: name() });
        }
    }
    Ok(())
}

fn period_is_usable(period_days: f64) -> bool {
    period_days.is_normal() && (TAU / period_days).is_finite()
}

/// Walk down from the root, setting every depth. Returns the deepest level.
/// A body the walk never reaches hangs off a parent cycle.
fn assign_depths(bodies: &mut [OrbitalBody], root: usize) -> ConfigResult<usize> {
    let mut visited = vec![false; bodies.len()];
    let mut max_depth = 0;
    let mut stack = vec![(BodyId(root as u32), 0)];
    while let Some((id, depth)) = stack.pop() {
        visited[id.index()] = true;
        let body = &mut bodies[id.index()];
        body.depth = depth;
        max_depth = max_depth.max(depth);
        stack.extend(body.children.iter().map(|&child| (child, depth + 1)));
    }

    match visited.iter().position(|seen| !seen) {
        Some(index) => Err(ConfigError::Cycle { index, name: bodies[index].name.clone() }),
        None => Ok(max_depth),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::FRAC_PI_2;

    fn sun_earth_moon() -> Vec<BodyDesc> {
        vec![
            BodyDesc::root("Sun", 50.0, Rgb::YELLOW),
            BodyDesc::orbiting("Earth", 0, 20.0, 220.0, 1.0, Rgb::BLUE).in_years(),
            BodyDesc::orbiting("Moon", 1, 8.0, 50.0, 29.53, Rgb::WHITE),
        ]
    }

    fn approx(a: Vec2, b: Vec2) -> bool {
        (a - b).length() < 1e-3
    }

    #[test]
    fn builds_parent_child_links() {
        let tree = BodyTree::from_descs(&sun_earth_moon()).unwrap();
        let earth = tree.find("Earth").unwrap();
        let moon = tree.find("Moon").unwrap();
        assert_eq!(tree.root(), BodyId(0));
        assert_eq!(tree.get(moon).parent(), Some(earth));
        assert_eq!(tree.get(earth).children(), &[moon]);
        assert_eq!(tree.get(moon).depth(), 2);
    }

    #[test]
    fn years_are_converted_once() {
        let tree = BodyTree::from_descs(&sun_earth_moon()).unwrap();
        let earth = tree.find("Earth").unwrap();
        let moon = tree.find("Moon").unwrap();
        assert_eq!(tree.get(earth).period_days(), DAYS_PER_YEAR);
        assert_eq!(tree.get(moon).period_days(), 29.53);
    }

    #[test]
    fn positions_follow_closed_form() {
        let mut tree = BodyTree::from_descs(&sun_earth_moon()).unwrap();
        // Quarter of a year: Earth at 90 degrees.
        tree.update_at(DAYS_PER_YEAR / 4.0);
        let earth = tree.get(tree.find("Earth").unwrap()).position();
        assert!(approx(earth, Vec2::new(0.0, 220.0)), "earth at {earth}");

        let moon_id = tree.find("Moon").unwrap();
        let moon = tree.get(moon_id);
        let angle = (TAU * (DAYS_PER_YEAR / 4.0) / 29.53).rem_euclid(TAU);
        let expected = earth + Vec2::new(angle.cos() as f32, angle.sin() as f32) * 50.0;
        assert!(approx(moon.position(), expected));
        assert_eq!(tree.parent_position(moon_id), earth);
    }

    #[test]
    fn root_stays_at_origin() {
        let mut tree = BodyTree::from_descs(&sun_earth_moon()).unwrap();
        for t in [0.0, 1.0, 123.4, 1e6, -50.0] {
            tree.update_at(t);
            assert_eq!(tree.get(tree.root()).position(), Vec2::ZERO);
        }
    }

    #[test]
    fn updates_are_path_independent() {
        let mut direct = BodyTree::from_descs(&sun_earth_moon()).unwrap();
        direct.update_at(100.0);

        let mut stepped = BodyTree::from_descs(&sun_earth_moon()).unwrap();
        stepped.update_at(50.0);
        stepped.update_at(100.0);

        for ((_, a), (_, b)) in direct.iter().zip(stepped.iter()) {
            assert_eq!(a.position(), b.position());
        }
    }

    #[test]
    fn time_can_run_backward() {
        let mut tree = BodyTree::from_descs(&sun_earth_moon()).unwrap();
        tree.update_at(10.0);
        let at_ten: Vec<Vec2> = tree.iter().map(|(_, b)| b.position()).collect();
        tree.update_at(300.0);
        tree.update_at(10.0);
        let again: Vec<Vec2> = tree.iter().map(|(_, b)| b.position()).collect();
        assert_eq!(at_ten, again);
    }

    #[test]
    fn orbit_is_periodic() {
        let mut tree = BodyTree::from_descs(&sun_earth_moon()).unwrap();
        let earth = tree.find("Earth").unwrap();
        for t in [0.0, 17.0, 200.5] {
            tree.update_at(t);
            let a = tree.get(earth).position();
            tree.update_at(t + DAYS_PER_YEAR);
            let b = tree.get(earth).position();
            assert!(approx(a, b), "{a} vs {b} at t={t}");
        }
    }

    #[test]
    fn zero_orbit_radius_sits_on_parent() {
        let descs = vec![
            BodyDesc::root("Sun", 10.0, Rgb::YELLOW),
            BodyDesc::orbiting("Planet", 0, 5.0, 100.0, 10.0, Rgb::BLUE),
            BodyDesc::orbiting("Core", 1, 1.0, 0.0, 3.0, Rgb::WHITE),
        ];
        let mut tree = BodyTree::from_descs(&descs).unwrap();
        tree.update_at(7.3);
        let planet = tree.get(BodyId(1)).position();
        assert_eq!(tree.get(BodyId(2)).position(), planet);
    }

    #[test]
    fn initial_phase_offsets_start() {
        let descs = vec![
            BodyDesc::root("Sun", 10.0, Rgb::YELLOW),
            BodyDesc::orbiting("Planet", 0, 5.0, 100.0, 10.0, Rgb::BLUE).with_phase(FRAC_PI_2),
        ];
        let tree = BodyTree::from_descs(&descs).unwrap();
        assert!(approx(tree.get(BodyId(1)).position(), Vec2::new(0.0, 100.0)));
    }

    #[test]
    fn negative_period_is_retrograde() {
        let descs = vec![
            BodyDesc::root("Sun", 10.0, Rgb::YELLOW),
            BodyDesc::orbiting("Retro", 0, 5.0, 100.0, -4.0, Rgb::BLUE),
        ];
        let mut tree = BodyTree::from_descs(&descs).unwrap();
        tree.update_at(1.0);
        assert!(approx(tree.get(BodyId(1)).position(), Vec2::new(0.0, -100.0)));
    }

    #[test]
    fn rejects_zero_period() {
        let mut descs = sun_earth_moon();
        descs[2].period = Some(0.0);
        let err = BodyTree::from_descs(&descs).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidPeriod { index: 2, .. }), "{err}");
    }

    #[test]
    fn rejects_periods_with_no_finite_rate() {
        for period in [1e-310, f64::NAN, f64::INFINITY] {
            let mut descs = sun_earth_moon();
            descs[2].period = Some(period);
            assert!(matches!(
                BodyTree::from_descs(&descs),
                Err(ConfigError::InvalidPeriod { index: 2, .. })
            ));
        }

        // Finite in years but overflows once converted to days.
        let mut descs = sun_earth_moon();
        descs[1].period = Some(f64::MAX);
        assert!(matches!(
            BodyTree::from_descs(&descs),
            Err(ConfigError::InvalidPeriod { index: 1, .. })
        ));
    }

    #[test]
    fn tiny_periods_stay_finite() {
        let descs = vec![
            BodyDesc::root("Sun", 10.0, Rgb::YELLOW),
            BodyDesc::orbiting("Blur", 0, 5.0, 100.0, 1e-300, Rgb::BLUE),
        ];
        let mut tree = BodyTree::from_descs(&descs).unwrap();
        for t in [1.0, 1e10, f64::MAX] {
            tree.update_at(t);
            let p = tree.get(BodyId(1)).position();
            assert!(p.is_finite(), "position {p} at t={t}");
            assert!((p.length() - 100.0).abs() < 1e-3);
        }
    }

    #[test]
    fn rejects_missing_period_on_orbiting_body() {
        let mut descs = sun_earth_moon();
        descs[1].period = None;
        assert!(matches!(
            BodyTree::from_descs(&descs),
            Err(ConfigError::InvalidPeriod { index: 1, .. })
        ));
    }

    #[test]
    fn rejects_bad_radius() {
        for radius in [0.0, -3.0, f32::NAN] {
            let mut descs = sun_earth_moon();
            descs[1].radius = radius;
            assert!(matches!(
                BodyTree::from_descs(&descs),
                Err(ConfigError::InvalidRadius { index: 1, .. })
            ));
        }
    }

    #[test]
    fn rejects_negative_orbit_radius() {
        let mut descs = sun_earth_moon();
        descs[2].orbit_radius = -1.0;
        assert!(matches!(
            BodyTree::from_descs(&descs),
            Err(ConfigError::InvalidOrbitRadius { index: 2, .. })
        ));
    }

    #[test]
    fn rejects_cycles() {
        let mut descs = sun_earth_moon();
        descs.push(BodyDesc::orbiting("A", 4, 1.0, 5.0, 1.0, Rgb::WHITE));
        descs.push(BodyDesc::orbiting("B", 3, 1.0, 5.0, 1.0, Rgb::WHITE));
        assert!(matches!(BodyTree::from_descs(&descs), Err(ConfigError::Cycle { index: 3, .. })));

        // A body hanging off the cycle is unreachable as well.
        let mut descs = sun_earth_moon();
        descs.push(BodyDesc::orbiting("A", 4, 1.0, 5.0, 1.0, Rgb::WHITE));
        descs.push(BodyDesc::orbiting("B", 3, 1.0, 5.0, 1.0, Rgb::WHITE));
        descs[2].parent = Some(3);
        assert!(matches!(BodyTree::from_descs(&descs), Err(ConfigError::Cycle { index: 2, .. })));

        let mut descs = sun_earth_moon();
        descs[2].parent = Some(2);
        assert!(matches!(BodyTree::from_descs(&descs), Err(ConfigError::Cycle { index: 2, .. })));
    }

    #[test]
    fn rejects_root_problems() {
        let mut descs = sun_earth_moon();
        descs[2].parent = None;
        descs[2].period = None;
        descs[2].orbit_radius = 0.0;
        assert!(matches!(
            BodyTree::from_descs(&descs),
            Err(ConfigError::MultipleRoots { first: 0, second: 2 })
        ));

        let mut descs = sun_earth_moon();
        descs[0].parent = Some(1);
        descs[0].period = Some(1.0);
        assert!(matches!(BodyTree::from_descs(&descs), Err(ConfigError::MissingRoot)));

        let mut descs = sun_earth_moon();
        descs[0].orbit_radius = 10.0;
        assert!(matches!(BodyTree::from_descs(&descs), Err(ConfigError::RootOrbits { .. })));
    }

    #[test]
    fn rejects_unknown_parent_and_empty() {
        let mut descs = sun_earth_moon();
        descs[2].parent = Some(9);
        assert!(matches!(
            BodyTree::from_descs(&descs),
            Err(ConfigError::UnknownParent { parent: 9, .. })
        ));
        assert!(matches!(BodyTree::from_descs(&[]), Err(ConfigError::Empty)));
    }

    #[test]
    fn deep_chains_build_and_update() {
        const LEN: usize = 20_000;
        let mut descs = vec![BodyDesc::root("Root", 1.0, Rgb::WHITE)];
        descs.extend((1..LEN).map(|i| BodyDesc::orbiting(format!("b{i}"), i - 1, 1.0, 1.0, 10.0, Rgb::WHITE)));

        let mut tree = BodyTree::from_descs(&descs).unwrap();
        let last = BodyId((LEN - 1) as u32);
        assert_eq!(tree.get(last).depth(), LEN - 1);
        // Every link points the same way at t=0.
        assert!((tree.get(last).position().x - (LEN - 1) as f32).abs() < 1e-1);

        tree.update_at(2.5);
        assert!(tree.get(last).position().is_finite());
        assert!((tree.get(BodyId(1)).position() - Vec2::new(0.0, 1.0)).length() < 1e-5);
    }

    #[test]
    fn descriptors_parse_from_json() {
        let json = r#"[
            { "name": "Sun", "radius": 30.0, "color": [255, 255, 0] },
            { "name": "Jupiter", "radius": 25.0, "orbit_radius": 220.0,
              "period": 11.86, "period_unit": "years", "has_ring": true, "parent": 0 }
        ]"#;
        let descs: Vec<BodyDesc> = serde_json::from_str(json).unwrap();
        let tree = BodyTree::from_descs(&descs).unwrap();
        let jupiter = tree.get(BodyId(1));
        assert!(jupiter.has_ring);
        assert!((jupiter.period_days() - 11.86 * DAYS_PER_YEAR).abs() < 1e-9);
    }
}
