//! Markers and arcs layered over the globe.
//!
//! [`OverlayController`] owns both registries and the sequencer. Requests
//! register state synchronously; everything visible unfolds over later
//! [`OverlayController::tick`] calls, which also report scene changes so a
//! renderer can mirror the registries.

use fnv::FnvHashMap;
use glam::Vec3;
use smallvec::SmallVec;
use std::fmt;
use std::time::Duration;

use crate::constants::*;
use crate::curve::CubicBezier;
use crate::error::OverlayError;
use crate::geo::{lerp_coord, project, surface_normal, GeoCoordinate};
use crate::registry::{Keyed, Registry, Visit};
use crate::tween::{Param, ParamSet, Phase, Sequencer, TweenEvent, TweenHandle};

/// Caller-chosen marker identifier. Numbers and strings both map onto it.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MarkerId(String);

impl MarkerId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for MarkerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for MarkerId {
    fn from(id: &str) -> Self {
        Self(id.to_owned())
    }
}

impl From<String> for MarkerId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl From<u64> for MarkerId {
    fn from(id: u64) -> Self {
        Self(id.to_string())
    }
}

/// Controller-assigned arc identifier.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ArcId(u64);

impl ArcId {
    /// Rebuild an id previously handed out through [`ArcId::raw`].
    pub const fn from_raw(raw: u64) -> Self {
        Self(raw)
    }

    pub fn raw(self) -> u64 {
        self.0
    }
}

impl fmt::Display for ArcId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "arc#{}", self.0)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MarkerState {
    Appearing,
    Visible,
    Disappearing,
}

#[derive(Clone, Debug)]
pub struct Marker {
    pub id: MarkerId,
    pub coord: GeoCoordinate,
    pub position: Vec3,
    pub scale: f32,
    pub state: MarkerState,
    animation: Option<TweenHandle>,
}

impl Marker {
    /// Outer end of the radial spike at the current scale.
    pub fn tip(&self) -> Vec3 {
        self.position + surface_normal(self.coord) * (MARKER_LENGTH * self.scale)
    }

    pub fn is_animating(&self) -> bool {
        self.animation.is_some()
    }
}

impl Keyed for Marker {
    type Key = MarkerId;

    fn key(&self) -> &MarkerId {
        &self.id
    }
}

/// An animated Bézier route between two coordinates.
#[derive(Clone, Debug)]
pub struct ArcPath {
    pub id: ArcId,
    pub from: GeoCoordinate,
    pub to: GeoCoordinate,
    pub from_point: Vec3,
    pub to_point: Vec3,
    pub controls: [Vec3; 2],
    pub path: Vec<Vec3>,
    pub reveal_start: f32,
    pub reveal_end: f32,
    pub endpoint_scale: f32,
    animation: Option<TweenHandle>,
}

impl ArcPath {
    /// Half-open range of `path` indices currently drawn.
    pub fn visible_range(&self) -> std::ops::Range<usize> {
        let len = self.path.len();
        let start = (self.reveal_start.max(0.0).ceil() as usize).min(len);
        let end = (self.reveal_end.max(0.0).ceil() as usize).min(len);
        start..end.max(start)
    }

    pub fn visible_points(&self) -> &[Vec3] {
        &self.path[self.visible_range()]
    }

    pub fn is_animating(&self) -> bool {
        self.animation.is_some()
    }
}

impl Keyed for ArcPath {
    type Key = ArcId;

    fn key(&self) -> &ArcId {
        &self.id
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct MarkerSpec {
    pub id: MarkerId,
    pub latitude: f32,
    pub longitude: f32,
}

impl MarkerSpec {
    pub fn new(id: impl Into<MarkerId>, latitude: f32, longitude: f32) -> Self {
        Self {
            id: id.into(),
            latitude,
            longitude,
        }
    }

    fn coord(&self) -> GeoCoordinate {
        GeoCoordinate::new(self.latitude, self.longitude)
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LineSpec {
    pub from: GeoCoordinate,
    pub to: GeoCoordinate,
}

impl LineSpec {
    pub fn new(from: GeoCoordinate, to: GeoCoordinate) -> Self {
        Self { from, to }
    }
}

/// Scene-graph changes produced by the controller.
#[derive(Clone, Debug, PartialEq)]
pub enum SceneEvent {
    MarkerAdded(MarkerId),
    MarkerRemoved(MarkerId),
    ArcAdded(ArcId),
    /// The arc ran its whole timeline and was evicted.
    ArcRetired(ArcId),
    /// The arc was removed before its timeline finished.
    ArcRemoved(ArcId),
}

/// Running totals over the scene events seen so far.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SceneTally {
    pub markers_added: u64,
    pub markers_removed: u64,
    pub arcs_added: u64,
    pub arcs_retired: u64,
    pub arcs_removed: u64,
}

impl SceneTally {
    pub fn record(&mut self, events: &[SceneEvent]) {
        for ev in events {
            match ev {
                SceneEvent::MarkerAdded(_) => self.markers_added += 1,
                SceneEvent::MarkerRemoved(_) => self.markers_removed += 1,
                SceneEvent::ArcAdded(_) => self.arcs_added += 1,
                SceneEvent::ArcRetired(_) => self.arcs_retired += 1,
                SceneEvent::ArcRemoved(_) => self.arcs_removed += 1,
            }
        }
    }
}

/// Geometry and timing knobs; `Default` mirrors the constants module.
#[derive(Clone, Debug, PartialEq)]
pub struct OverlayConfig {
    pub marker_radius: f32,
    pub arc_radius: f32,
    pub arc_control_radius: f32,
    pub arc_segments: usize,
    pub marker_fade_delay: f32,
    pub marker_fade_duration: f32,
    pub arc_endpoint_duration: f32,
    pub arc_draw_delay: f32,
    pub arc_draw_duration: f32,
}

impl Default for OverlayConfig {
    fn default() -> Self {
        Self {
            marker_radius: MARKER_RADIUS,
            arc_radius: ARC_RADIUS,
            arc_control_radius: ARC_CONTROL_RADIUS,
            arc_segments: ARC_SEGMENTS,
            marker_fade_delay: MARKER_FADE_DELAY,
            marker_fade_duration: MARKER_FADE_DURATION,
            arc_endpoint_duration: ARC_ENDPOINT_DURATION,
            arc_draw_delay: ARC_DRAW_DELAY,
            arc_draw_duration: ARC_DRAW_DURATION,
        }
    }
}

impl OverlayConfig {
    fn marker_fade(&self, target: f32) -> Phase {
        Phase::to(Param::Scale, target, self.marker_fade_duration).after(self.marker_fade_delay)
    }

    /// Endpoints grow, the path draws forward then retracts, endpoints shrink.
    pub fn arc_phases(&self, path_len: f32) -> Vec<Phase> {
        vec![
            Phase::to(Param::EndpointScale, 1.0, self.arc_endpoint_duration),
            Phase::to(Param::RevealEnd, path_len, self.arc_draw_duration).after(self.arc_draw_delay),
            Phase::to(Param::RevealStart, path_len, self.arc_draw_duration)
                .and(Param::RevealEnd, path_len)
                .after(self.arc_draw_delay),
            Phase::to(Param::EndpointScale, 0.0, self.arc_endpoint_duration),
        ]
    }

    /// Full duration of an arc timeline, delays included.
    pub fn arc_timeline_secs(&self) -> f32 {
        self.arc_phases(0.0).iter().map(Phase::span).sum()
    }
}

#[derive(Default)]
pub struct OverlayController {
    config: OverlayConfig,
    markers: Registry<Marker>,
    arcs: Registry<ArcPath>,
    sequencer: Sequencer,
    next_arc: u64,
    pending: Vec<SceneEvent>,
    scratch: Vec<TweenEvent>,
    by_handle: FnvHashMap<TweenHandle, EventSlots>,
}

/// Positions of one handle's events inside the per-tick event buffer.
type EventSlots = SmallVec<[usize; 4]>;

impl OverlayController {
    pub fn new(config: OverlayConfig) -> Self {
        Self {
            config,
            ..Default::default()
        }
    }

    pub fn config(&self) -> &OverlayConfig {
        &self.config
    }

    /// Register a marker and start its grow-in animation.
    pub fn add_marker(&mut self, spec: MarkerSpec) -> Result<(), OverlayError> {
        let coord = spec.coord().validate()?;
        if self.markers.contains(&spec.id) {
            log::debug!("[overlay] duplicate marker id {}", spec.id);
            return Err(OverlayError::DuplicateId(spec.id.to_string()));
        }
        let handle = self.sequencer.run(
            ParamSet::default().with(Param::Scale, 0.0),
            vec![self.config.marker_fade(1.0)],
        );
        let marker = Marker {
            id: spec.id.clone(),
            coord,
            position: project(coord, self.config.marker_radius),
            scale: 0.0,
            state: MarkerState::Appearing,
            animation: Some(handle),
        };
        if let Err(rejected) = self.markers.add(marker) {
            self.sequencer.cancel(handle);
            return Err(OverlayError::DuplicateId(rejected.id.to_string()));
        }
        log::trace!("[overlay] marker {} at ({:.1}, {:.1})", spec.id, coord.latitude, coord.longitude);
        self.pending.push(SceneEvent::MarkerAdded(spec.id));
        Ok(())
    }

    /// Shrink a marker out and evict it once the animation completes.
    ///
    /// A marker that is already disappearing keeps its running animation.
    pub fn remove_marker(&mut self, id: &MarkerId) -> Result<(), OverlayError> {
        let Some(marker) = self.markers.find_mut(id) else {
            return Err(OverlayError::NotFound(id.to_string()));
        };
        if marker.state == MarkerState::Disappearing {
            return Ok(());
        }
        if let Some(previous) = marker.animation.take() {
            self.sequencer.cancel(previous);
        }
        let handle = self.sequencer.run(
            ParamSet::default().with(Param::Scale, marker.scale),
            vec![self.config.marker_fade(0.0)],
        );
        marker.animation = Some(handle);
        marker.state = MarkerState::Disappearing;
        Ok(())
    }

    /// Register an arc between two coordinates and start its timeline.
    pub fn add_line(&mut self, spec: LineSpec) -> Result<ArcId, OverlayError> {
        let from = spec.from.validate()?;
        let to = spec.to.validate()?;
        let cfg = &self.config;
        let from_point = project(from, cfg.arc_radius);
        let to_point = project(to, cfg.arc_radius);
        let controls = [
            project(lerp_coord(from, to, 0.25), cfg.arc_control_radius),
            project(lerp_coord(from, to, 0.75), cfg.arc_control_radius),
        ];
        let path = CubicBezier::new(from_point, controls[0], controls[1], to_point)
            .points(cfg.arc_segments);
        let phases = cfg.arc_phases(path.len() as f32);

        let id = ArcId(self.next_arc);
        self.next_arc += 1;
        let handle = self.sequencer.run(ParamSet::default(), phases);
        let arc = ArcPath {
            id,
            from,
            to,
            from_point,
            to_point,
            controls,
            path,
            reveal_start: 0.0,
            reveal_end: 0.0,
            endpoint_scale: 0.0,
            animation: Some(handle),
        };
        if self.arcs.add(arc).is_err() {
            self.sequencer.cancel(handle);
            log::warn!("[overlay] arc id {} already registered", id);
            return Err(OverlayError::DuplicateId(id.to_string()));
        }
        self.pending.push(SceneEvent::ArcAdded(id));
        Ok(id)
    }

    /// Stop an arc's timeline and evict it right away.
    pub fn remove_line(&mut self, id: ArcId) -> Result<(), OverlayError> {
        let arc = self
            .arcs
            .remove(&id)
            .ok_or_else(|| OverlayError::NotFound(id.to_string()))?;
        if let Some(handle) = arc.animation {
            self.sequencer.cancel(handle);
        }
        self.pending.push(SceneEvent::ArcRemoved(id));
        Ok(())
    }

    /// Cancel every animation and evict every entity.
    pub fn clear(&mut self) {
        self.sequencer.cancel_all();
        for marker in self.markers.drain() {
            self.pending.push(SceneEvent::MarkerRemoved(marker.id));
        }
        for arc in self.arcs.drain() {
            self.pending.push(SceneEvent::ArcRemoved(arc.id));
        }
    }

    /// Advance all animations by `dt` and report scene changes.
    pub fn tick(&mut self, dt: Duration, out: &mut Vec<SceneEvent>) {
        out.append(&mut self.pending);

        let mut events = std::mem::take(&mut self.scratch);
        events.clear();
        self.sequencer.tick(dt, &mut events);
        if events.is_empty() {
            self.scratch = events;
            return;
        }

        let mut by_handle = std::mem::take(&mut self.by_handle);
        by_handle.clear();
        for (slot, ev) in events.iter().enumerate() {
            by_handle.entry(ev.handle()).or_default().push(slot);
        }

        // Markers and arcs are walked in registration order.
        let evicted = self.markers.for_each_mut(|marker| {
            let Some(slots) = marker.animation.and_then(|h| by_handle.get(&h)) else {
                return Visit::Keep;
            };
            apply_marker_events(marker, slots, &events)
        });
        for marker in evicted {
            log::trace!("[overlay] marker {} removed", marker.id);
            out.push(SceneEvent::MarkerRemoved(marker.id));
        }

        let retired = self.arcs.for_each_mut(|arc| {
            let Some(slots) = arc.animation.and_then(|h| by_handle.get(&h)) else {
                return Visit::Keep;
            };
            apply_arc_events(arc, slots, &events)
        });
        for arc in retired {
            log::trace!("[overlay] {} retired", arc.id);
            out.push(SceneEvent::ArcRetired(arc.id));
        }

        self.scratch = events;
        self.by_handle = by_handle;
    }

    pub fn find_marker(&self, id: &MarkerId) -> Option<&Marker> {
        self.markers.find(id)
    }

    pub fn find_arc(&self, id: ArcId) -> Option<&ArcPath> {
        self.arcs.find(&id)
    }

    pub fn markers(&self) -> impl Iterator<Item = &Marker> {
        self.markers.iter()
    }

    pub fn arcs(&self) -> impl Iterator<Item = &ArcPath> {
        self.arcs.iter()
    }

    pub fn marker_count(&self) -> usize {
        self.markers.len()
    }

    pub fn arc_count(&self) -> usize {
        self.arcs.len()
    }

    /// Number of sequences still running.
    pub fn active_animations(&self) -> usize {
        self.sequencer.len()
    }
}

fn apply_marker_events(marker: &mut Marker, slots: &[usize], events: &[TweenEvent]) -> Visit {
    for ev in slots.iter().map(|&slot| &events[slot]) {
        match ev {
            TweenEvent::Updated { values, .. } => marker.scale = values.get(Param::Scale),
            TweenEvent::PhaseCompleted { .. } => {}
            TweenEvent::Finished { values, .. } => {
                marker.scale = values.get(Param::Scale);
                marker.animation = None;
                match marker.state {
                    MarkerState::Disappearing => return Visit::Evict,
                    _ => marker.state = MarkerState::Visible,
                }
            }
        }
    }
    Visit::Keep
}

fn apply_arc_events(arc: &mut ArcPath, slots: &[usize], events: &[TweenEvent]) -> Visit {
    for ev in slots.iter().map(|&slot| &events[slot]) {
        match ev {
            TweenEvent::Updated { values, .. } => apply_arc_values(arc, values),
            TweenEvent::PhaseCompleted { .. } => {}
            TweenEvent::Finished { values, .. } => {
                apply_arc_values(arc, values);
                arc.animation = None;
                return Visit::Evict;
            }
        }
    }
    Visit::Keep
}

fn apply_arc_values(arc: &mut ArcPath, values: &ParamSet) {
    arc.endpoint_scale = values.get(Param::EndpointScale);
    arc.reveal_start = values.get(Param::RevealStart);
    arc.reveal_end = values.get(Param::RevealEnd);
}
