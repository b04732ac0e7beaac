//! Synthetic traffic for the globe page: a steady stream of short-lived
//! markers and routes between random integer coordinates.

use rand::prelude::*;
use std::collections::VecDeque;
use std::time::Duration;

use crate::constants::{DEMO_LINE_INTERVAL_MS, DEMO_MARKER_INTERVAL_MS, DEMO_MARKER_LIFETIME_MS};
use crate::geo::GeoCoordinate;
use crate::overlay::{LineSpec, MarkerId, MarkerSpec, OverlayController};

#[derive(Clone, Debug, PartialEq)]
pub struct DemoConfig {
    pub marker_interval: Duration,
    pub marker_lifetime: Duration,
    pub line_interval: Duration,
    /// Longest step honored per tick; a stalled tab does not flood the globe.
    pub max_step: Duration,
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            marker_interval: Duration::from_millis(DEMO_MARKER_INTERVAL_MS),
            marker_lifetime: Duration::from_millis(DEMO_MARKER_LIFETIME_MS),
            line_interval: Duration::from_millis(DEMO_LINE_INTERVAL_MS),
            max_step: Duration::from_millis(250),
        }
    }
}

pub struct DemoDriver {
    pub config: DemoConfig,
    rng: StdRng,
    clock: Duration,
    marker_accum: Duration,
    line_accum: Duration,
    next_marker: u64,
    removals: VecDeque<(Duration, MarkerId)>,
}

impl DemoDriver {
    pub fn new(config: DemoConfig, seed: u64) -> Self {
        Self {
            config,
            rng: StdRng::seed_from_u64(seed),
            clock: Duration::ZERO,
            marker_accum: Duration::ZERO,
            line_accum: Duration::ZERO,
            next_marker: 0,
            removals: VecDeque::new(),
        }
    }

    /// Markers spawned so far.
    pub fn spawned_markers(&self) -> u64 {
        self.next_marker
    }

    /// Removal requests not yet issued.
    pub fn pending_removals(&self) -> usize {
        self.removals.len()
    }

    /// Spawn the traffic due in `dt` and issue due marker removals.
    pub fn tick(&mut self, dt: Duration, overlay: &mut OverlayController) {
        let dt = dt.min(self.config.max_step);
        self.clock += dt;

        if !self.config.marker_interval.is_zero() {
            self.marker_accum += dt;
            while self.marker_accum >= self.config.marker_interval {
                self.marker_accum -= self.config.marker_interval;
                self.spawn_marker(overlay);
            }
        }

        if !self.config.line_interval.is_zero() {
            self.line_accum += dt;
            while self.line_accum >= self.config.line_interval {
                self.line_accum -= self.config.line_interval;
                let spec = LineSpec::new(self.random_coord(), self.random_coord());
                if let Err(e) = overlay.add_line(spec) {
                    log::debug!("[demo] add_line rejected: {e}");
                }
            }
        }

        self.issue_due_removals(overlay);
    }

    /// Advance the clock without spawning; removals already scheduled still fire.
    pub fn drain_removals(&mut self, dt: Duration, overlay: &mut OverlayController) {
        self.clock += dt.min(self.config.max_step);
        self.issue_due_removals(overlay);
    }

    fn issue_due_removals(&mut self, overlay: &mut OverlayController) {
        while let Some((due, _)) = self.removals.front() {
            if *due > self.clock {
                break;
            }
            if let Some((_, id)) = self.removals.pop_front() {
                if let Err(e) = overlay.remove_marker(&id) {
                    log::debug!("[demo] remove_marker({id}): {e}");
                }
            }
        }
    }

    fn spawn_marker(&mut self, overlay: &mut OverlayController) {
        let id = MarkerId::from(self.next_marker);
        self.next_marker += 1;
        let coord = self.random_coord();
        match overlay.add_marker(MarkerSpec::new(id.clone(), coord.latitude, coord.longitude)) {
            Ok(()) => self
                .removals
                .push_back((self.clock + self.config.marker_lifetime, id)),
            Err(e) => log::debug!("[demo] add_marker({id}) rejected: {e}"),
        }
    }

    fn random_coord(&mut self) -> GeoCoordinate {
        let lon = self.rng.gen_range(-180..=180) as f32;
        let lat = self.rng.gen_range(-90..=90) as f32;
        GeoCoordinate::new(lat, lon)
    }
}
