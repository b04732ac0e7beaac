//! Timed, phase-ordered interpolation of named scalar parameters.
//!
//! A sequence is a list of [`Phase`]s run strictly one after another. Each
//! phase waits out its delay, captures the current value of every parameter
//! it targets, then interpolates linearly to the targets over its duration.
//! Progress is reported as [`TweenEvent`]s pushed into the caller's buffer
//! during [`Sequencer::tick`]: one `Updated` per tick while a phase is
//! interpolating, one `PhaseCompleted` per phase, and a single `Finished`
//! when the last phase ends. A cancelled sequence is dropped on the spot
//! and never reports again.

use smallvec::SmallVec;
use std::time::Duration;

/// Animatable parameters of overlay entities.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Param {
    /// Marker spike scale.
    Scale,
    /// Arc endpoint disc scale.
    EndpointScale,
    /// First drawn path point of an arc (fractional index).
    RevealStart,
    /// One past the last drawn path point of an arc (fractional index).
    RevealEnd,
}

impl Param {
    pub const ALL: [Param; 4] = [
        Param::Scale,
        Param::EndpointScale,
        Param::RevealStart,
        Param::RevealEnd,
    ];

    #[inline]
    const fn slot(self) -> usize {
        match self {
            Param::Scale => 0,
            Param::EndpointScale => 1,
            Param::RevealStart => 2,
            Param::RevealEnd => 3,
        }
    }
}

/// Snapshot of every parameter's current value.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ParamSet([f32; 4]);

impl ParamSet {
    #[inline]
    pub fn get(&self, param: Param) -> f32 {
        self.0[param.slot()]
    }

    #[inline]
    pub fn set(&mut self, param: Param, value: f32) {
        self.0[param.slot()] = value;
    }

    #[inline]
    pub fn with(mut self, param: Param, value: f32) -> Self {
        self.set(param, value);
        self
    }
}

/// One timed segment of a sequence.
#[derive(Clone, Debug, PartialEq)]
pub struct Phase {
    pub targets: SmallVec<[(Param, f32); 2]>,
    /// Seconds of interpolation.
    pub duration: f32,
    /// Seconds to wait before interpolation starts.
    pub delay: f32,
}

impl Phase {
    pub fn to(param: Param, target: f32, duration: f32) -> Self {
        let mut targets = SmallVec::new();
        targets.push((param, target));
        Self {
            targets,
            duration,
            delay: 0.0,
        }
    }

    /// Also drive `param` to `target` during this phase.
    pub fn and(mut self, param: Param, target: f32) -> Self {
        self.targets.push((param, target));
        self
    }

    pub fn after(mut self, delay: f32) -> Self {
        self.delay = delay;
        self
    }

    /// Delay plus duration.
    pub fn span(&self) -> f32 {
        self.delay + self.duration
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TweenHandle(u64);

impl TweenHandle {
    pub fn raw(self) -> u64 {
        self.0
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum TweenEvent {
    Updated {
        handle: TweenHandle,
        values: ParamSet,
    },
    PhaseCompleted {
        handle: TweenHandle,
        phase: usize,
    },
    Finished {
        handle: TweenHandle,
        values: ParamSet,
    },
}

impl TweenEvent {
    pub fn handle(&self) -> TweenHandle {
        match self {
            TweenEvent::Updated { handle, .. }
            | TweenEvent::PhaseCompleted { handle, .. }
            | TweenEvent::Finished { handle, .. } => *handle,
        }
    }
}

struct Sequence {
    handle: TweenHandle,
    phases: Vec<Phase>,
    current: usize,
    elapsed: f32,
    from: Option<ParamSet>,
    values: ParamSet,
    done: bool,
}

impl Sequence {
    fn advance(&mut self, dt: f32, out: &mut Vec<TweenEvent>) {
        let mut budget = dt.max(0.0);
        loop {
            let Some(phase) = self.phases.get(self.current) else {
                self.finish(out);
                return;
            };
            self.elapsed += budget;
            if self.elapsed < phase.delay {
                return;
            }
            let from = *self.from.get_or_insert(self.values);
            let active = self.elapsed - phase.delay;
            let progress = if phase.duration > 0.0 {
                (active / phase.duration).min(1.0)
            } else {
                1.0
            };
            for &(param, target) in &phase.targets {
                let value = if progress >= 1.0 {
                    target
                } else {
                    let start = from.get(param);
                    start + (target - start) * progress
                };
                self.values.set(param, value);
            }
            out.push(TweenEvent::Updated {
                handle: self.handle,
                values: self.values,
            });
            if progress < 1.0 {
                return;
            }

            out.push(TweenEvent::PhaseCompleted {
                handle: self.handle,
                phase: self.current,
            });
            budget = (active - phase.duration).max(0.0);
            self.current += 1;
            self.elapsed = 0.0;
            self.from = None;
            if self.current >= self.phases.len() {
                self.finish(out);
                return;
            }
            if budget <= 0.0 {
                return;
            }
        }
    }

    fn finish(&mut self, out: &mut Vec<TweenEvent>) {
        if self.done {
            return;
        }
        self.done = true;
        out.push(TweenEvent::Finished {
            handle: self.handle,
            values: self.values,
        });
    }
}

/// Drives every running sequence off a shared frame clock.
#[derive(Default)]
pub struct Sequencer {
    sequences: Vec<Sequence>,
    next_id: u64,
}

impl Sequencer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a sequence from `initial` values. Nothing happens until `tick`.
    pub fn run(&mut self, initial: ParamSet, phases: Vec<Phase>) -> TweenHandle {
        let handle = TweenHandle(self.next_id);
        self.next_id += 1;
        log::trace!("[tween] start {:?} phases={}", handle, phases.len());
        self.sequences.push(Sequence {
            handle,
            phases,
            current: 0,
            elapsed: 0.0,
            from: None,
            values: initial,
            done: false,
        });
        handle
    }

    /// Stop `handle` for good. Returns false if it had already finished or
    /// was never started.
    pub fn cancel(&mut self, handle: TweenHandle) -> bool {
        match self.sequences.iter().position(|s| s.handle == handle) {
            Some(pos) => {
                self.sequences.remove(pos);
                log::trace!("[tween] cancel {:?}", handle);
                true
            }
            None => false,
        }
    }

    pub fn cancel_all(&mut self) {
        self.sequences.clear();
    }

    pub fn is_running(&self, handle: TweenHandle) -> bool {
        self.sequences.iter().any(|s| s.handle == handle)
    }

    /// Current values of a running sequence.
    pub fn values(&self, handle: TweenHandle) -> Option<ParamSet> {
        self.sequences
            .iter()
            .find(|s| s.handle == handle)
            .map(|s| s.values)
    }

    pub fn len(&self) -> usize {
        self.sequences.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sequences.is_empty()
    }

    /// Advance every sequence by `dt`, in start order.
    pub fn tick(&mut self, dt: Duration, out: &mut Vec<TweenEvent>) {
        let dt = dt.as_secs_f32();
        for seq in &mut self.sequences {
            seq.advance(dt, out);
        }
        self.sequences.retain(|s| !s.done);
    }
}
