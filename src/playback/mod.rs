//! Playback controller
//!
//! A single-threaded state machine that owns the materialized [`Trace`] and
//! drives the current index through it, either by manual stepping or by a
//! repeating auto-advance timer.
//!
//! # States
//!
//! ```text
//! Idle --load--> Ready --play--> Playing --pause--> Paused
//!                  |               |  ^  tick at last step
//!                  |               v  |
//!                  |            Finished --play (rewind to 0)
//!                  +--step----> Paused
//! any --reset/invalidate--> Idle
//! ```
//!
//! # Timer Model
//!
//! The controller owns at most one [`Timer`]. Starting playback always
//! cancels the outstanding timer first, and every timer carries a fresh
//! [`TimerId`], so a callback from a cancelled timer is recognized and ignored.
//! Hosts either call [`PlaybackController::poll`] from their event loop or
//! forward their own timer callbacks to [`PlaybackController::on_timer`].
//!
//! Speed changes and manual stepping are rejected while playing, so only one
//! source ever moves the index at a time.

use crate::config::{Config, SpeedLimits};
use crate::error::PlaybackError;
use crate::input::TraceInput;
use crate::materialize::Materializer;
use crate::trace::{Counters, Step, Trace};
use serde::Serialize;
use std::time::{Duration, Instant};
use tracing::{debug, info};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    /// No trace loaded
    Idle,
    /// Trace loaded, index at 0, nothing played yet
    Ready,
    /// Auto-advance timer running
    Playing,
    /// Stopped by the user or by a manual step
    Paused,
    /// Auto-advance reached the last step
    Finished,
}

/// Identity of one started timer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerId(u64);

/// The single outstanding auto-advance timer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timer {
    pub id: TimerId,
    pub interval: Duration,
    pub due: Instant,
}

/// Result of a timer firing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// No active timer, a stale timer, or a deadline not yet reached
    Idle,
    /// The index moved to the contained position
    Advanced(usize),
    /// The last step was already showing; playback is now finished.
    /// Reported once per playback run.
    Completed,
}

/// Read-only snapshot of the controller for renderers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaybackState {
    pub phase: Phase,
    pub current_index: usize,
    pub playing: bool,
    pub speed_ms: u64,
    pub total_steps: usize,
}

#[derive(Debug)]
pub struct PlaybackController {
    trace: Trace,
    index: usize,
    phase: Phase,
    speed_ms: u64,
    limits: SpeedLimits,
    timer: Option<Timer>,
    timers_started: u64,
}

impl Default for PlaybackController {
    fn default() -> Self {
        PlaybackController::new(SpeedLimits::default())
    }
}

impl PlaybackController {
    pub fn new(limits: SpeedLimits) -> Self {
        PlaybackController {
            trace: Trace::empty(),
            index: 0,
            phase: Phase::Idle,
            speed_ms: limits.default_ms,
            limits,
            timer: None,
            timers_started: 0,
        }
    }

    pub fn with_config(config: &Config) -> Self {
        PlaybackController::new(config.speed)
    }

    // ========== Loading ==========

    /// Take ownership of a materialized trace and rewind to its first step
    pub fn load_trace(&mut self, trace: Trace) {
        self.cancel_timer();
        debug!(
            algorithm = trace.algorithm().unwrap_or("<none>"),
            steps = trace.len(),
            "trace loaded"
        );
        self.trace = trace;
        self.index = 0;
        self.phase = Phase::Ready;
    }

    /// Materialize `algorithm` over `input` and load the result
    ///
    /// On error the controller is left exactly as it was.
    pub fn load(
        &mut self,
        materializer: &Materializer<'_>,
        algorithm: &str,
        input: &TraceInput,
    ) -> Result<(), PlaybackError> {
        let trace = materializer.materialize(algorithm, input)?;
        self.load_trace(trace);
        Ok(())
    }

    /// Discard the trace and return to `Idle`
    pub fn reset(&mut self) {
        self.cancel_timer();
        self.trace = Trace::empty();
        self.index = 0;
        self.phase = Phase::Idle;
        debug!("playback reset");
    }

    /// The algorithm or the input changed; the trace must be regenerated
    pub fn invalidate(&mut self) {
        self.reset();
        debug!("trace invalidated by algorithm or input change");
    }

    // ========== Timed playback ==========

    /// Start auto-advancing from now
    pub fn play(&mut self) -> bool {
        self.play_at(Instant::now())
    }

    /// Start auto-advancing; the first tick is due one interval after `now`
    ///
    /// Returns `false` (and changes nothing) without a non-empty trace.
    pub fn play_at(&mut self, now: Instant) -> bool {
        if self.phase == Phase::Idle || self.trace.is_empty() {
            debug!(phase = ?self.phase, "play ignored: nothing to play");
            return false;
        }

        self.cancel_timer();
        if self.phase == Phase::Finished {
            self.index = 0;
        }

        self.timers_started += 1;
        let interval = self.speed();
        self.timer = Some(Timer {
            id: TimerId(self.timers_started),
            interval,
            due: now + interval,
        });
        self.phase = Phase::Playing;
        debug!(index = self.index, speed_ms = self.speed_ms, "playing");
        true
    }

    /// Stop auto-advancing, keeping the current index
    pub fn pause(&mut self) -> bool {
        if self.phase != Phase::Playing {
            return false;
        }
        self.cancel_timer();
        self.phase = Phase::Paused;
        debug!(index = self.index, "paused");
        true
    }

    /// Fire the active timer now, whatever its deadline
    pub fn tick(&mut self) -> TickOutcome {
        match self.timer {
            Some(timer) => self.advance(timer.due + timer.interval),
            None => TickOutcome::Idle,
        }
    }

    /// Fire the active timer if its deadline has passed
    pub fn poll(&mut self, now: Instant) -> TickOutcome {
        match self.timer {
            Some(timer) if timer.due <= now => self.advance(now + timer.interval),
            _ => TickOutcome::Idle,
        }
    }

    /// Callback from a host-owned timer; stale ids are ignored
    pub fn on_timer(&mut self, id: TimerId) -> TickOutcome {
        match self.timer {
            Some(timer) if timer.id == id => self.advance(timer.due + timer.interval),
            _ => {
                debug!(?id, "ignoring tick from cancelled timer");
                TickOutcome::Idle
            }
        }
    }

    fn advance(&mut self, next_due: Instant) -> TickOutcome {
        if self.index < self.trace.last_index() {
            self.index += 1;
            if let Some(timer) = self.timer.as_mut() {
                timer.due = next_due;
            }
            TickOutcome::Advanced(self.index)
        } else {
            self.cancel_timer();
            self.phase = Phase::Finished;
            info!(steps = self.trace.len(), "playback finished");
            TickOutcome::Completed
        }
    }

    fn cancel_timer(&mut self) {
        if let Some(timer) = self.timer.take() {
            debug!(id = ?timer.id, "timer cancelled");
        }
    }

    /// Change the auto-advance interval; only while not playing
    pub fn set_speed(&mut self, speed_ms: u64) -> Result<(), PlaybackError> {
        if self.phase == Phase::Playing {
            return Err(self.reject("change speed"));
        }
        if !self.limits.contains(speed_ms) {
            return Err(PlaybackError::SpeedOutOfRange {
                speed: speed_ms,
                min: self.limits.min_ms,
                max: self.limits.max_ms,
            });
        }
        self.speed_ms = speed_ms;
        Ok(())
    }

    // ========== Manual stepping ==========

    /// Move one step forward; `Ok(false)` at the last step or without a trace
    pub fn step_forward(&mut self) -> Result<bool, PlaybackError> {
        if self.phase == Phase::Playing {
            return Err(self.reject("step forward"));
        }
        if !self.has_steps() || self.index >= self.trace.last_index() {
            return Ok(false);
        }
        self.index += 1;
        self.phase = Phase::Paused;
        Ok(true)
    }

    /// Move one step back; `Ok(false)` at the first step or without a trace
    pub fn step_backward(&mut self) -> Result<bool, PlaybackError> {
        if self.phase == Phase::Playing {
            return Err(self.reject("step backward"));
        }
        if !self.has_steps() || self.index == 0 {
            return Ok(false);
        }
        self.index -= 1;
        self.phase = Phase::Paused;
        Ok(true)
    }

    /// Jump to `index` (clamped to the last step)
    pub fn seek(&mut self, index: usize) -> Result<bool, PlaybackError> {
        if self.phase == Phase::Playing {
            return Err(self.reject("seek"));
        }
        if !self.has_steps() {
            return Ok(false);
        }
        self.index = index.min(self.trace.last_index());
        self.phase = Phase::Paused;
        Ok(true)
    }

    fn has_steps(&self) -> bool {
        self.phase != Phase::Idle && !self.trace.is_empty()
    }

    fn reject(&self, command: &'static str) -> PlaybackError {
        debug!(command, "rejected while playing");
        PlaybackError::WhilePlaying { command }
    }

    // ========== Accessors for renderers ==========

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_playing(&self) -> bool {
        self.phase == Phase::Playing
    }

    pub fn current_index(&self) -> usize {
        self.index
    }

    pub fn current_step(&self) -> Option<&Step> {
        self.trace.get(self.index)
    }

    /// Counters at the current step (all zero without one)
    pub fn counters(&self) -> Counters {
        self.current_step()
            .map(|step| step.counters)
            .unwrap_or_default()
    }

    pub fn trace(&self) -> &Trace {
        &self.trace
    }

    pub fn speed_ms(&self) -> u64 {
        self.speed_ms
    }

    pub fn speed(&self) -> Duration {
        Duration::from_millis(self.speed_ms)
    }

    pub fn speed_limits(&self) -> SpeedLimits {
        self.limits
    }

    pub fn active_timer(&self) -> Option<Timer> {
        self.timer
    }

    pub fn state(&self) -> PlaybackState {
        PlaybackState {
            phase: self.phase,
            current_index: self.index,
            playing: self.is_playing(),
            speed_ms: self.speed_ms,
            total_steps: self.trace.len(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::trace::{Highlights, Recorder};

    fn three_steps() -> Trace {
        let mut rec = Recorder::new();
        for value in 0..3 {
            rec.record_array(&[value], Highlights::default(), "step", None);
        }
        rec.finish("test")
    }

    #[test]
    fn test_stale_timer_is_ignored() {
        let mut controller = PlaybackController::default();
        controller.load_trace(three_steps());

        let start = Instant::now();
        assert!(controller.play_at(start));
        let first = controller.active_timer().unwrap().id;

        controller.pause();
        assert!(controller.play_at(start));
        let second = controller.active_timer().unwrap().id;
        assert_ne!(first, second);

        assert_eq!(controller.on_timer(first), TickOutcome::Idle);
        assert_eq!(controller.current_index(), 0);
        assert_eq!(controller.on_timer(second), TickOutcome::Advanced(1));
    }

    #[test]
    fn test_poll_respects_deadline() {
        let mut controller = PlaybackController::default();
        controller.load_trace(three_steps());
        controller.set_speed(100).unwrap();

        let start = Instant::now();
        controller.play_at(start);
        assert_eq!(
            controller.poll(start + Duration::from_millis(99)),
            TickOutcome::Idle
        );
        assert_eq!(
            controller.poll(start + Duration::from_millis(100)),
            TickOutcome::Advanced(1)
        );

        let timer = controller.active_timer().unwrap();
        assert_eq!(timer.due, start + Duration::from_millis(200));
    }

    #[test]
    fn test_completed_reported_once() {
        let mut controller = PlaybackController::default();
        controller.load_trace(three_steps());
        controller.play();

        assert_eq!(controller.tick(), TickOutcome::Advanced(1));
        assert_eq!(controller.tick(), TickOutcome::Advanced(2));
        assert_eq!(controller.tick(), TickOutcome::Completed);
        assert_eq!(controller.phase(), Phase::Finished);
        assert!(controller.active_timer().is_none());
        assert_eq!(controller.tick(), TickOutcome::Idle);
        assert_eq!(controller.current_index(), 2);
    }

    #[test]
    fn test_state_snapshot_serializes() {
        let mut controller = PlaybackController::default();
        controller.load_trace(three_steps());
        let json = serde_json::to_value(controller.state()).unwrap();
        assert_eq!(json["phase"], "ready");
        assert_eq!(json["currentIndex"], 0);
        assert_eq!(json["totalSteps"], 3);
        assert_eq!(json["playing"], false);
    }
}
