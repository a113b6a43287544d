//! Progress events, rate limiting, and cancellation
//!
//! The solver and the engine phases report through a [`ProgressReporter`],
//! which owns the caller's callback and enforces the emission rate bound:
//! at most one event per collapse interval or minimum wall-time interval,
//! whichever fires first. Phase boundaries bypass the rate limit.

use crate::io::configuration::{PROGRESS_COLLAPSE_INTERVAL, PROGRESS_MIN_INTERVAL_MS};
use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};

/// Generation phase a progress event belongs to
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GenPhase {
    /// Terrain constraint solving
    Terrain,
    /// Settlement placement
    Pois,
    /// Road carving
    Roads,
    /// Generation finished
    Complete,
}

impl fmt::Display for GenPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Terrain => "terrain",
            Self::Pois => "pois",
            Self::Roads => "roads",
            Self::Complete => "complete",
        };
        f.write_str(name)
    }
}

/// A single progress report
#[derive(Clone, Debug)]
pub struct ProgressEvent {
    /// Phase the generator is in
    pub phase: GenPhase,
    /// Completion within the run, 0 to 100
    pub progress: u8,
    /// Human-readable status line
    pub message: String,
}

/// Caller-supplied progress sink
pub type ProgressCallback = Box<dyn FnMut(&ProgressEvent)>;

/// Cooperative cancellation flag polled at progress checkpoints
#[derive(Clone, Debug, Default)]
pub struct CancelToken {
    flag: Arc<AtomicBool>,
}

impl CancelToken {
    /// Create a token in the not-cancelled state
    pub fn new() -> Self {
        Self::default()
    }

    /// Request cancellation; the generator stops at its next checkpoint
    pub fn cancel(&self) {
        self.flag.store(true, Ordering::Relaxed);
    }

    /// Whether cancellation has been requested
    pub fn is_cancelled(&self) -> bool {
        self.flag.load(Ordering::Relaxed)
    }
}

/// Rate-limited progress emitter shared by all generation phases
pub struct ProgressReporter {
    callback: Option<ProgressCallback>,
    last_emit: Option<Instant>,
    ticks_since_emit: usize,
}

impl ProgressReporter {
    /// Create a reporter; a `None` callback swallows all events
    pub const fn new(callback: Option<ProgressCallback>) -> Self {
        Self {
            callback,
            last_emit: None,
            ticks_since_emit: 0,
        }
    }

    /// Record one unit of work and emit if an emission is due
    ///
    /// The message closure only runs when an event is actually emitted.
    pub fn tick<F>(&mut self, phase: GenPhase, fraction: f64, message: F)
    where
        F: FnOnce() -> String,
    {
        if self.callback.is_none() {
            return;
        }

        self.ticks_since_emit += 1;
        let interval_elapsed = self.last_emit.is_none_or(|at| {
            at.elapsed() >= Duration::from_millis(PROGRESS_MIN_INTERVAL_MS)
        });

        if self.ticks_since_emit >= PROGRESS_COLLAPSE_INTERVAL || interval_elapsed {
            self.emit(phase, fraction, message());
        }
    }

    /// Emit unconditionally, used at phase boundaries
    pub fn force(&mut self, phase: GenPhase, fraction: f64, message: String) {
        if self.callback.is_some() {
            self.emit(phase, fraction, message);
        }
    }

    fn emit(&mut self, phase: GenPhase, fraction: f64, message: String) {
        let progress = (fraction.clamp(0.0, 1.0) * 100.0).round() as u8;
        let event = ProgressEvent {
            phase,
            progress,
            message,
        };
        if let Some(callback) = self.callback.as_mut() {
            callback(&event);
        }
        self.last_emit = Some(Instant::now());
        self.ticks_since_emit = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::{CancelToken, GenPhase, ProgressReporter};
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn cancel_token_round_trip() {
        let token = CancelToken::new();
        let observer = token.clone();
        assert!(!observer.is_cancelled());

        token.cancel();
        assert!(observer.is_cancelled());
    }

    #[test]
    fn reporter_without_callback_skips_message_construction() {
        let mut reporter = ProgressReporter::new(None);
        reporter.tick(GenPhase::Terrain, 0.5, || {
            unreachable!("message built with no callback attached")
        });
    }

    #[test]
    fn forced_events_always_fire() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        let mut reporter = ProgressReporter::new(Some(Box::new(move |event| {
            sink.borrow_mut().push((event.phase, event.progress));
        })));

        reporter.force(GenPhase::Terrain, 0.0, "start".to_string());
        reporter.force(GenPhase::Complete, 1.0, "done".to_string());

        assert_eq!(
            *seen.borrow(),
            vec![(GenPhase::Terrain, 0), (GenPhase::Complete, 100)]
        );
    }
}
