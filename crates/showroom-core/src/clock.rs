//! # Frame Clock
//!
//! The single time base of the engine. Every timed subsystem derives its
//! delta from the tick produced here, so pausing the clock pauses all of them.
//!
//! Large gaps between frames (for example a backgrounded tab) are passed
//! through unchanged; there is no lag smoothing.

/// One frame's worth of time.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct FrameTick {
    /// Sequential frame number, starting at 1 for the first tick.
    pub frame: u64,
    /// Clock time after this tick, in seconds.
    pub time: f64,
    /// Seconds elapsed since the previous tick.
    pub delta: f64,
}

/// Work scheduled against clock time rather than wall time.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum DeferredCall {
    /// Recompute every trigger range (post-load layout correction).
    RefreshTriggers,
}

#[derive(Clone, Debug, Default)]
pub struct FrameClock {
    time: f64,
    frame: u64,
    paused: bool,
    last_timestamp: Option<f64>,
    deferred: Vec<(f64, DeferredCall)>,
}

impl FrameClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Advances the clock by `delta` seconds.
    ///
    /// Returns `None` while paused. Negative or non-finite deltas count as zero.
    pub fn tick(&mut self, delta: f64) -> Option<FrameTick> {
        if self.paused {
            return None;
        }
        let delta = if delta.is_finite() { delta.max(0.0) } else { 0.0 };
        self.time += delta;
        self.frame += 1;
        Some(FrameTick {
            frame: self.frame,
            time: self.time,
            delta,
        })
    }

    /// Advances the clock to a host timestamp (seconds), deriving the delta
    /// from the previous timestamp. The first call yields a zero delta.
    pub fn tick_at(&mut self, timestamp: f64) -> Option<FrameTick> {
        if self.paused {
            return None;
        }
        let delta = match self.last_timestamp {
            Some(last) => timestamp - last,
            None => 0.0,
        };
        self.last_timestamp = Some(timestamp);
        self.tick(delta)
    }

    pub fn pause(&mut self) {
        self.paused = true;
    }

    /// Resumes ticking. Time spent paused is not replayed.
    pub fn resume(&mut self) {
        self.paused = false;
        self.last_timestamp = None;
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// Seconds of clock time elapsed since creation.
    pub fn elapsed(&self) -> f64 {
        self.time
    }

    pub fn frame(&self) -> u64 {
        self.frame
    }

    /// Schedules `call` to become due `delay` seconds of clock time from now.
    pub fn defer(&mut self, delay: f64, call: DeferredCall) {
        let delay = if delay.is_finite() { delay.max(0.0) } else { 0.0 };
        self.deferred.push((self.time + delay, call));
    }

    /// Removes and returns every deferred call that is now due, in schedule order.
    pub fn take_due(&mut self) -> Vec<DeferredCall> {
        let now = self.time;
        let mut due = Vec::new();
        self.deferred.retain(|(at, call)| {
            if *at <= now {
                due.push(*call);
                false
            } else {
                true
            }
        });
        due
    }

    /// Drops every pending deferred call.
    pub fn cancel_deferred(&mut self) {
        self.deferred.clear();
    }
}
