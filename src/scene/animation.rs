//! Reveal clocks and easing.

use std::time::Duration;

/// Maps an elapsed fraction in `0..=1` to a visual progress fraction.
pub type EasingFn = fn(f32) -> f32;

/// Identity easing: progress equals the elapsed fraction.
pub fn linear(t: f32) -> f32 {
    t
}

/// One-shot clock driving a node's reveal.
///
/// The clock accumulates frame deltas until it passes `duration`, then
/// reports completion exactly once and stops moving. Progress is eased
/// and clamped to `0..=1`, so a reveal never overshoots its geometry.
#[derive(Debug, Clone, Copy)]
pub struct Animation {
    elapsed: Duration,
    duration: Duration,
    easing: EasingFn,
    done: bool,
}

impl Animation {
    /// Creates a linear clock over `duration`.
    pub fn new(duration: Duration) -> Self {
        Self::with_easing(duration, linear)
    }

    /// Creates a clock with a custom easing curve.
    pub fn with_easing(duration: Duration, easing: EasingFn) -> Self {
        Self {
            elapsed: Duration::ZERO,
            duration,
            easing,
            done: false,
        }
    }

    /// Advances the clock by `delta`. Returns `true` exactly when this
    /// call moved the clock past its duration; later calls return
    /// `false` and leave the clock parked.
    pub(crate) fn advance(&mut self, delta: Duration) -> bool {
        if self.done {
            return false;
        }
        self.elapsed += delta;
        if self.elapsed > self.duration {
            self.done = true;
            return true;
        }
        false
    }

    /// Eased progress in `0..=1`. A finished clock reports exactly `1`.
    pub fn progress(&self) -> f32 {
        if self.done || self.duration.is_zero() {
            return 1.0;
        }
        let fraction = (self.elapsed.as_secs_f32() / self.duration.as_secs_f32()).min(1.0);
        (self.easing)(fraction).clamp(0.0, 1.0)
    }

    /// Whether the clock has fired its completion.
    pub fn is_done(&self) -> bool {
        self.done
    }
}
