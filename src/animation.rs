//! Scalar animations driven by explicit frame ticks.

use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Easing {
    Linear,
    /// Smoothstep: slow at both ends.
    EaseInOut,
}

impl Easing {
    /// Maps linear progress in `0..=1` to eased progress.
    pub fn apply(self, t: f64) -> f64 {
        match self {
            Easing::Linear => t,
            Easing::EaseInOut => t * t * (3. - 2. * t),
        }
    }
}

/// Duration and easing of a tween.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TweenSpec {
    pub duration: Duration,
    pub easing: Easing,
}

impl TweenSpec {
    pub fn new(duration: Duration, easing: Easing) -> TweenSpec {
        TweenSpec { duration, easing }
    }
}

impl Default for TweenSpec {
    fn default() -> Self {
        TweenSpec {
            duration: Duration::from_millis(500),
            easing: Easing::EaseInOut,
        }
    }
}

/// A scalar that animates toward a target.
///
/// Retargeting while running starts a new animation from the current value.
#[derive(Debug, Clone)]
pub struct Tween {
    spec: TweenSpec,
    from: f64,
    target: f64,
    value: f64,
    elapsed: Duration,
    running: bool,
}

impl Tween {
    /// Creates a tween at rest at `value`.
    pub fn new(value: f64, spec: TweenSpec) -> Tween {
        Tween {
            spec,
            from: value,
            target: value,
            value,
            elapsed: Duration::from_secs(0),
            running: false,
        }
    }

    /// Creates a tween that starts at `from` and is already heading to `to`.
    pub fn animating(from: f64, to: f64, spec: TweenSpec) -> Tween {
        let mut tween = Tween::new(from, spec);
        tween.animate_to(to);
        tween
    }

    pub fn value(&self) -> f64 {
        self.value
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Sets a new target. Does nothing if it is the current target.
    pub fn animate_to(&mut self, target: f64) {
        if target == self.target {
            return;
        }
        self.from = self.value;
        self.target = target;
        self.elapsed = Duration::from_secs(0);
        self.running = self.value != target;
    }

    /// Advances the animation. Returns `true` on the tick that finishes it.
    pub fn tick(&mut self, dt: Duration) -> bool {
        if !self.running {
            return false;
        }

        self.elapsed += dt;
        if self.elapsed >= self.spec.duration {
            self.value = self.target;
            self.running = false;
            return true;
        }

        let t = self.elapsed.as_secs_f64() / self.spec.duration.as_secs_f64();
        self.value = self.from + (self.target - self.from) * self.spec.easing.apply(t);
        false
    }
}
