use glam::Quat;
use serde::{Deserialize, Serialize};

#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub enum Ease {
    Linear,
    #[default]
    InOutSine,
}

impl Ease {
    #[inline]
    pub fn apply(self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Ease::Linear => t,
            Ease::InOutSine => -((core::f32::consts::PI * t).cos() - 1.0) * 0.5,
        }
    }
}

/// Time accumulator advanced by the tick loop.
#[derive(Copy, Clone, Debug)]
pub struct Tween { pub elapsed: f32, pub duration: f32, pub ease: Ease }

impl Tween {
    pub fn new(duration: f32, ease: Ease) -> Self { Self { elapsed: 0.0, duration, ease } }
    /// Advances and returns the eased progress in [0, 1].
    pub fn step(&mut self, dt: f32) -> f32 {
        self.elapsed += dt;
        self.progress()
    }
    #[inline] pub fn raw(&self) -> f32 { if self.duration <= 0.0 { 1.0 } else { (self.elapsed / self.duration).min(1.0) } }
    #[inline] pub fn progress(&self) -> f32 { self.ease.apply(self.raw()) }
    #[inline] pub fn done(&self) -> bool { self.raw() >= 1.0 }
}

/// Linear rotation blend; stops updating once the duration has elapsed.
#[derive(Copy, Clone, Debug)]
pub struct RotationTween { pub from: Quat, pub to: Quat, pub elapsed: f32, pub duration: f32 }

impl RotationTween {
    pub fn new(from: Quat, to: Quat, duration: f32) -> Self { Self { from, to, elapsed: 0.0, duration } }
    /// `None` once finished.
    pub fn step(&mut self, dt: f32) -> Option<Quat> {
        self.elapsed += dt;
        let t = if self.duration > 0.0 { self.elapsed / self.duration } else { 1.0 };
        (t < 1.0).then(|| self.from.lerp(self.to, t))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    #[test] fn sine_endpoints() {
        assert!(Ease::InOutSine.apply(0.0).abs() < 1e-6);
        assert!((Ease::InOutSine.apply(0.5) - 0.5).abs() < 1e-6);
        assert!((Ease::InOutSine.apply(1.0) - 1.0).abs() < 1e-6);
    }
    #[test] fn tween_completes() {
        let mut t = Tween::new(0.5, Ease::InOutSine);
        for _ in 0..4 { t.step(0.1); }
        assert!(!t.done());
        t.step(0.2);
        assert!(t.done());
        assert_eq!(t.progress(), 1.0);
    }
    #[test] fn zero_duration_is_done() { assert!(Tween::new(0.0, Ease::Linear).done()); }
}
