/// Cubic Bezier animation of transform parameters
use std::time::Instant;

use log::debug;

use crate::error::{Error, Result};
use crate::transform::{Mat4, RotationState, Transform};
use crate::vector::Vec3;

/// Cubic Bezier point at `t`
pub fn bezier(p0: &Vec3, p1: &Vec3, p2: &Vec3, p3: &Vec3, t: f32) -> Vec3 {
    let u = 1.0 - t;
    p0 * (u * u * u) + p1 * (3.0 * u * u * t) + p2 * (3.0 * u * t * t) + p3 * (t * t * t)
}

/// One-dimensional cubic Bezier with fixed endpoints 0 and 1
fn bezier_scalar(c1: f32, c2: f32, t: f32) -> f32 {
    let u = 1.0 - t;
    3.0 * u * u * t * c1 + 3.0 * u * t * t * c2 + t * t * t
}

pub fn ease_in(t: f32) -> f32 {
    bezier_scalar(0.0, 0.5, t)
}

pub fn ease_out(t: f32) -> f32 {
    bezier_scalar(0.5, 1.0, t)
}

pub fn ease_in_out(t: f32) -> f32 {
    bezier_scalar(0.0, 1.0, t)
}

/// Remap of progress applied before sampling the curve
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Easing {
    #[default]
    Linear,
    EaseIn,
    EaseOut,
    EaseInOut,
}

impl Easing {
    pub fn apply(self, t: f32) -> f32 {
        match self {
            Easing::Linear => t,
            Easing::EaseIn => ease_in(t),
            Easing::EaseOut => ease_out(t),
            Easing::EaseInOut => ease_in_out(t),
        }
    }
}

/// Source of monotonically non-decreasing time in seconds
pub trait Clock {
    fn now(&self) -> f32;
}

/// Wall clock measured from its creation
#[derive(Debug, Clone, Copy)]
pub struct SystemClock {
    origin: Instant,
}

impl SystemClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn now(&self) -> f32 {
        self.origin.elapsed().as_secs_f32()
    }
}

/// Clock advanced by hand, for offline rendering and tests
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ManualClock {
    time: f32,
}

impl ManualClock {
    pub fn new(time: f32) -> Self {
        Self { time }
    }

    /// Move forward by `delta` seconds; negative steps are ignored
    pub fn advance(&mut self, delta: f32) {
        self.time += delta.max(0.0);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> f32 {
        self.time
    }
}

/// A cubic Bezier path traversed over `duration` seconds
#[derive(Debug, Clone, PartialEq)]
pub struct BezierAnimation {
    pub p0: Vec3,
    pub p1: Vec3,
    pub p2: Vec3,
    pub p3: Vec3,
    duration: f32,
    pub start_time: f32,
    pub looping: bool,
    pub easing: Easing,
}

impl BezierAnimation {
    /// `duration` must be positive and finite
    pub fn new(
        points: [Vec3; 4],
        duration: f32,
        start_time: f32,
        looping: bool,
    ) -> Result<Self> {
        if !(duration.is_finite() && duration > 0.0) {
            return Err(Error::InvalidDuration(duration));
        }
        let [p0, p1, p2, p3] = points;
        Ok(Self {
            p0,
            p1,
            p2,
            p3,
            duration,
            start_time,
            looping,
            easing: Easing::Linear,
        })
    }

    pub fn with_easing(mut self, easing: Easing) -> Self {
        self.easing = easing;
        self
    }

    pub fn duration(&self) -> f32 {
        self.duration
    }

    /// Normalized progress at `now`: wrapped into [0, 1) when looping,
    /// clamped to [0, 1] otherwise
    pub fn progress(&self, now: f32) -> f32 {
        let t = (now - self.start_time) / self.duration;
        if self.looping {
            t.rem_euclid(1.0)
        } else {
            t.clamp(0.0, 1.0)
        }
    }

    pub fn position(&self, now: f32) -> Vec3 {
        let t = self.easing.apply(self.progress(now));
        bezier(&self.p0, &self.p1, &self.p2, &self.p3, t)
    }

    pub fn is_finished(&self, now: f32) -> bool {
        !self.looping && now - self.start_time >= self.duration
    }

    pub fn restart(&mut self, start_time: f32) {
        self.start_time = start_time;
    }
}

/// An object whose placement may be driven by Bezier animations
#[derive(Debug, Clone, PartialEq)]
pub struct AnimatedObject {
    pub position: Vec3,
    pub rotation: RotationState,
    pub scale: Vec3,
    pub position_animation: Option<BezierAnimation>,
    /// Curve points are Euler angles in radians
    pub rotation_animation: Option<BezierAnimation>,
    pub current_time: f32,
}

impl AnimatedObject {
    pub fn new() -> Self {
        Self {
            position: Vec3::zeros(),
            rotation: RotationState::zero(),
            scale: Vec3::new(1.0, 1.0, 1.0),
            position_animation: None,
            rotation_animation: None,
            current_time: 0.0,
        }
    }

    pub fn set_position_animation(&mut self, animation: BezierAnimation) {
        self.position_animation = Some(animation);
    }

    pub fn set_rotation_animation(&mut self, animation: BezierAnimation) {
        self.rotation_animation = Some(animation);
    }

    /// Advance the local clock and resample any attached animations
    pub fn update(&mut self, delta_time: f32) {
        self.current_time += delta_time;
        if let Some(animation) = &self.position_animation {
            self.position = animation.position(self.current_time);
        }
        if let Some(animation) = &self.rotation_animation {
            self.rotation = RotationState::from_vector(&animation.position(self.current_time));
        }
    }

    /// World matrix `T * R * S`
    pub fn world_matrix(&self) -> Mat4 {
        let translation = Transform::translation(self.position.x, self.position.y, self.position.z);
        let scale = Transform::scale(self.scale.x, self.scale.y, self.scale.z);
        Transform::multiply(&translation, &Transform::multiply(&self.rotation.matrix(), &scale))
    }
}

impl Default for AnimatedObject {
    fn default() -> Self {
        Self::new()
    }
}

/// Restart every attached animation at `sync_time` and align object clocks
pub fn sync_animations(objects: &mut [AnimatedObject], sync_time: f32) {
    for object in objects.iter_mut() {
        object.current_time = sync_time;
        for animation in [&mut object.position_animation, &mut object.rotation_animation]
            .into_iter()
            .flatten()
        {
            animation.restart(sync_time);
        }
    }
    debug!("synchronized {} animated objects at t={}", objects.len(), sync_time);
}
