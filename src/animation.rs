use std::f32::consts::TAU;

/// Mutable per-run animation values.
///
/// Two writers, one field each: the frame driver advances `angle`, the input
/// handler changes `scale`. Both run on the event loop thread, so plain
/// `&mut` access is enough.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AnimationState {
    angle: f32,
    scale: f32,
}

impl Default for AnimationState {
    fn default() -> Self {
        Self {
            angle: 0.0,
            scale: 1.5,
        }
    }
}

impl AnimationState {
    pub fn new(angle: f32, scale: f32) -> Self {
        Self { angle, scale }
    }

    /// Rotation about the Y axis, in radians.
    pub fn angle(&self) -> f32 {
        self.angle
    }

    /// Uniform scale factor.
    pub fn scale(&self) -> f32 {
        self.scale
    }

    /// Advances the angle by `step` radians.
    ///
    /// With `wrap` the result is folded into `[0, 2π)`. Rotation is periodic,
    /// so this only keeps the float small over long runs.
    pub fn advance(&mut self, step: f32, wrap: bool) {
        self.angle += step;
        if wrap {
            self.angle = self.angle.rem_euclid(TAU);
        }
    }

    pub(crate) fn set_scale(&mut self, scale: f32) {
        self.scale = scale;
    }
}
