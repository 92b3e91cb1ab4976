use winit::event::{ElementState, WindowEvent};
use winit::keyboard::Key;

use crate::animation::AnimationState;
use crate::config::AnimationConfig;

/// The two key commands the cube reacts to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ScaleKey {
    /// Grow the cube (`A`).
    Increase,
    /// Shrink the cube, down to the floor (`D`).
    Decrease,
}

impl ScaleKey {
    /// Maps a logical key to a command. Case-insensitive; everything else is ignored.
    pub fn from_key(key: &Key) -> Option<Self> {
        match key {
            Key::Character(s) => match s.as_str() {
                "a" | "A" => Some(ScaleKey::Increase),
                "d" | "D" => Some(ScaleKey::Decrease),
                _ => None,
            },
            _ => None,
        }
    }

    /// Maps a key event to a command. Only real presses count: releases and
    /// the presses winit synthesizes for keys already held when the window
    /// gains focus are ignored.
    pub fn from_press(state: ElementState, key: &Key, is_synthetic: bool) -> Option<Self> {
        if state != ElementState::Pressed || is_synthetic {
            return None;
        }
        Self::from_key(key)
    }
}

/// Applies scale commands to an [`AnimationState`].
///
/// Only ever writes `scale`. Increases are unbounded; decreases clamp at
/// `min_scale`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScaleControl {
    step: f32,
    min_scale: f32,
}

impl Default for ScaleControl {
    fn default() -> Self {
        Self::from_config(&AnimationConfig::default())
    }
}

impl ScaleControl {
    pub fn new(step: f32, min_scale: f32) -> Self {
        Self { step, min_scale }
    }

    pub fn from_config(config: &AnimationConfig) -> Self {
        Self::new(config.scale_step, config.min_scale)
    }

    /// Applies one command and returns the new scale.
    pub fn apply(&self, key: ScaleKey, anim: &mut AnimationState) -> f32 {
        let scale = match key {
            ScaleKey::Increase => anim.scale() + self.step,
            ScaleKey::Decrease => (anim.scale() - self.step).max(self.min_scale),
        };
        anim.set_scale(scale);
        scale
    }

    /// Processes a window event. Returns `true` if it changed the scale.
    ///
    /// Key-repeat presses count as separate presses; releases and synthetic
    /// presses are ignored.
    pub fn handle_event(&self, event: &WindowEvent, anim: &mut AnimationState) -> bool {
        let WindowEvent::KeyboardInput {
            event,
            is_synthetic,
            ..
        } = event
        else {
            return false;
        };
        let Some(key) = ScaleKey::from_press(event.state, &event.logical_key, *is_synthetic) else {
            return false;
        };
        let scale = self.apply(key, anim);
        log::debug!("{:?}: scale = {:.2}", key, scale);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use winit::keyboard::NamedKey;

    fn key(s: &str) -> Key {
        Key::Character(s.into())
    }

    #[test]
    fn a_and_d_map_in_either_case() {
        assert_eq!(ScaleKey::from_key(&key("a")), Some(ScaleKey::Increase));
        assert_eq!(ScaleKey::from_key(&key("A")), Some(ScaleKey::Increase));
        assert_eq!(ScaleKey::from_key(&key("d")), Some(ScaleKey::Decrease));
        assert_eq!(ScaleKey::from_key(&key("D")), Some(ScaleKey::Decrease));
    }

    #[test]
    fn other_keys_are_ignored() {
        assert_eq!(ScaleKey::from_key(&key("w")), None);
        assert_eq!(ScaleKey::from_key(&key("ad")), None);
        assert_eq!(ScaleKey::from_key(&Key::Named(NamedKey::ArrowUp)), None);
        assert_eq!(ScaleKey::from_key(&Key::Named(NamedKey::Space)), None);
    }

    #[test]
    fn only_real_presses_count() {
        let a = key("a");
        assert_eq!(
            ScaleKey::from_press(ElementState::Pressed, &a, false),
            Some(ScaleKey::Increase)
        );
        assert_eq!(ScaleKey::from_press(ElementState::Released, &a, false), None);
        assert_eq!(ScaleKey::from_press(ElementState::Pressed, &a, true), None);
    }

    #[test]
    fn decrease_floors_at_min_scale() {
        let control = ScaleControl::default();
        let mut anim = AnimationState::new(0.0, 1.5);
        for _ in 0..20 {
            control.apply(ScaleKey::Decrease, &mut anim);
            assert!(anim.scale() >= 0.1);
        }
        assert!((anim.scale() - 0.1).abs() < 1e-6);
    }

    #[test]
    fn increase_is_additive() {
        let control = ScaleControl::default();
        let mut anim = AnimationState::new(0.0, 1.5);
        for _ in 0..5 {
            control.apply(ScaleKey::Increase, &mut anim);
        }
        assert!((anim.scale() - 2.0).abs() < 1e-5);
    }

    #[test]
    fn increase_has_no_ceiling() {
        let control = ScaleControl::default();
        let mut anim = AnimationState::new(0.0, 1.5);
        for _ in 0..1000 {
            control.apply(ScaleKey::Increase, &mut anim);
        }
        assert!(anim.scale() > 100.0);
    }

    #[test]
    fn apply_leaves_angle_alone() {
        let control = ScaleControl::new(0.5, 0.25);
        let mut anim = AnimationState::new(1.25, 1.0);
        control.apply(ScaleKey::Decrease, &mut anim);
        control.apply(ScaleKey::Decrease, &mut anim);
        assert_eq!(anim.angle(), 1.25);
        assert_eq!(anim.scale(), 0.25);
    }

    #[test]
    fn non_keyboard_events_are_ignored() {
        let control = ScaleControl::default();
        let mut anim = AnimationState::default();
        assert!(!control.handle_event(&WindowEvent::Focused(true), &mut anim));
        assert_eq!(anim, AnimationState::default());
    }
}
