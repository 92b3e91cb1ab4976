/// Animation and input tuning.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AnimationConfig {
    /// Radians added to the spin angle every frame.
    pub angle_step: f32,
    /// Scale the cube starts at.
    pub initial_scale: f32,
    /// Scale change per key press.
    pub scale_step: f32,
    /// Smallest scale a decrease can reach.
    pub min_scale: f32,
    /// Fold the spin angle into `[0, 2π)` after each step.
    pub wrap_angle: bool,
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self {
            angle_step: 0.01,
            initial_scale: 1.5,
            scale_step: 0.1,
            min_scale: 0.1,
            wrap_angle: true,
        }
    }
}

impl AnimationConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn angle_step(mut self, radians: f32) -> Self {
        self.angle_step = radians;
        self
    }

    /// Starting scale, raised to `min_scale` if below it.
    pub fn initial_scale(mut self, scale: f32) -> Self {
        self.initial_scale = scale.max(self.min_scale);
        self
    }

    pub fn wrap_angle(mut self, wrap: bool) -> Self {
        self.wrap_angle = wrap;
        self
    }
}

/// Configuration for the app window.
#[derive(Clone, Debug, PartialEq)]
pub struct AppConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,
    /// Color the frame is cleared to before drawing.
    pub clear_color: wgpu::Color,
    pub animation: AnimationConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            title: "Colorcube".to_string(),
            width: 600,
            height: 600,
            clear_color: wgpu::Color::BLACK,
            animation: AnimationConfig::default(),
        }
    }
}

impl AppConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Viewport size in pixels. Zero dimensions are raised to one.
    pub fn size(mut self, width: u32, height: u32) -> Self {
        self.width = width.max(1);
        self.height = height.max(1);
        self
    }

    pub fn clear_color(mut self, color: wgpu::Color) -> Self {
        self.clear_color = color;
        self
    }

    pub fn animation(mut self, animation: AnimationConfig) -> Self {
        self.animation = animation;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_reproduce_the_reference_scene() {
        let config = AppConfig::default();
        assert_eq!((config.width, config.height), (600, 600));
        assert_eq!(config.clear_color, wgpu::Color::BLACK);
        assert_eq!(config.animation.angle_step, 0.01);
        assert_eq!(config.animation.initial_scale, 1.5);
        assert_eq!(config.animation.scale_step, 0.1);
        assert_eq!(config.animation.min_scale, 0.1);
        assert!(config.animation.wrap_angle);
    }

    #[test]
    fn builder_overrides_fields() {
        let config = AppConfig::new()
            .title("Spin")
            .size(800, 0)
            .animation(AnimationConfig::new().angle_step(0.05).wrap_angle(false));
        assert_eq!(config.title, "Spin");
        assert_eq!((config.width, config.height), (800, 1));
        assert_eq!(config.animation.angle_step, 0.05);
        assert!(!config.animation.wrap_angle);
    }

    #[test]
    fn initial_scale_respects_the_floor() {
        assert_eq!(AnimationConfig::new().initial_scale(0.01).initial_scale, 0.1);
        assert_eq!(AnimationConfig::new().initial_scale(4.0).initial_scale, 4.0);
    }
}
