//! 2D camera with view/projection transforms
//!
//! Pure value type: no GPU state, no side effects beyond its own fields.
//! The projection is orthographic screen space with Y growing downward
//! (left 0, right width, top 0, bottom height).

use crate::foundation::math::{Mat4, Vec2, Vec3};

/// Near/far planes of the orthographic projection; generous so layer depth
/// never clips sprites
const DEPTH_RANGE: f32 = 9999.0;

/// 2D camera
///
/// The position is stored negated and pre-scaled by zoom so the view
/// matrix only needs a translation; [`Camera::position`] inverts this back.
/// Rotation and zoom apply around `position + origin` in view space.
#[derive(Debug, Clone)]
pub struct Camera {
    position: Vec2,
    origin: Vec2,
    rotation: f32,
    zoom: f32,
    width: f32,
    height: f32,
}

impl Camera {
    /// Create a camera for a viewport of the given size
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            position: Vec2::zeros(),
            origin: Vec2::zeros(),
            rotation: 0.0,
            zoom: 1.0,
            width,
            height,
        }
    }

    /// World position the camera looks from
    pub fn position(&self) -> Vec2 {
        -self.position / self.zoom
    }

    /// Move the camera; stored pre-negated and scaled by the current zoom
    pub fn set_position(&mut self, position: Vec2) {
        self.position = -position * self.zoom;
    }

    /// Pivot offset added into the view translation
    pub fn origin(&self) -> Vec2 {
        self.origin
    }

    /// Set the pivot offset (e.g. half the viewport to rotate around center)
    pub fn set_origin(&mut self, origin: Vec2) {
        self.origin = origin;
    }

    /// Rotation in degrees
    pub fn rotation(&self) -> f32 {
        self.rotation
    }

    /// Set rotation in degrees
    pub fn set_rotation(&mut self, rotation: f32) {
        self.rotation = rotation;
    }

    /// Uniform zoom factor
    pub fn zoom(&self) -> f32 {
        self.zoom
    }

    /// Set the uniform zoom factor (expected >= 0)
    pub fn set_zoom(&mut self, zoom: f32) {
        self.zoom = zoom;
    }

    /// Viewport width in pixels; only affects the projection
    pub fn width(&self) -> f32 {
        self.width
    }

    /// Set the viewport width
    pub fn set_width(&mut self, width: f32) {
        self.width = width;
    }

    /// Viewport height in pixels; only affects the projection
    pub fn height(&self) -> f32 {
        self.height
    }

    /// Set the viewport height
    pub fn set_height(&mut self, height: f32) {
        self.height = height;
    }

    /// View matrix: translate(position + origin) * rotate_z * scale(zoom)
    pub fn view_matrix(&self) -> Mat4 {
        let translation = self.position + self.origin;
        Mat4::new_translation(&Vec3::new(translation.x, translation.y, 0.0))
            * Mat4::new_rotation(Vec3::new(0.0, 0.0, self.rotation.to_radians()))
            * Mat4::new_nonuniform_scaling(&Vec3::new(self.zoom, self.zoom, 1.0))
    }

    /// Orthographic projection in Y-down screen space
    pub fn projection_matrix(&self) -> Mat4 {
        // bottom = height, top = 0 flips Y into screen space
        Mat4::new_orthographic(0.0, self.width, self.height, 0.0, -DEPTH_RANGE, DEPTH_RANGE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn position_round_trips_under_zoom() {
        for zoom in [0.5, 1.0, 2.0, 3.75] {
            let mut camera = Camera::new(800.0, 600.0);
            camera.set_zoom(zoom);
            camera.set_position(Vec2::new(123.0, -45.5));

            let p = camera.position();
            assert_relative_eq!(p.x, 123.0, epsilon = 1e-4);
            assert_relative_eq!(p.y, -45.5, epsilon = 1e-4);
        }
    }

    #[test]
    fn identity_camera_view_is_identity() {
        let camera = Camera::new(800.0, 600.0);
        assert_relative_eq!(camera.view_matrix(), Mat4::identity(), epsilon = 1e-6);
    }

    #[test]
    fn view_translates_by_negated_position() {
        let mut camera = Camera::new(800.0, 600.0);
        camera.set_position(Vec2::new(10.0, 20.0));

        let view = camera.view_matrix();
        // Stored position is -p * zoom, so the translation column is negated
        assert_relative_eq!(view[(0, 3)], -10.0, epsilon = 1e-5);
        assert_relative_eq!(view[(1, 3)], -20.0, epsilon = 1e-5);
    }

    #[test]
    fn projection_maps_screen_corners() {
        let camera = Camera::new(800.0, 600.0);
        let proj = camera.projection_matrix();

        // Top-left of the screen lands at NDC (-1, 1), bottom-right at (1, -1)
        let top_left = proj * nalgebra::Vector4::new(0.0, 0.0, 0.0, 1.0);
        let bottom_right = proj * nalgebra::Vector4::new(800.0, 600.0, 0.0, 1.0);
        assert_relative_eq!(top_left.x, -1.0, epsilon = 1e-5);
        assert_relative_eq!(top_left.y, 1.0, epsilon = 1e-5);
        assert_relative_eq!(bottom_right.x, 1.0, epsilon = 1e-5);
        assert_relative_eq!(bottom_right.y, -1.0, epsilon = 1e-5);
    }

    #[test]
    fn viewport_resize_leaves_view_untouched() {
        let mut camera = Camera::new(800.0, 600.0);
        camera.set_position(Vec2::new(5.0, 5.0));
        let view_before = camera.view_matrix();

        camera.set_width(1920.0);
        camera.set_height(1080.0);
        assert_eq!(camera.view_matrix(), view_before);
    }
}
