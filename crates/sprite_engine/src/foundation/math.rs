//! Math utilities and types
//!
//! Provides fundamental math types for 2D rendering and screen-space
//! geometry. All coordinates are screen space: the Y axis grows downward,
//! so a rectangle's "top" edge has the smaller Y value.

pub use nalgebra::{Matrix4, Vector2, Vector3, Vector4};

/// 2D vector type
pub type Vec2 = Vector2<f32>;

/// 3D vector type
pub type Vec3 = Vector3<f32>;

/// 4D vector type
pub type Vec4 = Vector4<f32>;

/// 4x4 matrix type
pub type Mat4 = Matrix4<f32>;

/// Axis-aligned rectangle in screen space
///
/// Width and height are expected to be non-negative; [`Rectangle::intersects`]
/// does not produce meaningful results for degenerate rectangles.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rectangle {
    /// X coordinate of the left edge
    pub x: f32,
    /// Y coordinate of the top edge (screen space, Y grows downward)
    pub y: f32,
    /// Width of the rectangle
    pub width: f32,
    /// Height of the rectangle
    pub height: f32,
}

impl Rectangle {
    /// Create a new rectangle
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self { x, y, width, height }
    }

    /// Left edge (same as `x`)
    pub fn left(&self) -> f32 {
        self.x
    }

    /// Right edge (`x + width`)
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    /// Top edge (same as `y`; screen space, Y grows downward)
    pub fn top(&self) -> f32 {
        self.y
    }

    /// Bottom edge (`y + height`)
    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    /// Strict overlap test
    ///
    /// Rectangles that merely touch along an edge do NOT count as
    /// intersecting; the comparison is strict on both axes.
    pub fn intersects(&self, other: &Rectangle) -> bool {
        let left = self.left().max(other.left());
        let right = self.right().min(other.right());
        let top = self.top().max(other.top());
        let bottom = self.bottom().min(other.bottom());
        left < right && top < bottom
    }
}

/// RGBA color with normalized float components
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    /// Red component in `[0, 1]`
    pub r: f32,
    /// Green component in `[0, 1]`
    pub g: f32,
    /// Blue component in `[0, 1]`
    pub b: f32,
    /// Alpha component in `[0, 1]`
    pub a: f32,
}

impl Color {
    /// Opaque white
    pub const WHITE: Color = Color { r: 1.0, g: 1.0, b: 1.0, a: 1.0 };

    /// Opaque black
    pub const BLACK: Color = Color { r: 0.0, g: 0.0, b: 0.0, a: 1.0 };

    /// Create a color with explicit alpha
    pub fn rgba(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Create an opaque color (alpha = 1)
    pub fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    /// Components as a vec4 for uniform upload
    pub fn to_vec4(self) -> Vec4 {
        Vec4::new(self.r, self.g, self.b, self.a)
    }
}
