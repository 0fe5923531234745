//! Sprite-sheet animation
//!
//! Timelines come from one of two JSON description schemas (the engine's
//! own grid format, or a tool export in the Aseprite style); both converge
//! to the same [`Animation`]/[`AnimationFrame`] representation, and the
//! [`AnimationPlayer`] does not care which schema produced it.

pub mod atlas;
pub mod description;
pub mod player;

pub use description::{Description, DescriptionError, DescriptionSchema};
pub use player::AnimationPlayer;

use crate::foundation::math::Rectangle;

/// One frame of a timeline
#[derive(Debug, Clone, PartialEq)]
pub struct AnimationFrame {
    /// Index of the sprite-sheet region this frame shows
    pub region_index: usize,
    /// How long the frame stays on screen, in seconds
    pub delay: f32,
    /// Source sub-rectangle within the sheet, in pixels from the top-left
    pub source: Rectangle,
}

/// A named, ordered sequence of frames
///
/// Owned exclusively by the [`AnimationPlayer`] that parsed it, keyed by
/// name.
#[derive(Debug, Clone, PartialEq)]
pub struct Animation {
    name: String,
    frames: Vec<AnimationFrame>,
}

impl Animation {
    /// Build an animation from its frames
    pub fn new(name: impl Into<String>, frames: Vec<AnimationFrame>) -> Self {
        Self { name: name.into(), frames }
    }

    /// The animation's name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// All frames in playback order
    pub fn frames(&self) -> &[AnimationFrame] {
        &self.frames
    }

    /// A single frame, or `None` past the end
    pub fn frame(&self, index: usize) -> Option<&AnimationFrame> {
        self.frames.get(index)
    }

    /// Number of frames
    pub fn frame_count(&self) -> usize {
        self.frames.len()
    }
}
