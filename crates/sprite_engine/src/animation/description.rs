//! Animation description parsing
//!
//! Two JSON schemas are accepted, detected by the presence of a top-level
//! `meta` key:
//!
//! - **Grid**: the engine's own format. A texture name plus explicit cell
//!   dimensions; regions are generated row-major across the sheet and each
//!   named animation lists `{index, delay}` pairs (delay in seconds).
//! - **Tool export** (Aseprite-style): an ordered `frames` map whose order
//!   defines frame indices, per-frame pixel bounds and durations in
//!   milliseconds, and `meta.frameTags` naming contiguous `[from, to]`
//!   ranges. The `meta.image` texture path is relative to the description
//!   file's own directory.
//!
//! Both shapes converge to the same [`Animation`] representation.

use std::collections::HashMap;
use std::path::PathBuf;

use serde::Deserialize;
use thiserror::Error;

use crate::animation::{atlas, Animation, AnimationFrame};
use crate::foundation::math::Rectangle;

/// Errors from reading or interpreting a description
#[derive(Debug, Error)]
pub enum DescriptionError {
    /// Description file missing or unreadable
    #[error("failed to read animation description {path:?}: {source}")]
    Io {
        /// Path of the description file
        path: PathBuf,
        /// IO error
        #[source]
        source: std::io::Error,
    },

    /// Not valid JSON, or a required field is missing or mistyped
    /// (serde names the field in its message)
    #[error("malformed animation description: {0}")]
    Parse(#[from] serde_json::Error),

    /// A grid animation references a region index past the generated grid
    #[error("animation {name:?} references region {index} but the grid only has {region_count}")]
    RegionOutOfBounds {
        /// Animation name
        name: String,
        /// Offending region index
        index: usize,
        /// Number of generated regions
        region_count: usize,
    },

    /// A frame tag's `[from, to]` range does not fit the frame array
    #[error("tag {name:?} spans frames {from}..={to} but only {frame_count} frames exist")]
    InvalidFrameRange {
        /// Tag name
        name: String,
        /// First frame index
        from: usize,
        /// Last frame index (inclusive)
        to: usize,
        /// Number of frames in the description
        frame_count: usize,
    },

    /// Texture referenced by the description failed to load
    #[error(transparent)]
    Texture(#[from] crate::assets::AssetError),
}

/// Which schema a description was written in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DescriptionSchema {
    /// The engine's own grid format
    Grid,
    /// External sprite-editor export
    ToolExport,
}

#[derive(Debug, Deserialize)]
struct GridDescription {
    texture: String,
    width: u32,
    height: u32,
    animations: HashMap<String, Vec<GridFrameRef>>,
}

#[derive(Debug, Deserialize)]
struct GridFrameRef {
    index: usize,
    delay: f32,
}

#[derive(Debug, Deserialize)]
struct ToolExportDescription {
    /// Ordered map: insertion order defines frame indices 0..N-1
    frames: serde_json::Map<String, serde_json::Value>,
    meta: ToolExportMeta,
}

#[derive(Debug, Deserialize)]
struct ToolExportMeta {
    image: String,
    #[serde(rename = "frameTags", default)]
    frame_tags: Vec<FrameTag>,
}

#[derive(Debug, Deserialize)]
struct FrameTag {
    name: String,
    from: usize,
    to: usize,
}

#[derive(Debug, Deserialize)]
struct ToolFrame {
    frame: ToolFrameBounds,
    /// Display duration in milliseconds
    duration: f32,
}

#[derive(Debug, Deserialize)]
struct ToolFrameBounds {
    x: f32,
    y: f32,
    w: f32,
    h: f32,
}

/// A parsed description, not yet resolved against a texture
#[derive(Debug)]
pub struct Description {
    schema: Schema,
}

#[derive(Debug)]
enum Schema {
    Grid(GridDescription),
    ToolExport(ToolExportDescription),
}

impl Description {
    /// Parse a description, picking the schema by the `meta` key
    pub fn parse(text: &str) -> Result<Self, DescriptionError> {
        let value: serde_json::Value = serde_json::from_str(text)?;
        let schema = if value.get("meta").is_some() {
            Schema::ToolExport(serde_json::from_value(value)?)
        } else {
            Schema::Grid(serde_json::from_value(value)?)
        };
        Ok(Self { schema })
    }

    /// The schema this description was written in
    pub fn schema(&self) -> DescriptionSchema {
        match &self.schema {
            Schema::Grid(_) => DescriptionSchema::Grid,
            Schema::ToolExport(_) => DescriptionSchema::ToolExport,
        }
    }

    /// The texture reference as written in the file
    ///
    /// Grid references resolve under the sprite root; tool-export
    /// references are relative to the description file's directory.
    pub fn texture_ref(&self) -> &str {
        match &self.schema {
            Schema::Grid(grid) => &grid.texture,
            Schema::ToolExport(export) => &export.meta.image,
        }
    }

    /// Resolve the description into animations
    ///
    /// The texture dimensions drive region generation for the grid schema;
    /// the tool-export schema carries explicit pixel bounds and ignores
    /// them.
    pub fn build_animations(
        &self,
        texture_width: u32,
        texture_height: u32,
    ) -> Result<HashMap<String, Animation>, DescriptionError> {
        match &self.schema {
            Schema::Grid(grid) => grid.build(texture_width, texture_height),
            Schema::ToolExport(export) => export.build(),
        }
    }
}

impl GridDescription {
    fn build(
        &self,
        texture_width: u32,
        texture_height: u32,
    ) -> Result<HashMap<String, Animation>, DescriptionError> {
        let regions = atlas::grid_regions(texture_width, texture_height, self.width, self.height);

        let mut animations = HashMap::new();
        for (name, refs) in &self.animations {
            let mut frames = Vec::with_capacity(refs.len());
            for frame_ref in refs {
                let source = regions.get(frame_ref.index).copied().ok_or_else(|| {
                    DescriptionError::RegionOutOfBounds {
                        name: name.clone(),
                        index: frame_ref.index,
                        region_count: regions.len(),
                    }
                })?;
                frames.push(AnimationFrame {
                    region_index: frame_ref.index,
                    delay: frame_ref.delay,
                    source,
                });
            }
            animations.insert(name.clone(), Animation::new(name.clone(), frames));
        }
        Ok(animations)
    }
}

impl ToolExportDescription {
    fn build(&self) -> Result<HashMap<String, Animation>, DescriptionError> {
        // The map's insertion order defines the frame indices
        let mut all_frames = Vec::with_capacity(self.frames.len());
        for value in self.frames.values() {
            let frame: ToolFrame = serde_json::from_value(value.clone())?;
            all_frames.push(frame);
        }

        let mut animations = HashMap::new();
        for tag in &self.meta.frame_tags {
            if tag.to < tag.from || tag.to >= all_frames.len() {
                return Err(DescriptionError::InvalidFrameRange {
                    name: tag.name.clone(),
                    from: tag.from,
                    to: tag.to,
                    frame_count: all_frames.len(),
                });
            }

            let frames = (tag.from..=tag.to)
                .map(|index| {
                    let frame = &all_frames[index];
                    AnimationFrame {
                        region_index: index,
                        delay: frame.duration / 1000.0,
                        source: Rectangle::new(
                            frame.frame.x,
                            frame.frame.y,
                            frame.frame.w,
                            frame.frame.h,
                        ),
                    }
                })
                .collect();

            log::debug!(
                "animation {:?}: frames {} -> {}",
                tag.name,
                tag.from,
                tag.to
            );
            animations.insert(tag.name.clone(), Animation::new(tag.name.clone(), frames));
        }
        Ok(animations)
    }
}
