//! # Sprite Engine
//!
//! A small real-time 2D rendering and scene-composition layer for games.
//!
//! ## Features
//!
//! - **Batched Drawing**: Stateful immediate-mode drawer that minimizes
//!   texture and shader rebinds across successive draw calls
//! - **GPU Resource Handles**: Shaders with cached uniform lookups, textures,
//!   offscreen render targets
//! - **Sprite Animation**: Sprite-sheet timelines loaded from a grid schema
//!   or a tool-export (Aseprite-style) schema
//! - **Scene Graph**: Parent-child transform propagation with per-node
//!   behavior additions (swept-AABB physics movement)
//!
//! The engine does not own a window, a main loop, or the device-level
//! graphics API. The host supplies delta time and a [`render::GraphicsDevice`]
//! implementation; the core issues draw commands through that boundary.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use sprite_engine::prelude::*;
//!
//! # fn device() -> Box<dyn GraphicsDevice> { unimplemented!() }
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let mut ctx = RenderContext::new(device(), 1280, 720)?;
//!     let camera = Camera::new(1280.0, 720.0);
//!
//!     // per frame, driven by the host loop:
//!     ctx.clear_background(Color::rgb(0.2, 0.3, 0.3));
//!     ctx.draw_rectangle(&camera, Rectangle::new(16.0, 16.0, 64.0, 64.0),
//!                        Color::rgb(1.0, 0.5, 0.2), 0.0);
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]

pub mod foundation;
pub mod core;
pub mod render;
pub mod animation;
pub mod physics;
pub mod scene;
pub mod assets;

/// Common imports for engine users
pub mod prelude {
    pub use crate::{
        foundation::math::{Color, Rectangle, Vec2},
        foundation::time::{FixedTimestep, Timer},
        core::config::EngineConfig,
        render::{
            Camera, DrawTextureParams, GraphicsDevice, RenderContext, RenderError,
            RenderTarget, Shader, Texture,
        },
        animation::{Animation, AnimationFrame, AnimationPlayer},
        physics::{Aabb, PhysicalBody},
        scene::{
            Addition, AdditionKind, MissingAdditionError, Node, NodeKey, Scene, SpriteVisual,
            Visual,
        },
        assets::{AssetError, AssetManager},
    };
}
