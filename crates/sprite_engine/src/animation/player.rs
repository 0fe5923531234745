//! Animation playback state machine
//!
//! Two states: stopped and playing. Timelines always loop; there is no
//! one-shot mode. Re-asserting the current animation every tick (an "idle"
//! state machine re-playing "idle" each frame) must not reset the phase, so
//! [`AnimationPlayer::play`] is a strict no-op when the requested animation
//! is already current.

use std::collections::HashMap;
use std::path::Path;

use crate::animation::description::{Description, DescriptionError, DescriptionSchema};
use crate::animation::{Animation, AnimationFrame};
use crate::assets::AssetManager;
use crate::foundation::math::Vec2;
use crate::render::camera::Camera;
use crate::render::context::{DrawTextureParams, RenderContext};
use crate::render::device::GraphicsDevice;
use crate::render::texture::Texture;

/// Sprite-sheet playback: a texture, named timelines, and a playhead
pub struct AnimationPlayer {
    texture: Texture,
    animations: HashMap<String, Animation>,
    schema: DescriptionSchema,
    playing: bool,
    timer: f32,
    current: Option<String>,
    frame_index: usize,
}

impl AnimationPlayer {
    /// Load a JSON description file and its texture
    ///
    /// Grid-schema texture references resolve under the asset manager's
    /// sprite root; tool-export references resolve relative to the
    /// description file's own directory.
    pub fn from_file(
        device: &mut dyn GraphicsDevice,
        assets: &mut AssetManager,
        path: impl AsRef<Path>,
    ) -> Result<Self, DescriptionError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .map_err(|source| DescriptionError::Io { path: path.to_path_buf(), source })?;
        let description = Description::parse(&text)?;

        let texture = match description.schema() {
            DescriptionSchema::Grid => {
                assets.load_texture(device, description.texture_ref())?
            }
            DescriptionSchema::ToolExport => {
                let base = path.parent().unwrap_or_else(|| Path::new(""));
                assets.load_texture_at(device, &base.join(description.texture_ref()))?
            }
        }
        .clone();

        Self::from_description(&description, texture)
    }

    /// Build a player from a parsed description and an already-loaded
    /// texture
    pub fn from_description(
        description: &Description,
        texture: Texture,
    ) -> Result<Self, DescriptionError> {
        let animations = description.build_animations(texture.width(), texture.height())?;
        log::debug!("animation player with {} timeline(s)", animations.len());
        Ok(Self {
            texture,
            animations,
            schema: description.schema(),
            playing: false,
            timer: 0.0,
            current: None,
            frame_index: 0,
        })
    }

    /// Switch to the named animation and start playing from frame 0
    ///
    /// A strict no-op when `name` is already current, whether playing or
    /// stopped. Unknown names are ignored with a warning.
    pub fn play(&mut self, name: &str) {
        if self.current.as_deref() == Some(name) {
            return;
        }
        if !self.animations.contains_key(name) {
            log::warn!("unknown animation {name:?}");
            return;
        }
        self.current = Some(name.to_string());
        self.frame_index = 0;
        self.timer = 0.0;
        self.playing = true;
    }

    /// Stop playback and zero the timer; the frame index stays put
    pub fn stop(&mut self) {
        self.playing = false;
        self.timer = 0.0;
    }

    /// Advance the playhead by `delta` seconds
    ///
    /// No-op unless playing with a live frame. When the timer reaches the
    /// frame's delay it resets and the frame index advances, wrapping past
    /// the last frame.
    pub fn update(&mut self, delta: f32) {
        if !self.playing {
            return;
        }
        let Some(animation) = self.current_animation() else {
            return;
        };
        let Some(frame) = animation.frame(self.frame_index) else {
            return;
        };

        let frame_count = animation.frame_count();
        let delay = frame.delay;
        self.timer += delta;
        if self.timer >= delay {
            self.timer = 0.0;
            self.frame_index = (self.frame_index + 1) % frame_count;
        }
    }

    /// Draw at `position`, clipped to the current frame
    ///
    /// With no current frame the whole texture is drawn unclipped; a frame
    /// is never dropped over a bad playback state.
    pub fn draw(
        &self,
        ctx: &mut RenderContext,
        camera: &Camera,
        position: Vec2,
        params: &DrawTextureParams,
    ) {
        let params = DrawTextureParams {
            source: self.current_frame().map(|frame| frame.source),
            ..params.clone()
        };
        ctx.draw_texture(camera, &self.texture, position, &params);
    }

    /// Draw through a caller-supplied shader instead of the default
    pub fn draw_with(
        &self,
        ctx: &mut RenderContext,
        camera: &Camera,
        position: Vec2,
        params: &DrawTextureParams,
        shader: &mut crate::render::shader::Shader,
    ) {
        let params = DrawTextureParams {
            source: self.current_frame().map(|frame| frame.source),
            ..params.clone()
        };
        ctx.draw_texture_with(camera, &self.texture, position, &params, shader);
    }

    /// The sprite-sheet texture
    pub fn texture(&self) -> &Texture {
        &self.texture
    }

    /// Which schema the description was written in
    pub fn schema(&self) -> DescriptionSchema {
        self.schema
    }

    /// Whether the playhead is advancing
    pub fn is_playing(&self) -> bool {
        self.playing
    }

    /// Name of the current animation, if one was ever played
    pub fn current_name(&self) -> Option<&str> {
        self.current.as_deref()
    }

    /// Index of the frame currently shown
    pub fn frame_index(&self) -> usize {
        self.frame_index
    }

    /// Seconds accumulated into the current frame
    pub fn timer(&self) -> f32 {
        self.timer
    }

    /// A named timeline, if the description defined it
    pub fn animation(&self, name: &str) -> Option<&Animation> {
        self.animations.get(name)
    }

    /// The frame the playhead is on, or `None` before the first `play`
    pub fn current_frame(&self) -> Option<&AnimationFrame> {
        self.current_animation()
            .and_then(|animation| animation.frame(self.frame_index))
    }

    fn current_animation(&self) -> Option<&Animation> {
        self.current
            .as_deref()
            .and_then(|name| self.animations.get(name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::math::Rectangle;
    use crate::render::device::UniformValue;
    use crate::render::test_device::RecordingDevice;

    const GRID_JSON: &str = r#"{
        "texture": "walker.png",
        "width": 32,
        "height": 32,
        "animations": {
            "idle": [
                { "index": 0, "delay": 0.25 },
                { "index": 1, "delay": 0.25 }
            ],
            "walk": [
                { "index": 4, "delay": 0.1 },
                { "index": 5, "delay": 0.1 },
                { "index": 6, "delay": 0.1 }
            ]
        }
    }"#;

    fn player(device: &mut RecordingDevice) -> AnimationPlayer {
        let description = Description::parse(GRID_JSON).unwrap();
        // 128x64 sheet: 4 columns, 2 rows
        let texture = Texture::from_pixels(device, 128, 64, None).unwrap();
        AnimationPlayer::from_description(&description, texture).unwrap()
    }

    #[test]
    fn redundant_play_preserves_phase() {
        let mut device = RecordingDevice::new();
        let mut player = player(&mut device);

        player.play("walk");
        player.update(0.1); // advance to frame 1
        player.update(0.04);
        assert_eq!(player.frame_index(), 1);
        let timer = player.timer();

        player.play("walk");
        assert_eq!(player.frame_index(), 1);
        assert_eq!(player.timer(), timer);
    }

    #[test]
    fn redundant_play_does_not_restart_a_stopped_animation() {
        let mut device = RecordingDevice::new();
        let mut player = player(&mut device);

        player.play("walk");
        player.update(0.1);
        player.stop();
        player.play("walk");

        assert!(!player.is_playing());
        assert_eq!(player.frame_index(), 1);
    }

    #[test]
    fn delta_equal_to_delay_advances_one_frame() {
        let mut device = RecordingDevice::new();
        let mut player = player(&mut device);

        player.play("walk");
        player.update(0.1);

        assert_eq!(player.frame_index(), 1);
        assert_eq!(player.timer(), 0.0);
    }

    #[test]
    fn timeline_wraps_and_never_stops() {
        let mut device = RecordingDevice::new();
        let mut player = player(&mut device);

        player.play("walk");
        for _ in 0..3 {
            player.update(0.1);
        }

        assert_eq!(player.frame_index(), 0);
        assert!(player.is_playing());
    }

    #[test]
    fn switching_animations_resets_phase() {
        let mut device = RecordingDevice::new();
        let mut player = player(&mut device);

        player.play("walk");
        player.update(0.1);
        player.play("idle");

        assert_eq!(player.current_name(), Some("idle"));
        assert_eq!(player.frame_index(), 0);
        assert_eq!(player.timer(), 0.0);
    }

    #[test]
    fn stop_keeps_frame_and_freezes_playhead() {
        let mut device = RecordingDevice::new();
        let mut player = player(&mut device);

        player.play("walk");
        player.update(0.1);
        player.stop();
        player.update(1.0);

        assert_eq!(player.frame_index(), 1);
        assert_eq!(player.timer(), 0.0);
    }

    #[test]
    fn unknown_name_is_ignored() {
        let mut device = RecordingDevice::new();
        let mut player = player(&mut device);

        player.play("walk");
        player.play("swim");

        assert_eq!(player.current_name(), Some("walk"));
        assert!(player.is_playing());
    }

    #[test]
    fn draw_clips_to_the_current_frame() {
        let device = RecordingDevice::new();
        let rec = device.recording();
        let mut ctx = RenderContext::new(Box::new(device), 800, 600).unwrap();
        let camera = Camera::new(800.0, 600.0);

        let description = Description::parse(GRID_JSON).unwrap();
        let texture = Texture::from_pixels(ctx.device_mut(), 128, 64, None).unwrap();
        let mut player = AnimationPlayer::from_description(&description, texture).unwrap();
        player.play("walk");
        assert_eq!(
            player.current_frame().unwrap().source,
            Rectangle::new(0.0, 32.0, 32.0, 32.0)
        );
        rec.borrow_mut().reset_calls();

        player.draw(&mut ctx, &camera, Vec2::zeros(), &DrawTextureParams::default());

        // Region 4 spans pixel rows 32..64 of a 64px-tall sheet; with
        // flipped storage that is the lower half of V
        let rec = rec.borrow();
        let uv_size = rec.writes_of("uvSize");
        assert_eq!(uv_size, vec![UniformValue::Vec2(Vec2::new(32.0, 32.0))]);
        let uv0 = rec.writes_of("uv0");
        assert_eq!(uv0, vec![UniformValue::Vec2(Vec2::new(0.0, 0.0))]);
    }

    #[test]
    fn draw_without_a_frame_shows_the_whole_texture() {
        let device = RecordingDevice::new();
        let rec = device.recording();
        let mut ctx = RenderContext::new(Box::new(device), 800, 600).unwrap();
        let camera = Camera::new(800.0, 600.0);

        let description = Description::parse(GRID_JSON).unwrap();
        let texture = Texture::from_pixels(ctx.device_mut(), 128, 64, None).unwrap();
        let player = AnimationPlayer::from_description(&description, texture).unwrap();
        rec.borrow_mut().reset_calls();

        player.draw(&mut ctx, &camera, Vec2::zeros(), &DrawTextureParams::default());

        let rec = rec.borrow();
        let uv_size = rec.writes_of("uvSize");
        assert_eq!(uv_size, vec![UniformValue::Vec2(Vec2::new(128.0, 64.0))]);
    }
}
