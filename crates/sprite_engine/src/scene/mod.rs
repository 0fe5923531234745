//! Parent-child scene graph
//!
//! Nodes live in a slotmap arena keyed by [`NodeKey`]; parent and child
//! links are plain keys and never participate in ownership, so removing a
//! subtree cannot dangle. A node is composition, not a class hierarchy: a
//! transform, a child list, an [`AdditionSet`] of behavior extensions, and
//! a [`Visual`] sum type the draw traversal dispatches on.
//!
//! Traversal orders: `update` visits parent before children with additions
//! before children; `draw` draws a node's own visual before recursing.
//!
//! Global positions propagate exactly one level: a node's global position
//! is its local position plus its parent's **local** position, so a
//! grandchild ignores where its grandparent sits. Flattening deep
//! hierarchies is the caller's job.

pub mod addition;

pub use addition::{Addition, AdditionKind, AdditionSet, MissingAdditionError};

use slotmap::{new_key_type, SlotMap};

use crate::animation::AnimationPlayer;
use crate::foundation::math::Vec2;
use crate::render::camera::Camera;
use crate::render::context::{DrawTextureParams, RenderContext};
use crate::render::shader::Shader;

new_key_type! {
    /// Arena key for a scene node
    pub struct NodeKey;
}

/// What a node shows, dispatched on by the draw traversal
pub enum Visual {
    /// Nothing; the node is a pure transform/grouping node
    None,
    /// An animated sprite
    Sprite(SpriteVisual),
}

/// Sprite drawing state carried by a node
pub struct SpriteVisual {
    /// Playback state and sprite sheet
    pub player: AnimationPlayer,
    /// Skipped by the draw traversal when false
    pub visible: bool,
    /// Pivot subtracted from the draw position
    pub origin: Vec2,
    /// Add half the scaled frame size to the origin so the sprite centers
    /// on its position
    pub centered: bool,
    /// Per-axis scale
    pub scale: Vec2,
    /// Rotation in degrees
    pub rotation: f32,
    /// Z written into the model translation
    pub layer_depth: f32,
    /// Mirror horizontally
    pub flip_h: bool,
    /// Mirror vertically
    pub flip_v: bool,
    /// Draw through this shader instead of the context's default
    pub shader: Option<Shader>,
}

impl SpriteVisual {
    /// Centered, unscaled sprite around a player
    pub fn new(player: AnimationPlayer) -> Self {
        Self {
            player,
            visible: true,
            origin: Vec2::zeros(),
            centered: true,
            scale: Vec2::new(1.0, 1.0),
            rotation: 0.0,
            layer_depth: 0.0,
            flip_h: false,
            flip_v: false,
            shader: None,
        }
    }

    /// Size of the frame currently shown, in scaled pixels
    fn scaled_frame_size(&self) -> Vec2 {
        let (width, height) = match self.player.current_frame() {
            Some(frame) => (frame.source.width, frame.source.height),
            None => {
                let texture = self.player.texture();
                (texture.width() as f32, texture.height() as f32)
            }
        };
        Vec2::new(width * self.scale.x, height * self.scale.y)
    }
}

/// A scene-graph node
pub struct Node {
    /// Position relative to the parent
    pub position: Vec2,
    global_position: Vec2,
    parent: Option<NodeKey>,
    children: Vec<NodeKey>,
    /// Attached behavior extensions
    pub additions: AdditionSet,
    /// What the node draws
    pub visual: Visual,
}

impl Node {
    /// Bare transform node
    pub fn new(position: Vec2) -> Self {
        Self {
            position,
            global_position: position,
            parent: None,
            children: Vec::new(),
            additions: AdditionSet::new(),
            visual: Visual::None,
        }
    }

    /// Node drawing a sprite
    pub fn sprite(position: Vec2, sprite: SpriteVisual) -> Self {
        Self { visual: Visual::Sprite(sprite), ..Self::new(position) }
    }

    /// Position in world space, as of the last `update` pass
    pub fn global_position(&self) -> Vec2 {
        self.global_position
    }

    /// The parent's key, if this node is not a root
    pub fn parent(&self) -> Option<NodeKey> {
        self.parent
    }

    /// Keys of this node's children
    pub fn children(&self) -> &[NodeKey] {
        &self.children
    }
}

/// Arena of nodes plus the root list
#[derive(Default)]
pub struct Scene {
    nodes: SlotMap<NodeKey, Node>,
    roots: Vec<NodeKey>,
}

impl Scene {
    /// Empty scene
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of live nodes
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the scene holds no nodes
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Keys of the root nodes
    pub fn roots(&self) -> &[NodeKey] {
        &self.roots
    }

    /// Insert a root node
    pub fn spawn(&mut self, node: Node) -> NodeKey {
        let key = self.nodes.insert(node);
        self.roots.push(key);
        key
    }

    /// Insert a node as a child of `parent`
    ///
    /// Falls back to spawning a root (with a warning) when the parent key
    /// is stale.
    pub fn spawn_child(&mut self, parent: NodeKey, node: Node) -> NodeKey {
        if !self.nodes.contains_key(parent) {
            log::warn!("spawn_child with a stale parent key; spawning as root");
            return self.spawn(node);
        }
        let key = self.nodes.insert(node);
        self.nodes[key].parent = Some(parent);
        self.nodes[parent].children.push(key);
        key
    }

    /// Remove a node and its whole subtree
    pub fn remove(&mut self, key: NodeKey) {
        let Some(node) = self.nodes.remove(key) else {
            return;
        };
        match node.parent {
            Some(parent) => {
                if let Some(parent) = self.nodes.get_mut(parent) {
                    parent.children.retain(|&child| child != key);
                }
            }
            None => self.roots.retain(|&root| root != key),
        }
        for child in node.children {
            self.remove_subtree(child);
        }
    }

    fn remove_subtree(&mut self, key: NodeKey) {
        let Some(node) = self.nodes.remove(key) else {
            return;
        };
        for child in node.children {
            self.remove_subtree(child);
        }
    }

    /// Borrow a node
    pub fn node(&self, key: NodeKey) -> Option<&Node> {
        self.nodes.get(key)
    }

    /// Mutably borrow a node
    pub fn node_mut(&mut self, key: NodeKey) -> Option<&mut Node> {
        self.nodes.get_mut(key)
    }

    /// Per-frame pass: recompute global positions, update additions,
    /// advance animation players; parent before children
    pub fn update(&mut self, delta: f32) {
        for root in self.roots.clone() {
            self.update_node(root, Vec2::zeros(), delta);
        }
    }

    fn update_node(&mut self, key: NodeKey, parent_local: Vec2, delta: f32) {
        let (local, children) = {
            let Some(node) = self.nodes.get_mut(key) else {
                return;
            };
            node.global_position = node.position + parent_local;
            let owner_global = node.global_position;
            for addition in node.additions.iter_mut() {
                match addition {
                    Addition::PhysicalBody(body) => body.sync_collider(owner_global),
                }
            }
            if let Visual::Sprite(sprite) = &mut node.visual {
                sprite.player.update(delta);
            }
            (node.position, node.children.clone())
        };
        // Children see this node's LOCAL position; see the module docs
        for child in children {
            self.update_node(child, local, delta);
        }
    }

    /// Fixed-step pass: run each addition's physics step and apply the
    /// resulting displacement; global positions are not recomputed here
    pub fn physics_update(&mut self, fixed_delta: f32) {
        for root in self.roots.clone() {
            self.physics_update_node(root, fixed_delta);
        }
    }

    fn physics_update_node(&mut self, key: NodeKey, fixed_delta: f32) {
        let children = {
            let Some(node) = self.nodes.get_mut(key) else {
                return;
            };
            for addition in node.additions.iter_mut() {
                match addition {
                    Addition::PhysicalBody(body) => {
                        let displacement = body.step(fixed_delta);
                        node.position += displacement;
                        node.global_position += displacement;
                        let owner_global = node.global_position;
                        body.sync_collider(owner_global);
                    }
                }
            }
            node.children.clone()
        };
        for child in children {
            self.physics_update_node(child, fixed_delta);
        }
    }

    /// Draw pass: each visible sprite draws its current frame, then its
    /// children
    pub fn draw(&mut self, ctx: &mut RenderContext, camera: &Camera) {
        for root in self.roots.clone() {
            self.draw_node(root, ctx, camera);
        }
    }

    fn draw_node(&mut self, key: NodeKey, ctx: &mut RenderContext, camera: &Camera) {
        let children = {
            let Some(node) = self.nodes.get_mut(key) else {
                return;
            };
            if let Visual::Sprite(sprite) = &mut node.visual {
                if sprite.visible {
                    let center = if sprite.centered {
                        sprite.scaled_frame_size() / 2.0
                    } else {
                        Vec2::zeros()
                    };
                    let params = DrawTextureParams {
                        origin: sprite.origin + center,
                        scale: sprite.scale,
                        rotation: sprite.rotation,
                        source: None,
                        flip_h: sprite.flip_h,
                        flip_v: sprite.flip_v,
                        depth: sprite.layer_depth,
                    };
                    match &mut sprite.shader {
                        Some(shader) => sprite.player.draw_with(
                            ctx,
                            camera,
                            node.global_position,
                            &params,
                            shader,
                        ),
                        None => sprite.player.draw(ctx, camera, node.global_position, &params),
                    }
                }
            }
            node.children.clone()
        };
        for child in children {
            self.draw_node(child, ctx, camera);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::animation::Description;
    use crate::physics::{Aabb, PhysicalBody};
    use crate::render::test_device::RecordingDevice;
    use crate::render::texture::Texture;

    const GRID_JSON: &str = r#"{
        "texture": "walker.png",
        "width": 32,
        "height": 32,
        "animations": {
            "walk": [
                { "index": 0, "delay": 0.1 },
                { "index": 1, "delay": 0.1 }
            ]
        }
    }"#;

    fn sprite_visual(device: &mut RecordingDevice) -> SpriteVisual {
        let description = Description::parse(GRID_JSON).unwrap();
        let texture = Texture::from_pixels(device, 128, 64, None).unwrap();
        SpriteVisual::new(AnimationPlayer::from_description(&description, texture).unwrap())
    }

    #[test]
    fn update_propagates_parent_local_position() {
        let mut scene = Scene::new();
        let parent = scene.spawn(Node::new(Vec2::new(10.0, 20.0)));
        let child = scene.spawn_child(parent, Node::new(Vec2::new(1.0, 2.0)));

        scene.update(0.016);

        assert_eq!(scene.node(parent).unwrap().global_position(), Vec2::new(10.0, 20.0));
        assert_eq!(scene.node(child).unwrap().global_position(), Vec2::new(11.0, 22.0));
    }

    #[test]
    fn grandchild_sees_only_its_parents_local_position() {
        let mut scene = Scene::new();
        let root = scene.spawn(Node::new(Vec2::new(100.0, 0.0)));
        let middle = scene.spawn_child(root, Node::new(Vec2::new(10.0, 0.0)));
        let leaf = scene.spawn_child(middle, Node::new(Vec2::new(1.0, 0.0)));

        scene.update(0.016);

        // Propagation is one level deep: the root's 100 never reaches the
        // leaf (leaf global = 1 + middle local 10, not 111)
        assert_eq!(scene.node(leaf).unwrap().global_position(), Vec2::new(11.0, 0.0));
    }

    #[test]
    fn update_advances_sprite_players() {
        let mut device = RecordingDevice::new();
        let mut scene = Scene::new();
        let sprite = sprite_visual(&mut device);
        let key = scene.spawn(Node::sprite(Vec2::zeros(), sprite));

        match &mut scene.node_mut(key).unwrap().visual {
            Visual::Sprite(sprite) => sprite.player.play("walk"),
            Visual::None => unreachable!(),
        }
        scene.update(0.1);

        match &scene.node(key).unwrap().visual {
            Visual::Sprite(sprite) => assert_eq!(sprite.player.frame_index(), 1),
            Visual::None => unreachable!(),
        }
    }

    #[test]
    fn physics_update_moves_the_owner_and_its_collider() {
        let mut scene = Scene::new();
        let mut node = Node::new(Vec2::zeros());
        let mut body = PhysicalBody::new(Aabb::new(Vec2::zeros(), Vec2::new(10.0, 10.0)));
        body.velocity = Vec2::new(100.0, 0.0);
        node.additions.add(Addition::PhysicalBody(body));
        let key = scene.spawn(node);

        scene.update(0.0);
        scene.physics_update(0.1);

        let node = scene.node(key).unwrap();
        assert_eq!(node.position, Vec2::new(10.0, 0.0));
        assert_eq!(node.global_position(), Vec2::new(10.0, 0.0));
        assert_eq!(
            node.additions.physical_body().unwrap().collider.position,
            Vec2::new(10.0, 0.0)
        );
    }

    #[test]
    fn remove_takes_the_whole_subtree() {
        let mut scene = Scene::new();
        let root = scene.spawn(Node::new(Vec2::zeros()));
        let child = scene.spawn_child(root, Node::new(Vec2::zeros()));
        let grandchild = scene.spawn_child(child, Node::new(Vec2::zeros()));

        scene.remove(child);

        assert!(scene.node(child).is_none());
        assert!(scene.node(grandchild).is_none());
        assert_eq!(scene.node(root).unwrap().children().len(), 0);
        assert_eq!(scene.len(), 1);
    }

    #[test]
    fn removing_a_root_drops_it_from_the_root_list() {
        let mut scene = Scene::new();
        let a = scene.spawn(Node::new(Vec2::zeros()));
        let b = scene.spawn(Node::new(Vec2::zeros()));

        scene.remove(a);

        assert_eq!(scene.roots(), &[b]);
        assert_eq!(scene.len(), 1);
    }

    #[test]
    fn draw_visits_parents_before_children_and_skips_hidden() {
        let device = RecordingDevice::new();
        let rec = device.recording();
        let mut ctx = RenderContext::new(Box::new(device), 800, 600).unwrap();
        let camera = Camera::new(800.0, 600.0);

        let mut scene = Scene::new();
        let mut hidden = {
            let description = Description::parse(GRID_JSON).unwrap();
            let texture = Texture::from_pixels(ctx.device_mut(), 128, 64, None).unwrap();
            SpriteVisual::new(AnimationPlayer::from_description(&description, texture).unwrap())
        };
        hidden.visible = false;
        let shown = {
            let description = Description::parse(GRID_JSON).unwrap();
            let texture = Texture::from_pixels(ctx.device_mut(), 128, 64, None).unwrap();
            SpriteVisual::new(AnimationPlayer::from_description(&description, texture).unwrap())
        };

        let parent = scene.spawn(Node::sprite(Vec2::zeros(), hidden));
        scene.spawn_child(parent, Node::sprite(Vec2::zeros(), shown));

        rec.borrow_mut().reset_calls();
        scene.draw(&mut ctx, &camera);

        // Only the visible child issues a draw
        assert_eq!(rec.borrow().count_draws(), 1);
    }

    #[test]
    fn centered_sprite_offsets_by_half_the_scaled_frame() {
        let mut device = RecordingDevice::new();
        let mut sprite = sprite_visual(&mut device);
        sprite.player.play("walk");
        sprite.scale = Vec2::new(2.0, 2.0);

        // 32px frame at 2x scale centers 32px in
        assert_eq!(sprite.scaled_frame_size() / 2.0, Vec2::new(32.0, 32.0));
    }
}
