//! Swept-AABB collision
//!
//! An [`Aabb`] is `{position, size}` in screen space (y grows downward),
//! projecting to a [`Rectangle`] for overlap tests. The swept test expands
//! the obstacle by the mover's half-extents (Minkowski sum) and casts a ray
//! from the mover's center along its displacement for the step, so motion
//! across the whole timestep is accounted for, not just the end position.
//!
//! Degenerate queries (zero velocity, a ray pointing away) are not errors;
//! they report "no collision" cleanly.

pub mod body;

pub use body::PhysicalBody;

use crate::foundation::math::{Rectangle, Vec2};

/// Result of a ray or swept-box query
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hit {
    /// Contact point along the ray
    pub point: Vec2,
    /// Surface normal at the contact, or zero on a perfect corner hit
    pub normal: Vec2,
    /// Parametric hit time along the ray (1.0 spans the full step)
    pub time: f32,
}

/// Axis-aligned bounding box
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    /// Top-left corner
    pub position: Vec2,
    /// Extent; both components must be non-negative
    pub size: Vec2,
}

impl Aabb {
    /// Box from its top-left corner and size
    pub fn new(position: Vec2, size: Vec2) -> Self {
        Self { position, size }
    }

    /// The box's footprint as a rectangle
    pub fn bounds(&self) -> Rectangle {
        Rectangle::new(self.position.x, self.position.y, self.size.x, self.size.y)
    }

    /// Strict overlap test; touching edges do not count
    pub fn intersects(&self, other: &Aabb) -> bool {
        self.bounds().intersects(&other.bounds())
    }

    /// Slab-method ray test against this box
    ///
    /// Returns `None` when the slab intervals miss each other or the far
    /// hit lies behind the ray origin. A zero direction component divides
    /// to infinity and falls out of the interval comparison naturally. On
    /// a corner hit (both axes enter at once) the normal is left zero.
    pub fn ray_intersect(&self, origin: Vec2, dir: Vec2) -> Option<Hit> {
        let mut t_near = (self.position - origin).component_div(&dir);
        let mut t_far = (self.position + self.size - origin).component_div(&dir);

        if t_near.x > t_far.x {
            std::mem::swap(&mut t_near.x, &mut t_far.x);
        }
        if t_near.y > t_far.y {
            std::mem::swap(&mut t_near.y, &mut t_far.y);
        }

        if t_near.x > t_far.y || t_near.y > t_far.x {
            return None;
        }

        let t_hit_near = t_near.x.max(t_near.y);
        let t_hit_far = t_far.x.min(t_far.y);

        // Box entirely behind the ray
        if t_hit_far < 0.0 {
            return None;
        }

        let normal = if t_near.x > t_near.y {
            Vec2::new(if dir.x < 0.0 { 1.0 } else { -1.0 }, 0.0)
        } else if t_near.x < t_near.y {
            Vec2::new(0.0, if dir.y < 0.0 { 1.0 } else { -1.0 })
        } else {
            Vec2::zeros()
        };

        Some(Hit { point: origin + dir * t_hit_near, normal, time: t_hit_near })
    }

    /// Swept test of this box moving at `velocity` against a static `other`
    ///
    /// Minkowski expansion: `other` grows by this box's half-extents on
    /// each side and a ray is cast from this box's center along
    /// `velocity * delta`. A hit counts only when its time lies in
    /// `[-0.001, 1.0)` — "already touching" through "hits before the step
    /// ends". Zero velocity never collides.
    pub fn sweep(&self, other: &Aabb, velocity: Vec2, delta: f32) -> Option<Hit> {
        if velocity.x == 0.0 && velocity.y == 0.0 {
            return None;
        }

        let expanded = Aabb::new(other.position - self.size / 2.0, other.size + self.size);
        let hit = expanded.ray_intersect(self.position + self.size / 2.0, velocity * delta)?;
        if hit.time >= -0.001 && hit.time < 1.0 {
            Some(hit)
        } else {
            None
        }
    }

    /// Per-axis entry/exit time computation for a box moving at `velocity`
    ///
    /// Returns `(entry_time, normal)`. Entry time 1.0 with a zero normal
    /// means "no collision this step": inconsistent entry/exit ordering,
    /// both axes entering in the past, or either axis entering after the
    /// step. A zero velocity component gives that axis an infinite entry
    /// window.
    pub fn swept_entry(&self, other: &Aabb, velocity: Vec2) -> (f32, Vec2) {
        let bounds = self.bounds();
        let other_bounds = other.bounds();

        let (x_inv_entry, x_inv_exit) = if velocity.x > 0.0 {
            (other_bounds.left() - bounds.right(), other_bounds.right() - bounds.left())
        } else {
            (other_bounds.right() - bounds.left(), other_bounds.left() - bounds.right())
        };
        let (y_inv_entry, y_inv_exit) = if velocity.y > 0.0 {
            (other_bounds.top() - bounds.bottom(), other_bounds.bottom() - bounds.top())
        } else {
            (other_bounds.bottom() - bounds.top(), other_bounds.top() - bounds.bottom())
        };

        let (x_entry, x_exit) = if velocity.x == 0.0 {
            (f32::NEG_INFINITY, f32::INFINITY)
        } else {
            (x_inv_entry / velocity.x, x_inv_exit / velocity.x)
        };
        let (y_entry, y_exit) = if velocity.y == 0.0 {
            (f32::NEG_INFINITY, f32::INFINITY)
        } else {
            (y_inv_entry / velocity.y, y_inv_exit / velocity.y)
        };

        let entry_time = x_entry.max(y_entry);
        let exit_time = x_exit.min(y_exit);

        if entry_time > exit_time
            || (x_entry < 0.0 && y_entry < 0.0)
            || x_entry > 1.0
            || y_entry > 1.0
        {
            return (1.0, Vec2::zeros());
        }

        let normal = if x_entry > y_entry {
            Vec2::new(if x_inv_entry < 0.0 { 1.0 } else { -1.0 }, 0.0)
        } else {
            Vec2::new(0.0, if y_inv_entry < 0.0 { 1.0 } else { -1.0 })
        };
        (entry_time, normal)
    }

    /// Box covering this box's footprint swept across `velocity`
    ///
    /// Cheap pre-filter before the exact swept test.
    pub fn broadphase_box(&self, velocity: Vec2) -> Aabb {
        Aabb::new(
            Vec2::new(
                if velocity.x > 0.0 { self.position.x } else { self.position.x + velocity.x },
                if velocity.y > 0.0 { self.position.y } else { self.position.y + velocity.y },
            ),
            Vec2::new(
                if velocity.x > 0.0 { velocity.x + self.size.x } else { self.size.x - velocity.x },
                if velocity.y > 0.0 { velocity.y + self.size.y } else { self.size.y - velocity.y },
            ),
        )
    }
}
