//! Iterative swept-AABB collision response
//!
//! Not a physics solver: velocity is deflected along collision normals and
//! position integrates whatever velocity remains. Obstacles are static
//! AABBs supplied externally each step.

use crate::foundation::math::Vec2;
use crate::physics::Aabb;

/// A moving collider with velocity and a set of static obstacles
#[derive(Debug, Clone)]
pub struct PhysicalBody {
    /// Velocity in pixels per second
    pub velocity: Vec2,
    /// The body's collider, kept in sync with its owner's position
    pub collider: Aabb,
    /// Static obstacles tested against this step; set externally
    pub colliders_to_check: Vec<Aabb>,
}

impl PhysicalBody {
    /// Body with the given collider, at rest
    pub fn new(collider: Aabb) -> Self {
        Self { velocity: Vec2::zeros(), collider, colliders_to_check: Vec::new() }
    }

    /// Re-anchor the collider to its owner's position
    pub fn sync_collider(&mut self, position: Vec2) {
        self.collider.position = position;
    }

    /// Run one fixed-timestep collision pass and return the displacement
    ///
    /// Candidates are pre-filtered with the broad-phase box, swept-tested,
    /// and the surviving hits resolved nearest-first; each resolution
    /// re-tests because an earlier deflection may have cleared a later
    /// collision. Deflection cancels the velocity component into the
    /// surface scaled by the remaining fraction of the step. The caller
    /// applies the returned displacement to the owner and re-syncs the
    /// collider.
    pub fn step(&mut self, fixed_delta: f32) -> Vec2 {
        let displacement = self.velocity * fixed_delta;
        let broadphase = self.collider.broadphase_box(displacement);

        let mut hits: Vec<(f32, usize)> = Vec::new();
        for (index, candidate) in self.colliders_to_check.iter().enumerate() {
            if !broadphase.intersects(candidate) {
                continue;
            }
            if let Some(hit) = self.collider.sweep(candidate, self.velocity, fixed_delta) {
                hits.push((hit.time, index));
            }
        }

        // Nearest collision first, regardless of candidate order
        hits.sort_by(|a, b| a.0.total_cmp(&b.0));

        for (_, index) in hits {
            let candidate = self.colliders_to_check[index];
            let Some(hit) = self.collider.sweep(&candidate, self.velocity, fixed_delta) else {
                continue;
            };
            log::trace!("collision at t={} normal={:?}", hit.time, hit.normal);
            let remaining = 1.0 - hit.time;
            self.velocity.x += hit.normal.x * self.velocity.x.abs() * remaining;
            self.velocity.y += hit.normal.y * self.velocity.y.abs() * remaining;
        }

        self.velocity * fixed_delta
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn body_at(position: Vec2) -> PhysicalBody {
        PhysicalBody::new(Aabb::new(position, Vec2::new(10.0, 10.0)))
    }

    #[test]
    fn no_obstacles_integrates_velocity() {
        let mut body = body_at(Vec2::zeros());
        body.velocity = Vec2::new(100.0, -50.0);

        let displacement = body.step(0.1);
        assert_eq!(displacement, Vec2::new(10.0, -5.0));
    }

    #[test]
    fn wall_ahead_deflects_velocity() {
        let mut body = body_at(Vec2::zeros());
        body.velocity = Vec2::new(100.0, 0.0);
        // Contact halfway through the 10px step
        body.colliders_to_check.push(Aabb::new(Vec2::new(15.0, 0.0), Vec2::new(10.0, 10.0)));

        let displacement = body.step(0.1);

        // Half the step's horizontal velocity is cancelled
        assert_relative_eq!(body.velocity.x, 50.0);
        assert_relative_eq!(displacement.x, 5.0);
    }

    #[test]
    fn nearer_obstacle_resolves_first_regardless_of_order() {
        let mut body = body_at(Vec2::zeros());
        body.velocity = Vec2::new(100.0, 0.0);
        // Farther obstacle listed before the nearer one
        body.colliders_to_check.push(Aabb::new(Vec2::new(16.0, 0.0), Vec2::new(10.0, 10.0)));
        body.colliders_to_check.push(Aabb::new(Vec2::new(12.0, 0.0), Vec2::new(10.0, 10.0)));

        let displacement = body.step(0.1);

        // Near wall at x=12 hits at t=0.2: velocity drops to 20, and the
        // re-test against the far wall no longer reaches it
        assert_relative_eq!(body.velocity.x, 20.0);
        assert_relative_eq!(displacement.x, 2.0);
        // Final right edge never passes the near wall's face
        assert!(body.collider.position.x + displacement.x + 10.0 <= 12.0 + 1e-4);
    }

    #[test]
    fn candidates_outside_the_broadphase_are_skipped() {
        let mut body = body_at(Vec2::zeros());
        body.velocity = Vec2::new(100.0, 0.0);
        // Far to the side of the motion
        body.colliders_to_check.push(Aabb::new(Vec2::new(0.0, 100.0), Vec2::new(10.0, 10.0)));

        let displacement = body.step(0.1);
        assert_eq!(displacement, Vec2::new(10.0, 0.0));
        assert_eq!(body.velocity, Vec2::new(100.0, 0.0));
    }

    #[test]
    fn sync_collider_follows_the_owner() {
        let mut body = body_at(Vec2::zeros());
        body.sync_collider(Vec2::new(32.0, 48.0));
        assert_eq!(body.collider.position, Vec2::new(32.0, 48.0));
    }
}
