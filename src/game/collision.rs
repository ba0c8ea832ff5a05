//! Collision Detection
//!
//! Projectile-versus-avatar hit tests. A projectile is tested as a point
//! (its leading coordinate) against the opposing avatar's box.

use crate::core::geom::{Rect, Vec2};
use crate::game::state::{Avatar, PlayerSlot, Projectile};

/// Check if a point lies in a box, edges included.
#[inline]
pub fn point_hits_box(point: Vec2, body: &Rect) -> bool {
    body.contains_point(point)
}

/// The avatar a projectile is allowed to damage.
#[inline]
pub fn target_of(projectile: &Projectile) -> PlayerSlot {
    projectile.owner.opponent()
}

/// Check if a projectile hits an avatar.
///
/// Always false for the projectile's own firer.
pub fn check_projectile_hit(projectile: &Projectile, avatar: &Avatar) -> bool {
    if avatar.slot == projectile.owner {
        return false;
    }

    point_hits_box(projectile.position, &avatar.body())
}
