//! Directional clearance between the player and static platforms
//!
//! For each of the four directions we look for the nearest platform that
//! overlaps the player's span on the perpendicular axis. Ground and ceiling
//! fall back to bounds derived from the canvas height; left and right are
//! unbounded when nothing qualifies.

use super::transform::Transform;

/// Free distance around a box
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Gaps {
    /// Distance from the box bottom to the nearest surface below
    pub ground: f32,
    /// Distance from the box top to the nearest surface above
    pub ceiling: f32,
    /// `None` means nothing to the left
    pub left: Option<f32>,
    /// `None` means nothing to the right
    pub right: Option<f32>,
}

impl Gaps {
    /// Clearance with no platforms at all
    pub fn open(body: &Transform, world_height: f32) -> Self {
        Self {
            ground: world_height - body.bottom(),
            ceiling: world_height,
            left: None,
            right: None,
        }
    }

    /// True when resting exactly on a surface
    #[inline]
    pub fn is_grounded(&self) -> bool {
        self.ground == 0.0
    }
}

/// Horizontal spans overlap (strict)
#[inline]
fn overlaps_x(a: &Transform, b: &Transform) -> bool {
    a.pos.x < b.right() && a.right() > b.pos.x
}

/// Vertical spans overlap (touching counts, so a grounded body is still
/// blocked by the wall it stands next to)
#[inline]
fn overlaps_y(a: &Transform, b: &Transform) -> bool {
    a.pos.y <= b.bottom() && a.bottom() >= b.pos.y
}

/// Keep the smaller of an optional minimum and a candidate
#[inline]
fn nearest(current: Option<f32>, candidate: f32) -> Option<f32> {
    match current {
        Some(d) if d <= candidate => Some(d),
        _ => Some(candidate),
    }
}

/// Compute the four gaps for `body` against `platforms`.
pub fn directional_gaps(body: &Transform, platforms: &[Transform], world_height: f32) -> Gaps {
    let mut gaps = Gaps::open(body, world_height);

    for platform in platforms {
        if overlaps_x(body, platform) {
            // Below
            if platform.pos.y >= body.bottom() {
                gaps.ground = gaps.ground.min(platform.pos.y - body.bottom());
            }
            // Above
            if platform.bottom() <= body.pos.y {
                gaps.ceiling = gaps.ceiling.min(body.pos.y - platform.bottom());
            }
        }

        if overlaps_y(body, platform) {
            if platform.right() <= body.pos.x {
                gaps.left = nearest(gaps.left, body.pos.x - platform.right());
            }
            if platform.pos.x >= body.right() {
                gaps.right = nearest(gaps.right, platform.pos.x - body.right());
            }
        }
    }

    gaps
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const H: f32 = 1080.0;

    #[test]
    fn test_no_platforms_uses_world_bounds() {
        let body = Transform::new(100.0, 100.0, 50.0, 50.0);
        let gaps = directional_gaps(&body, &[], H);
        assert_eq!(gaps.ground, H - 150.0);
        assert_eq!(gaps.ceiling, H);
        assert_eq!(gaps.left, None);
        assert_eq!(gaps.right, None);
    }

    #[test]
    fn test_nearest_platform_wins() {
        let body = Transform::new(100.0, 100.0, 50.0, 50.0);
        let platforms = [
            Transform::new(0.0, 400.0, 300.0, 20.0),
            Transform::new(0.0, 200.0, 300.0, 20.0),
            Transform::new(0.0, 0.0, 300.0, 40.0),
            Transform::new(300.0, 0.0, 20.0, 500.0),
            Transform::new(500.0, 0.0, 20.0, 500.0),
            Transform::new(20.0, 90.0, 30.0, 100.0),
        ];
        let gaps = directional_gaps(&body, &platforms, H);
        assert_eq!(gaps.ground, 50.0);
        assert_eq!(gaps.ceiling, 60.0);
        assert_eq!(gaps.right, Some(150.0));
        assert_eq!(gaps.left, Some(50.0));
    }

    #[test]
    fn test_platform_without_overlap_is_ignored() {
        let body = Transform::new(100.0, 100.0, 50.0, 50.0);
        // Directly right of the body but entirely above it
        let platforms = [Transform::new(200.0, 0.0, 50.0, 40.0)];
        let gaps = directional_gaps(&body, &platforms, H);
        assert_eq!(gaps.right, None);
        // Only touching horizontally: not under the body
        let platforms = [Transform::new(150.0, 300.0, 50.0, 40.0)];
        let gaps = directional_gaps(&body, &platforms, H);
        assert_eq!(gaps.ground, H - 150.0);
    }

    #[test]
    fn test_standing_on_platform_is_grounded() {
        let body = Transform::new(100.0, 665.0, 97.5, 135.0);
        let platforms = [Transform::new(50.0, 800.0, 300.0, 100.0)];
        let gaps = directional_gaps(&body, &platforms, H);
        assert!(gaps.is_grounded());
    }

    proptest! {
        #[test]
        fn prop_ground_gap_non_negative_above_platforms(
            px in 0.0f32..1800.0,
            py in 0.0f32..400.0,
            plats in proptest::collection::vec((0.0f32..1800.0, 500.0f32..1000.0, 10.0f32..400.0, 10.0f32..80.0), 0..8),
        ) {
            let body = Transform::new(px, py, 50.0, 50.0);
            let platforms: Vec<_> = plats
                .into_iter()
                .map(|(x, y, w, h)| Transform::new(x, y, w, h))
                .collect();
            let gaps = directional_gaps(&body, &platforms, H);
            prop_assert!(gaps.ground >= 0.0);
            prop_assert_eq!(gaps.is_grounded(), gaps.ground == 0.0);
        }
    }
}
