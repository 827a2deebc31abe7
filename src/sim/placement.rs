//! Random spawn placement inside the visible playfield
//!
//! Candidates are drawn uniformly from the camera viewport inset by the
//! sprite's half extents, then checked against live sprite positions. After
//! the attempt budget runs out the last candidate is used anyway: spawning
//! must never stall, and an occasional crowded sprite is acceptable.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Orthographic camera as reported by the host
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Camera {
    /// World position of the camera center
    pub center: Vec2,
    /// Half of the visible height in world units
    pub ortho_size: f32,
    /// Width / height
    pub aspect: f32,
}

impl Camera {
    pub fn new(center: Vec2, ortho_size: f32, aspect: f32) -> Self {
        Self {
            center,
            ortho_size,
            aspect,
        }
    }

    /// Visible world rectangle
    pub fn viewport(&self) -> Viewport {
        Viewport {
            center: self.center,
            half_width: self.ortho_size * self.aspect,
            half_height: self.ortho_size,
        }
    }
}

/// Axis-aligned visible rectangle in world space
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub center: Vec2,
    pub half_width: f32,
    pub half_height: f32,
}

impl Viewport {
    #[inline]
    pub fn min(&self) -> Vec2 {
        self.center - Vec2::new(self.half_width, self.half_height)
    }

    #[inline]
    pub fn max(&self) -> Vec2 {
        self.center + Vec2::new(self.half_width, self.half_height)
    }

    /// Region where a sprite of this footprint stays fully on screen.
    ///
    /// An axis whose inset range would be inverted collapses to the viewport
    /// center and the region is flagged degenerate.
    pub fn spawn_region(&self, footprint: Footprint) -> SpawnRegion {
        let mut min = self.min() + Vec2::new(footprint.half_w, footprint.half_h);
        let mut max = self.max() - Vec2::new(footprint.half_w, footprint.half_h);
        let mut degenerate = false;

        if min.x > max.x {
            min.x = self.center.x;
            max.x = self.center.x;
            degenerate = true;
        }
        if min.y > max.y {
            min.y = self.center.y;
            max.y = self.center.y;
            degenerate = true;
        }

        SpawnRegion {
            min,
            max,
            degenerate,
        }
    }
}

/// Half extents of a sprite
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Footprint {
    pub half_w: f32,
    pub half_h: f32,
}

impl Footprint {
    pub fn new(half_w: f32, half_h: f32) -> Self {
        Self { half_w, half_h }
    }

    /// Footprint from a full sprite size
    pub fn from_size(size: Vec2) -> Self {
        Self::new(size.x / 2.0, size.y / 2.0)
    }
}

/// Inset sampling rectangle (inclusive bounds)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpawnRegion {
    pub min: Vec2,
    pub max: Vec2,
    /// Footprint did not fit on at least one axis
    pub degenerate: bool,
}

impl SpawnRegion {
    /// Uniform random point in the region
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Vec2 {
        Vec2::new(
            rng.random_range(self.min.x..=self.max.x),
            rng.random_range(self.min.y..=self.max.y),
        )
    }
}

/// Result of a placement request
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    pub position: Vec2,
    /// Candidates drawn, including the returned one
    pub attempts: u32,
    /// Whether the position satisfies the separation rule
    pub accepted: bool,
    /// Region collapsed because the footprint did not fit
    pub degenerate: bool,
}

/// True if `candidate` keeps at least `min_separation` from every occupant
#[inline]
pub fn is_clear(candidate: Vec2, occupied: &[Vec2], min_separation: f32) -> bool {
    occupied
        .iter()
        .all(|&other| other.distance(candidate) >= min_separation)
}

/// Find a spawn position away from live sprites (best effort)
pub fn sample<R: Rng + ?Sized>(
    rng: &mut R,
    viewport: &Viewport,
    footprint: Footprint,
    occupied: &[Vec2],
    min_separation: f32,
    max_attempts: u32,
) -> Placement {
    let region = viewport.spawn_region(footprint);
    let max_attempts = max_attempts.max(1);

    let mut attempts = 0;
    loop {
        let candidate = region.sample(rng);
        attempts += 1;

        let accepted = is_clear(candidate, occupied, min_separation);
        if accepted || attempts >= max_attempts {
            if !accepted {
                log::debug!(
                    "No clear spawn position after {} attempts, using {:?}",
                    attempts,
                    candidate
                );
            }
            return Placement {
                position: candidate,
                attempts,
                accepted,
                degenerate: region.degenerate,
            };
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn test_viewport() -> Viewport {
        Camera::new(Vec2::ZERO, 5.0, 16.0 / 9.0).viewport()
    }

    #[test]
    fn test_camera_viewport_bounds() {
        let vp = Camera::new(Vec2::new(2.0, -1.0), 5.0, 2.0).viewport();
        assert_eq!(vp.min(), Vec2::new(-8.0, -6.0));
        assert_eq!(vp.max(), Vec2::new(12.0, 4.0));
    }

    #[test]
    fn test_empty_occupancy_accepts_first_candidate() {
        let mut rng = Pcg32::seed_from_u64(1);
        let vp = test_viewport();
        for _ in 0..50 {
            let placement = sample(&mut rng, &vp, Footprint::new(0.5, 0.5), &[], 3.0, 100);
            assert_eq!(placement.attempts, 1);
            assert!(placement.accepted);
        }
    }

    #[test]
    fn test_candidates_stay_inside_inset_region() {
        let mut rng = Pcg32::seed_from_u64(2);
        let vp = test_viewport();
        let footprint = Footprint::new(0.75, 0.5);
        for _ in 0..500 {
            let p = sample(&mut rng, &vp, footprint, &[], 0.0, 1).position;
            assert!(p.x >= vp.min().x + 0.75 && p.x <= vp.max().x - 0.75);
            assert!(p.y >= vp.min().y + 0.5 && p.y <= vp.max().y - 0.5);
        }
    }

    #[test]
    fn test_saturated_viewport_exhausts_budget() {
        let mut rng = Pcg32::seed_from_u64(3);
        let vp = test_viewport();
        // Every candidate is within 1000 units of the origin
        let occupied = [Vec2::ZERO];
        let placement = sample(&mut rng, &vp, Footprint::new(0.5, 0.5), &occupied, 1000.0, 100);
        assert_eq!(placement.attempts, 100);
        assert!(!placement.accepted);
        assert!(placement.position.x.abs() <= vp.half_width);
    }

    #[test]
    fn test_zero_attempt_budget_still_returns_a_candidate() {
        let mut rng = Pcg32::seed_from_u64(4);
        let placement = sample(&mut rng, &test_viewport(), Footprint::new(0.5, 0.5), &[Vec2::ZERO], 1000.0, 0);
        assert_eq!(placement.attempts, 1);
    }

    #[test]
    fn test_oversized_footprint_collapses_to_center() {
        let mut rng = Pcg32::seed_from_u64(5);
        let vp = Camera::new(Vec2::new(3.0, 4.0), 1.0, 1.0).viewport();
        let placement = sample(&mut rng, &vp, Footprint::new(2.0, 2.0), &[], 0.0, 10);
        assert!(placement.degenerate);
        assert_eq!(placement.position, Vec2::new(3.0, 4.0));
    }

    #[test]
    fn test_single_axis_degenerate() {
        let vp = Camera::new(Vec2::ZERO, 5.0, 0.1).viewport();
        let region = vp.spawn_region(Footprint::new(1.0, 1.0));
        assert!(region.degenerate);
        assert_eq!(region.min.x, 0.0);
        assert_eq!(region.max.x, 0.0);
        assert_eq!(region.min.y, -4.0);
        assert_eq!(region.max.y, 4.0);
    }

    proptest! {
        #[test]
        fn prop_accepted_placements_keep_separation(seed in any::<u64>(), count in 1usize..12) {
            let mut rng = Pcg32::seed_from_u64(seed);
            let vp = test_viewport();
            let mut occupied = Vec::new();
            for _ in 0..count {
                let placement = sample(&mut rng, &vp, Footprint::new(0.5, 0.5), &occupied, 2.0, 100);
                if placement.accepted {
                    prop_assert!(is_clear(placement.position, &occupied, 2.0));
                } else {
                    prop_assert_eq!(placement.attempts, 100);
                }
                occupied.push(placement.position);
            }
        }
    }
}
