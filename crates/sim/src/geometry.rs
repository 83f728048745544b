use glam::{Vec2, Vec3};
use locomote_kernel::PhysicsQuery;

/// Surfaces closer than this above a point still count as "below" it.
const SURFACE_EPSILON: f32 = 1e-4;

/// Axis-aligned horizontal platform top: an xz rectangle at height `top`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Slab {
    pub min: Vec2,
    pub max: Vec2,
    pub top: f32,
}

impl Slab {
    pub fn new(min: Vec2, max: Vec2, top: f32) -> Self {
        Self {
            min: min.min(max),
            max: min.max(max),
            top,
        }
    }

    pub fn contains_xz(&self, x: f32, z: f32) -> bool {
        x >= self.min.x && x <= self.max.x && z >= self.min.y && z <= self.max.y
    }
}

/// Static collision geometry: an optional infinite ground plane plus slabs.
///
/// Only upward-facing surfaces exist, so only rays travelling downward hit.
#[derive(Debug, Clone, Default)]
pub struct StaticWorld {
    ground: Option<f32>,
    slabs: Vec<Slab>,
}

impl StaticWorld {
    /// No geometry at all: every probe misses.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Infinite ground plane at `ground_height`.
    pub fn flat(ground_height: f32) -> Self {
        Self {
            ground: Some(ground_height),
            slabs: Vec::new(),
        }
    }

    pub fn with_slab(mut self, slab: Slab) -> Self {
        self.slabs.push(slab);
        self
    }

    /// Height of the ground plane, if there is one.
    pub fn ground(&self) -> Option<f32> {
        self.ground
    }

    pub fn slabs(&self) -> &[Slab] {
        &self.slabs
    }

    /// Heights of every surface spanning the xz position.
    fn surfaces_at(&self, x: f32, z: f32) -> impl Iterator<Item = f32> + '_ {
        self.ground.into_iter().chain(
            self.slabs
                .iter()
                .filter(move |s| s.contains_xz(x, z))
                .map(|s| s.top),
        )
    }

    /// Highest surface at `(x, z)` that is not above `y`.
    pub fn surface_below(&self, x: f32, z: f32, y: f32) -> Option<f32> {
        self.surfaces_at(x, z)
            .filter(|top| *top <= y + SURFACE_EPSILON)
            .fold(None, |best: Option<f32>, top| {
                Some(best.map_or(top, |b| b.max(top)))
            })
    }
}

impl PhysicsQuery for StaticWorld {
    fn raycast(&self, origin: Vec3, direction: Vec3, max_distance: f32) -> Option<f32> {
        if direction.y >= 0.0 {
            return None;
        }
        let mut nearest: Option<f32> = None;
        let mut consider = |top: f32, slab: Option<&Slab>| {
            let t = (origin.y - top) / -direction.y;
            if !(0.0..=max_distance).contains(&t) {
                return;
            }
            let hit = origin + direction * t;
            if slab.is_some_and(|s| !s.contains_xz(hit.x, hit.z)) {
                return;
            }
            nearest = Some(nearest.map_or(t, |n| n.min(t)));
        };
        if let Some(g) = self.ground {
            consider(g, None);
        }
        for slab in &self.slabs {
            consider(slab.top, Some(slab));
        }
        nearest
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn step_world() -> StaticWorld {
        StaticWorld::flat(0.0).with_slab(Slab::new(
            Vec2::new(0.0, 0.0),
            Vec2::new(2.0, 2.0),
            1.0,
        ))
    }

    #[test]
    fn empty_world_never_hits() {
        let w = StaticWorld::empty();
        assert_eq!(w.raycast(Vec3::new(0.0, 5.0, 0.0), Vec3::NEG_Y, 100.0), None);
    }

    #[test]
    fn nearest_surface_wins() {
        let w = step_world();
        let d = w.raycast(Vec3::new(1.0, 3.0, 1.0), Vec3::NEG_Y, 10.0);
        assert_eq!(d, Some(2.0));
        let d = w.raycast(Vec3::new(5.0, 3.0, 5.0), Vec3::NEG_Y, 10.0);
        assert_eq!(d, Some(3.0));
    }

    #[test]
    fn max_distance_limits_hits() {
        let w = StaticWorld::flat(0.0);
        assert_eq!(w.raycast(Vec3::new(0.0, 3.0, 0.0), Vec3::NEG_Y, 2.0), None);
        assert_eq!(w.raycast(Vec3::new(0.0, -1.0, 0.0), Vec3::NEG_Y, 2.0), None);
    }

    #[test]
    fn upward_rays_miss() {
        let w = step_world();
        assert_eq!(w.raycast(Vec3::new(1.0, -3.0, 1.0), Vec3::Y, 10.0), None);
    }

    #[test]
    fn surface_below_ignores_higher_slabs() {
        let w = step_world();
        assert_eq!(w.surface_below(1.0, 1.0, 0.5), Some(0.0));
        assert_eq!(w.surface_below(1.0, 1.0, 1.5), Some(1.0));
        assert_eq!(w.surface_below(1.0, 1.0, -1.0), None);
    }

    #[test]
    fn slab_corners_are_normalized() {
        let s = Slab::new(Vec2::new(2.0, 2.0), Vec2::new(-2.0, -2.0), 0.0);
        assert!(s.contains_xz(0.0, 0.0));
    }
}
