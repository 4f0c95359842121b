//! Placement validation
//!
//! Spatial membership and spacing tests shared by every generator and by the
//! player's off-road check. Brute force over the segment and entity lists;
//! counts are in the hundreds so no spatial index is kept.

use glam::{Vec2, Vec3};

use super::aabb::Aabb;
use super::road::RoadSegment;

/// Ground-plane (x, z) projection of a world position
#[inline]
pub fn ground(position: Vec3) -> Vec2 {
    Vec2::new(position.x, position.z)
}

/// True if `point` lies inside any segment's full footprint (lane plus
/// sidewalks) grown by `buffer` on every side
pub fn is_within_road_footprint(point: Vec2, roads: &[RoadSegment], buffer: f32) -> bool {
    roads.iter().any(|road| road.footprint(buffer).contains(point))
}

/// True if a bounding volume touches any segment's footprint grown by `buffer`
pub fn overlaps_road_footprint(aabb: &Aabb, roads: &[RoadSegment], buffer: f32) -> bool {
    roads
        .iter()
        .any(|road| aabb.intersects_ground_rect(&road.footprint(buffer)))
}

/// True if `point` is closer than `min_distance` to any of `others`
pub fn is_too_close<I>(point: Vec2, others: I, min_distance: f32) -> bool
where
    I: IntoIterator<Item = Vec2>,
{
    if min_distance <= 0.0 {
        return false;
    }
    let min_sq = min_distance * min_distance;
    others.into_iter().any(|other| point.distance_squared(other) < min_sq)
}

/// True if `aabb` intersects any of `others`
pub fn overlaps_any<'a, I>(aabb: &Aabb, others: I) -> bool
where
    I: IntoIterator<Item = &'a Aabb>,
{
    others.into_iter().any(|other| aabb.intersects(other))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::road::Orientation;

    fn cross_roads() -> Vec<RoadSegment> {
        vec![
            RoadSegment::new(Vec2::ZERO, Orientation::AlongZ, 10.0, 100.0, 3.0),
            RoadSegment::new(Vec2::new(0.0, 40.0), Orientation::AlongX, 10.0, 100.0, 3.0),
        ]
    }

    #[test]
    fn test_footprint_includes_sidewalk() {
        let roads = cross_roads();
        // Sidewalk of the north-south road spans |x| in (5, 8]
        assert!(is_within_road_footprint(Vec2::new(7.5, 0.0), &roads, 0.0));
        assert!(!is_within_road_footprint(Vec2::new(8.5, 0.0), &roads, 0.0));
        assert!(is_within_road_footprint(Vec2::new(8.5, 0.0), &roads, 1.0));
        // East-west road covers z in [32, 48]
        assert!(is_within_road_footprint(Vec2::new(30.0, 47.0), &roads, 0.0));
        assert!(!is_within_road_footprint(Vec2::new(30.0, 20.0), &roads, 1.0));
    }

    #[test]
    fn test_footprint_respects_segment_ends() {
        let roads = cross_roads();
        assert!(is_within_road_footprint(Vec2::new(0.0, 50.0), &roads, 0.0));
        assert!(!is_within_road_footprint(Vec2::new(0.0, 52.0), &roads, 1.0));
    }

    #[test]
    fn test_aabb_against_footprint() {
        let roads = cross_roads();
        let near = Aabb::from_center(Vec3::new(9.0, 1.0, 0.0), Vec3::splat(1.5));
        let far = Aabb::from_center(Vec3::new(20.0, 1.0, 0.0), Vec3::splat(1.5));
        assert!(overlaps_road_footprint(&near, &roads, 0.0));
        assert!(!overlaps_road_footprint(&far, &roads, 0.5));
    }

    #[test]
    fn test_spacing() {
        let others = [Vec2::new(0.0, 0.0), Vec2::new(10.0, 0.0)];
        assert!(is_too_close(Vec2::new(1.0, 1.0), others, 2.0));
        assert!(!is_too_close(Vec2::new(5.0, 0.0), others, 2.0));
        assert!(!is_too_close(Vec2::new(0.0, 0.0), others, 0.0));
    }

    #[test]
    fn test_overlaps_any() {
        let boxes = [Aabb::from_center(Vec3::ZERO, Vec3::ONE)];
        assert!(overlaps_any(&Aabb::from_center(Vec3::splat(0.5), Vec3::ONE), &boxes));
        assert!(!overlaps_any(&Aabb::from_center(Vec3::splat(5.0), Vec3::ONE), &boxes));
    }
}
