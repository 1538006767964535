//! Random placement of collectibles and walls
//!
//! Placement is best-effort rejection sampling with a finite attempt budget.
//! When the budget runs out the caller gets whatever was placed so far and a
//! warning is logged; generation never blocks and never fails.

use glam::Vec2;
use rand::Rng;

use super::geometry::{Rect, overlaps_any, rects_overlap};
use crate::consts::*;
use crate::field_center;

/// Draws allowed per placement batch
pub const MAX_PLACEMENT_ATTEMPTS: u32 = 1000;

/// Margin between procedural walls and the field edge
const WALL_EDGE_MARGIN: i32 = 50;
/// Procedural walls whose corners are this close on both axes are rejected
const WALL_SPACING: f32 = 100.0;
const WALL_WIDTHS: [f32; 3] = [30.0, 150.0, 200.0];
const WALL_HEIGHTS: [f32; 3] = [30.0, 100.0, 150.0];

/// Hand-authored layouts for levels 1-5
const FIXED_LAYOUTS: [&[Rect]; 5] = [
    // 1: open layout with four pillars and a center platform
    &[
        Rect::new(100.0, 100.0, 50.0, 150.0),
        Rect::new(650.0, 100.0, 50.0, 150.0),
        Rect::new(100.0, 350.0, 50.0, 150.0),
        Rect::new(650.0, 350.0, 50.0, 150.0),
        Rect::new(300.0, 250.0, 200.0, 30.0),
    ],
    // 2: corridors
    &[
        Rect::new(150.0, 100.0, 30.0, 400.0),
        Rect::new(620.0, 100.0, 30.0, 400.0),
        Rect::new(150.0, 250.0, 150.0, 30.0),
        Rect::new(500.0, 250.0, 150.0, 30.0),
        Rect::new(350.0, 400.0, 100.0, 30.0),
    ],
    // 3: diamond
    &[
        Rect::new(400.0, 50.0, 30.0, 100.0),
        Rect::new(250.0, 200.0, 30.0, 100.0),
        Rect::new(550.0, 200.0, 30.0, 100.0),
        Rect::new(400.0, 350.0, 30.0, 100.0),
        Rect::new(250.0, 200.0, 300.0, 30.0),
        Rect::new(250.0, 300.0, 300.0, 30.0),
    ],
    // 4: maze with several routes
    &[
        Rect::new(150.0, 100.0, 200.0, 30.0),
        Rect::new(450.0, 100.0, 200.0, 30.0),
        Rect::new(150.0, 100.0, 30.0, 200.0),
        Rect::new(620.0, 100.0, 30.0, 200.0),
        Rect::new(300.0, 250.0, 200.0, 30.0),
        Rect::new(150.0, 400.0, 30.0, 100.0),
        Rect::new(620.0, 400.0, 30.0, 100.0),
        Rect::new(150.0, 470.0, 200.0, 30.0),
        Rect::new(450.0, 470.0, 200.0, 30.0),
    ],
    // 5: barriers top and bottom, side walls, platforms
    &[
        Rect::new(200.0, 50.0, 400.0, 30.0),
        Rect::new(100.0, 150.0, 30.0, 300.0),
        Rect::new(670.0, 150.0, 30.0, 300.0),
        Rect::new(200.0, 250.0, 150.0, 30.0),
        Rect::new(450.0, 250.0, 150.0, 30.0),
        Rect::new(300.0, 350.0, 200.0, 30.0),
        Rect::new(200.0, 520.0, 400.0, 30.0),
    ],
];

/// Disk that placed points must stay out of
#[derive(Debug, Clone, Copy)]
pub struct Exclusion {
    pub center: Vec2,
    pub radius: f32,
}

/// Square around the spawn point that must stay free of walls
pub fn safe_zone() -> Rect {
    Rect::centered(
        field_center(),
        SAFE_ZONE_HALF_SIZE * 2.0,
        SAFE_ZONE_HALF_SIZE * 2.0,
    )
}

/// Place up to `count` points of the given pickup radius.
///
/// Accepted points are inside the field by at least `radius`, at least
/// `2 * radius` apart from each other, their bounding square touches no wall,
/// and they lie outside `exclusion` (if any).
pub fn place_points<R: Rng + ?Sized>(
    rng: &mut R,
    count: usize,
    radius: f32,
    walls: &[Rect],
    exclusion: Option<Exclusion>,
) -> Vec<Vec2> {
    let mut placed: Vec<Vec2> = Vec::with_capacity(count);
    if count == 0 {
        return placed;
    }

    for _ in 0..MAX_PLACEMENT_ATTEMPTS {
        let candidate = Vec2::new(
            rng.random_range(radius..=FIELD_WIDTH - radius),
            rng.random_range(radius..=FIELD_HEIGHT - radius),
        );

        if let Some(zone) = exclusion {
            if candidate.distance(zone.center) < zone.radius {
                continue;
            }
        }

        let footprint = Rect::centered(candidate, radius * 2.0, radius * 2.0);
        if overlaps_any(&footprint, walls) {
            continue;
        }

        if placed
            .iter()
            .any(|other| other.distance(candidate) < radius * 2.0)
        {
            continue;
        }

        placed.push(candidate);
        if placed.len() == count {
            return placed;
        }
    }

    log::warn!(
        "Could only place {}/{} points after {} attempts",
        placed.len(),
        count,
        MAX_PLACEMENT_ATTEMPTS
    );
    placed
}

/// Sample a single point whose `size` square avoids every wall and which
/// satisfies `accept`. Returns `None` when the attempt budget runs out.
pub fn sample_open_point<R, F>(
    rng: &mut R,
    margin: f32,
    size: f32,
    walls: &[Rect],
    accept: F,
) -> Option<Vec2>
where
    R: Rng + ?Sized,
    F: Fn(Vec2) -> bool,
{
    for _ in 0..MAX_PLACEMENT_ATTEMPTS {
        let candidate = Vec2::new(
            rng.random_range(margin..=FIELD_WIDTH - margin),
            rng.random_range(margin..=FIELD_HEIGHT - margin),
        );
        if !accept(candidate) {
            continue;
        }
        if overlaps_any(&Rect::centered(candidate, size, size), walls) {
            continue;
        }
        return Some(candidate);
    }
    None
}

/// Hand-authored layout for `level`, if there is one
pub fn fixed_layout(level: u32) -> Option<&'static [Rect]> {
    match level {
        1..=5 => Some(FIXED_LAYOUTS[(level - 1) as usize]),
        _ => None,
    }
}

/// Procedural layout for levels past the hand-authored ones.
///
/// Tries `8 + level` candidates and drops any whose corner sits within
/// `WALL_SPACING` of an earlier wall on both axes, so paths stay open.
pub fn procedural_layout<R: Rng + ?Sized>(rng: &mut R, level: u32) -> Vec<Rect> {
    let candidates = 8 + level;
    let mut layout: Vec<Rect> = Vec::with_capacity(candidates as usize);

    for _ in 0..candidates {
        let w = WALL_WIDTHS[rng.random_range(0..WALL_WIDTHS.len())];
        let h = WALL_HEIGHTS[rng.random_range(0..WALL_HEIGHTS.len())];
        let max_x = FIELD_WIDTH as i32 - w as i32 - WALL_EDGE_MARGIN;
        let max_y = FIELD_HEIGHT as i32 - h as i32 - WALL_EDGE_MARGIN;
        let x = rng.random_range(WALL_EDGE_MARGIN..=max_x) as f32;
        let y = rng.random_range(WALL_EDGE_MARGIN..=max_y) as f32;

        let crowded = layout
            .iter()
            .any(|wall| (x - wall.x).abs() < WALL_SPACING && (y - wall.y).abs() < WALL_SPACING);
        if !crowded {
            layout.push(Rect::new(x, y, w, h));
        }
    }

    layout
}

/// Walls for `level`, with anything touching the spawn safe zone removed
pub fn generate_walls<R: Rng + ?Sized>(rng: &mut R, level: u32) -> Vec<Rect> {
    let layout = match fixed_layout(level) {
        Some(fixed) => fixed.to_vec(),
        None => procedural_layout(rng, level),
    };

    let zone = safe_zone();
    let walls: Vec<Rect> = layout
        .into_iter()
        .filter(|wall| !rects_overlap(wall, &zone))
        .collect();

    log::debug!("Level {} walls: {}", level, walls.len());
    walls
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::geometry::FIELD;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_fixed_layouts_exist_for_first_five_levels() {
        for level in 1..=5 {
            assert!(fixed_layout(level).is_some());
        }
        assert!(fixed_layout(0).is_none());
        assert!(fixed_layout(6).is_none());
    }

    #[test]
    fn test_fixed_walls_avoid_safe_zone() {
        let mut rng = Pcg32::seed_from_u64(1);
        let zone = safe_zone();
        for level in 1..=5 {
            let walls = generate_walls(&mut rng, level);
            assert!(!walls.is_empty(), "level {level} should keep some walls");
            for wall in &walls {
                assert!(!rects_overlap(wall, &zone), "level {level}: {wall:?}");
            }
        }
    }

    #[test]
    fn test_center_platform_is_removed_on_level_one() {
        let mut rng = Pcg32::seed_from_u64(1);
        let walls = generate_walls(&mut rng, 1);
        assert_eq!(walls.len(), 4);
        assert!(!walls.contains(&Rect::new(300.0, 250.0, 200.0, 30.0)));
    }

    #[test]
    fn test_procedural_walls_are_spaced() {
        let mut rng = Pcg32::seed_from_u64(99);
        for level in 6..20 {
            let layout = procedural_layout(&mut rng, level);
            assert!(layout.len() <= (8 + level) as usize);
            for (i, a) in layout.iter().enumerate() {
                assert!(a.left() >= 50.0 && a.right() <= FIELD_WIDTH - 50.0);
                assert!(a.top() >= 50.0 && a.bottom() <= FIELD_HEIGHT - 50.0);
                for b in &layout[i + 1..] {
                    let close =
                        (a.x - b.x).abs() < WALL_SPACING && (a.y - b.y).abs() < WALL_SPACING;
                    assert!(!close, "{a:?} too close to {b:?}");
                }
            }
        }
    }

    #[test]
    fn test_exhausted_budget_returns_partial() {
        let mut rng = Pcg32::seed_from_u64(5);
        // The whole field is one wall: nothing can be placed
        let walls = [FIELD];
        let points = place_points(&mut rng, 4, 15.0, &walls, None);
        assert!(points.is_empty());

        // Only a strip on the left is open: far fewer than requested fit
        let walls = [Rect::new(100.0, 0.0, FIELD_WIDTH, FIELD_HEIGHT)];
        let points = place_points(&mut rng, 200, 15.0, &walls, None);
        assert!(!points.is_empty());
        assert!(points.len() < 200);
    }

    #[test]
    fn test_exclusion_zone_respected() {
        let mut rng = Pcg32::seed_from_u64(11);
        let zone = Exclusion {
            center: field_center(),
            radius: 250.0,
        };
        let points = place_points(&mut rng, 20, 15.0, &[], Some(zone));
        assert_eq!(points.len(), 20);
        for p in points {
            assert!(p.distance(zone.center) >= zone.radius);
        }
    }

    #[test]
    fn test_same_seed_same_batch() {
        let walls = generate_walls(&mut Pcg32::seed_from_u64(3), 2);
        let zone = Some(Exclusion {
            center: field_center(),
            radius: 50.0,
        });
        let a = place_points(&mut Pcg32::seed_from_u64(77), 8, 15.0, &walls, zone);
        let b = place_points(&mut Pcg32::seed_from_u64(77), 8, 15.0, &walls, zone);
        assert_eq!(a, b);
    }

    #[test]
    fn test_sample_open_point_gives_up() {
        let mut rng = Pcg32::seed_from_u64(8);
        assert!(sample_open_point(&mut rng, 50.0, 30.0, &[FIELD], |_| true).is_none());
        let p = sample_open_point(&mut rng, 50.0, 30.0, &[], |p| p.x > 400.0);
        assert!(p.is_some_and(|p| p.x > 400.0));
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        fn wall_strategy() -> impl Strategy<Value = Rect> {
            (0.0f32..760.0, 0.0f32..560.0, 10.0f32..200.0, 10.0f32..200.0)
                .prop_map(|(x, y, w, h)| Rect::new(x, y, w, h))
        }

        proptest! {
            #[test]
            fn batch_points_are_spaced_and_avoid_walls(
                seed in 0u64..10_000,
                walls in proptest::collection::vec(wall_strategy(), 0..8),
                ex_x in 0.0f32..800.0,
                ex_y in 0.0f32..600.0,
                ex_r in 0.0f32..150.0,
                count in 1usize..12,
            ) {
                let mut rng = Pcg32::seed_from_u64(seed);
                let radius = 15.0;
                let zone = Exclusion { center: Vec2::new(ex_x, ex_y), radius: ex_r };
                let points = place_points(&mut rng, count, radius, &walls, Some(zone));

                prop_assert!(points.len() <= count);
                for (i, p) in points.iter().enumerate() {
                    prop_assert!(p.distance(zone.center) >= zone.radius);
                    let footprint = Rect::centered(*p, radius * 2.0, radius * 2.0);
                    prop_assert!(!overlaps_any(&footprint, &walls));
                    prop_assert!(footprint.within_x(&FIELD) && footprint.within_y(&FIELD));
                    for q in &points[i + 1..] {
                        prop_assert!(p.distance(*q) >= radius * 2.0);
                    }
                }
            }

            #[test]
            fn generated_walls_never_touch_safe_zone(seed in 0u64..10_000, level in 1u32..30) {
                let mut rng = Pcg32::seed_from_u64(seed);
                let zone = safe_zone();
                for wall in generate_walls(&mut rng, level) {
                    prop_assert!(!rects_overlap(&wall, &zone));
                }
            }
        }
    }
}
