//! Hazard actors
//!
//! Hazards chase the player one axis at a time, without pathfinding. A step
//! that would put the hazard's box into a wall or past the field edge is
//! dropped and the hazard waits for the next tick.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::geometry::{FIELD, Rect, overlaps_any};
use crate::consts::{FIELD_HEIGHT, FIELD_WIDTH};

/// Side of a hazard's square collision box
pub const HAZARD_SIZE: f32 = 30.0;

/// Clamp a hazard position so its whole box stays on the field
#[inline]
pub fn clamp_inside_field(pos: Vec2) -> Vec2 {
    let half = HAZARD_SIZE / 2.0;
    Vec2::new(
        pos.x.clamp(half, FIELD_WIDTH - half),
        pos.y.clamp(half, FIELD_HEIGHT - half),
    )
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HazardKind {
    Depression,
    Anxiety,
    Fatigue,
    Stress,
}

impl HazardKind {
    pub const ALL: [HazardKind; 4] = [
        HazardKind::Depression,
        HazardKind::Anxiety,
        HazardKind::Fatigue,
        HazardKind::Stress,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            HazardKind::Depression => "Depression",
            HazardKind::Anxiety => "Anxiety",
            HazardKind::Fatigue => "Fatigue",
            HazardKind::Stress => "Stress",
        }
    }

    /// Erratic hazards wander instead of pursuing
    #[inline]
    pub fn is_erratic(&self) -> bool {
        matches!(self, HazardKind::Depression)
    }

    /// Uniformly random kind
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self::ALL[rng.random_range(0..Self::ALL.len())]
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Hazard {
    pub kind: HazardKind,
    pub pos: Vec2,
    pub speed: f32,
}

impl Hazard {
    pub fn new(kind: HazardKind, pos: Vec2, speed: f32) -> Self {
        Self { kind, pos, speed }
    }

    #[inline]
    pub fn rect(&self) -> Rect {
        Rect::centered(self.pos, HAZARD_SIZE, HAZARD_SIZE)
    }

    /// Advance one tick toward `target` (or randomly, for erratic kinds)
    pub fn step<R: Rng + ?Sized>(&mut self, target: Vec2, walls: &[Rect], rng: &mut R) {
        let delta = if self.kind.is_erratic() {
            Vec2::new(self.jitter(rng), self.jitter(rng))
        } else {
            Vec2::new(
                axis_toward(self.pos.x, target.x),
                axis_toward(self.pos.y, target.y),
            ) * self.speed
        };

        let candidate = self.pos + delta;
        let rect = Rect::centered(candidate, HAZARD_SIZE, HAZARD_SIZE);
        if rect.within_x(&FIELD) && rect.within_y(&FIELD) && !overlaps_any(&rect, walls) {
            self.pos = candidate;
        }
    }

    /// One full step either way
    #[inline]
    fn jitter<R: Rng + ?Sized>(&self, rng: &mut R) -> f32 {
        if rng.random_bool(0.5) {
            self.speed
        } else {
            -self.speed
        }
    }
}

#[inline]
fn axis_toward(from: f32, to: f32) -> f32 {
    if from < to {
        1.0
    } else if from > to {
        -1.0
    } else {
        0.0
    }
}
