//! The player character: resource meter, movement, tremor

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::effects::{ActiveEffects, EffectKind};
use super::geometry::{FIELD, Rect, overlaps_any};
use crate::consts::*;
use crate::field_center;

/// Which way the sprite faces (last horizontal input)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Facing {
    Left,
    #[default]
    Right,
}

/// Player state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub pos: Vec2,
    /// Dopamine meter, always within [0, MAX_RESOURCE]
    pub resource: f32,
    /// Speed before low-resource and boost modifiers
    pub base_speed: f32,
    pub lives: u32,
    pub score: u64,
    pub effects: ActiveEffects,
    pub facing: Facing,
    pub moving: bool,
    pub tremor: bool,
}

impl Default for Player {
    fn default() -> Self {
        Self::new()
    }
}

impl Player {
    pub fn new() -> Self {
        Self {
            pos: field_center(),
            resource: MAX_RESOURCE,
            base_speed: PLAYER_BASE_SPEED,
            lives: STARTING_LIVES,
            score: 0,
            effects: ActiveEffects::default(),
            facing: Facing::Right,
            moving: false,
            tremor: false,
        }
    }

    /// Box checked against walls and field edges while moving
    #[inline]
    pub fn move_rect_at(pos: Vec2) -> Rect {
        Rect::centered(pos, PLAYER_MOVE_SIZE, PLAYER_MOVE_SIZE)
    }

    /// Box used for pickups and hazard contact (sprite-sized, offset upward)
    #[inline]
    pub fn hit_rect(&self) -> Rect {
        Rect::new(
            self.pos.x - PLAYER_HIT_WIDTH / 2.0,
            self.pos.y - PLAYER_HIT_HEIGHT / 2.0,
            PLAYER_HIT_WIDTH,
            PLAYER_HIT_HEIGHT,
        )
    }

    /// Speed for this tick after the low-resource penalty and speed boost
    pub fn effective_speed(&self) -> f32 {
        let speed = if self.resource < LOW_RESOURCE_THRESHOLD {
            PLAYER_REDUCED_SPEED
        } else {
            self.base_speed
        };
        if self.effects.is_active(EffectKind::SpeedBoost) {
            speed * SPEED_BOOST_MULTIPLIER
        } else {
            speed
        }
    }

    pub fn restore(&mut self, amount: f32) {
        self.resource = (self.resource + amount).clamp(0.0, MAX_RESOURCE);
    }

    pub fn drain(&mut self, amount: f32) {
        self.resource = (self.resource - amount).clamp(0.0, MAX_RESOURCE);
    }

    pub fn is_shielded(&self) -> bool {
        self.effects.is_active(EffectKind::Shield)
    }

    /// Move one tick in direction `axis` (components in {-1, 0, 1}).
    ///
    /// The candidate box must clear every wall; each axis is then committed
    /// on its own if the box stays inside the field on that axis, so the
    /// player can slide along an edge while pushing diagonally into it.
    pub fn step<R: Rng + ?Sized>(&mut self, axis: Vec2, walls: &[Rect], rng: &mut R) {
        let axis = if self.effects.is_active(EffectKind::Confusion) {
            -axis
        } else {
            axis
        };

        self.moving = axis != Vec2::ZERO;
        if axis.x > 0.0 {
            self.facing = Facing::Right;
        } else if axis.x < 0.0 {
            self.facing = Facing::Left;
        }

        let candidate = self.pos + axis * self.effective_speed();
        let rect = Self::move_rect_at(candidate);
        if !overlaps_any(&rect, walls) {
            if rect.within_x(&FIELD) {
                self.pos.x = candidate.x;
            }
            if rect.within_y(&FIELD) {
                self.pos.y = candidate.y;
            }
        }

        self.update_tremor();
        if self.tremor {
            self.pos.x += if rng.random_bool(0.5) { 1.0 } else { -1.0 };
            self.pos.y += if rng.random_bool(0.5) { 1.0 } else { -1.0 };
        }
    }

    /// Tremor follows the resource level unless a cure is running
    pub fn update_tremor(&mut self) {
        if !self.effects.is_active(EffectKind::Cure) {
            self.tremor = self.resource < TREMOR_THRESHOLD;
        }
    }

    /// Back to the spawn point after losing a life
    pub fn respawn(&mut self) {
        self.pos = field_center();
        self.tremor = false;
        self.effects.clear(EffectKind::Confusion);
        self.effects.clear(EffectKind::Shield);
    }
}
