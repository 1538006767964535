//! Helper companion
//!
//! Joins the player from `HELPER_UNLOCK_LEVEL` on. Trails the player, tops up
//! the resource meter while close, and shoves nearby hazards away on two
//! independent cooldowns.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::hazard::{Hazard, clamp_inside_field};
use super::player::Player;
use crate::{polar_to_cartesian, wrap_to_field};

pub const HELPER_SPEED: f32 = 3.0;
/// Helper idles once this close to the player
pub const FOLLOW_DISTANCE: f32 = 100.0;
pub const RECHARGE_RANGE: f32 = 150.0;
/// Resource restored per tick inside recharge range
pub const RECHARGE_RATE: f32 = 0.5;

pub const BLOCK_RADIUS: f32 = 60.0;
pub const BLOCK_PUSH: f32 = 50.0;
pub const BLOCK_COOLDOWN_MS: u64 = 2000;

pub const BOUNCE_RADIUS: f32 = 80.0;
pub const BOUNCE_STRENGTH: f32 = 50.0;
pub const BOUNCE_DISTANCE_FACTOR: f32 = 3.0;
pub const BOUNCE_JITTER_DEG: f32 = 30.0;
pub const BOUNCE_COOLDOWN_MS: u64 = 500;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Helper {
    pub pos: Vec2,
    pub last_block_ms: Option<u64>,
    pub last_bounce_ms: Option<u64>,
    /// A hazard was pushed this tick
    pub blocking: bool,
    /// A hazard is inside the bounce radius
    pub protecting: bool,
}

impl Helper {
    pub fn new(pos: Vec2) -> Self {
        Self {
            pos,
            last_block_ms: None,
            last_bounce_ms: None,
            blocking: false,
            protecting: false,
        }
    }

    fn ready(last: Option<u64>, now_ms: u64, cooldown_ms: u64) -> bool {
        last.is_none_or(|t| now_ms.saturating_sub(t) > cooldown_ms)
    }

    /// One tick of follow, recharge, block and bounce
    pub fn update<R: Rng + ?Sized>(
        &mut self,
        player: &mut Player,
        hazards: &mut [Hazard],
        now_ms: u64,
        rng: &mut R,
    ) {
        let to_player = player.pos - self.pos;
        let distance = to_player.length();
        if distance > FOLLOW_DISTANCE {
            self.pos += to_player / distance * HELPER_SPEED;
        }
        if distance < RECHARGE_RANGE {
            player.restore(RECHARGE_RATE);
        }

        self.blocking = false;
        if Self::ready(self.last_block_ms, now_ms, BLOCK_COOLDOWN_MS) {
            let target = hazards.iter_mut().find(|h| {
                let d = h.pos.distance(self.pos);
                d > 0.0 && d < BLOCK_RADIUS
            });
            if let Some(hazard) = target {
                let dir = (hazard.pos - self.pos).normalize_or_zero();
                hazard.pos = clamp_inside_field(hazard.pos + dir * BLOCK_PUSH);
                self.blocking = true;
                self.last_block_ms = Some(now_ms);
                log::debug!("Helper blocked {}", hazard.kind.name());
            }
        }

        self.protecting = hazards
            .iter()
            .any(|h| h.pos.distance(self.pos) < BOUNCE_RADIUS);
        if self.protecting && Self::ready(self.last_bounce_ms, now_ms, BOUNCE_COOLDOWN_MS) {
            let target = hazards.iter_mut().find(|h| {
                let d = h.pos.distance(self.pos);
                d > 0.0 && d < BOUNCE_RADIUS
            });
            if let Some(hazard) = target {
                let offset = hazard.pos - self.pos;
                let jitter = rng
                    .random_range(-BOUNCE_JITTER_DEG..=BOUNCE_JITTER_DEG)
                    .to_radians();
                let angle = offset.y.atan2(offset.x) + jitter;
                let bounce = polar_to_cartesian(BOUNCE_STRENGTH * BOUNCE_DISTANCE_FACTOR, angle);
                hazard.pos = clamp_inside_field(wrap_to_field(self.pos + bounce));
                self.last_bounce_ms = Some(now_ms);
                log::debug!("Helper bounced {}", hazard.kind.name());
            }
        }
    }
}
