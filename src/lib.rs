//! Dopaman - a top-down arcade game about keeping dopamine levels up
//!
//! Core modules:
//! - `sim`: Deterministic simulation (movement, placement, collisions, game state)
//! - `app`: Fixed-step game loop wiring the simulation to its collaborators
//! - `platform`: Renderer / input collaborator traits
//! - `audio`: Sound effect routing with graceful degradation
//! - `assets`: Asset manifest loading
//! - `highscore`: Single-value high score persistence
//! - `settings`: Player preferences and difficulty presets

pub mod app;
pub mod assets;
pub mod audio;
pub mod highscore;
pub mod platform;
pub mod settings;
pub mod sim;

pub use app::App;
pub use highscore::{FileHighScoreStore, HighScoreStore};
pub use settings::{Difficulty, Settings};

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation rate (ticks per second)
    pub const TICK_RATE: u64 = 60;
    /// Play field dimensions
    pub const FIELD_WIDTH: f32 = 800.0;
    pub const FIELD_HEIGHT: f32 = 600.0;

    /// Resource meter
    pub const MAX_RESOURCE: f32 = 100.0;
    /// Below this the player moves at the reduced speed
    pub const LOW_RESOURCE_THRESHOLD: f32 = 40.0;
    /// Below this the player trembles (unless cured)
    pub const TREMOR_THRESHOLD: f32 = 30.0;

    /// Player defaults
    pub const STARTING_LIVES: u32 = 3;
    pub const PLAYER_BASE_SPEED: f32 = 5.0;
    pub const PLAYER_REDUCED_SPEED: f32 = 3.0;
    pub const SPEED_BOOST_MULTIPLIER: f32 = 1.5;
    /// Square used for wall / field collision while moving
    pub const PLAYER_MOVE_SIZE: f32 = 30.0;
    /// Taller box used for pickups and hazard contact
    pub const PLAYER_HIT_WIDTH: f32 = 40.0;
    pub const PLAYER_HIT_HEIGHT: f32 = 60.0;

    /// Duration of every timed effect
    pub const EFFECT_DURATION_MS: u64 = 5000;

    /// Level progression
    pub const LEVEL_BONUS: u64 = 100;
    pub const HAZARD_SPEED_GROWTH: f32 = 1.05;
    pub const PLAYER_SPEED_GROWTH: f32 = 1.02;
    /// Level at which the helper companion joins
    pub const HELPER_UNLOCK_LEVEL: u32 = 3;

    /// Half-size of the square around the spawn point kept free of walls
    pub const SAFE_ZONE_HALF_SIZE: f32 = 100.0;
    /// Hazards are kept at least this far from a respawning player
    pub const SAFE_SPAWN_RADIUS: f32 = 200.0;
    pub const SAFE_SPAWN_JITTER: f32 = 50.0;

    /// Frames in the faded death animation
    pub const DEATH_ANIMATION_FRAMES: u32 = 10;

    /// Background star count
    pub const STAR_COUNT: usize = 100;
}

/// Center of the play field (player spawn point)
#[inline]
pub fn field_center() -> Vec2 {
    Vec2::new(consts::FIELD_WIDTH / 2.0, consts::FIELD_HEIGHT / 2.0)
}

/// Convert polar (r, theta) to cartesian (x, y)
#[inline]
pub fn polar_to_cartesian(r: f32, theta: f32) -> Vec2 {
    Vec2::new(r * theta.cos(), r * theta.sin())
}

/// Wrap a position into the field (Euclidean modulo on each axis)
#[inline]
pub fn wrap_to_field(pos: Vec2) -> Vec2 {
    Vec2::new(
        pos.x.rem_euclid(consts::FIELD_WIDTH),
        pos.y.rem_euclid(consts::FIELD_HEIGHT),
    )
}

/// Clamp a position into the field (inclusive edges)
#[inline]
pub fn clamp_to_field(pos: Vec2) -> Vec2 {
    Vec2::new(
        pos.x.clamp(0.0, consts::FIELD_WIDTH),
        pos.y.clamp(0.0, consts::FIELD_HEIGHT),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wrap_to_field() {
        let p = wrap_to_field(Vec2::new(-10.0, 650.0));
        assert!((p.x - 790.0).abs() < 1e-4);
        assert!((p.y - 50.0).abs() < 1e-4);
    }

    #[test]
    fn test_clamp_to_field() {
        let p = clamp_to_field(Vec2::new(-10.0, 650.0));
        assert_eq!(p, Vec2::new(0.0, consts::FIELD_HEIGHT));
    }
}
