//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only, owned by `GameState`
//! - Time comes from the tick counter, never the wall clock
//! - No rendering, audio or file I/O

pub mod effects;
pub mod geometry;
pub mod hazard;
pub mod helper;
pub mod level;
pub mod placement;
pub mod player;
pub mod state;
pub mod tick;

pub use effects::{ActiveEffects, EffectKind, TimedEffect};
pub use geometry::{FIELD, Rect, point_in_rect, rects_overlap};
pub use hazard::{HAZARD_SIZE, Hazard, HazardKind};
pub use helper::Helper;
pub use level::hazard_count;
pub use placement::{Exclusion, MAX_PLACEMENT_ATTEMPTS, generate_walls, place_points};
pub use player::{Facing, Player};
pub use state::{
    COLLECTIBLE_EXCLUSION_RADIUS, COLLECTIBLE_RADIUS, Collectible, CollectibleKind,
    DeathAnimation, GameEvent, GameState, SessionPhase, Star,
};
pub use tick::{TickInput, apply_collectible, apply_hazard_contact, tick};
