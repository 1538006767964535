//! Game state and core simulation types
//!
//! Everything the simulation touches lives in `GameState`, including the
//! seeded RNG, so a run is fully determined by its seed and input sequence.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::effects::EffectKind;
use super::geometry::Rect;
use super::hazard::{Hazard, HazardKind};
use super::helper::Helper;
use super::player::Player;
use crate::consts::*;
use crate::settings::Difficulty;

/// Current phase of the session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionPhase {
    /// Title screen
    Menu,
    /// Choosing Easy / Medium / Hard
    DifficultySelect,
    /// How-to-play screen
    Tutorial,
    /// Active gameplay
    Playing,
    /// Game is paused
    Paused,
    /// Run ended; waiting for restart or quit
    GameOver,
    /// Session finished, the loop should exit
    Quit,
}

impl SessionPhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            SessionPhase::Menu => "menu",
            SessionPhase::DifficultySelect => "difficulty_select",
            SessionPhase::Tutorial => "tutorial",
            SessionPhase::Playing => "playing",
            SessionPhase::Paused => "paused",
            SessionPhase::GameOver => "game_over",
            SessionPhase::Quit => "quit",
        }
    }
}

/// Pickup radius shared by every collectible
pub const COLLECTIBLE_RADIUS: f32 = 15.0;
/// Collectibles never spawn this close to the player
pub const COLLECTIBLE_EXCLUSION_RADIUS: f32 = 50.0;

/// Collectible categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CollectibleKind {
    Dopamine,
    Medicine,
    Levodopa,
    Dbs,
    StressManagement,
    Mirapex,
    SuperSpeed,
    Shield,
}

impl CollectibleKind {
    pub const ALL: [CollectibleKind; 8] = [
        CollectibleKind::Dopamine,
        CollectibleKind::Medicine,
        CollectibleKind::Levodopa,
        CollectibleKind::Dbs,
        CollectibleKind::StressManagement,
        CollectibleKind::Mirapex,
        CollectibleKind::SuperSpeed,
        CollectibleKind::Shield,
    ];

    /// How many of this kind are placed per level
    pub fn batch_size(&self) -> usize {
        match self {
            CollectibleKind::Dopamine | CollectibleKind::StressManagement => 2,
            _ => 1,
        }
    }

    /// Resource restored on pickup (None for pure power-ups)
    pub fn resource_gain(&self) -> Option<f32> {
        match self {
            CollectibleKind::Dopamine | CollectibleKind::StressManagement => Some(20.0),
            CollectibleKind::Medicine => Some(30.0),
            CollectibleKind::Levodopa => Some(50.0),
            CollectibleKind::Dbs => Some(70.0),
            CollectibleKind::Mirapex | CollectibleKind::SuperSpeed | CollectibleKind::Shield => {
                None
            }
        }
    }

    pub fn score_value(&self) -> u64 {
        match self {
            CollectibleKind::Dopamine | CollectibleKind::StressManagement => 20,
            CollectibleKind::Medicine | CollectibleKind::Mirapex => 30,
            CollectibleKind::SuperSpeed => 40,
            CollectibleKind::Levodopa | CollectibleKind::Shield => 50,
            CollectibleKind::Dbs => 70,
        }
    }

    /// Timed effect started on pickup
    pub fn effect(&self) -> Option<EffectKind> {
        match self {
            CollectibleKind::Levodopa => Some(EffectKind::ResourceBoost),
            CollectibleKind::Dbs => Some(EffectKind::Cure),
            CollectibleKind::SuperSpeed => Some(EffectKind::SpeedBoost),
            CollectibleKind::Shield => Some(EffectKind::Shield),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            CollectibleKind::Dopamine => "Dopamine",
            CollectibleKind::Medicine => "Medicine",
            CollectibleKind::Levodopa => "Levodopa",
            CollectibleKind::Dbs => "DBS",
            CollectibleKind::StressManagement => "Stress Management",
            CollectibleKind::Mirapex => "Mirapex",
            CollectibleKind::SuperSpeed => "Super Speed",
            CollectibleKind::Shield => "Shield",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Collectible {
    pub kind: CollectibleKind,
    pub pos: Vec2,
}

/// Background star (decorative only)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Star {
    pub pos: Vec2,
    pub size: u8,
    pub speed: f32,
}

impl Star {
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self {
            pos: Vec2::new(
                rng.random_range(0.0..=FIELD_WIDTH),
                rng.random_range(0.0..=FIELD_HEIGHT),
            ),
            size: rng.random_range(1..=3),
            speed: rng.random_range(0.1..0.5),
        }
    }

    /// Fall one tick; re-enter at the top in a random column
    pub fn drift<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.pos.y += self.speed;
        if self.pos.y > FIELD_HEIGHT {
            self.pos.y = 0.0;
            self.pos.x = rng.random_range(0.0..=FIELD_WIDTH);
        }
    }
}

/// Ticks each death animation frame is held for
pub const DEATH_FRAME_TICKS: u32 = 6;

/// Fading sprite shown after a hit; the simulation is frozen while it plays
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DeathAnimation {
    pub ticks: u32,
}

impl DeathAnimation {
    #[inline]
    pub fn frame(&self) -> u32 {
        self.ticks / DEATH_FRAME_TICKS
    }

    pub fn finished(&self) -> bool {
        self.frame() >= DEATH_ANIMATION_FRAMES
    }

    /// Sprite alpha for the current frame (255 fading to 30)
    pub fn alpha(&self) -> u8 {
        let frame = self.frame().min(DEATH_ANIMATION_FRAMES - 1);
        255u32.saturating_sub(frame * 25) as u8
    }
}

/// Notable things that happened during a tick, drained by the game loop
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GameEvent {
    Collected(CollectibleKind),
    HazardContact(HazardKind),
    LifeLost { lives_left: u32 },
    LevelStarted(u32),
    LevelComplete(u32),
    /// Score beat the stored high score at game over
    NewHighScore(u64),
    GameOver { score: u64 },
    Quit,
}

/// Complete session state
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    pub(crate) rng: Pcg32,
    pub phase: SessionPhase,
    pub difficulty: Difficulty,
    /// Highlighted entry on the difficulty screen
    pub menu_index: usize,
    /// Current level (1-based)
    pub level: u32,
    /// Simulation tick counter (only advances during play)
    pub time_ticks: u64,
    pub player: Player,
    pub hazards: Vec<Hazard>,
    /// Speed given to hazards created this level
    pub hazard_speed: f32,
    pub collectibles: Vec<Collectible>,
    pub walls: Vec<Rect>,
    pub helper: Option<Helper>,
    pub stars: Vec<Star>,
    pub death_animation: Option<DeathAnimation>,
    /// Best score seen so far (loaded at startup)
    pub high_score: u64,
    events: Vec<GameEvent>,
}

impl GameState {
    /// Create a session sitting on the title screen
    pub fn new(seed: u64, difficulty: Difficulty, high_score: u64) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed);
        let stars = (0..STAR_COUNT).map(|_| Star::random(&mut rng)).collect();
        Self {
            seed,
            rng,
            phase: SessionPhase::Menu,
            difficulty,
            menu_index: difficulty.index(),
            level: 1,
            time_ticks: 0,
            player: Player::new(),
            hazards: Vec::new(),
            hazard_speed: difficulty.hazard_speed(),
            collectibles: Vec::new(),
            walls: Vec::new(),
            helper: None,
            stars,
            death_animation: None,
            high_score,
            events: Vec::new(),
        }
    }

    /// Simulation clock in milliseconds
    #[inline]
    pub fn now_ms(&self) -> u64 {
        self.time_ticks * 1000 / TICK_RATE
    }

    /// True once every collectible of the level has been picked up
    pub fn level_complete(&self) -> bool {
        self.collectibles.is_empty()
    }

    pub fn remaining(&self, kind: CollectibleKind) -> usize {
        self.collectibles.iter().filter(|c| c.kind == kind).count()
    }

    pub(crate) fn emit(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Take every event raised since the last call
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    pub(crate) fn set_phase(&mut self, phase: SessionPhase) {
        if self.phase != phase {
            log::info!("Phase {} -> {}", self.phase.as_str(), phase.as_str());
            self.phase = phase;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_state() {
        let state = GameState::new(1, Difficulty::Hard, 500);
        assert_eq!(state.phase, SessionPhase::Menu);
        assert_eq!(state.level, 1);
        assert_eq!(state.high_score, 500);
        assert_eq!(state.hazard_speed, Difficulty::Hard.hazard_speed());
        assert_eq!(state.stars.len(), STAR_COUNT);
        assert_eq!(state.player.lives, STARTING_LIVES);
    }

    #[test]
    fn test_clock() {
        let mut state = GameState::new(1, Difficulty::Medium, 0);
        state.time_ticks = 60;
        assert_eq!(state.now_ms(), 1000);
        state.time_ticks = 300;
        assert_eq!(state.now_ms(), 5000);
    }

    #[test]
    fn test_batch_sizes() {
        let total: usize = CollectibleKind::ALL.iter().map(|k| k.batch_size()).sum();
        assert_eq!(total, 10);
    }

    #[test]
    fn test_death_alpha_fades() {
        let first = DeathAnimation { ticks: 0 };
        let last = DeathAnimation {
            ticks: 9 * DEATH_FRAME_TICKS,
        };
        assert_eq!(first.alpha(), 255);
        assert_eq!(last.alpha(), 30);
        assert!(!last.finished());
        assert!(DeathAnimation {
            ticks: 10 * DEATH_FRAME_TICKS
        }
        .finished());
    }

    #[test]
    fn test_star_wraps_to_top() {
        let mut rng = Pcg32::seed_from_u64(4);
        let mut star = Star {
            pos: Vec2::new(10.0, FIELD_HEIGHT - 0.1),
            size: 2,
            speed: 0.3,
        };
        star.drift(&mut rng);
        assert_eq!(star.pos.y, 0.0);
    }

    #[test]
    fn test_events_drain() {
        let mut state = GameState::new(1, Difficulty::Easy, 0);
        state.emit(GameEvent::LevelStarted(1));
        assert_eq!(state.drain_events(), vec![GameEvent::LevelStarted(1)]);
        assert!(state.drain_events().is_empty());
    }
}
