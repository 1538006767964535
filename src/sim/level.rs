//! Level and session control: setup, progression, respawn, game over

use glam::Vec2;
use rand::Rng;

use super::hazard::{HAZARD_SIZE, Hazard, HazardKind, clamp_inside_field};
use super::helper::Helper;
use super::placement::{Exclusion, generate_walls, place_points, sample_open_point};
use super::player::Player;
use super::state::{
    COLLECTIBLE_EXCLUSION_RADIUS, COLLECTIBLE_RADIUS, Collectible, CollectibleKind, GameEvent,
    GameState, SessionPhase,
};
use crate::consts::*;
use crate::{clamp_to_field, field_center, polar_to_cartesian};

/// Margin from the field edge for hazard spawns
const HAZARD_SPAWN_MARGIN: f32 = 50.0;
/// Where the helper appears relative to the player
const HELPER_SPAWN_OFFSET: Vec2 = Vec2::new(-50.0, 0.0);

/// Number of hazards on `level`
pub fn hazard_count(level: u32) -> usize {
    match level {
        0 | 1 => 0,
        2 => 1,
        3 => 2,
        _ => 3,
    }
}

impl GameState {
    /// Fresh run at level 1 with the current difficulty
    pub fn begin_session(&mut self) {
        self.player = Player::new();
        self.level = 1;
        self.hazard_speed = self.difficulty.hazard_speed();
        self.helper = None;
        self.death_animation = None;
        self.setup_level();
        self.set_phase(SessionPhase::Playing);
    }

    /// Restart after game over; difficulty is kept
    pub fn restart(&mut self) {
        log::info!("Restarting at {} difficulty", self.difficulty.as_str());
        self.begin_session();
    }

    /// Build the current level: walls, collectibles, hazards, helper
    pub fn setup_level(&mut self) {
        self.player.pos = field_center();
        self.walls = generate_walls(&mut self.rng, self.level);
        self.generate_collectibles();
        self.create_hazards();

        if self.level >= HELPER_UNLOCK_LEVEL {
            let pos = clamp_to_field(self.player.pos + HELPER_SPAWN_OFFSET);
            match self.helper.as_mut() {
                Some(helper) => helper.pos = pos,
                None => {
                    log::info!("Helper joined at level {}", self.level);
                    self.helper = Some(Helper::new(pos));
                }
            }
        }

        log::info!(
            "Level {} ready: {} walls, {} collectibles, {} hazards",
            self.level,
            self.walls.len(),
            self.collectibles.len(),
            self.hazards.len()
        );
        self.emit(GameEvent::LevelStarted(self.level));
    }

    /// Place every collectible batch away from the player
    pub fn generate_collectibles(&mut self) {
        let exclusion = Exclusion {
            center: self.player.pos,
            radius: COLLECTIBLE_EXCLUSION_RADIUS,
        };
        self.collectibles.clear();
        for kind in CollectibleKind::ALL {
            let points = place_points(
                &mut self.rng,
                kind.batch_size(),
                COLLECTIBLE_RADIUS,
                &self.walls,
                Some(exclusion),
            );
            self.collectibles
                .extend(points.into_iter().map(|pos| Collectible { kind, pos }));
        }
    }

    /// Spawn this level's hazards far from the player and out of walls
    pub fn create_hazards(&mut self) {
        self.hazards.clear();
        let player_pos = self.player.pos;
        for _ in 0..hazard_count(self.level) {
            let kind = HazardKind::random(&mut self.rng);
            let spot = sample_open_point(
                &mut self.rng,
                HAZARD_SPAWN_MARGIN,
                HAZARD_SIZE,
                &self.walls,
                |p| p.distance(player_pos) > SAFE_SPAWN_RADIUS,
            );
            match spot {
                Some(pos) => self.hazards.push(Hazard::new(kind, pos, self.hazard_speed)),
                None => log::warn!("No open spot for {} hazard, skipping", kind.name()),
            }
        }
    }

    /// Move to the next level after clearing the current one
    pub fn advance_level(&mut self) {
        let cleared = self.level;
        self.emit(GameEvent::LevelComplete(cleared));
        self.level += 1;
        self.hazard_speed *= HAZARD_SPEED_GROWTH;
        self.player.base_speed =
            PLAYER_BASE_SPEED * PLAYER_SPEED_GROWTH.powi(self.level as i32 - 1);
        self.player.score += LEVEL_BONUS;
        log::info!("Level {} complete, score {}", cleared, self.player.score);
        self.setup_level();
    }

    /// Push hazards near the spawn point out to the safe radius
    pub fn ensure_safe_spawn(&mut self) {
        let center = field_center();
        for hazard in &mut self.hazards {
            let offset = hazard.pos - center;
            let distance = offset.length();
            if distance >= SAFE_SPAWN_RADIUS {
                continue;
            }
            let angle = if distance > 0.0 {
                offset.y.atan2(offset.x)
            } else {
                self.rng.random_range(0.0..std::f32::consts::TAU)
            };
            let jitter = Vec2::new(
                self.rng.random_range(-SAFE_SPAWN_JITTER..=SAFE_SPAWN_JITTER),
                self.rng.random_range(-SAFE_SPAWN_JITTER..=SAFE_SPAWN_JITTER),
            );
            let spot = center + polar_to_cartesian(SAFE_SPAWN_RADIUS, angle) + jitter;
            hazard.pos = clamp_inside_field(spot);
        }
    }

    /// The player was hit: lose a life and start the death animation
    pub(crate) fn lose_life(&mut self) {
        self.player.lives = self.player.lives.saturating_sub(1);
        log::info!("Life lost, {} left", self.player.lives);
        self.emit(GameEvent::LifeLost {
            lives_left: self.player.lives,
        });
        self.death_animation = Some(Default::default());

        if self.player.lives == 0 {
            self.game_over();
        } else {
            self.player.respawn();
            self.ensure_safe_spawn();
        }
    }

    /// End the run; a beaten high score is raised exactly once
    pub fn game_over(&mut self) {
        if self.phase == SessionPhase::GameOver {
            return;
        }
        let score = self.player.score;
        log::info!("Game over at level {} with score {}", self.level, score);
        if score > self.high_score {
            self.high_score = score;
            self.emit(GameEvent::NewHighScore(score));
        }
        self.emit(GameEvent::GameOver { score });
        self.set_phase(SessionPhase::GameOver);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::Difficulty;
    use crate::sim::geometry::{overlaps_any, rects_overlap};
    use crate::sim::placement::safe_zone;

    fn playing(seed: u64) -> GameState {
        let mut state = GameState::new(seed, Difficulty::Medium, 0);
        state.begin_session();
        state
    }

    #[test]
    fn test_hazard_counts() {
        assert_eq!(hazard_count(1), 0);
        assert_eq!(hazard_count(2), 1);
        assert_eq!(hazard_count(3), 2);
        assert_eq!(hazard_count(4), 3);
        assert_eq!(hazard_count(12), 3);
    }

    #[test]
    fn test_begin_session() {
        let state = playing(1);
        assert_eq!(state.phase, SessionPhase::Playing);
        assert_eq!(state.level, 1);
        assert!(state.hazards.is_empty());
        assert!(state.helper.is_none());
        assert_eq!(state.collectibles.len(), 10);
        for c in &state.collectibles {
            assert!(c.pos.distance(state.player.pos) >= COLLECTIBLE_EXCLUSION_RADIUS);
            let footprint = crate::sim::geometry::Rect::centered(c.pos, 30.0, 30.0);
            assert!(!overlaps_any(&footprint, &state.walls));
        }
        for wall in &state.walls {
            assert!(!rects_overlap(wall, &safe_zone()));
        }
    }

    #[test]
    fn test_advance_level_scales() {
        let mut state = playing(2);
        let base_hazard = state.hazard_speed;
        state.player.score = 40;
        state.advance_level();
        assert_eq!(state.level, 2);
        assert_eq!(state.player.score, 140);
        assert!((state.hazard_speed - base_hazard * 1.05).abs() < 1e-5);
        assert!((state.player.base_speed - 5.0 * 1.02).abs() < 1e-5);
        assert_eq!(state.hazards.len(), 1);
        assert_eq!(state.hazards[0].speed, state.hazard_speed);

        state.advance_level();
        assert_eq!(state.level, 3);
        assert!(state.helper.is_some());
        assert!((state.player.base_speed - 5.0 * 1.02f32.powi(2)).abs() < 1e-4);
    }

    #[test]
    fn test_hazards_spawn_far_from_player() {
        let mut state = playing(3);
        for _ in 0..6 {
            state.advance_level();
            for h in &state.hazards {
                assert!(h.pos.distance(state.player.pos) > SAFE_SPAWN_RADIUS);
                assert!(!overlaps_any(&h.rect(), &state.walls));
            }
        }
    }

    #[test]
    fn test_helper_persists_across_levels() {
        let mut state = playing(4);
        state.level = 2;
        state.advance_level();
        if let Some(helper) = state.helper.as_mut() {
            helper.last_block_ms = Some(77);
        }
        state.advance_level();
        let helper = state.helper.as_ref().map(|h| h.last_block_ms);
        assert_eq!(helper, Some(Some(77)));
    }

    #[test]
    fn test_ensure_safe_spawn() {
        let mut state = playing(5);
        let center = field_center();
        state.hazards = vec![
            Hazard::new(HazardKind::Fatigue, center + Vec2::new(30.0, 0.0), 1.0),
            Hazard::new(HazardKind::Stress, center, 1.0),
            Hazard::new(HazardKind::Anxiety, center + Vec2::new(0.0, 250.0), 1.0),
        ];
        state.ensure_safe_spawn();

        let pushed = state.hazards[0].pos - center;
        assert!(pushed.x >= 150.0 && pushed.x <= 250.0);
        assert!(pushed.y.abs() <= 50.0);

        // Coincident hazard still ends up away from the center
        let d = state.hazards[1].pos.distance(center);
        assert!(d >= 200.0 - 50.0 * std::f32::consts::SQRT_2);

        // Already outside the radius: untouched
        assert_eq!(state.hazards[2].pos, center + Vec2::new(0.0, 250.0));
    }

    #[test]
    fn test_game_over_high_score_once() {
        let mut state = playing(6);
        state.high_score = 100;
        state.player.score = 250;
        state.game_over();
        state.game_over();
        let events = state.drain_events();
        let raised = events
            .iter()
            .filter(|e| matches!(e, GameEvent::NewHighScore(250)))
            .count();
        assert_eq!(raised, 1);
        assert_eq!(state.high_score, 250);
        assert_eq!(state.phase, SessionPhase::GameOver);
    }

    #[test]
    fn test_restart_keeps_difficulty() {
        let mut state = GameState::new(7, Difficulty::Hard, 0);
        state.begin_session();
        state.level = 5;
        state.player.score = 999;
        state.player.lives = 0;
        state.advance_level();
        state.game_over();
        state.restart();
        assert_eq!(state.difficulty, Difficulty::Hard);
        assert_eq!(state.level, 1);
        assert_eq!(state.player.score, 0);
        assert_eq!(state.player.lives, STARTING_LIVES);
        assert_eq!(state.player.resource, MAX_RESOURCE);
        assert_eq!(state.hazard_speed, Difficulty::Hard.hazard_speed());
        assert!(state.helper.is_none());
        assert_eq!(state.phase, SessionPhase::Playing);
    }
}
