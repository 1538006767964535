//! Fixed timestep simulation tick
//!
//! One call per frame. Menu-style phases react to discrete key presses; the
//! Playing phase runs the full update in a fixed order.

use glam::Vec2;

use super::effects::EffectKind;
use super::geometry::{overlaps_any, point_in_rect, rects_overlap};
use super::hazard::{HAZARD_SIZE, HazardKind};
use super::placement::sample_open_point;
use super::player::Player;
use super::state::{CollectibleKind, GameEvent, GameState, SessionPhase};
use crate::settings::Difficulty;

/// Resource drained by a Fatigue contact
const FATIGUE_DRAIN: f32 = 0.5;
/// Autopilot stops steering on an axis once this close to the target
const AUTOPILOT_DEADZONE: f32 = 4.0;

/// Input commands for a single tick (deterministic)
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Held direction keys
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
    /// Enter / select
    pub confirm: bool,
    /// Escape / back
    pub cancel: bool,
    /// Pause toggle
    pub pause: bool,
    pub menu_up: bool,
    pub menu_down: bool,
    /// Window closed; ends the session from any phase
    pub quit: bool,
    /// Demo mode - the simulation plays itself
    pub autopilot: bool,
}

impl TickInput {
    /// Movement direction with components in {-1, 0, 1}
    pub fn axis(&self) -> Vec2 {
        let x = (self.right as i8 - self.left as i8) as f32;
        let y = (self.down as i8 - self.up as i8) as f32;
        Vec2::new(x, y)
    }
}

/// Advance the game state by one fixed timestep
pub fn tick(state: &mut GameState, input: &TickInput) {
    if state.phase == SessionPhase::Quit {
        return;
    }
    if input.quit {
        quit(state);
        return;
    }

    let input = if input.autopilot {
        autopilot(state, input)
    } else {
        input.clone()
    };

    let frozen = advance_death_animation(state);

    if state.phase != SessionPhase::Paused {
        for star in &mut state.stars {
            star.drift(&mut state.rng);
        }
    }

    match state.phase {
        SessionPhase::Menu => {
            if input.confirm {
                state.set_phase(SessionPhase::DifficultySelect);
            } else if input.cancel {
                quit(state);
            }
        }
        SessionPhase::DifficultySelect => {
            let count = Difficulty::ALL.len();
            if input.menu_up {
                state.menu_index = (state.menu_index + count - 1) % count;
            }
            if input.menu_down {
                state.menu_index = (state.menu_index + 1) % count;
            }
            if input.confirm {
                state.difficulty = Difficulty::ALL[state.menu_index % count];
                state.hazard_speed = state.difficulty.hazard_speed();
                log::info!("Difficulty set to {}", state.difficulty.as_str());
                state.set_phase(SessionPhase::Tutorial);
            } else if input.cancel {
                state.set_phase(SessionPhase::Menu);
            }
        }
        SessionPhase::Tutorial => {
            if input.confirm {
                state.begin_session();
            } else if input.cancel {
                state.set_phase(SessionPhase::DifficultySelect);
            }
        }
        SessionPhase::Playing => {
            if frozen {
                return;
            }
            if input.pause {
                state.set_phase(SessionPhase::Paused);
                return;
            }
            play_tick(state, &input);
        }
        SessionPhase::Paused => {
            if input.pause || input.confirm {
                state.set_phase(SessionPhase::Playing);
            }
        }
        SessionPhase::GameOver => {
            if frozen {
                return;
            }
            if input.confirm {
                state.restart();
            } else if input.cancel {
                quit(state);
            }
        }
        SessionPhase::Quit => {}
    }
}

fn quit(state: &mut GameState) {
    state.emit(GameEvent::Quit);
    state.set_phase(SessionPhase::Quit);
}

/// Step the death animation; true while it is still playing
fn advance_death_animation(state: &mut GameState) -> bool {
    let Some(anim) = state.death_animation.as_mut() else {
        return false;
    };
    anim.ticks += 1;
    if anim.finished() {
        state.death_animation = None;
    }
    true
}

/// One tick of gameplay
fn play_tick(state: &mut GameState, input: &TickInput) {
    state.time_ticks += 1;
    let now = state.now_ms();

    for kind in state.player.effects.expire(now) {
        log::debug!("{} wore off", kind.as_str());
    }

    state
        .player
        .step(input.axis(), &state.walls, &mut state.rng);

    let target = state.player.pos;
    for hazard in &mut state.hazards {
        hazard.step(target, &state.walls, &mut state.rng);
    }

    if let Some(helper) = state.helper.as_mut() {
        helper.update(&mut state.player, &mut state.hazards, now, &mut state.rng);
    }

    collect_pickups(state);

    // Contact debuffs, then at most one life lost
    let hit = state.player.hit_rect();
    let touching: Vec<HazardKind> = state
        .hazards
        .iter()
        .filter(|h| rects_overlap(&hit, &h.rect()))
        .map(|h| h.kind)
        .collect();
    if !touching.is_empty() && !state.player.is_shielded() {
        for &kind in &touching {
            apply_hazard_contact(state, kind);
        }
        if state.player.resource <= 0.0 {
            state.game_over();
            return;
        }
        state.lose_life();
        if state.phase != SessionPhase::Playing {
            return;
        }
    }

    state.player.drain(state.difficulty.depletion_rate());
    if state.player.resource <= 0.0 {
        log::info!("Dopamine depleted");
        state.game_over();
        return;
    }
    debug_assert!((0.0..=crate::consts::MAX_RESOURCE).contains(&state.player.resource));

    if state.level_complete() {
        state.advance_level();
    }
}

fn collect_pickups(state: &mut GameState) {
    let hit = state.player.hit_rect();
    let mut collected = Vec::new();
    state.collectibles.retain(|c| {
        if point_in_rect(c.pos, &hit) {
            collected.push(c.kind);
            false
        } else {
            true
        }
    });
    for kind in collected {
        apply_collectible(state, kind);
    }
}

/// Apply a collectible's instant and timed effects
pub fn apply_collectible(state: &mut GameState, kind: CollectibleKind) {
    let now = state.now_ms();
    if let Some(gain) = kind.resource_gain() {
        state.player.restore(gain);
    }
    state.player.score += kind.score_value();
    if let Some(effect) = kind.effect() {
        state.player.effects.activate(effect, now);
    }

    match kind {
        CollectibleKind::Medicine | CollectibleKind::Dbs => state.player.tremor = false,
        CollectibleKind::Mirapex => scatter_hazards(state),
        _ => {}
    }

    log::debug!("Collected {} (score {})", kind.name(), state.player.score);
    state.emit(GameEvent::Collected(kind));
}

/// Apply the debuff of an unshielded hazard contact
pub fn apply_hazard_contact(state: &mut GameState, kind: HazardKind) {
    let now = state.now_ms();
    match kind {
        HazardKind::Depression => state.player.drain(state.difficulty.depletion_rate()),
        HazardKind::Anxiety => state.player.base_speed = crate::consts::PLAYER_REDUCED_SPEED,
        HazardKind::Fatigue => state.player.drain(FATIGUE_DRAIN),
        HazardKind::Stress => state.player.effects.activate(EffectKind::Confusion, now),
    }
    state.emit(GameEvent::HazardContact(kind));
}

/// Send every hazard to a random open spot
fn scatter_hazards(state: &mut GameState) {
    for hazard in &mut state.hazards {
        let margin = HAZARD_SIZE / 2.0;
        let spot = sample_open_point(&mut state.rng, margin, HAZARD_SIZE, &state.walls, |_| true);
        if let Some(pos) = spot {
            hazard.pos = pos;
        }
    }
}

#[inline]
fn steer(delta: f32) -> f32 {
    if delta > AUTOPILOT_DEADZONE {
        1.0
    } else if delta < -AUTOPILOT_DEADZONE {
        -1.0
    } else {
        0.0
    }
}

/// Synthesize input for demo mode
fn autopilot(state: &GameState, input: &TickInput) -> TickInput {
    let mut input = input.clone();
    match state.phase {
        SessionPhase::Menu | SessionPhase::DifficultySelect | SessionPhase::Tutorial => {
            input.confirm = true;
        }
        SessionPhase::Paused => input.pause = true,
        SessionPhase::GameOver => input.cancel = true,
        SessionPhase::Playing => {
            let player = state.player.pos;
            let nearest = state.collectibles.iter().min_by(|a, b| {
                a.pos
                    .distance_squared(player)
                    .partial_cmp(&b.pos.distance_squared(player))
                    .unwrap_or(std::cmp::Ordering::Equal)
            });
            if let Some(target) = nearest {
                let delta = target.pos - player;
                let want = Vec2::new(steer(delta.x), steer(delta.y));
                // Slide along a wall on one axis when the diagonal is blocked
                let speed = state.player.effective_speed();
                let blocked = |dir: Vec2| {
                    overlaps_any(&Player::move_rect_at(player + dir * speed), &state.walls)
                };
                let mut dir = want;
                if blocked(dir) {
                    dir = [Vec2::new(want.x, 0.0), Vec2::new(0.0, want.y)]
                        .into_iter()
                        .find(|d| *d != Vec2::ZERO && !blocked(*d))
                        .unwrap_or(want);
                }
                // Pre-invert so confused controls still head the right way
                if state.player.effects.is_active(EffectKind::Confusion) {
                    dir = -dir;
                }
                input.left = dir.x < 0.0;
                input.right = dir.x > 0.0;
                input.up = dir.y < 0.0;
                input.down = dir.y > 0.0;
            }
        }
        SessionPhase::Quit => {}
    }
    input
}
