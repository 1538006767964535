//! Platform abstraction layer
//!
//! The simulation never draws or reads devices itself. A frontend supplies:
//! - `Renderer`: draws one frame from the current state
//! - `InputSource`: reports the keys pressed since the last frame
//!
//! Headless implementations are provided for the demo binary and tests.

use std::collections::VecDeque;

use crate::sim::{GameState, SessionPhase, TickInput};

/// Draws the game; called once per frame
pub trait Renderer {
    fn render(&mut self, state: &GameState);
}

/// Supplies input; called once per frame
pub trait InputSource {
    fn poll(&mut self) -> TickInput;
}

/// Renderer that draws nothing
#[derive(Debug, Default)]
pub struct NullRenderer;

impl Renderer for NullRenderer {
    fn render(&mut self, _state: &GameState) {}
}

/// Headless renderer that logs a HUD line every `interval` frames and on
/// every phase change
#[derive(Debug)]
pub struct LogRenderer {
    interval: u64,
    frames: u64,
    last_phase: Option<SessionPhase>,
}

impl LogRenderer {
    pub fn new(interval: u64) -> Self {
        Self {
            interval: interval.max(1),
            frames: 0,
            last_phase: None,
        }
    }
}

impl Renderer for LogRenderer {
    fn render(&mut self, state: &GameState) {
        self.frames += 1;
        let phase_changed = self.last_phase != Some(state.phase);
        self.last_phase = Some(state.phase);
        if !phase_changed && self.frames % self.interval != 0 {
            return;
        }

        let p = &state.player;
        let effects: Vec<&str> = p.effects.iter().map(|e| e.kind.as_str()).collect();
        log::info!(
            "[{}] level {} score {} (best {}) lives {} dopamine {:.1} hazards {} items {} {:?}",
            state.phase.as_str(),
            state.level,
            p.score,
            state.high_score,
            p.lives,
            p.resource,
            state.hazards.len(),
            state.collectibles.len(),
            effects
        );
    }
}

/// Plays back a fixed input script, then repeats `fallback` forever
#[derive(Debug, Clone, Default)]
pub struct ScriptedInput {
    script: VecDeque<TickInput>,
    fallback: TickInput,
}

impl ScriptedInput {
    pub fn new(script: impl IntoIterator<Item = TickInput>, fallback: TickInput) -> Self {
        Self {
            script: script.into_iter().collect(),
            fallback,
        }
    }

    /// Input that lets the game play itself
    pub fn autopilot() -> Self {
        Self::new(
            [],
            TickInput {
                autopilot: true,
                ..Default::default()
            },
        )
    }

    pub fn push(&mut self, input: TickInput) {
        self.script.push_back(input);
    }
}

impl InputSource for ScriptedInput {
    fn poll(&mut self) -> TickInput {
        self.script
            .pop_front()
            .unwrap_or_else(|| self.fallback.clone())
    }
}
