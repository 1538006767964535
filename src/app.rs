//! Fixed-step game loop
//!
//! Each frame: poll input, tick the simulation, route the tick's events to
//! audio and high-score storage, then render. Modal screens are phases of
//! the same loop.

use std::thread;
use std::time::{Duration, Instant};

use crate::audio::{AudioManager, MusicCommand, SoundEffect};
use crate::consts::TICK_RATE;
use crate::highscore::HighScoreStore;
use crate::platform::{InputSource, Renderer};
use crate::sim::{GameEvent, GameState, SessionPhase, tick};

/// The running game and its collaborators
pub struct App<R, I, S> {
    pub state: GameState,
    renderer: R,
    input: I,
    audio: AudioManager,
    store: S,
    /// Phase seen at the end of the previous frame (drives music)
    last_phase: SessionPhase,
    frames: u64,
}

impl<R, I, S> App<R, I, S>
where
    R: Renderer,
    I: InputSource,
    S: HighScoreStore,
{
    pub fn new(state: GameState, renderer: R, input: I, audio: AudioManager, store: S) -> Self {
        let last_phase = state.phase;
        Self {
            state,
            renderer,
            input,
            audio,
            store,
            last_phase,
            frames: 0,
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Run one frame; false once the session has quit
    pub fn frame(&mut self) -> bool {
        let input = self.input.poll();
        tick(&mut self.state, &input);

        for event in self.state.drain_events() {
            self.handle_event(event);
        }
        self.sync_music();

        self.renderer.render(&self.state);
        self.frames += 1;
        self.state.phase != SessionPhase::Quit
    }

    fn handle_event(&mut self, event: GameEvent) {
        match event {
            GameEvent::Collected(_) => self.audio.play(SoundEffect::Collect),
            GameEvent::NewHighScore(score) => {
                if let Err(e) = self.store.save(score) {
                    log::warn!("Could not save high score: {}", e);
                }
            }
            GameEvent::GameOver { score } => {
                log::info!("Final score {}", score);
                self.audio.play(SoundEffect::GameOver);
            }
            other => log::debug!("{:?}", other),
        }
    }

    fn sync_music(&mut self) {
        let phase = self.state.phase;
        if phase == self.last_phase {
            return;
        }
        let command = match (self.last_phase, phase) {
            (SessionPhase::Paused, SessionPhase::Playing) => Some(MusicCommand::Resume),
            (_, SessionPhase::Playing) => Some(MusicCommand::Play),
            (_, SessionPhase::Paused) => Some(MusicCommand::Pause),
            (_, SessionPhase::GameOver | SessionPhase::Quit) => Some(MusicCommand::Stop),
            _ => None,
        };
        if let Some(command) = command {
            self.audio.music(command);
        }
        self.last_phase = phase;
    }

    /// Run until quit, sleeping to hold `TICK_RATE` frames per second
    pub fn run(&mut self) {
        let frame_time = Duration::from_micros(1_000_000 / TICK_RATE);
        let mut deadline = Instant::now();
        while self.frame() {
            deadline += frame_time;
            let now = Instant::now();
            if deadline > now {
                thread::sleep(deadline - now);
            } else {
                // Fell behind; don't try to catch up
                deadline = now;
            }
        }
        log::info!("Session ended after {} frames", self.frames);
    }

    /// Run at most `max_frames` frames without sleeping; returns frames run
    pub fn run_frames(&mut self, max_frames: u64) -> u64 {
        let start = self.frames;
        while self.frames - start < max_frames && self.frame() {}
        self.frames - start
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::highscore::MemoryHighScoreStore;
    use crate::platform::{NullRenderer, ScriptedInput};
    use crate::settings::Difficulty;
    use crate::sim::{Hazard, HazardKind, TickInput};

    fn app(high_score: u64) -> App<NullRenderer, ScriptedInput, MemoryHighScoreStore> {
        let store = MemoryHighScoreStore {
            score: high_score,
            saves: Vec::new(),
        };
        let mut state = GameState::new(21, Difficulty::Medium, store.load());
        state.begin_session();
        App::new(
            state,
            NullRenderer,
            ScriptedInput::default(),
            AudioManager::silent(),
            store,
        )
    }

    #[test]
    fn test_quit_stops_loop() {
        let mut app = app(0);
        assert!(app.frame());
        app.input = ScriptedInput::new(
            [TickInput {
                quit: true,
                ..Default::default()
            }],
            TickInput::default(),
        );
        assert!(!app.frame());
        assert_eq!(app.run_frames(10), 1);
    }

    #[test]
    fn test_new_high_score_saved_once() {
        let mut app = app(100);
        app.state.player.score = 500;
        app.state.player.lives = 1;
        let pos = app.state.player.pos;
        app.state.hazards = vec![Hazard::new(HazardKind::Fatigue, pos, 1.0)];

        app.run_frames(120);
        assert_eq!(app.state.phase, SessionPhase::GameOver);
        assert_eq!(app.store().saves, vec![500]);
        assert_eq!(app.state.high_score, 500);
    }

    #[test]
    fn test_lower_score_not_saved() {
        let mut app = app(1000);
        app.state.player.score = 10;
        app.state.game_over();
        app.frame();
        assert!(app.store().saves.is_empty());
    }

    #[test]
    fn test_autopilot_leaves_game_over() {
        let mut app = app(0);
        app.input = ScriptedInput::autopilot();
        app.state.game_over();
        assert!(!app.frame());
        assert_eq!(app.state.phase, SessionPhase::Quit);
    }
}
