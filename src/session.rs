/// Session controller: map selection, countdown, play, and restart as one
/// explicit state machine driven by a single `tick` per frame.
///
/// The RNG (target placement) and the firing sound are injected at
/// construction so tests can run sessions deterministically and silently.

use std::io;

use rand::Rng;

use crate::assets::{Assets, SoundEffect};
use crate::compute::{self, FrameEvent};
use crate::entities::{GameState, GameStatus};
use crate::input::FrameInput;
use crate::maps::MapId;
use crate::render::{self, Renderer};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    SelectingMap,
    CountingDown,
    Playing,
    Ended,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Control {
    Continue,
    Quit,
}

pub struct Session<R: Rng, S: SoundEffect> {
    rng: R,
    sound: S,
    /// `None` until a map has been chosen.
    game: Option<GameState>,
}

impl<R: Rng, S: SoundEffect> Session<R, S> {
    pub fn new(rng: R, sound: S) -> Self {
        Session {
            rng,
            sound,
            game: None,
        }
    }

    pub fn phase(&self) -> Phase {
        match self.game.as_ref().map(GameState::status) {
            None => Phase::SelectingMap,
            Some(GameStatus::CountingDown) => Phase::CountingDown,
            Some(GameStatus::Playing) => Phase::Playing,
            Some(GameStatus::Won | GameStatus::Lost) => Phase::Ended,
        }
    }

    pub fn game(&self) -> Option<&GameState> {
        self.game.as_ref()
    }

    pub fn game_mut(&mut self) -> Option<&mut GameState> {
        self.game.as_mut()
    }

    /// Start a new session on the map already chosen. No-op before a map
    /// has been selected.
    pub fn reset(&mut self, now: u64) {
        if let Some(map) = self.game.as_ref().map(|g| g.map) {
            self.start(map, now);
        }
    }

    fn start(&mut self, map: MapId, now: u64) {
        self.game = Some(compute::init_state(map, now, &mut self.rng));
        log::info!("New session on {}", map.label());
    }

    /// Handle one frame of input and advance the simulation.
    pub fn tick(&mut self, input: &FrameInput, now: u64, dt: f32) -> Control {
        if input.quit {
            log::info!("Quit requested");
            return Control::Quit;
        }

        let before = self.phase();
        match before {
            Phase::SelectingMap => {
                if let Some(map) = input.map_choice {
                    self.start(map, now);
                }
            }
            Phase::Ended if input.restart => self.reset(now),
            _ => {}
        }

        if let Some(game) = &self.game {
            let (next, events) = compute::tick(game, input, now, dt);
            for event in &events {
                match event {
                    FrameEvent::ShotFired => self.sound.play(),
                    FrameEvent::EnemyHit { index } => log::debug!("Target {} hit", index),
                    FrameEvent::Won { time_ms } => log::info!("All targets down in {} ms", time_ms),
                    FrameEvent::Lost => log::info!("Walked into a standing target"),
                }
            }
            self.game = Some(next);
        }

        let after = self.phase();
        if after != before {
            log::debug!("Phase {:?} -> {:?}", before, after);
        }
        Control::Continue
    }

    pub fn render<D: Renderer>(&self, r: &mut D, assets: &Assets, now: u64) -> io::Result<()> {
        match &self.game {
            None => render::draw_map_menu(r),
            Some(game) => render::draw_frame(r, game, assets, now),
        }
    }
}
