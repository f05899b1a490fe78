use std::time::Duration;

use log::info;
use rand::rngs::StdRng;

use crate::config::GameConfig;
use crate::food::{Morsel, Spawn};
use crate::grid::Size;
use crate::input::InputAction;
use crate::snake::Snek;
use crate::store::ScoreStore;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EndCause {
    Wall,
    Snek,
    /// The snek fills the pen; rendered as a win.
    PenFull,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameState {
    Running,
    Paused,
    GameOver(EndCause),
    Exit,
}

/// The controller: owns the snek, the morsel and all per-game bookkeeping,
/// and advances them one tick at a time. The driving loop feeds it decoded
/// input and calls `tick`; everything else stays in here.
pub struct Game {
    config: GameConfig,
    snek: Snek,
    morsel: Option<Morsel>,
    state: GameState,
    score: u32,
    high_score: u32,
    tick_interval: Duration,
    fed_since_speedup: u32,
    store: Box<dyn ScoreStore>,
    rng: StdRng,
}

impl Game {
    pub fn new(config: GameConfig, store: Box<dyn ScoreStore>, rng: StdRng) -> Self {
        let mut game = Game {
            snek: Snek::new(config.start, config.initial_length, config.initial_direction),
            morsel: None,
            state: GameState::Running,
            score: 0,
            high_score: 0,
            tick_interval: config.initial_tick,
            fed_since_speedup: 0,
            store,
            rng,
            config,
        };
        game.reset();
        game
    }

    /// Fresh snek, fresh morsel, score and speed back to their initial
    /// values. The high score is reloaded from the store, not zeroed.
    fn reset(&mut self) {
        self.snek = Snek::new(
            self.config.start,
            self.config.initial_length,
            self.config.initial_direction,
        );
        self.morsel = None;
        self.score = 0;
        self.tick_interval = self.config.initial_tick;
        self.fed_since_speedup = 0;
        self.high_score = self.store.load();
        self.state = GameState::Running;
        self.respawn_morsel();

        info!("Game reset to initial state");
    }

    pub fn apply(&mut self, action: InputAction) {
        match (self.state, action) {
            (GameState::Exit, _) => {}
            (_, InputAction::Quit) => {
                info!("User requested quit");
                if matches!(self.state, GameState::Running | GameState::Paused) {
                    self.flush_high_score();
                }
                self.state = GameState::Exit;
            }
            (GameState::Running, InputAction::Turn(direction)) => {
                self.snek.request_turn(direction);
            }
            (GameState::Running, InputAction::Pause) => {
                info!("Game paused");
                self.state = GameState::Paused;
            }
            (GameState::Paused, InputAction::Pause) => {
                info!("Game resumed");
                self.state = GameState::Running;
            }
            (GameState::GameOver(_), InputAction::Restart) => {
                info!("User chose to restart");
                self.reset();
            }
            // Anything else is ordinary gameplay noise, not a fault
            _ => {}
        }
    }

    /// One step of the running game. Collisions are ruled out against the
    /// snek's prospective head before anything is committed, so a crash
    /// leaves the body exactly as it was rendered last tick.
    pub fn tick(&mut self) {
        if self.state != GameState::Running {
            return;
        }

        self.snek.commit_turn();
        let next = self.snek.next_head();

        if !self.config.arena.contains(next) {
            info!("Wall collision at {:?}", next);
            self.finish(EndCause::Wall);
            return;
        }

        // Landing on the tail cell is legal when the tail vacates this tick
        if self.snek.occupies(next) && !(self.snek.tail_will_vacate() && next == self.snek.tail())
        {
            info!("Self collision at {:?}", next);
            self.finish(EndCause::Snek);
            return;
        }

        let new_head = self.snek.slither_to(next);

        if self.morsel.map(|m| m.pos) == Some(new_head) {
            self.score += self.config.morsel_score;
            self.fed_since_speedup += 1;
            info!("Morsel eaten, score now {}", self.score);

            // Growth lands on the next slither, not this one
            self.snek.grow();
            self.respawn_morsel();

            if self.fed_since_speedup >= self.config.difficulty_threshold {
                self.fed_since_speedup = 0;
                self.raise_difficulty();
            }
        }
    }

    fn respawn_morsel(&mut self) {
        match Morsel::spawn(&mut self.rng, self.config.arena, &self.snek, &self.config) {
            Spawn::Placed(morsel) => self.morsel = Some(morsel),
            Spawn::PenFull => {
                self.morsel = None;
                self.finish(EndCause::PenFull);
            }
        }
    }

    fn raise_difficulty(&mut self) {
        if self.tick_interval > self.config.min_tick {
            self.tick_interval = self
                .tick_interval
                .saturating_sub(self.config.speed_step)
                .max(self.config.min_tick);
            info!("Difficulty increased: tick interval now {:?}", self.tick_interval);
        }
    }

    fn finish(&mut self, cause: EndCause) {
        info!("Game over ({:?}), final score {}", cause, self.score);
        self.flush_high_score();
        self.state = GameState::GameOver(cause);
    }

    fn flush_high_score(&mut self) {
        if self.score > self.high_score {
            self.high_score = self.score;
            self.store.save(self.high_score);
        }
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn high_score(&self) -> u32 {
        self.high_score
    }

    pub fn tick_interval(&self) -> Duration {
        self.tick_interval
    }

    pub fn arena(&self) -> Size {
        self.config.arena
    }

    pub fn snek(&self) -> &Snek {
        &self.snek
    }

    pub fn morsel(&self) -> Option<Morsel> {
        self.morsel
    }
}
