mod config;
mod food;
mod game;
mod grid;
mod input;
mod render;
mod snake;
mod store;

use crossterm::{
    event::{self, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, size, EnterAlternateScreen, LeaveAlternateScreen},
};
use log::info;
use rand::rngs::StdRng;
use rand::SeedableRng;
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use simplelog::{Config as LogConfig, LevelFilter, WriteLogger};
use std::fs::File;
use std::io;
use std::process;
use std::time::Instant;

use crate::config::GameConfig;
use crate::game::{Game, GameState};
use crate::store::{FileScoreStore, HIGH_SCORE_FILE};

const LOG_FILE: &str = "snekpen.log";

// Rows the chrome needs on top of the pen: score bar, pen border, key help
const CHROME_HEIGHT: u16 = 6;

fn main() -> Result<(), io::Error> {
    // Set up logging before anything else; without a log file the game
    // simply plays unlogged
    if let Ok(file) = File::create(LOG_FILE) {
        let _ = WriteLogger::init(LevelFilter::Info, LogConfig::default(), file);
    }

    info!("Starting Snekpen");

    let config = GameConfig::default();

    let (term_width, term_height) = size()?;
    let need_width = config.arena.width + 2;
    let need_height = config.arena.height + CHROME_HEIGHT;
    if term_width < need_width || term_height < need_height {
        eprintln!(
            "Terminal too small. Need at least {}x{}, got {}x{}",
            need_width, need_height, term_width, term_height
        );
        process::exit(1);
    }

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let store = Box::new(FileScoreStore::new(HIGH_SCORE_FILE));
    let mut game = Game::new(config, store, StdRng::from_entropy());

    let result = run(&mut terminal, &mut game);

    // Cleanup terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    info!("Snekpen finished");
    result
}

fn run(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    game: &mut Game,
) -> Result<(), io::Error> {
    loop {
        terminal.draw(|frame| render::draw(frame, game))?;

        // The bounded poll is the game's whole timing mechanism: it returns
        // on input or at the tick boundary, whichever comes first. The
        // interval is re-read every pass because eating can shorten it.
        let tick_started = Instant::now();
        while game.state() != GameState::Exit {
            let remaining = game.tick_interval().saturating_sub(tick_started.elapsed());
            if remaining.is_zero() {
                break;
            }
            if event::poll(remaining)? {
                if let Event::Key(key) = event::read()? {
                    if let Some(action) = input::action_for(key) {
                        game.apply(action);
                    }
                }
            }
        }

        if game.state() == GameState::Exit {
            return Ok(());
        }
        game.tick();
    }
}
