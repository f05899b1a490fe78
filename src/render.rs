use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Layout, Rect},
    style::Color,
    widgets::{Block, Borders, Paragraph, Widget},
    Frame,
};

use crate::food::Morsel;
use crate::game::{EndCause, Game, GameState};
use crate::grid::Size;
use crate::snake::Snek;

const HEAD_SYMBOL: &str = "@";
const BODY_SYMBOL: &str = "#";
const MORSEL_SYMBOL: &str = "*";

/// Draws the whole frame: score bar, the walled pen with its inhabitants,
/// and whatever banner the current state calls for.
pub fn draw(frame: &mut Frame, game: &Game) {
    let layout = Layout::vertical([
        Constraint::Length(3), // Title + scores
        Constraint::Min(0),    // Pen
        Constraint::Length(1), // Key help
    ])
    .split(frame.area());

    let score_text = format!(
        "SNEKPEN    High Score: {}    Score: {}    Speed: {}ms",
        game.high_score(),
        game.score(),
        game.tick_interval().as_millis()
    );
    frame.render_widget(
        Paragraph::new(score_text)
            .alignment(Alignment::Left)
            .block(Block::default().borders(Borders::ALL)),
        layout[0],
    );

    let outer = pen_rect(layout[1], game.arena());
    let block = match game.state() {
        GameState::Paused => Block::default()
            .title("Paused. Press p to continue")
            .borders(Borders::ALL),
        GameState::GameOver(_) => Block::default().borders(Borders::ALL),
        _ => Block::default().title("Playing").borders(Borders::ALL),
    };
    let inner = block.inner(outer);
    frame.render_widget(block, outer);
    frame.render_widget(
        Pen {
            snek: game.snek(),
            morsel: game.morsel(),
        },
        inner,
    );

    if let GameState::GameOver(cause) = game.state() {
        let headline = match cause {
            EndCause::Wall => "GAME OVER - you hit the wall",
            EndCause::Snek => "GAME OVER - you bit yourself",
            EndCause::PenFull => "YOU WIN - the pen is full",
        };
        frame.render_widget(
            Paragraph::new(format!(
                "{}\nFinal Score: {}\nPress r to play again, q to quit",
                headline,
                game.score()
            ))
            .alignment(Alignment::Center),
            inner,
        );
    }

    frame.render_widget(
        Paragraph::new("arrows/wasd move | p pause | q quit").alignment(Alignment::Center),
        layout[2],
    );
}

// The pen has a fixed size; center it in whatever space is left
fn pen_rect(area: Rect, arena: Size) -> Rect {
    let width = (arena.width + 2).min(area.width);
    let height = (arena.height + 2).min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

struct Pen<'a> {
    snek: &'a Snek,
    morsel: Option<Morsel>,
}

impl Widget for Pen<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let paint = |pos: crate::grid::Pos| {
            let (row, col) = (pos.row as u16, pos.col as u16);
            // Skip cells the terminal can no longer show
            (row < area.height && col < area.width).then(|| (area.x + col, area.y + row))
        };

        for pos in self.snek.segments().iter().skip(1) {
            if let Some(cell) = paint(*pos) {
                buf[cell].set_symbol(BODY_SYMBOL).set_fg(Color::Green);
            }
        }

        if let Some(cell) = paint(self.snek.head()) {
            buf[cell].set_symbol(HEAD_SYMBOL).set_fg(Color::Yellow);
        }

        if let Some(morsel) = self.morsel {
            if let Some(cell) = paint(morsel.pos) {
                buf[cell].set_symbol(MORSEL_SYMBOL).set_fg(Color::LightRed);
            }
        }
    }
}
