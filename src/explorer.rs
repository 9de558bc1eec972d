//! Terminal-based world explorer using ratatui.
//!
//! Walk an `@` across the generated world with the arrow keys. Stepping
//! off a segment border crosses into the neighboring segment, generating
//! it on first visit.

use std::error::Error;
use std::io;
use std::time::Duration;

use crossterm::{
    event::{self, Event, KeyCode},
    execute,
    terminal::{self, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction as LayoutDirection, Layout},
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Terminal,
};

use crate::grid::{Direction, Point};
use crate::segment::SegmentManager;

/// Run the interactive explorer until the user quits.
pub fn run_explorer(manager: &mut SegmentManager) -> Result<(), Box<dyn Error>> {
    terminal::enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = explorer_loop(&mut terminal, manager);

    terminal::disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    result
}

fn explorer_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    manager: &mut SegmentManager,
) -> Result<(), Box<dyn Error>> {
    let mut rng = rand::thread_rng();
    let mut player = manager.current().spawn_point(&mut rng);

    loop {
        terminal.draw(|frame| draw(frame, manager, player))?;

        if !event::poll(Duration::from_millis(100))? {
            continue;
        }
        if let Event::Key(key) = event::read()? {
            let step = match key.code {
                KeyCode::Char('q') | KeyCode::Esc => break,
                KeyCode::Left => Some(Point::new(-1, 0)),
                KeyCode::Right => Some(Point::new(1, 0)),
                KeyCode::Up => Some(Point::new(0, -1)),
                KeyCode::Down => Some(Point::new(0, 1)),
                _ => None,
            };
            if let Some(step) = step {
                player = try_step(manager, player, step);
            }
        }
    }
    Ok(())
}

/// Move the player one cell, crossing segment borders when stepping off
/// the grid.
fn try_step(manager: &mut SegmentManager, player: Point, step: Point) -> Point {
    let next = player + step;
    let grid = &manager.current().grid;
    let width = grid.width as i32;
    let height = grid.height as i32;

    if grid.contains(next) {
        if manager.tileset().is_tile_blocking(grid, next, 0, false) {
            return player;
        }
        return next;
    }

    // Grid-space up (y-1) crosses the segment's up border.
    let crossing = if next.x < 0 {
        Direction::Left
    } else if next.x >= width {
        Direction::Right
    } else if next.y < 0 {
        Direction::Up
    } else {
        Direction::Down
    };
    manager.move_to(crossing);

    // Re-enter on the opposite border, keeping the other coordinate.
    match crossing {
        Direction::Left => Point::new(width - 1, player.y),
        Direction::Right => Point::new(0, player.y),
        Direction::Up => Point::new(player.x, height - 1),
        Direction::Down => Point::new(player.x, 0),
    }
}

fn draw(frame: &mut ratatui::Frame, manager: &SegmentManager, player: Point) {
    let chunks = Layout::default()
        .direction(LayoutDirection::Vertical)
        .constraints([Constraint::Min(3), Constraint::Length(3)])
        .split(frame.area());

    let map = manager.current();
    let tileset = manager.tileset();

    let mut lines = Vec::with_capacity(map.grid.height);
    for y in 0..map.grid.height {
        let mut spans = Vec::with_capacity(map.grid.width);
        for x in 0..map.grid.width {
            let p = Point::new(x as i32, y as i32);
            if p == player {
                spans.push(Span::styled("@", Style::default().fg(Color::Yellow)));
            } else {
                let def = tileset.def_at(&map.grid, p);
                let (r, g, b) = def.color;
                spans.push(Span::styled(
                    def.glyph.to_string(),
                    Style::default().fg(Color::Rgb(r, g, b)),
                ));
            }
        }
        lines.push(Line::from(spans));
    }

    let coord = manager.current_coord();
    let map_block = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .title(format!(" segment ({}, {}) ", coord.0, coord.1)),
    );
    frame.render_widget(map_block, chunks[0]);

    let status = Paragraph::new(format!(
        "@ ({}, {})  |  {} segments generated  |  arrows: move   q: quit",
        player.x,
        player.y,
        manager.generated_count(),
    ))
    .block(Block::default().borders(Borders::ALL));
    frame.render_widget(status, chunks[1]);
}
