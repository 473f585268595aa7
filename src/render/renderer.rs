use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
};

use crate::game::{GameConfig, GameState, Position, Rgb};
use crate::metrics::GameMetrics;

/// Glyph for one grid cell; a cell spans two terminal columns to look square
const CELL: &str = "██";
const EMPTY: &str = "  ";

impl From<Rgb> for Color {
    fn from(Rgb(r, g, b): Rgb) -> Self {
        Color::Rgb(r, g, b)
    }
}

/// Terminal columns taken by the bordered grid, saturating at `u16::MAX`
fn grid_columns(grid_width: usize) -> u16 {
    let columns = grid_width
        .saturating_mul(CELL.chars().count())
        .saturating_add(2);
    u16::try_from(columns).unwrap_or(u16::MAX)
}

pub struct Renderer {
    border: Color,
    background: Color,
}

impl Renderer {
    pub fn new(config: &GameConfig) -> Self {
        Self {
            border: config.border_color.into(),
            background: config.background_color.into(),
        }
    }

    pub fn render(&self, frame: &mut Frame, state: &GameState, metrics: &GameMetrics, paused: bool) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Header
                Constraint::Min(0),    // Game area
                Constraint::Length(3), // Footer
            ])
            .split(frame.area());

        frame.render_widget(self.render_stats(state, metrics, paused), chunks[0]);

        let game_area = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Min(0),
                Constraint::Length(grid_columns(state.grid_width)),
                Constraint::Min(0),
            ])
            .split(chunks[1])[1];

        frame.render_widget(self.render_grid(state), game_area);
        frame.render_widget(self.render_controls(), chunks[2]);
    }

    /// One line per grid row, two columns per cell
    pub fn grid_lines(&self, state: &GameState) -> Vec<Line<'static>> {
        let snake_style = Style::default().fg(state.snake.color.into()).bg(self.background);
        let head_style = snake_style.add_modifier(Modifier::BOLD);
        let apple_style = Style::default().fg(state.apple.color.into()).bg(self.background);
        let empty_style = Style::default().bg(self.background);

        (0..state.grid_height)
            .map(|y| {
                let spans: Vec<Span<'static>> = (0..state.grid_width)
                    .map(|x| {
                        let pos = Position::new(x as i32, y as i32);
                        if pos == state.snake.head() {
                            Span::styled(CELL, head_style)
                        } else if state.snake.occupies(pos) {
                            Span::styled(CELL, snake_style)
                        } else if pos == state.apple.position {
                            Span::styled(CELL, apple_style)
                        } else {
                            Span::styled(EMPTY, empty_style)
                        }
                    })
                    .collect();
                Line::from(spans)
            })
            .collect()
    }

    fn render_grid(&self, state: &GameState) -> Paragraph<'static> {
        Paragraph::new(self.grid_lines(state)).block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Plain)
                .border_style(Style::default().fg(self.border))
                .title(" Snake "),
        )
    }

    fn render_stats(&self, state: &GameState, metrics: &GameMetrics, paused: bool) -> Paragraph<'static> {
        let label = Style::default().fg(Color::Yellow);
        let value = Style::default().fg(Color::White);

        let mut spans = vec![
            Span::styled("Length: ", label),
            Span::styled(
                state.snake.len().to_string(),
                value.add_modifier(Modifier::BOLD),
            ),
            Span::raw("    "),
            Span::styled("Best: ", label),
            Span::styled(metrics.best_length.to_string(), value),
            Span::raw("    "),
            Span::styled("Resets: ", label),
            Span::styled(state.resets.to_string(), value),
            Span::raw("    "),
            Span::styled("Time: ", label),
            Span::styled(metrics.format_time(), value),
        ];
        if paused {
            spans.push(Span::raw("    "));
            spans.push(Span::styled(
                "PAUSED",
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            ));
        }

        Paragraph::new(Line::from(spans)).alignment(Alignment::Center)
    }

    fn render_controls(&self) -> Paragraph<'static> {
        let text = vec![Line::from(vec![
            Span::styled("↑↓←→", Style::default().fg(Color::Cyan)),
            Span::raw(" or "),
            Span::styled("WASD", Style::default().fg(Color::Cyan)),
            Span::raw(" to move | "),
            Span::styled("Space", Style::default().fg(Color::Cyan)),
            Span::raw(" pause | "),
            Span::styled("R", Style::default().fg(Color::Green)),
            Span::raw(" restart | "),
            Span::styled("Q", Style::default().fg(Color::Red)),
            Span::raw(" to quit"),
        ])];

        Paragraph::new(text).alignment(Alignment::Center)
    }
}
