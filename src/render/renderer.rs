use std::collections::HashMap;

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
    Frame,
};

use crate::game::{GameState, Position};
use crate::metrics::GameMetrics;

/// Backdrop tints cycled on captures; purely cosmetic
const BACKDROP_PALETTE: [Color; 9] = [
    Color::Rgb(0xFF, 0xE5, 0xE5),
    Color::Rgb(0xE5, 0xFF, 0xE5),
    Color::Rgb(0xE5, 0xE5, 0xFF),
    Color::Rgb(0xFF, 0xFF, 0xE5),
    Color::Rgb(0xFF, 0xE5, 0xFF),
    Color::Rgb(0xE5, 0xFF, 0xFF),
    Color::Rgb(0xF0, 0xE6, 0x8C),
    Color::Rgb(0x98, 0xFB, 0x98),
    Color::Rgb(0xDD, 0xA0, 0xDD),
];

pub struct Renderer {
    /// Pixels per grid cell; used to map particle positions onto cells
    grid_size: u32,
}

impl Renderer {
    pub fn new(grid_size: u32) -> Self {
        Self { grid_size }
    }

    pub fn render(&self, frame: &mut Frame, state: &GameState, metrics: &GameMetrics) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Header
                Constraint::Min(0),    // Game area
                Constraint::Length(3), // Footer
            ])
            .split(frame.area());

        let stats = self.render_stats(chunks[0], state, metrics);
        frame.render_widget(stats, chunks[0]);

        // Center the board horizontally
        let game_area = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Percentage(10),
                Constraint::Percentage(80),
                Constraint::Percentage(10),
            ])
            .split(chunks[1])[1];

        if state.is_running() {
            let grid = self.render_grid(game_area, state);
            frame.render_widget(grid, game_area);
        } else {
            let game_over = self.render_game_over(game_area, state);
            frame.render_widget(game_over, game_area);
        }

        let controls = self.render_controls(chunks[2]);
        frame.render_widget(controls, chunks[2]);
    }

    /// Map live particles to the grid cells they currently cover. Where
    /// several overlap, the brightest one wins.
    fn particle_cells(&self, state: &GameState) -> HashMap<Position, f64> {
        let g = self.grid_size as f64;
        let mut cells: HashMap<Position, f64> = HashMap::new();

        for p in state.particles.iter() {
            let cell = Position::new((p.x / g).floor() as i32, (p.y / g).floor() as i32);
            if state.is_in_bounds(cell) {
                let alpha = cells.entry(cell).or_insert(0.0);
                if p.alpha > *alpha {
                    *alpha = p.alpha;
                }
            }
        }

        cells
    }

    fn particle_style(alpha: f64) -> Style {
        // Fade from gold through dim yellow to gray as alpha decays
        if alpha > 0.66 {
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD)
        } else if alpha > 0.33 {
            Style::default().fg(Color::Yellow)
        } else {
            Style::default().fg(Color::DarkGray)
        }
    }

    fn render_grid(&self, _area: Rect, state: &GameState) -> Paragraph<'_> {
        let particles = self.particle_cells(state);
        let food_cell = state.food.cell();
        let mut lines = Vec::new();

        for y in 0..state.tile_count {
            let mut spans = Vec::new();

            for x in 0..state.tile_count {
                let pos = Position::new(x as i32, y as i32);

                let cell = if pos == state.snake.head() {
                    Span::styled(
                        "■ ",
                        Style::default()
                            .fg(Color::Cyan)
                            .add_modifier(Modifier::BOLD),
                    )
                } else if state.snake.body.contains(&pos) {
                    Span::styled("□ ", Style::default().fg(Color::Green))
                } else if pos == food_cell {
                    // The food drifts in sub-cell steps; it draws at its
                    // rounded cell, the same cell the capture check uses
                    Span::styled(
                        "◉ ",
                        Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
                    )
                } else if let Some(&alpha) = particles.get(&pos) {
                    Span::styled("• ", Self::particle_style(alpha))
                } else {
                    Span::styled(". ", Style::default().fg(Color::DarkGray))
                };

                spans.push(cell);
            }

            lines.push(Line::from(spans));
        }

        let mut paragraph = Paragraph::new(lines)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_type(BorderType::Double)
                    .border_style(Style::default().fg(Color::White))
                    .title(" Snake "),
            )
            .alignment(Alignment::Center);

        if let Some(index) = state.backdrop {
            let color = BACKDROP_PALETTE[index as usize % BACKDROP_PALETTE.len()];
            paragraph = paragraph.style(Style::default().bg(color));
        }

        paragraph
    }

    fn render_stats(&self, _area: Rect, state: &GameState, metrics: &GameMetrics) -> Paragraph<'_> {
        let text = vec![Line::from(vec![
            Span::styled("Score: ", Style::default().fg(Color::Yellow)),
            Span::styled(
                state.score.to_string(),
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw("    "),
            Span::styled("High: ", Style::default().fg(Color::Yellow)),
            Span::styled(
                metrics.high_score.to_string(),
                Style::default().fg(Color::White),
            ),
            Span::raw("    "),
            Span::styled("Speed: ", Style::default().fg(Color::Yellow)),
            Span::styled(
                format!("{}ms", state.speed_ms),
                Style::default().fg(Color::White),
            ),
            Span::raw("    "),
            Span::styled("Time: ", Style::default().fg(Color::Yellow)),
            Span::styled(metrics.format_time(), Style::default().fg(Color::White)),
        ])];

        Paragraph::new(text).alignment(Alignment::Center)
    }

    fn render_game_over(&self, _area: Rect, state: &GameState) -> Paragraph<'_> {
        let text = vec![
            Line::from(""),
            Line::from(vec![Span::styled(
                "GAME OVER",
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            )]),
            Line::from(""),
            Line::from(vec![
                Span::styled("Final Score: ", Style::default().fg(Color::Yellow)),
                Span::styled(
                    state.score.to_string(),
                    Style::default()
                        .fg(Color::White)
                        .add_modifier(Modifier::BOLD),
                ),
            ]),
            Line::from(""),
            Line::from(vec![
                Span::styled("Press ", Style::default().fg(Color::Gray)),
                Span::styled(
                    "Space",
                    Style::default()
                        .fg(Color::Green)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::styled(" to restart or ", Style::default().fg(Color::Gray)),
                Span::styled(
                    "Q",
                    Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
                ),
                Span::styled(" to quit", Style::default().fg(Color::Gray)),
            ]),
        ];

        Paragraph::new(text).alignment(Alignment::Center).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Red)),
        )
    }

    fn render_controls(&self, _area: Rect) -> Paragraph<'_> {
        let text = vec![Line::from(vec![
            Span::styled("↑↓←→", Style::default().fg(Color::Cyan)),
            Span::raw(" or "),
            Span::styled("WASD", Style::default().fg(Color::Cyan)),
            Span::raw(" to steer | "),
            Span::styled("Space", Style::default().fg(Color::Green)),
            Span::raw(" to restart | "),
            Span::styled("Q", Style::default().fg(Color::Red)),
            Span::raw(" to quit"),
        ])];

        Paragraph::new(text).alignment(Alignment::Center)
    }
}
