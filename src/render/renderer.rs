use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Flex, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
};

use super::scene::{CellPaint, Scene};
use crate::game::GameState;
use crate::metrics::GameMetrics;

/// Terminal columns per grid cell, so cells come out roughly square
const CELL_COLUMNS: u16 = 2;

pub struct Renderer {
    block_size: u32,
}

impl Renderer {
    pub fn new(block_size: u32) -> Self {
        Self { block_size }
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

        let stats = self.render_stats(state, metrics);
        frame.render_widget(stats, chunks[0]);

        let game_area = self.center_grid(chunks[1], state);
        let grid = self.render_grid(state);
        frame.render_widget(grid, game_area);

        let controls = self.render_controls();
        frame.render_widget(controls, chunks[2]);
    }

    /// Exact-size area for the bordered grid, centred horizontally
    fn center_grid(&self, area: Rect, state: &GameState) -> Rect {
        // Oversized grids are clipped by the layout rather than wrapping around
        let width = u16::try_from(state.grid_width)
            .unwrap_or(u16::MAX)
            .saturating_mul(CELL_COLUMNS)
            .saturating_add(2);
        let height = u16::try_from(state.grid_height)
            .unwrap_or(u16::MAX)
            .saturating_add(2);

        let [column] = Layout::horizontal([Constraint::Length(width)])
            .flex(Flex::Center)
            .areas(area);
        let [grid] = Layout::vertical([Constraint::Length(height)])
            .flex(Flex::Start)
            .areas(column);
        grid
    }

    fn render_grid(&self, state: &GameState) -> Paragraph<'_> {
        let scene = Scene::from_state(state, self.block_size);

        let lines: Vec<Line> = scene
            .rasterize()
            .into_iter()
            .map(|row| Line::from(row.into_iter().map(paint_span).collect::<Vec<_>>()))
            .collect();

        Paragraph::new(lines).block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Double)
                .border_style(Style::default().fg(Color::White))
                .title(" Snake "),
        )
    }

    fn render_stats(&self, state: &GameState, metrics: &GameMetrics) -> Paragraph<'_> {
        let status = if state.running {
            Span::styled("running", Style::default().fg(Color::Green))
        } else {
            Span::styled(
                "press an arrow key",
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            )
        };

        let text = vec![Line::from(vec![
            Span::styled("Length: ", Style::default().fg(Color::Yellow)),
            Span::styled(
                state.snake.len().to_string(),
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw("    "),
            Span::styled("Tick: ", Style::default().fg(Color::Yellow)),
            Span::styled(metrics.format_interval(), Style::default().fg(Color::White)),
            Span::raw("    "),
            Span::styled("Episode: ", Style::default().fg(Color::Yellow)),
            Span::styled(metrics.episode.to_string(), Style::default().fg(Color::White)),
            Span::raw("    "),
            Span::styled("Time: ", Style::default().fg(Color::Yellow)),
            Span::styled(metrics.format_time(), Style::default().fg(Color::White)),
            Span::raw("    "),
            status,
        ])];

        Paragraph::new(text).alignment(Alignment::Center)
    }

    fn render_controls(&self) -> Paragraph<'_> {
        let text = vec![Line::from(vec![
            Span::styled("↑↓←→", Style::default().fg(Color::Cyan)),
            Span::raw(" to move | "),
            Span::styled("Q", Style::default().fg(Color::Cyan)),
            Span::raw(" faster | "),
            Span::styled("E", Style::default().fg(Color::Cyan)),
            Span::raw(" slower | "),
            Span::styled("Esc", Style::default().fg(Color::Red)),
            Span::raw(" to quit"),
        ])];

        Paragraph::new(text).alignment(Alignment::Center)
    }
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new(25)
    }
}

fn paint_span(cell: CellPaint) -> Span<'static> {
    let style = Style::default().bg(cell.fill);
    match cell.marker {
        Some(color) => Span::styled("● ", style.fg(color)),
        None => Span::styled("  ", style),
    }
}
