use std::io;

use ratatui::{
    Frame, Terminal,
    backend::Backend,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph},
};
use tracing::warn;

use super::hud::{Hud, Overlay};
use crate::game::{BoardView, Cell, Grid, Renderer, VISUAL_CYCLE};

/// Owned copy of the last board handed over by the controller
#[derive(Debug, Clone)]
struct BoardSnapshot {
    grid: Grid,
    snake: Vec<Cell>,
    food: Option<Cell>,
    frame: u32,
}

impl From<&BoardView<'_>> for BoardSnapshot {
    fn from(view: &BoardView<'_>) -> Self {
        Self {
            grid: view.grid,
            snake: view.snake.to_vec(),
            food: view.food,
            frame: view.frame,
        }
    }
}

/// Draws the game into a ratatui terminal.
///
/// The controller pushes board frames through [`Renderer::render`]; the host
/// updates the [`Hud`] and calls [`TerminalRenderer::refresh`] to redraw the
/// last board with new chrome.
pub struct TerminalRenderer<B: Backend> {
    terminal: Terminal<B>,
    board: Option<BoardSnapshot>,
    hud: Hud,
}

impl<B: Backend> TerminalRenderer<B> {
    pub fn new(terminal: Terminal<B>) -> Self {
        Self {
            terminal,
            board: None,
            hud: Hud::new(),
        }
    }

    pub fn hud(&self) -> &Hud {
        &self.hud
    }

    pub fn hud_mut(&mut self) -> &mut Hud {
        &mut self.hud
    }

    pub fn terminal(&self) -> &Terminal<B> {
        &self.terminal
    }

    pub fn terminal_mut(&mut self) -> &mut Terminal<B> {
        &mut self.terminal
    }

    /// Redraw the last board with the current HUD
    pub fn refresh(&mut self) -> io::Result<()> {
        let Self {
            terminal,
            board,
            hud,
        } = self;
        terminal.draw(|frame| draw(frame, board.as_ref(), hud))?;
        Ok(())
    }
}

impl<B: Backend> Renderer for TerminalRenderer<B> {
    fn render(&mut self, view: &BoardView<'_>) {
        self.board = Some(BoardSnapshot::from(view));
        if let Err(e) = self.refresh() {
            warn!("Failed to draw frame: {}", e);
        }
    }
}

fn draw(frame: &mut Frame, board: Option<&BoardSnapshot>, hud: &Hud) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(0),    // Game area
            Constraint::Length(3), // Footer
        ])
        .split(frame.area());

    frame.render_widget(render_stats(hud), chunks[0]);

    if let Some(board) = board {
        let game_area = board_area(chunks[1], board.grid);
        frame.render_widget(render_grid(board), game_area);

        if let Some(overlay) = &hud.overlay {
            let popup = centered(chunks[1], 44, 7);
            frame.render_widget(Clear, popup);
            frame.render_widget(render_overlay(overlay), popup);
        }
    }

    frame.render_widget(render_controls(), chunks[2]);
}

/// Area for the grid: two terminal columns per cell plus the border, centered
fn board_area(area: Rect, grid: Grid) -> Rect {
    let width = (grid.cols as u16).saturating_mul(2).saturating_add(2);
    let height = (grid.rows as u16).saturating_add(2);
    centered(area, width, height)
}

fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

fn render_grid(board: &BoardSnapshot) -> Paragraph<'static> {
    let glow = board.frame < VISUAL_CYCLE / 2;
    let head_style = Style::default()
        .fg(if glow { Color::LightCyan } else { Color::Cyan })
        .add_modifier(Modifier::BOLD);
    let food_symbol = if board.frame % 4 < 2 { "● " } else { "o " };

    let mut lines = Vec::with_capacity(board.grid.rows as usize);
    for y in 0..board.grid.rows {
        let mut spans = Vec::with_capacity(board.grid.cols as usize);

        for x in 0..board.grid.cols {
            let cell = Cell::new(x, y);

            let span = match board.snake.iter().position(|c| *c == cell) {
                Some(0) => Span::styled("■ ", head_style),
                // Segments fade after the first few, like a tapering body
                Some(idx) if idx < 5 => Span::styled("□ ", Style::default().fg(Color::LightGreen)),
                Some(_) => Span::styled("□ ", Style::default().fg(Color::Green)),
                None if board.food == Some(cell) => Span::styled(
                    food_symbol,
                    Style::default()
                        .fg(Color::Yellow)
                        .add_modifier(Modifier::BOLD),
                ),
                None => Span::styled(". ", Style::default().fg(Color::DarkGray)),
            };

            spans.push(span);
        }

        lines.push(Line::from(spans));
    }

    Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Double)
            .border_style(Style::default().fg(Color::White))
            .title(" Snake "),
    )
}

fn render_stats(hud: &Hud) -> Paragraph<'static> {
    let text = vec![Line::from(vec![
        Span::styled("Score: ", Style::default().fg(Color::Yellow)),
        Span::styled(
            hud.score.to_string(),
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw("    "),
        Span::styled("Best: ", Style::default().fg(Color::Yellow)),
        Span::styled(hud.high_score.to_string(), Style::default().fg(Color::White)),
        Span::raw("    "),
        Span::styled("Time: ", Style::default().fg(Color::Yellow)),
        Span::styled(hud.elapsed.clone(), Style::default().fg(Color::White)),
    ])];

    Paragraph::new(text).alignment(Alignment::Center)
}

fn render_overlay(overlay: &Overlay) -> Paragraph<'static> {
    let mut text = vec![
        Line::from(vec![Span::styled(
            overlay.title.clone(),
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )]),
        Line::from(""),
        Line::from(overlay.text.clone()),
    ];

    if overlay.show_start {
        text.push(Line::from(""));
        text.push(Line::from(vec![
            Span::styled("Press ", Style::default().fg(Color::Gray)),
            Span::styled(
                "Enter",
                Style::default()
                    .fg(Color::Green)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(" to start", Style::default().fg(Color::Gray)),
        ]));
    }

    Paragraph::new(text).alignment(Alignment::Center).block(
        Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(Color::Green)),
    )
}

fn render_controls() -> Paragraph<'static> {
    let text = vec![Line::from(vec![
        Span::styled("↑↓←→", Style::default().fg(Color::Cyan)),
        Span::raw(" or "),
        Span::styled("WASD", Style::default().fg(Color::Cyan)),
        Span::raw(" to move | "),
        Span::styled("Enter", Style::default().fg(Color::Green)),
        Span::raw(" start | "),
        Span::styled("N", Style::default().fg(Color::Green)),
        Span::raw(" new game | "),
        Span::styled("Q", Style::default().fg(Color::Red)),
        Span::raw(" quit"),
    ])];

    Paragraph::new(text).alignment(Alignment::Center)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{CollisionType, Notification, RunOutcome};
    use ratatui::backend::TestBackend;

    fn renderer() -> TerminalRenderer<TestBackend> {
        TerminalRenderer::new(Terminal::new(TestBackend::new(80, 30)).unwrap())
    }

    fn screen(renderer: &TerminalRenderer<TestBackend>) -> String {
        renderer
            .terminal()
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    fn grid() -> Grid {
        Grid::from_pixels(160, 160, 16).unwrap()
    }

    #[test]
    fn test_draws_board_and_idle_overlay() {
        let mut renderer = renderer();
        // Top and bottom rows stay clear of the overlay panel
        let snake = [Cell::new(2, 0), Cell::new(1, 0)];
        renderer.render(&BoardView {
            grid: grid(),
            snake: &snake,
            food: Some(Cell::new(7, 9)),
            frame: 0,
        });

        let screen = screen(&renderer);
        assert!(screen.contains("■"));
        assert!(screen.contains("□"));
        assert!(screen.contains("●"));
        assert!(screen.contains("Score: 0"));
        assert!(screen.contains("Press start"));
    }

    #[test]
    fn test_refresh_shows_game_over() {
        let mut renderer = renderer();
        let snake = [Cell::new(0, 0)];
        renderer.render(&BoardView {
            grid: grid(),
            snake: &snake,
            food: None,
            frame: 3,
        });

        renderer.hud_mut().apply(Notification::GameOver {
            final_score: 40,
            outcome: RunOutcome::Collision(CollisionType::SelfCollision),
        });
        renderer.refresh().unwrap();

        let screen = screen(&renderer);
        assert!(screen.contains("Game over"));
        assert!(screen.contains("Final score: 40 points"));
        assert!(screen.contains("Score: 40"));
    }

    #[test]
    fn test_no_overlay_while_running() {
        let mut renderer = renderer();
        renderer.hud_mut().apply(Notification::Started);
        let snake = [Cell::new(4, 4)];
        renderer.render(&BoardView {
            grid: grid(),
            snake: &snake,
            food: Some(Cell::new(1, 1)),
            frame: 2,
        });

        let screen = screen(&renderer);
        assert!(!screen.contains("Press start"));
        assert!(!screen.contains("●"));
    }

    #[test]
    fn test_centered_clamps_to_area() {
        let area = Rect::new(0, 0, 10, 5);
        assert_eq!(centered(area, 20, 20), area);
        assert_eq!(centered(area, 4, 1), Rect::new(3, 2, 4, 1));
    }
}
