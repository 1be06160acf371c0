use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Flex, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph},
};

use crate::game::{GameSnapshot, Position};

/// Draws a [`GameSnapshot`]. Holds no game state of its own.
pub struct Renderer;

impl Renderer {
    pub fn new() -> Self {
        Self
    }

    pub fn render(&self, frame: &mut Frame, snapshot: &GameSnapshot) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1), // Score
                Constraint::Min(0),    // Board
                Constraint::Length(1), // Controls
            ])
            .split(frame.area());

        frame.render_widget(self.render_score(snapshot), chunks[0]);

        let board_area = Self::board_area(chunks[1], snapshot.board_size);
        frame.render_widget(self.render_board(snapshot), board_area);

        if snapshot.game_over {
            let popup = Self::centered(chunks[1], 24, 5);
            frame.render_widget(Clear, popup);
            frame.render_widget(self.render_game_over(snapshot), popup);
        }

        frame.render_widget(self.render_controls(), chunks[2]);
    }

    /// Each cell is two columns wide, plus a one-cell border on every side
    fn board_area(area: Rect, board_size: usize) -> Rect {
        let width = (board_size * 2 + 2).min(u16::MAX as usize) as u16;
        let height = (board_size + 2).min(u16::MAX as usize) as u16;
        Self::centered(area, width, height)
    }

    fn centered(area: Rect, width: u16, height: u16) -> Rect {
        let [column] = Layout::horizontal([Constraint::Length(width)])
            .flex(Flex::Center)
            .areas(area);
        let [cell] = Layout::vertical([Constraint::Length(height)])
            .flex(Flex::Center)
            .areas(column);
        cell
    }

    fn render_board(&self, snapshot: &GameSnapshot) -> Paragraph<'_> {
        let head = snapshot.head();
        let mut lines = Vec::with_capacity(snapshot.board_size);

        for y in 0..snapshot.board_size {
            let mut spans = Vec::with_capacity(snapshot.board_size);

            for x in 0..snapshot.board_size {
                let pos = Position::new(x as i32, y as i32);

                let cell = if Some(pos) == head {
                    Span::styled(
                        "██",
                        Style::default()
                            .fg(Color::LightGreen)
                            .add_modifier(Modifier::BOLD),
                    )
                } else if snapshot.snake.contains(&pos) {
                    Span::styled("██", Style::default().fg(Color::Green))
                } else if pos == snapshot.food {
                    Span::styled("██", Style::default().fg(Color::Red))
                } else {
                    Span::styled("· ", Style::default().fg(Color::DarkGray))
                };

                spans.push(cell);
            }

            lines.push(Line::from(spans));
        }

        let border = if snapshot.game_over {
            Color::Red
        } else {
            Color::Gray
        };

        Paragraph::new(lines).block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(Style::default().fg(border)),
        )
    }

    fn render_score(&self, snapshot: &GameSnapshot) -> Paragraph<'_> {
        let text = Line::from(vec![
            Span::styled("Score: ", Style::default().fg(Color::Yellow)),
            Span::styled(
                snapshot.score.to_string(),
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            ),
        ]);

        Paragraph::new(text).alignment(Alignment::Center)
    }

    fn render_game_over(&self, snapshot: &GameSnapshot) -> Paragraph<'_> {
        let text = vec![
            Line::from(Span::styled(
                "GAME OVER",
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            )),
            Line::from(format!("Score: {}", snapshot.score)),
            Line::from(vec![
                Span::styled(
                    "R",
                    Style::default()
                        .fg(Color::Green)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::raw(" restart  "),
                Span::styled(
                    "Q",
                    Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
                ),
                Span::raw(" quit"),
            ]),
        ];

        Paragraph::new(text).alignment(Alignment::Center).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Red)),
        )
    }

    fn render_controls(&self) -> Paragraph<'_> {
        let text = Line::from(vec![
            Span::styled("↑↓←→", Style::default().fg(Color::Cyan)),
            Span::raw(" / "),
            Span::styled("WASD", Style::default().fg(Color::Cyan)),
            Span::raw(" / "),
            Span::styled("drag", Style::default().fg(Color::Cyan)),
            Span::raw(" to steer | "),
            Span::styled("R", Style::default().fg(Color::Green)),
            Span::raw(" restart | "),
            Span::styled("Q", Style::default().fg(Color::Red)),
            Span::raw(" quit"),
        ]);

        Paragraph::new(text).alignment(Alignment::Center)
    }
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::{Terminal, backend::TestBackend};

    fn snapshot(game_over: bool) -> GameSnapshot {
        GameSnapshot {
            snake: vec![Position::new(2, 1), Position::new(1, 1)],
            food: Position::new(0, 0),
            board_size: 4,
            score: 7,
            game_over,
        }
    }

    fn draw(snapshot: &GameSnapshot) -> String {
        let mut terminal = Terminal::new(TestBackend::new(40, 12)).unwrap();
        terminal
            .draw(|frame| Renderer::new().render(frame, snapshot))
            .unwrap();

        let buffer = terminal.backend().buffer();
        buffer
            .content()
            .chunks(buffer.area.width as usize)
            .map(|row| row.iter().map(|cell| cell.symbol()).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn test_renders_score_and_board() {
        let screen = draw(&snapshot(false));

        assert!(screen.contains("Score: 7"));
        assert!(screen.contains("██"));
        assert!(!screen.contains("GAME OVER"));
    }

    #[test]
    fn test_renders_game_over_overlay() {
        let screen = draw(&snapshot(true));

        assert!(screen.contains("GAME OVER"));
        assert!(screen.contains("restart"));
    }
}
