//! Stateless UI rendering for tic-tac-toe.

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
};

use super::app::{App, HOW_TO_PLAY};
use super::theme::Theme;
use crate::games::tictactoe::{Cell, GameMode, Mark};

/// Draws the whole screen for `app`.
pub fn draw(frame: &mut Frame, app: &App) {
    let theme = Theme::new(app.dark_mode());
    let area = frame.area();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Title
            Constraint::Length(1), // Mode and coins
            Constraint::Min(11),   // Board
            Constraint::Length(3), // Status
            Constraint::Length(1), // Key hints
        ])
        .split(area);

    let title = Paragraph::new("Tic Tac Toe")
        .style(Style::default().fg(theme.x).add_modifier(Modifier::BOLD))
        .alignment(Alignment::Center);
    frame.render_widget(title, chunks[0]);

    let mode = match app.mode() {
        GameMode::TwoPlayer => "2 Players",
        GameMode::VsComputer => "vs Computer",
    };
    let info = Paragraph::new(format!(
        "{}  |  {} (X) vs {} (O)  |  Coins: {}",
        mode,
        app.labels().name(Mark::X),
        app.labels().name(Mark::O),
        app.coins()
    ))
    .style(Style::default().fg(theme.foreground))
    .alignment(Alignment::Center);
    frame.render_widget(info, chunks[1]);

    draw_board(frame, chunks[2], app, &theme);

    let status = match (app.naming(), app.notice()) {
        (Some((mark, typed)), _) => format!("Name for {}: {}_  (Enter to confirm)", mark, typed),
        (None, Some(notice)) => format!("{}  ({})", app.status_text(), notice),
        (None, None) => app.status_text(),
    };
    let status = Paragraph::new(status)
        .style(Style::default().fg(theme.foreground))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(status, chunks[3]);

    let hints = Paragraph::new(
        "1-9/arrows+enter: move  r: new game  m: mode  n: names  c: reset coins  t: theme  h: help  q: quit",
    )
    .style(Style::default().fg(theme.muted))
    .alignment(Alignment::Center);
    frame.render_widget(hints, chunks[4]);

    if app.show_help() {
        draw_help(frame, area, &theme);
    }
}

fn draw_board(frame: &mut Frame, area: Rect, app: &App, theme: &Theme) {
    let board_area = center_rect(area, 40, 11);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(1),
            Constraint::Length(3),
            Constraint::Length(1),
            Constraint::Length(3),
        ])
        .split(board_area);

    for row in 0..3 {
        draw_row(frame, rows[row * 2], app, theme, row * 3);
        if row < 2 {
            draw_separator(frame, rows[row * 2 + 1], theme);
        }
    }
}

fn draw_row(frame: &mut Frame, area: Rect, app: &App, theme: &Theme, first: usize) {
    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(12),
            Constraint::Length(1),
            Constraint::Length(12),
            Constraint::Length(1),
            Constraint::Length(12),
        ])
        .split(area);

    for col in 0..3 {
        draw_cell(frame, cols[col * 2], app, theme, first + col);
        if col < 2 {
            let sep = Paragraph::new("│").style(Style::default().fg(theme.muted));
            frame.render_widget(sep, cols[col * 2 + 1]);
        }
    }
}

fn draw_cell(frame: &mut Frame, area: Rect, app: &App, theme: &Theme, index: usize) {
    let (symbol, mut style) = match app.cells()[index] {
        Cell::Empty => (format!(" {} ", index + 1), Style::default().fg(theme.muted)),
        Cell::Marked(Mark::X) => (
            " X ".to_string(),
            Style::default().fg(theme.x).add_modifier(Modifier::BOLD),
        ),
        Cell::Marked(Mark::O) => (
            " O ".to_string(),
            Style::default().fg(theme.o).add_modifier(Modifier::BOLD),
        ),
    };

    if app.winning_line().is_some_and(|line| line.contains(&index)) {
        style = style.bg(theme.highlight);
    }
    if app.last_move() == Some(index) {
        style = style.add_modifier(Modifier::UNDERLINED);
    }
    if app.cursor() == index {
        style = style.add_modifier(Modifier::REVERSED);
    }

    let paragraph =
        Paragraph::new(Line::from(Span::styled(symbol, style))).alignment(Alignment::Center);
    frame.render_widget(paragraph, area);
}

fn draw_separator(frame: &mut Frame, area: Rect, theme: &Theme) {
    let sep = Paragraph::new("────────────┼────────────┼────────────")
        .style(Style::default().fg(theme.muted));
    frame.render_widget(sep, area);
}

fn draw_help(frame: &mut Frame, area: Rect, theme: &Theme) {
    let popup = center_rect(area, 70, 20);
    frame.render_widget(Clear, popup);
    let help = Paragraph::new(HOW_TO_PLAY)
        .style(Style::default().fg(theme.foreground))
        .wrap(Wrap { trim: false })
        .block(
            Block::default()
                .title("How to Play Tic Tac Toe (h to close)")
                .borders(Borders::ALL),
        );
    frame.render_widget(help, popup);
}

fn center_rect(area: Rect, width: u16, height: u16) -> Rect {
    let vert = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length((area.height.saturating_sub(height)) / 2),
            Constraint::Length(height.min(area.height)),
            Constraint::Length((area.height.saturating_sub(height)) / 2),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length((area.width.saturating_sub(width)) / 2),
            Constraint::Length(width.min(area.width)),
            Constraint::Length((area.width.saturating_sub(width)) / 2),
        ])
        .split(vert[1])[1]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::controller::GameEvent;
    use ratatui::{Terminal, backend::TestBackend};

    fn rendered(app: &App) -> String {
        let mut terminal = Terminal::new(TestBackend::new(100, 30)).unwrap();
        terminal.draw(|f| draw(f, app)).unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    #[test]
    fn test_renders_coins_and_status() {
        let app = App::new(GameMode::VsComputer, 30, false);
        let screen = rendered(&app);
        assert!(screen.contains("Coins: 30"));
        assert!(screen.contains("You's turn"));
    }

    #[test]
    fn test_renders_marks() {
        let mut app = App::new(GameMode::TwoPlayer, 0, true);
        let mut cells = [Cell::Empty; 9];
        cells[0] = Cell::Marked(Mark::X);
        app.handle_event(GameEvent::BoardChanged {
            cells,
            last_move: Some(0),
        });
        let screen = rendered(&app);
        assert!(screen.contains("Player X (X) vs Player O (O)"));
        // Cell 1 now shows X instead of its number.
        assert!(!screen.contains(" 1 "));
        assert!(screen.contains(" 5 "));
    }

    #[test]
    fn test_renders_name_prompt() {
        let mut app = App::new(GameMode::TwoPlayer, 0, false);
        app.start_renaming();
        app.action_for_key(crossterm::event::KeyCode::Char('A'));
        assert!(rendered(&app).contains("Name for X: A_"));
    }
}
