//! Stateless UI rendering from a session snapshot.

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
};

use codebreaker::{ColorId, Outcome, Overlay, PALETTE, RowHint, RowView, SessionSnapshot};

const PEG: &str = "●";

/// Renders the whole screen.
pub fn draw(frame: &mut Frame, snapshot: &SessionSnapshot) {
    let area = frame.area();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Title and clock
            Constraint::Min(9),    // Board
            Constraint::Length(3), // Palette
            Constraint::Length(3), // Keys
        ])
        .split(area);

    draw_header(frame, chunks[0], snapshot);
    draw_board(frame, chunks[1], snapshot);
    draw_palette(frame, chunks[2], snapshot);

    let keys = Paragraph::new("1-7 color  ⌫ erase  ⏎ submit  p pause  ? help  e/d restart  q quit")
        .style(Style::default().fg(Color::DarkGray))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(keys, chunks[3]);

    draw_overlay(frame, area, snapshot);
}

fn draw_header(frame: &mut Frame, area: Rect, snapshot: &SessionSnapshot) {
    let clock_style = if snapshot.flash {
        Style::default().fg(Color::Red).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::Yellow)
    };
    let line = Line::from(vec![
        Span::styled(
            "Codebreaker",
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        ),
        Span::raw(format!(
            "  {}  row {}/{}  ",
            snapshot.difficulty,
            (snapshot.attempts_used() + 1).min(snapshot.attempts_max),
            snapshot.attempts_max
        )),
        Span::styled(format_clock(snapshot.seconds_left), clock_style),
    ]);
    let header = Paragraph::new(line)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(header, area);
}

fn draw_board(frame: &mut Frame, area: Rect, snapshot: &SessionSnapshot) {
    let mut lines = Vec::with_capacity(snapshot.attempts_max + 2);

    for index in 0..snapshot.attempts_max {
        let line = match snapshot.rows.get(index) {
            Some(row) => committed_row(row),
            None if index == snapshot.rows.len() && !snapshot.game_over => {
                current_row(&snapshot.current_guess, snapshot.code_length)
            }
            None => empty_row(snapshot.code_length),
        };
        lines.push(line);
    }

    lines.push(Line::raw(""));
    lines.push(secret_row(snapshot));

    let board = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .block(Block::default().title("Board").borders(Borders::ALL));
    frame.render_widget(board, area);
}

fn committed_row(row: &RowView) -> Line<'static> {
    let mut spans = pegs(&row.guess);
    spans.push(Span::raw("   "));
    match &row.hint {
        RowHint::PerPeg(outcomes) => {
            spans.extend(outcomes.iter().map(|outcome| hint_span(*outcome)));
        }
        RowHint::Aggregate(Some(summary)) => {
            spans.push(Span::styled(
                format!("{}●", summary.correct),
                Style::default().fg(Color::Green),
            ));
            spans.push(Span::styled(
                format!(" {}○", summary.wrong_position),
                Style::default().fg(Color::Yellow),
            ));
        }
        RowHint::Aggregate(None) => spans.push(Span::styled("…", Style::default().fg(Color::DarkGray))),
    }
    Line::from(spans)
}

fn hint_span(outcome: Option<Outcome>) -> Span<'static> {
    match outcome {
        Some(Outcome::Correct) => Span::styled("●", Style::default().fg(Color::Green)),
        Some(Outcome::WrongPosition) => Span::styled("○", Style::default().fg(Color::Yellow)),
        Some(Outcome::Incorrect) => Span::styled("·", Style::default().fg(Color::DarkGray)),
        None => Span::raw(" "),
    }
}

fn current_row(guess: &[ColorId], code_length: usize) -> Line<'static> {
    let mut spans = pegs(guess);
    for _ in guess.len()..code_length {
        spans.push(Span::styled("_ ", Style::default().fg(Color::White)));
    }
    spans.push(Span::styled(" ◂", Style::default().fg(Color::Cyan)));
    Line::from(spans)
}

fn empty_row(code_length: usize) -> Line<'static> {
    Line::styled("· ".repeat(code_length), Style::default().fg(Color::DarkGray))
}

fn secret_row(snapshot: &SessionSnapshot) -> Line<'static> {
    match &snapshot.secret {
        Some(secret) => {
            let mut spans = vec![Span::raw("Secret: ")];
            spans.extend(pegs(secret));
            Line::from(spans)
        }
        None => Line::styled(
            format!("Secret: {}", "? ".repeat(snapshot.code_length)),
            Style::default().fg(Color::DarkGray),
        ),
    }
}

fn pegs(colors: &[ColorId]) -> Vec<Span<'static>> {
    colors
        .iter()
        .map(|color| Span::styled(format!("{} ", PEG), Style::default().fg(peg_color(*color))))
        .collect()
}

fn draw_palette(frame: &mut Frame, area: Rect, snapshot: &SessionSnapshot) {
    let spans: Vec<Span> = PALETTE
        .iter()
        .enumerate()
        .flat_map(|(slot, color)| {
            let style = if snapshot.is_disabled(*color) {
                Style::default().fg(Color::DarkGray).add_modifier(Modifier::CROSSED_OUT)
            } else {
                Style::default().fg(peg_color(*color))
            };
            [
                Span::raw(format!("{}:", slot + 1)),
                Span::styled(format!("{}  ", PEG), style),
            ]
        })
        .collect();
    let palette = Paragraph::new(Line::from(spans))
        .alignment(Alignment::Center)
        .block(Block::default().title("Colors").borders(Borders::ALL));
    frame.render_widget(palette, area);
}

fn draw_overlay(frame: &mut Frame, area: Rect, snapshot: &SessionSnapshot) {
    let (title, text) = if let Some(value) = snapshot.countdown {
        ("Get ready", value.to_string())
    } else if snapshot.show_game_over_ui {
        let verdict = if snapshot.won {
            "You broke the code!"
        } else if snapshot.seconds_left == 0 {
            "Time is up."
        } else {
            "Out of rows."
        };
        ("Game over", format!("{}\n\ne: new Easy game\nd: new Difficult game\nq: quit", verdict))
    } else {
        match snapshot.overlay {
            Overlay::None => return,
            Overlay::Paused => ("Paused", "p: resume".to_string()),
            Overlay::Help => ("Help", help_text(snapshot)),
        }
    };

    let popup = center_rect(area, 46, 12);
    frame.render_widget(Clear, popup);
    let paragraph = Paragraph::new(text)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .block(Block::default().title(title).borders(Borders::ALL));
    frame.render_widget(paragraph, popup);
}

fn help_text(snapshot: &SessionSnapshot) -> String {
    format!(
        "Find the {} hidden pegs in {} rows.\n\
         ● right color, right place\n\
         ○ right color, wrong place\n\
         · color not left in the code\n\n\
         ?: back to the game",
        snapshot.code_length, snapshot.attempts_max
    )
}

fn peg_color(color: ColorId) -> Color {
    match color {
        ColorId::Red => Color::Red,
        ColorId::Green => Color::Green,
        ColorId::Blue => Color::Blue,
        ColorId::Yellow => Color::Yellow,
        ColorId::Magenta => Color::Magenta,
        ColorId::Cyan => Color::Cyan,
        ColorId::White => Color::White,
    }
}

fn format_clock(seconds: u32) -> String {
    format!("{}:{:02}", seconds / 60, seconds % 60)
}

fn center_rect(area: Rect, width: u16, height: u16) -> Rect {
    let vert = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length((area.height.saturating_sub(height)) / 2),
            Constraint::Length(height),
            Constraint::Min(0),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length((area.width.saturating_sub(width)) / 2),
            Constraint::Length(width),
            Constraint::Min(0),
        ])
        .split(vert[1])[1]
}
