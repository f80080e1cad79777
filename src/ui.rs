use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style, Stylize},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};
use tui_big_text::{BigText, PixelSize};

use crate::app::App;
use crate::presenter::{Column, Presentation};

pub const TITLE: &str = " Current Matchup ";

// Cells per character for PixelSize::Quadrant.
const BIG_GLYPH_WIDTH: u16 = 4;
const BIG_GLYPH_HEIGHT: u16 = 4;

const SPINNER: [&str; 10] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

pub fn ui(f: &mut Frame, app: &App) {
    let block = Block::default()
        .title(TITLE)
        .title_alignment(Alignment::Center)
        .borders(Borders::ALL);
    let inner_area = block.inner(f.area());
    f.render_widget(block, f.area());

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(1)].as_ref())
        .split(inner_area);

    match app.presenter.presentation() {
        Presentation::Loading { label } => draw_loading(f, label, app.tick, chunks[0]),
        Presentation::Scoreboard {
            left,
            right,
            separator,
        } => draw_scoreboard(f, &left, &right, separator, chunks[0]),
        Presentation::Error { text } => draw_error(f, &text, chunks[0]),
    }

    draw_footer(f, app, chunks[1]);
}

fn centered(area: Rect, height: u16) -> Rect {
    Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Fill(1), Constraint::Length(height), Constraint::Fill(1)].as_ref())
        .split(area)[1]
}

fn draw_loading(f: &mut Frame, label: &str, tick: usize, area: Rect) {
    let frame = SPINNER[tick % SPINNER.len()];
    let line = Line::from(vec![
        Span::styled(frame, Style::default().fg(Color::Cyan)),
        Span::raw(" "),
        Span::raw(label),
    ]);
    let p = Paragraph::new(line).alignment(Alignment::Center);
    f.render_widget(p, centered(area, 1));
}

fn draw_scoreboard(f: &mut Frame, left: &Column, right: &Column, separator: &str, area: Rect) {
    let header_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints(
            [
                Constraint::Percentage(40), // Team A
                Constraint::Percentage(20), // vs
                Constraint::Percentage(40), // Team B
            ]
            .as_ref(),
        )
        .split(area);

    draw_column(f, left, header_chunks[0]);
    draw_column(f, right, header_chunks[2]);

    let mid_text = vec![
        Line::from(""),
        Line::from(Span::styled(
            separator.to_string(),
            Style::default().add_modifier(Modifier::ITALIC),
        )),
    ];
    let mid_p = Paragraph::new(mid_text).alignment(Alignment::Center);
    f.render_widget(mid_p, header_chunks[1]);
}

// Team name above its score; the score switches to big text when the column
// has room for every glyph.
fn draw_column(f: &mut Frame, column: &Column, area: Rect) {
    let text_area = Layout::default()
        .direction(Direction::Vertical)
        .constraints(
            [
                Constraint::Length(1), // Spacer
                Constraint::Length(1), // Team
                Constraint::Min(1),    // Score
            ]
            .as_ref(),
        )
        .split(area);

    let team_p = Paragraph::new(column.team.clone())
        .style(Style::default().add_modifier(Modifier::BOLD))
        .alignment(Alignment::Center);
    f.render_widget(team_p, text_area[1]);

    let score_area = text_area[2];
    let big_width = column.score.chars().count() as u16 * BIG_GLYPH_WIDTH;
    if score_area.width < big_width || score_area.height < BIG_GLYPH_HEIGHT {
        let score_p = Paragraph::new(column.score.clone())
            .style(Style::default().fg(Color::White).add_modifier(Modifier::BOLD))
            .alignment(Alignment::Center);
        f.render_widget(score_p, score_area);
    } else {
        let score_text = BigText::builder()
            .pixel_size(PixelSize::Quadrant)
            .style(Style::default().fg(Color::White))
            .lines(vec![column.score.clone().into()])
            .alignment(Alignment::Center)
            .build();
        f.render_widget(score_text, score_area);
    }
}

fn draw_error(f: &mut Frame, text: &str, area: Rect) {
    let p = Paragraph::new(text.to_string())
        .style(Style::default().fg(Color::Red))
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });
    f.render_widget(p, centered(area, 3));
}

fn draw_footer(f: &mut Frame, app: &App, area: Rect) {
    let mut spans = vec![];
    if let Some(at) = app.last_updated {
        spans.push(Span::raw(format!(" Updated {} ", at.format("%H:%M:%S"))).dim());
    }
    spans.push(Span::styled(" r ", Style::default().bg(Color::White).fg(Color::Black)));
    spans.push(Span::raw(" refresh "));
    spans.push(Span::styled(" q ", Style::default().bg(Color::White).fg(Color::Black)));
    spans.push(Span::raw(" quit"));
    f.render_widget(Paragraph::new(Line::from(spans)), area);
}
