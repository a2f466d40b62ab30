//! Rendering of a session view.

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph},
};
use velha::{Mark, Phase, Position, SessionView, Square};

use super::input::{Field, SetupForm};

/// Renders the whole screen.
pub fn render(f: &mut Frame, view: &SessionView, cursor: Position, form: &SetupForm) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(7),
            Constraint::Length(3),
            Constraint::Length(ranking_height(view.ranking.len())),
            Constraint::Length(1),
        ])
        .split(f.area());

    let title = Paragraph::new("Jogo da Velha")
        .alignment(Alignment::Center)
        .style(Style::default().add_modifier(Modifier::BOLD))
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(title, chunks[0]);

    if view.board_visible {
        render_board(f, chunks[1], view, cursor);
    } else if view.setup_visible {
        render_setup(f, chunks[1], form);
    }

    if let Some(status) = &view.status {
        let status = Paragraph::new(status.as_str())
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL));
        f.render_widget(status, chunks[2]);
    }

    render_ranking(f, chunks[3], view);

    let help = Paragraph::new(help_text(view.phase))
        .style(Style::default().fg(Color::DarkGray))
        .alignment(Alignment::Center);
    f.render_widget(help, chunks[4]);
}

/// Rows for the ranking panel: one per entry (at least one) plus borders.
fn ranking_height(entries: usize) -> u16 {
    u16::try_from(entries.max(1))
        .unwrap_or(u16::MAX)
        .saturating_add(2)
}

fn render_board(f: &mut Frame, area: Rect, view: &SessionView, cursor: Position) {
    let mut lines = Vec::with_capacity(5);
    for row in 0..3 {
        if row > 0 {
            lines.push(Line::from("───┼───┼───"));
        }
        let mut spans = Vec::with_capacity(5);
        for col in 0..3 {
            if col > 0 {
                spans.push(Span::raw("│"));
            }
            let index = row * 3 + col;
            let cell = view.cells[index];
            let (text, mut style) = match cell.square {
                Square::Empty => (format!(" {} ", index + 1), Style::default().fg(Color::DarkGray)),
                Square::Occupied(mark) => (format!(" {} ", mark), mark_style(mark)),
            };
            if view.phase == Phase::InProgress && cursor.to_index() == index {
                style = style.add_modifier(Modifier::REVERSED);
            }
            spans.push(Span::styled(text, style));
        }
        lines.push(Line::from(spans));
    }

    let board = Paragraph::new(lines).alignment(Alignment::Center);
    f.render_widget(board, center_rect(area, 11, 5));
}

fn mark_style(mark: Mark) -> Style {
    let color = match mark {
        Mark::O => Color::Green,
        Mark::X => Color::Red,
    };
    Style::default().fg(color).add_modifier(Modifier::BOLD)
}

fn render_setup(f: &mut Frame, area: Rect, form: &SetupForm) {
    let field = |label: &str, value: &str, focused: bool| {
        let style = if focused {
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
        } else {
            Style::default()
        };
        let cursor = if focused { "_" } else { "" };
        Line::from(vec![
            Span::raw(format!("{label}: ")),
            Span::styled(format!("{value}{cursor}"), style),
        ])
    };

    let lines = vec![
        field("Jogador 1 (O)", form.name_a(), form.focus() == Field::NameA),
        field("Jogador 2 (X)", form.name_b(), form.focus() == Field::NameB),
        Line::from(""),
        Line::from("Enter para começar"),
    ];
    let setup = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .title("Jogadores"),
    );
    f.render_widget(setup, center_rect(area, 40, 6));
}

fn render_ranking(f: &mut Frame, area: Rect, view: &SessionView) {
    let items: Vec<ListItem> = if view.ranking.is_empty() {
        vec![ListItem::new("Nenhuma vitória ainda").style(Style::default().fg(Color::DarkGray))]
    } else {
        view.ranking
            .iter()
            .map(|line| ListItem::new(line.as_str()))
            .collect()
    };
    let list = List::new(items).block(Block::default().borders(Borders::ALL).title("Ranking"));
    f.render_widget(list, area);
}

fn help_text(phase: Phase) -> &'static str {
    match phase {
        Phase::NotStarted => "Tab: trocar campo  Enter: começar  Esc: sair",
        Phase::InProgress => "Setas: mover  Enter/Espaço: jogar  1-9: casa  q: sair",
        Phase::Finished => "r: novo jogo  q: sair",
    }
}

/// Centers a `width` x `height` rectangle inside `area`, clamped to fit.
fn center_rect(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}
