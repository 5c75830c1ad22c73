//! UI rendering

use super::app::{App, Field, Mode};
use super::help::get_help_text;
use formulary_core::FormulaCard;
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
};

pub(crate) const STATUS_BAR_HEIGHT: u16 = 1;
pub(crate) const RESULT_BOX_HEIGHT: u16 = 8;
pub(crate) const LIST_WIDTH_PERCENT: u16 = 32;

pub fn draw(f: &mut Frame, app: &App) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(3), Constraint::Length(STATUS_BAR_HEIGHT)])
        .split(f.area());
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(LIST_WIDTH_PERCENT),
            Constraint::Percentage(100 - LIST_WIDTH_PERCENT),
        ])
        .split(rows[0]);

    draw_catalog_list(f, app, columns[0]);
    match app.current_card() {
        Some(card) => draw_card(f, app, card, columns[1]),
        None => draw_empty(f, columns[1]),
    }
    draw_status_bar(f, app, rows[1]);

    if app.help_modal {
        draw_help_modal(f, app);
    }
}

fn draw_catalog_list(f: &mut Frame, app: &App, area: Rect) {
    let mut lines: Vec<Line> = Vec::new();
    let mut selected_line = 0usize;
    let mut index = 0usize;

    for section in app.formulary.sections() {
        lines.push(Line::from(Span::styled(
            section.title.clone(),
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )));
        for card in &section.cards {
            let style = if index == app.selected {
                selected_line = lines.len();
                Style::default().fg(Color::Black).bg(Color::Cyan)
            } else {
                Style::default().fg(Color::White)
            };
            lines.push(Line::from(Span::styled(
                format!("  {}", card.entry().name),
                style,
            )));
            index += 1;
        }
    }

    // Keep the selected entry inside the visible window.
    let inner_height = area.height.saturating_sub(2) as usize;
    let scroll = if inner_height > 0 && selected_line >= inner_height {
        selected_line + 1 - inner_height
    } else {
        0
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .title(format!(" {} ", app.title));
    let paragraph = Paragraph::new(lines)
        .block(block)
        .scroll((scroll.min(u16::MAX as usize) as u16, 0));
    f.render_widget(paragraph, area);
}

fn field_line<'a>(app: &App, field: Field, label: String, card: &FormulaCard) -> Line<'a> {
    let focused = app.field == field;
    let label_style = if focused {
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::Gray)
    };

    let value = if focused && app.mode == Mode::Edit {
        let split = app
            .edit_buffer
            .char_indices()
            .nth(app.edit_cursor)
            .map(|(i, _)| i)
            .unwrap_or(app.edit_buffer.len());
        let (before, after) = app.edit_buffer.split_at(split);
        Span::styled(
            format!("{}│{}", before, after),
            Style::default().fg(Color::White).bg(Color::DarkGray),
        )
    } else {
        let text = app.field_text(field);
        if field == Field::Expression && text.is_empty() {
            Span::styled(
                card.placeholder().to_string(),
                Style::default().fg(Color::DarkGray),
            )
        } else {
            Span::styled(text, Style::default().fg(Color::White))
        }
    };

    let marker = if focused { "> " } else { "  " };
    Line::from(vec![
        Span::styled(marker, label_style),
        Span::styled(format!("{}: ", label), label_style),
        value,
    ])
}

fn draw_card(f: &mut Frame, app: &App, card: &FormulaCard, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(3), Constraint::Length(RESULT_BOX_HEIGHT)])
        .split(area);

    let entry = card.entry();
    let mut lines: Vec<Line> = Vec::new();
    if let Some(desc) = entry.description.as_deref() {
        lines.push(Line::from(Span::styled(
            desc.to_string(),
            Style::default().fg(Color::Gray),
        )));
        lines.push(Line::from(""));
    }
    lines.push(field_line(app, Field::Expression, "Expression".to_string(), card));
    lines.push(Line::from(""));
    for (i, var) in entry.variables.iter().enumerate() {
        lines.push(field_line(app, Field::Variable(i), var.display_label(), card));
    }

    let title = match app
        .formulary
        .section_index_of(app.selected)
        .and_then(|i| app.formulary.sections().get(i))
    {
        Some(section) => format!(" {} / {} ", section.title, entry.name),
        None => format!(" {} ", entry.name),
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .title(title)
        .border_style(Style::default().fg(Color::Cyan));
    f.render_widget(
        Paragraph::new(lines).block(block).wrap(Wrap { trim: false }),
        chunks[0],
    );

    let display = card.display();
    let result_style = if display.is_error() {
        Style::default().fg(Color::Red)
    } else {
        Style::default()
            .fg(Color::Green)
            .add_modifier(Modifier::BOLD)
    };
    let result_lines = vec![
        Line::from(Span::styled(display.text(), result_style)),
        Line::from(""),
        Line::from(Span::styled(
            app.hint.clone(),
            Style::default().fg(Color::DarkGray),
        )),
    ];
    let result_block = Block::default()
        .borders(Borders::ALL)
        .title(" Result ")
        .border_style(Style::default().fg(Color::Magenta));
    f.render_widget(
        Paragraph::new(result_lines)
            .block(result_block)
            .wrap(Wrap { trim: true }),
        chunks[1],
    );
}

fn draw_empty(f: &mut Frame, area: Rect) {
    let block = Block::default().borders(Borders::ALL).title(" Formula ");
    let paragraph = Paragraph::new(Line::from(Span::styled(
        "No formulas loaded. Pass a catalog file (.json or .toml).",
        Style::default().fg(Color::DarkGray),
    )))
    .block(block)
    .wrap(Wrap { trim: true });
    f.render_widget(paragraph, area);
}

fn draw_status_bar(f: &mut Frame, app: &App, area: Rect) {
    let mode = match app.mode {
        Mode::Normal => "NORMAL",
        Mode::Edit => "EDIT",
    };
    let help = match app.mode {
        Mode::Normal => "j/k:select  Tab:field  i:edit  ?:help  q:quit",
        Mode::Edit => "Esc/Enter:done  Left/Right:move",
    };

    let status = if !app.status_message.is_empty() {
        app.status_message.clone()
    } else {
        format!(
            "[{}]  {}/{}  |  {}",
            mode,
            (app.selected + 1).min(app.formulary.card_count()),
            app.formulary.card_count(),
            help
        )
    };

    let style = if app.status_message.starts_with("Error") {
        Style::default().fg(Color::Red)
    } else if !app.status_message.is_empty() {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default().fg(Color::DarkGray)
    };

    f.render_widget(Paragraph::new(Line::from(Span::styled(status, style))), area);
}

fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}

fn draw_help_modal(f: &mut Frame, app: &App) {
    let area = centered_rect(70, 80, f.area());
    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Help ")
        .border_style(Style::default().fg(Color::Green))
        .style(Style::default().fg(Color::White).bg(Color::Black));

    let lines: Vec<Line> = get_help_text()
        .into_iter()
        .map(|text| {
            let style = if text.starts_with("  ") || text.is_empty() {
                Style::default().fg(Color::White)
            } else {
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD)
            };
            Line::from(Span::styled(text, style))
        })
        .collect();

    f.render_widget(Clear, area);
    f.render_widget(
        Paragraph::new(lines)
            .block(block)
            .scroll((app.help_scroll, 0)),
        area,
    );
}
