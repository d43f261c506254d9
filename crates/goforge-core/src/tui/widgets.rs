//! Shared render helpers for the two session flavors.

use std::sync::Arc;

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph},
    Frame,
};

use crate::templates::Template;

pub fn title(frame: &mut Frame, area: Rect, text: &str) {
    let widget = Paragraph::new(text.to_string())
        .style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD));
    frame.render_widget(widget, area);
}

pub fn input_prompt(frame: &mut Frame, area: Rect, label: &str, input: &str) {
    let lines = vec![
        Line::from(label.to_string()),
        Line::from(format!("> {input}█")),
    ];
    frame.render_widget(Paragraph::new(lines), area);
}

pub fn template_list(
    frame: &mut Frame,
    area: Rect,
    templates: &[Arc<dyn Template>],
    cursor: usize,
) {
    let items: Vec<ListItem> = templates
        .iter()
        .enumerate()
        .map(|(i, t)| {
            let (prefix, style) = cursor_style(i == cursor);
            ListItem::new(Line::from(vec![
                Span::styled(format!("{prefix}{}", t.name()), style),
                Span::styled(
                    format!(" — {}", t.description()),
                    Style::default().fg(Color::DarkGray),
                ),
            ]))
        })
        .collect();
    let list = List::new(items).block(Block::default().borders(Borders::ALL).title("Templates"));
    frame.render_widget(list, area);
}

pub fn choice_menu(frame: &mut Frame, area: Rect, options: &[&str], cursor: usize) {
    let items: Vec<ListItem> = options
        .iter()
        .enumerate()
        .map(|(i, option)| {
            let (prefix, style) = cursor_style(i == cursor);
            ListItem::new(Span::styled(format!("{prefix}{option}"), style))
        })
        .collect();
    let list =
        List::new(items).block(Block::default().borders(Borders::ALL).title("Next step"));
    frame.render_widget(list, area);
}

/// Bordered box showing the tail of the streamed subprocess output.
pub fn output_box(frame: &mut Frame, area: Rect, lines: &[String]) {
    let inner_height = area.height.saturating_sub(2) as usize;
    let start = lines.len().saturating_sub(inner_height);
    let text: Vec<Line> = lines[start..]
        .iter()
        .map(|l| Line::from(Span::styled(l.clone(), Style::default().fg(Color::DarkGray))))
        .collect();
    let widget =
        Paragraph::new(text).block(Block::default().borders(Borders::ALL).title("Output"));
    frame.render_widget(widget, area);
}

pub fn status(frame: &mut Frame, area: Rect, text: &str, ok: bool) {
    let color = if ok { Color::Green } else { Color::Red };
    let widget = Paragraph::new(text.to_string()).style(Style::default().fg(color));
    frame.render_widget(widget, area);
}

pub fn help(frame: &mut Frame, area: Rect, text: &str) {
    let widget =
        Paragraph::new(text.to_string()).style(Style::default().fg(Color::DarkGray));
    frame.render_widget(widget, area);
}

fn cursor_style(selected: bool) -> (&'static str, Style) {
    if selected {
        (
            "> ",
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )
    } else {
        ("  ", Style::default())
    }
}
