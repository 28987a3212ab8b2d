use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{List, ListItem, Paragraph},
    Frame,
};
use regex::Regex;
use unicode_width::UnicodeWidthStr;

use super::create_titled_block;
use crate::app::{App, AppMode};

/// Draw the query box, the suggestion strip and the result list.
#[allow(clippy::cast_possible_truncation)]
pub fn draw_search(f: &mut Frame, app: &mut App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(1),
            Constraint::Min(1),
        ])
        .split(area);

    let focused = app.mode == AppMode::Search && !app.show_help;
    let input = Paragraph::new(app.query.as_str())
        .block(create_titled_block("Search the scriptures", focused));
    f.render_widget(input, chunks[0]);
    if focused {
        let x = chunks[0].x + 1 + app.query.width() as u16;
        f.set_cursor(x.min(chunks[0].right().saturating_sub(2)), chunks[0].y + 1);
    }

    draw_suggestions(f, app, chunks[1]);
    draw_results(f, app, chunks[2]);
}

fn draw_suggestions(f: &mut Frame, app: &App, area: Rect) {
    let mut spans = vec![Span::raw(" ")];
    for (i, word) in app.suggestions.iter().enumerate() {
        let style = if app.suggestion_cursor == Some(i) {
            Style::default().fg(Color::Black).bg(Color::Cyan)
        } else {
            Style::default().fg(Color::Cyan)
        };
        spans.push(Span::styled(format!(" {word} "), style));
        spans.push(Span::raw(" "));
    }
    f.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn draw_results(f: &mut Frame, app: &mut App, area: Rect) {
    let Some(results) = &app.results else {
        let hint = if app.corpus.is_some() { "Type a word and press Enter." } else { "" };
        let placeholder = Paragraph::new(hint)
            .style(Style::default().fg(Color::Gray))
            .block(create_titled_block("Results", false));
        f.render_widget(placeholder, area);
        return;
    };

    let title = if results.verses.is_empty() {
        "No matches found.".to_string()
    } else if results.capped {
        format!("Results for \"{}\" (limited to {})", results.query, results.verses.len())
    } else {
        format!("Results for \"{}\" ({})", results.query, results.verses.len())
    };

    let pattern = match_pattern(&results.query);
    let items: Vec<ListItem> = results
        .verses
        .iter()
        .map(|verse| {
            let mut snippet = vec![Span::raw("  ")];
            snippet.extend(highlight_matches(&verse.text, pattern.as_ref()));
            ListItem::new(Text::from(vec![
                Line::from(Span::styled(
                    verse.reference.clone(),
                    Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
                )),
                Line::from(snippet),
            ]))
        })
        .collect();

    let list = List::new(items)
        .block(create_titled_block(&title, false))
        .highlight_style(Style::default().bg(Color::DarkGray))
        .highlight_symbol("> ");
    f.render_stateful_widget(list, area, &mut app.result_state);
}

/// Case-insensitive literal pattern for the query.
fn match_pattern(query: &str) -> Option<Regex> {
    if query.is_empty() {
        return None;
    }
    Regex::new(&format!("(?i){}", regex::escape(query))).ok()
}

/// Split `text` into spans with every match of `pattern` emphasized.
fn highlight_matches(text: &str, pattern: Option<&Regex>) -> Vec<Span<'static>> {
    let Some(pattern) = pattern else {
        return vec![Span::raw(text.to_string())];
    };

    let emphasis = Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD);
    let mut spans = Vec::new();
    let mut last = 0;
    for m in pattern.find_iter(text) {
        if m.start() > last {
            spans.push(Span::raw(text[last..m.start()].to_string()));
        }
        spans.push(Span::styled(m.as_str().to_string(), emphasis));
        last = m.end();
    }
    if last < text.len() {
        spans.push(Span::raw(text[last..].to_string()));
    }
    spans
}
