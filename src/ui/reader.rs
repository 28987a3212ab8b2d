use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Clear, Paragraph, Wrap},
    Frame,
};

use super::{centered_rect, create_titled_block};
use crate::app::App;
use crate::constants::ui::{POPUP_HEIGHT_PERCENT, POPUP_WIDTH_PERCENT};

/// Draw the single-verse popup.
pub fn draw_verse(f: &mut Frame, app: &App) {
    let Some(verse) = &app.open_verse else {
        return;
    };
    let area = centered_rect(POPUP_WIDTH_PERCENT, POPUP_HEIGHT_PERCENT, f.size());
    f.render_widget(Clear, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(1), Constraint::Length(1)])
        .split(area);

    let body = Paragraph::new(verse.text.as_str())
        .wrap(Wrap { trim: false })
        .scroll((app.scroll, 0))
        .block(create_titled_block(&verse.reference, true));
    f.render_widget(body, chunks[0]);

    let footer = Paragraph::new(Line::from(vec![
        Span::styled("c", Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)),
        Span::raw(format!(": View Chapter ({})", verse.chapter_id)),
    ]))
    .alignment(Alignment::Center);
    f.render_widget(footer, chunks[1]);
}

/// Draw the chapter reader with previous/next hints.
pub fn draw_chapter(f: &mut Frame, app: &App) {
    let Some(view) = app.chapter_view() else {
        return;
    };
    let area = centered_rect(POPUP_WIDTH_PERCENT, POPUP_HEIGHT_PERCENT, f.size());
    f.render_widget(Clear, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(1), Constraint::Length(1)])
        .split(area);

    let mut lines = Vec::new();
    for (i, verse) in view.verses.iter().enumerate() {
        if i > 0 {
            lines.push(Line::raw(""));
        }
        let mut spans = Vec::new();
        if let Some(label) = verse.verse_label() {
            spans.push(Span::styled(
                format!("{label} "),
                Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
            ));
        }
        spans.push(Span::raw(verse.text.as_str()));
        lines.push(Line::from(spans));
    }

    let title = format!("{} ({}/{})", view.chapter_id, view.position + 1, view.count);
    let body = Paragraph::new(lines)
        .wrap(Wrap { trim: false })
        .scroll((app.scroll, 0))
        .block(create_titled_block(&title, true));
    f.render_widget(body, chunks[0]);

    let enabled = Style::default().fg(Color::Yellow);
    let disabled = Style::default().fg(Color::DarkGray);
    let footer = Paragraph::new(Line::from(vec![
        Span::styled("◀ prev", if view.has_previous { enabled } else { disabled }),
        Span::raw("   "),
        Span::styled("next ▶", if view.has_next { enabled } else { disabled }),
    ]))
    .alignment(Alignment::Center);
    f.render_widget(footer, chunks[1]);
}

/// Draw the front-matter text.
pub fn draw_front_matter(f: &mut Frame, app: &App) {
    let area = centered_rect(POPUP_WIDTH_PERCENT, POPUP_HEIGHT_PERCENT, f.size());
    f.render_widget(Clear, area);

    let text = app
        .corpus
        .as_ref()
        .map_or("Loading...", |corpus| corpus.front_matter.as_str());
    let body = Paragraph::new(text)
        .wrap(Wrap { trim: false })
        .scroll((app.scroll, 0))
        .block(create_titled_block("Legal Disclosure", true));
    f.render_widget(body, area);
}
