//! User interface components.
//!
//! Provides TUI widgets and drawing functions for the reader's
//! terminal-based user interface using ratatui.

mod reader;
mod search;

pub use reader::{draw_chapter, draw_front_matter, draw_verse};
pub use search::draw_search;

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use crate::app::{App, AppMode};

/// Render the full application UI to the terminal frame.
pub fn draw(f: &mut Frame, app: &mut App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(1),
            Constraint::Length(3), // Status bar at bottom
        ])
        .split(f.size());

    draw_search(f, app, chunks[0]);

    match app.mode {
        AppMode::Search => {}
        AppMode::Verse => draw_verse(f, app),
        AppMode::Chapter => draw_chapter(f, app),
        AppMode::FrontMatter => draw_front_matter(f, app),
    }

    if app.is_loading {
        draw_loading_indicator(f);
    }

    if app.show_help {
        draw_help_modal(f);
    }

    draw_status_bar(f, app, chunks[1]);
}

fn draw_status_bar(f: &mut Frame, app: &App, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Yellow))
        .title(Span::styled("Status", Style::default().fg(Color::Yellow)));

    let hints: &[(&str, &str)] = match app.mode {
        AppMode::Search => &[("Enter", "Search/Open"), ("Tab", "Suggest"), ("F2", "Legal"), ("?", "Help")],
        AppMode::Verse => &[("ESC", "Close"), ("c", "Chapter"), ("y", "Copy")],
        AppMode::Chapter => &[("ESC", "Close"), ("←/h", "Prev"), ("→/l", "Next"), ("j/k", "Scroll")],
        AppMode::FrontMatter => &[("ESC", "Close"), ("j/k", "Scroll")],
    };

    let mut spans = vec![Span::styled(format!(" {}", app.status), Style::default().fg(Color::White))];
    spans.push(Span::raw("  "));
    spans.extend(create_help_text(hints));

    let status = Paragraph::new(Line::from(spans))
        .style(Style::default().fg(Color::Gray))
        .block(block);
    f.render_widget(status, area);
}

/// Build styled help text spans from key-description pairs for the status bar.
pub fn create_help_text<'a>(commands: &[(&'a str, &'a str)]) -> Vec<Span<'a>> {
    let mut text = Vec::new();

    for (i, (key, description)) in commands.iter().enumerate() {
        text.push(Span::styled(*key, Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)));
        text.push(Span::raw(format!(": {description}")));

        if i < commands.len() - 1 {
            text.push(Span::raw(" | "));
        }
    }

    text
}

/// Create a bordered block with a title, highlighted when focused.
pub fn create_titled_block(title: &str, is_focused: bool) -> Block<'_> {
    let style = if is_focused {
        Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
    } else {
        Style::default()
    };

    Block::default()
        .title(Span::styled(title, style))
        .borders(Borders::ALL)
        .border_style(if is_focused { Style::default().fg(Color::Yellow) } else { Style::default() })
}

/// Centered rectangle covering the given percentages of `area`.
pub fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let vertical = Layout::default()
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
        .split(vertical[1])[1]
}

fn draw_loading_indicator(f: &mut Frame) {
    let size = f.size();
    let width = 26;
    let height = 3;

    let area = Rect {
        x: size.width.saturating_sub(width) / 2,
        y: size.height.saturating_sub(height) / 2,
        width: width.min(size.width),
        height: height.min(size.height),
    };

    f.render_widget(Clear, area);
    let loading = Paragraph::new("Loading scripture...")
        .alignment(Alignment::Center)
        .style(Style::default().fg(Color::Yellow))
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(loading, area);
}

fn draw_help_modal(f: &mut Frame) {
    let area = centered_rect(60, 60, f.size());
    let rows = [
        ("type", "Edit the query; suggestions appear after two letters"),
        ("Tab / Shift+Tab", "Cycle suggestions"),
        ("Enter", "Use suggestion, search, or open the selected verse"),
        ("↑ / ↓", "Select a result"),
        ("c", "Read the verse's chapter"),
        ("← / →", "Previous / next chapter"),
        ("y", "Copy the open verse"),
        ("F2", "Show the front matter"),
        ("Ctrl+R", "Reload the scripture file"),
        ("Ctrl+C", "Quit"),
    ];

    let lines: Vec<Line> = rows
        .iter()
        .map(|(key, description)| {
            Line::from(vec![
                Span::styled(format!("{key:>16}  "), Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)),
                Span::raw(*description),
            ])
        })
        .collect();

    f.render_widget(Clear, area);
    let help = Paragraph::new(lines)
        .wrap(Wrap { trim: false })
        .block(create_titled_block("Help (any key to close)", true));
    f.render_widget(help, area);
}
