//! The UI renders the viewer state: contents on the left, document on the right.
//!
//! The contents pane highlights whichever section the tracker currently considers
//! active; it only reads `active_id` and tolerates it changing between frames.

use crate::app_state::{AppState, Focus};
use crate::config::Config;
use crate::section::Level;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph},
    Frame,
};

const HELP: &str =
    "j/k: Scroll | PgUp/PgDn: Page | g/G: Top/Bottom | Tab: Contents | Enter: Jump | r: Reload | q: Quit";

/// Splits the screen into contents pane, document pane and help bar.
fn panes(area: Rect, cfg: &Config) -> (Rect, Rect, Rect) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(3)])
        .split(area);
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(cfg.toc_width), Constraint::Min(0)])
        .split(rows[0]);
    (columns[0], columns[1], rows[1])
}

#[must_use]
/// Inner rectangle the document text is drawn into for a screen of `area`.
///
/// The viewer lays the document out for exactly this size, so wrapping matches
/// what ends up on screen.
pub fn document_area(area: Rect, cfg: &Config) -> Rect {
    let (_, document, _) = panes(area, cfg);
    Block::default().borders(Borders::ALL).inner(document)
}

/// Renders the viewer into the frame.
pub fn draw(f: &mut Frame, app: &AppState, cfg: &Config) {
    let (contents, document, help) = panes(f.area(), cfg);
    draw_contents(f, app, contents);
    draw_document(f, app, document);

    let help_text = app.message.as_deref().unwrap_or(HELP);
    let help_widget = Paragraph::new(help_text).block(Block::default().borders(Borders::ALL));
    f.render_widget(help_widget, help);
}

fn draw_contents(f: &mut Frame, app: &AppState, area: Rect) {
    let active = app.tracker.active_id();

    let items: Vec<ListItem> = app
        .sections()
        .iter()
        .enumerate()
        .map(|(i, section)| {
            let indent = match section.level {
                Level::Primary => "",
                Level::Secondary => "  ",
            };
            let is_active = active == Some(section.id.as_str());
            let marker = if is_active { "▸ " } else { "  " };

            let mut style = if is_active {
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default()
            };
            if app.focus == Focus::Contents && i == app.toc_index {
                style = style.add_modifier(Modifier::REVERSED);
            }

            ListItem::new(Line::from(vec![
                Span::raw(indent),
                Span::raw(marker),
                Span::raw(section.label.clone()),
            ]))
            .style(style)
        })
        .collect();

    let title = if app.focus == Focus::Contents {
        "Contents *"
    } else {
        "Contents"
    };
    let list = List::new(items).block(Block::default().borders(Borders::ALL).title(title));
    f.render_widget(list, area);
}

fn draw_document(f: &mut Frame, app: &AppState, area: Rect) {
    let viewport = &app.viewport;
    let start = usize::try_from(viewport.offset()).unwrap_or(0);
    let lines: Vec<Line> = viewport
        .layout()
        .rows()
        .iter()
        .skip(start)
        .take(usize::from(viewport.height()))
        .map(|row| match row.heading {
            Some(depth) => {
                let color = if depth <= 2 { Color::Cyan } else { Color::Blue };
                Line::from(Span::styled(
                    row.text.clone(),
                    Style::default().fg(color).add_modifier(Modifier::BOLD),
                ))
            }
            None => Line::from(row.text.clone()),
        })
        .collect();

    let title = app
        .path
        .file_name()
        .map_or_else(String::new, |name| name.to_string_lossy().to_string());
    let paragraph = Paragraph::new(lines).block(Block::default().borders(Borders::ALL).title(title));
    f.render_widget(paragraph, area);
}
