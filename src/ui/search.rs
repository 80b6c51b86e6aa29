//! Location search overlay
//!
//! A centered modal with a text input, live suggestions for the current
//! query, the recent-search list and a "use current location" action. The
//! selection moves over suggestions first, then recents, then the location
//! action.

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use crate::app::{App, SearchRow};
use crate::ui::theme;

/// Renders the search overlay on top of the dashboard
pub fn render(frame: &mut Frame, app: &App) {
    let area = frame.area();
    let overlay_area = centered_rect(50, 20, area);

    frame.render_widget(Clear, overlay_area);

    let rows = app.search_rows();
    let selected = |row: &SearchRow| rows.get(app.search_selection) == Some(row);

    let mut lines = vec![
        Line::from(vec![
            Span::styled("Search: ", Style::default().fg(theme::SECONDARY)),
            Span::styled(
                app.search_query.clone(),
                Style::default().fg(theme::PRIMARY),
            ),
            Span::styled("\u{2588}", Style::default().fg(theme::PRIMARY)),
        ]),
        Line::from(""),
    ];

    if app.search_in_progress {
        lines.push(Line::from(Span::styled(
            "Searching...",
            Style::default().fg(theme::SECONDARY),
        )));
    } else if !app.suggestions.is_empty() {
        for (i, suggestion) in app.suggestions.iter().enumerate() {
            lines.push(entry_line(
                &format!("{}, {}", suggestion.name, suggestion.country),
                selected(&SearchRow::Suggestion(i)),
            ));
        }
    } else if app.search_query.trim().len() >= 3 {
        lines.push(Line::from(Span::styled(
            "No matches",
            Style::default().fg(theme::UNKNOWN),
        )));
    }

    if !app.recent_searches.is_empty() {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            "Recent",
            Style::default()
                .fg(theme::HEADER)
                .add_modifier(Modifier::BOLD),
        )));
        for (i, recent) in app.recent_searches.iter().enumerate() {
            lines.push(entry_line(&recent.name, selected(&SearchRow::Recent(i))));
        }
    }

    lines.push(Line::from(""));
    lines.push(entry_line(
        "\u{2316} Use current location",
        selected(&SearchRow::Device),
    ));
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "Enter: select  Esc: close",
        Style::default().fg(theme::SECONDARY),
    )));

    let block = Block::default()
        .title(" Find a location ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme::HEADER));

    let paragraph = Paragraph::new(lines)
        .block(block)
        .alignment(Alignment::Left);

    frame.render_widget(paragraph, overlay_area);
}

fn entry_line(label: &str, selected: bool) -> Line<'static> {
    let (marker, style) = if selected {
        (
            "\u{25B8} ",
            Style::default()
                .fg(theme::SELECTED)
                .add_modifier(Modifier::BOLD),
        )
    } else {
        ("  ", Style::default().fg(theme::PRIMARY))
    };
    Line::from(vec![
        Span::styled(marker.to_string(), style),
        Span::styled(label.to_string(), style),
    ])
}

/// Helper function to create a centered rect
fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length((area.height.saturating_sub(height)) / 2),
            Constraint::Length(height),
            Constraint::Length((area.height.saturating_sub(height)) / 2),
        ])
        .split(area);

    let horizontal = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length((area.width.saturating_sub(width)) / 2),
            Constraint::Length(width),
            Constraint::Length((area.width.saturating_sub(width)) / 2),
        ])
        .split(vertical[1]);

    horizontal[1]
}
