//! Main dashboard screen
//!
//! Renders the current conditions, the hourly strip with a temperature
//! sparkline, the daily forecast list and any active alerts. A fetch error
//! is shown as a single line above the content; it never replaces a stale
//! snapshot, which stays on screen until a newer fetch succeeds.

use chrono::DateTime;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::app::App;
use crate::data::{CurrentConditions, DailyForecastEntry, HourlyForecastEntry, WeatherAlert};
use crate::ui::theme;
use crate::ui::widgets::TemperatureSparkline;
use crate::units;

/// Hours shown as labelled rows under the sparkline
const HOURLY_ROWS: usize = 6;

/// Renders the dashboard screen
pub fn render(frame: &mut Frame, app: &App) {
    let area = frame.area();

    let Some(snapshot) = &app.snapshot else {
        render_placeholder(frame, area, app);
        return;
    };

    let title = if snapshot.location.name.is_empty() {
        format!(
            " {:.4}, {:.4} ",
            snapshot.location.lat, snapshot.location.lon
        )
    } else {
        format!(" {}, {} ", snapshot.location.name, snapshot.location.country)
    };

    let main_block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme::HEADER))
        .title(Span::styled(
            title,
            Style::default()
                .fg(theme::PRIMARY)
                .add_modifier(Modifier::BOLD),
        ));

    let inner_area = main_block.inner(area);
    frame.render_widget(main_block, area);

    let alert_height = snapshot
        .alerts
        .as_ref()
        .map(|alerts| alerts.len().min(3) as u16)
        .unwrap_or(0);
    let status_height = u16::from(app.error.is_some() || app.is_loading);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(alert_height),
            Constraint::Length(status_height),
            Constraint::Length(8),              // current conditions
            Constraint::Length(3 + HOURLY_ROWS as u16), // hourly strip
            Constraint::Min(0),                 // daily forecast
            Constraint::Length(1),              // key hints
        ])
        .split(inner_area);

    if let Some(alerts) = &snapshot.alerts {
        let paragraph = Paragraph::new(build_alert_lines(alerts));
        frame.render_widget(paragraph, chunks[0]);
    }
    render_status_line(frame, chunks[1], app);
    render_current(frame, chunks[2], &snapshot.current, app);
    render_hourly(frame, chunks[3], &snapshot.hourly, app);
    render_daily(frame, chunks[4], &snapshot.daily, app);
    render_key_hints(frame, chunks[5]);
}

/// Shown before the first snapshot arrives
fn render_placeholder(frame: &mut Frame, area: Rect, app: &App) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme::HEADER))
        .title(" Skycast ");
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let line = if app.is_loading {
        Line::from(Span::styled(
            "Loading weather data...",
            Style::default().fg(theme::SECONDARY),
        ))
    } else if let Some(error) = &app.error {
        Line::from(Span::styled(
            error.clone(),
            Style::default().fg(theme::ERROR),
        ))
    } else {
        Line::from(Span::styled(
            "No weather data",
            Style::default().fg(theme::UNKNOWN),
        ))
    };

    frame.render_widget(Paragraph::new(vec![line]), inner);
}

fn render_status_line(frame: &mut Frame, area: Rect, app: &App) {
    if area.height == 0 {
        return;
    }
    let line = if let Some(error) = &app.error {
        Line::from(Span::styled(
            error.clone(),
            Style::default().fg(theme::ERROR),
        ))
    } else if app.is_loading {
        Line::from(Span::styled(
            "Refreshing...",
            Style::default().fg(theme::SECONDARY),
        ))
    } else {
        return;
    };
    frame.render_widget(Paragraph::new(vec![line]), area);
}

/// One bold banner line per alert, capped at three
fn build_alert_lines(alerts: &[WeatherAlert]) -> Vec<Line<'static>> {
    alerts
        .iter()
        .take(3)
        .map(|alert| {
            Line::from(vec![
                Span::styled("\u{26A0} ".to_string(), theme::alert_style(alert.severity)),
                Span::styled(alert.event.clone(), theme::alert_style(alert.severity)),
                Span::styled(
                    format!("  {}", alert.sender_name),
                    Style::default().fg(theme::SECONDARY),
                ),
            ])
        })
        .collect()
}

fn render_current(frame: &mut Frame, area: Rect, current: &CurrentConditions, app: &App) {
    let lines = build_current_lines(current, app);
    frame.render_widget(Paragraph::new(lines), area);
}

fn build_current_lines(current: &CurrentConditions, app: &App) -> Vec<Line<'static>> {
    let family = theme::ConditionFamily::from_icon(&current.icon);
    vec![
        Line::from(Span::styled(
            "CURRENT",
            Style::default()
                .fg(theme::HEADER)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(vec![
            Span::styled(format!("{}  ", family.symbol()), condition_span_style(current)),
            Span::styled(
                units::format_temperature(current.temperature, app.temperature_unit),
                Style::default().fg(theme::temperature_color(current.temperature)),
            ),
            Span::styled(
                format!(
                    " (feels {})",
                    units::format_temperature(current.feels_like, app.temperature_unit)
                ),
                Style::default().fg(theme::SECONDARY),
            ),
            Span::styled(
                format!("  {}", current.description),
                condition_span_style(current),
            ),
        ]),
        Line::from(vec![
            Span::raw("Wind: "),
            Span::styled(
                format!(
                    "{} {}",
                    units::format_speed(current.wind_speed, app.speed_unit),
                    units::wind_direction_label(current.wind_direction)
                ),
                Style::default().fg(theme::PRIMARY),
            ),
        ]),
        Line::from(vec![
            Span::raw("Humidity: "),
            Span::styled(
                format!("{}%", current.humidity),
                Style::default().fg(theme::PRIMARY),
            ),
            Span::raw("  Pressure: "),
            Span::styled(
                format!("{:.0} hPa", current.pressure),
                Style::default().fg(theme::PRIMARY),
            ),
        ]),
        Line::from(vec![
            Span::raw("UV: "),
            Span::styled(
                format!(
                    "{:.0} ({})",
                    current.uv_index,
                    units::uv_index_level(current.uv_index)
                ),
                Style::default().fg(theme::uv_color(current.uv_index)),
            ),
            Span::raw("  Visibility: "),
            Span::styled(
                format!(
                    "{} ({})",
                    units::format_visibility(current.visibility),
                    units::visibility_description(current.visibility)
                ),
                Style::default().fg(theme::PRIMARY),
            ),
        ]),
        Line::from(vec![
            Span::styled("Sunrise: ", Style::default().fg(theme::SECONDARY)),
            Span::styled(
                local_clock(current.sunrise, current.timezone_offset),
                Style::default().fg(theme::PRIMARY),
            ),
            Span::raw("  "),
            Span::styled("Sunset: ", Style::default().fg(theme::SECONDARY)),
            Span::styled(
                local_clock(current.sunset, current.timezone_offset),
                Style::default().fg(theme::PRIMARY),
            ),
        ]),
    ]
}

fn condition_span_style(current: &CurrentConditions) -> Style {
    theme::condition_style(&current.icon)
}

fn render_hourly(frame: &mut Frame, area: Rect, hourly: &[HourlyForecastEntry], app: &App) {
    let header = Paragraph::new(vec![Line::from(Span::styled(
        "NEXT 24 HOURS",
        Style::default()
            .fg(theme::HEADER)
            .add_modifier(Modifier::BOLD),
    ))]);
    let header_area = Rect { height: 1.min(area.height), ..area };
    frame.render_widget(header, header_area);

    if hourly.is_empty() || area.height < 2 {
        return;
    }

    let temperatures: Vec<f64> = hourly.iter().map(|h| h.temperature).collect();
    let sparkline_area = Rect {
        y: area.y + 1,
        height: 1,
        ..area
    };
    frame.render_widget(
        TemperatureSparkline::new(&temperatures).marker(0),
        sparkline_area,
    );

    let mut lines = Vec::new();
    let tz = app
        .snapshot
        .as_ref()
        .map(|s| s.current.timezone_offset)
        .unwrap_or(0);
    for entry in hourly.iter().take(HOURLY_ROWS) {
        lines.push(build_hourly_line(entry, tz, app));
    }
    let rows_area = Rect {
        y: area.y + 2,
        height: area.height.saturating_sub(2),
        ..area
    };
    frame.render_widget(Paragraph::new(lines), rows_area);
}

fn build_hourly_line(entry: &HourlyForecastEntry, tz_offset: i64, app: &App) -> Line<'static> {
    let family = theme::ConditionFamily::from_icon(&entry.icon);
    let pop = (entry.precipitation.probability * 100.0).round();
    Line::from(vec![
        Span::styled(
            format!("{:<7}", local_clock(entry.time, tz_offset)),
            Style::default().fg(theme::PRIMARY),
        ),
        Span::styled(
            format!(
                "{:<6}",
                units::format_temperature(entry.temperature, app.temperature_unit)
            ),
            Style::default().fg(theme::temperature_color(entry.temperature)),
        ),
        Span::styled(format!("{:<3}", family.symbol()), condition_icon_style(entry)),
        Span::styled(
            format!("{:<12}", units::format_speed(entry.wind_speed, app.speed_unit)),
            Style::default().fg(theme::SECONDARY),
        ),
        Span::styled(
            format!("{:>4.0}% rain", pop),
            Style::default().fg(theme::SECONDARY),
        ),
    ])
}

fn condition_icon_style(entry: &HourlyForecastEntry) -> Style {
    theme::condition_style(&entry.icon)
}

fn render_daily(frame: &mut Frame, area: Rect, daily: &[DailyForecastEntry], app: &App) {
    let mut lines = vec![Line::from(Span::styled(
        "7-DAY FORECAST",
        Style::default()
            .fg(theme::HEADER)
            .add_modifier(Modifier::BOLD),
    ))];

    let tz = app
        .snapshot
        .as_ref()
        .map(|s| s.current.timezone_offset)
        .unwrap_or(0);
    for entry in daily {
        lines.push(build_daily_line(entry, tz, app));
    }
    if daily.is_empty() {
        lines.push(Line::from(Span::styled(
            "No forecast available",
            Style::default().fg(theme::UNKNOWN),
        )));
    }

    frame.render_widget(Paragraph::new(lines), area);
}

fn build_daily_line(entry: &DailyForecastEntry, tz_offset: i64, app: &App) -> Line<'static> {
    let family = theme::ConditionFamily::from_icon(&entry.icon);
    let pop = (entry.precipitation.probability * 100.0).round();
    Line::from(vec![
        Span::styled(
            format!("{:<8}", local_day(entry.date, tz_offset)),
            Style::default().fg(theme::PRIMARY),
        ),
        Span::styled(format!("{:<3}", family.symbol()), theme::condition_style(&entry.icon)),
        Span::styled(
            format!(
                "{:>6}",
                units::format_temperature(entry.temperature.max, app.temperature_unit)
            ),
            Style::default().fg(theme::temperature_color(entry.temperature.max)),
        ),
        Span::styled(
            format!(
                " / {:<6}",
                units::format_temperature(entry.temperature.min, app.temperature_unit)
            ),
            Style::default().fg(theme::SECONDARY),
        ),
        Span::styled(
            format!("{:>4.0}% ", pop),
            Style::default().fg(theme::SECONDARY),
        ),
        Span::styled(
            entry.description.clone(),
            Style::default().fg(theme::SECONDARY),
        ),
    ])
}

fn render_key_hints(frame: &mut Frame, area: Rect) {
    let line = Line::from(Span::styled(
        "[/] search  [u] temp unit  [w] wind unit  [r] refresh  [?] help  [q] quit",
        Style::default().fg(theme::SECONDARY),
    ));
    frame.render_widget(Paragraph::new(vec![line]), area);
}

/// Formats a unix timestamp as HH:MM in the location's timezone.
fn local_clock(unix_seconds: i64, tz_offset: i64) -> String {
    DateTime::from_timestamp(unix_seconds + tz_offset, 0)
        .map(|dt| dt.format("%H:%M").to_string())
        .unwrap_or_else(|| "--:--".to_string())
}

/// Formats a unix timestamp as an abbreviated weekday in the location's
/// timezone.
fn local_day(unix_seconds: i64, tz_offset: i64) -> String {
    DateTime::from_timestamp(unix_seconds + tz_offset, 0)
        .map(|dt| dt.format("%a %d").to_string())
        .unwrap_or_else(|| "---".to_string())
}
