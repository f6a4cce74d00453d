//! Dashboard rendering
//!
//! Renders the main weather view: current conditions, the hourly trend
//! strip, the weekly outlook, and the auxiliary index cards.

use chrono::{Datelike, Local, NaiveDate};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::app::{App, IndexSummary, WeatherSnapshot};
use crate::hourly::{hour_label, HourlySlot};
use crate::ui::widgets::sparkline::TempSparkline;

/// Width of one slot in the hourly strip
const HOUR_SLOT_WIDTH: usize = 6;

/// Color for temperature (warmer = more red, cooler = more blue)
fn temperature_color(temp: f64) -> Color {
    if temp >= 30.0 {
        Color::Red
    } else if temp >= 25.0 {
        Color::LightRed
    } else if temp >= 20.0 {
        Color::Yellow
    } else if temp >= 15.0 {
        Color::Green
    } else if temp >= 10.0 {
        Color::Cyan
    } else {
        Color::Blue
    }
}

/// Label for a forecast day: "Today" or the weekday name
fn day_label(date: NaiveDate, today: NaiveDate) -> &'static str {
    if date == today {
        return "Today";
    }
    match date.weekday() {
        chrono::Weekday::Mon => "Monday",
        chrono::Weekday::Tue => "Tuesday",
        chrono::Weekday::Wed => "Wednesday",
        chrono::Weekday::Thu => "Thursday",
        chrono::Weekday::Fri => "Friday",
        chrono::Weekday::Sat => "Saturday",
        chrono::Weekday::Sun => "Sunday",
    }
}

/// Formats a precipitation probability (0.0-1.0) as a percentage
fn format_pop(pop: f64) -> String {
    format!("{:.0}%", (pop * 100.0).clamp(0.0, 100.0))
}

/// Renders the full dashboard view
pub fn render(frame: &mut Frame, app: &App) {
    let area = frame.area();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(6), // current conditions
            Constraint::Length(5), // hourly trend
            Constraint::Min(6),    // weekly outlook
            Constraint::Length(6), // index cards
            Constraint::Length(1), // footer
        ])
        .split(area);

    match &app.snapshot {
        Some(snapshot) => {
            render_current(frame, snapshot, chunks[0]);
            render_hourly(frame, &snapshot.hourly, chunks[1]);
            render_weekly(frame, snapshot, chunks[2]);
            render_indices(frame, snapshot.indices.as_ref(), chunks[3]);
        }
        None => {
            let placeholder = Paragraph::new("No weather data - press / to search for a city")
                .style(Style::default().fg(Color::DarkGray))
                .alignment(Alignment::Center);
            frame.render_widget(placeholder, chunks[0]);
        }
    }

    render_footer(frame, app, chunks[4]);
}

/// Renders the current-conditions card
fn render_current(frame: &mut Frame, snapshot: &WeatherSnapshot, area: Rect) {
    let mut lines = vec![Line::from(Span::styled(
        snapshot.city.clone(),
        Style::default()
            .fg(Color::White)
            .add_modifier(Modifier::BOLD),
    ))];

    match &snapshot.current {
        Some(current) => {
            lines.push(Line::from(vec![
                Span::styled(
                    format!("{}°", current.avg_temp),
                    Style::default()
                        .fg(temperature_color(f64::from(current.avg_temp)))
                        .add_modifier(Modifier::BOLD),
                ),
                Span::raw(" "),
                Span::raw(current.condition.glyph()),
                Span::raw(" "),
                Span::styled(
                    current.description.clone(),
                    Style::default().fg(Color::Gray),
                ),
            ]));
            lines.push(Line::from(vec![
                Span::styled("Max: ", Style::default().fg(Color::DarkGray)),
                Span::raw(format!("{}°", current.max_temp)),
                Span::styled("  Min: ", Style::default().fg(Color::DarkGray)),
                Span::raw(format!("{}°", current.min_temp)),
            ]));
        }
        None => {
            lines.push(Line::from(Span::styled(
                "--",
                Style::default().fg(Color::DarkGray),
            )));
        }
    }

    let block = Block::default()
        .title(" Current Conditions ")
        .borders(Borders::ALL);
    let paragraph = Paragraph::new(lines)
        .block(block)
        .alignment(Alignment::Center);

    frame.render_widget(paragraph, area);
}

/// Renders the hourly trend strip with its temperature sparkline
fn render_hourly(frame: &mut Frame, hourly: &[HourlySlot], area: Rect) {
    let block = Block::default().title(" Hourly Trend ").borders(Borders::ALL);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    if hourly.is_empty() {
        let placeholder = Paragraph::new("--").style(Style::default().fg(Color::DarkGray));
        frame.render_widget(placeholder, inner);
        return;
    }

    if inner.height < 3 || inner.width == 0 {
        return;
    }

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // hour labels
            Constraint::Length(1), // temperatures
            Constraint::Length(1), // sparkline
        ])
        .split(inner);

    let visible = (inner.width as usize / HOUR_SLOT_WIDTH).min(hourly.len());

    let labels: Line = hourly
        .iter()
        .take(visible)
        .map(|slot| {
            Span::styled(
                format!("{:<width$}", hour_label(slot.hour), width = HOUR_SLOT_WIDTH),
                Style::default().fg(Color::DarkGray),
            )
        })
        .collect();

    let temps: Line = hourly
        .iter()
        .take(visible)
        .map(|slot| {
            Span::styled(
                format!("{:<width$}", format!("{}°", slot.temperature), width = HOUR_SLOT_WIDTH),
                Style::default().fg(temperature_color(f64::from(slot.temperature))),
            )
        })
        .collect();

    frame.render_widget(Paragraph::new(labels), rows[0]);
    frame.render_widget(Paragraph::new(temps), rows[1]);

    let curve: Vec<i32> = hourly.iter().map(|slot| slot.temperature).collect();
    frame.render_widget(TempSparkline::new(&curve), rows[2]);
}

/// Renders the weekly outlook table
fn render_weekly(frame: &mut Frame, snapshot: &WeatherSnapshot, area: Rect) {
    let today = Local::now().date_naive();

    let lines: Vec<Line> = if snapshot.weekly.is_empty() {
        vec![Line::from(Span::styled(
            "--",
            Style::default().fg(Color::DarkGray),
        ))]
    } else {
        snapshot
            .weekly
            .iter()
            .map(|day| {
                Line::from(vec![
                    Span::styled(
                        format!("{:<10}", day_label(day.date, today)),
                        Style::default().fg(Color::White),
                    ),
                    Span::raw(format!("{}  ", day.condition.glyph())),
                    Span::styled("min ", Style::default().fg(Color::DarkGray)),
                    Span::styled(
                        format!("{:>4}", format!("{:.0}°", day.min_temp)),
                        Style::default().fg(temperature_color(day.min_temp)),
                    ),
                    Span::styled("  max ", Style::default().fg(Color::DarkGray)),
                    Span::styled(
                        format!("{:>4}", format!("{:.0}°", day.max_temp)),
                        Style::default().fg(temperature_color(day.max_temp)),
                    ),
                ])
            })
            .collect()
    };

    let block = Block::default().title(" Next Days ").borders(Borders::ALL);
    let paragraph = Paragraph::new(lines).block(block);

    frame.render_widget(paragraph, area);
}

/// Renders the 2x3 grid of auxiliary index cards
fn render_indices(frame: &mut Frame, indices: Option<&IndexSummary>, area: Rect) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Length(3)])
        .split(area);

    let top = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Ratio(1, 3),
            Constraint::Ratio(1, 3),
            Constraint::Ratio(1, 3),
        ])
        .split(rows[0]);
    let bottom = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Ratio(1, 3),
            Constraint::Ratio(1, 3),
            Constraint::Ratio(1, 3),
        ])
        .split(rows[1]);

    let (uv_value, uv_desc) = match indices.and_then(|i| i.uv.as_ref()) {
        Some(report) => (
            format!("{:.0}", report.value),
            report.classification.label().to_string(),
        ),
        None => ("--".to_string(), String::new()),
    };

    match indices {
        Some(idx) => {
            render_index_card(frame, top[0], "UV INDEX", &uv_value, &uv_desc);
            render_index_card(
                frame,
                top[1],
                "SUNSET",
                &idx.sunset,
                &format!("Sunrise: {}", idx.sunrise),
            );
            render_index_card(
                frame,
                top[2],
                "WIND",
                &format!("{:.0} km/h", idx.wind_kmh),
                idx.wind_dir,
            );
            render_index_card(
                frame,
                bottom[0],
                "PRECIPITATION",
                &format_pop(idx.precipitation),
                "Chance of rain",
            );
            render_index_card(
                frame,
                bottom[1],
                "FEELS LIKE",
                &format!("{:.0}°", idx.feels_like),
                "",
            );
            render_index_card(
                frame,
                bottom[2],
                "HUMIDITY",
                &format!("{}%", idx.humidity),
                "",
            );
        }
        None => {
            for cell in top.iter().chain(bottom.iter()) {
                render_index_card(frame, *cell, "", "--", "");
            }
        }
    }
}

/// Renders a single index card: title, value, optional description
fn render_index_card(frame: &mut Frame, area: Rect, title: &str, value: &str, description: &str) {
    let line = Line::from(vec![
        Span::styled(
            value.to_string(),
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw(" "),
        Span::styled(description.to_string(), Style::default().fg(Color::Gray)),
    ]);

    let block = Block::default()
        .title(format!(" {} ", title))
        .title_style(Style::default().fg(Color::DarkGray))
        .borders(Borders::ALL);
    let paragraph = Paragraph::new(line)
        .block(block)
        .alignment(Alignment::Center);

    frame.render_widget(paragraph, area);
}

/// Renders the status/keybinding footer
fn render_footer(frame: &mut Frame, app: &App, area: Rect) {
    let mut spans = vec![Span::styled(
        "q quit · r refresh · / search · ? help",
        Style::default().fg(Color::DarkGray),
    )];

    if let Some(status) = &app.status {
        spans.push(Span::raw("  "));
        spans.push(Span::styled(
            status.clone(),
            Style::default().fg(Color::Yellow),
        ));
    }

    if let Some(refreshed) = app.last_refresh {
        spans.push(Span::styled(
            format!("  updated {}", refreshed.format("%H:%M")),
            Style::default().fg(Color::DarkGray),
        ));
    }

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::{AppState, CurrentSummary, DayOutlook};
    use crate::cli::StartupConfig;
    use crate::data::Condition;
    use crate::location::LocationStore;
    use ratatui::{backend::TestBackend, Terminal};
    use tempfile::TempDir;

    fn test_app() -> (App, TempDir) {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let store = LocationStore::with_dir(temp_dir.path().to_path_buf());
        let config = StartupConfig {
            initial_query: None,
            api_key: "test-key".to_string(),
        };
        (App::with_store(config, store), temp_dir)
    }

    fn snapshot() -> WeatherSnapshot {
        WeatherSnapshot {
            city: "Lisbon".to_string(),
            current: Some(CurrentSummary {
                avg_temp: 18,
                max_temp: 22,
                min_temp: 14,
                description: "few clouds".to_string(),
                condition: Condition::Clouds,
            }),
            hourly: vec![
                HourlySlot { hour: 9, temperature: 16, icon: "02d".to_string() },
                HourlySlot { hour: 10, temperature: 17, icon: "02d".to_string() },
                HourlySlot { hour: 11, temperature: 19, icon: "02d".to_string() },
            ],
            weekly: vec![DayOutlook {
                date: NaiveDate::from_ymd_opt(2024, 7, 15).unwrap(),
                min_temp: 14.0,
                max_temp: 22.0,
                condition: Condition::Clear,
            }],
            indices: Some(IndexSummary {
                uv: None,
                sunrise: "06:12".to_string(),
                sunset: "20:45".to_string(),
                wind_kmh: 14.4,
                wind_dir: "West",
                precipitation: 0.3,
                feels_like: 17.2,
                humidity: 64,
            }),
            fetched_at: Local::now(),
        }
    }

    fn render_to_string(app: &App) -> String {
        let backend = TestBackend::new(90, 30);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal.draw(|frame| render(frame, app)).unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    #[test]
    fn test_render_dashboard_with_snapshot() {
        let (mut app, _tmp) = test_app();
        app.state = AppState::Dashboard;
        app.snapshot = Some(snapshot());

        let content = render_to_string(&app);

        assert!(content.contains("Lisbon"));
        assert!(content.contains("few clouds"));
        assert!(content.contains("18°"));
        assert!(content.contains("SUNSET"));
        assert!(content.contains("HUMIDITY"));
        assert!(content.contains("64%"));
        assert!(content.contains("14 km/h"));
        assert!(content.contains("30%"));
    }

    #[test]
    fn test_render_dashboard_without_snapshot() {
        let (mut app, _tmp) = test_app();
        app.state = AppState::Dashboard;

        let content = render_to_string(&app);
        assert!(content.contains("No weather data"));
    }

    #[test]
    fn test_render_footer_shows_status() {
        let (mut app, _tmp) = test_app();
        app.state = AppState::Dashboard;
        app.snapshot = Some(snapshot());
        app.status = Some("Forecast fetch failed: timeout".to_string());

        let content = render_to_string(&app);
        assert!(content.contains("Forecast fetch failed"));
    }

    #[test]
    fn test_day_label_today() {
        let date = NaiveDate::from_ymd_opt(2024, 7, 15).unwrap();
        assert_eq!(day_label(date, date), "Today");
    }

    #[test]
    fn test_day_label_weekday_names() {
        let today = NaiveDate::from_ymd_opt(2024, 7, 15).unwrap(); // a Monday
        let tuesday = NaiveDate::from_ymd_opt(2024, 7, 16).unwrap();
        let sunday = NaiveDate::from_ymd_opt(2024, 7, 21).unwrap();

        assert_eq!(day_label(tuesday, today), "Tuesday");
        assert_eq!(day_label(sunday, today), "Sunday");
    }

    #[test]
    fn test_format_pop_percentage() {
        assert_eq!(format_pop(0.0), "0%");
        assert_eq!(format_pop(0.25), "25%");
        assert_eq!(format_pop(1.0), "100%");
    }

    #[test]
    fn test_format_pop_clamps_out_of_range() {
        assert_eq!(format_pop(1.5), "100%");
        assert_eq!(format_pop(-0.2), "0%");
    }

    #[test]
    fn test_temperature_color_gradient() {
        assert_eq!(temperature_color(35.0), Color::Red);
        assert_eq!(temperature_color(27.0), Color::LightRed);
        assert_eq!(temperature_color(22.0), Color::Yellow);
        assert_eq!(temperature_color(17.0), Color::Green);
        assert_eq!(temperature_color(12.0), Color::Cyan);
        assert_eq!(temperature_color(5.0), Color::Blue);
    }
}
