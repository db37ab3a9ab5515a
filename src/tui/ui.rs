use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    symbols,
    text::{Line, Span},
    widgets::{Axis, Block, Borders, Chart, Dataset, Gauge, GraphType, Paragraph, Wrap},
    Frame,
};
use unicode_width::UnicodeWidthStr;

use super::App;
use crate::models::{format_hours, StatusKind};
use crate::roadmap::Roadmap;
use chrono::Local;

const ACCENT: Color = Color::Cyan;
const HEADER_BG: Color = Color::DarkGray;
const DIM: Color = Color::DarkGray;
const GOOD: Color = Color::Green;
const WARN: Color = Color::Yellow;

// ─── Main render ────────────────────────────────────────────────────────────

pub fn render(f: &mut Frame, app: &mut App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(0),
            Constraint::Length(1),
        ])
        .split(f.area());

    render_header(f, app, chunks[0]);
    render_clock(f, chunks[0]);

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Ratio(1, 3), Constraint::Ratio(2, 3)])
        .split(chunks[1]);

    render_summary(f, app, columns[0]);
    render_progress(f, app, columns[1]);

    render_status_bar(f, app, chunks[2]);
}

// ─── Header ─────────────────────────────────────────────────────────────────

fn render_header(f: &mut Frame, app: &App, area: Rect) {
    let date = app.report.snapshot.date;
    let mut spans = vec![
        Span::styled("  Showing ", Style::default().fg(DIM)),
        Span::styled(
            date.format("%a %b %d %Y").to_string(),
            Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
        ),
    ];
    if app.is_previewing() {
        spans.push(Span::styled("  (preview)", Style::default().fg(WARN)));
    }

    let schedule = &app.course.schedule;
    let days = schedule
        .active_weekdays()
        .iter()
        .map(|d| d.to_string())
        .collect::<Vec<_>>()
        .join(" ");
    spans.push(Span::styled(
        format!(
            "   {} h × {}   {} → {}",
            format_hours(schedule.hours_per_day()),
            days,
            schedule.start_date().format("%b %d %Y"),
            schedule.end_date().format("%b %d %Y"),
        ),
        Style::default().fg(DIM),
    ));

    let title = if app.course.language.is_empty() {
        format!(" {} ", app.course.title)
    } else {
        format!(" {} · {} ", app.course.title, app.course.language)
    };

    let header = Paragraph::new(Line::from(spans)).block(
        Block::default()
            .borders(Borders::BOTTOM)
            .title(title)
            .title_style(Style::default().fg(ACCENT).add_modifier(Modifier::BOLD)),
    );
    f.render_widget(header, area);
}

// ─── Clock ──────────────────────────────────────────────────────────────────

fn render_clock(f: &mut Frame, header_area: Rect) {
    let time_str = format!(" {} ", Local::now().format("%a %b %d  %H:%M:%S"));
    let clock_width = time_str.width() as u16;
    let clock_area = Rect {
        x: header_area.right().saturating_sub(clock_width),
        y: header_area.y,
        width: clock_width.min(header_area.width),
        height: 1,
    };
    f.render_widget(
        Paragraph::new(time_str).style(Style::default().fg(ACCENT)),
        clock_area,
    );
}

// ─── Status Bar ─────────────────────────────────────────────────────────────

fn render_status_bar(f: &mut Frame, app: &App, area: Rect) {
    let status = Paragraph::new(Line::from(vec![
        Span::styled(" ", Style::default()),
        Span::styled(
            &app.status_message,
            Style::default().fg(if app.is_previewing() { WARN } else { Color::White }),
        ),
        Span::styled(
            format!(
                "  q:quit  ←/→:day  H/L:week  t:today  r:recompute  config: {}  ",
                app.source
            ),
            Style::default().fg(DIM),
        ),
    ]))
    .style(Style::default().bg(HEADER_BG));

    f.render_widget(status, area);
}

// ─── Summary column ─────────────────────────────────────────────────────────

fn render_summary(f: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Length(7),
            Constraint::Min(3),
        ])
        .split(area);

    let snap = &app.report.snapshot;

    f.render_widget(
        metric(" Days left ", format!("{} days", snap.days_left), Color::White),
        chunks[0],
    );
    f.render_widget(
        metric(" Current level ", snap.current_level.clone(), GOOD),
        chunks[1],
    );

    render_battery(f, app, chunks[2]);

    let view = &app.report.status;
    let message = Paragraph::new(Line::from(Span::styled(
        view.message.as_str(),
        Style::default().fg(view.color.into()),
    )))
    .wrap(Wrap { trim: true })
    .block(
        Block::default()
            .borders(Borders::ALL)
            .title(format!(" {} ", snap.status_kind.label()))
            .title_style(Style::default().fg(ACCENT)),
    );
    f.render_widget(message, chunks[3]);
}

fn metric<'a>(title: &'a str, value: String, color: Color) -> Paragraph<'a> {
    Paragraph::new(Line::from(Span::styled(
        format!(" {value}"),
        Style::default().fg(color).add_modifier(Modifier::BOLD),
    )))
    .block(
        Block::default()
            .borders(Borders::ALL)
            .title(title)
            .title_style(Style::default().fg(ACCENT)),
    )
}

// ─── Battery ────────────────────────────────────────────────────────────────

/// Terminal cells covered by an indicator of `width` units out of `max_width`.
fn battery_fill_cells(width: u16, max_width: u16, cells: u16) -> u16 {
    if max_width == 0 {
        return 0;
    }
    let filled = u32::from(width.min(max_width)) * u32::from(cells) / u32::from(max_width);
    filled as u16
}

fn render_battery(f: &mut Frame, app: &App, area: Rect) {
    let outer = Block::default()
        .borders(Borders::ALL)
        .title(" Battery ")
        .title_style(Style::default().fg(ACCENT));
    let inner = outer.inner(area);
    f.render_widget(outer, area);

    if inner.width < 4 || inner.height < 3 {
        return;
    }

    // Shell, then the cap one column to its right.
    let shell = Rect {
        x: inner.x + 1,
        y: inner.y,
        width: inner.width - 3,
        height: inner.height,
    };
    f.render_widget(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::White)),
        shell,
    );

    let cap_lit = app.status_kind() != StatusKind::InProgress || (app.frame_count / 4) % 2 == 0;
    let cap = Rect {
        x: shell.right(),
        y: shell.y + shell.height / 2,
        width: 1,
        height: 1,
    };
    f.render_widget(
        Paragraph::new("▐").style(Style::default().fg(if cap_lit { Color::White } else { DIM })),
        cap,
    );

    let cell = Block::default().borders(Borders::ALL).inner(shell);
    let view = &app.report.status;
    let fill = Rect {
        width: battery_fill_cells(view.indicator_width, app.course.indicator.max_width, cell.width),
        ..cell
    };
    if fill.width > 0 {
        f.render_widget(
            Block::default().style(Style::default().bg(view.color.into())),
            fill,
        );
    }
}

// ─── Progress column ────────────────────────────────────────────────────────

fn render_progress(f: &mut Frame, app: &App, area: Rect) {
    let snap = &app.report.snapshot;
    let show_gauge = snap.date < app.course.schedule.end_date();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(if show_gauge { 3 } else { 0 }),
            Constraint::Min(0),
        ])
        .split(area);

    if show_gauge {
        let title = format!(
            " {} hours left of {} ",
            format_hours(snap.remaining_hours),
            format_hours(snap.total_hours)
        );
        let gauge = Gauge::default()
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(title)
                    .title_style(Style::default().fg(ACCENT).add_modifier(Modifier::BOLD)),
            )
            .gauge_style(
                Style::default()
                    .fg(app.report.status.color.into())
                    .bg(Color::Black),
            )
            .ratio((snap.progress_percent / 100.0).clamp(0.0, 1.0))
            .label(format!("{}%", snap.progress_percent.floor()));
        f.render_widget(gauge, chunks[0]);
    }

    render_roadmap(f, app, chunks[1]);
}

// ─── Roadmap ────────────────────────────────────────────────────────────────

fn render_roadmap(f: &mut Frame, app: &App, area: Rect) {
    let levels = &app.course.levels;
    let start = app.course.schedule.start_date();
    let end = app.course.schedule.end_date();
    let roadmap = &app.report.roadmap;
    let now = app.report.snapshot.date;

    let reached = Roadmap::points(&roadmap.reached, levels, start);

    // The dashed line picks up where the reached line stops.
    let mut remaining = Roadmap::points(&roadmap.remaining, levels, start);
    if let (Some(last), false) = (reached.last(), remaining.is_empty()) {
        remaining.insert(0, *last);
    }

    let top = levels.thresholds().len().saturating_sub(1) as f64;
    let span = (end - start).num_days().max(1) as f64;
    let today_x = (now - start).num_days() as f64;
    let today = [(today_x, 0.0), (today_x, top)];

    let mut datasets = vec![Dataset::default()
        .name("Reached")
        .marker(symbols::Marker::Braille)
        .graph_type(GraphType::Line)
        .style(Style::default().fg(GOOD))
        .data(&reached)];
    if !remaining.is_empty() {
        datasets.push(
            Dataset::default()
                .name("Remaining")
                .marker(symbols::Marker::Dot)
                .graph_type(GraphType::Line)
                .style(Style::default().fg(DIM))
                .data(&remaining),
        );
    }
    if (0.0..=span).contains(&today_x) {
        datasets.push(
            Dataset::default()
                .name("Today")
                .marker(symbols::Marker::Braille)
                .graph_type(GraphType::Line)
                .style(Style::default().fg(ACCENT))
                .data(&today),
        );
    }

    let mid = start + chrono::Duration::days((end - start).num_days() / 2);
    let x_labels = [start, mid, end]
        .iter()
        .map(|d| Span::styled(d.format("%b %d").to_string(), Style::default().fg(DIM)))
        .collect::<Vec<_>>();
    let y_labels = levels
        .thresholds()
        .iter()
        .map(|t| Span::styled(t.label.clone(), Style::default().fg(Color::White)))
        .collect::<Vec<_>>();

    let target = &levels.last().label;
    let chart = Chart::new(datasets)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(format!(" Road to {target} "))
                .title_style(Style::default().fg(ACCENT))
                .title_alignment(Alignment::Left),
        )
        .x_axis(
            Axis::default()
                .title("Date")
                .style(Style::default().fg(DIM))
                .bounds([0.0, span])
                .labels(x_labels),
        )
        .y_axis(
            Axis::default()
                .title("Level")
                .style(Style::default().fg(DIM))
                .bounds([0.0, top.max(1.0)])
                .labels(y_labels),
        );

    f.render_widget(chart, area);
}
