use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::symbols;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Axis, Block, Borders, Chart, Dataset, GraphType, Paragraph};
use ratatui::Frame;

use crate::engine::timefmt::{format_bucket_date, format_duration};
use crate::tui::app::DashboardData;

pub fn render_dashboard(f: &mut Frame, area: Rect, data: &DashboardData) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(5),
            Constraint::Min(5),
        ])
        .split(area);

    render_stat_tiles(f, chunks[0], data);
    render_priority_chart(f, chunks[1], "Tasks Created", &data.created, data);
    render_priority_chart(f, chunks[2], "Tasks Completed", &data.completed, data);
}

fn render_stat_tiles(f: &mut Frame, area: Rect, data: &DashboardData) {
    let stats = &data.stats;
    let tiles = [
        ("Todo", stats.todo.to_string()),
        ("In Progress", stats.in_progress.to_string()),
        ("Done", stats.done.to_string()),
        ("Done Today", stats.completed_today.to_string()),
        ("Total Time", format_duration(stats.total_seconds)),
        ("Avg Time", format_duration(stats.average_seconds)),
    ];

    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Ratio(1, 6); 6])
        .split(area);

    for ((label, value), chunk) in tiles.iter().zip(chunks.iter()) {
        let line = Line::from(vec![
            Span::styled(
                value.clone(),
                Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
            ),
            Span::styled(format!(" {}", label), Style::default().fg(Color::Gray)),
        ]);
        let tile = Paragraph::new(line)
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL));
        f.render_widget(tile, *chunk);
    }
}

fn render_priority_chart(
    f: &mut Frame,
    area: Rect,
    title: &str,
    series: &[Vec<u64>; 3],
    data: &DashboardData,
) {
    // Series order matches dashboard_data: high, medium, low
    let colors = [Color::Red, Color::Yellow, Color::Green];
    let names = ["High", "Medium", "Low"];

    let points: Vec<Vec<(f64, f64)>> = series
        .iter()
        .map(|counts| {
            counts
                .iter()
                .enumerate()
                .map(|(index, &count)| (index as f64, count as f64))
                .collect()
        })
        .collect();

    let datasets: Vec<Dataset> = points
        .iter()
        .zip(colors.iter())
        .zip(names.iter())
        .map(|((points, color), name)| {
            Dataset::default()
                .name(*name)
                .marker(symbols::Marker::Braille)
                .graph_type(GraphType::Line)
                .style(Style::default().fg(*color))
                .data(points)
        })
        .collect();

    let max_count = series
        .iter()
        .flat_map(|counts| counts.iter())
        .copied()
        .max()
        .unwrap_or(0)
        .max(1) as f64;
    let max_x = (data.dates.len().saturating_sub(1)).max(1) as f64;

    let x_labels: Vec<Span> = match (data.dates.first(), data.dates.last()) {
        (Some(first), Some(last)) if data.dates.len() > 1 => vec![
            Span::raw(format_bucket_date(*first)),
            Span::raw(format_bucket_date(*last)),
        ],
        (Some(only), _) => vec![Span::raw(format_bucket_date(*only))],
        _ => Vec::new(),
    };
    let y_labels: Vec<Span> = vec![
        Span::raw("0"),
        Span::raw(format!("{}", max_count as u64)),
    ];

    let chart = Chart::new(datasets)
        .block(Block::default().borders(Borders::ALL).title(title.to_string()))
        .x_axis(
            Axis::default()
                .style(Style::default().fg(Color::Gray))
                .labels(x_labels)
                .bounds([0.0, max_x]),
        )
        .y_axis(
            Axis::default()
                .style(Style::default().fg(Color::Gray))
                .labels(y_labels)
                .bounds([0.0, max_count]),
        );

    f.render_widget(chart, area);
}
