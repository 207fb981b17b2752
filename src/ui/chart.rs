use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::symbols::Marker;
use ratatui::text::Span;
use ratatui::widgets::{Axis, Block, BorderType, Borders, Chart, Dataset, GraphType};

use crate::system::history::TimeSeriesBuffer;
use crate::system::snapshot::ScalarMetric;
use crate::ui::theme::Theme;

pub fn render(
    frame: &mut Frame,
    area: Rect,
    metric: ScalarMetric,
    series: &TimeSeriesBuffer,
    theme: &Theme,
) {
    let title = match series.latest() {
        Some(v) => format!(" {} Usage {:.1}% ", metric.label(), v),
        None => format!(" {} Usage (waiting for samples) ", metric.label()),
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(theme.border))
        .title(Span::styled(
            title,
            Style::default()
                .fg(theme.text_primary)
                .add_modifier(Modifier::BOLD),
        ));

    let points = series.chart_points();
    let dataset = Dataset::default()
        .name(format!("{} Usage", metric.label()))
        .marker(Marker::Braille)
        .graph_type(GraphType::Line)
        .style(Style::default().fg(theme.series_color(metric)))
        .data(&points);

    let x_max = series.capacity().saturating_sub(1).max(1) as f64;
    let axis_style = Style::default().fg(theme.text_secondary);
    let chart = Chart::new(vec![dataset])
        .block(block)
        .x_axis(Axis::default().style(axis_style).bounds([0.0, x_max]))
        .y_axis(
            Axis::default()
                .style(axis_style)
                .bounds([0.0, 100.0])
                .labels(["0", "50", "100"]),
        );

    frame.render_widget(chart, area);
}
