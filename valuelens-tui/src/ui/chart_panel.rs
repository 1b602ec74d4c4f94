//! Chart: metric series with fast and slow EMA overlays.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::symbols;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Axis, Chart, Dataset, GraphType, Paragraph};

use valuelens_core::ChartView;

use crate::app::AppState;
use crate::theme;

pub fn render(f: &mut Frame, area: Rect, app: &AppState) {
    match &app.view {
        Some(view) if !view.is_empty() => render_chart(f, area, view),
        _ => render_empty(f, area, app),
    }
}

fn render_empty(f: &mut Frame, area: Rect, app: &AppState) {
    let message = match (&app.dataset, app.selected_ticker()) {
        (None, _) => format!("No snapshot loaded: {}", app.repo.path().display()),
        (Some(_), None) => "Snapshot has no tickers.".to_string(),
        (Some(_), Some(ticker)) => format!(
            "No {} data for {} since {}.",
            app.metric.label(),
            ticker,
            app.start_year
        ),
    };
    let lines = vec![
        Line::from(""),
        Line::from(""),
        Line::from(Span::styled(message, theme::muted())),
        Line::from(""),
        Line::from(Span::styled(
            "Pick another ticker (j/k), metric (1-3) or an earlier start year (h).",
            theme::muted(),
        )),
    ];
    f.render_widget(Paragraph::new(lines), area);
}

/// `(x, y)` points with x in days since the first date.
fn points(view: &ChartView, values: &[f64]) -> Vec<(f64, f64)> {
    let Some(origin) = view.raw.first_date() else {
        return Vec::new();
    };
    view.raw
        .points
        .iter()
        .zip(values)
        .map(|(p, &v)| ((p.date - origin).num_days() as f64, v))
        .collect()
}

/// Y bounds over every series, padded 5%; flat series get a unit band.
fn y_bounds(view: &ChartView) -> [f64; 2] {
    let all = view
        .raw
        .present_values()
        .into_iter()
        .chain(view.ema_fast.values.iter().copied())
        .chain(view.ema_slow.values.iter().copied());
    let (lo, hi) = all.fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
        (lo.min(v), hi.max(v))
    });
    let padding = (hi - lo).abs() * 0.05;
    if padding == 0.0 {
        [lo - 1.0, hi + 1.0]
    } else {
        [lo - padding, hi + padding]
    }
}

fn render_chart(f: &mut Frame, area: Rect, view: &ChartView) {
    let raw = points(view, &view.raw.present_values());
    let fast = points(view, &view.ema_fast.values);
    let slow = points(view, &view.ema_slow.values);

    let [y_min, y_max] = y_bounds(view);
    let x_max = raw.last().map(|&(x, _)| x).unwrap_or(0.0);

    let datasets = vec![
        Dataset::default()
            .name(view.metric.column())
            .marker(symbols::Marker::Braille)
            .style(Style::default().fg(theme::RAW_SERIES))
            .graph_type(GraphType::Line)
            .data(&raw),
        Dataset::default()
            .name(view.ema_fast.label())
            .marker(symbols::Marker::Braille)
            .style(Style::default().fg(theme::FAST_SERIES))
            .graph_type(GraphType::Line)
            .data(&fast),
        Dataset::default()
            .name(view.ema_slow.label())
            .marker(symbols::Marker::Braille)
            .style(Style::default().fg(theme::SLOW_SERIES))
            .graph_type(GraphType::Line)
            .data(&slow),
    ];

    let first = view
        .raw
        .first_date()
        .map(|d| d.to_string())
        .unwrap_or_default();
    let last = view
        .raw
        .last_date()
        .map(|d| d.to_string())
        .unwrap_or_default();

    let chart = Chart::new(datasets)
        .x_axis(
            Axis::default()
                .style(theme::muted())
                .bounds([0.0, x_max.max(1.0)])
                .labels(vec![
                    Span::styled(first, theme::muted()),
                    Span::styled(last, theme::muted()),
                ]),
        )
        .y_axis(
            Axis::default()
                .title(Span::styled(view.metric.label(), theme::muted()))
                .style(theme::muted())
                .bounds([y_min, y_max])
                .labels(vec![
                    Span::styled(format!("{y_min:.1}"), theme::muted()),
                    Span::styled(format!("{y_max:.1}"), theme::muted()),
                ]),
        );

    f.render_widget(chart, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::tests::test_app;

    #[test]
    fn x_axis_is_days_since_first_point() {
        let dir = tempfile::tempdir().unwrap();
        let app = test_app(dir.path());
        let view = app.view.as_ref().unwrap();

        let pts = points(view, &view.raw.present_values());
        assert_eq!(pts.len(), 3);
        assert_eq!(pts[0], (0.0, 8.0));
        // 2021-03-01 -> 2021-06-01
        assert_eq!(pts[1], (92.0, 9.0));
    }

    #[test]
    fn bounds_cover_all_series() {
        let dir = tempfile::tempdir().unwrap();
        let app = test_app(dir.path());
        let view = app.view.as_ref().unwrap();

        let [lo, hi] = y_bounds(view);
        assert!(lo < 8.0);
        assert!(hi > 10.5);
    }
}
