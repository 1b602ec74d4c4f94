//! Summary strip: last, mean, max, min and the latest EMA values.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::app::AppState;
use crate::theme;

pub fn render(f: &mut Frame, area: Rect, app: &AppState) {
    let Some(view) = &app.view else {
        f.render_widget(
            Paragraph::new(Line::from(Span::styled("-", theme::muted()))),
            area,
        );
        return;
    };

    let stats = &view.stats;
    // Last value against the slow EMA.
    let last_style = match view.last_slow() {
        Some(slow) => Style::default().fg(theme::trend_color(stats.last, slow)),
        None => theme::text(),
    };

    let mut top = vec![
        field("Last", format!("{:.2}", stats.last), last_style),
        field("Mean", format!("{:.2}", stats.mean), theme::text()),
        field("Max", format!("{:.2}", stats.max), theme::text()),
        field("Min", format!("{:.2}", stats.min), theme::text()),
    ]
    .concat();
    top.push(Span::styled(format!("{} pts", view.len()), theme::muted()));

    let mut bottom = Vec::new();
    if let Some(v) = view.last_fast() {
        bottom.extend(field(
            &view.ema_fast.label(),
            format!("{v:.2}"),
            Style::default().fg(theme::FAST_SERIES),
        ));
    }
    if let Some(v) = view.last_slow() {
        bottom.extend(field(
            &view.ema_slow.label(),
            format!("{v:.2}"),
            Style::default().fg(theme::SLOW_SERIES),
        ));
    }

    f.render_widget(Paragraph::new(vec![Line::from(top), Line::from(bottom)]), area);
}

fn field(label: &str, value: String, style: Style) -> Vec<Span<'static>> {
    vec![
        Span::styled(format!("{label} "), theme::muted()),
        Span::styled(format!("{value:<10}"), style),
    ]
}
