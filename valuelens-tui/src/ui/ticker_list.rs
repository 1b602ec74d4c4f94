//! Ticker sidebar with the cursor row highlighted.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::Modifier;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::app::AppState;
use crate::theme;

pub fn render(f: &mut Frame, area: Rect, app: &AppState) {
    let height = area.height as usize;
    let offset = scroll_offset(app.cursor, height);

    let lines: Vec<Line> = app
        .tickers
        .iter()
        .enumerate()
        .skip(offset)
        .take(height)
        .map(|(i, ticker)| {
            let style = if i == app.cursor {
                theme::accent().add_modifier(Modifier::REVERSED)
            } else {
                theme::neutral()
            };
            Line::from(Span::styled(format!(" {ticker} "), style))
        })
        .collect();

    f.render_widget(Paragraph::new(lines), area);
}

/// First visible row so that `cursor` stays on screen.
fn scroll_offset(cursor: usize, height: usize) -> usize {
    if height == 0 {
        return 0;
    }
    cursor.saturating_sub(height - 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cursor_stays_visible() {
        assert_eq!(scroll_offset(0, 10), 0);
        assert_eq!(scroll_offset(9, 10), 0);
        assert_eq!(scroll_offset(10, 10), 1);
        assert_eq!(scroll_offset(3, 0), 0);
    }
}
