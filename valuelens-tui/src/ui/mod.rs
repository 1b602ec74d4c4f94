//! Top-level UI layout: ticker list, chart with stats strip, status bar.

pub mod chart_panel;
pub mod stats_panel;
pub mod status_bar;
pub mod ticker_list;

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::Style;
use ratatui::widgets::{Block, Borders};

use crate::app::AppState;
use crate::theme;

/// Width of the ticker sidebar, borders included.
const SIDEBAR_WIDTH: u16 = 14;
/// Height of the stats strip, borders included.
const STATS_HEIGHT: u16 = 4;

/// Draw the entire UI.
pub fn draw(f: &mut Frame, app: &AppState) {
    f.render_widget(
        Block::default().style(Style::default().bg(theme::BACKGROUND)),
        f.area(),
    );

    // Split: main area + 1-line status bar.
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(3), Constraint::Length(1)])
        .split(f.area());

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(SIDEBAR_WIDTH), Constraint::Min(10)])
        .split(chunks[0]);

    let right = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(5), Constraint::Length(STATS_HEIGHT)])
        .split(columns[1]);

    let list_inner = panel(f, columns[0], " Tickers ".to_string(), false);
    ticker_list::render(f, list_inner, app);

    let chart_inner = panel(f, right[0], chart_title(app), true);
    chart_panel::render(f, chart_inner, app);

    let stats_inner = panel(f, right[1], " Summary ".to_string(), false);
    stats_panel::render(f, stats_inner, app);

    status_bar::render(f, chunks[1], app);
}

/// Draw a bordered block and return its inner area.
fn panel(f: &mut Frame, area: Rect, title: String, active: bool) -> Rect {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme::panel_border(active))
        .title(title)
        .title_style(theme::panel_title(active));
    let inner = block.inner(area);
    f.render_widget(block, area);
    inner
}

fn chart_title(app: &AppState) -> String {
    match (&app.view, app.selected_ticker()) {
        (Some(view), _) => format!(" {} ", view.title()),
        (None, Some(ticker)) => format!(
            " {} of {} since {} ",
            app.metric.label(),
            ticker,
            app.start_year
        ),
        (None, None) => " Chart ".to_string(),
    }
}
