//! Home page: category chips, recent uploads, trending preview.

use crate::app::App;
use crate::pages::HomePage;
use crate::view::{CategoryFilter, HOME_CATEGORIES};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use super::cards::{panel, render_meme_list};

/// Row of category labels with the active one highlighted.
pub(super) fn category_chips(app: &App, choices: &[&str], active: &CategoryFilter) -> Line<'static> {
    let mut spans = Vec::with_capacity(choices.len() * 2);
    for choice in choices {
        let style = if CategoryFilter::parse(choice) == *active {
            app.style("chip_active")
        } else {
            app.style("chip")
        };
        spans.push(Span::styled(format!(" {} ", choice), style));
        spans.push(Span::raw(" "));
    }
    Line::from(spans)
}

pub(super) fn render(f: &mut Frame, app: &App, page: &HomePage, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Min(0)])
        .split(area);

    f.render_widget(
        Paragraph::new(category_chips(app, &HOME_CATEGORIES, &page.category)),
        chunks[0],
    );

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
        .split(chunks[1]);

    let recent = page.recent(&app.memes.items);
    render_meme_list(
        f,
        app,
        columns[0],
        panel(app, "Recent uploads"),
        &recent,
        Some(page.selected),
        Some(&page.interactions),
    );

    let trending: Vec<_> = page.trending_preview(&app.memes.trending).iter().collect();
    render_meme_list(
        f,
        app,
        columns[1],
        panel(app, "Trending now"),
        &trending,
        None,
        Some(&page.interactions),
    );
}
