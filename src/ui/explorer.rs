//! Explorer page: search line, optional filter panel, result list.

use crate::app::{App, PromptKind};
use crate::pages::ExplorerPage;
use crate::view::EXPLORER_CATEGORIES;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use super::cards::{panel, render_meme_list};
use super::home::category_chips;

pub(super) fn render(f: &mut Frame, app: &App, page: &ExplorerPage, area: Rect) {
    let filter_height = if page.show_filters { 2 } else { 0 };
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(filter_height),
            Constraint::Min(0),
        ])
        .split(area);

    let searching = app
        .prompt
        .as_ref()
        .is_some_and(|p| p.kind == PromptKind::Search);
    let search_line = if searching {
        Line::from(vec![
            Span::styled("Search: ", app.style("prompt")),
            Span::raw(format!("{}_", page.query.search)),
        ])
    } else if page.query.search.is_empty() {
        Line::from(Span::styled("Press / to search memes", app.style("muted")))
    } else {
        Line::from(vec![
            Span::styled("Search: ", app.style("muted")),
            Span::raw(page.query.search.clone()),
        ])
    };
    f.render_widget(Paragraph::new(search_line), chunks[0]);

    if page.show_filters {
        let lines = vec![
            category_chips(app, &EXPLORER_CATEGORIES, &page.query.category),
            Line::from(vec![
                Span::styled("Sort: ", app.style("muted")),
                Span::styled(page.query.sort.label(), app.style("chip_active")),
            ]),
        ];
        f.render_widget(Paragraph::new(lines), chunks[1]);
    }

    let results = page.results(&app.memes.items);
    let title = format!(
        "Explore · {} · {} · {} results",
        page.query.category.label(),
        page.query.sort.label(),
        results.len()
    );
    render_meme_list(
        f,
        app,
        chunks[2],
        panel(app, title),
        &results,
        Some(page.selected),
        Some(&page.interactions),
    );
}
