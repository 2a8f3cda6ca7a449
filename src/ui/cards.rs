//! Meme list rows and the loading/error placeholder shared by the pages.

use crate::app::App;
use crate::meme::MemeRecord;
use crate::store::RequestStatus;
use crate::util::{display_width, format_time_ago, strip_control_chars, truncate_to_width};
use crate::view::Interactions;
use chrono::Utc;
use ratatui::{
    layout::{Alignment, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
    Frame,
};

/// Bordered block with a heading title.
pub(super) fn panel(app: &App, title: impl Into<String>) -> Block<'static> {
    Block::default()
        .borders(Borders::ALL)
        .border_style(app.style("panel_border"))
        .title(Span::styled(format!(" {} ", title.into()), app.style("heading")))
}

/// One list row: like mark, title, author, likes, comments and age.
pub(super) fn meme_item<'a>(
    app: &App,
    meme: &'a MemeRecord,
    interactions: Option<&Interactions>,
    width: u16,
) -> ListItem<'a> {
    let liked = interactions.is_some_and(|i| i.is_liked(&meme.id));
    let saved = interactions.is_some_and(|i| i.is_saved(&meme.id));
    let likes = interactions.map_or(meme.likes, |i| i.likes_for(meme));

    let mut spans = Vec::with_capacity(6);
    spans.push(if liked {
        Span::styled("♥ ", app.style("like_active"))
    } else {
        Span::styled("♡ ", app.style("card_meta"))
    });

    let meta = format!(
        "  {}  ♥{}  💬{}  {}",
        meme.author,
        likes,
        meme.comment_count(),
        format_time_ago(meme.created_at, Utc::now())
    );
    let budget = (width as usize).saturating_sub(display_width(&meta).min(width as usize / 2) + 6);
    let title = strip_control_chars(&meme.title);
    spans.push(Span::styled(
        truncate_to_width(&title, budget).into_owned(),
        app.style("card_title"),
    ));
    if saved {
        spans.push(Span::styled(" 🔖", app.style("save_active")));
    }
    spans.push(Span::styled(meta, app.style("card_meta")));

    ListItem::new(Line::from(spans))
}

/// Render a selectable list of memes. Falls back to the lifecycle
/// placeholder while nothing is loaded.
pub(super) fn render_meme_list(
    f: &mut Frame,
    app: &App,
    area: Rect,
    block: Block<'_>,
    memes: &[&MemeRecord],
    selected: Option<usize>,
    interactions: Option<&Interactions>,
) {
    if memes.is_empty() {
        render_placeholder(f, app, area, block, "No memes found");
        return;
    }

    let width = area.width.saturating_sub(2);
    let items: Vec<ListItem> = memes
        .iter()
        .map(|m| meme_item(app, m, interactions, width))
        .collect();

    let list = List::new(items)
        .block(block)
        .highlight_style(app.style("card_selected"));
    let mut state = ListState::default().with_selected(selected);
    f.render_stateful_widget(list, area, &mut state);
}

/// Spinner while loading, the error when the last request failed, otherwise
/// `empty_msg`.
pub(super) fn render_placeholder(
    f: &mut Frame,
    app: &App,
    area: Rect,
    block: Block<'_>,
    empty_msg: &str,
) {
    let line = match app.memes.status {
        RequestStatus::Loading => Line::from(vec![
            Span::styled(app.spinner(), app.style("spinner")),
            Span::raw(" Loading memes..."),
        ]),
        RequestStatus::Failed => Line::from(Span::styled(
            format!(
                "Could not load memes: {}",
                app.memes.error.as_deref().unwrap_or("unknown error")
            ),
            app.style("error"),
        )),
        RequestStatus::Idle | RequestStatus::Succeeded => {
            Line::from(Span::styled(empty_msg.to_string(), app.style("muted")))
        }
    };

    f.render_widget(
        Paragraph::new(line).alignment(Alignment::Center).block(block),
        area,
    );
}
