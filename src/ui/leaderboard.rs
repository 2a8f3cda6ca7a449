//! Leaderboard table: rank, title, author, likes, comments.

use crate::app::App;
use crate::pages::LeaderboardPage;
use crate::util::strip_control_chars;
use ratatui::{
    layout::{Constraint, Rect},
    text::Line,
    widgets::{Row, Table, TableState},
    Frame,
};

use super::cards::{panel, render_placeholder};

pub(super) fn render(f: &mut Frame, app: &App, page: &LeaderboardPage, area: Rect) {
    let entries = page.entries(&app.memes.items);
    let block = panel(app, "Top memes");
    if entries.is_empty() {
        render_placeholder(f, app, area, block, "No memes ranked yet");
        return;
    }

    let rows: Vec<Row> = entries
        .iter()
        .map(|entry| {
            let meme = entry.meme;
            let liked = page.interactions.is_liked(&meme.id);
            let rank_style = if entry.is_podium() {
                app.style("podium")
            } else {
                app.style("rank")
            };
            let heart = if liked { "♥" } else { "♡" };
            Row::new(vec![
                Line::styled(format!("#{}", entry.rank), rank_style),
                Line::from(strip_control_chars(&meme.title).into_owned()),
                Line::styled(meme.author.clone(), app.style("card_meta")),
                Line::styled(
                    format!("{} {}", heart, page.interactions.likes_for(meme)),
                    if liked {
                        app.style("like_active")
                    } else {
                        app.style("card_meta")
                    },
                ),
                Line::styled(
                    format!("💬 {}", meme.comment_count()),
                    app.style("card_meta"),
                ),
            ])
        })
        .collect();

    let widths = [
        Constraint::Length(5),
        Constraint::Min(16),
        Constraint::Length(14),
        Constraint::Length(9),
        Constraint::Length(7),
    ];
    let table = Table::new(rows, widths)
        .block(block)
        .row_highlight_style(app.style("card_selected"));
    let mut state = TableState::default().with_selected(Some(page.selected));
    f.render_stateful_widget(table, area, &mut state);
}
