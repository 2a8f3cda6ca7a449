//! Single meme view with comments.

use crate::app::{App, PromptKind};
use crate::pages::DetailPage;
use crate::util::{format_time_ago, strip_control_chars};
use chrono::Utc;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Paragraph, Wrap},
    Frame,
};

use super::cards::{panel, render_placeholder};

pub(super) fn render(f: &mut Frame, app: &App, page: &DetailPage, area: Rect) {
    let Some(meme) = app.find_meme(&page.meme_id) else {
        let msg = format!("Meme '{}' not found", page.meme_id);
        render_placeholder(f, app, area, panel(app, "Meme"), &msg);
        return;
    };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(7), Constraint::Min(0)])
        .split(area);

    let liked = page.interactions.is_liked(&meme.id);
    let saved = page.interactions.is_saved(&meme.id);
    let like_style = if liked {
        app.style("like_active")
    } else {
        app.style("card_meta")
    };

    let header = vec![
        Line::from(vec![
            Span::styled("by ", app.style("muted")),
            Span::raw(meme.author.clone()),
            Span::styled(
                format!("  {}  {}", meme.category, format_time_ago(meme.created_at, Utc::now())),
                app.style("muted"),
            ),
        ]),
        Line::from(Span::styled(meme.url.clone(), app.style("card_meta"))),
        Line::from(""),
        Line::from(vec![
            Span::styled(
                format!("{} {}", if liked { "♥" } else { "♡" }, page.interactions.likes_for(meme)),
                like_style,
            ),
            Span::raw("   "),
            Span::styled(
                if saved { "🔖 saved" } else { "save" },
                if saved {
                    app.style("save_active")
                } else {
                    app.style("card_meta")
                },
            ),
            Span::styled(format!("   💬 {}", meme.comment_count()), app.style("card_meta")),
        ]),
    ];
    f.render_widget(
        Paragraph::new(header).block(panel(app, strip_control_chars(&meme.title))),
        chunks[0],
    );

    let mut lines: Vec<Line> = Vec::with_capacity(meme.comments.len() + 2);
    if let Some(prompt) = &app.prompt {
        if matches!(prompt.kind, PromptKind::Comment { .. }) {
            lines.push(Line::from(vec![
                Span::styled("> ", app.style("prompt")),
                Span::raw(format!("{}_", prompt.buffer)),
            ]));
            lines.push(Line::from(""));
        }
    }
    if meme.comments.is_empty() {
        lines.push(Line::from(Span::styled(
            "No comments yet. Press c to add one.",
            app.style("muted"),
        )));
    }
    for comment in &meme.comments {
        lines.push(Line::from(vec![
            Span::styled(comment.author.clone(), app.style("comment_author")),
            Span::styled(
                format!(" {}", format_time_ago(comment.created_at, Utc::now())),
                app.style("muted"),
            ),
        ]));
        lines.push(Line::from(format!("  {}", strip_control_chars(&comment.text))));
    }

    f.render_widget(
        Paragraph::new(lines)
            .wrap(Wrap { trim: false })
            .block(panel(app, "Comments")),
        chunks[1],
    );
}
