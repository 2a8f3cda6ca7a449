//! Profile page: header, stats, tabs, settings and the edit form.

use crate::app::App;
use crate::profile::ProfilePage;
use crate::profile::{DraftField, ProfileSettings, ProfileTab, PROFILE_GRID_SIZE};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{List, ListItem, Paragraph},
    Frame,
};

use super::cards::{panel, render_meme_list};

pub(super) fn render(f: &mut Frame, app: &App, page: &ProfilePage, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(6),
            Constraint::Length(1),
            Constraint::Min(0),
        ])
        .split(area);

    render_header(f, app, page, chunks[0]);

    let mut tabs = Vec::with_capacity(ProfileTab::ALL.len() * 2);
    for tab in ProfileTab::ALL {
        let style = if tab == page.tab {
            app.style("nav_active")
        } else {
            app.style("nav_inactive")
        };
        tabs.push(Span::styled(format!(" {} ", tab.label()), style));
        tabs.push(Span::raw(" "));
    }
    f.render_widget(Paragraph::new(Line::from(tabs)), chunks[1]);

    match page.tab {
        ProfileTab::Uploads | ProfileTab::Liked => {
            let grid: Vec<_> = app.memes.items.iter().take(PROFILE_GRID_SIZE).collect();
            let title = if page.tab == ProfileTab::Uploads {
                "Your uploads"
            } else {
                "Liked memes"
            };
            render_meme_list(f, app, chunks[2], panel(app, title), &grid, None, None);
        }
        ProfileTab::Settings => render_settings(f, app, page, chunks[2]),
    }
}

fn render_header(f: &mut Frame, app: &App, page: &ProfilePage, area: Rect) {
    let profile = &page.profile;

    let lines = match &page.draft {
        Some(draft) => {
            let marker = |field: DraftField| {
                if draft.field == field {
                    app.style("prompt")
                } else {
                    app.style("muted")
                }
            };
            let cursor = |field: DraftField| if draft.field == field { "_" } else { "" };
            vec![
                Line::from(vec![
                    Span::styled("Username: ", marker(DraftField::Username)),
                    Span::raw(format!("{}{}", draft.username, cursor(DraftField::Username))),
                ]),
                Line::from(vec![
                    Span::styled("Bio:      ", marker(DraftField::Bio)),
                    Span::raw(format!("{}{}", draft.bio, cursor(DraftField::Bio))),
                ]),
                Line::from(""),
                Line::from(Span::styled(
                    "Tab switch field · Enter save · Esc cancel",
                    app.style("muted"),
                )),
            ]
        }
        None => vec![
            Line::from(Span::styled(profile.username.clone(), app.style("card_title"))),
            Line::from(profile.bio.clone()),
            Line::from(Span::styled(
                format!("Joined {}", profile.joined),
                app.style("muted"),
            )),
            Line::from(vec![
                Span::styled(format!("{} ", profile.stats.uploads), app.style("heading")),
                Span::styled("uploads   ", app.style("muted")),
                Span::styled(format!("{} ", profile.stats.likes), app.style("heading")),
                Span::styled("likes   ", app.style("muted")),
                Span::styled(format!("{} ", profile.stats.comments), app.style("heading")),
                Span::styled("comments", app.style("muted")),
            ]),
        ],
    };

    let title = if page.is_editing() { "Edit profile" } else { "Profile" };
    f.render_widget(Paragraph::new(lines).block(panel(app, title)), area);
}

fn render_settings(f: &mut Frame, app: &App, page: &ProfilePage, area: Rect) {
    let items: Vec<ListItem> = (0..ProfileSettings::COUNT)
        .map(|i| {
            let on = page.settings.get(i);
            let mark = if on { "[x] " } else { "[ ] " };
            let style = if i == page.selected_setting {
                app.style("card_selected")
            } else {
                ratatui::style::Style::default()
            };
            ListItem::new(Line::from(vec![
                Span::styled(mark, if on { app.style("chip_active") } else { app.style("chip") }),
                Span::raw(ProfileSettings::label(i)),
            ]))
            .style(style)
        })
        .collect();

    f.render_widget(List::new(items).block(panel(app, "Settings")), area);
}
