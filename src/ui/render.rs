//! Render functions for the TUI.
//!
//! Every frame is navbar, page body, footer and status bar. The help
//! overlay and the go-to prompt draw on top.

use crate::app::{App, PromptKind};
use crate::pages::PageState;
use crate::route::NAV_ROUTES;
use crate::store::RequestStatus;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use super::help::centered_rect;
use super::{detail, explorer, help, home, leaderboard, profile, status, upload};

/// Minimum terminal dimensions required for normal operation.
pub(super) const MIN_WIDTH: u16 = 60;
pub(super) const MIN_HEIGHT: u16 = 12;

/// Main render dispatch function.
pub(super) fn render(f: &mut Frame, app: &mut App) {
    let area = f.area();

    // Guard against zero-width/height to prevent panics
    if area.width < 1 || area.height < 1 {
        return;
    }

    if area.width < MIN_WIDTH || area.height < MIN_HEIGHT {
        let msg = if area.height < 3 || area.width < 20 {
            Paragraph::new("Too small")
        } else {
            Paragraph::new(format!(
                "Terminal too small\n\nMinimum: {}x{}\nCurrent: {}x{}",
                MIN_WIDTH, MIN_HEIGHT, area.width, area.height
            ))
            .alignment(Alignment::Center)
        };
        f.render_widget(msg, area);
        return;
    }

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Min(0),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .split(area);

    render_navbar(f, app, chunks[0]);
    render_page(f, app, chunks[1]);
    render_footer(f, app, chunks[2]);
    status::render(f, app, chunks[3]);

    if app
        .prompt
        .as_ref()
        .is_some_and(|p| p.kind == PromptKind::GoToPath)
    {
        render_goto_overlay(f, app);
    }

    if app.show_help {
        help::render(f, app);
    }
}

fn render_page(f: &mut Frame, app: &App, area: Rect) {
    match &app.page {
        PageState::Home(page) => home::render(f, app, page, area),
        PageState::Explorer(page) => explorer::render(f, app, page, area),
        PageState::Detail(page) => detail::render(f, app, page, area),
        PageState::Upload(page) => upload::render(f, app, page, area),
        PageState::Profile(page) => profile::render(f, app, page, area),
        PageState::Leaderboard(page) => leaderboard::render(f, app, page, area),
        PageState::NotFound => render_not_found(f, app, area),
    }
}

/// Brand, route tabs, lifecycle indicator and theme glyph.
fn render_navbar(f: &mut Frame, app: &App, area: Rect) {
    let active = app.route.nav_index();
    let mut spans = vec![Span::styled(" MemeVerse ", app.style("heading"))];

    for (i, route) in NAV_ROUTES.iter().enumerate() {
        let style = if active == Some(i) {
            app.style("nav_active")
        } else {
            app.style("nav_inactive")
        };
        spans.push(Span::raw(" "));
        spans.push(Span::styled(format!("{} {}", i + 1, route.title()), style));
    }

    spans.push(Span::raw("  "));
    match app.memes.status {
        RequestStatus::Loading => {
            spans.push(Span::styled(app.spinner(), app.style("spinner")));
        }
        RequestStatus::Failed => spans.push(Span::styled("offline", app.style("error"))),
        RequestStatus::Idle | RequestStatus::Succeeded => {}
    }
    spans.push(Span::raw(" "));
    spans.push(Span::styled(
        app.theme_store.variant().icon(),
        app.style("muted"),
    ));

    f.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn render_footer(f: &mut Frame, app: &App, area: Rect) {
    let line = Line::from(vec![
        Span::styled("MemeVerse", app.style("card_title")),
        Span::styled(
            format!(
                "  Share and enjoy the best memes on the internet · {} · {} memes",
                app.route.path(),
                app.memes.items.len()
            ),
            app.style("muted"),
        ),
    ]);
    f.render_widget(Paragraph::new(line), area);
}

fn render_not_found(f: &mut Frame, app: &App, area: Rect) {
    let lines = vec![
        Line::from(""),
        Line::from(Span::styled("404", app.style("heading"))),
        Line::from(""),
        Line::from("Oops! This meme has ascended to another dimension."),
        Line::from(""),
        Line::from(Span::styled("Press 1 to go home", app.style("muted"))),
    ];
    f.render_widget(
        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL).border_style(app.style("panel_border"))),
        area,
    );
}

fn render_goto_overlay(f: &mut Frame, app: &App) {
    let Some(prompt) = &app.prompt else {
        return;
    };
    let area = centered_rect(50, 20, f.area());
    let popup = Rect { height: 3, ..area };
    f.render_widget(Clear, popup);
    f.render_widget(
        Paragraph::new(format!("{}_", prompt.buffer)).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(app.style("panel_border_focused"))
                .title(" Go to path "),
        ),
        popup,
    );
}
