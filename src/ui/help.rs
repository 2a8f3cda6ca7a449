//! Help overlay: the keys for the page you are on, then the rest.
//!
//! Shows the live bindings, so config overrides appear here too.

use crate::app::App;
use crate::keybindings::Context;
use crate::pages::PageState;
use ratatui::{
    layout::{Constraint, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Row, Table},
    Frame,
};

/// Page contexts, in navbar order.
const PAGE_CONTEXTS: [Context; 6] = [
    Context::Home,
    Context::Explorer,
    Context::Upload,
    Context::Leaderboard,
    Context::Profile,
    Context::Detail,
];

#[derive(Debug, Clone, PartialEq, Eq)]
enum HelpRow {
    Heading(String),
    Binding { key: String, description: String },
    Blank,
}

/// Context of the page itself, ignoring any open prompt.
fn page_context(page: &PageState) -> Context {
    match page {
        PageState::Home(_) => Context::Home,
        PageState::Explorer(_) => Context::Explorer,
        PageState::Detail(_) => Context::Detail,
        PageState::Upload(_) => Context::Upload,
        PageState::Profile(_) => Context::Profile,
        PageState::Leaderboard(_) => Context::Leaderboard,
        PageState::NotFound => Context::Global,
    }
}

/// Rows for the help table, ordered for the current route.
///
/// The active page (or the text prompt, when one is open) comes first with
/// every binding spelled out, then global keys. Other pages collapse to a
/// single line listing their keys.
fn help_rows(app: &App) -> Vec<HelpRow> {
    let bindings = app.keybindings.all_bindings();
    let here = page_context(&app.page);
    let typing = app.context() == Context::Prompt;

    let mut sections: Vec<(Context, String)> = Vec::new();
    if typing {
        sections.push((Context::Prompt, "Typing".to_string()));
    }
    if here != Context::Global {
        sections.push((here, format!("This page: {}", app.route.title())));
    }
    sections.push((Context::Global, "Everywhere".to_string()));
    if !typing {
        sections.push((Context::Prompt, "Typing".to_string()));
    }

    let mut rows = Vec::new();
    for (ctx, heading) in sections {
        rows.push(HelpRow::Heading(heading));
        for (_, key, _, description) in bindings.iter().filter(|(c, ..)| *c == ctx) {
            rows.push(HelpRow::Binding {
                key: key.clone(),
                description: description.to_string(),
            });
        }
        rows.push(HelpRow::Blank);
    }

    rows.push(HelpRow::Heading("Other pages".to_string()));
    for ctx in PAGE_CONTEXTS.into_iter().filter(|c| *c != here) {
        let keys: Vec<&str> = bindings
            .iter()
            .filter(|(c, ..)| *c == ctx)
            .map(|(_, key, ..)| key.as_str())
            .collect();
        rows.push(HelpRow::Binding {
            key: ctx.label().to_string(),
            description: keys.join(" "),
        });
    }
    rows
}

/// Render the help overlay on top of the current view.
///
/// Scrolls vertically when the table is taller than the overlay.
pub fn render(f: &mut Frame, app: &App) {
    let area = f.area();

    // Leave a margin around the overlay
    let overlay = centered_rect(80, 80, area);
    if overlay.width < 20 || overlay.height < 6 {
        return;
    }

    f.render_widget(Clear, overlay);

    let rows: Vec<Row> = help_rows(app)
        .into_iter()
        .map(|row| match row {
            HelpRow::Heading(text) => Row::new(vec![
                Line::from(Span::styled(
                    format!("-- {} --", text),
                    Style::default().add_modifier(Modifier::BOLD),
                )),
                Line::from(""),
            ])
            .style(app.style("heading")),
            HelpRow::Binding { key, description } => {
                Row::new(vec![format!("  {}", key), description])
            }
            HelpRow::Blank => Row::new(vec![String::new(), String::new()]),
        })
        .collect();

    let total_rows = rows.len();

    // Apply scroll offset
    let visible_height = overlay.height.saturating_sub(3) as usize; // -2 border -1 header
    let max_scroll = total_rows.saturating_sub(visible_height);
    let scroll = app.help_scroll_offset.min(max_scroll);
    let visible_rows: Vec<Row> = rows.into_iter().skip(scroll).take(visible_height).collect();

    // Scroll indicator in title
    let title = if max_scroll > 0 {
        format!(
            " Help ({}/{}) ",
            scroll.saturating_add(1),
            max_scroll.saturating_add(1)
        )
    } else {
        " Help (? to close) ".to_string()
    };

    let widths = [Constraint::Length(16), Constraint::Min(20)];

    let table = Table::new(visible_rows, widths)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(app.style("panel_border_focused"))
                .title(title),
        )
        .header(
            Row::new(vec!["Key", "Action"])
                .style(
                    Style::default()
                        .add_modifier(Modifier::BOLD)
                        .add_modifier(Modifier::UNDERLINED),
                )
                .bottom_margin(1),
        )
        .style(Style::default());

    f.render_widget(table, overlay);

    // Scroll hint at bottom if content overflows
    if max_scroll > 0 && scroll < max_scroll {
        let hint = Line::from(vec![Span::styled(
            " j/k to scroll, ? or Esc to close ",
            app.style("muted"),
        )]);
        let hint_area = Rect {
            x: overlay.x + 1,
            y: overlay.y + overlay.height.saturating_sub(1),
            width: overlay.width.saturating_sub(2),
            height: 1,
        };
        f.render_widget(Paragraph::new(hint), hint_area);
    }
}

/// Create a centered rectangle with the given percentage of the parent area.
pub(super) fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let width = area.width * percent_x / 100;
    let height = area.height * percent_y / 100;
    let x = area.x + (area.width.saturating_sub(width)) / 2;
    let y = area.y + (area.height.saturating_sub(height)) / 2;
    Rect::new(x, y, width, height)
}
