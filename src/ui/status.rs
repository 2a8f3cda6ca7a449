use crate::app::App;
use crate::keybindings::Context;
use ratatui::{layout::Rect, widgets::Paragraph, Frame};
use std::borrow::Cow;

/// Render the status bar
pub fn render(f: &mut Frame, app: &App, area: Rect) {
    // Status bar needs at least 1 char width to be meaningful
    if area.width < 1 || area.height < 1 {
        return;
    }

    let text: Cow<'_, str> = if let Some((msg, _)) = &app.status_message {
        Cow::Borrowed(msg.as_ref())
    } else if let Some(prompt) = &app.prompt {
        Cow::Owned(format!("{}: {}_  [Enter] confirm [Esc] cancel", prompt.kind.label(), prompt.buffer))
    } else {
        // Static keybinding hints
        Cow::Borrowed(match app.context() {
            Context::Home => "[j/k]move [Enter]open [l]ike [s]ave [/]]category [?]help [q]uit",
            Context::Explorer => "[/]search [f]ilters [o]rder [[/]]category [l]ike [Enter]open [?]help",
            Context::Detail => "[l]ike [s]ave [c]omment [o]pen image [Esc]back [?]help",
            Context::Upload => "[i]mage [c]aption [x]remove [Enter]upload [?]help",
            Context::Profile => "[Tab]tab [e]dit [j/k]move [Space]toggle [?]help",
            Context::Leaderboard => "[j/k]move [Enter]open [l]ike [?]help",
            Context::Prompt => "[Tab]next field [Enter]save [Esc]cancel",
            Context::Global => "[1]home [g]oto path [?]help [q]uit",
        })
    };

    let paragraph = Paragraph::new(text).style(app.style("status_bar"));
    f.render_widget(paragraph, area);
}
