//! Input handling for the TUI.
//!
//! Keys resolve to an action through the keybinding registry using the
//! context of the current page. Open text prompts and the profile edit form
//! take raw characters instead.

use crate::app::{App, AppEvent, Prompt, PromptKind};
use crate::keybindings::{Action as KbAction, Context as KbContext};
use crate::meme::Comment;
use crate::pages::PageState;
use crate::profile::ProfileTab;
use crate::route::Route;
use crate::store::MemeAction;
use crate::util::{strip_control_chars, validate_url_for_open, MAX_INPUT_LENGTH};
use anyhow::Result;
use crossterm::event::{KeyCode, KeyModifiers};
use std::path::PathBuf;
use tokio::sync::mpsc;

use super::helpers::{spawn_fetch, spawn_image_load};
use super::Action;

/// Author recorded on comments written from this client.
const LOCAL_AUTHOR: &str = "You";

/// Main input dispatch function.
pub(super) async fn handle_input(
    app: &mut App,
    code: KeyCode,
    modifiers: KeyModifiers,
    event_tx: &mpsc::Sender<AppEvent>,
) -> Result<Action> {
    // Help overlay captures all keys while visible
    if app.show_help {
        return Ok(handle_help_input(app, code));
    }

    if app.prompt.is_some() {
        handle_prompt_input(app, code, modifiers, event_tx);
        return Ok(Action::Continue);
    }

    if let PageState::Profile(page) = &app.page {
        if page.is_editing() {
            handle_profile_edit_input(app, code, modifiers);
            return Ok(Action::Continue);
        }
    }

    let context = app.context();
    let Some(action) = app.keybindings.action_for_key(code, modifiers, context) else {
        return Ok(Action::Continue);
    };
    handle_action(app, action, event_tx)
}

/// Handle input while the help overlay is visible.
///
/// Captures all keys: j/k/Up/Down scroll, Esc/q/? dismiss.
fn handle_help_input(app: &mut App, code: KeyCode) -> Action {
    match code {
        KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('?') => {
            app.show_help = false;
            app.help_scroll_offset = 0;
        }
        KeyCode::Char('j') | KeyCode::Down => {
            app.help_scroll_offset = app.help_scroll_offset.saturating_add(1);
        }
        KeyCode::Char('k') | KeyCode::Up => {
            app.help_scroll_offset = app.help_scroll_offset.saturating_sub(1);
        }
        _ => {}
    }
    Action::Continue
}

// ============================================================================
// Page Actions
// ============================================================================

fn handle_action(
    app: &mut App,
    action: KbAction,
    event_tx: &mpsc::Sender<AppEvent>,
) -> Result<Action> {
    match action {
        KbAction::Quit => return Ok(Action::Quit),
        KbAction::NavDown => nav(app, 1),
        KbAction::NavUp => nav(app, -1),
        KbAction::Back => {
            if !app.back() {
                tracing::debug!("No previous route");
            }
        }
        KbAction::Select => {
            if let Some(id) = app.selected_meme_id() {
                if !matches!(app.page, PageState::Detail(_)) {
                    app.navigate(Route::MemeDetail(id));
                }
            }
        }
        KbAction::GoHome => app.navigate(Route::Home),
        KbAction::GoExplore => app.navigate(Route::Explore),
        KbAction::GoUpload => app.navigate(Route::Upload),
        KbAction::GoLeaderboard => app.navigate(Route::Leaderboard),
        KbAction::GoProfile => app.navigate(Route::Profile),
        KbAction::GoToPath => {
            let path = app.route.path();
            open_prompt(app, PromptKind::GoToPath, path);
        }
        KbAction::Refresh => {
            spawn_fetch(app, event_tx);
            app.set_status(format!("Loading memes from {}...", app.source.name()));
        }
        KbAction::ToggleTheme => {
            let name = app.toggle_theme();
            app.set_status(format!("Theme: {}", name));
        }
        KbAction::ShowHelp => {
            app.show_help = true;
            app.help_scroll_offset = 0;
        }
        KbAction::ToggleLike => {
            if app.toggle_like().is_none() {
                app.set_status("No meme selected");
            }
        }
        KbAction::ToggleSave => {
            if let Some(saved) = app.toggle_save() {
                app.set_status(if saved { "Saved" } else { "Removed from saved" });
            }
        }
        KbAction::EnterSearch => {
            if let PageState::Explorer(page) = &app.page {
                let current = page.query.search.clone();
                open_prompt(app, PromptKind::Search, current);
            }
        }
        KbAction::ToggleFilters => {
            if let PageState::Explorer(page) = &mut app.page {
                page.show_filters = !page.show_filters;
            }
        }
        KbAction::NextCategory => cycle_category(app, 1),
        KbAction::PrevCategory => cycle_category(app, -1),
        KbAction::CycleSort => {
            if let PageState::Explorer(page) = &mut app.page {
                let sort = page.cycle_sort();
                app.set_status(format!("Sorted by {}", sort.label()));
            }
        }
        KbAction::OpenInBrowser => open_selected_in_browser(app),
        KbAction::AddComment => {
            if let Some(meme_id) = app.selected_meme_id() {
                if app.find_meme(&meme_id).is_some() {
                    open_prompt(app, PromptKind::Comment { meme_id }, String::new());
                }
            }
        }
        KbAction::PickImage => {
            if matches!(app.page, PageState::Upload(_)) {
                open_prompt(app, PromptKind::ImagePath, String::new());
            }
        }
        KbAction::EditCaption => {
            if let PageState::Upload(page) = &app.page {
                let caption = page.draft.caption().to_string();
                open_prompt(app, PromptKind::Caption, caption);
            }
        }
        KbAction::ClearImage => {
            if let PageState::Upload(page) = &mut app.page {
                page.draft.clear_image();
            }
        }
        KbAction::SubmitUpload => submit_upload(app),
        KbAction::NextTab => {
            if let PageState::Profile(page) = &mut app.page {
                page.tab = page.tab.next();
            }
        }
        KbAction::EditProfile => {
            if let PageState::Profile(page) = &mut app.page {
                page.begin_edit();
            }
        }
        KbAction::ToggleSetting => {
            if let PageState::Profile(page) = &mut app.page {
                if page.tab == ProfileTab::Settings {
                    page.settings.toggle(page.selected_setting);
                }
            }
        }
        // Only meaningful inside a prompt
        KbAction::CancelInput | KbAction::CommitInput | KbAction::NextField => {}
    }
    Ok(Action::Continue)
}

fn nav(app: &mut App, delta: isize) {
    if let PageState::Profile(page) = &mut app.page {
        if page.tab == ProfileTab::Settings {
            page.select_setting(delta);
        }
        return;
    }
    app.nav(delta);
}

fn cycle_category(app: &mut App, delta: isize) {
    match &mut app.page {
        PageState::Home(page) => page.cycle_category(delta),
        PageState::Explorer(page) => page.cycle_category(delta),
        _ => {}
    }
}

fn open_selected_in_browser(app: &mut App) {
    let Some(url) = app
        .selected_meme_id()
        .and_then(|id| app.find_meme(&id).map(|m| m.url.clone()))
    else {
        return;
    };

    // Validate before open::that() so only http(s) reaches the launcher
    if let Err(e) = validate_url_for_open(&url) {
        app.set_status(e.to_string());
    } else if let Err(e) = open::that(&url) {
        app.set_status(format!("Failed to open browser: {}", e));
    }
}

fn submit_upload(app: &mut App) {
    let PageState::Upload(page) = &mut app.page else {
        return;
    };
    if page.loading {
        app.set_status("Still reading image...");
        return;
    }
    match page.draft.submit() {
        Ok(receipt) => {
            let status = format!("Uploaded {}", receipt.file_name);
            page.last_receipt = Some(receipt);
            app.set_status(status);
        }
        Err(e) => app.set_status(e.to_string()),
    }
}

// ============================================================================
// Text Prompts
// ============================================================================

fn open_prompt(app: &mut App, kind: PromptKind, buffer: String) {
    app.prompt = Some(Prompt { kind, buffer });
}

/// Apply a typed character or backspace to `buffer`. Returns true if the
/// buffer changed.
fn edit_buffer(buffer: &mut String, code: KeyCode, modifiers: KeyModifiers) -> bool {
    match code {
        KeyCode::Backspace => buffer.pop().is_some(),
        KeyCode::Char(c)
            if !modifiers.contains(KeyModifiers::CONTROL)
                && !c.is_control()
                && buffer.chars().count() < MAX_INPUT_LENGTH =>
        {
            buffer.push(c);
            true
        }
        _ => false,
    }
}

fn handle_prompt_input(
    app: &mut App,
    code: KeyCode,
    modifiers: KeyModifiers,
    event_tx: &mpsc::Sender<AppEvent>,
) {
    match app
        .keybindings
        .action_for_key(code, modifiers, KbContext::Prompt)
    {
        Some(KbAction::CancelInput) => {
            if let Some(Prompt {
                kind: PromptKind::Search,
                ..
            }) = app.prompt.take()
            {
                set_search(app, String::new());
            }
        }
        Some(KbAction::CommitInput) => {
            if let Some(prompt) = app.prompt.take() {
                commit_prompt(app, prompt, event_tx);
            }
        }
        Some(_) => {}
        None => {
            let Some(prompt) = app.prompt.as_mut() else {
                return;
            };
            if edit_buffer(&mut prompt.buffer, code, modifiers) && prompt.kind == PromptKind::Search
            {
                // Live search: the explorer filters as the user types
                let query = prompt.buffer.clone();
                set_search(app, query);
            }
        }
    }
}

fn set_search(app: &mut App, query: String) {
    if let PageState::Explorer(page) = &mut app.page {
        page.query.search = query;
        page.selected = 0;
    }
}

fn commit_prompt(app: &mut App, prompt: Prompt, event_tx: &mpsc::Sender<AppEvent>) {
    let text = strip_control_chars(prompt.buffer.trim()).into_owned();

    match prompt.kind {
        // Search text is kept as typed, whitespace included
        PromptKind::Search => set_search(app, strip_control_chars(&prompt.buffer).into_owned()),
        PromptKind::Comment { meme_id } => {
            if text.is_empty() {
                app.set_status("Comment is empty");
                return;
            }
            let added = app.store.dispatch(MemeAction::AddComment {
                meme_id,
                comment: Comment::new(LOCAL_AUTHOR, text),
            });
            app.sync_memes();
            app.set_status(if added {
                "Comment added"
            } else {
                "Meme no longer available"
            });
        }
        PromptKind::Caption => {
            if let PageState::Upload(page) = &mut app.page {
                page.draft.set_caption(text);
            }
        }
        PromptKind::ImagePath => {
            if text.is_empty() {
                return;
            }
            if let PageState::Upload(page) = &mut app.page {
                page.loading = true;
                spawn_image_load(app, PathBuf::from(text), event_tx);
            }
        }
        PromptKind::GoToPath => app.navigate(Route::parse(&text)),
    }
}

fn handle_profile_edit_input(app: &mut App, code: KeyCode, modifiers: KeyModifiers) {
    let action = app
        .keybindings
        .action_for_key(code, modifiers, KbContext::Prompt);
    let PageState::Profile(page) = &mut app.page else {
        return;
    };

    match action {
        Some(KbAction::CancelInput) => page.cancel_edit(),
        Some(KbAction::CommitInput) => {
            if page.save_edit() {
                app.set_status("Profile updated");
            }
        }
        Some(KbAction::NextField) => {
            if let Some(draft) = page.draft.as_mut() {
                draft.switch_field();
            }
        }
        Some(_) => {}
        None => {
            if let Some(draft) = page.draft.as_mut() {
                edit_buffer(draft.active_mut(), code, modifiers);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::meme::FixtureSource;
    use crate::store::{Commit, MemeStore};
    use crate::theme::ThemeVariant;
    use chrono::Utc;
    use std::sync::Arc;

    async fn loaded_app() -> App {
        let mut app = App::new(
            MemeStore::default(),
            Arc::new(FixtureSource::default()),
            ThemeVariant::Dark,
        );
        let source = FixtureSource::with_anchor(24, Utc::now());
        assert_eq!(app.store.fetch(&source).await, Commit::Applied);
        app.sync_memes();
        app
    }

    async fn press(app: &mut App, tx: &mpsc::Sender<AppEvent>, code: KeyCode) -> Action {
        handle_input(app, code, KeyModifiers::NONE, tx).await.unwrap()
    }

    async fn type_str(app: &mut App, tx: &mpsc::Sender<AppEvent>, s: &str) {
        for c in s.chars() {
            press(app, tx, KeyCode::Char(c)).await;
        }
    }

    #[tokio::test]
    async fn test_quit() {
        let mut app = loaded_app().await;
        let (tx, _rx) = mpsc::channel(8);
        assert!(matches!(press(&mut app, &tx, KeyCode::Char('q')).await, Action::Quit));
    }

    #[tokio::test]
    async fn test_number_keys_navigate() {
        let mut app = loaded_app().await;
        let (tx, _rx) = mpsc::channel(8);
        press(&mut app, &tx, KeyCode::Char('4')).await;
        assert_eq!(app.route, Route::Leaderboard);
        press(&mut app, &tx, KeyCode::Esc).await;
        assert_eq!(app.route, Route::Home);
    }

    #[tokio::test]
    async fn test_enter_opens_detail() {
        let mut app = loaded_app().await;
        let (tx, _rx) = mpsc::channel(8);
        press(&mut app, &tx, KeyCode::Char('j')).await;
        let id = app.selected_meme_id().unwrap();
        press(&mut app, &tx, KeyCode::Enter).await;
        assert_eq!(app.route, Route::MemeDetail(id));
    }

    #[tokio::test]
    async fn test_live_search_and_cancel() {
        let mut app = loaded_app().await;
        let (tx, _rx) = mpsc::channel(8);
        press(&mut app, &tx, KeyCode::Char('2')).await;
        press(&mut app, &tx, KeyCode::Char('/')).await;
        assert_eq!(app.context(), KbContext::Prompt);

        // 'q' is text inside a prompt, not quit
        type_str(&mut app, &tx, "meme 1q").await;
        let PageState::Explorer(page) = &app.page else {
            panic!("expected explorer");
        };
        assert_eq!(page.query.search, "meme 1q");

        press(&mut app, &tx, KeyCode::Esc).await;
        assert!(app.prompt.is_none());
        let PageState::Explorer(page) = &app.page else {
            panic!("expected explorer");
        };
        assert!(page.query.search.is_empty());
    }

    #[tokio::test]
    async fn test_search_commit_keeps_query() {
        let mut app = loaded_app().await;
        let (tx, _rx) = mpsc::channel(8);
        press(&mut app, &tx, KeyCode::Char('2')).await;
        press(&mut app, &tx, KeyCode::Char('/')).await;
        type_str(&mut app, &tx, "memer3").await;
        press(&mut app, &tx, KeyCode::Backspace).await;
        press(&mut app, &tx, KeyCode::Enter).await;
        let PageState::Explorer(page) = &app.page else {
            panic!("expected explorer");
        };
        assert_eq!(page.query.search, "memer");
        assert!(app.prompt.is_none());
    }

    #[tokio::test]
    async fn test_search_commit_keeps_trailing_space() {
        let mut app = loaded_app().await;
        let (tx, _rx) = mpsc::channel(8);
        press(&mut app, &tx, KeyCode::Char('2')).await;
        press(&mut app, &tx, KeyCode::Char('/')).await;
        type_str(&mut app, &tx, "memer ").await;
        press(&mut app, &tx, KeyCode::Enter).await;
        let PageState::Explorer(page) = &app.page else {
            panic!("expected explorer");
        };
        assert_eq!(page.query.search, "memer ");
        // Authors are "MemerN", so nothing follows "Memer" with a space
        assert!(page.query.apply(&app.memes.items).is_empty());
    }

    #[tokio::test]
    async fn test_add_comment_through_prompt() {
        let mut app = loaded_app().await;
        let (tx, _rx) = mpsc::channel(8);
        app.navigate(Route::MemeDetail("2".into()));
        let before = app.find_meme("2").unwrap().comment_count();

        press(&mut app, &tx, KeyCode::Char('c')).await;
        type_str(&mut app, &tx, "lol").await;
        press(&mut app, &tx, KeyCode::Enter).await;

        let meme = app.find_meme("2").unwrap();
        assert_eq!(meme.comment_count(), before + 1);
        assert_eq!(meme.comments.last().unwrap().text, "lol");
        assert_eq!(meme.comments.last().unwrap().author, LOCAL_AUTHOR);
    }

    #[tokio::test]
    async fn test_empty_comment_is_ignored() {
        let mut app = loaded_app().await;
        let (tx, _rx) = mpsc::channel(8);
        app.navigate(Route::MemeDetail("2".into()));
        let before = app.find_meme("2").unwrap().comment_count();
        press(&mut app, &tx, KeyCode::Char('c')).await;
        type_str(&mut app, &tx, "   ").await;
        press(&mut app, &tx, KeyCode::Enter).await;
        assert_eq!(app.find_meme("2").unwrap().comment_count(), before);
    }

    #[tokio::test]
    async fn test_goto_unknown_path() {
        let mut app = loaded_app().await;
        let (tx, _rx) = mpsc::channel(8);
        press(&mut app, &tx, KeyCode::Char('g')).await;
        // Prompt starts with the current path
        press(&mut app, &tx, KeyCode::Backspace).await;
        type_str(&mut app, &tx, "/nowhere").await;
        press(&mut app, &tx, KeyCode::Enter).await;
        assert_eq!(app.route, Route::NotFound("/nowhere".into()));
    }

    #[tokio::test]
    async fn test_submit_without_image_reports_error() {
        let mut app = loaded_app().await;
        let (tx, _rx) = mpsc::channel(8);
        press(&mut app, &tx, KeyCode::Char('3')).await;
        press(&mut app, &tx, KeyCode::Char('c')).await;
        type_str(&mut app, &tx, "caption").await;
        press(&mut app, &tx, KeyCode::Enter).await;
        press(&mut app, &tx, KeyCode::Enter).await;

        let PageState::Upload(page) = &app.page else {
            panic!("expected upload");
        };
        assert_eq!(page.draft.caption(), "caption");
        assert!(page.last_receipt.is_none());
        assert!(app.status_message.is_some());
    }

    #[tokio::test]
    async fn test_profile_edit_flow() {
        let mut app = loaded_app().await;
        let (tx, _rx) = mpsc::channel(8);
        press(&mut app, &tx, KeyCode::Char('5')).await;
        press(&mut app, &tx, KeyCode::Char('e')).await;
        for _ in 0.."MemeKing42".len() {
            press(&mut app, &tx, KeyCode::Backspace).await;
        }
        type_str(&mut app, &tx, "q5").await;
        press(&mut app, &tx, KeyCode::Enter).await;

        let PageState::Profile(page) = &app.page else {
            panic!("expected profile");
        };
        assert_eq!(page.profile.username, "q5");
        assert!(!page.is_editing());
    }

    #[tokio::test]
    async fn test_profile_settings_toggle() {
        let mut app = loaded_app().await;
        let (tx, _rx) = mpsc::channel(8);
        press(&mut app, &tx, KeyCode::Char('5')).await;
        press(&mut app, &tx, KeyCode::Tab).await;
        press(&mut app, &tx, KeyCode::Tab).await;
        press(&mut app, &tx, KeyCode::Char('j')).await;
        press(&mut app, &tx, KeyCode::Char('j')).await;
        press(&mut app, &tx, KeyCode::Char(' ')).await;

        let PageState::Profile(page) = &app.page else {
            panic!("expected profile");
        };
        assert_eq!(page.tab, ProfileTab::Settings);
        assert!(page.settings.newsletter);
    }

    #[tokio::test]
    async fn test_help_overlay_captures_keys() {
        let mut app = loaded_app().await;
        let (tx, _rx) = mpsc::channel(8);
        press(&mut app, &tx, KeyCode::Char('?')).await;
        assert!(app.show_help);
        assert!(matches!(press(&mut app, &tx, KeyCode::Char('q')).await, Action::Continue));
        assert!(!app.show_help);
    }
}
