use crate::keybindings::{Context, KeybindingRegistry};
use crate::meme::{FetchError, MemeRecord, MemeSource};
use crate::pages::PageState;
use crate::route::Route;
use crate::store::{FetchTicket, MemeSnapshot, MemeStore};
use crate::theme::{StyleMap, ThemeStore, ThemeVariant};
use crate::upload::{SelectedImage, UploadError};
use ratatui::style::Style;
use std::borrow::Cow;
use std::sync::Arc;
use tokio::task::JoinHandle;
use tokio::time::Instant;

/// How long a status message stays visible.
const STATUS_TTL_SECS: u64 = 3;

/// Navigation history depth kept for `Back`.
const MAX_HISTORY: usize = 32;

/// Number of frames in the loading spinner animation.
pub const SPINNER_FRAMES: [&str; 10] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

// ============================================================================
// Events and Prompts
// ============================================================================

/// Events from background tasks.
pub enum AppEvent {
    /// A meme request finished. The store decides whether it still counts.
    MemesFetched {
        ticket: FetchTicket,
        result: Result<Vec<MemeRecord>, FetchError>,
    },
    /// An image picked on the upload page was read (or failed to).
    ImageLoaded(Result<SelectedImage, UploadError>),
    /// A background task panicked.
    TaskPanicked { task: &'static str, error: String },
}

/// What a one-line text prompt is collecting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PromptKind {
    /// Live search on the explorer page.
    Search,
    /// New comment for the meme with this id.
    Comment { meme_id: String },
    /// Caption on the upload page.
    Caption,
    /// Path of an image file to upload.
    ImagePath,
    /// Route path to jump to.
    GoToPath,
}

impl PromptKind {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Search => "Search",
            Self::Comment { .. } => "Comment",
            Self::Caption => "Caption",
            Self::ImagePath => "Image file",
            Self::GoToPath => "Go to",
        }
    }
}

#[derive(Debug, Clone)]
pub struct Prompt {
    pub kind: PromptKind,
    pub buffer: String,
}

// ============================================================================
// Application State
// ============================================================================

/// Central application state, owned by the UI loop.
pub struct App {
    pub store: MemeStore,
    pub source: Arc<dyn MemeSource>,
    /// Last snapshot read from the store; what the pages render.
    pub memes: MemeSnapshot,

    pub theme_store: ThemeStore,
    pub theme: StyleMap,
    pub keybindings: KeybindingRegistry,

    pub route: Route,
    pub history: Vec<Route>,
    pub page: PageState,
    pub prompt: Option<Prompt>,

    pub status_message: Option<(Cow<'static, str>, Instant)>,
    pub needs_redraw: bool,
    pub show_help: bool,
    pub help_scroll_offset: usize,
    pub spinner_frame: usize,

    /// Handles for in-flight background tasks, aborted on drop.
    pub tasks: Vec<JoinHandle<()>>,
}

impl App {
    pub fn new(store: MemeStore, source: Arc<dyn MemeSource>, theme: ThemeVariant) -> Self {
        let memes = store.snapshot();
        Self {
            store,
            source,
            memes,
            theme_store: ThemeStore::new(theme),
            theme: StyleMap::from_palette(&theme.palette()),
            keybindings: KeybindingRegistry::new(),
            route: Route::Home,
            history: Vec::new(),
            page: PageState::for_route(&Route::Home),
            prompt: None,
            status_message: None,
            needs_redraw: true,
            show_help: false,
            help_scroll_offset: 0,
            spinner_frame: 0,
            tasks: Vec::new(),
        }
    }

    /// Resolve a semantic role name to its `Style`.
    pub fn style(&self, role: &str) -> Style {
        self.theme.resolve(role)
    }

    /// Flip dark mode. Returns the new theme name for status display.
    pub fn toggle_theme(&mut self) -> &'static str {
        let variant = self.theme_store.toggle();
        self.theme = StyleMap::from_palette(&variant.palette());
        self.needs_redraw = true;
        variant.name()
    }

    // ------------------------------------------------------------------------
    // Routing
    // ------------------------------------------------------------------------

    /// Go to `route` with fresh page state. Revisiting the current route
    /// also resets it.
    pub fn navigate(&mut self, route: Route) {
        if route != self.route {
            let previous = std::mem::replace(&mut self.route, route);
            self.history.push(previous);
            if self.history.len() > MAX_HISTORY {
                self.history.remove(0);
            }
        }
        tracing::debug!(route = %self.route, "Navigated");
        self.page = PageState::for_route(&self.route);
        self.prompt = None;
        self.needs_redraw = true;
    }

    /// Return to the previous route. False when there is none.
    pub fn back(&mut self) -> bool {
        let Some(previous) = self.history.pop() else {
            return false;
        };
        self.route = previous;
        self.page = PageState::for_route(&self.route);
        self.prompt = None;
        self.needs_redraw = true;
        true
    }

    /// Which keybinding context is active.
    pub fn context(&self) -> Context {
        if self.prompt.is_some() {
            return Context::Prompt;
        }
        match &self.page {
            PageState::Home(_) => Context::Home,
            PageState::Explorer(_) => Context::Explorer,
            PageState::Detail(_) => Context::Detail,
            PageState::Upload(_) => Context::Upload,
            PageState::Profile(p) if p.is_editing() => Context::Prompt,
            PageState::Profile(_) => Context::Profile,
            PageState::Leaderboard(_) => Context::Leaderboard,
            PageState::NotFound => Context::Global,
        }
    }

    // ------------------------------------------------------------------------
    // Store
    // ------------------------------------------------------------------------

    /// Re-read the store and keep the page cursor in range.
    pub fn sync_memes(&mut self) {
        self.memes = self.store.snapshot();
        let len = self.page.listed_ids(&self.memes.items).len();
        self.page.clamp_selection(len);
        self.needs_redraw = true;
    }

    /// Id of the meme under the cursor (or shown on the detail page).
    pub fn selected_meme_id(&self) -> Option<String> {
        let ids = self.page.listed_ids(&self.memes.items);
        let index = match self.page {
            PageState::Detail(_) => 0,
            _ => self.page.selected(),
        };
        ids.into_iter().nth(index)
    }

    pub fn find_meme(&self, id: &str) -> Option<&MemeRecord> {
        self.memes.find(id)
    }

    /// Move the cursor on list pages.
    pub fn nav(&mut self, delta: isize) {
        let len = self.page.listed_ids(&self.memes.items).len();
        self.page.move_selection(delta, len);
    }

    /// Toggle the like mark on the current meme. Returns the new state, or
    /// `None` when nothing is selected.
    pub fn toggle_like(&mut self) -> Option<bool> {
        let id = self.selected_meme_id()?;
        Some(self.page.interactions_mut()?.toggle_like(&id))
    }

    pub fn toggle_save(&mut self) -> Option<bool> {
        let id = self.selected_meme_id()?;
        Some(self.page.interactions_mut()?.toggle_save(&id))
    }

    // ------------------------------------------------------------------------
    // Status and animation
    // ------------------------------------------------------------------------

    /// Set status message (expires after three seconds).
    pub fn set_status(&mut self, msg: impl Into<Cow<'static, str>>) {
        self.status_message = Some((msg.into(), Instant::now()));
    }

    /// Clear the status message if expired. Returns true if one was cleared.
    pub fn clear_expired_status(&mut self) -> bool {
        match &self.status_message {
            Some((_, at)) if at.elapsed().as_secs() >= STATUS_TTL_SECS => {
                self.status_message = None;
                true
            }
            _ => false,
        }
    }

    pub fn spinner(&self) -> &'static str {
        SPINNER_FRAMES[self.spinner_frame % SPINNER_FRAMES.len()]
    }

    /// Track a spawned task; finished handles are dropped.
    pub fn track_task(&mut self, handle: JoinHandle<()>) {
        self.tasks.retain(|h| !h.is_finished());
        self.tasks.push(handle);
    }
}

impl Drop for App {
    fn drop(&mut self) {
        let pending = self.tasks.iter().filter(|h| !h.is_finished()).count();
        for handle in self.tasks.drain(..) {
            handle.abort();
        }
        if pending > 0 {
            tracing::debug!(pending, "Aborted background tasks on App drop");
        }
    }
}
