//! Keybinding registry: maps keys to actions per page, with config overrides.
use crossterm::event::{KeyCode, KeyModifiers};
use std::collections::HashMap;

// ============================================================================
// Action Enum
// ============================================================================

/// All user-facing actions that can be triggered by keybindings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    Quit,
    NavDown,
    NavUp,
    Back,
    Select,
    GoHome,
    GoExplore,
    GoUpload,
    GoLeaderboard,
    GoProfile,
    GoToPath,
    Refresh,
    ToggleTheme,
    ShowHelp,
    ToggleLike,
    ToggleSave,
    EnterSearch,
    ToggleFilters,
    NextCategory,
    PrevCategory,
    CycleSort,
    OpenInBrowser,
    AddComment,
    PickImage,
    EditCaption,
    ClearImage,
    SubmitUpload,
    NextTab,
    EditProfile,
    ToggleSetting,
    CancelInput,
    CommitInput,
    NextField,
}

impl Action {
    /// Human-readable description for the help screen.
    pub fn describe(self) -> &'static str {
        match self {
            Self::Quit => "Quit application",
            Self::NavDown => "Move selection down",
            Self::NavUp => "Move selection up",
            Self::Back => "Go back",
            Self::Select => "Open selected meme",
            Self::GoHome => "Go to home",
            Self::GoExplore => "Go to explorer",
            Self::GoUpload => "Go to upload",
            Self::GoLeaderboard => "Go to leaderboard",
            Self::GoProfile => "Go to profile",
            Self::GoToPath => "Go to path",
            Self::Refresh => "Reload memes",
            Self::ToggleTheme => "Toggle dark mode",
            Self::ShowHelp => "Show help",
            Self::ToggleLike => "Like / unlike",
            Self::ToggleSave => "Save / unsave",
            Self::EnterSearch => "Search title or author",
            Self::ToggleFilters => "Show / hide filters",
            Self::NextCategory => "Next category",
            Self::PrevCategory => "Previous category",
            Self::CycleSort => "Switch latest / popular",
            Self::OpenInBrowser => "Open image in browser",
            Self::AddComment => "Write a comment",
            Self::PickImage => "Choose image file",
            Self::EditCaption => "Edit caption",
            Self::ClearImage => "Remove image",
            Self::SubmitUpload => "Upload meme",
            Self::NextTab => "Next tab",
            Self::EditProfile => "Edit profile",
            Self::ToggleSetting => "Toggle setting",
            Self::CancelInput => "Cancel input",
            Self::CommitInput => "Confirm input",
            Self::NextField => "Next field",
        }
    }
}

// ============================================================================
// Context Enum
// ============================================================================

/// Dispatch context: the page (or text prompt) that has the keyboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Context {
    Global,
    Home,
    Explorer,
    Detail,
    Upload,
    Profile,
    Leaderboard,
    Prompt,
}

impl Context {
    pub fn label(self) -> &'static str {
        match self {
            Self::Global => "Global",
            Self::Home => "Home",
            Self::Explorer => "Explorer",
            Self::Detail => "Meme",
            Self::Upload => "Upload",
            Self::Profile => "Profile",
            Self::Leaderboard => "Leaderboard",
            Self::Prompt => "Text input",
        }
    }
}

// ============================================================================
// Key Specification
// ============================================================================

/// A key event: code + modifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeySpec {
    pub code: KeyCode,
    pub modifiers: KeyModifiers,
}

impl KeySpec {
    pub const fn new(code: KeyCode, modifiers: KeyModifiers) -> Self {
        Self { code, modifiers }
    }

    pub const fn plain(code: KeyCode) -> Self {
        Self::new(code, KeyModifiers::NONE)
    }

    pub const fn ch(c: char) -> Self {
        Self::plain(KeyCode::Char(c))
    }

    pub const fn ctrl(c: char) -> Self {
        Self::new(KeyCode::Char(c), KeyModifiers::CONTROL)
    }
}

/// Parse a key string from config into a KeySpec.
///
/// Accepts single characters ("q", "/"), named keys ("Enter", "Esc", "Tab",
/// arrows, "Backspace", "Space"), "Ctrl+<char>" and "F1".."F12".
fn parse_key_string(s: &str) -> Option<KeySpec> {
    let s = s.trim();

    if let Some(rest) = s.strip_prefix("Ctrl+").or_else(|| s.strip_prefix("ctrl+")) {
        let mut chars = rest.trim().chars();
        return match (chars.next(), chars.next()) {
            (Some(c), None) => Some(KeySpec::ctrl(c)),
            _ => None,
        };
    }

    let named = match s.to_lowercase().as_str() {
        "enter" | "return" => Some(KeyCode::Enter),
        "esc" | "escape" => Some(KeyCode::Esc),
        "tab" => Some(KeyCode::Tab),
        "up" => Some(KeyCode::Up),
        "down" => Some(KeyCode::Down),
        "left" => Some(KeyCode::Left),
        "right" => Some(KeyCode::Right),
        "backspace" => Some(KeyCode::Backspace),
        "space" => Some(KeyCode::Char(' ')),
        _ => None,
    };
    if let Some(code) = named {
        return Some(KeySpec::plain(code));
    }

    if let Some(n) = s
        .strip_prefix(['F', 'f'])
        .and_then(|n| n.parse::<u8>().ok())
    {
        return (1..=12).contains(&n).then(|| KeySpec::plain(KeyCode::F(n)));
    }

    let mut chars = s.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Some(KeySpec::ch(c)),
        _ => None,
    }
}

/// Format a KeySpec for the help screen.
fn format_key(key: &KeySpec) -> String {
    let modifier = if key.modifiers.contains(KeyModifiers::CONTROL) {
        "Ctrl+"
    } else {
        ""
    };

    let key_name = match key.code {
        KeyCode::Char(' ') => "Space".to_string(),
        KeyCode::Char(c) => c.to_string(),
        KeyCode::Enter => "Enter".to_string(),
        KeyCode::Esc => "Esc".to_string(),
        KeyCode::Tab => "Tab".to_string(),
        KeyCode::Up => "Up".to_string(),
        KeyCode::Down => "Down".to_string(),
        KeyCode::Left => "Left".to_string(),
        KeyCode::Right => "Right".to_string(),
        KeyCode::Backspace => "Backspace".to_string(),
        KeyCode::F(n) => format!("F{}", n),
        _ => "?".to_string(),
    };

    format!("{}{}", modifier, key_name)
}

// ============================================================================
// Keybinding Registry
// ============================================================================

/// Default bindings, in help-screen order.
const DEFAULT_BINDINGS: &[(Context, KeySpec, Action)] = &[
    // Global
    (Context::Global, KeySpec::ch('q'), Action::Quit),
    (Context::Global, KeySpec::ch('j'), Action::NavDown),
    (Context::Global, KeySpec::plain(KeyCode::Down), Action::NavDown),
    (Context::Global, KeySpec::ch('k'), Action::NavUp),
    (Context::Global, KeySpec::plain(KeyCode::Up), Action::NavUp),
    (Context::Global, KeySpec::plain(KeyCode::Esc), Action::Back),
    (Context::Global, KeySpec::plain(KeyCode::Enter), Action::Select),
    (Context::Global, KeySpec::ch('1'), Action::GoHome),
    (Context::Global, KeySpec::ch('2'), Action::GoExplore),
    (Context::Global, KeySpec::ch('3'), Action::GoUpload),
    (Context::Global, KeySpec::ch('4'), Action::GoLeaderboard),
    (Context::Global, KeySpec::ch('5'), Action::GoProfile),
    (Context::Global, KeySpec::ch('g'), Action::GoToPath),
    (Context::Global, KeySpec::ch('r'), Action::Refresh),
    (Context::Global, KeySpec::ch('T'), Action::ToggleTheme),
    (Context::Global, KeySpec::ch('?'), Action::ShowHelp),
    // Home
    (Context::Home, KeySpec::ch('l'), Action::ToggleLike),
    (Context::Home, KeySpec::ch('s'), Action::ToggleSave),
    (Context::Home, KeySpec::ch(']'), Action::NextCategory),
    (Context::Home, KeySpec::plain(KeyCode::Right), Action::NextCategory),
    (Context::Home, KeySpec::ch('['), Action::PrevCategory),
    (Context::Home, KeySpec::plain(KeyCode::Left), Action::PrevCategory),
    // Explorer
    (Context::Explorer, KeySpec::ch('l'), Action::ToggleLike),
    (Context::Explorer, KeySpec::ch('s'), Action::ToggleSave),
    (Context::Explorer, KeySpec::ch('/'), Action::EnterSearch),
    (Context::Explorer, KeySpec::ch('f'), Action::ToggleFilters),
    (Context::Explorer, KeySpec::ch(']'), Action::NextCategory),
    (Context::Explorer, KeySpec::plain(KeyCode::Right), Action::NextCategory),
    (Context::Explorer, KeySpec::ch('['), Action::PrevCategory),
    (Context::Explorer, KeySpec::plain(KeyCode::Left), Action::PrevCategory),
    (Context::Explorer, KeySpec::ch('o'), Action::CycleSort),
    // Detail
    (Context::Detail, KeySpec::ch('l'), Action::ToggleLike),
    (Context::Detail, KeySpec::ch('s'), Action::ToggleSave),
    (Context::Detail, KeySpec::ch('c'), Action::AddComment),
    (Context::Detail, KeySpec::ch('o'), Action::OpenInBrowser),
    // Upload
    (Context::Upload, KeySpec::ch('i'), Action::PickImage),
    (Context::Upload, KeySpec::ch('c'), Action::EditCaption),
    (Context::Upload, KeySpec::ch('x'), Action::ClearImage),
    (Context::Upload, KeySpec::plain(KeyCode::Enter), Action::SubmitUpload),
    // Profile
    (Context::Profile, KeySpec::plain(KeyCode::Tab), Action::NextTab),
    (Context::Profile, KeySpec::ch('e'), Action::EditProfile),
    (Context::Profile, KeySpec::ch(' '), Action::ToggleSetting),
    // Leaderboard
    (Context::Leaderboard, KeySpec::ch('l'), Action::ToggleLike),
    // Text input
    (Context::Prompt, KeySpec::plain(KeyCode::Esc), Action::CancelInput),
    (Context::Prompt, KeySpec::plain(KeyCode::Enter), Action::CommitInput),
    (Context::Prompt, KeySpec::plain(KeyCode::Tab), Action::NextField),
];

/// Registry of keybindings, supporting default bindings and config overrides.
///
/// The same key can map to different actions in different contexts; lookups
/// fall back to `Global` except while a text prompt is open.
pub struct KeybindingRegistry {
    lookup: HashMap<(Context, KeySpec), Action>,
    bindings: Vec<(Context, KeySpec, Action)>,
}

impl KeybindingRegistry {
    pub fn new() -> Self {
        let mut registry = Self {
            lookup: HashMap::with_capacity(DEFAULT_BINDINGS.len()),
            bindings: Vec::with_capacity(DEFAULT_BINDINGS.len()),
        };
        for &(context, key, action) in DEFAULT_BINDINGS {
            registry.bind(context, key, action);
        }
        registry
    }

    fn bind(&mut self, context: Context, key: KeySpec, action: Action) {
        self.lookup.insert((context, key), action);
        self.bindings.push((context, key, action));
    }

    /// Apply user overrides from the config `keybindings` table.
    ///
    /// Keys are action names ("quit", "toggle_like"), values are key strings
    /// ("q", "Ctrl+d", "F5"). The action is rebound in every context it had.
    /// Returns warnings for unknown actions and unparseable keys.
    pub fn apply_overrides(&mut self, overrides: &HashMap<String, String>) -> Vec<String> {
        let mut warnings = Vec::new();

        for (action_name, key_str) in overrides {
            let Some(action) = parse_action_name(action_name) else {
                warnings.push(format!("Unknown action '{}', ignoring", action_name));
                continue;
            };
            let Some(key) = parse_key_string(key_str) else {
                warnings.push(format!(
                    "Cannot parse key '{}' for action '{}', ignoring",
                    key_str, action_name
                ));
                continue;
            };

            let contexts: Vec<Context> = self
                .bindings
                .iter()
                .filter(|(_, _, a)| *a == action)
                .map(|(c, _, _)| *c)
                .fold(Vec::new(), |mut acc, c| {
                    if !acc.contains(&c) {
                        acc.push(c);
                    }
                    acc
                });

            self.lookup.retain(|_, a| *a != action);
            self.bindings.retain(|(_, _, a)| *a != action);
            for ctx in contexts {
                self.bind(ctx, key, action);
            }

            tracing::info!(action = %action_name, key = %key_str, "Applied keybinding override");
        }

        warnings
    }

    /// Look up the action for a key, trying `context` first and then `Global`.
    ///
    /// The `Prompt` context never falls back: unbound keys there are text.
    pub fn action_for_key(
        &self,
        code: KeyCode,
        modifiers: KeyModifiers,
        context: Context,
    ) -> Option<Action> {
        let key = KeySpec::new(code, modifiers);

        if let Some(&action) = self.lookup.get(&(context, key)) {
            return Some(action);
        }
        if matches!(context, Context::Global | Context::Prompt) {
            return None;
        }
        self.lookup.get(&(Context::Global, key)).copied()
    }

    /// All bindings for the help screen: (context, key, action, description).
    pub fn all_bindings(&self) -> Vec<(Context, String, Action, &'static str)> {
        self.bindings
            .iter()
            .map(|(ctx, key, action)| (*ctx, format_key(key), *action, action.describe()))
            .collect()
    }
}

impl Default for KeybindingRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Parse an action name from config. Underscores are optional.
fn parse_action_name(name: &str) -> Option<Action> {
    let normalized: String = name
        .chars()
        .filter(|c| *c != '_' && *c != '-')
        .collect::<String>()
        .to_lowercase();

    let action = match normalized.as_str() {
        "quit" => Action::Quit,
        "navdown" | "down" => Action::NavDown,
        "navup" | "up" => Action::NavUp,
        "back" => Action::Back,
        "select" | "open" => Action::Select,
        "gohome" | "home" => Action::GoHome,
        "goexplore" | "explore" => Action::GoExplore,
        "goupload" | "upload" => Action::GoUpload,
        "goleaderboard" | "leaderboard" => Action::GoLeaderboard,
        "goprofile" | "profile" => Action::GoProfile,
        "gotopath" | "goto" => Action::GoToPath,
        "refresh" | "reload" => Action::Refresh,
        "toggletheme" | "theme" => Action::ToggleTheme,
        "showhelp" | "help" => Action::ShowHelp,
        "togglelike" | "like" => Action::ToggleLike,
        "togglesave" | "save" => Action::ToggleSave,
        "entersearch" | "search" => Action::EnterSearch,
        "togglefilters" | "filters" => Action::ToggleFilters,
        "nextcategory" => Action::NextCategory,
        "prevcategory" => Action::PrevCategory,
        "cyclesort" | "sort" => Action::CycleSort,
        "openinbrowser" | "browser" => Action::OpenInBrowser,
        "addcomment" | "comment" => Action::AddComment,
        "pickimage" => Action::PickImage,
        "editcaption" | "caption" => Action::EditCaption,
        "clearimage" => Action::ClearImage,
        "submitupload" | "submit" => Action::SubmitUpload,
        "nexttab" => Action::NextTab,
        "editprofile" => Action::EditProfile,
        "togglesetting" => Action::ToggleSetting,
        "cancelinput" => Action::CancelInput,
        "commitinput" => Action::CommitInput,
        "nextfield" => Action::NextField,
        _ => return None,
    };
    Some(action)
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn key(reg: &KeybindingRegistry, code: KeyCode, ctx: Context) -> Option<Action> {
        reg.action_for_key(code, KeyModifiers::NONE, ctx)
    }

    #[test]
    fn test_global_defaults() {
        let reg = KeybindingRegistry::new();
        assert_eq!(key(&reg, KeyCode::Char('q'), Context::Global), Some(Action::Quit));
        assert_eq!(key(&reg, KeyCode::Down, Context::Global), Some(Action::NavDown));
        assert_eq!(key(&reg, KeyCode::Char('3'), Context::Global), Some(Action::GoUpload));
        assert_eq!(key(&reg, KeyCode::Char('r'), Context::Global), Some(Action::Refresh));
    }

    #[test]
    fn test_page_context_falls_back_to_global() {
        let reg = KeybindingRegistry::new();
        assert_eq!(key(&reg, KeyCode::Char('q'), Context::Explorer), Some(Action::Quit));
        assert_eq!(key(&reg, KeyCode::Char('T'), Context::Detail), Some(Action::ToggleTheme));
    }

    #[test]
    fn test_same_key_differs_by_context() {
        let reg = KeybindingRegistry::new();
        assert_eq!(key(&reg, KeyCode::Char('o'), Context::Explorer), Some(Action::CycleSort));
        assert_eq!(key(&reg, KeyCode::Char('o'), Context::Detail), Some(Action::OpenInBrowser));
        assert_eq!(key(&reg, KeyCode::Char('c'), Context::Upload), Some(Action::EditCaption));
        assert_eq!(key(&reg, KeyCode::Char('c'), Context::Detail), Some(Action::AddComment));
        assert_eq!(key(&reg, KeyCode::Enter, Context::Upload), Some(Action::SubmitUpload));
        assert_eq!(key(&reg, KeyCode::Enter, Context::Home), Some(Action::Select));
    }

    #[test]
    fn test_page_only_keys_stay_on_their_page() {
        let reg = KeybindingRegistry::new();
        assert_eq!(key(&reg, KeyCode::Char('/'), Context::Explorer), Some(Action::EnterSearch));
        assert_eq!(key(&reg, KeyCode::Char('/'), Context::Home), None);
        assert_eq!(key(&reg, KeyCode::Char('e'), Context::Explorer), None);
    }

    #[test]
    fn test_prompt_does_not_fall_back() {
        let reg = KeybindingRegistry::new();
        assert_eq!(key(&reg, KeyCode::Char('q'), Context::Prompt), None);
        assert_eq!(key(&reg, KeyCode::Esc, Context::Prompt), Some(Action::CancelInput));
        assert_eq!(key(&reg, KeyCode::Enter, Context::Prompt), Some(Action::CommitInput));
    }

    #[test]
    fn test_apply_overrides_valid() {
        let mut reg = KeybindingRegistry::new();
        let overrides = HashMap::from([("quit".to_string(), "Ctrl+q".to_string())]);
        assert!(reg.apply_overrides(&overrides).is_empty());

        assert_eq!(key(&reg, KeyCode::Char('q'), Context::Global), None);
        assert_eq!(
            reg.action_for_key(KeyCode::Char('q'), KeyModifiers::CONTROL, Context::Global),
            Some(Action::Quit)
        );
    }

    #[test]
    fn test_override_preserves_contexts() {
        let mut reg = KeybindingRegistry::new();
        let overrides = HashMap::from([("toggle_like".to_string(), "h".to_string())]);
        assert!(reg.apply_overrides(&overrides).is_empty());

        for ctx in [Context::Home, Context::Explorer, Context::Detail, Context::Leaderboard] {
            assert_eq!(key(&reg, KeyCode::Char('h'), ctx), Some(Action::ToggleLike));
            assert_eq!(key(&reg, KeyCode::Char('l'), ctx), None);
        }
    }

    #[test]
    fn test_apply_overrides_warnings() {
        let mut reg = KeybindingRegistry::new();
        let overrides = HashMap::from([
            ("nonexistent_action".to_string(), "q".to_string()),
            ("quit".to_string(), "Ctrl+Alt+Q".to_string()),
        ]);
        let mut warnings = reg.apply_overrides(&overrides);
        warnings.sort();
        assert_eq!(warnings.len(), 2);
        assert!(warnings[0].contains("Cannot parse key"));
        assert!(warnings[1].contains("Unknown action"));
    }

    #[test]
    fn test_parse_key_string() {
        assert_eq!(parse_key_string("Enter"), Some(KeySpec::plain(KeyCode::Enter)));
        assert_eq!(parse_key_string("space"), Some(KeySpec::ch(' ')));
        assert_eq!(parse_key_string("Ctrl+d"), Some(KeySpec::ctrl('d')));
        assert_eq!(parse_key_string("F5"), Some(KeySpec::plain(KeyCode::F(5))));
        assert_eq!(parse_key_string("F13"), None);
        assert_eq!(parse_key_string("/"), Some(KeySpec::ch('/')));
        assert_eq!(parse_key_string("F"), Some(KeySpec::ch('F')));
        assert_eq!(parse_key_string("ab"), None);
    }

    #[test]
    fn test_parse_action_name_variants() {
        assert_eq!(parse_action_name("toggle_like"), Some(Action::ToggleLike));
        assert_eq!(parse_action_name("ToggleLike"), Some(Action::ToggleLike));
        assert_eq!(parse_action_name("go-to-path"), Some(Action::GoToPath));
        assert_eq!(parse_action_name("bogus"), None);
    }

    #[test]
    fn test_format_key_display() {
        assert_eq!(format_key(&KeySpec::ch('q')), "q");
        assert_eq!(format_key(&KeySpec::ch(' ')), "Space");
        assert_eq!(format_key(&KeySpec::ctrl('d')), "Ctrl+d");
        assert_eq!(format_key(&KeySpec::plain(KeyCode::F(5))), "F5");
    }

    #[test]
    fn test_all_bindings_cover_defaults() {
        let reg = KeybindingRegistry::new();
        assert_eq!(reg.all_bindings().len(), DEFAULT_BINDINGS.len());
    }
}
