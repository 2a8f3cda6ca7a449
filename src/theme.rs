//! Theme flag and the palettes it selects.
//!
//! [`ThemeStore`] holds the single dark-mode boolean the user toggles. The
//! variant picks a [`ColorPalette`], and [`StyleMap`] resolves semantic role
//! names to concrete ratatui styles.

use ratatui::style::{Color, Modifier, Style};
use std::collections::HashMap;

// ============================================================================
// Theme Store
// ============================================================================

/// The dark-mode flag. Changed only by [`ThemeStore::toggle`]; not persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ThemeStore {
    dark_mode: bool,
}

impl ThemeStore {
    pub fn new(variant: ThemeVariant) -> Self {
        Self {
            dark_mode: variant == ThemeVariant::Dark,
        }
    }

    pub fn dark_mode(self) -> bool {
        self.dark_mode
    }

    pub fn variant(self) -> ThemeVariant {
        if self.dark_mode {
            ThemeVariant::Dark
        } else {
            ThemeVariant::Light
        }
    }

    /// Flip the flag and return the new variant.
    pub fn toggle(&mut self) -> ThemeVariant {
        self.dark_mode = !self.dark_mode;
        let variant = self.variant();
        tracing::debug!(theme = variant.name(), "Theme toggled");
        variant
    }
}

impl Default for ThemeStore {
    fn default() -> Self {
        Self::new(ThemeVariant::Dark)
    }
}

// ============================================================================
// Theme Variant
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThemeVariant {
    Dark,
    Light,
}

impl ThemeVariant {
    /// Parse a variant name (case-insensitive).
    pub fn from_str_name(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "dark" => Some(Self::Dark),
            "light" => Some(Self::Light),
            _ => None,
        }
    }

    pub fn palette(self) -> ColorPalette {
        match self {
            Self::Dark => ColorPalette::dark(),
            Self::Light => ColorPalette::light(),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Dark => "Dark",
            Self::Light => "Light",
        }
    }

    /// Glyph for the navbar theme indicator.
    pub fn icon(self) -> &'static str {
        match self {
            Self::Dark => "☾",
            Self::Light => "☀",
        }
    }
}

// ============================================================================
// Color Palette
// ============================================================================

/// Every semantic UI role mapped to a `Style`.
#[derive(Debug, Clone)]
pub struct ColorPalette {
    // -- Cards --
    pub card_title: Style,
    pub card_meta: Style,
    pub card_selected: Style,
    pub like_active: Style,
    pub save_active: Style,

    // -- Filters --
    pub chip: Style,
    pub chip_active: Style,

    // -- Pages --
    pub heading: Style,
    pub muted: Style,
    pub error: Style,
    pub spinner: Style,
    pub podium: Style,
    pub rank: Style,
    pub comment_author: Style,

    // -- Chrome --
    pub nav_active: Style,
    pub nav_inactive: Style,
    pub status_bar: Style,
    pub prompt: Style,
    pub panel_border: Style,
    pub panel_border_focused: Style,
}

impl ColorPalette {
    fn dark() -> Self {
        Self {
            card_title: Style::default().add_modifier(Modifier::BOLD),
            card_meta: Style::default().fg(Color::DarkGray),
            card_selected: Style::default().bg(Color::DarkGray).fg(Color::White),
            like_active: Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            save_active: Style::default().fg(Color::Yellow),

            chip: Style::default().fg(Color::Gray),
            chip_active: Style::default()
                .fg(Color::Black)
                .bg(Color::Magenta)
                .add_modifier(Modifier::BOLD),

            heading: Style::default()
                .fg(Color::Magenta)
                .add_modifier(Modifier::BOLD),
            muted: Style::default().fg(Color::DarkGray),
            error: Style::default().fg(Color::Red),
            spinner: Style::default().fg(Color::Cyan),
            podium: Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
            rank: Style::default().fg(Color::Cyan),
            comment_author: Style::default().fg(Color::Cyan),

            nav_active: Style::default()
                .fg(Color::Magenta)
                .add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
            nav_inactive: Style::default().fg(Color::Gray),
            status_bar: Style::default().bg(Color::DarkGray).fg(Color::White),
            prompt: Style::default().fg(Color::Yellow),
            panel_border: Style::default(),
            panel_border_focused: Style::default().fg(Color::Magenta),
        }
    }

    fn light() -> Self {
        Self {
            card_title: Style::default()
                .fg(Color::Black)
                .add_modifier(Modifier::BOLD),
            card_meta: Style::default().fg(Color::DarkGray),
            card_selected: Style::default().bg(Color::Blue).fg(Color::White),
            like_active: Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            save_active: Style::default().fg(Color::Magenta),

            chip: Style::default().fg(Color::DarkGray),
            chip_active: Style::default()
                .fg(Color::White)
                .bg(Color::Blue)
                .add_modifier(Modifier::BOLD),

            heading: Style::default()
                .fg(Color::Blue)
                .add_modifier(Modifier::BOLD),
            muted: Style::default().fg(Color::DarkGray),
            error: Style::default().fg(Color::Red),
            spinner: Style::default().fg(Color::Blue),
            podium: Style::default()
                .fg(Color::Magenta)
                .add_modifier(Modifier::BOLD),
            rank: Style::default().fg(Color::Blue),
            comment_author: Style::default().fg(Color::Blue),

            nav_active: Style::default()
                .fg(Color::Blue)
                .add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
            nav_inactive: Style::default().fg(Color::DarkGray),
            status_bar: Style::default().bg(Color::White).fg(Color::Black),
            prompt: Style::default().fg(Color::Magenta),
            panel_border: Style::default().fg(Color::DarkGray),
            panel_border_focused: Style::default().fg(Color::Blue),
        }
    }
}

// ============================================================================
// Style Map
// ============================================================================

/// String-keyed style lookup built from a [`ColorPalette`].
#[derive(Debug, Clone)]
pub struct StyleMap {
    map: HashMap<&'static str, Style>,
}

const ROLE_NAMES: [&str; 20] = [
    "card_title",
    "card_meta",
    "card_selected",
    "like_active",
    "save_active",
    "chip",
    "chip_active",
    "heading",
    "muted",
    "error",
    "spinner",
    "podium",
    "rank",
    "comment_author",
    "nav_active",
    "nav_inactive",
    "status_bar",
    "prompt",
    "panel_border",
    "panel_border_focused",
];

impl StyleMap {
    pub fn from_palette(p: &ColorPalette) -> Self {
        let styles: [Style; 20] = [
            p.card_title,
            p.card_meta,
            p.card_selected,
            p.like_active,
            p.save_active,
            p.chip,
            p.chip_active,
            p.heading,
            p.muted,
            p.error,
            p.spinner,
            p.podium,
            p.rank,
            p.comment_author,
            p.nav_active,
            p.nav_inactive,
            p.status_bar,
            p.prompt,
            p.panel_border,
            p.panel_border_focused,
        ];

        Self {
            map: ROLE_NAMES.into_iter().zip(styles).collect(),
        }
    }

    /// `Style::default()` for unknown roles.
    pub fn resolve(&self, role: &str) -> Style {
        self.map.get(role).copied().unwrap_or_default()
    }
}

// ============================================================================
// Tests
// ============================================================================
