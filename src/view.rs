//! Per-page view state: like/save toggle sets, search, category filter and
//! sort order.
//!
//! Everything here is pure and synchronous. Like and save marks live only for
//! one page visit; they are never written to the store and never persisted.
//! The displayed like count is `stored + 1` while a meme is liked.

use crate::meme::MemeRecord;
use std::collections::HashSet;
use std::hash::Hash;

/// Category chips shown on the home page.
pub const HOME_CATEGORIES: [&str; 7] = [
    "all", "funny", "gaming", "animals", "sports", "movies", "tech",
];

/// Categories offered in the explorer filter panel.
pub const EXPLORER_CATEGORIES: [&str; 9] = [
    "all", "funny", "gaming", "animals", "sports", "movies", "tech", "food", "art",
];

// ============================================================================
// Toggle sets
// ============================================================================

/// Membership set for binary per-item flags.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToggleSet<K: Eq + Hash> {
    members: HashSet<K>,
}

impl<K: Eq + Hash> Default for ToggleSet<K> {
    fn default() -> Self {
        Self {
            members: HashSet::new(),
        }
    }
}

impl<K: Eq + Hash> ToggleSet<K> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Flip membership of `key`. Returns true if `key` is now a member.
    pub fn toggle(&mut self, key: K) -> bool {
        if self.members.remove(&key) {
            false
        } else {
            self.members.insert(key);
            true
        }
    }

    pub fn contains<Q>(&self, key: &Q) -> bool
    where
        K: std::borrow::Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.members.contains(key)
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}

/// Like count shown for a meme: the stored count plus one while liked.
pub fn displayed_likes(stored: u64, liked: bool) -> u64 {
    stored.saturating_add(u64::from(liked))
}

/// Like and save marks for the current page visit.
#[derive(Debug, Clone, Default)]
pub struct Interactions {
    pub liked: ToggleSet<String>,
    pub saved: ToggleSet<String>,
}

impl Interactions {
    pub fn toggle_like(&mut self, id: &str) -> bool {
        self.liked.toggle(id.to_string())
    }

    pub fn toggle_save(&mut self, id: &str) -> bool {
        self.saved.toggle(id.to_string())
    }

    pub fn is_liked(&self, id: &str) -> bool {
        self.liked.contains(id)
    }

    pub fn is_saved(&self, id: &str) -> bool {
        self.saved.contains(id)
    }

    pub fn likes_for(&self, meme: &MemeRecord) -> u64 {
        displayed_likes(meme.likes, self.is_liked(&meme.id))
    }
}

// ============================================================================
// Filtering and sorting
// ============================================================================

/// Category filter with an "all" sentinel that bypasses it.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum CategoryFilter {
    #[default]
    All,
    Named(String),
}

impl CategoryFilter {
    /// "all" (any case) or an empty string becomes [`CategoryFilter::All`].
    pub fn parse(s: &str) -> Self {
        let s = s.trim();
        if s.is_empty() || s.eq_ignore_ascii_case("all") {
            Self::All
        } else {
            Self::Named(s.to_lowercase())
        }
    }

    pub fn label(&self) -> &str {
        match self {
            Self::All => "all",
            Self::Named(name) => name,
        }
    }

    pub fn matches(&self, meme: &MemeRecord) -> bool {
        match self {
            Self::All => true,
            Self::Named(name) => meme.category.to_lowercase() == *name,
        }
    }

    /// Step through `choices` (wrapping) by `delta` positions.
    pub fn cycle(&self, choices: &[&str], delta: isize) -> Self {
        if choices.is_empty() {
            return self.clone();
        }
        let len = choices.len() as isize;
        let current = choices
            .iter()
            .position(|c| c.eq_ignore_ascii_case(self.label()))
            .unwrap_or(0) as isize;
        let next = (current + delta).rem_euclid(len) as usize;
        Self::parse(choices[next])
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    /// Input order, unchanged.
    #[default]
    Latest,
    /// Descending like count. Ties keep input order.
    Popular,
}

impl SortOrder {
    pub fn next(self) -> Self {
        match self {
            Self::Latest => Self::Popular,
            Self::Popular => Self::Latest,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Latest => "latest",
            Self::Popular => "popular",
        }
    }

    pub fn sort(self, memes: &mut [&MemeRecord]) {
        match self {
            Self::Latest => {}
            Self::Popular => memes.sort_by(|a, b| b.likes.cmp(&a.likes)),
        }
    }
}

/// Case-insensitive substring match on title and author. The query is used
/// as typed, surrounding whitespace included.
pub fn matches_search(meme: &MemeRecord, query: &str) -> bool {
    if query.is_empty() {
        return true;
    }
    let needle = query.to_lowercase();
    meme.title.to_lowercase().contains(&needle) || meme.author.to_lowercase().contains(&needle)
}

/// Search text, category and sort applied together.
#[derive(Debug, Clone, Default)]
pub struct ViewQuery {
    pub search: String,
    pub category: CategoryFilter,
    pub sort: SortOrder,
}

impl ViewQuery {
    /// Filter by text, then by category, then sort.
    pub fn apply<'a>(&self, memes: &'a [MemeRecord]) -> Vec<&'a MemeRecord> {
        let mut out: Vec<&MemeRecord> = memes
            .iter()
            .filter(|m| matches_search(m, &self.search))
            .filter(|m| self.category.matches(m))
            .collect();
        self.sort.sort(&mut out);
        out
    }
}
