//! Per-visit state for each routed page.
//!
//! A fresh [`PageState`] is built on every navigation, so search text,
//! filters, selections and like/save marks never outlive the visit.

use crate::leaderboard::{self, LeaderboardEntry, LEADERBOARD_SIZE};
use crate::meme::MemeRecord;
use crate::profile::{ProfilePage, PROFILE_GRID_SIZE};
use crate::route::Route;
use crate::upload::{UploadDraft, UploadReceipt};
use crate::view::{CategoryFilter, Interactions, SortOrder, ViewQuery, HOME_CATEGORIES};

/// Records listed under "Recent uploads" on the home page.
pub const HOME_RECENT_SIZE: usize = 8;

/// Records previewed under "Trending now" on the home page.
pub const HOME_TRENDING_SIZE: usize = 6;

fn ids_of(memes: Vec<&MemeRecord>) -> Vec<String> {
    memes.into_iter().map(|m| m.id.clone()).collect()
}

/// Clamp `selected` after moving by `delta` within `len` items.
fn step(selected: usize, delta: isize, len: usize) -> usize {
    if len == 0 {
        return 0;
    }
    selected.saturating_add_signed(delta).min(len - 1)
}

// ============================================================================
// Home
// ============================================================================

#[derive(Debug, Clone, Default)]
pub struct HomePage {
    pub category: CategoryFilter,
    pub selected: usize,
    pub interactions: Interactions,
}

impl HomePage {
    /// First [`HOME_RECENT_SIZE`] records in the selected category.
    pub fn recent<'a>(&self, memes: &'a [MemeRecord]) -> Vec<&'a MemeRecord> {
        memes
            .iter()
            .filter(|m| self.category.matches(m))
            .take(HOME_RECENT_SIZE)
            .collect()
    }

    pub fn trending_preview<'a>(&self, trending: &'a [MemeRecord]) -> &'a [MemeRecord] {
        &trending[..trending.len().min(HOME_TRENDING_SIZE)]
    }

    pub fn cycle_category(&mut self, delta: isize) {
        self.category = self.category.cycle(&HOME_CATEGORIES, delta);
        self.selected = 0;
    }
}

// ============================================================================
// Explorer
// ============================================================================

#[derive(Debug, Clone, Default)]
pub struct ExplorerPage {
    pub query: ViewQuery,
    pub show_filters: bool,
    pub selected: usize,
    pub interactions: Interactions,
}

impl ExplorerPage {
    pub fn results<'a>(&self, memes: &'a [MemeRecord]) -> Vec<&'a MemeRecord> {
        self.query.apply(memes)
    }

    pub fn cycle_category(&mut self, delta: isize) {
        self.query.category = self
            .query
            .category
            .cycle(&crate::view::EXPLORER_CATEGORIES, delta);
        self.selected = 0;
    }

    pub fn cycle_sort(&mut self) -> SortOrder {
        self.query.sort = self.query.sort.next();
        self.selected = 0;
        self.query.sort
    }
}

// ============================================================================
// Meme detail
// ============================================================================

#[derive(Debug, Clone)]
pub struct DetailPage {
    pub meme_id: String,
    pub interactions: Interactions,
}

impl DetailPage {
    pub fn new(meme_id: impl Into<String>) -> Self {
        Self {
            meme_id: meme_id.into(),
            interactions: Interactions::default(),
        }
    }
}

// ============================================================================
// Upload
// ============================================================================

#[derive(Debug, Clone, Default)]
pub struct UploadPage {
    pub draft: UploadDraft,
    /// An image read is in flight.
    pub loading: bool,
    pub last_receipt: Option<UploadReceipt>,
}

// ============================================================================
// Leaderboard
// ============================================================================

#[derive(Debug, Clone, Default)]
pub struct LeaderboardPage {
    pub selected: usize,
    pub interactions: Interactions,
}

impl LeaderboardPage {
    pub fn entries<'a>(&self, memes: &'a [MemeRecord]) -> Vec<LeaderboardEntry<'a>> {
        leaderboard::rank(memes, LEADERBOARD_SIZE)
    }
}

// ============================================================================
// Page State
// ============================================================================

#[derive(Debug, Clone)]
pub enum PageState {
    Home(HomePage),
    Explorer(ExplorerPage),
    Detail(DetailPage),
    Upload(UploadPage),
    Profile(ProfilePage),
    Leaderboard(LeaderboardPage),
    NotFound,
}

impl PageState {
    /// Fresh state for a visit to `route`.
    pub fn for_route(route: &Route) -> Self {
        match route {
            Route::Home => Self::Home(HomePage::default()),
            Route::Explore => Self::Explorer(ExplorerPage::default()),
            Route::Upload => Self::Upload(UploadPage::default()),
            Route::MemeDetail(id) => Self::Detail(DetailPage::new(id.clone())),
            Route::Profile => Self::Profile(ProfilePage::default()),
            Route::Leaderboard => Self::Leaderboard(LeaderboardPage::default()),
            Route::NotFound(_) => Self::NotFound,
        }
    }

    /// Ids of the selectable memes on this page, in display order.
    pub fn listed_ids(&self, items: &[MemeRecord]) -> Vec<String> {
        match self {
            Self::Home(page) => ids_of(page.recent(items)),
            Self::Explorer(page) => ids_of(page.results(items)),
            Self::Leaderboard(page) => page
                .entries(items)
                .into_iter()
                .map(|e| e.meme.id.clone())
                .collect(),
            Self::Profile(_) => items
                .iter()
                .take(PROFILE_GRID_SIZE)
                .map(|m| m.id.clone())
                .collect(),
            Self::Detail(page) => vec![page.meme_id.clone()],
            Self::Upload(_) | Self::NotFound => Vec::new(),
        }
    }

    fn selected_mut(&mut self) -> Option<&mut usize> {
        match self {
            Self::Home(p) => Some(&mut p.selected),
            Self::Explorer(p) => Some(&mut p.selected),
            Self::Leaderboard(p) => Some(&mut p.selected),
            _ => None,
        }
    }

    pub fn selected(&self) -> usize {
        match self {
            Self::Home(p) => p.selected,
            Self::Explorer(p) => p.selected,
            Self::Leaderboard(p) => p.selected,
            _ => 0,
        }
    }

    /// Move the list cursor, clamped to `len` items.
    pub fn move_selection(&mut self, delta: isize, len: usize) {
        if let Some(selected) = self.selected_mut() {
            *selected = step(*selected, delta, len);
        }
    }

    /// Keep the cursor inside a list that may have shrunk.
    pub fn clamp_selection(&mut self, len: usize) {
        if let Some(selected) = self.selected_mut() {
            *selected = (*selected).min(len.saturating_sub(1));
        }
    }

    pub fn interactions(&self) -> Option<&Interactions> {
        match self {
            Self::Home(p) => Some(&p.interactions),
            Self::Explorer(p) => Some(&p.interactions),
            Self::Detail(p) => Some(&p.interactions),
            Self::Leaderboard(p) => Some(&p.interactions),
            _ => None,
        }
    }

    pub fn interactions_mut(&mut self) -> Option<&mut Interactions> {
        match self {
            Self::Home(p) => Some(&mut p.interactions),
            Self::Explorer(p) => Some(&mut p.interactions),
            Self::Detail(p) => Some(&mut p.interactions),
            Self::Leaderboard(p) => Some(&mut p.interactions),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::meme::demo_memes;
    use chrono::Utc;

    #[test]
    fn home_recent_is_first_eight_in_category() {
        let memes = demo_memes(24, Utc::now());
        let mut home = HomePage::default();
        assert_eq!(home.recent(&memes).len(), HOME_RECENT_SIZE);

        home.cycle_category(1);
        assert_eq!(home.category.label(), "funny");
        let recent = home.recent(&memes);
        assert_eq!(recent.len(), 3);
        assert!(recent.iter().all(|m| m.category == "Funny"));
    }

    #[test]
    fn home_trending_preview_caps_at_six() {
        let memes = demo_memes(10, Utc::now());
        let home = HomePage::default();
        assert_eq!(home.trending_preview(&memes).len(), HOME_TRENDING_SIZE);
        assert_eq!(home.trending_preview(&memes[..2]).len(), 2);
    }

    #[test]
    fn explorer_category_cycle_resets_selection() {
        let mut page = ExplorerPage {
            selected: 5,
            ..ExplorerPage::default()
        };
        page.cycle_category(-1);
        assert_eq!(page.query.category.label(), "art");
        assert_eq!(page.selected, 0);
    }

    #[test]
    fn fresh_state_per_route() {
        assert!(matches!(PageState::for_route(&Route::Home), PageState::Home(_)));
        assert!(matches!(
            PageState::for_route(&Route::MemeDetail("3".into())),
            PageState::Detail(DetailPage { ref meme_id, .. }) if meme_id == "3"
        ));
        assert!(matches!(
            PageState::for_route(&Route::NotFound("/x".into())),
            PageState::NotFound
        ));
    }

    #[test]
    fn selection_is_clamped() {
        let mut page = PageState::for_route(&Route::Leaderboard);
        page.move_selection(-3, 5);
        assert_eq!(page.selected(), 0);
        page.move_selection(10, 5);
        assert_eq!(page.selected(), 4);
        page.clamp_selection(2);
        assert_eq!(page.selected(), 1);
        page.move_selection(1, 0);
        assert_eq!(page.selected(), 0);
    }

    #[test]
    fn leaderboard_ids_follow_rank() {
        let memes = demo_memes(24, Utc::now());
        let page = PageState::for_route(&Route::Leaderboard);
        let ids = page.listed_ids(&memes);
        assert_eq!(ids.len(), LEADERBOARD_SIZE);
        let top = memes.iter().max_by_key(|m| m.likes).unwrap();
        assert_eq!(ids[0], top.id);
    }
}
