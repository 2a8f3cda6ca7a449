//! Client-side routes.
//!
//! `/`, `/explore`, `/upload`, `/meme/:id`, `/profile`, `/leaderboard`, and a
//! catch-all for everything else. [`Route::parse`] and [`Route::path`] are
//! inverses for every known route.

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Route {
    #[default]
    Home,
    Explore,
    Upload,
    MemeDetail(String),
    Profile,
    Leaderboard,
    NotFound(String),
}

/// Routes shown as tabs in the navbar, in order.
pub const NAV_ROUTES: [Route; 5] = [
    Route::Home,
    Route::Explore,
    Route::Upload,
    Route::Leaderboard,
    Route::Profile,
];

impl Route {
    /// Match a path. Query strings and fragments are ignored; a single
    /// trailing slash is tolerated.
    pub fn parse(path: &str) -> Self {
        let raw = path.trim();
        let clean = raw
            .split(['?', '#'])
            .next()
            .unwrap_or_default();
        let clean = if clean.len() > 1 {
            clean.strip_suffix('/').unwrap_or(clean)
        } else {
            clean
        };

        match clean {
            "" | "/" => Self::Home,
            "/explore" => Self::Explore,
            "/upload" => Self::Upload,
            "/profile" => Self::Profile,
            "/leaderboard" => Self::Leaderboard,
            other => match other.strip_prefix("/meme/") {
                Some(id) if !id.is_empty() && !id.contains('/') => Self::MemeDetail(id.to_string()),
                _ => Self::NotFound(raw.to_string()),
            },
        }
    }

    pub fn path(&self) -> String {
        match self {
            Self::Home => "/".to_string(),
            Self::Explore => "/explore".to_string(),
            Self::Upload => "/upload".to_string(),
            Self::MemeDetail(id) => format!("/meme/{}", id),
            Self::Profile => "/profile".to_string(),
            Self::Leaderboard => "/leaderboard".to_string(),
            Self::NotFound(path) => path.clone(),
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Self::Home => "Home",
            Self::Explore => "Explore",
            Self::Upload => "Upload",
            Self::MemeDetail(_) => "Meme",
            Self::Profile => "Profile",
            Self::Leaderboard => "Leaderboard",
            Self::NotFound(_) => "Not Found",
        }
    }

    /// Index into [`NAV_ROUTES`], if this route has a tab.
    pub fn nav_index(&self) -> Option<usize> {
        NAV_ROUTES.iter().position(|r| r == self)
    }
}

impl std::fmt::Display for Route {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.path())
    }
}
