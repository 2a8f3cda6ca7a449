//! Demonstration user profile with local-only edits and settings.

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileStats {
    pub uploads: u32,
    pub likes: u32,
    pub comments: u32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserProfile {
    pub username: String,
    pub bio: String,
    pub joined: String,
    pub avatar_url: String,
    pub stats: ProfileStats,
}

impl UserProfile {
    pub fn demo() -> Self {
        Self {
            username: "MemeKing42".to_string(),
            bio: "Professional meme connoisseur and part-time joke dealer".to_string(),
            joined: "March 2020".to_string(),
            avatar_url: "https://picsum.photos/seed/memeking42/200/200".to_string(),
            stats: ProfileStats {
                uploads: 42,
                likes: 1337,
                comments: 420,
            },
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ProfileTab {
    #[default]
    Uploads,
    Liked,
    Settings,
}

/// Memes shown on the uploads and liked tabs.
pub const PROFILE_GRID_SIZE: usize = 6;

impl ProfileTab {
    pub const ALL: [ProfileTab; 3] = [Self::Uploads, Self::Liked, Self::Settings];

    pub fn next(self) -> Self {
        match self {
            Self::Uploads => Self::Liked,
            Self::Liked => Self::Settings,
            Self::Settings => Self::Uploads,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Uploads => "uploads",
            Self::Liked => "liked",
            Self::Settings => "settings",
        }
    }
}

/// Notification and privacy switches on the settings tab.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileSettings {
    pub notify_likes: bool,
    pub notify_comments: bool,
    pub newsletter: bool,
    pub public_profile: bool,
    pub allow_comments: bool,
}

impl Default for ProfileSettings {
    fn default() -> Self {
        Self {
            notify_likes: true,
            notify_comments: true,
            newsletter: false,
            public_profile: true,
            allow_comments: true,
        }
    }
}

impl ProfileSettings {
    pub const COUNT: usize = 5;

    pub fn label(index: usize) -> &'static str {
        match index {
            0 => "New likes on your memes",
            1 => "New comments on your memes",
            2 => "Newsletter and updates",
            3 => "Show my profile to public",
            _ => "Allow others to comment on my memes",
        }
    }

    fn slot(&mut self, index: usize) -> Option<&mut bool> {
        match index {
            0 => Some(&mut self.notify_likes),
            1 => Some(&mut self.notify_comments),
            2 => Some(&mut self.newsletter),
            3 => Some(&mut self.public_profile),
            4 => Some(&mut self.allow_comments),
            _ => None,
        }
    }

    pub fn get(&self, index: usize) -> bool {
        match index {
            0 => self.notify_likes,
            1 => self.notify_comments,
            2 => self.newsletter,
            3 => self.public_profile,
            4 => self.allow_comments,
            _ => false,
        }
    }

    /// Flip the switch at `index`. Returns the new value, or `None` when the
    /// index is out of range.
    pub fn toggle(&mut self, index: usize) -> Option<bool> {
        let slot = self.slot(index)?;
        *slot = !*slot;
        Some(*slot)
    }
}

/// Which field of the edit draft has input focus.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DraftField {
    #[default]
    Username,
    Bio,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileDraft {
    pub username: String,
    pub bio: String,
    pub field: DraftField,
}

impl ProfileDraft {
    pub fn active_mut(&mut self) -> &mut String {
        match self.field {
            DraftField::Username => &mut self.username,
            DraftField::Bio => &mut self.bio,
        }
    }

    pub fn switch_field(&mut self) {
        self.field = match self.field {
            DraftField::Username => DraftField::Bio,
            DraftField::Bio => DraftField::Username,
        };
    }
}

/// Profile page state for one visit.
#[derive(Debug, Clone)]
pub struct ProfilePage {
    pub profile: UserProfile,
    pub tab: ProfileTab,
    pub settings: ProfileSettings,
    pub selected_setting: usize,
    pub draft: Option<ProfileDraft>,
}

impl Default for ProfilePage {
    fn default() -> Self {
        Self::new(UserProfile::demo())
    }
}

impl ProfilePage {
    pub fn new(profile: UserProfile) -> Self {
        Self {
            profile,
            tab: ProfileTab::default(),
            settings: ProfileSettings::default(),
            selected_setting: 0,
            draft: None,
        }
    }

    pub fn is_editing(&self) -> bool {
        self.draft.is_some()
    }

    pub fn begin_edit(&mut self) {
        self.draft = Some(ProfileDraft {
            username: self.profile.username.clone(),
            bio: self.profile.bio.clone(),
            field: DraftField::Username,
        });
    }

    /// Apply the draft. A blank username keeps the old one.
    pub fn save_edit(&mut self) -> bool {
        let Some(draft) = self.draft.take() else {
            return false;
        };
        let username = draft.username.trim();
        if !username.is_empty() {
            self.profile.username = username.to_string();
        }
        self.profile.bio = draft.bio.trim().to_string();
        tracing::debug!(username = %self.profile.username, "Profile updated");
        true
    }

    pub fn cancel_edit(&mut self) {
        self.draft = None;
    }

    pub fn select_setting(&mut self, delta: isize) {
        let len = ProfileSettings::COUNT as isize;
        self.selected_setting = (self.selected_setting as isize + delta).rem_euclid(len) as usize;
    }
}
