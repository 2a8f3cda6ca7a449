//! Deterministic demonstration data behind the [`MemeSource`] interface.

use super::record::{Comment, MemeRecord};
use super::source::{FetchError, MemeSource};
use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};

/// Number of records the demo source serves by default.
pub const DEFAULT_FIXTURE_SIZE: usize = 24;

const CATEGORIES: [&str; 8] = [
    "Funny", "Gaming", "Animals", "Sports", "Movies", "Tech", "Food", "Art",
];

/// Minutes before the anchor time at which each record was "posted".
const AGE_MINUTES: [i64; 8] = [2, 5, 15, 30, 60, 120, 180, 240];

const COMMENT_LINES: [&str; 4] = ["lmao", "this is me every monday", "saved", "10/10"];

/// Build `count` demo records anchored at `anchor`.
///
/// Output depends only on the arguments, so two calls with the same inputs
/// return identical collections.
pub fn demo_memes(count: usize, anchor: DateTime<Utc>) -> Vec<MemeRecord> {
    (0..count)
        .map(|i| {
            let n = i + 1;
            let created_at = anchor - Duration::minutes(AGE_MINUTES[i % AGE_MINUTES.len()]);
            let comments = (0..i % COMMENT_LINES.len())
                .map(|c| Comment {
                    author: format!("Memer{}", (n + c) % count.max(1) + 1),
                    text: COMMENT_LINES[c].to_string(),
                    created_at: Some(created_at + Duration::minutes(1)),
                })
                .collect();

            MemeRecord {
                id: n.to_string(),
                url: format!("https://picsum.photos/seed/memeverse-{}/800/600", i),
                title: format!("Epic Meme {}", n),
                author: format!("Memer{}", n),
                likes: demo_likes(i),
                comments,
                created_at: Some(created_at),
                category: CATEGORIES[i % CATEGORIES.len()].to_string(),
            }
        })
        .collect()
}

/// Spread like counts over 0..10_000 without a random source.
fn demo_likes(i: usize) -> u64 {
    (i as u64 * 7_919 + 1_543) % 10_000
}

/// Serves [`demo_memes`] on every call.
pub struct FixtureSource {
    count: usize,
    anchor: DateTime<Utc>,
}

impl FixtureSource {
    pub fn new(count: usize) -> Self {
        Self::with_anchor(count, Utc::now())
    }

    pub fn with_anchor(count: usize, anchor: DateTime<Utc>) -> Self {
        Self { count, anchor }
    }
}

impl Default for FixtureSource {
    fn default() -> Self {
        Self::new(DEFAULT_FIXTURE_SIZE)
    }
}

#[async_trait]
impl MemeSource for FixtureSource {
    fn name(&self) -> &str {
        "demo"
    }

    async fn fetch_memes(&self) -> Result<Vec<MemeRecord>, FetchError> {
        Ok(demo_memes(self.count, self.anchor))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn anchor() -> DateTime<Utc> {
        DateTime::parse_from_rfc3339("2024-06-01T12:00:00Z")
            .unwrap()
            .with_timezone(&Utc)
    }

    #[test]
    fn demo_memes_are_deterministic() {
        assert_eq!(demo_memes(24, anchor()), demo_memes(24, anchor()));
    }

    #[test]
    fn demo_memes_cycle_categories_and_titles() {
        let memes = demo_memes(10, anchor());
        assert_eq!(memes.len(), 10);
        assert_eq!(memes[0].title, "Epic Meme 1");
        assert_eq!(memes[0].author, "Memer1");
        assert_eq!(memes[0].category, "Funny");
        assert_eq!(memes[7].category, "Art");
        assert_eq!(memes[8].category, "Funny");
        assert!(memes.iter().all(|m| m.likes < 10_000));
    }

    #[test]
    fn demo_memes_ids_are_unique() {
        let memes = demo_memes(DEFAULT_FIXTURE_SIZE, anchor());
        let ids: std::collections::HashSet<_> = memes.iter().map(|m| m.id.as_str()).collect();
        assert_eq!(ids.len(), memes.len());
    }

    #[test]
    fn demo_memes_handle_zero_count() {
        assert!(demo_memes(0, anchor()).is_empty());
    }

    #[tokio::test]
    async fn fixture_source_serves_demo_memes() {
        let source = FixtureSource::with_anchor(5, anchor());
        let memes = source.fetch_memes().await.unwrap();
        assert_eq!(memes, demo_memes(5, anchor()));
        assert_eq!(source.name(), "demo");
    }
}
