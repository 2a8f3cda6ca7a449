use crate::meme::MemeRecord;

/// Number of memes ranked on the leaderboard page.
pub const LEADERBOARD_SIZE: usize = 20;

/// Ranks that get the podium highlight.
const PODIUM: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LeaderboardEntry<'a> {
    /// 1-based.
    pub rank: usize,
    pub meme: &'a MemeRecord,
}

impl LeaderboardEntry<'_> {
    pub fn is_podium(&self) -> bool {
        self.rank <= PODIUM
    }
}

/// Top `limit` memes by like count. Ties keep collection order.
pub fn rank(memes: &[MemeRecord], limit: usize) -> Vec<LeaderboardEntry<'_>> {
    let mut sorted: Vec<&MemeRecord> = memes.iter().collect();
    sorted.sort_by(|a, b| b.likes.cmp(&a.likes));
    sorted
        .into_iter()
        .take(limit)
        .enumerate()
        .map(|(i, meme)| LeaderboardEntry { rank: i + 1, meme })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::meme::demo_memes;
    use chrono::Utc;

    #[test]
    fn ranks_by_likes_from_one() {
        let memes = demo_memes(24, Utc::now());
        let board = rank(&memes, LEADERBOARD_SIZE);
        assert_eq!(board.len(), 20);
        assert_eq!(board[0].rank, 1);
        assert!(board.windows(2).all(|w| w[0].meme.likes >= w[1].meme.likes));
        assert_eq!(board.iter().filter(|e| e.is_podium()).count(), 3);
    }

    #[test]
    fn short_collection_ranks_everything() {
        let memes = demo_memes(2, Utc::now());
        assert_eq!(rank(&memes, LEADERBOARD_SIZE).len(), 2);
        assert!(rank(&[], LEADERBOARD_SIZE).is_empty());
    }
}
