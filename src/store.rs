//! Meme store: the last committed collection, its trending subset and the
//! lifecycle of the request that produced it.
//!
//! The store is an explicit object handed to whoever needs it. Reads go
//! through [`MemeStore::snapshot`], change notification through
//! [`MemeStore::subscribe`], and mutations through [`MemeStore::dispatch`] or
//! the fetch pair [`MemeStore::begin_fetch`] / [`MemeStore::complete`].
//!
//! Every request gets a monotonically increasing sequence number. Only the
//! response to the most recently issued request may commit; anything older
//! is discarded as stale, whether it succeeded or failed.

use crate::meme::{Comment, FetchError, MemeRecord, MemeSource};
use std::sync::Arc;
use tokio::sync::watch;

/// Number of leading records exposed as the trending subset.
pub const DEFAULT_TRENDING_SIZE: usize = 10;

/// Lifecycle of the meme collection request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RequestStatus {
    #[default]
    Idle,
    Loading,
    Succeeded,
    Failed,
}

impl RequestStatus {
    pub fn label(self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Loading => "loading",
            Self::Succeeded => "ready",
            Self::Failed => "failed",
        }
    }
}

/// Immutable view of the store at one point in time.
///
/// Cloning is O(1): the collections are shared behind `Arc`.
#[derive(Debug, Clone, Default)]
pub struct MemeSnapshot {
    pub items: Arc<Vec<MemeRecord>>,
    pub trending: Arc<Vec<MemeRecord>>,
    pub status: RequestStatus,
    pub error: Option<String>,
    issued: u64,
    committed: u64,
}

impl MemeSnapshot {
    /// Sequence number of the most recently issued request (0 = none yet).
    pub fn latest_request(&self) -> u64 {
        self.issued
    }

    /// Sequence number of the request whose outcome is currently shown.
    pub fn committed_request(&self) -> u64 {
        self.committed
    }

    pub fn is_loading(&self) -> bool {
        self.status == RequestStatus::Loading
    }

    pub fn find(&self, id: &str) -> Option<&MemeRecord> {
        self.items.iter().find(|m| m.id == id)
    }
}

/// Handle returned by [`MemeStore::begin_fetch`], redeemed by
/// [`MemeStore::complete`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchTicket {
    seq: u64,
}

impl FetchTicket {
    pub fn seq(self) -> u64 {
        self.seq
    }
}

/// Outcome of redeeming a [`FetchTicket`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Commit {
    /// The result was written to the store.
    Applied,
    /// A newer request was issued after this one; the result was dropped.
    Stale { latest: u64 },
}

/// Typed mutations accepted by [`MemeStore::dispatch`].
#[derive(Debug, Clone)]
pub enum MemeAction {
    /// Append a comment to the meme with the given id.
    AddComment { meme_id: String, comment: Comment },
}

/// Cheaply clonable handle to the shared store.
#[derive(Clone)]
pub struct MemeStore {
    state: Arc<watch::Sender<MemeSnapshot>>,
    trending_size: usize,
}

impl MemeStore {
    pub fn new(trending_size: usize) -> Self {
        let (tx, _rx) = watch::channel(MemeSnapshot::default());
        Self {
            state: Arc::new(tx),
            trending_size,
        }
    }

    pub fn trending_size(&self) -> usize {
        self.trending_size
    }

    /// Current state. Lifecycle and collection always come from the same
    /// assignment.
    pub fn snapshot(&self) -> MemeSnapshot {
        self.state.borrow().clone()
    }

    /// Receiver that is notified after every visible state change.
    pub fn subscribe(&self) -> watch::Receiver<MemeSnapshot> {
        self.state.subscribe()
    }

    /// Issue a new request: bump the sequence and enter `Loading`.
    pub fn begin_fetch(&self) -> FetchTicket {
        let mut seq = 0;
        self.state.send_modify(|state| {
            state.issued += 1;
            seq = state.issued;
            state.status = RequestStatus::Loading;
        });
        tracing::debug!(seq, "Meme request issued");
        FetchTicket { seq }
    }

    /// Redeem a ticket with the source's result.
    ///
    /// On success the collection is replaced wholesale and trending is
    /// recomputed. On failure only the lifecycle and error change; the
    /// previously committed collection stays.
    pub fn complete(
        &self,
        ticket: FetchTicket,
        result: Result<Vec<MemeRecord>, FetchError>,
    ) -> Commit {
        let trending_size = self.trending_size;
        let mut outcome = Commit::Applied;

        self.state.send_if_modified(|state| {
            if ticket.seq != state.issued {
                outcome = Commit::Stale {
                    latest: state.issued,
                };
                return false;
            }

            state.committed = ticket.seq;
            match &result {
                Ok(memes) => {
                    state.trending = Arc::new(memes.iter().take(trending_size).cloned().collect());
                    state.items = Arc::new(memes.clone());
                    state.status = RequestStatus::Succeeded;
                    state.error = None;
                }
                Err(e) => {
                    state.status = RequestStatus::Failed;
                    state.error = Some(e.to_string());
                }
            }
            true
        });

        match (&outcome, &result) {
            (Commit::Stale { latest }, _) => {
                tracing::debug!(seq = ticket.seq, latest, "Discarded stale meme response");
            }
            (Commit::Applied, Ok(memes)) => {
                tracing::info!(seq = ticket.seq, count = memes.len(), "Meme collection updated");
            }
            (Commit::Applied, Err(e)) => {
                tracing::warn!(seq = ticket.seq, error = %e, "Meme request failed");
            }
        }

        outcome
    }

    /// Run one full request against `source`.
    ///
    /// Calls are independent: there is no coalescing and no cancellation of
    /// requests already in flight.
    pub async fn fetch(&self, source: &dyn MemeSource) -> Commit {
        let ticket = self.begin_fetch();
        let result = source.fetch_memes().await;
        self.complete(ticket, result)
    }

    /// Apply a typed mutation. Returns false when it matched nothing.
    pub fn dispatch(&self, action: MemeAction) -> bool {
        match action {
            MemeAction::AddComment { meme_id, comment } => {
                let mut applied = false;
                self.state.send_if_modified(|state| {
                    for list in [&mut state.items, &mut state.trending] {
                        if let Some(meme) = Arc::make_mut(list).iter_mut().find(|m| m.id == meme_id)
                        {
                            meme.comments.push(comment.clone());
                            applied = true;
                        }
                    }
                    applied
                });
                if applied {
                    tracing::debug!(meme_id = %meme_id, "Comment added");
                } else {
                    tracing::debug!(meme_id = %meme_id, "Comment target not found");
                }
                applied
            }
        }
    }
}

impl Default for MemeStore {
    fn default() -> Self {
        Self::new(DEFAULT_TRENDING_SIZE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::meme::{demo_memes, FixtureSource};
    use chrono::Utc;

    fn meme(id: &str, likes: u64) -> MemeRecord {
        MemeRecord {
            id: id.to_string(),
            url: format!("https://example.com/{}.png", id),
            title: format!("Meme {}", id),
            author: String::new(),
            likes,
            comments: Vec::new(),
            created_at: None,
            category: "funny".to_string(),
        }
    }

    #[test]
    fn starts_idle_and_empty() {
        let store = MemeStore::default();
        let snap = store.snapshot();
        assert_eq!(snap.status, RequestStatus::Idle);
        assert!(snap.items.is_empty());
        assert!(snap.trending.is_empty());
        assert!(snap.error.is_none());
        assert_eq!(snap.latest_request(), 0);
    }

    #[test]
    fn begin_fetch_enters_loading() {
        let store = MemeStore::default();
        let ticket = store.begin_fetch();
        assert_eq!(ticket.seq(), 1);
        assert!(store.snapshot().is_loading());
    }

    #[test]
    fn success_replaces_collection_and_trending() {
        let store = MemeStore::new(10);
        let ticket = store.begin_fetch();
        let commit = store.complete(ticket, Ok(vec![meme("1", 5), meme("2", 9)]));
        assert_eq!(commit, Commit::Applied);

        let snap = store.snapshot();
        assert_eq!(snap.status, RequestStatus::Succeeded);
        assert!(snap.error.is_none());
        assert_eq!(snap.items.len(), 2);
        let trending: Vec<_> = snap.trending.iter().map(|m| m.id.as_str()).collect();
        assert_eq!(trending, vec!["1", "2"]);
        assert_eq!(snap.committed_request(), 1);
    }

    #[test]
    fn trending_is_capped_at_configured_size() {
        let store = MemeStore::new(10);
        let ticket = store.begin_fetch();
        store.complete(ticket, Ok(demo_memes(24, Utc::now())));
        let snap = store.snapshot();
        assert_eq!(snap.items.len(), 24);
        assert_eq!(snap.trending.len(), 10);
        assert_eq!(snap.trending[..], snap.items[..10]);
    }

    #[test]
    fn failure_keeps_previous_collection() {
        let store = MemeStore::default();
        let t1 = store.begin_fetch();
        store.complete(t1, Ok(vec![meme("1", 1)]));

        let t2 = store.begin_fetch();
        store.complete(t2, Err(FetchError::HttpStatus(503)));

        let snap = store.snapshot();
        assert_eq!(snap.status, RequestStatus::Failed);
        assert_eq!(snap.error.as_deref(), Some("HTTP error: status 503"));
        assert_eq!(snap.items.len(), 1);
        assert_eq!(snap.items[0].id, "1");
        assert_eq!(snap.trending.len(), 1);
    }

    #[test]
    fn success_after_failure_clears_error() {
        let store = MemeStore::default();
        let t1 = store.begin_fetch();
        store.complete(t1, Err(FetchError::Timeout));
        let t2 = store.begin_fetch();
        store.complete(t2, Ok(vec![]));

        let snap = store.snapshot();
        assert_eq!(snap.status, RequestStatus::Succeeded);
        assert!(snap.error.is_none());
    }

    #[test]
    fn stale_ticket_is_discarded() {
        let store = MemeStore::default();
        let older = store.begin_fetch();
        let newer = store.begin_fetch();

        assert_eq!(store.complete(newer, Ok(vec![meme("new", 1)])), Commit::Applied);
        assert_eq!(
            store.complete(older, Ok(vec![meme("old", 1)])),
            Commit::Stale { latest: 2 }
        );

        let snap = store.snapshot();
        assert_eq!(snap.items[0].id, "new");
        assert_eq!(snap.status, RequestStatus::Succeeded);
    }

    #[test]
    fn stale_failure_does_not_flip_status() {
        let store = MemeStore::default();
        let older = store.begin_fetch();
        let newer = store.begin_fetch();
        store.complete(newer, Ok(vec![meme("1", 1)]));
        store.complete(older, Err(FetchError::HttpStatus(500)));

        let snap = store.snapshot();
        assert_eq!(snap.status, RequestStatus::Succeeded);
        assert!(snap.error.is_none());
    }

    #[test]
    fn older_ticket_completing_first_stays_loading() {
        let store = MemeStore::default();
        let older = store.begin_fetch();
        let _newer = store.begin_fetch();
        assert!(matches!(
            store.complete(older, Ok(vec![meme("old", 1)])),
            Commit::Stale { .. }
        ));
        assert!(store.snapshot().is_loading());
        assert!(store.snapshot().items.is_empty());
    }

    #[test]
    fn add_comment_updates_items_and_trending() {
        let store = MemeStore::default();
        let t = store.begin_fetch();
        store.complete(t, Ok(vec![meme("1", 1), meme("2", 2)]));

        let applied = store.dispatch(MemeAction::AddComment {
            meme_id: "2".to_string(),
            comment: Comment::new("me", "nice"),
        });
        assert!(applied);

        let snap = store.snapshot();
        assert_eq!(snap.find("2").unwrap().comment_count(), 1);
        assert_eq!(snap.trending[1].comments[0].text, "nice");
        assert_eq!(snap.find("1").unwrap().comment_count(), 0);
    }

    #[test]
    fn add_comment_to_unknown_meme_is_noop() {
        let store = MemeStore::default();
        let applied = store.dispatch(MemeAction::AddComment {
            meme_id: "missing".to_string(),
            comment: Comment::new("me", "hello"),
        });
        assert!(!applied);
    }

    #[test]
    fn snapshot_taken_earlier_is_not_affected_by_comments() {
        let store = MemeStore::default();
        let t = store.begin_fetch();
        store.complete(t, Ok(vec![meme("1", 1)]));
        let before = store.snapshot();

        store.dispatch(MemeAction::AddComment {
            meme_id: "1".to_string(),
            comment: Comment::new("me", "hi"),
        });
        assert_eq!(before.items[0].comment_count(), 0);
        assert_eq!(store.snapshot().items[0].comment_count(), 1);
    }

    #[tokio::test]
    async fn fetch_runs_full_lifecycle() {
        let store = MemeStore::default();
        let source = FixtureSource::new(3);
        assert_eq!(store.fetch(&source).await, Commit::Applied);
        let snap = store.snapshot();
        assert_eq!(snap.status, RequestStatus::Succeeded);
        assert_eq!(snap.items.len(), 3);
    }

    #[tokio::test]
    async fn subscribers_see_changes() {
        let store = MemeStore::default();
        let mut rx = store.subscribe();
        let ticket = store.begin_fetch();
        rx.changed().await.unwrap();
        assert!(rx.borrow_and_update().is_loading());

        store.complete(ticket, Ok(vec![meme("1", 1)]));
        rx.changed().await.unwrap();
        assert_eq!(rx.borrow_and_update().items.len(), 1);
    }
}
