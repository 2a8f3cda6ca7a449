//! Background task spawning shared by input and event handling.

use crate::app::{App, AppEvent};
use crate::meme::FetchError;
use futures::FutureExt;
use std::panic::AssertUnwindSafe;
use std::path::PathBuf;
use tokio::sync::mpsc;

/// Wraps a future to catch panics and convert them to errors.
///
/// Panics in spawned tasks would otherwise vanish inside the runtime; here
/// they become `Err(message)` so the UI can report them.
pub(super) async fn catch_task_panic<F, T>(future: F) -> Result<T, String>
where
    F: std::future::Future<Output = T>,
{
    AssertUnwindSafe(future)
        .catch_unwind()
        .await
        .map_err(|panic| {
            if let Some(s) = panic.downcast_ref::<&'static str>() {
                s.to_string()
            } else if let Some(s) = panic.downcast_ref::<String>() {
                s.clone()
            } else if let Some(e) = panic.downcast_ref::<Box<dyn std::error::Error + Send>>() {
                e.to_string()
            } else {
                format!("Unknown panic: {:?}", (*panic).type_id())
            }
        })
}

async fn report_panic(tx: &mpsc::Sender<AppEvent>, task: &'static str, error: String) {
    tracing::error!(task, error = %error, "Background task panicked");
    let _ = tx.send(AppEvent::TaskPanicked { task, error }).await;
}

/// Issue a meme request and run it in the background.
///
/// The store moves to `Loading` immediately. Earlier requests keep running;
/// whichever ticket is newest when results arrive is the only one committed.
pub(super) fn spawn_fetch(app: &mut App, event_tx: &mpsc::Sender<AppEvent>) {
    let ticket = app.store.begin_fetch();
    app.sync_memes();

    let source = app.source.clone();
    let tx = event_tx.clone();
    tracing::debug!(seq = ticket.seq(), source = source.name(), "Spawning meme fetch");

    let handle = tokio::spawn(async move {
        match catch_task_panic(source.fetch_memes()).await {
            Ok(result) => {
                if let Err(e) = tx.send(AppEvent::MemesFetched { ticket, result }).await {
                    tracing::warn!(error = %e, event = "MemesFetched", "Channel send failed (receiver dropped)");
                }
            }
            Err(panic_msg) => {
                report_panic(&tx, "meme_fetch", panic_msg.clone()).await;
                // The ticket still has to be redeemed or the store stays Loading
                let result = Err(FetchError::TaskFailed(panic_msg));
                let _ = tx.send(AppEvent::MemesFetched { ticket, result }).await;
            }
        }
    });
    app.track_task(handle);
}

/// Read an image file for the upload form in the background.
pub(super) fn spawn_image_load(app: &mut App, path: PathBuf, event_tx: &mpsc::Sender<AppEvent>) {
    let tx = event_tx.clone();
    tracing::debug!(path = %path.display(), "Spawning image load");

    let handle = tokio::spawn(async move {
        match catch_task_panic(crate::upload::load_image(&path)).await {
            Ok(result) => {
                if let Err(e) = tx.send(AppEvent::ImageLoaded(result)).await {
                    tracing::warn!(error = %e, event = "ImageLoaded", "Channel send failed (receiver dropped)");
                }
            }
            Err(panic_msg) => report_panic(&tx, "image_load", panic_msg).await,
        }
    });
    app.track_task(handle);
}
