//! Background task event processing.

use crate::app::{App, AppEvent};
use crate::meme::{FetchError, MemeRecord};
use crate::pages::PageState;
use crate::store::{Commit, FetchTicket};
use crate::upload::{SelectedImage, UploadError};

/// Apply one event from a background task to the app state.
pub(super) async fn handle_app_event(app: &mut App, event: AppEvent) {
    match event {
        AppEvent::MemesFetched { ticket, result } => {
            handle_memes_fetched(app, ticket, result);
        }
        AppEvent::ImageLoaded(result) => {
            handle_image_loaded(app, result);
        }
        AppEvent::TaskPanicked { task, error } => {
            tracing::error!(task, error, "Background task panicked");
            app.set_status(format!("Internal error in {} task", task));
        }
    }
}

fn handle_memes_fetched(
    app: &mut App,
    ticket: FetchTicket,
    result: Result<Vec<MemeRecord>, FetchError>,
) {
    let failed = result.as_ref().err().map(|e| e.to_string());
    let commit = app.store.complete(ticket, result);
    app.sync_memes();

    match (commit, failed) {
        (Commit::Stale { .. }, _) => {}
        (Commit::Applied, None) => {
            app.set_status(format!("Loaded {} memes", app.memes.items.len()));
        }
        (Commit::Applied, Some(error)) => {
            app.set_status(format!("Could not load memes: {}", error));
        }
    }
}

fn handle_image_loaded(app: &mut App, result: Result<SelectedImage, UploadError>) {
    // The user may have left the upload page while the file was read.
    let PageState::Upload(page) = &mut app.page else {
        tracing::debug!("Discarding image load - not on upload page");
        return;
    };
    page.loading = false;

    match result {
        Ok(image) => {
            let status = format!("Selected {}", image.file_name);
            page.draft.set_image(image);
            app.set_status(status);
        }
        Err(e) => {
            tracing::warn!(error = %e, "Image selection failed");
            app.set_status(e.to_string());
        }
    }
}
