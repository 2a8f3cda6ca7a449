//! Terminal User Interface module.
//!
//! # Module Structure
//!
//! - `loop_runner` - Main event loop and terminal management
//! - `input` - Keyboard input handling and text prompts
//! - `events` - Background task event processing
//! - `helpers` - Task spawning and panic capture
//! - `render` - Frame layout, navbar, footer, not-found page
//! - `cards` - Shared meme list and loading placeholder
//! - `home`, `explorer`, `detail`, `upload`, `profile`, `leaderboard` - Pages
//! - `status` - Status bar widget
//! - `help` - Keybinding overlay

mod cards;
mod detail;
mod events;
mod explorer;
mod help;
mod helpers;
mod home;
mod input;
mod leaderboard;
mod loop_runner;
mod profile;
mod render;
mod status;
mod upload;

// Re-export the public API
pub use loop_runner::{run, Action};

use crate::app::{App, AppEvent};
use tokio::sync::mpsc;

/// Start a meme request in the background. The result arrives as
/// [`AppEvent::MemesFetched`].
pub fn start_fetch(app: &mut App, event_tx: &mpsc::Sender<AppEvent>) {
    helpers::spawn_fetch(app, event_tx);
}
