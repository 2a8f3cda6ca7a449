//! MemeVerse: browse, like, upload and rank memes from the terminal.
//!
//! The [`store`] owns the fetched collection and its request lifecycle;
//! [`view`] holds the pure filter/sort/toggle reducers the pages use; the
//! [`ui`] module drives everything from a single tokio event loop.

pub mod app;
pub mod config;
pub mod keybindings;
pub mod leaderboard;
pub mod meme;
pub mod pages;
pub mod profile;
pub mod route;
pub mod store;
pub mod theme;
pub mod ui;
pub mod upload;
pub mod util;
pub mod view;
