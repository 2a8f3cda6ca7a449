//! Small helpers shared across the crate.
//!
//! - **URL validation**: endpoint and browser-open checks
//! - **Text processing**: Unicode-aware width, truncation and sanitising
//! - **Time**: compact "time ago" labels for meme cards

mod text;
mod time;
mod url_validator;

pub use text::{display_width, strip_control_chars, truncate_to_width};
pub use time::format_time_ago;
pub use url_validator::{validate_endpoint, validate_url_for_open, UrlValidationError};

/// Upper bound on prompt input (search, comments, captions, paths).
pub const MAX_INPUT_LENGTH: usize = 256;
