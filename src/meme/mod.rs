//! Meme records and the sources that produce them.
//!
//! - [`record`] - the `MemeRecord` and `Comment` wire types
//! - [`source`] - the `MemeSource` read interface and the HTTP implementation
//! - [`fixture`] - deterministic demo data behind the same interface

mod fixture;
mod record;
mod source;

pub use fixture::{demo_memes, FixtureSource, DEFAULT_FIXTURE_SIZE};
pub use record::{Comment, MemeRecord, DEFAULT_CATEGORY};
pub use source::{
    decode_collection, FetchError, MemeSource, RemoteSource, DEFAULT_ENDPOINT, MAX_BODY_SIZE,
};
