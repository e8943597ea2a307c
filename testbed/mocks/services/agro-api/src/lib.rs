//! In-process mock of the agricultural advisory API
//!
//! Serves the HTTP contract the client consumes from a mutable in-memory
//! fixture, records every request it receives (including all Authorization
//! header values) and can be told to fail chosen paths. Tests start it on an
//! ephemeral port; the binary serves the same router on a fixed address.

pub mod fixtures;
pub mod handlers;
pub mod server;

pub use fixtures::{ApiFixture, User};
pub use server::{router, MockApi, MockState, RecordedRequest};
