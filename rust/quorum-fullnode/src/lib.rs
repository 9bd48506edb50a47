//! A client SDK for the REST API exposed by a QuoRum FullNode. The node owns
//! all chain semantics (consensus, sync, validation); this crate only builds
//! authorized HTTP requests, shapes content payloads and deserializes the
//! node's JSON responses.

#[macro_use]
extern crate tracing as extern_tracing;

pub mod api;
pub mod client;
pub mod data;
pub mod error;
pub mod feed;
pub mod tracing;

pub use api::FullNode;
pub use client::HttpClient;
pub use error::FullNodeError;
