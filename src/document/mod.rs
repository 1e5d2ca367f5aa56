//! Typed model of the documents the API accepts.
//!
//! These types only shape the JSON body. The client accepts any
//! `Serialize` value that serializes to an object, so a hand-built
//! `serde_json::Value` works just as well.

mod builder;
mod codes;
mod types;

pub use builder::*;
pub use codes::*;
pub use types::*;
