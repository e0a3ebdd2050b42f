//! Snapshot persistence

pub mod json;

pub use json::{from_json, to_json, SNAPSHOT_VERSION};
