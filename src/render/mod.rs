//! Rendering module for writing outlines to output formats.

mod json;

pub use json::{from_json, to_json, JsonFormat};
