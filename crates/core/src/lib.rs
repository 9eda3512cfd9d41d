//! Domain primitives shared by the Tubely crates.
//!
//! - [`error`] -- the domain error type every layer converts into.
//! - [`media`] -- content-type handling for uploaded thumbnails.
//! - [`storage`] -- thumbnail storage strategy selection.

pub mod error;
pub mod media;
pub mod storage;
pub mod types;
