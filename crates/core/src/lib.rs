//! Domain types and validation logic for the video-generation service.
//!
//! Everything in this crate is pure: no I/O, no async, no framework
//! types. The API and storage crates build on these types.

pub mod checkout;
pub mod error;
pub mod generation;
pub mod ids;
pub mod status;
pub mod webhook;

pub use error::CoreError;
