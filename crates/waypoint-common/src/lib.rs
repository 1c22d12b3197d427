//! Waypoint-Common: shared error type and path utilities.
//!
//! Everything in here is dependency-light so every other crate in the
//! workspace can use it without dragging in the image or archive stacks.

pub mod error;
pub mod paths;

pub use error::{Error, Result};
