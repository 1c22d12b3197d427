//! Image directory maintenance.
//!
//! Uploaded images arrive in whatever shape a phone produced: sideways EXIF
//! orientation, 4000-pixel dimensions, uncompressed formats. This module
//! normalizes them into the two canonical encodings the site serves, applies
//! explicit single-image rotations, and reports usage against the storage
//! budget.

pub mod budget;
pub mod normalize;

pub use budget::{estimate, BudgetReport};
pub use normalize::{normalize_directory, rotate_file, NormalizeOptions, NormalizeReport};
