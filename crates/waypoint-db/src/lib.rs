//! Waypoint-DB: connection pooling and schema administration for the
//! SQLite record files under the storage root.
//!
//! The bootstrap path only ever creates record files as empty placeholders;
//! everything destructive lives here and runs solely behind the explicit
//! `init-db` admin command.
//!
//! # Modules
//!
//! - `pool` - Connection pool management
//! - `schema` - Drop-and-recreate schema initialization with seed rows
//! - `inspect` - Read-only table and row-count reporting

pub mod inspect;
pub mod pool;
pub mod schema;
