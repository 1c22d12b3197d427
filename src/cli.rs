use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "waypoint")]
#[command(author, version, about = "Durable asset store for a travel mapping site")]
pub struct Cli {
    /// Path to config file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Use this storage root instead of resolving one
    #[arg(long, global = true)]
    pub root: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Resolve the storage root and create any missing resources
    Bootstrap,

    /// Copy assets from the legacy in-repo layout into the storage root
    Migrate {
        /// Legacy application directory to copy from
        #[arg(required = true)]
        source: PathBuf,
    },

    /// Normalize every image in the image directory
    Normalize,

    /// Rotate one image clockwise by the given degrees (multiple of 90)
    Rotate {
        /// Image filename, relative to the image directory
        #[arg(required = true)]
        file: String,

        /// Signed degrees; negative rotates counterclockwise
        #[arg(required = true, allow_hyphen_values = true)]
        degrees: i32,
    },

    /// Report image storage usage against the configured ceiling
    Estimate,

    /// Export the whole storage root into a zip archive
    Export {
        /// Destination archive path
        #[arg(required = true)]
        output: PathBuf,
    },

    /// Merge a zip archive back into the storage root
    Import {
        /// Archive to import (must end in .zip)
        #[arg(required = true)]
        archive: PathBuf,
    },

    /// Stamp today's date into every feature of a geographic dataset
    StampFeatures {
        /// Feature file name, e.g. cities.geojson
        #[arg(required = true)]
        file: String,
    },

    /// DESTRUCTIVE: drop and recreate record-file schemas with seed data
    InitDb,

    /// List tables and row counts for every record file
    CheckDb,

    /// Validate configuration file
    Validate {
        /// Config file to validate (uses default if not specified)
        config: Option<PathBuf>,
    },

    /// Display version information
    Version,
}
