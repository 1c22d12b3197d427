mod cli;

use waypoint::{archive, config, geo, images, store};

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Commands};
use std::path::{Path, PathBuf};

use waypoint_common::paths::is_archive_file;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    // Respect RUST_LOG env var if set, otherwise use defaults based on verbose flag
    let env_filter = std::env::var("RUST_LOG").unwrap_or_else(|_| {
        if cli.verbose {
            "waypoint=trace,waypoint_db=debug,waypoint_common=debug".to_string()
        } else {
            "waypoint=info,waypoint_db=info".to_string()
        }
    });

    tracing_subscriber::fmt()
        .with_env_filter(&env_filter)
        .init();

    let config = config::load_config_or_default(cli.config.as_deref())?;
    let root = resolve_root(&cli.root, &config);

    match cli.command {
        Commands::Bootstrap => bootstrap(&root),
        Commands::Migrate { source } => migrate(&source, &root),
        Commands::Normalize => normalize(&root, &config),
        Commands::Rotate { file, degrees } => rotate(&root, &file, degrees, &config),
        Commands::Estimate => estimate(&root, &config),
        Commands::Export { output } => export(&root, &output),
        Commands::Import { archive } => import(&archive, &root),
        Commands::StampFeatures { file } => stamp_features(&root, &file),
        Commands::InitDb => init_db(&root),
        Commands::CheckDb => check_db(&root),
        Commands::Validate {
            config: config_path,
        } => {
            let path = config_path.or(cli.config);
            validate_config(path.as_deref())
        }
        Commands::Version => {
            println!("waypoint {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
    }
}

/// The root comes from the CLI override when given, otherwise from the
/// resolver. Resolution happens exactly once here; everything downstream
/// takes the chosen path explicitly.
fn resolve_root(override_root: &Option<PathBuf>, config: &config::Config) -> PathBuf {
    match override_root {
        Some(root) => root.clone(),
        None => store::RootResolver::from_config(config).resolve(),
    }
}

fn bootstrap(root: &Path) -> Result<()> {
    store::bootstrap::ensure(root)?;
    println!("Storage root ready: {}", root.display());
    Ok(())
}

fn migrate(source: &Path, root: &Path) -> Result<()> {
    if !source.exists() {
        anyhow::bail!("Source directory does not exist: {:?}", source);
    }

    let outcomes = store::migrate::migrate(source, root)?;
    for outcome in &outcomes {
        match outcome.status {
            store::migrate::MigrateStatus::Copied => {
                println!("✓ {}", outcome.resource);
            }
            store::migrate::MigrateStatus::SourceMissing => {
                println!("✗ {} (source missing)", outcome.resource);
            }
        }
    }
    println!("Migration complete at: {}", root.display());
    Ok(())
}

fn normalize(root: &Path, config: &config::Config) -> Result<()> {
    let image_dir = root.join(store::IMAGE_DIR_NAME);
    if !image_dir.is_dir() {
        anyhow::bail!(
            "Image directory does not exist: {:?} (run bootstrap first)",
            image_dir
        );
    }

    let opts = images::NormalizeOptions::from(&config.images);
    let report = images::normalize_directory(&image_dir, &opts)?;

    println!("Processed: {}", report.processed);
    println!("Skipped:   {}", report.skipped);
    println!("Reclaimed: {} bytes", report.bytes_reclaimed);
    Ok(())
}

fn rotate(root: &Path, file: &str, degrees: i32, config: &config::Config) -> Result<()> {
    let path = root.join(store::IMAGE_DIR_NAME).join(file);
    let opts = images::NormalizeOptions::from(&config.images);
    images::rotate_file(&path, degrees, &opts)?;
    println!("Rotated {} by {} degrees", file, degrees);
    Ok(())
}

fn estimate(root: &Path, config: &config::Config) -> Result<()> {
    let image_dir = root.join(store::IMAGE_DIR_NAME);
    let report = images::estimate(&image_dir, config.budget.ceiling_mb);

    println!("Images:    {}", report.count);
    println!("Total:     {:.2} MB", report.total_mb);
    println!("Average:   {:.2} MB", report.avg_mb);
    println!("Remaining: {:.2} MB of {:.2} MB", report.remaining_mb, config.budget.ceiling_mb);
    println!("Estimated additional uploads: {}", report.estimated_additional);
    Ok(())
}

fn export(root: &Path, output: &Path) -> Result<()> {
    if !root.is_dir() {
        anyhow::bail!("Storage root does not exist: {:?} (run bootstrap first)", root);
    }
    if !is_archive_file(output) {
        tracing::warn!("output does not end in .zip: {}", output.display());
    }

    let entries = archive::export_to_file(root, output)?;
    println!("Exported {} entries to {}", entries, output.display());
    Ok(())
}

fn import(archive_path: &Path, root: &Path) -> Result<()> {
    if !is_archive_file(archive_path) {
        anyhow::bail!("Archive must end in .zip: {:?}", archive_path);
    }

    let entries = archive::import_from_file(archive_path, root)?;
    println!("Imported {} entries into {}", entries, root.display());
    Ok(())
}

fn stamp_features(root: &Path, file: &str) -> Result<()> {
    let path = root.join(file);
    let mut collection = geo::load(&path)?;

    let today = chrono::Local::now().date_naive();
    let stamped = geo::stamp_date(&mut collection, today);
    geo::save(&path, &collection)?;

    println!("Stamped {} features in {}", stamped, file);
    Ok(())
}

fn init_db(root: &Path) -> Result<()> {
    println!("Reinitializing record schemas under {} (destructive)", root.display());

    let blog = root.join("blog.db");
    let pool = waypoint_db::pool::init_pool(&blog.to_string_lossy())?;
    let conn = waypoint_db::pool::get_conn(&pool)?;
    let posts = waypoint_db::schema::init_posts(&conn)?;
    println!("✓ blog.db: posts table created with {} seed rows", posts);

    let food = root.join("food_map.db");
    let pool = waypoint_db::pool::init_pool(&food.to_string_lossy())?;
    let conn = waypoint_db::pool::get_conn(&pool)?;
    let rows = waypoint_db::schema::init_food_locations(&conn)?;
    println!("✓ food_map.db: food_locations table created with {} seed rows", rows);

    Ok(())
}

fn check_db(root: &Path) -> Result<()> {
    for resource in store::MANAGED_RESOURCES {
        if resource.kind != store::ResourceKind::Record {
            continue;
        }
        let path = resource.path_under(root);
        match waypoint_db::inspect::inspect(&path) {
            Ok(tables) if tables.is_empty() => {
                println!("{}: no tables", resource.name);
            }
            Ok(tables) => {
                println!("{}:", resource.name);
                for table in tables {
                    println!("  {} ({} rows)", table.name, table.rows);
                }
            }
            Err(waypoint_common::Error::NotFound(_)) => {
                println!("{}: missing (run bootstrap first)", resource.name);
            }
            Err(e) => return Err(e.into()),
        }
    }
    Ok(())
}

fn validate_config(path: Option<&Path>) -> Result<()> {
    match path {
        Some(p) => {
            println!("Validating config: {:?}", p);
            let config = config::load_config(p)?;
            println!("✓ Configuration is valid");
            println!("  Mount path: {}", config.storage.mount_path.display());
            println!("  Local dir: {}", config.storage.local_dir.display());
            println!("  Max dimension: {} px", config.images.max_dimension);
            println!("  JPEG quality: {}", config.images.jpeg_quality);
            println!("  Budget ceiling: {:.0} MB", config.budget.ceiling_mb);
        }
        None => {
            println!("No config file specified, using defaults");
            let config = config::Config::default();
            println!("Default config:");
            println!("  Mount path: {}", config.storage.mount_path.display());
            println!("  Local dir: {}", config.storage.local_dir.display());
        }
    }

    Ok(())
}
