//! Drop-and-recreate schema initialization for the record files.
//!
//! Every function here is destructive: it drops the table it owns and
//! recreates it with seed rows. None of this runs during bootstrap or any
//! served request; the only caller is the explicit `init-db` admin command.

use rusqlite::{params, Connection};
use waypoint_common::{Error, Result};

/// Recreate the `posts` table in the blog record file and seed it.
///
/// Drops any existing `posts` table. The `images` column holds a JSON array
/// of image filenames (possibly empty).
///
/// Returns the number of seed rows inserted.
pub fn init_posts(conn: &Connection) -> Result<usize> {
    conn.execute_batch(
        "DROP TABLE IF EXISTS posts;
         CREATE TABLE posts (
             id INTEGER PRIMARY KEY AUTOINCREMENT,
             title TEXT NOT NULL,
             description TEXT,
             images TEXT,
             location TEXT,
             date TEXT
         );",
    )
    .map_err(db_err)?;

    let seed_posts = [(
        "Everest Base Camp Trek",
        "<p>Amazing trek to the base camp of Mount Everest.</p>",
        "[]",
        "Nepal",
        "2025-04-10",
    )];

    for (title, description, images, location, date) in seed_posts {
        conn.execute(
            "INSERT INTO posts (title, description, images, location, date) VALUES (?, ?, ?, ?, ?)",
            params![title, description, images, location, date],
        )
        .map_err(db_err)?;
    }

    tracing::info!("posts table initialized with {} seed rows", seed_posts.len());
    Ok(seed_posts.len())
}

/// Recreate the `food_locations` table in the food-map record file and seed it.
///
/// Drops any existing `food_locations` table.
///
/// Returns the number of seed rows inserted.
pub fn init_food_locations(conn: &Connection) -> Result<usize> {
    conn.execute_batch(
        "DROP TABLE IF EXISTS food_locations;
         CREATE TABLE food_locations (
             id INTEGER PRIMARY KEY AUTOINCREMENT,
             name TEXT NOT NULL,
             cuisine TEXT NOT NULL,
             rating REAL NOT NULL,
             lat REAL NOT NULL,
             lon REAL NOT NULL,
             desc TEXT,
             link TEXT
         );",
    )
    .map_err(db_err)?;

    let seed_food = [
        (
            "Sushi House",
            "Japanese",
            4.5,
            37.78,
            -122.42,
            "Fresh sushi and sashimi with a cozy vibe.",
            "https://www.google.com/maps/dir/?api=1&destination=37.78,-122.42",
        ),
        (
            "Pasta Corner",
            "Italian",
            4.2,
            37.79,
            -122.41,
            "Homemade pasta and classic Italian wines.",
            "https://www.google.com/maps/dir/?api=1&destination=37.79,-122.41",
        ),
        (
            "Taco Fiesta",
            "Mexican",
            4.0,
            37.77,
            -122.43,
            "Street tacos and margaritas that hit the spot.",
            "https://www.google.com/maps/dir/?api=1&destination=37.77,-122.43",
        ),
    ];

    for (name, cuisine, rating, lat, lon, desc, link) in seed_food {
        conn.execute(
            "INSERT INTO food_locations (name, cuisine, rating, lat, lon, desc, link)
             VALUES (?, ?, ?, ?, ?, ?, ?)",
            params![name, cuisine, rating, lat, lon, desc, link],
        )
        .map_err(db_err)?;
    }

    tracing::info!(
        "food_locations table initialized with {} seed rows",
        seed_food.len()
    );
    Ok(seed_food.len())
}

fn db_err(e: rusqlite::Error) -> Error {
    Error::database(e.to_string())
}
