//! # cinedex-index
//!
//! SQLite persistence for the Cinedex catalog.
//!
//! Holds the four entity tables and the two association tables:
//! - `genres`, `directors`, `actors`, `movies`
//! - `movie_actors`, `movie_genres` (composite primary keys, one row per pair)
//!
//! The store is written once by [`CatalogStore::seed`] and afterwards only
//! read: [`CatalogStore::load`] materializes a [`Catalog`] snapshot inside a
//! single read transaction.

use std::path::Path;
use std::time::Duration;

use rusqlite::{params, Connection, Transaction, TransactionBehavior};
use tracing::{debug, info, warn};

use cinedex_core::entity::{Actor, Director, Genre, Movie};
use cinedex_core::error::{CatalogError, IntegrityError};
use cinedex_core::id::{ActorId, DirectorId, GenreId, MovieId};
use cinedex_core::Catalog;

const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// The CatalogStore manages the SQLite database holding the dataset.
pub struct CatalogStore {
    conn: Connection,
}

impl CatalogStore {
    /// Open or create a catalog database at the given path.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Storage`] if the database cannot be opened.
    pub fn open(path: &Path) -> Result<Self, CatalogError> {
        let conn = Connection::open(path).map_err(storage_err)?;
        // Concurrent seeders wait for the writer instead of failing.
        conn.busy_timeout(BUSY_TIMEOUT).map_err(storage_err)?;
        let store = Self { conn };
        store.create_schema()?;
        debug!(path = %path.display(), "catalog store opened");
        Ok(store)
    }

    /// Create an in-memory store (useful for testing).
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Storage`] if schema creation fails.
    pub fn in_memory() -> Result<Self, CatalogError> {
        let conn = Connection::open_in_memory().map_err(storage_err)?;
        let store = Self { conn };
        store.create_schema()?;
        Ok(store)
    }

    /// Create the entity and association tables.
    fn create_schema(&self) -> Result<(), CatalogError> {
        self.conn
            .execute_batch(
                "
            PRAGMA foreign_keys = ON;

            CREATE TABLE IF NOT EXISTS genres (
                id INTEGER PRIMARY KEY,
                name TEXT NOT NULL UNIQUE
            );

            CREATE TABLE IF NOT EXISTS directors (
                id INTEGER PRIMARY KEY,
                name TEXT NOT NULL
            );

            CREATE TABLE IF NOT EXISTS actors (
                id INTEGER PRIMARY KEY,
                name TEXT NOT NULL
            );

            CREATE TABLE IF NOT EXISTS movies (
                id INTEGER PRIMARY KEY,
                title TEXT NOT NULL,
                release_year INTEGER NOT NULL CHECK (release_year > 0),
                rating REAL NOT NULL,
                director_id INTEGER NOT NULL REFERENCES directors(id)
            );

            CREATE TABLE IF NOT EXISTS movie_actors (
                movie_id INTEGER NOT NULL REFERENCES movies(id),
                actor_id INTEGER NOT NULL REFERENCES actors(id),
                PRIMARY KEY (movie_id, actor_id)
            );

            CREATE TABLE IF NOT EXISTS movie_genres (
                movie_id INTEGER NOT NULL REFERENCES movies(id),
                genre_id INTEGER NOT NULL REFERENCES genres(id),
                PRIMARY KEY (movie_id, genre_id)
            );

            CREATE INDEX IF NOT EXISTS idx_movies_director ON movies(director_id);
            CREATE INDEX IF NOT EXISTS idx_movies_release_year ON movies(release_year);
            CREATE INDEX IF NOT EXISTS idx_movie_actors_actor ON movie_actors(actor_id);
            CREATE INDEX IF NOT EXISTS idx_movie_genres_genre ON movie_genres(genre_id);
            ",
            )
            .map_err(storage_err)?;

        Ok(())
    }

    /// Whether any movie has been stored yet.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Storage`] if the query fails.
    pub fn is_seeded(&self) -> Result<bool, CatalogError> {
        Ok(self.count_movies()? > 0)
    }

    /// Write the whole catalog in one transaction.
    ///
    /// Seeding is idempotent: if the store already holds movies nothing is
    /// written and `false` is returned. The check runs inside the write
    /// transaction (`BEGIN IMMEDIATE`), so concurrent seeders of the same
    /// file serialize and only the first one writes.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Storage`] if any insert fails; the transaction
    /// is rolled back.
    pub fn seed(&mut self, catalog: &Catalog) -> Result<bool, CatalogError> {
        let tx = self
            .conn
            .transaction_with_behavior(TransactionBehavior::Immediate)
            .map_err(storage_err)?;
        if count_movies(&tx)? > 0 {
            warn!("catalog store already seeded, skipping");
            return Ok(false);
        }

        write_catalog(&tx, catalog)?;
        tx.commit().map_err(storage_err)?;

        info!(stats = ?catalog.stats(), "catalog store seeded");
        Ok(true)
    }

    /// Load a consistent snapshot of the stored dataset.
    ///
    /// All six tables are read inside one transaction and rebuilt through
    /// [`cinedex_core::CatalogBuilder`], so persisted rows pass the same
    /// integrity checks as freshly seeded ones.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Storage`] if a read fails, or
    /// [`CatalogError::Integrity`] if stored rows violate an invariant.
    pub fn load(&self) -> Result<Catalog, CatalogError> {
        let tx = self.conn.unchecked_transaction().map_err(storage_err)?;
        let mut builder = Catalog::builder();

        for (id, name) in query_pairs(&tx, "SELECT id, name FROM genres ORDER BY id")? {
            builder.insert_genre(Genre {
                id: GenreId::try_from(id)?,
                name,
            })?;
        }
        for (id, name) in query_pairs(&tx, "SELECT id, name FROM directors ORDER BY id")? {
            builder.insert_director(Director {
                id: DirectorId::try_from(id)?,
                name,
            })?;
        }
        for (id, name) in query_pairs(&tx, "SELECT id, name FROM actors ORDER BY id")? {
            builder.insert_actor(Actor {
                id: ActorId::try_from(id)?,
                name,
            })?;
        }
        for row in query_movies(&tx)? {
            builder.insert_movie(row.into_movie()?)?;
        }
        for (movie, actor) in query_links(
            &tx,
            "SELECT movie_id, actor_id FROM movie_actors ORDER BY movie_id, actor_id",
        )? {
            builder.cast(MovieId::try_from(movie)?, ActorId::try_from(actor)?)?;
        }
        for (movie, genre) in query_links(
            &tx,
            "SELECT movie_id, genre_id FROM movie_genres ORDER BY movie_id, genre_id",
        )? {
            builder.tag(MovieId::try_from(movie)?, GenreId::try_from(genre)?)?;
        }

        tx.finish().map_err(storage_err)?;
        Ok(builder.build())
    }

    /// Get count of stored movies.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Storage`] if the query fails.
    pub fn count_movies(&self) -> Result<u64, CatalogError> {
        count_movies(&self.conn)
    }
}

fn count_movies(conn: &Connection) -> Result<u64, CatalogError> {
    let count: i64 = conn
        .query_row("SELECT COUNT(*) FROM movies", [], |row| row.get(0))
        .map_err(storage_err)?;
    Ok(count as u64)
}

fn write_catalog(tx: &Transaction<'_>, catalog: &Catalog) -> Result<(), CatalogError> {
    for genre in catalog.genres() {
        tx.execute(
            "INSERT INTO genres (id, name) VALUES (?1, ?2)",
            params![genre.id.get(), genre.name],
        )
        .map_err(storage_err)?;
    }
    for director in catalog.directors() {
        tx.execute(
            "INSERT INTO directors (id, name) VALUES (?1, ?2)",
            params![director.id.get(), director.name],
        )
        .map_err(storage_err)?;
    }
    for actor in catalog.actors() {
        tx.execute(
            "INSERT INTO actors (id, name) VALUES (?1, ?2)",
            params![actor.id.get(), actor.name],
        )
        .map_err(storage_err)?;
    }
    for movie in catalog.movies() {
        tx.execute(
            "INSERT INTO movies (id, title, release_year, rating, director_id)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![
                movie.id.get(),
                movie.title,
                movie.release_year,
                movie.rating,
                movie.director_id.get(),
            ],
        )
        .map_err(storage_err)?;
    }
    for (movie, actor) in catalog.cast_pairs() {
        tx.execute(
            "INSERT INTO movie_actors (movie_id, actor_id) VALUES (?1, ?2)",
            params![movie.get(), actor.get()],
        )
        .map_err(storage_err)?;
    }
    for (movie, genre) in catalog.genre_pairs() {
        tx.execute(
            "INSERT INTO movie_genres (movie_id, genre_id) VALUES (?1, ?2)",
            params![movie.get(), genre.get()],
        )
        .map_err(storage_err)?;
    }
    Ok(())
}

/// A `movies` row before identifier and year validation.
struct MovieRow {
    id: i64,
    title: String,
    release_year: i64,
    rating: f64,
    director_id: i64,
}

impl MovieRow {
    fn into_movie(self) -> Result<Movie, CatalogError> {
        let release_year =
            u32::try_from(self.release_year).map_err(|_| IntegrityError::InvalidReleaseYear {
                title: self.title.clone(),
                year: self.release_year,
            })?;
        Ok(Movie {
            id: MovieId::try_from(self.id)?,
            title: self.title,
            release_year,
            rating: self.rating,
            director_id: DirectorId::try_from(self.director_id)?,
        })
    }
}

fn query_movies(tx: &Transaction<'_>) -> Result<Vec<MovieRow>, CatalogError> {
    let mut stmt = tx
        .prepare(
            "SELECT id, title, release_year, rating, director_id
             FROM movies
             ORDER BY id",
        )
        .map_err(storage_err)?;

    let rows = stmt
        .query_map([], |row| {
            Ok(MovieRow {
                id: row.get(0)?,
                title: row.get(1)?,
                release_year: row.get(2)?,
                rating: row.get(3)?,
                director_id: row.get(4)?,
            })
        })
        .map_err(storage_err)?
        .collect::<std::result::Result<Vec<_>, _>>()
        .map_err(storage_err)?;

    Ok(rows)
}

fn query_pairs(tx: &Transaction<'_>, sql: &str) -> Result<Vec<(i64, String)>, CatalogError> {
    let mut stmt = tx.prepare(sql).map_err(storage_err)?;
    let rows = stmt
        .query_map([], |row| Ok((row.get::<_, i64>(0)?, row.get::<_, String>(1)?)))
        .map_err(storage_err)?
        .collect::<std::result::Result<Vec<_>, _>>()
        .map_err(storage_err)?;
    Ok(rows)
}

fn query_links(tx: &Transaction<'_>, sql: &str) -> Result<Vec<(i64, i64)>, CatalogError> {
    let mut stmt = tx.prepare(sql).map_err(storage_err)?;
    let rows = stmt
        .query_map([], |row| Ok((row.get::<_, i64>(0)?, row.get::<_, i64>(1)?)))
        .map_err(storage_err)?
        .collect::<std::result::Result<Vec<_>, _>>()
        .map_err(storage_err)?;
    Ok(rows)
}

fn storage_err(e: rusqlite::Error) -> CatalogError {
    CatalogError::Storage(e.to_string())
}
