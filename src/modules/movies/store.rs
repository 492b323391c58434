use async_trait::async_trait;
use marquee_catalog::{Movie, MovieDraft};
use marquee_db::{Database, StoreError};
use rusqlite::{params, Row};
use uuid::Uuid;

/// Persistent collection of movie records.
///
/// Each operation is a single atomic statement; names are unique.
#[async_trait]
pub trait MovieStore: Send + Sync {
    /// Persist a new record under a fresh id. Fails with `DuplicateKey` on a
    /// name collision.
    async fn insert(&self, draft: MovieDraft) -> Result<Movie, StoreError>;

    /// Every record, oldest first.
    async fn find_all(&self) -> Result<Vec<Movie>, StoreError>;

    async fn find_by_id(&self, id: &str) -> Result<Movie, StoreError>;

    /// Overwrite all three fields of an existing record.
    async fn replace_by_id(&self, id: &str, draft: MovieDraft) -> Result<Movie, StoreError>;

    async fn delete_by_id(&self, id: &str) -> Result<(), StoreError>;
}

pub const CREATE_MOVIES_TABLE: &str = r#"
    CREATE TABLE movies (
        id      TEXT PRIMARY KEY NOT NULL,
        name    TEXT NOT NULL UNIQUE CHECK (name <> ''),
        img     TEXT NOT NULL CHECK (img <> ''),
        summary TEXT NOT NULL CHECK (summary <> '')
    );
"#;

/// [`MovieStore`] over the shared SQLite database.
#[derive(Clone)]
pub struct SqliteMovieStore {
    db: Database,
}

impl SqliteMovieStore {
    pub fn new(db: Database) -> Self {
        Self { db }
    }
}

fn movie_from_row(row: &Row<'_>) -> rusqlite::Result<Movie> {
    Ok(Movie {
        id: row.get("id")?,
        name: row.get("name")?,
        img: row.get("img")?,
        summary: row.get("summary")?,
    })
}

#[async_trait]
impl MovieStore for SqliteMovieStore {
    async fn insert(&self, draft: MovieDraft) -> Result<Movie, StoreError> {
        // v7 ids sort by creation time, which gives find_all a stable order.
        let movie = Movie::from_draft(Uuid::now_v7().to_string(), draft);
        self.db
            .call(move |conn| {
                conn.execute(
                    "INSERT INTO movies (id, name, img, summary) VALUES (?1, ?2, ?3, ?4)",
                    params![movie.id, movie.name, movie.img, movie.summary],
                )?;
                Ok(movie)
            })
            .await
    }

    async fn find_all(&self) -> Result<Vec<Movie>, StoreError> {
        self.db
            .call(|conn| {
                let mut stmt =
                    conn.prepare("SELECT id, name, img, summary FROM movies ORDER BY id")?;
                let movies = stmt
                    .query_map([], movie_from_row)?
                    .collect::<rusqlite::Result<Vec<_>>>()?;
                Ok(movies)
            })
            .await
    }

    async fn find_by_id(&self, id: &str) -> Result<Movie, StoreError> {
        let id = id.to_string();
        self.db
            .call(move |conn| {
                Ok(conn.query_row(
                    "SELECT id, name, img, summary FROM movies WHERE id = ?1",
                    params![id],
                    movie_from_row,
                )?)
            })
            .await
    }

    async fn replace_by_id(&self, id: &str, draft: MovieDraft) -> Result<Movie, StoreError> {
        let movie = Movie::from_draft(id, draft);
        self.db
            .call(move |conn| {
                let changed = conn.execute(
                    "UPDATE movies SET name = ?2, img = ?3, summary = ?4 WHERE id = ?1",
                    params![movie.id, movie.name, movie.img, movie.summary],
                )?;
                if changed == 0 {
                    return Err(StoreError::NotFound);
                }
                Ok(movie)
            })
            .await
    }

    async fn delete_by_id(&self, id: &str) -> Result<(), StoreError> {
        let id = id.to_string();
        self.db
            .call(move |conn| {
                let removed = conn.execute("DELETE FROM movies WHERE id = ?1", params![id])?;
                if removed == 0 {
                    return Err(StoreError::NotFound);
                }
                Ok(())
            })
            .await
    }
}
