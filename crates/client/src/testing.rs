//! In-memory [`MovieApi`] double for view tests.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use marquee_catalog::{FieldErrors, Movie, MovieDraft};
use tokio::sync::Notify;

use crate::api::{ClientError, MovieApi};

#[derive(Default)]
pub(crate) struct FakeApi {
    movies: Mutex<Vec<Movie>>,
    failing: Mutex<bool>,
    rejection: Mutex<Option<FieldErrors>>,
    gate: Option<Arc<Notify>>,
    calls: AtomicUsize,
    next_id: AtomicUsize,
}

impl FakeApi {
    pub(crate) fn with(movies: Vec<Movie>) -> Arc<Self> {
        Arc::new(Self {
            movies: Mutex::new(movies),
            ..Self::default()
        })
    }

    /// Every call parks until the returned gate is notified.
    pub(crate) fn gated(movies: Vec<Movie>) -> (Arc<Self>, Arc<Notify>) {
        let gate = Arc::new(Notify::new());
        let api = Arc::new(Self {
            movies: Mutex::new(movies),
            gate: Some(Arc::clone(&gate)),
            ..Self::default()
        });
        (api, gate)
    }

    pub(crate) fn fail_all(&self) {
        *self.failing.lock().unwrap() = true;
    }

    /// Writes fail with a 400 carrying `fields`.
    pub(crate) fn reject_with(&self, fields: FieldErrors) {
        *self.rejection.lock().unwrap() = Some(fields);
    }

    pub(crate) fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub(crate) fn movies(&self) -> Vec<Movie> {
        self.movies.lock().unwrap().clone()
    }

    async fn enter(&self) -> Result<(), ClientError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some(gate) = &self.gate {
            gate.notified().await;
        }
        if *self.failing.lock().unwrap() {
            return Err(ClientError::Server {
                status: 500,
                message: "Server error".to_string(),
            });
        }
        Ok(())
    }

    fn check_write(&self) -> Result<(), ClientError> {
        match self.rejection.lock().unwrap().clone() {
            Some(fields) => Err(ClientError::Rejected {
                status: 400,
                message: "Movie failed validation".to_string(),
                fields,
            }),
            None => Ok(()),
        }
    }
}

pub(crate) fn movie(id: &str, name: &str, summary: &str) -> Movie {
    Movie {
        id: id.to_string(),
        name: name.to_string(),
        img: format!("http://example.com/{id}.jpg"),
        summary: summary.to_string(),
    }
}

#[async_trait]
impl MovieApi for FakeApi {
    async fn list(&self) -> Result<Vec<Movie>, ClientError> {
        self.enter().await?;
        Ok(self.movies())
    }

    async fn get(&self, id: &str) -> Result<Movie, ClientError> {
        self.enter().await?;
        self.movies()
            .into_iter()
            .find(|movie| movie.id == id)
            .ok_or(ClientError::NotFound)
    }

    async fn create(&self, draft: &MovieDraft) -> Result<Movie, ClientError> {
        self.enter().await?;
        self.check_write()?;
        let id = format!("m{}", self.next_id.fetch_add(1, Ordering::SeqCst));
        let movie = Movie::from_draft(id, draft.clone());
        self.movies.lock().unwrap().push(movie.clone());
        Ok(movie)
    }

    async fn update(&self, id: &str, draft: &MovieDraft) -> Result<Movie, ClientError> {
        self.enter().await?;
        self.check_write()?;
        let mut movies = self.movies.lock().unwrap();
        let slot = movies
            .iter_mut()
            .find(|movie| movie.id == id)
            .ok_or(ClientError::NotFound)?;
        *slot = Movie::from_draft(id, draft.clone());
        Ok(slot.clone())
    }

    async fn delete(&self, id: &str) -> Result<(), ClientError> {
        self.enter().await?;
        let mut movies = self.movies.lock().unwrap();
        let before = movies.len();
        movies.retain(|movie| movie.id != id);
        if movies.len() == before {
            return Err(ClientError::NotFound);
        }
        Ok(())
    }
}
