//! HTTP handlers for `/api/movies`.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Router,
};
use marquee_catalog::{validate, Field, Movie, MovieDraft};
use marquee_db::StoreError;
use marquee_http::{error::AppError, extract::Json};
use serde_json::json;

use super::store::MovieStore;

pub type SharedStore = Arc<dyn MovieStore>;

pub const NOT_FOUND_MESSAGE: &str = "Movie not found";
pub const DELETED_MESSAGE: &str = "Movie deleted";

/// Routes relative to the module mount point.
pub fn router(store: SharedStore) -> Router {
    Router::new()
        .route("/", get(list_movies).post(create_movie))
        .route("/health", get(health_check))
        .route(
            "/{id}",
            get(get_movie).put(update_movie).delete(delete_movie),
        )
        .with_state(store)
}

async fn health_check() -> &'static str {
    "movies module is healthy"
}

async fn list_movies(State(store): State<SharedStore>) -> Result<Json<Vec<Movie>>, AppError> {
    let movies = store.find_all().await.map_err(|err| store_error(err, None))?;
    Ok(Json(movies))
}

async fn get_movie(
    State(store): State<SharedStore>,
    Path(id): Path<String>,
) -> Result<Json<Movie>, AppError> {
    let movie = store
        .find_by_id(&id)
        .await
        .map_err(|err| store_error(err, None))?;
    Ok(Json(movie))
}

async fn create_movie(
    State(store): State<SharedStore>,
    Json(draft): Json<MovieDraft>,
) -> Result<(StatusCode, Json<Movie>), AppError> {
    let draft = checked(draft)?;
    let name = draft.name.clone();

    let movie = store
        .insert(draft)
        .await
        .map_err(|err| store_error(err, Some(&name)))?;

    tracing::info!(movie_id = %movie.id, name = %movie.name, "movie created");
    Ok((StatusCode::CREATED, Json(movie)))
}

async fn update_movie(
    State(store): State<SharedStore>,
    Path(id): Path<String>,
    Json(draft): Json<MovieDraft>,
) -> Result<Json<Movie>, AppError> {
    let draft = checked(draft)?;
    let name = draft.name.clone();

    let movie = store
        .replace_by_id(&id, draft)
        .await
        .map_err(|err| store_error(err, Some(&name)))?;

    tracing::info!(movie_id = %movie.id, "movie updated");
    Ok(Json(movie))
}

async fn delete_movie(
    State(store): State<SharedStore>,
    Path(id): Path<String>,
) -> Result<Json<serde_json::Value>, AppError> {
    store
        .delete_by_id(&id)
        .await
        .map_err(|err| store_error(err, None))?;

    tracing::info!(movie_id = %id, "movie deleted");
    Ok(Json(json!({ "message": DELETED_MESSAGE })))
}

/// Run the shared field rules and hand back the trimmed draft.
fn checked(draft: MovieDraft) -> Result<MovieDraft, AppError> {
    let errors = validate(&draft);
    if !errors.is_valid() {
        return Err(AppError::validation(
            errors.to_details(),
            "Movie failed validation",
        ));
    }
    Ok(draft.trimmed())
}

fn store_error(err: StoreError, name: Option<&str>) -> AppError {
    match err {
        StoreError::NotFound => AppError::not_found(NOT_FOUND_MESSAGE),
        StoreError::DuplicateKey { field } => {
            let message = match name {
                Some(name) if field == Field::Name.as_str() => {
                    format!("A movie named \"{}\" already exists", name)
                }
                _ => format!("A movie with this {} already exists", field),
            };
            AppError::duplicate_key(vec![json!({ "field": field, "error": message })], message)
        }
        other => AppError::Internal(anyhow::Error::new(other).context("movie store failure")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn checked_trims_valid_drafts() {
        let draft = MovieDraft::new(
            "  Inception ",
            " example.com/i.jpg ",
            " A thief who steals corporate secrets. ",
        );
        assert_eq!(checked(draft.clone()).unwrap(), draft.trimmed());
    }

    #[test]
    fn checked_reports_each_failing_field() {
        let err = checked(MovieDraft::new("I", "nope", "short")).unwrap_err();
        match err {
            AppError::Validation { details, .. } => {
                let fields: Vec<&str> = details
                    .iter()
                    .map(|detail| detail["field"].as_str().unwrap())
                    .collect();
                assert_eq!(fields, vec!["name", "img", "summary"]);
            }
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn duplicate_name_message_names_the_movie() {
        let err = store_error(
            StoreError::DuplicateKey {
                field: "name".to_string(),
            },
            Some("Heat"),
        );
        match err {
            AppError::DuplicateKey { message, .. } => {
                assert_eq!(message, "A movie named \"Heat\" already exists")
            }
            other => panic!("expected duplicate key, got {other:?}"),
        }
    }

    #[test]
    fn unexpected_store_failures_are_internal() {
        let err = store_error(StoreError::Poisoned, None);
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
