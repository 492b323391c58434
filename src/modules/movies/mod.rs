pub mod routes;
pub mod store;

use std::sync::Arc;

use async_trait::async_trait;
use axum::Router;
use marquee_kernel::{InitCtx, Migration, Module};
use serde_json::json;

use routes::SharedStore;
pub use store::{MovieStore, SqliteMovieStore};

/// Movie catalog module: record store migrations plus the `/api/movies` service.
pub struct MoviesModule {
    store: SharedStore,
}

impl MoviesModule {
    pub fn new(store: SharedStore) -> Self {
        Self { store }
    }
}

#[async_trait]
impl Module for MoviesModule {
    fn name(&self) -> &'static str {
        "movies"
    }

    async fn init(&self, ctx: &InitCtx<'_>) -> anyhow::Result<()> {
        let count = self.store.find_all().await?.len();
        tracing::info!(
            module = self.name(),
            environment = ?ctx.settings.environment,
            movies = count,
            "movies module initialized"
        );
        Ok(())
    }

    fn routes(&self) -> Router {
        routes::router(Arc::clone(&self.store))
    }

    fn openapi(&self) -> Option<serde_json::Value> {
        Some(openapi_fragment())
    }

    fn migrations(&self) -> Vec<Migration> {
        vec![Migration {
            id: "001_create_movies",
            up: store::CREATE_MOVIES_TABLE,
        }]
    }

    async fn start(&self, _ctx: &InitCtx<'_>) -> anyhow::Result<()> {
        tracing::info!(module = self.name(), "movies module started");
        Ok(())
    }

    async fn stop(&self) -> anyhow::Result<()> {
        tracing::info!(module = self.name(), "movies module stopped");
        Ok(())
    }
}

/// Create a new instance of the movies module
pub fn create_module(store: SharedStore) -> Arc<dyn Module> {
    Arc::new(MoviesModule::new(store))
}

fn error_response(description: &str) -> serde_json::Value {
    json!({
        "description": description,
        "content": {
            "application/json": {
                "schema": { "$ref": "#/components/schemas/ErrorResponse" }
            }
        }
    })
}

fn movie_response(description: &str) -> serde_json::Value {
    json!({
        "description": description,
        "content": {
            "application/json": {
                "schema": { "$ref": "#/components/schemas/Movie" }
            }
        }
    })
}

fn movie_body() -> serde_json::Value {
    json!({
        "required": true,
        "content": {
            "application/json": {
                "schema": { "$ref": "#/components/schemas/MovieInput" }
            }
        }
    })
}

fn id_parameter() -> serde_json::Value {
    json!([{
        "name": "id",
        "in": "path",
        "required": true,
        "schema": { "type": "string" }
    }])
}

fn openapi_fragment() -> serde_json::Value {
    json!({
        "paths": {
            "/": {
                "get": {
                    "summary": "List movies",
                    "tags": ["Movies"],
                    "responses": {
                        "200": {
                            "description": "All movies",
                            "content": {
                                "application/json": {
                                    "schema": {
                                        "type": "array",
                                        "items": { "$ref": "#/components/schemas/Movie" }
                                    }
                                }
                            }
                        },
                        "500": error_response("Internal server error")
                    }
                },
                "post": {
                    "summary": "Create a movie",
                    "tags": ["Movies"],
                    "requestBody": movie_body(),
                    "responses": {
                        "201": movie_response("Created movie"),
                        "400": error_response("Invalid body, failed validation, or duplicate name")
                    }
                }
            },
            "/{id}": {
                "get": {
                    "summary": "Get a movie",
                    "tags": ["Movies"],
                    "parameters": id_parameter(),
                    "responses": {
                        "200": movie_response("The movie"),
                        "404": error_response("Movie not found"),
                        "500": error_response("Internal server error")
                    }
                },
                "put": {
                    "summary": "Replace a movie",
                    "tags": ["Movies"],
                    "parameters": id_parameter(),
                    "requestBody": movie_body(),
                    "responses": {
                        "200": movie_response("Updated movie"),
                        "400": error_response("Invalid body, failed validation, or duplicate name"),
                        "404": error_response("Movie not found"),
                        "500": error_response("Internal server error")
                    }
                },
                "delete": {
                    "summary": "Delete a movie",
                    "tags": ["Movies"],
                    "parameters": id_parameter(),
                    "responses": {
                        "200": {
                            "description": "Movie deleted",
                            "content": {
                                "application/json": {
                                    "schema": {
                                        "type": "object",
                                        "properties": { "message": { "type": "string" } }
                                    }
                                }
                            }
                        },
                        "404": error_response("Movie not found"),
                        "500": error_response("Internal server error")
                    }
                }
            },
            "/health": {
                "get": {
                    "summary": "Movies health check",
                    "tags": ["Movies"],
                    "responses": {
                        "200": {
                            "description": "OK",
                            "content": { "text/plain": { "schema": { "type": "string" } } }
                        }
                    }
                }
            }
        },
        "components": {
            "schemas": {
                "Movie": {
                    "type": "object",
                    "properties": {
                        "id": { "type": "string", "description": "Store-assigned identifier" },
                        "name": { "type": "string", "description": "Unique movie name" },
                        "img": { "type": "string", "description": "Poster image URL" },
                        "summary": { "type": "string", "description": "Short synopsis" }
                    },
                    "required": ["id", "name", "img", "summary"]
                },
                "MovieInput": {
                    "type": "object",
                    "properties": {
                        "name": { "type": "string", "minLength": 2, "maxLength": 100 },
                        "img": { "type": "string", "maxLength": 300 },
                        "summary": { "type": "string", "minLength": 20, "maxLength": 300 }
                    },
                    "required": ["name", "img", "summary"]
                }
            }
        }
    })
}
