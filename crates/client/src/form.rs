//! Create and Update forms.

use std::sync::Arc;
use std::time::Duration;

use marquee_catalog::{validate, Field, FieldErrors, Movie, MovieDraft};
use tokio::task::JoinHandle;

use crate::api::{ClientError, MovieApi};
use crate::config::ClientConfig;
use crate::notify::{Notification, Severity};
use crate::route::Route;
use crate::scope::{ScopeHandle, ViewScope};

const LOAD_FAILED: &str = "Failed to load movie data.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormMode {
    Create,
    Update { id: String },
}

impl FormMode {
    fn saved_message(&self) -> &'static str {
        match self {
            FormMode::Create => "Movie created successfully!",
            FormMode::Update { .. } => "Movie updated successfully!",
        }
    }

    fn failed_message(&self) -> &'static str {
        match self {
            FormMode::Create => "Failed to create movie. Please try again.",
            FormMode::Update { .. } => "Update failed. Please try again.",
        }
    }
}

/// Navigation a front-end should perform once `after` has elapsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Redirect {
    pub to: Route,
    pub after: Duration,
}

#[derive(Debug)]
pub enum SubmitOutcome {
    /// Local validation failed; nothing was sent.
    Invalid,
    Saved { movie: Movie, redirect: Redirect },
    Failed(ClientError),
    Cancelled,
}

pub struct MovieForm {
    api: Arc<dyn MovieApi>,
    scope: ViewScope,
    mode: FormMode,
    redirect_delay: Duration,
    draft: MovieDraft,
    errors: FieldErrors,
    banner: Option<Notification>,
}

impl MovieForm {
    pub fn create(api: Arc<dyn MovieApi>, config: &ClientConfig) -> Self {
        Self::with_mode(api, config, FormMode::Create)
    }

    pub fn update(api: Arc<dyn MovieApi>, config: &ClientConfig, id: impl Into<String>) -> Self {
        Self::with_mode(api, config, FormMode::Update { id: id.into() })
    }

    fn with_mode(api: Arc<dyn MovieApi>, config: &ClientConfig, mode: FormMode) -> Self {
        Self {
            api,
            scope: ViewScope::new(),
            mode,
            redirect_delay: config.redirect_delay,
            draft: MovieDraft::default(),
            errors: FieldErrors::default(),
            banner: None,
        }
    }

    pub fn mode(&self) -> &FormMode {
        &self.mode
    }

    pub fn scope_handle(&self) -> ScopeHandle {
        self.scope.handle()
    }

    /// Seed an update form from the stored record. Create forms have nothing
    /// to load. Returns `false` when loading failed or was cancelled.
    pub async fn load(&mut self) -> bool {
        let FormMode::Update { id } = &self.mode else {
            return true;
        };

        let Some(result) = self.scope.run(self.api.get(id)).await else {
            return false;
        };

        match result {
            Ok(movie) => {
                self.draft = movie.to_draft();
                self.errors = FieldErrors::default();
                self.banner = None;
                true
            }
            Err(err) => {
                tracing::warn!(error = %err, "movie failed to load into form");
                self.banner = Some(Notification::persistent(Severity::Error, LOAD_FAILED));
                false
            }
        }
    }

    pub fn draft(&self) -> &MovieDraft {
        &self.draft
    }

    pub fn errors(&self) -> &FieldErrors {
        &self.errors
    }

    pub fn banner(&self) -> Option<&Notification> {
        self.banner.as_ref()
    }

    /// Edit one field. Its inline error goes away; on an update form a
    /// failure banner does too.
    pub fn set_field(&mut self, field: Field, value: impl Into<String>) {
        self.draft.set(field, value);
        self.errors.clear(field);

        let failed = self
            .banner
            .as_ref()
            .is_some_and(|banner| banner.severity == Severity::Error);
        if failed && matches!(self.mode, FormMode::Update { .. }) {
            self.banner = None;
        }
    }

    /// Clear every field and message. Only a create form can be reset.
    pub fn reset(&mut self) -> bool {
        if self.mode != FormMode::Create {
            return false;
        }
        self.draft = MovieDraft::default();
        self.errors = FieldErrors::default();
        self.banner = None;
        true
    }

    pub fn back(&self) -> Route {
        Route::List
    }

    pub async fn submit(&mut self) -> SubmitOutcome {
        let errors = validate(&self.draft);
        if !errors.is_valid() {
            self.errors = errors;
            self.banner = None;
            return SubmitOutcome::Invalid;
        }
        self.errors = FieldErrors::default();

        let draft = self.draft.trimmed();
        let result = match &self.mode {
            FormMode::Create => self.scope.run(self.api.create(&draft)).await,
            FormMode::Update { id } => self.scope.run(self.api.update(id, &draft)).await,
        };

        let Some(result) = result else {
            return SubmitOutcome::Cancelled;
        };

        match result {
            Ok(movie) => {
                tracing::info!(movie_id = %movie.id, "movie saved");
                self.draft = movie.to_draft();
                self.banner = Some(Notification::persistent(
                    Severity::Success,
                    self.mode.saved_message(),
                ));
                SubmitOutcome::Saved {
                    movie,
                    redirect: Redirect {
                        to: Route::List,
                        after: self.redirect_delay,
                    },
                }
            }
            Err(err) => {
                tracing::warn!(error = %err, "movie save failed");
                if let ClientError::Rejected { fields, .. } = &err {
                    self.errors = fields.clone();
                }
                self.banner = Some(Notification::persistent(
                    Severity::Error,
                    self.mode.failed_message(),
                ));
                SubmitOutcome::Failed(err)
            }
        }
    }

    /// Run `navigate` once the redirect delay has passed, unless the form is
    /// dropped or cancelled first.
    pub fn schedule_redirect<F>(&self, redirect: Redirect, navigate: F) -> JoinHandle<bool>
    where
        F: FnOnce(Route) + Send + 'static,
    {
        let Redirect { to, after } = redirect;
        self.scope.spawn_after(after, move || navigate(to))
    }
}
