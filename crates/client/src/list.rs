//! The movie list screen.

use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;

use marquee_catalog::Movie;

use crate::api::MovieApi;
use crate::config::ClientConfig;
use crate::notify::{Notification, Severity};
use crate::route::Route;
use crate::scope::{ScopeHandle, ViewScope};

/// Summaries longer than this many characters start collapsed.
pub const SUMMARY_PREVIEW_CHARS: usize = 200;
pub const EMPTY_PLACEHOLDER: &str = "No movies found.";
pub const READ_MORE: &str = "Read More";
pub const READ_LESS: &str = "Read Less";

const LOAD_FAILED: &str = "Failed to load movies.";
const DELETE_FAILED: &str = "Failed to delete movie.";

/// Asks the user to approve a destructive action.
pub trait Confirm {
    fn confirm(&self, prompt: &str) -> bool;
}

impl<F> Confirm for F
where
    F: Fn(&str) -> bool,
{
    fn confirm(&self, prompt: &str) -> bool {
        self(prompt)
    }
}

/// How a summary cell should be rendered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SummaryDisplay {
    pub text: String,
    /// Text was cut short; render an ellipsis after it.
    pub truncated: bool,
    /// Label of the expand/collapse control, if the row has one.
    pub toggle: Option<&'static str>,
}

impl SummaryDisplay {
    pub fn new(summary: &str, expanded: bool) -> Self {
        if summary.chars().count() <= SUMMARY_PREVIEW_CHARS {
            return Self {
                text: summary.to_string(),
                truncated: false,
                toggle: None,
            };
        }

        if expanded {
            Self {
                text: summary.to_string(),
                truncated: false,
                toggle: Some(READ_LESS),
            }
        } else {
            Self {
                text: summary.chars().take(SUMMARY_PREVIEW_CHARS).collect(),
                truncated: true,
                toggle: Some(READ_MORE),
            }
        }
    }
}

/// One rendered row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MovieRow<'a> {
    pub id: &'a str,
    pub name: &'a str,
    pub img: &'a str,
    pub summary: SummaryDisplay,
}

#[derive(Debug, PartialEq, Eq)]
pub enum DeleteOutcome {
    Deleted,
    Declined,
    Failed,
    /// No row with that id is displayed.
    Missing,
    Cancelled,
}

pub struct ListView {
    api: Arc<dyn MovieApi>,
    scope: ViewScope,
    notification_ttl: Duration,
    movies: Vec<Movie>,
    expanded: HashSet<String>,
    notification: Option<Notification>,
}

impl ListView {
    pub fn new(api: Arc<dyn MovieApi>, config: &ClientConfig) -> Self {
        Self {
            api,
            scope: ViewScope::new(),
            notification_ttl: config.notification_ttl,
            movies: Vec::new(),
            expanded: HashSet::new(),
            notification: None,
        }
    }

    pub fn scope_handle(&self) -> ScopeHandle {
        self.scope.handle()
    }

    /// Fetch every record. On failure the list is left empty and an error
    /// notification is shown. Returns `false` if the view was cancelled.
    pub async fn load(&mut self) -> bool {
        let Some(result) = self.scope.run(self.api.list()).await else {
            return false;
        };

        match result {
            Ok(movies) => {
                tracing::debug!(count = movies.len(), "movie list loaded");
                self.movies = movies;
            }
            Err(err) => {
                tracing::warn!(error = %err, "movie list failed to load");
                self.movies.clear();
                self.notify(Severity::Error, LOAD_FAILED);
            }
        }
        true
    }

    pub fn movies(&self) -> &[Movie] {
        &self.movies
    }

    pub fn is_empty(&self) -> bool {
        self.movies.is_empty()
    }

    pub fn rows(&self) -> Vec<MovieRow<'_>> {
        self.movies
            .iter()
            .map(|movie| MovieRow {
                id: &movie.id,
                name: &movie.name,
                img: &movie.img,
                summary: SummaryDisplay::new(&movie.summary, self.expanded.contains(&movie.id)),
            })
            .collect()
    }

    /// Flip one row between collapsed and expanded.
    pub fn toggle_summary(&mut self, id: &str) {
        if !self.expanded.remove(id) {
            self.expanded.insert(id.to_string());
        }
    }

    pub fn edit(&self, id: &str) -> Route {
        Route::Update(id.to_string())
    }

    pub fn create(&self) -> Route {
        Route::Create
    }

    /// Confirm, then delete one row.
    pub async fn delete(&mut self, id: &str, confirm: &dyn Confirm) -> DeleteOutcome {
        let Some(name) = self
            .movies
            .iter()
            .find(|movie| movie.id == id)
            .map(|movie| movie.name.clone())
        else {
            return DeleteOutcome::Missing;
        };

        if !confirm.confirm(&format!("Delete \"{}\"?", name)) {
            return DeleteOutcome::Declined;
        }

        let Some(result) = self.scope.run(self.api.delete(id)).await else {
            return DeleteOutcome::Cancelled;
        };

        match result {
            Ok(()) => {
                self.movies.retain(|movie| movie.id != id);
                self.expanded.remove(id);
                self.notify(Severity::Success, format!("\"{}\" deleted successfully", name));
                DeleteOutcome::Deleted
            }
            Err(err) => {
                tracing::warn!(movie_id = %id, error = %err, "movie delete failed");
                self.notify(Severity::Error, DELETE_FAILED);
                DeleteOutcome::Failed
            }
        }
    }

    /// Current notification, if it has not expired.
    pub fn notification(&self) -> Option<&Notification> {
        self.notification.as_ref().filter(|note| note.is_visible())
    }

    pub fn dismiss_notification(&mut self) {
        self.notification = None;
    }

    fn notify(&mut self, severity: Severity, text: impl Into<String>) {
        self.notification = Some(Notification::transient(
            severity,
            text,
            self.notification_ttl,
        ));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{movie, FakeApi};

    fn view(api: Arc<FakeApi>) -> ListView {
        ListView::new(api, &ClientConfig::default())
    }

    fn always(answer: bool) -> impl Fn(&str) -> bool {
        move |_| answer
    }

    #[test]
    fn long_summary_collapses_and_expands() {
        let summary = "x".repeat(250);

        let collapsed = SummaryDisplay::new(&summary, false);
        assert_eq!(collapsed.text.chars().count(), 200);
        assert!(collapsed.truncated);
        assert_eq!(collapsed.toggle, Some(READ_MORE));

        let expanded = SummaryDisplay::new(&summary, true);
        assert_eq!(expanded.text, summary);
        assert!(!expanded.truncated);
        assert_eq!(expanded.toggle, Some(READ_LESS));
    }

    #[test]
    fn short_summary_has_no_toggle() {
        let summary = "y".repeat(150);
        for expanded in [false, true] {
            let display = SummaryDisplay::new(&summary, expanded);
            assert_eq!(display.text, summary);
            assert_eq!(display.toggle, None);
        }
        assert_eq!(SummaryDisplay::new(&"z".repeat(200), false).toggle, None);
    }

    #[test]
    fn truncation_respects_character_boundaries() {
        let summary = "é".repeat(201);
        let display = SummaryDisplay::new(&summary, false);
        assert_eq!(display.text, "é".repeat(200));
    }

    #[tokio::test]
    async fn load_and_toggle_rows_independently() {
        let long = "l".repeat(250);
        let api = FakeApi::with(vec![movie("a", "Alpha", &long), movie("b", "Beta", &long)]);
        let mut view = view(api);

        assert!(view.load().await);
        view.toggle_summary("a");

        let rows = view.rows();
        assert_eq!(rows[0].summary.toggle, Some(READ_LESS));
        assert_eq!(rows[1].summary.toggle, Some(READ_MORE));

        view.toggle_summary("a");
        assert_eq!(view.rows()[0].summary.toggle, Some(READ_MORE));
    }

    #[tokio::test]
    async fn empty_catalog_is_not_an_error() {
        let mut view = view(FakeApi::with(vec![]));
        assert!(view.load().await);
        assert!(view.is_empty());
        assert!(view.notification().is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn load_failure_notifies_then_expires() {
        let api = FakeApi::with(vec![movie("a", "Alpha", "summary")]);
        api.fail_all();
        let mut view = view(api);

        view.load().await;

        assert!(view.is_empty());
        let note = view.notification().unwrap();
        assert_eq!(note.severity, Severity::Error);
        assert_eq!(note.text, "Failed to load movies.");

        tokio::time::advance(Duration::from_secs(3)).await;
        assert!(view.notification().is_none());
    }

    #[tokio::test]
    async fn confirmed_delete_removes_row() {
        let api = FakeApi::with(vec![movie("a", "Alpha", "s"), movie("b", "Beta", "s")]);
        let mut view = view(Arc::clone(&api));
        view.load().await;

        let prompts = std::sync::Mutex::new(Vec::new());
        let confirm = |prompt: &str| {
            prompts.lock().unwrap().push(prompt.to_string());
            true
        };

        assert_eq!(view.delete("a", &confirm).await, DeleteOutcome::Deleted);
        assert_eq!(*prompts.lock().unwrap(), vec!["Delete \"Alpha\"?".to_string()]);
        assert_eq!(view.movies().len(), 1);
        assert_eq!(api.movies().len(), 1);
        assert_eq!(
            view.notification().unwrap().text,
            "\"Alpha\" deleted successfully"
        );
    }

    #[tokio::test]
    async fn declined_delete_makes_no_call() {
        let api = FakeApi::with(vec![movie("a", "Alpha", "s")]);
        let mut view = view(Arc::clone(&api));
        view.load().await;
        let calls = api.calls();

        assert_eq!(view.delete("a", &always(false)).await, DeleteOutcome::Declined);
        assert_eq!(api.calls(), calls);
        assert_eq!(view.movies().len(), 1);
        assert_eq!(view.delete("zzz", &always(true)).await, DeleteOutcome::Missing);
    }

    #[tokio::test]
    async fn failed_delete_keeps_row() {
        let api = FakeApi::with(vec![movie("a", "Alpha", "s")]);
        let mut view = view(Arc::clone(&api));
        view.load().await;
        api.fail_all();

        assert_eq!(view.delete("a", &always(true)).await, DeleteOutcome::Failed);
        assert_eq!(view.movies().len(), 1);
        assert_eq!(view.notification().unwrap().text, "Failed to delete movie.");

        view.dismiss_notification();
        assert!(view.notification().is_none());
    }

    #[tokio::test]
    async fn cancelled_load_leaves_view_untouched() {
        let (api, gate) = FakeApi::gated(vec![movie("a", "Alpha", "s")]);
        let mut view = view(api);
        let handle = view.scope_handle();

        let (loaded, ()) = tokio::join!(view.load(), async {
            handle.cancel();
            gate.notify_one();
        });

        assert!(!loaded);
        assert!(view.is_empty());
        assert!(view.notification().is_none());
    }

    #[test]
    fn navigation_targets() {
        let view = view(FakeApi::with(vec![]));
        assert_eq!(view.edit("abc"), Route::Update("abc".to_string()));
        assert_eq!(view.create(), Route::Create);
    }
}
