//! Review page lifecycle
//!
//! Mounting starts the movie fetch in a background task; the page moves from
//! `Loading` to either `Error` or `Ready`. The fetch is bound to the page: it
//! is cancelled when the page is unmounted or dropped, and a response arriving
//! afterwards is discarded.

use std::sync::Arc;

use tokio::sync::watch;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use crate::{
    catalog::MovieCatalog, form::ReviewForm, movie::Movie, navigation::NavigationState,
    template::PageTemplate,
};

/// Message shown when navigation carried no movie id
pub const NO_MOVIE_SELECTED: &str = "No movie selected";

#[derive(Debug, Clone, PartialEq)]
pub enum PageState {
    Loading,
    Error(String),
    Ready(Movie),
}

/// What the page shows for its current state
#[derive(Debug, Clone, PartialEq)]
pub enum View {
    Spinner,
    Heading(String),
    Page(PageTemplate),
}

pub struct ReviewPage {
    state: watch::Receiver<PageState>,
    cancel: CancellationToken,
    form: Option<ReviewForm>,
}

impl ReviewPage {
    /// Mount the page and start fetching the movie named by `navigation`
    ///
    /// Must be called from within a tokio runtime.
    pub fn mount(navigation: &NavigationState, catalog: Arc<dyn MovieCatalog>) -> Self {
        let (tx, rx) = watch::channel(PageState::Loading);
        let cancel = CancellationToken::new();

        match navigation.movie_id {
            None => {
                tx.send_replace(PageState::Error(NO_MOVIE_SELECTED.to_string()));
            }
            Some(movie_id) => {
                let token = cancel.clone();
                tokio::spawn(async move {
                    let result = tokio::select! {
                        _ = token.cancelled() => {
                            debug!("Fetch of movie {} cancelled", movie_id);
                            return;
                        }
                        result = catalog.fetch_movie(movie_id) => result,
                    };

                    if token.is_cancelled() {
                        return;
                    }

                    let next = match result {
                        Ok(movie) => PageState::Ready(movie),
                        Err(e) => PageState::Error(e.to_string()),
                    };
                    // The page may already be gone
                    let _ = tx.send(next);
                });
            }
        }

        Self {
            state: rx,
            cancel,
            form: None,
        }
    }

    pub fn state(&self) -> PageState {
        self.state.borrow().clone()
    }

    /// Wait until the page leaves `Loading`
    pub async fn settled(&mut self) -> PageState {
        let settled = self
            .state
            .wait_for(|state| *state != PageState::Loading)
            .await
            .map(|state| state.clone());

        settled.unwrap_or_else(|_| self.state.borrow().clone())
    }

    /// The review form, created the first time it is needed once the movie is ready
    pub fn form_mut(&mut self) -> Option<&mut ReviewForm> {
        let movie_id = match &*self.state.borrow() {
            PageState::Ready(movie) => movie.id,
            _ => return None,
        };
        Some(self.form.get_or_insert_with(|| ReviewForm::new(movie_id)))
    }

    /// Current view. The form is built synchronously on first render, so
    /// there is no separate placeholder between the spinner and the page.
    pub fn render(&mut self) -> View {
        match self.state() {
            PageState::Loading => View::Spinner,
            PageState::Error(message) => View::Heading(message),
            PageState::Ready(movie) => {
                let form = self
                    .form
                    .get_or_insert_with(|| ReviewForm::new(movie.id))
                    .clone();
                View::Page(PageTemplate::new(movie, form))
            }
        }
    }

    /// Tear the page down, cancelling any fetch still in flight
    pub fn unmount(self) {
        info!("Unmounting review page");
    }
}

impl Drop for ReviewPage {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}
