use movielist_api::{ApiError, MovieStore};
use movielist_models::{ListEntry, ListFilter, ListFlags, MovieRef};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::{watch, Mutex, RwLock};
use tracing::{debug, info, instrument, warn};

use crate::list_state::ListState;
use crate::locks::MutationLocks;
use crate::membership::{Gesture, ListCommand, Membership, Transition};
use crate::status::{OperationStatus, StatusTracker};

/// Keeps one user's list in step with the server.
///
/// Gestures on the same movie are serialized; each issues exactly one remote
/// command, commits the new membership only if that command succeeded, then
/// refreshes the whole list from the server.
///
/// Refreshes run one at a time, and a refresh whose fetch started before a
/// local commit is discarded rather than swapped in.
pub struct ListStateReconciler<S: MovieStore> {
    store: Arc<S>,
    user_id: String,
    state: RwLock<ListState>,
    /// Bumped under the state write lock on every local commit.
    commits: AtomicU64,
    refreshing: Mutex<()>,
    locks: MutationLocks,
    status: StatusTracker,
}

impl<S: MovieStore> ListStateReconciler<S> {
    pub fn new(store: Arc<S>, user_id: impl Into<String>) -> Self {
        Self {
            store,
            user_id: user_id.into(),
            state: RwLock::new(ListState::default()),
            commits: AtomicU64::new(0),
            refreshing: Mutex::new(()),
            locks: MutationLocks::new(),
            status: StatusTracker::new(),
        }
    }

    pub fn user_id(&self) -> &str {
        &self.user_id
    }

    pub fn subscribe(&self) -> watch::Receiver<OperationStatus> {
        self.status.subscribe()
    }

    pub fn status(&self) -> OperationStatus {
        self.status.current()
    }

    pub async fn snapshot(&self) -> ListState {
        self.state.read().await.clone()
    }

    pub async fn membership(&self, movie_id: &str) -> Membership {
        self.state.read().await.membership(movie_id)
    }

    /// Refresh and report the movie's membership.
    pub async fn load_membership(&self, movie_id: &str) -> Result<Membership, ApiError> {
        self.refresh().await?;
        Ok(self.membership(movie_id).await)
    }

    pub async fn fetch_list(&self, filter: ListFilter) -> Result<Vec<ListEntry>, ApiError> {
        self.status
            .track(
                format!("Loading {} list", filter.name()),
                self.store.fetch_list(&self.user_id, filter),
            )
            .await
    }

    /// Replace the local list with the server's.
    pub async fn refresh(&self) -> Result<(), ApiError> {
        self.status.track("Refreshing list", self.reload()).await
    }

    #[instrument(skip(self), fields(user_id = %self.user_id))]
    async fn reload(&self) -> Result<(), ApiError> {
        let _refreshing = self.refreshing.lock().await;
        let started = self.commits.load(Ordering::SeqCst);
        let (to_watch, watched, favourites) = futures::try_join!(
            self.store.fetch_list(&self.user_id, ListFilter::ToWatch),
            self.store.fetch_list(&self.user_id, ListFilter::Watched),
            self.store.fetch_list(&self.user_id, ListFilter::Favourites),
        )?;
        let fresh = ListState::from_filters(to_watch, watched, favourites);

        let mut state = self.state.write().await;
        if self.commits.load(Ordering::SeqCst) != started {
            debug!("list changed while refreshing, keeping local commits");
            return Ok(());
        }
        debug!(entries = fresh.len(), "list refreshed");
        *state = fresh;
        Ok(())
    }

    pub async fn add_to_list(&self, movie: &MovieRef, flags: ListFlags) -> Result<String, ApiError> {
        let _guard = self.locks.acquire(&movie.id).await;
        let result = self
            .status
            .track_message(
                format!("Adding {}", movie.title),
                self.store.add_to_list(&self.user_id, movie, flags),
            )
            .await;
        if result.is_ok() {
            self.commit_with(|state| state.upsert(movie, flags)).await;
        }
        result
    }

    pub async fn update_in_list(&self, movie_id: &str, flags: ListFlags) -> Result<String, ApiError> {
        let _guard = self.locks.acquire(movie_id).await;
        let result = self
            .status
            .track_message(
                format!("Updating {}", movie_id),
                self.store.update_in_list(&self.user_id, movie_id, flags),
            )
            .await;
        if result.is_ok() && !self.commit_with(|state| state.set_flags(movie_id, flags)).await {
            debug!(movie_id, "updated movie was not in the local list");
        }
        result
    }

    /// Remove a movie. A server `error` leaves the local list untouched.
    pub async fn remove_from_list(&self, movie_id: &str) -> Result<String, ApiError> {
        let _guard = self.locks.acquire(movie_id).await;
        let result = self
            .status
            .track_message(
                format!("Removing {}", movie_id),
                self.store.remove_from_list(&self.user_id, movie_id),
            )
            .await;
        if result.is_ok() {
            self.commit_with(|state| state.remove(movie_id)).await;
        }
        result
    }

    pub async fn cycle(&self, movie: &MovieRef) -> Result<Membership, ApiError> {
        self.apply(movie, Gesture::Cycle).await
    }

    pub async fn toggle_favourite(&self, movie: &MovieRef) -> Result<Membership, ApiError> {
        self.apply(movie, Gesture::ToggleFavourite).await
    }

    /// Run one gesture end to end and return the committed membership.
    ///
    /// The command error wins over a refresh error when both fail.
    #[instrument(skip(self, movie), fields(movie_id = %movie.id))]
    pub async fn apply(&self, movie: &MovieRef, gesture: Gesture) -> Result<Membership, ApiError> {
        let _guard = self.locks.acquire(&movie.id).await;

        let from = self.state.read().await.membership(&movie.id);
        let transition = from.apply(gesture);
        self.status.loading(format!("{} → {}", movie.title, transition.to));

        let outcome = self.execute(movie, &transition).await;
        match &outcome {
            Ok(_) => {
                self.commit(movie, transition.to).await;
                info!(from = %transition.from, to = %transition.to, command = %transition.command, "membership changed");
            }
            Err(e) => {
                warn!(from = %transition.from, command = %transition.command, error = %e, "list command failed");
            }
        }

        let refreshed = self.reload().await;
        match (outcome, refreshed) {
            (Ok(message), Ok(())) => {
                self.status.succeeded(Some(message));
                Ok(transition.to)
            }
            (Ok(_), Err(e)) => {
                self.status.failed(&e);
                Err(e)
            }
            (Err(e), refreshed) => {
                if let Err(refresh_error) = refreshed {
                    warn!(error = %refresh_error, "refresh after failed command also failed");
                }
                self.status.failed(&e);
                Err(e)
            }
        }
    }

    async fn execute(&self, movie: &MovieRef, transition: &Transition) -> Result<String, ApiError> {
        match transition.command {
            ListCommand::Add(flags) => self.store.add_to_list(&self.user_id, movie, flags).await,
            ListCommand::Update(flags) => {
                self.store
                    .update_in_list(&self.user_id, &movie.id, flags)
                    .await
            }
            ListCommand::Remove => self.store.remove_from_list(&self.user_id, &movie.id).await,
        }
    }

    async fn commit(&self, movie: &MovieRef, membership: Membership) {
        self.commit_with(|state| match membership.flags() {
            Some(flags) => state.upsert(movie, flags),
            None => {
                state.remove(&movie.id);
            }
        })
        .await
    }

    async fn commit_with<T>(&self, change: impl FnOnce(&mut ListState) -> T) -> T {
        let mut state = self.state.write().await;
        self.commits.fetch_add(1, Ordering::SeqCst);
        change(&mut state)
    }
}

#[cfg(test)]
mod tests;
