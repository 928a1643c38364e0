use movielist_api::{ApiClient, ApiError, SortOrder};
use movielist_models::{MovieDetails, MovieSummary, Review, ReviewDraft, Troupe, User};
use tokio::sync::watch;

use crate::status::{OperationStatus, StatusTracker};

/// Catalogue, review and sign-in calls with their progress published.
pub struct CatalogueService {
    client: ApiClient,
    status: StatusTracker,
}

impl CatalogueService {
    pub fn new(client: ApiClient) -> Self {
        Self {
            client,
            status: StatusTracker::new(),
        }
    }

    pub fn subscribe(&self) -> watch::Receiver<OperationStatus> {
        self.status.subscribe()
    }

    pub fn status(&self) -> OperationStatus {
        self.status.current()
    }

    pub async fn search(&self, query: &str) -> Result<Vec<MovieSummary>, ApiError> {
        self.status
            .track(format!("Searching for \"{}\"", query), self.client.search_movies(query))
            .await
    }

    pub async fn by_genres(&self, genres: &[String]) -> Result<Vec<MovieSummary>, ApiError> {
        self.status
            .track(
                format!("Loading {} movies", genres.join(", ")),
                self.client.movies_by_genres(genres),
            )
            .await
    }

    pub async fn by_release_year(&self, year: i32) -> Result<Vec<MovieSummary>, ApiError> {
        self.status
            .track(
                format!("Loading movies from {}", year),
                self.client.movies_by_release_year(year),
            )
            .await
    }

    pub async fn sorted(&self, field: &str, order: SortOrder) -> Result<Vec<MovieSummary>, ApiError> {
        self.status
            .track(
                format!("Sorting movies by {}", field),
                self.client.sort_movies(field, order),
            )
            .await
    }

    pub async fn movie(&self, movie_id: &str) -> Result<MovieDetails, ApiError> {
        self.status
            .track("Loading movie", self.client.get_movie(movie_id))
            .await
    }

    pub async fn reviews(&self, movie_id: &str) -> Result<Vec<Review>, ApiError> {
        self.status
            .track("Loading reviews", self.client.movie_reviews(movie_id))
            .await
    }

    pub async fn troupe(&self, troupe_id: &str) -> Result<Troupe, ApiError> {
        self.status
            .track("Loading cast member", self.client.get_troupe(troupe_id))
            .await
    }

    pub async fn sign_in(&self, email: &str, username: &str) -> Result<User, ApiError> {
        self.status
            .track("Signing in", self.client.sign_in(email, username))
            .await
    }

    pub async fn add_review(
        &self,
        movie_id: &str,
        user: &User,
        draft: &ReviewDraft,
    ) -> Result<String, ApiError> {
        self.status
            .track_message("Posting review", self.client.add_review(movie_id, user, draft))
            .await
    }

    pub async fn update_review(&self, review_id: &str, draft: &ReviewDraft) -> Result<String, ApiError> {
        self.status
            .track_message("Updating review", self.client.update_review(review_id, draft))
            .await
    }
}
