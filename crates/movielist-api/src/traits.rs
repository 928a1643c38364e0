use async_trait::async_trait;
use movielist_models::{ListEntry, ListFilter, ListFlags, MovieRef};

use crate::error::ApiError;

/// The remote side of a user's movie list.
///
/// Mutations resolve to the server's success message; a populated `error`
/// field comes back as [`ApiError::Server`].
#[async_trait]
pub trait MovieStore: Send + Sync {
    async fn add_to_list(
        &self,
        user_id: &str,
        movie: &MovieRef,
        flags: ListFlags,
    ) -> Result<String, ApiError>;

    async fn update_in_list(
        &self,
        user_id: &str,
        movie_id: &str,
        flags: ListFlags,
    ) -> Result<String, ApiError>;

    async fn remove_from_list(&self, user_id: &str, movie_id: &str) -> Result<String, ApiError>;

    async fn fetch_list(&self, user_id: &str, filter: ListFilter) -> Result<Vec<ListEntry>, ApiError>;
}
