use movielist_models::wire::{bool_as_string, display_as_string};
use movielist_models::{ListEntry, ListFilter, ListFlags, MovieRecord, MovieRef, ReviewDraft, User, UserRecord};
use reqwest::Client;
use serde::Serialize;
use tracing::debug;

use crate::error::ApiError;
use crate::http::{fetch_many, fetch_one, segment, send_mutation};

#[derive(Debug, Serialize)]
struct SignInBody<'a> {
    email: &'a str,
    username: &'a str,
}

#[derive(Debug, Serialize)]
struct AddMovieBody<'a> {
    user_id: &'a str,
    movie_id: &'a str,
    title: &'a str,
    poster: Option<&'a str>,
    #[serde(serialize_with = "bool_as_string")]
    watched: bool,
    #[serde(serialize_with = "bool_as_string")]
    favourite: bool,
}

#[derive(Debug, Serialize)]
struct UpdateMovieBody<'a> {
    user_id: &'a str,
    movie_id: &'a str,
    #[serde(serialize_with = "bool_as_string")]
    watched: bool,
    #[serde(serialize_with = "bool_as_string")]
    favourite: bool,
}

#[derive(Debug, Serialize)]
struct ReviewBody<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    username: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    user_id: Option<&'a str>,
    title: &'a str,
    content: &'a str,
    #[serde(serialize_with = "display_as_string")]
    vote: u8,
}

/// Exchange the Apple identity for the server's user document.
pub async fn sign_in(
    client: &Client,
    api_root: &str,
    email: &str,
    username: &str,
) -> Result<User, ApiError> {
    if email.trim().is_empty() || username.trim().is_empty() {
        return Err(ApiError::InvalidRequest(
            "email and username are required to sign in".to_string(),
        ));
    }
    let url = format!("{}/user/apple_sign_in", api_root);
    debug!(%url, username, "Signing in");
    let body = SignInBody {
        email: email.trim(),
        username: username.trim(),
    };
    fetch_one::<UserRecord, _>(client.post(&url).json(&body), "user/apple_sign_in").await
}

pub async fn add_movie_to_user_list(
    client: &Client,
    api_root: &str,
    user_id: &str,
    movie: &MovieRef,
    flags: ListFlags,
) -> Result<String, ApiError> {
    let url = format!("{}/user/add_movie_to_user_list", api_root);
    debug!(%url, movie_id = %movie.id, ?flags, "Adding movie to user list");
    let body = AddMovieBody {
        user_id,
        movie_id: &movie.id,
        title: &movie.title,
        poster: movie.poster.as_deref(),
        watched: flags.watched(),
        favourite: flags.favourite(),
    };
    send_mutation(client.post(&url).json(&body), "user/add_movie_to_user_list").await
}

pub async fn update_movie_in_user_list(
    client: &Client,
    api_root: &str,
    user_id: &str,
    movie_id: &str,
    flags: ListFlags,
) -> Result<String, ApiError> {
    let url = format!("{}/user/update_movie_in_user_list", api_root);
    debug!(%url, movie_id, ?flags, "Updating movie in user list");
    let body = UpdateMovieBody {
        user_id,
        movie_id,
        watched: flags.watched(),
        favourite: flags.favourite(),
    };
    send_mutation(client.post(&url).json(&body), "user/update_movie_in_user_list").await
}

pub async fn delete_movie_from_user_list(
    client: &Client,
    api_root: &str,
    user_id: &str,
    movie_id: &str,
) -> Result<String, ApiError> {
    let url = format!(
        "{}/user/delete_movie_from_user_list/{}/{}",
        api_root,
        segment(user_id),
        segment(movie_id)
    );
    debug!(%url, "Deleting movie from user list");
    send_mutation(client.delete(&url), "user/delete_movie_from_user_list").await
}

pub async fn get_movies_user_list(
    client: &Client,
    api_root: &str,
    user_id: &str,
    filter: ListFilter,
) -> Result<Vec<ListEntry>, ApiError> {
    let flags = filter.flags();
    let url = format!(
        "{}/user/get_movies_user_list/{}/{}/{}",
        api_root,
        segment(user_id),
        flags.watched(),
        flags.favourite()
    );
    debug!(%url, filter = filter.name(), "Fetching user list");
    fetch_many::<MovieRecord, _>(client.get(&url), "user/get_movies_user_list").await
}

pub async fn add_review(
    client: &Client,
    api_root: &str,
    movie_id: &str,
    user: &User,
    draft: &ReviewDraft,
) -> Result<String, ApiError> {
    let url = format!("{}/user/add_review/{}", api_root, segment(movie_id));
    debug!(%url, "Adding review");
    let body = ReviewBody {
        username: Some(&user.username),
        user_id: Some(&user.id),
        title: draft.title(),
        content: draft.content(),
        vote: draft.vote(),
    };
    send_mutation(client.post(&url).json(&body), "user/add_review").await
}

pub async fn update_review(
    client: &Client,
    api_root: &str,
    review_id: &str,
    draft: &ReviewDraft,
) -> Result<String, ApiError> {
    let url = format!("{}/user/update_review/{}", api_root, segment(review_id));
    debug!(%url, "Updating review");
    let body = ReviewBody {
        username: None,
        user_id: None,
        title: draft.title(),
        content: draft.content(),
        vote: draft.vote(),
    };
    send_mutation(client.post(&url).json(&body), "user/update_review").await
}
