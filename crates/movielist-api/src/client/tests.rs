use super::*;
use crate::error::ErrorKind;
use mockito::{Matcher, Server};
use serde_json::json;

fn client_for(server: &Server) -> ApiClient {
    ApiClient::new(format!("{}/api", server.url()))
}

#[tokio::test]
async fn test_search_reads_items_envelope_and_skips_invalid() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", "/api/movies/get_movies/alien")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            json!({"items": [
                {"_id": "m1", "title": "Alien", "poster": "a.jpg", "release_year": 1979},
                {"_id": "m2"}
            ]})
            .to_string(),
        )
        .create_async()
        .await;

    let movies = client_for(&server).search_movies("alien").await.unwrap();
    mock.assert_async().await;

    assert_eq!(movies.len(), 1);
    assert_eq!(movies[0].id, "m1");
    assert_eq!(movies[0].release_year, Some(1979));
}

#[tokio::test]
async fn test_empty_search_is_rejected_locally() {
    let client = ApiClient::new("http://127.0.0.1:1/api");
    let err = client.search_movies("   ").await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidRequest);
}

#[tokio::test]
async fn test_genres_are_repeated_query_params() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", "/api/movies/get_movies_by_genres")
        .match_query(Matcher::Exact("genres=Horror&genres=Drama".into()))
        .with_status(200)
        .with_body(json!([{"_id": "m1", "title": "The Shining"}]).to_string())
        .create_async()
        .await;

    let genres = vec!["Horror".to_string(), "Drama".to_string()];
    let movies = client_for(&server).movies_by_genres(&genres).await.unwrap();
    mock.assert_async().await;
    assert_eq!(movies[0].title, "The Shining");
}

#[tokio::test]
async fn test_sort_descending_uses_minus_one() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", "/api/movies/sort/vote_average/-1")
        .with_status(200)
        .with_body(json!({"items": []}).to_string())
        .create_async()
        .await;

    let movies = client_for(&server)
        .sort_movies("vote_average", SortOrder::Descending)
        .await
        .unwrap();
    mock.assert_async().await;
    assert!(movies.is_empty());
}

#[tokio::test]
async fn test_get_movie_missing_title_is_invalid() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", "/api/movies/get_movie/m1")
        .with_status(200)
        .with_body(json!({"_id": "m1", "overview": "no title"}).to_string())
        .create_async()
        .await;

    let err = client_for(&server).get_movie("m1").await.unwrap_err();
    assert!(matches!(err, ApiError::Invalid { .. }));
    assert_eq!(err.kind(), ErrorKind::Decode);
}

#[tokio::test]
async fn test_reviews_decode() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", "/api/movies/reviews/m1")
        .with_status(200)
        .with_body(
            json!({"items": [{
                "title": "Great", "content": "Loved it", "vote": "9",
                "user_id": "u1", "username": "carmine"
            }]})
            .to_string(),
        )
        .create_async()
        .await;

    let reviews = client_for(&server).movie_reviews("m1").await.unwrap();
    assert_eq!(reviews.len(), 1);
    assert_eq!(reviews[0].vote, 9.0);
}

#[tokio::test]
async fn test_fetch_list_reads_bare_array_with_string_flags() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", "/api/user/get_movies_user_list/u1/true/false")
        .with_status(200)
        .with_body(
            json!([
                {"_id": "m1", "title": "Heat", "watched": "true", "favourite": "false"},
                {"_id": "m2", "title": "Ronin", "watched": true, "favourite": false}
            ])
            .to_string(),
        )
        .create_async()
        .await;

    let entries = client_for(&server)
        .fetch_list("u1", ListFilter::Watched)
        .await
        .unwrap();
    mock.assert_async().await;
    assert_eq!(entries.len(), 2);
    assert!(entries.iter().all(|e| e.watched && !e.favourite));
}

#[tokio::test]
async fn test_add_to_list_sends_flags_as_strings() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", "/api/user/add_movie_to_user_list")
        .match_body(Matcher::PartialJson(json!({
            "user_id": "u1",
            "movie_id": "m1",
            "title": "Heat",
            "watched": "true",
            "favourite": "true"
        })))
        .with_status(200)
        .with_body(json!({"message": "Successfully added movie."}).to_string())
        .create_async()
        .await;

    let movie = MovieRef::new("m1", "Heat", None);
    let message = client_for(&server)
        .add_to_list("u1", &movie, ListFlags::FAVOURITE)
        .await
        .unwrap();
    mock.assert_async().await;
    assert_eq!(message, "Successfully added movie.");
}

#[tokio::test]
async fn test_update_in_list_posts_flags() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", "/api/user/update_movie_in_user_list")
        .match_body(Matcher::PartialJson(json!({
            "user_id": "u1",
            "movie_id": "m1",
            "watched": "true",
            "favourite": "false"
        })))
        .with_status(200)
        .with_body(json!({"message": "Successfully updated the movie's watched status."}).to_string())
        .create_async()
        .await;

    client_for(&server)
        .update_in_list("u1", "m1", ListFlags::WATCHED)
        .await
        .unwrap();
    mock.assert_async().await;
}

#[tokio::test]
async fn test_remove_error_envelope_is_verbatim() {
    let mut server = Server::new_async().await;
    server
        .mock("DELETE", "/api/user/delete_movie_from_user_list/u1/m1")
        .with_status(200)
        .with_body(json!({"error": "Movie not found in user's list."}).to_string())
        .create_async()
        .await;

    let err = client_for(&server)
        .remove_from_list("u1", "m1")
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Server);
    assert_eq!(err.to_string(), "Movie not found in user's list.");
}

#[tokio::test]
async fn test_remove_without_message_or_error_is_unexpected() {
    let mut server = Server::new_async().await;
    server
        .mock("DELETE", "/api/user/delete_movie_from_user_list/u1/m1")
        .with_status(200)
        .with_body(r#"{"Movie not found in user's list.": "Not Found"}"#)
        .create_async()
        .await;

    let err = client_for(&server)
        .remove_from_list("u1", "m1")
        .await
        .unwrap_err();
    assert!(matches!(err, ApiError::UnexpectedResponse { .. }));
}

#[tokio::test]
async fn test_error_status_prefers_error_envelope() {
    let mut server = Server::new_async().await;
    server
        .mock("POST", "/api/user/add_review/m1")
        .with_status(400)
        .with_body(json!({"error": "Missing required parameters"}).to_string())
        .create_async()
        .await;
    server
        .mock("GET", "/api/movies/get_movie/m2")
        .with_status(500)
        .with_body("Internal Server Error")
        .create_async()
        .await;

    let client = client_for(&server);
    let draft = ReviewDraft::new("Title", "Body", 7).unwrap();
    let err = client
        .add_review("m1", &User::new("u1", "carmine"), &draft)
        .await
        .unwrap_err();
    assert_eq!(err.to_string(), "Missing required parameters");

    let err = client.get_movie("m2").await.unwrap_err();
    assert!(matches!(err, ApiError::Status { status: 500, .. }));
    assert_eq!(err.kind(), ErrorKind::Transport);
}

#[tokio::test]
async fn test_add_review_sends_vote_as_string() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", "/api/user/add_review/m1")
        .match_body(Matcher::PartialJson(json!({
            "user_id": "u1",
            "username": "carmine",
            "title": "Title",
            "content": "Body",
            "vote": "7"
        })))
        .with_status(200)
        .with_body(json!({"message": "Successfully added review."}).to_string())
        .create_async()
        .await;

    let draft = ReviewDraft::new("Title", "Body", 7).unwrap();
    client_for(&server)
        .add_review("m1", &User::new("u1", "carmine"), &draft)
        .await
        .unwrap();
    mock.assert_async().await;
}

#[tokio::test]
async fn test_sign_in_posts_identity() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", "/api/user/apple_sign_in")
        .match_body(Matcher::Json(json!({"email": "c@example.com", "username": "carmine"})))
        .with_status(200)
        .with_body(json!({"_id": {"$oid": "u1"}, "username": "carmine", "email": "c@example.com"}).to_string())
        .create_async()
        .await;

    let user = client_for(&server)
        .sign_in(" c@example.com ", "carmine")
        .await
        .unwrap();
    mock.assert_async().await;
    assert_eq!(user.id, "u1");
}

#[tokio::test]
async fn test_troupe_decodes_filmography() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", "/api/troupe/get_troupe/t1")
        .with_status(200)
        .with_body(
            json!({
                "_id": "t1",
                "full_name": "Al Pacino",
                "type": "actor",
                "movies": [{"_id": "m1", "title": "Heat"}]
            })
            .to_string(),
        )
        .create_async()
        .await;

    let troupe = client_for(&server).get_troupe("t1").await.unwrap();
    assert_eq!(troupe.movies.len(), 1);
}

#[tokio::test]
async fn test_from_config_uses_api_root() {
    let config = ApiConfig {
        base_url: "http://localhost:5000/".to_string(),
        timeout_seconds: Some(5),
    };
    let client = ApiClient::from_config(&config).unwrap();
    assert_eq!(client.api_root(), "http://localhost:5000/api");
}
