use movielist_models::ModelError;
use reqwest::{RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, warn};

use crate::envelope::{Collection, Envelope};
use crate::error::ApiError;

async fn read(request: RequestBuilder, endpoint: &str) -> Result<String, ApiError> {
    let response = request.header("Accept", "application/json").send().await?;
    let status = response.status();
    let body = response.text().await?;
    debug!(endpoint, status = status.as_u16(), bytes = body.len(), "response received");

    if !status.is_success() {
        return Err(error_from_status(endpoint, status, body));
    }
    Ok(body)
}

fn error_from_status(endpoint: &str, status: StatusCode, body: String) -> ApiError {
    if let Ok(Envelope {
        error: Some(error), ..
    }) = serde_json::from_str::<Envelope>(&body)
    {
        return ApiError::Server(error);
    }
    ApiError::Status {
        endpoint: endpoint.to_string(),
        status: status.as_u16(),
        body,
    }
}

fn parse_value(endpoint: &str, body: &str) -> Result<Value, ApiError> {
    let value: Value = serde_json::from_str(body).map_err(|source| ApiError::Decode {
        endpoint: endpoint.to_string(),
        source,
    })?;

    // Read endpoints can still answer 200 with an error envelope.
    if let Some(error) = value.get("error").and_then(Value::as_str) {
        return Err(ApiError::Server(error.to_string()));
    }
    Ok(value)
}

fn from_value<T: DeserializeOwned>(endpoint: &str, value: Value) -> Result<T, ApiError> {
    serde_json::from_value(value).map_err(|source| ApiError::Decode {
        endpoint: endpoint.to_string(),
        source,
    })
}

/// Fetch a single entity and validate it for its use site.
pub(crate) async fn fetch_one<R, T>(request: RequestBuilder, endpoint: &str) -> Result<T, ApiError>
where
    R: DeserializeOwned,
    T: TryFrom<R, Error = ModelError>,
{
    let body = read(request, endpoint).await?;
    let value = parse_value(endpoint, &body)?;
    let record: R = from_value(endpoint, value)?;
    T::try_from(record).map_err(|source| ApiError::Invalid {
        endpoint: endpoint.to_string(),
        source,
    })
}

/// Fetch a collection in either envelope shape. Rows that fail to decode or
/// miss required fields are skipped with a warning.
pub(crate) async fn fetch_many<R, T>(
    request: RequestBuilder,
    endpoint: &str,
) -> Result<Vec<T>, ApiError>
where
    R: DeserializeOwned,
    T: TryFrom<R, Error = ModelError>,
{
    let body = read(request, endpoint).await?;
    let value = parse_value(endpoint, &body)?;
    let rows: Collection<Value> = from_value(endpoint, value)?;
    Ok(validate_all(endpoint, rows.into_vec()))
}

pub(crate) fn validate_all<R, T>(endpoint: &str, rows: Vec<Value>) -> Vec<T>
where
    R: DeserializeOwned,
    T: TryFrom<R, Error = ModelError>,
{
    let total = rows.len();
    let items: Vec<T> = rows
        .into_iter()
        .filter_map(|row| {
            let record: R = match serde_json::from_value(row) {
                Ok(record) => record,
                Err(e) => {
                    warn!(endpoint, error = %e, "Skipping undecodable record");
                    return None;
                }
            };
            match T::try_from(record) {
                Ok(item) => Some(item),
                Err(e) => {
                    warn!(endpoint, error = %e, "Skipping invalid record");
                    None
                }
            }
        })
        .collect();
    if items.len() != total {
        debug!(endpoint, kept = items.len(), total, "collection had invalid records");
    }
    items
}

/// Send a mutation and unwrap its `{message?, error?}` envelope.
pub(crate) async fn send_mutation(request: RequestBuilder, endpoint: &str) -> Result<String, ApiError> {
    let body = read(request, endpoint).await?;
    let envelope: Envelope = serde_json::from_str(&body).map_err(|source| ApiError::Decode {
        endpoint: endpoint.to_string(),
        source,
    })?;
    envelope.into_result(endpoint, &body)
}

/// Percent-encode one path segment.
pub(crate) fn segment(value: &str) -> String {
    urlencoding::encode(value).into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use movielist_models::{MovieRecord, MovieSummary};
    use serde_json::json;

    #[test]
    fn test_mistyped_row_is_skipped() {
        let rows = vec![
            json!({"_id": "m1", "title": "Alien", "genres": ["Horror"]}),
            json!({"_id": "m2", "title": "Heat", "genres": "Crime"}),
            json!({"_id": "m3"}),
        ];
        let movies: Vec<MovieSummary> = validate_all::<MovieRecord, _>("movies/get_movies", rows);
        assert_eq!(movies.len(), 1);
        assert_eq!(movies[0].id, "m1");
    }
}
