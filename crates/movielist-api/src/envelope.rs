use serde::Deserialize;

use crate::error::ApiError;

/// `{ message?, error? }`, returned by every mutation endpoint.
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
pub struct Envelope {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

impl Envelope {
    /// `error` wins over `message`; an envelope with neither is unexpected.
    pub fn into_result(self, endpoint: &str, body: &str) -> Result<String, ApiError> {
        if let Some(error) = self.error {
            return Err(ApiError::Server(error));
        }
        self.message.ok_or_else(|| ApiError::UnexpectedResponse {
            endpoint: endpoint.to_string(),
            body: body.to_string(),
        })
    }
}

/// Collection endpoints answer either with a bare array or with `{ items: [...] }`.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum Collection<T> {
    Bare(Vec<T>),
    Wrapped { items: Vec<T> },
}

impl<T> Collection<T> {
    pub fn into_vec(self) -> Vec<T> {
        match self {
            Collection::Bare(items) | Collection::Wrapped { items } => items,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_error_wins_over_message() {
        let envelope: Envelope =
            serde_json::from_value(json!({"message": "ok", "error": "nope"})).unwrap();
        let err = envelope.into_result("user/add_movie_to_user_list", "").unwrap_err();
        assert_eq!(err.to_string(), "nope");
    }

    #[test]
    fn test_message_is_success() {
        let envelope: Envelope =
            serde_json::from_value(json!({"message": "Movie removed successfully."})).unwrap();
        assert_eq!(
            envelope.into_result("user/delete_movie_from_user_list", "").unwrap(),
            "Movie removed successfully."
        );
    }

    #[test]
    fn test_empty_envelope_is_unexpected() {
        let body = r#"{"Movie not found in user's list.": "Not Found"}"#;
        let envelope: Envelope = serde_json::from_str(body).unwrap();
        let err = envelope
            .into_result("user/delete_movie_from_user_list", body)
            .unwrap_err();
        assert!(matches!(err, ApiError::UnexpectedResponse { .. }));
    }

    #[test]
    fn test_collection_shapes() {
        let bare: Collection<u32> = serde_json::from_value(json!([1, 2, 3])).unwrap();
        assert_eq!(bare.into_vec(), vec![1, 2, 3]);

        let wrapped: Collection<u32> =
            serde_json::from_value(json!({"items": [4, 5], "total": 2})).unwrap();
        assert_eq!(wrapped.into_vec(), vec![4, 5]);

        assert!(serde_json::from_value::<Collection<u32>>(json!({"movies": []})).is_err());
    }
}
