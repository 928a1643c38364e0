use thiserror::Error;

/// Raised when a wire record does not carry what a use site needs,
/// or when a value built locally breaks a model invariant.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ModelError {
    #[error("{entity} is missing required field `{field}`")]
    MissingField {
        entity: &'static str,
        field: &'static str,
    },

    #[error("{entity} has invalid `{field}`: {reason}")]
    InvalidField {
        entity: &'static str,
        field: &'static str,
        reason: String,
    },
}

/// Unwrap a required text field, treating blank strings as absent.
pub(crate) fn require(
    value: Option<String>,
    entity: &'static str,
    field: &'static str,
) -> Result<String, ModelError> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(v),
        _ => Err(ModelError::MissingField { entity, field }),
    }
}
