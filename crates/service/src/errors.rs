use thiserror::Error;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("validation error: {0}")]
    Validation(String),
    #[error("not found: {0}")]
    NotFound(String),
    #[error("forbidden: {0}")]
    Forbidden(String),
    #[error("database error: {0}")]
    Db(String),
    #[error("model error: {0}")]
    Model(#[from] models::errors::ModelError),
}

impl ServiceError {
    pub fn not_found(entity: &str) -> Self { Self::NotFound(format!("{} not found", entity)) }

    pub fn forbidden(reason: impl Into<String>) -> Self { Self::Forbidden(reason.into()) }

    /// Stable numeric code for external mapping/logging
    pub fn code(&self) -> u16 {
        match self {
            ServiceError::Validation(_) => 1001,
            ServiceError::NotFound(_) => 1003,
            ServiceError::Forbidden(_) => 1004,
            ServiceError::Db(_) => 1200,
            ServiceError::Model(_) => 1201,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_message_names_entity() {
        let err = ServiceError::not_found("private message");
        assert_eq!(err.to_string(), "not found: private message not found");
        assert_eq!(err.code(), 1003);
    }

    #[test]
    fn model_errors_convert() {
        let err: ServiceError = models::errors::ModelError::Validation("username required".into()).into();
        assert!(matches!(err, ServiceError::Model(_)));
    }
}
