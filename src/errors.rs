pub type AppResult<T> = Result<T, AppError>;

#[derive(thiserror::Error, Debug)]
pub enum AppError {
    #[error("forbidden: {0}")]
    Forbidden(String),
    #[error("not found: {0}")]
    NotFound(String),
    #[error("bad request: {0}")]
    BadRequest(String),
    #[error("conflict: {0}")]
    Conflict(String),
    #[error("configuration error: {0}")]
    Configuration(String),
    #[error("io error")]
    Io(#[from] std::io::Error),
    #[error("invalid seed data at `{path}`: {source}")]
    Seed {
        path: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("internal error: {0}")]
    Internal(String),
}

impl AppError {
    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::Forbidden(message.into())
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound(message.into())
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::BadRequest(message.into())
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        Self::Conflict(message.into())
    }

    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration(message.into())
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    /// Short machine-readable code, stable across message changes.
    pub fn kind(&self) -> &'static str {
        match self {
            AppError::Forbidden(_) => "forbidden",
            AppError::NotFound(_) => "not_found",
            AppError::BadRequest(_) => "bad_request",
            AppError::Conflict(_) => "conflict",
            AppError::Configuration(_) => "configuration",
            AppError::Io(_) => "io",
            AppError::Seed { .. } => "seed",
            AppError::Internal(_) => "internal",
        }
    }
}

impl From<serde_path_to_error::Error<serde_json::Error>> for AppError {
    fn from(value: serde_path_to_error::Error<serde_json::Error>) -> Self {
        let path = value.path().to_string();
        Self::Seed {
            path,
            source: value.into_inner(),
        }
    }
}

impl From<anyhow::Error> for AppError {
    fn from(value: anyhow::Error) -> Self {
        Self::Internal(value.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kinds_are_stable() {
        assert_eq!(AppError::forbidden("x").kind(), "forbidden");
        assert_eq!(AppError::not_found("x").kind(), "not_found");
        assert_eq!(AppError::conflict("x").kind(), "conflict");
        assert_eq!(AppError::configuration("x").kind(), "configuration");
    }

    #[test]
    fn seed_error_carries_json_path() {
        let raw = r#"{"users": [{"id": 1}]}"#;

        #[derive(Debug, serde::Deserialize)]
        #[allow(dead_code)]
        struct Users {
            users: Vec<Named>,
        }
        #[derive(Debug, serde::Deserialize)]
        #[allow(dead_code)]
        struct Named {
            id: String,
        }

        let de = &mut serde_json::Deserializer::from_str(raw);
        let err = serde_path_to_error::deserialize::<_, Users>(de).unwrap_err();
        let err = AppError::from(err);
        assert_eq!(err.kind(), "seed");
        assert!(err.to_string().contains("users[0].id"), "got: {err}");
    }
}
