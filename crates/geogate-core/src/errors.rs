use anyhow::{Error, anyhow};
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;

use crate::permissions::PermissionKey;

#[derive(Debug)]
pub struct AppError {
    pub status: StatusCode,
    pub error: Error,
    /// Permission key reported back to the client on 403 responses.
    pub permission: Option<String>,
}

impl AppError {
    pub fn new<E>(status: StatusCode, err: E) -> Self
    where
        E: Into<Error>,
    {
        Self {
            status,
            error: err.into(),
            permission: None,
        }
    }

    pub fn internal<E>(err: E) -> Self
    where
        E: Into<Error>,
    {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, err)
    }

    pub fn not_found<E>(err: E) -> Self
    where
        E: Into<Error>,
    {
        Self::new(StatusCode::NOT_FOUND, err)
    }

    pub fn bad_request<E>(err: E) -> Self
    where
        E: Into<Error>,
    {
        Self::new(StatusCode::BAD_REQUEST, err)
    }

    pub fn unauthorized<E>(err: E) -> Self
    where
        E: Into<Error>,
    {
        Self::new(StatusCode::UNAUTHORIZED, err)
    }

    pub fn forbidden<E>(err: E) -> Self
    where
        E: Into<Error>,
    {
        Self::new(StatusCode::FORBIDDEN, err)
    }

    pub fn missing_permission(permission: &PermissionKey) -> Self {
        Self {
            status: StatusCode::FORBIDDEN,
            error: anyhow!("Forbidden: missing permission"),
            permission: Some(permission.to_string()),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let body = match self.permission {
            Some(permission) => json!({
                "error": self.error.to_string(),
                "permission": permission,
            }),
            None => json!({
                "error": self.error.to_string()
            }),
        };

        (self.status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_permission_carries_key() {
        let err = AppError::missing_permission(&PermissionKey::new("reports", "view"));
        assert_eq!(err.status, StatusCode::FORBIDDEN);
        assert_eq!(err.permission.as_deref(), Some("reports:view"));
    }

    #[test]
    fn test_constructors_set_status() {
        assert_eq!(
            AppError::unauthorized(anyhow!("no")).status,
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            AppError::internal(anyhow!("boom")).status,
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert!(AppError::bad_request(anyhow!("bad")).permission.is_none());
    }
}
