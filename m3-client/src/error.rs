//! Client error types

use shared::DocumentError;
use thiserror::Error;

/// Document store error
#[derive(Debug, Error)]
pub enum StoreError {
    /// Store could not be reached (offline, timeout, 5xx)
    #[error("Store unreachable: {0}")]
    Unreachable(String),

    /// Caller is not allowed to read or write the document
    #[error("Permission denied: {0}")]
    PermissionDenied(String),

    /// Document does not exist
    #[error("Not found: {0}")]
    NotFound(String),

    /// Stored record does not match the expected shape
    #[error("Malformed record {collection}/{id}: {reason}")]
    Malformed {
        collection: String,
        id: String,
        reason: String,
    },

    /// HTTP transport error
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl StoreError {
    /// Wrap a decode failure for a document of `collection`
    pub fn malformed(collection: &str, err: DocumentError) -> Self {
        let id = match &err {
            DocumentError::Decode { id, .. } => id.clone(),
            _ => String::new(),
        };
        StoreError::Malformed {
            collection: collection.to_string(),
            id,
            reason: err.to_string(),
        }
    }
}

/// Result type for store operations
pub type StoreResult<T> = Result<T, StoreError>;

/// Catalog query error
///
/// Cloneable so the view model can hold it as explicit error state.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QueryError {
    #[error("Store unreachable: {0}")]
    Unreachable(String),

    #[error("Malformed record: {0}")]
    Malformed(String),

    #[error("Permission denied: {0}")]
    PermissionDenied(String),

    #[error("Not found: {0}")]
    NotFound(String),
}

impl QueryError {
    /// Message suitable for a toast / inline banner
    pub fn user_message(&self) -> &'static str {
        match self {
            QueryError::Unreachable(_) => "Failed to fetch products. Check your connection and try again.",
            QueryError::Malformed(_) => "Some products could not be loaded.",
            QueryError::PermissionDenied(_) => "You do not have access to these products.",
            QueryError::NotFound(_) => "Product not found",
        }
    }
}

impl From<StoreError> for QueryError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Unreachable(msg) => QueryError::Unreachable(msg),
            StoreError::PermissionDenied(msg) => QueryError::PermissionDenied(msg),
            StoreError::NotFound(msg) => QueryError::NotFound(msg),
            StoreError::Malformed { .. } | StoreError::Serialization(_) => {
                QueryError::Malformed(err.to_string())
            }
            StoreError::Http(e) => QueryError::Unreachable(e.to_string()),
        }
    }
}

/// Client error type
#[derive(Debug, Error)]
pub enum ClientError {
    /// Store operation failed
    #[error(transparent)]
    Store(#[from] StoreError),

    /// Catalog query failed
    #[error(transparent)]
    Query(#[from] QueryError),

    /// Sign-in required
    #[error("Authentication required: {0}")]
    Unauthorized(String),

    /// Signed in but not allowed
    #[error("Permission denied: {0}")]
    Forbidden(String),

    /// Resource not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Validation error
    #[error("Validation error: {0}")]
    Validation(String),

    /// Checkout attempted with no cart lines
    #[error("Cart is empty")]
    EmptyCart,

    /// Identity provider failure
    #[error("Auth error: {0}")]
    Auth(String),

    /// Chat relay failure
    #[error("Chat relay error: {0}")]
    Chat(String),

    /// HTTP request failed
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl From<validator::ValidationErrors> for ClientError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let mut fields: Vec<String> = errors
            .field_errors()
            .into_iter()
            .map(|(field, errs)| {
                let message = errs
                    .first()
                    .and_then(|e| e.message.as_ref())
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| "invalid".to_string());
                format!("{field}: {message}")
            })
            .collect();
        fields.sort();
        ClientError::Validation(fields.join(", "))
    }
}

/// Result type for client operations
pub type ClientResult<T> = Result<T, ClientError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_store_error_maps_to_query_error() {
        let err: QueryError = StoreError::Unreachable("offline".into()).into();
        assert_eq!(err, QueryError::Unreachable("offline".into()));

        let err: QueryError = StoreError::Malformed {
            collection: "products".into(),
            id: "p1".into(),
            reason: "missing field `price`".into(),
        }
        .into();
        assert!(matches!(err, QueryError::Malformed(ref m) if m.contains("products/p1")));
    }
}
