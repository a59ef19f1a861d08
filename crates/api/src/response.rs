//! Shared response bodies that are not entities.

use serde::Serialize;

/// `{ "message": ... }` body returned by deletes and auth endpoints.
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
