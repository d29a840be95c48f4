//! Request ID generation

use base64::Engine;
use uuid::Uuid;

/// Request ID attached to every handler response
#[derive(Debug, Clone)]
pub struct RequestId {
    /// Primary request ID (x-amz-request-id)
    pub id: String,
    /// Extended request ID (x-amz-id-2), base64 encoded
    pub extended_id: String,
}

impl RequestId {
    /// Generate a new request ID pair
    pub fn new() -> Self {
        let id = Uuid::new_v4().simple().to_string().to_uppercase();
        let extended_id = base64::engine::general_purpose::STANDARD.encode(Uuid::new_v4().as_bytes());
        Self { id, extended_id }
    }

    /// Reuse an id supplied by the caller, e.g. the orchestrator's `RequestId`
    pub fn with_id(id: impl Into<String>) -> Self {
        let id = id.into();
        let extended_id = base64::engine::general_purpose::STANDARD.encode(id.as_bytes());
        Self { id, extended_id }
    }
}

impl Default for RequestId {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_id_generation() {
        let id1 = RequestId::new();
        let id2 = RequestId::new();

        assert_ne!(id1.id, id2.id);
        assert_ne!(id1.extended_id, id2.extended_id);
        assert!(id1.id.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn test_request_id_with_id() {
        let id = RequestId::with_id("test-id-123");
        assert_eq!(id.id, "test-id-123");
        assert_eq!(id.extended_id, "dGVzdC1pZC0xMjM=");
    }
}
