//! Per-call context: inbound metadata plus a cancellation signal.
//!
//! The transport layer builds one `CallContext` per inbound call. Nothing in
//! it is shared between calls except the cancellation token the caller
//! chooses to hand in.

use std::collections::HashMap;

use tokio_util::sync::CancellationToken;

use crate::errors::ServiceError;

pub const AUTHORIZATION: &str = "authorization";

#[derive(Debug, Clone, Default)]
pub struct CallContext {
    metadata: HashMap<String, String>,
    cancel: CancellationToken,
}

impl CallContext {
    pub fn new() -> Self { Self::default() }

    /// Metadata keys are case-insensitive, like HTTP/2 and gRPC headers.
    pub fn with_metadata(mut self, key: &str, value: impl Into<String>) -> Self {
        self.metadata.insert(key.to_ascii_lowercase(), value.into());
        self
    }

    pub fn with_bearer(self, token: &str) -> Self {
        self.with_metadata(AUTHORIZATION, format!("Bearer {token}"))
    }

    pub fn with_cancellation(mut self, cancel: CancellationToken) -> Self {
        self.cancel = cancel;
        self
    }

    pub fn metadata(&self, key: &str) -> Option<&str> {
        self.metadata.get(&key.to_ascii_lowercase()).map(String::as_str)
    }

    pub fn cancellation(&self) -> &CancellationToken { &self.cancel }

    pub fn is_cancelled(&self) -> bool { self.cancel.is_cancelled() }

    /// Called before each storage round trip; a cancelled call starts no new work.
    pub fn ensure_active(&self) -> Result<(), ServiceError> {
        if self.cancel.is_cancelled() {
            return Err(ServiceError::Cancelled);
        }
        Ok(())
    }
}
