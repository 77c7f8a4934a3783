use reqwest::{Method, StatusCode};
use std::time::Instant;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;
use uuid::Uuid;

use crate::error::ClientError;

pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("infomart=info"));

    // a second init (tests, embedding apps) is not an error for us
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init();
}

/// One outgoing call. Logged exactly once, when it finishes.
pub struct RequestLog {
    id: Uuid,
    method: Method,
    path: String,
    start: Instant,
}

impl RequestLog {
    pub fn start(method: &Method, path: &str) -> Self {
        Self {
            id: Uuid::new_v4(),
            method: method.clone(),
            path: path.to_string(),
            start: Instant::now(),
        }
    }

    pub fn request_id(&self) -> String {
        self.id.to_string()
    }

    pub fn finish(&self, outcome: Result<StatusCode, &ClientError>) {
        let elapsed = self.start.elapsed();
        match outcome {
            Ok(status) => info!(
                request_id = %self.id,
                method = %self.method,
                path = %self.path,
                status = %status,
                elapsed = ?elapsed,
                "Processed request"
            ),
            Err(ClientError::Http(err)) => error!(
                request_id = %self.id,
                method = %self.method,
                path = %self.path,
                elapsed = ?elapsed,
                value = %err,
                "Failed to send request"
            ),
            Err(err) => warn!(
                request_id = %self.id,
                method = %self.method,
                path = %self.path,
                status = ?err.status(),
                elapsed = ?elapsed,
                value = %err,
                "Request rejected"
            ),
        }
    }
}
