//! Timeout enforcement.
//!
//! # Responsibilities
//! - Wrap upstream fetches with a deadline
//! - Cancel the fetch future on expiry
//!
//! Dropping the future abandons the request from the relay's point of view;
//! the socket is closed whenever the connection pool gets around to it.

use std::future::Future;
use std::time::Duration;

use tokio::time::timeout;

use crate::news::error::{FetchError, FetchResult};

/// Run `fut`, failing with [`FetchError::Timeout`] if it takes longer than
/// `deadline`.
pub async fn with_deadline<F, T>(deadline: Duration, fut: F) -> FetchResult<T>
where
    F: Future<Output = FetchResult<T>>,
{
    match timeout(deadline, fut).await {
        Ok(result) => result,
        Err(_) => {
            tracing::warn!(deadline_secs = deadline.as_secs(), "News fetch timed out");
            Err(FetchError::Timeout(deadline))
        }
    }
}
