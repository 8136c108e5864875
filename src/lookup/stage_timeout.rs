//! Timeout wrapper for protocol stages
//!
//! Each bounded stage of a lookup runs under its own limit so a hung page
//! can never stall the batch.

use std::future::Future;
use std::time::Duration;

use super::errors::{LookupError, Stage};

/// Run `operation` under `limit`, reporting expiry as a `StageTimeout` for `stage`
///
/// # Returns
/// * `Ok(T)` - Operation completed in time and succeeded
/// * `Err` - Either the operation failed or the limit was reached
pub async fn with_stage_timeout<F, T>(stage: Stage, limit: Duration, operation: F) -> Result<T, LookupError>
where
    F: Future<Output = Result<T, LookupError>>,
{
    match tokio::time::timeout(limit, operation).await {
        Ok(result) => result,
        Err(_) => Err(LookupError::StageTimeout { stage, after: limit }),
    }
}
