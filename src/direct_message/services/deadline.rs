//! Bounded execution of storage calls.

use crate::direct_message::{error::StorageError, ports::StorageResult};
use std::future::Future;
use std::time::Duration;

/// Default deadline applied to each storage call.
pub const DEFAULT_OPERATION_DEADLINE: Duration = Duration::from_secs(5);

/// Runs a storage call, failing with [`StorageError::DeadlineExceeded`] if
/// it does not finish within `deadline`.
///
/// Failures are logged here so every storage error is recorded once, at the
/// point it leaves the store.
pub(super) async fn within_deadline<T, F>(
    operation: &'static str,
    deadline: Duration,
    call: F,
) -> StorageResult<T>
where
    F: Future<Output = StorageResult<T>>,
{
    let outcome = tokio::time::timeout(deadline, call)
        .await
        .unwrap_or_else(|_| Err(StorageError::deadline_exceeded(operation, deadline)));

    if let Err(err) = &outcome {
        tracing::error!(operation, error = %err, "storage call failed");
    }
    outcome
}
