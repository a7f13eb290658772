use std::future::Future;
use std::pin::Pin;

use sqlx::{PgConnection, PgPool};
use tracing::warn;

use crate::error::Result;

/// Future returned by a unit-of-work body. It borrows the transaction's
/// connection for `'c`.
pub type ScopedFuture<'c, T> = Pin<Box<dyn Future<Output = Result<T>> + Send + 'c>>;

/// Runs `work` against a fresh transaction taken from `pool`.
///
/// - `Ok` from `work`: the transaction is committed and the value returned.
///   A failing commit is reported as the error.
/// - `Err` from `work`: the transaction is rolled back and the original error
///   is returned unchanged. A failing rollback is only logged.
///
/// The connection goes back to the pool on every path; if the future is
/// dropped mid-flight (panic, cancellation) the transaction guard rolls back
/// on drop.
pub async fn run<T, F>(pool: &PgPool, work: F) -> Result<T>
where
    F: for<'c> FnOnce(&'c mut PgConnection) -> ScopedFuture<'c, T>,
{
    let mut tx = pool.begin().await?;

    match work(&mut *tx).await {
        Ok(value) => {
            tx.commit().await?;
            Ok(value)
        }
        Err(err) => {
            if let Err(rollback_err) = tx.rollback().await {
                warn!(error = %rollback_err, "rollback failed after unit-of-work error");
            } else {
                warn!(error = %err, "unit-of-work rolled back");
            }
            Err(err)
        }
    }
}
