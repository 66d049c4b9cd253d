//! The bb8 pool behind every store call.
//!
//! A request holds one connection for a handful of short statements, so the
//! pool stays small, drops connections that sit idle, and fails a checkout
//! after a few seconds instead of queueing requests behind a stalled database.

use std::time::Duration;

use diesel_async::AsyncPgConnection;
use diesel_async::pooled_connection::AsyncDieselConnectionManager;
use diesel_async::pooled_connection::bb8::{Pool, PooledConnection};

use crate::db::DbProvider;
use crate::error::{DbError, DbResult};

pub type DbPool = Pool<AsyncPgConnection>;
pub type DbConnection<'pool> = PooledConnection<'pool, AsyncPgConnection>;

const CHECKOUT_TIMEOUT: Duration = Duration::from_secs(5);
const IDLE_TIMEOUT: Duration = Duration::from_secs(300);

/// ## Summary
/// Creates the connection pool used by `PgStore`.
///
/// One connection is opened eagerly, so an unreachable database or a bad URL
/// fails at startup rather than on the first request.
///
/// ## Errors
/// Returns an error if `size` is zero or the first connection cannot be opened.
#[tracing::instrument(skip(database_url), fields(pool_size = size))]
pub async fn create_pool(database_url: &str, size: u32) -> anyhow::Result<DbPool> {
    anyhow::ensure!(size > 0, "database.max_connections must be at least 1");

    let manager = AsyncDieselConnectionManager::<AsyncPgConnection>::new(database_url);

    let pool = Pool::builder()
        .max_size(size)
        .min_idle(Some(1))
        .idle_timeout(Some(IDLE_TIMEOUT))
        .connection_timeout(CHECKOUT_TIMEOUT)
        .build(manager)
        .await?;

    tracing::info!(pool_size = size, "Database pool ready");

    Ok(pool)
}

impl DbProvider for DbPool {
    fn get_connection<'a>(
        &'a self,
    ) -> std::pin::Pin<Box<dyn std::future::Future<Output = DbResult<DbConnection<'a>>> + Send + 'a>>
    {
        Box::pin(async move {
            self.get().await.map_err(|e| {
                tracing::warn!(error = %e, "Database connection checkout failed");
                DbError::from(e)
            })
        })
    }
}
